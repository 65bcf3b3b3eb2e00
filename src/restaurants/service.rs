use std::sync::Arc;

use serde_json::Value;

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError},
    validation::{
        executor::{RuleSet, ValidationOutcome},
        payload::Payload,
    },
};

use super::{
    dtos::restaurant_draft::RestaurantDraft,
    errors::RestaurantsApiError,
    store::RestaurantStore,
    validation::{RestaurantContext, CREATE_RULES, UPDATE_RULES},
};

pub async fn validate_create(
    payload: &Payload,
    owner_id: i64,
    store: Arc<dyn RestaurantStore>,
) -> Result<RestaurantDraft, ApiError> {
    let context = RestaurantContext::new(owner_id, None, store);

    let mut draft = validate(&CREATE_RULES, payload, &context).await?;
    draft.user_id = owner_id;

    Ok(draft)
}

pub async fn validate_update(
    payload: &Payload,
    owner_id: i64,
    restaurant_id: i64,
    store: Arc<dyn RestaurantStore>,
) -> Result<RestaurantDraft, ApiError> {
    let context = RestaurantContext::new(owner_id, Some(restaurant_id), store);

    let mut draft = validate(&UPDATE_RULES, payload, &context).await?;
    draft.id = Some(restaurant_id);
    draft.user_id = owner_id;

    Ok(draft)
}

async fn validate(
    rules: &RuleSet<RestaurantContext>,
    payload: &Payload,
    context: &RestaurantContext,
) -> Result<RestaurantDraft, ApiError> {
    match rules.run(payload, context).await {
        Ok(ValidationOutcome::Valid(fields)) => {
            match serde_json::from_value::<RestaurantDraft>(Value::Object(fields)) {
                Ok(draft) => Ok(draft),
                Err(e) => {
                    tracing::error!(%e, "validated restaurant did not deserialize");
                    Err(DefaultApiError::InternalServerError.value())
                }
            }
        }
        Ok(ValidationOutcome::Invalid(violations)) => {
            tracing::debug!(
                owner_id = context.owner_id,
                violations = violations.len(),
                "rejected restaurant payload"
            );
            Err(RestaurantsApiError::ValidationFailed(violations).value())
        }
        Err(e) => {
            tracing::error!(%e, owner_id = context.owner_id, "restaurant validation did not complete");
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}
