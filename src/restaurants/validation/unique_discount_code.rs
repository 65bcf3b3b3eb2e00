use async_trait::async_trait;
use serde_json::Value;

use crate::{
    restaurants::{
        models::restaurant_filter::{RestaurantColumn, RestaurantFilter},
        store::RestaurantStore,
    },
    validation::{
        check::{AsyncCheck, Verdict},
        errors::RuleError,
        violation::ViolationKind,
    },
};

use super::{Mode, RestaurantContext};

/// A discount code may appear on at most one restaurant per owner.
pub struct UniqueDiscountCode {
    mode: Mode,
}

impl UniqueDiscountCode {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }
}

#[async_trait]
impl AsyncCheck<RestaurantContext> for UniqueDiscountCode {
    fn kind(&self) -> ViolationKind {
        ViolationKind::Uniqueness
    }

    async fn check(&self, value: &Value, context: &RestaurantContext) -> Result<Verdict, RuleError> {
        // non-string codes are reported by the format rule
        let Some(code) = value.as_str().map(str::trim).filter(|code| !code.is_empty()) else {
            return Ok(Verdict::Pass);
        };

        match self.mode {
            Mode::Create => {
                check_discount_code(code, context.owner_id, context.store.as_ref()).await
            }
            Mode::Update => {
                let Some(restaurant_id) = context.restaurant_id else {
                    return Err(RuleError::MissingContext("restaurantId"));
                };

                check_discount_code_on_update(
                    code,
                    context.owner_id,
                    restaurant_id,
                    context.store.as_ref(),
                )
                .await
            }
        }
    }
}

pub async fn check_discount_code(
    code: &str,
    owner_id: i64,
    store: &dyn RestaurantStore,
) -> Result<Verdict, RuleError> {
    let filter = RestaurantFilter::new()
        .eq(RestaurantColumn::DiscountCode, code)
        .eq(RestaurantColumn::UserId, owner_id);

    let count = store.count(&filter).await?;

    Ok(Verdict::from(count == 0))
}

/// Same as [`check_discount_code`], ignoring the restaurant being updated.
pub async fn check_discount_code_on_update(
    code: &str,
    owner_id: i64,
    restaurant_id: i64,
    store: &dyn RestaurantStore,
) -> Result<Verdict, RuleError> {
    let filter = RestaurantFilter::new()
        .eq(RestaurantColumn::DiscountCode, code)
        .eq(RestaurantColumn::UserId, owner_id)
        .ne(RestaurantColumn::Id, restaurant_id);

    let count = store.count(&filter).await?;

    Ok(Verdict::from(count == 0))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::restaurants::{
        models::restaurant::Restaurant,
        store::testing::{FailingRestaurantStore, MemoryRestaurantStore},
    };

    fn restaurant(id: i64, user_id: i64, discount_code: &str) -> Restaurant {
        Restaurant {
            id,
            user_id,
            discount_code: Some(discount_code.to_string()),
        }
    }

    fn store() -> MemoryRestaurantStore {
        MemoryRestaurantStore::new(vec![
            restaurant(42, 7, "SAVE10"),
            restaurant(43, 7, "SAVE20"),
            restaurant(50, 8, "SHARED"),
        ])
    }

    #[tokio::test]
    async fn create_passes_for_unused_code() {
        let verdict = check_discount_code("SAVE30", 7, &store()).await.unwrap();

        assert_eq!(verdict, Verdict::Pass);
    }

    #[tokio::test]
    async fn create_fails_for_code_used_by_same_owner() {
        let verdict = check_discount_code("SAVE10", 7, &store()).await.unwrap();

        assert_eq!(verdict, Verdict::Fail);
    }

    #[tokio::test]
    async fn codes_are_scoped_by_owner() {
        let verdict = check_discount_code("SHARED", 7, &store()).await.unwrap();

        assert_eq!(verdict, Verdict::Pass);
    }

    #[tokio::test]
    async fn update_ignores_the_restaurant_itself() {
        let store = store();

        assert_eq!(
            check_discount_code_on_update("SAVE10", 7, 42, &store)
                .await
                .unwrap(),
            Verdict::Pass
        );
        assert_eq!(
            check_discount_code_on_update("SAVE20", 7, 42, &store)
                .await
                .unwrap(),
            Verdict::Fail
        );
    }

    #[tokio::test]
    async fn blank_codes_never_query() {
        let store = Arc::new(store());
        let context = RestaurantContext::new(7, None, store.clone());
        let check = UniqueDiscountCode::new(Mode::Create);

        for value in [json!(""), json!("   "), json!(null), json!(10)] {
            assert_eq!(check.check(&value, &context).await.unwrap(), Verdict::Pass);
        }

        assert_eq!(store.queries(), 0);
    }

    #[tokio::test]
    async fn candidate_code_is_trimmed() {
        let context = RestaurantContext::new(7, None, Arc::new(store()));
        let check = UniqueDiscountCode::new(Mode::Create);

        assert_eq!(
            check.check(&json!(" SAVE10 "), &context).await.unwrap(),
            Verdict::Fail
        );
    }

    #[tokio::test]
    async fn update_without_target_is_an_error() {
        let context = RestaurantContext::new(7, None, Arc::new(store()));
        let check = UniqueDiscountCode::new(Mode::Update);

        let result = check.check(&json!("SAVE10"), &context).await;

        assert!(matches!(result, Err(RuleError::MissingContext("restaurantId"))));
    }

    #[tokio::test]
    async fn query_failures_propagate() {
        let result = check_discount_code("SAVE10", 7, &FailingRestaurantStore).await;

        assert!(matches!(result, Err(RuleError::Query(_))));
    }
}
