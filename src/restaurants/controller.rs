use axum::{
    extract::{Multipart, Path, State},
    headers::{authorization::Bearer, Authorization},
    Json, TypedHeader,
};

use crate::{
    app::{models::api_error::ApiError, util::multipart::multipart::get_payload},
    auth::jwt::models::claims::Claims,
    AppState,
};

use super::{
    dtos::restaurant_draft::RestaurantDraft,
    service,
    validation::MAX_FILE_SIZE,
};

pub async fn create_restaurant(
    State(state): State<AppState>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    multipart: Multipart,
) -> Result<Json<RestaurantDraft>, ApiError> {
    let authorization = authorization.map(|TypedHeader(authorization)| authorization);

    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => {
            let payload = get_payload(multipart, MAX_FILE_SIZE).await?;

            match service::validate_create(&payload, claims.id, state.store.clone()).await {
                Ok(draft) => Ok(Json(draft)),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i64>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    multipart: Multipart,
) -> Result<Json<RestaurantDraft>, ApiError> {
    let authorization = authorization.map(|TypedHeader(authorization)| authorization);

    match Claims::from_header(authorization, &state.envy.jwt_secret) {
        Ok(claims) => {
            let payload = get_payload(multipart, MAX_FILE_SIZE).await?;

            match service::validate_update(&payload, claims.id, restaurant_id, state.store.clone())
                .await
            {
                Ok(draft) => Ok(Json(draft)),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Arc,
        time::{SystemTime, UNIX_EPOCH},
    };

    use axum::{
        body::Body,
        http::{
            header::{AUTHORIZATION, CONTENT_TYPE},
            Request, StatusCode,
        },
        Router,
    };
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        app::{
            env::Envy,
            util::multipart::{file_validation::tests::PNG_HEADER, multipart::testing::Form},
        },
        restaurants::{
            models::restaurant::Restaurant,
            store::{
                testing::{FailingRestaurantStore, MemoryRestaurantStore},
                RestaurantStore,
            },
            validation::DISCOUNT_CODE_TAKEN_MESSAGE,
        },
        router, AppState,
    };

    const SECRET: &str = "secret";
    const OWNER: i64 = 7;

    fn app(store: Arc<dyn RestaurantStore>) -> Router {
        router(AppState {
            store,
            envy: Arc::new(Envy {
                app_env: "test".to_string(),
                port: None,
                database_url: String::new(),
                jwt_secret: SECRET.to_string(),
            }),
        })
    }

    fn token(owner_id: i64) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        encode(
            &Header::default(),
            &json!({ "id": owner_id, "iat": now, "exp": now + 3600 }),
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .unwrap()
    }

    fn pizza_place() -> Form {
        Form::new()
            .text("name", " Pizza Place ")
            .text("address", "Main St 1")
            .text("postalCode", "28000")
            .text("shippingCosts", "2.5")
            .text("restaurantCategoryId", "3")
    }

    fn holding(id: i64, discount_code: &str) -> Restaurant {
        Restaurant {
            id,
            user_id: OWNER,
            discount_code: Some(discount_code.to_string()),
        }
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        token: Option<String>,
        body: Body,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, Form::content_type());

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn create_answers_with_the_sanitized_draft() {
        let form = pizza_place()
            .text("discountCode", " SAVE10 ")
            .file("logo", "logo.png", "image/png", &PNG_HEADER);

        let (status, body) = send(
            app(Arc::new(MemoryRestaurantStore::default())),
            "POST",
            "/restaurants",
            Some(token(OWNER)),
            form.into_body(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["userId"], json!(OWNER));
        assert_eq!(body["name"], json!("Pizza Place"));
        assert_eq!(body["shippingCosts"], json!(2.5));
        assert_eq!(body["restaurantCategoryId"], json!(3));
        assert_eq!(body["discountCode"], json!("SAVE10"));
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn validation_failure_lists_every_violation() {
        let store = Arc::new(MemoryRestaurantStore::new(vec![holding(1, "SAVE10")]));
        let form = pizza_place()
            .text("userId", "8")
            .text("discountCode", "SAVE10");

        let (status, body) = send(
            app(store),
            "POST",
            "/restaurants",
            Some(token(OWNER)),
            form.into_body(),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "message": "Restaurant validation failed.",
                "errors": [
                    { "param": "userId", "msg": "userId cannot be set.", "kind": "forbidden" },
                    { "param": "discountCode", "msg": DISCOUNT_CODE_TAKEN_MESSAGE, "kind": "uniqueness" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn update_checks_siblings_but_not_itself() {
        let store: Arc<dyn RestaurantStore> = Arc::new(MemoryRestaurantStore::new(vec![
            holding(4, "SAVE10"),
            holding(5, "SAVE20"),
        ]));

        let (status, body) = send(
            app(store.clone()),
            "PUT",
            "/restaurants/4",
            Some(token(OWNER)),
            pizza_place().text("discountCode", "SAVE10").into_body(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(4));

        let (status, body) = send(
            app(store),
            "PUT",
            "/restaurants/4",
            Some(token(OWNER)),
            pizza_place().text("discountCode", "SAVE20").into_body(),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["param"], json!("discountCode"));
    }

    #[tokio::test]
    async fn image_over_the_size_limit_is_a_violation() {
        let mut data = PNG_HEADER.to_vec();
        data.resize(6_000_000, 0);
        let form = pizza_place().file("heroImage", "hero.png", "image/png", &data);

        let (status, body) = send(
            app(Arc::new(MemoryRestaurantStore::default())),
            "POST",
            "/restaurants",
            Some(token(OWNER)),
            form.into_body(),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["errors"],
            json!([{ "param": "heroImage", "msg": "Maximum file size of 2MB", "kind": "file" }])
        );
    }

    #[tokio::test]
    async fn missing_or_invalid_token_is_unauthorized() {
        for token in [None, Some("not-a-jwt".to_string())] {
            let (status, body) = send(
                app(Arc::new(MemoryRestaurantStore::default())),
                "POST",
                "/restaurants",
                token,
                pizza_place().into_body(),
            )
            .await;

            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({ "message": "Invalid token." }));
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let (status, body) = send(
            app(Arc::new(MemoryRestaurantStore::default())),
            "POST",
            "/restaurants",
            Some(token(OWNER)),
            Body::from("--restaurant-form-boundary\r\n"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Malformed request body." }));
    }

    #[tokio::test]
    async fn store_failure_is_an_internal_error() {
        let (status, body) = send(
            app(Arc::new(FailingRestaurantStore)),
            "POST",
            "/restaurants",
            Some(token(OWNER)),
            pizza_place().text("discountCode", "SAVE10").into_body(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "An internal server error occurred." }));
    }
}
