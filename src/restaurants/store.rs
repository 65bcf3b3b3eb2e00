use async_trait::async_trait;
use sqlx::PgPool;

use super::models::restaurant_filter::{FilterValue, RestaurantFilter};

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn count(&self, filter: &RestaurantFilter) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl RestaurantStore for PgPool {
    async fn count(&self, filter: &RestaurantFilter) -> Result<i64, sqlx::Error> {
        let sql = filter.to_count_sql();
        tracing::debug!(%sql, "counting restaurants");

        let mut query = sqlx::query_scalar::<_, i64>(&sql);

        for predicate in filter.predicates() {
            query = match &predicate.value {
                FilterValue::Int(value) => query.bind(*value),
                FilterValue::Text(value) => query.bind(value.to_owned()),
            };
        }

        query.fetch_one(self).await
    }
}
