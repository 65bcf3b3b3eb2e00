use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The columns of a stored restaurant that validation reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub user_id: i64,
    pub discount_code: Option<String>,
}
