use serde::{Deserialize, Serialize};

/// A restaurant payload that passed validation, with values trimmed and
/// coerced. The owner and target ids are attached server-side.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDraft {
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_deserializing)]
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub postal_code: String,
    pub url: Option<String>,
    pub shipping_costs: f64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub restaurant_category_id: i64,
    pub discount_code: Option<String>,
    pub discount: Option<f64>,
}
