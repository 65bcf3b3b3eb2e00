use std::sync::Arc;

use crate::validation::{
    check::Check,
    executor::RuleSet,
    rule::{Rule, Sanitizer},
};

use super::store::RestaurantStore;

use self::unique_discount_code::UniqueDiscountCode;

pub mod unique_discount_code;

pub const MAX_FILE_SIZE: u64 = 2_000_000;
pub const IMAGE_FORMAT_MESSAGE: &str = "Please upload an image with format (jpeg, png).";
pub const DISCOUNT_CODE_TAKEN_MESSAGE: &str =
    "Restaurant discount codes cannot repeat among restaurants of the same owner.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Per-request inputs of the restaurant rule sets. Neither id is ever read
/// from the payload.
pub struct RestaurantContext {
    pub owner_id: i64,
    pub restaurant_id: Option<i64>,
    pub store: Arc<dyn RestaurantStore>,
}

impl RestaurantContext {
    pub fn new(owner_id: i64, restaurant_id: Option<i64>, store: Arc<dyn RestaurantStore>) -> Self {
        Self {
            owner_id,
            restaurant_id,
            store,
        }
    }
}

lazy_static! {
    pub static ref CREATE_RULES: RuleSet<RestaurantContext> = restaurant_rules(Mode::Create);
    pub static ref UPDATE_RULES: RuleSet<RestaurantContext> = restaurant_rules(Mode::Update);
}

pub fn max_file_size_message() -> String {
    format!("Maximum file size of {}MB", MAX_FILE_SIZE as f64 / 1_000_000.0)
}

fn restaurant_rules(mode: Mode) -> RuleSet<RestaurantContext> {
    RuleSet::new(vec![
        Rule::required("name")
            .check(Check::String)
            .check(Check::Length { min: 1, max: 255 })
            .sanitize(Sanitizer::Trim),
        Rule::optional("description")
            .check(Check::String)
            .sanitize(Sanitizer::Trim),
        Rule::required("address")
            .check(Check::String)
            .check(Check::Length { min: 1, max: 255 })
            .sanitize(Sanitizer::Trim),
        Rule::required("postalCode")
            .check(Check::String)
            .check(Check::Length { min: 1, max: 255 }),
        Rule::optional("url")
            .check(Check::String)
            .check(Check::Url)
            .sanitize(Sanitizer::Trim),
        Rule::required("shippingCosts")
            .check(Check::Float {
                min: Some(0.0),
                max: None,
            })
            .sanitize(Sanitizer::ToFloat),
        Rule::optional("email")
            .check(Check::String)
            .check(Check::Email)
            .sanitize(Sanitizer::Trim),
        Rule::optional("phone")
            .check(Check::String)
            .check(Check::Length { min: 1, max: 255 })
            .sanitize(Sanitizer::Trim),
        Rule::non_null("restaurantCategoryId")
            .check(Check::Int { min: Some(1) })
            .sanitize(Sanitizer::ToInt),
        Rule::forbidden("userId"),
        Rule::file("heroImage")
            .check(Check::Image)
            .message(IMAGE_FORMAT_MESSAGE),
        Rule::file("heroImage")
            .check(Check::MaxFileSize(MAX_FILE_SIZE))
            .message(max_file_size_message()),
        Rule::file("logo")
            .check(Check::Image)
            .message(IMAGE_FORMAT_MESSAGE),
        Rule::file("logo")
            .check(Check::MaxFileSize(MAX_FILE_SIZE))
            .message(max_file_size_message()),
        Rule::optional("discountCode")
            .check(Check::String)
            .check(Check::Length { min: 1, max: 10 })
            .sanitize(Sanitizer::Trim),
        Rule::optional("discount")
            .check(Check::Float {
                min: Some(0.0),
                max: Some(99.0),
            })
            .sanitize(Sanitizer::ToFloat),
        Rule::optional("discountCode")
            .check(Check::Async(Arc::new(UniqueDiscountCode::new(mode))))
            .message(DISCOUNT_CODE_TAKEN_MESSAGE),
    ])
}
