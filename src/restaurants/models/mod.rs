pub mod restaurant;
pub mod restaurant_filter;
