pub mod restaurant_draft;
