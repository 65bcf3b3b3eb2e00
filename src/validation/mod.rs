//! Declarative field validation.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s, each bound to one payload
//! field (or uploaded file) and holding a chain of [`Check`]s. Running a rule
//! set evaluates every rule concurrently and gathers the violations in
//! declaration order, along with the sanitized field values when the payload
//! is accepted.

pub mod check;
pub mod errors;
pub mod executor;
pub mod payload;
pub mod rule;
pub mod violation;
