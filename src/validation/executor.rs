use futures::future::join_all;
use serde_json::{Map, Value};

use super::{
    errors::RuleError,
    payload::Payload,
    rule::{Rule, RuleOutcome},
    violation::Violation,
};

#[derive(Debug)]
pub enum ValidationOutcome {
    /// Payload fields after sanitizing. Skipped optional fields are null.
    Valid(Map<String, Value>),
    /// Violations in rule declaration order.
    Invalid(Vec<Violation>),
}

pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
}

impl<C: Sync> RuleSet<C> {
    pub fn new(rules: Vec<Rule<C>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule<C>] {
        &self.rules
    }

    /// Evaluates every rule concurrently against the same raw payload. A rule
    /// that cannot be evaluated fails the whole pass once all rules settle.
    pub async fn run(&self, payload: &Payload, context: &C) -> Result<ValidationOutcome, RuleError> {
        let outcomes = join_all(
            self.rules
                .iter()
                .map(|rule| rule.evaluate(payload, context)),
        )
        .await;

        let mut fields = payload.fields().to_owned();
        let mut violations = Vec::new();

        for (rule, outcome) in self.rules.iter().zip(outcomes) {
            match outcome? {
                RuleOutcome::Passed(Some(value)) => {
                    fields.insert(rule.field().to_string(), value);
                }
                RuleOutcome::Passed(None) => {}
                RuleOutcome::Skipped => {
                    fields.insert(rule.field().to_string(), Value::Null);
                }
                RuleOutcome::Failed(violation) => violations.push(violation),
            }
        }

        tracing::debug!(
            rules = self.rules.len(),
            violations = violations.len(),
            "validation pass finished"
        );

        match violations.is_empty() {
            true => Ok(ValidationOutcome::Valid(fields)),
            false => Ok(ValidationOutcome::Invalid(violations)),
        }
    }
}
