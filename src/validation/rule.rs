use serde_json::{Number, Value};

use super::{
    check::{as_float, as_int, Check, Verdict},
    errors::RuleError,
    payload::{is_falsy, Payload},
    violation::{Violation, ViolationKind},
};

static NULL: Value = Value::Null;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The key must be present; an explicit null counts as present.
    Required,
    /// The key must be present and not null.
    RequiredNonNull,
    /// Absent or falsy values skip every check of the rule.
    Optional,
    /// The key must not be present at all.
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Field,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sanitizer {
    Trim,
    ToFloat,
    ToInt,
}

impl Sanitizer {
    fn apply(&self, value: Value) -> Value {
        match self {
            Self::Trim => match value {
                Value::String(s) => Value::String(s.trim().to_string()),
                other => other,
            },
            Self::ToFloat => as_float(&value)
                .and_then(Number::from_f64)
                .map_or(value, Value::Number),
            Self::ToInt => as_int(&value).map_or(value, |n| Value::Number(n.into())),
        }
    }
}

struct Step<C> {
    check: Check<C>,
    message: Option<String>,
}

pub enum RuleOutcome {
    /// Every check passed. Holds the sanitized value if the rule sanitizes.
    Passed(Option<Value>),
    /// Optional field not supplied.
    Skipped,
    Failed(Violation),
}

/// One chain of checks on one field. Checks run in order and the chain stops
/// at the first failure, so a rule yields at most one violation.
pub struct Rule<C> {
    field: &'static str,
    target: Target,
    presence: Presence,
    presence_message: Option<String>,
    steps: Vec<Step<C>>,
    sanitizers: Vec<Sanitizer>,
}

impl<C> Rule<C> {
    fn new(field: &'static str, target: Target, presence: Presence) -> Self {
        Self {
            field,
            target,
            presence,
            presence_message: None,
            steps: Vec::new(),
            sanitizers: Vec::new(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, Target::Field, Presence::Required)
    }

    pub fn non_null(field: &'static str) -> Self {
        Self::new(field, Target::Field, Presence::RequiredNonNull)
    }

    pub fn optional(field: &'static str) -> Self {
        Self::new(field, Target::Field, Presence::Optional)
    }

    /// Rejects `field` in the request payload. Values the server attaches
    /// itself, such as the owner id from the token, are not seen by the rule.
    pub fn forbidden(field: &'static str) -> Self {
        Self::new(field, Target::Field, Presence::Forbidden)
    }

    /// Rule on an uploaded file. Passes when no file was uploaded under `field`.
    pub fn file(field: &'static str) -> Self {
        Self::new(field, Target::File, Presence::Optional)
    }

    pub fn check(mut self, check: Check<C>) -> Self {
        self.steps.push(Step {
            check,
            message: None,
        });
        self
    }

    /// Overrides the message of the last added check, or of the presence
    /// requirement when no check was added yet.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        match self.steps.last_mut() {
            Some(step) => step.message = Some(message.into()),
            None => self.presence_message = Some(message.into()),
        }
        self
    }

    pub fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizers.push(sanitizer);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub async fn evaluate(&self, payload: &Payload, context: &C) -> Result<RuleOutcome, RuleError> {
        let value = match self.target {
            Target::File => {
                if payload.file(self.field).is_none() {
                    return Ok(RuleOutcome::Passed(None));
                }
                &NULL
            }
            Target::Field => match (self.presence, payload.field(self.field)) {
                (Presence::Forbidden, Some(_)) => {
                    return Ok(self.presence_violation(
                        ViolationKind::Forbidden,
                        format!("{} cannot be set.", self.field),
                    ));
                }
                (Presence::Forbidden, None) => return Ok(RuleOutcome::Passed(None)),
                (Presence::Optional, None) => return Ok(RuleOutcome::Skipped),
                (Presence::Optional, Some(value)) if is_falsy(value) => {
                    return Ok(RuleOutcome::Skipped)
                }
                (Presence::Required | Presence::RequiredNonNull, None)
                | (Presence::RequiredNonNull, Some(Value::Null)) => {
                    return Ok(self.presence_violation(
                        ViolationKind::Format,
                        format!("{} is required.", self.field),
                    ));
                }
                (_, Some(value)) => value,
            },
        };

        for step in &self.steps {
            let verdict = step.check.verdict(self.field, value, payload, context).await?;

            if verdict == Verdict::Fail {
                return Ok(RuleOutcome::Failed(Violation {
                    field: self.field,
                    message: step
                        .message
                        .to_owned()
                        .unwrap_or_else(|| step.check.default_message(self.field)),
                    kind: step.check.kind(),
                }));
            }
        }

        if self.target == Target::File || self.sanitizers.is_empty() {
            return Ok(RuleOutcome::Passed(None));
        }

        let sanitized = self
            .sanitizers
            .iter()
            .fold(value.to_owned(), |value, sanitizer| sanitizer.apply(value));

        Ok(RuleOutcome::Passed(Some(sanitized)))
    }

    fn presence_violation(&self, kind: ViolationKind, default_message: String) -> RuleOutcome {
        RuleOutcome::Failed(Violation {
            field: self.field,
            message: self
                .presence_message
                .to_owned()
                .unwrap_or(default_message),
            kind,
        })
    }
}
