use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::{Host, Url};
use validator::{validate_email, validate_length};

use crate::app::util::multipart::file_validation::{is_image, is_within_max_size};

use super::{errors::RuleError, payload::Payload, violation::ViolationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        match accepted {
            true => Self::Pass,
            false => Self::Fail,
        }
    }
}

/// A check whose outcome depends on data outside the payload, such as a
/// database lookup. `C` is the per-request context the rule set runs with.
#[async_trait]
pub trait AsyncCheck<C>: Send + Sync {
    fn kind(&self) -> ViolationKind;

    async fn check(&self, value: &Value, context: &C) -> Result<Verdict, RuleError>;
}

pub enum Check<C> {
    String,
    /// Inclusive bounds, counted in characters.
    Length {
        min: u64,
        max: u64,
    },
    Url,
    Email,
    Float {
        min: Option<f64>,
        max: Option<f64>,
    },
    Int {
        min: Option<i64>,
    },
    /// Uploaded file is a JPEG or PNG image.
    Image,
    /// Uploaded file is at most this many bytes.
    MaxFileSize(u64),
    Async(Arc<dyn AsyncCheck<C>>),
}

impl<C> Check<C> {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::Image | Self::MaxFileSize(_) => ViolationKind::File,
            Self::Async(check) => check.kind(),
            _ => ViolationKind::Format,
        }
    }

    pub fn default_message(&self, field: &str) -> String {
        match self {
            Self::String => format!("{} must be a string.", field),
            Self::Length { min, max } => {
                format!("{} must be between {} and {} characters.", field, min, max)
            }
            Self::Url => format!("{} must be a valid URL.", field),
            Self::Email => format!("{} must be a valid email.", field),
            Self::Float { min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    format!("{} must be a number between {} and {}.", field, min, max)
                }
                (Some(min), None) => format!("{} must be a number of at least {}.", field, min),
                (None, Some(max)) => format!("{} must be a number of at most {}.", field, max),
                (None, None) => format!("{} must be a number.", field),
            },
            Self::Int { min } => match min {
                Some(min) => format!("{} must be an integer of at least {}.", field, min),
                None => format!("{} must be an integer.", field),
            },
            Self::Image => format!("{} must be an image.", field),
            Self::MaxFileSize(max) => format!("{} must be at most {} bytes.", field, max),
            Self::Async(_) => format!("{} is invalid.", field),
        }
    }

    pub async fn verdict(
        &self,
        field: &str,
        value: &Value,
        payload: &Payload,
        context: &C,
    ) -> Result<Verdict, RuleError> {
        let accepted = match self {
            Self::String => value.is_string(),
            Self::Length { min, max } => value
                .as_str()
                .map_or(false, |s| validate_length(s, Some(*min), Some(*max), None)),
            Self::Url => value.as_str().map_or(false, is_url),
            Self::Email => value.as_str().map_or(false, |s| validate_email(s)),
            Self::Float { min, max } => as_float(value).map_or(false, |n| {
                min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)
            }),
            Self::Int { min } => {
                as_int(value).map_or(false, |n| min.map_or(true, |min| n >= min))
            }
            Self::Image => is_image(payload, field),
            Self::MaxFileSize(max) => is_within_max_size(payload, field, *max),
            Self::Async(check) => return check.check(value, context).await,
        };

        Ok(Verdict::from(accepted))
    }
}

const URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Web address with an http(s) or ftp scheme and a host that is an IP or ends
/// in a top-level domain. The scheme may be left out: "pizza.example.com"
/// reads as "http://pizza.example.com".
fn is_url(value: &str) -> bool {
    let candidate = match value.contains("://") {
        true => value.to_string(),
        false => format!("http://{}", value),
    };

    let Ok(url) = Url::parse(&candidate) else {
        return false;
    };

    URL_SCHEMES.contains(&url.scheme())
        && url.username().is_empty()
        && url.password().is_none()
        && match url.host() {
            Some(Host::Domain(domain)) => has_tld(domain),
            Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
            None => false,
        }
}

fn has_tld(domain: &str) -> bool {
    match domain.rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty()
                && tld.len() >= 2
                && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"))
        }
        None => false,
    }
}

/// Reads a number from either a JSON number or its string form.
pub fn as_float(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    };

    n.filter(|n| n.is_finite())
}

pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}
