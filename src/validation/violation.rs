use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    Format,
    Forbidden,
    File,
    Uniqueness,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    #[serde(rename = "param")]
    pub field: &'static str,
    #[serde(rename = "msg")]
    pub message: String,
    pub kind: ViolationKind,
}
