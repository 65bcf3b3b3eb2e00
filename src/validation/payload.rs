use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::app::util::multipart::models::file_properties::FileProperties;

/// Raw request input: body fields plus uploaded files keyed by field name.
#[derive(Debug, Default)]
pub struct Payload {
    fields: Map<String, Value>,
    files: HashMap<String, FileProperties>,
}

impl Payload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            files: HashMap::new(),
        }
    }

    pub fn insert_field(&mut self, name: String, value: Value) {
        self.fields.insert(name, value);
    }

    pub fn insert_file(&mut self, file: FileProperties) {
        self.files.insert(file.field_name.to_string(), file);
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn file(&self, name: &str) -> Option<&FileProperties> {
        self.files.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Values an optional rule treats as not supplied.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
