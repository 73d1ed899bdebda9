use thiserror::Error;

/// Errors raised by the engine.
///
/// Malformed point rows are never reported here; they are dropped during
/// normalization. Only caller contract violations surface as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UraniaError {
    #[error("Subject data must be a JSON object, got {found}")]
    InvalidSubject { found: String },
    #[error("Invalid aspect definition '{name}': {message}")]
    InvalidAspect { name: String, message: String },
    #[error("Aspect catalog must contain at least one aspect")]
    EmptyCatalog,
}

pub type UraniaResult<T> = Result<T, UraniaError>;

/// Describe the JSON type of a value for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
