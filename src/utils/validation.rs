use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

pub fn into_response(errors: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "errors": errors })),
    )
        .into_response()
}

pub fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

/// Treats absent and whitespace-only strings alike.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Debug, PartialEq, Eq)]
pub enum IdError {
    Missing,
    Invalid,
}

fn parse_integer(value: Option<Value>) -> Result<i32, IdError> {
    let number = match value {
        None | Some(Value::Null) => return Err(IdError::Missing),
        Some(Value::Number(number)) => number.as_i64(),
        Some(Value::String(raw)) if raw.trim().is_empty() => return Err(IdError::Missing),
        Some(Value::String(raw)) => raw.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    number
        .and_then(|number| i32::try_from(number).ok())
        .ok_or(IdError::Invalid)
}

/// Reads a row id sent either as a JSON number or as a numeric string.
pub fn parse_id(value: Option<Value>) -> Result<i32, IdError> {
    parse_integer(value).and_then(|id| if id > 0 { Ok(id) } else { Err(IdError::Invalid) })
}

/// Like [`parse_id`] for any integer field with a lower bound. Failures are
/// recorded in `errors` under `field`, the way a derived `Validate` would.
pub fn integer_field(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<Value>,
    min: i32,
) -> Option<i32> {
    let (code, message) = match parse_integer(value) {
        Ok(number) if number >= min => return Some(number),
        Ok(_) => ("range", format!("{field} must be at least {min}")),
        Err(IdError::Missing) => ("required", format!("{field} is required")),
        Err(IdError::Invalid) => ("invalid", format!("{field} must be an integer")),
    };

    errors.add(field, ValidationError::new(code).with_message(Cow::from(message)));
    None
}
