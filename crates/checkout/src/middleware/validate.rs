use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationError, ValidationErrors};

/// Json extractor that runs the payload through its `Validate` rules before
/// the handler sees it. Rejections carry the same error shape the services
/// produce.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, axum::Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(payload) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let body = json!({
                    "status": "error",
                    "kind": "validation_error",
                    "message": rejection.body_text(),
                });
                (rejection.status(), axum::Json(body))
            })?;

        payload.validate().map_err(|errors| {
            let body = json!({
                "status": "error",
                "kind": "validation_error",
                "message": collect_messages(&errors).join("; "),
                "details": detailed_errors(&errors),
            });
            (StatusCode::BAD_REQUEST, axum::Json(body))
        })?;

        Ok(Self(payload))
    }
}

fn field_message(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            _ => format!("Invalid {field}"),
        })
}

fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            messages.push(format!("{field}: {}", field_message(&field, error)));
        }
    }
    if messages.is_empty() {
        messages.push("Validation failed".to_string());
    }
    messages
}

fn detailed_errors(errors: &ValidationErrors) -> Value {
    let mut map = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| field_message(&field, e))
            .collect();
        map.insert(field.to_string(), json!(messages));
    }
    json!(map)
}
