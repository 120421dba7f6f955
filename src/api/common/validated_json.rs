//! Validated JSON extractor for Axum
//!
//! Request DTOs in this API carry `validator` rules (name lengths, email
//! format, quantity ranges). `ValidatedJson<T>` deserializes like
//! `axum::Json<T>` and then enforces those rules, so handlers only ever see
//! payloads that already passed validation. Malformed JSON maps to 400,
//! rule violations to 422 with the offending fields named in the error.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::api::dto::ApiResponse;

/// JSON extractor that also runs the DTO's `validator` rules.
///
/// ```ignore
/// async fn create_customer(
///     State(state): State<AppState>,
///     ValidatedJson(req): ValidatedJson<CreateCustomerRequest>,
/// ) -> ... {
///     // req.name is 1-120 chars, req.email (if set) is a valid address
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Why a `ValidatedJson` extraction failed.
pub enum ValidatedJsonRejection {
    /// The body was not valid JSON for the target type.
    JsonError(JsonRejection),
    /// The body deserialized but broke one or more validation rules.
    ValidationError(ValidationErrors),
}

/// Flatten `validator`'s nested error map into one `field: message` line
/// per violation.
fn describe_violations(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors().iter() {
        for err in field_errors.iter() {
            let detail = match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("{:?}", err.code),
            };
            lines.push(format!("{}: {}", field, detail));
        }
    }

    if lines.is_empty() {
        "Validation failed".to_string()
    } else {
        lines.join("; ")
    }
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::JsonError(rejection) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid JSON: {}", rejection),
            ),
            Self::ValidationError(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, describe_violations(errors))
            }
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use crate::api::handlers::customers::CreateCustomerRequest;

    async fn accept(ValidatedJson(req): ValidatedJson<CreateCustomerRequest>) -> String {
        req.name
    }

    fn customers_app() -> Router {
        Router::new().route("/customers", post(accept))
    }

    fn post_customers(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/customers")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_customer_payload_reaches_the_handler() {
        let req = post_customers(r#"{"name": "Ana Souza", "email": "ana@example.com"}"#);
        let resp = customers_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_with_400() {
        let req = post_customers("{not json");
        let resp = customers_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rule_violations_are_rejected_with_422_naming_the_fields() {
        // Empty name and a bad email address break two separate rules
        let req = post_customers(r#"{"name": "", "email": "not-an-address"}"#);
        let resp = customers_app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let parsed: ApiResponse<()> = serde_json::from_slice(&bytes).unwrap();
        assert!(!parsed.success);
        let error = parsed.error.unwrap();
        assert!(error.contains("name"));
        assert!(error.contains("email"));
    }
}
