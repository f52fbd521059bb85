//! Query extractors for API routes

use std::ops::Deref;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Rejection for malformed or invalid query strings
#[derive(Debug)]
pub enum ValidationRejection {
    /// Failed to parse query string
    Query(QueryRejection),
    /// Validation constraints not satisfied
    Validation(validator::ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            Self::Query(rejection) => ("QUERY_PARSE_ERROR", rejection.body_text()),
            Self::Validation(errors) => ("VALIDATION_ERROR", format_validation_errors(&errors)),
        };
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "bad_request",
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: validation failed", field))
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Query extractor with automatic validation.
///
/// Deserializes query parameters and validates them using the `validator` crate.
/// Returns a `ValidationRejection` on parse or validation failure.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// Every query parameter in order, repeated keys included
///
/// Filters accept repeated keys (`organism=a&organism=b`), which a struct
/// extractor would collapse.
#[derive(Debug, Default)]
pub struct QueryPairs(pub Vec<(String, String)>);

impl<S> FromRequestParts<S> for QueryPairs
where
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(ValidationRejection::Query)?;
        Ok(Self(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, max = 4, message = "name must be 1-4 characters"))]
        name: String,
    }

    fn request_parts(uri: &str) -> Parts {
        Request::builder().uri(uri).body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn query_pairs_keep_repeats_and_order() {
        let mut parts = request_parts("/x?organism=Homo%20sapiens&ph_min=7&organism=Mus+musculus");
        let QueryPairs(pairs) = QueryPairs::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(
            pairs,
            vec![
                ("organism".to_string(), "Homo sapiens".to_string()),
                ("ph_min".to_string(), "7".to_string()),
                ("organism".to_string(), "Mus musculus".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn query_pairs_empty_query() {
        let mut parts = request_parts("/x");
        let QueryPairs(pairs) = QueryPairs::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(pairs.is_empty());
    }

    #[tokio::test]
    async fn validated_query_rejects_constraint_violations() {
        let mut parts = request_parts("/x?name=toolong");
        let rejection = ValidatedQuery::<Probe>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let mut parts = request_parts("/x?name=ok");
        let probe = ValidatedQuery::<Probe>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(probe.name, "ok");
    }

    #[tokio::test]
    async fn validated_query_rejects_missing_field() {
        let mut parts = request_parts("/x");
        let rejection = ValidatedQuery::<Probe>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(rejection, ValidationRejection::Query(_)));
    }
}
