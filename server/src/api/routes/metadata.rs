//! Column value listing endpoint

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::api::extractors::ValidatedQuery;
use crate::api::server::AppState;
use crate::api::types::{ApiError, ErrorBody};
use crate::domain::metadata::{ColumnValues, resolve_column_values};

#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct MetadataQuery {
    /// Text column to list
    #[validate(length(min = 1))]
    pub column: String,
}

/// Distinct values of a text column
#[utoipa::path(
    get,
    path = "/api/v1/metadata",
    tag = "metadata",
    params(MetadataQuery),
    responses(
        (status = 200, description = "Sorted distinct values", body = ColumnValues),
        (status = 400, description = "Unknown or numeric column", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn get_metadata(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<MetadataQuery>,
) -> Result<Json<ColumnValues>, ApiError> {
    let repo = state.store.repository();
    let values = resolve_column_values(&*repo, &query.column).await?;
    Ok(Json(values))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::api::routes::testing::{get, seeded_router};

    #[tokio::test]
    async fn lists_organisms() {
        let router = seeded_router().await;
        let (status, _, body) = get(&router, "/api/v1/metadata?column=organism").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["column"], "organism");
        assert_eq!(
            json["values"],
            serde_json::json!([
                "Aspergillus niger",
                "Bos taurus",
                "Homo sapiens",
                "Mus musculus",
                "Sus scrofa"
            ])
        );
    }

    #[tokio::test]
    async fn numeric_column_is_not_supported() {
        let router = seeded_router().await;
        let (status, _, body) = get(&router, "/api/v1/metadata?column=temperature").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "COLUMN_NOT_SUPPORTED");
    }

    #[tokio::test]
    async fn long_unknown_column_is_not_supported() {
        let router = seeded_router().await;
        let column = "x".repeat(200);
        let (status, _, body) = get(&router, &format!("/api/v1/metadata?column={}", column)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "COLUMN_NOT_SUPPORTED");
        assert!(json["message"].as_str().unwrap().contains(&column));
    }

    #[tokio::test]
    async fn missing_column_parameter() {
        let router = seeded_router().await;
        let (status, _, body) = get(&router, "/api/v1/metadata").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "QUERY_PARSE_ERROR");

        let (status, _, body) = get(&router, "/api/v1/metadata?column=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}
