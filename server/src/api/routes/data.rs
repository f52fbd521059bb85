//! Filtered data endpoint

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderName, header};
use axum::response::{IntoResponse, Response};

use crate::api::extractors::QueryPairs;
use crate::api::server::AppState;
use crate::api::types::{ApiError, ErrorBody};
use crate::core::constants::{CSV_FILENAME, HEADER_TOTAL_COUNT};
use crate::data::filters::{OutputFormat, parse_filter_request};
use crate::data::types::QueryPlan;
use crate::domain::export::{DataPage, to_csv};

/// Query kinetic measurements
///
/// Any registry column can be used as a filter key. Repeated keys are OR-ed,
/// different columns are AND-ed. `ec` accepts `%` wildcards. Numeric columns
/// also take `<column>_min` and `<column>_max` bounds.
#[utoipa::path(
    get,
    path = "/api/v1/data",
    tag = "data",
    params(
        ("format" = Option<String>, Query, description = "json (default) or csv"),
        ("columns" = Option<String>, Query, description = "Projection, comma-separated or repeated"),
        ("limit" = Option<u64>, Query, description = "Page size"),
        ("offset" = Option<u64>, Query, description = "Rows to skip"),
        ("ec" = Option<String>, Query, description = "EC number, `%` matches any sequence"),
        ("organism" = Option<String>, Query, description = "Organism, repeat for OR"),
        ("temperature_min" = Option<f64>, Query, description = "Lower temperature bound"),
        ("temperature_max" = Option<f64>, Query, description = "Upper temperature bound")
    ),
    responses(
        (status = 200, description = "Matching rows", body = DataPage),
        (status = 400, description = "Invalid parameters", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
        (status = 504, description = "Query timed out", body = ErrorBody)
    )
)]
pub async fn get_data(
    State(state): State<AppState>,
    QueryPairs(pairs): QueryPairs,
) -> Result<Response, ApiError> {
    let request = parse_filter_request(&pairs, &state.limits)?;
    let plan = QueryPlan::from_request(&request);

    let result = state.store.repository().query(&plan).await?;
    tracing::debug!(
        total = result.total,
        rows = result.rows.len(),
        limit = request.limit,
        offset = request.offset,
        format = %request.format,
        "Data query served"
    );

    let total_header = (
        HeaderName::from_static(HEADER_TOTAL_COUNT),
        result.total.to_string(),
    );

    let response = match request.format {
        OutputFormat::Json => {
            let page = DataPage::new(result, &request.projection, request.limit, request.offset);
            ([total_header], Json(page)).into_response()
        }
        OutputFormat::Csv => {
            let body = to_csv(&request.projection, &result.rows).map_err(|e| {
                tracing::error!(error = %e, "CSV encoding failed");
                ApiError::internal("Failed to encode CSV")
            })?;
            (
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename={}", CSV_FILENAME),
                    ),
                    total_header,
                ],
                body,
            )
                .into_response()
        }
    };
    Ok(response)
}
