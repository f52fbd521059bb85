//! OpenAPI document and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{data, health, metadata};
use crate::api::types::ErrorBody;
use crate::domain::export::DataPage;
use crate::domain::metadata::ColumnValues;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "OED Data API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Read-only query API over enzyme kinetic measurements"
    ),
    tags(
        (name = "health", description = "Liveness and store reachability"),
        (name = "data", description = "Filtered kinetic records as JSON or CSV"),
        (name = "metadata", description = "Distinct values of text columns")
    ),
    paths(health::health, data::get_data, metadata::get_metadata),
    components(schemas(health::HealthResponse, DataPage, ColumnValues, ErrorBody))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Swagger UI loaded from CDN, pointed at `/api/openapi.json`
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>OED Data API</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_all_paths() {
        let doc = ApiDoc::openapi();
        let mut paths: Vec<&String> = doc.paths.paths.keys().collect();
        paths.sort();
        assert_eq!(
            paths,
            vec!["/api/v1/data", "/api/v1/health", "/api/v1/metadata"]
        );
        assert_eq!(doc.info.title, "OED Data API");
    }
}
