use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use crate::cli::{NAME, VERSION};
use crate::config::ServerConfig;
use crate::core::compare::ComparisonResult;
use crate::core::media::{ResponseFormat, JSON_CONTENT_TYPE};
use crate::web::input::extract;
use crate::web::server::AppState;

/// Project homepage shown on the about page.
pub const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");

const INDEX_TEMPLATE: &str = include_str!("templates/index.txt");

/// `/`: usage text for a bare GET, comparison for everything else.
pub async fn root_handler(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let has_query = request.uri().query().is_some_and(|query| !query.is_empty());

    if request.method() == Method::GET && !has_query {
        return render_index(&state.config, request.headers()).into_response();
    }

    compare(request).await
}

/// `/about`: service name, version and project URL.
pub async fn about_handler() -> String {
    format!("{NAME} {VERSION}\n\n{REPOSITORY}\n")
}

pub async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}

/// Run a comparison and render the result in the representation the client
/// accepts. Extraction failures become a 500 carrying the error message.
pub async fn compare(request: Request) -> Response {
    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok());
    let format = ResponseFormat::from_accept(accept);

    let input = match extract(request).await {
        Ok(input) => input,
        Err(e) => return e.into_response(),
    };

    let result = ComparisonResult::from(input.is_match());
    tracing::debug!(
        result = result.result,
        response_format = format.display_name(),
        "Compared strings"
    );

    render_result(result, format)
}

/// Write a comparison result as JSON or as a bare `0`/`1`.
#[must_use]
pub fn render_result(result: ComparisonResult, format: ResponseFormat) -> Response {
    match format {
        ResponseFormat::Json => {
            ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], Json(result)).into_response()
        }
        ResponseFormat::Text => result.as_text().into_response(),
    }
}

/// Fill the usage template for the host the client addressed.
#[must_use]
pub fn render_index(config: &ServerConfig, headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| config.listen_address(), ToString::to_string);

    INDEX_TEMPLATE
        .replace("{{name}}", NAME)
        .replace("{{version}}", VERSION)
        .replace("{{scheme}}", config.scheme())
        .replace("{{host}}", &host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_render_text_result() {
        let response = render_result(ComparisonResult::from(true), ResponseFormat::Text);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "1");

        let response = render_result(ComparisonResult::from(false), ResponseFormat::Text);
        assert_eq!(body_text(response).await, "0");
    }

    #[tokio::test]
    async fn test_render_json_result() {
        let response = render_result(ComparisonResult::from(false), ResponseFormat::Json);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        assert_eq!(body_text(response).await, r#"{"result":0}"#);
    }

    #[test]
    fn test_render_index_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("casecmp.example.com"));

        let text = render_index(&ServerConfig::default(), &headers);
        assert!(text.starts_with(&format!("casecmp {VERSION}\n")));
        assert!(text.contains("curl -X GET \"http://casecmp.example.com/?a=Foo+Bar&b=FOO+BAR\""));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_render_index_falls_back_to_listen_address() {
        let config = ServerConfig {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            force_https: true,
            ..ServerConfig::default()
        };

        let text = render_index(&config, &HeaderMap::new());
        assert!(text.contains("https://127.0.0.1:3000/"));
        assert!(!text.contains("http://"));
    }

    #[tokio::test]
    async fn test_about_text() {
        let text = about_handler().await;
        assert_eq!(text, format!("casecmp {VERSION}\n\n{REPOSITORY}\n"));
    }
}
