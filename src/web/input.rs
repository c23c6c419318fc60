//! Extraction of the two comparison operands from a request.
//!
//! The body representation is chosen from `Content-Type` (see
//! [`BodyFormat`]). JSON bodies must parse; form and multipart bodies are read
//! leniently, so a malformed form simply yields empty fields.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Multipart, Query, Request};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Form;

use crate::core::compare::ComparisonRequest;
use crate::core::media::BodyFormat;

/// Failure to obtain comparison input from a JSON body.
///
/// Rendered as `500 Internal Server Error` with the error message as a plain
/// text body.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{0}")]
    Body(#[from] BytesRejection),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejecting comparison request: {self}");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Ordered name/value pairs; the first occurrence of a name wins.
#[derive(Debug, Default)]
struct FormValues(Vec<(String, String)>);

impl FormValues {
    fn first(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn push(&mut self, name: String, value: String) {
        self.0.push((name, value));
    }

    fn append(&mut self, other: FormValues) {
        self.0.extend(other.0);
    }

    fn has_operands(&self) -> bool {
        self.first("a").is_some() && self.first("b").is_some()
    }

    fn into_request(self) -> ComparisonRequest {
        ComparisonRequest::new(
            self.first("a").unwrap_or_default(),
            self.first("b").unwrap_or_default(),
        )
    }
}

/// Read `a` and `b` from the request.
///
/// - JSON bodies are parsed as `{"a": "...", "b": "..."}` for any method.
/// - Form bodies on POST, PUT and PATCH are read first, followed by the query
///   string.
/// - Multipart bodies on POST, PUT and PATCH are read after the query string, so
///   query values win.
/// - Otherwise only the query string is used.
///
/// Missing values default to the empty string.
///
/// # Errors
///
/// Returns `InputError::Body` if a JSON body cannot be read, or
/// `InputError::Json` if it is not a valid JSON object with string fields.
pub async fn extract(request: Request) -> Result<ComparisonRequest, InputError> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let format = BodyFormat::from_content_type(content_type);
    let with_body = carries_form_body(request.method());

    tracing::debug!(
        method = %request.method(),
        body_format = format.display_name(),
        "Extracting comparison input"
    );

    let query = query_values(request.uri());

    match format {
        BodyFormat::Json => read_json(request).await,
        BodyFormat::Form if with_body => {
            let mut values = form_values(request).await;
            values.append(query);
            Ok(values.into_request())
        }
        BodyFormat::Multipart if with_body => {
            let mut values = query;
            if !values.has_operands() {
                values.append(multipart_values(request).await);
            }
            Ok(values.into_request())
        }
        _ => Ok(query.into_request()),
    }
}

fn carries_form_body(method: &Method) -> bool {
    method == Method::POST || method == Method::PUT || method == Method::PATCH
}

async fn read_json(request: Request) -> Result<ComparisonRequest, InputError> {
    let body = Bytes::from_request(request, &()).await?;

    // A bare `null` document carries no fields
    let parsed: Option<ComparisonRequest> = serde_json::from_slice(&body)?;
    Ok(parsed.unwrap_or_default())
}

fn query_values(uri: &Uri) -> FormValues {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => FormValues(pairs),
        Err(rejection) => {
            tracing::debug!("Ignoring unparseable query string: {rejection}");
            FormValues::default()
        }
    }
}

async fn form_values(request: Request) -> FormValues {
    match Form::<Vec<(String, String)>>::from_request(request, &()).await {
        Ok(Form(pairs)) => FormValues(pairs),
        Err(rejection) => {
            tracing::debug!("Ignoring unreadable form body: {rejection}");
            FormValues::default()
        }
    }
}

async fn multipart_values(request: Request) -> FormValues {
    let mut values = FormValues::default();

    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!("Ignoring unreadable multipart body: {rejection}");
            return values;
        }
    };

    // Only the first `a` and `b` can ever be used, so stop once both are seen
    while !values.has_operands() {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Stopped reading multipart body: {e}");
                break;
            }
        };
        // File uploads are not form values
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().filter(|name| matches!(*name, "a" | "b")) else {
            continue;
        };
        let name = name.to_string();

        match field.text().await {
            Ok(text) => values.push(name, text),
            Err(e) => {
                tracing::debug!("Stopped reading multipart field '{name}': {e}");
                break;
            }
        }
    }

    values
}
