//! Content negotiation for request bodies and responses.
//!
//! Header values are reduced to their media type essence (`type/subtype`,
//! lowercased, parameters dropped) and matched against a closed set of
//! representations. Anything missing or unrecognised falls back to a fixed
//! default so that negotiation never fails.

/// Representation of an incoming request body, chosen from `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `application/json`
    Json,
    /// `application/x-www-form-urlencoded`
    Form,
    /// `multipart/form-data`
    Multipart,
    /// No body format recognised; values come from the query string
    Default,
}

/// Representation of the comparison result, chosen from `Accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// `{"result":0|1}` as `application/json; charset=utf-8`
    Json,
    /// Bare `0` or `1`
    Text,
}

pub const APPLICATION_JSON: &str = "application/json";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Content type sent with JSON responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

impl BodyFormat {
    /// Classify a `Content-Type` header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use casecmp::core::media::BodyFormat;
    ///
    /// assert_eq!(BodyFormat::from_content_type(Some("application/json; charset=utf-8")), BodyFormat::Json);
    /// assert_eq!(BodyFormat::from_content_type(Some("text/plain")), BodyFormat::Default);
    /// assert_eq!(BodyFormat::from_content_type(None), BodyFormat::Default);
    /// ```
    #[must_use]
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(essence) = content_type.and_then(essence) else {
            return BodyFormat::Default;
        };

        match essence.as_str() {
            APPLICATION_JSON => BodyFormat::Json,
            FORM_URLENCODED => BodyFormat::Form,
            MULTIPART_FORM_DATA => BodyFormat::Multipart,
            _ => BodyFormat::Default,
        }
    }

    #[must_use]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Idiomatic method signature
    pub fn display_name(&self) -> &'static str {
        match self {
            BodyFormat::Json => "json",
            BodyFormat::Form => "form",
            BodyFormat::Multipart => "multipart",
            BodyFormat::Default => "default",
        }
    }
}

impl ResponseFormat {
    /// Classify an `Accept` header value.
    ///
    /// JSON is selected when any listed media range is `application/json` with a
    /// non-zero quality. Wildcards do not select JSON.
    #[must_use]
    pub fn from_accept(accept: Option<&str>) -> Self {
        let Some(accept) = accept else {
            return ResponseFormat::Text;
        };

        let wants_json = accept.split(',').any(|range| {
            essence(range).as_deref() == Some(APPLICATION_JSON) && quality(range) > 0.0
        });

        if wants_json {
            ResponseFormat::Json
        } else {
            ResponseFormat::Text
        }
    }

    #[must_use]
    #[allow(clippy::trivially_copy_pass_by_ref)] // Idiomatic method signature
    pub fn display_name(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Text => "text",
        }
    }
}

/// Extract the lowercased `type/subtype` from a media type, or `None` if the value
/// is not shaped like one.
fn essence(value: &str) -> Option<String> {
    let media_type = value.split(';').next()?.trim();
    let (kind, subtype) = media_type.split_once('/')?;
    let (kind, subtype) = (kind.trim(), subtype.trim());

    if kind.is_empty() || subtype.is_empty() {
        return None;
    }

    Some(format!(
        "{}/{}",
        kind.to_ascii_lowercase(),
        subtype.to_ascii_lowercase()
    ))
}

/// The `q` parameter of a media range, defaulting to 1 when absent or malformed.
fn quality(range: &str) -> f32 {
    range
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, value)| value.trim().parse::<f32>().ok())
        .unwrap_or(1.0)
}
