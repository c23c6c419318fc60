use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// The two strings submitted for comparison.
///
/// Both fields default to the empty string when absent or `null`, so `{}` and an
/// empty form are valid requests that compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub a: String,
    pub b: String,
}

/// Keys match `a`/`b` ignoring case and the last occurrence wins, so
/// `{"a":"x","A":"y"}` yields `a == "y"`. Other keys are skipped.
impl<'de> Deserialize<'de> for ComparisonRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ComparisonRequestVisitor)
    }
}

struct ComparisonRequestVisitor;

impl<'de> Visitor<'de> for ComparisonRequestVisitor {
    type Value = ComparisonRequest;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with string fields \"a\" and \"b\"")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut request = ComparisonRequest::default();

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("a") {
                request.a = map.next_value::<Option<String>>()?.unwrap_or_default();
            } else if key.eq_ignore_ascii_case("b") {
                request.b = map.next_value::<Option<String>>()?.unwrap_or_default();
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(request)
    }
}

impl ComparisonRequest {
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Compare `a` and `b` ignoring letter case.
    #[must_use]
    pub fn is_match(&self) -> bool {
        equal_fold(&self.a, &self.b)
    }
}

/// Outcome of a comparison, serialized as `{"result":0}` or `{"result":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub result: u8,
}

impl ComparisonResult {
    #[must_use]
    pub fn as_text(self) -> &'static str {
        if self.result == 1 {
            "1"
        } else {
            "0"
        }
    }

    #[must_use]
    pub fn is_match(self) -> bool {
        self.result == 1
    }
}

impl From<bool> for ComparisonResult {
    fn from(matched: bool) -> Self {
        Self {
            result: u8::from(matched),
        }
    }
}

/// Report whether two strings are equal under simple Unicode case folding.
///
/// Strings are compared one codepoint at a time. Two codepoints match when they
/// are identical or share a lowercase or an uppercase mapping, which covers the
/// usual fold orbits such as `k`/`K`/`\u{212A}` (Kelvin sign) and `s`/`S`/`ſ`.
/// No multi-codepoint expansion is performed, so `"ß"` does not match `"SS"`.
///
/// # Examples
///
/// ```
/// use casecmp::core::compare::equal_fold;
///
/// assert!(equal_fold("Foo Bar", "FOO BAR"));
/// assert!(!equal_fold("Foo", "Bar"));
/// assert!(equal_fold("", ""));
/// ```
#[must_use]
pub fn equal_fold(a: &str, b: &str) -> bool {
    let mut left = a.chars();
    let mut right = b.chars();

    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) => {
                if !chars_fold_equal(x, y) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

fn chars_fold_equal(x: char, y: char) -> bool {
    if x == y {
        return true;
    }

    if x.is_ascii() && y.is_ascii() {
        return x.eq_ignore_ascii_case(&y);
    }

    x.to_lowercase().eq(y.to_lowercase()) || x.to_uppercase().eq(y.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_examples() {
        assert!(equal_fold("Foo Bar", "FOO BAR"));
        assert!(equal_fold("foo", "FoO"));
        assert!(!equal_fold("Foo", "Bar"));
        assert!(!equal_fold("Foo", "Foo "));
        assert!(!equal_fold("@", "`")); // differ only in bit 0x20 but are not letters
    }

    #[test]
    fn test_empty_strings() {
        assert!(equal_fold("", ""));
        assert!(!equal_fold("", "a"));
        assert!(!equal_fold("a", ""));
    }

    #[test]
    fn test_unicode_simple_folding() {
        assert!(equal_fold("ÄÖÜ", "äöü"));
        assert!(equal_fold("ΣΊΣΥΦΟΣ", "σίσυφος"));
        // Final sigma shares an uppercase mapping with sigma
        assert!(equal_fold("ς", "Σ"));
        // Kelvin sign and long s fold onto ASCII letters
        assert!(equal_fold("\u{212A}", "k"));
        assert!(equal_fold("\u{017F}", "S"));
        assert!(equal_fold("ß", "ẞ"));
    }

    #[test]
    fn test_no_multi_codepoint_expansion() {
        assert!(!equal_fold("ß", "SS"));
        assert!(!equal_fold("straße", "STRASSE"));
    }

    #[test]
    fn test_symmetry_and_reflexivity() {
        let samples = [
            "", "a", "A", "Foo Bar", "FOO BAR", "ß", "ẞ", "ς", "Σ", "\u{212A}", "k", "日本語",
        ];

        for a in samples {
            assert!(equal_fold(a, a), "'{a}' should equal itself");
            for b in samples {
                assert_eq!(
                    equal_fold(a, b),
                    equal_fold(b, a),
                    "comparison of '{a}' and '{b}' should be symmetric"
                );
            }
        }
    }

    #[test]
    fn test_comparison_request() {
        assert!(ComparisonRequest::new("Foo", "foo").is_match());
        assert!(!ComparisonRequest::new("Foo", "bar").is_match());
        assert!(ComparisonRequest::default().is_match());
    }

    #[test]
    fn test_request_deserialization() {
        let request: ComparisonRequest =
            serde_json::from_str(r#"{"a":"Foo","b":"bar","extra":true}"#).unwrap();
        assert_eq!(request, ComparisonRequest::new("Foo", "bar"));

        let request: ComparisonRequest = serde_json::from_str(r#"{"A":"x"}"#).unwrap();
        assert_eq!(request, ComparisonRequest::new("x", ""));

        assert!(serde_json::from_str::<ComparisonRequest>(r#"{"a":1}"#).is_err());
        assert!(serde_json::from_str::<ComparisonRequest>(r#"["x","y"]"#).is_err());
        assert!(serde_json::from_str::<ComparisonRequest>(r#""x""#).is_err());
    }

    #[test]
    fn test_request_duplicate_keys_keep_last_value() {
        let request: ComparisonRequest =
            serde_json::from_str(r#"{"a":"x","a":"X","b":"x"}"#).unwrap();
        assert_eq!(request, ComparisonRequest::new("X", "x"));
        assert!(request.is_match());
    }

    #[test]
    fn test_request_keys_match_ignoring_case() {
        let request: ComparisonRequest =
            serde_json::from_str(r#"{"a":"x","A":"y","b":"y"}"#).unwrap();
        assert_eq!(request, ComparisonRequest::new("y", "y"));

        let request: ComparisonRequest =
            serde_json::from_str(r#"{"B":"first","b":"second"}"#).unwrap();
        assert_eq!(request, ComparisonRequest::new("", "second"));
    }

    #[test]
    fn test_request_null_fields_are_empty() {
        let request: ComparisonRequest = serde_json::from_str(r#"{"a":null,"b":""}"#).unwrap();
        assert_eq!(request, ComparisonRequest::default());
        assert!(request.is_match());
    }

    #[test]
    fn test_result_rendering() {
        let matched = ComparisonResult::from(true);
        assert_eq!(matched.as_text(), "1");
        assert_eq!(serde_json::to_string(&matched).unwrap(), r#"{"result":1}"#);

        let unmatched = ComparisonResult::from(false);
        assert_eq!(unmatched.as_text(), "0");
        assert!(!unmatched.is_match());
        assert_eq!(serde_json::to_string(&unmatched).unwrap(), r#"{"result":0}"#);
    }
}
