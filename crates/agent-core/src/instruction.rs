//! Instruction Templates
//!
//! Instructions may reference session state with `{key}` placeholders that the
//! host fills in before each model call:
//!
//! ```text
//! {origin}            required state value
//! {origin?}           optional, renders empty when absent
//! {user:home_city}    scoped state (app:, user:, temp:)
//! {artifact.itinerary}
//! ```
//!
//! Braced text that is not a valid key (JSON examples, prose) is left alone.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AgentError, Result};

const STATE_PREFIXES: [&str; 3] = ["app:", "user:", "temp:"];
const ARTIFACT_PREFIX: &str = "artifact.";

/// A state reference found in an instruction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// State key, including any scope prefix
    pub key: String,

    /// Whether a missing value renders as empty instead of failing
    pub optional: bool,

    /// Byte range of the braced text in the source
    #[serde(skip)]
    span: (usize, usize),
}

impl Placeholder {
    pub fn is_artifact(&self) -> bool {
        self.key.starts_with(ARTIFACT_PREFIX)
    }
}

/// Placeholders in order of appearance
pub fn placeholders(text: &str) -> Vec<Placeholder> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'{' => open = Some(i),
            b'}' => {
                if let Some(start) = open.take() {
                    if let Some((key, optional)) = parse_key(&text[start + 1..i]) {
                        found.push(Placeholder {
                            key,
                            optional,
                            span: brace_run(bytes, start, i + 1),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    found
}

/// Widen a placeholder span over any extra braces wrapping it, so
/// `{{key}}` is replaced as a whole
fn brace_run(bytes: &[u8], mut start: usize, mut end: usize) -> (usize, usize) {
    while start > 0 && bytes[start - 1] == b'{' {
        start -= 1;
    }
    while end < bytes.len() && bytes[end] == b'}' {
        end += 1;
    }
    (start, end)
}

fn parse_key(inner: &str) -> Option<(String, bool)> {
    let inner = inner.trim();
    let (key, optional) = match inner.strip_suffix('?') {
        Some(key) => (key, true),
        None => (inner, false),
    };

    let valid = if let Some(name) = key.strip_prefix(ARTIFACT_PREFIX) {
        !name.is_empty() && !name.chars().any(char::is_whitespace)
    } else {
        let name = STATE_PREFIXES
            .iter()
            .find_map(|prefix| key.strip_prefix(prefix))
            .unwrap_or(key);
        is_identifier(name)
    };

    valid.then(|| (key.to_string(), optional))
}

/// ASCII letter or `_`, followed by ASCII alphanumerics or `_`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Substitute placeholders from session state
pub fn render(text: &str, state: &Map<String, Value>) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for placeholder in placeholders(text) {
        let (start, end) = placeholder.span;
        out.push_str(&text[cursor..start]);

        match state.get(&placeholder.key) {
            Some(Value::String(s)) => out.push_str(s),
            Some(Value::Null) | None if placeholder.optional => {}
            Some(value) if !value.is_null() => out.push_str(&value.to_string()),
            _ => {
                return Err(AgentError::Template(format!(
                    "No value for required placeholder {{{}}}",
                    placeholder.key
                )));
            }
        }

        cursor = end;
    }

    out.push_str(&text[cursor..]);
    Ok(out)
}

/// Strip common indentation and surrounding blank lines from a prompt literal
///
/// Only a whitespace prefix shared by every non-blank line is removed, so
/// lines mixing tabs and spaces keep their indentation.
pub fn dedent(text: &str) -> String {
    let dedented = textwrap::dedent(text);
    let lines: Vec<&str> = dedented.lines().collect();

    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };

    lines[first..=last]
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { l })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(text: &str) -> Vec<(String, bool)> {
        placeholders(text)
            .into_iter()
            .map(|p| (p.key, p.optional))
            .collect()
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            keys("Fly from {origin} to {destination?} for {user:name}."),
            vec![
                ("origin".to_string(), false),
                ("destination".to_string(), true),
                ("user:name".to_string(), false),
            ]
        );
        let artifact = &placeholders("Read {artifact.itinerary.pdf}")[0];
        assert_eq!(artifact.key, "artifact.itinerary.pdf");
        assert!(artifact.is_artifact());
        assert!(!placeholders("{user:name}")[0].is_artifact());
    }

    #[test]
    fn test_non_placeholder_braces_are_literal() {
        assert!(keys(r#"Reply with {"tool": "search"} or { } or {2 cities}"#).is_empty());
        assert!(keys("unbalanced { brace").is_empty());
        assert!(keys("{session:id}").is_empty());
    }

    #[test]
    fn test_render() {
        let state = json!({
            "origin": "Lisbon",
            "passengers": 2,
            "user:name": "Ana",
        });
        let state = state.as_object().unwrap();

        let rendered = render(
            "{user:name}: {passengers} seats from {origin}{note?}. Format: {\"a\": 1}",
            state,
        )
        .unwrap();
        assert_eq!(rendered, "Ana: 2 seats from Lisbon. Format: {\"a\": 1}");
    }

    #[test]
    fn test_render_replaces_doubled_braces() {
        let state = json!({ "origin": "LIS" });
        let state = state.as_object().unwrap();

        assert_eq!(keys("Fly {{origin}} now"), vec![("origin".to_string(), false)]);
        assert_eq!(render("Fly {{origin}} now", state).unwrap(), "Fly LIS now");
        assert_eq!(render("{{{origin}}}!", state).unwrap(), "LIS!");
        assert_eq!(render("{origin}{origin}", state).unwrap(), "LISLIS");
    }

    #[test]
    fn test_render_missing_required() {
        let err = render("To {destination}", &Map::new()).unwrap_err();
        assert!(matches!(err, AgentError::Template(ref msg) if msg.contains("destination")));
    }

    #[test]
    fn test_dedent() {
        let text = "\n    First line\n      - nested\n\n    Last line\n    ";
        assert_eq!(dedent(text), "First line\n  - nested\n\nLast line");
        assert_eq!(dedent("   \n  "), "");
    }

    #[test]
    fn test_dedent_mixed_indentation() {
        assert_eq!(dedent("\tA\n    B"), "\tA\n    B");
        assert_eq!(dedent("\t\tA\n\t  B"), "\tA\n  B");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("flight_search_agent"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("flight-search"));
        assert!(!is_identifier(""));
    }
}
