//! Jekyll pages carrying a JSON resource after their YAML front matter.

use serde_json::Value;
use serde_yaml::Mapping;

use crate::error::{EqdsError, Result};

const DELIMITER: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub struct JekyllDocument {
    pub front_matter: Mapping,
    pub body: Value,
}

/// Splits `content` at its front matter and parses the body as JSON.
///
/// `source` only names the file in error messages.
pub fn parse_jekyll(source: &str, content: &str) -> Result<JekyllDocument> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.first() != Some(&DELIMITER) {
        return Err(EqdsError::front_matter(
            source,
            "does not have Jekyll front matter",
        ));
    }

    let end = lines
        .iter()
        .skip(1)
        .position(|line| *line == DELIMITER)
        .map(|offset| offset + 1)
        .ok_or_else(|| {
            EqdsError::front_matter(source, "does not have proper Jekyll front matter")
        })?;

    let yaml = lines[1..end].join("\n");
    let front_matter = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        serde_yaml::from_str(&yaml)?
    };

    let body = serde_json::from_str(lines[end + 1..].join("\n").trim())?;

    Ok(JekyllDocument { front_matter, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_front_matter_and_body() {
        let content = "---\nlayout: profile\ntitle: Equine Patient\n---\n\n{\"id\": \"equine-patient\"}\n";
        let doc = parse_jekyll("equine-patient.json", content).unwrap();

        assert_eq!(doc.body, json!({"id": "equine-patient"}));
        assert_eq!(
            doc.front_matter.get("layout").and_then(|v| v.as_str()),
            Some("profile")
        );
    }

    #[test]
    fn test_empty_front_matter() {
        let doc = parse_jekyll("x.json", "---\n---\n{}").unwrap();
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.body, json!({}));
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse_jekyll("x.json", "---\r\nlayout: page\r\n---\r\n[1, 2]\r\n").unwrap();
        assert_eq!(doc.body, json!([1, 2]));
    }

    #[test]
    fn test_missing_front_matter() {
        let err = parse_jekyll("plain.json", "{\"id\": 1}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "File plain.json does not have Jekyll front matter"
        );
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = parse_jekyll("open.json", "---\nlayout: page\n{}").unwrap_err();
        assert_eq!(
            err.to_string(),
            "File open.json does not have proper Jekyll front matter"
        );
    }

    #[test]
    fn test_invalid_json_body() {
        let err = parse_jekyll("broken.json", "---\n---\n{not json").unwrap_err();
        assert!(matches!(err, EqdsError::Serialization(_)));
    }
}
