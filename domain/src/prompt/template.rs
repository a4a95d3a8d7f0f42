//! Prompt templates with named placeholders

use super::kind::PromptKind;
use crate::core::error::DomainError;
use std::collections::{BTreeMap, BTreeSet};

/// Variables substituted into a template, keyed by placeholder name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptVariables {
    values: BTreeMap<String, String>,
}

impl PromptVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A template string with `{name}` placeholders.
///
/// `{{` and `}}` render as literal braces. A `{` that does not open a
/// well-formed placeholder is kept as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    kind: PromptKind,
    source: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn new(kind: PromptKind, source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = parse(&source);
        Self {
            kind,
            source,
            segments,
        }
    }

    /// Distinct placeholder names in the template
    pub fn placeholders(&self) -> BTreeSet<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Check the template declares exactly its kind's required keys
    pub fn validate(&self) -> Vec<DomainError> {
        let placeholders = self.placeholders();
        let required = self.kind.required_keys();
        let mut errors = Vec::new();

        for key in required {
            if !placeholders.contains(key) {
                errors.push(DomainError::MissingTemplateVariable {
                    kind: self.kind.as_str().to_string(),
                    key: key.to_string(),
                });
            }
        }
        for key in placeholders {
            if !required.iter().any(|r| *r == key) {
                errors.push(DomainError::UnknownPlaceholder {
                    kind: self.kind.as_str().to_string(),
                    key: key.to_string(),
                });
            }
        }
        errors
    }

    /// Render the template.
    ///
    /// Every required key of the kind must be present in `variables`,
    /// even if the template text happens not to use it.
    pub fn render(&self, variables: &PromptVariables) -> Result<String, DomainError> {
        for key in self.kind.required_keys() {
            if !variables.contains(key) {
                return Err(self.missing(key));
            }
        }

        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = variables.get(name).ok_or_else(|| self.missing(name))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    fn missing(&self, key: &str) -> DomainError {
        DomainError::MissingTemplateVariable {
            kind: self.kind.as_str().to_string(),
            key: key.to_string(),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse(source: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = source;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with("{{") {
            literal.push('{');
            rest = &rest[2..];
        } else if rest.starts_with("}}") {
            literal.push('}');
            rest = &rest[2..];
        } else if c == '{' {
            let body = &rest[1..];
            match body.find('}') {
                Some(end) if end > 0 && body[..end].chars().all(is_name_char) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(body[..end].to_string()));
                    rest = &body[end + 1..];
                }
                _ => {
                    literal.push('{');
                    rest = body;
                }
            }
        } else {
            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_placeholders() {
        let template = PromptTemplate::new(
            PromptKind::Generate,
            "Context:\n{context}\n\nQuestion: {question}",
        );
        let vars = PromptVariables::new()
            .with("question", "price?")
            .with("context", "Title: iPhone 15");
        assert_eq!(
            template.render(&vars).unwrap(),
            "Context:\nTitle: iPhone 15\n\nQuestion: price?"
        );
    }

    #[test]
    fn test_render_missing_required_key_fails() {
        let template = PromptTemplate::new(PromptKind::Generate, "{question} {context}");
        let vars = PromptVariables::new().with("question", "q");
        let err = template.render(&vars).unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingTemplateVariable {
                kind: "generate".to_string(),
                key: "context".to_string()
            }
        );
    }

    #[test]
    fn test_escaped_and_stray_braces_are_literal() {
        let template = PromptTemplate::new(
            PromptKind::Direct,
            "Reply as {{\"answer\": ...}} for {question} { not a var }",
        );
        assert_eq!(template.placeholders().into_iter().collect::<Vec<_>>(), vec!["question"]);
        let out = template
            .render(&PromptVariables::new().with("question", "Q"))
            .unwrap();
        assert_eq!(out, "Reply as {\"answer\": ...} for Q { not a var }");
    }

    #[test]
    fn test_validate_reports_missing_and_unknown() {
        let template = PromptTemplate::new(PromptKind::Grade, "{question} {documents}");
        let errors = template.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&DomainError::MissingTemplateVariable {
            kind: "grade".to_string(),
            key: "context".to_string()
        }));
        assert!(errors.contains(&DomainError::UnknownPlaceholder {
            kind: "grade".to_string(),
            key: "documents".to_string()
        }));
    }

    #[test]
    fn test_unicode_literals_preserved() {
        let template = PromptTemplate::new(PromptKind::Rewrite, "Réécris: {question} ✓");
        let out = template
            .render(&PromptVariables::new().with("question", "prix?"))
            .unwrap();
        assert_eq!(out, "Réécris: prix? ✓");
    }
}
