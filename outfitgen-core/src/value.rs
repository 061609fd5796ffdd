//! Concrete parameter values substituted into templates.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Text tagged for translation extraction.
///
/// Evaluation is the identity: the wrapped text renders unchanged. The tag
/// only matters to tooling that collects strings for translators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Translatable {
    #[serde(rename = "tr")]
    text: String,
}

impl Translatable {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Translatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A concrete value for one template placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Real(f64),
    Label(Translatable),
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn as_label(&self) -> Option<&Translatable> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }
}

/// Shortest round-trip decimal form, always keeping a fractional part.
fn format_real(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        write!(f, "{text}.0")
    } else {
        f.write_str(&text)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Real(value) => format_real(*value, f),
            Self::Label(label) => f.write_str(label.as_str()),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Translatable> for Value {
    fn from(value: Translatable) -> Self {
        Self::Label(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reals_keep_a_fractional_part() {
        assert_eq!(Value::Real(8.0).to_string(), "8.0");
        assert_eq!(Value::Real(12.5).to_string(), "12.5");
        assert_eq!(Value::Real(4_000_000.0).to_string(), "4000000.0");
        assert_eq!(Value::Real(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn ints_and_text_render_plainly() {
        assert_eq!(Value::Int(20000).to_string(), "20000");
        assert_eq!(Value::from("plasma").to_string(), "plasma");
        assert_eq!(
            Value::from(Translatable::new("Bioship Shell")).to_string(),
            "Bioship Shell"
        );
    }

    #[test]
    fn deserializes_untagged_forms() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[4, 4.5, "text", {"tr": "label"}]"#).unwrap();
        assert_eq!(values[0], Value::Int(4));
        assert_eq!(values[1], Value::Real(4.5));
        assert_eq!(values[2], Value::Text("text".to_string()));
        assert_eq!(values[3], Value::Label(Translatable::new("label")));
        assert_eq!(values[3].as_label().map(Translatable::as_str), Some("label"));
        assert!(values[2].as_label().is_none());
    }
}
