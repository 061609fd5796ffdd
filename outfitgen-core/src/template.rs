//! Flat `{key}` placeholder templates.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::error::GenerateError;
use crate::param::Params;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern compiles")
});

/// Immutable template text shared by every variant of a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read a template file; its file name becomes the template name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let text = fs::read_to_string(path).map_err(|err| GenerateError::io(path, err))?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { name, text })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every placeholder key referenced by the template.
    #[must_use]
    pub fn placeholders(&self) -> BTreeSet<&str> {
        PLACEHOLDER
            .captures_iter(&self.text)
            .filter_map(|caps| caps.get(1))
            .map(|key| key.as_str())
            .collect()
    }

    /// Substitute every `{key}` with its value; `{{` and `}}` become literal braces.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::MissingParameter`] for the first key absent from `params`.
    pub fn render(&self, params: &Params) -> Result<String, GenerateError> {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(&self.text) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            out.push_str(&self.text[last..token.start()]);
            match caps.get(1) {
                Some(key) => {
                    let value = params.get(key.as_str()).ok_or_else(|| {
                        GenerateError::MissingParameter {
                            template: self.name.clone(),
                            key: key.as_str().to_string(),
                        }
                    })?;
                    out.push_str(&value.to_string());
                }
                None if token.as_str() == "{{" => out.push('{'),
                None => out.push('}'),
            }
            last = token.end();
        }
        out.push_str(&self.text[last..]);
        Ok(out)
    }
}
