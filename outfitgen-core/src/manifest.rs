//! JSON manifests describing outfit families, shared text, and run settings.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::GenerateError;
use crate::generator::{RenderBatch, RunReport, VariantGenerator, VariantSet};
use crate::param::{Param, ParamSpec};
use crate::settings::Settings;
use crate::template::Template;
use crate::value::{Translatable, Value};

/// A parameter as written in the manifest, before shared strings are resolved.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawParam {
    Shared {
        #[serde(rename = "ref")]
        key: String,
    },
    Inline(Param),
}

/// A variant name, optionally tagged for translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantName {
    Label(Translatable),
    Plain(String),
}

impl VariantName {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Label(label) => label.as_str(),
            Self::Plain(text) => text,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawFamily {
    template: PathBuf,
    #[serde(default)]
    params: BTreeMap<String, RawParam>,
    names: Vec<VariantName>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawManifest {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    strings: BTreeMap<String, Value>,
    #[serde(default)]
    families: Vec<RawFamily>,
}

/// One family entry with shared strings already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilySpec {
    pub template: PathBuf,
    pub params: ParamSpec,
    pub names: Vec<VariantName>,
}

impl FamilySpec {
    /// Template file name up to its first dot (`pincer.xml.template` -> `pincer`).
    #[must_use]
    pub fn id(&self) -> String {
        self.template
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.split('.').next().map(str::to_string))
            .unwrap_or_default()
    }
}

/// A family ready to render: generator plus validated variant names.
#[derive(Debug, Clone)]
pub struct Family {
    pub id: String,
    pub generator: VariantGenerator,
    pub variants: VariantSet,
}

impl Family {
    /// # Errors
    ///
    /// See [`VariantGenerator::render_all`].
    pub fn render(&self) -> Result<RenderBatch, GenerateError> {
        self.generator.render_all(&self.variants)
    }

    /// # Errors
    ///
    /// See [`VariantGenerator::run`].
    pub fn run(&self, out_dir: &Path) -> Result<RunReport, GenerateError> {
        self.generator.run(&self.variants, out_dir)
    }
}

/// Parsed manifest: settings, shared strings, and family specs.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub settings: Settings,
    base_dir: PathBuf,
    strings: BTreeMap<String, Value>,
    families: Vec<FamilySpec>,
}

impl Manifest {
    /// Parse manifest JSON; template paths resolve relative to `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Manifest`] for malformed JSON and
    /// [`GenerateError::UnknownReference`] for a `ref` missing from `strings`.
    pub fn from_json(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self, GenerateError> {
        let raw: RawManifest = serde_json::from_str(json)?;
        let families = raw
            .families
            .into_iter()
            .map(|family| resolve_family(family, &raw.strings))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            settings: raw.settings,
            base_dir: base_dir.into(),
            strings: raw.strings,
            families,
        })
    }

    /// Read and parse a manifest file, resolving templates next to it.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be read, otherwise see
    /// [`Self::from_json`].
    pub fn load(path: &Path) -> Result<Self, GenerateError> {
        let json = fs::read_to_string(path).map_err(|err| GenerateError::io(path, err))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_json(&json, base_dir)
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    #[must_use]
    pub fn families(&self) -> &[FamilySpec] {
        &self.families
    }

    /// Load the template and validate the names of one family.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] for an unreadable template and
    /// [`GenerateError::InvalidInput`] for an empty or duplicated name list.
    pub fn build_family(&self, spec: &FamilySpec) -> Result<Family, GenerateError> {
        let template = Arc::new(Template::load(&self.base_dir.join(&spec.template))?);
        let variants = VariantSet::new(spec.names.iter().map(|name| name.as_str().to_string()))
            .map_err(|err| match err {
                GenerateError::InvalidInput(reason) => {
                    GenerateError::InvalidInput(format!("{}: {reason}", spec.id()))
                }
                other => other,
            })?;
        Ok(Family {
            id: spec.id(),
            generator: VariantGenerator::new(template, spec.params.clone(), self.settings.clone()),
            variants,
        })
    }

    /// Every string tagged for translation, deduplicated in first-seen order.
    ///
    /// Covers the shared string table, family parameters, and variant names.
    #[must_use]
    pub fn translatable_strings(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let shared = self.strings.values().filter_map(Value::as_label);
        let params = self.families.iter().flat_map(|family| {
            family.params.iter().filter_map(|(_, param)| match param {
                Param::Constant(Value::Label(label)) => Some(label),
                _ => None,
            })
        });
        let names = self.families.iter().flat_map(|family| {
            family.names.iter().filter_map(|name| match name {
                VariantName::Label(label) => Some(label),
                VariantName::Plain(_) => None,
            })
        });
        for label in shared.chain(params).chain(names) {
            if seen.insert(label.as_str()) {
                out.push(label.as_str());
            }
        }
        out
    }

    /// Family ids in manifest order with the number of variants each produces.
    #[must_use]
    pub fn family_index(&self) -> Vec<(String, usize)> {
        let mut index: Vec<(String, usize)> = Vec::new();
        for family in &self.families {
            let id = family.id();
            match index.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, count)) => *count += family.names.len(),
                None => index.push((id, family.names.len())),
            }
        }
        index
    }
}

fn resolve_family(
    raw: RawFamily,
    strings: &BTreeMap<String, Value>,
) -> Result<FamilySpec, GenerateError> {
    let params = raw
        .params
        .into_iter()
        .map(|(key, param)| {
            let resolved = match param {
                RawParam::Shared { key: reference } => strings
                    .get(&reference)
                    .cloned()
                    .map(Param::Constant)
                    .ok_or(GenerateError::UnknownReference(reference))?,
                RawParam::Inline(param) => param,
            };
            Ok((key, resolved))
        })
        .collect::<Result<ParamSpec, GenerateError>>()?;
    Ok(FamilySpec {
        template: raw.template,
        params,
        names: raw.names,
    })
}
