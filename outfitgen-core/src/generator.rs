//! Variant generation: positions, rendering, marking, and artifact writes.
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::GenerateError;
use crate::naming::{artifact_file_name, mark};
use crate::numbers::usize_to_f64;
use crate::param::{NAME_KEY, ParamSpec};
use crate::settings::{MissingPolicy, Settings};
use crate::template::Template;

/// Normalized progression position of variant `index` in a family of `count`.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidInput`] when `count` is zero or `index` is out of range.
pub fn position(index: usize, count: usize) -> Result<f64, GenerateError> {
    if count == 0 {
        return Err(GenerateError::InvalidInput(
            "variant set is empty".to_string(),
        ));
    }
    if index >= count {
        return Err(GenerateError::InvalidInput(format!(
            "variant index {index} out of range for {count} variants"
        )));
    }
    if count == 1 {
        return Ok(0.0);
    }
    Ok(usize_to_f64(index) / usize_to_f64(count - 1))
}

/// Ordered, non-empty sequence of distinct variant display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSet(Vec<String>);

impl VariantSet {
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidInput`] for an empty list or a repeated name.
    pub fn new<I, S>(names: I) -> Result<Self, GenerateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(GenerateError::InvalidInput(
                "variant set is empty".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(GenerateError::InvalidInput(format!(
                    "duplicate variant name `{name}`"
                )));
            }
        }
        Ok(Self(names))
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One rendered variant ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub variant: String,
    pub position: f64,
    pub file_name: String,
    pub text: String,
}

impl Artifact {
    /// Write into `dir`, replacing any existing file of the same name.
    ///
    /// The text lands in a sibling temporary file first and is renamed into
    /// place, so a failed write never leaves a truncated artifact behind.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Io`] if the file cannot be written or moved.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf, GenerateError> {
        let target = dir.join(&self.file_name);
        let staging = dir.join(format!(".{}.tmp", self.file_name));
        fs::write(&staging, &self.text).map_err(|err| GenerateError::io(&staging, err))?;
        if let Err(err) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(GenerateError::io(&target, err));
        }
        Ok(target)
    }
}

/// A variant left out of a run under [`MissingPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedVariant {
    pub variant: String,
    pub reason: String,
}

/// In-memory result of rendering a whole family.
#[derive(Debug, Clone, Default)]
pub struct RenderBatch {
    pub artifacts: Vec<Artifact>,
    pub skipped: Vec<SkippedVariant>,
}

/// Summary of one artifact in a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactSummary {
    pub variant: String,
    pub position: f64,
    pub path: PathBuf,
}

/// Outcome of generating one family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub template: String,
    pub written: bool,
    pub artifacts: Vec<ArtifactSummary>,
    pub skipped: Vec<SkippedVariant>,
}

impl RunReport {
    /// Describe `batch` as if written into `dir`, without touching the filesystem.
    #[must_use]
    pub fn planned(template: &str, batch: &RenderBatch, dir: &Path) -> Self {
        Self {
            template: template.to_string(),
            written: false,
            artifacts: batch
                .artifacts
                .iter()
                .map(|artifact| ArtifactSummary {
                    variant: artifact.variant.clone(),
                    position: artifact.position,
                    path: dir.join(&artifact.file_name),
                })
                .collect(),
            skipped: batch.skipped.clone(),
        }
    }
}

/// Renders every variant of one family from a shared template and parameter spec.
#[derive(Debug, Clone)]
pub struct VariantGenerator {
    template: Arc<Template>,
    params: ParamSpec,
    settings: Settings,
}

impl VariantGenerator {
    #[must_use]
    pub fn new(template: Arc<Template>, params: ParamSpec, settings: Settings) -> Self {
        Self {
            template,
            params,
            settings,
        }
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub const fn params(&self) -> &ParamSpec {
        &self.params
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Placeholder keys the template uses that neither the spec nor `name` supply.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        self.template
            .placeholders()
            .into_iter()
            .filter(|key| *key != NAME_KEY && !self.params.contains_key(key))
            .map(str::to_string)
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`GenerateError::MissingParameter`] for the first unsupplied placeholder.
    pub fn check(&self) -> Result<(), GenerateError> {
        match self.missing_keys().into_iter().next() {
            Some(key) => Err(GenerateError::MissingParameter {
                template: self.template.name().to_string(),
                key,
            }),
            None => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidInput`] when two variants map to the same
    /// artifact file (`Item I` and `ITEM I`) or a name cannot be a file name.
    pub fn check_file_names(&self, variants: &VariantSet) -> Result<(), GenerateError> {
        let mut claimed: BTreeMap<String, &str> = BTreeMap::new();
        for name in variants.names() {
            match claimed.entry(artifact_file_name(name, &self.settings.extension)?) {
                Entry::Occupied(entry) => {
                    return Err(GenerateError::InvalidInput(format!(
                        "variants `{}` and `{name}` would both write `{}`",
                        entry.get(),
                        entry.key()
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(name);
                }
            }
        }
        Ok(())
    }

    /// Render and mark the variant at `index` of `variants`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::InvalidInput`] for a bad index or a name that
    /// cannot be a file name, and [`GenerateError::MissingParameter`] for an
    /// unsupplied placeholder.
    pub fn render_variant(
        &self,
        variants: &VariantSet,
        index: usize,
    ) -> Result<Artifact, GenerateError> {
        let position = position(index, variants.len())?;
        let name = &variants.names()[index];
        let params = self.params.evaluate(position, name, self.settings.rounding);
        let rendered = self.template.render(&params)?;
        let text = mark(&rendered, &self.settings.anchor, &self.settings.marker);
        debug!(
            "rendered {name} from {} at position {position:.3}",
            self.template.name()
        );
        Ok(Artifact {
            variant: name.clone(),
            position,
            file_name: artifact_file_name(name, &self.settings.extension)?,
            text,
        })
    }

    /// Render every variant in order without writing anything.
    ///
    /// # Errors
    ///
    /// Fails up front on clashing file names (see [`Self::check_file_names`]).
    /// Otherwise returns the first rendering error unless the missing-parameter
    /// policy is [`MissingPolicy::Skip`], in which case offending variants are
    /// reported in [`RenderBatch::skipped`].
    pub fn render_all(&self, variants: &VariantSet) -> Result<RenderBatch, GenerateError> {
        self.check_file_names(variants)?;
        let mut batch = RenderBatch::default();
        for index in 0..variants.len() {
            match self.render_variant(variants, index) {
                Ok(artifact) => batch.artifacts.push(artifact),
                Err(err @ GenerateError::MissingParameter { .. })
                    if self.settings.on_missing == MissingPolicy::Skip =>
                {
                    let variant = variants.names()[index].clone();
                    warn!("skipping {variant}: {err}");
                    batch.skipped.push(SkippedVariant {
                        variant,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
        Ok(batch)
    }

    /// Render every variant and write each artifact into `out_dir`.
    ///
    /// Nothing is written if rendering aborts.
    ///
    /// # Errors
    ///
    /// Propagates rendering errors from [`Self::render_all`] and any
    /// [`GenerateError::Io`] from creating `out_dir` or writing artifacts.
    pub fn run(&self, variants: &VariantSet, out_dir: &Path) -> Result<RunReport, GenerateError> {
        let batch = self.render_all(variants)?;
        fs::create_dir_all(out_dir).map_err(|err| GenerateError::io(out_dir, err))?;
        let mut artifacts = Vec::with_capacity(batch.artifacts.len());
        for artifact in &batch.artifacts {
            let path = artifact.write_into(out_dir)?;
            artifacts.push(ArtifactSummary {
                variant: artifact.variant.clone(),
                position: artifact.position,
                path,
            });
        }
        info!(
            "{}: wrote {} artifact(s), skipped {}",
            self.template.name(),
            artifacts.len(),
            batch.skipped.len()
        );
        Ok(RunReport {
            template: self.template.name().to_string(),
            written: true,
            artifacts,
            skipped: batch.skipped,
        })
    }
}
