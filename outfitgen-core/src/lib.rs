//! Outfit Variant Generator
//!
//! Renders families of progressively scaled outfit definitions from flat
//! `{key}` templates. Each parameter is either a constant or a linear
//! interpolation between two endpoints, evaluated at the variant's position
//! along its family (0 for the first name, 1 for the last).

pub mod error;
pub mod generator;
pub mod interp;
pub mod manifest;
pub mod naming;
pub mod numbers;
pub mod param;
pub mod settings;
pub mod template;
pub mod value;

// Re-export commonly used types
pub use error::GenerateError;
pub use generator::{
    Artifact, ArtifactSummary, RenderBatch, RunReport, SkippedVariant, VariantGenerator,
    VariantSet, position,
};
pub use interp::{Interpolator, Rounding, lerp};
pub use manifest::{Family, FamilySpec, Manifest, VariantName};
pub use naming::{artifact_file_name, mark};
pub use param::{NAME_KEY, Param, ParamSpec, Params};
pub use settings::{MissingPolicy, Settings};
pub use template::Template;
pub use value::{Translatable, Value};
