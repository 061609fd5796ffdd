//! Parameter specifications and their evaluation at a progression position.
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::interp::{Interpolator, Rounding};
use crate::value::{Translatable, Value};

/// Placeholder key that always carries the variant's display name.
pub const NAME_KEY: &str = "name";

/// Concrete placeholder values for one variant.
pub type Params = BTreeMap<String, Value>;

/// One entry of a parameter specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Interpolated(Interpolator),
    Constant(Value),
}

impl Param {
    #[must_use]
    pub fn eval(&self, position: f64, rounding: Rounding) -> Value {
        match self {
            Self::Interpolated(interp) => interp.eval(position, rounding),
            Self::Constant(value) => value.clone(),
        }
    }
}

impl From<Interpolator> for Param {
    fn from(interp: Interpolator) -> Self {
        Self::Interpolated(interp)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Self::Constant(value)
    }
}

macro_rules! constant_param_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Self::Constant(Value::from(value))
                }
            }
        )*
    };
}

constant_param_from!(i64, f64, &str, String, Translatable);

/// Mapping from parameter name to constant or interpolated value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSpec(BTreeMap<String, Param>);

impl ParamSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of any constant or interpolator.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, param: impl Into<Param>) -> Self {
        self.insert(key, param);
        self
    }

    #[must_use]
    pub fn linear(self, key: impl Into<String>, start: f64, end: f64) -> Self {
        self.with(key, Interpolator::linear(start, end))
    }

    #[must_use]
    pub fn rounded(self, key: impl Into<String>, start: f64, end: f64) -> Self {
        self.with(key, Interpolator::rounded(start, end))
    }

    pub fn insert(&mut self, key: impl Into<String>, param: impl Into<Param>) -> Option<Param> {
        self.0.insert(key.into(), param.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Param)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Evaluate every parameter at `position` and inject `name` under [`NAME_KEY`].
    ///
    /// A spec entry named `name` is overwritten by the variant name.
    #[must_use]
    pub fn evaluate(&self, position: f64, name: &str, rounding: Rounding) -> Params {
        let mut params: Params = self
            .0
            .iter()
            .map(|(key, param)| (key.clone(), param.eval(position, rounding)))
            .collect();
        if let Some(previous) = params.insert(NAME_KEY.to_string(), Value::from(name)) {
            debug!("variant name `{name}` overrides spec value `{previous}` for `{NAME_KEY}`");
        }
        params
    }
}

impl FromIterator<(String, Param)> for ParamSpec {
    fn from_iter<I: IntoIterator<Item = (String, Param)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
