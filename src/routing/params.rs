//! Positional route parameters.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

/// Captured groups of the matched route, in left-to-right order.
///
/// Captures are always strings; actions coerce them with [`Params::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<String>,
}

/// Failure to read a positional parameter.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("missing route parameter #{index}")]
    Missing { index: usize },

    #[error("route parameter #{index} ({value:?}) is not a valid {target}: {reason}")]
    Invalid {
        index: usize,
        value: String,
        target: &'static str,
        reason: String,
    },
}

impl Params {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Parameter at `index`, or [`ParamError::Missing`].
    pub fn require(&self, index: usize) -> Result<&str, ParamError> {
        self.get(index).ok_or(ParamError::Missing { index })
    }

    /// Parse the parameter at `index` into `T`.
    pub fn parse<T>(&self, index: usize) -> Result<T, ParamError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.require(index)?;
        value.parse::<T>().map_err(|e| ParamError::Invalid {
            index,
            value: value.to_string(),
            target: std::any::type_name::<T>(),
            reason: e.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Params {
    fn from(values: Vec<String>) -> Self {
        Self::new(values)
    }
}
