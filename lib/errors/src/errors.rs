use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use cursor::{Col, Line};
use itertools::Itertools;

/// Where in the source an error was detected, as shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Location {
    /// No lexeme to point at, e.g. for lexical errors.
    Unknown,
    AtEnd,
    At(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Unknown => Ok(()),
            Location::AtEnd => write!(f, " at end"),
            Location::At(lexeme) => write!(f, " at '{lexeme}'"),
        }
    }
}

/// A lexical or syntax error. These are reported, and scanning/parsing
/// continues so that a single pass finds as many of them as possible.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{location}: {message}")]
pub struct RloxError {
    pub line: Line,
    pub col: Col,
    pub location: Location,
    pub message: String,
}

#[derive(thiserror::Error, Debug, Default, PartialEq)]
pub struct RloxErrors(pub Vec<RloxError>);

impl From<RloxError> for RloxErrors {
    fn from(e: RloxError) -> Self {
        Self(vec![e])
    }
}

impl Deref for RloxErrors {
    type Target = Vec<RloxError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RloxErrors {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Extend<RloxError> for RloxErrors {
    fn extend<T: IntoIterator<Item = RloxError>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl Display for RloxErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

pub type Result<T> = std::result::Result<T, RloxError>;
