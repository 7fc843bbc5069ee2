//! Ruleset error types.
//!
//! Eligibility rejections are not errors and do not appear here. These
//! variants cover malformed inputs, lookups against a catalog that does not
//! know the class, and rulebook files that cannot be loaded.

use std::path::PathBuf;

use mdl_core::{ClassId, ValidationError};
use thiserror::Error;

/// Errors raised while evaluating the ruleset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Malformed caller input.
    #[error("input validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The class is not in the active catalog.
    #[error("unknown license class {0}")]
    UnknownClass(ClassId),

    /// Validity periods are 1, 3, 4 or 5 years.
    #[error("unsupported validity period of {0} years")]
    UnsupportedValidity(u32),

    /// A duplicate keeps the original expiry, which the caller must supply.
    #[error("duplicate of a class {0} license requires the current expiration date")]
    MissingCurrentExpiry(ClassId),
}

/// Errors raised while loading or validating a rulebook.
#[derive(Error, Debug)]
pub enum RulebookError {
    /// The rulebook file does not exist.
    #[error("rulebook file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Only `.yaml`, `.yml` and `.json` rulebooks are understood.
    #[error("unsupported rulebook format for {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat {
        /// Path with the unrecognized extension.
        path: PathBuf,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML rulebook at {path}: {source}")]
    YamlParse {
        /// Rulebook file.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON rulebook at {path}: {source}")]
    JsonParse {
        /// Rulebook file.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_json::Error,
    },

    /// The rulebook parsed but violates a structural rule.
    #[error("invalid rulebook: {0}")]
    Invalid(String),

    /// Serializing a rulebook failed.
    #[error("failed to serialize rulebook: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for rulebook operations.
pub type RulebookResult<T> = Result<T, RulebookError>;
