//! Error types for schema construction and record scanning.

use crate::reflect::ScalarKind;
use thiserror::Error;

/// A cell whose text does not parse into its bound field's scalar kind.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to parse '{value}' as {kind}: {reason}")]
pub struct ConversionError {
    pub value: String,
    pub kind: ScalarKind,
    pub reason: String,
}

impl ConversionError {
    pub fn new(value: impl Into<String>, kind: ScalarKind, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while building a [`RecordSchema`](crate::RecordSchema).
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The template does not reflect as a record.
    #[error("template should be a reference to a struct, got `{type_name}`")]
    NotARecord { type_name: &'static str },

    /// A bound column resolves through a non-public field.
    ///
    /// Only raised at construction with [`AccessCheck::OnBuild`](crate::AccessCheck::OnBuild).
    #[error("struct contains unexported fields")]
    UnexportedField { column: String, path: String },
}

/// Errors that can occur while scanning a row into a record.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The destination does not reflect as a record.
    #[error("input should be a pointer to a struct")]
    InputShape,

    /// A bound column resolves through a non-public field.
    #[error("struct contains unexported fields")]
    UnexportedField { column: String, path: String },

    /// The destination is a different record type than the schema's template.
    #[error("schema was built for `{expected}` but the destination is `{found}`")]
    RecordMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A cell failed to convert to its field's scalar kind.
    #[error("column '{column}' ({path}): {source}")]
    Conversion {
        column: String,
        path: String,
        #[source]
        source: ConversionError,
    },
}

impl ScanError {
    /// The column whose binding failed, when the error is tied to one.
    pub fn column(&self) -> Option<&str> {
        match self {
            ScanError::UnexportedField { column, .. } | ScanError::Conversion { column, .. } => {
                Some(column)
            }
            ScanError::InputShape | ScanError::RecordMismatch { .. } => None,
        }
    }
}
