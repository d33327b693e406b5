//! Schema construction options.

use serde::{Deserialize, Serialize};

/// When to reject bindings that resolve through non-public fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessCheck {
    /// Construction succeeds; every scan fails once it reaches the binding.
    #[default]
    OnScan,
    /// Construction fails.
    OnBuild,
}

/// Options for [`RecordSchema::with_options`](crate::RecordSchema::with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    pub access_check: AccessCheck,

    /// Strip leading and trailing whitespace from cells before conversion
    pub trim_cells: bool,
}
