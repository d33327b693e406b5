//! Field-level reflection for record types.
//!
//! Every value that can sit in a record field implements [`Reflect`], which
//! exposes it either as a scalar slot or as a nested record. Record types
//! additionally implement [`Record`], describing their declared fields in
//! declaration order. Both traits are normally implemented by the
//! [`record!`](crate::record) macro.

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;

/// Primitive destination type of a bound column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    String,
    Integer,
    Boolean,
    Float32,
    Float64,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Float32 => "float32",
            ScalarKind::Float64 => "float64",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility of a declared field, as written in the struct declaration.
///
/// Only plain `pub` fields are reachable through a binding. `pub(crate)`,
/// `pub(super)` and private fields are all treated as unexported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Restricted,
    Private,
}

impl Visibility {
    /// Classify the stringified visibility token of a field declaration.
    pub const fn from_token(token: &str) -> Self {
        let bytes = token.as_bytes();
        if bytes.is_empty() {
            Visibility::Private
        } else if bytes.len() == 3 && bytes[0] == b'p' && bytes[1] == b'u' && bytes[2] == b'b' {
            Visibility::Public
        } else {
            Visibility::Restricted
        }
    }

    pub const fn is_accessible(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field identifier in the struct declaration
    pub name: &'static str,
    /// Column named by the field's `#[csv = "..."]` annotation, if any
    pub column: Option<&'static str>,
    /// Declared visibility
    pub visibility: Visibility,
}

/// Writable scalar slot inside a record.
#[derive(Debug)]
pub enum ScalarMut<'a> {
    String(&'a mut String),
    Integer(&'a mut i64),
    Boolean(&'a mut bool),
    Float32(&'a mut f32),
    Float64(&'a mut f64),
}

impl ScalarMut<'_> {
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarMut::String(_) => ScalarKind::String,
            ScalarMut::Integer(_) => ScalarKind::Integer,
            ScalarMut::Boolean(_) => ScalarKind::Boolean,
            ScalarMut::Float32(_) => ScalarKind::Float32,
            ScalarMut::Float64(_) => ScalarKind::Float64,
        }
    }
}

/// Read-only view of a reflected value.
pub enum FieldRef<'a> {
    Scalar(ScalarKind),
    Record(&'a dyn Record),
}

/// Mutable view of a reflected value.
pub enum FieldMut<'a> {
    Scalar(ScalarMut<'a>),
    Record(&'a mut dyn Record),
}

/// A value that can be the template of a schema, the destination of a scan,
/// or a field of a record.
pub trait Reflect {
    fn reflect(&self) -> FieldRef<'_>;

    fn reflect_mut(&mut self) -> FieldMut<'_>;

    /// Fully qualified Rust type name, used in error messages.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A struct-like type whose fields can be bound to CSV columns.
pub trait Record: Reflect {
    /// Identity used to reject scans into a different record type.
    fn record_type(&self) -> TypeId;

    /// Declared fields, in declaration order.
    fn fields(&self) -> &'static [FieldInfo];

    fn field(&self, index: usize) -> Option<FieldRef<'_>>;

    fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>>;
}

macro_rules! scalar_reflect {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn reflect(&self) -> FieldRef<'_> {
                    FieldRef::Scalar(ScalarKind::$kind)
                }

                fn reflect_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Scalar(ScalarMut::$kind(self))
                }
            }
        )*
    };
}

scalar_reflect! {
    String => String,
    i64 => Integer,
    bool => Boolean,
    f32 => Float32,
    f64 => Float64,
}
