//! Binds ordered CSV cells onto annotated record types.
//!
//! Record types are declared with the [`record!`] macro, which associates
//! fields with header columns through `#[csv = "column"]` annotations. A
//! [`RecordSchema`] is built once per record type and header row, and then
//! converts every data row into a populated record.
//!
//! # Modules
//!
//! - [`reflect`] - Field-level reflection traits implemented by `record!`
//! - [`schema`] - Schema construction and header validation
//! - [`scan`] - Row scanning into destination records
//! - [`convert`] - Cell text → scalar conversion
//!
//! # Example
//!
//! ```
//! use structer_core::{record, RecordSchema};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Row {
//!         #[csv = "field1"]
//!         pub field1: String,
//!         #[csv = "field2"]
//!         pub field2: i64,
//!     }
//! }
//!
//! let headers = ["field1", "field2"];
//! let schema = RecordSchema::new(&Row::default(), &headers).unwrap();
//! assert!(schema.validate_headers(&headers));
//!
//! let mut row = Row::default();
//! schema.scan_into(&["apple", "43"], &mut row).unwrap();
//! assert_eq!(row.field2, 43);
//! ```

mod macros;

pub mod convert;
pub mod error;
pub mod options;
pub mod reflect;
pub mod scan;
pub mod schema;

pub use error::{ConversionError, ScanError, SchemaError};
pub use options::{AccessCheck, SchemaOptions};
pub use reflect::{
    FieldInfo, FieldMut, FieldRef, Record, Reflect, ScalarKind, ScalarMut, Visibility,
};
pub use schema::{ColumnBinding, FieldPath, PathSegment, RecordSchema};
