//! csv-structer
//!
//! Maps flat CSV rows onto statically declared record types.
//!
//! # Crates
//!
//! - `structer_core` - record declaration (`record!`), schema construction,
//!   header validation and row scanning
//! - `csv_structer_source` - reading CSV files with the `csv` crate into records
//!
//! # Usage
//!
//! ```
//! use csv_structer::{record, RecordSchema};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Row {
//!         #[csv = "field1"]
//!         pub field1: String,
//!         #[csv = "field2"]
//!         pub field2: i64,
//!         pub extra: Extra,
//!     }
//! }
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Extra {
//!         #[csv = "field3"]
//!         pub field3: String,
//!     }
//! }
//!
//! let headers = ["field1", "field2", "field3"];
//! let schema = RecordSchema::new(&Row::default(), &headers).unwrap();
//! assert!(schema.validate_headers(&headers));
//!
//! let mut row = Row::default();
//! schema.scan_into(&["apple", "43", "banana"], &mut row).unwrap();
//! assert_eq!(row.extra.field3, "banana");
//! ```

pub use structer_core::*;

// Re-export the CSV reader crate for convenience
pub use csv_structer_source as csv;
