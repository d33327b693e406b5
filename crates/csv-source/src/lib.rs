//! CSV record reading for csv-structer
//!
//! This crate is the transport side of csv-structer: it reads delimited text
//! with the `csv` crate and hands header and data rows to a
//! [`RecordSchema`](structer_core::RecordSchema) for binding.

mod config;
mod reader;

pub use config::Config;
pub use reader::{read_file, RecordReader};
