//! Record reader implementation
//!
//! Drives a `csv::Reader` and binds every data row onto a record type: the
//! header row is read once, the schema is built from it (or from the
//! configured expected columns), and each following row is scanned into a
//! fresh record.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use structer_core::{Record, RecordSchema};
use tracing::{debug, info, warn};

use crate::config::Config;

/// Iterator over the records of one CSV source
pub struct RecordReader<R: Read, T> {
    reader: csv::Reader<R>,
    schema: RecordSchema,
    headers: Vec<String>,
    rows_read: u64,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record + Default> RecordReader<File, T> {
    /// Open a local CSV file
    pub fn from_path<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading CSV from: {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
        Self::from_reader(file, config)
    }
}

impl<R: Read, T: Record + Default> RecordReader<R, T> {
    /// Read the header row and build the record schema
    pub fn from_reader(reader: R, config: &Config) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(config.has_headers)
            .delimiter(config.delimiter_byte()?)
            .trim(if config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let headers = if config.has_headers {
            csv_reader
                .headers()
                .context("Failed to read CSV headers")?
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<String>>()
        } else if let Some(ref column_names) = config.column_names {
            column_names.clone()
        } else {
            bail!("column_names must be provided when the CSV has no header row");
        };

        let expected: &[String] = config.expected_columns.as_deref().unwrap_or(&headers);
        let schema = RecordSchema::with_options(&T::default(), expected, config.schema.clone())
            .context("Failed to build record schema")?;

        if !schema.validate_headers(&headers) {
            if config.strict_headers {
                bail!(
                    "CSV header mismatch: expected [{}], found [{}]",
                    expected.join(", "),
                    headers.join(", ")
                );
            }
            warn!(
                "CSV header [{}] does not match expected [{}]; binding by position",
                headers.join(", "),
                expected.join(", ")
            );
        }

        let unbound: Vec<&str> = schema
            .expected_headers()
            .iter()
            .zip(schema.bindings())
            .filter(|(_, binding)| binding.is_none())
            .map(|(header, _)| header.as_str())
            .collect();
        if !unbound.is_empty() {
            debug!(
                "Columns without a field in {}: {}",
                schema.record_name(),
                unbound.join(", ")
            );
        }

        Ok(Self {
            reader: csv_reader,
            schema,
            headers,
            rows_read: 0,
            _record: PhantomData,
        })
    }

    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// Header row as read from the source (or the configured column names)
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows read so far
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }

    /// Read every remaining row, stopping at the first error
    pub fn read_all(self) -> Result<Vec<T>> {
        let records = self.collect::<Result<Vec<T>>>()?;
        debug!("Read {} records", records.len());
        Ok(records)
    }
}

impl<R: Read, T: Record + Default> Iterator for RecordReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut row = csv::StringRecord::new();
        match self.reader.read_record(&mut row) {
            Ok(false) => None,
            Ok(true) => {
                self.rows_read += 1;
                let cells: Vec<&str> = row.iter().collect();
                let record = self
                    .schema
                    .read::<T, _>(&cells)
                    .with_context(|| format!("Failed to scan CSV row {}", self.rows_read));
                Some(record)
            }
            Err(e) => Some(Err(anyhow::Error::new(e)
                .context(format!("Failed to read CSV row {}", self.rows_read + 1)))),
        }
    }
}

/// Read every record of a local CSV file
pub fn read_file<T, P>(path: P, config: &Config) -> Result<Vec<T>>
where
    T: Record + Default,
    P: AsRef<Path>,
{
    RecordReader::<File, T>::from_path(path, config)?.read_all()
}
