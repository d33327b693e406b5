//! Schema construction and header validation.
//!
//! A [`RecordSchema`] is built once per record type and header row. It maps
//! every header position to the scalar field annotated with that column name,
//! flattening nested records into the parent's namespace.

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::options::{AccessCheck, SchemaOptions};
use crate::reflect::{FieldRef, Record, Reflect, ScalarKind, Visibility};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    /// Field position within its record
    pub index: usize,
    pub name: &'static str,
    pub visibility: Visibility,
}

/// Route from a record root to a scalar field, through nested records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// First segment that is not reachable from outside its record.
    pub fn first_inaccessible(&self) -> Option<&PathSegment> {
        self.segments
            .iter()
            .find(|segment| !segment.visibility.is_accessible())
    }

    fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.name)?;
        }
        Ok(())
    }
}

/// Resolved association between one header column and one scalar field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    pub column: String,
    pub path: FieldPath,
    pub kind: ScalarKind,
}

/// Column-to-field resolution for one record type and header row.
///
/// Immutable once built; scans only read it, so one schema can be shared
/// across threads scanning independent records.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub(crate) expected_headers: Vec<String>,
    /// Index-aligned with `expected_headers`
    pub(crate) bindings: Vec<Option<ColumnBinding>>,
    pub(crate) record_type: TypeId,
    pub(crate) record_name: &'static str,
    pub(crate) options: SchemaOptions,
}

type Candidates = HashMap<&'static str, (FieldPath, ScalarKind)>;

impl RecordSchema {
    /// Build a schema from a template record and the expected header row.
    ///
    /// Annotated columns missing from `headers` are ignored, and headers with
    /// no annotated field produce no binding.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotARecord`] if `template` is not a record.
    pub fn new<S: AsRef<str>>(template: &dyn Reflect, headers: &[S]) -> Result<Self, SchemaError> {
        Self::with_options(template, headers, SchemaOptions::default())
    }

    /// Build a schema with explicit [`SchemaOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotARecord`] if `template` is not a record, and
    /// [`SchemaError::UnexportedField`] under [`AccessCheck::OnBuild`] when a
    /// bound column resolves through a non-public field.
    pub fn with_options<S: AsRef<str>>(
        template: &dyn Reflect,
        headers: &[S],
        options: SchemaOptions,
    ) -> Result<Self, SchemaError> {
        let record = match template.reflect() {
            FieldRef::Record(record) => record,
            FieldRef::Scalar(_) => {
                return Err(SchemaError::NotARecord {
                    type_name: template.type_name(),
                })
            }
        };

        let mut candidates = Candidates::new();
        collect_columns(record, &FieldPath::default(), &mut candidates);

        let expected_headers: Vec<String> =
            headers.iter().map(|h| h.as_ref().to_string()).collect();

        let bindings: Vec<Option<ColumnBinding>> = expected_headers
            .iter()
            .map(|header| {
                candidates
                    .get(header.as_str())
                    .map(|(path, kind)| ColumnBinding {
                        column: header.clone(),
                        path: path.clone(),
                        kind: *kind,
                    })
            })
            .collect();

        if options.access_check == AccessCheck::OnBuild {
            if let Some(binding) = bindings
                .iter()
                .flatten()
                .find(|binding| binding.path.first_inaccessible().is_some())
            {
                return Err(SchemaError::UnexportedField {
                    column: binding.column.clone(),
                    path: binding.path.to_string(),
                });
            }
        }

        debug!(
            "Built schema for {}: {} of {} columns bound",
            record.type_name(),
            bindings.iter().flatten().count(),
            expected_headers.len()
        );

        Ok(Self {
            expected_headers,
            bindings,
            record_type: record.record_type(),
            record_name: record.type_name(),
            options,
        })
    }

    /// Check a header row against the one the schema was built with.
    ///
    /// The match is exact and positional: same length, same names, same order.
    pub fn validate_headers<S: AsRef<str>>(&self, headers: &[S]) -> bool {
        headers.len() == self.expected_headers.len()
            && headers
                .iter()
                .zip(&self.expected_headers)
                .all(|(header, expected)| header.as_ref() == expected)
    }

    pub fn expected_headers(&self) -> &[String] {
        &self.expected_headers
    }

    /// Bindings aligned with [`expected_headers`](Self::expected_headers).
    pub fn bindings(&self) -> &[Option<ColumnBinding>] {
        &self.bindings
    }

    pub fn binding(&self, column: &str) -> Option<&ColumnBinding> {
        self.bindings
            .iter()
            .flatten()
            .find(|binding| binding.column == column)
    }

    pub fn record_name(&self) -> &'static str {
        self.record_name
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }
}

/// Walk a record's fields, recording every annotated scalar.
///
/// Shallower fields shadow deeper ones with the same column; at equal depth
/// the first declared field wins.
fn collect_columns(record: &dyn Record, parent: &FieldPath, candidates: &mut Candidates) {
    for (index, info) in record.fields().iter().enumerate() {
        let path = parent.child(PathSegment {
            index,
            name: info.name,
            visibility: info.visibility,
        });

        match record.field(index) {
            Some(FieldRef::Record(nested)) => {
                if let Some(column) = info.column {
                    warn!("Ignoring column '{column}' on nested record field '{path}'");
                }
                collect_columns(nested, &path, candidates);
            }
            Some(FieldRef::Scalar(kind)) => {
                let Some(column) = info.column else {
                    continue;
                };
                match candidates.entry(column) {
                    Entry::Vacant(slot) => {
                        slot.insert((path, kind));
                    }
                    Entry::Occupied(mut existing) => {
                        let existing_depth = existing.get().0.depth();
                        if path.depth() < existing_depth {
                            debug!(
                                "Column '{column}': field '{path}' shadows '{}'",
                                existing.get().0
                            );
                            existing.insert((path, kind));
                        } else if path.depth() == existing_depth {
                            warn!(
                                "Column '{column}' is declared by both '{}' and '{path}'; keeping '{}'",
                                existing.get().0,
                                existing.get().0
                            );
                        } else {
                            debug!(
                                "Column '{column}': field '{path}' is shadowed by '{}'",
                                existing.get().0
                            );
                        }
                    }
                }
            }
            None => {}
        }
    }
}
