//! Record scanning: writes one row of cells into a destination record.

use crate::convert::assign;
use crate::error::ScanError;
use crate::reflect::{FieldMut, Record, Reflect, ScalarMut};
use crate::schema::{ColumnBinding, PathSegment, RecordSchema};

impl RecordSchema {
    /// Convert `cells` and write them into the bound fields of `dest`.
    ///
    /// Cells are matched to bindings by position. Cells beyond the header
    /// length are ignored, missing cells are skipped, and fields without a
    /// binding are never touched. A failure stops the scan; fields written
    /// before the failing binding keep their new values.
    ///
    /// # Errors
    ///
    /// - [`ScanError::InputShape`] if `dest` is not a record
    /// - [`ScanError::RecordMismatch`] if `dest` is not the template's record type
    /// - [`ScanError::UnexportedField`] when a binding resolves through a non-public field
    /// - [`ScanError::Conversion`] when a cell does not parse as its field's kind
    pub fn scan_into<S: AsRef<str>>(
        &self,
        cells: &[S],
        dest: &mut dyn Reflect,
    ) -> Result<(), ScanError> {
        let record = match dest.reflect_mut() {
            FieldMut::Record(record) => record,
            FieldMut::Scalar(_) => return Err(ScanError::InputShape),
        };

        if record.record_type() != self.record_type {
            return Err(ScanError::RecordMismatch {
                expected: self.record_name,
                found: record.type_name(),
            });
        }

        for (binding, cell) in self.bindings.iter().zip(cells) {
            let Some(binding) = binding else {
                continue;
            };

            let slot = self.resolve(&mut *record, binding)?;
            let text = if self.options.trim_cells {
                cell.as_ref().trim()
            } else {
                cell.as_ref()
            };

            assign(slot, text).map_err(|source| ScanError::Conversion {
                column: binding.column.clone(),
                path: binding.path.to_string(),
                source,
            })?;
        }

        Ok(())
    }

    /// Scan `cells` into a fresh `T::default()`.
    pub fn read<T, S>(&self, cells: &[S]) -> Result<T, ScanError>
    where
        T: Record + Default,
        S: AsRef<str>,
    {
        let mut record = T::default();
        self.scan_into(cells, &mut record)?;
        Ok(record)
    }

    /// Follow a binding's path down to its scalar slot.
    fn resolve<'a>(
        &self,
        record: &'a mut dyn Record,
        binding: &ColumnBinding,
    ) -> Result<ScalarMut<'a>, ScanError> {
        let Some((last, parents)) = binding.path.segments().split_last() else {
            return Err(self.mismatch(record.type_name()));
        };

        let mut current = record;
        for segment in parents {
            ensure_accessible(segment, binding)?;
            let found = current.type_name();
            current = match current.field_mut(segment.index) {
                Some(FieldMut::Record(nested)) => nested,
                _ => return Err(self.mismatch(found)),
            };
        }

        ensure_accessible(last, binding)?;
        let found = current.type_name();
        match current.field_mut(last.index) {
            Some(FieldMut::Scalar(slot)) if slot.kind() == binding.kind => Ok(slot),
            _ => Err(self.mismatch(found)),
        }
    }

    fn mismatch(&self, found: &'static str) -> ScanError {
        ScanError::RecordMismatch {
            expected: self.record_name,
            found,
        }
    }
}

fn ensure_accessible(segment: &PathSegment, binding: &ColumnBinding) -> Result<(), ScanError> {
    if segment.visibility.is_accessible() {
        Ok(())
    } else {
        Err(ScanError::UnexportedField {
            column: binding.column.clone(),
            path: binding.path.to_string(),
        })
    }
}
