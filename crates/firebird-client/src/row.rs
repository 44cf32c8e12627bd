//! Row representation for query results.
//!
//! Rows are decoded when they are fetched: the wire layout depends on the
//! statement's output descriptors, and blob columns may need further round
//! trips to load, so a `Row` holds finished [`SqlValue`]s plus a shared
//! reference to the column metadata.
//!
//! ## Access Patterns
//!
//! - `get::<T>()` - Type-converting accessor; NULL is an error
//! - `try_get::<T>()` - `None` for NULL, out-of-range index or failed conversion
//! - `get_raw()` - The underlying [`SqlValue`]

use std::sync::Arc;

use firebird_protocol::response::RawRow;
use firebird_protocol::{SqlType, XSqlVar};
use firebird_types::{FromSql, SqlValue, TypeError, decode_nullable};

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Column {
    /// Column name: the alias, or the field name when there is none.
    pub name: String,
    /// Column ordinal (0-based).
    pub index: usize,
    /// Wire type.
    pub sql_type: SqlType,
    /// Whether the column is nullable.
    pub nullable: bool,
    /// Declared length in bytes.
    pub length: i32,
    /// Decimal scale (negative for fixed point).
    pub scale: i32,
    /// Subtype; the character set for text, the blob kind for blobs.
    pub sub_type: i32,
    /// Source relation, when the column comes from a table.
    pub relation: String,
}

impl Column {
    /// Build column metadata from an output descriptor.
    #[must_use]
    pub fn from_var(index: usize, var: &XSqlVar) -> Self {
        Self {
            name: var.name().to_owned(),
            index,
            sql_type: var.sql_type,
            nullable: var.nullable,
            length: var.length,
            scale: var.scale,
            sub_type: var.sub_type,
            relation: var.relation.clone(),
        }
    }

    /// Check if this is a BLOB column.
    #[must_use]
    pub fn is_blob(&self) -> bool {
        self.sql_type == SqlType::Blob
    }
}

/// Build metadata for every output descriptor.
pub(crate) fn columns_from_vars(vars: &[XSqlVar]) -> Arc<[Column]> {
    vars.iter()
        .enumerate()
        .map(|(i, var)| Column::from_var(i, var))
        .collect()
}

/// A row from a query result.
#[derive(Clone, PartialEq)]
pub struct Row {
    values: Vec<SqlValue>,
    columns: Arc<[Column]>,
}

impl Row {
    /// Create a row from decoded values.
    #[must_use]
    pub fn new(values: Vec<SqlValue>, columns: Arc<[Column]>) -> Self {
        Self { values, columns }
    }

    /// Decode a raw wire row through its descriptors.
    pub fn decode(
        raw: &RawRow,
        vars: &[XSqlVar],
        columns: Arc<[Column]>,
    ) -> Result<Self, TypeError> {
        let values = raw
            .iter()
            .zip(vars)
            .map(|(value, var)| decode_nullable(value.as_ref(), var))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values, columns })
    }

    /// Get a value by column index, converting it to `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of bounds, the value is NULL,
    /// or it cannot be converted to `T`.
    pub fn get<T: FromSql>(&self, index: usize) -> Result<T, TypeError> {
        self.values
            .get(index)
            .ok_or_else(|| TypeError::TypeMismatch {
                expected: "valid column index",
                actual: format!("index {index} out of bounds"),
            })
            .and_then(T::from_sql)
    }

    /// Get a value by column name (case-insensitive), converting it to `T`.
    pub fn get_by_name<T: FromSql>(&self, name: &str) -> Result<T, TypeError> {
        let index = self
            .find_by_name(name)
            .ok_or_else(|| TypeError::TypeMismatch {
                expected: "valid column name",
                actual: format!("column '{name}' not found"),
            })?;
        self.get(index)
    }

    /// Try to get a value, returning `None` for NULL or on any failure.
    pub fn try_get<T: FromSql>(&self, index: usize) -> Option<T> {
        self.values
            .get(index)
            .and_then(|v| T::from_sql_nullable(v).ok().flatten())
    }

    /// Try to get a value by column name.
    pub fn try_get_by_name<T: FromSql>(&self, name: &str) -> Option<T> {
        self.try_get(self.find_by_name(name)?)
    }

    /// Get the raw value at `index`.
    #[must_use]
    pub fn get_raw(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Get the raw value by column name.
    #[must_use]
    pub fn get_raw_by_name(&self, name: &str) -> Option<&SqlValue> {
        self.get_raw(self.find_by_name(name)?)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column metadata.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Check if the value at `index` is NULL. Out-of-range indexes count as
    /// NULL.
    #[must_use]
    pub fn is_null(&self, index: usize) -> bool {
        self.values.get(index).is_none_or(SqlValue::is_null)
    }

    /// Iterate over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, SqlValue> {
        self.values.iter()
    }

    /// Consume the row, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [SqlValue] {
        &mut self.values
    }

    fn find_by_name(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (column, value) in self.columns.iter().zip(&self.values) {
            map.entry(&column.name, value);
        }
        map.finish()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a SqlValue;
    type IntoIter = std::slice::Iter<'a, SqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use rust_decimal::Decimal;

    fn vars() -> Vec<XSqlVar> {
        vec![
            XSqlVar::new(SqlType::Long, 4).with_alias("ID"),
            XSqlVar::new(SqlType::Varying, 20).with_alias("NAME"),
            XSqlVar::new(SqlType::Int64, 8)
                .with_scale(-2)
                .with_alias("PRICE"),
        ]
    }

    fn row() -> Row {
        let vars = vars();
        let raw: RawRow = vec![
            Some(Bytes::copy_from_slice(&42i32.to_be_bytes())),
            None,
            Some(Bytes::copy_from_slice(&1999i64.to_be_bytes())),
        ];
        Row::decode(&raw, &vars, columns_from_vars(&vars)).unwrap()
    }

    #[test]
    fn test_get_by_index_and_name() {
        let row = row();
        assert_eq!(row.len(), 3);
        assert_eq!(row.get::<i32>(0).unwrap(), 42);
        assert_eq!(row.get_by_name::<i64>("id").unwrap(), 42);
        assert_eq!(
            row.get_by_name::<Decimal>("PRICE").unwrap(),
            Decimal::new(1999, 2)
        );
    }

    #[test]
    fn test_null_handling() {
        let row = row();
        assert!(row.is_null(1));
        assert!(row.is_null(99));
        assert!(matches!(
            row.get::<String>(1),
            Err(TypeError::UnexpectedNull)
        ));
        assert_eq!(row.try_get::<String>(1), None);
        assert_eq!(row.get::<Option<String>>(1).unwrap(), None);
    }

    #[test]
    fn test_missing_column() {
        let row = row();
        assert!(row.get::<i32>(5).is_err());
        assert!(row.get_by_name::<i32>("nope").is_err());
        assert!(row.get_raw_by_name("nope").is_none());
    }

    #[test]
    fn test_columns_metadata() {
        let row = row();
        let columns = row.columns();
        assert_eq!(columns[2].name, "PRICE");
        assert_eq!(columns[2].scale, -2);
        assert_eq!(columns[1].index, 1);
        assert!(!columns[0].is_blob());
    }

    #[test]
    fn test_iteration() {
        let row = row();
        let values: Vec<&SqlValue> = row.iter().collect();
        assert_eq!(values[0], &SqlValue::Int(42));
        assert_eq!((&row).into_iter().count(), 3);
    }
}
