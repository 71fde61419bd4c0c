//! Jagged table of rows

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{JagError, Result};
use crate::field::{Field, FromField, ToField};
use crate::row::Row;

/// Ordered sequence of independently-sized rows
///
/// Row order is exactly insertion order until an explicit mutation. Writes
/// through [`Table::set_field`] grow both the row list and the target row;
/// reads through [`Table::get_field`] are strict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when every row is blank (vacuously true for no rows)
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(Row::is_blank)
    }

    /// Borrow all rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Iterate mutably over rows
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Row> {
        self.rows.iter_mut()
    }

    /// Consume the table, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Append an empty row and return it for population
    pub fn new_row(&mut self) -> &mut Row {
        self.rows.push(Row::new());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Append a row
    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Insert a row at `index`, shifting later rows down
    ///
    /// Inserting past the end pads with empty rows first.
    pub fn insert_row(&mut self, index: usize, row: Row) {
        if index > self.rows.len() {
            self.rows.resize_with(index, Row::new);
        }
        self.rows.insert(index, row);
    }

    /// Remove and return the row at `index`
    pub fn remove_row(&mut self, index: usize) -> Result<Row> {
        self.check_row(index)?;
        Ok(self.rows.remove(index))
    }

    /// Move every row of `other` to the end of this table
    pub fn append(&mut self, other: &mut Table) {
        self.rows.append(&mut other.rows);
    }

    /// Remove all rows
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Strict row access
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.check_row(index)?;
        Ok(&self.rows[index])
    }

    /// Strict mutable row access
    pub fn row_mut(&mut self, index: usize) -> Result<&mut Row> {
        self.check_row(index)?;
        Ok(&mut self.rows[index])
    }

    /// Pad with empty rows so that `index` exists, and return that row
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" when `index` is `usize::MAX`; the table
    /// is left untouched.
    pub fn ensure_row_exists(&mut self, index: usize) -> &mut Row {
        if self.rows.len() <= index {
            let Some(len) = index.checked_add(1) else {
                panic!("capacity overflow");
            };
            self.rows.resize_with(len, Row::new);
        }
        &mut self.rows[index]
    }

    /// Store `value` at (`row`, `index`), growing rows and fields as needed
    pub fn set_field(&mut self, row: usize, index: usize, value: Field) {
        self.ensure_row_exists(row).set_field(index, value);
    }

    /// Store text at (`row`, `index`), growing rows and fields as needed
    pub fn set(&mut self, row: usize, index: usize, value: impl Into<String>) {
        self.ensure_row_exists(row).set(index, value);
    }

    /// Store a typed value at (`row`, `index`)
    pub fn set_value<T: ToField + ?Sized>(&mut self, row: usize, index: usize, value: &T) {
        self.ensure_row_exists(row).set_value(index, value);
    }

    /// Store the `Display` text of `value` at (`row`, `index`)
    pub fn set_display<T: std::fmt::Display + ?Sized>(
        &mut self,
        row: usize,
        index: usize,
        value: &T,
    ) {
        self.ensure_row_exists(row).set_display(index, value);
    }

    /// Strict read; `None` for an absent field
    pub fn field(&self, row: usize, index: usize) -> Result<Option<&str>> {
        self.row(row)?.field(index)
    }

    /// Strict read; absent fields read as `""`
    pub fn get_field(&self, row: usize, index: usize) -> Result<&str> {
        self.row(row)?.get_field(index)
    }

    /// Text at (`row`, `index`), or `default` when missing, absent, or empty
    pub fn get_or_default<'a>(&'a self, row: usize, index: usize, default: &'a str) -> &'a str {
        self.get_or_null(row, index).unwrap_or(default)
    }

    /// Text at (`row`, `index`), or `""` when missing or absent
    pub fn get_or_empty(&self, row: usize, index: usize) -> &str {
        self.get_or_null(row, index).unwrap_or("")
    }

    /// Text at (`row`, `index`), or `None` when missing, absent, or empty
    pub fn get_or_null(&self, row: usize, index: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get_or_null(index))
    }

    /// Strict typed read
    pub fn get<T: FromField>(&self, row: usize, index: usize) -> Result<T> {
        self.row(row)?.get(index)
    }

    /// Typed read that never fails; see [`Row::get_or`]
    pub fn get_or<T: FromField>(&self, row: usize, index: usize, default: T) -> T {
        match self.rows.get(row) {
            Some(r) => r.get_or(index, default),
            None => default,
        }
    }

    /// Strict read through `FromStr`
    pub fn get_parsed<T: FromStr>(&self, row: usize, index: usize) -> Result<T> {
        self.row(row)?.get_parsed(index)
    }

    /// Remove every blank row in place, keeping the order of the rest
    ///
    /// Returns the number of rows removed.
    pub fn remove_empty_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.is_blank());
        before - self.rows.len()
    }

    /// Field count of the widest row
    pub fn max_field_count(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Number of rows for each distinct field count
    pub fn field_count_histogram(&self) -> BTreeMap<usize, usize> {
        let mut histogram = BTreeMap::new();
        for row in &self.rows {
            *histogram.entry(row.len()).or_insert(0) += 1;
        }
        histogram
    }

    fn check_row(&self, index: usize) -> Result<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(JagError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(rows: &[&[&str]]) -> Table {
        rows.iter()
            .map(|fields| fields.iter().copied().collect::<Row>())
            .collect()
    }

    #[test]
    fn test_new_row_is_appended() {
        let mut table = Table::new();
        table.new_row().push("a");
        table.new_row().push("b");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_field(1, 0).unwrap(), "b");
    }

    #[test]
    fn test_set_field_grows_rows_and_fields() {
        let mut table = Table::new();
        table.set(2, 1, "x");
        assert_eq!(table.len(), 3);
        assert!(table.row(0).unwrap().is_empty());
        assert!(table.row(1).unwrap().is_empty());
        assert_eq!(table.row(2).unwrap().len(), 2);
        assert_eq!(table.field(2, 0).unwrap(), None);
        assert_eq!(table.field(2, 1).unwrap(), Some("x"));
    }

    #[test]
    fn test_write_at_max_row_panics_without_truncating() {
        let mut table = table_of(&[&["a"], &["b"]]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            table.set(usize::MAX, 0, "x");
        }));
        assert!(result.is_err());
        assert_eq!(table, table_of(&[&["a"], &["b"]]));
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_ensure_row_exists_at_max_index() {
        Table::new().ensure_row_exists(usize::MAX);
    }

    #[test]
    fn test_strict_reads() {
        let table = table_of(&[&["a"]]);
        assert!(matches!(
            table.get_field(1, 0),
            Err(JagError::RowOutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(
            table.get_field(0, 1),
            Err(JagError::FieldOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_lenient_reads() {
        let mut table = table_of(&[&["7", ""]]);
        table.set_field(0, 2, None);
        assert_eq!(table.get_or_default(0, 0, "d"), "7");
        assert_eq!(table.get_or_default(0, 1, "d"), "d");
        assert_eq!(table.get_or_default(0, 2, "d"), "d");
        assert_eq!(table.get_or_default(4, 0, "d"), "d");
        assert_eq!(table.get_or_empty(4, 4), "");
        assert_eq!(table.get_or_null(0, 1), None);
        assert_eq!(table.get_or(0, 0, 0u16), 7);
        assert_eq!(table.get_or(9, 0, 3u16), 3);
    }

    #[test]
    fn test_typed_round_trip() {
        let mut table = Table::new();
        table.set_value(0, 0, &2.5f64);
        table.set_display(0, 1, &'q');
        assert_eq!(table.get::<f64>(0, 0).unwrap(), 2.5);
        assert_eq!(table.get_parsed::<char>(0, 1).unwrap(), 'q');
        assert!(table.get::<f64>(1, 0).is_err());
    }

    #[test]
    fn test_remove_empty_rows_keeps_order() {
        let mut table = table_of(&[&["a"], &[], &["", ""], &["b", ""], &[""]]);
        table.new_row().push_absent();
        table.push_row(["c"].into_iter().collect());

        let removed = table.remove_empty_rows();
        assert_eq!(removed, 4);
        assert_eq!(table, table_of(&[&["a"], &["b", ""], &["c"]]));
        assert!(!table.is_blank());
    }

    #[test]
    fn test_insert_remove_rows() {
        let mut table = table_of(&[&["a"], &["c"]]);
        table.insert_row(1, ["b"].into_iter().collect());
        assert_eq!(table, table_of(&[&["a"], &["b"], &["c"]]));

        table.insert_row(5, ["f"].into_iter().collect());
        assert_eq!(table.len(), 6);
        assert!(table.row(4).unwrap().is_empty());

        let removed = table.remove_row(0).unwrap();
        assert_eq!(removed.get_field(0).unwrap(), "a");
        assert!(table.remove_row(10).is_err());

        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn test_shape_statistics() {
        let table = table_of(&[&["a", "b"], &["c"], &["d", "e"], &[]]);
        assert_eq!(table.max_field_count(), 2);
        let histogram = table.field_count_histogram();
        assert_eq!(histogram.get(&2), Some(&2));
        assert_eq!(histogram.get(&1), Some(&1));
        assert_eq!(histogram.get(&0), Some(&1));
        assert_eq!(Table::new().max_field_count(), 0);
    }

    #[test]
    fn test_append_moves_rows() {
        let mut a = table_of(&[&["1"]]);
        let mut b = table_of(&[&["2"], &["3"]]);
        a.append(&mut b);
        assert_eq!(a.len(), 3);
        assert!(b.is_empty());
    }
}
