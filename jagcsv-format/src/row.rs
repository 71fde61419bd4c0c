//! Row of independently-sized nullable text fields

use std::str::FromStr;

use crate::error::{JagError, Result};
use crate::field::{self, Field, FromField, ToField};

/// One record of a jagged table
///
/// Writes past the end pad the row with absent fields; reads past the end
/// fail. The field count only shrinks through [`Row::remove_field`] and
/// [`Row::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Row {
    fields: Vec<Field>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Create a row from existing fields
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Number of fields, absent ones included
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the row has no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every field is absent or empty (vacuously true for no fields)
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(field::is_blank)
    }

    /// Borrow all fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Iterate over fields as optional string slices
    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.fields.iter().map(|f| f.as_deref())
    }

    /// Consume the row, returning its fields
    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// Pad with absent fields so that `index` is a valid position
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" when `index` is `usize::MAX`; the row
    /// is left untouched.
    pub fn ensure_field_exists(&mut self, index: usize) {
        if self.fields.len() <= index {
            let Some(len) = index.checked_add(1) else {
                panic!("capacity overflow");
            };
            self.fields.resize(len, None);
        }
    }

    /// Store `value` at `index`, growing the row as needed
    pub fn set_field(&mut self, index: usize, value: Field) {
        self.ensure_field_exists(index);
        self.fields[index] = value;
    }

    /// Store text at `index`, growing the row as needed
    pub fn set(&mut self, index: usize, value: impl Into<String>) {
        self.set_field(index, Some(value.into()));
    }

    /// Mark the field at `index` absent, growing the row as needed
    pub fn set_absent(&mut self, index: usize) {
        self.set_field(index, None);
    }

    /// Store a typed value at `index`
    pub fn set_value<T: ToField + ?Sized>(&mut self, index: usize, value: &T) {
        self.set_field(index, value.to_field());
    }

    /// Store the `Display` text of `value` at `index`
    pub fn set_display<T: std::fmt::Display + ?Sized>(&mut self, index: usize, value: &T) {
        self.set_field(index, Some(value.to_string()));
    }

    /// Append a text field
    pub fn push(&mut self, value: impl Into<String>) {
        self.fields.push(Some(value.into()));
    }

    /// Append an absent field
    pub fn push_absent(&mut self) {
        self.fields.push(None);
    }

    /// Append a field as-is
    pub fn push_field(&mut self, value: Field) {
        self.fields.push(value);
    }

    /// Insert a field at `index`, shifting later fields right
    ///
    /// Inserting past the end pads with absent fields first.
    pub fn insert_field(&mut self, index: usize, value: Field) {
        if index > self.fields.len() {
            self.fields.resize(index, None);
        }
        self.fields.insert(index, value);
    }

    /// Remove and return the field at `index`
    pub fn remove_field(&mut self, index: usize) -> Result<Field> {
        self.check_index(index)?;
        Ok(self.fields.remove(index))
    }

    /// Remove every field
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Strict read of the field at `index`; `None` for an absent field
    pub fn field(&self, index: usize) -> Result<Option<&str>> {
        self.check_index(index)?;
        Ok(self.fields[index].as_deref())
    }

    /// Strict read of the text at `index`; absent fields read as `""`
    pub fn get_field(&self, index: usize) -> Result<&str> {
        Ok(self.field(index)?.unwrap_or(""))
    }

    /// Text at `index`, or `default` when out of range, absent, or empty
    pub fn get_or_default<'a>(&'a self, index: usize, default: &'a str) -> &'a str {
        self.get_or_null(index).unwrap_or(default)
    }

    /// Text at `index`, or `""` when out of range or absent
    pub fn get_or_empty(&self, index: usize) -> &str {
        self.get_or_null(index).unwrap_or("")
    }

    /// Text at `index`, or `None` when out of range, absent, or empty
    pub fn get_or_null(&self, index: usize) -> Option<&str> {
        self.fields
            .get(index)
            .and_then(|f| f.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Strict typed read of the field at `index`
    pub fn get<T: FromField>(&self, index: usize) -> Result<T> {
        T::from_field(self.get_field(index)?)
    }

    /// Typed read that never fails
    ///
    /// Returns `default` when the index is out of range, the field is absent
    /// or empty, or the text does not convert.
    pub fn get_or<T: FromField>(&self, index: usize, default: T) -> T {
        self.get_or_null(index)
            .and_then(|text| T::from_field(text).ok())
            .unwrap_or(default)
    }

    /// Strict read through `FromStr`, for enums and other user types
    pub fn get_parsed<T: FromStr>(&self, index: usize) -> Result<T> {
        let text = self.get_field(index)?;
        text.parse().map_err(|_| JagError::conversion::<T>(text))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.fields.len() {
            Ok(())
        } else {
            Err(JagError::FieldOutOfRange {
                index,
                len: self.fields.len(),
            })
        }
    }
}

impl From<Vec<Field>> for Row {
    fn from(fields: Vec<Field>) -> Self {
        Self::from_fields(fields)
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|s| Some(s.into())).collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Level {
        Info,
        Warn,
    }

    impl FromStr for Level {
        type Err = ();

        fn from_str(s: &str) -> std::result::Result<Self, ()> {
            match s {
                "info" => Ok(Level::Info),
                "warn" => Ok(Level::Warn),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn test_set_field_pads_with_absent() {
        let mut row = Row::new();
        row.set(3, "d");
        assert_eq!(row.len(), 4);
        assert_eq!(row.field(0).unwrap(), None);
        assert_eq!(row.field(2).unwrap(), None);
        assert_eq!(row.field(3).unwrap(), Some("d"));
    }

    #[test]
    fn test_set_field_never_truncates() {
        let mut row: Row = ["a", "b", "c"].into_iter().collect();
        row.set(0, "z");
        assert_eq!(row.len(), 3);
        row.ensure_field_exists(1);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn test_write_at_max_index_panics_without_truncating() {
        let mut row: Row = ["a", "b", "c"].into_iter().collect();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            row.set(usize::MAX, "x");
        }));
        assert!(result.is_err());
        assert_eq!(row.len(), 3);
        assert_eq!(row.get_field(2).unwrap(), "c");
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_ensure_field_exists_at_max_index() {
        Row::new().ensure_field_exists(usize::MAX);
    }

    #[test]
    fn test_strict_read_out_of_range() {
        let row: Row = ["a"].into_iter().collect();
        assert!(matches!(
            row.field(1),
            Err(JagError::FieldOutOfRange { index: 1, len: 1 })
        ));
        assert!(row.get_field(5).is_err());
        assert!(row.get::<i32>(5).is_err());
    }

    #[test]
    fn test_absent_and_empty_are_distinct_in_memory() {
        let mut row = Row::new();
        row.push_absent();
        row.push("");
        assert_eq!(row.field(0).unwrap(), None);
        assert_eq!(row.field(1).unwrap(), Some(""));
        assert_eq!(row.get_field(0).unwrap(), "");
        assert!(row.is_blank());
    }

    #[test]
    fn test_lenient_reads() {
        let mut row = Row::new();
        row.push("x");
        row.push("");
        row.push_absent();

        assert_eq!(row.get_or_default(0, "d"), "x");
        assert_eq!(row.get_or_default(1, "d"), "d");
        assert_eq!(row.get_or_default(2, "d"), "d");
        assert_eq!(row.get_or_default(9, "d"), "d");
        assert_eq!(row.get_or_empty(2), "");
        assert_eq!(row.get_or_empty(9), "");
        assert_eq!(row.get_or_null(0), Some("x"));
        assert_eq!(row.get_or_null(1), None);
    }

    #[test]
    fn test_typed_reads() {
        let mut row = Row::new();
        row.set_value(0, &42u32);
        row.set_value(1, &true);
        row.set(2, "nope");
        row.set_value(3, &None::<i32>);

        assert_eq!(row.get::<u32>(0).unwrap(), 42);
        assert!(row.get::<bool>(1).unwrap());
        assert!(row.get::<i32>(2).is_err());
        assert_eq!(row.get::<Option<i32>>(3).unwrap(), None);
        assert_eq!(row.get_or(2, -1i32), -1);
        assert_eq!(row.get_or(3, 5i32), 5);
        assert_eq!(row.get_or(0, 0u32), 42);
        assert_eq!(row.field(3).unwrap(), None);
    }

    #[test]
    fn test_parsed_reads_for_enums() {
        let mut row = Row::new();
        row.set(0, "warn");
        row.set_display(1, &17);
        row.set(2, "debug");
        assert_eq!(row.get_parsed::<Level>(0).unwrap(), Level::Warn);
        assert_eq!(row.get_field(1).unwrap(), "17");
        assert!(matches!(
            row.get_parsed::<Level>(2),
            Err(JagError::Conversion { .. })
        ));
        assert_ne!(Level::Info, Level::Warn);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut row: Row = ["a", "c"].into_iter().collect();
        row.insert_field(1, Some("b".into()));
        assert_eq!(row.iter().collect::<Vec<_>>(), vec![Some("a"), Some("b"), Some("c")]);

        row.insert_field(5, Some("f".into()));
        assert_eq!(row.len(), 6);
        assert_eq!(row.field(3).unwrap(), None);
        assert_eq!(row.field(5).unwrap(), Some("f"));

        assert_eq!(row.remove_field(0).unwrap().as_deref(), Some("a"));
        assert_eq!(row.len(), 5);
        assert!(row.remove_field(5).is_err());

        row.clear();
        assert!(row.is_empty());
        assert!(row.is_blank());
    }
}
