//! Property-based tests for the jagged row/table model

use jagcsv_format::{Decimal, FromField, Row, Table, ToField};
use proptest::prelude::*;

proptest! {
    #[test]
    fn set_then_get_returns_value(
        row_idx in 0usize..50,
        field_idx in 0usize..50,
        value in ".*"
    ) {
        let mut table = Table::new();
        table.set(row_idx, field_idx, value.clone());

        prop_assert_eq!(table.len(), row_idx + 1);
        prop_assert_eq!(table.row(row_idx).unwrap().len(), field_idx + 1);
        prop_assert_eq!(table.get_field(row_idx, field_idx).unwrap(), value.as_str());
    }

    #[test]
    fn writes_never_shrink_rows(
        initial in prop::collection::vec(".*", 0..20),
        writes in prop::collection::vec((0usize..30, ".*"), 0..20)
    ) {
        let mut row: Row = initial.iter().cloned().collect();
        let mut expected_len = row.len();
        for (idx, value) in writes {
            row.set(idx, value);
            expected_len = expected_len.max(idx + 1);
            prop_assert_eq!(row.len(), expected_len);
        }
    }

    #[test]
    fn remove_empty_rows_leaves_no_blank_rows(
        rows in prop::collection::vec(
            prop::collection::vec(prop::option::of("[a ]{0,3}"), 0..5),
            0..30
        )
    ) {
        let mut table: Table = rows.into_iter().map(Row::from_fields).collect();
        let total = table.len();
        let non_blank_before: Vec<Row> =
            table.iter().filter(|row| !row.is_blank()).cloned().collect();

        let removed = table.remove_empty_rows();

        prop_assert!(table.iter().all(|row| !row.is_blank()));
        prop_assert_eq!(table.rows(), non_blank_before.as_slice());
        prop_assert_eq!(removed, total - non_blank_before.len());
    }

    #[test]
    fn integer_fields_roundtrip(value in any::<i64>()) {
        let text = value.to_field().unwrap();
        prop_assert_eq!(i64::from_field(&text).unwrap(), value);
    }

    #[test]
    fn decimal_text_is_canonical(int_part in 0u64..1_000_000, frac in 0u32..1000, negative in any::<bool>()) {
        let text = format!("{}{}.{:03}", if negative { "-" } else { "" }, int_part, frac);
        let parsed = Decimal::from_field(&text).unwrap();
        let rendered = parsed.to_field().unwrap();
        prop_assert_eq!(Decimal::from_field(&rendered).unwrap(), parsed);
        prop_assert!(!rendered.ends_with('0') || !rendered.contains('.'));
    }
}
