//! File round-trips through the I/O adapters

use jagcsv_io::{
    append_table_to_path, read_table_from_path, summarize, write_table_to_path, DecodeOpts,
    JagError, Row, Table,
};
use std::fs;

fn table_of(rows: &[&[&str]]) -> Table {
    rows.iter()
        .map(|fields| fields.iter().copied().collect::<Row>())
        .collect()
}

#[test]
fn write_then_read_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("people.csv");
    let table = table_of(&[
        &["id", "name", "note"],
        &["1", "Smith, Jane", " padded "],
        &["2", "O\"Brien"],
        &["3", "multi\r\nline", "", "extra"],
    ]);

    let written = write_table_to_path(&table, &path).expect("write");
    assert_eq!(written as u64, fs::metadata(&path).unwrap().len());

    let read = read_table_from_path(&path, &DecodeOpts::default()).expect("read");
    assert_eq!(read, table);
}

#[test]
fn write_truncates_existing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("out.csv");
    fs::write(&path, "old,content\r\nmore\r\n").unwrap();

    write_table_to_path(&table_of(&[&["new"]]), &path).expect("write");
    assert_eq!(fs::read_to_string(&path).unwrap(), "new\r\n");
}

#[test]
fn append_extends_file_record_by_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("log.csv");

    append_table_to_path(&table_of(&[&["a", "1"]]), &path).expect("first append");
    append_table_to_path(&table_of(&[&["b", "2"], &["c"]]), &path).expect("second append");

    let read = read_table_from_path(&path, &DecodeOpts::default()).expect("read");
    assert_eq!(read, table_of(&[&["a", "1"], &["b", "2"], &["c"]]));
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,1\r\nb,2\r\nc\r\n");
}

#[test]
fn reads_foreign_line_endings_and_bom() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("foreign.csv");
    fs::write(&path, "\u{FEFF}h1,h2\n\nv1,\"v\n2\"\n").unwrap();

    let read = read_table_from_path(&path, &DecodeOpts::default()).expect("read");
    assert_eq!(read, table_of(&[&["h1", "h2"], &["v1", "v\n2"]]));

    let summary = summarize(&read);
    assert_eq!(summary.rows, 2);
    assert!(summary.rectangular);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = read_table_from_path(dir.path().join("absent.csv"), &DecodeOpts::default())
        .unwrap_err();
    assert!(matches!(err, JagError::Io(_)));
}

#[test]
fn malformed_file_reports_position() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.csv");
    fs::write(&path, "a,b\r\nc,\"d\"e\r\n").unwrap();

    let err = read_table_from_path(&path, &DecodeOpts::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed CSV at line 2, column 6: unexpected character after closing quote"
    );
}

#[test]
fn summary_serializes_to_json() {
    let summary = summarize(&table_of(&[&["a", "b"], &["c"]]));
    let value = serde_json::to_value(&summary).expect("serialize");
    assert_eq!(value["rows"], 2);
    assert_eq!(value["max_fields"], 2);
    assert_eq!(value["rectangular"], false);
    assert_eq!(value["field_count_histogram"]["1"], 1);
}
