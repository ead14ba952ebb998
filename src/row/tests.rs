//! Tests for the row module

use super::*;
use crate::memory::Arena;
use crate::types::{Cell, ColumnDef, DataType};

fn key_schema() -> Schema {
    Schema::new(
        vec![
            ColumnDef::new("key", DataType::Int32),
            ColumnDef::new("other_col", DataType::Int32),
            ColumnDef::nullable("other_col2", DataType::String),
        ],
        1,
    )
    .unwrap()
}

#[test]
fn schema_rejects_zero_key_columns() {
    let result = Schema::new(vec![ColumnDef::new("a", DataType::Int32)], 0);
    assert!(result.unwrap_err().to_string().contains("at least one key column"));
}

#[test]
fn schema_rejects_key_count_past_column_count() {
    let result = Schema::new(vec![ColumnDef::new("a", DataType::Int32)], 2);
    assert!(result.unwrap_err().to_string().contains("exceeds column count"));
}

#[test]
fn schema_rejects_nullable_key_column() {
    let result = Schema::new(
        vec![
            ColumnDef::new("a", DataType::Int32),
            ColumnDef::nullable("b", DataType::String),
        ],
        2,
    );
    assert!(result.unwrap_err().to_string().contains("cannot be nullable"));
}

#[test]
fn schema_calculates_slot_offsets_after_null_bitmap() {
    let schema = Schema::new(
        vec![
            ColumnDef::new("a", DataType::Int32),
            ColumnDef::new("b", DataType::Int64),
            ColumnDef::new("c", DataType::String),
            ColumnDef::new("d", DataType::Int16),
        ],
        1,
    )
    .unwrap();

    assert_eq!(schema.slot_offset(0), 1);
    assert_eq!(schema.slot_offset(1), 5);
    assert_eq!(schema.slot_offset(2), 13);
    assert_eq!(schema.slot_offset(3), 21);
    assert_eq!(schema.row_size(), 23);
}

#[test]
fn schema_tracks_variable_column_ordinals() {
    let schema = Schema::new(
        vec![
            ColumnDef::new("id", DataType::Int32),
            ColumnDef::new("name", DataType::String),
            ColumnDef::new("age", DataType::Int16),
            ColumnDef::new("bio", DataType::Binary),
        ],
        1,
    )
    .unwrap();

    assert_eq!(schema.var_column_count(), 2);
    assert_eq!(schema.var_ordinal(1), Some(0));
    assert_eq!(schema.var_ordinal(3), Some(1));
    assert_eq!(schema.var_ordinal(0), None);
    assert_eq!(schema.var_ordinal(9), None);
}

#[test]
fn schema_null_bitmap_grows_every_eight_columns() {
    let columns: Vec<_> = (0..9)
        .map(|i| ColumnDef::new(format!("c{}", i), DataType::UInt8))
        .collect();
    let schema = Schema::new(columns, 1).unwrap();
    assert_eq!(Schema::null_bitmap_size(9), 2);
    assert_eq!(schema.slot_offset(0), 2);
    assert_eq!(schema.row_size(), 11);
}

#[test]
fn schema_exposes_key_columns_and_lookup() {
    let schema = key_schema();
    assert_eq!(schema.key_columns().len(), 1);
    assert_eq!(schema.key_columns()[0].name(), "key");
    assert_eq!(schema.find_column("other_col2"), Some(2));
    assert_eq!(schema.find_column("missing"), None);
    assert!(schema.is_key_column(0));
    assert!(!schema.is_key_column(1));
}

#[test]
#[should_panic(expected = "smaller than schema row size")]
fn row_view_panics_on_short_buffer() {
    let schema = key_schema();
    let mut data = vec![0u8; schema.row_size() - 1];
    let mut cells: Vec<&[u8]> = vec![&[][..]];
    let _ = RowView::new(&schema, &mut data, &mut cells);
}

#[test]
#[should_panic(expected = "variable columns")]
fn row_view_panics_on_short_cell_table() {
    let schema = key_schema();
    let mut data = vec![0u8; schema.row_size()];
    let mut cells: Vec<&[u8]> = Vec::new();
    let _ = RowView::new(&schema, &mut data, &mut cells);
}

#[test]
fn fixed_setters_write_little_endian_into_slot() {
    let schema = key_schema();
    let mut data = vec![0u8; schema.row_size()];
    let mut cells: Vec<&[u8]> = vec![&[][..]];
    let mut view = RowView::new(&schema, &mut data, &mut cells);

    view.set_int32(0, 0x0102_0304).unwrap();

    let offset = schema.slot_offset(0);
    assert_eq!(&data[offset..offset + 4], &[0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn fixed_accessors_preserve_extremes_per_width() {
    let schema = Schema::new(
        vec![
            ColumnDef::new("i8", DataType::Int8),
            ColumnDef::new("i16", DataType::Int16),
            ColumnDef::new("i64", DataType::Int64),
            ColumnDef::new("u8", DataType::UInt8),
            ColumnDef::new("u32", DataType::UInt32),
            ColumnDef::new("u64", DataType::UInt64),
        ],
        6,
    )
    .unwrap();
    let mut row = RowBuffer::new(&schema);

    row.set_int8(0, i8::MIN).unwrap();
    row.set_int16(1, i16::MAX).unwrap();
    row.set_int64(2, i64::MIN).unwrap();
    row.set_uint8(3, u8::MAX).unwrap();
    row.set_uint32(4, u32::MAX).unwrap();
    row.set_uint64(5, u64::MAX).unwrap();

    let r = row.row_ref();
    assert_eq!(r.get_int8(0).unwrap(), i8::MIN);
    assert_eq!(r.get_int16(1).unwrap(), i16::MAX);
    assert_eq!(r.get_int64(2).unwrap(), i64::MIN);
    assert_eq!(r.get_uint8(3).unwrap(), u8::MAX);
    assert_eq!(r.get_uint32(4).unwrap(), u32::MAX);
    assert_eq!(r.get_uint64(5).unwrap(), u64::MAX);
}

#[test]
fn accessor_rejects_mismatched_type() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);

    let err = row.set_int64(0, 5).unwrap_err();
    assert!(err.to_string().contains("has type int32, not int64"));

    let err = row.row_ref().get_bytes(0).unwrap_err();
    assert!(err.to_string().contains("not a variable column"));
}

#[test]
fn accessor_rejects_out_of_range_column() {
    let schema = key_schema();
    let row = RowBuffer::new(&schema);
    let err = row.row_ref().cell(7).unwrap_err();
    assert!(err.to_string().contains("out of bounds"));
}

#[test]
fn set_bytes_repoints_cell_without_touching_previous_bytes() {
    let schema = Schema::new(vec![ColumnDef::new("k", DataType::String)], 1).unwrap();
    let first = b"first".to_vec();
    let second = b"second!".to_vec();
    let mut row = RowBuffer::new(&schema);

    row.set_string_no_copy(0, &first).unwrap();
    assert!(std::ptr::eq(row.row_ref().get_bytes(0).unwrap().as_ptr(), first.as_ptr()));

    row.set_string_no_copy(0, &second).unwrap();
    assert_eq!(row.row_ref().get_bytes(0).unwrap(), b"second!");
    assert_eq!(first, b"first");

    let offset = schema.slot_offset(0);
    let slot = VarSlot::new(0, 7);
    assert_eq!(&row.row_ref().data()[offset..offset + 8], zerocopy::IntoBytes::as_bytes(&slot));
}

#[test]
fn corrupt_indirect_slot_is_reported() {
    let schema = Schema::new(
        vec![
            ColumnDef::new("a", DataType::String),
            ColumnDef::new("b", DataType::String),
        ],
        2,
    )
    .unwrap();
    let mut data = vec![0u8; schema.row_size()];
    let mut cells: Vec<&[u8]> = vec![&b"aa"[..], &b"bbb"[..]];
    let mut view = RowView::new(&schema, &mut data, &mut cells);
    view.set_bytes(0, b"aa").unwrap();

    // column b was never written, so its slot still says ordinal 0
    let err = view.get_bytes(1).unwrap_err();
    assert!(err.to_string().contains("references cell 0, expected 1"));

    let offset = schema.slot_offset(0) + 4;
    data[offset] = 9;
    let view = RowRef::new(&schema, &data, &cells);
    let err = view.get_bytes(0).unwrap_err();
    assert!(err.to_string().contains("records 9 bytes but cell holds 2"));
}

#[test]
fn nullable_columns_start_null_and_clear_on_write() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);

    assert!(row.row_ref().is_null(2));
    assert!(!row.row_ref().is_null(0));
    assert_eq!(row.row_ref().cell_opt(2).unwrap(), None);

    row.set_string_no_copy(2, b"x").unwrap();
    assert!(!row.row_ref().is_null(2));

    row.set_null(2).unwrap();
    assert!(row.row_ref().is_null(2));
}

#[test]
fn set_null_rejects_non_nullable_column() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);
    let err = row.set_null(0).unwrap_err();
    assert!(err.to_string().contains("is not nullable"));
}

#[test]
fn set_cell_checks_type_and_round_trips() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);

    row.set_cell(1, Cell::Int32(-7)).unwrap();
    assert_eq!(row.row_ref().cell(1).unwrap(), Cell::Int32(-7));

    let err = row.set_cell(1, Cell::UInt32(7)).unwrap_err();
    assert!(err.to_string().contains("cannot store uint32 value"));
}

#[test]
fn string_and_binary_setters_check_declared_type() {
    let schema = Schema::new(
        vec![
            ColumnDef::new("s", DataType::String),
            ColumnDef::new("b", DataType::Binary),
        ],
        1,
    )
    .unwrap();
    let mut row = RowBuffer::new(&schema);

    assert!(row.set_binary_no_copy(0, b"x").is_err());
    assert!(row.set_string_no_copy(1, b"x").is_err());
    row.set_binary_no_copy(1, &[0, 1]).unwrap();
    assert_eq!(row.row_ref().cell(1).unwrap(), Cell::Binary(&[0, 1]));
}

#[test]
fn set_string_copy_stores_arena_owned_bytes() {
    let schema = Schema::new(vec![ColumnDef::new("k", DataType::String)], 1).unwrap();
    let arena = Arena::new();
    let mut row = RowBuffer::new(&schema);

    let source = String::from("hello");
    row.set_string_copy(0, source.as_bytes(), &arena).unwrap();
    drop(source);

    assert_eq!(row.row_ref().get_bytes(0).unwrap(), b"hello");
}

#[test]
fn row_buffer_display_lists_only_set_columns() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);
    assert_eq!(row.to_string(), "");

    row.set_int32(0, 1001).unwrap();
    assert_eq!(row.to_string(), "int32 key=1001");

    row.set_null(2).unwrap();
    assert_eq!(row.to_string(), "int32 key=1001, string other_col2=NULL");
}

#[test]
fn row_ref_display_lists_every_column() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);
    row.set_int32(0, 1001).unwrap();

    assert_eq!(
        row.row_ref().to_string(),
        "(int32 key=1001, int32 other_col=0, string other_col2=NULL)"
    );
}

#[test]
fn reset_clears_values_and_set_tracking() {
    let schema = key_schema();
    let mut row = RowBuffer::new(&schema);
    row.set_int32(0, 5).unwrap();
    row.set_string_no_copy(2, b"abc").unwrap();
    assert!(row.is_key_set());

    row.reset();

    assert!(!row.is_set(0));
    assert!(!row.is_key_set());
    assert_eq!(row.row_ref().get_int32(0).unwrap(), 0);
    assert!(row.row_ref().is_null(2));
    assert_eq!(row.row_ref().get_bytes(2).unwrap(), b"");
}
