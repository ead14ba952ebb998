//! # Primary Key Successor Properties
//!
//! Property tests over randomly generated composite keys. Integer columns
//! are biased toward their maximum so carries and exhaustion show up often.

use std::cmp::Ordering;

use proptest::prelude::*;
use rowkey::{compare_keys, increment_primary_key, Arena, Cell, ColumnDef, DataType, RowBuffer, Schema};

fn int8_schema(columns: usize) -> Schema {
    let defs = (0..columns)
        .map(|i| ColumnDef::new(format!("k{}", i), DataType::Int8))
        .collect();
    Schema::new(defs, columns).unwrap()
}

fn biased_i8() -> impl Strategy<Value = i8> {
    prop_oneof![Just(i8::MAX), Just(i8::MAX - 1), any::<i8>()]
}

fn biased_u16() -> impl Strategy<Value = u16> {
    prop_oneof![Just(u16::MAX), any::<u16>()]
}

/// One generated key column: its type and starting value.
#[derive(Debug, Clone)]
enum KeyValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    String(Vec<u8>),
    Binary(Vec<u8>),
}

impl KeyValue {
    fn data_type(&self) -> DataType {
        match self {
            KeyValue::Int8(_) => DataType::Int8,
            KeyValue::Int16(_) => DataType::Int16,
            KeyValue::Int32(_) => DataType::Int32,
            KeyValue::Int64(_) => DataType::Int64,
            KeyValue::UInt8(_) => DataType::UInt8,
            KeyValue::UInt16(_) => DataType::UInt16,
            KeyValue::UInt32(_) => DataType::UInt32,
            KeyValue::UInt64(_) => DataType::UInt64,
            KeyValue::String(_) => DataType::String,
            KeyValue::Binary(_) => DataType::Binary,
        }
    }

    fn cell(&self) -> Cell<'_> {
        match self {
            KeyValue::Int8(v) => Cell::Int8(*v),
            KeyValue::Int16(v) => Cell::Int16(*v),
            KeyValue::Int32(v) => Cell::Int32(*v),
            KeyValue::Int64(v) => Cell::Int64(*v),
            KeyValue::UInt8(v) => Cell::UInt8(*v),
            KeyValue::UInt16(v) => Cell::UInt16(*v),
            KeyValue::UInt32(v) => Cell::UInt32(*v),
            KeyValue::UInt64(v) => Cell::UInt64(*v),
            KeyValue::String(bytes) => Cell::String(bytes),
            KeyValue::Binary(bytes) => Cell::Binary(bytes),
        }
    }

    fn is_max(&self) -> bool {
        match self {
            KeyValue::Int8(v) => *v == i8::MAX,
            KeyValue::Int16(v) => *v == i16::MAX,
            KeyValue::Int32(v) => *v == i32::MAX,
            KeyValue::Int64(v) => *v == i64::MAX,
            KeyValue::UInt8(v) => *v == u8::MAX,
            KeyValue::UInt16(v) => *v == u16::MAX,
            KeyValue::UInt32(v) => *v == u32::MAX,
            KeyValue::UInt64(v) => *v == u64::MAX,
            KeyValue::String(_) | KeyValue::Binary(_) => false,
        }
    }
}

fn key_value() -> impl Strategy<Value = KeyValue> {
    prop_oneof![
        prop_oneof![Just(i8::MAX), any::<i8>()].prop_map(KeyValue::Int8),
        prop_oneof![Just(i16::MAX), any::<i16>()].prop_map(KeyValue::Int16),
        prop_oneof![Just(i32::MAX), any::<i32>()].prop_map(KeyValue::Int32),
        prop_oneof![Just(i64::MAX), any::<i64>()].prop_map(KeyValue::Int64),
        prop_oneof![Just(u8::MAX), any::<u8>()].prop_map(KeyValue::UInt8),
        prop_oneof![Just(u16::MAX), any::<u16>()].prop_map(KeyValue::UInt16),
        prop_oneof![Just(u32::MAX), any::<u32>()].prop_map(KeyValue::UInt32),
        prop_oneof![Just(u64::MAX), any::<u64>()].prop_map(KeyValue::UInt64),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(KeyValue::String),
        prop::collection::vec(any::<u8>(), 0..8).prop_map(KeyValue::Binary),
    ]
}

fn fill_int8(row: &mut RowBuffer<'_, '_>, values: &[i8]) {
    for (idx, &v) in values.iter().enumerate() {
        row.set_int8(idx, v).unwrap();
    }
}

proptest! {
    #[test]
    fn prop_successor_is_strictly_greater_unless_exhausted(values in prop::collection::vec(biased_i8(), 1..=4)) {
        let schema = int8_schema(values.len());
        let arena = Arena::new();

        let mut before = RowBuffer::new(&schema);
        fill_int8(&mut before, &values);
        let mut after = RowBuffer::new(&schema);
        fill_int8(&mut after, &values);

        let advanced = increment_primary_key(&mut after.view_mut(), values.len(), &arena).unwrap();
        let all_max = values.iter().all(|&v| v == i8::MAX);

        prop_assert_eq!(advanced, !all_max);
        if advanced {
            prop_assert_eq!(
                compare_keys(&before.row_ref(), &after.row_ref(), values.len()).unwrap(),
                Ordering::Less
            );
        }
    }

    #[test]
    fn prop_mixed_key_successor_is_strictly_greater(values in prop::collection::vec(key_value(), 1..=5)) {
        let defs = values
            .iter()
            .enumerate()
            .map(|(i, v)| ColumnDef::new(format!("k{}", i), v.data_type()))
            .collect();
        let schema = Schema::new(defs, values.len()).unwrap();
        let arena = Arena::new();

        let mut before = RowBuffer::new(&schema);
        let mut after = RowBuffer::new(&schema);
        for (idx, v) in values.iter().enumerate() {
            before.set_cell(idx, v.cell()).unwrap();
            after.set_cell(idx, v.cell()).unwrap();
        }

        let advanced = increment_primary_key(&mut after.view_mut(), values.len(), &arena).unwrap();

        prop_assert_eq!(advanced, !values.iter().all(KeyValue::is_max));
        if advanced {
            prop_assert_eq!(
                compare_keys(&before.row_ref(), &after.row_ref(), values.len()).unwrap(),
                Ordering::Less
            );
        }
    }

    #[test]
    fn prop_exhaustion_resets_every_column_to_minimum(len in 1usize..=4) {
        let defs = (0..len)
            .map(|i| ColumnDef::new(format!("k{}", i), DataType::UInt16))
            .collect();
        let schema = Schema::new(defs, len).unwrap();
        let arena = Arena::new();
        let mut row = RowBuffer::new(&schema);
        for idx in 0..len {
            row.set_uint16(idx, u16::MAX).unwrap();
        }

        prop_assert!(!increment_primary_key(&mut row.view_mut(), len, &arena).unwrap());
        for idx in 0..len {
            prop_assert_eq!(row.row_ref().get_uint16(idx).unwrap(), 0);
        }
    }

    #[test]
    fn prop_carry_is_contiguous_from_the_right(values in prop::collection::vec(biased_i8(), 1..=5)) {
        let schema = int8_schema(values.len());
        let arena = Arena::new();
        let mut row = RowBuffer::new(&schema);
        fill_int8(&mut row, &values);

        increment_primary_key(&mut row.view_mut(), values.len(), &arena).unwrap();

        let absorber = values.iter().rposition(|&v| v != i8::MAX);
        for (idx, &v) in values.iter().enumerate() {
            let now = row.row_ref().get_int8(idx).unwrap();
            match absorber {
                Some(a) if idx < a => {
                    prop_assert_eq!(now, v);
                }
                Some(a) if idx == a => {
                    prop_assert_eq!(now, v + 1);
                }
                _ => {
                    prop_assert_eq!(now, i8::MIN);
                }
            }
        }
    }

    #[test]
    fn prop_key_with_string_column_never_exhausts(
        ints in prop::collection::vec(biased_u16(), 0..=3),
        text in prop::collection::vec(any::<u8>(), 0..16),
        string_pos in 0usize..=3,
    ) {
        let string_pos = string_pos.min(ints.len());
        let mut defs = Vec::new();
        for i in 0..=ints.len() {
            if i == string_pos {
                defs.push(ColumnDef::new("s", DataType::String));
            }
            if i < ints.len() {
                defs.push(ColumnDef::new(format!("k{}", i), DataType::UInt16));
            }
        }
        let key_len = defs.len();
        let schema = Schema::new(defs, key_len).unwrap();
        let arena = Arena::new();
        let mut row = RowBuffer::new(&schema);

        let mut ints_iter = ints.iter();
        for idx in 0..key_len {
            if idx == string_pos {
                row.set_string_no_copy(idx, &text).unwrap();
            } else if let Some(&v) = ints_iter.next() {
                row.set_uint16(idx, v).unwrap();
            }
        }

        let before = row.row_ref().to_string();
        prop_assert!(increment_primary_key(&mut row.view_mut(), key_len, &arena).unwrap());
        prop_assert_ne!(row.row_ref().to_string(), before);
    }

    #[test]
    fn prop_two_calls_on_string_key_append_two_zero_bytes(text in prop::collection::vec(any::<u8>(), 0..64)) {
        let schema = Schema::new(vec![ColumnDef::new("s", DataType::Binary)], 1).unwrap();
        let arena = Arena::new();
        let mut row = RowBuffer::new(&schema);
        row.set_binary_no_copy(0, &text).unwrap();

        prop_assert!(increment_primary_key(&mut row.view_mut(), 1, &arena).unwrap());
        prop_assert!(increment_primary_key(&mut row.view_mut(), 1, &arena).unwrap());

        let mut expected = text.clone();
        expected.extend_from_slice(&[0, 0]);
        prop_assert_eq!(row.row_ref().cell(0).unwrap(), Cell::Binary(&expected));
    }
}
