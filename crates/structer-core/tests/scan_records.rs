//! Integration tests for schema construction, header validation and scanning
//!
//! Record types are declared outside the crate, exercising `record!` the way
//! downstream users invoke it.

use structer_core::{record, AccessCheck, RecordSchema, ScalarKind, ScanError, SchemaOptions};

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Fruit {
        #[csv = "field1"]
        pub field1: String,
        #[csv = "field2"]
        pub field2: i64,
        pub origin: Origin,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Origin {
        #[csv = "field3"]
        pub field3: String,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Sealed {
        #[csv = "field1"]
        pub field1: i64,
        sealed_part: SealedPart,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct SealedPart {
        #[csv = "field2"]
        pub field2: String,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct AllTypes {
        #[csv = "string_field"]
        pub string_field: String,
        #[csv = "int_field"]
        pub int_field: i64,
        #[csv = "bool_field"]
        pub bool_field: bool,
        #[csv = "float32_field"]
        pub float32_field: f32,
        #[csv = "float64_field"]
        pub float64_field: f64,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct WithSkippedField {
        #[csv = "field1"]
        pub field1: String,
        pub skipped_field: String,
        #[csv = "field2"]
        pub field2: i64,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct WithNestedCounter {
        #[csv = "field1"]
        pub field1: String,
        pub nested: Counter,
    }
}

record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Counter {
        #[csv = "field2"]
        pub field2: i64,
    }
}

const ALL_TYPES_HEADERS: [&str; 5] = [
    "string_field",
    "int_field",
    "bool_field",
    "float32_field",
    "float64_field",
];

#[test]
fn test_scan_with_embedded_record() {
    let schema = RecordSchema::new(&Fruit::default(), &["field1", "field2", "field3"]).unwrap();
    assert!(schema.validate_headers(&["field1", "field2", "field3"]));

    let mut fruit = Fruit::default();
    schema
        .scan_into(&["apple", "43", "banana"], &mut fruit)
        .unwrap();

    assert_eq!(fruit.field1, "apple");
    assert_eq!(fruit.field2, 43);
    assert_eq!(fruit.origin.field3, "banana");
}

#[test]
fn test_short_header_and_conversion_error() {
    // Construction tolerates a header shorter than the declared tags
    let schema = RecordSchema::new(&Fruit::default(), &["field1", "field2"]).unwrap();
    assert!(!schema.validate_headers(&["field3", "field2"]));

    let mut fruit = Fruit::default();
    let err = schema
        .scan_into(&["apple", "banana"], &mut fruit)
        .unwrap_err();
    match err {
        ScanError::Conversion { column, source, .. } => {
            assert_eq!(column, "field2");
            assert_eq!(source.kind, ScalarKind::Integer);
            assert_eq!(source.value, "banana");
        }
        other => panic!("Expected conversion error, got {other:?}"),
    }
}

#[test]
fn test_unexported_fields_fail_on_scan() {
    let schema = RecordSchema::new(&Sealed::default(), &["field1", "field2"]).unwrap();
    assert!(schema.validate_headers(&["field1", "field2"]));

    let mut sealed = Sealed::default();
    let err = schema.scan_into(&["10", "banana"], &mut sealed).unwrap_err();
    assert_eq!(err.to_string(), "struct contains unexported fields");

    // Fails on every scan, not just the first
    let err = schema.scan_into(&["11", "cherry"], &mut sealed).unwrap_err();
    assert!(matches!(err, ScanError::UnexportedField { .. }));
}

#[test]
fn test_unexported_fields_fail_on_build_when_configured() {
    let options = SchemaOptions {
        access_check: AccessCheck::OnBuild,
        ..Default::default()
    };
    let err = RecordSchema::with_options(&Sealed::default(), &["field1", "field2"], options)
        .unwrap_err();
    assert_eq!(err.to_string(), "struct contains unexported fields");
}

#[test]
fn test_all_scalar_types() {
    let schema = RecordSchema::new(&AllTypes::default(), &ALL_TYPES_HEADERS).unwrap();
    assert!(schema.validate_headers(&ALL_TYPES_HEADERS));

    let mut record = AllTypes::default();
    schema
        .scan_into(&["test", "123", "true", "3.15", "1.61803"], &mut record)
        .unwrap();

    assert_eq!(record.string_field, "test");
    assert_eq!(record.int_field, 123);
    assert!(record.bool_field);
    assert_eq!(record.float32_field, 3.15f32);
    assert_eq!(record.float64_field, 1.61803);
}

#[test]
fn test_malformed_cells_are_not_coerced() {
    let schema = RecordSchema::new(&AllTypes::default(), &ALL_TYPES_HEADERS).unwrap();

    let cases = [
        (["test", "123", "invalid_bool", "3.15", "1.5"], "bool_field"),
        (["test", "123", "true", "invalid_float", "1.5"], "float32_field"),
        (["test", "123", "true", "3.15", "invalid_float"], "float64_field"),
        (["test", "12x", "true", "3.15", "1.5"], "int_field"),
        (["test", "123", "true", "1e39", "1.5"], "float32_field"),
        (["test", "123", "true", "3.15", "1e400"], "float64_field"),
    ];

    for (cells, failing_column) in cases {
        let mut record = AllTypes::default();
        let err = schema.scan_into(&cells, &mut record).unwrap_err();
        assert_eq!(err.column(), Some(failing_column));
    }
}

#[test]
fn test_overflowing_float_is_not_stored_as_infinity() {
    let schema = RecordSchema::new(&AllTypes::default(), &ALL_TYPES_HEADERS).unwrap();

    let err = schema
        .read::<AllTypes, _>(&["test", "1", "true", "1e39", "1e400"])
        .unwrap_err();
    match err {
        ScanError::Conversion { column, source, .. } => {
            assert_eq!(column, "float32_field");
            assert_eq!(source.kind, ScalarKind::Float32);
            assert_eq!(source.reason, "value out of range");
        }
        other => panic!("Expected conversion error, got {other:?}"),
    }

    let record: AllTypes = schema.read(&["test", "1", "true", "-inf", "inf"]).unwrap();
    assert_eq!(record.float32_field, f32::NEG_INFINITY);
    assert_eq!(record.float64_field, f64::INFINITY);
}

#[test]
fn test_skip_field_without_tag() {
    let schema = RecordSchema::new(&WithSkippedField::default(), &["field1", "field2"]).unwrap();

    let mut record = WithSkippedField::default();
    schema.scan_into(&["value1", "42"], &mut record).unwrap();

    assert_eq!(record.field1, "value1");
    assert_eq!(record.field2, 42);
    assert_eq!(record.skipped_field, "");
}

#[test]
fn test_destination_must_be_a_record() {
    let schema = RecordSchema::new(&Fruit::default(), &["field1"]).unwrap();

    let mut value = String::from("test");
    let err = schema.scan_into(&["value"], &mut value).unwrap_err();
    assert_eq!(err.to_string(), "input should be a pointer to a struct");
    assert_eq!(value, "test");

    let mut number = 5i64;
    let err = schema.scan_into(&["value"], &mut number).unwrap_err();
    assert!(matches!(err, ScanError::InputShape));
    assert_eq!(number, 5);
}

#[test]
fn test_validate_headers_different_length() {
    let schema = RecordSchema::new(&Fruit::default(), &["field1", "field2", "field3"]).unwrap();
    assert!(!schema.validate_headers(&["field1", "field2"]));
    assert!(!schema.validate_headers(&["field1", "field2", "field3", "field4"]));
}

#[test]
fn test_nested_record_parse_error() {
    let schema = RecordSchema::new(&WithNestedCounter::default(), &["field1", "field2"]).unwrap();

    let mut record = WithNestedCounter::default();
    let err = schema
        .scan_into(&["value1", "not_a_number"], &mut record)
        .unwrap_err();

    match err {
        ScanError::Conversion { column, path, .. } => {
            assert_eq!(column, "field2");
            assert_eq!(path, "nested.field2");
        }
        other => panic!("Expected conversion error, got {other:?}"),
    }
    assert_eq!(record.field1, "value1");
}

#[test]
fn test_schema_shared_across_threads() {
    let schema = RecordSchema::new(&Fruit::default(), &["field1", "field2", "field3"]).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let schema = &schema;
                scope.spawn(move || {
                    let count = i.to_string();
                    let fruit: Fruit = schema.read(&["kiwi", count.as_str(), "NZ"]).unwrap();
                    fruit.field2
                })
            })
            .collect();

        let mut counts: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        counts.sort();
        assert_eq!(counts, vec![0, 1, 2, 3]);
    });
}
