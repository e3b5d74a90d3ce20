// Comprehensive coverage tests for error module
use paramkit::error::type_name;
use paramkit::*;

// ═══════════════════════════════════════════════════════════════════════
// type_name Coverage - All Value Kinds
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_type_name_scalars() {
    assert_eq!(type_name(&Value::Bool(true)), "bool");
    assert_eq!(type_name(&Value::Byte(0)), "byte");
    assert_eq!(type_name(&Value::Char('a')), "char");
    assert_eq!(type_name(&Value::Short(0)), "short");
    assert_eq!(type_name(&Value::Int(0)), "int");
    assert_eq!(type_name(&Value::Long(0)), "long");
    assert_eq!(type_name(&Value::Float(0.0)), "float");
    assert_eq!(type_name(&Value::Double(0.0)), "double");
    assert_eq!(type_name(&Value::from("hello")), "string");
}

#[test]
fn test_type_name_heap_kinds() {
    assert_eq!(type_name(&Value::array_of([1i32])), "array");
    assert_eq!(type_name(&Value::params(ParamMap::new())), "params");
}

#[test]
fn test_type_name_matches_scalar_kind_name() {
    for kind in ScalarKind::ALL {
        assert_eq!(type_name(&kind.default_value()), kind.name());
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Error Display
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_wire_error_display() {
    let err = WireError::UnexpectedEof {
        needed: 4,
        remaining: 1,
    };
    assert_eq!(
        err.to_string(),
        "Unexpected end of buffer: needed 4 bytes, 1 remaining"
    );
    assert_eq!(
        WireError::LengthMismatch {
            declared: 8,
            repeated: 9
        }
        .to_string(),
        "Length mismatch: declared 8, repeated 9"
    );
    assert_eq!(WireError::NegativeLength(-3).to_string(), "Negative length field: -3");
    assert_eq!(WireError::InvalidChar(0xd800).to_string(), "Invalid char code point: 0xd800");
}

#[test]
fn test_params_error_from_wire() {
    let err: ParamsError = WireError::InvalidUtf16.into();
    assert!(matches!(err, ParamsError::Wire(WireError::InvalidUtf16)));
    assert_eq!(err.to_string(), "Wire error: Invalid UTF-16 string data");
}

#[test]
fn test_params_error_bad_header_display() {
    let err = ParamsError::BadHeader {
        expected: "PACMAP",
        got: "OTHER".to_string(),
    };
    assert_eq!(err.to_string(), "Bad header: expected \"PACMAP\", got \"OTHER\"");
}

#[test]
fn test_unmarshal_with_surfaces_wire_error() {
    let err = ParamMap::unmarshal_with(&[1, 0], &CodecContext::default()).unwrap_err();
    assert!(matches!(
        err,
        ParamsError::Wire(WireError::UnexpectedEof {
            needed: 4,
            remaining: 2
        })
    ));
}
