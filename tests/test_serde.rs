#![cfg(feature = "serde")]

use pyslots::{compare_op_by_name, slots_for_python_name, PythonVersion, SlotProtocol};
use serde_json::json;

#[test]
fn slot_serializes_with_string_tags() {
    let add = slots_for_python_name("__add__").next().unwrap();
    assert_eq!(
        serde_json::to_value(add).unwrap(),
        json!({
            "python_name": "__add__",
            "c_name": "nb_add",
            "function_type": "binary_nb",
            "index": 0,
            "opcode": "BINARY_ADD",
            "python_version": "*",
        })
    );

    let next = slots_for_python_name("next").next().unwrap();
    let value = serde_json::to_value(next).unwrap();
    assert_eq!(value["python_version"], "2");
    assert_eq!(value["index"], serde_json::Value::Null);
}

#[test]
fn compare_op_and_version_serialize() {
    assert_eq!(
        serde_json::to_value(compare_op_by_name("IN").unwrap()).unwrap(),
        json!({ "op": "IN", "index": 6, "magic": null })
    );
    assert_eq!(
        serde_json::to_value(PythonVersion { major: 3, minor: 9 }).unwrap(),
        json!({ "major": 3, "minor": 9 })
    );
    assert_eq!(
        serde_json::to_value(SlotProtocol::Sequence).unwrap(),
        json!("sequence")
    );
}
