//! CPython type slots and comparison opcodes, as data.
//!
//! CPython dispatches operators through function pointers stored on the type object
//! (`tp_as_number->nb_add` and friends). A static analyzer that interprets bytecode needs
//! to know which Python magic method sits behind each of those pointers, and which opcode
//! reaches it. This crate records that as two tables:
//!
//! - [`SLOTS`]: magic method, C slot, function pointer type, opcode and Python version.
//! - [`COMPARE_OPS`]: `COMPARE_OP` arguments and their rich comparison methods.
//!
//! # Example
//!
//! ```rust
//! use pyslots::{binary_operator_mapping, compare_function_mapping, CMP_LT};
//!
//! let binary = binary_operator_mapping();
//! assert_eq!(binary["ADD"], "__add__");
//! assert_eq!(binary["INPLACE_ADD"], "__iadd__");
//!
//! let compare = compare_function_mapping();
//! assert_eq!(compare[&CMP_LT], "__lt__");
//! ```
//!
//! # Python versions
//!
//! Slots that only exist in one major version carry a [`PythonVersionTag`]. Set
//! `PYSLOTS_PYTHON_VERSION` (e.g. `3.9`) and use [`slots_for_target`] to get only the
//! slots valid for that interpreter.
//!
//! # Feature flags
//!
//! - `serde`: implements `serde::Serialize` for the records and their tags.

pub mod compare;
pub mod errors;
pub mod mapping;
pub mod slots;
pub mod version;

pub use crate::compare::{
    CompareOp, CMP_EQ, CMP_EXC_MATCH, CMP_GE, CMP_GT, CMP_IN, CMP_IS, CMP_IS_NOT, CMP_LE,
    CMP_LT, CMP_NE, CMP_NOT_IN, COMPARE_OPS,
};
pub use crate::errors::{Error, Result};
pub use crate::mapping::{
    binary_operator_mapping, compare_function_mapping, compare_op_by_index, compare_op_by_name,
    reflected_method, slots_for_c_name, slots_for_python_name, slots_for_target,
    slots_for_version, SlotIndex,
};
pub use crate::slots::{
    FunctionType, Slot, SlotProtocol, MAPPING_PREFIX, NUMBER_PREFIX, SEQUENCE_PREFIX, SLOTS,
    TYPEOBJECT_PREFIX,
};
pub use crate::version::{target_version, PythonVersion, PythonVersionTag};
