//! Comparison opcodes.
//!
//! `COMPARE_OP` carries an index into this table as its argument; the first six
//! entries dispatch to rich comparison methods, the rest are handled by the interpreter.

pub const CMP_LT: u8 = 0;
pub const CMP_LE: u8 = 1;
pub const CMP_EQ: u8 = 2;
pub const CMP_NE: u8 = 3;
pub const CMP_GT: u8 = 4;
pub const CMP_GE: u8 = 5;
pub const CMP_IN: u8 = 6;
pub const CMP_NOT_IN: u8 = 7;
pub const CMP_IS: u8 = 8;
pub const CMP_IS_NOT: u8 = 9;
pub const CMP_EXC_MATCH: u8 = 9;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CompareOp {
    /// Opcode name without the `COMPARE_` part, e.g. `LT`.
    pub op: &'static str,
    pub index: u8,
    /// The rich comparison method, if this comparison has one.
    pub magic: Option<&'static str>,
}

impl CompareOp {
    const fn new(op: &'static str, index: u8, magic: Option<&'static str>) -> Self {
        CompareOp { op, index, magic }
    }
}

pub static COMPARE_OPS: &[CompareOp] = &[
    CompareOp::new("LT", CMP_LT, Some("__lt__")),
    CompareOp::new("LE", CMP_LE, Some("__le__")),
    CompareOp::new("EQ", CMP_EQ, Some("__eq__")),
    CompareOp::new("NE", CMP_NE, Some("__ne__")),
    CompareOp::new("GT", CMP_GT, Some("__gt__")),
    CompareOp::new("GE", CMP_GE, Some("__ge__")),
    // reversed __contains__
    CompareOp::new("IN", CMP_IN, None),
    CompareOp::new("NOT_IN", CMP_NOT_IN, None),
    CompareOp::new("IS", CMP_IS, None),
    CompareOp::new("IS_NOT", CMP_IS_NOT, None),
    CompareOp::new("EXC_MATCH", CMP_EXC_MATCH, None),
];
