//! The magic method to type slot table.
//!
//! Each [`Slot`] describes how a Python magic method (e.g. `__add__`) relates to the
//! opcode that triggers it (`BINARY_ADD`) and the C function pointer CPython stores it
//! in (`nb_add`).
use std::{fmt::Display, str::FromStr};

use crate::{
    bail,
    errors::{Error, Result},
    version::PythonVersionTag,
};

pub const TYPEOBJECT_PREFIX: &str = "tp_";
pub const NUMBER_PREFIX: &str = "nb_";
pub const SEQUENCE_PREFIX: &str = "sq_";
pub const MAPPING_PREFIX: &str = "mp_";

/// The C type of a slot's function pointer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FunctionType {
    New,
    Init,
    Print,
    Repr,
    Hash,
    Call,
    GetAttrO,
    SetAttrO,
    Unary,
    Next,
    DescrGet,
    DescrSet,
    DescrDelete,
    Destructor,
    Cmp,
    RichCmpFunc,
    /// Binary number slot, shared by a method and its reflected twin.
    BinaryNb,
    Binary,
    Ternary,
    Inquiry,
    Coercion,
    ObjObjArgProc,
    Len,
    ObjObjProc,
    IndexArgFunc,
    SqItem,
    SqAssItem,
    SqDelItem,
    SqSlice,
    SsizeSsizeObjArg,
    DelSlice,
}

impl FunctionType {
    pub const ALL: [FunctionType; 31] = [
        FunctionType::New,
        FunctionType::Init,
        FunctionType::Print,
        FunctionType::Repr,
        FunctionType::Hash,
        FunctionType::Call,
        FunctionType::GetAttrO,
        FunctionType::SetAttrO,
        FunctionType::Unary,
        FunctionType::Next,
        FunctionType::DescrGet,
        FunctionType::DescrSet,
        FunctionType::DescrDelete,
        FunctionType::Destructor,
        FunctionType::Cmp,
        FunctionType::RichCmpFunc,
        FunctionType::BinaryNb,
        FunctionType::Binary,
        FunctionType::Ternary,
        FunctionType::Inquiry,
        FunctionType::Coercion,
        FunctionType::ObjObjArgProc,
        FunctionType::Len,
        FunctionType::ObjObjProc,
        FunctionType::IndexArgFunc,
        FunctionType::SqItem,
        FunctionType::SqAssItem,
        FunctionType::SqDelItem,
        FunctionType::SqSlice,
        FunctionType::SsizeSsizeObjArg,
        FunctionType::DelSlice,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FunctionType::New => "new",
            FunctionType::Init => "init",
            FunctionType::Print => "print",
            FunctionType::Repr => "repr",
            FunctionType::Hash => "hash",
            FunctionType::Call => "call",
            FunctionType::GetAttrO => "getattro",
            FunctionType::SetAttrO => "setattro",
            FunctionType::Unary => "unary",
            FunctionType::Next => "next",
            FunctionType::DescrGet => "descr_get",
            FunctionType::DescrSet => "descr_set",
            FunctionType::DescrDelete => "descr_delete",
            FunctionType::Destructor => "destructor",
            FunctionType::Cmp => "cmp",
            FunctionType::RichCmpFunc => "richcmpfunc",
            FunctionType::BinaryNb => "binary_nb",
            FunctionType::Binary => "binary",
            FunctionType::Ternary => "ternary",
            FunctionType::Inquiry => "inquiry",
            FunctionType::Coercion => "coercion",
            FunctionType::ObjObjArgProc => "objobjargproc",
            FunctionType::Len => "len",
            FunctionType::ObjObjProc => "objobjproc",
            FunctionType::IndexArgFunc => "indexargfunc",
            FunctionType::SqItem => "sq_item",
            FunctionType::SqAssItem => "sq_ass_item",
            FunctionType::SqDelItem => "sq_delitem",
            FunctionType::SqSlice => "sq_slice",
            FunctionType::SsizeSsizeObjArg => "ssizessizeobjarg",
            FunctionType::DelSlice => "delslice",
        }
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FunctionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match FunctionType::ALL.iter().find(|ty| ty.as_str() == s) {
            Some(ty) => Ok(*ty),
            None => bail!("unknown slot function type: {}", s),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FunctionType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Which structure hanging off `PyTypeObject` holds a slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SlotProtocol {
    /// `PyTypeObject` itself.
    TypeObject,
    /// `tp_as_number`.
    Number,
    /// `tp_as_sequence`.
    Sequence,
    /// `tp_as_mapping`.
    Mapping,
}

impl SlotProtocol {
    pub const fn prefix(self) -> &'static str {
        match self {
            SlotProtocol::TypeObject => TYPEOBJECT_PREFIX,
            SlotProtocol::Number => NUMBER_PREFIX,
            SlotProtocol::Sequence => SEQUENCE_PREFIX,
            SlotProtocol::Mapping => MAPPING_PREFIX,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SlotProtocol::TypeObject => "typeobject",
            SlotProtocol::Number => "number",
            SlotProtocol::Sequence => "sequence",
            SlotProtocol::Mapping => "mapping",
        }
    }

    /// Classifies a C slot name by its prefix. `None` for names outside the four families.
    pub fn from_c_name(c_name: &str) -> Option<Self> {
        [
            SlotProtocol::TypeObject,
            SlotProtocol::Number,
            SlotProtocol::Sequence,
            SlotProtocol::Mapping,
        ]
        .into_iter()
        .find(|protocol| c_name.starts_with(protocol.prefix()))
    }
}

impl Display for SlotProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SlotProtocol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A "slot" describes a Python operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Slot {
    /// The name of the Python method, e.g. `__add__`.
    pub python_name: &'static str,
    /// The base name of the C function pointer: `nb_add` for `tp_as_number->nb_add`.
    pub c_name: &'static str,
    pub function_type: FunctionType,
    /// `0` or `1` when two Python methods share one function pointer
    /// (`__add__` and `__radd__`).
    pub index: Option<u8>,
    /// The opcode CPython uses to call this function. Only set for operators
    /// (`BINARY_SUBSCR`), never for operations (`STORE_SUBSCR`).
    pub opcode: Option<&'static str>,
    pub python_version: PythonVersionTag,
}

impl Slot {
    pub const fn new(
        python_name: &'static str,
        c_name: &'static str,
        function_type: FunctionType,
    ) -> Self {
        Slot {
            python_name,
            c_name,
            function_type,
            index: None,
            opcode: None,
            python_version: PythonVersionTag::Any,
        }
    }
    pub const fn index(mut self, index: u8) -> Slot {
        self.index = Some(index);
        self
    }
    pub const fn opcode(mut self, opcode: &'static str) -> Slot {
        self.opcode = Some(opcode);
        self
    }
    pub const fn python_version(mut self, python_version: PythonVersionTag) -> Slot {
        self.python_version = python_version;
        self
    }

    pub fn protocol(&self) -> Option<SlotProtocol> {
        SlotProtocol::from_c_name(self.c_name)
    }

    /// The key this slot contributes to the binary operator mapping: the opcode with a
    /// leading `BINARY_` removed.
    pub fn opcode_key(&self) -> Option<&'static str> {
        self.opcode
            .map(|opcode| opcode.strip_prefix("BINARY_").unwrap_or(opcode))
    }

    /// True for the right-hand half of a binary number pair (`__radd__`).
    pub fn is_reflected(&self) -> bool {
        self.function_type == FunctionType::BinaryNb && self.index == Some(1)
    }
}

use FunctionType::*;
use PythonVersionTag::{Py2, Py3};

pub static SLOTS: &[Slot] = &[
    // typeobject
    Slot::new("__new__", "tp_new", New),
    Slot::new("__init__", "tp_init", Init),
    Slot::new("__str__", "tp_print", Print),
    Slot::new("__repr__", "tp_repr", Repr),
    Slot::new("__hash__", "tp_hash", Hash),
    Slot::new("__call__", "tp_call", Call),
    // tp_getattr is never called when tp_getattro exists.
    Slot::new("__getattribute__", "tp_getattro", GetAttrO),
    Slot::new("__getattr__", "tp_getattro", GetAttrO),
    Slot::new("__setattr__", "tp_setattro", SetAttrO),
    Slot::new("__delattr__", "tp_setattro", SetAttrO),
    // Py_TPFLAGS_HAVE_ITER
    Slot::new("__iter__", "tp_iter", Unary),
    Slot::new("next", "tp_iternext", Next).python_version(Py2),
    Slot::new("__next__", "tp_iternext", Next).python_version(Py3),
    // Py_TPFLAGS_HAVE_CLASS
    Slot::new("__get__", "tp_descr_get", DescrGet),
    Slot::new("__set__", "tp_descr_set", DescrSet),
    Slot::new("__delete__", "tp_descr_set", DescrDelete),
    Slot::new("__del__", "tp_del", Destructor),
    // tp_compare became tp_reserved in Python 3
    Slot::new("__cmp__", "tp_compare", Cmp).python_version(Py2),
    Slot::new("__lt__", "tp_richcompare", RichCmpFunc),
    Slot::new("__le__", "tp_richcompare", RichCmpFunc),
    Slot::new("__eq__", "tp_richcompare", RichCmpFunc),
    Slot::new("__ne__", "tp_richcompare", RichCmpFunc),
    Slot::new("__gt__", "tp_richcompare", RichCmpFunc),
    Slot::new("__ge__", "tp_richcompare", RichCmpFunc),
    Slot::new("__richcompare__", "tp_richcompare", RichCmpFunc),
    // number
    Slot::new("__add__", "nb_add", BinaryNb).index(0).opcode("BINARY_ADD"),
    Slot::new("__radd__", "nb_add", BinaryNb).index(1),
    Slot::new("__sub__", "nb_subtract", BinaryNb).index(0).opcode("BINARY_SUBTRACT"),
    Slot::new("__rsub__", "nb_subtract", BinaryNb).index(1),
    Slot::new("__mul__", "nb_multiply", BinaryNb).index(0),
    Slot::new("__rmul__", "nb_multiply", BinaryNb).index(1),
    Slot::new("__div__", "nb_divide", BinaryNb).index(0).opcode("BINARY_DIVIDE"),
    Slot::new("__rdiv__", "nb_divide", BinaryNb).index(1),
    Slot::new("__mod__", "nb_remainder", BinaryNb).index(0).opcode("BINARY_MODULO"),
    Slot::new("__rmod__", "nb_remainder", BinaryNb).index(1),
    Slot::new("__divmod__", "nb_divmod", BinaryNb).index(0),
    Slot::new("__rdivmod__", "nb_divmod", BinaryNb).index(1),
    Slot::new("__lshift__", "nb_lshift", BinaryNb).index(0).opcode("BINARY_LSHIFT"),
    Slot::new("__rlshift__", "nb_lshift", BinaryNb).index(1),
    Slot::new("__rshift__", "nb_rshift", BinaryNb).index(0).opcode("BINARY_RSHIFT"),
    Slot::new("__rrshift__", "nb_rshift", BinaryNb).index(1),
    Slot::new("__and__", "nb_and", BinaryNb).index(0).opcode("BINARY_AND"),
    Slot::new("__rand__", "nb_and", BinaryNb).index(1),
    Slot::new("__xor__", "nb_xor", BinaryNb).index(0).opcode("BINARY_XOR"),
    Slot::new("__rxor__", "nb_xor", BinaryNb).index(1),
    Slot::new("__or__", "nb_or", BinaryNb).index(0).opcode("BINARY_OR"),
    Slot::new("__ror__", "nb_or", BinaryNb).index(1),
    // Py_TPFLAGS_HAVE_CLASS
    Slot::new("__floordiv__", "nb_floor_divide", BinaryNb)
        .index(0)
        .opcode("BINARY_FLOOR_DIVIDE"),
    Slot::new("__rfloordiv__", "nb_floor_divide", BinaryNb).index(1),
    Slot::new("__truediv__", "nb_true_divide", BinaryNb)
        .index(0)
        .opcode("BINARY_TRUE_DIVIDE"),
    Slot::new("__rtruediv__", "nb_true_divide", BinaryNb).index(1),
    Slot::new("__pow__", "nb_power", Ternary).opcode("BINARY_POWER"),
    // wrapped by wrap_ternaryfunc_r
    Slot::new("__rpow__", "nb_power", Ternary),
    Slot::new("__neg__", "nb_negative", Unary).opcode("UNARY_NEGATIVE"),
    Slot::new("__pos__", "nb_positive", Unary).opcode("UNARY_POSITIVE"),
    Slot::new("__abs__", "nb_absolute", Unary),
    Slot::new("__nonzero__", "nb_nonzero", Inquiry),
    Slot::new("__invert__", "nb_invert", Unary).opcode("UNARY_INVERT"),
    Slot::new("__coerce__", "nb_coerce", Coercion),
    // conversions must return the exact builtin type
    Slot::new("__int__", "nb_int", Unary),
    Slot::new("__long__", "nb_long", Unary),
    Slot::new("__float__", "nb_float", Unary),
    Slot::new("__oct__", "nb_oct", Unary),
    Slot::new("__hex__", "nb_hex", Unary),
    // in-place; list concatenation goes through sq_inplace_concat instead
    Slot::new("__iadd__", "nb_inplace_add", Binary).opcode("INPLACE_ADD"),
    Slot::new("__isub__", "nb_inplace_subtract", Binary).opcode("INPLACE_SUBTRACT"),
    Slot::new("__imul__", "nb_inplace_multiply", Binary).opcode("INPLACE_MUL"),
    Slot::new("__idiv__", "nb_inplace_divide", Binary).opcode("INPLACE_DIV"),
    Slot::new("__irem__", "nb_inplace_remainder", Binary).opcode("INPLACE_MODULO"),
    Slot::new("__ipow__", "nb_inplace_power", Ternary).opcode("INPLACE_POWER"),
    Slot::new("__ilshift__", "nb_inplace_lshift", Binary).opcode("INPLACE_LSHIFT"),
    Slot::new("__irshift__", "nb_inplace_rshift", Binary).opcode("INPLACE_RSHIFT"),
    Slot::new("__iand__", "nb_inplace_and", Binary).opcode("INPLACE_AND"),
    Slot::new("__ixor__", "nb_inplace_xor", Binary).opcode("INPLACE_XOR"),
    Slot::new("__ior__", "nb_inplace_or", Binary).opcode("INPLACE_OR"),
    Slot::new("__ifloordiv__", "nb_inplace_floor_divide", Binary)
        .opcode("INPLACE_FLOOR_DIVIDE"),
    Slot::new("__itruediv__", "nb_inplace_true_divide", Binary)
        .opcode("INPLACE_TRUE_DIVIDE"),
    // used whenever an object acts as a sequence index (a[i])
    Slot::new("__index__", "nb_index", Unary),
    // mapping
    // __getitem__ tries mp_subscript before sq_item; __len__ tries sq_length before
    // mp_length. __delitem__ shares the __setitem__ slot.
    Slot::new("__getitem__", "mp_subscript", Binary).opcode("BINARY_SUBSCR"),
    Slot::new("__delitem__", "mp_ass_subscript", ObjObjArgProc).index(0),
    Slot::new("__setitem__", "mp_ass_subscript", ObjObjArgProc).index(1),
    Slot::new("__len__", "mp_length", Len),
    // sequence
    Slot::new("__contains__", "sq_contains", ObjObjProc),
    // Duplicates of number and mapping slots. ceval tries both, so the opcode shows up
    // once per slot (BINARY_SUBSCR tries mp_subscript and sq_item).
    Slot::new("__add__", "sq_concat", Binary).opcode("BINARY_ADD"),
    Slot::new("__mul__", "sq_repeat", IndexArgFunc).opcode("BINARY_MULTIPLY"),
    Slot::new("__iadd__", "sq_inplace_concat", Binary).opcode("INPLACE_ADD"),
    Slot::new("__imul__", "sq_inplace_repeat", IndexArgFunc).opcode("INPLACE_MUL"),
    Slot::new("__getitem__", "sq_item", SqItem).opcode("BINARY_SUBSCR"),
    Slot::new("__setitem__", "sq_ass_slice", SqAssItem),
    Slot::new("__delitem__", "sq_ass_item", SqDelItem),
    // slices reach mp_subscript as explicit slice objects
    Slot::new("__getslice__", "sq_slice", SqSlice),
    Slot::new("__setslice__", "sq_ass_slice", SsizeSsizeObjArg),
    Slot::new("__delslice__", "sq_ass_slice", DelSlice),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_record() {
        assert_eq!(SLOTS.len(), 93);
        assert_eq!(SLOTS[0].python_name, "__new__");
        assert_eq!(SLOTS[SLOTS.len() - 1].python_name, "__delslice__");
    }

    #[test]
    fn builder_defaults() {
        let slot = Slot::new("__abs__", "nb_absolute", FunctionType::Unary);
        assert_eq!(slot.index, None);
        assert_eq!(slot.opcode, None);
        assert_eq!(slot.python_version, PythonVersionTag::Any);
        assert_eq!(slot.protocol(), Some(SlotProtocol::Number));
    }

    #[test]
    fn opcode_key_strips_binary_prefix_only() {
        let add = Slot::new("__add__", "nb_add", FunctionType::BinaryNb).opcode("BINARY_ADD");
        let iadd = Slot::new("__iadd__", "nb_inplace_add", FunctionType::Binary)
            .opcode("INPLACE_ADD");
        let neg = Slot::new("__neg__", "nb_negative", FunctionType::Unary)
            .opcode("UNARY_NEGATIVE");
        assert_eq!(add.opcode_key(), Some("ADD"));
        assert_eq!(iadd.opcode_key(), Some("INPLACE_ADD"));
        assert_eq!(neg.opcode_key(), Some("UNARY_NEGATIVE"));
        assert_eq!(
            Slot::new("__abs__", "nb_absolute", FunctionType::Unary).opcode_key(),
            None
        );
    }

    #[test]
    fn protocol_from_prefix() {
        assert_eq!(SlotProtocol::from_c_name("tp_iter"), Some(SlotProtocol::TypeObject));
        assert_eq!(SlotProtocol::from_c_name("sq_item"), Some(SlotProtocol::Sequence));
        assert_eq!(SlotProtocol::from_c_name("mp_length"), Some(SlotProtocol::Mapping));
        assert_eq!(SlotProtocol::from_c_name("bf_getbuffer"), None);
    }

    #[test]
    fn function_type_names() {
        for ty in FunctionType::ALL {
            assert_eq!(ty.as_str().parse::<FunctionType>().unwrap(), ty);
        }
        assert_eq!(
            "binaryfunc".parse::<FunctionType>().unwrap_err().to_string(),
            "unknown slot function type: binaryfunc"
        );
    }

    #[test]
    fn reflected_only_for_binary_number_slots() {
        let radd = SLOTS.iter().find(|s| s.python_name == "__radd__").unwrap();
        assert!(radd.is_reflected());
        let setitem = SLOTS
            .iter()
            .find(|s| s.python_name == "__setitem__")
            .unwrap();
        assert_eq!(setitem.index, Some(1));
        assert!(!setitem.is_reflected());
    }
}
