//! Mappings derived from [`SLOTS`] and [`COMPARE_OPS`].
//!
//! `binary_operator_mapping` and `compare_function_mapping` are what a bytecode
//! interpreter needs to turn an operator opcode into a method lookup. They are rebuilt on
//! every call; [`SlotIndex`] is the cached alternative for repeated name lookups.
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::{
    compare::{CompareOp, COMPARE_OPS},
    errors::Result,
    slots::{FunctionType, Slot, SLOTS},
    version,
};

/// Maps operator opcodes to the Python method implementing them.
///
/// Keys are opcode names with a leading `BINARY_` removed, so `BINARY_ADD` becomes `ADD`
/// while `INPLACE_ADD` and `UNARY_NEGATIVE` are kept as they are. Slots without an
/// opcode are skipped.
pub fn binary_operator_mapping() -> IndexMap<&'static str, &'static str> {
    let mut mapping = IndexMap::new();
    for slot in SLOTS {
        let key = match slot.opcode_key() {
            Some(key) => key,
            None => continue,
        };
        if let Some(previous) = mapping.insert(key, slot.python_name) {
            log::trace!(
                "{} overrides {} for {} via {}",
                slot.python_name,
                previous,
                key,
                slot.c_name
            );
        }
    }
    log::debug!("built binary operator mapping with {} opcodes", mapping.len());
    mapping
}

/// Maps comparison indices to their rich comparison method.
pub fn compare_function_mapping() -> IndexMap<u8, &'static str> {
    let mapping: IndexMap<u8, &'static str> = COMPARE_OPS
        .iter()
        .filter_map(|op| op.magic.map(|magic| (op.index, magic)))
        .collect();
    log::debug!("built compare function mapping with {} entries", mapping.len());
    mapping
}

/// Every slot implementing `name`, in table order.
pub fn slots_for_python_name(name: &str) -> impl Iterator<Item = &'static Slot> + '_ {
    SLOTS.iter().filter(move |slot| slot.python_name == name)
}

/// Every Python method sharing the C slot `c_name`, in table order.
pub fn slots_for_c_name(c_name: &str) -> impl Iterator<Item = &'static Slot> + '_ {
    SLOTS.iter().filter(move |slot| slot.c_name == c_name)
}

/// Slots that exist in Python `major`.
pub fn slots_for_version(major: u8) -> impl Iterator<Item = &'static Slot> {
    SLOTS
        .iter()
        .filter(move |slot| slot.python_version.matches(major))
}

/// Slots for the version named by `PYSLOTS_PYTHON_VERSION`, or all of them when unset.
pub fn slots_for_target() -> Result<Vec<&'static Slot>> {
    Ok(match version::target_version()? {
        Some(target) => slots_for_version(target.major).collect(),
        None => SLOTS.iter().collect(),
    })
}

/// The other half of a binary number pair: `__radd__` for `__add__` and back.
pub fn reflected_method(name: &str) -> Option<&'static str> {
    let slot = slots_for_python_name(name)
        .find(|slot| slot.function_type == FunctionType::BinaryNb && slot.index.is_some())?;
    let other = match slot.index? {
        0 => 1,
        1 => 0,
        _ => return None,
    };
    slots_for_c_name(slot.c_name)
        .find(|partner| {
            partner.function_type == FunctionType::BinaryNb && partner.index == Some(other)
        })
        .map(|partner| partner.python_name)
}

pub fn compare_op_by_name(op: &str) -> Option<&'static CompareOp> {
    COMPARE_OPS.iter().find(|cmp| cmp.op == op)
}

/// Looks up a comparison by `COMPARE_OP` argument. Index 9 is shared by `IS_NOT` and
/// `EXC_MATCH`; the former is returned.
pub fn compare_op_by_index(index: u8) -> Option<&'static CompareOp> {
    COMPARE_OPS.iter().find(|cmp| cmp.index == index)
}

/// The slot table grouped by Python method name, built once per process.
#[derive(Debug)]
pub struct SlotIndex {
    by_python_name: IndexMap<&'static str, Vec<&'static Slot>>,
}

static SLOT_INDEX: Lazy<SlotIndex> = Lazy::new(SlotIndex::build);

impl SlotIndex {
    pub fn get() -> &'static SlotIndex {
        &SLOT_INDEX
    }

    fn build() -> Self {
        let mut by_python_name: IndexMap<&'static str, Vec<&'static Slot>> = IndexMap::new();
        for slot in SLOTS {
            by_python_name.entry(slot.python_name).or_default().push(slot);
        }
        log::debug!(
            "indexed {} slots under {} python names",
            SLOTS.len(),
            by_python_name.len()
        );
        SlotIndex { by_python_name }
    }

    /// Slots implementing `name`; empty when the method has no slot.
    pub fn lookup(&self, name: &str) -> &[&'static Slot] {
        self.by_python_name
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_python_name.contains_key(name)
    }

    /// Distinct method names, in order of first appearance in the table.
    pub fn python_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_python_name.keys().copied()
    }
}
