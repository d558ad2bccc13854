//! Output script classes and the opcode bytes used to assemble them.

use serde::{Deserialize, Serialize};

/// The subset of Bitcoin Script opcodes this engine emits.
pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_1: u8 = 0x51;
    pub const OP_16: u8 = 0x60;
    pub const OP_DUP: u8 = 0x76;
    pub const OP_EQUAL: u8 = 0x87;
    pub const OP_EQUALVERIFY: u8 = 0x88;
    pub const OP_HASH160: u8 = 0xa9;
    pub const OP_CHECKSIG: u8 = 0xac;
}

/// The canonical output classes the engine constructs and classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptType {
    /// Raw public key + OP_CHECKSIG (Kaspa).
    P2pk,
    P2pkh,
    P2sh,
    P2wpkh,
    P2wsh,
    P2tr,
}

impl ScriptType {
    /// Whether the script is a segregated-witness program.
    pub fn is_witness(self) -> bool {
        matches!(self, ScriptType::P2wpkh | ScriptType::P2wsh | ScriptType::P2tr)
    }
}

/// A spendable-output script paired with its classification.
///
/// Immutable value object; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockingScript {
    pub data: Vec<u8>,
    pub script_type: ScriptType,
}

impl LockingScript {
    pub fn new(data: Vec<u8>, script_type: ScriptType) -> Self {
        Self { data, script_type }
    }

    /// Script bytes as lowercase hex, for fixtures and logs.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

/// Append a minimally-encoded data push to `buf`.
///
/// Lengths below OP_PUSHDATA1 use the direct length byte; everything the
/// engine emits fits within a single-byte PUSHDATA1 length.
pub(crate) fn push_slice(buf: &mut Vec<u8>, data: &[u8]) {
    debug_assert!(data.len() <= u8::MAX as usize);
    if (data.len() as u8) < opcodes::OP_PUSHDATA1 {
        buf.push(data.len() as u8);
    } else {
        buf.push(opcodes::OP_PUSHDATA1);
        buf.push(data.len() as u8);
    }
    buf.extend_from_slice(data);
}

/// Opcode encoding a witness version byte (0 -> OP_0, 1..=16 -> OP_N).
pub(crate) fn witness_version_opcode(version: u8) -> u8 {
    debug_assert!(version <= 16);
    if version == 0 {
        opcodes::OP_0
    } else {
        opcodes::OP_1 + version - 1
    }
}
