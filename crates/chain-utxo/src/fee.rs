//! Virtual-size fee model shared by coin selection.
//!
//! Witness inputs cost fewer virtual bytes than legacy inputs, so the fee
//! is recomputed from the concrete script types of the inputs and outputs
//! under consideration rather than a flat per-input constant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::script::ScriptType;

/// Fixed transaction overhead in vbytes: version + locktime + segwit
/// marker/flag + count prefixes.
pub const TX_OVERHEAD_VBYTES: u64 = 11;

/// Fee-rate tiers supplied by the external fee oracle, in satoshis per
/// virtual byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoFee {
    pub slow_satoshi_per_byte: Decimal,
    pub market_satoshi_per_byte: Decimal,
    pub priority_satoshi_per_byte: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeTier {
    Slow,
    Market,
    Priority,
}

impl UtxoFee {
    pub fn rate(&self, tier: FeeTier) -> Decimal {
        match tier {
            FeeTier::Slow => self.slow_satoshi_per_byte,
            FeeTier::Market => self.market_satoshi_per_byte,
            FeeTier::Priority => self.priority_satoshi_per_byte,
        }
    }
}

/// Estimated virtual size of one input spending the given script type.
pub fn input_vbytes(script_type: ScriptType) -> u64 {
    match script_type {
        // 36 outpoint + 1 script length + ~107 scriptSig + 4 sequence.
        ScriptType::P2pkh => 148,
        ScriptType::P2sh => 91,
        // schnorr signature + raw-key scriptSig, no witness discount.
        ScriptType::P2pk => 114,
        // 41 non-witness + ~107 witness bytes / 4.
        ScriptType::P2wpkh => 68,
        ScriptType::P2wsh => 104,
        ScriptType::P2tr => 58,
    }
}

/// Estimated virtual size of one output paying to the given script type.
pub fn output_vbytes(script_type: ScriptType) -> u64 {
    match script_type {
        ScriptType::P2pkh => 34,
        ScriptType::P2sh => 32,
        ScriptType::P2pk => 44,
        ScriptType::P2wpkh => 31,
        ScriptType::P2wsh | ScriptType::P2tr => 43,
    }
}

/// Estimated fee for a transaction with the given input and output script
/// types: `vsize * rate`. Callers round up to whole satoshis.
pub fn estimate_fee(
    input_types: &[ScriptType],
    output_types: &[ScriptType],
    rate_per_byte: Decimal,
) -> Decimal {
    let vsize = TX_OVERHEAD_VBYTES
        + input_types.iter().map(|t| input_vbytes(*t)).sum::<u64>()
        + output_types.iter().map(|t| output_vbytes(*t)).sum::<u64>();
    Decimal::from(vsize) * rate_per_byte
}
