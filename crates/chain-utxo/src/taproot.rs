//! BIP341 witness-program construction and decoding for Taproot outputs.

use crate::bech32;
use crate::error::UtxoError;
use crate::network::UtxoNetworkParams;
use crate::script::{push_slice, witness_version_opcode, LockingScript, ScriptType};

/// A validated witness-v1 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaprootAddress {
    pub address: String,
    /// The 32-byte x-only output key.
    pub program: [u8; 32],
}

/// Specialization of the locking-script builder for witness-v1 outputs.
///
/// Validation-only callers (address validators) treat any error from
/// [`decode`](Self::decode) as "not a Taproot address".
#[derive(Debug, Clone)]
pub struct TaprootLockingScriptBuilder {
    params: UtxoNetworkParams,
}

impl TaprootLockingScriptBuilder {
    pub fn new(params: UtxoNetworkParams) -> Self {
        Self { params }
    }

    /// Decode and validate a Taproot address: HRP must match the network,
    /// witness version must be 1, program must be exactly 32 bytes.
    pub fn decode(&self, address: &str) -> Result<TaprootAddress, UtxoError> {
        let hrp = self
            .params
            .bech32_hrp
            .ok_or_else(|| UtxoError::UnrecognizedAddressFormat(address.to_string()))?;

        let (version, program) = bech32::decode(hrp, address)?;
        if version != 1 {
            return Err(UtxoError::VersionMismatch {
                expected: 1,
                found: version,
            });
        }

        let program: [u8; 32] = program
            .try_into()
            .map_err(|bad: Vec<u8>| UtxoError::InvalidWitnessProgramLength(bad.len()))?;

        Ok(TaprootAddress {
            address: address.to_string(),
            program,
        })
    }

    /// Build the `OP_1 <32-byte push>` output script for a Taproot address.
    pub fn locking_script(&self, address: &str) -> Result<LockingScript, UtxoError> {
        let decoded = self.decode(address)?;
        let mut data = vec![witness_version_opcode(1)];
        push_slice(&mut data, &decoded.program);
        Ok(LockingScript::new(data, ScriptType::P2tr))
    }
}
