//! Electrum-protocol script-hash derivation.
//!
//! Electrum servers key subscriptions and history queries by the SHA-256
//! of an address's locking script, rendered byte-reversed. Only the digest
//! is implemented here; the wire protocol lives with the caller.

use sha2::{Digest, Sha256};

use crate::address::LockingScriptBuilder;
use crate::error::UtxoError;
use crate::network::UtxoNetworkParams;

#[derive(Debug, Clone)]
pub struct ElectrumScriptHashConverter {
    builder: LockingScriptBuilder,
}

impl ElectrumScriptHashConverter {
    pub fn new(params: UtxoNetworkParams) -> Self {
        Self {
            builder: LockingScriptBuilder::new(params),
        }
    }

    /// `hex_upper(reverse(sha256(locking_script)))` for an address.
    ///
    /// Deterministic; fails only by propagating locking-script errors.
    pub fn script_hash(&self, address: &str) -> Result<String, UtxoError> {
        let script = self.builder.locking_script(address)?;
        let mut digest = Sha256::digest(&script.data).to_vec();
        digest.reverse();
        Ok(hex::encode_upper(digest))
    }
}
