//! Address classification and locking-script construction.
//!
//! Classification order is fixed: Base58Check against the network's P2PKH
//! and P2SH prefixes first, then Bech32/Bech32m against its HRP. The first
//! successful decode determines the script type; an address satisfying no
//! path fails loudly instead of falling back to a default type.

use crate::base58;
use crate::bech32;
use crate::error::UtxoError;
use crate::network::{Network, UtxoNetworkParams};
use crate::script::{opcodes, push_slice, witness_version_opcode, LockingScript, ScriptType};
use crate::taproot::TaprootLockingScriptBuilder;

/// Classification result for a destination address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub address: String,
    pub script_type: ScriptType,
    /// Hash160 for legacy types, witness program for segwit types, raw
    /// public key for P2PK.
    pub payload: Vec<u8>,
    pub witness_version: Option<u8>,
}

/// Builds a spendable-output script for a destination address and decodes
/// addresses back for validation.
#[derive(Debug, Clone)]
pub struct LockingScriptBuilder {
    params: UtxoNetworkParams,
    taproot: TaprootLockingScriptBuilder,
}

impl LockingScriptBuilder {
    pub fn new(params: UtxoNetworkParams) -> Self {
        Self {
            params,
            taproot: TaprootLockingScriptBuilder::new(params),
        }
    }

    pub fn params(&self) -> &UtxoNetworkParams {
        &self.params
    }

    /// Classify an address. Succeeds exactly when
    /// [`locking_script`](Self::locking_script) would succeed for the
    /// same input.
    pub fn decode(&self, address: &str) -> Result<DecodedAddress, UtxoError> {
        if let Ok((payload, version)) = base58::decode_check(address, None) {
            if payload.len() == 20 {
                if version == self.params.p2pkh_prefix {
                    return Ok(DecodedAddress {
                        address: address.to_string(),
                        script_type: ScriptType::P2pkh,
                        payload,
                        witness_version: None,
                    });
                }
                if version == self.params.p2sh_prefix {
                    return Ok(DecodedAddress {
                        address: address.to_string(),
                        script_type: ScriptType::P2sh,
                        payload,
                        witness_version: None,
                    });
                }
            }
        }

        if let Some(hrp) = self.params.bech32_hrp {
            if let Ok((version, program)) = bech32::decode(hrp, address) {
                if let Some(decoded) = self.classify_witness(address, version, program) {
                    return Ok(decoded);
                }
            }
        }

        Err(UtxoError::UnrecognizedAddressFormat(address.to_string()))
    }

    /// Build the canonical locking script for a destination address.
    pub fn locking_script(&self, address: &str) -> Result<LockingScript, UtxoError> {
        let decoded = self.decode(address)?;
        let script = match decoded.script_type {
            ScriptType::P2pkh => {
                let mut data = vec![opcodes::OP_DUP, opcodes::OP_HASH160];
                push_slice(&mut data, &decoded.payload);
                data.push(opcodes::OP_EQUALVERIFY);
                data.push(opcodes::OP_CHECKSIG);
                LockingScript::new(data, ScriptType::P2pkh)
            }
            ScriptType::P2sh => {
                let mut data = vec![opcodes::OP_HASH160];
                push_slice(&mut data, &decoded.payload);
                data.push(opcodes::OP_EQUAL);
                LockingScript::new(data, ScriptType::P2sh)
            }
            ScriptType::P2wpkh | ScriptType::P2wsh => {
                // Witness version is always present for these types.
                let version = decoded.witness_version.unwrap_or(0);
                let mut data = vec![witness_version_opcode(version)];
                push_slice(&mut data, &decoded.payload);
                LockingScript::new(data, decoded.script_type)
            }
            ScriptType::P2tr => self.taproot.locking_script(address)?,
            ScriptType::P2pk => {
                let mut data = Vec::with_capacity(decoded.payload.len() + 2);
                push_slice(&mut data, &decoded.payload);
                data.push(opcodes::OP_CHECKSIG);
                LockingScript::new(data, ScriptType::P2pk)
            }
        };
        Ok(script)
    }

    fn classify_witness(
        &self,
        address: &str,
        version: u8,
        program: Vec<u8>,
    ) -> Option<DecodedAddress> {
        // Kaspa carries a schnorr public key in its witness-program slot
        // and spends via raw-key scripts rather than segwit.
        if self.params.network == Network::Kaspa {
            if version == 0 && program.len() == 32 {
                return Some(DecodedAddress {
                    address: address.to_string(),
                    script_type: ScriptType::P2pk,
                    payload: program,
                    witness_version: Some(version),
                });
            }
            return None;
        }

        let script_type = match (version, program.len()) {
            (0, 20) => ScriptType::P2wpkh,
            (0, 32) => ScriptType::P2wsh,
            (1, 32) => ScriptType::P2tr,
            _ => return None,
        };
        Some(DecodedAddress {
            address: address.to_string(),
            script_type,
            payload: program,
            witness_version: Some(version),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(network: Network) -> LockingScriptBuilder {
        LockingScriptBuilder::new(UtxoNetworkParams::for_network(network))
    }

    #[test]
    fn dogecoin_p2pkh_fixture() {
        let script = builder(Network::Dogecoin)
            .locking_script("DR45C6m5aWgBn4QotLghcwDSAJyEL8uz4m")
            .unwrap();
        assert_eq!(script.script_type, ScriptType::P2pkh);
        assert_eq!(
            script.to_hex(),
            "76a914da6f4f9c8dcf80f33ed5d06c45c4fc5fedeb384888ac"
        );
    }

    #[test]
    fn dogecoin_p2sh_fixture() {
        let script = builder(Network::Dogecoin)
            .locking_script("9ypUW9wok6Q3djFEbLeUyXp7D6arVLeaA2")
            .unwrap();
        assert_eq!(script.script_type, ScriptType::P2sh);
        assert_eq!(
            script.to_hex(),
            "a91450fbea73f805b2524d2d38c3c8f72c898c44d02f87"
        );
    }

    #[test]
    fn bitcoin_p2wpkh_script() {
        let script = builder(Network::Bitcoin)
            .locking_script("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
            .unwrap();
        assert_eq!(script.script_type, ScriptType::P2wpkh);
        assert_eq!(
            script.to_hex(),
            "0014751e76e8199196d454941c45d1b3a323f1433bd6"
        );
    }

    #[test]
    fn bitcoin_p2wsh_script() {
        let script = builder(Network::Bitcoin)
            .locking_script("bc1qrp33g0q5c5txsp9arysrx4k6zdkfs4nce4xj0gdcccefvpysxf3qccfmv3")
            .unwrap();
        assert_eq!(script.script_type, ScriptType::P2wsh);
        assert_eq!(
            script.to_hex(),
            "00201863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262"
        );
    }

    #[test]
    fn bitcoin_p2tr_script() {
        let script = builder(Network::Bitcoin)
            .locking_script("bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0")
            .unwrap();
        assert_eq!(script.script_type, ScriptType::P2tr);
        assert_eq!(
            script.to_hex(),
            "512079be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn kaspa_p2pk_script() {
        let script = builder(Network::Kaspa)
            .locking_script("kaspa1q0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqxjcg5k")
            .unwrap();
        assert_eq!(script.script_type, ScriptType::P2pk);
        assert_eq!(
            script.to_hex(),
            "2079be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ac"
        );
    }

    #[test]
    fn foreign_network_address_is_unrecognized() {
        // A Bitcoin legacy address fed to a Dogecoin builder matches
        // neither prefix and no bech32 path exists.
        let err = builder(Network::Dogecoin)
            .decode("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa")
            .unwrap_err();
        assert!(matches!(err, UtxoError::UnrecognizedAddressFormat(_)));
    }

    #[test]
    fn double_checksum_failure_is_unrecognized_not_fallback() {
        let err = builder(Network::Bitcoin).decode("not-an-address").unwrap_err();
        assert!(matches!(err, UtxoError::UnrecognizedAddressFormat(_)));
    }

    #[test]
    fn decode_succeeds_iff_locking_script_succeeds() {
        let builder = builder(Network::Bitcoin);
        for address in [
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
            "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0",
            "DR45C6m5aWgBn4QotLghcwDSAJyEL8uz4m",
            "garbage",
            "",
        ] {
            assert_eq!(
                builder.decode(address).is_ok(),
                builder.locking_script(address).is_ok(),
                "decode/locking_script diverged for {address:?}"
            );
        }
    }

    #[test]
    fn locking_script_is_deterministic() {
        let builder = builder(Network::Bitcoin);
        let a = builder
            .locking_script("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
            .unwrap();
        let b = builder
            .locking_script("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4")
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decoded_payload_matches_script_hash() {
        let decoded = builder(Network::Dogecoin)
            .decode("DR45C6m5aWgBn4QotLghcwDSAJyEL8uz4m")
            .unwrap();
        assert_eq!(
            hex::encode(decoded.payload),
            "da6f4f9c8dcf80f33ed5d06c45c4fc5fedeb3848"
        );
        assert_eq!(decoded.witness_version, None);
    }
}
