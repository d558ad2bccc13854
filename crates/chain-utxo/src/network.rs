use serde::{Deserialize, Serialize};

use crate::error::UtxoError;

/// Supported UTXO networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Bitcoin,
    Litecoin,
    Dogecoin,
    Dash,
    Kaspa,
    Ravencoin,
    Pepecoin,
    BitcoinCash,
}

impl Network {
    /// Parse a network from its configuration name.
    ///
    /// Network params are wired at wallet-manager assembly time, so an
    /// unknown name here is a deployment error rather than user input.
    pub fn from_name(name: &str) -> Result<Self, UtxoError> {
        match name {
            "bitcoin" => Ok(Network::Bitcoin),
            "litecoin" => Ok(Network::Litecoin),
            "dogecoin" => Ok(Network::Dogecoin),
            "dash" => Ok(Network::Dash),
            "kaspa" => Ok(Network::Kaspa),
            "ravencoin" => Ok(Network::Ravencoin),
            "pepecoin" => Ok(Network::Pepecoin),
            "bitcoin-cash" => Ok(Network::BitcoinCash),
            other => Err(UtxoError::UnsupportedNetwork(other.to_string())),
        }
    }

    /// Display name used in logs and errors.
    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Bitcoin => "Bitcoin",
            Network::Litecoin => "Litecoin",
            Network::Dogecoin => "Dogecoin",
            Network::Dash => "Dash",
            Network::Kaspa => "Kaspa",
            Network::Ravencoin => "Ravencoin",
            Network::Pepecoin => "Pepecoin",
            Network::BitcoinCash => "Bitcoin Cash",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Signature-hash flavor tagged onto spend plans for the external signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignHashType {
    /// SIGHASH_ALL as used by Bitcoin and its direct forks.
    BitcoinAll,
    /// SIGHASH_ALL | SIGHASH_FORKID as used by Bitcoin Cash.
    BitcoinCashAll,
}

impl SignHashType {
    /// The raw sighash byte the signer commits to.
    pub fn raw(self) -> u8 {
        match self {
            SignHashType::BitcoinAll => 0x01,
            SignHashType::BitcoinCashAll => 0x41,
        }
    }
}

/// Immutable per-network constants: address prefixes, dust rule, sighash
/// flavor. Constructed once at wallet-manager assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtxoNetworkParams {
    pub network: Network,
    /// Base58Check version byte for pay-to-pubkey-hash addresses.
    pub p2pkh_prefix: u8,
    /// Base58Check version byte for pay-to-script-hash addresses.
    pub p2sh_prefix: u8,
    /// Human-readable part for bech32/bech32m addresses, where the
    /// network has a witness address form.
    pub bech32_hrp: Option<&'static str>,
    /// Minimum change value in satoshis; change below it is folded into
    /// the fee instead of creating a sub-dust output.
    pub dust_relay_fee: u64,
    pub sign_hash_type: SignHashType,
}

impl UtxoNetworkParams {
    /// Look up the constant table for a network. Total over [`Network`].
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Bitcoin => Self {
                network,
                p2pkh_prefix: 0x00,
                p2sh_prefix: 0x05,
                bech32_hrp: Some("bc"),
                dust_relay_fee: 546,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::Litecoin => Self {
                network,
                p2pkh_prefix: 0x30,
                p2sh_prefix: 0x32,
                bech32_hrp: Some("ltc"),
                dust_relay_fee: 5_460,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::Dogecoin => Self {
                network,
                p2pkh_prefix: 0x1e,
                p2sh_prefix: 0x16,
                bech32_hrp: None,
                dust_relay_fee: 1_000_000,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::Dash => Self {
                network,
                p2pkh_prefix: 0x4c,
                p2sh_prefix: 0x10,
                bech32_hrp: None,
                dust_relay_fee: 546,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::Kaspa => Self {
                network,
                p2pkh_prefix: 0x00,
                p2sh_prefix: 0x08,
                bech32_hrp: Some("kaspa"),
                dust_relay_fee: 600,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::Ravencoin => Self {
                network,
                p2pkh_prefix: 0x3c,
                p2sh_prefix: 0x7a,
                bech32_hrp: None,
                dust_relay_fee: 546,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::Pepecoin => Self {
                network,
                p2pkh_prefix: 0x38,
                p2sh_prefix: 0x16,
                bech32_hrp: None,
                dust_relay_fee: 1_000_000,
                sign_hash_type: SignHashType::BitcoinAll,
            },
            Network::BitcoinCash => Self {
                network,
                p2pkh_prefix: 0x00,
                p2sh_prefix: 0x05,
                bech32_hrp: None,
                dust_relay_fee: 546,
                sign_hash_type: SignHashType::BitcoinCashAll,
            },
        }
    }

    /// Minimum value a change output must carry to be emitted at all.
    pub fn dust_threshold(&self) -> u64 {
        self.dust_relay_fee
    }
}
