//! UTXO management and locking-script construction for the wallet SDK.
//!
//! Models transaction outputs across the Bitcoin-family networks the
//! wallet supports, classifies destination addresses into the five
//! canonical script types, runs greedy coin selection under a fee-rate
//! target, and derives the Electrum-protocol script hash. Signing,
//! broadcast, and UTXO fetching live with external collaborators; this
//! crate is pure, synchronous value transformation.

pub mod address;
pub mod base58;
pub mod bech32;
pub mod electrum;
pub mod error;
pub mod fee;
pub mod network;
pub mod script;
pub mod taproot;
pub mod utxo;

pub use address::{DecodedAddress, LockingScriptBuilder};
pub use electrum::ElectrumScriptHashConverter;
pub use error::UtxoError;
pub use fee::{FeeTier, UtxoFee};
pub use network::{Network, SignHashType, UtxoNetworkParams};
pub use script::{LockingScript, ScriptType};
pub use taproot::{TaprootAddress, TaprootLockingScriptBuilder};
pub use utxo::{
    DefaultPolicy, KaspaPolicy, NetworkPolicy, ScriptUnspentOutput, SpendPlan, UnspentOutput,
    UnspentOutputManager,
};
