use rust_decimal::Decimal;
use thiserror::Error;

/// UTXO engine operation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UtxoError {
    /// The address satisfied none of the supported decode paths.
    #[error("unrecognized address format: {0}")]
    UnrecognizedAddressFormat(String),

    #[error("base58 checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid base58 character at index {index}")]
    InvalidCharacter { index: usize },

    #[error("version byte mismatch: expected {expected:#04x}, found {found:#04x}")]
    VersionMismatch { expected: u8, found: u8 },

    #[error("invalid bech32 checksum")]
    InvalidChecksum,

    #[error("invalid human-readable part: expected {expected:?}, found {found:?}")]
    InvalidHrp { expected: String, found: String },

    #[error("invalid witness program length: {0} bytes")]
    InvalidWitnessProgramLength(usize),

    #[error("insufficient funds: short by {shortfall} satoshis")]
    InsufficientFunds { shortfall: Decimal },

    #[error("unsupported network: {0}")]
    UnsupportedNetwork(String),

    /// A target amount or fee rate that does not convert to whole satoshis.
    #[error("amount not representable in satoshis: {0}")]
    InvalidAmount(Decimal),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unrecognized_address() {
        let err = UtxoError::UnrecognizedAddressFormat("xyz".into());
        assert_eq!(err.to_string(), "unrecognized address format: xyz");
    }

    #[test]
    fn display_version_mismatch() {
        let err = UtxoError::VersionMismatch {
            expected: 0x1e,
            found: 0x00,
        };
        assert_eq!(
            err.to_string(),
            "version byte mismatch: expected 0x1e, found 0x00"
        );
    }

    #[test]
    fn display_invalid_character() {
        let err = UtxoError::InvalidCharacter { index: 7 };
        assert_eq!(err.to_string(), "invalid base58 character at index 7");
    }

    #[test]
    fn display_insufficient_funds() {
        let err = UtxoError::InsufficientFunds {
            shortfall: Decimal::from(1500u64),
        };
        assert_eq!(err.to_string(), "insufficient funds: short by 1500 satoshis");
    }

    #[test]
    fn display_witness_program_length() {
        let err = UtxoError::InvalidWitnessProgramLength(31);
        assert_eq!(err.to_string(), "invalid witness program length: 31 bytes");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(UtxoError::InvalidChecksum);
        assert!(err.to_string().contains("checksum"));
    }
}
