//! Base58Check codec used by legacy (P2PKH/P2SH) address forms.
//!
//! The double-SHA256 checksum handling is delegated to `bs58`'s `check`
//! feature; this module maps its failure modes onto the engine's error
//! taxonomy and handles expected-version enforcement.

use crate::error::UtxoError;

/// Encode `payload` with a leading version byte and a 4-byte checksum.
///
/// Deterministic; has no failure mode for valid byte input.
pub fn encode_check(payload: &[u8], version: u8) -> String {
    bs58::encode(payload)
        .with_check_version(version)
        .into_string()
}

/// Decode a Base58Check string into `(payload, version)`.
///
/// When `expected_version` is given, a decoded version byte that differs
/// fails with [`UtxoError::VersionMismatch`].
pub fn decode_check(address: &str, expected_version: Option<u8>) -> Result<(Vec<u8>, u8), UtxoError> {
    let raw = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(map_decode_error)?;

    // `with_check` strips the checksum but keeps the version byte in front.
    let (version, payload) = match raw.split_first() {
        Some((version, payload)) => (*version, payload.to_vec()),
        None => return Err(UtxoError::ChecksumMismatch),
    };

    if let Some(expected) = expected_version {
        if version != expected {
            return Err(UtxoError::VersionMismatch {
                expected,
                found: version,
            });
        }
    }

    Ok((payload, version))
}

fn map_decode_error(err: bs58::decode::Error) -> UtxoError {
    match err {
        bs58::decode::Error::InvalidCharacter { index, .. } => {
            UtxoError::InvalidCharacter { index }
        }
        bs58::decode::Error::NonAsciiCharacter { index } => UtxoError::InvalidCharacter { index },
        // Checksum failures, missing checksums, and anything bs58 adds later
        // all mean the string is not a well-formed Base58Check address.
        _ => UtxoError::ChecksumMismatch,
    }
}
