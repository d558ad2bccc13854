//! Bech32 / Bech32m codec for segregated-witness address forms.
//!
//! BIP173 (Bech32, witness v0) and BIP350 (Bech32m, witness v1+) checksum
//! selection is delegated to the `bech32` crate's segwit helpers; this
//! module adds the engine's HRP and program-length policy on top.

use ::bech32::primitives::decode::{SegwitHrpstring, SegwitHrpstringError};
use ::bech32::{segwit, Fe32, Hrp};

use crate::error::UtxoError;

/// Encode a witness program as a bech32 (v0) or bech32m (v1+) address.
pub fn encode(hrp: &str, witness_version: u8, program: &[u8]) -> Result<String, UtxoError> {
    if witness_version > 16 {
        return Err(UtxoError::UnrecognizedAddressFormat(format!(
            "witness version {witness_version} out of range"
        )));
    }
    validate_program_length(witness_version, program.len())?;

    let hrp = Hrp::parse(hrp)
        .map_err(|_| UtxoError::UnrecognizedAddressFormat(format!("malformed hrp {hrp:?}")))?;
    let version = Fe32::try_from(witness_version)
        .map_err(|_| UtxoError::UnrecognizedAddressFormat("bad witness version".into()))?;

    segwit::encode(hrp, version, program)
        .map_err(|_| UtxoError::InvalidWitnessProgramLength(program.len()))
}

/// Decode a segwit address into `(witness_version, program)`.
///
/// Fails with [`UtxoError::InvalidChecksum`] when the string does not carry
/// the checksum variant its witness version requires, and with
/// [`UtxoError::InvalidHrp`] when it belongs to a different network.
pub fn decode(expected_hrp: &str, address: &str) -> Result<(u8, Vec<u8>), UtxoError> {
    let parsed = SegwitHrpstring::new(address).map_err(|err| map_decode_error(address, err))?;
    let version = parsed.witness_version();
    let program: Vec<u8> = parsed.byte_iter().collect();

    let found = parsed.hrp().to_string();
    if !found.eq_ignore_ascii_case(expected_hrp) {
        return Err(UtxoError::InvalidHrp {
            expected: expected_hrp.to_string(),
            found,
        });
    }

    let version = version.to_u8();
    validate_program_length(version, program.len())?;
    Ok((version, program))
}

/// BIP141/BIP350 program-length policy: 2..=40 bytes generally, exactly
/// 20 or 32 for v0, exactly 32 for v1 (Taproot).
fn validate_program_length(witness_version: u8, len: usize) -> Result<(), UtxoError> {
    let valid = match witness_version {
        0 => len == 20 || len == 32,
        1 => len == 32,
        _ => (2..=40).contains(&len),
    };
    if valid {
        Ok(())
    } else {
        Err(UtxoError::InvalidWitnessProgramLength(len))
    }
}

fn map_decode_error(address: &str, err: SegwitHrpstringError) -> UtxoError {
    match err {
        SegwitHrpstringError::WitnessLength(_) => {
            UtxoError::InvalidWitnessProgramLength(estimated_program_len(address))
        }
        _ => UtxoError::InvalidChecksum,
    }
}

/// Program byte length implied by the data-part character count
/// (one version char and six checksum chars carry no program bits).
fn estimated_program_len(address: &str) -> usize {
    match address.rfind('1') {
        Some(sep) => {
            let data_chars = address.len().saturating_sub(sep + 1);
            data_chars.saturating_sub(7) * 5 / 8
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // BIP173 / BIP350 reference vectors.
    const P2WPKH: &str = "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4";
    const P2WPKH_PROGRAM: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";
    const P2TR: &str = "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqzk5jj0";
    const P2TR_PROGRAM: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn decode_v0_reference_vector() {
        let (version, program) = decode("bc", P2WPKH).unwrap();
        assert_eq!(version, 0);
        assert_eq!(hex::encode(program), P2WPKH_PROGRAM);
    }

    #[test]
    fn decode_v1_reference_vector() {
        let (version, program) = decode("bc", P2TR).unwrap();
        assert_eq!(version, 1);
        assert_eq!(hex::encode(program), P2TR_PROGRAM);
    }

    #[test]
    fn encode_round_trips_v0_and_v1() {
        let program = hex::decode(P2WPKH_PROGRAM).unwrap();
        assert_eq!(encode("bc", 0, &program).unwrap(), P2WPKH);

        let program = hex::decode(P2TR_PROGRAM).unwrap();
        assert_eq!(encode("bc", 1, &program).unwrap(), P2TR);
    }

    #[test]
    fn foreign_hrp_is_rejected() {
        let err = decode("ltc", P2WPKH).unwrap_err();
        assert_eq!(
            err,
            UtxoError::InvalidHrp {
                expected: "ltc".into(),
                found: "bc".into(),
            }
        );
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let mut corrupted = P2WPKH.to_string();
        corrupted.pop();
        corrupted.push('5');
        assert_eq!(decode("bc", &corrupted).unwrap_err(), UtxoError::InvalidChecksum);
    }

    #[test]
    fn v1_with_bech32_checksum_is_rejected() {
        // Taproot program re-encoded with the v0 (Bech32) checksum variant.
        assert_eq!(
            decode("bc", "bc1p0xlxvlhemja6c4dqv22uapctqupfhlxm9h8z3k2e72q4k9hcz7vqh2y7hd")
                .unwrap_err(),
            UtxoError::InvalidChecksum
        );
    }

    #[test]
    fn v0_program_must_be_20_or_32_bytes() {
        assert_eq!(
            encode("bc", 0, &[0u8; 24]).unwrap_err(),
            UtxoError::InvalidWitnessProgramLength(24)
        );
    }

    #[test]
    fn v1_program_must_be_32_bytes() {
        assert_eq!(
            encode("bc", 1, &[0u8; 20]).unwrap_err(),
            UtxoError::InvalidWitnessProgramLength(20)
        );
    }

    #[test]
    fn kaspa_style_hrp_round_trips() {
        let program = hex::decode(P2TR_PROGRAM).unwrap();
        let address = encode("kaspa", 0, &program).unwrap();
        assert!(address.starts_with("kaspa1"));
        let (version, decoded) = decode("kaspa", &address).unwrap();
        assert_eq!(version, 0);
        assert_eq!(decoded, program);
    }
}
