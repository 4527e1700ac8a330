//! Fixed negative status codes and reply packing for the foreign surface.
//!
//! Every internal error kind maps onto one stable negative integer; byte
//! replies are prefixed with an 8-byte big-endian status word (zero on
//! success), and two-id replies are a pair of big-endian words.

use zkir_core::Error;

pub const OK: i64 = 0;

pub const DESERIALIZE_ERROR: i64 = -10001;
pub const FILE_READ_ERROR: i64 = -10002;
pub const SERIALIZE_ERROR: i64 = -10003;
pub const FILE_WRITE_ERROR: i64 = -10004;
pub const CAST_ERROR: i64 = -10005;
pub const SOLIDITY_EXPORT_ERROR: i64 = -10006;

pub const CIRCUIT_PARSE_ERROR: i64 = -20001;
pub const COMPILE_ERROR: i64 = -20002;
pub const SETUP_ERROR: i64 = -20004;
pub const WITNESS_PARSE_ERROR: i64 = -20007;
pub const PROVE_ERROR: i64 = -20008;
pub const VERIFY_ERROR: i64 = -20010;
pub const PROVER_NOT_FOUND: i64 = -20011;
pub const OBJECT_NOT_FOUND: i64 = -20012;
pub const UNSUPPORTED_CURVE: i64 = -20015;

/// Nearest fixed code for an internal error.
pub fn code(err: &Error) -> i64 {
    match err {
        Error::CircuitParse(_) => CIRCUIT_PARSE_ERROR,
        Error::WitnessParse(_) => WITNESS_PARSE_ERROR,
        Error::InputArity { .. }
        | Error::OutputArity { .. }
        | Error::VarRef { .. }
        | Error::UnsupportedOpcode { .. }
        | Error::Constraint(_)
        | Error::Gate(_) => COMPILE_ERROR,
        Error::UnsupportedCurve(_) => UNSUPPORTED_CURVE,
        Error::CurveMismatch { .. } => CAST_ERROR,
        Error::WitnessLength { .. } | Error::WitnessNotSatisfied | Error::Prove(_) => PROVE_ERROR,
        Error::Setup(_) => SETUP_ERROR,
        Error::Verify(_) | Error::VerifyFailed => VERIFY_ERROR,
        Error::Serialize(_) => SERIALIZE_ERROR,
        Error::Deserialize(_) => DESERIALIZE_ERROR,
        Error::SolidityExport(_) => SOLIDITY_EXPORT_ERROR,
    }
}

/// Code for failures inside a verify call: witness documents keep their
/// parse code, everything else reads as a verification failure.
pub fn verify_code(err: &Error) -> i64 {
    match err {
        Error::WitnessParse(_) => WITNESS_PARSE_ERROR,
        Error::CurveMismatch { .. } => CAST_ERROR,
        _ => VERIFY_ERROR,
    }
}

/// An 8-byte big-endian status word.
pub fn pack_status(status: i64) -> Vec<u8> {
    status.to_be_bytes().to_vec()
}

/// Status word 0 followed by the payload.
pub fn pack_payload(payload: &[u8]) -> Vec<u8> {
    let mut reply = pack_status(OK);
    reply.extend_from_slice(payload);
    reply
}

/// Two big-endian words. On success both carry ids; on failure the first
/// carries the negative code and the second is zero.
pub fn pack_pair(first: i64, second: i64) -> [u8; 16] {
    let mut reply = [0u8; 16];
    reply[..8].copy_from_slice(&first.to_be_bytes());
    reply[8..].copy_from_slice(&second.to_be_bytes());
    reply
}
