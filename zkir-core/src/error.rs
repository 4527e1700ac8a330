use thiserror::Error;

use crate::curve::Curve;

/// Errors surfaced by circuit parsing, constraint synthesis, and the proving
/// backends. Every failure is reported; nothing is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed circuit description: {0}")]
    CircuitParse(String),

    #[error("malformed witness: {0}")]
    WitnessParse(String),

    #[error("op #{index} ({opcode}): takes {expected} input(s), got {got}")]
    InputArity {
        index: usize,
        opcode: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("op #{index} ({opcode}): produces {expected} output(s), got {got}")]
    OutputArity {
        index: usize,
        opcode: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("op #{index}: {detail}")]
    VarRef { index: usize, detail: String },

    #[error("op #{index}: opcode `{opcode}` is reserved and not supported")]
    UnsupportedOpcode { index: usize, opcode: &'static str },

    #[error("curve id {0} is not supported")]
    UnsupportedCurve(u64),

    #[error("artifact was built for {found}, expected {expected}")]
    CurveMismatch { expected: Curve, found: Curve },

    #[error("constraint synthesis failed: {0}")]
    Constraint(#[from] ark_relations::r1cs::SynthesisError),

    #[error("gate synthesis failed: {0}")]
    Gate(#[from] jf_relation::errors::CircuitError),

    #[error("witness carries {got} {slot} value(s), circuit declares {expected}")]
    WitnessLength {
        slot: &'static str,
        expected: u64,
        got: usize,
    },

    #[error("witness does not satisfy the circuit constraints")]
    WitnessNotSatisfied,

    #[error("setup failed: {0}")]
    Setup(String),

    #[error("proof generation failed: {0}")]
    Prove(String),

    #[error("proof verification failed: {0}")]
    Verify(String),

    #[error("proof verification failed")]
    VerifyFailed,

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("deserialization failed: {0}")]
    Deserialize(String),

    #[error("Solidity export failed: {0}")]
    SolidityExport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
