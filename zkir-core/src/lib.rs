//! # zkir-core
//!
//! A zero-knowledge proof toolkit driven by declarative circuit
//! descriptions. Circuits arrive as JSON operation lists over public,
//! private, local, and constant field slots; the toolkit lowers them into
//! either an R1CS (Groth16, via arkworks) or a TurboPlonk gate list (PLONK
//! with KZG, via jellyfish) over a chosen pairing curve, then runs the usual
//! lifecycle: compile → setup → prove → verify.
//!
//! Lowering is a deterministic single-pass replay of the operation list:
//! the same circuit over the same curve always produces the same constraint
//! system, and every long-lived artifact has a canonical byte encoding
//! keyed by its curve.

pub mod artifact;
pub mod curve;
pub mod error;
pub mod groth16;
pub mod ir;
pub mod plonk;
mod scalar;
mod solidity;
mod synth;
pub mod witness;

pub use artifact::{
    CompiledCircuit, Groth16ProvingKey, Groth16VerifyingKey, PlonkProof, PlonkProvingKey,
    PlonkVerifyingKey,
};
pub use curve::Curve;
pub use error::{Error, Result};
pub use groth16::Groth16Prover;
pub use ir::Program;
pub use plonk::PlonkProver;
pub use witness::{PublicWitness, Witness};
