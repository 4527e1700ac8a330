//! Long-lived artifacts and their byte codecs.
//!
//! Keys and proofs are scheme- and curve-specific: each wrapper is a closed
//! sum over the supported curves so a single registry can hold artifacts for
//! any of them while byte layouts stay typed. Serialization is the crypto
//! library's uncompressed canonical form; the byte stream itself carries no
//! curve tag, so the curve must be supplied again when decoding (decoding
//! with the wrong curve is rejected or garbage, never silently accepted).

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::ir::Program;
use crate::solidity;

type G16ProvingKey<E> = ark_groth16::ProvingKey<E>;
type G16VerifyingKey<E> = ark_groth16::VerifyingKey<E>;
type PlkProvingKey<E> = jf_plonk::proof_system::structs::ProvingKey<E>;
type PlkVerifyingKey<E> = jf_plonk::proof_system::structs::VerifyingKey<E>;
type PlkProof<E> = jf_plonk::proof_system::structs::Proof<E>;

macro_rules! curve_tagged {
    ($(#[$meta:meta])* $name:ident wraps $inner:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub enum $name {
            Bn254($inner<ark_bn254::Bn254>),
            Bls12_381($inner<ark_bls12_381::Bls12_381>),
            Bls12_377($inner<ark_bls12_377::Bls12_377>),
            Bw6_761($inner<ark_bw6_761::BW6_761>),
        }

        impl $name {
            pub fn curve(&self) -> Curve {
                match self {
                    Self::Bn254(_) => Curve::Bn254,
                    Self::Bls12_381(_) => Curve::Bls12_381,
                    Self::Bls12_377(_) => Curve::Bls12_377,
                    Self::Bw6_761(_) => Curve::Bw6_761,
                }
            }

            /// Uncompressed canonical bytes.
            pub fn to_bytes(&self) -> Result<Vec<u8>> {
                let mut bytes = Vec::new();
                match self {
                    Self::Bn254(v) => v.serialize_uncompressed(&mut bytes),
                    Self::Bls12_381(v) => v.serialize_uncompressed(&mut bytes),
                    Self::Bls12_377(v) => v.serialize_uncompressed(&mut bytes),
                    Self::Bw6_761(v) => v.serialize_uncompressed(&mut bytes),
                }
                .map_err(|e| Error::Serialize(e.to_string()))?;
                Ok(bytes)
            }

            /// Decodes bytes previously produced by [`Self::to_bytes`] for
            /// the given curve.
            pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
                let artifact = match curve {
                    Curve::Bn254 => {
                        Self::Bn254($inner::deserialize_uncompressed(bytes)
                            .map_err(|e| Error::Deserialize(e.to_string()))?)
                    }
                    Curve::Bls12_381 => {
                        Self::Bls12_381($inner::deserialize_uncompressed(bytes)
                            .map_err(|e| Error::Deserialize(e.to_string()))?)
                    }
                    Curve::Bls12_377 => {
                        Self::Bls12_377($inner::deserialize_uncompressed(bytes)
                            .map_err(|e| Error::Deserialize(e.to_string()))?)
                    }
                    Curve::Bw6_761 => {
                        Self::Bw6_761($inner::deserialize_uncompressed(bytes)
                            .map_err(|e| Error::Deserialize(e.to_string()))?)
                    }
                };
                Ok(artifact)
            }
        }
    };
}

curve_tagged! {
    /// A Groth16 proving key bound to its curve.
    Groth16ProvingKey wraps G16ProvingKey
}

curve_tagged! {
    /// A Groth16 verifying key bound to its curve.
    Groth16VerifyingKey wraps G16VerifyingKey
}

curve_tagged! {
    /// A PLONK proving key (including the prover's SRS slice).
    PlonkProvingKey wraps PlkProvingKey
}

curve_tagged! {
    /// A PLONK verifying key.
    PlonkVerifyingKey wraps PlkVerifyingKey
}

curve_tagged! {
    /// A PLONK proof. Unlike Groth16 proofs these stay registered objects;
    /// only handles cross the foreign boundary.
    PlonkProof wraps PlkProof
}

impl Groth16VerifyingKey {
    /// Renders an on-chain verifier contract for this key. Only BN254 has
    /// EVM pairing precompiles; other curves are rejected.
    pub fn export_solidity(&self) -> Result<Vec<u8>> {
        match self {
            Self::Bn254(vk) => Ok(solidity::verifier_contract(vk).into_bytes()),
            other => Err(Error::SolidityExport(format!(
                "no EVM pairing precompiles for {}",
                other.curve()
            ))),
        }
    }
}

/// A validated program bound to the curve it was compiled against.
///
/// Constraint synthesis is a deterministic replay of the operation list, so
/// the artifact stores the program itself rather than a backend-specific
/// matrix dump; setup and prove re-synthesize on demand and always obtain
/// the same system.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCircuit {
    curve: Curve,
    program: Program,
}

impl CompiledCircuit {
    pub(crate) fn new(curve: Curve, program: Program) -> Self {
        Self { curve, program }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Canonical bytes of the underlying program. Byte-for-byte identical
    /// across runs for the same circuit.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.program
            .serialize_uncompressed(&mut bytes)
            .map_err(|e| Error::Serialize(e.to_string()))?;
        Ok(bytes)
    }

    /// Rebuilds a compiled circuit from its canonical bytes, re-validating
    /// the program and binding it to `curve`.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self> {
        let program = Program::deserialize_uncompressed(bytes)
            .map_err(|e| Error::Deserialize(e.to_string()))?;
        program.validate()?;
        Ok(Self { curve, program })
    }
}
