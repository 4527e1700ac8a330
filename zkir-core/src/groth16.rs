//! Groth16 over the R1CS lowering of a program.
//!
//! The prover instance is little more than a curve binding; every operation
//! dispatches to a generic body over the arkworks pairing engine. Setup is
//! circuit-specific and uses developer-grade randomness; production
//! deployments need a proper ceremony.

use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_groth16::Groth16;
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef, SynthesisError, SynthesisMode,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::thread_rng;

use crate::artifact::{CompiledCircuit, Groth16ProvingKey, Groth16VerifyingKey};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::ir::Program;
use crate::synth::r1cs::R1csBuilder;
use crate::synth::synthesize;
use crate::witness::{PublicWitness, Witness};

/// A Groth16 prover bound to one curve.
#[derive(Debug, Clone, Copy)]
pub struct Groth16Prover {
    curve: Curve,
}

/// A program plus an optional witness assignment, in the shape the arkworks
/// backend consumes.
#[derive(Clone)]
struct ProgramInstance<F: PrimeField> {
    program: Program,
    publics: Option<Vec<F>>,
    privates: Option<Vec<F>>,
}

impl<F: PrimeField> ConstraintSynthesizer<F> for ProgramInstance<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> std::result::Result<(), SynthesisError> {
        let mut builder = R1csBuilder::new(cs);
        synthesize(
            &self.program,
            self.publics.as_deref(),
            self.privates.as_deref(),
            &mut builder,
        )
        .map_err(|e| match e {
            Error::Constraint(inner) => inner,
            // validation runs before synthesis, so nothing else can surface
            _ => SynthesisError::Unsatisfiable,
        })
    }
}

impl Groth16Prover {
    pub fn new(curve: Curve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Validates the program and lowers it once (structure only) so arity,
    /// reference, and opcode errors surface at compile time.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn compile(&self, program: &Program) -> Result<CompiledCircuit> {
        program.validate()?;
        match self.curve {
            Curve::Bn254 => dry_run::<ark_bn254::Bn254>(program),
            Curve::Bls12_381 => dry_run::<ark_bls12_381::Bls12_381>(program),
            Curve::Bls12_377 => dry_run::<ark_bls12_377::Bls12_377>(program),
            Curve::Bw6_761 => dry_run::<ark_bw6_761::BW6_761>(program),
        }?;
        Ok(CompiledCircuit::new(self.curve, program.clone()))
    }

    /// Circuit-specific trusted setup.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn setup(
        &self,
        circuit: &CompiledCircuit,
    ) -> Result<(Groth16ProvingKey, Groth16VerifyingKey)> {
        self.check_curve(circuit.curve())?;
        Ok(match self.curve {
            Curve::Bn254 => {
                let (pk, vk) = setup_impl::<ark_bn254::Bn254>(circuit.program())?;
                (Groth16ProvingKey::Bn254(pk), Groth16VerifyingKey::Bn254(vk))
            }
            Curve::Bls12_381 => {
                let (pk, vk) = setup_impl::<ark_bls12_381::Bls12_381>(circuit.program())?;
                (
                    Groth16ProvingKey::Bls12_381(pk),
                    Groth16VerifyingKey::Bls12_381(vk),
                )
            }
            Curve::Bls12_377 => {
                let (pk, vk) = setup_impl::<ark_bls12_377::Bls12_377>(circuit.program())?;
                (
                    Groth16ProvingKey::Bls12_377(pk),
                    Groth16VerifyingKey::Bls12_377(vk),
                )
            }
            Curve::Bw6_761 => {
                let (pk, vk) = setup_impl::<ark_bw6_761::BW6_761>(circuit.program())?;
                (
                    Groth16ProvingKey::Bw6_761(pk),
                    Groth16VerifyingKey::Bw6_761(vk),
                )
            }
        })
    }

    /// Produces a proof in uncompressed canonical bytes. Fails with
    /// [`Error::WitnessNotSatisfied`] before touching the backend when the
    /// assignment violates a constraint.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn prove(
        &self,
        circuit: &CompiledCircuit,
        pk: &Groth16ProvingKey,
        witness: &Witness,
    ) -> Result<Vec<u8>> {
        self.check_curve(circuit.curve())?;
        match (self.curve, pk) {
            (Curve::Bn254, Groth16ProvingKey::Bn254(pk)) => {
                prove_impl::<ark_bn254::Bn254>(circuit.program(), pk, witness)
            }
            (Curve::Bls12_381, Groth16ProvingKey::Bls12_381(pk)) => {
                prove_impl::<ark_bls12_381::Bls12_381>(circuit.program(), pk, witness)
            }
            (Curve::Bls12_377, Groth16ProvingKey::Bls12_377(pk)) => {
                prove_impl::<ark_bls12_377::Bls12_377>(circuit.program(), pk, witness)
            }
            (Curve::Bw6_761, Groth16ProvingKey::Bw6_761(pk)) => {
                prove_impl::<ark_bw6_761::BW6_761>(circuit.program(), pk, witness)
            }
            (expected, pk) => Err(Error::CurveMismatch {
                expected,
                found: pk.curve(),
            }),
        }
    }

    /// Re-parses the proof bytes for the key's curve and runs the pairing
    /// check against the public witness.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn verify(
        &self,
        proof: &[u8],
        vk: &Groth16VerifyingKey,
        public: &PublicWitness,
    ) -> Result<()> {
        match (self.curve, vk) {
            (Curve::Bn254, Groth16VerifyingKey::Bn254(vk)) => {
                verify_impl::<ark_bn254::Bn254>(proof, vk, public)
            }
            (Curve::Bls12_381, Groth16VerifyingKey::Bls12_381(vk)) => {
                verify_impl::<ark_bls12_381::Bls12_381>(proof, vk, public)
            }
            (Curve::Bls12_377, Groth16VerifyingKey::Bls12_377(vk)) => {
                verify_impl::<ark_bls12_377::Bls12_377>(proof, vk, public)
            }
            (Curve::Bw6_761, Groth16VerifyingKey::Bw6_761(vk)) => {
                verify_impl::<ark_bw6_761::BW6_761>(proof, vk, public)
            }
            (expected, vk) => Err(Error::CurveMismatch {
                expected,
                found: vk.curve(),
            }),
        }
    }

    fn check_curve(&self, found: Curve) -> Result<()> {
        if found == self.curve {
            Ok(())
        } else {
            Err(Error::CurveMismatch {
                expected: self.curve,
                found,
            })
        }
    }
}

fn dry_run<E: Pairing>(program: &Program) -> Result<()> {
    let cs = ConstraintSystem::<E::ScalarField>::new_ref();
    cs.set_mode(SynthesisMode::Setup);
    let instance = ProgramInstance::<E::ScalarField> {
        program: program.clone(),
        publics: None,
        privates: None,
    };
    instance.generate_constraints(cs.clone())?;
    tracing::debug!(
        constraints = cs.num_constraints(),
        instance_variables = cs.num_instance_variables(),
        witness_variables = cs.num_witness_variables(),
        "lowered program to r1cs"
    );
    Ok(())
}

fn setup_impl<E: Pairing>(
    program: &Program,
) -> Result<(ark_groth16::ProvingKey<E>, ark_groth16::VerifyingKey<E>)> {
    let instance = ProgramInstance::<E::ScalarField> {
        program: program.clone(),
        publics: None,
        privates: None,
    };
    let mut rng = thread_rng();
    Groth16::<E>::circuit_specific_setup(instance, &mut rng)
        .map_err(|e| Error::Setup(e.to_string()))
}

fn bind_witness<F: PrimeField>(program: &Program, witness: &Witness) -> Result<ProgramInstance<F>> {
    if witness.public.len() as u64 != program.public_len {
        return Err(Error::WitnessLength {
            slot: "public",
            expected: program.public_len,
            got: witness.public.len(),
        });
    }
    if witness.private.len() as u64 != program.private_len {
        return Err(Error::WitnessLength {
            slot: "private",
            expected: program.private_len,
            got: witness.private.len(),
        });
    }
    Ok(ProgramInstance {
        program: program.clone(),
        publics: Some(witness.public_scalars()),
        privates: Some(witness.private_scalars()),
    })
}

fn prove_impl<E: Pairing>(
    program: &Program,
    pk: &ark_groth16::ProvingKey<E>,
    witness: &Witness,
) -> Result<Vec<u8>> {
    let instance = bind_witness::<E::ScalarField>(program, witness)?;

    // Synthesize once up front: an unsatisfied assignment must be reported
    // as such, not as an opaque backend failure or an invalid proof.
    let cs = ConstraintSystem::<E::ScalarField>::new_ref();
    instance
        .clone()
        .generate_constraints(cs.clone())
        .map_err(|e| Error::Prove(e.to_string()))?;
    if !cs.is_satisfied().map_err(|e| Error::Prove(e.to_string()))? {
        return Err(Error::WitnessNotSatisfied);
    }

    let mut rng = thread_rng();
    let proof =
        Groth16::<E>::prove(pk, instance, &mut rng).map_err(|e| Error::Prove(e.to_string()))?;

    let mut bytes = Vec::new();
    proof
        .serialize_uncompressed(&mut bytes)
        .map_err(|e| Error::Serialize(e.to_string()))?;
    tracing::debug!(proof_bytes = bytes.len(), "groth16 proof generated");
    Ok(bytes)
}

fn verify_impl<E: Pairing>(
    proof: &[u8],
    vk: &ark_groth16::VerifyingKey<E>,
    public: &PublicWitness,
) -> Result<()> {
    let proof = ark_groth16::Proof::<E>::deserialize_uncompressed(proof)
        .map_err(|e| Error::Deserialize(e.to_string()))?;
    let inputs: Vec<E::ScalarField> = public.scalars();
    if inputs.len() + 1 != vk.gamma_abc_g1.len() {
        return Err(Error::WitnessLength {
            slot: "public",
            expected: (vk.gamma_abc_g1.len() - 1) as u64,
            got: inputs.len(),
        });
    }
    let valid =
        Groth16::<E>::verify(vk, &inputs, &proof).map_err(|e| Error::Verify(e.to_string()))?;
    if valid {
        Ok(())
    } else {
        Err(Error::VerifyFailed)
    }
}
