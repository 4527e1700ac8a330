//! PLONK (TurboPlonk + KZG) over the gate-list lowering of a program.
//!
//! Setup sizes a KZG SRS to the finalized circuit and preprocesses it into
//! proving and verifying keys. The built-in SRS generation is explicitly
//! developer grade; [`setup_with_srs`] exists so a real ceremony artifact
//! can be injected instead. Proofs remain registered objects; only handles
//! cross the foreign boundary.

use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_std::rand::thread_rng;
use jf_plonk::proof_system::structs::UniversalSrs;
use jf_plonk::proof_system::{PlonkKzgSnark, UniversalSNARK};
use jf_plonk::transcript::StandardTranscript;
use jf_relation::{Arithmetization, Circuit, PlonkCircuit};

use crate::artifact::{CompiledCircuit, PlonkProof, PlonkProvingKey, PlonkVerifyingKey};
use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::ir::Program;
use crate::synth::scs::ScsBuilder;
use crate::synth::synthesize;
use crate::witness::{PublicWitness, Witness};

/// A PLONK prover bound to one curve.
#[derive(Debug, Clone, Copy)]
pub struct PlonkProver {
    curve: Curve,
}

impl PlonkProver {
    pub fn new(curve: Curve) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Validates the program and lays the gate list out once with dummy
    /// values, surfacing structural errors at compile time.
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

    /// Generates a developer-grade KZG SRS sized to the circuit and runs the
    /// PLONK preprocessing. Insecure for production; inject a ceremony SRS
    /// through [`setup_with_srs`] instead.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn setup(&self, circuit: &CompiledCircuit) -> Result<(PlonkProvingKey, PlonkVerifyingKey)> {
        self.check_curve(circuit.curve())?;
        Ok(match self.curve {
            Curve::Bn254 => {
                let (pk, vk) = setup_impl::<ark_bn254::Bn254>(circuit.program())?;
                (PlonkProvingKey::Bn254(pk), PlonkVerifyingKey::Bn254(vk))
            }
            Curve::Bls12_381 => {
                let (pk, vk) = setup_impl::<ark_bls12_381::Bls12_381>(circuit.program())?;
                (
                    PlonkProvingKey::Bls12_381(pk),
                    PlonkVerifyingKey::Bls12_381(vk),
                )
            }
            Curve::Bls12_377 => {
                let (pk, vk) = setup_impl::<ark_bls12_377::Bls12_377>(circuit.program())?;
                (
                    PlonkProvingKey::Bls12_377(pk),
                    PlonkVerifyingKey::Bls12_377(vk),
                )
            }
            Curve::Bw6_761 => {
                let (pk, vk) = setup_impl::<ark_bw6_761::BW6_761>(circuit.program())?;
                (PlonkProvingKey::Bw6_761(pk), PlonkVerifyingKey::Bw6_761(vk))
            }
        })
    }

    /// Produces a proof object. Fails with [`Error::WitnessNotSatisfied`]
    /// when the assignment violates the gate list.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn prove(
        &self,
        circuit: &CompiledCircuit,
        pk: &PlonkProvingKey,
        witness: &Witness,
    ) -> Result<PlonkProof> {
        self.check_curve(circuit.curve())?;
        match (self.curve, pk) {
            (Curve::Bn254, PlonkProvingKey::Bn254(pk)) => Ok(PlonkProof::Bn254(prove_impl::<
                ark_bn254::Bn254,
            >(
                circuit.program(), pk, witness
            )?)),
            (Curve::Bls12_381, PlonkProvingKey::Bls12_381(pk)) => Ok(PlonkProof::Bls12_381(
                prove_impl::<ark_bls12_381::Bls12_381>(circuit.program(), pk, witness)?,
            )),
            (Curve::Bls12_377, PlonkProvingKey::Bls12_377(pk)) => Ok(PlonkProof::Bls12_377(
                prove_impl::<ark_bls12_377::Bls12_377>(circuit.program(), pk, witness)?,
            )),
            (Curve::Bw6_761, PlonkProvingKey::Bw6_761(pk)) => Ok(PlonkProof::Bw6_761(
                prove_impl::<ark_bw6_761::BW6_761>(circuit.program(), pk, witness)?,
            )),
            (expected, pk) => Err(Error::CurveMismatch {
                expected,
                found: pk.curve(),
            }),
        }
    }

    /// Verifies a registered proof object against the public witness.
    #[tracing::instrument(skip_all, fields(curve = %self.curve))]
    pub fn verify(
        &self,
        proof: &PlonkProof,
        vk: &PlonkVerifyingKey,
        public: &PublicWitness,
    ) -> Result<()> {
        match (self.curve, vk, proof) {
            (Curve::Bn254, PlonkVerifyingKey::Bn254(vk), PlonkProof::Bn254(proof)) => {
                verify_impl::<ark_bn254::Bn254>(proof, vk, public)
            }
            (
                Curve::Bls12_381,
                PlonkVerifyingKey::Bls12_381(vk),
                PlonkProof::Bls12_381(proof),
            ) => verify_impl::<ark_bls12_381::Bls12_381>(proof, vk, public),
            (
                Curve::Bls12_377,
                PlonkVerifyingKey::Bls12_377(vk),
                PlonkProof::Bls12_377(proof),
            ) => verify_impl::<ark_bls12_377::Bls12_377>(proof, vk, public),
            (Curve::Bw6_761, PlonkVerifyingKey::Bw6_761(vk), PlonkProof::Bw6_761(proof)) => {
                verify_impl::<ark_bw6_761::BW6_761>(proof, vk, public)
            }
            (expected, vk, _) => Err(Error::CurveMismatch {
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

/// Preprocesses `program` against an externally supplied (ceremony) SRS.
pub fn setup_with_srs<E: Pairing>(
    program: &Program,
    srs: &UniversalSrs<E>,
) -> Result<(
    jf_plonk::proof_system::structs::ProvingKey<E>,
    jf_plonk::proof_system::structs::VerifyingKey<E>,
)> {
    program.validate()?;
    let circuit = build_circuit::<E::ScalarField>(program, None, None)?;
    PlonkKzgSnark::<E>::preprocess(srs, &circuit).map_err(|e| Error::Setup(e.to_string()))
}

fn build_circuit<F: PrimeField>(
    program: &Program,
    publics: Option<&[F]>,
    privates: Option<&[F]>,
) -> Result<PlonkCircuit<F>> {
    let mut builder = ScsBuilder::new();
    synthesize(program, publics, privates, &mut builder)?;
    let mut circuit = builder.into_circuit();
    circuit.finalize_for_arithmetization()?;
    Ok(circuit)
}

fn dry_run<E: Pairing>(program: &Program) -> Result<()> {
    let circuit = build_circuit::<E::ScalarField>(program, None, None)?;
    tracing::debug!(gates = circuit.num_gates(), "lowered program to gate list");
    Ok(())
}

fn setup_impl<E: Pairing>(
    program: &Program,
) -> Result<(
    jf_plonk::proof_system::structs::ProvingKey<E>,
    jf_plonk::proof_system::structs::VerifyingKey<E>,
)> {
    let circuit = build_circuit::<E::ScalarField>(program, None, None)?;
    let srs_size = circuit.srs_size()?;
    let mut rng = thread_rng();
    let srs = PlonkKzgSnark::<E>::universal_setup_for_testing(srs_size, &mut rng)
        .map_err(|e| Error::Setup(e.to_string()))?;
    tracing::debug!(srs_size, "developer-grade kzg srs generated");
    PlonkKzgSnark::<E>::preprocess(&srs, &circuit).map_err(|e| Error::Setup(e.to_string()))
}

fn prove_impl<E: Pairing>(
    program: &Program,
    pk: &jf_plonk::proof_system::structs::ProvingKey<E>,
    witness: &Witness,
) -> Result<jf_plonk::proof_system::structs::Proof<E>> {
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

    let publics: Vec<E::ScalarField> = witness.public_scalars();
    let privates: Vec<E::ScalarField> = witness.private_scalars();
    let circuit = build_circuit(program, Some(publics.as_slice()), Some(privates.as_slice()))?;

    if circuit.check_circuit_satisfiability(&publics).is_err() {
        return Err(Error::WitnessNotSatisfied);
    }

    let mut rng = thread_rng();
    PlonkKzgSnark::<E>::prove::<_, _, StandardTranscript>(&mut rng, &circuit, pk, None)
        .map_err(|e| Error::Prove(e.to_string()))
}

fn verify_impl<E: Pairing>(
    proof: &jf_plonk::proof_system::structs::Proof<E>,
    vk: &jf_plonk::proof_system::structs::VerifyingKey<E>,
    public: &PublicWitness,
) -> Result<()> {
    let inputs: Vec<E::ScalarField> = public.scalars();
    PlonkKzgSnark::<E>::verify::<StandardTranscript>(vk, &inputs, proof, None)
        .map_err(|_| Error::VerifyFailed)
}
