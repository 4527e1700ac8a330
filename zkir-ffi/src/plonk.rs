//! PLONK handle surface. Mirrors the Groth16 calls, except proofs stay in
//! the object registry: `plonk_prove` returns a proof id and `plonk_verify`
//! takes one.

use zkir_core::{Curve, PlonkProver, Program, PublicWitness, Witness};

use crate::object::Artifact;
use crate::status::{self, pack_pair};
use crate::{Prover, Toolkit};

impl Toolkit {
    /// Creates a PLONK prover bound to `curve`. Returns 0 on an unsupported
    /// curve id.
    pub fn plonk_create(&self, curve: u64) -> u64 {
        match Curve::from_id(curve) {
            Ok(curve) => self.provers.insert(Prover::Plonk(PlonkProver::new(curve))),
            Err(_) => 0,
        }
    }

    /// Parses and compiles a circuit document; returns the compiled-circuit
    /// object id.
    pub fn plonk_compile(&self, curve: u64, circuit_json: &[u8]) -> i64 {
        let curve = match Curve::from_id(curve) {
            Ok(curve) => curve,
            Err(e) => return status::code(&e),
        };
        let program = match Program::from_json(circuit_json) {
            Ok(program) => program,
            Err(e) => return status::code(&e),
        };
        match PlonkProver::new(curve).compile(&program) {
            Ok(circuit) => self.insert_object(Artifact::PlonkCircuit(circuit)),
            Err(e) => status::code(&e),
        }
    }

    /// Generates the developer-grade SRS, runs setup, and returns the
    /// proving-key and verifying-key ids.
    pub fn plonk_setup(&self, prover_id: u64, circuit_id: i64) -> [u8; 16] {
        let Some(prover) = self.provers.get(prover_id) else {
            return pack_pair(status::PROVER_NOT_FOUND, 0);
        };
        let Prover::Plonk(prover) = prover.as_ref() else {
            return pack_pair(status::CAST_ERROR, 0);
        };
        let Some(artifact) = self.object(circuit_id) else {
            return pack_pair(status::OBJECT_NOT_FOUND, 0);
        };
        let Artifact::PlonkCircuit(circuit) = artifact.as_ref() else {
            return pack_pair(status::CAST_ERROR, 0);
        };

        match prover.setup(circuit) {
            Ok((pk, vk)) => {
                let pk_id = self.insert_object(Artifact::PlonkProvingKey(pk));
                let vk_id = self.insert_object(Artifact::PlonkVerifyingKey(vk));
                tracing::debug!(pk_id, vk_id, "plonk setup registered keys");
                pack_pair(pk_id, vk_id)
            }
            Err(e) => pack_pair(status::code(&e), 0),
        }
    }

    /// Proves a witness document and registers the proof; returns its id.
    pub fn plonk_prove(
        &self,
        prover_id: u64,
        circuit_id: i64,
        pk_id: i64,
        witness_json: &[u8],
    ) -> i64 {
        let Some(prover) = self.provers.get(prover_id) else {
            return status::PROVER_NOT_FOUND;
        };
        let Prover::Plonk(prover) = prover.as_ref() else {
            return status::CAST_ERROR;
        };
        let Some(circuit) = self.object(circuit_id) else {
            return status::OBJECT_NOT_FOUND;
        };
        let Artifact::PlonkCircuit(circuit) = circuit.as_ref() else {
            return status::CAST_ERROR;
        };
        let Some(pk) = self.object(pk_id) else {
            return status::OBJECT_NOT_FOUND;
        };
        let Artifact::PlonkProvingKey(pk) = pk.as_ref() else {
            return status::CAST_ERROR;
        };
        let witness = match Witness::from_json(witness_json) {
            Ok(witness) => witness,
            Err(e) => return status::code(&e),
        };

        match prover.prove(circuit, pk, &witness) {
            Ok(proof) => self.insert_object(Artifact::PlonkProof(proof)),
            Err(e) => status::code(&e),
        }
    }

    /// Verifies a registered proof against a public-witness document.
    pub fn plonk_verify(
        &self,
        prover_id: u64,
        vk_id: i64,
        proof_id: i64,
        public_witness_json: &[u8],
    ) -> i64 {
        let Some(prover) = self.provers.get(prover_id) else {
            return status::PROVER_NOT_FOUND;
        };
        let Prover::Plonk(prover) = prover.as_ref() else {
            return status::CAST_ERROR;
        };
        let Some(vk) = self.object(vk_id) else {
            return status::OBJECT_NOT_FOUND;
        };
        let Artifact::PlonkVerifyingKey(vk) = vk.as_ref() else {
            return status::CAST_ERROR;
        };
        let Some(proof) = self.object(proof_id) else {
            return status::OBJECT_NOT_FOUND;
        };
        let Artifact::PlonkProof(proof) = proof.as_ref() else {
            return status::CAST_ERROR;
        };
        let public = match PublicWitness::from_json(public_witness_json) {
            Ok(public) => public,
            Err(e) => return status::code(&e),
        };

        match prover.verify(proof, vk, &public) {
            Ok(()) => status::OK,
            Err(e) => status::verify_code(&e),
        }
    }

    /// Drops a prover handle. Idempotent.
    pub fn plonk_remove(&self, prover_id: u64) {
        self.provers.remove(prover_id);
    }
}
