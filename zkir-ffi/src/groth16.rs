//! Groth16 handle surface.
//!
//! Every call resolves its handles first (cloning `Arc`s out of the
//! registries), releases the locks, then runs the engine. Failures map to
//! the fixed codes of [`crate::status`]; registry state is untouched by a
//! failed call.

use zkir_core::{Curve, Groth16Prover, Program, PublicWitness, Witness};

use crate::object::Artifact;
use crate::status::{self, pack_pair, pack_payload, pack_status};
use crate::{Prover, Toolkit};

impl Toolkit {
    /// Creates a Groth16 prover bound to `curve`. Returns 0 on an
    /// unsupported curve id.
    pub fn groth16_create(&self, curve: u64) -> u64 {
        match Curve::from_id(curve) {
            Ok(curve) => self
                .provers
                .insert(Prover::Groth16(Groth16Prover::new(curve))),
            Err(_) => 0,
        }
    }

    /// Parses and compiles a circuit document; returns the compiled-circuit
    /// object id.
    pub fn groth16_compile(&self, curve: u64, circuit_json: &[u8]) -> i64 {
        let curve = match Curve::from_id(curve) {
            Ok(curve) => curve,
            Err(e) => return status::code(&e),
        };
        let program = match Program::from_json(circuit_json) {
            Ok(program) => program,
            Err(e) => return status::code(&e),
        };
        match Groth16Prover::new(curve).compile(&program) {
            Ok(circuit) => self.insert_object(Artifact::Groth16Circuit(circuit)),
            Err(e) => status::code(&e),
        }
    }

    /// Runs trusted setup; the reply carries the proving-key and
    /// verifying-key ids.
    pub fn groth16_setup(&self, prover_id: u64, circuit_id: i64) -> [u8; 16] {
        let Some(prover) = self.provers.get(prover_id) else {
            return pack_pair(status::PROVER_NOT_FOUND, 0);
        };
        let Prover::Groth16(prover) = prover.as_ref() else {
            return pack_pair(status::CAST_ERROR, 0);
        };
        let Some(artifact) = self.object(circuit_id) else {
            return pack_pair(status::OBJECT_NOT_FOUND, 0);
        };
        let Artifact::Groth16Circuit(circuit) = artifact.as_ref() else {
            return pack_pair(status::CAST_ERROR, 0);
        };

        match prover.setup(circuit) {
            Ok((pk, vk)) => {
                let pk_id = self.insert_object(Artifact::Groth16ProvingKey(pk));
                let vk_id = self.insert_object(Artifact::Groth16VerifyingKey(vk));
                tracing::debug!(pk_id, vk_id, "groth16 setup registered keys");
                pack_pair(pk_id, vk_id)
            }
            Err(e) => pack_pair(status::code(&e), 0),
        }
    }

    /// Proves a witness document; the reply carries the raw proof bytes.
    pub fn groth16_prove(
        &self,
        prover_id: u64,
        circuit_id: i64,
        pk_id: i64,
        witness_json: &[u8],
    ) -> Vec<u8> {
        let Some(prover) = self.provers.get(prover_id) else {
            return pack_status(status::PROVER_NOT_FOUND);
        };
        let Prover::Groth16(prover) = prover.as_ref() else {
            return pack_status(status::CAST_ERROR);
        };
        let Some(circuit) = self.object(circuit_id) else {
            return pack_status(status::OBJECT_NOT_FOUND);
        };
        let Artifact::Groth16Circuit(circuit) = circuit.as_ref() else {
            return pack_status(status::CAST_ERROR);
        };
        let Some(pk) = self.object(pk_id) else {
            return pack_status(status::OBJECT_NOT_FOUND);
        };
        let Artifact::Groth16ProvingKey(pk) = pk.as_ref() else {
            return pack_status(status::CAST_ERROR);
        };
        let witness = match Witness::from_json(witness_json) {
            Ok(witness) => witness,
            Err(e) => return pack_status(status::code(&e)),
        };

        match prover.prove(circuit, pk, &witness) {
            Ok(proof) => pack_payload(&proof),
            Err(e) => pack_status(status::code(&e)),
        }
    }

    /// Verifies raw proof bytes against a public-witness document.
    pub fn groth16_verify(
        &self,
        prover_id: u64,
        vk_id: i64,
        proof: &[u8],
        public_witness_json: &[u8],
    ) -> i64 {
        let Some(prover) = self.provers.get(prover_id) else {
            return status::PROVER_NOT_FOUND;
        };
        let Prover::Groth16(prover) = prover.as_ref() else {
            return status::CAST_ERROR;
        };
        let Some(vk) = self.object(vk_id) else {
            return status::OBJECT_NOT_FOUND;
        };
        let Artifact::Groth16VerifyingKey(vk) = vk.as_ref() else {
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
    pub fn groth16_remove(&self, prover_id: u64) {
        self.provers.remove(prover_id);
    }
}
