//! The object registry surface: typed artifacts, kind tags, and the
//! serialize / deserialize / file / export calls dispatched by kind.

use std::path::Path;
use std::sync::Arc;

use zkir_core::{
    CompiledCircuit, Curve, Error, Groth16ProvingKey, Groth16VerifyingKey, PlonkProof,
    PlonkProvingKey, PlonkVerifyingKey,
};

use crate::status::{self, pack_payload, pack_status};
use crate::Toolkit;

/// Kind tags of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Groth16ProvingKey = 1,
    Groth16VerifyingKey = 2,
    Groth16Circuit = 3,
    PlonkProvingKey = 4,
    PlonkVerifyingKey = 5,
    PlonkCircuit = 6,
    /// Proof objects are created by `plonk_prove` and serialized on demand;
    /// the tag is reserved and never accepted by deserialize-by-kind.
    PlonkProof = 7,
}

impl Kind {
    pub fn from_id(id: u64) -> Option<Self> {
        Some(match id {
            1 => Kind::Groth16ProvingKey,
            2 => Kind::Groth16VerifyingKey,
            3 => Kind::Groth16Circuit,
            4 => Kind::PlonkProvingKey,
            5 => Kind::PlonkVerifyingKey,
            6 => Kind::PlonkCircuit,
            7 => Kind::PlonkProof,
            _ => return None,
        })
    }
}

/// Any long-lived object a handle can refer to. A closed sum: the registry
/// stays typed even though every kind shares one id space.
#[derive(Debug, Clone)]
pub enum Artifact {
    Groth16ProvingKey(Groth16ProvingKey),
    Groth16VerifyingKey(Groth16VerifyingKey),
    Groth16Circuit(CompiledCircuit),
    PlonkProvingKey(PlonkProvingKey),
    PlonkVerifyingKey(PlonkVerifyingKey),
    PlonkCircuit(CompiledCircuit),
    PlonkProof(PlonkProof),
}

impl Artifact {
    pub fn kind(&self) -> Kind {
        match self {
            Artifact::Groth16ProvingKey(_) => Kind::Groth16ProvingKey,
            Artifact::Groth16VerifyingKey(_) => Kind::Groth16VerifyingKey,
            Artifact::Groth16Circuit(_) => Kind::Groth16Circuit,
            Artifact::PlonkProvingKey(_) => Kind::PlonkProvingKey,
            Artifact::PlonkVerifyingKey(_) => Kind::PlonkVerifyingKey,
            Artifact::PlonkCircuit(_) => Kind::PlonkCircuit,
            Artifact::PlonkProof(_) => Kind::PlonkProof,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        match self {
            Artifact::Groth16ProvingKey(v) => v.to_bytes(),
            Artifact::Groth16VerifyingKey(v) => v.to_bytes(),
            Artifact::Groth16Circuit(v) | Artifact::PlonkCircuit(v) => v.to_bytes(),
            Artifact::PlonkProvingKey(v) => v.to_bytes(),
            Artifact::PlonkVerifyingKey(v) => v.to_bytes(),
            Artifact::PlonkProof(v) => v.to_bytes(),
        }
    }

    pub fn from_bytes(kind: Kind, curve: Curve, bytes: &[u8]) -> Result<Self, Error> {
        Ok(match kind {
            Kind::Groth16ProvingKey => {
                Artifact::Groth16ProvingKey(Groth16ProvingKey::from_bytes(curve, bytes)?)
            }
            Kind::Groth16VerifyingKey => {
                Artifact::Groth16VerifyingKey(Groth16VerifyingKey::from_bytes(curve, bytes)?)
            }
            Kind::Groth16Circuit => {
                Artifact::Groth16Circuit(CompiledCircuit::from_bytes(curve, bytes)?)
            }
            Kind::PlonkProvingKey => {
                Artifact::PlonkProvingKey(PlonkProvingKey::from_bytes(curve, bytes)?)
            }
            Kind::PlonkVerifyingKey => {
                Artifact::PlonkVerifyingKey(PlonkVerifyingKey::from_bytes(curve, bytes)?)
            }
            Kind::PlonkCircuit => Artifact::PlonkCircuit(CompiledCircuit::from_bytes(curve, bytes)?),
            Kind::PlonkProof => {
                return Err(Error::Deserialize(
                    "proof objects are created by prove, not deserialized by kind".into(),
                ))
            }
        })
    }
}

impl Toolkit {
    pub(crate) fn object(&self, id: i64) -> Option<Arc<Artifact>> {
        u64::try_from(id).ok().and_then(|id| self.objects.get(id))
    }

    pub(crate) fn insert_object(&self, artifact: Artifact) -> i64 {
        self.objects.insert(artifact) as i64
    }

    /// Canonical bytes of a registered artifact, behind a status prefix.
    pub fn object_serialize(&self, object_id: i64) -> Vec<u8> {
        let Some(artifact) = self.object(object_id) else {
            return pack_status(status::OBJECT_NOT_FOUND);
        };
        match artifact.to_bytes() {
            Ok(bytes) => pack_payload(&bytes),
            Err(e) => pack_status(status::code(&e)),
        }
    }

    /// Decodes `bytes` as `kind` for `curve` and registers the result.
    pub fn object_deserialize(&self, kind: u64, curve: u64, bytes: &[u8]) -> i64 {
        let Some(kind) = Kind::from_id(kind) else {
            tracing::warn!(kind, "deserialize called with unknown kind tag");
            return status::DESERIALIZE_ERROR;
        };
        let curve = match Curve::from_id(curve) {
            Ok(curve) => curve,
            Err(e) => return status::code(&e),
        };
        match Artifact::from_bytes(kind, curve, bytes) {
            Ok(artifact) => self.insert_object(artifact),
            Err(e) => status::code(&e),
        }
    }

    pub fn object_write_to_file(&self, object_id: i64, path: &str) -> i64 {
        let Some(artifact) = self.object(object_id) else {
            return status::OBJECT_NOT_FOUND;
        };
        let bytes = match artifact.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => return status::code(&e),
        };
        match std::fs::write(Path::new(path), bytes) {
            Ok(()) => status::OK,
            Err(_) => status::FILE_WRITE_ERROR,
        }
    }

    pub fn object_read_from_file(&self, kind: u64, curve: u64, path: &str) -> i64 {
        let bytes = match std::fs::read(Path::new(path)) {
            Ok(bytes) => bytes,
            Err(_) => return status::FILE_READ_ERROR,
        };
        self.object_deserialize(kind, curve, &bytes)
    }

    /// Renders the on-chain verifier of a Groth16 verifying key.
    pub fn object_export_solidity(&self, object_id: i64) -> Vec<u8> {
        let Some(artifact) = self.object(object_id) else {
            return pack_status(status::OBJECT_NOT_FOUND);
        };
        let Artifact::Groth16VerifyingKey(vk) = artifact.as_ref() else {
            return pack_status(status::CAST_ERROR);
        };
        match vk.export_solidity() {
            Ok(source) => pack_payload(&source),
            Err(e) => pack_status(status::code(&e)),
        }
    }

    /// Idempotent.
    pub fn object_remove(&self, object_id: i64) {
        if let Ok(id) = u64::try_from(object_id) {
            self.objects.remove(id);
        }
    }
}
