//! Witness documents: concrete slot assignments supplied at prove time.
//!
//! Witness values are transported as JSON arrays of field literals: either
//! a string (`0x` prefix selects hex, otherwise decimal) or a small unsigned
//! integer. Local slots never appear here; they are derived while the
//! operations replay. Lengths are not checked against any circuit at parse
//! time; the engines do that when a circuit is actually in hand.

use num_bigint::BigUint;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::scalar;

/// A full assignment: public then private values, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Witness {
    pub public: Vec<BigUint>,
    pub private: Vec<BigUint>,
}

/// The public-slot projection of a witness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicWitness {
    pub public: Vec<BigUint>,
}

/// One JSON witness element, before interpretation.
#[derive(Deserialize)]
#[serde(untagged)]
enum Literal {
    Int(u64),
    Text(String),
}

impl Literal {
    fn into_value(self, slot: &str, index: usize) -> Result<BigUint> {
        match self {
            Literal::Int(v) => Ok(BigUint::from(v)),
            Literal::Text(text) => scalar::parse_literal(&text).ok_or_else(|| {
                Error::WitnessParse(format!("{slot} value {index}: invalid literal `{text}`"))
            }),
        }
    }
}

fn convert(slot: &str, raw: Vec<Literal>) -> Result<Vec<BigUint>> {
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| v.into_value(slot, i))
        .collect()
}

impl Witness {
    /// Parses `{ "public": [...], "private": [...] }`; either key may be
    /// omitted when the circuit declares no slots of that kind.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            public: Vec<Literal>,
            #[serde(default)]
            private: Vec<Literal>,
        }
        let raw: Raw =
            serde_json::from_slice(bytes).map_err(|e| Error::WitnessParse(e.to_string()))?;
        Ok(Witness {
            public: convert("public", raw.public)?,
            private: convert("private", raw.private)?,
        })
    }

    /// Drops the private values.
    pub fn to_public(&self) -> PublicWitness {
        PublicWitness {
            public: self.public.clone(),
        }
    }

    pub(crate) fn public_scalars<F: ark_ff::PrimeField>(&self) -> Vec<F> {
        scalar::to_field_vec(&self.public)
    }

    pub(crate) fn private_scalars<F: ark_ff::PrimeField>(&self) -> Vec<F> {
        scalar::to_field_vec(&self.private)
    }
}

impl PublicWitness {
    /// Parses `{ "public": [...] }`.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            public: Vec<Literal>,
        }
        let raw: Raw =
            serde_json::from_slice(bytes).map_err(|e| Error::WitnessParse(e.to_string()))?;
        Ok(PublicWitness {
            public: convert("public", raw.public)?,
        })
    }

    pub(crate) fn scalars<F: ark_ff::PrimeField>(&self) -> Vec<F> {
        scalar::to_field_vec(&self.public)
    }
}
