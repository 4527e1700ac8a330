//! R1CS backend: wires are `FpVar`s over an arkworks constraint system.
//!
//! One code path serves both setup and proving: allocation closures only run
//! when the constraint system is in prove mode, so structure-only synthesis
//! simply passes `None` assignments.

use ark_ff::{BigInteger, PrimeField};
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use super::ConstraintBuilder;
use crate::error::Result;

pub(crate) struct R1csBuilder<F: PrimeField> {
    cs: ConstraintSystemRef<F>,
}

impl<F: PrimeField> R1csBuilder<F> {
    pub(crate) fn new(cs: ConstraintSystemRef<F>) -> Self {
        Self { cs }
    }
}

impl<F: PrimeField> ConstraintBuilder<F> for R1csBuilder<F> {
    type Wire = FpVar<F>;

    fn alloc_public(&mut self, value: Option<F>) -> Result<FpVar<F>> {
        Ok(FpVar::new_input(self.cs.clone(), || {
            value.ok_or(SynthesisError::AssignmentMissing)
        })?)
    }

    fn alloc_private(&mut self, value: Option<F>) -> Result<FpVar<F>> {
        Ok(FpVar::new_witness(self.cs.clone(), || {
            value.ok_or(SynthesisError::AssignmentMissing)
        })?)
    }

    fn constant(&mut self, value: F) -> Result<FpVar<F>> {
        Ok(FpVar::constant(value))
    }

    fn add(&mut self, a: &FpVar<F>, b: &FpVar<F>) -> Result<FpVar<F>> {
        Ok(a + b)
    }

    fn sub(&mut self, a: &FpVar<F>, b: &FpVar<F>) -> Result<FpVar<F>> {
        Ok(a - b)
    }

    fn mul(&mut self, a: &FpVar<F>, b: &FpVar<F>) -> Result<FpVar<F>> {
        Ok(a * b)
    }

    fn neg(&mut self, a: &FpVar<F>) -> Result<FpVar<F>> {
        Ok(a.negate()?)
    }

    fn inverse(&mut self, a: &FpVar<F>) -> Result<FpVar<F>> {
        Ok(a.inverse()?)
    }

    fn to_bits(&mut self, a: &FpVar<F>, bits: usize) -> Result<Vec<FpVar<F>>> {
        let mut booleans = Vec::with_capacity(bits);
        for i in 0..bits {
            booleans.push(Boolean::new_witness(self.cs.clone(), || {
                a.value().map(|v| v.into_bigint().get_bit(i))
            })?);
        }
        // Enforce Σ bᵢ·2ⁱ = a by MSB-first doubling.
        let mut acc = FpVar::zero();
        for bit in booleans.iter().rev() {
            acc = acc.double()? + FpVar::from(bit.clone());
        }
        acc.enforce_equal(a)?;
        Ok(booleans.into_iter().map(FpVar::from).collect())
    }

    fn is_zero(&mut self, a: &FpVar<F>) -> Result<FpVar<F>> {
        let flag = a.is_eq(&FpVar::zero())?;
        Ok(FpVar::from(flag))
    }

    fn assert_eq(&mut self, a: &FpVar<F>, b: &FpVar<F>) -> Result<()> {
        Ok(a.enforce_equal(b)?)
    }

    fn assert_bool(&mut self, a: &FpVar<F>) -> Result<()> {
        let complement = FpVar::one() - a;
        Ok(a.mul_equals(&complement, &FpVar::zero())?)
    }
}
