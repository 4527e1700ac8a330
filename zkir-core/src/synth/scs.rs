//! Arithmetic-gate backend: wires are TurboPlonk circuit variables.
//!
//! `jf-relation` circuits carry concrete witness values while gates are laid
//! down, so structure-only synthesis binds zero dummies; the gate list is a
//! function of the program alone and setup never checks satisfiability.
//! Witness-dependent values (inverses, bits, zero flags) fall back to a
//! default when undefined; the accompanying constraints then reject the
//! assignment at proving time rather than during construction.

use ark_ff::{BigInteger, Field, PrimeField, Zero};
use jf_relation::{Circuit, PlonkCircuit, Variable};

use super::ConstraintBuilder;
use crate::error::Result;

pub(crate) struct ScsBuilder<F: PrimeField> {
    circuit: PlonkCircuit<F>,
}

impl<F: PrimeField> ScsBuilder<F> {
    pub(crate) fn new() -> Self {
        Self {
            circuit: PlonkCircuit::new_turbo_plonk(),
        }
    }

    pub(crate) fn into_circuit(self) -> PlonkCircuit<F> {
        self.circuit
    }
}

impl<F: PrimeField> ConstraintBuilder<F> for ScsBuilder<F> {
    type Wire = Variable;

    fn alloc_public(&mut self, value: Option<F>) -> Result<Variable> {
        Ok(self
            .circuit
            .create_public_variable(value.unwrap_or_default())?)
    }

    fn alloc_private(&mut self, value: Option<F>) -> Result<Variable> {
        Ok(self.circuit.create_variable(value.unwrap_or_default())?)
    }

    fn constant(&mut self, value: F) -> Result<Variable> {
        Ok(self.circuit.create_constant_variable(value)?)
    }

    fn add(&mut self, a: &Variable, b: &Variable) -> Result<Variable> {
        Ok(self.circuit.add(*a, *b)?)
    }

    fn sub(&mut self, a: &Variable, b: &Variable) -> Result<Variable> {
        Ok(self.circuit.sub(*a, *b)?)
    }

    fn mul(&mut self, a: &Variable, b: &Variable) -> Result<Variable> {
        Ok(self.circuit.mul(*a, *b)?)
    }

    fn inverse(&mut self, a: &Variable) -> Result<Variable> {
        let value = self.circuit.witness(*a)?;
        let inverted = value.inverse().unwrap_or_default();
        let inv = self.circuit.create_variable(inverted)?;
        // a · a⁻¹ = 1; unsatisfiable when a is zero.
        self.circuit.mul_gate(*a, inv, self.circuit.one())?;
        Ok(inv)
    }

    fn to_bits(&mut self, a: &Variable, bits: usize) -> Result<Vec<Variable>> {
        let value = self.circuit.witness(*a)?;
        let repr = value.into_bigint();
        let mut wires = Vec::with_capacity(bits);
        for i in 0..bits {
            let bit = self.circuit.create_boolean_variable(repr.get_bit(i))?;
            wires.push(Variable::from(bit));
        }
        // Enforce Σ bᵢ·2ⁱ = a by MSB-first doubling.
        let mut acc = self.circuit.zero();
        for bit in wires.iter().rev() {
            acc = self.circuit.add(acc, acc)?;
            acc = self.circuit.add(acc, *bit)?;
        }
        self.circuit.enforce_equal(acc, *a)?;
        Ok(wires)
    }

    fn is_zero(&mut self, a: &Variable) -> Result<Variable> {
        let value = self.circuit.witness(*a)?;
        let flag = self.circuit.create_boolean_variable(value.is_zero())?;
        let flag = Variable::from(flag);
        let inverted = value.inverse().unwrap_or_default();
        let inv = self.circuit.create_variable(inverted)?;
        // a·a⁻¹ + flag = 1 and flag·a = 0 pin the flag on both branches.
        let product = self.circuit.mul(*a, inv)?;
        self.circuit.add_gate(product, flag, self.circuit.one())?;
        self.circuit.mul_gate(flag, *a, self.circuit.zero())?;
        Ok(flag)
    }

    fn assert_eq(&mut self, a: &Variable, b: &Variable) -> Result<()> {
        Ok(self.circuit.enforce_equal(*a, *b)?)
    }

    fn assert_bool(&mut self, a: &Variable) -> Result<()> {
        Ok(self.circuit.enforce_bool(*a)?)
    }
}
