//! Constraint synthesis: replaying a [`Program`] against a backend builder.
//!
//! The interpreter walks the operation list exactly once, in declaration
//! order, with no reordering, folding, or dead-slot elimination, so the same
//! program over the same field always yields the same constraint system.
//! Everything backend specific sits behind [`ConstraintBuilder`]; the opcode
//! recipes here are shared by the R1CS and gate-list backends so both schemes
//! prove identical semantics.

pub(crate) mod r1cs;
pub(crate) mod scs;

use ark_ff::{One, PrimeField, Zero};

use crate::error::{Error, Result};
use crate::ir::{Op, Opcode, Program, Var};
use crate::scalar;

/// The narrow seam between the interpreter and a proving backend.
///
/// Primitives allocate wires, emit arithmetic constraints, and perform the
/// two witness-dependent gadgets (bit decomposition, zero test). Composite
/// opcodes are derived from these in [`synthesize`].
pub(crate) trait ConstraintBuilder<F: PrimeField> {
    type Wire: Clone;

    /// Allocates the next public-input wire. `None` during structure-only
    /// synthesis (setup), `Some` when a witness is bound.
    fn alloc_public(&mut self, value: Option<F>) -> Result<Self::Wire>;

    /// Allocates the next private wire.
    fn alloc_private(&mut self, value: Option<F>) -> Result<Self::Wire>;

    fn constant(&mut self, value: F) -> Result<Self::Wire>;

    fn add(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<Self::Wire>;
    fn sub(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<Self::Wire>;
    fn mul(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<Self::Wire>;

    /// 0 - a.
    fn neg(&mut self, a: &Self::Wire) -> Result<Self::Wire> {
        let zero = self.constant(F::zero())?;
        self.sub(&zero, a)
    }

    /// Multiplicative inverse; constrains `a * a⁻¹ = 1`, so the prover
    /// aborts when `a` is zero.
    fn inverse(&mut self, a: &Self::Wire) -> Result<Self::Wire>;

    /// Little-endian decomposition into exactly `bits` boolean wires, with
    /// the recomposition constrained equal to `a`.
    fn to_bits(&mut self, a: &Self::Wire, bits: usize) -> Result<Vec<Self::Wire>>;

    /// 1 if `a == 0`, else 0.
    fn is_zero(&mut self, a: &Self::Wire) -> Result<Self::Wire>;

    fn assert_eq(&mut self, a: &Self::Wire, b: &Self::Wire) -> Result<()>;

    /// Constrains `a · (1 - a) = 0`.
    fn assert_bool(&mut self, a: &Self::Wire) -> Result<()>;
}

/// Replays the program against `builder`, allocating `public_len` public
/// wires followed by `private_len` private wires, then executing every
/// operation in order.
///
/// `publics`/`privates` carry the bound witness, or `None` for
/// structure-only synthesis. When given, their lengths must already match
/// the program's slot counts.
pub(crate) fn synthesize<F: PrimeField, B: ConstraintBuilder<F>>(
    program: &Program,
    publics: Option<&[F]>,
    privates: Option<&[F]>,
    builder: &mut B,
) -> Result<()> {
    let mut slots = Slots::<B::Wire>::allocate(program, publics, privates, builder)?;
    for (index, op) in program.operations.iter().enumerate() {
        execute(builder, index, op, &mut slots)?;
    }
    Ok(())
}

struct Slots<W> {
    public: Vec<W>,
    private: Vec<W>,
    local: Vec<Option<W>>,
}

impl<W: Clone> Slots<W> {
    fn allocate<F: PrimeField, B: ConstraintBuilder<F, Wire = W>>(
        program: &Program,
        publics: Option<&[F]>,
        privates: Option<&[F]>,
        builder: &mut B,
    ) -> Result<Self> {
        let mut public = Vec::with_capacity(program.public_len as usize);
        for i in 0..program.public_len as usize {
            public.push(builder.alloc_public(publics.map(|v| v[i]))?);
        }
        let mut private = Vec::with_capacity(program.private_len as usize);
        for i in 0..program.private_len as usize {
            private.push(builder.alloc_private(privates.map(|v| v[i]))?);
        }
        Ok(Slots {
            public,
            private,
            local: vec![None; program.local_len as usize],
        })
    }

    fn fetch<F: PrimeField, B: ConstraintBuilder<F, Wire = W>>(
        &self,
        builder: &mut B,
        index: usize,
        var: &Var,
    ) -> Result<W> {
        match var {
            Var::Public(i) => Ok(self.public[*i as usize].clone()),
            Var::Private(i) => Ok(self.private[*i as usize].clone()),
            Var::Local(i) => self.local[*i as usize].clone().ok_or_else(|| Error::VarRef {
                index,
                detail: format!("local slot {i} is read before it is assigned"),
            }),
            Var::Constant(c) => builder.constant(scalar::to_field(c)),
        }
    }

    /// Writing a result replaces the slot's wire; it does not constrain the
    /// previous occupant.
    fn store(&mut self, var: &Var, wire: W) {
        match var {
            Var::Public(i) => self.public[*i as usize] = wire,
            Var::Private(i) => self.private[*i as usize] = wire,
            Var::Local(i) => self.local[*i as usize] = Some(wire),
            Var::Constant(_) => unreachable!("outputs are validated assignable"),
        }
    }
}

fn execute<F: PrimeField, B: ConstraintBuilder<F>>(
    builder: &mut B,
    index: usize,
    op: &Op,
    slots: &mut Slots<B::Wire>,
) -> Result<()> {
    let inputs: Vec<B::Wire> = op
        .inputs
        .iter()
        .map(|var| slots.fetch(builder, index, var))
        .collect::<Result<_>>()?;

    let results: Vec<B::Wire> = match op.opcode {
        Opcode::Add => {
            let mut acc = inputs[0].clone();
            for next in &inputs[1..] {
                acc = builder.add(&acc, next)?;
            }
            vec![acc]
        }
        Opcode::Sub => vec![builder.sub(&inputs[0], &inputs[1])?],
        Opcode::Neg => vec![builder.neg(&inputs[0])?],
        Opcode::Mul => {
            let mut acc = inputs[0].clone();
            for next in &inputs[1..] {
                acc = builder.mul(&acc, next)?;
            }
            vec![acc]
        }
        Opcode::Div => {
            let inv = builder.inverse(&inputs[1])?;
            vec![builder.mul(&inputs[0], &inv)?]
        }
        Opcode::Inverse => vec![builder.inverse(&inputs[0])?],
        Opcode::ToBinary => builder.to_bits(&inputs[0], op.outputs.len())?,
        Opcode::FromBinary => vec![from_bits(builder, &inputs)?],
        Opcode::MulAcc => {
            let product = builder.mul(&inputs[1], &inputs[2])?;
            vec![builder.add(&inputs[0], &product)?]
        }
        Opcode::Xor => {
            builder.assert_bool(&inputs[0])?;
            builder.assert_bool(&inputs[1])?;
            // a + b - 2ab
            let sum = builder.add(&inputs[0], &inputs[1])?;
            let product = builder.mul(&inputs[0], &inputs[1])?;
            let twice = builder.add(&product, &product)?;
            vec![builder.sub(&sum, &twice)?]
        }
        Opcode::Or => {
            builder.assert_bool(&inputs[0])?;
            builder.assert_bool(&inputs[1])?;
            // a + b - ab
            let sum = builder.add(&inputs[0], &inputs[1])?;
            let product = builder.mul(&inputs[0], &inputs[1])?;
            vec![builder.sub(&sum, &product)?]
        }
        Opcode::And => {
            builder.assert_bool(&inputs[0])?;
            builder.assert_bool(&inputs[1])?;
            vec![builder.mul(&inputs[0], &inputs[1])?]
        }
        Opcode::Select => vec![select(builder, &inputs[0], &inputs[1], &inputs[2])?],
        Opcode::IsZero => vec![builder.is_zero(&inputs[0])?],
        Opcode::Cmp => vec![cmp(builder, &inputs[0], &inputs[1])?],
        Opcode::AssertIsEqual => {
            builder.assert_eq(&inputs[0], &inputs[1])?;
            vec![]
        }
        Opcode::AssertIsDifferent => {
            // (a - b) has an inverse exactly when a ≠ b; on equal operands
            // the prover aborts computing it.
            let diff = builder.sub(&inputs[0], &inputs[1])?;
            let inv = builder.inverse(&diff)?;
            let product = builder.mul(&diff, &inv)?;
            let one = builder.constant(F::one())?;
            builder.assert_eq(&product, &one)?;
            vec![]
        }
        Opcode::AssertIsBoolean => {
            builder.assert_bool(&inputs[0])?;
            vec![]
        }
        _ => {
            return Err(Error::UnsupportedOpcode {
                index,
                opcode: op.opcode.name(),
            })
        }
    };

    debug_assert_eq!(results.len(), op.outputs.len());
    for (var, wire) in op.outputs.iter().zip(results) {
        slots.store(var, wire);
    }
    Ok(())
}

/// Little-endian recomposition Σ bᵢ·2ⁱ, folded MSB first so no power-of-two
/// constants are materialized. Inputs are assumed boolean-constrained by the
/// circuit author.
fn from_bits<F: PrimeField, B: ConstraintBuilder<F>>(
    builder: &mut B,
    bits: &[B::Wire],
) -> Result<B::Wire> {
    let mut acc = builder.constant(F::zero())?;
    for bit in bits.iter().rev() {
        acc = builder.add(&acc, &acc)?;
        acc = builder.add(&acc, bit)?;
    }
    Ok(acc)
}

/// cond ? t : f, as `f + cond·(t - f)` with `cond` constrained boolean.
fn select<F: PrimeField, B: ConstraintBuilder<F>>(
    builder: &mut B,
    cond: &B::Wire,
    t: &B::Wire,
    f: &B::Wire,
) -> Result<B::Wire> {
    builder.assert_bool(cond)?;
    let diff = builder.sub(t, f)?;
    let picked = builder.mul(cond, &diff)?;
    builder.add(f, &picked)
}

/// Three-way comparison over full-width decompositions: scans from the most
/// significant bit and keeps the first position where the operands differ,
/// yielding 1 (a > b), -1 (a < b) or 0 (equal).
fn cmp<F: PrimeField, B: ConstraintBuilder<F>>(
    builder: &mut B,
    a: &B::Wire,
    b: &B::Wire,
) -> Result<B::Wire> {
    let width = F::MODULUS_BIT_SIZE as usize;
    let a_bits = builder.to_bits(a, width)?;
    let b_bits = builder.to_bits(b, width)?;

    let one = builder.constant(F::one())?;
    let minus_one = builder.constant(-F::one())?;

    let mut result = builder.constant(F::zero())?;
    for i in (0..width).rev() {
        // bit pairs are already boolean-constrained by to_bits
        let not_b = builder.sub(&one, &b_bits[i])?;
        let not_a = builder.sub(&one, &a_bits[i])?;
        let a_gt = builder.mul(&a_bits[i], &not_b)?;
        let b_gt = builder.mul(&b_bits[i], &not_a)?;

        // here = a_gt ? 1 : (b_gt ? -1 : 0)
        let lesser = builder.mul(&b_gt, &minus_one)?;
        let gap = builder.sub(&one, &lesser)?;
        let picked = builder.mul(&a_gt, &gap)?;
        let here = builder.add(&lesser, &picked)?;

        // keep the verdict from the most significant differing bit
        let undecided = builder.is_zero(&result)?;
        let delta = builder.sub(&here, &result)?;
        let correction = builder.mul(&undecided, &delta)?;
        result = builder.add(&result, &correction)?;
    }
    Ok(result)
}
