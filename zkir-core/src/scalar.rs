//! Field-literal parsing and reduction shared by the circuit and witness
//! schemas.
//!
//! Literals travel as arbitrary-precision integers and are only reduced into
//! a concrete scalar field once a curve is chosen.

use ark_ff::PrimeField;
use num_bigint::BigUint;

/// Parses a textual field literal: a leading `0x`/`0X` selects base 16,
/// anything else is base 10.
pub(crate) fn parse_literal(text: &str) -> Option<BigUint> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        BigUint::parse_bytes(hex.as_bytes(), 16)
    } else {
        BigUint::parse_bytes(text.as_bytes(), 10)
    }
}

/// Reduces an arbitrary-precision integer into the scalar field.
pub(crate) fn to_field<F: PrimeField>(value: &BigUint) -> F {
    F::from_le_bytes_mod_order(&value.to_bytes_le())
}

/// Reduces a slice of values in order.
pub(crate) fn to_field_vec<F: PrimeField>(values: &[BigUint]) -> Vec<F> {
    values.iter().map(to_field).collect()
}
