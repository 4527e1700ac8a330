//! The declarative circuit description.
//!
//! A circuit is not produced by compiling source code; it arrives as a JSON
//! document listing arithmetic-and-logic operations over four kinds of value
//! slots (public, private, local, constant). [`Program`] is the typed,
//! validated form of that document and the single input to both constraint
//! backends.
//!
//! Programs also have a canonical binary encoding (curve independent,
//! byte deterministic) used by the compiled-circuit artifacts.

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use num_bigint::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::scalar;

/// Operation codes of the circuit grammar.
///
/// The last five are part of the grammar but carry no evaluator support; a
/// program using them is rejected during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opcode {
    #[serde(rename = "add")]
    Add,
    #[serde(rename = "sub")]
    Sub,
    #[serde(rename = "neg")]
    Neg,
    #[serde(rename = "mul")]
    Mul,
    #[serde(rename = "div")]
    Div,
    #[serde(rename = "inverse")]
    Inverse,
    #[serde(rename = "to_binary")]
    ToBinary,
    #[serde(rename = "from_binary")]
    FromBinary,
    #[serde(rename = "mul_acc")]
    MulAcc,
    #[serde(rename = "xor")]
    Xor,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "select")]
    Select,
    #[serde(rename = "is_zero")]
    IsZero,
    #[serde(rename = "cmp")]
    Cmp,
    #[serde(rename = "assert_is_equal")]
    AssertIsEqual,
    #[serde(rename = "assert_is_different")]
    AssertIsDifferent,
    #[serde(rename = "assert_is_boolean")]
    AssertIsBoolean,
    // Reserved by the grammar, rejected by validation.
    #[serde(rename = "div_unchecked")]
    DivUnchecked,
    #[serde(rename = "lookup2")]
    Lookup2,
    #[serde(rename = "assert_is_crumb")]
    AssertIsCrumb,
    #[serde(rename = "assert_is_less_or_equal")]
    AssertIsLessOrEqual,
    #[serde(rename = "println")]
    Println,
}

impl Opcode {
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Neg => "neg",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Inverse => "inverse",
            Opcode::ToBinary => "to_binary",
            Opcode::FromBinary => "from_binary",
            Opcode::MulAcc => "mul_acc",
            Opcode::Xor => "xor",
            Opcode::Or => "or",
            Opcode::And => "and",
            Opcode::Select => "select",
            Opcode::IsZero => "is_zero",
            Opcode::Cmp => "cmp",
            Opcode::AssertIsEqual => "assert_is_equal",
            Opcode::AssertIsDifferent => "assert_is_different",
            Opcode::AssertIsBoolean => "assert_is_boolean",
            Opcode::DivUnchecked => "div_unchecked",
            Opcode::Lookup2 => "lookup2",
            Opcode::AssertIsCrumb => "assert_is_crumb",
            Opcode::AssertIsLessOrEqual => "assert_is_less_or_equal",
            Opcode::Println => "println",
        }
    }

    /// Reserved opcodes parse but have no constraint lowering.
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Opcode::DivUnchecked
                | Opcode::Lookup2
                | Opcode::AssertIsCrumb
                | Opcode::AssertIsLessOrEqual
                | Opcode::Println
        )
    }

    /// `(inputs, outputs)` contract for an implemented opcode.
    fn arity(self) -> Option<(ArgCount, ArgCount)> {
        use ArgCount::*;
        let arity = match self {
            Opcode::Add | Opcode::Mul => (AtLeast(2), Exactly(1)),
            Opcode::Sub | Opcode::Div | Opcode::Xor | Opcode::Or | Opcode::And | Opcode::Cmp => {
                (Exactly(2), Exactly(1))
            }
            Opcode::Neg | Opcode::Inverse | Opcode::IsZero => (Exactly(1), Exactly(1)),
            Opcode::ToBinary => (Exactly(1), AtLeast(1)),
            Opcode::FromBinary => (AtLeast(1), Exactly(1)),
            Opcode::MulAcc | Opcode::Select => (Exactly(3), Exactly(1)),
            Opcode::AssertIsEqual | Opcode::AssertIsDifferent => (Exactly(2), Exactly(0)),
            Opcode::AssertIsBoolean => (Exactly(1), Exactly(0)),
            Opcode::DivUnchecked
            | Opcode::Lookup2
            | Opcode::AssertIsCrumb
            | Opcode::AssertIsLessOrEqual
            | Opcode::Println => return None,
        };
        Some(arity)
    }

    fn tag(self) -> u8 {
        match self {
            Opcode::Add => 0,
            Opcode::Sub => 1,
            Opcode::Neg => 2,
            Opcode::Mul => 3,
            Opcode::Div => 4,
            Opcode::Inverse => 5,
            Opcode::ToBinary => 6,
            Opcode::FromBinary => 7,
            Opcode::MulAcc => 8,
            Opcode::Xor => 9,
            Opcode::Or => 10,
            Opcode::And => 11,
            Opcode::Select => 12,
            Opcode::IsZero => 13,
            Opcode::Cmp => 14,
            Opcode::AssertIsEqual => 15,
            Opcode::AssertIsDifferent => 16,
            Opcode::AssertIsBoolean => 17,
            Opcode::DivUnchecked => 18,
            Opcode::Lookup2 => 19,
            Opcode::AssertIsCrumb => 20,
            Opcode::AssertIsLessOrEqual => 21,
            Opcode::Println => 22,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        let opcode = match tag {
            0 => Opcode::Add,
            1 => Opcode::Sub,
            2 => Opcode::Neg,
            3 => Opcode::Mul,
            4 => Opcode::Div,
            5 => Opcode::Inverse,
            6 => Opcode::ToBinary,
            7 => Opcode::FromBinary,
            8 => Opcode::MulAcc,
            9 => Opcode::Xor,
            10 => Opcode::Or,
            11 => Opcode::And,
            12 => Opcode::Select,
            13 => Opcode::IsZero,
            14 => Opcode::Cmp,
            15 => Opcode::AssertIsEqual,
            16 => Opcode::AssertIsDifferent,
            17 => Opcode::AssertIsBoolean,
            18 => Opcode::DivUnchecked,
            19 => Opcode::Lookup2,
            20 => Opcode::AssertIsCrumb,
            21 => Opcode::AssertIsLessOrEqual,
            22 => Opcode::Println,
            _ => return None,
        };
        Some(opcode)
    }
}

enum ArgCount {
    Exactly(usize),
    AtLeast(usize),
}

impl ArgCount {
    fn accepts(&self, n: usize) -> bool {
        match *self {
            ArgCount::Exactly(k) => n == k,
            ArgCount::AtLeast(k) => n >= k,
        }
    }

    fn describe(&self) -> &'static str {
        match *self {
            ArgCount::Exactly(0) => "exactly 0",
            ArgCount::Exactly(1) => "exactly 1",
            ArgCount::Exactly(2) => "exactly 2",
            ArgCount::Exactly(3) => "exactly 3",
            ArgCount::AtLeast(1) => "at least 1",
            ArgCount::AtLeast(2) => "at least 2",
            _ => "a different number of",
        }
    }
}

/// A reference to a value slot, or an immediate constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Var {
    Public(u64),
    Private(u64),
    Local(u64),
    Constant(BigUint),
}

impl Var {
    pub const fn is_assignable(&self) -> bool {
        !matches!(self, Var::Constant(_))
    }

    fn kind(&self) -> &'static str {
        match self {
            Var::Public(_) => "public",
            Var::Private(_) => "private",
            Var::Local(_) => "local",
            Var::Constant(_) => "constant",
        }
    }
}

impl Serialize for Var {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Var", 2)?;
        s.serialize_field("t", self.kind())?;
        match self {
            Var::Public(i) | Var::Private(i) | Var::Local(i) => s.serialize_field("v", i)?,
            Var::Constant(c) => s.serialize_field("v", &c.to_string())?,
        }
        s.end()
    }
}

impl<'de> Deserialize<'de> for Var {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            t: String,
            #[serde(default)]
            v: Option<serde_json::Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let value = raw
            .v
            .ok_or_else(|| D::Error::custom(format!("`{}` variable is missing `v`", raw.t)))?;

        match raw.t.as_str() {
            "public" | "private" | "local" => {
                let index = value.as_u64().ok_or_else(|| {
                    D::Error::custom(format!(
                        "`{}` variable index must be an unsigned integer",
                        raw.t
                    ))
                })?;
                Ok(match raw.t.as_str() {
                    "public" => Var::Public(index),
                    "private" => Var::Private(index),
                    _ => Var::Local(index),
                })
            }
            "constant" => match value {
                serde_json::Value::String(text) => scalar::parse_literal(&text)
                    .map(Var::Constant)
                    .ok_or_else(|| D::Error::custom(format!("invalid constant literal `{text}`"))),
                serde_json::Value::Number(n) => n
                    .as_u64()
                    .map(|v| Var::Constant(BigUint::from(v)))
                    .ok_or_else(|| {
                        D::Error::custom("numeric constants must be small unsigned integers")
                    }),
                _ => Err(D::Error::custom(
                    "constant value must be a string or an unsigned integer",
                )),
            },
            other => Err(D::Error::custom(format!("unknown variable tag `{other}`"))),
        }
    }
}

/// One step of the program: an opcode applied to resolved inputs, writing
/// into assignable output slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Op {
    #[serde(rename = "op")]
    pub opcode: Opcode,
    #[serde(rename = "in", default)]
    pub inputs: Vec<Var>,
    #[serde(rename = "out", default)]
    pub outputs: Vec<Var>,
}

/// A complete circuit description: slot-array sizes plus the ordered
/// operation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub public_len: u64,
    pub private_len: u64,
    pub local_len: u64,
    #[serde(default)]
    pub operations: Vec<Op>,
}

impl Program {
    /// Parses and validates a JSON circuit document.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let program: Program =
            serde_json::from_slice(bytes).map_err(|e| Error::CircuitParse(e.to_string()))?;
        program.validate()?;
        Ok(program)
    }

    /// Checks every structural invariant of the description:
    /// opcode arities, slot-index bounds, assignability of outputs, and
    /// local-slot initialization order. Reserved opcodes are rejected here,
    /// before any constraint work starts.
    pub fn validate(&self) -> Result<()> {
        // Locals are write-before-read; the program is straight-line, so the
        // initialization order is a static property.
        let local_len = usize::try_from(self.local_len)
            .map_err(|_| Error::CircuitParse("local_len does not fit in memory".into()))?;
        let mut local_written = vec![false; local_len];

        for (index, op) in self.operations.iter().enumerate() {
            let opcode = op.opcode.name();
            let (inputs, outputs) = op.opcode.arity().ok_or(Error::UnsupportedOpcode {
                index,
                opcode: op.opcode.name(),
            })?;

            if !inputs.accepts(op.inputs.len()) {
                return Err(Error::InputArity {
                    index,
                    opcode,
                    expected: inputs.describe(),
                    got: op.inputs.len(),
                });
            }
            if !outputs.accepts(op.outputs.len()) {
                return Err(Error::OutputArity {
                    index,
                    opcode,
                    expected: outputs.describe(),
                    got: op.outputs.len(),
                });
            }

            for var in &op.inputs {
                self.check_bounds(index, var)?;
                if let Var::Local(i) = var {
                    if !local_written[*i as usize] {
                        return Err(Error::VarRef {
                            index,
                            detail: format!("local slot {i} is read before it is assigned"),
                        });
                    }
                }
            }
            for var in &op.outputs {
                if !var.is_assignable() {
                    return Err(Error::VarRef {
                        index,
                        detail: "a constant cannot be an output".into(),
                    });
                }
                self.check_bounds(index, var)?;
                if let Var::Local(i) = var {
                    local_written[*i as usize] = true;
                }
            }
        }
        Ok(())
    }

    fn check_bounds(&self, index: usize, var: &Var) -> Result<()> {
        let (i, len) = match var {
            Var::Public(i) => (*i, self.public_len),
            Var::Private(i) => (*i, self.private_len),
            Var::Local(i) => (*i, self.local_len),
            Var::Constant(_) => return Ok(()),
        };
        if i >= len {
            return Err(Error::VarRef {
                index,
                detail: format!(
                    "{} index {i} out of range (circuit declares {len})",
                    var.kind()
                ),
            });
        }
        Ok(())
    }
}

// Canonical binary codec. Curve independent and byte deterministic: the same
// program always encodes to the same bytes, which makes compiled-circuit
// serialization reproducible across runs.

const VAR_PUBLIC: u8 = 0;
const VAR_PRIVATE: u8 = 1;
const VAR_LOCAL: u8 = 2;
const VAR_CONSTANT: u8 = 3;

impl CanonicalSerialize for Var {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        mode: Compress,
    ) -> std::result::Result<(), SerializationError> {
        match self {
            Var::Public(i) => {
                VAR_PUBLIC.serialize_with_mode(&mut writer, mode)?;
                i.serialize_with_mode(&mut writer, mode)
            }
            Var::Private(i) => {
                VAR_PRIVATE.serialize_with_mode(&mut writer, mode)?;
                i.serialize_with_mode(&mut writer, mode)
            }
            Var::Local(i) => {
                VAR_LOCAL.serialize_with_mode(&mut writer, mode)?;
                i.serialize_with_mode(&mut writer, mode)
            }
            Var::Constant(c) => {
                VAR_CONSTANT.serialize_with_mode(&mut writer, mode)?;
                // Minimal little-endian bytes; BigUint::to_bytes_le is
                // canonical (no leading zero bytes).
                c.to_bytes_le().serialize_with_mode(&mut writer, mode)
            }
        }
    }

    fn serialized_size(&self, mode: Compress) -> usize {
        1 + match self {
            Var::Public(i) | Var::Private(i) | Var::Local(i) => i.serialized_size(mode),
            Var::Constant(c) => c.to_bytes_le().serialized_size(mode),
        }
    }
}

impl Valid for Var {
    fn check(&self) -> std::result::Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalDeserialize for Var {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> std::result::Result<Self, SerializationError> {
        let tag = u8::deserialize_with_mode(&mut reader, compress, validate)?;
        match tag {
            VAR_PUBLIC => Ok(Var::Public(u64::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?)),
            VAR_PRIVATE => Ok(Var::Private(u64::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?)),
            VAR_LOCAL => Ok(Var::Local(u64::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?)),
            VAR_CONSTANT => {
                let bytes = Vec::<u8>::deserialize_with_mode(&mut reader, compress, validate)?;
                Ok(Var::Constant(BigUint::from_bytes_le(&bytes)))
            }
            _ => Err(SerializationError::InvalidData),
        }
    }
}

impl CanonicalSerialize for Op {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        mode: Compress,
    ) -> std::result::Result<(), SerializationError> {
        self.opcode.tag().serialize_with_mode(&mut writer, mode)?;
        self.inputs.serialize_with_mode(&mut writer, mode)?;
        self.outputs.serialize_with_mode(&mut writer, mode)
    }

    fn serialized_size(&self, mode: Compress) -> usize {
        1 + self.inputs.serialized_size(mode) + self.outputs.serialized_size(mode)
    }
}

impl Valid for Op {
    fn check(&self) -> std::result::Result<(), SerializationError> {
        Ok(())
    }
}

impl CanonicalDeserialize for Op {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> std::result::Result<Self, SerializationError> {
        let tag = u8::deserialize_with_mode(&mut reader, compress, validate)?;
        let opcode = Opcode::from_tag(tag).ok_or(SerializationError::InvalidData)?;
        Ok(Op {
            opcode,
            inputs: Vec::deserialize_with_mode(&mut reader, compress, validate)?,
            outputs: Vec::deserialize_with_mode(&mut reader, compress, validate)?,
        })
    }
}

impl CanonicalSerialize for Program {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        mode: Compress,
    ) -> std::result::Result<(), SerializationError> {
        self.public_len.serialize_with_mode(&mut writer, mode)?;
        self.private_len.serialize_with_mode(&mut writer, mode)?;
        self.local_len.serialize_with_mode(&mut writer, mode)?;
        self.operations.serialize_with_mode(&mut writer, mode)
    }

    fn serialized_size(&self, mode: Compress) -> usize {
        self.public_len.serialized_size(mode)
            + self.private_len.serialized_size(mode)
            + self.local_len.serialized_size(mode)
            + self.operations.serialized_size(mode)
    }
}

impl Valid for Program {
    fn check(&self) -> std::result::Result<(), SerializationError> {
        self.validate().map_err(|_| SerializationError::InvalidData)
    }
}

impl CanonicalDeserialize for Program {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> std::result::Result<Self, SerializationError> {
        let program = Program {
            public_len: u64::deserialize_with_mode(&mut reader, compress, validate)?,
            private_len: u64::deserialize_with_mode(&mut reader, compress, validate)?,
            local_len: u64::deserialize_with_mode(&mut reader, compress, validate)?,
            operations: Vec::deserialize_with_mode(&mut reader, compress, validate)?,
        };
        if let Validate::Yes = validate {
            program.check()?;
        }
        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_circuit() -> &'static str {
        r#"{
            "public_len": 1,
            "private_len": 2,
            "local_len": 1,
            "operations": [
                { "op": "add",
                  "in": [ { "t": "private", "v": 0 }, { "t": "private", "v": 1 } ],
                  "out": [ { "t": "local", "v": 0 } ] },
                { "op": "assert_is_equal",
                  "in": [ { "t": "local", "v": 0 }, { "t": "public", "v": 0 } ],
                  "out": [] }
            ]
        }"#
    }

    #[test]
    fn parses_a_valid_circuit() {
        let program = Program::from_json(sum_circuit().as_bytes()).unwrap();
        assert_eq!(program.public_len, 1);
        assert_eq!(program.operations.len(), 2);
        assert_eq!(program.operations[0].opcode, Opcode::Add);
        assert_eq!(program.operations[0].outputs, vec![Var::Local(0)]);
    }

    #[test]
    fn constants_accept_hex_decimal_and_numbers() {
        let json = r#"{ "t": "constant", "v": "0xff" }"#;
        assert_eq!(
            serde_json::from_str::<Var>(json).unwrap(),
            Var::Constant(BigUint::from(255u64))
        );
        let json = r#"{ "t": "constant", "v": "255" }"#;
        assert_eq!(
            serde_json::from_str::<Var>(json).unwrap(),
            Var::Constant(BigUint::from(255u64))
        );
        let json = r#"{ "t": "constant", "v": 255 }"#;
        assert_eq!(
            serde_json::from_str::<Var>(json).unwrap(),
            Var::Constant(BigUint::from(255u64))
        );
    }

    #[test]
    fn rejects_bad_variable_documents() {
        for json in [
            r#"{ "t": "public", "v": "3" }"#,
            r#"{ "t": "public", "v": -1 }"#,
            r#"{ "t": "public" }"#,
            r#"{ "t": "wires", "v": 0 }"#,
            r#"{ "t": "constant", "v": "0xzz" }"#,
            r#"{ "t": "constant", "v": -3 }"#,
        ] {
            assert!(serde_json::from_str::<Var>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn rejects_unknown_opcode() {
        let json = r#"{
            "public_len": 0, "private_len": 1, "local_len": 0,
            "operations": [ { "op": "frobnicate", "in": [ { "t": "private", "v": 0 } ], "out": [] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::CircuitParse(_))
        ));
    }

    #[test]
    fn rejects_arity_violations() {
        // `add` with a single input.
        let json = r#"{
            "public_len": 0, "private_len": 1, "local_len": 1,
            "operations": [ { "op": "add",
                "in": [ { "t": "private", "v": 0 } ],
                "out": [ { "t": "local", "v": 0 } ] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::InputArity { opcode: "add", .. })
        ));

        // `to_binary` with no outputs.
        let json = r#"{
            "public_len": 0, "private_len": 1, "local_len": 0,
            "operations": [ { "op": "to_binary",
                "in": [ { "t": "private", "v": 0 } ], "out": [] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::OutputArity { opcode: "to_binary", .. })
        ));
    }

    #[test]
    fn rejects_out_of_range_references() {
        let json = r#"{
            "public_len": 1, "private_len": 1, "local_len": 0,
            "operations": [ { "op": "assert_is_equal",
                "in": [ { "t": "private", "v": 3 }, { "t": "public", "v": 0 } ],
                "out": [] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::VarRef { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_constant_outputs() {
        let json = r#"{
            "public_len": 0, "private_len": 2, "local_len": 0,
            "operations": [ { "op": "add",
                "in": [ { "t": "private", "v": 0 }, { "t": "private", "v": 1 } ],
                "out": [ { "t": "constant", "v": 1 } ] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::VarRef { .. })
        ));
    }

    #[test]
    fn rejects_locals_read_before_write() {
        let json = r#"{
            "public_len": 0, "private_len": 1, "local_len": 1,
            "operations": [ { "op": "assert_is_equal",
                "in": [ { "t": "local", "v": 0 }, { "t": "private", "v": 0 } ],
                "out": [] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::VarRef { .. })
        ));
    }

    #[test]
    fn rejects_reserved_opcodes() {
        let json = r#"{
            "public_len": 0, "private_len": 2, "local_len": 1,
            "operations": [ { "op": "div_unchecked",
                "in": [ { "t": "private", "v": 0 }, { "t": "private", "v": 1 } ],
                "out": [ { "t": "local", "v": 0 } ] } ]
        }"#;
        assert!(matches!(
            Program::from_json(json.as_bytes()),
            Err(Error::UnsupportedOpcode { opcode: "div_unchecked", .. })
        ));
    }

    #[test]
    fn binary_codec_round_trips_and_is_deterministic() {
        let program = Program::from_json(sum_circuit().as_bytes()).unwrap();

        let mut first = Vec::new();
        program.serialize_uncompressed(&mut first).unwrap();
        let mut second = Vec::new();
        program.serialize_uncompressed(&mut second).unwrap();
        assert_eq!(first, second);

        let decoded = Program::deserialize_uncompressed(first.as_slice()).unwrap();
        assert_eq!(decoded, program);
    }

    #[test]
    fn binary_codec_keeps_large_constants() {
        let constant = BigUint::parse_bytes(
            b"21888242871839275222246405745257275088548364400416034343698204186575808495616",
            10,
        )
        .unwrap();
        let program = Program {
            public_len: 1,
            private_len: 0,
            local_len: 1,
            operations: vec![Op {
                opcode: Opcode::Add,
                inputs: vec![Var::Public(0), Var::Constant(constant.clone())],
                outputs: vec![Var::Local(0)],
            }],
        };
        let mut bytes = Vec::new();
        program.serialize_uncompressed(&mut bytes).unwrap();
        let decoded = Program::deserialize_uncompressed(bytes.as_slice()).unwrap();
        assert_eq!(decoded.operations[0].inputs[1], Var::Constant(constant));
    }
}
