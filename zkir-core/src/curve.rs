//! Registry of supported pairing-friendly curves.
//!
//! A curve id is part of the wire protocol: it selects the scalar field the
//! circuit is evaluated over, the pairing engine used by both proving schemes,
//! and the byte layout of every serialized artifact. Artifacts carry no curve
//! tag of their own, so the id must be supplied again at deserialization.

use std::fmt;

use crate::error::{Error, Result};

/// A pairing-friendly curve with an arkworks pairing engine.
///
/// Ids keep the numbering of the wire protocol. Ids 3, 6 and 7 (BLS24-317,
/// BLS24-315, BW6-633) are recognized but rejected: no pairing engine for
/// them exists in the arkworks ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    Bn254,
    Bls12_381,
    Bls12_377,
    Bw6_761,
}

impl Curve {
    /// All curves an engine can be instantiated for.
    pub const ALL: [Curve; 4] = [
        Curve::Bn254,
        Curve::Bls12_381,
        Curve::Bls12_377,
        Curve::Bw6_761,
    ];

    /// Wire-protocol id of this curve.
    pub const fn id(self) -> u64 {
        match self {
            Curve::Bn254 => 1,
            Curve::Bls12_381 => 2,
            Curve::Bls12_377 => 4,
            Curve::Bw6_761 => 5,
        }
    }

    /// Resolves a wire-protocol id. Unknown ids and ids of curves without an
    /// arkworks pairing engine are rejected, never silently mapped to a
    /// default.
    pub fn from_id(id: u64) -> Result<Self> {
        match id {
            1 => Ok(Curve::Bn254),
            2 => Ok(Curve::Bls12_381),
            4 => Ok(Curve::Bls12_377),
            5 => Ok(Curve::Bw6_761),
            other => Err(Error::UnsupportedCurve(other)),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Curve::Bn254 => "bn254",
            Curve::Bls12_381 => "bls12-381",
            Curve::Bls12_377 => "bls12-377",
            Curve::Bw6_761 => "bw6-761",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for curve in Curve::ALL {
            assert_eq!(Curve::from_id(curve.id()).unwrap(), curve);
        }
    }

    #[test]
    fn unavailable_ids_are_rejected() {
        for id in [0, 3, 6, 7, 8, u64::MAX] {
            assert!(matches!(
                Curve::from_id(id),
                Err(Error::UnsupportedCurve(i)) if i == id
            ));
        }
    }
}
