//! On-chain verifier rendering for BN254 Groth16 verifying keys.
//!
//! The generated contract follows the classic precompile-based layout: alt_bn128
//! addition (0x06), scalar multiplication (0x07) and pairing (0x08), with the
//! key's points embedded as decimal constants. The EVM only provides these
//! precompiles for BN254, which is why export is limited to that curve.

use std::fmt::Write as _;

use ark_bn254::Bn254;
use ark_groth16::VerifyingKey;

fn g1(point: &ark_bn254::G1Affine) -> (String, String) {
    (point.x.to_string(), point.y.to_string())
}

/// G2 coordinates in EVM calldata order: imaginary limb first.
fn g2(point: &ark_bn254::G2Affine) -> [String; 4] {
    [
        point.x.c1.to_string(),
        point.x.c0.to_string(),
        point.y.c1.to_string(),
        point.y.c0.to_string(),
    ]
}

/// Renders a standalone Solidity verifier for `vk`.
pub(crate) fn verifier_contract(vk: &VerifyingKey<Bn254>) -> String {
    let (alpha_x, alpha_y) = g1(&vk.alpha_g1);
    let beta = g2(&vk.beta_g2);
    let gamma = g2(&vk.gamma_g2);
    let delta = g2(&vk.delta_g2);

    let mut ic = String::new();
    for (i, point) in vk.gamma_abc_g1.iter().enumerate() {
        let (x, y) = g1(point);
        let _ = writeln!(
            ic,
            "        vk.IC[{i}] = Pairing.G1Point({x}, {y});"
        );
    }

    let ic_len = vk.gamma_abc_g1.len();
    let input_len = ic_len - 1;

    format!(
        r#"// SPDX-License-Identifier: MIT
pragma solidity ^0.8.0;

library Pairing {{
    struct G1Point {{
        uint256 X;
        uint256 Y;
    }}

    struct G2Point {{
        uint256[2] X;
        uint256[2] Y;
    }}

    uint256 constant PRIME_Q =
        21888242871839275222246405745257275088696311157297823662689037894645226208583;

    function negate(G1Point memory p) internal pure returns (G1Point memory) {{
        if (p.X == 0 && p.Y == 0) {{
            return G1Point(0, 0);
        }}
        return G1Point(p.X, PRIME_Q - (p.Y % PRIME_Q));
    }}

    function addition(G1Point memory p1, G1Point memory p2)
        internal
        view
        returns (G1Point memory r)
    {{
        uint256[4] memory input;
        input[0] = p1.X;
        input[1] = p1.Y;
        input[2] = p2.X;
        input[3] = p2.Y;
        bool success;
        assembly {{
            success := staticcall(sub(gas(), 2000), 6, input, 0x80, r, 0x40)
        }}
        require(success, "pairing-add-failed");
    }}

    function scalar_mul(G1Point memory p, uint256 s)
        internal
        view
        returns (G1Point memory r)
    {{
        uint256[3] memory input;
        input[0] = p.X;
        input[1] = p.Y;
        input[2] = s;
        bool success;
        assembly {{
            success := staticcall(sub(gas(), 2000), 7, input, 0x60, r, 0x40)
        }}
        require(success, "pairing-mul-failed");
    }}

    function pairing(
        G1Point[4] memory p1,
        G2Point[4] memory p2
    ) internal view returns (bool) {{
        uint256[24] memory input;
        for (uint256 i = 0; i < 4; i++) {{
            uint256 j = i * 6;
            input[j + 0] = p1[i].X;
            input[j + 1] = p1[i].Y;
            input[j + 2] = p2[i].X[0];
            input[j + 3] = p2[i].X[1];
            input[j + 4] = p2[i].Y[0];
            input[j + 5] = p2[i].Y[1];
        }}
        uint256[1] memory out;
        bool success;
        assembly {{
            success := staticcall(
                sub(gas(), 2000), 8, input, mul(24, 0x20), out, 0x20
            )
        }}
        require(success, "pairing-opcode-failed");
        return out[0] != 0;
    }}
}}

contract Groth16Verifier {{
    using Pairing for *;

    struct VerifyingKey {{
        Pairing.G1Point alpha;
        Pairing.G2Point beta;
        Pairing.G2Point gamma;
        Pairing.G2Point delta;
        Pairing.G1Point[{ic_len}] IC;
    }}

    struct Proof {{
        Pairing.G1Point A;
        Pairing.G2Point B;
        Pairing.G1Point C;
    }}

    function verifyingKey() internal pure returns (VerifyingKey memory vk) {{
        vk.alpha = Pairing.G1Point({alpha_x}, {alpha_y});
        vk.beta = Pairing.G2Point([{beta_x1}, {beta_x0}], [{beta_y1}, {beta_y0}]);
        vk.gamma = Pairing.G2Point([{gamma_x1}, {gamma_x0}], [{gamma_y1}, {gamma_y0}]);
        vk.delta = Pairing.G2Point([{delta_x1}, {delta_x0}], [{delta_y1}, {delta_y0}]);
{ic}    }}

    /// @notice Verifies a Groth16 proof against {input_len} public input(s).
    function verifyProof(
        uint256[2] calldata a,
        uint256[2][2] calldata b,
        uint256[2] calldata c,
        uint256[{input_len}] calldata input
    ) external view returns (bool) {{
        VerifyingKey memory vk = verifyingKey();

        Pairing.G1Point memory vk_x = vk.IC[0];
        for (uint256 i = 0; i < {input_len}; i++) {{
            vk_x = Pairing.addition(
                vk_x,
                Pairing.scalar_mul(vk.IC[i + 1], input[i])
            );
        }}

        Proof memory proof;
        proof.A = Pairing.G1Point(a[0], a[1]);
        proof.B = Pairing.G2Point([b[0][0], b[0][1]], [b[1][0], b[1][1]]);
        proof.C = Pairing.G1Point(c[0], c[1]);

        return Pairing.pairing(
            [Pairing.negate(proof.A), vk.alpha, vk_x, proof.C],
            [proof.B, vk.beta, vk.gamma, vk.delta]
        );
    }}
}}
"#,
        ic_len = ic_len,
        input_len = input_len,
        alpha_x = alpha_x,
        alpha_y = alpha_y,
        beta_x1 = beta[0],
        beta_x0 = beta[1],
        beta_y1 = beta[2],
        beta_y0 = beta[3],
        gamma_x1 = gamma[0],
        gamma_x0 = gamma[1],
        gamma_y1 = gamma[2],
        gamma_y0 = gamma[3],
        delta_x1 = delta[0],
        delta_x0 = delta[1],
        delta_y1 = delta[2],
        delta_y0 = delta[3],
        ic = ic,
    )
}
