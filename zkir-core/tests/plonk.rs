//! End-to-end PLONK lifecycle, mirroring the Groth16 suite with proof
//! objects instead of raw bytes.

use zkir_core::{
    Curve, Error, PlonkProof, PlonkProver, PlonkProvingKey, PlonkVerifyingKey, Program,
    PublicWitness, Witness,
};

const SUM_CIRCUIT: &str = r#"{
    "public_len": 1, "private_len": 2, "local_len": 1,
    "operations": [
        { "op": "add",
          "in": [ { "t": "private", "v": 0 }, { "t": "private", "v": 1 } ],
          "out": [ { "t": "local", "v": 0 } ] },
        { "op": "assert_is_equal",
          "in": [ { "t": "local", "v": 0 }, { "t": "public", "v": 0 } ],
          "out": [] }
    ]
}"#;

fn witness(json: &str) -> Witness {
    Witness::from_json(json.as_bytes()).unwrap()
}

fn public_witness(json: &str) -> PublicWitness {
    PublicWitness::from_json(json.as_bytes()).unwrap()
}

#[test]
fn sum_of_privates_proves_and_verifies() {
    let prover = PlonkProver::new(Curve::Bn254);
    let program = Program::from_json(SUM_CIRCUIT.as_bytes()).unwrap();
    let circuit = prover.compile(&program).unwrap();
    let (pk, vk) = prover.setup(&circuit).unwrap();

    let proof = prover
        .prove(&circuit, &pk, &witness(r#"{ "public": [8], "private": [3, 5] }"#))
        .unwrap();
    prover
        .verify(&proof, &vk, &public_witness(r#"{ "public": [8] }"#))
        .unwrap();

    let err = prover
        .prove(&circuit, &pk, &witness(r#"{ "public": [7], "private": [3, 5] }"#))
        .unwrap_err();
    assert!(matches!(err, Error::WitnessNotSatisfied));
}

#[test]
fn proofs_bind_their_public_inputs() {
    let prover = PlonkProver::new(Curve::Bn254);
    let program = Program::from_json(SUM_CIRCUIT.as_bytes()).unwrap();
    let circuit = prover.compile(&program).unwrap();
    let (pk, vk) = prover.setup(&circuit).unwrap();

    let proof = prover
        .prove(&circuit, &pk, &witness(r#"{ "public": [8], "private": [3, 5] }"#))
        .unwrap();
    let err = prover
        .verify(&proof, &vk, &public_witness(r#"{ "public": [9] }"#))
        .unwrap_err();
    assert!(matches!(err, Error::VerifyFailed));
}

#[test]
fn proof_objects_round_trip_through_bytes() {
    let prover = PlonkProver::new(Curve::Bn254);
    let program = Program::from_json(SUM_CIRCUIT.as_bytes()).unwrap();
    let circuit = prover.compile(&program).unwrap();
    let (pk, vk) = prover.setup(&circuit).unwrap();

    let proof = prover
        .prove(&circuit, &pk, &witness(r#"{ "public": [8], "private": [3, 5] }"#))
        .unwrap();

    let proof = PlonkProof::from_bytes(Curve::Bn254, &proof.to_bytes().unwrap()).unwrap();
    let pk = PlonkProvingKey::from_bytes(Curve::Bn254, &pk.to_bytes().unwrap()).unwrap();
    let vk = PlonkVerifyingKey::from_bytes(Curve::Bn254, &vk.to_bytes().unwrap()).unwrap();

    prover
        .verify(&proof, &vk, &public_witness(r#"{ "public": [8] }"#))
        .unwrap();

    // the decoded proving key still proves
    let proof = prover
        .prove(&circuit, &pk, &witness(r#"{ "public": [8], "private": [3, 5] }"#))
        .unwrap();
    prover
        .verify(&proof, &vk, &public_witness(r#"{ "public": [8] }"#))
        .unwrap();
}

#[test]
fn compilation_is_deterministic() {
    let prover = PlonkProver::new(Curve::Bn254);
    let program = Program::from_json(SUM_CIRCUIT.as_bytes()).unwrap();
    let first = prover.compile(&program).unwrap().to_bytes().unwrap();
    let second = prover.compile(&program).unwrap().to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn an_injected_srs_can_replace_the_developer_one() {
    use jf_plonk::proof_system::{PlonkKzgSnark, UniversalSNARK};

    let program = Program::from_json(SUM_CIRCUIT.as_bytes()).unwrap();

    // stand-in for a ceremony artifact, sized generously
    let mut rng = ark_std::rand::thread_rng();
    let srs =
        PlonkKzgSnark::<ark_bn254::Bn254>::universal_setup_for_testing(1 << 8, &mut rng).unwrap();

    let (pk, vk) = zkir_core::plonk::setup_with_srs::<ark_bn254::Bn254>(&program, &srs).unwrap();

    // keys produced from the injected SRS complete the lifecycle
    let prover = PlonkProver::new(Curve::Bn254);
    let circuit = prover.compile(&program).unwrap();
    let proof = prover
        .prove(
            &circuit,
            &PlonkProvingKey::Bn254(pk),
            &witness(r#"{ "public": [8], "private": [3, 5] }"#),
        )
        .unwrap();
    prover
        .verify(
            &proof,
            &PlonkVerifyingKey::Bn254(vk),
            &public_witness(r#"{ "public": [8] }"#),
        )
        .unwrap();
}
