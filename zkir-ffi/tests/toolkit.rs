//! Lifecycle tests for the handle surface: compile/setup/prove/verify by id,
//! registry semantics, and the byte-reply conventions.

use zkir_ffi::{status, Toolkit};

const SUM_CIRCUIT: &[u8] = br#"{
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

const BN254: u64 = 1;

fn unpack_pair(reply: [u8; 16]) -> (i64, i64) {
    (
        i64::from_be_bytes(reply[..8].try_into().unwrap()),
        i64::from_be_bytes(reply[8..].try_into().unwrap()),
    )
}

fn unpack_payload(reply: Vec<u8>) -> Result<Vec<u8>, i64> {
    let code = i64::from_be_bytes(reply[..8].try_into().unwrap());
    if code == status::OK {
        Ok(reply[8..].to_vec())
    } else {
        Err(code)
    }
}

#[test]
fn groth16_lifecycle_by_handle() {
    let toolkit = Toolkit::new();

    let prover = toolkit.groth16_create(BN254);
    assert_ne!(prover, 0);

    let circuit = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    assert!(circuit > 0);

    let (pk, vk) = unpack_pair(toolkit.groth16_setup(prover, circuit));
    assert!(pk > 0 && vk > 0);

    let proof = unpack_payload(toolkit.groth16_prove(
        prover,
        circuit,
        pk,
        br#"{ "public": [8], "private": [3, 5] }"#,
    ))
    .unwrap();

    assert_eq!(
        toolkit.groth16_verify(prover, vk, &proof, br#"{ "public": [8] }"#),
        status::OK
    );
    assert_eq!(
        toolkit.groth16_verify(prover, vk, &proof, br#"{ "public": [9] }"#),
        status::VERIFY_ERROR
    );

    // removing the prover invalidates further calls but not the artifacts
    toolkit.groth16_remove(prover);
    let reply = toolkit.groth16_prove(
        prover,
        circuit,
        pk,
        br#"{ "public": [8], "private": [3, 5] }"#,
    );
    assert_eq!(unpack_payload(reply).unwrap_err(), status::PROVER_NOT_FOUND);

    // the verifying key can still be serialized, until it is removed too
    assert!(unpack_payload(toolkit.object_serialize(vk)).is_ok());
    toolkit.object_remove(vk);
    assert_eq!(
        unpack_payload(toolkit.object_serialize(vk)).unwrap_err(),
        status::OBJECT_NOT_FOUND
    );
}

#[test]
fn plonk_lifecycle_by_handle() {
    let toolkit = Toolkit::new();

    let prover = toolkit.plonk_create(BN254);
    assert_ne!(prover, 0);

    let circuit = toolkit.plonk_compile(BN254, SUM_CIRCUIT);
    assert!(circuit > 0);

    let (pk, vk) = unpack_pair(toolkit.plonk_setup(prover, circuit));
    assert!(pk > 0 && vk > 0);

    let proof = toolkit.plonk_prove(
        prover,
        circuit,
        pk,
        br#"{ "public": [8], "private": [3, 5] }"#,
    );
    assert!(proof > 0);

    assert_eq!(
        toolkit.plonk_verify(prover, vk, proof, br#"{ "public": [8] }"#),
        status::OK
    );
    assert_eq!(
        toolkit.plonk_verify(prover, vk, proof, br#"{ "public": [9] }"#),
        status::VERIFY_ERROR
    );

    // a proof is an object like any other: serializable, then removable
    assert!(unpack_payload(toolkit.object_serialize(proof)).is_ok());
    toolkit.object_remove(proof);
    assert_eq!(
        toolkit.plonk_verify(prover, vk, proof, br#"{ "public": [8] }"#),
        status::OBJECT_NOT_FOUND
    );
}

#[test]
fn bad_documents_map_to_fixed_codes() {
    let toolkit = Toolkit::new();

    assert_eq!(
        toolkit.groth16_compile(BN254, b"not json"),
        status::CIRCUIT_PARSE_ERROR
    );

    // arity violation: add with one input
    let bad_arity = br#"{
        "public_len": 0, "private_len": 1, "local_len": 1,
        "operations": [ { "op": "add",
            "in": [ { "t": "private", "v": 0 } ],
            "out": [ { "t": "local", "v": 0 } ] } ]
    }"#;
    assert_eq!(toolkit.groth16_compile(BN254, bad_arity), status::COMPILE_ERROR);

    // unsupported curve ids fail creation and compilation
    assert_eq!(toolkit.groth16_create(7), 0);
    assert_eq!(toolkit.plonk_create(99), 0);
    assert_eq!(
        toolkit.groth16_compile(7, SUM_CIRCUIT),
        status::UNSUPPORTED_CURVE
    );

    // malformed witness at prove time
    let prover = toolkit.groth16_create(BN254);
    let circuit = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    let (pk, _vk) = unpack_pair(toolkit.groth16_setup(prover, circuit));
    let reply = toolkit.groth16_prove(prover, circuit, pk, br#"{ "public": ["0xzz"] }"#);
    assert_eq!(
        unpack_payload(reply).unwrap_err(),
        status::WITNESS_PARSE_ERROR
    );

    // handles of the wrong kind are cast errors
    let reply = toolkit.groth16_prove(prover, pk, pk, br#"{ "public": [8] }"#);
    assert_eq!(unpack_payload(reply).unwrap_err(), status::CAST_ERROR);

    // a Groth16 compiled circuit cannot feed a PLONK setup
    let plonk_prover = toolkit.plonk_create(BN254);
    let (code, _) = unpack_pair(toolkit.plonk_setup(plonk_prover, circuit));
    assert_eq!(code, status::CAST_ERROR);
}

#[test]
fn serialize_deserialize_by_kind() {
    let toolkit = Toolkit::new();

    let circuit = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    let bytes = unpack_payload(toolkit.object_serialize(circuit)).unwrap();

    // kind 3 = Groth16 compiled circuit
    let restored = toolkit.object_deserialize(3, BN254, &bytes);
    assert!(restored > 0);
    assert_ne!(restored, circuit);

    // the restored circuit is usable
    let prover = toolkit.groth16_create(BN254);
    let (pk, vk) = unpack_pair(toolkit.groth16_setup(prover, restored));
    let proof = unpack_payload(toolkit.groth16_prove(
        prover,
        restored,
        pk,
        br#"{ "public": [8], "private": [3, 5] }"#,
    ))
    .unwrap();
    assert_eq!(
        toolkit.groth16_verify(prover, vk, &proof, br#"{ "public": [8] }"#),
        status::OK
    );

    // unknown kinds and reserved proof kind are rejected
    assert_eq!(
        toolkit.object_deserialize(42, BN254, &bytes),
        status::DESERIALIZE_ERROR
    );
    assert_eq!(
        toolkit.object_deserialize(7, BN254, &bytes),
        status::DESERIALIZE_ERROR
    );
    // garbage bytes for a valid kind
    assert_eq!(
        toolkit.object_deserialize(2, BN254, b"garbage"),
        status::DESERIALIZE_ERROR
    );
}

#[test]
fn artifacts_survive_the_filesystem() {
    let toolkit = Toolkit::new();

    let circuit = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    let path = std::env::temp_dir().join(format!(
        "zkir-circuit-{}.bin",
        std::process::id()
    ));
    let path = path.to_str().unwrap();

    assert_eq!(toolkit.object_write_to_file(circuit, path), status::OK);
    let restored = toolkit.object_read_from_file(3, BN254, path);
    assert!(restored > 0);

    assert_eq!(
        toolkit.object_read_from_file(3, BN254, "/nonexistent/zkir.bin"),
        status::FILE_READ_ERROR
    );

    let _ = std::fs::remove_file(path);
}

#[test]
fn solidity_export_requires_a_groth16_vk() {
    let toolkit = Toolkit::new();

    let prover = toolkit.groth16_create(BN254);
    let circuit = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    let (pk, vk) = unpack_pair(toolkit.groth16_setup(prover, circuit));

    let source = unpack_payload(toolkit.object_export_solidity(vk)).unwrap();
    let source = String::from_utf8(source).unwrap();
    assert!(source.contains("contract Groth16Verifier"));

    assert_eq!(
        unpack_payload(toolkit.object_export_solidity(pk)).unwrap_err(),
        status::CAST_ERROR
    );
    assert_eq!(
        unpack_payload(toolkit.object_export_solidity(999_999)).unwrap_err(),
        status::OBJECT_NOT_FOUND
    );
}

#[test]
fn object_ids_are_monotone_across_kinds() {
    let toolkit = Toolkit::new();
    let a = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    let b = toolkit.plonk_compile(BN254, SUM_CIRCUIT);
    let c = toolkit.groth16_compile(BN254, SUM_CIRCUIT);
    assert!(a < b && b < c);

    toolkit.object_remove(b);
    let d = toolkit.plonk_compile(BN254, SUM_CIRCUIT);
    assert!(d > c, "freed ids must never be reissued");
}
