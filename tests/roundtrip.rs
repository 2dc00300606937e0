//! Round-trip and growth properties shared by both codec editions.

use base32_codec::{Engine, decode, encode};
use quickcheck::quickcheck;
use rand::RngCore;

quickcheck! {
    fn roundtrip(data: Vec<u8>) -> bool {
        decode(&encode(&data)).unwrap() == data
    }

    fn length_law(data: Vec<u8>) -> bool {
        encode(&data).len() == data.len().div_ceil(5) * 8
    }

    fn alphabet_closure(data: Vec<u8>) -> bool {
        encode(&data)
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b) || b == b'=')
    }

    fn case_insensitive(data: Vec<u8>) -> bool {
        let encoded = encode(&data);
        decode(&encoded.to_lowercase()) == decode(&encoded)
    }

    fn editions_agree(data: Vec<u8>) -> bool {
        let mut engine = Engine::new();
        let encoded = encode(&data);
        engine.encode(&data).unwrap() == encoded
            && engine.decode(&encoded).unwrap() == data
    }
}

#[test]
fn large_inputs_survive_buffer_growth() {
    let mut rng = rand::rng();
    let mut engine = Engine::new();
    let mut last_pages = engine.pages();

    // Sizes straddling page boundaries force several growths on one
    // instance; each round-trip must agree with the table-driven edition
    for size in [0usize, 1, 4_093, 65_536, 131_071, 262_144, 524_288] {
        let mut data = vec![0u8; size];
        rng.fill_bytes(&mut data);

        let encoded = engine.encode(&data).unwrap();
        assert_eq!(encoded.len(), size.div_ceil(5) * 8);
        assert_eq!(encoded, encode(&data), "size {}", size);
        assert_eq!(engine.decode(&encoded).unwrap(), data, "size {}", size);

        assert!(engine.pages() >= last_pages);
        last_pages = engine.pages();
    }

    assert!(last_pages > 1, "test never forced a growth");
}

#[test]
fn growth_boundary_does_not_corrupt_output() {
    // Walk input sizes right around a page's worth of projected space so
    // output lands on both sides of a growth boundary
    let mut engine = Engine::new();
    for size in 21_700..21_810 {
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        let encoded = engine.encode(&data).unwrap();
        assert_eq!(encoded, encode(&data), "size {}", size);
        assert_eq!(engine.decode(&encoded).unwrap(), data, "size {}", size);
    }
}
