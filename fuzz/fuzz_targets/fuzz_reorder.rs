#![no_main]

//! Fuzz target for cipher suite reordering.
//!
//! Input bytes are split in two parts (available names, extra blacklisted names),
//! each byte picking a name from the frozen tables or a handful of unknown ones.
//! Checks that nothing blacklisted or unavailable comes out and that reordering
//! the output again changes nothing.

use libfuzzer_sys::fuzz_target;

use carteggio_tls::{reorder, BLACKLISTED_CIPHERS, ORDERED_KNOWN_CIPHERS};

const UNKNOWN: &[&str] = &[
    "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256",
    "TLS_EMPTY_RENEGOTIATION_INFO_SCSV",
    "tls_rsa_with_aes_128_cbc_sha",
];

fn pick(b: u8) -> &'static str {
    let i = b as usize;
    let n = ORDERED_KNOWN_CIPHERS.len() + BLACKLISTED_CIPHERS.len() + UNKNOWN.len();
    let i = i % n;
    if i < ORDERED_KNOWN_CIPHERS.len() {
        ORDERED_KNOWN_CIPHERS[i]
    } else if i < ORDERED_KNOWN_CIPHERS.len() + BLACKLISTED_CIPHERS.len() {
        BLACKLISTED_CIPHERS[i - ORDERED_KNOWN_CIPHERS.len()]
    } else {
        UNKNOWN[i - ORDERED_KNOWN_CIPHERS.len() - BLACKLISTED_CIPHERS.len()]
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte decides where the blacklist starts.
    let split = 1 + (data[0] as usize) % data.len();
    let (available, blacklist) = data[1..].split_at((split - 1).min(data.len() - 1));

    let available: Vec<&str> = available.iter().map(|b| pick(*b)).collect();
    let mut blacklist: Vec<&str> = blacklist.iter().map(|b| pick(*b)).collect();
    blacklist.extend_from_slice(BLACKLISTED_CIPHERS);

    let out = reorder(&available, ORDERED_KNOWN_CIPHERS, &blacklist);

    for name in &out {
        assert!(!blacklist.contains(&name.as_str()), "blacklisted {name}");
        assert!(available.contains(&name.as_str()), "not available {name}");
    }

    let again = reorder(&out, ORDERED_KNOWN_CIPHERS, &blacklist);
    assert_eq!(out, again);
});
