//! Frozen preference and denylist tables.
//!
//! Names use the platform spelling (`TLS_*` / `SSL_*` for cipher suites,
//! `TLSv1.2` style for protocols). Matching is exact and case sensitive.

/// Cipher suites in order of preference, strongest first.
///
/// The order follows the OpenSSL 1.0.1c default.
#[rustfmt::skip]
pub const ORDERED_KNOWN_CIPHERS: &[&str] = &[
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",
    "TLS_DHE_RSA_WITH_AES_256_CBC_SHA",
    "TLS_DHE_DSS_WITH_AES_256_CBC_SHA",
    "TLS_ECDH_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDH_ECDSA_WITH_AES_256_CBC_SHA",
    "TLS_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_3DES_EDE_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_3DES_EDE_CBC_SHA",
    "TLS_ECDH_RSA_WITH_3DES_EDE_CBC_SHA",
    "TLS_ECDH_ECDSA_WITH_3DES_EDE_CBC_SHA",
    "SSL_RSA_WITH_3DES_EDE_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA",
    "TLS_DHE_RSA_WITH_AES_128_CBC_SHA",
    "TLS_DHE_DSS_WITH_AES_128_CBC_SHA",
    "TLS_ECDH_RSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDH_ECDSA_WITH_AES_128_CBC_SHA",
    "TLS_RSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_RC4_128_SHA",
    "TLS_ECDHE_ECDSA_WITH_RC4_128_SHA",
    "TLS_ECDH_RSA_WITH_RC4_128_SHA",
    "TLS_ECDH_ECDSA_WITH_RC4_128_SHA",
    "SSL_DHE_RSA_WITH_3DES_EDE_CBC_SHA",
    "SSL_DHE_DSS_WITH_3DES_EDE_CBC_SHA",
    "SSL_RSA_WITH_RC4_128_SHA",
    "SSL_RSA_WITH_RC4_128_MD5",
];

/// Export-grade and single-DES suites. Never enabled.
#[rustfmt::skip]
pub const BLACKLISTED_CIPHERS: &[&str] = &[
    "SSL_RSA_WITH_DES_CBC_SHA",
    "SSL_DHE_RSA_WITH_DES_CBC_SHA",
    "SSL_DHE_DSS_WITH_DES_CBC_SHA",
    "SSL_RSA_EXPORT_WITH_RC4_40_MD5",
    "SSL_RSA_EXPORT_WITH_DES40_CBC_SHA",
    "SSL_DHE_RSA_EXPORT_WITH_DES40_CBC_SHA",
    "SSL_DHE_DSS_EXPORT_WITH_DES40_CBC_SHA",
];

/// Protocol versions, newest first.
pub const ORDERED_KNOWN_PROTOCOLS: &[&str] = &["TLSv1.2", "TLSv1.1", "TLSv1", "SSLv3"];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(ORDERED_KNOWN_CIPHERS.len(), 27);
        assert_eq!(BLACKLISTED_CIPHERS.len(), 7);
        assert_eq!(ORDERED_KNOWN_PROTOCOLS.len(), 4);
    }

    #[test]
    fn known_ciphers_bounds() {
        assert_eq!(ORDERED_KNOWN_CIPHERS[0], "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA");
        assert_eq!(ORDERED_KNOWN_CIPHERS[1], "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA");
        assert_eq!(ORDERED_KNOWN_CIPHERS[25], "SSL_RSA_WITH_RC4_128_SHA");
        assert_eq!(ORDERED_KNOWN_CIPHERS[26], "SSL_RSA_WITH_RC4_128_MD5");
    }

    #[test]
    fn blacklist_disjoint_from_preferred() {
        let known: HashSet<_> = ORDERED_KNOWN_CIPHERS.iter().collect();
        assert!(BLACKLISTED_CIPHERS.iter().all(|c| !known.contains(c)));
    }

    #[test]
    fn no_duplicates() {
        for table in [ORDERED_KNOWN_CIPHERS, BLACKLISTED_CIPHERS, ORDERED_KNOWN_PROTOCOLS] {
            let set: HashSet<_> = table.iter().collect();
            assert_eq!(set.len(), table.len());
        }
    }
}
