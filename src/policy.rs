use std::collections::HashSet;

use crate::error::{Error, Table};
use crate::reorder::{dedup_stable, reorder};
use crate::tables::{BLACKLISTED_CIPHERS, ORDERED_KNOWN_CIPHERS, ORDERED_KNOWN_PROTOCOLS};

/// Preference and denylist tables applied to platform defaults.
///
/// The default policy is built from [`ORDERED_KNOWN_CIPHERS`], [`BLACKLISTED_CIPHERS`]
/// and [`ORDERED_KNOWN_PROTOCOLS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    known_ciphers: Vec<String>,
    blacklisted_ciphers: Vec<String>,
    known_protocols: Vec<String>,
    full_dedup: bool,
}

impl Policy {
    /// Create a new policy builder, starting from the frozen tables.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder {
            known_ciphers: to_owned(ORDERED_KNOWN_CIPHERS),
            blacklisted_ciphers: to_owned(BLACKLISTED_CIPHERS),
            known_protocols: to_owned(ORDERED_KNOWN_PROTOCOLS),
            full_dedup: true,
        }
    }

    /// Cipher suites in order of preference, strongest first.
    #[inline(always)]
    pub fn known_ciphers(&self) -> &[String] {
        &self.known_ciphers
    }

    /// Cipher suites that are never enabled.
    #[inline(always)]
    pub fn blacklisted_ciphers(&self) -> &[String] {
        &self.blacklisted_ciphers
    }

    /// Protocol versions, newest first.
    #[inline(always)]
    pub fn known_protocols(&self) -> &[String] {
        &self.known_protocols
    }

    /// Whether residual duplicates are removed from the reordered lists.
    #[inline(always)]
    pub fn full_dedup(&self) -> bool {
        self.full_dedup
    }

    /// Reorder the platform's default cipher suites, dropping blacklisted ones.
    pub fn apply_ciphers<S: AsRef<str>>(&self, available: &[S]) -> Vec<String> {
        self.finish(reorder(
            available,
            &self.known_ciphers,
            &self.blacklisted_ciphers,
        ))
    }

    /// Reorder the platform's default protocol versions.
    ///
    /// Protocols have no blacklist. Versions unknown to the policy are passed through.
    pub fn apply_protocols<S: AsRef<str>>(&self, available: &[S]) -> Vec<String> {
        self.finish(reorder(available, &self.known_protocols, &[] as &[&str]))
    }

    fn finish(&self, mut names: Vec<String>) -> Vec<String> {
        if self.full_dedup {
            dedup_stable(&mut names);
        }
        names
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::builder()
            .build()
            .expect("Default policy should always validate")
    }
}

/// Builder for a [`Policy`].
#[derive(Debug)]
pub struct PolicyBuilder {
    known_ciphers: Vec<String>,
    blacklisted_ciphers: Vec<String>,
    known_protocols: Vec<String>,
    full_dedup: bool,
}

impl PolicyBuilder {
    /// Replace the preferred cipher suite order.
    ///
    /// Defaults to [`ORDERED_KNOWN_CIPHERS`].
    pub fn known_ciphers<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.known_ciphers = to_owned(names);
        self
    }

    /// Replace the cipher suite blacklist.
    ///
    /// Defaults to [`BLACKLISTED_CIPHERS`].
    pub fn blacklisted_ciphers<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.blacklisted_ciphers = to_owned(names);
        self
    }

    /// Replace the preferred protocol order.
    ///
    /// Defaults to [`ORDERED_KNOWN_PROTOCOLS`].
    pub fn known_protocols<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.known_protocols = to_owned(names);
        self
    }

    /// Set whether repeated names are removed after reordering.
    ///
    /// Only the first occurrence of a name is kept. The order of what remains
    /// is unchanged. With this off, a platform reporting a name twice leaves the
    /// second copy in the tail. Defaults to true.
    pub fn full_dedup(mut self, enabled: bool) -> Self {
        self.full_dedup = enabled;
        self
    }

    /// Build the policy.
    ///
    /// Fails if a table has an empty or repeated name, or if a cipher suite is
    /// both preferred and blacklisted.
    pub fn build(self) -> Result<Policy, Error> {
        check_table(Table::KnownCiphers, &self.known_ciphers)?;
        check_table(Table::BlacklistedCiphers, &self.blacklisted_ciphers)?;
        check_table(Table::KnownProtocols, &self.known_protocols)?;

        if let Some(name) = self
            .known_ciphers
            .iter()
            .find(|n| self.blacklisted_ciphers.contains(n))
        {
            return Err(Error::PreferredAndBlacklisted(name.clone()));
        }

        Ok(Policy {
            known_ciphers: self.known_ciphers,
            blacklisted_ciphers: self.blacklisted_ciphers,
            known_protocols: self.known_protocols,
            full_dedup: self.full_dedup,
        })
    }
}

fn check_table(table: Table, names: &[String]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if name.is_empty() {
            return Err(Error::EmptyName(table));
        }
        if !seen.insert(name.as_str()) {
            return Err(Error::DuplicateName(table, name.clone()));
        }
    }
    Ok(())
}

fn to_owned<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names.iter().map(|n| n.as_ref().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_frozen_tables() {
        let policy = Policy::default();
        assert_eq!(policy.known_ciphers(), ORDERED_KNOWN_CIPHERS);
        assert_eq!(policy.blacklisted_ciphers(), BLACKLISTED_CIPHERS);
        assert_eq!(policy.known_protocols(), ORDERED_KNOWN_PROTOCOLS);
        assert!(policy.full_dedup());
    }

    #[test]
    fn ciphers_reordered_and_filtered() {
        let policy = Policy::default();
        let out = policy.apply_ciphers(&[
            "SSL_RSA_WITH_RC4_128_MD5",
            "SSL_RSA_EXPORT_WITH_RC4_40_MD5",
            "TLS_FUTURE_SUITE",
            "TLS_RSA_WITH_AES_128_CBC_SHA",
            "SSL_RSA_WITH_DES_CBC_SHA",
            "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
        ]);
        assert_eq!(
            out,
            [
                "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
                "TLS_RSA_WITH_AES_128_CBC_SHA",
                "SSL_RSA_WITH_RC4_128_MD5",
                "TLS_FUTURE_SUITE",
            ]
        );
    }

    #[test]
    fn protocols_pass_unknown_versions() {
        let policy = Policy::default();
        let out = policy.apply_protocols(&["SSLv2Hello", "TLSv1", "TLSv1.3", "TLSv1.2"]);
        assert_eq!(out, ["TLSv1.2", "TLSv1", "SSLv2Hello", "TLSv1.3"]);
    }

    #[test]
    fn cipher_blacklist_does_not_touch_protocols() {
        let policy = Policy::builder()
            .blacklisted_ciphers(&["SSLv3"])
            .build()
            .unwrap();
        assert_eq!(policy.apply_protocols(&["SSLv3"]), ["SSLv3"]);
    }

    #[test]
    fn full_dedup_strips_residual_duplicates() {
        let available = ["X", "TLSv1", "X", "TLSv1"];

        let policy = Policy::default();
        assert_eq!(policy.apply_protocols(&available), ["TLSv1", "X"]);

        let policy = Policy::builder().full_dedup(false).build().unwrap();
        assert_eq!(policy.apply_protocols(&available), ["TLSv1", "X", "X", "TLSv1"]);
    }

    #[test]
    fn custom_tables() {
        let policy = Policy::builder()
            .known_ciphers(&["B", "A"])
            .blacklisted_ciphers(&["C"])
            .known_protocols(&["P2", "P1"])
            .build()
            .unwrap();
        assert_eq!(policy.apply_ciphers(&["A", "C", "B", "D"]), ["B", "A", "D"]);
        assert_eq!(policy.apply_protocols(&["P1", "P2"]), ["P2", "P1"]);
    }

    #[test]
    fn rejects_empty_name() {
        let err = Policy::builder().known_protocols(&["TLSv1.2", ""]).build();
        assert_eq!(err, Err(Error::EmptyName(Table::KnownProtocols)));
    }

    #[test]
    fn rejects_duplicate_name() {
        let err = Policy::builder().blacklisted_ciphers(&["X", "Y", "X"]).build();
        assert_eq!(
            err,
            Err(Error::DuplicateName(Table::BlacklistedCiphers, "X".into()))
        );
    }

    #[test]
    fn rejects_preferred_and_blacklisted() {
        let err = Policy::builder()
            .blacklisted_ciphers(&["TLS_RSA_WITH_AES_128_CBC_SHA"])
            .build();
        assert_eq!(
            err,
            Err(Error::PreferredAndBlacklisted(
                "TLS_RSA_WITH_AES_128_CBC_SHA".into()
            ))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::DuplicateName(Table::KnownCiphers, "A".into()).to_string(),
            "Duplicate algorithm name A in known cipher suites"
        );
        assert_eq!(
            Error::EmptyName(Table::KnownProtocols).to_string(),
            "Empty algorithm name in known protocols"
        );
    }

    mod properties {
        use std::collections::HashSet;

        use proptest::prelude::*;

        use super::super::*;

        const UNKNOWN: &[&str] = &["TLS_FUTURE", "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"];

        fn cipher_name() -> impl Strategy<Value = String> {
            let pool: Vec<&'static str> = ORDERED_KNOWN_CIPHERS[..6]
                .iter()
                .chain(&BLACKLISTED_CIPHERS[..2])
                .chain(UNKNOWN)
                .copied()
                .collect();
            prop::sample::select(pool).prop_map(String::from)
        }

        fn names(max: usize) -> impl Strategy<Value = Vec<String>> {
            prop::collection::vec(cipher_name(), 0..max)
        }

        proptest! {
            #[test]
            fn prop_default_cipher_list_invariants(available in names(20)) {
                let policy = Policy::default();
                let out = policy.apply_ciphers(&available);

                // No duplicates.
                let unique: HashSet<&String> = out.iter().collect();
                prop_assert_eq!(unique.len(), out.len());

                // Exactly the available, non-blacklisted names.
                let expected: HashSet<&String> = available
                    .iter()
                    .filter(|n| !BLACKLISTED_CIPHERS.contains(&n.as_str()))
                    .collect();
                prop_assert_eq!(unique, expected);

                // Known names before every unknown one, in preference order.
                let is_known = |n: &String| ORDERED_KNOWN_CIPHERS.contains(&n.as_str());
                let known_count = out.iter().filter(|n| is_known(*n)).count();
                prop_assert!(out[..known_count].iter().all(|n| is_known(n)));
                let ranks: Vec<usize> = out[..known_count]
                    .iter()
                    .filter_map(|n| ORDERED_KNOWN_CIPHERS.iter().position(|k| *k == n.as_str()))
                    .collect();
                prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
