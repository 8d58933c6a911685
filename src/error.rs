use thiserror::Error;

/// Errors raised when building a [`Policy`](crate::Policy).
///
/// Platform failures are not represented here. They travel as
/// [`std::io::Error`] exactly as the platform produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Empty algorithm name in {0}")]
    EmptyName(Table),

    #[error("Duplicate algorithm name {1} in {0}")]
    DuplicateName(Table, String),

    #[error("Cipher suite {0} is both preferred and blacklisted")]
    PreferredAndBlacklisted(String),
}

/// Which policy table a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    KnownCiphers,
    BlacklistedCiphers,
    KnownProtocols,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Table::*;
        write!(
            f,
            "{}",
            match self {
                KnownCiphers => "known cipher suites",
                BlacklistedCiphers => "blacklisted cipher suites",
                KnownProtocols => "known protocols",
            }
        )
    }
}
