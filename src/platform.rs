//! Seams to the platform TLS provider.
//!
//! The hardening code never talks to a TLS library directly. The host implements
//! these traits on top of whatever provider the platform ships, and socket
//! creation, capability queries and handshakes all stay with that provider.
//!
//! Implementations:
//! - [`crate::memory`]: in-process provider that records every call, for tests.

use std::io;

/// A secure socket handle, not yet handshaken.
///
/// Dropping the handle releases it.
pub trait SecureSocket {
    /// Cipher suites currently enabled on this socket, in platform order.
    fn enabled_cipher_suites(&self) -> io::Result<Vec<String>>;

    /// Protocol versions currently enabled on this socket, in platform order.
    fn enabled_protocols(&self) -> io::Result<Vec<String>>;

    /// Restrict the socket to `suites`, in the given order of preference.
    ///
    /// # Errors
    ///
    /// The platform decides what it accepts. A list with no supported suite
    /// is typically rejected.
    fn set_enabled_cipher_suites(&mut self, suites: &[String]) -> io::Result<()>;

    /// Restrict the socket to `protocols`, in the given order of preference.
    fn set_enabled_protocols(&mut self, protocols: &[String]) -> io::Result<()>;
}

/// An initialized TLS context that hands out sockets.
pub trait TlsContext {
    /// Socket type produced by this context.
    type Socket: SecureSocket;

    /// Plain transport a secure socket can be layered over.
    type Transport;

    /// Create an unconnected secure socket.
    fn create_socket(&self) -> io::Result<Self::Socket>;

    /// Layer a secure socket over an already connected `transport`.
    ///
    /// `host` and `port` name the peer. With `auto_close` set, closing the secure
    /// socket also closes `transport`.
    fn create_layered_socket(
        &self,
        transport: Self::Transport,
        host: &str,
        port: u16,
        auto_close: bool,
    ) -> io::Result<Self::Socket>;
}

/// Source of a default TLS context, used to discover platform defaults.
pub trait TlsProvider {
    type Context: TlsContext;

    /// A context initialized with default key material, trust and randomness.
    fn default_context(&self) -> io::Result<Self::Context>;
}
