use std::fmt;
use std::io;

use once_cell::sync::OnceCell;

use crate::platform::{SecureSocket, TlsContext, TlsProvider};
use crate::Policy;

/// Lists installed on every hardened socket.
///
/// `None` means discovery failed and the platform defaults are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EnabledSets {
    ciphers: Option<Vec<String>>,
    protocols: Option<Vec<String>>,
}

/// Creates secure sockets restricted to a vetted, ordered set of cipher suites and protocols.
///
/// The first time the lists are needed the factory asks `provider` for a default context,
/// creates a throwaway socket from it, and reads the platform's enabled suites and versions.
/// Those are reordered and filtered by the [`Policy`] and cached for the life of the factory.
/// Discovery runs at most once, also under concurrent first use.
///
/// If discovery fails the factory logs it and hardening becomes a no-op. A connection with
/// platform defaults beats no connection.
pub struct HardenedSocketFactory<P> {
    provider: P,
    policy: Policy,
    enabled: OnceCell<EnabledSets>,
}

impl<P: TlsProvider> HardenedSocketFactory<P> {
    /// Factory using the default [`Policy`].
    pub fn new(provider: P) -> Self {
        Self::with_policy(provider, Policy::default())
    }

    /// Factory applying `policy` to the discovered platform defaults.
    pub fn with_policy(provider: P, policy: Policy) -> Self {
        HardenedSocketFactory {
            provider,
            policy,
            enabled: OnceCell::new(),
        }
    }

    /// Policy the cached lists are derived from.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Cipher suites installed on hardened sockets, or `None` if discovery failed.
    pub fn enabled_cipher_suites(&self) -> Option<&[String]> {
        self.enabled().ciphers.as_deref()
    }

    /// Protocol versions installed on hardened sockets, or `None` if discovery failed.
    pub fn enabled_protocols(&self) -> Option<&[String]> {
        self.enabled().protocols.as_deref()
    }

    /// Create an unconnected hardened socket from `ctx`.
    ///
    /// Errors from the platform are returned unchanged.
    pub fn create_socket<C: TlsContext>(&self, ctx: &C) -> io::Result<C::Socket> {
        let mut socket = ctx.create_socket()?;
        self.harden(&mut socket)?;
        Ok(socket)
    }

    /// Layer a hardened socket over a connected `transport`.
    ///
    /// `transport`, `host`, `port` and `auto_close` are handed to `ctx` as is.
    /// No handshake is performed.
    pub fn create_layered_socket<C: TlsContext>(
        &self,
        ctx: &C,
        transport: C::Transport,
        host: &str,
        port: u16,
        auto_close: bool,
    ) -> io::Result<C::Socket> {
        let mut socket = ctx.create_layered_socket(transport, host, port, auto_close)?;
        self.harden(&mut socket)?;
        Ok(socket)
    }

    /// Install the cached lists on `socket`.
    ///
    /// Only the enabled cipher suites and protocols are touched. Without
    /// discovered lists nothing is called on the socket.
    pub fn harden<S: SecureSocket + ?Sized>(&self, socket: &mut S) -> io::Result<()> {
        let enabled = self.enabled();

        if let Some(ciphers) = &enabled.ciphers {
            socket.set_enabled_cipher_suites(ciphers)?;
        }
        if let Some(protocols) = &enabled.protocols {
            socket.set_enabled_protocols(protocols)?;
        }

        trace!(
            "Hardened socket (ciphers: {}, protocols: {})",
            enabled.ciphers.is_some(),
            enabled.protocols.is_some()
        );

        Ok(())
    }

    fn enabled(&self) -> &EnabledSets {
        self.enabled.get_or_init(|| self.discover())
    }

    fn discover(&self) -> EnabledSets {
        let (ciphers, protocols) = match query_defaults(&self.provider) {
            Ok(v) => v,
            Err(e) => {
                error!(
                    "Error getting information about available SSL/TLS ciphers and protocols: {}",
                    e
                );
                return EnabledSets::default();
            }
        };

        let ciphers = self.policy.apply_ciphers(&ciphers);
        let protocols = self.policy.apply_protocols(&protocols);

        debug!("Enabled cipher suites: {:?}", ciphers);
        debug!("Enabled protocols: {:?}", protocols);

        EnabledSets {
            ciphers: Some(ciphers),
            protocols: Some(protocols),
        }
    }
}

/// Read the platform defaults off a throwaway socket.
///
/// The socket is dropped on every path out of here.
fn query_defaults<P: TlsProvider>(provider: &P) -> io::Result<(Vec<String>, Vec<String>)> {
    let context = provider.default_context()?;
    let socket = context.create_socket()?;

    let ciphers = socket.enabled_cipher_suites()?;
    let protocols = socket.enabled_protocols()?;

    Ok((ciphers, protocols))
}

impl<P> fmt::Debug for HardenedSocketFactory<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HardenedSocketFactory")
            .field("policy", &self.policy)
            .field("enabled", &self.enabled.get())
            .finish()
    }
}
