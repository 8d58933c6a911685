//! In-process TLS provider for testing.
//!
//! Sockets carry name lists only; nothing is encrypted and nothing touches the
//! network. Every call made against the provider, its contexts and its sockets
//! is recorded so tests can assert exactly what the hardening code did.
//!
//! ```
//! use carteggio_tls::memory::{Call, MemoryProvider};
//! use carteggio_tls::HardenedSocketFactory;
//!
//! let platform = MemoryProvider::new(
//!     &["SSL_RSA_WITH_RC4_128_MD5", "TLS_RSA_WITH_AES_128_CBC_SHA"],
//!     &["TLSv1", "TLSv1.2"],
//! );
//! let factory = HardenedSocketFactory::new(platform.clone());
//!
//! let socket = factory.create_socket(&platform.context()).unwrap();
//! assert_eq!(socket.cipher_suites(), ["TLS_RSA_WITH_AES_128_CBC_SHA", "SSL_RSA_WITH_RC4_128_MD5"]);
//! assert_eq!(socket.protocols(), ["TLSv1.2", "TLSv1"]);
//! assert!(platform.calls().contains(&Call::DefaultContext));
//! ```

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::platform::{SecureSocket, TlsContext, TlsProvider};

/// A call observed by the in-memory provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DefaultContext,
    CreateSocket {
        socket: usize,
    },
    CreateLayeredSocket {
        socket: usize,
        transport: MemoryTransport,
        host: String,
        port: u16,
        auto_close: bool,
    },
    GetCipherSuites {
        socket: usize,
    },
    GetProtocols {
        socket: usize,
    },
    SetCipherSuites {
        socket: usize,
        suites: Vec<String>,
    },
    SetProtocols {
        socket: usize,
        protocols: Vec<String>,
    },
    Release {
        socket: usize,
    },
}

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fail {
    DefaultContext,
    CreateSocket,
    QueryCipherSuites,
    QueryProtocols,
    SetCipherSuites,
    SetProtocols,
}

/// A stand-in for a connected plain transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTransport(pub String);

#[derive(Debug)]
struct Shared {
    cipher_suites: Vec<String>,
    protocols: Vec<String>,
    failures: Mutex<Vec<Fail>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    live: AtomicUsize,
}

impl Shared {
    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    fn check(&self, op: Fail) -> io::Result<()> {
        if lock(&self.failures).contains(&op) {
            return Err(io::Error::other(format!("{:?} failed", op)));
        }
        Ok(())
    }

    fn new_socket(self: &Arc<Self>) -> MemorySocket {
        self.live.fetch_add(1, Ordering::SeqCst);
        MemorySocket {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            cipher_suites: self.cipher_suites.clone(),
            protocols: self.protocols.clone(),
            layered: None,
            shared: Arc::clone(self),
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// A platform whose sockets come up with the given default suites and versions.
///
/// Clones share state: calls and failures are visible through every clone.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    shared: Arc<Shared>,
}

impl MemoryProvider {
    /// Provider whose sockets support and enable `cipher_suites` and `protocols`.
    pub fn new<S: AsRef<str>, T: AsRef<str>>(cipher_suites: &[S], protocols: &[T]) -> Self {
        MemoryProvider {
            shared: Arc::new(Shared {
                cipher_suites: cipher_suites.iter().map(|s| s.as_ref().to_string()).collect(),
                protocols: protocols.iter().map(|s| s.as_ref().to_string()).collect(),
                failures: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                next_id: AtomicUsize::new(0),
                live: AtomicUsize::new(0),
            }),
        }
    }

    /// Make `op` fail from now on.
    pub fn fail(&self, op: Fail) {
        lock(&self.shared.failures).push(op);
    }

    /// A context on this platform. Not recorded as a call.
    pub fn context(&self) -> MemoryContext {
        MemoryContext {
            shared: Arc::clone(&self.shared),
        }
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.shared.calls).clone()
    }

    /// Number of sockets created and not yet dropped.
    pub fn live_sockets(&self) -> usize {
        self.shared.live.load(Ordering::SeqCst)
    }
}

impl TlsProvider for MemoryProvider {
    type Context = MemoryContext;

    fn default_context(&self) -> io::Result<MemoryContext> {
        self.shared.record(Call::DefaultContext);
        self.shared.check(Fail::DefaultContext)?;
        Ok(self.context())
    }
}

#[derive(Debug, Clone)]
pub struct MemoryContext {
    shared: Arc<Shared>,
}

impl TlsContext for MemoryContext {
    type Socket = MemorySocket;
    type Transport = MemoryTransport;

    fn create_socket(&self) -> io::Result<MemorySocket> {
        self.shared.check(Fail::CreateSocket)?;
        let socket = self.shared.new_socket();
        self.shared.record(Call::CreateSocket { socket: socket.id });
        Ok(socket)
    }

    fn create_layered_socket(
        &self,
        transport: MemoryTransport,
        host: &str,
        port: u16,
        auto_close: bool,
    ) -> io::Result<MemorySocket> {
        self.shared.check(Fail::CreateSocket)?;
        let mut socket = self.shared.new_socket();
        self.shared.record(Call::CreateLayeredSocket {
            socket: socket.id,
            transport: transport.clone(),
            host: host.to_string(),
            port,
            auto_close,
        });
        socket.layered = Some(Layered {
            transport,
            host: host.to_string(),
            port,
            auto_close,
        });
        Ok(socket)
    }
}

#[derive(Debug)]
struct Layered {
    transport: MemoryTransport,
    host: String,
    port: u16,
    auto_close: bool,
}

/// A socket of the in-memory platform.
#[derive(Debug)]
pub struct MemorySocket {
    id: usize,
    cipher_suites: Vec<String>,
    protocols: Vec<String>,
    layered: Option<Layered>,
    shared: Arc<Shared>,
}

impl MemorySocket {
    /// Identifier used in recorded [`Call`]s.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Currently enabled cipher suites.
    pub fn cipher_suites(&self) -> &[String] {
        &self.cipher_suites
    }

    /// Currently enabled protocols.
    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    /// Transport this socket is layered over, if any.
    pub fn transport(&self) -> Option<&MemoryTransport> {
        self.layered.as_ref().map(|l| &l.transport)
    }

    pub fn peer(&self) -> Option<(&str, u16)> {
        self.layered.as_ref().map(|l| (l.host.as_str(), l.port))
    }

    pub fn auto_close(&self) -> Option<bool> {
        self.layered.as_ref().map(|l| l.auto_close)
    }

    fn check_supported(&self, names: &[String], supported: &[String]) -> io::Result<()> {
        if let Some(name) = names.iter().find(|n| !supported.contains(n)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Unsupported algorithm: {}", name),
            ));
        }
        Ok(())
    }
}

impl SecureSocket for MemorySocket {
    fn enabled_cipher_suites(&self) -> io::Result<Vec<String>> {
        self.shared.record(Call::GetCipherSuites { socket: self.id });
        self.shared.check(Fail::QueryCipherSuites)?;
        Ok(self.cipher_suites.clone())
    }

    fn enabled_protocols(&self) -> io::Result<Vec<String>> {
        self.shared.record(Call::GetProtocols { socket: self.id });
        self.shared.check(Fail::QueryProtocols)?;
        Ok(self.protocols.clone())
    }

    fn set_enabled_cipher_suites(&mut self, suites: &[String]) -> io::Result<()> {
        self.shared.record(Call::SetCipherSuites {
            socket: self.id,
            suites: suites.to_vec(),
        });
        self.shared.check(Fail::SetCipherSuites)?;
        self.check_supported(suites, &self.shared.cipher_suites)?;
        self.cipher_suites = suites.to_vec();
        Ok(())
    }

    fn set_enabled_protocols(&mut self, protocols: &[String]) -> io::Result<()> {
        self.shared.record(Call::SetProtocols {
            socket: self.id,
            protocols: protocols.to_vec(),
        });
        self.shared.check(Fail::SetProtocols)?;
        self.check_supported(protocols, &self.shared.protocols)?;
        self.protocols = protocols.to_vec();
        Ok(())
    }
}

impl Drop for MemorySocket {
    fn drop(&mut self) {
        self.shared.live.fetch_sub(1, Ordering::SeqCst);
        self.shared.record(Call::Release { socket: self.id });
    }
}
