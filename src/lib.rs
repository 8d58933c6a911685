//! Cipher suite and protocol hardening for platform TLS sockets.
//!
//! A [`HardenedSocketFactory`] restricts every socket it creates to a reordered,
//! filtered projection of what the platform enables by default:
//!
//! * Preferred suites and versions come first, in the order of the [`Policy`].
//! * Blacklisted suites (export grade, single DES) are never enabled.
//! * Names the policy doesn't know are kept, after the known ones, in platform order.
//!   New algorithms showing up in a platform update stay enabled instead of being dropped.
//! * Nothing is ever enabled that the platform didn't enable itself.
//!
//! The platform is reached through the traits in [`platform`]. Certificate
//! validation, hostname checks and the handshake itself stay with the platform.
//!
//! ```
//! use carteggio_tls::{reorder, ORDERED_KNOWN_PROTOCOLS};
//!
//! let enabled = reorder(&["TLSv1", "TLSv1.2", "SSLv3"], ORDERED_KNOWN_PROTOCOLS, &[] as &[&str]);
//! assert_eq!(enabled, ["TLSv1.2", "TLSv1", "SSLv3"]);
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

#[macro_use]
extern crate log;

mod error;
pub use error::{Error, Table};

mod tables;
pub use tables::{BLACKLISTED_CIPHERS, ORDERED_KNOWN_CIPHERS, ORDERED_KNOWN_PROTOCOLS};

mod reorder;
pub use reorder::{dedup_stable, reorder};

mod policy;
pub use policy::{Policy, PolicyBuilder};

pub mod platform;

mod factory;
pub use factory::HardenedSocketFactory;

pub mod memory;
