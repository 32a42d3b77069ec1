//! Maison registry core.
//!
//! A keyed registry of profile records ("maisons"), one per account, with
//! self-service registration and update, admin-gated rejection, and
//! transferable admin rights.
//!
//! # Architecture
//!
//! The registry is a pure, synchronous state machine. Every operation runs to
//! completion with exclusive access to its state and is all-or-nothing:
//!
//! ```text
//! RegistryService
//!   ├─ AdminAuthority   (single privileged identity)
//!   ├─ MaisonStore      (AccountKey → Maison)
//!   └─ HeightOracle     (stamps updated_at)
//! ```
//!
//! Caller identities are assumed to be authenticated upstream. Persistence
//! and transport are left to the embedding runtime; [`RegistryCall`] and
//! [`CallOutcome`] provide a CBOR envelope for carrying calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod authority;
pub mod call;
pub mod env;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;

pub use authority::AdminAuthority;
pub use call::{CallOutcome, CallValue, CodecError, RegistryCall};
pub use env::{FixedHeight, Height, HeightOracle};
pub use error::{ErrorCode, RegistryError};
pub use registry::RegistryService;
pub use store::{MaisonStore, MemoryStore};
pub use types::{AccountKey, Maison, MaisonStatus};
