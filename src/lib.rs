//! stubforge: deterministic interface stubs from reflection dumps.
//!
//! The engine turns a JSON reflection dump (the members a host runtime
//! observed on its live types and functions) into byte-stable textual
//! interface declarations for external static-analysis tooling. It
//! never parses source code, never evaluates deferred type expressions,
//! and performs no I/O of its own; persistence is the
//! [`sidecar::SidecarStore`] collaborator's job.
//!
//! Components:
//! - [`bijective::BijectiveMap`]: a strict one-to-one map over two
//!   domains sharing one storage.
//! - [`classifier::MemberClassifier`]: tags each dumped member with the
//!   category the emitter renders it as.
//! - [`signature`]: reconstructs parameter lists and return suffixes
//!   from partial runtime metadata.
//! - [`emitter::StubEmitter`]: assembles headers, sections, and `def`
//!   lines into declaration text.
//! - [`generator::StubGenerator`]: the facade dispatching the above per
//!   type, function, or whole module.

pub mod bijective;
pub mod classifier;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod model;
pub mod sidecar;
pub mod signature;
pub mod types;

pub use bijective::BijectiveMap;
pub use config::Config;
pub use error::{Error, Result};
pub use generator::StubGenerator;
pub use model::{DeclKind, Registry, Slot};
pub use sidecar::{SidecarStore, WriteOutcome};
pub use types::*;
