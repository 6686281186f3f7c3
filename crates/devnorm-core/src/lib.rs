//! devnorm-core — canonical device-telemetry records.
//!
//! Device telemetry arrives in two heterogeneous JSON shapes; this crate
//! detects which one a record matches and converts it into a single canonical
//! shape.
//!
//! # Architecture
//!
//! ```text
//! raw record ──► detect ──┬──► convert_flat ───┬──► CanonicalRecord
//!                         └──► convert_nested ─┘
//! ```
//!
//! The whole pipeline is pure and synchronous: one record in, one record (or
//! one classified [`ValidationError`]) out. Callers that feed many records,
//! load files, or speak a wire protocol live outside this crate.

pub mod config;
pub mod error;
pub mod normalizer;
pub mod types;

pub use error::ValidationError;
pub use normalizer::{convert_flat, convert_nested, detect, normalize};
pub use types::{CanonicalRecord, Location, SourceFormat};
