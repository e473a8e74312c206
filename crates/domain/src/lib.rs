//! Domain layer for EmailShield
//!
//! Contains the decision-layer vocabulary: authentication signals, classifier
//! verdicts, decisions, content fingerprints, batch outcomes and report projections.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
