//! Value Objects - Immutable, identity-less domain primitives

mod auth_signal;
mod classification;
mod digest;

pub use auth_signal::AuthSignal;
pub use classification::Classification;
pub use digest::{StrongDigest, WeakDigest};
