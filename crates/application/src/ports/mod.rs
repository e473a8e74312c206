//! Port definitions for external collaborators
//!
//! Infrastructure adapters implement these traits; services only see the trait.

pub mod classifier_port;

pub use classifier_port::ClassifierPort;
#[cfg(test)]
pub use classifier_port::MockClassifierPort;
