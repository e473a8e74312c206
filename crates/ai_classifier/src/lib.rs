//! AI Classifier - Client for the spam/phishing classification service
//!
//! The service exposes a single `POST /predict` endpoint that takes
//! `{"text": ...}` and answers with a predicted class and a probability vector.
//! The model behind it is not part of this workspace.

pub mod client;
pub mod config;
pub mod error;
pub mod ports;

pub use client::HttpClassifier;
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use ports::{PredictRequest, PredictResponse, SpamClassifier};
