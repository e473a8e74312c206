//! Adapters implementing application ports

mod http_classifier_adapter;

pub use http_classifier_adapter::HttpClassifierAdapter;
