//! HTTP clients for the pipeline's remote collaborators.
//!
//! Every client implements one of the traits in
//! [`reunite_core::services`] and makes exactly one attempt per call. Clients
//! are cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.

mod http;

pub mod cloudinary;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod scorer;
pub mod storage;
pub mod twilio;

pub use cloudinary::CloudinaryUploader;
pub use enrichment::HttpEnricher;
pub use error::{Error, Result};
pub use scorer::HttpMatchScorer;
pub use storage::StorageDownloader;
pub use twilio::TwilioSms;
