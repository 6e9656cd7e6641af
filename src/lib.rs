//! Crop Disease Treatment Advisor
//!
//! Classifies a crop image into a disease label through an external model,
//! then maps the label to treatment recommendations from a delimited dataset
//! and renders supplementary documentation.
//!
//! Core modules:
//! - `data`: dataset ingestion into an immutable record store
//! - `matcher`: crop/label substring filtering with a result cap
//! - `docs`: constrained markdown-subset rendering + label->file index
//! - `export`: BOM-prefixed CSV download encoding
//! - `classify`: opaque inference boundary and probability ranking
//! - `session`: pipeline context owning the current-advice slot
//!
//! The optional `api` feature exposes the pipeline over HTTP (Axum).

pub mod classify;
pub mod config;
pub mod data;
pub mod docs;
pub mod error;
pub mod export;
pub mod matcher;
pub mod session;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use classify::{rank_predictions, ImageClassifier, Prediction};
pub use config::AdvisorConfig;
pub use data::{ParseMode, Record, TabularStore};
pub use docs::DocumentationIndex;
pub use error::AdvisorError;
pub use matcher::{match_recommendations, Recommendation};
pub use session::{Advice, AdvisorSession};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
