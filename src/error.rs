//! Error Taxonomy
//!
//! Every failure in the advisor pipeline is local and recoverable: a missing
//! dataset degrades to an empty store, a missing document to "no info", a
//! rejected export to a user-facing message. Nothing here terminates the
//! process.

use thiserror::Error;

/// Failures the advisor pipeline can surface to callers
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Dataset fetch failed or returned unusable content.
    /// Callers degrade to an empty store rather than aborting.
    #[error("dataset unavailable: {0}")]
    DatasetUnavailable(String),

    /// No documentation source exists for the predicted label
    #[error("no documentation for label '{0}'")]
    DocumentationUnavailable(String),

    /// Classifier returned an empty ranking
    #[error("classifier returned no predictions")]
    NoPrediction,

    /// External model call failed. The current advice slot keeps its
    /// prior value when this is raised.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Export requested with zero current rows; no file is produced
    #[error("no recommendation rows to export")]
    NothingToExport,

    /// CSV serialization failed while writing the export buffer
    #[error("export encoding failed: {0}")]
    Export(String),
}
