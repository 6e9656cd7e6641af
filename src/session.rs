//! Advisor Session
//!
//! The pipeline context owned by the caller: dataset snapshot, documentation
//! index, configuration, and the single "current advice" slot read by the
//! export operation.
//!
//! Prediction cycles are serialized by the caller, but a slow early resource
//! fetch can still resolve after a newer one. Commits therefore carry a
//! monotonic request token: a commit older than the latest accepted one is
//! rejected, so stale results never clobber newer ones.

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::{rank_predictions, Prediction};
use crate::config::AdvisorConfig;
use crate::data::TabularStore;
use crate::docs::DocumentationIndex;
use crate::error::AdvisorError;
use crate::export;
use crate::matcher::{match_recommendations, Recommendation};

/// Outcome of one prediction cycle
#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    /// Top-ranked prediction
    pub prediction: Prediction,
    /// Matched treatment rows (possibly empty — a normal outcome)
    pub recommendations: Recommendation,
    /// Rendered documentation HTML, present only when the label resolves in
    /// the documentation index
    pub documentation: Option<String>,
}

/// Pipeline context for one advisor deployment
pub struct AdvisorSession {
    config: AdvisorConfig,
    store: TabularStore,
    docs: DocumentationIndex,
    current: Option<Advice>,
    next_token: u64,
    committed_token: u64,
}

impl AdvisorSession {
    /// Build a session from configuration. A missing dataset or docs
    /// directory degrades (empty store / empty index) and is logged; the
    /// session always comes up usable.
    pub fn new(config: AdvisorConfig) -> Self {
        let store = match TabularStore::load(&config.dataset_path, config.skip_leading_lines) {
            Ok(store) => {
                tracing::info!("dataset loaded: {} records", store.len());
                store
            }
            Err(e) => {
                tracing::warn!("{} — starting with empty store", e);
                TabularStore::empty()
            }
        };
        let docs = DocumentationIndex::from_dir(&config.docs_dir);

        Self::from_parts(config, store, docs)
    }

    /// Assemble a session from pre-built parts (tests, embedders)
    pub fn from_parts(
        config: AdvisorConfig,
        store: TabularStore,
        docs: DocumentationIndex,
    ) -> Self {
        Self {
            config,
            store,
            docs,
            current: None,
            next_token: 0,
            committed_token: 0,
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn store(&self) -> &TabularStore {
        &self.store
    }

    /// Run the matching/documentation pipeline for one model output.
    ///
    /// Ranks the predictions itself, takes the top label, filters the store
    /// by crop keyword + label, and renders documentation when the label
    /// resolves. Read-only: the current slot changes only via `commit`.
    pub fn advise(&self, predictions: Vec<Prediction>) -> Result<Advice, AdvisorError> {
        let ranked = rank_predictions(predictions);
        let top = ranked.into_iter().next().ok_or(AdvisorError::NoPrediction)?;

        let recommendations = match_recommendations(
            &self.store,
            &self.config.crop_keyword,
            &top.label,
            self.config.max_recommendations,
        );
        tracing::debug!(
            "label '{}': {} recommendation rows",
            top.label,
            recommendations.rows.len()
        );

        // Documentation is an optional stage: unknown labels simply render
        // without it
        let documentation = self.docs.fetch_html(&top.label).ok();

        Ok(Advice {
            prediction: top,
            recommendations,
            documentation,
        })
    }

    /// Rendered documentation HTML for an arbitrary label lookup
    pub fn docs_html(&self, label: &str) -> Result<String, AdvisorError> {
        self.docs.fetch_html(label)
    }

    /// Start a prediction cycle; the returned token orders its commit
    pub fn begin_request(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Publish a cycle's advice. Returns false (slot untouched) when a newer
    /// request already committed.
    pub fn commit(&mut self, token: u64, advice: Advice) -> bool {
        if token < self.committed_token {
            tracing::debug!("discarding stale result (token {} < {})", token, self.committed_token);
            return false;
        }
        self.committed_token = token;
        self.current = Some(advice);
        true
    }

    /// The advice consumed by table rendering and export
    pub fn current(&self) -> Option<&Advice> {
        self.current.as_ref()
    }

    /// Encode the current recommendations for download.
    ///
    /// No advice yet, or advice with zero rows, is a user-facing "nothing to
    /// export" rejection; no file is produced.
    pub fn export_current(&self, date: NaiveDate) -> Result<(String, Vec<u8>), AdvisorError> {
        let advice = self.current.as_ref().ok_or(AdvisorError::NothingToExport)?;
        let bytes = export::encode(
            &advice.recommendations.headers,
            &advice.recommendations.rows,
        )?;
        let filename =
            export::export_filename(&self.config.export_prefix, &advice.prediction.label, date);
        Ok((filename, bytes))
    }

    /// Replace the dataset snapshot wholesale, degrading to empty on failure
    pub fn reload_dataset(&mut self) {
        self.store = match TabularStore::load(&self.config.dataset_path, self.config.skip_leading_lines)
        {
            Ok(store) => {
                tracing::info!("dataset reloaded: {} records", store.len());
                store
            }
            Err(e) => {
                tracing::warn!("{} — store now empty", e);
                TabularStore::empty()
            }
        };
    }
}
