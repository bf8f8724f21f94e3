//! Generation coordinator use case
//!
//! Bridges the [`WorkflowStore`] to the generation and search providers,
//! running every provider response through extraction and validation
//! before it reaches the store.
//!
//! | Operation              | Provider calls      | Store effect                          |
//! |------------------------|---------------------|---------------------------------------|
//! | `generate_topics`      | 1                   | replaces the panel set                |
//! | `generate_speakers`    | 1 per panel, fan-out| appends a batch to each panel         |
//! | `regenerate_topic`     | 1                   | replaces topic fields, keeps identity |
//! | `regenerate_speaker`   | 1                   | replaces one speaker, keeps its id    |
//!
//! Every mutation is persisted through the [`AgendaRepository`] before the
//! operation returns. With [`ConfirmationSync::Reload`] the store is then
//! refreshed from the repository.

mod speakers;
mod topics;
mod types;

pub use types::{CoordinatorError, PanelFailure, SpeakerGenerationReport};

use crate::config::GenerationParams;
use crate::ports::generation::{CompletionOptions, GenerationProvider};
use crate::ports::generation_log::{GenerationEvent, GenerationLogger, NoGenerationLogger};
use crate::ports::progress::GenerationStage;
use crate::ports::repository::{AgendaRepository, NoPersistence};
use crate::ports::search::{NoSearch, SearchProvider};
use crate::workflow::WorkflowStore;
use agenda_domain::research::speaker_query;
use agenda_domain::{
    ConfirmationSync, Panel, PanelId, PanelStatus, PromptTemplate, Rejected, ResponseSchema,
    SearchHit, Speaker, SpeakerId,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for coordinated agenda generation
///
/// `G` and `S` may be trait objects when the adapters are chosen at runtime.
pub struct GenerationCoordinator<
    G: GenerationProvider + ?Sized + 'static,
    S: SearchProvider + ?Sized + 'static = NoSearch,
> {
    pub(super) provider: Arc<G>,
    pub(super) search: Arc<S>,
    pub(super) store: Arc<WorkflowStore>,
    pub(super) repository: Arc<dyn AgendaRepository>,
    pub(super) logger: Arc<dyn GenerationLogger>,
    pub(super) params: GenerationParams,
    pub(super) cancellation_token: Option<CancellationToken>,
}

impl<G, S> Clone for GenerationCoordinator<G, S>
where
    G: GenerationProvider + ?Sized + 'static,
    S: SearchProvider + ?Sized + 'static,
{
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            search: self.search.clone(),
            store: self.store.clone(),
            repository: self.repository.clone(),
            logger: self.logger.clone(),
            params: self.params.clone(),
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}

impl<G: GenerationProvider + ?Sized + 'static> GenerationCoordinator<G, NoSearch> {
    /// Coordinator without web search enrichment.
    pub fn without_search(provider: Arc<G>, store: Arc<WorkflowStore>) -> Self {
        Self::new(provider, Arc::new(NoSearch), store)
    }
}

impl<G, S> GenerationCoordinator<G, S>
where
    G: GenerationProvider + ?Sized + 'static,
    S: SearchProvider + ?Sized + 'static,
{
    pub fn new(provider: Arc<G>, search: Arc<S>, store: Arc<WorkflowStore>) -> Self {
        Self {
            provider,
            search,
            store,
            repository: Arc::new(NoPersistence),
            logger: Arc::new(NoGenerationLogger),
            params: GenerationParams::default(),
            cancellation_token: None,
        }
    }

    pub fn with_repository(mut self, repository: Arc<dyn AgendaRepository>) -> Self {
        self.repository = repository;
        self
    }

    pub fn with_generation_logger(mut self, logger: Arc<dyn GenerationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Let the caller stop waiting on a fan-out.
    ///
    /// Cancelling never aborts requests already dispatched: they complete
    /// and apply to their own panel in the background.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn store(&self) -> &Arc<WorkflowStore> {
        &self.store
    }

    // ==================== Confirmation ====================

    pub fn confirm_topic(&self, panel_id: &PanelId) -> Result<Panel, CoordinatorError> {
        let panel = self.store.set_panel_status(panel_id, PanelStatus::Confirmed)?;
        self.persist()?;
        info!("Confirmed panel {}", panel_id);
        Ok(panel)
    }

    pub fn unconfirm_topic(&self, panel_id: &PanelId) -> Result<Panel, CoordinatorError> {
        let panel = self.store.set_panel_status(panel_id, PanelStatus::Draft)?;
        self.persist()?;
        Ok(panel)
    }

    pub fn set_speaker_confirmed(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
        value: bool,
    ) -> Result<Speaker, CoordinatorError> {
        let speaker = self.store.set_speaker_confirmed(panel_id, speaker_id, value)?;
        self.persist()?;
        Ok(speaker)
    }

    pub fn remove_speaker(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
    ) -> Result<Speaker, CoordinatorError> {
        let speaker = self.store.remove_speaker(panel_id, speaker_id)?;
        self.persist()?;
        info!("Removed speaker {} from panel {}", speaker_id, panel_id);
        Ok(speaker)
    }

    // ==================== Shared helpers ====================

    pub(super) fn check_cancelled(&self) -> Result<(), CoordinatorError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(CoordinatorError::Cancelled);
        }
        Ok(())
    }

    /// Save the current state, then refresh from storage when configured to.
    ///
    /// Runs under the store lock, so a concurrent panel task cannot mutate
    /// the state between the save and the reload.
    pub(super) fn persist(&self) -> Result<(), CoordinatorError> {
        let reload = self.params.confirmation_sync == ConfirmationSync::Reload;
        self.store.sync(|snapshot| {
            self.repository.save(snapshot)?;
            if !reload {
                return Ok(None);
            }
            let reloaded = self.repository.load()?;
            if reloaded.is_some() {
                debug!("Reloaded agenda state after save");
            }
            Ok::<_, CoordinatorError>(reloaded)
        })
    }

    /// One provider request, recorded in the generation log either way.
    pub(super) async fn complete(
        &self,
        stage: GenerationStage,
        panel_id: Option<&PanelId>,
        prompt: &str,
        schema: ResponseSchema,
    ) -> Result<String, CoordinatorError> {
        let mut options = CompletionOptions::default().with_system_prompt(PromptTemplate::system());
        if self.params.structured_output {
            options = options.with_response_schema(schema);
        }

        match self.provider.complete(prompt, &options).await {
            Ok(text) => {
                self.logger.log(GenerationEvent::new(
                    "completion",
                    json!({
                        "stage": stage.as_str(),
                        "panel_id": panel_id.map(PanelId::as_str),
                        "prompt_chars": prompt.len(),
                        "response": text,
                    }),
                ));
                Ok(text)
            }
            Err(e) => {
                warn!("{} failed: {}", stage, e);
                self.logger.log(GenerationEvent::new(
                    "provider_error",
                    json!({
                        "stage": stage.as_str(),
                        "panel_id": panel_id.map(PanelId::as_str),
                        "prompt_chars": prompt.len(),
                        "error": e.to_string(),
                    }),
                ));
                Err(e.into())
            }
        }
    }

    /// Search hits for a topic. Search is advisory: failures yield none.
    pub(super) async fn references(&self, topic: &str) -> Vec<SearchHit> {
        match self.search.search(&speaker_query(topic)).await {
            Ok(mut hits) => {
                hits.truncate(self.params.max_references);
                debug!("{} search references for '{}'", hits.len(), topic);
                hits
            }
            Err(e) => {
                warn!("Search for '{}' failed, continuing without references: {}", topic, e);
                Vec::new()
            }
        }
    }

    pub(super) fn log_rejections(
        &self,
        stage: GenerationStage,
        panel_id: Option<&PanelId>,
        rejected: &[(usize, Rejected)],
    ) {
        for (index, rejection) in rejected {
            warn!("{}: dropped record #{} ({})", stage, index + 1, rejection.reason);
            self.logger.log(GenerationEvent::new(
                "rejected",
                json!({
                    "stage": stage.as_str(),
                    "panel_id": panel_id.map(PanelId::as_str),
                    "index": index,
                    "reason": rejection.reason,
                }),
            ));
        }
    }
}
