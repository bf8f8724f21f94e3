//! Speaker fan-out and single-speaker regeneration.

use super::{CoordinatorError, GenerationCoordinator, PanelFailure, SpeakerGenerationReport};
use crate::ports::generation::GenerationProvider;
use crate::ports::progress::{GenerationStage, ProgressNotifier};
use crate::ports::search::SearchProvider;
use agenda_domain::research::attach_profile_links;
use agenda_domain::{
    BatchId, PanelId, PromptTemplate, ResponseSchema, SearchHit, Speaker, SpeakerId,
    SpeakerProfile, extract_speakers, validate_speakers,
};
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use tracing::{info, warn};

impl<G, S> GenerationCoordinator<G, S>
where
    G: GenerationProvider + ?Sized + 'static,
    S: SearchProvider + ?Sized + 'static,
{
    /// Generate speakers for every panel in `panel_ids` concurrently.
    ///
    /// Each panel's request runs as its own task and attaches its result to
    /// that panel as soon as it completes. A failure is captured in the
    /// report and never affects the other panels. A panel that already has
    /// a generation in flight is reported as a conflict instead of being
    /// generated twice.
    ///
    /// If the cancellation token fires, this returns
    /// [`CoordinatorError::Cancelled`] immediately; requests already sent
    /// keep running and still apply to their panels.
    pub async fn generate_speakers(
        &self,
        panel_ids: &[PanelId],
        progress: &dyn ProgressNotifier,
    ) -> Result<SpeakerGenerationReport, CoordinatorError> {
        self.check_cancelled()?;
        info!("Generating speakers for {} panels", panel_ids.len());
        progress.on_stage_start(GenerationStage::Speakers, panel_ids.len());

        let batch = self.store.new_batch();
        let mut pending = FuturesUnordered::new();

        for panel_id in panel_ids {
            let coordinator = self.clone();
            let task_panel = panel_id.clone();
            // Detached on drop: an abandoned fan-out does not abort its requests.
            let handle = tokio::spawn(async move {
                coordinator.generate_for_panel(&task_panel, batch).await
            });
            let panel_id = panel_id.clone();
            pending.push(async move { (panel_id, handle.await) });
        }

        let mut report = SpeakerGenerationReport::default();

        loop {
            let next = match &self.cancellation_token {
                Some(token) => tokio::select! {
                    _ = token.cancelled() => {
                        warn!("Speaker generation abandoned; running requests will still apply");
                        return Err(CoordinatorError::Cancelled);
                    }
                    next = pending.next() => next,
                },
                None => pending.next().await,
            };
            let Some((panel_id, joined)) = next else {
                break;
            };

            let result = joined.unwrap_or_else(|e| Err(CoordinatorError::TaskFailed(e.to_string())));
            match result {
                Ok(count) => {
                    info!("Panel {} received {} speakers", panel_id, count);
                    progress.on_panel_complete(GenerationStage::Speakers, &panel_id, true);
                    report.succeeded.push((panel_id, count));
                }
                Err(error) => {
                    if error.is_conflict() {
                        warn!("Skipped panel {}: {}", panel_id, error);
                    } else {
                        warn!("Speaker generation for panel {} failed: {}", panel_id, error);
                    }
                    progress.on_panel_complete(GenerationStage::Speakers, &panel_id, false);
                    report.failed.push(PanelFailure { panel_id, error });
                }
            }
        }

        progress.on_stage_complete(GenerationStage::Speakers);
        Ok(report)
    }

    async fn generate_for_panel(
        &self,
        panel_id: &PanelId,
        batch: BatchId,
    ) -> Result<usize, CoordinatorError> {
        self.store.begin_speaker_generation(panel_id)?;
        let result = self.attach_generated_speakers(panel_id, batch).await;
        self.store.end_speaker_generation(panel_id);
        result
    }

    async fn attach_generated_speakers(
        &self,
        panel_id: &PanelId,
        batch: BatchId,
    ) -> Result<usize, CoordinatorError> {
        let topic = self.store.panel(panel_id)?.suggested_topic;
        let references = self.references(&topic).await;

        let prompt =
            PromptTemplate::speakers(&topic, self.params.speakers_per_panel, &references);
        let text = self
            .complete(
                GenerationStage::Speakers,
                Some(panel_id),
                &prompt,
                ResponseSchema::speakers(),
            )
            .await?;

        let profiles =
            self.accepted_speakers(GenerationStage::Speakers, panel_id, &text, &references);
        if profiles.is_empty() {
            warn!("No speakers found in the response for panel {}", panel_id);
        }

        let attached = self.store.attach_speakers(panel_id, batch, profiles)?;
        if let Err(e) = self.persist() {
            // Keep the panel as it was, so the failure report matches the state
            let ids: Vec<SpeakerId> = attached.into_iter().map(|s| s.id).collect();
            self.store.detach_speakers(panel_id, batch, &ids);
            return Err(e);
        }
        Ok(attached.len())
    }

    /// Replace one speaker with a freshly generated one.
    ///
    /// The replacement keeps the speaker's id and starts unconfirmed. Unlike
    /// the fan-out, a response without a single valid speaker is an error.
    pub async fn regenerate_speaker(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
        progress: &dyn ProgressNotifier,
    ) -> Result<Speaker, CoordinatorError> {
        self.check_cancelled()?;
        self.store.begin_speaker_regeneration(panel_id, speaker_id)?;
        progress.on_stage_start(GenerationStage::SpeakerRegeneration, 1);

        let result = self.replace_with_generated(panel_id, speaker_id).await;
        self.store.end_speaker_regeneration(panel_id, speaker_id);

        progress.on_panel_complete(GenerationStage::SpeakerRegeneration, panel_id, result.is_ok());
        progress.on_stage_complete(GenerationStage::SpeakerRegeneration);

        let speaker = result?;
        info!("Regenerated speaker {}: {}", speaker.id, speaker.name);
        Ok(speaker)
    }

    async fn replace_with_generated(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
    ) -> Result<Speaker, CoordinatorError> {
        let panel = self.store.panel(panel_id)?;
        let current = self.store.speaker(panel_id, speaker_id)?;
        let existing = panel.speaker_names();
        let references = self.references(&panel.suggested_topic).await;

        let prompt = PromptTemplate::regenerate_speaker(
            &panel.suggested_topic,
            &current.name,
            &existing,
            &references,
        );
        let text = self
            .complete(
                GenerationStage::SpeakerRegeneration,
                Some(panel_id),
                &prompt,
                ResponseSchema::speakers(),
            )
            .await?;

        let profiles = self.accepted_speakers(
            GenerationStage::SpeakerRegeneration,
            panel_id,
            &text,
            &references,
        );
        // Prefer someone not already on the panel, but any valid speaker will do.
        let index = profiles
            .iter()
            .position(|p| !existing.iter().any(|n| n.eq_ignore_ascii_case(&p.name)))
            .unwrap_or(0);
        let profile = profiles
            .into_iter()
            .nth(index)
            .ok_or(CoordinatorError::ExtractionEmpty("speaker"))?;

        let speaker = self.store.replace_speaker(panel_id, speaker_id, profile)?;
        self.persist()?;
        Ok(speaker)
    }

    fn accepted_speakers(
        &self,
        stage: GenerationStage,
        panel_id: &PanelId,
        text: &str,
        references: &[SearchHit],
    ) -> Vec<SpeakerProfile> {
        let mut drafts = extract_speakers(text);
        for draft in &mut drafts {
            attach_profile_links(draft, references);
        }
        let (profiles, rejected) = validate_speakers(drafts);
        self.log_rejections(stage, Some(panel_id), &rejected);
        profiles
    }
}
