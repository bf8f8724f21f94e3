//! Topic generation and single-topic regeneration.

use super::{CoordinatorError, GenerationCoordinator};
use crate::ports::generation::GenerationProvider;
use crate::ports::progress::{GenerationStage, ProgressNotifier};
use crate::ports::search::SearchProvider;
use agenda_domain::{
    EventBrief, Panel, PanelId, PanelTopic, PromptTemplate, ResponseSchema, extract_panels,
    validate_panels,
};
use tracing::{info, warn};

impl<G, S> GenerationCoordinator<G, S>
where
    G: GenerationProvider + ?Sized + 'static,
    S: SearchProvider + ?Sized + 'static,
{
    /// Generate the initial panel set for `brief`, replacing any existing panels.
    ///
    /// Extraction is lenient here: a response with no recognisable panels
    /// yields an empty agenda rather than an error. At most
    /// `brief.number_of_panels()` panels are kept.
    pub async fn generate_topics(
        &self,
        brief: EventBrief,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<Panel>, CoordinatorError> {
        self.check_cancelled()?;
        info!(
            "Generating {} topics for '{}'",
            brief.number_of_panels(),
            brief.event_name()
        );
        progress.on_stage_start(GenerationStage::Topics, 1);

        let prompt = PromptTemplate::topics(&brief);
        let result = self
            .complete(GenerationStage::Topics, None, &prompt, ResponseSchema::panels())
            .await;
        progress.on_stage_complete(GenerationStage::Topics);
        let text = result?;

        let topics = self.accepted_topics(GenerationStage::Topics, None, &text);
        if topics.is_empty() {
            warn!("No panel topics found in the generated text");
        }
        let topics: Vec<PanelTopic> = topics.into_iter().take(brief.number_of_panels()).collect();

        self.store.set_brief(brief);
        let panels = self.store.create_panels(topics);
        self.persist()?;

        info!("Created {} panels", panels.len());
        Ok(panels)
    }

    /// Replace one panel's topic, keeping its id, number and speakers.
    ///
    /// The panel is `regenerating` while the request is outstanding. On
    /// success it becomes `draft`; on any failure the previous status is
    /// restored. A second request for the same panel is rejected while the
    /// first is in flight.
    pub async fn regenerate_topic(
        &self,
        panel_id: &PanelId,
        progress: &dyn ProgressNotifier,
    ) -> Result<Panel, CoordinatorError> {
        self.check_cancelled()?;
        let brief = self.store.brief().ok_or(CoordinatorError::NoBrief)?;

        let previous = self.store.begin_topic_regeneration(panel_id)?;
        progress.on_stage_start(GenerationStage::TopicRegeneration, 1);

        let result = match self.persist() {
            Ok(()) => self.replacement_topic(&brief, panel_id).await,
            Err(e) => Err(e),
        };

        let outcome = match result {
            Ok(topic) => self
                .store
                .replace_panel_topic(panel_id, topic.suggested_topic, topic.justification)
                .map_err(CoordinatorError::from),
            Err(e) => Err(e),
        };

        if outcome.is_err() {
            self.store.abort_topic_regeneration(panel_id, previous)?;
        }
        let saved = self.persist();

        progress.on_panel_complete(GenerationStage::TopicRegeneration, panel_id, outcome.is_ok());
        progress.on_stage_complete(GenerationStage::TopicRegeneration);

        let panel = outcome?;
        saved?;
        info!("Regenerated topic for panel {}: {}", panel_id, panel.suggested_topic);
        Ok(panel)
    }

    async fn replacement_topic(
        &self,
        brief: &EventBrief,
        panel_id: &PanelId,
    ) -> Result<PanelTopic, CoordinatorError> {
        let panels = self.store.panels();
        let panel = panels
            .iter()
            .find(|p| &p.id == panel_id)
            .ok_or_else(|| crate::workflow::StoreError::PanelNotFound(panel_id.clone()))?;
        let others: Vec<&Panel> = panels.iter().filter(|p| &p.id != panel_id).collect();

        let prompt = PromptTemplate::regenerate_topic(brief, panel, &others);
        let text = self
            .complete(
                GenerationStage::TopicRegeneration,
                Some(panel_id),
                &prompt,
                ResponseSchema::panels(),
            )
            .await?;

        self.accepted_topics(GenerationStage::TopicRegeneration, Some(panel_id), &text)
            .into_iter()
            .next()
            .ok_or(CoordinatorError::ExtractionEmpty("panel topic"))
    }

    fn accepted_topics(
        &self,
        stage: GenerationStage,
        panel_id: Option<&PanelId>,
        text: &str,
    ) -> Vec<PanelTopic> {
        let (topics, rejected) = validate_panels(extract_panels(text));
        self.log_rejections(stage, panel_id, &rejected);
        topics
    }
}
