//! Progress notification port
//!
//! Defines the interface for reporting progress during generation.

use agenda_domain::PanelId;

/// The coordinated operation being reported on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    Topics,
    Speakers,
    TopicRegeneration,
    SpeakerRegeneration,
}

impl GenerationStage {
    pub fn as_str(&self) -> &str {
        match self {
            GenerationStage::Topics => "topics",
            GenerationStage::Speakers => "speakers",
            GenerationStage::TopicRegeneration => "topic_regeneration",
            GenerationStage::SpeakerRegeneration => "speaker_regeneration",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            GenerationStage::Topics => "Generating topics",
            GenerationStage::Speakers => "Generating speakers",
            GenerationStage::TopicRegeneration => "Regenerating topic",
            GenerationStage::SpeakerRegeneration => "Regenerating speaker",
        }
    }
}

impl std::fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Callback for progress updates during generation
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts with the number of requests it will issue
    fn on_stage_start(&self, stage: GenerationStage, total_tasks: usize);

    /// Called when the request for one panel completes
    fn on_panel_complete(&self, stage: GenerationStage, panel: &PanelId, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: GenerationStage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: GenerationStage, _total_tasks: usize) {}
    fn on_panel_complete(&self, _stage: GenerationStage, _panel: &PanelId, _success: bool) {}
    fn on_stage_complete(&self, _stage: GenerationStage) {}
}
