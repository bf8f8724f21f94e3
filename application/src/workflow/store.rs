//! In-memory workflow store.
//!
//! Every operation takes the store lock for its whole duration, so each is
//! atomic with respect to concurrent callers and operations on the same
//! panel are serialized. No lock is held across an await point.

use super::error::StoreError;
use super::snapshot::AgendaSnapshot;
use agenda_domain::{
    BatchId, EventBrief, Panel, PanelId, PanelStatus, PanelTopic, Speaker, SpeakerId,
    SpeakerProfile,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct AgendaState {
    brief: Option<EventBrief>,
    panels: Vec<Panel>,
    panel_seq: u64,
    speaker_seq: BTreeMap<PanelId, u64>,
    batch_seq: u64,
    // Process-local bookkeeping, never persisted.
    applied_batches: HashMap<PanelId, HashSet<BatchId>>,
    generating: HashSet<PanelId>,
    regenerating_speakers: HashSet<(PanelId, SpeakerId)>,
}

impl AgendaState {
    fn panel(&self, id: &PanelId) -> Result<&Panel, StoreError> {
        self.panels
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::PanelNotFound(id.clone()))
    }

    fn panel_mut(&mut self, id: &PanelId) -> Result<&mut Panel, StoreError> {
        self.panels
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::PanelNotFound(id.clone()))
    }

    fn speaker_mut(
        &mut self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
    ) -> Result<&mut Speaker, StoreError> {
        self.panel_mut(panel_id)?
            .speaker_mut(speaker_id)
            .ok_or_else(|| StoreError::SpeakerNotFound {
                panel: panel_id.clone(),
                speaker: speaker_id.clone(),
            })
    }

    fn to_snapshot(&self) -> AgendaSnapshot {
        AgendaSnapshot {
            brief: self.brief.clone(),
            panels: self.panels.clone(),
            panel_seq: self.panel_seq,
            speaker_seq: self.speaker_seq.clone(),
            batch_seq: self.batch_seq,
        }
    }

    fn apply_snapshot(&mut self, snapshot: AgendaSnapshot) {
        self.brief = snapshot.brief;
        self.panels = snapshot.panels;
        self.panels.sort_by_key(|p| p.panel_number);
        self.panel_seq = snapshot.panel_seq;
        self.speaker_seq = snapshot.speaker_seq;
        self.batch_seq = snapshot.batch_seq;
    }

    fn next_speaker_id(&mut self, panel_id: &PanelId) -> SpeakerId {
        let seq = self.speaker_seq.entry(panel_id.clone()).or_insert(0);
        *seq += 1;
        SpeakerId::for_panel(panel_id, *seq)
    }
}

/// The authoritative collection of panels and their speakers.
///
/// Other components read clones and change state only through these
/// operations. Panel and speaker ids are minted here and never reassigned.
#[derive(Debug, Default)]
pub struct WorkflowStore {
    state: Mutex<AgendaState>,
}

impl WorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a persisted snapshot.
    pub fn from_snapshot(snapshot: AgendaSnapshot) -> Self {
        let store = Self::new();
        store.restore(snapshot);
        store
    }

    fn state(&self) -> MutexGuard<'_, AgendaState> {
        // A panicking holder cannot leave a half-applied mutation behind:
        // every operation validates before it writes.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ==================== Reads ====================

    /// All panels ordered by panel number.
    pub fn panels(&self) -> Vec<Panel> {
        self.state().panels.clone()
    }

    pub fn panel(&self, id: &PanelId) -> Result<Panel, StoreError> {
        self.state().panel(id).cloned()
    }

    pub fn speaker(&self, panel_id: &PanelId, speaker_id: &SpeakerId) -> Result<Speaker, StoreError> {
        let state = self.state();
        state
            .panel(panel_id)?
            .speaker(speaker_id)
            .cloned()
            .ok_or_else(|| StoreError::SpeakerNotFound {
                panel: panel_id.clone(),
                speaker: speaker_id.clone(),
            })
    }

    pub fn brief(&self) -> Option<EventBrief> {
        self.state().brief.clone()
    }

    pub fn snapshot(&self) -> AgendaSnapshot {
        self.state().to_snapshot()
    }

    /// Replace the persisted part of the state with `snapshot`.
    ///
    /// In-flight bookkeeping is kept, so a reload in the middle of a
    /// fan-out does not re-open panels that are still generating.
    pub fn restore(&self, snapshot: AgendaSnapshot) {
        self.state().apply_snapshot(snapshot);
    }

    /// Hand a snapshot to `sync` and restore whatever it returns, all under
    /// the store lock.
    ///
    /// No mutation can land between the snapshot and the restore, so a
    /// save-then-reload never drops a concurrent change. `sync` must not
    /// call back into the store.
    pub fn sync<E>(
        &self,
        sync: impl FnOnce(&AgendaSnapshot) -> Result<Option<AgendaSnapshot>, E>,
    ) -> Result<(), E> {
        let mut state = self.state();
        let snapshot = state.to_snapshot();
        if let Some(reloaded) = sync(&snapshot)? {
            state.apply_snapshot(reloaded);
        }
        Ok(())
    }

    // ==================== Panels ====================

    pub fn set_brief(&self, brief: EventBrief) {
        self.state().brief = Some(brief);
    }

    /// Replace the full panel set.
    ///
    /// A topic keeps its own id when it carries one not yet used in this
    /// batch; otherwise a fresh id is minted, skipping ids already taken. Missing or duplicate panel
    /// numbers are moved past the highest number in use.
    pub fn create_panels(&self, topics: Vec<PanelTopic>) -> Vec<Panel> {
        let mut state = self.state();

        let mut ids: HashSet<PanelId> = HashSet::new();
        let mut numbers: HashSet<u32> = HashSet::new();
        let mut panels = Vec::with_capacity(topics.len());
        let mut unnumbered = Vec::new();

        for topic in topics {
            let id = match topic.id.map(PanelId::new) {
                Some(id) if !ids.contains(&id) => id,
                _ => loop {
                    state.panel_seq += 1;
                    let minted = PanelId::from_seq(state.panel_seq);
                    if !ids.contains(&minted) {
                        break minted;
                    }
                },
            };
            ids.insert(id.clone());

            let mut panel = Panel::new(id, 0, topic.suggested_topic, topic.justification);
            match topic.panel_number {
                Some(n) if numbers.insert(n) => {
                    panel.panel_number = n;
                    panels.push(panel);
                }
                _ => unnumbered.push(panel),
            }
        }

        let mut next = numbers.iter().copied().max().unwrap_or(0);
        for mut panel in unnumbered {
            next += 1;
            panel.panel_number = next;
            panels.push(panel);
        }
        panels.sort_by_key(|p| p.panel_number);

        state.speaker_seq.clear();
        state.applied_batches.clear();
        state.panels = panels;
        debug!("Created {} panels", state.panels.len());
        state.panels.clone()
    }

    /// Replace a panel's topic fields, keeping its id and speakers.
    ///
    /// Resets the status to `draft`, which also ends a regeneration.
    pub fn replace_panel_topic(
        &self,
        panel_id: &PanelId,
        topic: impl Into<String>,
        justification: impl Into<String>,
    ) -> Result<Panel, StoreError> {
        let mut state = self.state();
        let panel = state.panel_mut(panel_id)?;
        panel.suggested_topic = topic.into();
        panel.justification = justification.into();
        panel.status = PanelStatus::Draft;
        Ok(panel.clone())
    }

    /// Guarded status transition.
    ///
    /// - `confirmed` is rejected while the panel is regenerating
    /// - `regenerating` is rejected when already regenerating
    /// - `draft` is always allowed
    ///
    /// Confirming a topic does not look at speakers; speaker confirmation
    /// is a separate, later stage.
    pub fn set_panel_status(
        &self,
        panel_id: &PanelId,
        status: PanelStatus,
    ) -> Result<Panel, StoreError> {
        let mut state = self.state();
        let panel = state.panel_mut(panel_id)?;
        match (panel.status, status) {
            (PanelStatus::Regenerating, PanelStatus::Confirmed) => {
                return Err(StoreError::TransitionConflict(format!(
                    "panel {} is regenerating and cannot be confirmed",
                    panel_id
                )));
            }
            (PanelStatus::Regenerating, PanelStatus::Regenerating) => {
                return Err(StoreError::TransitionConflict(format!(
                    "panel {} is already regenerating",
                    panel_id
                )));
            }
            _ => {}
        }
        panel.status = status;
        Ok(panel.clone())
    }

    /// Mark a panel `regenerating`, returning the status to restore if the
    /// regeneration fails.
    pub fn begin_topic_regeneration(&self, panel_id: &PanelId) -> Result<PanelStatus, StoreError> {
        let mut state = self.state();
        let panel = state.panel_mut(panel_id)?;
        if panel.status == PanelStatus::Regenerating {
            return Err(StoreError::TransitionConflict(format!(
                "panel {} is already regenerating",
                panel_id
            )));
        }
        let previous = panel.status;
        panel.status = PanelStatus::Regenerating;
        Ok(previous)
    }

    /// Put back `previous` if the panel is still marked `regenerating`.
    pub fn abort_topic_regeneration(
        &self,
        panel_id: &PanelId,
        previous: PanelStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        let panel = state.panel_mut(panel_id)?;
        if panel.status == PanelStatus::Regenerating {
            panel.status = previous;
        }
        Ok(())
    }

    // ==================== Speakers ====================

    /// Mint an id for a new generation batch.
    pub fn new_batch(&self) -> BatchId {
        let mut state = self.state();
        state.batch_seq += 1;
        BatchId::new(state.batch_seq)
    }

    /// Claim a panel for speaker generation; rejected while another
    /// generation for the same panel is running.
    pub fn begin_speaker_generation(&self, panel_id: &PanelId) -> Result<(), StoreError> {
        let mut state = self.state();
        state.panel(panel_id)?;
        if !state.generating.insert(panel_id.clone()) {
            return Err(StoreError::TransitionConflict(format!(
                "speakers are already being generated for panel {}",
                panel_id
            )));
        }
        Ok(())
    }

    pub fn end_speaker_generation(&self, panel_id: &PanelId) {
        self.state().generating.remove(panel_id);
    }

    /// Append a generation batch to a panel, minting a new id per speaker.
    pub fn attach_speakers(
        &self,
        panel_id: &PanelId,
        batch: BatchId,
        profiles: Vec<SpeakerProfile>,
    ) -> Result<Vec<Speaker>, StoreError> {
        let mut state = self.state();
        state.panel(panel_id)?;

        let applied = state.applied_batches.entry(panel_id.clone()).or_default();
        if !applied.insert(batch) {
            return Err(StoreError::TransitionConflict(format!(
                "{} was already attached to panel {}",
                batch, panel_id
            )));
        }

        let speakers: Vec<Speaker> = profiles
            .into_iter()
            .map(|profile| Speaker::from_profile(state.next_speaker_id(panel_id), profile))
            .collect();

        state.panel_mut(panel_id)?.speakers.extend(speakers.iter().cloned());
        debug!("Attached {} speakers to panel {}", speakers.len(), panel_id);
        Ok(speakers)
    }

    /// Take back a batch attached by [`attach_speakers`](Self::attach_speakers)
    /// whose result could not be saved.
    ///
    /// Only the batch's own speakers are removed; minted ids stay consumed.
    pub fn detach_speakers(&self, panel_id: &PanelId, batch: BatchId, speaker_ids: &[SpeakerId]) {
        let mut state = self.state();
        if let Some(applied) = state.applied_batches.get_mut(panel_id) {
            applied.remove(&batch);
        }
        if let Ok(panel) = state.panel_mut(panel_id) {
            panel.speakers.retain(|s| !speaker_ids.contains(&s.id));
            debug!("Detached {} from panel {}", batch, panel_id);
        }
    }

    /// Claim one speaker slot for regeneration; rejected while the same
    /// slot is already regenerating.
    pub fn begin_speaker_regeneration(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        state.speaker_mut(panel_id, speaker_id)?;
        if !state
            .regenerating_speakers
            .insert((panel_id.clone(), speaker_id.clone()))
        {
            return Err(StoreError::TransitionConflict(format!(
                "speaker {} is already regenerating",
                speaker_id
            )));
        }
        Ok(())
    }

    pub fn end_speaker_regeneration(&self, panel_id: &PanelId, speaker_id: &SpeakerId) {
        self.state()
            .regenerating_speakers
            .remove(&(panel_id.clone(), speaker_id.clone()));
    }

    pub fn is_speaker_regenerating(&self, panel_id: &PanelId, speaker_id: &SpeakerId) -> bool {
        self.state()
            .regenerating_speakers
            .contains(&(panel_id.clone(), speaker_id.clone()))
    }

    /// Replace every mutable field of a speaker in place.
    ///
    /// The id is kept and `confirmed` is reset to false.
    pub fn replace_speaker(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
        profile: SpeakerProfile,
    ) -> Result<Speaker, StoreError> {
        let mut state = self.state();
        let speaker = state.speaker_mut(panel_id, speaker_id)?;
        speaker.replace_profile(profile);
        Ok(speaker.clone())
    }

    pub fn set_speaker_confirmed(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
        value: bool,
    ) -> Result<Speaker, StoreError> {
        let mut state = self.state();
        let speaker = state.speaker_mut(panel_id, speaker_id)?;
        speaker.confirmed = value;
        Ok(speaker.clone())
    }

    /// Remove a speaker. Rejected while its slot is regenerating, since the
    /// regeneration result would have nowhere to land.
    pub fn remove_speaker(
        &self,
        panel_id: &PanelId,
        speaker_id: &SpeakerId,
    ) -> Result<Speaker, StoreError> {
        let mut state = self.state();
        if state
            .regenerating_speakers
            .contains(&(panel_id.clone(), speaker_id.clone()))
        {
            return Err(StoreError::TransitionConflict(format!(
                "speaker {} is regenerating and cannot be removed",
                speaker_id
            )));
        }
        let panel = state.panel_mut(panel_id)?;
        let index = panel
            .speakers
            .iter()
            .position(|s| &s.id == speaker_id)
            .ok_or_else(|| StoreError::SpeakerNotFound {
                panel: panel_id.clone(),
                speaker: speaker_id.clone(),
            })?;
        Ok(panel.speakers.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(number: Option<u32>, name: &str) -> PanelTopic {
        PanelTopic {
            id: None,
            panel_number: number,
            suggested_topic: name.to_string(),
            justification: String::new(),
        }
    }

    fn profile(name: &str) -> SpeakerProfile {
        SpeakerProfile {
            name: name.to_string(),
            title: "CTO".to_string(),
            expertise: vec!["Rust".to_string()],
            bio: format!("{} bio", name),
            linked_in: None,
            twitter: None,
            image_url: None,
        }
    }

    fn store_with_panel() -> (WorkflowStore, PanelId) {
        let store = WorkflowStore::new();
        let panels = store.create_panels(vec![topic(Some(1), "Async")]);
        let id = panels[0].id.clone();
        (store, id)
    }

    fn store_with_speakers(names: &[&str]) -> (WorkflowStore, PanelId, Vec<SpeakerId>) {
        let (store, panel_id) = store_with_panel();
        let batch = store.new_batch();
        let speakers = store
            .attach_speakers(&panel_id, batch, names.iter().map(|n| profile(n)).collect())
            .unwrap();
        let ids = speakers.into_iter().map(|s| s.id).collect();
        (store, panel_id, ids)
    }

    #[test]
    fn test_create_panels_assigns_ids_and_numbers() {
        let store = WorkflowStore::new();
        let panels = store.create_panels(vec![
            topic(Some(2), "B"),
            topic(None, "C"),
            topic(Some(2), "Duplicate"),
            topic(Some(1), "A"),
        ]);

        let numbers: Vec<_> = panels.iter().map(|p| (p.panel_number, p.suggested_topic.as_str())).collect();
        assert_eq!(numbers, vec![(1, "A"), (2, "B"), (3, "C"), (4, "Duplicate")]);

        let ids: HashSet<_> = panels.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), 4);
        assert!(panels.iter().all(|p| p.status == PanelStatus::Draft));
    }

    #[test]
    fn test_create_panels_never_reuses_ids() {
        let store = WorkflowStore::new();
        let first = store.create_panels(vec![topic(Some(1), "A")]);
        let second = store.create_panels(vec![topic(Some(1), "A")]);
        assert_ne!(first[0].id, second[0].id);
        assert_eq!(store.panels().len(), 1);
    }

    #[test]
    fn test_create_panels_keeps_supplied_ids() {
        let store = WorkflowStore::new();
        let mut with_id = topic(Some(1), "A");
        with_id.id = Some("custom".to_string());
        let panels = store.create_panels(vec![with_id]);
        assert_eq!(panels[0].id, PanelId::new("custom"));
    }

    #[test]
    fn test_minted_ids_skip_supplied_ids() {
        let store = WorkflowStore::new();
        let mut supplied = topic(Some(1), "A");
        supplied.id = Some(PanelId::from_seq(1).as_str().to_string());
        let panels = store.create_panels(vec![supplied, topic(Some(2), "B")]);

        assert_eq!(panels[0].id, PanelId::from_seq(1));
        assert_eq!(panels[1].id, PanelId::from_seq(2));
    }

    #[test]
    fn test_replace_panel_topic_preserves_identity() {
        let (store, panel_id, speaker_ids) = store_with_speakers(&["Ada"]);
        store.set_panel_status(&panel_id, PanelStatus::Confirmed).unwrap();

        let panel = store.replace_panel_topic(&panel_id, "Embedded", "Chips").unwrap();

        assert_eq!(panel.id, panel_id);
        assert_eq!(panel.suggested_topic, "Embedded");
        assert_eq!(panel.status, PanelStatus::Draft);
        assert_eq!(panel.speakers[0].id, speaker_ids[0]);
    }

    #[test]
    fn test_status_guards() {
        let (store, panel_id) = store_with_panel();

        // Confirming with zero speakers is allowed
        store.set_panel_status(&panel_id, PanelStatus::Confirmed).unwrap();
        store.set_panel_status(&panel_id, PanelStatus::Regenerating).unwrap();

        let err = store
            .set_panel_status(&panel_id, PanelStatus::Confirmed)
            .unwrap_err();
        assert!(err.is_conflict());
        let err = store
            .set_panel_status(&panel_id, PanelStatus::Regenerating)
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.panel(&panel_id).unwrap().status, PanelStatus::Regenerating);

        store.set_panel_status(&panel_id, PanelStatus::Draft).unwrap();
    }

    #[test]
    fn test_topic_regeneration_begin_and_abort() {
        let (store, panel_id) = store_with_panel();
        store.set_panel_status(&panel_id, PanelStatus::Confirmed).unwrap();

        let previous = store.begin_topic_regeneration(&panel_id).unwrap();
        assert_eq!(previous, PanelStatus::Confirmed);
        assert!(store.begin_topic_regeneration(&panel_id).unwrap_err().is_conflict());

        store.abort_topic_regeneration(&panel_id, previous).unwrap();
        assert_eq!(store.panel(&panel_id).unwrap().status, PanelStatus::Confirmed);
    }

    #[test]
    fn test_attach_speakers_mints_sequential_ids() {
        let (store, panel_id, ids) = store_with_speakers(&["Ada", "Grace"]);
        assert_eq!(ids[0], SpeakerId::for_panel(&panel_id, 1));
        assert_eq!(ids[1], SpeakerId::for_panel(&panel_id, 2));

        store.remove_speaker(&panel_id, &ids[1]).unwrap();
        let batch = store.new_batch();
        let more = store.attach_speakers(&panel_id, batch, vec![profile("Alan")]).unwrap();
        assert_eq!(more[0].id, SpeakerId::for_panel(&panel_id, 3));
    }

    #[test]
    fn test_attach_same_batch_twice_is_rejected() {
        let (store, panel_id) = store_with_panel();
        let batch = store.new_batch();
        store.attach_speakers(&panel_id, batch, vec![profile("Ada")]).unwrap();

        let err = store
            .attach_speakers(&panel_id, batch, vec![profile("Ada")])
            .unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.panel(&panel_id).unwrap().speakers.len(), 1);
    }

    #[test]
    fn test_attach_to_unknown_panel() {
        let store = WorkflowStore::new();
        let batch = store.new_batch();
        let err = store
            .attach_speakers(&PanelId::new("nope"), batch, vec![profile("Ada")])
            .unwrap_err();
        assert_eq!(err, StoreError::PanelNotFound(PanelId::new("nope")));
    }

    #[test]
    fn test_set_speaker_confirmed_is_idempotent() {
        let (store, panel_id, ids) = store_with_speakers(&["Ada", "Grace"]);

        store.set_speaker_confirmed(&panel_id, &ids[0], true).unwrap();
        let once = store.snapshot();
        store.set_speaker_confirmed(&panel_id, &ids[0], true).unwrap();
        let twice = store.snapshot();

        assert_eq!(once, twice);
        assert!(store.speaker(&panel_id, &ids[0]).unwrap().confirmed);
    }

    #[test]
    fn test_replace_speaker_keeps_id_and_resets_confirmation() {
        let (store, panel_id, ids) = store_with_speakers(&["Ada", "Grace"]);

        for name in ["Alan", "Linus", "Ken"] {
            store.set_speaker_confirmed(&panel_id, &ids[0], true).unwrap();
            let speaker = store.replace_speaker(&panel_id, &ids[0], profile(name)).unwrap();
            assert_eq!(speaker.id, ids[0]);
            assert_eq!(speaker.name, name);
            assert!(!speaker.confirmed);
        }

        // Only the targeted slot changed
        let panel = store.panel(&panel_id).unwrap();
        assert_eq!(panel.speakers.len(), 2);
        assert_eq!(panel.speakers[1].name, "Grace");
    }

    #[test]
    fn test_remove_speaker() {
        let (store, panel_id, ids) = store_with_speakers(&["Ada", "Grace"]);
        let removed = store.remove_speaker(&panel_id, &ids[0]).unwrap();
        assert_eq!(removed.name, "Ada");

        let err = store.remove_speaker(&panel_id, &ids[0]).unwrap_err();
        assert!(matches!(err, StoreError::SpeakerNotFound { .. }));
    }

    #[test]
    fn test_speaker_regeneration_claim() {
        let (store, panel_id, ids) = store_with_speakers(&["Ada"]);

        store.begin_speaker_regeneration(&panel_id, &ids[0]).unwrap();
        assert!(store.is_speaker_regenerating(&panel_id, &ids[0]));
        assert!(store
            .begin_speaker_regeneration(&panel_id, &ids[0])
            .unwrap_err()
            .is_conflict());
        assert!(store.remove_speaker(&panel_id, &ids[0]).unwrap_err().is_conflict());

        store.end_speaker_regeneration(&panel_id, &ids[0]);
        store.begin_speaker_regeneration(&panel_id, &ids[0]).unwrap();
    }

    #[test]
    fn test_speaker_generation_claim() {
        let (store, panel_id) = store_with_panel();
        store.begin_speaker_generation(&panel_id).unwrap();
        assert!(store.begin_speaker_generation(&panel_id).unwrap_err().is_conflict());
        store.end_speaker_generation(&panel_id);
        store.begin_speaker_generation(&panel_id).unwrap();
    }

    #[test]
    fn test_snapshot_restore_round_trip_keeps_sequences() {
        let (store, panel_id, _) = store_with_speakers(&["Ada", "Grace"]);
        store.set_brief(EventBrief::new("Conf", "Rust", "", 1).unwrap());

        let restored = WorkflowStore::from_snapshot(store.snapshot());
        assert_eq!(restored.panels(), store.panels());
        assert_eq!(restored.brief(), store.brief());

        let batch = restored.new_batch();
        let added = restored.attach_speakers(&panel_id, batch, vec![profile("Alan")]).unwrap();
        assert_eq!(added[0].id, SpeakerId::for_panel(&panel_id, 3));
    }

    #[test]
    fn test_restore_keeps_in_flight_claims() {
        let (store, panel_id) = store_with_panel();
        store.begin_speaker_generation(&panel_id).unwrap();
        store.restore(store.snapshot());
        assert!(store.begin_speaker_generation(&panel_id).unwrap_err().is_conflict());
    }

    #[test]
    fn test_detach_speakers_undoes_attach() {
        let (store, panel_id, kept) = store_with_speakers(&["Ada"]);
        let batch = store.new_batch();
        let added = store
            .attach_speakers(&panel_id, batch, vec![profile("Grace"), profile("Alan")])
            .unwrap();
        let added_ids: Vec<_> = added.into_iter().map(|s| s.id).collect();

        store.detach_speakers(&panel_id, batch, &added_ids);
        let speakers = store.panel(&panel_id).unwrap().speakers;
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].id, kept[0]);

        // The batch may be applied again, with fresh ids
        let retried = store.attach_speakers(&panel_id, batch, vec![profile("Grace")]).unwrap();
        assert_eq!(retried[0].id, SpeakerId::for_panel(&panel_id, 4));
    }

    #[test]
    fn test_sync_restores_returned_snapshot() {
        let (store, panel_id) = store_with_panel();
        let mut saved = None;
        store
            .sync(|snapshot| {
                saved = Some(snapshot.clone());
                let mut reloaded = snapshot.clone();
                reloaded.panels[0].suggested_topic = "Reloaded".to_string();
                Ok::<_, StoreError>(Some(reloaded))
            })
            .unwrap();

        assert_eq!(saved.unwrap().panels[0].suggested_topic, "Async");
        assert_eq!(store.panel(&panel_id).unwrap().suggested_topic, "Reloaded");
    }

    #[test]
    fn test_sync_error_leaves_state() {
        let (store, panel_id) = store_with_panel();
        let err = store
            .sync(|_| Err(StoreError::PanelNotFound(PanelId::new("panel-9"))))
            .unwrap_err();
        assert!(matches!(err, StoreError::PanelNotFound(_)));
        assert_eq!(store.panel(&panel_id).unwrap().suggested_topic, "Async");
    }

    #[test]
    fn test_sync_blocks_concurrent_mutation() {
        let (store, panel_id) = store_with_panel();
        let store = std::sync::Arc::new(store);
        let (entered_tx, entered_rx) = std::sync::mpsc::channel();

        let writer = {
            let store = store.clone();
            let panel_id = panel_id.clone();
            std::thread::spawn(move || {
                entered_rx.recv().unwrap();
                let batch = store.new_batch();
                store.attach_speakers(&panel_id, batch, vec![profile("Ada")]).unwrap();
            })
        };

        store
            .sync(|snapshot| {
                entered_tx.send(()).unwrap();
                std::thread::sleep(std::time::Duration::from_millis(50));
                Ok::<_, StoreError>(Some(snapshot.clone()))
            })
            .unwrap();
        writer.join().unwrap();

        // The attach waited for the sync and survived its restore
        assert_eq!(store.panel(&panel_id).unwrap().speakers.len(), 1);
    }
}
