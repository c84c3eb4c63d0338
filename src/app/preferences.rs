//! Preference sync controller.
//!
//! Holds two copies of the preference document: the last snapshot known to
//! match the backend and the working copy the user edits. The document is
//! dirty whenever [`PreferenceDocument::differs_from`] says so, and a save is
//! only offered while it is dirty and no other save is in flight.

use crate::api::ApiResult;
use crate::domain::preferences::{
    NotificationSetting, Notifications, PreferenceDocument, PreferenceKind,
};

/// Status line state for the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Saving,
    Saved,
    Failed(String),
}

/// A preference load the runtime should issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceFetch {
    pub seq: u64,
}

/// A preference save the runtime should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSave {
    pub seq: u64,
    pub document: PreferenceDocument,
}

/// Outcome of handing a response to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncCompletion {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct PreferenceSyncController {
    remote_snapshot: Option<PreferenceDocument>,
    local_working: PreferenceDocument,
    next_seq: u64,
    pending_load: Option<u64>,
    in_flight: Option<PreferenceSave>,
    status: SyncStatus,
}

impl PreferenceSyncController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    #[must_use]
    pub const fn status(&self) -> &SyncStatus {
        &self.status
    }

    /// The last document known to match the backend.
    #[must_use]
    pub const fn remote_snapshot(&self) -> Option<&PreferenceDocument> {
        self.remote_snapshot.as_ref()
    }

    /// The copy the user is editing.
    #[must_use]
    pub const fn working(&self) -> &PreferenceDocument {
        &self.local_working
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.remote_snapshot.is_some()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Starts a load. A newer load supersedes any outstanding one.
    ///
    /// Refused while a save is in flight, since the reply to that save would
    /// rebaseline against a document the reload has already replaced.
    pub fn load(&mut self) -> Option<PreferenceFetch> {
        if self.is_saving() {
            tracing::debug!("preference load refused while saving");
            return None;
        }
        let seq = self.issue_seq();
        self.pending_load = Some(seq);
        self.status = SyncStatus::Loading;
        tracing::debug!(seq, "preference load issued");
        Some(PreferenceFetch { seq })
    }

    /// Applies the response to load `seq`.
    ///
    /// On success both copies are replaced; the working copy gets default
    /// notification settings if the backend had none.
    pub fn complete_load(
        &mut self,
        seq: u64,
        result: ApiResult<PreferenceDocument>,
    ) -> SyncCompletion {
        if self.pending_load != Some(seq) {
            tracing::debug!(seq, pending = ?self.pending_load, "discarding stale preference load");
            return SyncCompletion::Stale;
        }
        self.pending_load = None;

        match result {
            Ok(document) => {
                let mut working = document.clone();
                working
                    .notifications
                    .get_or_insert_with(Notifications::default);
                self.local_working = working;
                self.remote_snapshot = Some(document);
                self.status = SyncStatus::Ready;
                SyncCompletion::Applied
            }
            Err(failure) => {
                tracing::warn!(seq, error = %failure, "preference load failed");
                self.status = SyncStatus::Failed("Failed to load preferences".to_string());
                SyncCompletion::Failed
            }
        }
    }

    /// Adds `key` to, or removes it from, the working copy.
    pub fn toggle(&mut self, kind: PreferenceKind, key: &str) {
        let keys = self.local_working.keys_mut(kind);
        if !keys.remove(key) {
            keys.insert(key.to_string());
        }
    }

    pub fn set_notification(&mut self, setting: NotificationSetting) {
        self.local_working
            .notifications
            .get_or_insert_with(Notifications::default)
            .apply(setting);
    }

    /// Selects every catalog key. Idempotent.
    pub fn select_all<S: AsRef<str>>(&mut self, kind: PreferenceKind, catalog: &[S]) {
        self.local_working
            .keys_mut(kind)
            .extend(catalog.iter().map(|k| k.as_ref().to_string()));
    }

    /// Clears every key of `kind`. Idempotent.
    pub fn deselect_all(&mut self, kind: PreferenceKind) {
        self.local_working.keys_mut(kind).clear();
    }

    #[must_use]
    pub fn is_all_selected<S: AsRef<str>>(&self, kind: PreferenceKind, catalog: &[S]) -> bool {
        let keys = self.local_working.keys(kind);
        !catalog.is_empty() && catalog.iter().all(|k| keys.contains(k.as_ref()))
    }

    /// Deselects everything when the whole catalog is selected, otherwise
    /// selects it all.
    pub fn toggle_all<S: AsRef<str>>(&mut self, kind: PreferenceKind, catalog: &[S]) {
        if self.is_all_selected(kind, catalog) {
            self.deselect_all(kind);
        } else {
            self.select_all(kind, catalog);
        }
    }

    /// Whether the working copy has unsaved edits.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.remote_snapshot
            .as_ref()
            .is_some_and(|remote| self.local_working.differs_from(remote))
    }

    #[must_use]
    pub fn can_save(&self) -> bool {
        self.is_loaded() && self.is_dirty() && !self.is_saving()
    }

    /// Starts a save of the full working copy, if one is allowed.
    pub fn save(&mut self) -> Option<PreferenceSave> {
        if !self.can_save() {
            tracing::debug!(
                loaded = self.is_loaded(),
                dirty = self.is_dirty(),
                saving = self.is_saving(),
                "save not allowed"
            );
            return None;
        }
        let save = PreferenceSave {
            seq: self.issue_seq(),
            document: self.local_working.clone(),
        };
        tracing::debug!(seq = save.seq, "preference save issued");
        self.in_flight = Some(save.clone());
        self.status = SyncStatus::Saving;
        Some(save)
    }

    /// Applies the response to save `seq`.
    ///
    /// Success makes the submitted document the new snapshot. Failure keeps
    /// both copies, so the edits stay dirty and the save can be retried.
    pub fn complete_save(&mut self, seq: u64, result: ApiResult<()>) -> SyncCompletion {
        if self.in_flight.as_ref().map(|s| s.seq) != Some(seq) {
            tracing::debug!(seq, "discarding stale preference save");
            return SyncCompletion::Stale;
        }
        let Some(submitted) = self.in_flight.take() else {
            return SyncCompletion::Stale;
        };

        match result {
            Ok(()) => {
                self.remote_snapshot = Some(submitted.document);
                self.status = SyncStatus::Saved;
                SyncCompletion::Applied
            }
            Err(failure) => {
                tracing::warn!(seq, error = %failure, "preference save failed");
                self.status = SyncStatus::Failed("Failed to save preferences".to_string());
                SyncCompletion::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiFailure;
    use crate::domain::catalog;
    use crate::domain::preferences::Frequency;

    fn loaded(json: serde_json::Value) -> PreferenceSyncController {
        let mut prefs = PreferenceSyncController::new();
        let fetch = prefs.load().unwrap();
        let doc = serde_json::from_value(json).unwrap();
        assert_eq!(prefs.complete_load(fetch.seq, Ok(doc)), SyncCompletion::Applied);
        prefs
    }

    #[test]
    fn fresh_load_is_clean() {
        let prefs = loaded(serde_json::json!({ "subspecialties": ["stroke"] }));
        assert!(!prefs.is_dirty());
        assert!(!prefs.can_save());
        assert_eq!(prefs.status(), &SyncStatus::Ready);
    }

    #[test]
    fn adding_then_reverting_a_key() {
        let mut prefs = loaded(serde_json::json!({ "subspecialties": ["stroke"] }));
        prefs.toggle(PreferenceKind::Subspecialty, "epilepsy");
        assert!(prefs.is_dirty());
        prefs.toggle(PreferenceKind::Subspecialty, "epilepsy");
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn reordered_selection_is_clean() {
        let mut prefs = loaded(serde_json::json!({ "subspecialties": ["stroke", "epilepsy"] }));
        prefs.deselect_all(PreferenceKind::Subspecialty);
        prefs.toggle(PreferenceKind::Subspecialty, "epilepsy");
        prefs.toggle(PreferenceKind::Subspecialty, "stroke");
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn frequency_and_whatsapp_never_make_it_dirty() {
        let mut prefs = loaded(serde_json::json!({
            "notifications": { "email_enabled": true, "frequency": "weekly" }
        }));
        prefs.set_notification(NotificationSetting::Frequency(Frequency::Monthly));
        prefs.set_notification(NotificationSetting::Whatsapp(true));
        assert!(!prefs.is_dirty());

        prefs.set_notification(NotificationSetting::Email(false));
        assert!(prefs.is_dirty());
    }

    #[test]
    fn missing_remote_notifications_get_defaults_locally() {
        let prefs = loaded(serde_json::json!({}));
        assert!(prefs.remote_snapshot().unwrap().notifications.is_none());
        assert_eq!(prefs.working().notifications, Some(Notifications::default()));
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn save_failure_keeps_edits_dirty() {
        let mut prefs = loaded(serde_json::json!({ "subspecialties": ["stroke"] }));
        prefs.toggle(PreferenceKind::Subspecialty, "epilepsy");
        let before = prefs.working().clone();

        let save = prefs.save().unwrap();
        assert!(!prefs.can_save());
        let outcome = prefs.complete_save(save.seq, Err(ApiFailure::Status { status: 500 }));

        assert_eq!(outcome, SyncCompletion::Failed);
        assert_eq!(prefs.working(), &before);
        assert!(prefs.is_dirty());
        assert!(prefs.can_save());
        assert_eq!(prefs.status(), &SyncStatus::Failed("Failed to save preferences".to_string()));
    }

    #[test]
    fn save_success_rebaselines() {
        let mut prefs = loaded(serde_json::json!({ "subspecialties": ["stroke"] }));
        prefs.toggle(PreferenceKind::Subspecialty, "epilepsy");

        let save = prefs.save().unwrap();
        assert!(save.document.subspecialties.contains("epilepsy"));
        assert_eq!(prefs.complete_save(save.seq, Ok(())), SyncCompletion::Applied);

        assert!(!prefs.is_dirty());
        assert_eq!(prefs.remote_snapshot(), Some(prefs.working()));
        assert_eq!(prefs.status(), &SyncStatus::Saved);
    }

    #[test]
    fn edits_during_save_stay_dirty() {
        let mut prefs = loaded(serde_json::json!({}));
        prefs.toggle(PreferenceKind::ResearchType, "rct");
        let save = prefs.save().unwrap();
        prefs.toggle(PreferenceKind::ResearchType, "review");

        prefs.complete_save(save.seq, Ok(()));
        assert!(prefs.is_dirty());
    }

    #[test]
    fn clean_or_unloaded_documents_cannot_save() {
        let mut unloaded = PreferenceSyncController::new();
        unloaded.toggle(PreferenceKind::Subspecialty, "stroke");
        assert!(unloaded.save().is_none());

        let mut clean = loaded(serde_json::json!({}));
        assert!(clean.save().is_none());
    }

    #[test]
    fn reload_is_refused_while_saving() {
        let mut prefs = loaded(serde_json::json!({ "subspecialties": ["stroke"] }));
        prefs.toggle(PreferenceKind::Subspecialty, "epilepsy");
        let save = prefs.save().unwrap();

        assert!(prefs.load().is_none());
        assert_eq!(prefs.status(), &SyncStatus::Saving);

        assert_eq!(prefs.complete_save(save.seq, Ok(())), SyncCompletion::Applied);
        assert!(!prefs.is_dirty());
        assert_eq!(prefs.remote_snapshot(), Some(prefs.working()));

        let reload = prefs.load().unwrap();
        assert_eq!(prefs.complete_load(reload.seq, Ok(save.document)), SyncCompletion::Applied);
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn stale_load_is_ignored() {
        let mut prefs = PreferenceSyncController::new();
        let first = prefs.load().unwrap();
        let second = prefs.load().unwrap();
        let doc: PreferenceDocument =
            serde_json::from_value(serde_json::json!({ "subspecialties": ["x"] })).unwrap();

        assert_eq!(prefs.complete_load(first.seq, Ok(doc.clone())), SyncCompletion::Stale);
        assert!(!prefs.is_loaded());
        assert_eq!(prefs.complete_load(second.seq, Ok(doc)), SyncCompletion::Applied);
    }

    #[test]
    fn select_all_is_idempotent() {
        let keys = catalog::keys(PreferenceKind::Subspecialty);
        let mut prefs = loaded(serde_json::json!({}));

        prefs.select_all(PreferenceKind::Subspecialty, &keys);
        let once = prefs.working().clone();
        prefs.select_all(PreferenceKind::Subspecialty, &keys);
        assert_eq!(prefs.working(), &once);
        assert!(prefs.is_all_selected(PreferenceKind::Subspecialty, &keys));

        prefs.toggle_all(PreferenceKind::Subspecialty, &keys);
        assert!(prefs.working().subspecialties.is_empty());
        prefs.deselect_all(PreferenceKind::Subspecialty);
        assert!(prefs.working().subspecialties.is_empty());
    }
}
