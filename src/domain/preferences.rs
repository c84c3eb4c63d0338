//! Reading-preference document synced with the backend.
//!
//! The document stores canonical backend keys, not display labels. Equality
//! of the key collections is set equality: the order in which keys were picked
//! never matters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Digest frequency for notifications.
///
/// Values other than the three the settings screen cycles through are kept
/// verbatim, so a save sends back whatever the backend stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Other(String),
}

impl From<String> for Frequency {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Other(raw),
        }
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl Frequency {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Other(raw) => raw,
        }
    }

    /// The next known value; an unrecognised one steps to daily.
    #[must_use]
    pub fn next(&self) -> Self {
        match self {
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Monthly,
            Self::Monthly | Self::Other(_) => Self::Daily,
        }
    }
}

/// Notification channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notifications {
    pub email_enabled: bool,
    pub push_enabled: bool,
    pub whatsapp_enabled: bool,
    pub frequency: Frequency,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            email_enabled: true,
            push_enabled: false,
            whatsapp_enabled: false,
            frequency: Frequency::Weekly,
        }
    }
}

/// A single notification edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationSetting {
    Email(bool),
    Push(bool),
    Whatsapp(bool),
    Frequency(Frequency),
}

impl Notifications {
    pub fn apply(&mut self, setting: NotificationSetting) {
        match setting {
            NotificationSetting::Email(on) => self.email_enabled = on,
            NotificationSetting::Push(on) => self.push_enabled = on,
            NotificationSetting::Whatsapp(on) => self.whatsapp_enabled = on,
            NotificationSetting::Frequency(f) => self.frequency = f,
        }
    }
}

/// Which key collection of the document an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    Subspecialty,
    ResearchType,
}

impl PreferenceKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Subspecialty => "Subspecialties",
            Self::ResearchType => "Research Types",
        }
    }
}

/// The remote preferences resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreferenceDocument {
    #[serde(default)]
    pub subspecialties: BTreeSet<String>,
    #[serde(default)]
    pub research_types: BTreeSet<String>,
    /// Absent when the user has never stored notification settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<Notifications>,
}

impl PreferenceDocument {
    #[must_use]
    pub const fn keys(&self, kind: PreferenceKind) -> &BTreeSet<String> {
        match kind {
            PreferenceKind::Subspecialty => &self.subspecialties,
            PreferenceKind::ResearchType => &self.research_types,
        }
    }

    pub fn keys_mut(&mut self, kind: PreferenceKind) -> &mut BTreeSet<String> {
        match kind {
            PreferenceKind::Subspecialty => &mut self.subspecialties,
            PreferenceKind::ResearchType => &mut self.research_types,
        }
    }

    /// Whether this working copy has edits worth saving relative to `baseline`.
    ///
    /// Compares both key sets and the email/push toggles. Frequency and the
    /// WhatsApp toggle are not part of the comparison; they are still sent in
    /// full on save. Notification toggles are only compared when the baseline
    /// carries notifications at all.
    #[must_use]
    pub fn differs_from(&self, baseline: &Self) -> bool {
        let keys_changed = self.subspecialties != baseline.subspecialties
            || self.research_types != baseline.research_types;

        let toggles_changed = match (&baseline.notifications, &self.notifications) {
            (Some(remote), Some(local)) => {
                remote.email_enabled != local.email_enabled
                    || remote.push_enabled != local.push_enabled
            }
            _ => false,
        };

        keys_changed || toggles_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(subs: &[&str]) -> PreferenceDocument {
        PreferenceDocument {
            subspecialties: subs.iter().map(ToString::to_string).collect(),
            notifications: Some(Notifications::default()),
            ..PreferenceDocument::default()
        }
    }

    #[test]
    fn key_order_does_not_matter() {
        let remote: PreferenceDocument =
            serde_json::from_str(r#"{"subspecialties": ["stroke", "epilepsy"]}"#).unwrap();
        let local: PreferenceDocument =
            serde_json::from_str(r#"{"subspecialties": ["epilepsy", "stroke"]}"#).unwrap();
        assert!(!local.differs_from(&remote));
    }

    #[test]
    fn frequency_and_whatsapp_are_not_compared() {
        let remote = doc(&["stroke"]);
        let mut local = remote.clone();
        if let Some(n) = local.notifications.as_mut() {
            n.apply(NotificationSetting::Frequency(Frequency::Daily));
            n.apply(NotificationSetting::Whatsapp(true));
        }
        assert!(!local.differs_from(&remote));
    }

    #[test]
    fn email_and_push_are_compared() {
        let remote = doc(&[]);
        let mut local = remote.clone();
        if let Some(n) = local.notifications.as_mut() {
            n.apply(NotificationSetting::Push(true));
        }
        assert!(local.differs_from(&remote));
    }

    #[test]
    fn toggles_ignored_without_remote_notifications() {
        let remote = PreferenceDocument::default();
        let local = PreferenceDocument {
            notifications: Some(Notifications {
                email_enabled: false,
                ..Notifications::default()
            }),
            ..PreferenceDocument::default()
        };
        assert!(!local.differs_from(&remote));
    }

    #[test]
    fn partial_notifications_fill_defaults() {
        let parsed: PreferenceDocument =
            serde_json::from_str(r#"{"notifications": {"push_enabled": true}}"#).unwrap();
        let n = parsed.notifications.unwrap();
        assert!(n.email_enabled);
        assert!(n.push_enabled);
        assert_eq!(n.frequency, Frequency::Weekly);
    }

    #[test]
    fn unknown_frequency_round_trips() {
        let parsed: PreferenceDocument = serde_json::from_str(
            r#"{"subspecialties": ["stroke"], "notifications": {"frequency": "biweekly"}}"#,
        )
        .unwrap();
        let n = parsed.notifications.clone().unwrap();
        assert_eq!(n.frequency, Frequency::Other("biweekly".to_string()));
        assert_eq!(n.frequency.next(), Frequency::Daily);

        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["notifications"]["frequency"], "biweekly");
        assert_eq!(json["subspecialties"], serde_json::json!(["stroke"]));
    }

    #[test]
    fn serializes_research_types_key() {
        let mut d = PreferenceDocument::default();
        d.keys_mut(PreferenceKind::ResearchType).insert("rct".to_string());
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["research_types"], serde_json::json!(["rct"]));
        assert!(json.get("notifications").is_none());
    }
}
