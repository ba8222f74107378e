//! Event and update types
//!
//! `AppEvent`s flow into the dashboard's event loop; `UiUpdate`s flow out to
//! whatever front end is attached.

use crate::connectivity::{ConnectivityState, Control};
use crate::dashboard::DashboardView;
use crate::store::{FontSize, Theme};
use serde::Serialize;

/// Inputs to the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The host reported an online/offline change; the monitor re-probes
    ConnectivityChanged,
    /// Text recognized from voice input
    VoiceTranscript(String),
    /// User changed a setting by name
    UpdateSetting { name: String, value: String },
    /// Free-form question for the AI assistant
    Chat(String),
    /// Topic for the study helper
    Explain(String),
    /// Recompute the dashboard view
    Refresh,
    /// Wipe all persisted data
    ResetAll,
    /// Stop the event loop
    Shutdown,
}

/// Outputs for the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiUpdate {
    /// Full dashboard contents
    Dashboard(DashboardView),
    /// Theme attribute to apply to the document
    ThemeApplied { theme: Theme },
    /// Root font size to apply
    FontSizeApplied { size: FontSize, px: u32 },
    /// A setting was persisted
    SettingSaved { setting: String, value: String },
    /// Connectivity state and the controls gated on it
    Connectivity {
        state: ConnectivityState,
        controls: Vec<Control>,
    },
    /// A note was created
    NoteAdded { text: String },
    /// Pending tasks for today
    Plan { tasks: Vec<String> },
    /// Motivational quote
    Quote { text: String },
    /// Chat reply from the AI backend
    AiReply { reply: String },
    /// Topic explanation from the AI backend
    Explanation { topic: String, text: String },
    /// Summary of the stored notes
    Summary { text: String },
    /// All persisted data was cleared
    DataReset,
    /// Error to show to the user
    Error { message: String },
}

impl UiUpdate {
    pub fn error(message: impl Into<String>) -> Self {
        UiUpdate::Error {
            message: message.into(),
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            UiUpdate::Dashboard(_) => "dashboard",
            UiUpdate::ThemeApplied { .. } => "theme_applied",
            UiUpdate::FontSizeApplied { .. } => "font_size_applied",
            UiUpdate::SettingSaved { .. } => "setting_saved",
            UiUpdate::Connectivity { .. } => "connectivity",
            UiUpdate::NoteAdded { .. } => "note_added",
            UiUpdate::Plan { .. } => "plan",
            UiUpdate::Quote { .. } => "quote",
            UiUpdate::AiReply { .. } => "ai_reply",
            UiUpdate::Explanation { .. } => "explanation",
            UiUpdate::Summary { .. } => "summary",
            UiUpdate::DataReset => "data_reset",
            UiUpdate::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_serialization() {
        let update = UiUpdate::FontSizeApplied {
            size: FontSize::Large,
            px: 18,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "font_size_applied", "size": "large", "px": 18})
        );

        let json = serde_json::to_value(UiUpdate::DataReset).unwrap();
        assert_eq!(json, serde_json::json!({"type": "data_reset"}));
    }
}
