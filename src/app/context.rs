//! Dashboard context
//!
//! Owns the settings store, connectivity monitor and AI client, and turns
//! each [`AppEvent`] into the [`UiUpdate`]s the front end must apply.
//! Failures never escape a handler; they become `UiUpdate::Error`.

use super::messages::{AppEvent, UiUpdate};
use crate::ai::{AiClient, AiError};
use crate::connectivity::ConnectivityMonitor;
use crate::dashboard::{self, DashboardView};
use crate::store::{self, Note, SettingEffect, SettingKey, SettingsStore, StoreResult};
use crate::voice::{self, VoiceCommand};

/// Controls that need the AI backend
pub const API_DEPENDENT_CONTROLS: &[&str] = &["chat", "explain", "summarize"];

/// Application state shared by all handlers
pub struct Dashboard {
    settings: SettingsStore,
    monitor: ConnectivityMonitor,
    ai: AiClient,
}

impl Dashboard {
    /// Build the context; `ai` is re-gated on `monitor`'s online flag
    pub fn new(
        settings: SettingsStore,
        mut monitor: ConnectivityMonitor,
        mut ai: AiClient,
    ) -> Self {
        for id in API_DEPENDENT_CONTROLS {
            monitor.register_control(*id);
        }
        ai.set_connectivity(monitor.handle());

        Self {
            settings,
            monitor,
            ai,
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn monitor(&self) -> &ConnectivityMonitor {
        &self.monitor
    }

    /// Updates a front end applies once when it attaches
    pub fn startup_updates(&self) -> Vec<UiUpdate> {
        let mut updates = vec![
            UiUpdate::ThemeApplied {
                theme: self.settings.theme(),
            },
            UiUpdate::FontSizeApplied {
                size: self.settings.font_size(),
                px: self.settings.font_size().px(),
            },
            self.connectivity_update(),
        ];
        updates.push(self.dashboard_update());
        updates
    }

    /// Current dashboard contents
    pub fn view(&self) -> StoreResult<DashboardView> {
        let kv = self.settings.kv();
        let tasks = store::load_tasks(kv)?;
        let notes = store::load_notes(kv)?;
        Ok(dashboard::render(
            self.settings.settings(),
            &tasks,
            &notes,
            dashboard::current_hour(),
        ))
    }

    /// Handle one event
    pub async fn handle(&mut self, event: AppEvent) -> Vec<UiUpdate> {
        tracing::debug!(event = ?event, "Handling event");

        match event {
            AppEvent::ConnectivityChanged => {
                self.monitor.refresh().await;
                vec![self.connectivity_update()]
            }
            AppEvent::VoiceTranscript(transcript) => self.handle_transcript(&transcript).await,
            AppEvent::UpdateSetting { name, value } => self.update_setting(&name, &value),
            AppEvent::Chat(prompt) => {
                match self.ai.chat(&prompt, self.settings.ai_model()).await {
                    Ok(reply) => vec![UiUpdate::AiReply { reply }],
                    Err(e) => vec![UiUpdate::error(e.to_string())],
                }
            }
            AppEvent::Explain(topic) => {
                match self.ai.explain(&topic, self.settings.ai_model()).await {
                    Ok(text) => vec![UiUpdate::Explanation { topic, text }],
                    Err(e @ AiError::Offline) => vec![UiUpdate::error(e.to_string())],
                    Err(e) => {
                        tracing::warn!(topic = %topic, error = %e, "Explanation failed");
                        vec![UiUpdate::error(
                            "Failed to get explanation. Please try again.",
                        )]
                    }
                }
            }
            AppEvent::Refresh => vec![self.dashboard_update()],
            AppEvent::ResetAll => match self.settings.reset_all() {
                Ok(()) => {
                    let mut updates = vec![UiUpdate::DataReset];
                    updates.extend(self.startup_updates());
                    updates
                }
                Err(e) => vec![UiUpdate::error(e.to_string())],
            },
            // Handled by the event loop
            AppEvent::Shutdown => Vec::new(),
        }
    }

    /// Route a transcript and run the matching action
    pub async fn handle_transcript(&mut self, transcript: &str) -> Vec<UiUpdate> {
        let Some(command) = voice::parse(transcript) else {
            return Vec::new();
        };

        tracing::info!(command = %command, "Voice command");

        match command {
            VoiceCommand::AddNote(text) => self.add_note(text),
            VoiceCommand::Summarize => self.summarize_notes().await,
            VoiceCommand::DarkMode => match self.settings.toggle_theme() {
                Ok(theme) => vec![UiUpdate::ThemeApplied { theme }],
                Err(e) => vec![UiUpdate::error(e.to_string())],
            },
            VoiceCommand::ShowPlan => match store::load_tasks(self.settings.kv()) {
                Ok(tasks) => vec![UiUpdate::Plan {
                    tasks: dashboard::plan(&tasks),
                }],
                Err(e) => vec![UiUpdate::error(e.to_string())],
            },
            VoiceCommand::Motivate => vec![UiUpdate::Quote {
                text: dashboard::random_quote().to_string(),
            }],
        }
    }

    fn update_setting(&mut self, name: &str, value: &str) -> Vec<UiUpdate> {
        let key: SettingKey = match name.parse() {
            Ok(key) => key,
            Err(e) => return vec![UiUpdate::error(e.to_string())],
        };

        let effect = match self.settings.set(key, value) {
            Ok(effect) => effect,
            Err(e) => return vec![UiUpdate::error(e.to_string())],
        };

        let mut updates = vec![UiUpdate::SettingSaved {
            setting: key.to_string(),
            value: self.settings.get(key),
        }];

        match effect {
            SettingEffect::ApplyTheme(theme) => updates.push(UiUpdate::ThemeApplied { theme }),
            SettingEffect::ApplyFontSize { size, px } => {
                updates.push(UiUpdate::FontSizeApplied { size, px })
            }
            SettingEffect::None => {}
        }

        if key == SettingKey::User {
            updates.push(self.dashboard_update());
        }

        updates
    }

    fn add_note(&mut self, text: String) -> Vec<UiUpdate> {
        if text.is_empty() {
            tracing::debug!("Ignoring empty note");
            return Vec::new();
        }

        match store::add_note(self.settings.kv(), Note::new(text.clone())) {
            Ok(_) => vec![UiUpdate::NoteAdded { text }, self.dashboard_update()],
            Err(e) => vec![UiUpdate::error(e.to_string())],
        }
    }

    async fn summarize_notes(&self) -> Vec<UiUpdate> {
        let notes = match store::load_notes(self.settings.kv()) {
            Ok(notes) => notes,
            Err(e) => return vec![UiUpdate::error(e.to_string())],
        };

        let texts: Vec<&str> = notes.iter().filter_map(Note::text).collect();
        if texts.is_empty() {
            return vec![UiUpdate::error("No notes to summarize")];
        }

        let prompt = summarize_prompt(&texts);
        match self.ai.chat(&prompt, self.settings.ai_model()).await {
            Ok(text) => vec![UiUpdate::Summary { text }],
            Err(e) => vec![UiUpdate::error(e.to_string())],
        }
    }

    fn connectivity_update(&self) -> UiUpdate {
        UiUpdate::Connectivity {
            state: self.monitor.state(),
            controls: self.monitor.controls().to_vec(),
        }
    }

    fn dashboard_update(&self) -> UiUpdate {
        match self.view() {
            Ok(view) => UiUpdate::Dashboard(view),
            Err(e) => UiUpdate::error(e.to_string()),
        }
    }
}

fn summarize_prompt(notes: &[&str]) -> String {
    let mut prompt = String::from("Summarize these study notes concisely:\n");
    for note in notes {
        prompt.push_str("- ");
        prompt.push_str(note);
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiClientConfig;
    use crate::connectivity::{ManualProbe, OFFLINE_TOOLTIP};
    use crate::store::{KeyValueStore, MemoryStore, Theme};
    use std::sync::Arc;

    async fn offline_dashboard() -> (Dashboard, Arc<MemoryStore>, ManualProbe) {
        let kv = Arc::new(MemoryStore::new());
        let settings = SettingsStore::load(kv.clone()).unwrap();
        let probe = ManualProbe::new(false);
        let monitor = ConnectivityMonitor::start(Arc::new(probe.clone())).await;
        let ai = AiClient::new(AiClientConfig::default(), monitor.handle()).unwrap();
        (Dashboard::new(settings, monitor, ai), kv, probe)
    }

    #[tokio::test]
    async fn test_voice_add_note() {
        let (mut dash, kv, _) = offline_dashboard().await;

        let updates = dash
            .handle(AppEvent::VoiceTranscript("please add note buy milk".into()))
            .await;

        assert_eq!(
            updates[0],
            UiUpdate::NoteAdded {
                text: "buy milk".to_string()
            }
        );
        let notes = store::load_notes(&*kv).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text(), Some("buy milk"));
    }

    #[tokio::test]
    async fn test_voice_dark_mode_toggles_theme() {
        let (mut dash, kv, _) = offline_dashboard().await;

        let updates = dash
            .handle(AppEvent::VoiceTranscript("turn on dark mode now".into()))
            .await;
        assert_eq!(updates, vec![UiUpdate::ThemeApplied { theme: Theme::Dark }]);
        assert_eq!(kv.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_voice_unmatched_does_nothing() {
        let (mut dash, kv, _) = offline_dashboard().await;
        let updates = dash
            .handle(AppEvent::VoiceTranscript("sing a song".into()))
            .await;
        assert!(updates.is_empty());
        assert_eq!(kv.get("notes").unwrap(), None);
    }

    #[tokio::test]
    async fn test_show_plan() {
        let (mut dash, kv, _) = offline_dashboard().await;
        kv.set(
            "tasks",
            r#"[{"title":"essay","completed":false},{"title":"quiz","completed":true}]"#,
        )
        .unwrap();

        let updates = dash
            .handle(AppEvent::VoiceTranscript("show plan".into()))
            .await;
        assert_eq!(
            updates,
            vec![UiUpdate::Plan {
                tasks: vec!["essay".to_string()]
            }]
        );
    }

    #[tokio::test]
    async fn test_chat_offline_reports_error() {
        let (mut dash, _, _) = offline_dashboard().await;
        let updates = dash.handle(AppEvent::Chat("hi".into())).await;
        assert_eq!(
            updates,
            vec![UiUpdate::error(
                "You are offline. This feature requires internet connection."
            )]
        );
    }

    #[tokio::test]
    async fn test_explain_offline_reports_offline() {
        let (mut dash, _, _) = offline_dashboard().await;
        let updates = dash.handle(AppEvent::Explain("gravity".into())).await;
        assert_eq!(
            updates,
            vec![UiUpdate::error(
                "You are offline. This feature requires internet connection."
            )]
        );
    }

    #[tokio::test]
    async fn test_client_follows_dashboard_monitor() {
        let kv = Arc::new(MemoryStore::new());
        let settings = SettingsStore::load(kv.clone()).unwrap();
        let other = ConnectivityMonitor::start(Arc::new(ManualProbe::new(true))).await;
        let ai = AiClient::new(AiClientConfig::default(), other.handle()).unwrap();
        let monitor = ConnectivityMonitor::start(Arc::new(ManualProbe::new(false))).await;
        let mut dash = Dashboard::new(settings, monitor, ai);

        let updates = dash.handle(AppEvent::Chat("hi".into())).await;
        assert_eq!(
            updates,
            vec![UiUpdate::error(
                "You are offline. This feature requires internet connection."
            )]
        );
    }

    #[tokio::test]
    async fn test_update_setting_font_size() {
        let (mut dash, _, _) = offline_dashboard().await;
        let updates = dash
            .handle(AppEvent::UpdateSetting {
                name: "fontSize".into(),
                value: "small".into(),
            })
            .await;

        assert!(updates.contains(&UiUpdate::FontSizeApplied {
            size: crate::store::FontSize::Small,
            px: 14
        }));
    }

    #[tokio::test]
    async fn test_update_unknown_setting() {
        let (mut dash, _, _) = offline_dashboard().await;
        let updates = dash
            .handle(AppEvent::UpdateSetting {
                name: "wallpaper".into(),
                value: "cats".into(),
            })
            .await;
        assert!(matches!(updates[0], UiUpdate::Error { .. }));
    }

    #[tokio::test]
    async fn test_connectivity_event_updates_controls() {
        let (mut dash, _, probe) = offline_dashboard().await;
        assert!(dash
            .monitor()
            .controls()
            .iter()
            .all(|c| !c.enabled && c.tooltip == OFFLINE_TOOLTIP));

        probe.set_online(true);
        let updates = dash.handle(AppEvent::ConnectivityChanged).await;
        match &updates[0] {
            UiUpdate::Connectivity { state, controls } => {
                assert!(state.is_online());
                assert_eq!(controls.len(), API_DEPENDENT_CONTROLS.len());
                assert!(controls.iter().all(|c| c.enabled));
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reset_all() {
        let (mut dash, kv, _) = offline_dashboard().await;
        dash.handle(AppEvent::VoiceTranscript("add note x".into()))
            .await;
        dash.handle(AppEvent::VoiceTranscript("dark mode".into()))
            .await;

        let updates = dash.handle(AppEvent::ResetAll).await;
        assert_eq!(updates[0], UiUpdate::DataReset);
        assert_eq!(dash.settings().theme(), Theme::Light);
        assert_eq!(kv.get("notes").unwrap(), None);
    }

    #[test]
    fn test_summarize_prompt() {
        let prompt = summarize_prompt(&["a", "b"]);
        assert!(prompt.ends_with("- a\n- b\n"));
    }
}
