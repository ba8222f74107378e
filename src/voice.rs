//! Voice command routing
//!
//! A keyword router over lower-cased transcripts. Rules are checked in a
//! fixed order and the first keyword found anywhere in the transcript wins.
//! Transcripts matching no rule produce no command.

use serde::Serialize;
use std::fmt;

/// Action requested by a voice transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "text", rename_all = "snake_case")]
pub enum VoiceCommand {
    /// Create a note with the text following the keyword
    AddNote(String),
    /// Summarize the stored notes with the AI backend
    Summarize,
    /// Toggle light/dark theme
    DarkMode,
    /// Show today's plan (pending tasks)
    ShowPlan,
    /// Show a motivational quote
    Motivate,
}

impl fmt::Display for VoiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceCommand::AddNote(text) => write!(f, "add note {text:?}"),
            VoiceCommand::Summarize => write!(f, "summarize"),
            VoiceCommand::DarkMode => write!(f, "dark mode"),
            VoiceCommand::ShowPlan => write!(f, "show plan"),
            VoiceCommand::Motivate => write!(f, "motivate"),
        }
    }
}

type Rule = (&'static str, fn(&str) -> VoiceCommand);

/// Keywords in priority order; the function receives the text after the keyword
const RULES: &[Rule] = &[
    ("add note", |rest| VoiceCommand::AddNote(rest.trim().to_string())),
    ("summarize", |_| VoiceCommand::Summarize),
    ("dark mode", |_| VoiceCommand::DarkMode),
    ("show plan", |_| VoiceCommand::ShowPlan),
    ("motivate", |_| VoiceCommand::Motivate),
];

/// Route a transcript to a command
pub fn parse(transcript: &str) -> Option<VoiceCommand> {
    let transcript = transcript.to_lowercase();

    for (keyword, build) in RULES {
        if let Some((_, rest)) = transcript.split_once(keyword) {
            let command = build(rest);
            tracing::debug!(transcript = %transcript, command = %command, "Voice command matched");
            return Some(command);
        }
    }

    tracing::debug!(transcript = %transcript, "No voice command matched");
    None
}
