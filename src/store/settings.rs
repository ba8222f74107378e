//! User settings
//!
//! Four named settings backed by a [`KeyValueStore`]:
//! - `theme`: `light` | `dark` (default `light`)
//! - `aiModel`: free text (default `gemini`)
//! - `fontSize`: `small` | `medium` | `large` (default `medium`)
//! - `user`: free text (default empty)
//!
//! Every successful `set` is written through before it returns and reports
//! the display change the caller has to re-apply.

use super::error::{StoreError, StoreResult};
use super::kv::KeyValueStore;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Name of a persisted setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Theme,
    AiModel,
    FontSize,
    User,
}

impl SettingKey {
    /// Get all settings for iteration
    pub fn all() -> &'static [SettingKey] {
        &[
            SettingKey::Theme,
            SettingKey::AiModel,
            SettingKey::FontSize,
            SettingKey::User,
        ]
    }

    /// Storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::Theme => "theme",
            SettingKey::AiModel => "aiModel",
            SettingKey::FontSize => "fontSize",
            SettingKey::User => "user",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theme" => Ok(SettingKey::Theme),
            "aimodel" | "ai_model" | "ai-model" => Ok(SettingKey::AiModel),
            "fontsize" | "font_size" | "font-size" => Ok(SettingKey::FontSize),
            "user" => Ok(SettingKey::User),
            _ => Err(StoreError::UnknownSetting(s.to_string())),
        }
    }
}

/// Default AI model name
pub const DEFAULT_AI_MODEL: &str = "gemini";

/// Color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(StoreError::InvalidValue {
                setting: SettingKey::Theme.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Root font size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    /// Pixel size applied to the document root
    pub fn px(&self) -> u32 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 18,
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontSize {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(StoreError::InvalidValue {
                setting: SettingKey::FontSize.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Snapshot of all settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub ai_model: String,
    pub font_size: FontSize,
    pub user: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            ai_model: DEFAULT_AI_MODEL.to_string(),
            font_size: FontSize::default(),
            user: String::new(),
        }
    }
}

impl Settings {
    /// String form of one setting
    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Theme => self.theme.to_string(),
            SettingKey::AiModel => self.ai_model.clone(),
            SettingKey::FontSize => self.font_size.to_string(),
            SettingKey::User => self.user.clone(),
        }
    }
}

/// Display change the caller must re-apply after a `set`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingEffect {
    /// Re-apply the document theme attribute
    ApplyTheme(Theme),
    /// Re-apply the root font size
    ApplyFontSize { size: FontSize, px: u32 },
    /// Nothing beyond persistence
    None,
}

/// Settings with write-through persistence
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
    current: Settings,
}

impl SettingsStore {
    /// Load settings, using defaults for absent or unreadable values
    pub fn load(kv: Arc<dyn KeyValueStore>) -> StoreResult<Self> {
        let defaults = Settings::default();

        let theme = match kv.get(SettingKey::Theme.as_str())? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring persisted theme");
                defaults.theme
            }),
            None => defaults.theme,
        };

        let font_size = match kv.get(SettingKey::FontSize.as_str())? {
            Some(raw) => raw.parse::<FontSize>().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Ignoring persisted font size");
                defaults.font_size
            }),
            None => defaults.font_size,
        };

        let ai_model = kv
            .get(SettingKey::AiModel.as_str())?
            .filter(|m| !m.is_empty())
            .unwrap_or(defaults.ai_model);

        let user = kv.get(SettingKey::User.as_str())?.unwrap_or(defaults.user);

        let current = Settings {
            theme,
            ai_model,
            font_size,
            user,
        };
        tracing::debug!(settings = ?current, "Loaded settings");

        Ok(Self { kv, current })
    }

    /// Current snapshot
    pub fn settings(&self) -> &Settings {
        &self.current
    }

    /// Underlying key-value store
    pub fn kv(&self) -> &dyn KeyValueStore {
        self.kv.as_ref()
    }

    pub fn get(&self, key: SettingKey) -> String {
        self.current.get(key)
    }

    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    pub fn ai_model(&self) -> &str {
        &self.current.ai_model
    }

    pub fn font_size(&self) -> FontSize {
        self.current.font_size
    }

    pub fn user(&self) -> &str {
        &self.current.user
    }

    /// Validate, persist and apply a new value
    ///
    /// Nothing is written when the value is outside the setting's domain.
    pub fn set(&mut self, key: SettingKey, value: &str) -> StoreResult<SettingEffect> {
        let effect = match key {
            SettingKey::Theme => {
                let theme: Theme = value.parse()?;
                self.kv.set(key.as_str(), theme.as_str())?;
                self.current.theme = theme;
                SettingEffect::ApplyTheme(theme)
            }
            SettingKey::FontSize => {
                let size: FontSize = value.parse()?;
                self.kv.set(key.as_str(), size.as_str())?;
                self.current.font_size = size;
                SettingEffect::ApplyFontSize { size, px: size.px() }
            }
            SettingKey::AiModel => {
                self.kv.set(key.as_str(), value)?;
                self.current.ai_model = value.to_string();
                SettingEffect::None
            }
            SettingKey::User => {
                self.kv.set(key.as_str(), value)?;
                self.current.user = value.to_string();
                SettingEffect::None
            }
        };

        tracing::info!(setting = %key, value = %value, "Setting updated");
        Ok(effect)
    }

    /// `set` with the setting given by name
    pub fn set_named(&mut self, name: &str, value: &str) -> StoreResult<SettingEffect> {
        let key: SettingKey = name.parse()?;
        self.set(key, value)
    }

    /// Flip light/dark and persist
    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        let next = self.current.theme.toggled();
        self.set(SettingKey::Theme, next.as_str())?;
        Ok(next)
    }

    /// Wipe all persisted data (settings, tasks and notes) and return to defaults
    pub fn reset_all(&mut self) -> StoreResult<()> {
        self.kv.clear()?;
        self.current = Settings::default();
        tracing::info!("All persisted data cleared");
        Ok(())
    }
}
