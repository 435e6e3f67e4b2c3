//! Chat Settings Model

use serde::{Deserialize, Serialize};

/// Default widget palette, served for any shop that has never saved settings
pub const DEFAULT_PRIMARY_COLOR: &str = "#5c6ac4";
pub const DEFAULT_ACCENT_COLOR: &str = "#f4f6f8";
pub const DEFAULT_HEADER_TEXT: &str = "Chat with us";
pub const DEFAULT_WELCOME_TEXT: &str =
    "Hi there! Ask us anything and we will get back to you shortly.";

/// Per-shop widget appearance settings (one row per shop)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ChatSettings {
    pub shop: String,
    pub primary_color: String,
    pub accent_color: String,
    pub header_text: String,
    pub welcome_text: String,
    pub welcome_image_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ChatSettings {
    /// Build the default settings row for a shop that has never saved any
    pub fn defaults_for(shop: impl Into<String>, now: i64) -> Self {
        Self {
            shop: shop.into(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
            welcome_image_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update into this row (absent fields keep their value)
    pub fn apply(&mut self, update: ChatSettingsUpdate) {
        if let Some(v) = update.primary_color {
            self.primary_color = v;
        }
        if let Some(v) = update.accent_color {
            self.accent_color = v;
        }
        if let Some(v) = update.header_text {
            self.header_text = v;
        }
        if let Some(v) = update.welcome_text {
            self.welcome_text = v;
        }
        if let Some(v) = update.welcome_image_url {
            self.welcome_image_url = v;
        }
    }
}

/// Settings as the widget sees them (no timestamps)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSettingsView {
    pub shop: String,
    pub primary_color: String,
    pub accent_color: String,
    pub header_text: String,
    pub welcome_text: String,
    pub welcome_image_url: String,
}

impl ChatSettingsView {
    /// Default view for a shop with no saved settings
    pub fn defaults_for(shop: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            welcome_text: DEFAULT_WELCOME_TEXT.to_string(),
            welcome_image_url: String::new(),
        }
    }
}

impl From<ChatSettings> for ChatSettingsView {
    fn from(s: ChatSettings) -> Self {
        Self {
            shop: s.shop,
            primary_color: s.primary_color,
            accent_color: s.accent_color,
            header_text: s.header_text,
            welcome_text: s.welcome_text,
            welcome_image_url: s.welcome_image_url,
        }
    }
}

/// Partial update payload from the merchant admin
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSettingsUpdate {
    pub primary_color: Option<String>,
    pub accent_color: Option<String>,
    pub header_text: Option<String>,
    pub welcome_text: Option<String>,
    pub welcome_image_url: Option<String>,
}
