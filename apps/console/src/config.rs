use std::{collections::HashMap, fs};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub events_limit: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000/api".into(),
            api_token: None,
            events_limit: 5,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
            if let Some(v) = file_cfg.get("api_token") {
                settings.api_token = Some(v.clone());
            }
        }
    }

    if let Ok(v) = std::env::var("API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = std::env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Ok(v) = std::env::var("API_TOKEN") {
        settings.api_token = Some(v);
    }
    if let Ok(v) = std::env::var("APP__API_TOKEN") {
        settings.api_token = Some(v);
    }

    if let Ok(v) = std::env::var("APP__EVENTS_LIMIT") {
        if let Ok(parsed) = v.parse::<u32>() {
            settings.events_limit = parsed;
        }
    }

    settings
}

// The gateway joins endpoint paths straight onto the base url, so the
// configured value must not end with a slash.
pub fn normalize_base_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return Settings::default().api_base_url;
    }
    raw.trim_end_matches('/').to_string()
}
