use serde::Deserialize;
use std::sync::OnceLock;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::markup::MarkdownConfig;

/// Id of the optional inline JSON element carrying [`UiConfig`] overrides.
pub const CONFIG_ELEMENT_ID: &str = "annotator-config";

/// Runtime settings for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Prefix for every API call; empty means same origin
    pub api_base: String,
    /// Path segment addressing a single item, as in `/{resource}/{id}/update`
    pub resource: String,
    /// Where the page goes after a successful delete
    pub landing_location: String,
    /// Target of the add-item form
    pub add_item_action: String,
    /// Refresh period of tracked-action progress labels
    pub tick_period_ms: u32,
    /// Markdown dialect for summaries and conflict reports
    pub markdown: MarkdownConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            resource: "input".to_string(),
            landing_location: "/".to_string(),
            add_item_action: "/add_input".to_string(),
            tick_period_ms: 1000,
            markdown: MarkdownConfig::default(),
        }
    }
}

impl UiConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.resource = config.resource.trim_matches('/').to_string();
        if config.tick_period_ms == 0 {
            config.tick_period_ms = Self::default().tick_period_ms;
        }
        Ok(config)
    }

    /// Read overrides from the page, falling back to defaults.
    pub fn load() -> Self {
        let Some(raw) = read_inline_json(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                dioxus_logger::tracing::warn!("Ignoring malformed UI config: {}", e);
                Self::default()
            }
        }
    }
}

static UI_CONFIG_CACHE: OnceLock<UiConfig> = OnceLock::new();

/// Get the cached UI configuration, loading it on first use
pub fn ui_config() -> &'static UiConfig {
    UI_CONFIG_CACHE.get_or_init(UiConfig::load)
}

/// Text content of a `<script type="application/json">` element, if present.
pub fn read_inline_json(element_id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let script = document
        .get_element_by_id(element_id)?
        .dyn_into::<HtmlScriptElement>()
        .ok()?;
    script.text().ok().filter(|text| !text.trim().is_empty())
}
