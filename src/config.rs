/// Asset locations, DOM ids and log level for one viewer instance.
///
/// Defaults can be overridden per page through `data-*` attributes on the
/// container element (`data-model-url`, `data-environment-url`,
/// `data-audio-url`, `data-log-level`).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub model_url: String,
    pub environment_url: String,
    pub audio_url: String,
    pub container_id: String,
    pub cursor_id: String,
    pub cursor_text_id: String,
    pub log_level: log::Level,
}

pub const DEFAULT_CONTAINER_ID: &str = "boombox";
pub const DEFAULT_CURSOR_ID: &str = "custom-cursor";
pub const DEFAULT_CURSOR_TEXT_ID: &str = "cursor-text";

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_url: "assets/boombox.glb".to_string(),
            environment_url: "assets/studio.hdr".to_string(),
            audio_url: "assets/track.mp3".to_string(),
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            cursor_id: DEFAULT_CURSOR_ID.to_string(),
            cursor_text_id: DEFAULT_CURSOR_TEXT_ID.to_string(),
            log_level: log::Level::Info,
        }
    }
}

impl ViewerConfig {
    /// Apply overrides from a dataset lookup. Keys are the camel-cased
    /// dataset names (`modelUrl` for `data-model-url`). Blank values and
    /// unknown log levels are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("modelUrl") {
            self.model_url = v;
        }
        if let Some(v) = get("environmentUrl") {
            self.environment_url = v;
        }
        if let Some(v) = get("audioUrl") {
            self.audio_url = v;
        }
        if let Some(level) = get("logLevel").and_then(|v| parse_level(&v)) {
            self.log_level = level;
        }
        self
    }
}

pub fn parse_level(s: &str) -> Option<log::Level> {
    s.trim().parse::<log::Level>().ok()
}
