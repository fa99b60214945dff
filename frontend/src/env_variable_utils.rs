use lazy_static::lazy_static;
use web_sys::window;

pub const DEFAULT_VIDEOS_API_URL: &str =
    "https://functions.poehali.dev/7cdb1813-de37-40a0-ad07-26a2921115df";
pub const DEFAULT_PLAYLISTS_API_URL: &str =
    "https://functions.poehali.dev/a0a846ba-96e9-424d-9475-d25193610b01";

lazy_static! {
    pub static ref CONFIG: ChannelConfig = ChannelConfig::from_lookup(get_env_var);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelConfig {
    pub app_name: String,
    pub videos_api_url: String,
    pub playlists_api_url: String,
    pub debug_mode: bool,
    pub media_timeout_ms: u32,
    pub upload_cache_ttl_hours: i64,
}

impl ChannelConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "КонтентМедиаPRO".to_string()),
            videos_api_url: lookup("VIDEOS_API_URL")
                .unwrap_or_else(|| DEFAULT_VIDEOS_API_URL.to_string()),
            playlists_api_url: lookup("PLAYLISTS_API_URL")
                .unwrap_or_else(|| DEFAULT_PLAYLISTS_API_URL.to_string()),
            debug_mode: lookup("DEBUG_MODE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            media_timeout_ms: lookup("MEDIA_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            upload_cache_ttl_hours: lookup("UPLOAD_CACHE_TTL_HOURS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
        }
    }
}

pub fn get_env_var(key: &str) -> Option<String> {
    let window = window()?;

    // Get the ENV_CONFIG object
    let env_config = js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok()?;

    if env_config.is_undefined() {
        log::warn!("ENV_CONFIG is undefined - environment variables not loaded");
        return None;
    }

    let value = js_sys::Reflect::get(&env_config, &key.into()).ok()?;

    if !value.is_undefined() {
        value.as_string()
    } else {
        log::debug!("Environment variable '{}' is undefined", key);
        None
    }
}
