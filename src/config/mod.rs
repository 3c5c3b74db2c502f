// src/config/mod.rs
// Settings come from the environment (and .env); everything has a default except credentials

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct CompanionConfig {
    // ── OpenAI (chat replies + image generation)
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub chat_model: String,
    pub chat_max_tokens: u32,
    pub chat_temperature: f32,
    pub image_model: String,
    pub image_size: String,

    // ── ElevenLabs (speech synthesis)
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_base_url: String,
    pub elevenlabs_voice_id: String,
    pub elevenlabs_model_id: String,

    // ── Google Custom Search (image search)
    pub google_api_key: Option<String>,
    pub google_cx: Option<String>,
    pub google_search_url: String,

    // ── Lip-sync toolchain
    pub ffmpeg_bin: PathBuf,
    pub rhubarb_bin: PathBuf,

    // ── Filesystem layout
    pub public_dir: PathBuf,
    pub textures_subdir: String,
    pub audios_dir: PathBuf,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Logging
    pub log_level: String,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            chat_model: "gpt-3.5-turbo-1106".to_string(),
            chat_max_tokens: 1000,
            chat_temperature: 0.6,
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1024".to_string(),
            elevenlabs_api_key: None,
            elevenlabs_base_url: "https://api.elevenlabs.io/v1".to_string(),
            elevenlabs_voice_id: "EXAVITQu4vr4xnSDxMaL".to_string(),
            elevenlabs_model_id: "eleven_multilingual_v2".to_string(),
            google_api_key: None,
            google_cx: None,
            google_search_url: "https://www.googleapis.com/customsearch/v1".to_string(),
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            rhubarb_bin: PathBuf::from("/usr/local/bin/rhubarb"),
            public_dir: PathBuf::from("public"),
            textures_subdir: "textures".to_string(),
            audios_dir: PathBuf::from("audios"),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

// Strips a trailing `# comment` and surrounding whitespace
fn clean_value(val: &str) -> &str {
    val.split('#').next().unwrap_or("").trim()
}

fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => match clean_value(&val).parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                default
            }
        },
        Err(_) => default,
    }
}

// Credentials: unset and empty both mean "not configured"
fn env_secret(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

impl CompanionConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        let d = Self::default();
        Self {
            openai_api_key: env_secret("OPENAI_API_KEY"),
            openai_base_url: env_var_or("OPENAI_BASE_URL", d.openai_base_url),
            chat_model: env_var_or("COMPANION_CHAT_MODEL", d.chat_model),
            chat_max_tokens: env_var_or("COMPANION_CHAT_MAX_TOKENS", d.chat_max_tokens),
            chat_temperature: env_var_or("COMPANION_CHAT_TEMPERATURE", d.chat_temperature),
            image_model: env_var_or("COMPANION_IMAGE_MODEL", d.image_model),
            image_size: env_var_or("COMPANION_IMAGE_SIZE", d.image_size),
            elevenlabs_api_key: env_secret("ELEVEN_LABS_API_KEY"),
            elevenlabs_base_url: env_var_or("ELEVEN_LABS_BASE_URL", d.elevenlabs_base_url),
            elevenlabs_voice_id: env_var_or("ELEVEN_LABS_VOICE_ID", d.elevenlabs_voice_id),
            elevenlabs_model_id: env_var_or("ELEVEN_LABS_MODEL_ID", d.elevenlabs_model_id),
            google_api_key: env_secret("GOOGLE_API_KEY"),
            google_cx: env_secret("GOOGLE_CX"),
            google_search_url: env_var_or("GOOGLE_SEARCH_URL", d.google_search_url),
            ffmpeg_bin: env_var_or("FFMPEG_BIN", d.ffmpeg_bin),
            rhubarb_bin: env_var_or("RHUBARB_BIN", d.rhubarb_bin),
            public_dir: env_var_or("COMPANION_PUBLIC_DIR", d.public_dir),
            textures_subdir: d.textures_subdir,
            audios_dir: env_var_or("COMPANION_AUDIOS_DIR", d.audios_dir),
            host: env_var_or("HOST", d.host),
            port: env_var_or("PORT", d.port),
            log_level: env_var_or("COMPANION_LOG_LEVEL", d.log_level),
        }
    }

    /// Both the text-generation and the speech credential are present
    pub fn chat_credentials_ready(&self) -> bool {
        self.openai_api_key.is_some() && self.elevenlabs_api_key.is_some()
    }

    /// Google API key and search engine id, when both are configured
    pub fn google_credentials(&self) -> Option<(&str, &str)> {
        match (&self.google_api_key, &self.google_cx) {
            (Some(key), Some(cx)) => Some((key.as_str(), cx.as_str())),
            _ => None,
        }
    }

    /// Directory where downloaded and generated images are cached
    pub fn textures_dir(&self) -> PathBuf {
        self.public_dir.join(&self.textures_subdir)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<CompanionConfig> = Lazy::new(CompanionConfig::from_env);
