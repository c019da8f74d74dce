//! Configuration for the `Itinera` service
//!
//! Loaded once at process start from environment variables. `GEMINI_API_KEY`
//! is the only required setting; everything else has a default.

use std::env;
use std::path::PathBuf;

use crate::{ItineraError, Result};

/// Root configuration structure for the `Itinera` service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Text-generation provider configuration
    pub gemini: GeminiConfig,
    /// Document store configuration
    pub store: StoreConfig,
}

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port
    pub port: u16,
}

/// Gemini provider settings
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Provider API key
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Base URL of the generateContent endpoint family
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Sampling temperature for itinerary generation
    pub temperature: f32,
}

/// Document store settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the document store
    pub path: PathBuf,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| ItineraError::config("missing GEMINI_API_KEY env var"))?;

        Ok(Self {
            server: ServerConfig {
                port: parse_env("ITINERA_PORT", default_port())?,
            },
            gemini: GeminiConfig {
                api_key,
                model: env_or("ITINERA_MODEL", default_model),
                base_url: env_or("ITINERA_BASE_URL", default_base_url),
                timeout_seconds: parse_env("ITINERA_TIMEOUT_SECONDS", default_timeout())?,
                temperature: parse_env("ITINERA_TEMPERATURE", default_temperature())?,
            },
            store: StoreConfig {
                path: PathBuf::from(env_or("ITINERA_DATA_DIR", default_data_dir)),
            },
        })
    }
}

fn env_or(name: &str, default: fn() -> String) -> String {
    env::var(name).unwrap_or_else(|_| default())
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ItineraError::config(format!("invalid value for {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_temperature() -> f32 {
    0.7
}

fn default_data_dir() -> String {
    "./data/itinera".to_string()
}
