// src/config.rs
use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::rate_table::{PricingTables, RateTable};

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub chat: ChatConfig,
    pub pricing_table_path: Option<String>,
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        if env::var("PORT").is_err() {
            warn!("$PORT not set, defaulting to 3030");
        }
        let port = parse_var("PORT", 3030u16)?;

        let defaults = ChatConfig::default();
        let chat = ChatConfig {
            base_url: non_empty_var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: non_empty_var("OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: parse_var("CHAT_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_var("CHAT_MAX_TOKENS", defaults.max_tokens)?,
        };

        let openai_api_key = non_empty_var("OPENAI_API_KEY");
        if openai_api_key.is_none() {
            warn!("OPENAI_API_KEY not set, chat completions are disabled");
        }

        Ok(AppConfig {
            port,
            openai_api_key,
            chat,
            pricing_table_path: non_empty_var("PRICING_TABLE_PATH"),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        ([0, 0, 0, 0], self.port).into()
    }

    /// Built-in tables unless `PRICING_TABLE_PATH` points at a replacement.
    pub fn load_rate_table(&self) -> Result<RateTable> {
        match &self.pricing_table_path {
            Some(path) => {
                info!("Loading pricing tables from {}", path);
                RateTable::from_tables(PricingTables::from_json_file(path)?)
            }
            None => {
                info!("Using built-in pricing tables");
                Ok(RateTable::standard())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::rate_table::{DamageCategory, Urgency};

    fn config(pricing_table_path: Option<String>) -> AppConfig {
        AppConfig {
            port: 3030,
            openai_api_key: None,
            chat: ChatConfig::default(),
            pricing_table_path,
        }
    }

    fn write_tables(dir: &tempfile::TempDir, tables: &PricingTables) -> String {
        let path = dir.path().join("pricing.json");
        std::fs::write(&path, serde_json::to_string_pretty(tables).unwrap()).unwrap();
        path.display().to_string()
    }

    #[test]
    fn built_in_tables_without_a_path() {
        let rates = config(None).load_rate_table().unwrap();
        let (entry, _) = rates.rate("ssd", DamageCategory::Logical, Urgency::Standard);
        assert_eq!((entry.min_price, entry.max_price), (400, 900));
    }

    #[test]
    fn replacement_tables_are_used() {
        let dir = tempfile::tempdir().unwrap();
        let mut tables = PricingTables::default();
        let row = tables
            .rates
            .iter_mut()
            .find(|r| r.key.device.as_str() == "ssd" && r.key.damage == DamageCategory::Logical)
            .unwrap();
        row.entry.min_price = 450;
        row.entry.max_price = 950;
        let path = write_tables(&dir, &tables);

        let rates = config(Some(path)).load_rate_table().unwrap();
        let (entry, _) = rates.rate("ssd", DamageCategory::Logical, Urgency::Standard);
        assert_eq!((entry.min_price, entry.max_price), (450, 950));
    }

    #[test]
    fn inverted_rate_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut tables = PricingTables::default();
        tables.rates[3].entry.min_price = tables.rates[3].entry.max_price + 1;
        let path = write_tables(&dir, &tables);

        let err = config(Some(path)).load_rate_table().unwrap_err();
        assert!(format!("{:#}", err).contains("invalid range"));
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json").display().to_string();
        assert!(config(Some(path)).load_rate_table().is_err());
    }
}
