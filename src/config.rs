use secrecy::SecretString;
use std::env;

use crate::errors::{AppError, AppResult};

/// Gemini's OpenAI-compatible chat completion endpoint.
const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub quizzes_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub llm_api_key: SecretString,
    pub llm_api_base: String,
    pub llm_model: String,
}

impl Config {
    /// Reads configuration from the environment. The generation API key is
    /// the one required setting; everything else falls back to defaults.
    pub fn from_env() -> AppResult<Self> {
        let llm_api_key = env::var("GOOGLE_API_KEY").map_err(|_| {
            AppError::ConfigError("GOOGLE_API_KEY not found in environment variables".to_string())
        })?;

        Ok(Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizgen-local".to_string()),
            quizzes_collection: env::var("QUIZZES_COLLECTION")
                .unwrap_or_else(|_| "quizzes".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            llm_api_key: SecretString::from(llm_api_key),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_LLM_API_BASE.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
        })
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizgen-test".to_string(),
            quizzes_collection: "quizzes".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            llm_api_key: SecretString::from("test_api_key".to_string()),
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_conn_string, "mongodb://localhost:27017");
        assert_eq!(config.mongo_db_name, "quizgen-test");
        assert_eq!(config.quizzes_collection, "quizzes");
        assert_eq!(config.llm_model, "gemini-2.0-flash");
    }

    #[test]
    fn test_from_env_requires_api_key() {
        // Only meaningful when the variable is not set in the test
        // environment; from_env must signal a configuration error then.
        if env::var("GOOGLE_API_KEY").is_err() {
            let result = Config::from_env();
            assert!(matches!(result, Err(AppError::ConfigError(_))));
        }
    }
}
