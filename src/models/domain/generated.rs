use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The JSON object the generation backend is instructed to return.
///
/// Every field except a question's text is optional in practice: models
/// occasionally drop keys, so absent fields deserialize to empty containers
/// rather than failing the whole response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GeneratedQuiz {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_entities: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub quiz: Vec<GeneratedQuestion>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GeneratedQuestion {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub answer: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub explanation: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}
