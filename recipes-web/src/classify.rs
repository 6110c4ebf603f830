//! Ingredient-based category classifier
//!
//! Sends the ingredient list to a hosted LLM inference endpoint and expects
//! a one-word category back. Entirely optional: the service runs without an
//! API key and recipes simply stay uncategorized.

use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const INFERENCE_URL: &str = "https://api.together.xyz/inference";
const MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";
const MAX_TOKENS: u32 = 16;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Recognized recipe categories
const CATEGORIES: [&str; 4] = ["vegetarian", "pescatarian", "starter", "dessert"];

/// Classifier errors
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}")]
    Api(u16),

    #[error("Malformed inference response")]
    MalformedResponse,

    #[error("Unrecognized category: {0}")]
    Unrecognized(String),
}

#[derive(Debug, Deserialize)]
struct InferenceResponse {
    output: InferenceOutput,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    choices: Vec<InferenceChoice>,
}

#[derive(Debug, Deserialize)]
struct InferenceChoice {
    text: String,
}

/// LLM-backed recipe category classifier
#[derive(Clone)]
pub struct Classifier {
    http: reqwest::Client,
    api_key: String,
}

impl Classifier {
    pub fn new(api_key: String) -> Result<Self, ClassifyError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        Ok(Self { http, api_key })
    }

    /// Classify a recipe by its ingredient list
    pub async fn classify(&self, ingredients: &[String]) -> Result<String, ClassifyError> {
        let body = json!({
            "model": MODEL,
            "prompt": build_prompt(ingredients),
            "temperature": 0,
            "max_tokens": MAX_TOKENS,
            "repetition_penalty": 1,
        });

        let response = self
            .http
            .post(INFERENCE_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::Api(status.as_u16()));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|_| ClassifyError::MalformedResponse)?;
        let text = parsed
            .output
            .choices
            .first()
            .map(|choice| choice.text.as_str())
            .ok_or(ClassifyError::MalformedResponse)?;

        normalize_answer(text).ok_or_else(|| ClassifyError::Unrecognized(text.trim().to_string()))
    }
}

fn build_prompt(ingredients: &[String]) -> String {
    format!(
        "Based on the ingredient list below, is this a vegetarian, pescatarian, \
         starter or dessert recipe?\nOutput ONE WORD ONLY!\n\nIngredients:\n{}\n",
        ingredients.join("\n")
    )
}

/// Reduce the model output to one recognized category, if any
fn normalize_answer(text: &str) -> Option<String> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .find(|word| CATEGORIES.contains(&word.as_str()))
}
