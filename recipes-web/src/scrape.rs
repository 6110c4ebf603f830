//! Recipe fetcher
//!
//! Downloads a page and extracts the schema.org `Recipe` object from its
//! embedded JSON-LD blocks, normalizing it to the structured payload the
//! save endpoint accepts. Sites without JSON-LD recipe markup are reported
//! as not containing a recipe.

use once_cell::sync::Lazy;
use recipes_common::models::ScrapedRecipe;
use regex::Regex;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("recipes-web/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Placeholder for fields the source page does not provide
/// Placeholder for timing/yield fields absent from the source page. The
/// detail endpoint uses the same text so stored and freshly fetched
/// payloads render identically.
pub const NOT_AVAILABLE: &str = "Not available";

/// Fetcher errors
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Page returned status {0}")]
    Http(u16),

    #[error("No recipe data found on page")]
    NoRecipe,
}

/// Build the outbound HTTP client shared by the fetcher and image downloads
pub fn build_http_client() -> Result<reqwest::Client, ScrapeError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ScrapeError::Network(e.to_string()))
}

/// Fetch a page and extract its recipe
pub async fn scrape_recipe(
    client: &reqwest::Client,
    url: &str,
) -> Result<ScrapedRecipe, ScrapeError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ScrapeError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Http(status.as_u16()));
    }

    let html = response
        .text()
        .await
        .map_err(|e| ScrapeError::Network(e.to_string()))?;

    extract_recipe(&html).ok_or(ScrapeError::NoRecipe)
}

static LD_JSON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// Extract the first schema.org Recipe object from a page's JSON-LD blocks
pub fn extract_recipe(html: &str) -> Option<ScrapedRecipe> {
    for captures in LD_JSON_RE.captures_iter(html) {
        let block = captures.get(1)?.as_str().trim();
        let value: Value = match serde_json::from_str(block) {
            Ok(value) => value,
            // Malformed blocks are common in the wild, keep scanning
            Err(_) => continue,
        };

        if let Some(recipe) = find_recipe_object(&value).and_then(map_recipe) {
            return Some(recipe);
        }
    }

    None
}

/// Locate the Recipe object inside a JSON-LD value
///
/// Handles top-level objects, arrays of objects, and `@graph` containers.
fn find_recipe_object(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => {
            if is_recipe_type(map.get("@type")) {
                return Some(map);
            }
            map.get("@graph").and_then(find_recipe_object)
        }
        Value::Array(items) => items.iter().find_map(find_recipe_object),
        _ => None,
    }
}

/// `@type` may be a string or an array of strings
fn is_recipe_type(type_field: Option<&Value>) -> bool {
    match type_field {
        Some(Value::String(s)) => s == "Recipe",
        Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some("Recipe")),
        _ => false,
    }
}

/// Map a Recipe object to the structured payload
fn map_recipe(map: &serde_json::Map<String, Value>) -> Option<ScrapedRecipe> {
    let title = map.get("name")?.as_str()?.trim().to_string();
    if title.is_empty() {
        return None;
    }

    Some(ScrapedRecipe {
        title,
        image: first_image_url(map.get("image")),
        yields: map
            .get("recipeYield")
            .and_then(yield_text)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        prep_time: duration_field(map.get("prepTime")),
        cook_time: duration_field(map.get("cookTime")),
        ingredients: map
            .get("recipeIngredient")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(|s| s.trim().to_string())
                    .collect()
            })
            .unwrap_or_default(),
        instructions: instruction_text(map.get("recipeInstructions")),
    })
}

/// `image` may be a URL string, an array, or an ImageObject
fn first_image_url(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => items.iter().find_map(|item| first_image_url(Some(item))),
        Value::Object(obj) => obj
            .get("url")
            .and_then(Value::as_str)
            .map(|s| s.to_string()),
        _ => None,
    }
}

/// `recipeYield` may be a string, a number, or an array
fn yield_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(format!("{} servings", n)),
        Value::Array(items) => items.iter().find_map(yield_text),
        _ => None,
    }
}

fn duration_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .and_then(humanize_duration)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Render an ISO-8601 duration ("PT1H30M") human-readable ("1 hr 30 mins")
fn humanize_duration(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if !raw.starts_with('P') {
        return None;
    }

    // Only the time designator carries hours/minutes; date parts are not
    // meaningful for cooking times
    let time_part = raw.split_once('T').map(|(_, t)| t)?;

    let mut hours = 0u64;
    let mut minutes = 0u64;
    let mut number = String::new();
    for c in time_part.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
        } else {
            let value = number.parse::<f64>().ok()?;
            number.clear();
            match c {
                'H' => hours += value as u64,
                'M' => minutes += value as u64,
                'S' => {} // seconds are noise for recipe timing
                _ => return None,
            }
        }
    }

    hours += minutes / 60;
    minutes %= 60;
    if hours == 0 && minutes == 0 {
        return None;
    }

    let mut parts = Vec::new();
    match hours {
        0 => {}
        1 => parts.push("1 hr".to_string()),
        h => parts.push(format!("{} hrs", h)),
    }
    match minutes {
        0 => {}
        1 => parts.push("1 min".to_string()),
        m => parts.push(format!("{} mins", m)),
    }

    Some(parts.join(" "))
}

/// `recipeInstructions` may be a plain string, an array of strings, an array
/// of HowToStep objects, or HowToSection containers with nested steps
fn instruction_text(value: Option<&Value>) -> String {
    let mut steps = Vec::new();
    collect_instructions(value, &mut steps);
    steps.join("\n")
}

fn collect_instructions(value: Option<&Value>, steps: &mut Vec<String>) {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if !s.is_empty() {
                steps.push(s.to_string());
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                collect_instructions(Some(item), steps);
            }
        }
        Some(Value::Object(obj)) => {
            if let Some(text) = obj.get("text").and_then(Value::as_str) {
                let text = text.trim();
                if !text.is_empty() {
                    steps.push(text.to_string());
                }
            } else {
                // HowToSection: recurse into its element list
                collect_instructions(obj.get("itemListElement"), steps);
            }
        }
        _ => {}
    }
}
