// ABOUTME: Nutrition estimation over an LLM chat-completion provider
// ABOUTME: Prompt assembly, optional image attachment, and tolerant JSON extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! # Nutrition Estimator
//!
//! Turns a free-text food description (plus an optional photo) into a
//! [`NutritionEstimate`] via one chat-completion call.
//!
//! The model is instructed to return a JSON document with an `items` array and
//! a `total` object, but model output is free text and arrives fenced, wrapped
//! in prose, or partially populated often enough that extraction is
//! best-effort: transport and API failures are real errors, while content that
//! yields no JSON object at all degrades to [`NutritionEstimate::zeroed`].

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, ChatMessage, ChatRequest, ContentPart, LlmProvider};
use crate::models::{EstimatedItem, NutritionEstimate};

// ============================================================================
// Food Images
// ============================================================================

/// An image attached to an estimation request
#[derive(Debug, Clone)]
pub struct FoodImage {
    mime: String,
    data: Vec<u8>,
}

impl FoodImage {
    /// Wrap raw image bytes with an explicit mime type
    #[must_use]
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }

    /// Read an image from disk, inferring the mime type from the extension
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the file cannot be read.
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::invalid_input(format!("cannot read image {}: {e}", path.display()))
        })?;
        let mime = mime_for_path(path);
        Ok(Self {
            mime: mime.to_owned(),
            data,
        })
    }

    /// Encode as a `data:` URL suitable for an `image_url` content part
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.data))
    }
}

/// Map a file extension to an image mime type (jpeg when unknown)
fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Nutrition estimator over a chat-completion provider
pub struct NutritionEstimator {
    provider: Box<dyn LlmProvider>,
}

impl NutritionEstimator {
    /// Create an estimator over the given provider
    #[must_use]
    pub fn new(provider: Box<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Estimate the nutrition content of the described food
    ///
    /// When an image is supplied it is attached as a base64 `data:` URL part
    /// alongside the text, and the prompt tells the model to prefer the image
    /// for portion estimation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty description, or the provider's
    /// error when the API call itself fails. Unparseable model *content* is
    /// not an error; it falls back to a zeroed estimate.
    #[instrument(skip(self, image), fields(provider = %self.provider.name()))]
    pub async fn estimate(
        &self,
        description: &str,
        image: Option<&FoodImage>,
    ) -> AppResult<NutritionEstimate> {
        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::invalid_input(
                "food description must not be empty",
            ));
        }

        let mut messages = vec![ChatMessage::system(prompts::nutrition_system_prompt())];
        if let Some(image) = image {
            messages.push(ChatMessage::user_parts(vec![
                ContentPart::Text(description.to_owned()),
                ContentPart::ImageUrl(image.to_data_url()),
            ]));
        } else {
            messages.push(ChatMessage::user(description));
        }

        let request = ChatRequest::new(messages)
            .with_temperature(defaults::ESTIMATE_TEMPERATURE)
            .with_max_tokens(defaults::ESTIMATE_MAX_TOKENS);

        let response = self.provider.complete(&request).await?;

        parse_nutrition_content(&response.content).map_or_else(
            || {
                warn!(
                    "could not extract nutrition JSON from model output ({} chars); falling back to zeros",
                    response.content.len()
                );
                Ok(NutritionEstimate::zeroed())
            },
            |estimate| {
                debug!(
                    calories = estimate.calories,
                    items = estimate.items.len(),
                    "nutrition estimate parsed"
                );
                Ok(estimate)
            },
        )
    }
}

// ============================================================================
// Content Extraction
// ============================================================================

/// Extract a [`NutritionEstimate`] from raw model output
///
/// Tolerates markdown fences and surrounding prose by scanning for the
/// outermost `{...}` object. Individual missing or mistyped fields default to
/// zero; when the `total` object is absent the item values are summed instead.
/// Returns `None` when no JSON object can be extracted at all.
#[must_use]
pub fn parse_nutrition_content(content: &str) -> Option<NutritionEstimate> {
    let json = extract_json_object(content)?;
    let value: Value = serde_json::from_str(json).ok()?;
    if !value.is_object() {
        return None;
    }

    let items: Vec<EstimatedItem> = value
        .get("items")
        .and_then(Value::as_array)
        .map(|array| array.iter().filter_map(item_from_value).collect())
        .unwrap_or_default();

    let (calories, protein_g, carbs_g, fat_g) = match value.get("total").filter(|t| t.is_object())
    {
        Some(total) => (
            field_i64(total, "calories"),
            field_f64(total, "protein"),
            field_f64(total, "carbs"),
            field_f64(total, "fats"),
        ),
        None => items.iter().fold((0, 0.0, 0.0, 0.0), |acc, item| {
            (
                acc.0 + item.calories,
                acc.1 + item.protein_g,
                acc.2 + item.carbs_g,
                acc.3 + item.fat_g,
            )
        }),
    };

    Some(NutritionEstimate {
        calories,
        protein_g,
        carbs_g,
        fat_g,
        items,
    })
}

/// Slice out the outermost `{...}` object, if any
fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Parse one entry of the `items` array
fn item_from_value(value: &Value) -> Option<EstimatedItem> {
    let name = value.get("name").and_then(Value::as_str)?;
    Some(EstimatedItem {
        name: name.to_owned(),
        calories: field_i64(value, "calories"),
        protein_g: field_f64(value, "protein"),
        carbs_g: field_f64(value, "carbs"),
        fat_g: field_f64(value, "fats"),
    })
}

/// Read a numeric field as kcal, rounding floats, defaulting to zero
fn field_i64(value: &Value, key: &str) -> i64 {
    value.get(key).map_or(0, |v| {
        v.as_i64()
            .or_else(|| v.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0)
    })
}

/// Read a numeric field as grams, defaulting to zero
fn field_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_inference_defaults_to_jpeg() {
        assert_eq!(mime_for_path(&PathBuf::from("lunch.png")), "image/png");
        assert_eq!(mime_for_path(&PathBuf::from("lunch.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(&PathBuf::from("lunch")), "image/jpeg");
    }

    #[test]
    fn test_data_url_round_trip() {
        let image = FoodImage::new("image/png", vec![1, 2, 3]);
        assert_eq!(image.to_data_url(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_extract_json_object_ignores_fences() {
        let content = "```json\n{\"total\": {}}\n```";
        assert_eq!(extract_json_object(content), Some("{\"total\": {}}"));
    }
}
