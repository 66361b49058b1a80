// ABOUTME: Integration tests for the nutrition estimator
// ABOUTME: Canned-provider estimation flow and tolerant content extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use caltrack::errors::{AppError, ErrorCode};
use caltrack::estimator::{parse_nutrition_content, FoodImage, NutritionEstimator};
use caltrack::llm::{
    ChatRequest, ChatResponse, ContentPart, LlmProvider, MessageContent, MessageRole,
};

const FULL_PAYLOAD: &str = r#"{
    "items": [
        {"name": "chicken sandwich", "calories": 450, "protein": 28.0, "carbs": 40.0, "fats": 18.0},
        {"name": "crisps", "calories": 180, "protein": 2.0, "carbs": 18.0, "fats": 11.0}
    ],
    "total": {"calories": 630, "protein": 30.0, "carbs": 58.0, "fats": 29.0}
}"#;

/// Provider returning a fixed response and capturing the request it was given
struct CannedProvider {
    content: Option<String>,
    captured: Arc<Mutex<Option<ChatRequest>>>,
}

impl CannedProvider {
    fn returning(content: &str) -> (Self, Arc<Mutex<Option<ChatRequest>>>) {
        let captured = Arc::new(Mutex::new(None));
        (
            Self {
                content: Some(content.to_owned()),
                captured: Arc::clone(&captured),
            },
            captured,
        )
    }

    fn failing() -> Self {
        Self {
            content: None,
            captured: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl LlmProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn default_model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        *self.captured.lock().unwrap() = Some(request.clone());
        match &self.content {
            Some(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "test-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            None => Err(AppError::external_service("NutritionAPI", "boom")),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

#[tokio::test]
async fn test_estimate_parses_model_json() {
    let (provider, _) = CannedProvider::returning(FULL_PAYLOAD);
    let estimator = NutritionEstimator::new(Box::new(provider));

    let estimate = estimator.estimate("tesco meal deal", None).await.unwrap();
    assert_eq!(estimate.calories, 630);
    assert!((estimate.protein_g - 30.0).abs() < f64::EPSILON);
    assert!((estimate.carbs_g - 58.0).abs() < f64::EPSILON);
    assert!((estimate.fat_g - 29.0).abs() < f64::EPSILON);
    assert_eq!(estimate.items.len(), 2);
    assert_eq!(estimate.items[0].name, "chicken sandwich");
}

#[tokio::test]
async fn test_estimate_falls_back_to_zeros_on_prose() {
    let (provider, _) =
        CannedProvider::returning("Sorry, I can't help with nutrition estimates today.");
    let estimator = NutritionEstimator::new(Box::new(provider));

    let estimate = estimator.estimate("mystery stew", None).await.unwrap();
    assert!(estimate.is_zeroed());
}

#[tokio::test]
async fn test_estimate_propagates_provider_errors() {
    let estimator = NutritionEstimator::new(Box::new(CannedProvider::failing()));

    let err = estimator.estimate("anything", None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_estimate_rejects_empty_description() {
    let (provider, _) = CannedProvider::returning(FULL_PAYLOAD);
    let estimator = NutritionEstimator::new(Box::new(provider));

    let err = estimator.estimate("   ", None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_estimate_sends_system_prompt_and_parameters() {
    let (provider, captured) = CannedProvider::returning(FULL_PAYLOAD);
    let estimator = NutritionEstimator::new(Box::new(provider));
    estimator.estimate("two eggs", None).await.unwrap();

    let request = captured.lock().unwrap().clone().unwrap();
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(500));
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert!(request.messages[0].content.text().contains("nutrition expert"));
    assert_eq!(request.messages[1].content.text(), "two eggs");
}

#[tokio::test]
async fn test_estimate_attaches_image_as_data_url_part() {
    let (provider, captured) = CannedProvider::returning(FULL_PAYLOAD);
    let estimator = NutritionEstimator::new(Box::new(provider));

    let image = FoodImage::new("image/png", vec![0xDE, 0xAD]);
    estimator
        .estimate("greggs sausage roll", Some(&image))
        .await
        .unwrap();

    let request = captured.lock().unwrap().clone().unwrap();
    let MessageContent::Parts(parts) = &request.messages[1].content else {
        panic!("expected multimodal user message");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0], ContentPart::Text("greggs sausage roll".to_owned()));
    let ContentPart::ImageUrl(url) = &parts[1] else {
        panic!("expected image part");
    };
    assert!(url.starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_food_image_from_path_infers_mime() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lunch.png");
    tokio::fs::write(&path, b"not really a png").await.unwrap();

    let image = FoodImage::from_path(&path).await.unwrap();
    assert!(image.to_data_url().starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn test_food_image_from_missing_path_is_invalid_input() {
    let err = FoodImage::from_path(std::path::Path::new("/nonexistent/lunch.jpg"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

// ============================================================================
// Content extraction
// ============================================================================

#[test]
fn test_parse_plain_json() {
    let estimate = parse_nutrition_content(FULL_PAYLOAD).unwrap();
    assert_eq!(estimate.calories, 630);
    assert_eq!(estimate.items.len(), 2);
}

#[test]
fn test_parse_fenced_json() {
    let content = format!("```json\n{FULL_PAYLOAD}\n```");
    let estimate = parse_nutrition_content(&content).unwrap();
    assert_eq!(estimate.calories, 630);
}

#[test]
fn test_parse_json_wrapped_in_prose() {
    let content = format!("Here's my best estimate:\n\n{FULL_PAYLOAD}\n\nEnjoy your meal!");
    let estimate = parse_nutrition_content(&content).unwrap();
    assert_eq!(estimate.calories, 630);
    assert!((estimate.fat_g - 29.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_missing_fields_default_to_zero() {
    let content = r#"{"total": {"calories": 400}}"#;
    let estimate = parse_nutrition_content(content).unwrap();
    assert_eq!(estimate.calories, 400);
    assert!(estimate.protein_g.abs() < f64::EPSILON);
    assert!(estimate.fat_g.abs() < f64::EPSILON);
    assert!(estimate.items.is_empty());
}

#[test]
fn test_parse_float_calories_are_rounded() {
    let content = r#"{"total": {"calories": 512.7, "protein": 20, "carbs": 30, "fats": 10}}"#;
    let estimate = parse_nutrition_content(content).unwrap();
    assert_eq!(estimate.calories, 513);
    assert!((estimate.protein_g - 20.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_sums_items_when_total_is_missing() {
    let content = r#"{
        "items": [
            {"name": "toast", "calories": 150, "protein": 5.0, "carbs": 25.0, "fats": 3.0},
            {"name": "butter", "calories": 100, "protein": 0.0, "carbs": 0.0, "fats": 11.0}
        ]
    }"#;
    let estimate = parse_nutrition_content(content).unwrap();
    assert_eq!(estimate.calories, 250);
    assert!((estimate.protein_g - 5.0).abs() < f64::EPSILON);
    assert!((estimate.fat_g - 14.0).abs() < f64::EPSILON);
}

#[test]
fn test_parse_skips_malformed_items() {
    let content = r#"{
        "items": [
            {"calories": 100},
            {"name": "toast", "calories": 150, "protein": 5.0, "carbs": 25.0, "fats": 3.0}
        ],
        "total": {"calories": 250, "protein": 5.0, "carbs": 25.0, "fats": 3.0}
    }"#;
    let estimate = parse_nutrition_content(content).unwrap();
    // the nameless item is dropped, the totals stand
    assert_eq!(estimate.items.len(), 1);
    assert_eq!(estimate.calories, 250);
}

#[test]
fn test_parse_garbage_yields_none() {
    assert!(parse_nutrition_content("").is_none());
    assert!(parse_nutrition_content("no json here at all").is_none());
    assert!(parse_nutrition_content("{ definitely not json }").is_none());
}
