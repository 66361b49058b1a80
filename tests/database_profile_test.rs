// ABOUTME: Integration tests for user profile storage
// ABOUTME: Single-row invariant, goal and PIN hash updates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use caltrack::database::Database;
use caltrack::errors::ErrorCode;
use caltrack::models::UserProfile;

async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

#[tokio::test]
async fn test_create_and_get_profile() {
    let db = create_test_db().await;
    assert!(db.get_profile().await.unwrap().is_none());

    let profile = UserProfile::new("sam", "$2b$12$fakehash", 2000);
    db.create_profile(&profile).await.unwrap();

    let fetched = db.get_profile().await.unwrap().unwrap();
    assert_eq!(fetched.id, profile.id);
    assert_eq!(fetched.username, "sam");
    assert_eq!(fetched.pin_hash, "$2b$12$fakehash");
    assert_eq!(fetched.daily_calorie_goal, 2000);
}

#[tokio::test]
async fn test_second_profile_is_rejected() {
    let db = create_test_db().await;
    db.create_profile(&UserProfile::new("sam", "hash-a", 2000))
        .await
        .unwrap();

    let err = db
        .create_profile(&UserProfile::new("alex", "hash-b", 1800))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_update_daily_goal() {
    let db = create_test_db().await;
    let profile = UserProfile::new("sam", "hash", 2000);
    db.create_profile(&profile).await.unwrap();

    assert!(db.update_daily_goal(profile.id, 2500).await.unwrap());
    let fetched = db.get_profile().await.unwrap().unwrap();
    assert_eq!(fetched.daily_calorie_goal, 2500);
}

#[tokio::test]
async fn test_update_pin_hash() {
    let db = create_test_db().await;
    let profile = UserProfile::new("sam", "old-hash", 2000);
    db.create_profile(&profile).await.unwrap();

    assert!(db.update_pin_hash(profile.id, "new-hash").await.unwrap());
    let fetched = db.get_profile().await.unwrap().unwrap();
    assert_eq!(fetched.pin_hash, "new-hash");
}

#[tokio::test]
async fn test_updates_against_unknown_id_report_no_rows() {
    let db = create_test_db().await;
    let ghost = UserProfile::new("ghost", "hash", 2000);

    assert!(!db.update_daily_goal(ghost.id, 2500).await.unwrap());
    assert!(!db.update_pin_hash(ghost.id, "hash").await.unwrap());
}
