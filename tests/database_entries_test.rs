// ABOUTME: Integration tests for food entry storage
// ABOUTME: CRUD, ordering, and half-open range semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use caltrack::database::Database;
use caltrack::models::FoodEntry;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

async fn create_test_db() -> Database {
    Database::new("sqlite::memory:").await.unwrap()
}

fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

fn entry_at(logged_at: DateTime<Utc>, calories: i64) -> FoodEntry {
    FoodEntry::new("test food", calories, 20.0, 30.0, 10.0).with_logged_at(logged_at)
}

#[tokio::test]
async fn test_insert_and_get_round_trip() {
    let db = create_test_db().await;
    let entry = entry_at(at(2025, 3, 3, 12), 520);
    db.insert_entry(&entry).await.unwrap();

    let fetched = db.get_entry(entry.id).await.unwrap().unwrap();
    assert_eq!(fetched, entry);
}

#[tokio::test]
async fn test_get_unknown_entry_is_none() {
    let db = create_test_db().await;
    assert!(db.get_entry(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_entries_ordered_oldest_first() {
    let db = create_test_db().await;
    let later = entry_at(at(2025, 3, 3, 18), 700);
    let earlier = entry_at(at(2025, 3, 3, 8), 300);
    db.insert_entry(&later).await.unwrap();
    db.insert_entry(&earlier).await.unwrap();

    let entries = db.list_entries().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, earlier.id);
    assert_eq!(entries[1].id, later.id);
}

#[tokio::test]
async fn test_list_entries_between_is_half_open() {
    let db = create_test_db().await;
    let start = at(2025, 3, 3, 0);
    let end = at(2025, 3, 4, 0);

    let inside = entry_at(start, 100);
    let boundary = entry_at(end, 200);
    let before = entry_at(at(2025, 3, 2, 23), 300);
    for entry in [&inside, &boundary, &before] {
        db.insert_entry(entry).await.unwrap();
    }

    let entries = db.list_entries_between(start, end).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, inside.id);
}

#[tokio::test]
async fn test_update_entry_nutrition() {
    let db = create_test_db().await;
    let entry = entry_at(at(2025, 3, 3, 12), 500);
    db.insert_entry(&entry).await.unwrap();

    let updated = db
        .update_entry_nutrition(entry.id, 650, 35.0, 60.0, 22.0)
        .await
        .unwrap();
    assert!(updated);

    let fetched = db.get_entry(entry.id).await.unwrap().unwrap();
    assert_eq!(fetched.calories, 650);
    assert!((fetched.protein_g - 35.0).abs() < f64::EPSILON);
    // The description is immutable
    assert_eq!(fetched.description, entry.description);
}

#[tokio::test]
async fn test_update_unknown_entry_reports_no_rows() {
    let db = create_test_db().await;
    let updated = db
        .update_entry_nutrition(Uuid::new_v4(), 100, 0.0, 0.0, 0.0)
        .await
        .unwrap();
    assert!(!updated);
}

#[tokio::test]
async fn test_delete_entry() {
    let db = create_test_db().await;
    let entry = entry_at(at(2025, 3, 3, 12), 500);
    db.insert_entry(&entry).await.unwrap();

    assert!(db.delete_entry(entry.id).await.unwrap());
    assert!(db.get_entry(entry.id).await.unwrap().is_none());
    // Second delete is a no-op
    assert!(!db.delete_entry(entry.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_entries_between_clears_one_day() {
    let db = create_test_db().await;
    let monday_breakfast = entry_at(at(2025, 3, 3, 8), 300);
    let monday_dinner = entry_at(at(2025, 3, 3, 19), 800);
    let tuesday = entry_at(at(2025, 3, 4, 8), 400);
    for entry in [&monday_breakfast, &monday_dinner, &tuesday] {
        db.insert_entry(entry).await.unwrap();
    }

    let removed = db
        .delete_entries_between(at(2025, 3, 3, 0), at(2025, 3, 4, 0))
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let remaining = db.list_entries().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, tuesday.id);
}

#[tokio::test]
async fn test_count_entries() {
    let db = create_test_db().await;
    assert_eq!(db.count_entries().await.unwrap(), 0);

    db.insert_entry(&entry_at(at(2025, 3, 3, 8), 300))
        .await
        .unwrap();
    db.insert_entry(&entry_at(at(2025, 3, 4, 8), 400))
        .await
        .unwrap();
    assert_eq!(db.count_entries().await.unwrap(), 2);
}

#[tokio::test]
async fn test_on_disk_database_is_created_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}/caltrack.db", dir.path().display());

    let entry = entry_at(at(2025, 3, 3, 12), 500);
    {
        let db = Database::new(&url).await.unwrap();
        db.insert_entry(&entry).await.unwrap();
    }

    // Re-open and read back
    let db = Database::new(&url).await.unwrap();
    let fetched = db.get_entry(entry.id).await.unwrap().unwrap();
    assert_eq!(fetched.calories, 500);
}
