// ABOUTME: Derived nutrition statistics over logged food entries
// ABOUTME: Daily and weekly summaries, macro-calorie split, lifetime stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 CalTrack

//! # Aggregation
//!
//! Pure functions over slices of [`FoodEntry`]. Nothing here touches storage:
//! callers fetch the entries they care about and aggregate on the fly, so no
//! denormalized totals ever need to be kept in sync.
//!
//! Day bucketing uses UTC calendar dates (`logged_at.date_naive()`), and weeks
//! are anchored on Monday.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::FoodEntry;

/// Energy per gram of protein (kcal)
const PROTEIN_KCAL_PER_G: f64 = 4.0;
/// Energy per gram of carbohydrate (kcal)
const CARBS_KCAL_PER_G: f64 = 4.0;
/// Energy per gram of fat (kcal)
const FAT_KCAL_PER_G: f64 = 9.0;

/// Days in a summarized week
const DAYS_PER_WEEK: u64 = 7;

// ============================================================================
// Day Summaries
// ============================================================================

/// Nutrition totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The day being summarized
    pub date: NaiveDate,
    /// Total energy logged (kcal)
    pub calories: i64,
    /// Total protein logged (grams)
    pub protein_g: f64,
    /// Total carbohydrates logged (grams)
    pub carbs_g: f64,
    /// Total fat logged (grams)
    pub fat_g: f64,
    /// Number of entries logged on the day
    pub entry_count: usize,
}

impl DaySummary {
    /// An empty summary for the given day
    #[must_use]
    pub const fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            calories: 0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            entry_count: 0,
        }
    }

    /// Fraction of the daily goal consumed (may exceed 1.0; 0 for a zero goal)
    #[must_use]
    pub fn progress_against(&self, goal: i64) -> f64 {
        if goal <= 0 {
            return 0.0;
        }
        self.calories as f64 / goal as f64
    }
}

/// Sum the entries that fall on the given UTC calendar day
#[must_use]
pub fn summarize_day(entries: &[FoodEntry], date: NaiveDate) -> DaySummary {
    let mut summary = DaySummary::empty(date);
    for entry in entries
        .iter()
        .filter(|e| e.logged_at.date_naive() == date)
    {
        summary.calories += entry.calories;
        summary.protein_g += entry.protein_g;
        summary.carbs_g += entry.carbs_g;
        summary.fat_g += entry.fat_g;
        summary.entry_count += 1;
    }
    summary
}

// ============================================================================
// Week Summaries
// ============================================================================

/// Nutrition breakdown for one Monday-anchored week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Monday of the summarized week
    pub start: NaiveDate,
    /// One summary per day, Monday through Sunday
    pub days: Vec<DaySummary>,
}

impl WeekSummary {
    /// Sunday of the summarized week
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(DAYS_PER_WEEK - 1))
            .unwrap_or(self.start)
    }

    /// Total calories logged across the week
    #[must_use]
    pub fn total_calories(&self) -> i64 {
        self.days.iter().map(|d| d.calories).sum()
    }

    /// Average calories over the days that have at least one entry (0 if none)
    #[must_use]
    pub fn daily_average_calories(&self) -> i64 {
        let active: Vec<&DaySummary> = self.days.iter().filter(|d| d.entry_count > 0).collect();
        if active.is_empty() {
            return 0;
        }
        active.iter().map(|d| d.calories).sum::<i64>() / active.len() as i64
    }
}

/// Monday of the week containing the given date
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

/// Summarize the Monday-anchored week containing `date`
///
/// Always yields exactly seven day summaries, zeroed where nothing was logged.
#[must_use]
pub fn summarize_week(entries: &[FoodEntry], date: NaiveDate) -> WeekSummary {
    let start = week_start(date);
    let days = (0..DAYS_PER_WEEK)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|day| summarize_day(entries, day))
        .collect();
    WeekSummary { start, days }
}

// ============================================================================
// Macro Split
// ============================================================================

/// A day's logged calories attributed to the three macronutrients
///
/// Macro calories are computed at 4/4/9 kcal per gram and then scaled so the
/// three parts sum to the *logged* calorie total: the model's calorie figure
/// wins over the 4/4/9 arithmetic, the macros only set the proportions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Calories attributed to protein
    pub protein_kcal: f64,
    /// Calories attributed to carbohydrates
    pub carbs_kcal: f64,
    /// Calories attributed to fat
    pub fat_kcal: f64,
}

impl MacroSplit {
    /// Split a day's logged calories by macro proportion
    ///
    /// Returns `None` when the day has no logged calories or no macro mass to
    /// derive proportions from.
    #[must_use]
    pub fn of_day(day: &DaySummary) -> Option<Self> {
        let macro_kcal = day.protein_g * PROTEIN_KCAL_PER_G
            + day.carbs_g * CARBS_KCAL_PER_G
            + day.fat_g * FAT_KCAL_PER_G;
        if day.calories == 0 || macro_kcal <= 0.0 {
            return None;
        }

        let logged = day.calories as f64;
        Some(Self {
            protein_kcal: logged * (day.protein_g * PROTEIN_KCAL_PER_G / macro_kcal),
            carbs_kcal: logged * (day.carbs_g * CARBS_KCAL_PER_G / macro_kcal),
            fat_kcal: logged * (day.fat_g * FAT_KCAL_PER_G / macro_kcal),
        })
    }
}

// ============================================================================
// Lifetime Stats
// ============================================================================

/// All-time statistics over the whole food log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    /// Number of distinct days with at least one entry
    pub days_tracked: usize,
    /// Total entries logged
    pub meals_logged: usize,
    /// Total calories logged (kcal)
    pub total_calories: i64,
    /// Average calories per tracked day (integer division; 0 when empty)
    pub average_daily_calories: i64,
}

/// Compute lifetime statistics over the full entry log
#[must_use]
pub fn lifetime_stats(entries: &[FoodEntry]) -> LifetimeStats {
    let days: BTreeSet<NaiveDate> = entries.iter().map(|e| e.logged_at.date_naive()).collect();
    let total_calories: i64 = entries.iter().map(|e| e.calories).sum();
    let average_daily_calories = if days.is_empty() {
        0
    } else {
        total_calories / days.len() as i64
    };

    LifetimeStats {
        days_tracked: days.len(),
        meals_logged: entries.len(),
        total_calories,
        average_daily_calories,
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// UTC bounds of one calendar day as a half-open `[start, end)` range
#[must_use]
pub fn day_bounds_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .unwrap_or(date)
        .and_time(NaiveTime::MIN)
        .and_utc();
    (start, end)
}

/// UTC bounds of the Monday-anchored week containing `date`, half-open
#[must_use]
pub fn week_bounds_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = week_start(date);
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = monday
        .checked_add_days(Days::new(DAYS_PER_WEEK))
        .unwrap_or(monday)
        .and_time(NaiveTime::MIN)
        .and_utc();
    (start, end)
}

/// Compact display formatting for large counts: `950`, `1.5K`, `2.3M`
#[must_use]
pub fn format_compact(n: i64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry_at(date: &str, calories: i64, protein_g: f64, carbs_g: f64, fat_g: f64) -> FoodEntry {
        let logged_at = format!("{date}T12:00:00Z").parse().unwrap();
        FoodEntry::new("test food", calories, protein_g, carbs_g, fat_g).with_logged_at(logged_at)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_summarize_day_filters_and_sums() {
        let entries = vec![
            entry_at("2025-03-03", 500, 30.0, 50.0, 15.0),
            entry_at("2025-03-03", 300, 10.0, 40.0, 8.0),
            entry_at("2025-03-04", 900, 40.0, 90.0, 30.0),
        ];
        let summary = summarize_day(&entries, date("2025-03-03"));
        assert_eq!(summary.calories, 800);
        assert_eq!(summary.entry_count, 2);
        assert!((summary.protein_g - 40.0).abs() < f64::EPSILON);
        assert!((summary.fat_g - 23.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_day_empty() {
        let summary = summarize_day(&[], date("2025-03-03"));
        assert_eq!(summary, DaySummary::empty(date("2025-03-03")));
    }

    #[test]
    fn test_day_boundary_is_utc_midnight() {
        let before = FoodEntry::new("late snack", 100, 0.0, 0.0, 0.0)
            .with_logged_at(Utc.with_ymd_and_hms(2025, 3, 3, 23, 59, 59).unwrap());
        let after = FoodEntry::new("midnight snack", 200, 0.0, 0.0, 0.0)
            .with_logged_at(Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap());
        let summary = summarize_day(&[before, after], date("2025-03-03"));
        assert_eq!(summary.calories, 100);
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2025-03-05 is a Wednesday
        assert_eq!(week_start(date("2025-03-05")), date("2025-03-03"));
        // Monday maps to itself
        assert_eq!(week_start(date("2025-03-03")), date("2025-03-03"));
        // Sunday still belongs to the week that started the previous Monday
        assert_eq!(week_start(date("2025-03-09")), date("2025-03-03"));
    }

    #[test]
    fn test_summarize_week_covers_monday_through_sunday() {
        let entries = vec![
            entry_at("2025-03-03", 400, 20.0, 40.0, 10.0), // Monday
            entry_at("2025-03-09", 600, 30.0, 60.0, 20.0), // Sunday
            entry_at("2025-03-10", 999, 0.0, 0.0, 0.0),    // next Monday, excluded
        ];
        let week = summarize_week(&entries, date("2025-03-05"));
        assert_eq!(week.start, date("2025-03-03"));
        assert_eq!(week.end(), date("2025-03-09"));
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.total_calories(), 1000);
        assert_eq!(week.days[0].calories, 400);
        assert_eq!(week.days[6].calories, 600);
    }

    #[test]
    fn test_week_daily_average_ignores_empty_days() {
        let entries = vec![
            entry_at("2025-03-03", 400, 0.0, 0.0, 0.0),
            entry_at("2025-03-09", 600, 0.0, 0.0, 0.0),
        ];
        let week = summarize_week(&entries, date("2025-03-03"));
        assert_eq!(week.daily_average_calories(), 500);

        let empty = summarize_week(&[], date("2025-03-03"));
        assert_eq!(empty.daily_average_calories(), 0);
    }

    #[test]
    fn test_macro_split_scales_to_logged_calories() {
        // 4/4/9 arithmetic says 30*4 + 50*4 + 20*9 = 500 kcal, but 600 were logged
        let day = DaySummary {
            date: date("2025-03-03"),
            calories: 600,
            protein_g: 30.0,
            carbs_g: 50.0,
            fat_g: 20.0,
            entry_count: 1,
        };
        let split = MacroSplit::of_day(&day).unwrap();
        let total = split.protein_kcal + split.carbs_kcal + split.fat_kcal;
        assert!((total - 600.0).abs() < 1e-9);
        // proportions preserved: protein 120/500 of the logged total
        assert!((split.protein_kcal - 600.0 * 120.0 / 500.0).abs() < 1e-9);
        assert!((split.fat_kcal - 600.0 * 180.0 / 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_macro_split_requires_calories_and_macros() {
        let no_calories = DaySummary {
            calories: 0,
            ..DaySummary::empty(date("2025-03-03"))
        };
        assert!(MacroSplit::of_day(&no_calories).is_none());

        let no_macros = DaySummary {
            calories: 500,
            ..DaySummary::empty(date("2025-03-03"))
        };
        assert!(MacroSplit::of_day(&no_macros).is_none());
    }

    #[test]
    fn test_lifetime_stats_distinct_days() {
        let entries = vec![
            entry_at("2025-03-03", 500, 0.0, 0.0, 0.0),
            entry_at("2025-03-03", 300, 0.0, 0.0, 0.0),
            entry_at("2025-03-07", 700, 0.0, 0.0, 0.0),
        ];
        let stats = lifetime_stats(&entries);
        assert_eq!(stats.days_tracked, 2);
        assert_eq!(stats.meals_logged, 3);
        assert_eq!(stats.total_calories, 1500);
        assert_eq!(stats.average_daily_calories, 750);
    }

    #[test]
    fn test_lifetime_stats_empty() {
        let stats = lifetime_stats(&[]);
        assert_eq!(stats.days_tracked, 0);
        assert_eq!(stats.average_daily_calories, 0);
    }

    #[test]
    fn test_progress_against_goal() {
        let day = DaySummary {
            calories: 1500,
            ..DaySummary::empty(date("2025-03-03"))
        };
        assert!((day.progress_against(2000) - 0.75).abs() < f64::EPSILON);
        assert!((day.progress_against(0) - 0.0).abs() < f64::EPSILON);
        assert!(day.progress_against(1000) > 1.0);
    }

    #[test]
    fn test_day_bounds_are_half_open() {
        let (start, end) = day_bounds_utc(date("2025-03-03"));
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_week_bounds_span_seven_days() {
        let (start, end) = week_bounds_utc(date("2025-03-05"));
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(1500), "1.5K");
        assert_eq!(format_compact(2_340_000), "2.3M");
    }
}
