//! Morning and evening reminder text.
//!
//! Pure with respect to the store: callers pass the catalog slice and the
//! current progress map, and get back notification content. The scheduling
//! collaborator in the mobile shell fires these at the trigger times below.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde::Serialize;

use crate::models::{EssayMetadata, ReadingProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReminderTime {
    Morning,
    Evening,
}

/// Notification content handed to the platform scheduler.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMessage {
    pub title: String,
    pub body: String,
    pub time: ReminderTime,
}

/// Fixed daily trigger, local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderTrigger {
    pub hour: u32,
    pub minute: u32,
}

pub const MORNING_TRIGGER: ReminderTrigger = ReminderTrigger { hour: 8, minute: 0 };
pub const EVENING_TRIGGER: ReminderTrigger = ReminderTrigger { hour: 20, minute: 0 };

/// Morning reminder: nudge toward resuming the most recently touched
/// in-progress essay, or toward starting one if nothing is underway.
pub fn morning_message(
    catalog: &[EssayMetadata],
    progress_map: &HashMap<String, ReadingProgress>,
) -> ReminderMessage {
    let in_progress = in_progress_entries(catalog, progress_map);

    // Most recent last_read_at wins; ties resolve to catalog order via the
    // strictly-greater comparison.
    let mut resume: Option<(&EssayMetadata, &ReadingProgress)> = None;
    for &(essay, record) in &in_progress {
        match resume {
            Some((_, best)) if record.last_read_at <= best.last_read_at => {}
            _ => resume = Some((essay, record)),
        }
    }

    if let Some((essay, record)) = resume {
        let percent = (record.progress * 100.0).round() as u32;
        let others = in_progress.len() - 1;
        return ReminderMessage {
            title: "☀️ Good Morning! Continue Reading".to_string(),
            body: format!(
                "Resume \"{}\" ({percent}% complete). {others} more essay{} in progress.",
                essay.title,
                plural(others),
            ),
            time: ReminderTime::Morning,
        };
    }

    ReminderMessage {
        title: "☀️ Good Morning! Start Your Day with an Essay".to_string(),
        body: format!(
            "{} essay{} waiting for you. Pick one to read with your morning coffee.",
            catalog.len(),
            plural(catalog.len()),
        ),
        time: ReminderTime::Morning,
    }
}

/// Evening reminder: reflect on what was read today, or point at what is
/// still underway.
pub fn evening_message(
    catalog: &[EssayMetadata],
    progress_map: &HashMap<String, ReadingProgress>,
) -> ReminderMessage {
    let in_progress = in_progress_entries(catalog, progress_map);

    let one_day_ago = Utc::now() - Duration::hours(24);
    let read_today = progress_map
        .values()
        .filter(|record| record.last_read_at > one_day_ago)
        .count();

    if read_today > 0 {
        return ReminderMessage {
            title: "🌙 Evening Reflection".to_string(),
            body: format!(
                "You read {read_today} essay{} today. {} still in progress. Wind down with more wisdom?",
                plural(read_today),
                in_progress.len(),
            ),
            time: ReminderTime::Evening,
        };
    }

    if !in_progress.is_empty() {
        return ReminderMessage {
            title: "🌙 Evening Reading Time".to_string(),
            body: format!(
                "{} essay{} waiting for you. Perfect for winding down before bed.",
                in_progress.len(),
                plural(in_progress.len()),
            ),
            time: ReminderTime::Evening,
        };
    }

    ReminderMessage {
        title: "🌙 Unwind Before Bed".to_string(),
        body: "End your day with thought-provoking ideas. Pick an essay to read.".to_string(),
        time: ReminderTime::Evening,
    }
}

/// Catalog entries the user has started but not finished, in catalog order.
/// Progress records for ids absent from the catalog are ignored.
fn in_progress_entries<'a>(
    catalog: &'a [EssayMetadata],
    progress_map: &'a HashMap<String, ReadingProgress>,
) -> Vec<(&'a EssayMetadata, &'a ReadingProgress)> {
    catalog
        .iter()
        .filter_map(|essay| {
            let record = progress_map.get(&essay.id)?;
            record.is_in_progress().then_some((essay, record))
        })
        .collect()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn essay(id: &str, title: &str) -> EssayMetadata {
        EssayMetadata {
            id: id.to_string(),
            title: title.to_string(),
            word_count: 1200,
            reading_time_minutes: 6,
            year: 2020,
            month: 4,
            url: format!("https://example.com/{id}.html"),
            filename: format!("{id}.md"),
        }
    }

    fn record(id: &str, fraction: f64, last_read_at: DateTime<Utc>) -> ReadingProgress {
        ReadingProgress {
            essay_id: id.to_string(),
            scroll_position: 0.0,
            progress: fraction,
            is_read: fraction >= 0.9,
            last_read_at,
        }
    }

    fn catalog_of_three() -> Vec<EssayMetadata> {
        vec![
            essay("a", "Essay A"),
            essay("b", "Essay B"),
            essay("c", "Essay C"),
        ]
    }

    #[test]
    fn morning_with_empty_progress_names_catalog_size() {
        let message = morning_message(&catalog_of_three(), &HashMap::new());
        assert_eq!(message.time, ReminderTime::Morning);
        assert!(message.body.contains("3 essays waiting for you"));
        assert!(!message.body.contains("Resume"));
    }

    #[test]
    fn both_messages_are_total_on_empty_inputs() {
        let morning = morning_message(&[], &HashMap::new());
        assert!(morning.body.contains("0 essays"));

        let evening = evening_message(&[], &HashMap::new());
        assert_eq!(evening.title, "🌙 Unwind Before Bed");
    }

    #[test]
    fn morning_resumes_in_progress_and_excludes_read() {
        let now = Utc::now();
        let progress = HashMap::from([
            ("a".to_string(), record("a", 0.5, now - Duration::hours(1))),
            ("b".to_string(), record("b", 0.95, now)),
        ]);

        let message = morning_message(&catalog_of_three(), &progress);
        assert!(message.body.contains("Resume \"Essay A\""));
        assert!(message.body.contains("50% complete"));
        assert!(message.body.contains("0 more essays in progress"));
    }

    #[test]
    fn morning_counts_other_in_progress_essays() {
        let now = Utc::now();
        let progress = HashMap::from([
            ("a".to_string(), record("a", 0.2, now - Duration::hours(5))),
            ("c".to_string(), record("c", 0.7, now - Duration::hours(1))),
        ]);

        let message = morning_message(&catalog_of_three(), &progress);
        assert!(message.body.contains("Resume \"Essay C\""));
        assert!(message.body.contains("1 more essay in progress"));
    }

    #[test]
    fn morning_tie_breaks_by_catalog_order() {
        let stamp = Utc::now() - Duration::hours(3);
        let progress = HashMap::from([
            ("b".to_string(), record("b", 0.3, stamp)),
            ("c".to_string(), record("c", 0.6, stamp)),
        ]);

        let message = morning_message(&catalog_of_three(), &progress);
        assert!(message.body.contains("Resume \"Essay B\""));
    }

    #[test]
    fn progress_for_unknown_ids_is_ignored() {
        let progress = HashMap::from([(
            "retired-essay".to_string(),
            record("retired-essay", 0.5, Utc::now() - Duration::hours(30)),
        )]);

        let message = morning_message(&catalog_of_three(), &progress);
        assert!(message.body.contains("3 essays waiting for you"));
    }

    #[test]
    fn evening_counts_essays_read_today() {
        let now = Utc::now();
        let progress = HashMap::from([
            ("a".to_string(), record("a", 0.95, now - Duration::hours(2))),
            ("b".to_string(), record("b", 0.4, now - Duration::hours(6))),
        ]);

        let message = evening_message(&catalog_of_three(), &progress);
        assert_eq!(message.title, "🌙 Evening Reflection");
        assert!(message.body.contains("You read 2 essays today"));
        assert!(message.body.contains("1 still in progress"));
    }

    #[test]
    fn evening_falls_back_to_in_progress_count() {
        let stale = Utc::now() - Duration::hours(30);
        let progress = HashMap::from([
            ("a".to_string(), record("a", 0.4, stale)),
            ("b".to_string(), record("b", 0.6, stale)),
        ]);

        let message = evening_message(&catalog_of_three(), &progress);
        assert_eq!(message.title, "🌙 Evening Reading Time");
        assert!(message.body.contains("2 essays waiting for you"));
    }

    #[test]
    fn trigger_times_match_the_daily_schedule() {
        assert_eq!((MORNING_TRIGGER.hour, MORNING_TRIGGER.minute), (8, 0));
        assert_eq!((EVENING_TRIGGER.hour, EVENING_TRIGGER.minute), (20, 0));
    }
}
