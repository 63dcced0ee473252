//! Timers and human-readable ages.
//!
//! [`sleep`] is platform-aware: `gloo-timers` in the browser, `tokio::time`
//! everywhere else (and under paused tokio time in tests).

use std::time::Duration;

use chrono::Utc;

use crate::models::Timestamp;

/// Wait for `duration` on the current platform's timer.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Source of "now" for save-status messages.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

const DAY: i64 = 86_400;
/// Days in 400 Gregorian years, the basis for average month and year lengths.
const DAYS_PER_400_YEARS: i64 = 146_097;

fn round_div(n: i64, d: i64) -> i64 {
    (n + d / 2) / d
}

/// Describe how long ago `then` was, e.g. `"5 minutes ago"`.
///
/// Units are rounded and the coarse buckets follow the usual relative-time
/// thresholds (45 s, 45 min, 22 h, 26 days, 11 months). Times in the future
/// count as just now.
pub fn from_now(then: Timestamp, now: Timestamp) -> String {
    let secs = (now - then).num_seconds().max(0);
    let minutes = round_div(secs, 60);
    let hours = round_div(secs, 3_600);
    let days = round_div(secs, DAY);
    let months = round_div(secs * 4_800, DAYS_PER_400_YEARS * DAY);
    let years = round_div(secs * 400, DAYS_PER_400_YEARS * DAY);

    let age = if secs < 45 {
        "a few seconds".to_string()
    } else if minutes <= 1 {
        "a minute".to_string()
    } else if minutes < 45 {
        format!("{minutes} minutes")
    } else if hours <= 1 {
        "an hour".to_string()
    } else if hours < 22 {
        format!("{hours} hours")
    } else if days <= 1 {
        "a day".to_string()
    } else if days < 26 {
        format!("{days} days")
    } else if months <= 1 {
        "a month".to_string()
    } else if months < 11 {
        format!("{months} months")
    } else if years <= 1 {
        "a year".to_string()
    } else {
        format!("{years} years")
    };
    format!("{age} ago")
}

/// The editor's status line for a saved document.
pub fn saved_message(updated: Timestamp, now: Timestamp) -> String {
    format!("Saved {}.", from_now(updated, now))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as Age, TimeZone};

    use super::*;

    fn ago(age: Age) -> String {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        from_now(now - age, now)
    }

    #[test]
    fn test_short_ages() {
        assert_eq!(ago(Age::seconds(0)), "a few seconds ago");
        assert_eq!(ago(Age::seconds(44)), "a few seconds ago");
        assert_eq!(ago(Age::seconds(50)), "a minute ago");
        assert_eq!(ago(Age::seconds(90)), "2 minutes ago");
        assert_eq!(ago(Age::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Age::minutes(50)), "an hour ago");
        assert_eq!(ago(Age::hours(3)), "3 hours ago");
    }

    #[test]
    fn test_long_ages() {
        assert_eq!(ago(Age::hours(23)), "a day ago");
        assert_eq!(ago(Age::days(3)), "3 days ago");
        assert_eq!(ago(Age::days(30)), "a month ago");
        assert_eq!(ago(Age::days(100)), "3 months ago");
        assert_eq!(ago(Age::days(400)), "a year ago");
        assert_eq!(ago(Age::days(800)), "2 years ago");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        assert_eq!(ago(Age::seconds(-20)), "a few seconds ago");
    }

    #[test]
    fn test_saved_message() {
        let now = Utc::now();
        assert_eq!(
            saved_message(now - Age::minutes(2), now),
            "Saved 2 minutes ago."
        );
    }
}
