//! Post dates.
//!
//! A post is stamped once, at assembly time. The same stamp feeds the
//! storage key prefix, the post URL and the record's `date` field, so all
//! three agree even when a run crosses midnight.
//!
//! Neither format is zero padded: 8 October 2026 is `2026/10/8/` in paths.

use chrono::{Datelike, Local, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl DateStamp {
    /// Current local time.
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            year: now.year(),
            month: now.month(),
            day: now.day(),
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
        }
    }

    /// Date as a path fragment with trailing slash: `2026/10/8/`.
    pub fn date_path(&self) -> String {
        format!("{}/{}/{}/", self.year, self.month, self.day)
    }

    /// Display timestamp: `2026-10-8 9:5:3`.
    pub fn display(&self) -> String {
        format!(
            "{}-{}-{} {}:{}:{}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> DateStamp {
        DateStamp {
            year: 2026,
            month: 10,
            day: 8,
            hour: 9,
            minute: 5,
            second: 3,
        }
    }

    #[test]
    fn date_path_is_unpadded() {
        assert_eq!(stamp().date_path(), "2026/10/8/");
    }

    #[test]
    fn display_is_unpadded() {
        assert_eq!(stamp().display(), "2026-10-8 9:5:3");
    }

    #[test]
    fn now_is_a_valid_date() {
        let now = DateStamp::now();
        assert!((1..=12).contains(&now.month));
        assert!((1..=31).contains(&now.day));
        assert!(now.date_path().starts_with(&now.year.to_string()));
    }
}
