//! Timelapse video links.
//!
//! The timelapse generator writes one video per camera, day, and time of
//! day. The link is computed from the clock alone and is never checked
//! against the filesystem; a link to a video that is not rendered yet is
//! accepted.

use chrono::{NaiveDateTime, Timelike};
use std::fmt;

/// Time-of-day category of a timelapse video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    /// 00:00–08:59
    Night,
    /// 09:00–16:59
    Day,
    /// 17:00–23:59
    Evening,
}

impl TimeBucket {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=8 => TimeBucket::Night,
            9..=16 => TimeBucket::Day,
            _ => TimeBucket::Evening,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeBucket::Night => "night",
            TimeBucket::Day => "day",
            TimeBucket::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// URL of the timelapse for `prefix` at local time `now`:
/// `<videos_url>/<prefix>_<bucket>_<YYYYMMDD>.mp4`.
pub fn video_url(videos_url: &str, prefix: &str, now: NaiveDateTime) -> String {
    format!(
        "{}/{}_{}_{}.mp4",
        videos_url.trim_end_matches('/'),
        prefix,
        TimeBucket::from_hour(now.hour()),
        now.format("%Y%m%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(TimeBucket::from_hour(0), TimeBucket::Night);
        assert_eq!(TimeBucket::from_hour(8), TimeBucket::Night);
        assert_eq!(TimeBucket::from_hour(9), TimeBucket::Day);
        assert_eq!(TimeBucket::from_hour(16), TimeBucket::Day);
        assert_eq!(TimeBucket::from_hour(17), TimeBucket::Evening);
        assert_eq!(TimeBucket::from_hour(23), TimeBucket::Evening);
    }

    #[test]
    fn day_video_url() {
        let url = video_url("/timelapse/videos", "amcrest", at(2024, 6, 1, 10, 0));
        assert_eq!(url, "/timelapse/videos/amcrest_day_20240601.mp4");
    }

    #[test]
    fn night_and_evening_urls() {
        assert_eq!(
            video_url("/timelapse/videos", "reolink", at(2024, 12, 31, 8, 59)),
            "/timelapse/videos/reolink_night_20241231.mp4"
        );
        assert_eq!(
            video_url("/timelapse/videos/", "reolink", at(2025, 1, 2, 17, 0)),
            "/timelapse/videos/reolink_evening_20250102.mp4"
        );
    }
}
