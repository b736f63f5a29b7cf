//! Human-readable renderings of show start times.

use chrono::{DateTime, Utc};

/// `Tue 05, 21, 2019 9:30PM`: abbreviated weekday, month number, day, year
/// and 12-hour time.
pub fn format_start_time(t: DateTime<Utc>) -> String { t.format("%a %m, %d, %Y %-I:%M%p").to_string() }

/// The plain `YYYY-MM-DD HH:MM:SS` form used by the show listing.
pub fn format_plain(t: DateTime<Utc>) -> String { t.format("%Y-%m-%d %H:%M:%S").to_string() }
