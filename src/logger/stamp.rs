//! Wall-clock stamps used by the log line format and the hour buckets

use std::sync::Arc;

use jiff::Zoned;
use jiff::civil::DateTime;

/// Human-readable stamp, 24-hour clock: `2024-03-05 14:07:09`
pub const HUMAN_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Hour bucket stamp with minutes pinned to zero: `2024-03-05T14:00`
pub const BUCKET_STAMP_FORMAT: &str = "%Y-%m-%dT%H:00";

/// Source of "now" for the sink and the line logger
pub type Clock = Arc<dyn Fn() -> DateTime + Send + Sync>;

/// Clock backed by the local wall-clock time
pub fn system_clock() -> Clock {
    Arc::new(now_local)
}

/// Current local civil time
pub fn now_local() -> DateTime {
    Zoned::now().datetime()
}

pub fn human_stamp(at: DateTime) -> String {
    at.strftime(HUMAN_STAMP_FORMAT).to_string()
}
