use chrono::{DateTime, Utc};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Số phút (làm tròn xuống) từ `from` tới `to`. Có thể âm nếu `to` đứng trước `from`.
pub fn duration_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    to.signed_duration_since(from)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_MINUTE)
}

/// Hiển thị số phút dạng "45m", "2h" hoặc "2h 15m".
pub fn format_duration(minutes: i64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}
