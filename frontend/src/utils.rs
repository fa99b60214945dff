pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() {
        datetime.format("%Y-%m-%d").to_string()
    } else if let Ok(naive) =
        chrono::NaiveDateTime::parse_from_str(iso_date, "%Y-%m-%d %H:%M:%S%.f")
    {
        naive.format("%Y-%m-%d").to_string()
    } else {
        iso_date.to_string()
    }
}

// Compact view counter: 950, 12.3K, 2.4M
pub fn format_views(views: i64) -> String {
    let abs = views.unsigned_abs() as f64;
    let sign = if views < 0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}{:.1}K", abs / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Media duration as `m:ss`. Fractions are dropped, minutes are not padded.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
