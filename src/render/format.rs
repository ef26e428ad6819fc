use chrono::{DateTime, Utc};

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Human-readable age such as "3 days ago" or "1 year ago".
///
/// The day count is rounded up, then bucketed into days (< 7), weeks
/// (< 30), months (< 365) or years, each bucket rounded down.
pub fn relative_age(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - ts).num_milliseconds().unsigned_abs();
    let days = elapsed_ms.div_ceil(DAY_MS);

    if days < 7 {
        ago(days, "day")
    } else if days < 30 {
        ago(days / 7, "week")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(n: u64, unit: &str) -> String {
    let plural = if n > 1 { "s" } else { "" };
    format!("{n} {unit}{plural} ago")
}

/// Repository size, given in KB by the API.
pub fn format_size(kb: u64) -> String {
    if kb < 1024 {
        format!("{kb} KB")
    } else if kb < 1024 * 1024 {
        format!("{:.1} MB", kb as f64 / 1024.0)
    } else {
        format!("{:.1} GB", kb as f64 / (1024.0 * 1024.0))
    }
}

/// Calendar date such as "Dec 1, 2024".
pub fn published_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Minutes to read, estimated from the description length.
pub fn reading_minutes(description: Option<&str>) -> u64 {
    let chars = description.map_or(0, |d| d.chars().count()) as u64;
    chars.div_ceil(1000).max(1)
}

/// Hex colour for a language dot; grey for anything unlisted.
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f7df1e",
        "TypeScript" => "#3178c6",
        "Python" => "#3776ab",
        "Java" => "#ed8b00",
        "C++" => "#00599c",
        "C" => "#a8b9cc",
        "HTML" => "#e34f26",
        "CSS" => "#1572b6",
        "PHP" => "#777bb4",
        "C#" => "#239120",
        "Rust" => "#dea584",
        "Go" => "#00add8",
        _ => "#8b949e",
    }
}

/// Parse "#rrggbb" into its components.
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
