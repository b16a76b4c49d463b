//! Pure formatting helpers shared by the panes.
//!
//! Nothing in here touches ratatui styles or layout.

const RATE_UNITS: [char; 4] = ['K', 'M', 'G', 'T'];

/// Format a byte count (usually bytes per second) as a human-readable size.
///
/// `"0 B"`, `"1023 B"`, `"1.0 KB"`, `"1.5 KB"`, `"1.0 MB"`. Values past the
/// terabyte range stay in `TB`.
pub fn format_byte_rate(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut exp = 0usize;
    let mut scale = 1u64;
    while exp < RATE_UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        exp += 1;
    }

    format!("{:.1} {}B", bytes as f64 / scale as f64, RATE_UNITS[exp - 1])
}

/// Format a dollar amount with thousands separators and two decimals, no `$`.
///
/// `1234567.891` -> `"1,234,567.89"`.
pub fn format_usd(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (count, c) in int_part.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if value < 0.0 {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

pub fn format_duration_short(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let mins = (secs % 3_600) / 60;
    if days > 0 {
        format!("{days}d {hours:02}h")
    } else {
        format!("{hours:02}h {mins:02}m")
    }
}

/// Cut `name` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate_name(name: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let mut out: String = name.chars().take(max).collect();
    if name.chars().count() > max && max > 2 {
        out.pop();
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_rate_below_one_kilobyte_is_whole_bytes() {
        assert_eq!(format_byte_rate(0), "0 B");
        assert_eq!(format_byte_rate(1), "1 B");
        assert_eq!(format_byte_rate(1023), "1023 B");
    }

    #[test]
    fn byte_rate_scales_through_units() {
        assert_eq!(format_byte_rate(1024), "1.0 KB");
        assert_eq!(format_byte_rate(1536), "1.5 KB");
        assert_eq!(format_byte_rate(1_048_576), "1.0 MB");
        assert_eq!(format_byte_rate(5 * 1024 * 1024 * 1024), "5.0 GB");
        assert_eq!(format_byte_rate(1024u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn byte_rate_clamps_to_terabytes() {
        assert_eq!(format_byte_rate(1024u64.pow(5)), "1024.0 TB");
    }

    #[test]
    fn usd_groups_thousands() {
        assert_eq!(format_usd(0.0), "0.00");
        assert_eq!(format_usd(0.1234), "0.12");
        assert_eq!(format_usd(999.999), "1,000.00");
        assert_eq!(format_usd(67_432.5), "67,432.50");
        assert_eq!(format_usd(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn duration_short_switches_to_days() {
        assert_eq!(format_duration_short(59), "00h 00m");
        assert_eq!(format_duration_short(3_660), "01h 01m");
        assert_eq!(format_duration_short(90_000), "1d 01h");
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate_name("firefox", 10), "firefox");
        assert_eq!(truncate_name("chromium-browser", 8), "chromiu…");
        assert_eq!(truncate_name("abc", 0), "");
    }
}
