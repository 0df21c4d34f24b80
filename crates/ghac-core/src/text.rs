//! Text formatting helpers for sizes, timestamps and counts.

use chrono::{DateTime, Duration, Utc};

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

/// Cut `text` down to `max_width` terminal columns, ending in "..." when
/// shortened. Wide characters count as two columns.
///
/// Widths below 4 leave no room for the ellipsis and hard-cut instead.
pub fn truncate(text: &str, max_width: usize) -> String {
    let tail = if max_width < 4 { "" } else { "..." };
    console::truncate_str(text, max_width, tail).into_owned()
}

/// Human-readable byte count with two decimals, in binary units.
///
/// ```
/// use ghac_core::text::format_cache_size;
/// assert_eq!(format_cache_size(1_572_864), "1.50 MB");
/// assert_eq!(format_cache_size(500), "500.00 B");
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn format_cache_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < KB {
        format!("{size:.2} B")
    } else if size < MB {
        format!("{:.2} KB", size / KB)
    } else if size < GB {
        format!("{:.2} MB", size / MB)
    } else {
        format!("{:.2} GB", size / GB)
    }
}

/// Describe how long ago something happened, e.g. "3 days ago".
pub fn fuzzy_ago(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "less than a minute ago".to_string();
    }
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    let span = if hours < 1 {
        pluralize(minutes, "minute", "minutes")
    } else if days < 1 {
        pluralize(hours, "hour", "hours")
    } else if days < 30 {
        pluralize(days, "day", "days")
    } else if days < 360 {
        pluralize(days / 30, "month", "months")
    } else {
        pluralize(days / 360, "year", "years")
    };
    format!("{span} ago")
}

/// Render an API timestamp for display.
///
/// Terminals get a relative description measured from `now`; other outputs
/// get the RFC 3339 form. Strings that do not parse are returned as given.
pub fn relative_time_str(raw: &str, now: DateTime<Utc>, is_tty: bool) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(raw) else {
        return raw.to_string();
    };
    let at = parsed.with_timezone(&Utc);
    if is_tty {
        fuzzy_ago(now.signed_duration_since(at))
    } else {
        at.to_rfc3339()
    }
}

/// `"{count} {singular}"` when count is one, otherwise `"{count} {plural}"`.
pub fn pluralize(count: i64, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{count} {noun}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("setup-node-linux", 10, "setup-n...")]
    #[case("short", 10, "short")]
    #[case("exact", 5, "exact")]
    #[case("abcdefg", 6, "abc...")]
    #[case("hello", 3, "hel")]
    #[case("hello", 0, "")]
    #[case("", 10, "")]
    fn test_should_truncate_string(
        #[case] input: &str,
        #[case] width: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(truncate(input, width), expected);
    }

    #[test]
    fn test_should_truncate_wide_chars_by_display_width() {
        let cut = truncate("日本語のキャッシュキー", 6);
        assert_eq!(cut, "日...");
        assert!(console::measure_text_width(&cut) <= 6);
    }

    #[rstest]
    #[case(0, "0.00 B")]
    #[case(500, "500.00 B")]
    #[case(1023, "1023.00 B")]
    #[case(1024, "1.00 KB")]
    #[case(1536, "1.50 KB")]
    #[case(1_048_575, "1024.00 KB")]
    #[case(1_048_576, "1.00 MB")]
    #[case(1_572_864, "1.50 MB")]
    #[case(1_073_741_824, "1.00 GB")]
    #[case(1_610_612_736, "1.50 GB")]
    fn test_should_format_cache_size(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_cache_size(bytes), expected);
    }

    #[rstest]
    #[case(0, "less than a minute ago")]
    #[case(59, "less than a minute ago")]
    #[case(60, "1 minute ago")]
    #[case(300, "5 minutes ago")]
    #[case(3600, "1 hour ago")]
    #[case(82_800, "23 hours ago")]
    #[case(86_400, "1 day ago")]
    #[case(259_200, "3 days ago")]
    #[case(2_592_000, "1 month ago")]
    #[case(28_512_000, "11 months ago")]
    #[case(31_104_000, "1 year ago")]
    #[case(63_072_000, "2 years ago")]
    fn test_should_format_fuzzy_ago(#[case] seconds: i64, #[case] expected: &str) {
        assert_eq!(fuzzy_ago(Duration::seconds(seconds)), expected);
    }

    #[test]
    fn test_should_describe_timestamp_relative_on_tty() {
        let now = Utc.with_ymd_and_hms(2022, 7, 2, 13, 33, 49).unwrap();
        assert_eq!(
            relative_time_str("2022-06-29T13:33:49Z", now, true),
            "3 days ago",
        );
    }

    #[test]
    fn test_should_normalize_timestamp_off_tty() {
        let now = Utc::now();
        assert_eq!(
            relative_time_str("2022-06-29T15:33:49+02:00", now, false),
            "2022-06-29T13:33:49+00:00",
        );
    }

    #[test]
    fn test_should_pass_through_unparsable_timestamp() {
        assert_eq!(relative_time_str("", Utc::now(), true), "");
        assert_eq!(relative_time_str("yesterday", Utc::now(), false), "yesterday");
    }

    #[rstest]
    #[case(0, "0 cache entries")]
    #[case(1, "1 cache entry")]
    #[case(2, "2 cache entries")]
    fn test_should_pluralize(#[case] count: i64, #[case] expected: &str) {
        assert_eq!(pluralize(count, "cache entry", "cache entries"), expected);
    }

    mod prop {
        use proptest::prelude::*;

        use super::super::*;

        proptest! {
            #[test]
            fn truncate_never_exceeds_width(text in "[a-z0-9日本語キャッシュ-]{0,64}", width in 0usize..80) {
                prop_assert!(console::measure_text_width(&truncate(&text, width)) <= width);
            }

            #[test]
            fn format_cache_size_has_two_decimals(bytes in any::<u64>()) {
                let formatted = format_cache_size(bytes);
                let (number, unit) = formatted.split_once(' ').unwrap();
                prop_assert!(["B", "KB", "MB", "GB"].contains(&unit));
                prop_assert_eq!(number.split_once('.').unwrap().1.len(), 2);
            }
        }
    }
}
