//! Cache table rendering shared by `list` and `delete`.

use chrono::{DateTime, Utc};

use ghac_api::cache::CacheEntry;
use ghac_core::ios_println;
use ghac_core::iostreams::IOStreams;
use ghac_core::table::TablePrinter;
use ghac_core::text;

/// Most rows shown before a delete confirmation.
pub const TRIM_LIMIT: usize = 30;

/// Render `entries` as key, size, ref and last-accessed columns.
pub fn render_cache_table(ios: &IOStreams, entries: &[CacheEntry], now: DateTime<Utc>) -> String {
    let is_tty = ios.is_stdout_tty();
    let mut tp = TablePrinter::new(ios).truncate_column(0);
    for entry in entries {
        tp.add_row(vec![
            entry.key.clone(),
            text::format_cache_size(entry.size_in_bytes),
            entry.git_ref.clone(),
            text::relative_time_str(&entry.last_accessed_at, now, is_tty),
        ]);
    }
    tp.render()
}

/// Print every entry.
pub fn print_cache_list(ios: &IOStreams, entries: &[CacheEntry], now: DateTime<Utc>) {
    if entries.is_empty() {
        return;
    }
    ios_println!(ios, "{}", render_cache_table(ios, entries, now));
}

/// Print at most [`TRIM_LIMIT`] entries, noting how many were left out.
pub fn print_trimmed_cache_list(ios: &IOStreams, entries: &[CacheEntry], now: DateTime<Utc>) {
    let shown = &entries[..entries.len().min(TRIM_LIMIT)];
    ios_println!(ios, "{}", render_cache_table(ios, shown, now));
    if entries.len() > TRIM_LIMIT {
        ios_println!(ios, "... and {} more", entries.len() - TRIM_LIMIT);
        ios_println!(ios);
    }
    ios_println!(ios);
}
