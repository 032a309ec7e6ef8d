use crate::locale::Locale;

const BAR_LENGTH: usize = 10;

/// Human-readable size with one decimal, e.g. `12.3 MB`.
pub fn format_size(bytes: u64, locale: Locale) -> String {
    let units: [&str; 5] = match locale {
        Locale::Az | Locale::Tr => ["bayt", "KB", "MB", "GB", "TB"],
        Locale::En => ["bytes", "KB", "MB", "GB", "TB"],
        Locale::Ru => ["байт", "КБ", "МБ", "ГБ", "ТБ"],
    };

    let mut size = bytes as f64;
    for unit in &units[..units.len() - 1] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} {}", units[units.len() - 1])
}

/// `[█████░░░░░] 50%`. Percentages above 100 are clamped.
pub fn progress_bar(percentage: u8) -> String {
    let percentage = percentage.min(100);
    let filled = BAR_LENGTH * percentage as usize / 100;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(BAR_LENGTH - filled),
        percentage
    )
}
