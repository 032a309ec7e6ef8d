//! Caption attached to a delivered file.

use linkgrab_core::Platform;
use linkgrab_i18n::{Catalog, Category, Locale};

/// Caption for a delivered file. `locale_code` picks the phrasing; codes
/// other than az/tr/ru get the English one.
pub fn build_caption(
    platform: Platform,
    title: &str,
    size_label: &str,
    promo: &str,
    locale_code: &str,
) -> String {
    let name = platform.display_name();
    let (source, size_word) = match locale_code {
        "az" => (format!("{name}dan yükləndi"), "Ölçü"),
        "tr" => (format!("{name}'dan indirildi"), "Boyut"),
        "ru" => (format!("Загружено с {name}"), "Размер"),
        _ => (format!("Downloaded from {name}"), "Size"),
    };

    let mut caption = format!("📹 {source}");
    if !title.is_empty() {
        caption.push_str(&format!("\n🎬 {title}"));
    }
    caption.push_str(&format!("\n📁 {size_word}: {size_label}\n\n{promo}"));
    caption
}

/// Localized promo line followed by the channel list.
pub fn promo_footer(catalog: &Catalog, locale: Locale, channels: &str) -> String {
    let groups = catalog.text(locale, Category::Promotional, "groups");
    if channels.is_empty() {
        groups
    } else {
        format!("{groups}\n{channels}")
    }
}
