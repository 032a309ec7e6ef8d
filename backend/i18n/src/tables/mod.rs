//! Built-in locale tables. Each table lists the same keys in the same order.

use crate::catalog::Entry;
use crate::locale::Locale;

mod az;
mod en;
mod ru;
mod tr;

pub(crate) const ALL: [(Locale, &[Entry]); 4] = [
    (Locale::Az, az::ENTRIES),
    (Locale::En, en::ENTRIES),
    (Locale::Tr, tr::ENTRIES),
    (Locale::Ru, ru::ENTRIES),
];
