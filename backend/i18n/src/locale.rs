use std::fmt;

/// The closed set of user-facing languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Locale {
    #[default]
    Az,
    En,
    Tr,
    Ru,
}

impl Locale {
    /// Keyboard order.
    pub const ALL: [Locale; 4] = [Locale::Az, Locale::En, Locale::Tr, Locale::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Locale::Az => "az",
            Locale::En => "en",
            Locale::Tr => "tr",
            Locale::Ru => "ru",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    pub fn flag(self) -> &'static str {
        match self {
            Locale::Az => "🇦🇿",
            Locale::En => "🇺🇸",
            Locale::Tr => "🇹🇷",
            Locale::Ru => "🇷🇺",
        }
    }

    /// Language name in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Az => "Azərbaycan",
            Locale::En => "English",
            Locale::Tr => "Türkçe",
            Locale::Ru => "Русский",
        }
    }

    /// Button label: flag followed by the native name.
    pub fn label(self) -> String {
        format!("{} {}", self.flag(), self.native_name())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
