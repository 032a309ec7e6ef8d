//! Short replies to plain private text that is not a link.

use linkgrab_i18n::{Catalog, Category, Locale};

const GREETINGS: &[&str] = &["salam", "salaam", "slm", "selam", "salamlar", "hello", "hi", "hey"];
const HELP_WORDS: &[&str] = &["kömək", "yardım", "help", "necə", "istifadə", "işləyir"];
const THANKS_WORDS: &[&str] = &["təşəkkür", "sağol", "saol", "thanks", "minnətdaram", "thx", "thank"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    Greeting,
    Help,
    Thanks,
}

impl SmallTalk {
    /// Whole-word match, checked in greeting, help, thanks order.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let hit = |list: &[&str]| words.iter().any(|w| list.contains(w));

        if hit(GREETINGS) {
            Some(Self::Greeting)
        } else if hit(HELP_WORDS) {
            Some(Self::Help)
        } else if hit(THANKS_WORDS) {
            Some(Self::Thanks)
        } else {
            None
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Help => "help",
            Self::Thanks => "thanks",
        }
    }
}

/// Localized reply for `text`, or `None` when it is not small talk.
pub fn small_talk_reply(catalog: &Catalog, locale: Locale, text: &str, first_name: &str) -> Option<String> {
    let kind = SmallTalk::detect(text)?;
    Some(catalog.render(locale, Category::Replies, kind.key(), &[("name", first_name)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_each_kind() {
        assert_eq!(SmallTalk::detect("Salam!"), Some(SmallTalk::Greeting));
        assert_eq!(SmallTalk::detect("bu necə işləyir?"), Some(SmallTalk::Help));
        assert_eq!(SmallTalk::detect("Çox sağol"), Some(SmallTalk::Thanks));
        assert_eq!(SmallTalk::detect("thx a lot"), Some(SmallTalk::Thanks));
    }

    #[test]
    fn ignores_words_inside_other_words() {
        assert_eq!(SmallTalk::detect("this is nothing"), None);
        assert_eq!(SmallTalk::detect("they went home"), None);
    }

    #[test]
    fn greeting_uses_first_name() {
        let catalog = Catalog::validated().unwrap();
        let reply = small_talk_reply(&catalog, Locale::En, "hi", "Nigar").unwrap();
        assert_eq!(reply, "Hello Nigar! Just send a link to download a video.");
        assert!(small_talk_reply(&catalog, Locale::En, "random words", "Nigar").is_none());
    }
}
