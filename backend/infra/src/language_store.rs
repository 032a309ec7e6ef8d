//! Per-user language preference, persisted as `{"<user id>": "<code>"}`.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use linkgrab_core::BotError;
use linkgrab_i18n::Locale;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::json_file::{read_json, write_json};

pub struct LanguageStore {
    path: PathBuf,
    prefs: Mutex<HashMap<i64, Locale>>,
}

impl LanguageStore {
    /// Load preferences from `path`. Unreadable files and unknown codes are
    /// logged and skipped so the bot still starts.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let raw: BTreeMap<String, String> = match read_json(&path).await {
            Ok(found) => found.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load language preferences, starting empty: {}", e);
                BTreeMap::new()
            }
        };

        let mut prefs = HashMap::new();
        for (user, code) in raw {
            match (user.parse::<i64>(), Locale::from_code(&code)) {
                (Ok(id), Some(locale)) => {
                    prefs.insert(id, locale);
                }
                _ => warn!(user = %user, code = %code, "Skipping invalid language preference"),
            }
        }
        info!(path = %path.display(), users = prefs.len(), "Loaded language preferences");

        Self {
            path,
            prefs: Mutex::new(prefs),
        }
    }

    /// The user's locale, or the default when unset.
    pub async fn get(&self, user_id: i64) -> Locale {
        self.prefs
            .lock()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    /// Set a preference from a raw code. Unsupported codes and failed writes
    /// leave the stored preference unchanged. The file is rewritten under the
    /// lock so concurrent changes cannot lose each other.
    pub async fn set(&self, user_id: i64, code: &str) -> Result<Locale, BotError> {
        let locale =
            Locale::from_code(code).ok_or_else(|| BotError::UnsupportedLocale(code.to_string()))?;

        let mut prefs = self.prefs.lock().await;
        let mut snapshot: BTreeMap<String, &str> = prefs
            .iter()
            .map(|(id, l)| (id.to_string(), l.code()))
            .collect();
        snapshot.insert(user_id.to_string(), locale.code());
        write_json(&self.path, &snapshot)
            .await
            .map_err(|e| BotError::Storage(e.to_string()))?;
        prefs.insert(user_id, locale);

        info!(user_id, locale = %locale, "Language preference updated");
        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> PathBuf {
        std::env::temp_dir()
            .join(format!("linkgrab-lang-{}", uuid::Uuid::new_v4()))
            .join("languages.json")
    }

    #[tokio::test]
    async fn unset_users_get_default() {
        let store = LanguageStore::open(scratch()).await;
        assert_eq!(store.get(42).await, Locale::Az);
    }

    #[tokio::test]
    async fn supported_code_persists_and_applies_immediately() {
        let path = scratch();
        let store = LanguageStore::open(&path).await;
        assert_eq!(store.set(42, "ru").await.unwrap(), Locale::Ru);
        assert_eq!(store.get(42).await, Locale::Ru);

        let reopened = LanguageStore::open(&path).await;
        assert_eq!(reopened.get(42).await, Locale::Ru);
    }

    #[tokio::test]
    async fn unsupported_code_is_rejected_and_unchanged() {
        let store = LanguageStore::open(scratch()).await;
        store.set(7, "en").await.unwrap();

        let err = store.set(7, "de").await.unwrap_err();
        assert!(matches!(err, BotError::UnsupportedLocale(code) if code == "de"));
        assert_eq!(store.get(7).await, Locale::En);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_locale() {
        let path = scratch();
        let store = LanguageStore::open(&path).await;
        store.set(7, "en").await.unwrap();

        tokio::fs::remove_file(&path).await.unwrap();
        tokio::fs::create_dir_all(&path).await.unwrap();

        let err = store.set(7, "ru").await.unwrap_err();
        assert!(matches!(err, BotError::Storage(_)));
        assert_eq!(store.get(7).await, Locale::En);
    }

    #[tokio::test]
    async fn invalid_file_entries_are_skipped() {
        let path = scratch();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, br#"{"1":"tr","2":"xx","abc":"en"}"#).await.unwrap();

        let store = LanguageStore::open(&path).await;
        assert_eq!(store.get(1).await, Locale::Tr);
        assert_eq!(store.get(2).await, Locale::Az);
        assert_eq!(store.prefs.lock().await.len(), 1);
    }
}
