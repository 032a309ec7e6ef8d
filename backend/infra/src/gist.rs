//! Mirror of the usage counters in a private GitHub gist.

use std::collections::HashMap;

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::json_file::StoreError;
use crate::usage_stats::UsageCounters;

const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GistSettings {
    pub token: String,
    /// Known gist id. When absent, an existing gist holding `file_name` is
    /// looked up, else a new private one is created.
    pub gist_id: Option<String>,
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Gist {
    id: String,
    #[serde(default)]
    files: HashMap<String, GistFile>,
}

pub struct GistMirror {
    client: reqwest::Client,
    token: String,
    gist_id: String,
    file_name: String,
}

impl GistMirror {
    /// Resolve (or create) the gist and return the counters it already holds.
    pub async fn connect(
        settings: GistSettings,
        seed: &UsageCounters,
    ) -> Result<(Self, Option<UsageCounters>), StoreError> {
        let client = reqwest::Client::new();
        let mut mirror = Self {
            client,
            token: settings.token,
            gist_id: settings.gist_id.unwrap_or_default(),
            file_name: settings.file_name,
        };

        if mirror.gist_id.is_empty() {
            match mirror.find_existing().await? {
                Some(id) => {
                    info!(gist_id = %id, "Found existing stats gist");
                    mirror.gist_id = id;
                }
                None => {
                    mirror.gist_id = mirror.create(seed).await?;
                    info!(gist_id = %mirror.gist_id, "Created stats gist");
                    return Ok((mirror, None));
                }
            }
        }

        let gist = mirror.fetch(&mirror.gist_id).await?;
        let counters = counters_from(&gist, &mirror.file_name)?;
        Ok((mirror, counters))
    }

    pub fn gist_id(&self) -> &str {
        &self.gist_id
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{GITHUB_API}{path}"))
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(USER_AGENT, "linkgrab")
            .header(ACCEPT, "application/vnd.github+json")
    }

    async fn fetch(&self, id: &str) -> Result<Gist, StoreError> {
        Ok(self
            .request(reqwest::Method::GET, &format!("/gists/{id}"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    async fn find_existing(&self) -> Result<Option<String>, StoreError> {
        let gists: Vec<Gist> = self
            .request(reqwest::Method::GET, "/gists")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(gists
            .into_iter()
            .find(|g| g.files.contains_key(&self.file_name))
            .map(|g| g.id))
    }

    async fn create(&self, seed: &UsageCounters) -> Result<String, StoreError> {
        let body = json!({
            "description": "Telegram Bot Statistics",
            "public": false,
            "files": self.files_payload(seed)?,
        });
        let gist: Gist = self
            .request(reqwest::Method::POST, "/gists")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(gist.id)
    }

    /// Replace the mirrored document with `counters`.
    pub async fn push(&self, counters: &UsageCounters) -> Result<(), StoreError> {
        let body = json!({ "files": self.files_payload(counters)? });
        self.request(reqwest::Method::PATCH, &format!("/gists/{}", self.gist_id))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// `{"<file name>": {"content": "<pretty JSON>"}}`
    fn files_payload(&self, counters: &UsageCounters) -> Result<serde_json::Value, StoreError> {
        let content =
            serde_json::to_string_pretty(counters).map_err(|e| StoreError::Gist(e.to_string()))?;
        let mut files = serde_json::Map::new();
        files.insert(self.file_name.clone(), json!({ "content": content }));
        Ok(serde_json::Value::Object(files))
    }
}

fn counters_from(gist: &Gist, file_name: &str) -> Result<Option<UsageCounters>, StoreError> {
    let Some(content) = gist.files.get(file_name).and_then(|f| f.content.as_deref()) else {
        return Ok(None);
    };
    serde_json::from_str(content)
        .map(Some)
        .map_err(|e| StoreError::Gist(format!("unreadable {file_name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_counters_from_gist_payload() {
        let payload = r#"{
            "id": "abc123",
            "files": {
                "bot_stats.json": {
                    "content": "{\"total_users\":2,\"unique_users\":[1,2],\"total_downloads\":3,\"platform_downloads\":{\"tiktok\":1,\"instagram\":0,\"youtube\":2},\"commands_used\":9,\"bot_started_at\":\"2024-05-01T10:00:00.123456\",\"last_activity\":\"2024-05-02T11:30:00+00:00\"}"
                }
            }
        }"#;
        let gist: Gist = serde_json::from_str(payload).unwrap();
        let counters = counters_from(&gist, "bot_stats.json").unwrap().unwrap();
        assert_eq!(counters.total_users, 2);
        assert_eq!(counters.platform_downloads.youtube, 2);
        assert_eq!(counters.commands_used, 9);
    }

    #[test]
    fn missing_file_is_none() {
        let gist: Gist = serde_json::from_str(r#"{"id":"x","files":{}}"#).unwrap();
        assert!(counters_from(&gist, "bot_stats.json").unwrap().is_none());
    }

    #[test]
    fn listing_without_content_still_parses() {
        let gists: Vec<Gist> = serde_json::from_str(
            r#"[{"id":"g1","files":{"notes.md":{"raw_url":"u"}}},{"id":"g2","files":{"bot_stats.json":{"raw_url":"u"}}}]"#,
        )
        .unwrap();
        let found = gists.into_iter().find(|g| g.files.contains_key("bot_stats.json"));
        assert_eq!(found.map(|g| g.id).as_deref(), Some("g2"));
    }
}
