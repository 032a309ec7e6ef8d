//! Process-wide usage counters.
//!
//! Every mutation rewrites the whole stats file while the lock is held, then
//! hands a snapshot to the gist mirror task (if any), which pushes the most
//! recent state in the background.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use linkgrab_core::Platform;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::gist::{GistMirror, GistSettings};
use crate::json_file::{read_json, write_json};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformCounts {
    #[serde(default)]
    pub tiktok: u64,
    #[serde(default)]
    pub instagram: u64,
    #[serde(default)]
    pub youtube: u64,
}

impl PlatformCounts {
    pub fn get(&self, platform: Platform) -> u64 {
        match platform {
            Platform::TikTok => self.tiktok,
            Platform::Instagram => self.instagram,
            Platform::YouTube => self.youtube,
        }
    }

    fn increment(&mut self, platform: Platform) {
        match platform {
            Platform::TikTok => self.tiktok += 1,
            Platform::Instagram => self.instagram += 1,
            Platform::YouTube => self.youtube += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageCounters {
    pub total_users: u64,
    pub unique_users: BTreeSet<i64>,
    pub total_downloads: u64,
    pub platform_downloads: PlatformCounts,
    pub commands_used: u64,
    #[serde(with = "timestamp")]
    pub bot_started_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub last_activity: DateTime<Utc>,
}

impl Default for UsageCounters {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            total_users: 0,
            unique_users: BTreeSet::new(),
            total_downloads: 0,
            platform_downloads: PlatformCounts::default(),
            commands_used: 0,
            bot_started_at: now,
            last_activity: now,
        }
    }
}

impl UsageCounters {
    /// Recompute the user total from the set.
    fn normalize(mut self) -> Self {
        self.total_users = self.unique_users.len() as u64;
        self
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

/// RFC 3339 on write; also accepts offset-less ISO timestamps on read.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

pub struct StatsStore {
    path: PathBuf,
    counters: Mutex<UsageCounters>,
    mirror: Option<watch::Sender<UsageCounters>>,
}

impl StatsStore {
    /// Load counters from `path`. With gist settings, the mirror is resolved
    /// first and its contents win over the local file; any gist failure
    /// leaves the store local-only.
    pub async fn open(path: impl Into<PathBuf>, gist: Option<GistSettings>) -> Self {
        let path = path.into();
        let mut counters = match read_json::<UsageCounters>(&path).await {
            Ok(found) => found.unwrap_or_default(),
            Err(e) => {
                warn!("Failed to load stats, starting fresh: {}", e);
                UsageCounters::default()
            }
        };

        let mut mirror_tx = None;
        if let Some(settings) = gist {
            match GistMirror::connect(settings, &counters).await {
                Ok((mirror, remote)) => {
                    if let Some(remote) = remote {
                        counters = remote;
                    }
                    info!(gist_id = mirror.gist_id(), "Stats mirrored to gist");
                    let (tx, rx) = watch::channel(counters.clone());
                    spawn_mirror(mirror, rx);
                    mirror_tx = Some(tx);
                }
                Err(e) => warn!("Gist mirror unavailable, using local stats only: {}", e),
            }
        }

        Self {
            path,
            counters: Mutex::new(counters.normalize()),
            mirror: mirror_tx,
        }
    }

    /// Register a user. Returns true when the user was new.
    pub async fn add_user(&self, user_id: i64) -> bool {
        let mut counters = self.counters.lock().await;
        if !counters.unique_users.insert(user_id) {
            return false;
        }
        counters.total_users = counters.unique_users.len() as u64;
        counters.touch();
        self.persist(&counters).await;
        true
    }

    pub async fn add_download(&self, platform: Platform) {
        let mut counters = self.counters.lock().await;
        counters.platform_downloads.increment(platform);
        counters.total_downloads += 1;
        counters.touch();
        self.persist(&counters).await;
    }

    pub async fn add_command(&self) {
        let mut counters = self.counters.lock().await;
        counters.commands_used += 1;
        counters.touch();
        self.persist(&counters).await;
    }

    pub async fn snapshot(&self) -> UsageCounters {
        self.counters.lock().await.clone()
    }

    async fn persist(&self, counters: &UsageCounters) {
        if let Err(e) = write_json(&self.path, counters).await {
            warn!("Failed to persist stats: {}", e);
        }
        if let Some(tx) = &self.mirror {
            tx.send_replace(counters.clone());
        }
    }
}

fn spawn_mirror(mirror: GistMirror, mut rx: watch::Receiver<UsageCounters>) {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            match mirror.push(&snapshot).await {
                Ok(()) => debug!("Stats pushed to gist"),
                Err(e) => warn!("Failed to push stats to gist: {}", e),
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn scratch() -> PathBuf {
        std::env::temp_dir()
            .join(format!("linkgrab-stats-{}", uuid::Uuid::new_v4()))
            .join("stats.json")
    }

    #[tokio::test]
    async fn users_are_counted_once() {
        let store = StatsStore::open(scratch(), None).await;
        assert!(store.add_user(1).await);
        assert!(!store.add_user(1).await);
        assert!(store.add_user(2).await);

        let s = store.snapshot().await;
        assert_eq!(s.total_users, 2);
        assert_eq!(s.unique_users.len() as u64, s.total_users);
    }

    #[tokio::test]
    async fn downloads_and_commands_persist() {
        let path = scratch();
        let store = StatsStore::open(&path, None).await;
        store.add_download(Platform::YouTube).await;
        store.add_download(Platform::TikTok).await;
        store.add_command().await;

        let reopened = StatsStore::open(&path, None).await.snapshot().await;
        assert_eq!(reopened.total_downloads, 2);
        assert_eq!(reopened.platform_downloads.get(Platform::YouTube), 1);
        assert_eq!(reopened.platform_downloads.get(Platform::Instagram), 0);
        assert_eq!(reopened.commands_used, 1);
    }

    #[tokio::test]
    async fn concurrent_mutations_are_not_lost() {
        let path = scratch();
        let store = Arc::new(StatsStore::open(&path, None).await);
        let tasks: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.add_user(i).await;
                    store.add_download(Platform::Instagram).await;
                })
            })
            .collect();
        for t in tasks {
            t.await.unwrap();
        }

        let reopened = StatsStore::open(&path, None).await.snapshot().await;
        assert_eq!(reopened.total_users, 20);
        assert_eq!(reopened.total_downloads, 20);
    }

    #[tokio::test]
    async fn loaded_totals_follow_the_user_set() {
        let path = scratch();
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(
            &path,
            br#"{"total_users":10,"unique_users":[5,6],"bot_started_at":"2024-01-01T00:00:00","last_activity":"2024-01-02T00:00:00"}"#,
        )
        .await
        .unwrap();

        let s = StatsStore::open(&path, None).await.snapshot().await;
        assert_eq!(s.total_users, 2);
        assert_eq!(s.bot_started_at.format("%d.%m.%Y").to_string(), "01.01.2024");
    }
}
