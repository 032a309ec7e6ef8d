//! `linkgrab stats`: print the local usage counters.

use std::path::Path;

use anyhow::{bail, Result};
use linkgrab_infra::StatsStore;

use crate::terminal_output::render_report;

pub async fn run(stats_file: &Path) -> Result<()> {
    if !stats_file.exists() {
        bail!("no statistics recorded yet at {}", stats_file.display());
    }
    // local view only; the gist mirror is not consulted
    let store = StatsStore::open(stats_file, None).await;
    let c = store.snapshot().await;

    println!("\n📊 linkgrab usage ({})\n", stats_file.display());
    print!(
        "{}",
        render_report(&[
            ("Users", c.total_users.to_string()),
            ("Downloads", c.total_downloads.to_string()),
            ("  TikTok", c.platform_downloads.tiktok.to_string()),
            ("  Instagram", c.platform_downloads.instagram.to_string()),
            ("  YouTube", c.platform_downloads.youtube.to_string()),
            ("Commands", c.commands_used.to_string()),
            ("Started", c.bot_started_at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ("Last activity", c.last_activity.format("%Y-%m-%d %H:%M UTC").to_string()),
        ])
    );
    Ok(())
}
