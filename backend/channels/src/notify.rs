//! Notices sent to the first configured admin.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use linkgrab_core::{Platform, UserRef};
use tracing::{error, info};

use crate::transport::ChatTransport;

pub struct AdminNotifier {
    transport: Arc<dyn ChatTransport>,
    admin_chat: Option<i64>,
    offset: FixedOffset,
}

impl AdminNotifier {
    /// `utc_offset_hours` out of range falls back to UTC.
    pub fn new(transport: Arc<dyn ChatTransport>, admin_chat: Option<i64>, utc_offset_hours: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or(Utc.fix());
        Self { transport, admin_chat, offset }
    }

    pub async fn download_completed(&self, user: &UserRef, platform: Platform, url: &str, title: &str) {
        let text = download_notice(user, platform, url, title, Utc::now(), self.offset);
        self.send(user, &text, "download").await;
    }

    pub async fn forward_text(&self, user: &UserRef, text: &str) {
        let notice = forwarded_notice(user, text);
        self.send(user, &notice, "message").await;
    }

    async fn send(&self, user: &UserRef, text: &str, kind: &str) {
        let Some(admin) = self.admin_chat else {
            return;
        };
        match self.transport.send_text(admin, text, None).await {
            Ok(_) => info!(admin, user_id = user.id, kind, "Admin notified"),
            Err(e) => error!(admin, user_id = user.id, kind, "Failed to notify admin: {:#}", e),
        }
    }
}

pub fn download_notice(
    user: &UserRef,
    platform: Platform,
    url: &str,
    title: &str,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> String {
    let when = now.with_timezone(&offset).format("%Y-%m-%d %H:%M:%S");
    let title = if title.is_empty() { "Məlum deyil" } else { title };
    format!(
        "📹 Video Yükləndi\n\n\
         📅 Tarix: {when}\n\
         👤 İstifadəçi: {}\n\
         🆔 Username: {}\n\
         🔢 ID: {}\n\
         🌐 Platform: {}\n\n\
         📝 Video Başlığı: {title}\n\n\
         🔗 Orijinal Link:\n{url}",
        user.full_name(),
        user.handle(),
        user.id,
        platform.display_name(),
    )
}

pub fn forwarded_notice(user: &UserRef, text: &str) -> String {
    format!(
        "💬 Yeni İstifadəçi Mesajı\n\n\
         👤 İstifadəçi: {}\n\
         🆔 Username: {}\n\
         🔢 ID: {}\n\n\
         📝 Mesaj:\n{text}",
        user.full_name(),
        user.handle(),
        user.id,
    )
}
