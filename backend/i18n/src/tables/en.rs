use crate::catalog::{Category::*, Entry};

pub(super) const ENTRIES: &[Entry] = &[
    (Commands, "start", "👋 Hello! I'm a video downloader bot.

📱 Supported platforms:
• Instagram (Reels, Posts, Stories)
• TikTok videos
• YouTube videos (limited)

📋 Main commands:
/help - Help information
/info - Bot information
/stats - Statistics
/language - Change language

🔗 Send me a video link and I'll download it for you!"),
    (Commands, "help", "🤖 Silgi Video Download Bot

📥 Supported platforms:
• Instagram (Reels, videos)
• TikTok (videos)
• YouTube (limited)

🔧 Commands:
/start - Start bot and select language
/help - This help message
/info - Bot information
/stats - Usage statistics
/language - Change language

📝 Usage:
Send a video link and the bot will download it automatically.

⚠️ Note: YouTube has restrictions."),
    (Commands, "info", "ℹ️ About Bot

🤖 Name: Silgi Video Download Bot
🔧 Version: 2.0.0
⚡ Technology: Rust + yt-dlp

🌟 Features:
• Fast video downloading
• Multiple platform support
• Download progress indicators
• Automatic file cleanup

📊 Performance:
• Instagram: Excellent
• TikTok: Excellent
• YouTube: Limited

🛡️ Security:
All files are temporarily stored and automatically deleted."),
    (Status, "processing", "🔄 Processing video link..."),
    (Status, "downloading", "⬇️ Downloading video ({platform})..."),
    (Status, "uploading", "📤 Uploading video..."),
    (Status, "success", "✅ Video sent successfully!"),
    (Status, "error", "❌ Error occurred: {error}"),
    (Status, "not_supported", "❌ This link is not supported. Send Instagram, TikTok or YouTube links."),
    (Status, "invalid_link", "❌ Invalid link format. Send a proper video link."),
    (Status, "file_too_large", "❌ File is too large. Try a smaller video."),
    (Status, "download_failed", "❌ Could not download video. Check the link and try again."),
    (Youtube, "restrictions", "⚠️ YouTube has strict download restrictions.
Please try:
• Instagram or TikTok links
• Different YouTube video
• Shorter or older YouTube videos"),
    (Youtube, "signin_required", "🔐 YouTube requires sign in. Use Instagram or TikTok."),
    (Youtube, "format_unavailable", "📺 Video format unavailable. Try another video."),
    (Youtube, "choose_format", "🎬 Choose a format:"),
    (Youtube, "video_button", "🎥 Video"),
    (Youtube, "audio_button", "🎵 Audio"),
    (Youtube, "selection_expired", "⌛ This selection has expired. Send the link again."),
    (Progress, "downloading", "⬇️ Downloading: {percentage}% ({size})"),
    (Progress, "processing", "⚙️ Processing..."),
    (Progress, "uploading", "📤 Uploading to Telegram: {percentage}%"),
    (Progress, "finalizing", "🎬 Finalizing..."),
    (Platforms, "instagram", "Instagram"),
    (Platforms, "youtube", "YouTube"),
    (Platforms, "tiktok", "TikTok"),
    (Language, "select", "Please select your language:"),
    (Language, "changed", "Language changed to English ✅"),
    (Language, "error", "Error setting language"),
    (Promotional, "groups", "🎭 Join our groups for more bots and services:"),
    (Stats, "text", "📊 Bot statistics

👥 Total users: {total_users}
⬇️ Total downloads: {total_downloads}

🏆 Platform statistics:
• Instagram: {instagram}
• TikTok: {tiktok}
• YouTube: {youtube}

📋 Commands used: {commands}
🚀 Running since: {started}
⚡ Last activity: {last_activity}"),
    (Errors, "generic", "⚠️ Sorry, something went wrong while processing your request. The error has been logged and will be investigated."),
    (Errors, "rate_limited", "⚡ Slow down! You've sent too many requests. Please wait a moment before trying again."),
    (Errors, "access_denied", "🚫 Access denied. This command is restricted to administrators only."),
    (Replies, "greeting", "Hello {name}! Just send a link to download a video."),
    (Replies, "help", "To download a video:
• Send a TikTok link
• Send an Instagram link
• Send a YouTube link

Type /help for commands."),
    (Replies, "thanks", "You're welcome! Let me know if you need anything else."),
    (Admin, "panel", "🔧 Admin Panel

Available Admin Commands:
• /admin - Show this admin panel
• /broadcast <message> - Send message to all users
• /shutdown - Gracefully shutdown the bot

Bot Status: ✅ Running"),
    (Admin, "broadcast_usage", "Usage: /broadcast <message>"),
    (Admin, "broadcasting", "📢 Broadcasting..."),
    (Admin, "broadcast_done", "✅ Broadcast complete
Delivered: {delivered}
Failed: {failed}"),
    (Admin, "shutting_down", "🔄 Shutting down bot gracefully..."),
    (Admin, "shutdown_ack", "✅ Shutdown command received. Bot will stop after current operations."),
    (Commands, "ping", "🏓 Pong!
Response time: {ms}ms
Status: ✅ Online"),
    (Commands, "echo", "🔄 Echo:
{text}"),
    (Commands, "echo_usage", "Usage: /echo <text>"),
];
