use crate::catalog::{Category::*, Entry};

pub(super) const ENTRIES: &[Entry] = &[
    (Commands, "start", "👋 Salam! Mən video endirmə botuyam.

📱 Dəstəklədiyim platformalar:
• Instagram (Reels, Posts, Stories)
• TikTok videoları
• YouTube videoları (məhdud)

📋 Əsas əmrlər:
/help - Kömək məlumatları
/info - Bot haqqında məlumat
/stats - Statistikalar
/language - Dil dəyişdir

🔗 Video linkini göndərin və mən onu sizə yükləyəcəyəm!"),
    (Commands, "help", "🤖 Silgi Video Yükləmə Botu

📥 Dəstəklənən platformalar:
• Instagram (Reels, videolar)
• TikTok (videolar)
• YouTube (məhdud)

🔧 Əmrlər:
/start - Botu başlat və dil seç
/help - Bu yardım mətni
/info - Bot haqqında məlumat
/stats - İstifadə statistikaları
/language - Dili dəyişdir

📝 İstifadə:
Video linkini göndərin və bot avtomatik yükləyəcək.

⚠️ Qeyd: YouTube platformasında məhdudiyyətlər var."),
    (Commands, "info", "ℹ️ Bot haqqında

🤖 Ad: Silgi Video Endirmə Botu
🔧 Versiya: 2.0.0
⚡ Texnologiya: Rust + yt-dlp

🌟 Xüsusiyyətlər:
• Sürətli video endirmə
• Çoxlu platform dəstəyi
• Yüklənmə irəliləyiş göstəricisi
• Avtomatik fayl təmizləmə

📊 Performans:
• Instagram: Əla
• TikTok: Əla
• YouTube: Məhdud

🛡️ Təhlükəsizlik:
Bütün fayllar müvəqqəti saxlanılır və avtomatik silinir."),
    (Status, "processing", "🔄 Video linki emal edilir..."),
    (Status, "downloading", "⬇️ Video yüklənir ({platform})..."),
    (Status, "uploading", "📤 Video göndərilir..."),
    (Status, "success", "✅ Video uğurla göndərildi!"),
    (Status, "error", "❌ Xəta baş verdi: {error}"),
    (Status, "not_supported", "❌ Bu link dəstəklənmir. Instagram, TikTok və ya YouTube linkləri göndərin."),
    (Status, "invalid_link", "❌ Yanlış link formatı. Düzgün video linki göndərin."),
    (Status, "file_too_large", "❌ Fayl çox böyükdür. Daha kiçik video cəhd edin."),
    (Status, "download_failed", "❌ Video yüklənə bilmədi. Linki yoxlayın və yenidən cəhd edin."),
    (Youtube, "restrictions", "⚠️ YouTube sərt yüklənmə məhdudiyyətləri qoyub.
Zəhmət olmasa cəhd edin:
• Instagram və ya TikTok linkləri
• Fərqli YouTube videosu
• Daha qısa və ya köhnə YouTube videoları"),
    (Youtube, "signin_required", "🔐 YouTube giriş tələb edir. Instagram və ya TikTok istifadə edin."),
    (Youtube, "format_unavailable", "📺 Video formatı mövcud deyil. Başqa video cəhd edin."),
    (Youtube, "choose_format", "🎬 Formatı seçin:"),
    (Youtube, "video_button", "🎥 Video"),
    (Youtube, "audio_button", "🎵 Audio"),
    (Youtube, "selection_expired", "⌛ Seçim vaxtı bitib. Linki yenidən göndərin."),
    (Progress, "downloading", "⬇️ Yüklənir: {percentage}% ({size})"),
    (Progress, "processing", "⚙️ Emal edilir..."),
    (Progress, "uploading", "📤 Telegram-a göndərilir: {percentage}%"),
    (Progress, "finalizing", "🎬 Tamamlanır..."),
    (Platforms, "instagram", "Instagram"),
    (Platforms, "youtube", "YouTube"),
    (Platforms, "tiktok", "TikTok"),
    (Language, "select", "Zəhmət olmasa dilinizi seçin:"),
    (Language, "changed", "Dil Azərbaycan dilinə dəyişdirildi ✅"),
    (Language, "error", "Dil dəyişdirilərkən xəta baş verdi"),
    (Promotional, "groups", "🎭 Daha çox botlar və xidmətlər üçün qruplarımıza qoşulun:"),
    (Stats, "text", "📊 Bot statistikaları

👥 Ümumi istifadəçilər: {total_users}
⬇️ Ümumi yüklənmələr: {total_downloads}

🏆 Platform statistikaları:
• Instagram: {instagram}
• TikTok: {tiktok}
• YouTube: {youtube}

📋 İstifadə olunan əmrlər: {commands}
🚀 İşə düşmə vaxtı: {started}
⚡ Son fəaliyyət: {last_activity}"),
    (Errors, "generic", "⚠️ Bağışlayın, sorğunuz emal edilərkən xəta baş verdi. Xəta qeydə alındı və araşdırılacaq."),
    (Errors, "rate_limited", "⚡ Çox sürətli! Bir az gözləyin və yenidən cəhd edin."),
    (Errors, "access_denied", "🚫 Giriş qadağandır. Bu əmr yalnız adminlər üçündür."),
    (Replies, "greeting", "Salam {name}! Video endirmək üçün sadəcə link göndərin."),
    (Replies, "help", "Video endirmək üçün:
• TikTok linki göndərin
• Instagram linki göndərin
• YouTube linki göndərin

Komandlar üçün /help yazın."),
    (Replies, "thanks", "Rica edirəm! Başqa bir şey lazımdırsa söyləyin."),
    (Admin, "panel", "🔧 Admin Paneli

Mövcud admin əmrləri:
• /admin - Bu paneli göstər
• /broadcast <mesaj> - Bütün istifadəçilərə mesaj göndər
• /shutdown - Botu təhlükəsiz dayandır

Bot statusu: ✅ İşləyir"),
    (Admin, "broadcast_usage", "İstifadə: /broadcast <mesaj>"),
    (Admin, "broadcasting", "📢 Mesaj göndərilir..."),
    (Admin, "broadcast_done", "✅ Göndəriş tamamlandı
Çatdırıldı: {delivered}
Uğursuz: {failed}"),
    (Admin, "shutting_down", "🔄 Bot təhlükəsiz dayandırılır..."),
    (Admin, "shutdown_ack", "✅ Dayandırma əmri alındı. Bot cari əməliyyatlardan sonra dayanacaq."),
    (Commands, "ping", "🏓 Pong!
Cavab müddəti: {ms}ms
Status: ✅ Onlayn"),
    (Commands, "echo", "🔄 Əks-səda:
{text}"),
    (Commands, "echo_usage", "İstifadə: /echo <mətn>"),
];
