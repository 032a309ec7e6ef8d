use crate::catalog::{Category::*, Entry};

pub(super) const ENTRIES: &[Entry] = &[
    (Commands, "start", "👋 Merhaba! Ben bir video indirme botuyum.

📱 Desteklenen platformlar:
• Instagram (Reels, Posts, Stories)
• TikTok videoları
• YouTube videoları (sınırlı)

📋 Ana komutlar:
/help - Yardım bilgileri
/info - Bot hakkında bilgi
/stats - İstatistikler
/language - Dil değiştir

🔗 Bana bir video linki gönderin, sizin için indireceğim!"),
    (Commands, "help", "🤖 Silgi Video İndirme Botu

📥 Desteklenen platformlar:
• Instagram (Reels, videolar)
• TikTok (videolar)
• YouTube (sınırlı)

🔧 Komutlar:
/start - Botu başlat ve dil seç
/help - Bu yardım mesajı
/info - Bot bilgileri
/stats - Kullanım istatistikleri
/language - Dil değiştir

📝 Kullanım:
Video linkini gönderin, bot otomatik olarak indirecek.

⚠️ Not: YouTube'da kısıtlamalar var."),
    (Commands, "info", "ℹ️ Bot Hakkında

🤖 Ad: Silgi Video İndirme Botu
🔧 Sürüm: 2.0.0
⚡ Teknoloji: Rust + yt-dlp

🌟 Özellikler:
• Hızlı video indirme
• Çoklu platform desteği
• İndirme ilerleme göstergeleri
• Otomatik dosya temizleme

📊 Performans:
• Instagram: Mükemmel
• TikTok: Mükemmel
• YouTube: Sınırlı

🛡️ Güvenlik:
Tüm dosyalar geçici olarak saklanır ve otomatik silinir."),
    (Status, "processing", "🔄 Video linki işleniyor..."),
    (Status, "downloading", "⬇️ Video indiriliyor ({platform})..."),
    (Status, "uploading", "📤 Video gönderiliyor..."),
    (Status, "success", "✅ Video başarıyla gönderildi!"),
    (Status, "error", "❌ Hata oluştu: {error}"),
    (Status, "not_supported", "❌ Bu link desteklenmiyor. Instagram, TikTok veya YouTube linki gönderin."),
    (Status, "invalid_link", "❌ Geçersiz link formatı. Düzgün bir video linki gönderin."),
    (Status, "file_too_large", "❌ Dosya çok büyük. Daha küçük bir video deneyin."),
    (Status, "download_failed", "❌ Video indirilemedi. Linki kontrol edin ve tekrar deneyin."),
    (Youtube, "restrictions", "⚠️ YouTube sıkı indirme kısıtlamaları koydu.
Lütfen deneyin:
• Instagram veya TikTok linkleri
• Farklı bir YouTube videosu
• Daha kısa veya eski YouTube videoları"),
    (Youtube, "signin_required", "🔐 YouTube giriş gerektiriyor. Instagram veya TikTok kullanın."),
    (Youtube, "format_unavailable", "📺 Video formatı mevcut değil. Başka video deneyin."),
    (Youtube, "choose_format", "🎬 Format seçin:"),
    (Youtube, "video_button", "🎥 Video"),
    (Youtube, "audio_button", "🎵 Ses"),
    (Youtube, "selection_expired", "⌛ Seçimin süresi doldu. Linki tekrar gönderin."),
    (Progress, "downloading", "⬇️ İndiriliyor: {percentage}% ({size})"),
    (Progress, "processing", "⚙️ İşleniyor..."),
    (Progress, "uploading", "📤 Telegram'a gönderiliyor: {percentage}%"),
    (Progress, "finalizing", "🎬 Tamamlanıyor..."),
    (Platforms, "instagram", "Instagram"),
    (Platforms, "youtube", "YouTube"),
    (Platforms, "tiktok", "TikTok"),
    (Language, "select", "Lütfen dilinizi seçin:"),
    (Language, "changed", "Dil Türkçe olarak değiştirildi ✅"),
    (Language, "error", "Dil ayarlanırken hata oluştu"),
    (Promotional, "groups", "🎭 Daha fazla bot ve hizmet için gruplarımıza katılın:"),
    (Stats, "text", "📊 Bot istatistikleri

👥 Toplam kullanıcı: {total_users}
⬇️ Toplam indirme: {total_downloads}

🏆 Platform istatistikleri:
• Instagram: {instagram}
• TikTok: {tiktok}
• YouTube: {youtube}

📋 Kullanılan komutlar: {commands}
🚀 Çalışma başlangıcı: {started}
⚡ Son aktivite: {last_activity}"),
    (Errors, "generic", "⚠️ Üzgünüz, isteğiniz işlenirken bir sorun oluştu. Hata kaydedildi ve incelenecek."),
    (Errors, "rate_limited", "⚡ Yavaşlayın! Çok fazla istek gönderdiniz. Lütfen biraz bekleyip tekrar deneyin."),
    (Errors, "access_denied", "🚫 Erişim reddedildi. Bu komut yalnızca yöneticiler içindir."),
    (Replies, "greeting", "Merhaba {name}! Video indirmek için bir link gönderin."),
    (Replies, "help", "Video indirmek için:
• TikTok linki gönderin
• Instagram linki gönderin
• YouTube linki gönderin

Komutlar için /help yazın."),
    (Replies, "thanks", "Rica ederim! Başka bir şeye ihtiyacınız olursa söyleyin."),
    (Admin, "panel", "🔧 Yönetici Paneli

Kullanılabilir yönetici komutları:
• /admin - Bu paneli göster
• /broadcast <mesaj> - Tüm kullanıcılara mesaj gönder
• /shutdown - Botu güvenli şekilde kapat

Bot durumu: ✅ Çalışıyor"),
    (Admin, "broadcast_usage", "Kullanım: /broadcast <mesaj>"),
    (Admin, "broadcasting", "📢 Yayın gönderiliyor..."),
    (Admin, "broadcast_done", "✅ Yayın tamamlandı
İletildi: {delivered}
Başarısız: {failed}"),
    (Admin, "shutting_down", "🔄 Bot güvenli şekilde kapatılıyor..."),
    (Admin, "shutdown_ack", "✅ Kapatma komutu alındı. Bot mevcut işlemlerden sonra duracak."),
    (Commands, "ping", "🏓 Pong!
Yanıt süresi: {ms}ms
Durum: ✅ Çevrimiçi"),
    (Commands, "echo", "🔄 Yankı:
{text}"),
    (Commands, "echo_usage", "Kullanım: /echo <metin>"),
];
