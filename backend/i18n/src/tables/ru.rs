use crate::catalog::{Category::*, Entry};

pub(super) const ENTRIES: &[Entry] = &[
    (Commands, "start", "👋 Привет! Я бот для скачивания видео.

📱 Поддерживаемые платформы:
• Instagram (Reels, Posts, Stories)
• TikTok видео
• YouTube видео (ограничено)

📋 Основные команды:
/help - Справка
/info - Информация о боте
/stats - Статистика
/language - Изменить язык

🔗 Отправьте мне ссылку на видео, и я скачаю его для вас!"),
    (Commands, "help", "🤖 Silgi Video Download Bot

📥 Поддерживаемые платформы:
• Instagram (Reels, видео)
• TikTok (видео)
• YouTube (ограниченно)

🔧 Команды:
/start - Запустить бота и выбрать язык
/help - Это сообщение помощи
/info - Информация о боте
/stats - Статистика использования
/language - Изменить язык

📝 Использование:
Отправьте ссылку на видео, и бот автоматически загрузит его.

⚠️ Примечание: YouTube имеет ограничения."),
    (Commands, "info", "ℹ️ О боте

🤖 Название: Silgi Video Download Bot
🔧 Версия: 2.0.0
⚡ Технология: Rust + yt-dlp

🌟 Возможности:
• Быстрая загрузка видео
• Поддержка нескольких платформ
• Индикаторы прогресса загрузки
• Автоматическая очистка файлов

📊 Производительность:
• Instagram: Отлично
• TikTok: Отлично
• YouTube: Ограниченно

🛡️ Безопасность:
Все файлы временно хранятся и автоматически удаляются."),
    (Status, "processing", "🔄 Обработка ссылки на видео..."),
    (Status, "downloading", "⬇️ Загрузка видео ({platform})..."),
    (Status, "uploading", "📤 Отправка видео..."),
    (Status, "success", "✅ Видео успешно отправлено!"),
    (Status, "error", "❌ Произошла ошибка: {error}"),
    (Status, "not_supported", "❌ Эта ссылка не поддерживается. Отправьте ссылку Instagram, TikTok или YouTube."),
    (Status, "invalid_link", "❌ Неверный формат ссылки. Отправьте правильную ссылку на видео."),
    (Status, "file_too_large", "❌ Файл слишком большой. Попробуйте видео поменьше."),
    (Status, "download_failed", "❌ Не удалось скачать видео. Проверьте ссылку и попробуйте снова."),
    (Youtube, "restrictions", "⚠️ YouTube установил строгие ограничения на загрузку.
Пожалуйста, попробуйте:
• Ссылки Instagram или TikTok
• Другое видео YouTube
• Более короткие или старые видео YouTube"),
    (Youtube, "signin_required", "🔐 YouTube требует входа в систему. Используйте Instagram или TikTok."),
    (Youtube, "format_unavailable", "📺 Формат видео недоступен. Попробуйте другое видео."),
    (Youtube, "choose_format", "🎬 Выберите формат:"),
    (Youtube, "video_button", "🎥 Видео"),
    (Youtube, "audio_button", "🎵 Аудио"),
    (Youtube, "selection_expired", "⌛ Время выбора истекло. Отправьте ссылку снова."),
    (Progress, "downloading", "⬇️ Загрузка: {percentage}% ({size})"),
    (Progress, "processing", "⚙️ Обработка..."),
    (Progress, "uploading", "📤 Отправка в Telegram: {percentage}%"),
    (Progress, "finalizing", "🎬 Завершение..."),
    (Platforms, "instagram", "Instagram"),
    (Platforms, "youtube", "YouTube"),
    (Platforms, "tiktok", "TikTok"),
    (Language, "select", "Пожалуйста, выберите ваш язык:"),
    (Language, "changed", "Язык изменен на русский ✅"),
    (Language, "error", "Ошибка при смене языка"),
    (Promotional, "groups", "🎭 Присоединяйтесь к нашим группам для получения дополнительных ботов и услуг:"),
    (Stats, "text", "📊 Статистика бота

👥 Всего пользователей: {total_users}
⬇️ Всего загрузок: {total_downloads}

🏆 Статистика по платформам:
• Instagram: {instagram}
• TikTok: {tiktok}
• YouTube: {youtube}

📋 Использовано команд: {commands}
🚀 Работает с: {started}
⚡ Последняя активность: {last_activity}"),
    (Errors, "generic", "⚠️ Извините, при обработке запроса произошла ошибка. Ошибка записана и будет изучена."),
    (Errors, "rate_limited", "⚡ Помедленнее! Слишком много запросов. Подождите немного и попробуйте снова."),
    (Errors, "access_denied", "🚫 Доступ запрещён. Эта команда только для администраторов."),
    (Replies, "greeting", "Привет, {name}! Просто отправьте ссылку, чтобы скачать видео."),
    (Replies, "help", "Чтобы скачать видео:
• Отправьте ссылку TikTok
• Отправьте ссылку Instagram
• Отправьте ссылку YouTube

Команды: /help"),
    (Replies, "thanks", "Пожалуйста! Если что-то ещё понадобится, пишите."),
    (Admin, "panel", "🔧 Панель администратора

Доступные команды:
• /admin - Показать эту панель
• /broadcast <сообщение> - Отправить сообщение всем пользователям
• /shutdown - Корректно остановить бота

Статус бота: ✅ Работает"),
    (Admin, "broadcast_usage", "Использование: /broadcast <сообщение>"),
    (Admin, "broadcasting", "📢 Рассылка..."),
    (Admin, "broadcast_done", "✅ Рассылка завершена
Доставлено: {delivered}
Ошибок: {failed}"),
    (Admin, "shutting_down", "🔄 Бот корректно останавливается..."),
    (Admin, "shutdown_ack", "✅ Команда остановки получена. Бот остановится после текущих операций."),
    (Commands, "ping", "🏓 Понг!
Время ответа: {ms}мс
Статус: ✅ В сети"),
    (Commands, "echo", "🔄 Эхо:
{text}"),
    (Commands, "echo_usage", "Использование: /echo <текст>"),
];
