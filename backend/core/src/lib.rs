pub mod callback;
pub mod error;
pub mod keyboard;
pub mod platform;
pub mod types;

pub use callback::CallbackPayload;
pub use error::BotError;
pub use keyboard::{Button, Keyboard};
pub use platform::{classify, extract_link, is_link_candidate, Platform};
pub use types::{DownloadRequest, MediaKind, UserRef};
