pub mod extractor;
pub mod mime_detect;
pub mod orchestrator;
pub mod strategy;
pub mod temp_file;
pub mod title;
pub mod ytdlp;

pub use extractor::{ExtractError, Extractor, MediaMetadata, MetadataProfile};
pub use mime_detect::{delivery_kind, detect_mime_type, DeliveryKind};
pub use orchestrator::{DownloadError, DownloadOutcome, DownloadSettings, Downloader};
pub use strategy::{ExtractionStrategy, StrategyTable};
pub use temp_file::TempMedia;
pub use title::TitleExtractor;
pub use ytdlp::YtDlp;
