pub mod gist;
pub mod json_file;
pub mod language_store;
pub mod usage_stats;

pub use gist::{GistMirror, GistSettings};
pub use json_file::StoreError;
pub use language_store::LanguageStore;
pub use usage_stats::{PlatformCounts, StatsStore, UsageCounters};
