// 分割アーカイブの解凍と壁紙画像の向き別仕分け
//
// 処理の流れ:
// カタログ → 解凍 → 空ディレクトリ削除 → 仕分け・移動 → アーカイブのディレクトリ削除

pub mod catalog;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod core;
pub mod extractor;
pub mod file_scanner;
pub mod fs_ops;
pub mod image_loader;
pub mod pipeline;
pub mod placement;
pub mod reporting;
pub mod sweeper;
pub mod tool_locator;

pub use catalog::ArchiveCatalog;
pub use config::TriageConfig;
pub use self::core::{TriageError, TriageResult};
pub use pipeline::{Orchestrator, RunSummary};
