pub mod catalog;
pub mod classify;
pub mod maintenance;
pub mod run;

pub use catalog::*;
pub use classify::*;
pub use maintenance::*;
pub use run::*;

use crate::cli::OutputDirs;
use crate::config::TriageConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// 設定ファイルを読み込む。指定がなければデフォルト設定
pub fn load_config(path: Option<&Path>) -> Result<TriageConfig> {
    match path {
        Some(path) => TriageConfig::from_file(path)
            .with_context(|| format!("設定ファイルを読み込めません: {}", path.display())),
        None => Ok(TriageConfig::default()),
    }
}

/// コマンドラインで指定された出力ディレクトリで設定を上書きする
pub fn apply_output_dirs(mut config: TriageConfig, outputs: &OutputDirs) -> TriageConfig {
    if let Some(dir) = &outputs.mobile_dir {
        config.mobile_dir = dir.clone();
    }
    if let Some(dir) = &outputs.pc_dir {
        config.pc_dir = dir.clone();
    }
    config
}
