use crate::catalog::ArchiveCatalog;
use crate::config::TriageConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// 処理対象のアーカイブを一覧表示する
pub fn execute_catalog(
    mut config: TriageConfig,
    input: Option<PathBuf>,
    suffix: Option<String>,
) -> Result<ArchiveCatalog> {
    if let Some(input) = input {
        config.input_dir = input;
    }
    if let Some(suffix) = suffix {
        config.volume_suffix = suffix;
    }

    let catalog = ArchiveCatalog::scan(
        &config.input_dir,
        &config.volume_suffix,
        config.recursive_catalog,
    )
    .with_context(|| format!("入力ディレクトリを探索できません: {}", config.input_dir.display()))?;

    for (label, entry) in catalog.iter() {
        println!("{label}\t{}", entry.path.display());
    }
    for path in catalog.dropped() {
        println!("-\t{} (ラベルなし)", path.display());
    }
    println!(
        "{} 件 (ラベルなし {} 件, 重複上書き {} 件)",
        catalog.len(),
        catalog.dropped().len(),
        catalog.overwritten()
    );

    Ok(catalog)
}
