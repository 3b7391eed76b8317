use crate::catalog::ArchiveCatalog;
use crate::cli::commands::apply_output_dirs;
use crate::cli::OutputDirs;
use crate::config::TriageConfig;
use crate::core::TriageError;
use crate::extractor::CommandExtractor;
use crate::image_loader::StandardImageProbe;
use crate::pipeline::{Orchestrator, RunSummary};
use crate::reporting::LogProgressReporter;
use crate::tool_locator::ToolLocator;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// run コマンドの引数をまとめた構造体
#[derive(Debug, Default)]
pub struct RunOptions {
    pub input: Option<PathBuf>,
    pub outputs: OutputDirs,
    pub password: Option<String>,
    pub suffix: Option<String>,
    pub dry_run: bool,
    pub report: Option<PathBuf>,
}

impl RunOptions {
    /// 指定された項目で設定を上書きする
    pub fn apply(&self, mut config: TriageConfig) -> TriageConfig {
        if let Some(input) = &self.input {
            config.input_dir = input.clone();
        }
        if let Some(password) = &self.password {
            config.password = password.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.volume_suffix = suffix.clone();
        }
        apply_output_dirs(config, &self.outputs)
    }
}

/// 入力ディレクトリの全アーカイブを解凍して仕分ける
pub fn execute_run(
    config: TriageConfig,
    options: RunOptions,
    cancel: Arc<AtomicBool>,
) -> Result<RunSummary> {
    let config = options.apply(config);
    config.validate()?;

    let catalog = ArchiveCatalog::scan(
        &config.input_dir,
        &config.volume_suffix,
        config.recursive_catalog,
    )
    .with_context(|| format!("入力ディレクトリを探索できません: {}", config.input_dir.display()))?;

    let extractor = CommandExtractor::new(
        ToolLocator::from_config(&config.tool),
        config.volume_suffix.clone(),
    );
    let probe = StandardImageProbe::with_mode(config.probe_mode);
    let reporter = LogProgressReporter::new(config.progress_interval);
    let orchestrator =
        Orchestrator::new(config, extractor, probe, reporter).with_cancel_flag(cancel);

    let summary = if options.dry_run {
        orchestrator.dry_run(&catalog)
    } else {
        orchestrator
            .run(&catalog)
            .context("出力ディレクトリを準備できません")?
    };

    if options.dry_run {
        for entry in &summary.entries {
            println!("{}\t{}", entry.label, entry.archive.display());
        }
    }

    if let Some(report) = &options.report {
        summary
            .save(report)
            .with_context(|| format!("レポートを書き込めません: {}", report.display()))?;
        tracing::info!(path = %report.display(), "レポートを保存しました");
    }

    if summary.interrupted {
        return Err(TriageError::Interrupted.into());
    }
    Ok(summary)
}
