use crate::cli::commands::apply_output_dirs;
use crate::cli::OutputDirs;
use crate::config::TriageConfig;
use crate::core::{ClassifySummary, TriageError};
use crate::extractor::CommandExtractor;
use crate::image_loader::StandardImageProbe;
use crate::pipeline::Orchestrator;
use crate::reporting::LogProgressReporter;
use crate::tool_locator::ToolLocator;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// 解凍せずにディレクトリ内の画像だけを仕分ける
pub fn execute_classify(
    config: TriageConfig,
    directory: PathBuf,
    label: Option<String>,
    outputs: OutputDirs,
    cancel: Arc<AtomicBool>,
) -> Result<ClassifySummary> {
    if !directory.is_dir() {
        anyhow::bail!("ディレクトリが存在しません: {}", directory.display());
    }
    let config = apply_output_dirs(config, &outputs);
    config.validate()?;

    let extractor = CommandExtractor::new(
        ToolLocator::from_config(&config.tool),
        config.volume_suffix.clone(),
    );
    let probe = StandardImageProbe::with_mode(config.probe_mode);
    let reporter = LogProgressReporter::new(config.progress_interval);
    let orchestrator =
        Orchestrator::new(config, extractor, probe, reporter).with_cancel_flag(cancel);

    orchestrator
        .prepare()
        .context("出力ディレクトリを準備できません")?;
    let summary = orchestrator.classify_dir(&directory, label.as_deref());

    if orchestrator.is_cancelled() {
        return Err(TriageError::Interrupted.into());
    }
    Ok(summary)
}
