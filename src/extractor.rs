use crate::core::{ArchiveExtractor, ExtractionResult, TriageError, TriageResult};
use crate::tool_locator::ToolLocator;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 外部の解凍ツール（Bandizip 互換のCLI）で分割アーカイブを解凍する
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    locator: ToolLocator,
    volume_suffix: String,
}

impl CommandExtractor {
    pub fn new(locator: ToolLocator, volume_suffix: impl Into<String>) -> Self {
        Self {
            locator,
            volume_suffix: volume_suffix.into(),
        }
    }

    /// 解凍ツールに渡す引数。順序はツール側のパーサに合わせて固定
    pub fn build_args(archive: &Path, password: &str, dest: &Path) -> Vec<OsString> {
        let mut output_flag = OsString::from("-o:");
        output_flag.push(dest.as_os_str());
        vec![
            OsString::from("x"),
            OsString::from(format!("-p:{password}")),
            OsString::from("-y"),
            output_flag,
            OsString::from("-aoa"),
            archive.as_os_str().to_os_string(),
        ]
    }

    fn check_archive(&self, archive: &Path) -> TriageResult<()> {
        let name = archive.to_string_lossy();
        if !name.ends_with(&self.volume_suffix) {
            return Err(TriageError::InvalidArchiveFormat {
                path: archive.to_path_buf(),
                expected_suffix: self.volume_suffix.clone(),
            });
        }
        if !archive.exists() {
            return Err(TriageError::ArchiveNotFound {
                path: archive.to_path_buf(),
            });
        }
        Ok(())
    }
}

impl ArchiveExtractor for CommandExtractor {
    fn extract(
        &self,
        archive: &Path,
        password: &str,
        dest: Option<PathBuf>,
    ) -> TriageResult<ExtractionResult> {
        self.check_archive(archive)?;
        let tool = self.locator.locate()?;

        let dest = match dest {
            Some(dest) => dest,
            None => archive
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        std::fs::create_dir_all(&dest).map_err(|source| TriageError::io(&dest, source))?;

        tracing::info!(
            archive = %archive.display(),
            dest = %dest.display(),
            "解凍開始"
        );

        let output = Command::new(&tool)
            .args(Self::build_args(archive, password, &dest))
            .output()
            .map_err(|source| TriageError::ToolLaunchFailed {
                tool: tool.clone(),
                source,
            })?;

        // シグナルで終了した場合は終了コードがない
        let exit_code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let result = ExtractionResult::from_exit(exit_code, &stderr);

        if result.success {
            tracing::info!(archive = %archive.display(), "解凍成功");
        } else {
            tracing::warn!(
                archive = %archive.display(),
                exit_code,
                diagnostic = %result.diagnostic,
                "解凍失敗"
            );
        }
        Ok(result)
    }
}
