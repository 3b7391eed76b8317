// 設定管理 - JSONファイルとCLI引数から組み立てる実行設定

use crate::core::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 画像の寸法をどう読むか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// 画像全体をデコードする（破損・途中切れを検出できる）
    #[default]
    Decode,
    /// ヘッダーだけを読む（高速）
    Header,
}

/// 解凍ツールの探索設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// PATHから探す実行ファイル名
    pub executable: String,
    /// PATHで見つからなかった場合に順に確認するパス
    pub search_paths: Vec<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            executable: "Bandizip.exe".to_string(),
            search_paths: vec![
                PathBuf::from(r"C:\Program Files\Bandizip\Bandizip.exe"),
                PathBuf::from(r"C:\Program Files (x86)\Bandizip\Bandizip.exe"),
            ],
        }
    }
}

/// パイプライン全体の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub input_dir: PathBuf,
    pub mobile_dir: PathBuf,
    pub pc_dir: PathBuf,
    pub password: String,
    /// 分割アーカイブの先頭ボリュームの接尾辞
    pub volume_suffix: String,
    /// 対象とする画像拡張子（ドットなし、大文字小文字は区別しない）
    pub image_extensions: Vec<String>,
    pub clean_empty_dirs: bool,
    /// true なら入力ディレクトリを再帰的に探索する
    pub recursive_catalog: bool,
    /// 何枚ごとに進捗を報告するか
    pub progress_interval: usize,
    pub max_collision_attempts: u32,
    pub probe_mode: ProbeMode,
    pub tool: ToolConfig,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("pic"),
            mobile_dir: PathBuf::from("saveMobilePaper"),
            pc_dir: PathBuf::from("savePcPaper"),
            password: String::new(),
            volume_suffix: ".7z.001".to_string(),
            image_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            clean_empty_dirs: true,
            recursive_catalog: false,
            progress_interval: 100,
            max_collision_attempts: 100_000,
            probe_mode: ProbeMode::default(),
            tool: ToolConfig::default(),
        }
    }
}

impl TriageConfig {
    /// JSONファイルから読み込む。記載のない項目はデフォルト値
    pub fn from_file(path: &Path) -> TriageResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| TriageError::io(path, source))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> TriageResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TriageError::configuration(format!("設定ファイルの解析に失敗: {e}")))
    }

    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    pub fn with_output_dirs(mut self, mobile_dir: impl Into<PathBuf>, pc_dir: impl Into<PathBuf>) -> Self {
        self.mobile_dir = mobile_dir.into();
        self.pc_dir = pc_dir.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_volume_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.volume_suffix = suffix.into();
        self
    }

    pub fn with_tool(mut self, tool: ToolConfig) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_clean_empty_dirs(mut self, enable: bool) -> Self {
        self.clean_empty_dirs = enable;
        self
    }

    pub fn with_probe_mode(mut self, mode: ProbeMode) -> Self {
        self.probe_mode = mode;
        self
    }

    /// 拡張子を小文字・ドットなしに正規化した一覧
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.image_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect()
    }

    pub fn validate(&self) -> TriageResult<()> {
        if self.volume_suffix.is_empty() {
            return Err(TriageError::configuration("volume_suffix が空です"));
        }
        if self.normalized_extensions().iter().all(String::is_empty) {
            return Err(TriageError::configuration("image_extensions が空です"));
        }
        if self.progress_interval == 0 {
            return Err(TriageError::configuration("progress_interval は1以上である必要があります"));
        }
        if self.max_collision_attempts == 0 {
            return Err(TriageError::configuration(
                "max_collision_attempts は1以上である必要があります",
            ));
        }
        if self.tool.executable.is_empty() {
            return Err(TriageError::configuration("tool.executable が空です"));
        }
        if self.mobile_dir == self.pc_dir {
            return Err(TriageError::configuration(
                "mobile_dir と pc_dir は別のディレクトリである必要があります",
            ));
        }
        Ok(())
    }
}
