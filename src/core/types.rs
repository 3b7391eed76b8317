// パイプラインで受け渡すデータ型定義

use super::error::{TriageError, TriageResult};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// 診断メッセージとして保持する標準エラー出力の最大文字数
pub const DIAGNOSTIC_LIMIT: usize = 500;

/// カタログが見つけた分割アーカイブの先頭ボリューム
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub issue_label: String,
    pub containing_directory: PathBuf,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<PathBuf>, issue_label: impl Into<String>) -> Self {
        let path = path.into();
        let containing_directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            path,
            issue_label: issue_label.into(),
            containing_directory,
        }
    }
}

/// 外部解凍プロセスの実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub success: bool,
    pub exit_code: i32,
    pub diagnostic: String,
}

impl ExtractionResult {
    /// 終了コードと標準エラー出力から結果を組み立てる
    pub fn from_exit(exit_code: i32, stderr: &str) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
            diagnostic: stderr.chars().take(DIAGNOSTIC_LIMIT).collect(),
        }
    }

    /// 失敗時は `ExtractionFailed` に変換する
    pub fn into_result(self, archive: &Path) -> TriageResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(TriageError::ExtractionFailed {
                path: archive.to_path_buf(),
                exit_code: self.exit_code,
                diagnostic: self.diagnostic,
            })
        }
    }
}

/// 出力先の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 横長（PC壁紙）
    Pc,
    /// 縦長・正方形（スマホ壁紙）
    Mobile,
}

impl Category {
    /// 幅と高さから分類する。幅 <= 高さ は縦長扱い
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width <= height {
            Self::Mobile
        } else {
            Self::Pc
        }
    }

    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// 寸法を読み取った画像ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub source_path: PathBuf,
    /// 小文字化した拡張子（ドットなし）
    pub extension: String,
    pub width: u32,
    pub height: u32,
}

impl ImageCandidate {
    pub fn category(&self) -> Category {
        Category::from_dimensions(self.width, self.height)
    }

    pub fn is_portrait(&self) -> bool {
        self.category() == Category::Mobile
    }
}

/// 1回の仕分けパスで使う連番カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementCounters {
    pub pc_index: u32,
    pub mobile_index: u32,
}

impl PlacementCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// 該当カテゴリのカウンタを進め、進めた後の値を返す
    pub fn advance(&mut self, category: Category) -> u32 {
        let counter = match category {
            Category::Pc => &mut self.pc_index,
            Category::Mobile => &mut self.mobile_index,
        };
        *counter += 1;
        *counter
    }
}

/// 移動先のファイル名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub category: Category,
    pub base_dir: PathBuf,
    pub label: Option<String>,
    pub sequence: u32,
    pub collision_suffix: Option<u32>,
    /// 小文字化した拡張子（ドットなし）
    pub extension: String,
}

impl Destination {
    /// `<prefix>_[<label>_]<seq:04>[_<n:02>].<ext>`
    pub fn file_name(&self) -> String {
        let mut name = String::from(self.category.prefix());
        if let Some(label) = &self.label {
            name.push('_');
            name.push_str(label);
        }
        name.push_str(&format!("_{:04}", self.sequence));
        if let Some(suffix) = self.collision_suffix {
            name.push_str(&format!("_{suffix:02}"));
        }
        if !self.extension.is_empty() {
            name.push('.');
            name.push_str(&self.extension);
        }
        name
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(self.file_name())
    }
}

/// 1回の仕分けパスの集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifySummary {
    pub processed: usize,
    pub pc: usize,
    pub mobile: usize,
    pub errors: usize,
}

impl ClassifySummary {
    pub fn absorb(&mut self, other: &ClassifySummary) {
        self.processed += other.processed;
        self.pc += other.pc;
        self.mobile += other.mobile;
        self.errors += other.errors;
    }
}
