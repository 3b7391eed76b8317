// パイプライン全体で使うエラー型定義

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 仕分けパイプラインのエラー型
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("解凍ツールが見つかりません: {executable}")]
    ToolNotFound { executable: String },

    #[error("アーカイブが存在しません: {}", path.display())]
    ArchiveNotFound { path: PathBuf },

    #[error("分割アーカイブではありません: {} (期待する接尾辞: {expected_suffix})", path.display())]
    InvalidArchiveFormat {
        path: PathBuf,
        expected_suffix: String,
    },

    #[error("解凍ツールを起動できません: {} - {source}", tool.display())]
    ToolLaunchFailed {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解凍に失敗しました: {} (終了コード {exit_code}) {diagnostic}", path.display())]
    ExtractionFailed {
        path: PathBuf,
        exit_code: i32,
        diagnostic: String,
    },

    #[error("画像を開けません: {} - {source}", path.display())]
    ImageDecodeFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("権限エラー: {} - {source}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイルシステムエラー: {} - {source}", path.display())]
    FilesystemError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("空いているファイル名が見つかりません: {} ({attempts} 回試行)", path.display())]
    CollisionLimitExceeded { path: PathBuf, attempts: u32 },

    #[error("号数ラベルを抽出できません: {}", path.display())]
    LabelNotFound { path: PathBuf },

    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("ユーザーにより中断されました")]
    Interrupted,
}

impl TriageError {
    /// I/Oエラーを権限エラーとそれ以外に振り分ける
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path, source }
        } else {
            Self::FilesystemError { path, source }
        }
    }

    pub fn image_decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::ImageDecodeFailed {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 1件単位の失敗としてバッチを継続できるかどうか
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Configuration { .. } | Self::Interrupted => false,
            Self::ToolNotFound { .. }
            | Self::ArchiveNotFound { .. }
            | Self::InvalidArchiveFormat { .. }
            | Self::ToolLaunchFailed { .. }
            | Self::ExtractionFailed { .. }
            | Self::ImageDecodeFailed { .. }
            | Self::PermissionDenied { .. }
            | Self::FilesystemError { .. }
            | Self::CollisionLimitExceeded { .. }
            | Self::LabelNotFound { .. } => true,
        }
    }

    /// エラーの原因となったパス（あれば）
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::ArchiveNotFound { path }
            | Self::InvalidArchiveFormat { path, .. }
            | Self::ExtractionFailed { path, .. }
            | Self::ImageDecodeFailed { path, .. }
            | Self::PermissionDenied { path, .. }
            | Self::FilesystemError { path, .. }
            | Self::CollisionLimitExceeded { path, .. }
            | Self::LabelNotFound { path } => Some(path),
            Self::ToolLaunchFailed { tool, .. } => Some(tool),
            Self::ToolNotFound { .. } | Self::Configuration { .. } | Self::Interrupted => None,
        }
    }
}

/// パイプラインの結果型
pub type TriageResult<T> = std::result::Result<T, TriageError>;
