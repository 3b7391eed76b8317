use crate::core::{
    Category, Destination, ImageCandidate, PlacementCounters, TriageError, TriageResult,
};
use std::path::{Path, PathBuf};

/// 仕分け先のファイルパスを決める
///
/// 連番はカテゴリごとのカウンタから採番し、同名ファイルが既にあれば
/// `_01`, `_02`, ... を付けて空いている名前を探す。
#[derive(Debug, Clone)]
pub struct PlacementResolver {
    pc_dir: PathBuf,
    mobile_dir: PathBuf,
    max_collision_attempts: u32,
}

impl PlacementResolver {
    pub fn new(pc_dir: impl Into<PathBuf>, mobile_dir: impl Into<PathBuf>) -> Self {
        Self {
            pc_dir: pc_dir.into(),
            mobile_dir: mobile_dir.into(),
            max_collision_attempts: 100_000,
        }
    }

    /// 衝突回避の試行回数の上限
    pub fn with_max_collision_attempts(mut self, attempts: u32) -> Self {
        self.max_collision_attempts = attempts;
        self
    }

    pub fn dir_for(&self, category: Category) -> &Path {
        match category {
            Category::Pc => &self.pc_dir,
            Category::Mobile => &self.mobile_dir,
        }
    }

    pub fn resolve(
        &self,
        candidate: &ImageCandidate,
        counters: &mut PlacementCounters,
        label: Option<&str>,
    ) -> TriageResult<Destination> {
        let category = candidate.category();
        let mut destination = Destination {
            category,
            base_dir: self.dir_for(category).to_path_buf(),
            label: label.map(str::to_string),
            sequence: counters.advance(category),
            collision_suffix: None,
            extension: candidate.extension.clone(),
        };

        if !destination.path().exists() {
            return Ok(destination);
        }

        for suffix in 1..=self.max_collision_attempts {
            destination.collision_suffix = Some(suffix);
            if !destination.path().exists() {
                tracing::debug!(
                    path = %destination.path().display(),
                    "同名ファイルがあるため連番を付けました"
                );
                return Ok(destination);
            }
        }

        destination.collision_suffix = None;
        Err(TriageError::CollisionLimitExceeded {
            path: destination.path(),
            attempts: self.max_collision_attempts,
        })
    }
}
