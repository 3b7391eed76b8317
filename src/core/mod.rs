// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

pub use error::{TriageError, TriageResult};
pub use traits::{
    ArchiveExtractor, ImageProbe, MockArchiveExtractor, MockImageProbe, MockProgressReporter,
    ProgressReporter,
};
pub use types::{
    ArchiveEntry, Category, ClassifySummary, Destination, ExtractionResult, ImageCandidate,
    PlacementCounters,
};
