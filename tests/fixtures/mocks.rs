// テスト用のモック実装
// mockall が生成した MockArchiveExtractor に解凍の振る舞いを設定する

pub use image_triage::core::{MockArchiveExtractor, MockImageProbe, MockProgressReporter};

use image_triage::core::ExtractionResult;

/// 解凍の代わりに、アーカイブと同じディレクトリへ指定サイズの PNG を書き出す
pub fn extractor_writing(images: Vec<(&'static str, u32, u32)>) -> MockArchiveExtractor {
    let mut extractor = MockArchiveExtractor::new();
    extractor.expect_extract().returning(move |archive, _, dest| {
        let dir = dest.unwrap_or_else(|| archive.parent().unwrap().to_path_buf());
        for (name, width, height) in &images {
            super::write_png(&dir.join(name), *width, *height);
        }
        Ok(ExtractionResult::from_exit(0, ""))
    });
    extractor
}
