use crate::config::ProbeMode;
use crate::core::{ImageProbe, TriageError, TriageResult};
use image::ImageReader;
use std::path::Path;

/// `image` クレートによる寸法読み取り実装
#[derive(Clone, Debug, Default)]
pub struct StandardImageProbe {
    mode: ProbeMode,
}

impl StandardImageProbe {
    /// 画像全体をデコードして寸法を得る
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ProbeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ProbeMode {
        self.mode
    }
}

impl ImageProbe for StandardImageProbe {
    fn dimensions(&self, path: &Path) -> TriageResult<(u32, u32)> {
        // 拡張子ではなく中身のシグネチャで形式を判定する
        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|source| TriageError::io(path, source))?;

        match self.mode {
            ProbeMode::Decode => {
                let image = reader
                    .decode()
                    .map_err(|source| TriageError::image_decode(path, source))?;
                Ok((image.width(), image.height()))
            }
            ProbeMode::Header => reader
                .into_dimensions()
                .map_err(|source| TriageError::image_decode(path, source)),
        }
    }
}
