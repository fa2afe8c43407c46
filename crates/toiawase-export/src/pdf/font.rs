use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ttf_parser::Face;

use crate::error::{ExportError, Result};
use crate::pdf::layout::{TextMeasure, PT_TO_MM};

/// A font is only accepted when it covers kana and kanji.
pub const REQUIRED_GLYPHS: [char; 2] = ['あ', '日'];

/// Font file bytes embedded into every generated PDF.
#[derive(Clone)]
pub struct PdfFont {
    bytes: Arc<[u8]>,
}

impl PdfFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = Self {
            bytes: bytes.into(),
        };
        {
            let metrics = font.metrics()?;
            let missing: Vec<char> = REQUIRED_GLYPHS
                .iter()
                .copied()
                .filter(|c| !metrics.has_glyph(*c))
                .collect();
            if !missing.is_empty() {
                return Err(ExportError::MissingGlyphs(missing));
            }
        }
        Ok(font)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        Self::from_bytes(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn metrics(&self) -> Result<FontMetrics<'_>> {
        let face = Face::parse(&self.bytes, 0)
            .map_err(|e| ExportError::InvalidFont(e.to_string()))?;
        Ok(FontMetrics::new(face))
    }
}

impl fmt::Debug for PdfFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfFont")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Advance widths read from the font's horizontal metrics.
pub struct FontMetrics<'a> {
    face: Face<'a>,
    units_per_em: f32,
}

impl<'a> FontMetrics<'a> {
    fn new(face: Face<'a>) -> Self {
        let units_per_em = f32::from(face.units_per_em().max(1));
        Self { face, units_per_em }
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.face.glyph_index(ch).is_some()
    }
}

impl TextMeasure for FontMetrics<'_> {
    fn advance_mm(&self, ch: char, size_pt: f32) -> f32 {
        let units = self
            .face
            .glyph_index(ch)
            .and_then(|glyph| self.face.glyph_hor_advance(glyph))
            .map(f32::from)
            .unwrap_or(self.units_per_em / 2.0);
        units / self.units_per_em * size_pt * PT_TO_MM
    }
}
