use crate::core::decoder::{diagram_from_matrix, row_bits, word_from_matrix};
use crate::core::error::ScanError;
use crate::core::format::CardFormat;
use crate::core::geometry::CardGeometry;
use crate::core::sampler::{HoleMatrix, PixelSource, sample_holes};
use crate::core::stencil::TranslationTable;

/// Everything one sampling pass produces for a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardScan {
    pub matrix: HoleMatrix,
    pub word: String,
    pub diagram: String,
    /// Per-row bit strings, already in export order.
    pub bits: Vec<String>,
}

/// Map, sample and decode a card in one pass.
pub fn scan_image<P: PixelSource + ?Sized>(
    image: &P,
    geometry: &CardGeometry,
    format: &CardFormat,
    table: &TranslationTable,
) -> Result<CardScan, ScanError> {
    let matrix = sample_holes(image, geometry, format)?;
    let word = word_from_matrix(&matrix, table);
    let diagram = diagram_from_matrix(&matrix, format, &word);
    let bits = row_bits(&matrix, format);
    Ok(CardScan {
        matrix,
        word,
        diagram,
        bits,
    })
}
