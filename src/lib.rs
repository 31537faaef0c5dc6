//! Read photographed punch cards: map the card grid onto the image, detect
//! holes and decode them into text.

pub mod core;
pub mod image;

pub use crate::core::{
    Axis, Card, CardFormat, CardGeometry, CardRecord, CardScan, Deck, DeckRecord, FormatPreset,
    GridLayout, HoleMatrix, IBM_029_STENCIL, KEYPUNCH_ROWS, MAX_GRID_CELLS, PixelSource,
    PresetRegistry, SENTINEL, SampleStrategy, ScanError, TranslationTable, columns_x,
    diagram_from_matrix, row_bits, rows_y, sample_holes, scan_image, word_from_matrix,
};
pub use crate::image::{SynthOptions, load_rgb, render_synthetic_card};
