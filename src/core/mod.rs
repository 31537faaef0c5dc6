//! Card geometry, sampling and decoding primitives.

pub mod decoder;
pub mod deck;
pub mod error;
pub mod format;
pub mod geometry;
pub mod layout;
pub mod presets;
pub mod sampler;
pub mod scan;
pub mod stencil;

pub use decoder::{diagram_from_matrix, row_bits, word_from_matrix};
pub use deck::{Card, CardRecord, Deck, DeckRecord};
pub use error::ScanError;
pub use format::{CardFormat, MAX_GRID_CELLS, SampleStrategy};
pub use geometry::CardGeometry;
pub use layout::{Axis, GridLayout, columns_x, rows_y};
pub use presets::{FormatPreset, PresetRegistry};
pub use sampler::{HoleMatrix, PixelSource, sample_holes};
pub use scan::{CardScan, scan_image};
pub use stencil::{IBM_029_STENCIL, KEYPUNCH_ROWS, SENTINEL, TranslationTable};
