use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use image::RgbImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::error::ScanError;
use crate::core::format::CardFormat;
use crate::core::geometry::CardGeometry;
use crate::core::presets::PresetRegistry;
use crate::core::scan::{CardScan, scan_image};
use crate::core::stencil::TranslationTable;

/// One photographed card and the parameters used to read it.
///
/// The image is decoded on the first scan and kept for the card's lifetime.
#[derive(Clone)]
pub struct Card {
    pub path: PathBuf,
    pub geometry: CardGeometry,
    pub format: CardFormat,
    image: OnceLock<RgbImage>,
}

impl Card {
    /// New card with a zeroed geometry.
    pub fn new<P: Into<PathBuf>>(path: P, format: CardFormat) -> Self {
        Self {
            path: path.into(),
            geometry: CardGeometry::default(),
            format,
            image: OnceLock::new(),
        }
    }

    pub fn with_geometry(mut self, geometry: CardGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Whether the image has already been decoded.
    pub fn is_loaded(&self) -> bool {
        self.image.get().is_some()
    }

    /// Decoded pixels, loading them from disk on first access.
    pub fn image(&self) -> Result<&RgbImage, ScanError> {
        if let Some(image) = self.image.get() {
            return Ok(image);
        }
        let decoded = crate::image::load_rgb(&self.path)?;
        Ok(self.image.get_or_init(|| decoded))
    }

    /// Run a full sampling pass with the current parameters.
    pub fn scan(&self) -> Result<CardScan, ScanError> {
        self.scan_with(TranslationTable::keypunch029())
    }

    pub fn scan_with(&self, table: &TranslationTable) -> Result<CardScan, ScanError> {
        let image = self.image()?;
        debug!("scanning {}", self.path.display());
        scan_image(image, &self.geometry, &self.format, table)
    }

    fn to_record(&self) -> CardRecord {
        CardRecord {
            path: self.path.clone(),
            geometry: self.geometry,
            format: self.format.clone(),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("path", &self.path)
            .field("geometry", &self.geometry)
            .field("format", &self.format)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.geometry == other.geometry && self.format == other.format
    }
}

/// Persisted form of a [`Card`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardRecord {
    pub path: PathBuf,
    pub geometry: CardGeometry,
    pub format: CardFormat,
}

/// Persisted form of a [`Deck`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeckRecord {
    pub cards: Vec<CardRecord>,
}

/// Ordered collection of cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    /// One card per path, zeroed geometry, default preset format.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::from_paths_with(paths, &PresetRegistry::default_format())
    }

    pub fn from_paths_with<I, P>(paths: I, format: &CardFormat) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            cards: paths
                .into_iter()
                .map(|path| Card::new(path, format.clone()))
                .collect(),
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, index: usize) -> Result<Card, ScanError> {
        self.check_index(index)?;
        Ok(self.cards.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Card, ScanError> {
        self.check_index(index)?;
        Ok(&self.cards[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Card, ScanError> {
        self.check_index(index)?;
        Ok(&mut self.cards[index])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn to_record(&self) -> DeckRecord {
        DeckRecord {
            cards: self.cards.iter().map(Card::to_record).collect(),
        }
    }

    /// Rebuild a deck, rejecting any card whose format breaks its invariants.
    pub fn from_record(record: DeckRecord) -> Result<Self, ScanError> {
        let mut cards = Vec::with_capacity(record.cards.len());
        for card in record.cards {
            card.format.validate()?;
            cards.push(Card::new(card.path, card.format).with_geometry(card.geometry));
        }
        Ok(Self { cards })
    }

    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let raw = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record: DeckRecord = serde_json::from_str(&raw)?;
        let deck = Self::from_record(record)?;
        info!("loaded {} card(s) from {}", deck.len(), path.display());
        Ok(deck)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScanError> {
        let mut json = serde_json::to_string_pretty(&self.to_record())?;
        json.push('\n');
        fs::write(path, json).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved {} card(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// SHA-256 over the serialized record; changes whenever any parameter does.
    pub fn fingerprint(&self) -> Result<String, ScanError> {
        let bytes = serde_json::to_vec(&self.to_record())?;
        let digest = Sha256::digest(&bytes);
        Ok(format!("{digest:02x}"))
    }

    /// Scan every card in order. A card that fails does not stop the rest.
    pub fn scan_all(&self) -> Vec<Result<CardScan, ScanError>> {
        self.cards.iter().map(Card::scan).collect()
    }

    fn check_index(&self, index: usize) -> Result<(), ScanError> {
        if index >= self.cards.len() {
            return Err(ScanError::CardIndex {
                index,
                len: self.cards.len(),
            });
        }
        Ok(())
    }
}
