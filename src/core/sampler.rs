//! Hole detection over a card grid.

use std::ops::Index;

use log::{debug, warn};

use crate::core::error::ScanError;
use crate::core::format::{CardFormat, SampleStrategy};
use crate::core::geometry::CardGeometry;
use crate::core::layout::GridLayout;

/// Minimal read access to a decoded raster.
pub trait PixelSource {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// RGB channels of an in-bounds pixel.
    fn pixel(&self, x: u32, y: u32) -> [u8; 3];

    /// Mean of the three channels, normalised to `[0, 1]`.
    fn gray(&self, x: u32, y: u32) -> f64 {
        let [r, g, b] = self.pixel(x, y);
        (f64::from(r) + f64::from(g) + f64::from(b)) / (3.0 * 255.0)
    }
}

/// Hole flags indexed `[column][row]`; `true` means punched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleMatrix {
    columns: Vec<Vec<bool>>,
    rows: usize,
}

impl HoleMatrix {
    /// A matrix with no holes.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns: vec![vec![false; rows]; columns],
            rows,
        }
    }

    /// Build from explicit columns, which must all have the same length.
    pub fn from_columns(columns: Vec<Vec<bool>>) -> Result<Self, ScanError> {
        let rows = columns.first().map_or(0, Vec::len);
        if let Some(idx) = columns.iter().position(|col| col.len() != rows) {
            return Err(ScanError::InvalidFormat(format!(
                "column {} has {} rows, expected {}",
                idx,
                columns[idx].len(),
                rows
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> bool {
        self.columns
            .get(column)
            .and_then(|col| col.get(row))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, column: usize, row: usize, hole: bool) {
        if let Some(cell) = self.columns.get_mut(column).and_then(|col| col.get_mut(row)) {
            *cell = hole;
        }
    }

    /// Per-row hole flags of one column, top to bottom.
    pub fn column(&self, column: usize) -> &[bool] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn columns(&self) -> impl Iterator<Item = &[bool]> {
        self.columns.iter().map(Vec::as_slice)
    }

    pub fn hole_count(&self) -> usize {
        self.columns.iter().flatten().filter(|hole| **hole).count()
    }
}

impl Index<(usize, usize)> for HoleMatrix {
    type Output = bool;

    fn index(&self, (column, row): (usize, usize)) -> &bool {
        &self.columns[column][row]
    }
}

/// Classify every grid cell of `format` laid over `geometry` on `image`.
///
/// Cells whose coordinate falls outside the image are reported as no-hole.
/// A degenerate geometry has no cells to read and yields an all-false matrix.
pub fn sample_holes<P: PixelSource + ?Sized>(
    image: &P,
    geometry: &CardGeometry,
    format: &CardFormat,
) -> Result<HoleMatrix, ScanError> {
    let layout = GridLayout::new(geometry, format)?;
    let mut matrix = HoleMatrix::new(format.columns, format.rows);
    if geometry.is_degenerate() {
        warn!(
            "card geometry {}x{} has no area; reporting no holes",
            geometry.width(),
            geometry.height()
        );
        return Ok(matrix);
    }

    let (width, height) = image.size();
    let strategy = format.strategy();
    debug!(
        "sampling {}x{} grid on {}x{} image ({:?}, threshold {})",
        format.columns, format.rows, width, height, strategy, format.threshold
    );

    let mut outside = 0usize;
    for (col, x) in layout.columns.iter().enumerate() {
        for (row, y) in layout.rows.iter().enumerate() {
            match read_gray(image, x, y, strategy) {
                Some(gray) => matrix.set(col, row, gray < format.threshold),
                None => outside += 1,
            }
        }
    }
    if outside > 0 {
        warn!(
            "{} of {} grid cells fall outside the {}x{} image",
            outside,
            format.columns * format.rows,
            width,
            height
        );
    }
    Ok(matrix)
}

/// Gray level at a grid coordinate, or `None` when it lies off the image.
fn read_gray<P: PixelSource + ?Sized>(
    image: &P,
    x: f64,
    y: f64,
    strategy: SampleStrategy,
) -> Option<f64> {
    let (width, height) = image.size();
    let inside = x >= 0.0 && y >= 0.0 && x < f64::from(width) && y < f64::from(height);
    if !inside {
        return None;
    }
    let (px, py) = (x as u32, y as u32);
    match strategy {
        SampleStrategy::Point => Some(image.gray(px, py)),
        SampleStrategy::Box(side) => {
            let x_end = px.saturating_add(side).min(width);
            let y_end = py.saturating_add(side).min(height);
            let mut sum = 0.0;
            let mut count = 0u32;
            for sy in py..y_end {
                for sx in px..x_end {
                    sum += image.gray(sx, sy);
                    count += 1;
                }
            }
            Some(sum / f64::from(count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::presets::PresetRegistry;

    /// Flat test raster: one gray byte per pixel.
    struct Raster {
        width: u32,
        height: u32,
        data: Vec<u8>,
    }

    impl Raster {
        fn filled(width: u32, height: u32, value: u8) -> Self {
            Self {
                width,
                height,
                data: vec![value; (width * height) as usize],
            }
        }

        fn put(&mut self, x: u32, y: u32, value: u8) {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    impl PixelSource for Raster {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
            let v = self.data[(y * self.width + x) as usize];
            [v, v, v]
        }
    }

    // 4x3 grid, one cell every 10 pixels starting at (5, 5).
    fn grid_format() -> CardFormat {
        CardFormat {
            columns: 4,
            rows: 3,
            reference_width: 40.0,
            reference_height: 30.0,
            top_margin: 5.0,
            left_margin: 5.0,
            columns_spacing: 10.0,
            rows_spacing: 10.0,
            threshold: 0.5,
            sample_radius: None,
            reverse: None,
        }
    }

    fn grid_geometry() -> CardGeometry {
        CardGeometry::new(0, 0, 40, 30)
    }

    #[test]
    fn dark_points_become_holes() {
        let mut image = Raster::filled(40, 30, 255);
        image.put(5, 5, 0);
        image.put(25, 15, 0);
        let matrix = sample_holes(&image, &grid_geometry(), &grid_format()).unwrap();

        assert_eq!(matrix.column_count(), 4);
        assert_eq!(matrix.row_count(), 3);
        assert!(matrix[(0, 0)]);
        assert!(matrix[(2, 1)]);
        assert_eq!(matrix.hole_count(), 2);
    }

    #[test]
    fn gray_equal_to_threshold_is_not_a_hole() {
        let mut format = grid_format();
        format.threshold = 0.4;
        // 102 / 255 == 0.4 exactly in f64 arithmetic.
        let image = Raster::filled(40, 30, 102);
        assert_eq!(image.gray(0, 0), 0.4);
        let matrix = sample_holes(&image, &grid_geometry(), &format).unwrap();
        assert_eq!(matrix.hole_count(), 0);

        let black = Raster::filled(40, 30, 0);
        format.threshold = 0.01;
        let matrix = sample_holes(&black, &grid_geometry(), &format).unwrap();
        assert_eq!(matrix.hole_count(), 12);
    }

    #[test]
    fn cells_outside_the_image_are_not_holes() {
        let image = Raster::filled(20, 12, 0);
        let matrix = sample_holes(&image, &grid_geometry(), &grid_format()).unwrap();
        // Columns at x = 5, 15 and rows at y = 5 are inside; the rest fall off.
        for col in 0..4 {
            for row in 0..3 {
                let inside = col < 2 && row < 1;
                assert_eq!(matrix[(col, row)], inside, "cell ({col}, {row})");
            }
        }
    }

    #[test]
    fn negative_coordinates_are_not_holes() {
        let image = Raster::filled(40, 30, 0);
        let geometry = CardGeometry::new(-20, -20, 20, 10);
        let matrix = sample_holes(&image, &geometry, &grid_format()).unwrap();
        // x = -15, -5, 5, 15; y = -15, -5, 5
        assert!(!matrix[(0, 2)]);
        assert!(!matrix[(1, 2)]);
        assert!(!matrix[(2, 0)]);
        assert!(matrix[(2, 2)]);
        assert!(matrix[(3, 2)]);
        assert_eq!(matrix.hole_count(), 2);
    }

    #[test]
    fn box_sampling_averages_the_window() {
        let mut image = Raster::filled(40, 30, 255);
        // Darken half of the 2x2 window anchored at (5, 5): mean 0.5.
        image.put(5, 5, 0);
        image.put(6, 5, 0);
        // Darken the whole window anchored at (15, 5).
        for (x, y) in [(15, 5), (16, 5), (15, 6), (16, 6)] {
            image.put(x, y, 0);
        }
        let mut format = grid_format();
        format.sample_radius = Some(2);
        let matrix = sample_holes(&image, &grid_geometry(), &format).unwrap();
        assert!(!matrix[(0, 0)]);
        assert!(matrix[(1, 0)]);

        format.threshold = 0.6;
        let matrix = sample_holes(&image, &grid_geometry(), &format).unwrap();
        assert!(matrix[(0, 0)]);
    }

    #[test]
    fn box_window_is_clipped_at_the_edge() {
        let mut image = Raster::filled(6, 6, 255);
        image.put(5, 5, 0);
        let format = CardFormat {
            columns: 1,
            rows: 1,
            reference_width: 6.0,
            reference_height: 6.0,
            top_margin: 5.0,
            left_margin: 5.0,
            columns_spacing: 0.0,
            rows_spacing: 0.0,
            threshold: 0.5,
            sample_radius: Some(4),
            reverse: None,
        };
        let matrix = sample_holes(&image, &CardGeometry::new(0, 0, 6, 6), &format).unwrap();
        assert!(matrix[(0, 0)]);
    }

    #[test]
    fn degenerate_geometry_reports_no_holes() {
        let image = Raster::filled(10, 10, 0);
        let format = PresetRegistry::default_format();
        let matrix = sample_holes(&image, &CardGeometry::default(), &format).unwrap();
        assert_eq!(matrix, HoleMatrix::new(80, 12));
    }

    #[test]
    fn extreme_geometry_edges_sample_without_overflow() {
        let image = Raster::filled(10, 10, 0);
        let format = PresetRegistry::default_format();
        let geometry = CardGeometry::new(0, -10, i32::MAX, 100);
        let matrix = sample_holes(&image, &geometry, &format).unwrap();
        // Every column lands far beyond the right edge of the image.
        assert_eq!(matrix.hole_count(), 0);
        assert_eq!(matrix.column_count(), 80);
    }

    #[test]
    fn oversized_grid_is_rejected_before_allocation() {
        let image = Raster::filled(10, 10, 0);
        let mut format = PresetRegistry::default_format();
        format.columns = 1_000_000_000_000_000;
        let err = sample_holes(&image, &CardGeometry::new(0, 0, 10, 10), &format).unwrap_err();
        assert!(matches!(err, ScanError::InvalidFormat(_)));
    }

    #[test]
    fn invalid_format_is_rejected_before_sampling() {
        let image = Raster::filled(10, 10, 0);
        let mut format = grid_format();
        format.reference_width = 0.0;
        assert!(sample_holes(&image, &grid_geometry(), &format).is_err());
    }

    #[test]
    fn ragged_columns_are_rejected() {
        assert!(HoleMatrix::from_columns(vec![vec![true], vec![true, false]]).is_err());
        let matrix = HoleMatrix::from_columns(vec![vec![true, false], vec![false, false]]).unwrap();
        assert_eq!(matrix.column(0), &[true, false]);
        assert!(!matrix.get(9, 9));
    }
}
