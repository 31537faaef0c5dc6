//! Maps a card's geometry and format to pixel coordinates of its grid.

use crate::core::error::ScanError;
use crate::core::format::CardFormat;
use crate::core::geometry::CardGeometry;

/// Evenly spaced coordinates along one image axis.
///
/// An `Axis` is a plain value: iterating it any number of times yields the
/// same sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    start: f64,
    step: f64,
    count: usize,
}

impl Axis {
    pub fn new(start: f64, step: f64, count: usize) -> Self {
        Self { start, step, count }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.start + self.step * index as f64)
    }

    pub fn iter(&self) -> AxisIter {
        AxisIter {
            axis: *self,
            next: 0,
        }
    }
}

impl IntoIterator for Axis {
    type Item = f64;
    type IntoIter = AxisIter;

    fn into_iter(self) -> AxisIter {
        self.iter()
    }
}

impl IntoIterator for &Axis {
    type Item = f64;
    type IntoIter = AxisIter;

    fn into_iter(self) -> AxisIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct AxisIter {
    axis: Axis,
    next: usize,
}

impl Iterator for AxisIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.axis.get(self.next)?;
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.axis.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for AxisIter {}

fn pixels_per_unit(extent: i64, reference: f64, name: &str) -> Result<f64, ScanError> {
    if !reference.is_finite() || reference <= 0.0 {
        return Err(ScanError::InvalidFormat(format!(
            "{name} must be a positive number (got {reference})"
        )));
    }
    Ok(extent as f64 / reference)
}

/// X coordinate of every column, left to right.
pub fn columns_x(geometry: &CardGeometry, format: &CardFormat) -> Result<Axis, ScanError> {
    let scale = pixels_per_unit(geometry.width(), format.reference_width, "reference_width")?;
    Ok(Axis::new(
        f64::from(geometry.left) + scale * format.left_margin,
        scale * format.columns_spacing,
        format.columns,
    ))
}

/// Y coordinate of every row, top to bottom.
pub fn rows_y(geometry: &CardGeometry, format: &CardFormat) -> Result<Axis, ScanError> {
    let scale = pixels_per_unit(geometry.height(), format.reference_height, "reference_height")?;
    Ok(Axis::new(
        f64::from(geometry.top) + scale * format.top_margin,
        scale * format.rows_spacing,
        format.rows,
    ))
}

/// Both axes of a card grid, computed from a validated format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: Axis,
    pub rows: Axis,
}

impl GridLayout {
    pub fn new(geometry: &CardGeometry, format: &CardFormat) -> Result<Self, ScanError> {
        format.validate()?;
        Ok(Self {
            columns: columns_x(geometry, format)?,
            rows: rows_y(geometry, format)?,
        })
    }

    /// Every `(x, y)` cell centre in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.columns
            .iter()
            .flat_map(move |x| self.rows.iter().map(move |y| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::presets::PresetRegistry;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn columns_follow_margin_and_pitch() {
        let format = PresetRegistry::default_format();
        let geometry = CardGeometry::new(100, 50, 50 + 1475, 100 + 650);
        let xs: Vec<f64> = columns_x(&geometry, &format).unwrap().iter().collect();

        assert_eq!(xs.len(), 80);
        assert!(close(xs[0], 50.0 + 200.0 * 0.25));
        let pitch = 200.0 * 0.087;
        for pair in xs.windows(2) {
            assert!(pair[1] > pair[0]);
            assert!(close(pair[1] - pair[0], pitch));
        }
    }

    #[test]
    fn rows_use_their_own_reference() {
        let format = PresetRegistry::default_format();
        let geometry = CardGeometry::new(0, 0, 737, 325);
        let ys: Vec<f64> = rows_y(&geometry, &format).unwrap().iter().collect();

        assert_eq!(ys.len(), 12);
        assert!(close(ys[0], 25.0));
        assert!(close(ys[11], 25.0 + 11.0 * 25.0));
    }

    #[test]
    fn axis_can_be_enumerated_twice() {
        let axis = Axis::new(1.0, 2.0, 3);
        let first: Vec<f64> = axis.iter().collect();
        let second: Vec<f64> = axis.into_iter().collect();
        assert_eq!(first, vec![1.0, 3.0, 5.0]);
        assert_eq!(first, second);
        assert_eq!(axis.iter().len(), 3);
        assert_eq!(axis.get(3), None);
    }

    #[test]
    fn zero_reference_width_is_an_error() {
        let mut format = PresetRegistry::default_format();
        format.reference_width = 0.0;
        let geometry = CardGeometry::new(0, 0, 100, 100);
        let err = columns_x(&geometry, &format).unwrap_err();
        assert!(matches!(err, ScanError::InvalidFormat(_)));
        assert!(GridLayout::new(&geometry, &format).is_err());
    }

    #[test]
    fn degenerate_geometry_collapses_to_origin() {
        let format = PresetRegistry::default_format();
        let layout = GridLayout::new(&CardGeometry::default(), &format).unwrap();
        assert_eq!(layout.cells().count(), 80 * 12);
        assert!(layout.cells().all(|(x, y)| x == 0.0 && y == 0.0));
    }
}
