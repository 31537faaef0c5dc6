use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;
use log::warn;

use crate::core::error::ScanError;
use crate::core::format::CardFormat;
use crate::core::geometry::CardGeometry;
use crate::core::layout::GridLayout;
use crate::core::stencil::TranslationTable;

const PAGE_BG: Rgb<u8> = Rgb([0xfd, 0xfa, 0xf3]);
const CARD_BG: Rgb<u8> = Rgb([0xf4, 0xe8, 0xcc]);
const BORDER: Rgb<u8> = Rgb([0x7d, 0x6b, 0x54]);
const HOLE: Rgb<u8> = Rgb([0x10, 0x0e, 0x0c]);

/// Canvas and card placement for a synthetic photo.
#[derive(Debug, Clone, Copy)]
pub struct SynthOptions {
    pub width: u32,
    pub height: u32,
    pub geometry: CardGeometry,
}

impl Default for SynthOptions {
    // 200 px per inch for the IBM 5081 preset, with a 50 px margin.
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            geometry: CardGeometry::new(50, 50, 50 + 1475, 50 + 650),
        }
    }
}

/// Paint a card whose punches spell `text` at the cells `format` maps onto
/// `options.geometry`. Characters the table cannot punch are left blank.
pub fn render_synthetic_card(
    text: &str,
    format: &CardFormat,
    options: &SynthOptions,
    table: &TranslationTable,
) -> Result<RgbImage, ScanError> {
    let geometry = options.geometry;
    if geometry.is_degenerate() {
        return Err(ScanError::InvalidFormat(format!(
            "card geometry {}x{} has no area",
            geometry.width(),
            geometry.height()
        )));
    }
    let layout = GridLayout::new(&geometry, format)?;

    let mut canvas = RgbImage::from_pixel(options.width.max(1), options.height.max(1), PAGE_BG);
    let card = Span {
        left: i64::from(geometry.left),
        top: i64::from(geometry.top),
        right: i64::from(geometry.right),
        bottom: i64::from(geometry.bottom),
    };
    match card.clip(&canvas) {
        Some(visible) => {
            draw_filled_rect_mut(&mut canvas, visible, CARD_BG);
            // The frame is only drawn when the whole card is on the canvas.
            if card.fits(&canvas) {
                draw_hollow_rect_mut(&mut canvas, visible, BORDER);
            }
        }
        None => warn!(
            "card geometry lies entirely outside the {}x{} canvas",
            canvas.width(),
            canvas.height()
        ),
    }

    let half_w = (layout.columns.step() * 0.25).floor().max(1.0);
    let half_h = (layout.rows.step() * 0.25).floor().max(1.0);

    let length = text.chars().count();
    if length > format.columns {
        warn!(
            "text is {} characters, card has {} columns; truncating",
            length, format.columns
        );
    }

    for (ch, x) in text.chars().zip(layout.columns.iter()) {
        let Some(pattern) = table.encode(ch) else {
            if ch != ' ' {
                warn!("'{ch}' has no punch pattern; leaving its column blank");
            }
            continue;
        };
        for (&hole, y) in pattern.iter().zip(layout.rows.iter()) {
            if !hole {
                continue;
            }
            let (cx, cy) = (x.floor(), y.floor());
            let punch = Span {
                left: (cx - half_w) as i64,
                top: (cy - half_h) as i64,
                right: (cx + half_w + 1.0) as i64,
                bottom: (cy + half_h + 1.0) as i64,
            };
            if let Some(rect) = punch.clip(&canvas) {
                draw_filled_rect_mut(&mut canvas, rect, HOLE);
            }
        }
    }

    Ok(canvas)
}

/// Half-open pixel rectangle in canvas space, wide enough for any edges.
#[derive(Debug, Clone, Copy)]
struct Span {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl Span {
    fn fits(&self, canvas: &RgbImage) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right <= i64::from(canvas.width())
            && self.bottom <= i64::from(canvas.height())
    }

    /// Visible part on `canvas`, or `None` when nothing of it is on screen.
    fn clip(&self, canvas: &RgbImage) -> Option<Rect> {
        let left = self.left.max(0);
        let top = self.top.max(0);
        let right = self.right.min(i64::from(canvas.width()));
        let bottom = self.bottom.min(i64::from(canvas.height()));
        if right <= left || bottom <= top {
            return None;
        }
        let width = u32::try_from(right - left).ok()?;
        let height = u32::try_from(bottom - top).ok()?;
        Some(Rect::at(i32::try_from(left).ok()?, i32::try_from(top).ok()?).of_size(width, height))
    }
}
