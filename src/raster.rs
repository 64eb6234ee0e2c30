//! Rasterize off-screen ratatui buffers into RGBA images with an 8x8 bitmap font.

use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS};
use image::{ImageFormat, Rgba, RgbaImage};
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};

use crate::error::Result;

pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 12;
const GLYPH_TOP: u32 = 2;

/// Card background (slate) and default foreground.
const DEFAULT_BG: [u8; 3] = [30, 41, 59];
const DEFAULT_FG: [u8; 3] = [226, 232, 240];

pub fn color_rgb(color: Color, fallback: [u8; 3]) -> [u8; 3] {
    match color {
        Color::Reset => fallback,
        Color::Black => [0, 0, 0],
        Color::Red => [239, 68, 68],
        Color::Green => [34, 197, 94],
        Color::Yellow => [234, 179, 8],
        Color::Blue => [59, 130, 246],
        Color::Magenta => [168, 85, 247],
        Color::Cyan => [6, 182, 212],
        Color::Gray => [156, 163, 175],
        Color::DarkGray => [100, 116, 139],
        Color::LightRed => [252, 165, 165],
        Color::LightGreen => [134, 239, 172],
        Color::LightYellow => [253, 224, 71],
        Color::LightBlue => [147, 197, 253],
        Color::LightMagenta => [216, 180, 254],
        Color::LightCyan => [103, 232, 249],
        Color::White => [248, 250, 252],
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Indexed(i) => [i, i, i],
    }
}

fn glyph(symbol: &str) -> Option<[u8; 8]> {
    let ch = symbol.chars().next()?;
    if ch == ' ' {
        return None;
    }
    BASIC_FONTS
        .get(ch)
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
}

fn fill_cell(img: &mut RgbaImage, x0: u32, y0: u32, rgb: [u8; 3]) {
    for y in y0..y0 + CELL_HEIGHT {
        for x in x0..x0 + CELL_WIDTH {
            img.put_pixel(x, y, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        }
    }
}

fn draw_glyph(img: &mut RgbaImage, x0: u32, y0: u32, rows: [u8; 8], rgb: [u8; 3], bold: bool) {
    let pixel = Rgba([rgb[0], rgb[1], rgb[2], 255]);
    for (dy, row) in rows.iter().enumerate() {
        for dx in 0..8u32 {
            // Bit 0 is the leftmost pixel.
            if row & (1 << dx) == 0 {
                continue;
            }
            let y = y0 + GLYPH_TOP + dy as u32;
            img.put_pixel(x0 + dx, y, pixel);
            if bold && dx + 1 < CELL_WIDTH {
                img.put_pixel(x0 + dx + 1, y, pixel);
            }
        }
    }
}

/// Paint every buffer cell: background, then its glyph in the foreground color.
pub fn rasterize(buf: &Buffer) -> RgbaImage {
    let area = buf.area;
    let mut img = RgbaImage::new(area.width as u32 * CELL_WIDTH, area.height as u32 * CELL_HEIGHT);

    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let cell = buf.get(x, y);
            let (mut fg, mut bg) = (
                color_rgb(cell.fg, DEFAULT_FG),
                color_rgb(cell.bg, DEFAULT_BG),
            );
            if cell.modifier.contains(Modifier::REVERSED) {
                std::mem::swap(&mut fg, &mut bg);
            }
            let px = (x - area.x) as u32 * CELL_WIDTH;
            let py = (y - area.y) as u32 * CELL_HEIGHT;
            fill_cell(&mut img, px, py, bg);
            if let Some(rows) = glyph(cell.symbol()) {
                draw_glyph(&mut img, px, py, rows, fg, cell.modifier.contains(Modifier::BOLD));
            }
        }
    }
    img
}

/// Stack page images vertically with a one-cell background gap between them.
pub fn stack(pages: &[RgbaImage]) -> RgbaImage {
    let width = pages.iter().map(|p| p.width()).max().unwrap_or(0);
    let gap = CELL_HEIGHT;
    let height = pages.iter().map(|p| p.height()).sum::<u32>()
        + gap * pages.len().saturating_sub(1) as u32;

    let bg = Rgba([DEFAULT_BG[0], DEFAULT_BG[1], DEFAULT_BG[2], 255]);
    let mut out = RgbaImage::from_pixel(width, height, bg);
    let mut top = 0u32;
    for page in pages {
        for (x, y, pixel) in page.enumerate_pixels() {
            out.put_pixel(x, top + y, *pixel);
        }
        top += page.height() + gap;
    }
    out
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    #[test]
    fn image_size_follows_cell_grid() {
        let buf = Buffer::empty(Rect::new(0, 0, 10, 3));
        let img = rasterize(&buf);
        assert_eq!(img.dimensions(), (10 * CELL_WIDTH, 3 * CELL_HEIGHT));
        assert_eq!(img.get_pixel(0, 0).0, [DEFAULT_BG[0], DEFAULT_BG[1], DEFAULT_BG[2], 255]);
    }

    #[test]
    fn glyph_pixels_use_foreground() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 1));
        buf.set_string(0, 0, "#", Style::default().fg(Color::Red).bg(Color::Black));
        let img = rasterize(&buf);
        let red = Rgba([239, 68, 68, 255]);
        assert!(img.pixels().any(|p| *p == red));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn stack_adds_gap_between_pages() {
        let a = RgbaImage::new(16, 24);
        let b = RgbaImage::new(8, 12);
        let out = stack(&[a, b]);
        assert_eq!(out.dimensions(), (16, 24 + CELL_HEIGHT + 12));
    }

    #[test]
    fn png_has_signature() {
        let img = rasterize(&Buffer::empty(Rect::new(0, 0, 2, 2)));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 2 * CELL_WIDTH);
    }
}
