//! Heatmap Renderer: one colored row per requirement, encoded as PNG.
//!
//! Layout, left to right: requirement labels, the strength column (with the
//! strength written inside each cell), and a three-swatch legend. The title
//! sits on top and the column caption underneath. Purely presentational.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};

use crate::alignment::glyphs::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::alignment::scoring::{RequirementMatch, Strength};

const SCALE: u32 = 2;
const ADVANCE: u32 = (GLYPH_WIDTH + 1) * SCALE;
const TEXT_HEIGHT: u32 = GLYPH_HEIGHT * SCALE;

const MARGIN: u32 = 24;
const MAX_LABEL_CHARS: usize = 40;
const LABEL_COLUMN_WIDTH: u32 = MAX_LABEL_CHARS as u32 * ADVANCE;
const COLUMN_GAP: u32 = 16;
const ROW_HEIGHT: u32 = 32;
const CELL_WIDTH: u32 = 200;
const CELL_PADDING: u32 = 8;
const LEGEND_GAP: u32 = 32;
const SWATCH: u32 = 24;
const SWATCH_SPACING: u32 = 8;
const LEGEND_WIDTH: u32 = SWATCH + SWATCH_SPACING + 7 * ADVANCE;

const TITLE: &str = "Resume <-> Job Description Alignment Heatmap";
const COLUMN_CAPTION: &str = "Alignment Strength";
const EMPTY_MESSAGE: &str = "No requirements to plot.";

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([33, 33, 33]);

// ─── Geometry ──────────────────────────────────────────────────────────────

const GRID_TOP: u32 = MARGIN + TEXT_HEIGHT + 16;
const CELL_LEFT: u32 = MARGIN + LABEL_COLUMN_WIDTH + COLUMN_GAP;
const LEGEND_LEFT: u32 = CELL_LEFT + CELL_WIDTH + LEGEND_GAP;
const IMAGE_WIDTH: u32 = LEGEND_LEFT + LEGEND_WIDTH + MARGIN;
const LEGEND_HEIGHT: u32 = 3 * (SWATCH + SWATCH_SPACING);

const EMPTY_WIDTH: u32 = 560;
const EMPTY_HEIGHT: u32 = 120;

pub fn strength_color(strength: Strength) -> Rgb<u8> {
    match strength {
        Strength::Missing => Rgb([215, 48, 39]),
        Strength::Partial => Rgb([245, 176, 65]),
        Strength::Strong => Rgb([26, 152, 80]),
    }
}

fn row_top(index: usize) -> u32 {
    GRID_TOP + index as u32 * ROW_HEIGHT
}

fn grid_height(rows: usize) -> u32 {
    (rows as u32 * ROW_HEIGHT).max(LEGEND_HEIGHT)
}

// ─── Drawing primitives ────────────────────────────────────────────────────

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let gx = x + i as u32 * ADVANCE;
        for (row, &bits) in glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    fill_rect(img, gx + col * SCALE, y + row as u32 * SCALE, SCALE, SCALE, color);
                }
            }
        }
    }
}

/// Labels longer than the label column are cut and marked with "...".
fn fit_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let kept: String = label.chars().take(MAX_LABEL_CHARS - 3).collect();
    format!("{}...", kept.trim_end())
}

// ─── Rendering ─────────────────────────────────────────────────────────────

pub fn render_heatmap(matches: &[RequirementMatch]) -> RgbImage {
    if matches.is_empty() {
        let mut img = RgbImage::from_pixel(EMPTY_WIDTH, EMPTY_HEIGHT, WHITE);
        draw_text(&mut img, MARGIN, (EMPTY_HEIGHT - TEXT_HEIGHT) / 2, EMPTY_MESSAGE, INK);
        return img;
    }

    let caption_top = GRID_TOP + grid_height(matches.len()) + 12;
    let height = caption_top + TEXT_HEIGHT + MARGIN;
    let mut img = RgbImage::from_pixel(IMAGE_WIDTH, height, WHITE);

    draw_text(&mut img, MARGIN, MARGIN, TITLE, INK);

    let text_offset = (ROW_HEIGHT - TEXT_HEIGHT) / 2;
    for (i, m) in matches.iter().enumerate() {
        let top = row_top(i);
        draw_text(&mut img, MARGIN, top + text_offset, &fit_label(m.requirement()), INK);
        // 1px white seam between rows
        fill_rect(&mut img, CELL_LEFT, top + 1, CELL_WIDTH, ROW_HEIGHT - 2, strength_color(m.strength()));
        draw_text(
            &mut img,
            CELL_LEFT + CELL_PADDING,
            top + text_offset,
            m.strength().label(),
            INK,
        );
    }

    draw_text(&mut img, CELL_LEFT, caption_top, COLUMN_CAPTION, INK);

    // Legend reads top-down from Strong to Missing.
    for (i, strength) in Strength::ALL.iter().rev().enumerate() {
        let top = GRID_TOP + i as u32 * (SWATCH + SWATCH_SPACING);
        fill_rect(&mut img, LEGEND_LEFT, top, SWATCH, SWATCH, strength_color(*strength));
        draw_text(
            &mut img,
            LEGEND_LEFT + SWATCH + SWATCH_SPACING,
            top + (SWATCH - TEXT_HEIGHT) / 2,
            strength.label(),
            INK,
        );
    }

    img
}

/// Renders the heatmap and encodes it as PNG bytes.
pub fn render_alignment_heatmap_png(matches: &[RequirementMatch]) -> Result<Vec<u8>> {
    let img = render_heatmap(matches);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)
        .context("Failed to encode heatmap PNG")?;
    Ok(buffer.into_inner())
}
