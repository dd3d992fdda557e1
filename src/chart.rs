// src/chart.rs
//! Stacked bar charts rendered straight to PNG.
//!
//! Text is drawn with a built-in 5x7 bitmap font (upper-case ASCII, digits
//! and common punctuation; lower case is folded up, anything else shows as
//! `?`). Layout is fixed: title, legend row, plot area with y-axis ticks,
//! category labels under the bars.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::Result;
use crate::file::ensure_directory;

pub type Color = [u8; 3];

const WHITE: Color = [255, 255, 255];
const INK: Color = [40, 40, 40];
const GRID: Color = [225, 225, 225];

const SCALE: u32 = 2;
const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;
const ADVANCE: u32 = (GLYPH_W + 1) * SCALE;

const HEIGHT: u32 = 480;
const MIN_WIDTH: u32 = 640;
const SLOT_W: u32 = 110;
const PLOT_LEFT: u32 = 70;
const PLOT_RIGHT_PAD: u32 = 20;
const PLOT_TOP: u32 = 80;
const PLOT_BOTTOM_PAD: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Series {
    pub label: String,
    pub color: Color,
    /// One value per category; missing trailing values count as zero.
    pub values: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarChart {
    pub title: String,
    pub categories: Vec<String>,
    /// Stacked bottom-up in this order.
    pub series: Vec<Series>,
}

impl BarChart {
    pub fn new(title: &str, categories: Vec<String>) -> Self {
        Self { title: s!(title), categories, series: Vec::new() }
    }

    pub fn with_series(mut self, label: &str, color: Color, values: Vec<u32>) -> Self {
        self.series.push(Series { label: s!(label), color, values });
        self
    }

    /// Height of the stack over category `i`.
    pub fn stack_total(&self, i: usize) -> u32 {
        self.series.iter().map(|s| s.values.get(i).copied().unwrap_or(0)).sum()
    }

    /// Top of the y axis: the tallest stack rounded up to a whole tick.
    pub fn y_top(&self) -> u32 {
        let max = (0..self.categories.len()).map(|i| self.stack_total(i)).max().unwrap_or(0);
        let step = tick_step(max);
        max.div_ceil(step).max(1) * step
    }

    pub fn width(&self) -> u32 {
        MIN_WIDTH.max(PLOT_LEFT + PLOT_RIGHT_PAD + SLOT_W * self.categories.len() as u32)
    }

    pub fn render(&self) -> RgbImage {
        let w = self.width();
        let mut img = RgbImage::from_pixel(w, HEIGHT, Rgb(WHITE));

        let left = PLOT_LEFT;
        let right = w - PLOT_RIGHT_PAD;
        let top = PLOT_TOP;
        let bottom = HEIGHT - PLOT_BOTTOM_PAD;
        let plot_h = bottom - top;

        // title
        let tw = text_width(&self.title);
        draw_text(&mut img, w.saturating_sub(tw) / 2, 14, &self.title, INK);

        // legend
        let mut x = left;
        for s in &self.series {
            fill_rect(&mut img, x, 44, 14, 14, s.color);
            draw_text(&mut img, x + 20, 44, &s.label, INK);
            x += 20 + text_width(&s.label) + 24;
        }

        // y axis with ticks and grid lines
        let y_top = self.y_top();
        let step = tick_step(y_top);
        let y_of = |v: u32| bottom - (u64::from(v) * u64::from(plot_h) / u64::from(y_top)) as u32;
        let mut v = 0u32;
        while v <= y_top {
            let y = y_of(v);
            if v > 0 {
                fill_rect(&mut img, left + 1, y, right - left - 1, 1, GRID);
            }
            fill_rect(&mut img, left - 5, y, 5, 1, INK);
            let label = v.to_string();
            let lw = text_width(&label);
            draw_text(&mut img, (left - 8).saturating_sub(lw), y.saturating_sub(GLYPH_H * SCALE / 2), &label, INK);
            v += step;
        }
        fill_rect(&mut img, left, top, 1, plot_h + 1, INK);
        fill_rect(&mut img, left, bottom, right - left, 1, INK);

        // bars
        let n = self.categories.len().max(1) as u32;
        let slot = (right - left) / n;
        let bar_w = (slot * 6 / 10).max(1);
        for (i, cat) in self.categories.iter().enumerate() {
            let x0 = left + i as u32 * slot + (slot - bar_w) / 2;
            let mut acc = 0u32;
            for s in &self.series {
                let value = s.values.get(i).copied().unwrap_or(0);
                if value == 0 {
                    continue;
                }
                let y_hi = y_of(acc + value);
                let y_lo = y_of(acc);
                fill_rect(&mut img, x0, y_hi, bar_w, y_lo - y_hi, s.color);
                acc += value;
            }

            let max_chars = (slot / ADVANCE).max(1) as usize;
            let label: String = cat.chars().take(max_chars).collect();
            let lw = text_width(&label);
            let cx = left + i as u32 * slot + slot / 2;
            draw_text(&mut img, cx.saturating_sub(lw / 2), bottom + 12, &label, INK);
        }

        img
    }

    /// Render and write a PNG to `path`, creating parent directories.
    pub fn render_png(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        self.render().save_with_format(path, ImageFormat::Png)?;
        tracing::debug!("chart written: {}", path.display());
        Ok(())
    }
}

/// 1, 2 or 5 times a power of ten, giving about five ticks up to `max`.
pub fn tick_step(max: u32) -> u32 {
    let raw = (f64::from(max) / 5.0).max(1.0);
    let mag = 10f64.powf(raw.log10().floor());
    let nice = match raw / mag {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    };
    ((nice * mag) as u32).max(1)
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Color) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, Rgb(color));
        }
    }
}

fn text_width(text: &str) -> u32 {
    (text.chars().count() as u32 * ADVANCE).saturating_sub(SCALE)
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, color: Color) {
    for (i, ch) in text.chars().enumerate() {
        let gx = x + i as u32 * ADVANCE;
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                    fill_rect(img, gx + col * SCALE, y + row as u32 * SCALE, SCALE, SCALE, color);
                }
            }
        }
    }
}

fn fold(ch: char) -> char {
    match ch {
        'Å' | 'å' | 'Ä' | 'ä' | 'Á' | 'á' | 'À' | 'à' => 'A',
        'Ø' | 'ø' | 'Ö' | 'ö' | 'Ó' | 'ó' => 'O',
        'É' | 'é' | 'È' | 'è' => 'E',
        'Æ' | 'æ' => 'E',
        'Ü' | 'ü' | 'Ú' | 'ú' => 'U',
        c => c.to_ascii_uppercase(),
    }
}

/// Rows top to bottom, five bits each, leftmost pixel in bit 4.
fn glyph(ch: char) -> [u8; 7] {
    match fold(ch) {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ' ' => [0; 7],
        '.' => [0, 0, 0, 0, 0, 0b01100, 0b01100],
        ',' => [0, 0, 0, 0, 0b01100, 0b00100, 0b01000],
        ':' => [0, 0b01100, 0b01100, 0, 0b01100, 0b01100, 0],
        '-' => [0, 0, 0, 0b11111, 0, 0, 0],
        '+' => [0, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0],
        '_' => [0, 0, 0, 0, 0, 0, 0b11111],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '\'' => [0b00100, 0b00100, 0b01000, 0, 0, 0, 0],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0, 0b00100],
        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0, 0b00100], // ?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD: Color = [212, 175, 55];
    const BLUE: Color = [70, 120, 200];

    fn chart() -> BarChart {
        BarChart::new("Gold medals", vec![s!("Norway"), s!("Sweden"), s!("Denmark")])
            .with_series("Summer", GOLD, vec![61, 145, 48])
            .with_series("Winter", BLUE, vec![148, 65])
    }

    #[test]
    fn ticks_are_round() {
        assert_eq!(tick_step(0), 1);
        assert_eq!(tick_step(7), 2);
        assert_eq!(tick_step(210), 50);
        assert_eq!(tick_step(1_000), 200);
    }

    #[test]
    fn stacks_and_axis_top() {
        let c = chart();
        assert_eq!(c.stack_total(0), 209);
        assert_eq!(c.stack_total(2), 48);
        assert_eq!(c.y_top(), 250);
        assert_eq!(BarChart::new("empty", vec![]).y_top(), 1);
    }

    #[test]
    fn bars_are_stacked_bottom_up() {
        let c = chart();
        let img = c.render();
        let slot = (c.width() - PLOT_RIGHT_PAD - PLOT_LEFT) / 3;
        let cx = PLOT_LEFT + slot / 2;
        let bottom = HEIGHT - PLOT_BOTTOM_PAD;
        assert_eq!(img.get_pixel(cx, bottom - 3).0, GOLD);
        // 209 of 250: the winter segment sits on top of the summer one
        let plot_h = bottom - PLOT_TOP;
        let winter_mid = bottom - (61 + 74) * plot_h / 250;
        assert_eq!(img.get_pixel(cx, winter_mid).0, BLUE);
        let above = bottom - 230 * plot_h / 250;
        assert_ne!(img.get_pixel(cx, above).0, BLUE);
    }

    #[test]
    fn png_lands_on_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("charts").join("total_medal_ranking.png");
        chart().render_png(&path).unwrap();
        let back = image::open(&path).unwrap();
        assert_eq!(back.width(), MIN_WIDTH);
        assert_eq!(back.height(), HEIGHT);
    }
}
