use anyhow::{anyhow, Context, Result};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use std::io::Cursor;
use unidecode::unidecode;

use crate::completion::CompletionRecord;


pub const PNG_MIME_TYPE: &str = "image/png";
pub const RECORD_FILE_NAME: &str = "certificate.png";
pub const LOG_FILE_NAME: &str = "completion_log.png";

const GLYPH_SIZE: u32 = 8;
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: &'static str,
}

pub trait CertificateRenderer {
    fn render_record(&self, record: &CompletionRecord) -> Result<Certificate>;
    fn render_log(&self, records: &[CompletionRecord]) -> Result<Certificate>;
}

#[derive(Clone, Debug)]
pub struct PngCertificateRenderer {
    min_width: u32,
    scale: u32,
}

impl PngCertificateRenderer {
    pub fn new(min_width: u32, scale: u32) -> Self {
        PngCertificateRenderer {
            min_width,
            scale: scale.max(1),
        }
    }

    fn cell(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    fn margin(&self) -> u32 {
        self.cell() * 3
    }

    fn line_height(&self) -> u32 {
        self.cell() * 2
    }

    fn render(&self, lines: &[String], centered: bool, file_name: &str) -> Result<Certificate> {
        let lines: Vec<Vec<char>> = lines
            .iter()
            .map(|l| unidecode(l).chars().collect())
            .collect();
        let longest = lines.iter().map(|l| l.len() as u32).max().unwrap_or(0);
        let width = self.min_width.max(longest * self.cell() + 2 * self.margin());
        let height = lines.len() as u32 * self.line_height() + 2 * self.margin();

        let mut image = RgbImage::from_pixel(width, height, PAPER);
        draw_frame(&mut image, self.margin() / 3, self.scale);
        draw_frame(&mut image, self.margin() / 3 + 3 * self.scale, self.scale.max(2) / 2);

        for (index, line) in lines.iter().enumerate() {
            let line_width = line.len() as u32 * self.cell();
            let x = if centered {
                (width - line_width) / 2
            } else {
                self.margin()
            };
            let y = self.margin() + index as u32 * self.line_height();
            for (column, c) in line.iter().enumerate() {
                self.draw_glyph(&mut image, *c, x + column as u32 * self.cell(), y);
            }
        }

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .context("Could not encode certificate as PNG")?;
        log::debug!("Rendered {} ({} bytes)", file_name, bytes.len());

        Ok(Certificate {
            bytes,
            file_name: file_name.to_owned(),
            mime_type: PNG_MIME_TYPE,
        })
    }

    fn draw_glyph(&self, image: &mut RgbImage, c: char, x: u32, y: u32) {
        let glyph = BASIC_FONTS
            .get(c)
            .or_else(|| BASIC_FONTS.get('?'))
            .unwrap_or([0; 8]);
        for (row, bits) in glyph.iter().enumerate() {
            for bit in 0..GLYPH_SIZE {
                if bits & (1u8 << bit) != 0 {
                    fill_rect(
                        image,
                        x + bit * self.scale,
                        y + row as u32 * self.scale,
                        self.scale,
                        self.scale,
                    );
                }
            }
        }
    }
}

impl Default for PngCertificateRenderer {
    fn default() -> Self {
        PngCertificateRenderer::new(640, 2)
    }
}

fn fill_rect(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32) {
    for px in x..(x + width).min(image.width()) {
        for py in y..(y + height).min(image.height()) {
            image.put_pixel(px, py, INK);
        }
    }
}

fn draw_frame(image: &mut RgbImage, inset: u32, thickness: u32) {
    let (width, height) = image.dimensions();
    if width <= 2 * inset || height <= 2 * inset {
        return;
    }
    let inner_width = width - 2 * inset;
    let inner_height = height - 2 * inset;
    fill_rect(image, inset, inset, inner_width, thickness);
    fill_rect(image, inset, height - inset - thickness, inner_width, thickness);
    fill_rect(image, inset, inset, thickness, inner_height);
    fill_rect(image, width - inset - thickness, inset, thickness, inner_height);
}

fn pad(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}

impl CertificateRenderer for PngCertificateRenderer {
    fn render_record(&self, record: &CompletionRecord) -> Result<Certificate> {
        let lines = vec![
            "Completed problems".to_owned(),
            String::new(),
            format!("Date: {}", record.display_timestamp()),
            format!("Years: {}", record.display_years()),
            format!("Categories: {}", record.display_categories()),
            format!("Questions: {}", record.question_count),
        ];
        self.render(&lines, true, RECORD_FILE_NAME)
    }

    fn render_log(&self, records: &[CompletionRecord]) -> Result<Certificate> {
        if records.is_empty() {
            return Err(anyhow!("No completed problems yet"));
        }

        let headers = ["Date", "Years", "Categories", "Questions"];
        let rows: Vec<[String; 4]> = records
            .iter()
            .map(|r| {
                [
                    r.display_timestamp(),
                    unidecode(&r.display_years()),
                    unidecode(&r.display_categories()),
                    r.question_count.to_string(),
                ]
            })
            .collect();
        let widths: Vec<usize> = (0..headers.len())
            .map(|i| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(headers[i].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = vec!["Completion log".to_owned(), String::new()];
        lines.push(
            headers
                .iter()
                .zip(&widths)
                .map(|(h, w)| pad(h, *w))
                .collect::<Vec<_>>()
                .join(" | "),
        );
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &rows {
            lines.push(
                row.iter()
                    .zip(&widths)
                    .map(|(cell, w)| pad(cell, *w))
                    .collect::<Vec<_>>()
                    .join(" | "),
            );
        }
        self.render(&lines, false, LOG_FILE_NAME)
    }
}
