//! PNG export of a room, one pixel per room unit.
//!
//! Shapes are filled and outlined with tiny-skia. Their names are then laid out as SVG text and
//! rendered over them with resvg, using the fonts installed on the system.

use std::{fs::File, io::BufWriter, path::Path, sync::Arc};

use png::{BitDepth, ColorType, Encoder};
use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::domain::{HasCollision, Outline, Position, Rgb, Room};

const OUTLINE_WIDTH: f32 = 1.0;
const LABEL_FONT_SIZE: f64 = 10.0;

/// Rasterizes the room: background first, then every shape in drawing order, filled with its
/// colour and outlined in black, and finally the shape names at the shape centres.
pub fn render(room: &Room, background: Rgb) -> Result<Pixmap, ExportError> {
    let bounds = room.bounds();
    let width = bounds.width().ceil() as u32;
    let height = bounds.height().ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;
    pixmap.fill(Color::from_rgba8(background.r, background.g, background.b, 255));

    let stroke = Stroke {
        width: OUTLINE_WIDTH,
        ..Stroke::default()
    };
    let mut outline_paint = Paint::default();
    outline_paint.set_color_rgba8(0, 0, 0, 255);
    outline_paint.anti_alias = true;

    for shape in room.shapes().shapes() {
        let path = match shape.outline() {
            Outline::Circle { center, radius } => {
                PathBuilder::from_circle(center.x() as f32, center.y() as f32, radius as f32)
            }
            outline => polygon_path(outline.vertices()),
        };
        let Some(path) = path else {
            continue;
        };

        let color = shape.color();
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        paint.anti_alias = true;

        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        pixmap.stroke_path(&path, &outline_paint, &stroke, Transform::identity(), None);
    }

    draw_labels(room, &mut pixmap)?;
    Ok(pixmap)
}

fn draw_labels(room: &Room, pixmap: &mut Pixmap) -> Result<(), ExportError> {
    if room.shapes().is_empty() {
        return Ok(());
    }

    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    let mut opt = usvg::Options::default();
    opt.fontdb = Arc::new(fontdb);

    let svg = label_svg(room, pixmap.width(), pixmap.height());
    let tree = usvg::Tree::from_str(&svg, &opt)?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Ok(())
}

/// SVG document holding one centred text element per shape.
fn label_svg(room: &Room, width: u32, height: u32) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n"
    );
    for shape in room.shapes().shapes() {
        let center = shape.center();
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" \
             font-family=\"sans-serif\" font-size=\"{LABEL_FONT_SIZE}\" fill=\"#000\">{}</text>\n",
            center.x(),
            center.y(),
            svg_escape(shape.name())
        ));
    }
    svg.push_str("</svg>\n");
    svg
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn export_png(room: &Room, background: Rgb, path: &Path) -> Result<(), ExportError> {
    let pixmap = render(room, background)?;

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = Encoder::new(file, pixmap.width(), pixmap.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    // Every pixel is opaque, so the premultiplied data equals plain RGBA.
    writer.write_image_data(pixmap.data())?;
    writer.finish()?;
    Ok(())
}

fn polygon_path(vertices: &[Position]) -> Option<tiny_skia::Path> {
    let (first, rest) = vertices.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x() as f32, first.y() as f32);
    for vertex in rest {
        builder.line_to(vertex.x() as f32, vertex.y() as f32);
    }
    builder.close();
    builder.finish()
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("cannot create a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encoding(#[from] png::EncodingError),
    #[error("cannot lay out labels: {0}")]
    Labels(#[from] usvg::Error),
}
