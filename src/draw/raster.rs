//! Rasterisation of [`Shape`]s.
//!
//! Thin lines, solid blocks and text go through `imageproc::drawing`. Thick
//! strokes and circles test each pixel of their bounding box, clipped to the
//! canvas first. All geometry is widened to `i64` before any arithmetic.

use ab_glyph::{FontVec, PxScale};
use image::{Luma, Pixel, Rgb};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use super::shape::{Point, Shape};
use crate::buffer::ImageBuffer;
use crate::error::ConfigurationError;

type Canvas<P> = image::ImageBuffer<P, Vec<u8>>;

/// Draw `shapes` in order onto a copy of `canvas`.
///
/// Pixels outside every shape's footprint keep their original value. On a
/// grayscale canvas each colour is reduced to its luma.
///
/// # Errors
/// `InvalidShape` for parameters no canvas can satisfy, `MissingFont` if a
/// text shape is present and `font` is `None`. Validation happens before any
/// pixel is touched.
pub fn draw_shapes(
    canvas: &ImageBuffer,
    shapes: &[Shape],
    font: Option<&FontVec>,
) -> Result<ImageBuffer, ConfigurationError> {
    for shape in shapes {
        shape.validate()?;
        if matches!(shape, Shape::Text { .. }) && font.is_none() {
            return Err(ConfigurationError::MissingFont);
        }
    }

    let mut out = canvas.clone();
    match &mut out {
        ImageBuffer::Color(img) => {
            for shape in shapes {
                paint(img, shape, Rgb(shape.color().0), font);
            }
        }
        ImageBuffer::Gray(img) => {
            for shape in shapes {
                paint(img, shape, Luma([shape.color().luma()]), font);
            }
        }
    }

    log::debug!("Drew {} shape(s) on {}x{} canvas", shapes.len(), out.width(), out.height());
    Ok(out)
}

fn paint<P>(img: &mut Canvas<P>, shape: &Shape, color: P, font: Option<&FontVec>)
where
    P: Pixel<Subpixel = u8>,
{
    match shape {
        Shape::Line {
            from, to, thickness, ..
        } => stroke_line(img, widen(*from), widen(*to), *thickness, color),
        Shape::Rectangle {
            top_left,
            bottom_right,
            thickness,
            ..
        } => {
            let (a, b) = (widen(*top_left), widen(*bottom_right));
            let (x0, x1) = (a.0.min(b.0), a.0.max(b.0));
            let (y0, y1) = (a.1.min(b.1), a.1.max(b.1));
            if *thickness < 0 {
                // Corners are inclusive
                fill_clipped(img, (x0, y0), (x1 + 1, y1 + 1), color);
            } else {
                stroke_line(img, (x0, y0), (x1, y0), *thickness, color);
                stroke_line(img, (x1, y0), (x1, y1), *thickness, color);
                stroke_line(img, (x1, y1), (x0, y1), *thickness, color);
                stroke_line(img, (x0, y1), (x0, y0), *thickness, color);
            }
        }
        Shape::Circle {
            center,
            radius,
            thickness,
            ..
        } => draw_circle(img, widen(*center), i64::from(*radius), *thickness, color),
        Shape::Text {
            origin, text, size, ..
        } => {
            if let Some(font) = font {
                draw_text(img, *origin, text, *size, font, color);
            }
        }
        Shape::Fill {
            top_left,
            bottom_right,
            ..
        } => fill_clipped(img, widen(*top_left), widen(*bottom_right), color),
    }
}

/// Coordinates in `i64` so far-off points can't overflow.
type Wide = (i64, i64);

fn widen(p: Point) -> Wide {
    (i64::from(p.0), i64::from(p.1))
}

/// Fill columns `from.0..to.0` and rows `from.1..to.1`, clipped to the canvas.
fn fill_clipped<P>(img: &mut Canvas<P>, from: Wide, to: Wide, color: P)
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = img.dimensions();
    let x0 = from.0.clamp(0, i64::from(width));
    let x1 = to.0.clamp(0, i64::from(width));
    let y0 = from.1.clamp(0, i64::from(height));
    let y1 = to.1.clamp(0, i64::from(height));
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(img, rect, color);
}

/// Set every canvas pixel in the inclusive box `min..=max` for which
/// `inside` holds.
fn paint_where<P, F>(img: &mut Canvas<P>, min: Wide, max: Wide, color: P, inside: F)
where
    P: Pixel<Subpixel = u8>,
    F: Fn(i64, i64) -> bool,
{
    let (width, height) = img.dimensions();
    let xs = min.0.max(0)..=max.0.min(i64::from(width) - 1);
    for y in min.1.max(0)..=max.1.min(i64::from(height) - 1) {
        for x in xs.clone() {
            if inside(x, y) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Stroke a segment `thickness` pixels wide with round caps.
fn stroke_line<P>(img: &mut Canvas<P>, from: Wide, to: Wide, thickness: i32, color: P)
where
    P: Pixel<Subpixel = u8>,
{
    if thickness <= 1 {
        let (width, height) = img.dimensions();
        if let Some((start, end)) = clip_segment(from, to, width, height) {
            draw_line_segment_mut(img, start, end, color);
        }
        return;
    }

    let half = f64::from(thickness) / 2.0;
    // Even widths straddle pixel boundaries
    let offset = if thickness % 2 == 0 { 0.5 } else { 0.0 };
    let reach = i64::from(thickness);
    let a = (from.0 as f64, from.1 as f64);
    let b = (to.0 as f64, to.1 as f64);
    paint_where(
        img,
        (from.0.min(to.0) - reach, from.1.min(to.1) - reach),
        (from.0.max(to.0) + reach, from.1.max(to.1) + reach),
        color,
        |x, y| segment_distance((x as f64 + offset, y as f64 + offset), a, b) <= half,
    );
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Clip a segment to one pixel beyond the canvas (Liang-Barsky).
///
/// Segments already inside come back unchanged, so the thin-line footprint
/// is exactly Bresenham's.
fn clip_segment(
    from: Wide,
    to: Wide,
    width: u32,
    height: u32,
) -> Option<((f32, f32), (f32, f32))> {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (xmin, xmax) = (-1.0, f64::from(width));
    let (ymin, ymax) = (-1.0, f64::from(height));

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }
    if t0 > t1 {
        return None;
    }
    let at = |t: f64| ((x0 + t * dx) as f32, (y0 + t * dy) as f32);
    Some((at(t0), at(t1)))
}

/// Filled disc for a negative `thickness`, otherwise a ring `thickness`
/// pixels wide centred on `radius`.
fn draw_circle<P>(img: &mut Canvas<P>, center: Wide, radius: i64, thickness: i32, color: P)
where
    P: Pixel<Subpixel = u8>,
{
    let r = radius as f64;
    let (inner, outer) = if thickness < 0 {
        (f64::NEG_INFINITY, r + 0.5)
    } else {
        let half = f64::from(thickness) / 2.0;
        ((r - half).max(0.0), r + half)
    };
    let reach = radius + i64::from(thickness).abs();
    let (cx, cy) = (center.0 as f64, center.1 as f64);
    paint_where(
        img,
        (center.0 - reach, center.1 - reach),
        (center.0 + reach, center.1 + reach),
        color,
        |x, y| {
            let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
            d >= inner && d < outer
        },
    );
}

/// Draw `text` with its glyph box starting at `origin`. Text that can't
/// reach the canvas is skipped.
fn draw_text<P>(
    img: &mut Canvas<P>,
    origin: Point,
    text: &str,
    size: f32,
    font: &FontVec,
    color: P,
)
where
    P: Pixel<Subpixel = u8>,
{
    let scale = PxScale::from(size);
    let (text_width, _) = text_size(scale, font, text);
    // Glyphs may hang below the nominal size
    let reach_x = i64::from(text_width).saturating_add(size.ceil() as i64);
    let reach_y = (2.0 * size).ceil() as i64;
    let (x, y) = widen(origin);
    let (width, height) = img.dimensions();
    if x >= i64::from(width)
        || y >= i64::from(height)
        || x.saturating_add(reach_x) <= 0
        || y.saturating_add(reach_y) <= 0
    {
        return;
    }
    draw_text_mut(img, color, origin.0, origin.1, scale, font, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{default_sketch, Color};
    use image::GrayImage;

    fn rgb_at(img: &ImageBuffer, x: u32, y: u32) -> [u8; 3] {
        match img {
            ImageBuffer::Color(rgb) => rgb.get_pixel(x, y).0,
            ImageBuffer::Gray(_) => panic!("Expected a colour canvas"),
        }
    }

    #[test]
    fn test_line_only_touches_its_footprint() {
        let canvas = ImageBuffer::blank(64, 64);
        let shapes = [Shape::Line {
            from: (0, 0),
            to: (40, 40),
            color: Color::YELLOW,
            thickness: 1,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();

        assert_eq!(rgb_at(&out, 20, 20), [255, 255, 0]);
        let ImageBuffer::Color(rgb) = &out else {
            panic!("Expected a colour canvas");
        };
        for (x, y, px) in rgb.enumerate_pixels() {
            if x != y || x > 40 {
                assert_eq!(px.0, [0, 0, 0], "pixel ({}, {}) should be untouched", x, y);
            }
        }
    }

    #[test]
    fn test_thick_line_stays_near_segment() {
        let canvas = ImageBuffer::blank(512, 512);
        let out = draw_shapes(&canvas, &default_sketch(512, 512)[..1], None).unwrap();
        assert_eq!(rgb_at(&out, 150, 150), [255, 255, 0]);
        assert_eq!(rgb_at(&out, 151, 150), [255, 255, 0]);
        assert_eq!(rgb_at(&out, 400, 100), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 310, 310), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 0, 300), [0, 0, 0]);
    }

    #[test]
    fn test_draw_does_not_mutate_input() {
        let canvas = ImageBuffer::blank(16, 16);
        let _ = draw_shapes(&canvas, &default_sketch(16, 16), None).unwrap();
        assert!(canvas.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_hollow_rectangle_leaves_inside_untouched() {
        let canvas = ImageBuffer::blank(50, 50);
        let shapes = [Shape::Rectangle {
            top_left: (10, 10),
            bottom_right: (30, 20),
            color: Color::GREEN,
            thickness: 1,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        assert_eq!(rgb_at(&out, 10, 10), [0, 255, 0]);
        assert_eq!(rgb_at(&out, 30, 20), [0, 255, 0]);
        assert_eq!(rgb_at(&out, 20, 15), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 31, 15), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 9, 9), [0, 0, 0]);
    }

    #[test]
    fn test_filled_rectangle() {
        let canvas = ImageBuffer::blank(50, 50);
        let shapes = [Shape::Rectangle {
            top_left: (30, 20),
            bottom_right: (10, 10),
            color: Color::RED,
            thickness: -1,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        assert_eq!(rgb_at(&out, 20, 15), [255, 0, 0]);
        assert_eq!(rgb_at(&out, 31, 15), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 20, 21), [0, 0, 0]);
    }

    #[test]
    fn test_thick_rectangle_border() {
        let canvas = ImageBuffer::blank(60, 60);
        let shapes = [Shape::Rectangle {
            top_left: (10, 10),
            bottom_right: (40, 40),
            color: Color::BLUE,
            thickness: 4,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        assert_eq!(rgb_at(&out, 25, 10), [0, 0, 255]);
        assert_eq!(rgb_at(&out, 25, 11), [0, 0, 255]);
        assert_eq!(rgb_at(&out, 25, 25), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 55, 55), [0, 0, 0]);
    }

    #[test]
    fn test_circle_outline_and_fill() {
        let canvas = ImageBuffer::blank(100, 100);
        let outline = [Shape::Circle {
            center: (50, 50),
            radius: 20,
            color: Color::WHITE,
            thickness: 1,
        }];
        let out = draw_shapes(&canvas, &outline, None).unwrap();
        assert_eq!(rgb_at(&out, 70, 50), [255, 255, 255]);
        assert_eq!(rgb_at(&out, 50, 50), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 90, 90), [0, 0, 0]);

        let filled = [Shape::Circle {
            center: (50, 50),
            radius: 20,
            color: Color::WHITE,
            thickness: -1,
        }];
        let out = draw_shapes(&canvas, &filled, None).unwrap();
        assert_eq!(rgb_at(&out, 50, 50), [255, 255, 255]);
        assert_eq!(rgb_at(&out, 75, 50), [0, 0, 0]);
    }

    #[test]
    fn test_fill_is_end_exclusive() {
        let canvas = ImageBuffer::blank(300, 300);
        let shapes = [Shape::Fill {
            top_left: (100, 200),
            bottom_right: (200, 300),
            color: Color::BLUE,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        assert_eq!(rgb_at(&out, 100, 200), [0, 0, 255]);
        assert_eq!(rgb_at(&out, 199, 299), [0, 0, 255]);
        assert_eq!(rgb_at(&out, 200, 250), [0, 0, 0]);
        assert_eq!(rgb_at(&out, 150, 199), [0, 0, 0]);
    }

    #[test]
    fn test_text_without_font_is_rejected() {
        let canvas = ImageBuffer::blank(64, 64);
        let shapes = [Shape::Text {
            origin: (0, 0),
            text: "hello".to_string(),
            color: Color::WHITE,
            size: 16.0,
        }];
        assert_eq!(
            draw_shapes(&canvas, &shapes, None),
            Err(ConfigurationError::MissingFont)
        );
    }

    fn painted_rows(img: &ImageBuffer, x: u32) -> Vec<u32> {
        let ImageBuffer::Color(rgb) = img else {
            panic!("Expected a colour canvas");
        };
        (0..rgb.height()).filter(|&y| rgb.get_pixel(x, y).0 != [0, 0, 0]).collect()
    }

    #[test]
    fn test_line_width_matches_thickness() {
        for thickness in 1..=7 {
            let canvas = ImageBuffer::blank(60, 40);
            let shapes = [Shape::Line {
                from: (10, 20),
                to: (50, 20),
                color: Color::WHITE,
                thickness,
            }];
            let out = draw_shapes(&canvas, &shapes, None).unwrap();
            assert_eq!(
                painted_rows(&out, 30).len(),
                thickness as usize,
                "thickness {}",
                thickness
            );
        }
    }

    #[test]
    fn test_thick_circle_ring_is_solid() {
        let canvas = ImageBuffer::blank(160, 160);
        let shapes = [Shape::Circle {
            center: (80, 80),
            radius: 60,
            color: Color::WHITE,
            thickness: 8,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        let ImageBuffer::Color(rgb) = &out else {
            panic!("Expected a colour canvas");
        };
        for (x, y, px) in rgb.enumerate_pixels() {
            let d = ((x as f64 - 80.0).powi(2) + (y as f64 - 80.0).powi(2)).sqrt();
            if (56.5..=63.5).contains(&d) {
                assert_eq!(px.0, [255, 255, 255], "hole at ({}, {})", x, y);
            }
            if !(56.0..64.0).contains(&d) {
                assert_eq!(px.0, [0, 0, 0], "stray pixel at ({}, {})", x, y);
            }
        }
        assert_eq!(painted_rows(&out, 80).len(), 16);
    }

    #[test]
    fn test_far_off_coordinates_are_clipped() {
        let canvas = ImageBuffer::blank(32, 16);
        let shapes = [
            Shape::Rectangle {
                top_left: (i32::MIN, 0),
                bottom_right: (i32::MAX, 4),
                color: Color::RED,
                thickness: -1,
            },
            Shape::Fill {
                top_left: (-2_000_000_000, 8),
                bottom_right: (2_000_000_000, 10),
                color: Color::GREEN,
            },
            Shape::Line {
                from: (i32::MIN, 12),
                to: (i32::MAX, 12),
                color: Color::BLUE,
                thickness: 1,
            },
            Shape::Rectangle {
                top_left: (i32::MIN, i32::MIN),
                bottom_right: (i32::MAX, i32::MAX),
                color: Color::WHITE,
                thickness: 3,
            },
            Shape::Circle {
                center: (i32::MAX, i32::MIN),
                radius: i32::MAX,
                color: Color::WHITE,
                thickness: 5,
            },
        ];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        assert_eq!(painted_rows(&out, 16), [0, 1, 2, 3, 4, 8, 9, 12]);
        assert_eq!(rgb_at(&out, 0, 4), [255, 0, 0]);
        assert_eq!(rgb_at(&out, 31, 9), [0, 255, 0]);
        assert_eq!(rgb_at(&out, 5, 12), [0, 0, 255]);
    }

    #[test]
    fn test_text_stays_in_its_glyph_box() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/DejaVuSansMono.ttf");
        let font = crate::draw::load_font(&path).unwrap();
        let canvas = ImageBuffer::blank(120, 60);
        let shapes = [Shape::Text {
            origin: (10, 12),
            text: "Hi".to_string(),
            color: Color::WHITE,
            size: 20.0,
        }];
        let out = draw_shapes(&canvas, &shapes, Some(&font)).unwrap();
        let ImageBuffer::Color(rgb) = &out else {
            panic!("Expected a colour canvas");
        };

        let (text_width, _) = text_size(PxScale::from(20.0), &font, "Hi");
        let mut lit = 0;
        for (x, y, px) in rgb.enumerate_pixels() {
            if px.0 != [0, 0, 0] {
                lit += 1;
                assert!(
                    (10..10 + text_width + 2).contains(&x) && (12..12 + 24).contains(&y),
                    "glyph pixel outside box at ({}, {})",
                    x,
                    y
                );
            }
        }
        assert!(lit > 20, "only {} pixels drawn", lit);

        let offscreen = [Shape::Text {
            origin: (i32::MIN, i32::MAX),
            text: "Hi".to_string(),
            color: Color::WHITE,
            size: 20.0,
        }];
        let out = draw_shapes(&canvas, &offscreen, Some(&font)).unwrap();
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_gray_canvas_uses_luma() {
        let canvas = ImageBuffer::Gray(GrayImage::new(20, 20));
        let shapes = [Shape::Line {
            from: (0, 5),
            to: (19, 5),
            color: Color::RED,
            thickness: 1,
        }];
        let out = draw_shapes(&canvas, &shapes, None).unwrap();
        let ImageBuffer::Gray(gray) = out else {
            panic!("Expected a gray canvas");
        };
        assert_eq!(gray.get_pixel(10, 5)[0], 76);
        assert_eq!(gray.get_pixel(10, 6)[0], 0);
    }
}
