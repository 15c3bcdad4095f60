//! The four exercises run end to end on files written to a temp dir.

use frameloop::capture::{open_source, Source};
use frameloop::draw::{draw_shapes, Color, Shape};
use frameloop::recipe::{EdgeParams, Recipe, ReshapeParams};
use frameloop::transform::{crop, resize, to_grayscale, CropRect};
use frameloop::{ConfigurationError, ImageBuffer};
use image::{Rgb, RgbImage};
use tempfile::TempDir;

fn write_orange(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("orange.png");
    RgbImage::from_fn(600, 800, |x, y| Rgb([255, (x % 256) as u8, (y % 256) as u8]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn test_reshape_exercise_on_file() {
    let dir = TempDir::new().unwrap();
    let mut source = open_source(&Source::Still(write_orange(&dir))).unwrap();
    let frame = source.read().unwrap();
    assert_eq!(frame.dimensions(), (600, 800));

    let stages = Recipe::Reshape(ReshapeParams::default())
        .apply(&frame, None)
        .unwrap();
    assert_eq!(stages[0].image.dimensions(), (600, 800));
    assert_eq!(stages[1].label, "Image resize");
    assert_eq!(stages[1].image.dimensions(), (300, 200));
}

#[test]
fn test_resize_and_crop_sizes() {
    let img = ImageBuffer::blank(600, 800);
    for (w, h) in [(300, 200), (1, 1), (1200, 50)] {
        assert_eq!(resize(&img, w, h).unwrap().dimensions(), (w, h));
    }

    let rect = CropRect::new(100, 350, 0, 400);
    assert_eq!(crop(&img, rect).unwrap().dimensions(), (250, 400));

    let outside = CropRect::new(0, 601, 0, 10);
    assert!(matches!(
        crop(&img, outside),
        Err(ConfigurationError::CropOutOfBounds { .. })
    ));
}

#[test]
fn test_grayscale_reduces_and_is_idempotent() {
    let img = ImageBuffer::Color(RgbImage::from_pixel(10, 10, Rgb([10, 200, 30])));
    let once = to_grayscale(&img);
    assert_eq!(once.channels(), 1);
    assert_eq!(to_grayscale(&once), once);
}

#[test]
fn test_edge_exercise_on_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kot.png");
    RgbImage::from_fn(64, 64, |x, _| {
        if x < 32 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
    })
    .save(&path)
    .unwrap();

    let frame = open_source(&Source::Still(path)).unwrap().read().unwrap();
    let stages = Recipe::EdgeStudy(EdgeParams::default())
        .apply(&frame, None)
        .unwrap();
    let canny = &stages[2].image;
    assert!(canny.is_gray());
    assert!(canny.as_raw().iter().all(|&v| v == 0 || v == 255));
    assert!(canny.as_raw().contains(&255), "the step edge should be found");
}

#[test]
fn test_drawing_only_touches_footprint() {
    let canvas = ImageBuffer::blank(512, 512);
    let shapes = [
        Shape::Rectangle {
            top_left: (0, 0),
            bottom_right: (250, 350),
            color: Color::RED,
            thickness: -1,
        },
        Shape::Circle {
            center: (400, 50),
            radius: 30,
            color: Color::GREEN,
            thickness: 5,
        },
    ];
    let ImageBuffer::Color(out) = draw_shapes(&canvas, &shapes, None).unwrap() else {
        panic!("drawing should keep the canvas RGB");
    };

    for (x, y, px) in out.enumerate_pixels() {
        let in_rect = x <= 250 && y <= 350;
        let dx = x as i64 - 400;
        let dy = y as i64 - 50;
        let near_circle = dx * dx + dy * dy <= 40 * 40;
        if !in_rect && !near_circle {
            assert_eq!(px.0, [0, 0, 0], "pixel ({}, {}) changed", x, y);
        }
    }
    assert_eq!(out.get_pixel(100, 100).0, Color::RED.0);
    assert_eq!(out.get_pixel(400, 50).0, [0, 0, 0], "hollow circle centre");
}

#[test]
fn test_preview_frames_from_blank_source() {
    let mut source = open_source(&Source::Blank {
        width: 320,
        height: 240,
    })
    .unwrap();
    let stages = Recipe::Preview.apply(&source.read().unwrap(), None).unwrap();
    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0].image.dimensions(), (320, 240));
}
