use crate::{
    assets::store::{AssetRef, MemoryAssetSource},
    catalog::frames::FrameId,
};

use super::*;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const PHOTO_COLORS: [[u8; 4]; 4] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [255, 255, 0, 255],
];

fn small_geometry() -> SlotGeometry {
    SlotGeometry {
        slot_width: 4,
        slot_height: 2,
        first_slot_top: 1,
        slot_gap: 1,
    }
}

/// 8x13 template: opaque white everywhere except the four 4x2 cutouts at x=2.
fn template_rgba() -> image::RgbaImage {
    let g = small_geometry();
    let mut img = image::RgbaImage::from_pixel(8, 13, image::Rgba(WHITE));
    for rect in g.slot_rects(8) {
        for y in rect.y0 as u32..rect.y1 as u32 {
            for x in rect.x0 as u32..rect.x1 as u32 {
                img.put_pixel(x, y, image::Rgba([0, 0, 0, 0]));
            }
        }
    }
    img
}

fn solid_png(w: u32, h: u32, px: [u8; 4]) -> CapturedImage {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    CapturedImage::from_encoded(encode_png(&img).unwrap())
}

fn frame() -> Frame {
    Frame {
        id: FrameId::from("t"),
        name: "Test".to_string(),
        asset: AssetRef::new("frame/t.png").unwrap(),
    }
}

fn compositor() -> Compositor {
    let assets = MemoryAssetSource::new().with(
        AssetRef::new("frame/t.png").unwrap(),
        encode_png(&template_rgba()).unwrap(),
    );
    Compositor::new(small_geometry(), assets)
}

fn shots() -> [Option<CapturedImage>; SHOT_COUNT] {
    PHOTO_COLORS.map(|c| Some(solid_png(3, 5, c)))
}

#[test]
fn output_matches_template_size() {
    let strip = compositor().composite(&frame(), &shots()).unwrap();
    assert_eq!((strip.width(), strip.height()), (8, 13));
    assert_eq!(strip.to_rgba8().unwrap().dimensions(), (8, 13));
}

#[test]
fn photos_fill_their_slots_in_order() {
    let strip = compositor()
        .composite(&frame(), &shots())
        .unwrap()
        .to_rgba8()
        .unwrap();
    for (k, color) in PHOTO_COLORS.iter().enumerate() {
        let top = 1 + (k as u32) * 3;
        for y in top..top + 2 {
            for x in 2..6 {
                assert_eq!(strip.get_pixel(x, y).0, *color, "slot {k} at ({x},{y})");
            }
        }
    }
}

#[test]
fn frame_decoration_sits_on_top() {
    let strip = compositor()
        .composite(&frame(), &shots())
        .unwrap()
        .to_rgba8()
        .unwrap();
    for y in [0, 3, 6, 9, 12] {
        assert_eq!(strip.get_pixel(3, y).0, WHITE);
    }
    assert_eq!(strip.get_pixel(0, 1).0, WHITE);
    assert_eq!(strip.get_pixel(7, 11).0, WHITE);
}

#[test]
fn opaque_template_pixels_occlude_photos_inside_slots() {
    let g = small_geometry();
    let mut template = template_rgba();
    template.put_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
    let template = premultiply_image(template);
    let photos: Vec<image::RgbaImage> = PHOTO_COLORS
        .iter()
        .map(|c| image::RgbaImage::from_pixel(4, 2, image::Rgba(*c)))
        .collect();

    let canvas = render_strip(&g, &template, &photos).unwrap();
    assert_eq!(canvas.pixel(2, 1), Some([10, 20, 30, 255]));
    assert_eq!(canvas.pixel(3, 1), Some(PHOTO_COLORS[0]));
}

#[test]
fn half_pixel_slot_origin_rounds_to_the_nearest_column() {
    let g = small_geometry();
    // 9 wide: slot x origin is (9 - 4) / 2 = 2.5.
    assert_eq!(g.slot_rect(9, ShotIndex::FIRST).x0, 2.5);
    let template = premultiply_image(image::RgbaImage::new(9, 13));
    let photos: Vec<image::RgbaImage> = PHOTO_COLORS
        .iter()
        .map(|c| image::RgbaImage::from_pixel(4, 2, image::Rgba(*c)))
        .collect();

    let canvas = render_strip(&g, &template, &photos).unwrap();
    for y in [1, 2] {
        assert_eq!(canvas.pixel(2, y), Some([0, 0, 0, 0]));
        for x in 3..7 {
            assert_eq!(canvas.pixel(x, y), Some(PHOTO_COLORS[0]), "({x},{y})");
        }
        assert_eq!(canvas.pixel(7, y), Some([0, 0, 0, 0]));
    }
}

#[test]
fn photos_are_stretched_without_keeping_aspect() {
    let g = small_geometry();
    let template = premultiply_image(template_rgba());
    // 2x1 source: left red, right blue. Stretched to 4x2 the left half stays red-dominant and the
    // right half blue-dominant on both rows.
    let split = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
    let photos = vec![split.clone(), split.clone(), split.clone(), split];

    let canvas = render_strip(&g, &template, &photos).unwrap();
    for y in [1, 2] {
        let left = canvas.pixel(2, y).unwrap();
        let right = canvas.pixel(5, y).unwrap();
        assert!(left[0] > left[2], "left {left:?}");
        assert!(right[2] > right[0], "right {right:?}");
        assert_eq!(left[3], 255);
    }
}

#[test]
fn composite_is_deterministic() {
    let c = compositor();
    let a = c.composite(&frame(), &shots()).unwrap();
    let b = c.composite(&frame(), &shots()).unwrap();
    assert_eq!(a.png(), b.png());
}

#[test]
fn empty_shot_fails() {
    let mut s = shots();
    s[2] = None;
    let err = compositor().composite(&frame(), &s).unwrap_err();
    assert!(matches!(err, PhotostripError::CompositeFailed(_)));
    assert!(err.to_string().contains("shot 3 of 4 is empty"));
}

#[test]
fn missing_template_fails() {
    let c = Compositor::new(small_geometry(), MemoryAssetSource::new());
    let err = c.composite(&frame(), &shots()).unwrap_err();
    assert!(matches!(err, PhotostripError::CompositeFailed(_)));
    assert!(err.to_string().contains("frame/t.png"));
}

#[test]
fn undecodable_shot_fails() {
    let mut s = shots();
    s[1] = Some(CapturedImage::from_encoded(vec![0u8, 1, 2]));
    let err = compositor().composite(&frame(), &s).unwrap_err();
    assert!(err.to_string().contains("decode shot 2"));
}

#[test]
fn render_strip_requires_four_photos() {
    let template = premultiply_image(template_rgba());
    let photos = vec![image::RgbaImage::new(1, 1)];
    assert!(render_strip(&small_geometry(), &template, &photos).is_err());
}
