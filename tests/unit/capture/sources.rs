use super::*;

fn pixels(still: &CapturedImage) -> image::RgbaImage {
    decode_rgba8(still.bytes()).unwrap()
}

#[test]
fn synthetic_stills_are_deterministic_and_sized() {
    let mut a = SyntheticCapture::new(8, 6);
    let mut b = SyntheticCapture::new(8, 6);
    let a0 = a.request_still().unwrap();
    let b0 = b.request_still().unwrap();
    assert_eq!(a0, b0);
    assert_eq!(pixels(&a0).dimensions(), (8, 6));

    let a1 = a.request_still().unwrap();
    assert_ne!(a0, a1);
    assert_eq!(a.requests(), 2);
}

#[test]
fn synthetic_zero_size_is_unavailable() {
    let mut cam = SyntheticCapture::new(0, 10);
    assert!(cam.request_still().is_err());
}

#[test]
fn directory_capture_plays_back_then_runs_dry() {
    let dir = PathBuf::from("target").join("unit_directory_capture");
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("shot.png");
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([9, 8, 7, 255]));
    std::fs::write(&good, encode_png(&img).unwrap()).unwrap();
    let bad = dir.join("notes.txt");
    std::fs::write(&bad, b"hello").unwrap();

    let mut cam = DirectoryCapture::new(vec![good.clone(), bad, dir.join("missing.png")]);
    assert_eq!(cam.remaining(), 3);

    let still = cam.request_still().unwrap();
    assert_eq!(still.bytes(), std::fs::read(&good).unwrap().as_slice());

    let err = cam.request_still().unwrap_err();
    assert!(err.reason.contains("not a supported image"));
    let err = cam.request_still().unwrap_err();
    assert!(err.reason.contains("unable to read"));
    let err = cam.request_still().unwrap_err();
    assert_eq!(err.reason, "no more capture files");
}

#[test]
fn mirrored_flips_horizontally() {
    struct TwoPixels;
    impl CaptureProvider for TwoPixels {
        fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
            let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255])
                .unwrap();
            Ok(CapturedImage::from_encoded(encode_png(&img).unwrap()))
        }
    }

    let mut cam = Mirrored::new(TwoPixels);
    let out = pixels(&cam.request_still().unwrap());
    assert_eq!(out.into_raw(), vec![0, 0, 255, 255, 255, 0, 0, 255]);
}

#[test]
fn mirrored_passes_unavailability_through() {
    let mut cam = Mirrored::new(UnavailableCapture::new("denied"));
    assert_eq!(cam.request_still().unwrap_err(), CaptureUnavailable::new("denied"));
}
