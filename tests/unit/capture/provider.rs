use super::*;

struct Counting(u8);

impl CaptureProvider for Counting {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        self.0 += 1;
        Ok(CapturedImage::from_encoded(vec![self.0]))
    }
}

#[test]
fn captured_image_equality_is_by_bytes() {
    let a = CapturedImage::from_encoded(vec![1u8, 2, 3]);
    let b = CapturedImage::from_encoded(vec![1u8, 2, 3]);
    assert_eq!(a, b);
    assert!(!a.same_handle(&b));
    assert!(a.same_handle(&a.clone()));
    assert_eq!(format!("{a:?}"), "CapturedImage { len: 3 }");
}

#[test]
fn unavailable_converts_to_crate_error() {
    let err: PhotostripError = CaptureUnavailable::new("permission denied").into();
    assert_eq!(err.to_string(), "capture unavailable: permission denied");
}

fn take_one<P: CaptureProvider>(mut provider: P) -> CapturedImage {
    provider.request_still().unwrap()
}

#[test]
fn providers_work_through_references_and_boxes() {
    let mut p = Counting(0);
    assert_eq!(take_one(&mut p).bytes(), &[1]);
    let mut boxed: Box<dyn CaptureProvider> = Box::new(p);
    assert_eq!(boxed.request_still().unwrap().bytes(), &[2]);
}
