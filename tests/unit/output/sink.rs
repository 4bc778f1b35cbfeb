use super::*;

fn strip() -> StripImage {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    StripImage::from_rgba8(&img).unwrap()
}

#[test]
fn in_memory_sink_records_saves_in_order() {
    let mut sink = InMemorySink::new();
    let s = strip();
    sink.save(&s, "a.png");
    sink.save(&s, "b.png");

    let names: Vec<&str> = sink.saved().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
    assert_eq!(sink.saved()[0].1, s);
}

#[test]
fn dir_sink_writes_png_bytes() {
    let dir = PathBuf::from("target").join("unit_dir_sink");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = DirSink::new(&dir);
    let s = strip();
    sink.save(&s, "photobooth-strip.png");

    let path = dir.join("photobooth-strip.png");
    assert_eq!(sink.written(), &[path.clone()]);
    assert_eq!(std::fs::read(&path).unwrap(), s.png().to_vec());
}

#[test]
fn dir_sink_keeps_only_the_file_name() {
    let dir = PathBuf::from("target").join("unit_dir_sink_names");
    let mut sink = DirSink::new(&dir);
    sink.save(&strip(), "../../escape.png");
    assert_eq!(sink.written(), &[dir.join("escape.png")]);
}

#[test]
fn dir_sink_failure_is_swallowed() {
    let mut sink = DirSink::new(PathBuf::from("target").join("unit_dir_sink_fail"));
    sink.save(&strip(), "..");
    assert!(sink.written().is_empty());
}

#[test]
fn sinks_work_through_boxes() {
    let mut boxed: Box<dyn OutputSink> = Box::new(InMemorySink::new());
    boxed.save(&strip(), "x.png");
}
