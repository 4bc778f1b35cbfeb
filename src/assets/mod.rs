//! Frame-template assets: where the bytes come from and how they become pixels.

/// Image decoding, SVG rasterization and premultiplied-alpha conversion.
pub mod decode;
/// Asset references and byte sources.
pub mod store;
