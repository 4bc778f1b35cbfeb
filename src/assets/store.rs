use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{PhotostripError, PhotostripResult};

/// Normalized relative path to a template asset.
///
/// Catalog entries may be written web-root style (`/frame/1.png`); the leading `/` is stripped
/// before normalization.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct AssetRef(pub(crate) String);

impl AssetRef {
    /// Parse and normalize an asset reference.
    pub fn new(source: &str) -> PhotostripResult<Self> {
        let trimmed = source.strip_prefix('/').unwrap_or(source);
        Ok(Self(normalize_rel_path(trimmed)?))
    }

    /// Normalized path with `/` separators.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return `true` when the reference names an SVG document.
    pub fn is_svg(&self) -> bool {
        Path::new(&self.0)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
    }
}

impl TryFrom<String> for AssetRef {
    type Error = PhotostripError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<AssetRef> for String {
    fn from(value: AssetRef) -> Self {
        value.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalize and validate relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PhotostripResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PhotostripError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PhotostripError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PhotostripError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PhotostripError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Source of raw template bytes.
///
/// Reads happen on the caller's thread and complete before compositing continues.
pub trait AssetSource: Send + Sync {
    /// Read the encoded bytes behind `asset`.
    fn read(&self, asset: &AssetRef) -> PhotostripResult<Vec<u8>>;
}

/// Assets resolved against a directory on disk.
#[derive(Clone, Debug)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    /// Resolve assets relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used for resolution.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute or root-relative path for an asset.
    pub fn resolve(&self, asset: &AssetRef) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(asset.as_str().split('/'));
        path
    }
}

impl AssetSource for DirAssetSource {
    fn read(&self, asset: &AssetRef) -> PhotostripResult<Vec<u8>> {
        let path = self.resolve(asset);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read asset '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// In-memory assets keyed by reference. Useful for embedded templates and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    assets: BTreeMap<AssetRef, Vec<u8>>,
}

impl MemoryAssetSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the bytes for `asset`.
    pub fn insert(&mut self, asset: AssetRef, bytes: Vec<u8>) {
        self.assets.insert(asset, bytes);
    }

    /// Builder-style [`MemoryAssetSource::insert`].
    pub fn with(mut self, asset: AssetRef, bytes: Vec<u8>) -> Self {
        self.insert(asset, bytes);
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn read(&self, asset: &AssetRef) -> PhotostripResult<Vec<u8>> {
        self.assets.get(asset).cloned().ok_or_else(|| {
            PhotostripError::Other(anyhow::anyhow!("asset '{asset}' is not registered"))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
