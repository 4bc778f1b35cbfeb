use std::{fmt, sync::Arc};

use crate::foundation::error::PhotostripError;

/// Opaque handle to one encoded still (PNG, JPEG, ...).
///
/// Cloning shares the underlying bytes. Equality compares bytes, so two handles are equal exactly
/// when they carry bit-identical encodings.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CapturedImage {
    bytes: Arc<[u8]>,
}

impl CapturedImage {
    /// Wrap already-encoded image bytes.
    pub fn from_encoded(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Return `true` when both handles point at the same allocation.
    pub fn same_handle(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The capture device could not deliver a still.
///
/// `reason` is meant to be shown to the user verbatim.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{reason}")]
pub struct CaptureUnavailable {
    /// Human-readable reason.
    pub reason: String,
}

impl CaptureUnavailable {
    /// Build a new unavailability report.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<CaptureUnavailable> for PhotostripError {
    fn from(value: CaptureUnavailable) -> Self {
        PhotostripError::CaptureUnavailable(value.reason)
    }
}

/// Anything that can hand out still images on request.
///
/// A request either yields an image or reports why none is available. Sessions never retry on
/// their own.
pub trait CaptureProvider {
    /// Produce one still image.
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable>;
}

impl<P: CaptureProvider + ?Sized> CaptureProvider for &mut P {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        (**self).request_still()
    }
}

impl<P: CaptureProvider + ?Sized> CaptureProvider for Box<P> {
    fn request_still(&mut self) -> Result<CapturedImage, CaptureUnavailable> {
        (**self).request_still()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/provider.rs"]
mod tests;
