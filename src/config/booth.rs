use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context;

use crate::{
    catalog::frames::{Frame, FrameCatalog, builtin_frames},
    composite::geometry::SlotGeometry,
    foundation::error::{PhotostripError, PhotostripResult},
};

/// Booth-wide settings. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    /// Slot layout shared by every frame template.
    pub geometry: SlotGeometry,
    /// First countdown value shown after a capture is triggered.
    pub countdown_from: u8,
    /// Delay between countdown ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Filename suggested to the output sink on download.
    pub download_filename: String,
    /// Flip stills horizontally, matching a mirrored camera preview.
    pub mirror_captures: bool,
    /// Requested still width for synthetic capture.
    pub capture_width: u32,
    /// Requested still height for synthetic capture.
    pub capture_height: u32,
    /// Selectable frames, in display order.
    pub frames: Vec<Frame>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            geometry: SlotGeometry::REFERENCE,
            countdown_from: 3,
            tick_interval_ms: 1000,
            download_filename: "photobooth-strip.png".to_string(),
            mirror_captures: true,
            capture_width: 1280,
            capture_height: 960,
            frames: builtin_frames(),
        }
    }
}

impl BoothConfig {
    /// Load and validate a JSON config file.
    pub fn from_path(path: &Path) -> PhotostripResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| PhotostripError::serde(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json(json: &str) -> PhotostripResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| PhotostripError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> PhotostripResult<()> {
        self.geometry.validate()?;
        if self.countdown_from == 0 {
            return Err(PhotostripError::validation("countdown_from must be > 0"));
        }
        if self.tick_interval_ms == 0 {
            return Err(PhotostripError::validation("tick_interval_ms must be > 0"));
        }
        if self.download_filename.trim().is_empty() {
            return Err(PhotostripError::validation("download_filename must be non-empty"));
        }
        FrameCatalog::new(self.frames.clone())?;
        Ok(())
    }

    /// Countdown cadence.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validated frame catalog.
    pub fn catalog(&self) -> PhotostripResult<FrameCatalog> {
        FrameCatalog::new(self.frames.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/booth.rs"]
mod tests;
