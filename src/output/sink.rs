use std::path::{Path, PathBuf};

use crate::composite::compositor::StripImage;

/// Destination for finished strips.
///
/// Fire-and-forget: the session never inspects the outcome, so implementations report their own
/// failures (the built-in sinks log them).
pub trait OutputSink {
    /// Persist or hand off `image` under `suggested_filename`.
    fn save(&mut self, image: &StripImage, suggested_filename: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn save(&mut self, image: &StripImage, suggested_filename: &str) {
        (**self).save(image, suggested_filename);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn save(&mut self, image: &StripImage, suggested_filename: &str) {
        (**self).save(image, suggested_filename);
    }
}

/// Writes strips as files into a directory.
#[derive(Clone, Debug)]
pub struct DirSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirSink {
    /// Write into `dir`, creating it on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written successfully so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn try_save(&self, image: &StripImage, suggested_filename: &str) -> anyhow::Result<PathBuf> {
        use anyhow::Context as _;

        let name = Path::new(suggested_filename)
            .file_name()
            .with_context(|| format!("'{suggested_filename}' has no file name"))?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.dir.join(name);
        std::fs::write(&path, image.png())
            .with_context(|| format!("write strip '{}'", path.display()))?;
        Ok(path)
    }
}

impl OutputSink for DirSink {
    fn save(&mut self, image: &StripImage, suggested_filename: &str) {
        match self.try_save(image, suggested_filename) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "strip saved");
                self.written.push(path);
            }
            Err(e) => tracing::warn!(error = %format!("{e:#}"), "strip save failed"),
        }
    }
}

/// In-memory sink for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct InMemorySink {
    saved: Vec<(String, StripImage)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves in call order, with their suggested filenames.
    pub fn saved(&self) -> &[(String, StripImage)] {
        &self.saved
    }
}

impl OutputSink for InMemorySink {
    fn save(&mut self, image: &StripImage, suggested_filename: &str) {
        self.saved.push((suggested_filename.to_string(), image.clone()));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
