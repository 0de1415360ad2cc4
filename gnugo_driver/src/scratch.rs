use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::Rng;
use tracing::warn;

/// A game record file the engine can load from and save to.
///
/// Lives in the system temp directory under a random name such as
/// `3F09A1C4B2E87D65.sgf` and is deleted when dropped.
pub struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    /// Picks a fresh name without creating the file.
    pub fn new() -> Self {
        Self::in_directory(&std::env::temp_dir(), &mut rand::thread_rng())
    }

    pub fn in_directory(directory: &Path, rng: &mut impl Rng) -> Self {
        Self {
            path: directory.join(format!("{:016X}.sgf", rng.gen::<u64>())),
        }
    }

    /// Creates the file with the given content.
    pub fn create(contents: &str) -> anyhow::Result<Self> {
        let file = Self::new();
        std::fs::write(&file.path, contents)
            .with_context(|| format!("Could not write '{}'", file.path.display()))?;
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The current content, or `None` if nobody has written the file.
    pub fn read(&self) -> anyhow::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("Could not read '{}'", self.path.display()))
            }
        }
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "Could not delete scratch file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn names_are_sixteen_hex_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        let file = ScratchFile::in_directory(Path::new("/scratch"), &mut rng);
        let name = file.path().file_name().unwrap().to_str().unwrap();
        let (stem, extension) = name.split_once('.').unwrap();
        assert_eq!(extension, "sgf");
        assert_eq!(stem.len(), 16);
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_eq!(file.path().parent(), Some(Path::new("/scratch")));
    }

    #[test]
    fn deleted_on_drop() {
        let file = ScratchFile::create("(;SZ[9])").unwrap();
        let path = file.path().to_owned();
        assert_eq!(file.read().unwrap().as_deref(), Some("(;SZ[9])"));
        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn unwritten_files_read_as_none() {
        let file = ScratchFile::new();
        assert_eq!(file.read().unwrap(), None);
    }
}
