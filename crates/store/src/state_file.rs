//! State file - JSON save/load of a session on disk

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::{Session, ShapeSource};
use crate::record::SavedState;

/// Result of [`StateFile::load_or_new`].
#[derive(Debug)]
pub struct Loaded<S> {
    pub session: Session<S>,
    /// True if the session was resumed from the file.
    pub restored: bool,
    /// Why an existing file was ignored, if it was.
    pub error: Option<anyhow::Error>,
}

/// A session save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the session as JSON.
    ///
    /// The JSON goes to a sibling `.tmp` file first and is renamed over the
    /// target, so a crash mid-write leaves the previous save intact.
    pub fn save<S: ShapeSource>(&self, session: &Session<S>) -> Result<()> {
        let json = serde_json::to_vec(&SavedState::capture(session))
            .context("failed to encode session")?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    /// Read and decode the file. Returns `Ok(None)` if it does not exist.
    pub fn load(&self) -> Result<Option<SavedState>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        let saved = serde_json::from_slice(&bytes)
            .with_context(|| format!("malformed state in {}", self.path.display()))?;
        Ok(Some(saved))
    }

    /// Resume the saved session, or start a fresh `width x height` one.
    ///
    /// A missing file starts fresh silently. An unreadable, malformed or
    /// inconsistent file also starts fresh, with the reason in
    /// [`Loaded::error`].
    pub fn load_or_new<S: ShapeSource>(&self, width: usize, height: usize, shapes: S) -> Loaded<S> {
        let error = match self.load().and_then(|saved| match saved {
            Some(saved) => saved.into_parts().map(Some),
            None => Ok(None),
        }) {
            Ok(Some((grid, piece, lines_cleared))) => {
                return Loaded {
                    session: Session::restore(grid, piece, lines_cleared, shapes),
                    restored: true,
                    error: None,
                };
            }
            Ok(None) => None,
            Err(e) => Some(e.context(format!("ignoring {}", self.path.display()))),
        };

        Loaded {
            session: Session::new(width, height, shapes),
            restored: false,
            error,
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Nudge, ShapeCycle};
    use crate::types::Shape;

    fn scratch(name: &str) -> StateFile {
        let dir = std::env::temp_dir().join(format!("blockfall-store-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = StateFile::new(dir.join(name));
        let _ = fs::remove_file(file.path());
        file
    }

    #[test]
    fn missing_file_starts_fresh() {
        let file = scratch("missing.json");
        assert!(file.load().unwrap().is_none());

        let loaded = file.load_or_new(10, 20, ShapeCycle::repeat(Shape::T));
        assert!(!loaded.restored);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.session.grid().width(), 10);
    }

    #[test]
    fn save_then_load_resumes() {
        let file = scratch("resume.json");
        let mut session = Session::new(8, 12, ShapeCycle::new(&[Shape::S, Shape::J]));
        while session.nudge(1, true) != Nudge::Locked {}
        session.nudge(1, false);
        file.save(&session).unwrap();
        assert!(!file.tmp_path().exists());

        let loaded = file.load_or_new(10, 20, ShapeCycle::repeat(Shape::O));
        assert!(loaded.restored);
        assert!(loaded.error.is_none());
        assert_eq!(loaded.session.grid(), session.grid());
        assert_eq!(loaded.session.piece(), session.piece());
    }

    #[test]
    fn corrupt_file_falls_back_with_error() {
        let file = scratch("corrupt.json");
        fs::write(file.path(), b"{\"grid\": 12").unwrap();

        let loaded = file.load_or_new(10, 20, ShapeCycle::repeat(Shape::O));
        assert!(!loaded.restored);
        assert_eq!(loaded.session.grid().height(), 20);
        let err = loaded.error.expect("corrupt file should be reported");
        assert!(format!("{:#}", err).contains("malformed state"));
    }

    #[test]
    fn inconsistent_file_falls_back_with_error() {
        let file = scratch("inconsistent.json");
        let json = r#"{"grid":{"width":2,"height":2,"cells":[0]},
            "piece":{"width":2,"height":2,"x":0,"y":0,"matrix":[2,2,2,2]},
            "lines_cleared":1}"#;
        fs::write(file.path(), json).unwrap();

        let loaded = file.load_or_new(4, 4, ShapeCycle::repeat(Shape::O));
        assert!(!loaded.restored);
        assert!(loaded.error.is_some());
        assert_eq!(loaded.session.lines_cleared(), 0);
    }

    #[test]
    fn out_of_range_values_never_crash() {
        let file = scratch("extreme.json");
        let far = format!(
            r#"{{"grid":{{"width":4,"height":4,"cells":[0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0]}},
            "piece":{{"width":2,"height":2,"x":{},"y":0,"matrix":[2,2,2,2]}},
            "lines_cleared":0}}"#,
            i32::MAX
        );
        fs::write(file.path(), far).unwrap();

        let loaded = file.load_or_new(4, 4, ShapeCycle::repeat(Shape::O));
        assert!(!loaded.restored);
        assert!(format!("{:#}", loaded.error.unwrap()).contains("outside"));
        loaded.session.composite();

        // A maxed-out counter is valid and stays at the maximum.
        let full_row = format!(
            r#"{{"grid":{{"width":4,"height":4,"cells":[0,0,0,0,0,0,0,0,0,0,0,0,1,1,1,1]}},
            "piece":{{"width":2,"height":2,"x":1,"y":0,"matrix":[2,2,2,2]}},
            "lines_cleared":{}}}"#,
            u32::MAX
        );
        fs::write(file.path(), full_row).unwrap();

        let mut loaded = file.load_or_new(4, 4, ShapeCycle::repeat(Shape::O));
        assert!(loaded.restored);
        loaded.session.composite();
        assert_eq!(loaded.session.clear_complete_lines(), 1);
        assert_eq!(loaded.session.lines_cleared(), u32::MAX);
    }
}
