use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::{HookError, RenderError, Result};
use crate::section::Section;

/// Callback run after a file's bytes have been written.
///
/// Receives the path that was actually written, which may differ from the
/// file's declared path when rendering into a target directory.
pub type FinalizeFn = Arc<dyn Fn(&Path) -> std::result::Result<(), HookError> + Send + Sync>;

/// A file produced by a code generator.
///
/// The declared `path` is the file's logical identity and never changes.
/// The finalize slot holds at most one hook; installing a new hook replaces
/// the previous one.
#[derive(Clone)]
pub struct GeneratedFile {
    path: PathBuf,
    sections: Vec<Section>,
    finalize: Option<FinalizeFn>,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, sections: Vec<Section>) -> Self {
        Self {
            path: path.into(),
            sections,
            finalize: None,
        }
    }

    /// The declared destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Install the finalize hook, replacing any existing one.
    pub fn set_finalize(&mut self, hook: FinalizeFn) {
        self.finalize = Some(hook);
    }

    pub fn finalize(&self) -> Option<&FinalizeFn> {
        self.finalize.as_ref()
    }

    /// Concatenate all sections into the file's final bytes.
    pub fn contents(&self) -> Vec<u8> {
        self.sections
            .iter()
            .flat_map(|s| s.source.as_bytes())
            .copied()
            .collect()
    }

    /// Where this file lands when rendered under `dir`.
    ///
    /// The declared path is always placed inside `dir`: root and prefix
    /// components are dropped, so an absolute declared path becomes a
    /// subpath of the target directory.
    pub fn target_path(&self, dir: &Path) -> PathBuf {
        let relative: PathBuf = self
            .path
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        dir.join(relative)
    }

    /// Write the file under `dir`, then run the finalize hook if one is set.
    ///
    /// Returns the path written. A hook failure is reported after the bytes
    /// are already on disk.
    pub fn render(&self, dir: &Path) -> Result<PathBuf> {
        let target = self.target_path(dir);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| RenderError::Io {
                path: target.clone(),
                source,
            })?;
        }
        fs::write(&target, self.contents()).map_err(|source| RenderError::Io {
            path: target.clone(),
            source,
        })?;
        debug!(declared = %self.path.display(), written = %target.display(), "rendered file");

        if let Some(hook) = &self.finalize {
            hook(target.as_path()).map_err(|source| RenderError::Finalize {
                path: self.path.clone(),
                source,
            })?;
        }
        Ok(target)
    }
}

impl fmt::Debug for GeneratedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedFile")
            .field("path", &self.path)
            .field("sections", &self.sections)
            .field("finalize", &self.finalize.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn hook(
        f: impl Fn(&Path) -> std::result::Result<(), HookError> + Send + Sync + 'static,
    ) -> FinalizeFn {
        Arc::new(f)
    }

    fn sample(path: &str) -> GeneratedFile {
        GeneratedFile::new(
            path,
            vec![Section::header("", "foo"), Section::new("body", "var x = 1\n")],
        )
    }

    #[test]
    fn contents_concatenates_sections() {
        let file = sample("gen/foo.go");
        let text = String::from_utf8(file.contents()).unwrap();
        assert!(text.starts_with("// Code generated by genlock"));
        assert!(text.ends_with("package foo\nvar x = 1\n"));
    }

    #[test]
    fn target_path_nests_absolute_paths() {
        let file = sample("/abs/gen/foo.go");
        assert_eq!(
            file.target_path(Path::new("/out")),
            PathBuf::from("/out/abs/gen/foo.go")
        );
        let file = sample("gen/foo.go");
        assert_eq!(file.target_path(Path::new("/out")), PathBuf::from("/out/gen/foo.go"));
    }

    #[test]
    fn render_writes_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = sample("gen/foo.go");
        let written = file.render(dir.path()).unwrap();
        assert_eq!(written, dir.path().join("gen/foo.go"));
        assert_eq!(fs::read(&written).unwrap(), file.contents());
    }

    #[test]
    fn render_runs_hook_with_written_path() {
        let dir = tempfile::tempdir().unwrap();
        let seen: Arc<Mutex<Vec<PathBuf>>> = Arc::default();
        let mut file = sample("gen/foo.go");
        let sink = Arc::clone(&seen);
        file.set_finalize(hook(move |p| {
            sink.lock().unwrap().push(p.to_path_buf());
            Ok(())
        }));

        let written = file.render(dir.path()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![written]);
    }

    #[test]
    fn hook_error_is_reported_under_declared_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = sample("gen/foo.go");
        file.set_finalize(hook(|_| Err("boom".into())));

        let err = file.render(dir.path()).unwrap_err();
        match err {
            RenderError::Finalize { path, source } => {
                assert_eq!(path, PathBuf::from("gen/foo.go"));
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Bytes are written before the hook runs.
        assert!(dir.path().join("gen/foo.go").is_file());
    }

    #[test]
    fn render_fails_when_target_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gen"), b"not a dir").unwrap();
        let err = sample("gen/foo.go").render(dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn set_finalize_replaces_previous_hook() {
        let mut file = sample("gen/foo.go");
        assert!(file.finalize().is_none());
        file.set_finalize(hook(|_| Err("first".into())));
        file.set_finalize(hook(|_| Ok(())));
        let dir = tempfile::tempdir().unwrap();
        assert!(file.render(dir.path()).is_ok());
        assert!(format!("{file:?}").contains("finalize: true"));
    }
}
