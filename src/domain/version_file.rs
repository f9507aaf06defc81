use crate::error::{BumpError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Relative paths a task is allowed to bump
pub const ALLOWED_BUMP_FILES: [&str; 3] = [
    "browser/config/version.txt",
    "browser/config/version_display.txt",
    "config/milestone.txt",
];

/// A whitelisted version file inside a checkout.
///
/// The recorded version is the last non-empty line that does not start
/// with `#`; anything above it is history or comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpFile {
    relative: String,
    path: PathBuf,
}

impl BumpFile {
    /// Resolve `file` against `repo_root`.
    ///
    /// # Errors
    /// * Task verification error if `file` is not one of [ALLOWED_BUMP_FILES]
    /// * Task verification error if the resolved path does not exist
    pub fn resolve(repo_root: &Path, file: &str) -> Result<Self> {
        if !ALLOWED_BUMP_FILES.contains(&file) {
            return Err(BumpError::task_verification(format!(
                "Specified file to version bump is not in whitelist: {}",
                file
            )));
        }

        let path = repo_root.join(file);
        if !path.exists() {
            return Err(BumpError::task_verification(format!(
                "Specified file is not in repo: {}",
                file
            )));
        }

        Ok(BumpFile {
            relative: file.to_string(),
            path,
        })
    }

    /// Path relative to the checkout, as named by the task
    pub fn relative(&self) -> &str {
        &self.relative
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the version currently recorded in the file
    pub fn read_version(&self) -> Result<String> {
        tracing::info!("Reading {} for version information.", self.path.display());
        let contents = fs::read_to_string(&self.path)?;
        for line in contents.lines() {
            tracing::debug!(" {}", line);
        }
        parse_version_line(&contents).map(str::to_string).ok_or_else(|| {
            BumpError::version(format!(
                "No version line found in {}",
                self.path.display()
            ))
        })
    }

    /// Replace every occurrence of `current` with `new` in the whole file.
    ///
    /// The match is a plain substring match, so `current` appearing in a
    /// comment line is rewritten too.
    ///
    /// # Errors
    /// Returns [BumpError::UnchangedReplace] if the contents would not change.
    pub fn replace_version(&self, current: &str, new: &str) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;
        let new_contents = contents.replace(current, new);
        if new_contents == contents {
            return Err(BumpError::UnchangedReplace {
                path: self.path.clone(),
                version: current.to_string(),
            });
        }
        fs::write(&self.path, new_contents)?;
        Ok(())
    }
}

/// Pick the version line out of a version file's contents
pub fn parse_version_line(contents: &str) -> Option<&str> {
    contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .last()
}
