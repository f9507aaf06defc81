use crate::error::{BumpError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A commit request captured by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub repo_root: PathBuf,
    pub message: String,
}

/// Mock repository for testing without actual git operations
#[derive(Default)]
pub struct MockRepository {
    commits: Mutex<Vec<CommitRequest>>,
    fail_with: Option<String>,
}

impl MockRepository {
    /// Create a mock that accepts every commit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose commits fail with the given git error message
    pub fn failing(message: impl Into<String>) -> Self {
        MockRepository {
            commits: Mutex::new(Vec::new()),
            fail_with: Some(message.into()),
        }
    }

    /// Commit requests received so far, oldest first
    pub fn commits(&self) -> Vec<CommitRequest> {
        match self.commits.lock() {
            Ok(commits) => commits.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Repository for MockRepository {
    fn commit(&self, repo_root: &Path, message: &str) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(BumpError::Git(git2::Error::from_str(reason)));
        }

        let request = CommitRequest {
            repo_root: repo_root.to_path_buf(),
            message: message.to_string(),
        };
        match self.commits.lock() {
            Ok(mut commits) => commits.push(request),
            Err(poisoned) => poisoned.into_inner().push(request),
        }
        Ok(())
    }
}
