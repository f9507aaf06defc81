use crate::error::Result;
use git2::{Repository as Git2Repo, Signature};
use std::path::Path;

/// Commits version bumps using the `git2` crate
#[derive(Debug, Clone, Default)]
pub struct Git2Repository {
    author: Option<(String, String)>,
}

impl Git2Repository {
    /// Create a repository collaborator that signs with the checkout's own
    /// `user.name` / `user.email`
    pub fn new() -> Self {
        Git2Repository { author: None }
    }

    /// Sign commits with an explicit author instead of the checkout's identity
    pub fn with_author(name: impl Into<String>, email: impl Into<String>) -> Self {
        Git2Repository {
            author: Some((name.into(), email.into())),
        }
    }

    fn signature<'r>(&self, repo: &'r Git2Repo) -> Result<Signature<'r>> {
        match &self.author {
            Some((name, email)) => Ok(Signature::now(name, email)?),
            None => Ok(repo.signature()?),
        }
    }
}

impl super::Repository for Git2Repository {
    fn commit(&self, repo_root: &Path, message: &str) -> Result<()> {
        let repo = Git2Repo::open(repo_root)?;

        // Stage modifications to tracked files only, like `commit -a`
        let mut index = repo.index()?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let signature = self.signature(&repo)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        tracing::info!("Committed {} in {}", oid, repo_root.display());

        Ok(())
    }
}
