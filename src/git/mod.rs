//! Repository collaborator abstraction
//!
//! The bump engine only ever asks the version-control layer for one thing:
//! commit whatever it changed in the checkout. That request goes through
//! the [Repository] trait so the engine can be driven against a real
//! checkout or a recording mock.
//!
//! - [repository::Git2Repository]: commits with the `git2` crate
//! - [mock::MockRepository]: records commit requests for tests
//!
//! ```rust
//! # use treebump::git::Repository;
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> treebump::Result<()> {
//! repo.commit(Path::new("/builds/checkout"), "Automatic version bump")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// Version-control operations the bump engine depends on
///
/// All implementors must be `Send + Sync`. Implementations map their
/// backend errors into [crate::error::BumpError].
pub trait Repository: Send + Sync {
    /// Commit all tracked modifications in the checkout at `repo_root`
    ///
    /// # Arguments
    /// * `repo_root` - Root directory of the checkout
    /// * `message` - Commit message to record
    ///
    /// # Returns
    /// * `Ok(())` - The commit was created
    /// * `Err` - If the checkout cannot be opened or the commit fails
    fn commit(&self, repo_root: &Path, message: &str) -> Result<()>;
}
