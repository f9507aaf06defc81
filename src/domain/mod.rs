//! Domain logic - version rules and version files, independent of git operations

pub mod version;
pub mod version_file;

pub use version::{compare, Discipline, LooseVersion, StrictVersion, ESR_SUFFIX};
pub use version_file::{BumpFile, ALLOWED_BUMP_FILES};
