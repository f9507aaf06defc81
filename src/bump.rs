//! Version bump and bump verification over a checkout

use crate::domain::version::{compare, is_esr, ESR_SUFFIX};
use crate::domain::BumpFile;
use crate::error::{BumpError, Result};
use crate::git::Repository;
use crate::task::BumpRequest;
use std::cmp::Ordering;
use std::path::Path;

/// Message recorded on the commit created after a successful bump
pub const COMMIT_MESSAGE: &str = "Automatic version bump CLOSED TREE NO BUG a=release";

/// What happened to a single file during a bump run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was rewritten from `from` to `to`
    Bumped { from: String, to: String },
    /// The file already records a newer version than the target
    SkippedNewer { current: String },
    /// The file already records the target version
    Unchanged,
}

/// Result of a bump run, one outcome per requested file in request order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BumpReport {
    pub outcomes: Vec<(String, FileOutcome)>,
    pub changed: bool,
}

/// Resolve every requested file before anything is touched
fn resolve_files(repo_root: &Path, request: &BumpRequest) -> Result<Vec<BumpFile>> {
    request
        .files
        .iter()
        .map(|file| BumpFile::resolve(repo_root, file))
        .collect()
}

/// Bump every file named by `request` to its target version.
///
/// Files are handled strictly in request order. A file is skipped when it
/// already records the target or something newer. When a file's current
/// version carries the `esr` suffix and the target does not, the suffix is
/// appended for that file only; the next file starts again from the
/// request's own `next_version`.
///
/// If any file was rewritten, one commit with [COMMIT_MESSAGE] is requested
/// from `repo`.
///
/// # Errors
/// * [BumpError::TaskVerification] if a file is not whitelisted or missing,
///   raised before any file is modified
/// * [BumpError::UnchangedReplace] if the current version text was not found
/// * [BumpError::BumpVerification] if the rewritten file does not read back
///   as the target
///
/// Files rewritten before a failure stay rewritten.
pub fn bump_version<R: Repository + ?Sized>(
    repo: &R,
    repo_root: &Path,
    request: &BumpRequest,
) -> Result<BumpReport> {
    let files = resolve_files(repo_root, request)?;

    let mut report = BumpReport::default();
    let mut next_version = request.next_version.clone();
    // Holds the un-suffixed target while a previous file's esr adjustment is in effect
    let mut restore_version: Option<String> = None;

    for file in &files {
        if let Some(original) = restore_version.as_ref() {
            next_version = original.clone();
        }

        let current = file.read_version()?;
        match compare(&next_version, &current)? {
            Ordering::Less => {
                tracing::warn!(
                    "Version bumping skipped due to conflicting values: \
                     (next version {} is < current version {})",
                    next_version,
                    current
                );
                report.outcomes.push((
                    file.relative().to_string(),
                    FileOutcome::SkippedNewer { current },
                ));
                continue;
            }
            Ordering::Equal => {
                tracing::info!("Version bumping skipped due to unchanged values");
                report
                    .outcomes
                    .push((file.relative().to_string(), FileOutcome::Unchanged));
                continue;
            }
            Ordering::Greater => {}
        }

        if is_esr(&current) && !is_esr(&next_version) {
            restore_version = Some(next_version.clone());
            next_version.push_str(ESR_SUFFIX);
        }

        file.replace_version(&current, &next_version)?;

        let verify_version = file.read_version()?;
        if compare(&verify_version, &next_version)? != Ordering::Equal {
            tracing::error!(
                "Version bump failed! Intended {}, actual: {} in {}",
                next_version,
                verify_version,
                file.path().display()
            );
            return Err(BumpError::BumpVerification {
                intended: next_version,
                actual: verify_version,
                path: file.path().to_path_buf(),
            });
        }

        tracing::info!(
            "Bumped {} from {} to {}",
            file.relative(),
            current,
            next_version
        );
        report.outcomes.push((
            file.relative().to_string(),
            FileOutcome::Bumped {
                from: current,
                to: next_version.clone(),
            },
        ));
        report.changed = true;
    }

    if report.changed {
        repo.commit(repo_root, COMMIT_MESSAGE)?;
    }

    Ok(report)
}

/// Check that every file named by `request` already records `next_version`.
///
/// Nothing is modified and no suffix adjustment applies: the target is
/// compared as given against each file.
///
/// # Errors
/// * [BumpError::TaskVerification] if a file is not whitelisted or missing
/// * [BumpError::BumpVerification] on the first file that differs
pub fn verify_bump(repo_root: &Path, request: &BumpRequest) -> Result<()> {
    let files = resolve_files(repo_root, request)?;
    let next_version = &request.next_version;

    for file in &files {
        let current = file.read_version()?;
        if compare(&current, next_version)? != Ordering::Equal {
            return Err(BumpError::BumpVerification {
                intended: next_version.clone(),
                actual: current,
                path: file.path().to_path_buf(),
            });
        }
        tracing::info!("{} records {}", file.relative(), current);
    }

    Ok(())
}
