// tests/bump_test.rs
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use treebump::git::MockRepository;
use treebump::task::load_task;
use treebump::{bump_version, verify_bump, BumpError, BumpRequest, FileOutcome, COMMIT_MESSAGE};

const VERSION_TXT: &str = "browser/config/version.txt";
const DISPLAY_TXT: &str = "browser/config/version_display.txt";
const MILESTONE_TXT: &str = "config/milestone.txt";

// Helper to lay out a checkout with the given version files
fn setup_checkout(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    for (file, contents) in files {
        let path = temp_dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).expect("Could not create dirs");
        fs::write(&path, contents).expect("Could not write version file");
    }
    temp_dir
}

fn write_task(dir: &Path, next_version: &str, files: &[&str]) -> std::path::PathBuf {
    let task = serde_json::json!({
        "dependencies": [],
        "scopes": ["project:releng:treescript:action:version_bump"],
        "payload": {
            "version_bump_info": {
                "next_version": next_version,
                "files": files,
            }
        }
    });
    let path = dir.join("task.json");
    fs::write(&path, serde_json::to_string_pretty(&task).unwrap()).unwrap();
    path
}

#[test]
fn test_release_bump_then_verify() {
    let checkout = setup_checkout(&[
        (VERSION_TXT, "59.0\n"),
        (DISPLAY_TXT, "59.0b14\n"),
        (
            MILESTONE_TXT,
            "# Holds the current milestone.\n# Should be in the format of\n#\n#    x.x\n#    x.x[{a,b}x]\n\n59.0\n",
        ),
    ]);
    let task_dir = TempDir::new().unwrap();
    let task_path = write_task(
        task_dir.path(),
        "60.0",
        &[VERSION_TXT, DISPLAY_TXT, MILESTONE_TXT],
    );
    let request = load_task(&task_path).unwrap();
    let repo = MockRepository::new();

    let report = bump_version(&repo, checkout.path(), &request).unwrap();

    assert!(report.changed);
    assert_eq!(report.outcomes.len(), 3);
    assert!(report
        .outcomes
        .iter()
        .all(|(_, outcome)| matches!(outcome, FileOutcome::Bumped { .. })));
    assert!(fs::read_to_string(checkout.path().join(MILESTONE_TXT))
        .unwrap()
        .ends_with("\n60.0\n"));
    assert_eq!(repo.commits().len(), 1);
    assert_eq!(repo.commits()[0].message, COMMIT_MESSAGE);

    verify_bump(checkout.path(), &request).unwrap();
}

#[test]
fn test_esr_release_bump() {
    let checkout = setup_checkout(&[
        (VERSION_TXT, "52.8.0esr\n"),
        (DISPLAY_TXT, "52.8.0esr\n"),
        (MILESTONE_TXT, "52.8.0\n"),
    ]);
    let request = BumpRequest::new("52.9.0", &[VERSION_TXT, DISPLAY_TXT, MILESTONE_TXT]);
    let repo = MockRepository::new();

    bump_version(&repo, checkout.path(), &request).unwrap();

    let read = |file: &str| fs::read_to_string(checkout.path().join(file)).unwrap();
    assert_eq!(read(VERSION_TXT), "52.9.0esr\n");
    assert_eq!(read(DISPLAY_TXT), "52.9.0esr\n");
    assert_eq!(read(MILESTONE_TXT), "52.9.0\n");

    // The esr files no longer equal the nominal target, the milestone does
    assert!(verify_bump(checkout.path(), &BumpRequest::new("52.9.0", &[MILESTONE_TXT])).is_ok());
    let err = verify_bump(checkout.path(), &request).unwrap_err();
    assert!(matches!(err, BumpError::BumpVerification { .. }));
}

#[test]
fn test_second_run_reports_no_change() {
    let checkout = setup_checkout(&[(VERSION_TXT, "59.0\n"), (MILESTONE_TXT, "59.0\n")]);
    let request = BumpRequest::new("60.0", &[VERSION_TXT, MILESTONE_TXT]);
    let repo = MockRepository::new();

    assert!(bump_version(&repo, checkout.path(), &request).unwrap().changed);
    let second = bump_version(&repo, checkout.path(), &request).unwrap();

    assert!(!second.changed);
    assert_eq!(repo.commits().len(), 1);
}

#[test]
fn test_whitelist_violation_for_both_operations() {
    let checkout = setup_checkout(&[(VERSION_TXT, "59.0\n"), ("version.txt", "59.0\n")]);
    let request = BumpRequest::new("60.0", &[VERSION_TXT, "version.txt"]);
    let repo = MockRepository::new();

    let bump_err = bump_version(&repo, checkout.path(), &request).unwrap_err();
    let verify_err = verify_bump(checkout.path(), &request).unwrap_err();

    assert!(matches!(bump_err, BumpError::TaskVerification(_)));
    assert!(matches!(verify_err, BumpError::TaskVerification(_)));
    assert_eq!(bump_err.exit_code(), 3);
    assert_eq!(
        fs::read_to_string(checkout.path().join(VERSION_TXT)).unwrap(),
        "59.0\n"
    );
}

#[test]
fn test_verify_failure_exit_code() {
    let checkout = setup_checkout(&[(MILESTONE_TXT, "59.0\n")]);
    let err = verify_bump(checkout.path(), &BumpRequest::new("60.0", &[MILESTONE_TXT])).unwrap_err();
    assert_eq!(err.exit_code(), 5);
}
