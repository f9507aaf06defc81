use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// What a version bump task asks for.
///
/// Read from `payload.version_bump_info` of the task definition. The order
/// of `files` is the order they are bumped in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BumpRequest {
    pub next_version: String,
    pub files: Vec<String>,
}

impl BumpRequest {
    pub fn new(next_version: impl Into<String>, files: &[&str]) -> Self {
        BumpRequest {
            next_version: next_version.into(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Extract the bump request from a task definition
    ///
    /// # Errors
    /// Returns a task verification error if `payload.version_bump_info` is
    /// missing or malformed, names no files, or has an empty `next_version`.
    pub fn from_task(task: &Value) -> Result<Self> {
        let info = task
            .get("payload")
            .and_then(|payload| payload.get("version_bump_info"))
            .ok_or_else(|| {
                BumpError::task_verification("Task payload has no version_bump_info")
            })?;

        let request: BumpRequest = serde_json::from_value(info.clone()).map_err(|e| {
            BumpError::task_verification(format!("Malformed version_bump_info: {}", e))
        })?;

        if request.next_version.trim().is_empty() {
            return Err(BumpError::task_verification(
                "version_bump_info.next_version is empty",
            ));
        }
        if request.files.is_empty() {
            return Err(BumpError::task_verification(
                "version_bump_info.files is empty",
            ));
        }

        Ok(request)
    }
}

/// Load a task definition from a JSON file and extract its bump request
pub fn load_task(path: &Path) -> Result<BumpRequest> {
    let contents = fs::read_to_string(path).map_err(|e| {
        BumpError::task_verification(format!("Cannot read task {}: {}", path.display(), e))
    })?;
    let task: Value = serde_json::from_str(&contents).map_err(|e| {
        BumpError::task_verification(format!(
            "Task file {} is not valid JSON: {}",
            path.display(),
            e
        ))
    })?;
    BumpRequest::from_task(&task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_task() {
        let task = json!({
            "scopes": ["project:releng:treescript:action:version_bump"],
            "payload": {
                "version_bump_info": {
                    "next_version": "60.0",
                    "files": ["browser/config/version.txt", "config/milestone.txt"]
                }
            }
        });

        let request = BumpRequest::from_task(&task).unwrap();
        assert_eq!(request.next_version, "60.0");
        assert_eq!(
            request.files,
            vec!["browser/config/version.txt", "config/milestone.txt"]
        );
    }

    #[test]
    fn test_from_task_missing_info() {
        let task = json!({ "payload": {} });
        let err = BumpRequest::from_task(&task).unwrap_err();
        assert!(matches!(err, BumpError::TaskVerification(_)));
    }

    #[test]
    fn test_from_task_wrong_shape() {
        let task = json!({
            "payload": { "version_bump_info": { "next_version": 60, "files": [] } }
        });
        assert!(matches!(
            BumpRequest::from_task(&task),
            Err(BumpError::TaskVerification(_))
        ));
    }

    #[test]
    fn test_from_task_empty_fields() {
        let no_files = json!({
            "payload": { "version_bump_info": { "next_version": "60.0", "files": [] } }
        });
        assert!(BumpRequest::from_task(&no_files).is_err());

        let no_version = json!({
            "payload": {
                "version_bump_info": { "next_version": "", "files": ["config/milestone.txt"] }
            }
        });
        assert!(BumpRequest::from_task(&no_version).is_err());
    }

    #[test]
    fn test_load_task_missing_file_is_task_verification() {
        let err = load_task(Path::new("/nonexistent/task.json")).unwrap_err();
        assert!(matches!(err, BumpError::TaskVerification(_)));
        assert!(err.to_string().contains("Cannot read task"));
    }

    #[test]
    fn test_new_keeps_file_order() {
        let request = BumpRequest::new("60.0", &["config/milestone.txt", "browser/config/version.txt"]);
        assert_eq!(request.files[0], "config/milestone.txt");
        assert_eq!(request.files[1], "browser/config/version.txt");
    }
}
