use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Parameters recorded next to a check report.
pub struct Payload {
    pub params: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self { params }
    }
}

/// Write `<report>.provenance.json` with the git commit, callsite, params and the report path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(report: P, payload: Payload) -> Result<PathBuf> {
    let report = report.as_ref();
    let path = sidecar_path(report);
    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": [report.to_string_lossy()]
    });
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(report: &Path) -> PathBuf {
    let mut name = report
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("report"));
    name.push(".provenance.json");
    report.with_file_name(name)
}

/// Commit id from `GIT_COMMIT` (build time, then run time) or `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_report() {
        let derived = sidecar_path(Path::new("/tmp/out/check.json"));
        assert_eq!(derived, Path::new("/tmp/out/check.provenance.json"));
    }

    #[test]
    fn write_sidecar_records_report_and_params() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("r.json");
        fs::write(&report, "{}").unwrap();
        let path = write_sidecar(&report, Payload::new(json!({"input": "a.json"}))).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], report.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["input"], "a.json");
    }
}
