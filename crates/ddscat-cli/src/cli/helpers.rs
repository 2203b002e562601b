use super::CliError;
use ddscat_core::domain::DdscatError;
use ddscat_core::modules::parfile::Settings;
use ddscat_core::modules::target::Target;
use globset::Glob;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON job description: everything a parameter file encodes except the
/// generation stamp. Settings may be partial; omitted fields take their
/// defaults.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct JobSpec {
    #[serde(default)]
    pub(super) settings: Settings,
    pub(super) target: Target,
}

pub(super) fn load_job_spec(path: &Path) -> Result<JobSpec, CliError> {
    let content = fs::read_to_string(path).map_err(|source| {
        CliError::Core(DdscatError::io_system(
            "IO.JOB_READ",
            format!(
                "failed to read job description '{}': {}",
                path.display(),
                source
            ),
        ))
    })?;

    let spec: JobSpec = serde_json::from_str(&content).map_err(|source| {
        CliError::Core(DdscatError::input_validation(
            "INPUT.JOB_JSON",
            format!("invalid job description '{}': {}", path.display(), source),
        ))
    })?;

    // A mismatched record would serialize fine and then read back as a
    // different record class, so reject it before anything is written.
    let kind = spec.target.kind();
    if let Some(record) = spec
        .settings
        .scat_records
        .iter()
        .find(|record| !record.matches_kind(kind))
    {
        return Err(CliError::Core(DdscatError::input_validation(
            "INPUT.JOB_RECORDS",
            format!(
                "scattering record '{}' does not fit a {} target ('{}')",
                record,
                kind,
                spec.target.directive()
            ),
        )));
    }

    Ok(spec)
}

pub(super) fn discover_folders(root: &Path, pattern: &str) -> Result<Vec<String>, CliError> {
    let matcher = Glob::new(pattern)
        .map_err(|source| {
            CliError::Core(DdscatError::input_validation(
                "INPUT.BATCH_GLOB",
                format!("invalid folder glob '{}': {}", pattern, source),
            ))
        })?
        .compile_matcher();

    let scan_error = |source: std::io::Error| {
        CliError::Core(DdscatError::io_system(
            "IO.BATCH_SCAN",
            format!("failed to scan '{}': {}", root.display(), source),
        ))
    };

    let mut folders = Vec::new();
    for entry in fs::read_dir(root).map_err(scan_error)? {
        let entry = entry.map_err(scan_error)?;
        let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_dir && matcher.is_match(&name) {
            folders.push(name);
        }
    }
    folders.sort();
    Ok(folders)
}
