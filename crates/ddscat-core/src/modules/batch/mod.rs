//! Batch-submission script generation for an SGE-style scheduler: one
//! `qsub` invocation per prepared run folder, collected into a csh script.

use crate::domain::{DdscatError, DdscatResult};
use crate::modules::serialization::{mark_executable, write_text_file};
use std::path::Path;

pub const SUBMIT_SCRIPT_NAME: &str = "submit.sge";

/// Build the script text. `base_folder` is the absolute forward-slash path
/// on the submission host; `folders` are run folders relative to it.
pub fn build_qsub_batch(base_folder: &str, folders: &[String]) -> String {
    let mut out = String::from("#!/bin/csh\n");
    for folder in folders {
        let resolved = posix_normalize(&posix_join(base_folder, &posix_normalize(folder)));
        out.push_str(&format!(
            "qsub -wd {resolved} {resolved}/{SUBMIT_SCRIPT_NAME} \n"
        ));
    }
    out
}

/// Write the script and mark it executable. The permission step is
/// best-effort; the write itself is not.
pub fn write_qsub_batch(path: &Path, base_folder: &str, folders: &[String]) -> DdscatResult<()> {
    write_text_file(path, &build_qsub_batch(base_folder, folders)).map_err(|source| {
        DdscatError::io_system(
            "IO.BATCH_WRITE",
            format!(
                "failed to write batch script '{}': {}",
                path.display(),
                source
            ),
        )
    })?;
    mark_executable(path);
    Ok(())
}

/// Forward-slash join, independent of the local platform's path flavor.
/// Submission paths are resolved on the cluster head node, never locally.
pub fn posix_join(base: &str, tail: &str) -> String {
    if tail.starts_with('/') || base.is_empty() {
        tail.to_string()
    } else if base.ends_with('/') {
        format!("{base}{tail}")
    } else {
        format!("{base}/{tail}")
    }
}

/// Forward-slash normalization: collapse repeated separators and `.`
/// components, resolve `..` without escaping an absolute root. Exactly two
/// leading slashes stay intact (POSIX leaves their meaning to the
/// implementation).
pub fn posix_normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let double_root = path.starts_with("//") && !path.starts_with("///");

    let mut components: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if components.last().is_some_and(|last| *last != "..") {
                    components.pop();
                } else if !absolute {
                    components.push(component);
                }
            }
            other => components.push(other),
        }
    }

    let joined = components.join("/");
    if absolute {
        let root = if double_root { "//" } else { "/" };
        format!("{root}{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::{build_qsub_batch, posix_join, posix_normalize, write_qsub_batch};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn normalization_collapses_dot_and_slash_noise() {
        assert_eq!(posix_normalize("./run2/"), "run2");
        assert_eq!(posix_normalize("a/b/../c"), "a/c");
        assert_eq!(posix_normalize("/srv//sims/."), "/srv/sims");
        assert_eq!(posix_normalize("/../x"), "/x");
        assert_eq!(posix_normalize("../x"), "../x");
        assert_eq!(posix_normalize(""), ".");
        assert_eq!(posix_normalize("//srv/sims"), "//srv/sims");
    }

    #[test]
    fn join_respects_absolute_tails() {
        assert_eq!(posix_join("/srv/sims", "run1"), "/srv/sims/run1");
        assert_eq!(posix_join("/srv/sims/", "run1"), "/srv/sims/run1");
        assert_eq!(posix_join("/srv/sims", "/scratch/run1"), "/scratch/run1");
    }

    #[test]
    fn script_has_one_submission_line_per_folder() {
        let folders = vec!["run1".to_string(), "./run2/".to_string()];
        let script = build_qsub_batch("/srv/sims", &folders);

        let lines: Vec<&str> = script.lines().collect();
        assert_eq!(lines[0], "#!/bin/csh");
        assert_eq!(
            lines[1],
            "qsub -wd /srv/sims/run1 /srv/sims/run1/submit.sge "
        );
        assert_eq!(
            lines[2],
            "qsub -wd /srv/sims/run2 /srv/sims/run2/submit.sge "
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn written_script_is_executable_on_unix() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("submit_all.csh");

        write_qsub_batch(&path, "/srv/sims", &["run1".to_string()]).expect("script write");

        let content = fs::read_to_string(&path).expect("script readable");
        assert!(content.starts_with("#!/bin/csh\n"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("metadata").permissions().mode();
            assert_ne!(mode & 0o111, 0, "executable bits should be set");
        }
    }
}
