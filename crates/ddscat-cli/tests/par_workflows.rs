use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const JOB_JSON: &str = r#"
{
  "target": {
    "directive": "RCTGLPRSM",
    "shape": [8, 6, 4],
    "materials": ["diel/Au_evap"]
  }
}
"#;

fn run_cli(args: &[&str], current_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ddscat-rs"))
        .args(args)
        .current_dir(current_dir)
        .output()
        .expect("binary should launch")
}

#[test]
fn pack_unpack_and_check_complete_a_round_trip() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(temp.path().join("job.json"), JOB_JSON).expect("job description");

    let output = run_cli(&["pack", "job.json", "--output", "ddscat.par"], temp.path());
    assert!(
        output.status.success(),
        "pack should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let par = fs::read_to_string(temp.path().join("ddscat.par")).expect("parameter file");
    assert!(par.contains("**** Preliminaries ****"));
    assert!(par.contains("RCTGLPRSM"));
    assert!(par.contains("diel/Au_evap"));

    let output = run_cli(&["unpack", "ddscat.par"], temp.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("RCTGLPRSM"), "summary names the directive");
    assert!(stdout.contains("ISOLATED"), "summary names the target class");

    let output = run_cli(&["unpack", "ddscat.par", "--json"], temp.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"directive\": \"RCTGLPRSM\""));
    assert!(stdout.contains("\"cmdsol\": \"PBCGS2\""));

    let output = run_cli(&["check", "ddscat.par"], temp.path());
    assert!(
        output.status.success(),
        "freshly packed file should check clean, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Round trip: CLEAN"));
}

#[test]
fn check_reports_drift_in_a_hand_edited_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(temp.path().join("job.json"), JOB_JSON).expect("job description");
    let output = run_cli(&["pack", "job.json", "--output", "ddscat.par"], temp.path());
    assert!(output.status.success());

    // Semantically identical but not in canonical spelling.
    let par_path = temp.path().join("ddscat.par");
    let par = fs::read_to_string(&par_path).expect("parameter file");
    let edited = par.replace("0.35 0.8 10 'LIN'", "0.35  0.80 10 'LIN'");
    assert_ne!(par, edited);
    fs::write(&par_path, edited).expect("edited file");

    let output = run_cli(&["check", "ddscat.par"], temp.path());
    assert_eq!(
        output.status.code(),
        Some(2),
        "drift should map to the input-validation exit code"
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.PAR_ROUNDTRIP"));
}

#[test]
fn pack_rejects_unknown_directives() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("job.json"),
        r#"{ "target": { "directive": "MOEBIUS", "shape": [1, 2, 3] } }"#,
    )
    .expect("job description");

    let output = run_cli(&["pack", "job.json"], temp.path());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized target directive"), "stderr: {stderr}");
}

#[test]
fn pack_rejects_records_that_do_not_fit_the_target_class() {
    let temp = TempDir::new().expect("tempdir should be created");
    fs::write(
        temp.path().join("job.json"),
        r#"
        {
          "settings": {
            "scat_records": [{ "OrderGrid": { "order_m": 0, "order_n": 0 } }]
          },
          "target": {
            "directive": "RCTGLPRSM",
            "shape": [8, 6, 4],
            "materials": ["diel/Au_evap"]
          }
        }
        "#,
    )
    .expect("job description");

    let output = run_cli(&["pack", "job.json"], temp.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.JOB_RECORDS"));
}

#[test]
fn unpack_maps_missing_files_to_the_io_exit_code() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_cli(&["unpack", "absent.par"], temp.path());
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("IO.PAR_READ"));
}

#[test]
fn batch_emits_normalized_submission_lines() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_cli(
        &[
            "batch",
            "--output",
            "submit_all.csh",
            "--base",
            "/srv/sims",
            "run1",
            "./run2/",
        ],
        temp.path(),
    );
    assert!(
        output.status.success(),
        "batch should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let script = fs::read_to_string(temp.path().join("submit_all.csh")).expect("script");
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
fn batch_discovers_run_folders_with_a_glob() {
    let temp = TempDir::new().expect("tempdir should be created");
    for folder in ["run1", "run2", "reference"] {
        fs::create_dir(temp.path().join(folder)).expect("run folder");
    }

    let output = run_cli(
        &[
            "batch",
            "--output",
            "submit_all.csh",
            "--base",
            "/srv/sims",
            "--glob",
            "run*",
        ],
        temp.path(),
    );
    assert!(
        output.status.success(),
        "batch should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let script = fs::read_to_string(temp.path().join("submit_all.csh")).expect("script");
    assert!(script.contains("/srv/sims/run1 "));
    assert!(script.contains("/srv/sims/run2 "));
    assert!(!script.contains("reference"));
}

#[test]
fn batch_requires_at_least_one_folder() {
    let temp = TempDir::new().expect("tempdir should be created");

    let output = run_cli(
        &["batch", "--output", "submit_all.csh", "--base", "/srv/sims"],
        temp.path(),
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT.BATCH_EMPTY"));
}
