use super::CliError;
use super::helpers::{JobSpec, discover_folders, load_job_spec};
use ddscat_core::domain::DdscatError;
use ddscat_core::modules::batch::write_qsub_batch;
use ddscat_core::modules::parfile::{
    PAR_FILE_NAME, build_par_file_with_stamp, parse_par_file, read_par_file, write_par_file,
};
use ddscat_core::modules::serialization::normalize_newlines;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(clap::Args)]
pub(super) struct PackArgs {
    /// JSON job description (settings and target)
    job: PathBuf,

    /// Output parameter file
    #[arg(short, long, default_value = PAR_FILE_NAME)]
    output: PathBuf,
}

pub(super) fn run_pack(args: PackArgs) -> Result<i32, CliError> {
    let spec = load_job_spec(&args.job)?;
    write_par_file(&args.output, &spec.settings, &spec.target)?;
    info!(
        output = %args.output.display(),
        directive = spec.target.directive(),
        "wrote parameter file"
    );
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct UnpackArgs {
    /// Parameter file to parse
    par: PathBuf,

    /// Print the reconstructed job as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

pub(super) fn run_unpack(args: UnpackArgs) -> Result<i32, CliError> {
    let job = read_par_file(&args.par)?;
    info!(par = %args.par.display(), "parsed parameter file");

    if args.json {
        let spec = JobSpec {
            settings: job.settings,
            target: job.target,
        };
        let rendered = serde_json::to_string_pretty(&spec).map_err(anyhow::Error::from)?;
        println!("{rendered}");
        return Ok(0);
    }

    let shape: Vec<String> = job.target.shape().iter().map(i64::to_string).collect();
    println!("folder      : {}", job.folder.display());
    println!(
        "target      : {} ({})",
        job.target.directive(),
        job.target.kind()
    );
    println!("shape       : {}", shape.join(" "));
    println!("materials   : {}", job.target.materials().len());
    println!("wavelengths : {}", job.settings.wavelengths);
    println!(
        "rotations   : beta {} / theta {} / phi {}",
        job.settings.beta, job.settings.theta, job.settings.phi
    );
    println!("records     : {}", job.settings.scat_records.len());
    Ok(0)
}

#[derive(clap::Args)]
pub(super) struct CheckArgs {
    /// Parameter file to verify
    par: PathBuf,
}

pub(super) fn run_check(args: CheckArgs) -> Result<i32, CliError> {
    let content = fs::read_to_string(&args.par).map_err(|source| {
        CliError::Core(DdscatError::io_system(
            "IO.PAR_READ",
            format!(
                "failed to read parameter file '{}': {}",
                args.par.display(),
                source
            ),
        ))
    })?;
    let folder = args.par.parent().map(Path::to_path_buf).unwrap_or_default();
    let job = parse_par_file(folder, &content)?;
    let replay = build_par_file_with_stamp(&job.settings, &job.target, "check");

    let original = normalize_newlines(&content);
    if strip_stamp(&original) == strip_stamp(&replay) {
        info!(par = %args.par.display(), "parameter file round-trips cleanly");
        println!("Round trip: CLEAN");
        return Ok(0);
    }

    let line = first_divergence(strip_stamp(&original), strip_stamp(&replay));
    Err(CliError::Core(DdscatError::input_validation(
        "INPUT.PAR_ROUNDTRIP",
        format!(
            "parameter file '{}' drifts from its canonical form at line {}",
            args.par.display(),
            line
        ),
    )))
}

// The stamp line carries the generation time and is excluded from the
// comparison.
fn strip_stamp(content: &str) -> &str {
    content.split_once('\n').map_or(content, |(_, rest)| rest)
}

fn first_divergence(original: &str, replay: &str) -> usize {
    original
        .lines()
        .zip(replay.lines())
        .position(|(left, right)| left != right)
        .unwrap_or_else(|| original.lines().count().min(replay.lines().count()))
        + 2
}

#[derive(clap::Args)]
pub(super) struct BatchArgs {
    /// Run folders relative to the base path
    folders: Vec<String>,

    /// Output script path
    #[arg(short, long)]
    output: PathBuf,

    /// Absolute base path on the submission host (forward slashes)
    #[arg(long)]
    base: String,

    /// Also include folders under --root whose names match this glob
    #[arg(long)]
    glob: Option<String>,

    /// Directory scanned with --glob
    #[arg(long, default_value = ".", requires = "glob")]
    root: PathBuf,
}

pub(super) fn run_batch(args: BatchArgs) -> Result<i32, CliError> {
    let mut folders = args.folders;
    if let Some(pattern) = &args.glob {
        folders.extend(discover_folders(&args.root, pattern)?);
    }
    if folders.is_empty() {
        return Err(CliError::Core(DdscatError::input_validation(
            "INPUT.BATCH_EMPTY",
            "no run folders given; pass folders or --glob",
        )));
    }

    write_qsub_batch(&args.output, &args.base, &folders)?;
    info!(
        script = %args.output.display(),
        folders = folders.len(),
        "wrote batch script"
    );
    Ok(0)
}
