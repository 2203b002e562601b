mod commands;
mod helpers;

use clap::Parser;
use ddscat_core::domain::DdscatError;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let core_error = error.as_core_error();
            eprintln!("{}", core_error.diagnostic_line());
            core_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args: Vec<String> = std::iter::once("ddscat-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => dispatch(cli.command),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "ddscat-rs",
    about = "DDSCAT parameter-file and batch-submission tooling"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Write a parameter file from a JSON job description
    Pack(commands::PackArgs),
    /// Parse a parameter file and print the reconstructed job
    Unpack(commands::UnpackArgs),
    /// Verify that a parameter file survives a parse/re-serialize pass
    Check(commands::CheckArgs),
    /// Generate a csh script submitting each run folder via qsub
    Batch(commands::BatchArgs),
}

fn dispatch(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Pack(args) => commands::run_pack(args),
        CliCommand::Unpack(args) => commands::run_unpack(args),
        CliCommand::Check(args) => commands::run_check(args),
        CliCommand::Batch(args) => commands::run_batch(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Core(DdscatError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<DdscatError> for CliError {
    fn from(error: DdscatError) -> Self {
        Self::Core(error)
    }
}

impl CliError {
    fn as_core_error(&self) -> DdscatError {
        match self {
            Self::Usage(message) => {
                DdscatError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Core(error) => error.clone(),
            Self::Internal(error) => DdscatError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}
