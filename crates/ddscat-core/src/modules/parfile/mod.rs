mod model;
mod parser;
mod writer;

pub use model::Settings;
pub use parser::{clean_par_line, parse_par_file};
pub use writer::{build_par_file, build_par_file_with_stamp};

use crate::domain::{DdscatError, DdscatResult};
use crate::modules::serialization::write_text_file;
use crate::modules::target::Target;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const PAR_FILE_NAME: &str = "ddscat.par";

/// A parsed run: the folder it lives in plus its reconstructed settings
/// and target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationJob {
    pub folder: PathBuf,
    pub settings: Settings,
    pub target: Target,
}

impl SimulationJob {
    pub fn new(folder: impl Into<PathBuf>, settings: Settings, target: Target) -> Self {
        Self {
            folder: folder.into(),
            settings,
            target,
        }
    }

    pub fn par_path(&self) -> PathBuf {
        self.folder.join(PAR_FILE_NAME)
    }
}

/// Read and parse a parameter file from disk. The job's folder is the
/// file's parent directory.
pub fn read_par_file(path: &Path) -> DdscatResult<SimulationJob> {
    let content = fs::read_to_string(path).map_err(|source| {
        DdscatError::io_system(
            "IO.PAR_READ",
            format!(
                "failed to read parameter file '{}': {}",
                path.display(),
                source
            ),
        )
    })?;
    let folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
    parse_par_file(folder, &content)
}

pub fn write_par_file(path: &Path, settings: &Settings, target: &Target) -> DdscatResult<()> {
    write_text_file(path, &build_par_file(settings, target)).map_err(|source| {
        DdscatError::io_system(
            "IO.PAR_WRITE",
            format!(
                "failed to write parameter file '{}': {}",
                path.display(),
                source
            ),
        )
    })
}
