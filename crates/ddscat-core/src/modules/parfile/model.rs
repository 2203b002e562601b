use crate::common::ranges::{LinRange, RangeSpacing, ScatRecord, WaveRange};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Run settings for one simulation, one field per parameter-file entry.
/// Field names keep the upstream parameter names. Defaults reproduce the
/// conventional starting configuration for an isolated target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cmdtrq: bool,
    pub cmdsol: String,
    pub cmdfft: String,
    pub calpha: String,
    pub cbinflag: String,
    pub initial_malloc: [i64; 3],
    pub nrfld: bool,
    pub nrfld_ext: [f64; 6],
    pub tol: f64,
    pub mxiter: i64,
    pub gamma: f64,
    pub etasca: f64,
    pub wavelengths: WaveRange,
    pub nambient: f64,
    pub epol: [Complex64; 3],
    pub iorth: bool,
    pub iwrksc: bool,
    pub beta: LinRange,
    pub theta: LinRange,
    pub phi: LinRange,
    pub first_i: [i64; 3],
    pub s_indices: Vec<i64>,
    pub cmdfrm: String,
    pub scat_records: Vec<ScatRecord>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cmdtrq: false,
            cmdsol: "PBCGS2".to_string(),
            cmdfft: "GPFAFT".to_string(),
            calpha: "GKDLDR".to_string(),
            cbinflag: "NOTBIN".to_string(),
            initial_malloc: [100, 100, 100],
            nrfld: false,
            nrfld_ext: [0.0; 6],
            tol: 1.0e-5,
            mxiter: 600,
            gamma: 5.0e-3,
            etasca: 0.5,
            wavelengths: WaveRange::new(0.35, 0.8, 10, RangeSpacing::Lin),
            nambient: 1.0,
            epol: [
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
            ],
            iorth: true,
            iwrksc: true,
            beta: LinRange::new(0.0, 0.0, 1),
            theta: LinRange::new(0.0, 0.0, 1),
            phi: LinRange::new(0.0, 0.0, 1),
            first_i: [0, 0, 0],
            s_indices: vec![11, 12, 21, 22, 31, 41],
            cmdfrm: "LFRAME".to_string(),
            scat_records: vec![
                ScatRecord::Plane {
                    phi: 0.0,
                    theta_min: 0.0,
                    theta_max: 180.0,
                    dtheta: 5.0,
                },
                ScatRecord::Plane {
                    phi: 90.0,
                    theta_min: 0.0,
                    theta_max: 180.0,
                    dtheta: 5.0,
                },
            ],
        }
    }
}
