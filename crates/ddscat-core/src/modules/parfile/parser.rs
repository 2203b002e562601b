use super::SimulationJob;
use super::model::Settings;
use crate::common::polarization::parse_complex_vector;
use crate::common::ranges::{LinRange, ScatRecord, WaveRange};
use crate::domain::{DdscatError, ParseResult};
use crate::modules::target::Target;
use std::path::PathBuf;

/// Strip one raw line down to its payload: truncate at the first `=` or
/// `!` (whichever comes first), remove quote characters, trim whitespace.
/// Inline annotations after `=` and comments after `!` disappear here, so
/// the rest of the reader only ever sees bare values.
pub fn clean_par_line(raw: &str) -> String {
    let cut = match raw.find(['=', '!']) {
        Some(index) => &raw[..index],
        None => raw,
    };
    cut.replace(['\'', '"'], "").trim().to_string()
}

/// Reconstruct a run from parameter-file text. Fields are consumed in
/// stream order through named steps; the target block is read before the
/// scattered-direction records because its class picks their record format.
pub fn parse_par_file(folder: impl Into<PathBuf>, content: &str) -> ParseResult<SimulationJob> {
    let mut cursor = LineCursor::new(content);

    cursor.take("generator stamp")?;
    cursor.take("preliminaries header")?;
    let cmdtrq = cursor.take("torque flag")? == "DOTORQ";
    let cmdsol = cursor.take("solution method")?;
    let cmdfft = cursor.take("fft method")?;
    let calpha = cursor.take("polarizability method")?;
    let cbinflag = cursor.take("binary output flag")?;

    cursor.take("memory allocation header")?;
    let initial_malloc = fixed_row(
        parse_i64_row(&cursor.take("memory allocation triple")?, "memory allocation triple")?,
        "memory allocation triple",
    )?;

    cursor.take("target header")?;
    let directive = cursor.take("target directive")?;
    let shape = parse_i64_row(
        &cursor.take("target shape parameters")?,
        "target shape parameters",
    )?;
    let material_count = parse_count(&cursor.take("material count")?, "material count")?;
    let mut materials = Vec::with_capacity(material_count);
    for _ in 0..material_count {
        materials.push(cursor.take("material file")?);
    }
    let target = Target::new(directive, shape, materials)?;

    cursor.take("nearfield header")?;
    let nrfld = parse_i64_field(&cursor.take("nearfield flag")?, "nearfield flag")? != 0;
    let nrfld_ext = fixed_row(
        parse_f64_row(&cursor.take("nearfield extension")?, "nearfield extension")?,
        "nearfield extension",
    )?;

    cursor.take("error tolerance header")?;
    let tol = parse_f64_field(&cursor.take("error tolerance")?, "error tolerance")?;

    cursor.take("iteration limit header")?;
    let mxiter = parse_i64_field(&cursor.take("iteration limit")?, "iteration limit")?;

    cursor.take("interaction cutoff header")?;
    let gamma = parse_f64_field(&cursor.take("interaction cutoff")?, "interaction cutoff")?;

    cursor.take("angular resolution header")?;
    let etasca = parse_f64_field(&cursor.take("angular resolution")?, "angular resolution")?;

    cursor.take("wavelength header")?;
    let wavelengths: WaveRange = cursor.take("wavelength range")?.parse()?;

    cursor.take("ambient index header")?;
    let nambient = parse_f64_field(
        &cursor.take("ambient refractive index")?,
        "ambient refractive index",
    )?;

    // Derived from the target on write; validated here, never stored.
    cursor.take("effective radius header")?;
    let _aeff: WaveRange = cursor.take("effective radius range")?.parse()?;

    cursor.take("polarization header")?;
    let epol = parse_complex_vector(&cursor.take("incident polarization")?)?;
    let iorth = parse_i64_field(
        &cursor.take("orthogonal polarization count")?,
        "orthogonal polarization count",
    )? == 2;

    cursor.take("output selection header")?;
    let iwrksc =
        parse_i64_field(&cursor.take("output selection flag")?, "output selection flag")? != 0;

    cursor.take("rotations header")?;
    let beta: LinRange = cursor.take("beta rotation range")?.parse()?;
    let theta: LinRange = cursor.take("theta rotation range")?.parse()?;
    let phi: LinRange = cursor.take("phi rotation range")?.parse()?;

    cursor.take("first index header")?;
    let first_i = fixed_row(
        parse_index_row(&cursor.take("first index triple")?, "first index triple")?,
        "first index triple",
    )?;

    cursor.take("s-matrix header")?;
    let index_count = parse_count(&cursor.take("s-matrix index count")?, "s-matrix index count")?;
    let s_indices = parse_i64_row(&cursor.take("s-matrix index row")?, "s-matrix index row")?;
    if s_indices.len() != index_count {
        return Err(DdscatError::input_validation(
            "INPUT.PAR_COUNT",
            format!(
                "declared {} s-matrix indices but the row holds {}",
                index_count,
                s_indices.len()
            ),
        ));
    }

    cursor.take("scattered directions header")?;
    let cmdfrm = cursor.take("scattering frame")?;
    let record_count = parse_count(
        &cursor.take("scattering record count")?,
        "scattering record count",
    )?;
    let mut scat_records = Vec::with_capacity(record_count);
    for _ in 0..record_count {
        let line = cursor.take("scattering record")?;
        scat_records.push(ScatRecord::parse_for_kind(target.kind(), &line)?);
    }

    let settings = Settings {
        cmdtrq,
        cmdsol,
        cmdfft,
        calpha,
        cbinflag,
        initial_malloc,
        nrfld,
        nrfld_ext,
        tol,
        mxiter,
        gamma,
        etasca,
        wavelengths,
        nambient,
        epol,
        iorth,
        iwrksc,
        beta,
        theta,
        phi,
        first_i,
        s_indices,
        cmdfrm,
        scat_records,
    };

    Ok(SimulationJob::new(folder, settings, target))
}

struct LineCursor {
    lines: Vec<String>,
    position: usize,
}

impl LineCursor {
    fn new(content: &str) -> Self {
        Self {
            lines: content.lines().map(clean_par_line).collect(),
            position: 0,
        }
    }

    fn take(&mut self, what: &'static str) -> ParseResult<String> {
        let line = self.lines.get(self.position).cloned().ok_or_else(|| {
            DdscatError::input_validation(
                "INPUT.PAR_EOF",
                format!(
                    "parameter file ended before {} (line {})",
                    what,
                    self.position + 1
                ),
            )
        })?;
        self.position += 1;
        Ok(line)
    }
}

fn parse_i64_field(text: &str, what: &'static str) -> ParseResult<i64> {
    text.trim().parse::<i64>().map_err(|_| {
        DdscatError::input_validation(
            "INPUT.PAR_FIELD",
            format!("{}: expected integer, got '{}'", what, text),
        )
    })
}

fn parse_f64_field(text: &str, what: &'static str) -> ParseResult<f64> {
    text.trim().parse::<f64>().map_err(|_| {
        DdscatError::input_validation(
            "INPUT.PAR_FIELD",
            format!("{}: expected number, got '{}'", what, text),
        )
    })
}

fn parse_count(text: &str, what: &'static str) -> ParseResult<usize> {
    let value = parse_i64_field(text, what)?;
    usize::try_from(value).map_err(|_| {
        DdscatError::input_validation(
            "INPUT.PAR_FIELD",
            format!("{}: expected non-negative count, got {}", what, value),
        )
    })
}

fn parse_i64_row(text: &str, what: &'static str) -> ParseResult<Vec<i64>> {
    text.split_whitespace()
        .map(|token| parse_i64_field(token, what))
        .collect()
}

fn parse_f64_row(text: &str, what: &'static str) -> ParseResult<Vec<f64>> {
    text.split_whitespace()
        .map(|token| parse_f64_field(token, what))
        .collect()
}

/// Index triples appear both comma- and space-separated in the wild.
fn parse_index_row(text: &str, what: &'static str) -> ParseResult<Vec<i64>> {
    text.split(|character: char| character == ',' || character.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| parse_i64_field(token, what))
        .collect()
}

fn fixed_row<T, const N: usize>(values: Vec<T>, what: &'static str) -> ParseResult<[T; N]> {
    let found = values.len();
    <[T; N]>::try_from(values).map_err(|_| {
        DdscatError::input_validation(
            "INPUT.PAR_SHAPE",
            format!("{} expects {} values, got {}", what, N, found),
        )
    })
}
