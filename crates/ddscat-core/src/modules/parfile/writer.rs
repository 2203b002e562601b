use super::model::Settings;
use crate::common::polarization::format_complex_vector;
use crate::common::ranges::WaveRange;
use crate::modules::target::Target;
use chrono::Local;

/// Serialize a run into parameter-file text, stamped with the current
/// local time.
pub fn build_par_file(settings: &Settings, target: &Target) -> String {
    let stamp = Local::now().format("%a %b %e %H:%M:%S %Y").to_string();
    build_par_file_with_stamp(settings, target, &stamp)
}

/// Deterministic serializer. The section-header strings and line order are
/// fixed by the consuming tool; the headers are cosmetic on read but the
/// positions are not.
pub fn build_par_file_with_stamp(settings: &Settings, target: &Target, stamp: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("===Generated by ddscat-rs ({stamp})===\n"));

    out.push_str("**** Preliminaries ****\n");
    out.push_str(if settings.cmdtrq {
        "DOTORQ\n"
    } else {
        "NOTORQ\n"
    });
    out.push_str(&format!("{}\n", settings.cmdsol));
    out.push_str(&format!("{}\n", settings.cmdfft));
    out.push_str(&format!("{}\n", settings.calpha));
    out.push_str(&format!("{}\n", settings.cbinflag));

    out.push_str("**** Initial Memory Allocation ****\n");
    out.push_str(&format!("{}\n", join_i64(&settings.initial_malloc)));

    out.push_str(&target.section());

    out.push_str("**** Additional Nearfield calculation? ****\n");
    out.push_str(if settings.nrfld { "1\n" } else { "0\n" });
    out.push_str(&format!("{}\n", join_f64(&settings.nrfld_ext)));

    out.push_str("**** Error Tolerance ****\n");
    out.push_str(&format!("{}\n", settings.tol));

    out.push_str("**** maximum number of iterations allowed ****\n");
    out.push_str(&format!("{}\n", settings.mxiter));

    out.push_str("**** Interaction cutoff parameter for PBC calculations ****\n");
    out.push_str(&format!("{}\n", settings.gamma));

    out.push_str("**** Angular resolution for calculation of <cos>, etc. ****\n");
    out.push_str(&format!("{}\n", settings.etasca));

    out.push_str("**** Vacuum wavelengths (micron) ****\n");
    out.push_str(&format!("{}\n", settings.wavelengths));

    out.push_str("**** Refractive index of ambient medium\n");
    out.push_str(&format!("{}\n", settings.nambient));

    out.push_str("**** Effective Radii (micron) **** \n");
    out.push_str(&format!("{}\n", WaveRange::single(target.aeff())));

    out.push_str("**** Define Incident Polarizations ****\n");
    out.push_str(&format!("{}\n", format_complex_vector(&settings.epol)));
    out.push_str(if settings.iorth { "2\n" } else { "1\n" });

    out.push_str("**** Specify which output files to write ****\n");
    out.push_str(if settings.iwrksc { "1\n" } else { "0\n" });

    out.push_str("**** Prescribe Target Rotations ****\n");
    out.push_str(&format!(
        "{}  = BETAMI, BETAMX, NBETA (beta=rotation around a1)\n",
        settings.beta
    ));
    out.push_str(&format!(
        "{}  = THETMI, THETMX, NTHETA (theta=angle between a1 and k)\n",
        settings.theta
    ));
    out.push_str(&format!(
        "{}  = PHIMIN, PHIMAX, NPHI (phi=rotation angle of a1 around k)\n",
        settings.phi
    ));

    out.push_str("**** Specify first IWAV, IRAD, IORI (normally 0 0 0) ****\n");
    out.push_str(&format!("{}\n", join_i64(&settings.first_i)));

    out.push_str("**** Select Elements of S_ij Matrix to Print ****\n");
    out.push_str(&format!("{}\n", settings.s_indices.len()));
    for index in &settings.s_indices {
        out.push_str(&format!("{index} "));
    }
    out.push('\n');

    out.push_str("**** Specify Scattered Directions ****\n");
    out.push_str(&format!("{}\n", settings.cmdfrm));
    out.push_str(&format!("{}\n", settings.scat_records.len()));
    for record in &settings.scat_records {
        out.push_str(&format!("{record}\n"));
    }
    out.push('\n');

    out
}

fn join_i64(values: &[i64]) -> String {
    let rendered: Vec<String> = values.iter().map(i64::to_string).collect();
    rendered.join(" ")
}

fn join_f64(values: &[f64]) -> String {
    let rendered: Vec<String> = values.iter().map(f64::to_string).collect();
    rendered.join(" ")
}

#[cfg(test)]
mod tests {
    use super::build_par_file_with_stamp;
    use crate::modules::parfile::Settings;
    use crate::modules::target::Target;

    fn block_target() -> Target {
        Target::new(
            "RCTGLPRSM",
            vec![8, 6, 4],
            vec!["diel/Au_evap".to_string()],
        )
        .expect("target")
    }

    #[test]
    fn torque_flag_serializes_as_literal_keywords() {
        let mut settings = Settings::default();
        let target = block_target();

        let text = build_par_file_with_stamp(&settings, &target, "stamp");
        assert!(text.contains("\nNOTORQ\n"));

        settings.cmdtrq = true;
        let text = build_par_file_with_stamp(&settings, &target, "stamp");
        assert!(text.contains("\nDOTORQ\n"));
    }

    #[test]
    fn orthogonal_polarization_flag_serializes_as_count() {
        let mut settings = Settings::default();
        let target = block_target();

        let text = build_par_file_with_stamp(&settings, &target, "stamp");
        assert!(text.contains("(0,0) (1,0) (0,0)\n2\n"));

        settings.iorth = false;
        let text = build_par_file_with_stamp(&settings, &target, "stamp");
        assert!(text.contains("(0,0) (1,0) (0,0)\n1\n"));
    }

    #[test]
    fn layout_starts_with_stamp_and_preliminaries() {
        let text = build_par_file_with_stamp(&Settings::default(), &block_target(), "Mon Jan  1");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "===Generated by ddscat-rs (Mon Jan  1)===");
        assert_eq!(lines[1], "**** Preliminaries ****");
        assert_eq!(lines[2], "NOTORQ");
        assert_eq!(lines[3], "PBCGS2");
        assert_eq!(lines[4], "GPFAFT");
        assert_eq!(lines[5], "GKDLDR");
        assert_eq!(lines[6], "NOTBIN");
        assert_eq!(lines[7], "**** Initial Memory Allocation ****");
        assert_eq!(lines[8], "100 100 100");
        assert_eq!(lines[9], "**** Target Geometry and Composition ****");
    }
}
