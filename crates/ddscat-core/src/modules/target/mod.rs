mod model;

pub use model::Target;

/// Shape directives for isolated finite targets.
pub(crate) const ISOLATED_DIRECTIVES: [&str; 8] = [
    "FROM_FILE",
    "RCTGLPRSM",
    "ELLIPSOID",
    "CYLINDER1",
    "CYLNDRCAP",
    "HEX_PRISM",
    "TETRAHDRN",
    "SPHERES_N",
];

/// Shape directives periodic along one lattice direction.
pub(crate) const PERIODIC_1D_DIRECTIVES: [&str; 3] = ["CYLNDRPBC", "BISLINPBC", "LYRSLBPBC"];

/// Shape directives periodic along two lattice directions.
pub(crate) const PERIODIC_2D_DIRECTIVES: [&str; 7] = [
    "RCTGL_PBC",
    "DSKRCTPBC",
    "DSKBLYPBC",
    "HEXGONPBC",
    "SLBHOLPBC",
    "TRILYRPBC",
    "FRMFILPBC",
];
