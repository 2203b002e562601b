use super::{ISOLATED_DIRECTIVES, PERIODIC_1D_DIRECTIVES, PERIODIC_2D_DIRECTIVES};
use crate::domain::{DdscatError, DdscatResult, TargetKind};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Geometry and composition of the scattering object: a shape directive,
/// its integer shape parameters, and one material file per composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TargetSpec", into = "TargetSpec")]
pub struct Target {
    directive: String,
    shape: Vec<i64>,
    materials: Vec<String>,
    kind: TargetKind,
}

impl Target {
    pub fn new(
        directive: impl Into<String>,
        shape: Vec<i64>,
        materials: Vec<String>,
    ) -> DdscatResult<Self> {
        let directive = directive.into().trim().to_string();
        let kind = kind_for_directive(&directive)?;
        Ok(Self {
            directive,
            shape,
            materials,
            kind,
        })
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn shape(&self) -> &[i64] {
        &self.shape
    }

    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    pub const fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Effective radius in lattice units: the radius of the sphere whose
    /// volume matches the shape's dipole volume. File-based shapes fall back
    /// to treating the leading shape parameters as extents.
    pub fn aeff(&self) -> f64 {
        let volume = match self.directive.as_str() {
            "ELLIPSOID" => PI / 6.0 * self.extent_product(3),
            "CYLINDER1" | "CYLNDRCAP" | "CYLNDRPBC" => {
                let length = self.extent(0);
                let diameter = self.extent(1);
                PI / 4.0 * diameter * diameter * length
            }
            _ => self.extent_product(3),
        };
        (3.0 * volume / (4.0 * PI)).cbrt()
    }

    /// The target's own block of the parameter file, headed by its cosmetic
    /// section marker.
    pub fn section(&self) -> String {
        let mut out = String::new();
        out.push_str("**** Target Geometry and Composition ****\n");
        out.push_str(&self.directive);
        out.push('\n');
        let shape: Vec<String> = self.shape.iter().map(i64::to_string).collect();
        out.push_str(&shape.join(" "));
        out.push('\n');
        out.push_str(&self.materials.len().to_string());
        out.push('\n');
        for material in &self.materials {
            out.push_str(material);
            out.push('\n');
        }
        out
    }

    fn extent(&self, index: usize) -> f64 {
        self.shape
            .get(index)
            .map(|value| value.unsigned_abs() as f64)
            .unwrap_or(1.0)
    }

    fn extent_product(&self, count: usize) -> f64 {
        (0..count).map(|index| self.extent(index)).product()
    }
}

fn kind_for_directive(directive: &str) -> DdscatResult<TargetKind> {
    if ISOLATED_DIRECTIVES.contains(&directive) {
        Ok(TargetKind::Isolated)
    } else if PERIODIC_1D_DIRECTIVES.contains(&directive) {
        Ok(TargetKind::Periodic1d)
    } else if PERIODIC_2D_DIRECTIVES.contains(&directive) {
        Ok(TargetKind::Periodic2d)
    } else {
        Err(DdscatError::input_validation(
            "INPUT.TARGET_DIRECTIVE",
            format!("unrecognized target directive '{}'", directive),
        ))
    }
}

/// Serde surface for [`Target`]: the kind tag is derived state and is not
/// accepted from or written to job descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TargetSpec {
    directive: String,
    #[serde(default)]
    shape: Vec<i64>,
    #[serde(default)]
    materials: Vec<String>,
}

impl TryFrom<TargetSpec> for Target {
    type Error = DdscatError;

    fn try_from(spec: TargetSpec) -> DdscatResult<Self> {
        Target::new(spec.directive, spec.shape, spec.materials)
    }
}

impl From<Target> for TargetSpec {
    fn from(target: Target) -> Self {
        Self {
            directive: target.directive,
            shape: target.shape,
            materials: target.materials,
        }
    }
}
