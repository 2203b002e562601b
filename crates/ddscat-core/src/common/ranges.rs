//! Sweep and scattered-direction value objects with their parameter-file
//! text encodings. Each type round-trips through `Display`/`from_str`.

use crate::domain::{DdscatError, ParseResult, TargetKind};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Tabulation rule for a swept scalar (wavelengths, effective radii).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeSpacing {
    Lin,
    Inv,
    Log,
}

impl RangeSpacing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lin => "LIN",
            Self::Inv => "INV",
            Self::Log => "LOG",
        }
    }

    pub fn from_token(token: &str) -> ParseResult<Self> {
        match token.trim_matches('\'') {
            "LIN" => Ok(Self::Lin),
            "INV" => Ok(Self::Inv),
            "LOG" => Ok(Self::Log),
            other => Err(DdscatError::input_validation(
                "INPUT.RANGE_SPACING",
                format!("unknown range spacing '{}': expected LIN, INV or LOG", other),
            )),
        }
    }
}

impl Display for RangeSpacing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Linear sweep `first last count`, used for the three rotation angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinRange {
    pub first: f64,
    pub last: f64,
    pub count: i64,
}

impl LinRange {
    pub const fn new(first: f64, last: f64, count: i64) -> Self {
        Self { first, last, count }
    }
}

impl Display for LinRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.first, self.last, self.count)
    }
}

impl FromStr for LinRange {
    type Err = DdscatError;

    fn from_str(text: &str) -> ParseResult<Self> {
        let tokens = split_tokens(text);
        let [first, last, count]: [&str; 3] = fixed_tokens(&tokens, text, "rotation range")?;
        Ok(Self {
            first: parse_f64_token(first, "rotation range")?,
            last: parse_f64_token(last, "rotation range")?,
            count: parse_i64_token(count, "rotation range")?,
        })
    }
}

/// Tabulated sweep `first last count 'SPACING'`, used for wavelengths and
/// effective radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveRange {
    pub first: f64,
    pub last: f64,
    pub count: i64,
    pub spacing: RangeSpacing,
}

impl WaveRange {
    pub const fn new(first: f64, last: f64, count: i64, spacing: RangeSpacing) -> Self {
        Self {
            first,
            last,
            count,
            spacing,
        }
    }

    /// One-point range pinned to a single value.
    pub const fn single(value: f64) -> Self {
        Self::new(value, value, 1, RangeSpacing::Lin)
    }
}

impl Display for WaveRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} '{}'",
            self.first, self.last, self.count, self.spacing
        )
    }
}

impl FromStr for WaveRange {
    type Err = DdscatError;

    fn from_str(text: &str) -> ParseResult<Self> {
        let tokens = split_tokens(text);
        let [first, last, count, spacing]: [&str; 4] =
            fixed_tokens(&tokens, text, "tabulated range")?;
        Ok(Self {
            first: parse_f64_token(first, "tabulated range")?,
            last: parse_f64_token(last, "tabulated range")?,
            count: parse_i64_token(count, "tabulated range")?,
            spacing: RangeSpacing::from_token(spacing)?,
        })
    }
}

/// One scattered-direction record. The on-disk text is not self-describing:
/// the same line is read as a different record depending on the target
/// class, so parsing always takes the class as an explicit parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScatRecord {
    /// Scattering plane for an isolated target: `phi theta_min theta_max dtheta`.
    Plane {
        phi: f64,
        theta_min: f64,
        theta_max: f64,
        dtheta: f64,
    },
    /// Diffraction cone for a 1-D periodic target: `order_m zeta_min zeta_max dzeta`.
    OrderLine {
        order_m: i64,
        zeta_min: f64,
        zeta_max: f64,
        dzeta: f64,
    },
    /// Diffraction order pair for a 2-D periodic target: `order_m order_n`.
    OrderGrid { order_m: i64, order_n: i64 },
}

impl ScatRecord {
    pub fn parse_for_kind(kind: TargetKind, text: &str) -> ParseResult<Self> {
        let tokens = split_tokens(text);
        match kind {
            TargetKind::Isolated => {
                let [phi, theta_min, theta_max, dtheta]: [&str; 4] =
                    fixed_tokens(&tokens, text, "scattering plane")?;
                Ok(Self::Plane {
                    phi: parse_f64_token(phi, "scattering plane")?,
                    theta_min: parse_f64_token(theta_min, "scattering plane")?,
                    theta_max: parse_f64_token(theta_max, "scattering plane")?,
                    dtheta: parse_f64_token(dtheta, "scattering plane")?,
                })
            }
            TargetKind::Periodic1d => {
                let [order_m, zeta_min, zeta_max, dzeta]: [&str; 4] =
                    fixed_tokens(&tokens, text, "diffraction cone")?;
                Ok(Self::OrderLine {
                    order_m: parse_i64_token(order_m, "diffraction cone")?,
                    zeta_min: parse_f64_token(zeta_min, "diffraction cone")?,
                    zeta_max: parse_f64_token(zeta_max, "diffraction cone")?,
                    dzeta: parse_f64_token(dzeta, "diffraction cone")?,
                })
            }
            TargetKind::Periodic2d => {
                let [order_m, order_n]: [&str; 2] =
                    fixed_tokens(&tokens, text, "diffraction order pair")?;
                Ok(Self::OrderGrid {
                    order_m: parse_i64_token(order_m, "diffraction order pair")?,
                    order_n: parse_i64_token(order_n, "diffraction order pair")?,
                })
            }
        }
    }

    /// Record class matching a target class. Mixing classes in one settings
    /// object would serialize lines the consuming tool cannot read.
    pub const fn matches_kind(&self, kind: TargetKind) -> bool {
        matches!(
            (self, kind),
            (Self::Plane { .. }, TargetKind::Isolated)
                | (Self::OrderLine { .. }, TargetKind::Periodic1d)
                | (Self::OrderGrid { .. }, TargetKind::Periodic2d)
        )
    }
}

impl Display for ScatRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plane {
                phi,
                theta_min,
                theta_max,
                dtheta,
            } => write!(f, "{} {} {} {}", phi, theta_min, theta_max, dtheta),
            Self::OrderLine {
                order_m,
                zeta_min,
                zeta_max,
                dzeta,
            } => write!(f, "{} {} {} {}", order_m, zeta_min, zeta_max, dzeta),
            Self::OrderGrid { order_m, order_n } => write!(f, "{} {}", order_m, order_n),
        }
    }
}

fn split_tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn fixed_tokens<'a, const N: usize>(
    tokens: &[&'a str],
    text: &str,
    what: &str,
) -> ParseResult<[&'a str; N]> {
    <[&str; N]>::try_from(tokens).map_err(|_| {
        DdscatError::input_validation(
            "INPUT.RANGE_SHAPE",
            format!(
                "{} expects {} fields, got {} in '{}'",
                what,
                N,
                tokens.len(),
                text
            ),
        )
    })
}

fn parse_f64_token(token: &str, what: &str) -> ParseResult<f64> {
    token.parse::<f64>().map_err(|_| {
        DdscatError::input_validation(
            "INPUT.RANGE_FIELD",
            format!("{}: expected number, got '{}'", what, token),
        )
    })
}

fn parse_i64_token(token: &str, what: &str) -> ParseResult<i64> {
    token.parse::<i64>().map_err(|_| {
        DdscatError::input_validation(
            "INPUT.RANGE_FIELD",
            format!("{}: expected integer, got '{}'", what, token),
        )
    })
}
