use crate::domain::{DdscatError, ParseResult};
use num_complex::Complex64;

/// Render an incident-polarization vector as `(re,im) (re,im) (re,im)`.
pub fn format_complex_vector(vector: &[Complex64; 3]) -> String {
    let components: Vec<String> = vector
        .iter()
        .map(|component| format!("({},{})", component.re, component.im))
        .collect();
    components.join(" ")
}

pub fn parse_complex_vector(text: &str) -> ParseResult<[Complex64; 3]> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let tokens: [&str; 3] = <[&str; 3]>::try_from(tokens.as_slice()).map_err(|_| {
        DdscatError::input_validation(
            "INPUT.POLARIZATION_SHAPE",
            format!("polarization vector expects 3 components, got '{}'", text),
        )
    })?;

    let mut vector = [Complex64::new(0.0, 0.0); 3];
    for (slot, token) in vector.iter_mut().zip(tokens) {
        *slot = parse_component(token)?;
    }
    Ok(vector)
}

fn parse_component(token: &str) -> ParseResult<Complex64> {
    let inner = token
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| component_error(token))?;
    let (re, im) = inner.split_once(',').ok_or_else(|| component_error(token))?;

    let re: f64 = re.trim().parse().map_err(|_| component_error(token))?;
    let im: f64 = im.trim().parse().map_err(|_| component_error(token))?;
    Ok(Complex64::new(re, im))
}

fn component_error(token: &str) -> DdscatError {
    DdscatError::input_validation(
        "INPUT.POLARIZATION_FIELD",
        format!("expected complex component '(re,im)', got '{}'", token),
    )
}

#[cfg(test)]
mod tests {
    use super::{format_complex_vector, parse_complex_vector};
    use num_complex::Complex64;

    #[test]
    fn complex_vector_round_trips_through_text() {
        let vector = [
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, -0.5),
        ];

        let text = format_complex_vector(&vector);
        assert_eq!(text, "(0,0) (1,0) (0,-0.5)");
        assert_eq!(parse_complex_vector(&text).expect("should parse"), vector);
    }

    #[test]
    fn malformed_components_are_rejected() {
        let error = parse_complex_vector("(0,0) (1,0)").expect_err("two components");
        assert_eq!(error.code(), "INPUT.POLARIZATION_SHAPE");

        let error = parse_complex_vector("(0,0) (1,0) 0.5").expect_err("bare scalar");
        assert_eq!(error.code(), "INPUT.POLARIZATION_FIELD");

        let error = parse_complex_vector("(0,0) (1,0) (a,b)").expect_err("non-numeric");
        assert_eq!(error.code(), "INPUT.POLARIZATION_FIELD");
    }
}
