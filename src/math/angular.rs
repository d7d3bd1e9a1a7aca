use std::f64::consts::PI;

/// Simplistic transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. No sanity check: Sign taken from degree-component,
/// minutes forced to unsigned by u16 type, but passing a negative value for
/// seconds leads to undefined behaviour.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    d.signum() as f64 * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

/// Degrees-with-decimals from a string in the `DD:MM:SS.sss` or
/// `DD:MM.mmm` formats, or a plain decimal number. A leading minus
/// sign applies to the whole angle, so "-0:30" is -0.5.
pub fn parse_sexagesimal(text: &str) -> Option<f64> {
    let text = text.trim();
    let (sign, body) = match text.strip_prefix('-') {
        Some(rest) => (-1., rest),
        None => (1., text.strip_prefix('+').unwrap_or(text)),
    };

    let mut value = 0.;
    let mut unit = 1.;
    let mut parts = 0;
    for part in body.split(':') {
        parts += 1;
        if parts > 3 {
            return None;
        }
        let v = part.parse::<f64>().ok()?;
        if v < 0. || (parts > 1 && v >= 60.) {
            return None;
        }
        value += v / unit;
        unit *= 60.;
    }
    Some(sign * value)
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    let angle = (angle + PI) % (2.0 * PI);
    angle - PI * angle.signum()
}

/// Normalize a longitude to [-π, π], leaving values already
/// in that interval untouched (so π stays π). Values within
/// rounding distance of ±π are snapped to ±π.
pub fn normalize_longitude(lon: f64) -> f64 {
    if lon.abs() <= PI + 1e-12 {
        return lon.clamp(-PI, PI);
    }
    normalize_symmetric(lon)
}

// ----- Tests ---------------------------------------------------------------------
