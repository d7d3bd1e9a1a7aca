//! Hotine Oblique Mercator (rectified skew orthomorphic), following
//! [IOGP (2019)](crate::Bibliography::Iogp19), section 3.2.4
use super::*;
use std::f64::consts::FRAC_PI_4;

const NAME: &str = "omerc";

/// Where the false origin sits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HotineVariant {
    /// At the natural origin, where the initial line crosses the equator
    /// of the aposphere
    A,
    /// At the projection centre
    #[default]
    B,
}

/// The defining parameters of the Hotine Oblique Mercator, in degrees
/// and metres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OmercParameters {
    pub lat_c: f64,
    pub lon_c: f64,
    /// Azimuth of the initial line, at the projection centre
    pub alpha: f64,
    /// Angle from the rectified grid to the skew grid. NaN means "same as alpha"
    pub gamma_c: f64,
    pub k_c: f64,
    pub x_0: f64,
    pub y_0: f64,
    pub variant: HotineVariant,
}

impl OmercParameters {
    #[must_use]
    pub fn new(lat_c: f64, lon_c: f64, alpha: f64) -> OmercParameters {
        OmercParameters {
            lat_c,
            lon_c,
            alpha,
            gamma_c: f64::NAN,
            k_c: 1.,
            x_0: 0.,
            y_0: 0.,
            variant: HotineVariant::B,
        }
    }

    #[must_use]
    pub fn with_rectified_bearing(mut self, gamma_c: f64) -> OmercParameters {
        self.gamma_c = gamma_c;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, k_c: f64) -> OmercParameters {
        self.k_c = k_c;
        self
    }

    #[must_use]
    pub fn with_false_origin(mut self, x_0: f64, y_0: f64) -> OmercParameters {
        self.x_0 = x_0;
        self.y_0 = y_0;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: HotineVariant) -> OmercParameters {
        self.variant = variant;
        self
    }
}

/// Hotine Oblique Mercator, a.k.a. Rectified Skew Orthomorphic
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Omerc {
    ellps: Ellipsoid,
    params: OmercParameters,
    A: f64,
    B: f64,
    H: f64,
    // Initial line: longitude of the natural origin, and rectified bearing
    lambda_0: f64,
    gamma_0: f64,
    gamma_c: f64,
    // u-offset of the false origin
    u_offset: f64,
    interpolate: bool,
}

impl Omerc {
    #[allow(non_snake_case)]
    pub fn new(params: OmercParameters, ellps: Ellipsoid) -> Result<Omerc, Error> {
        let p = &params;
        let finite = [p.lat_c, p.lon_c, p.alpha, p.k_c, p.x_0, p.y_0];
        if finite.iter().any(|v| !v.is_finite()) || p.gamma_c.is_infinite() {
            error!("Omerc: non-finite parameter in {params:?}");
            return Err(Error::Invalid("Omerc", "all parameters must be finite"));
        }
        if p.lat_c.abs() >= 90. {
            error!("Omerc: projection centre at a pole");
            return Err(Error::Invalid("Omerc", "|latc| must be < 90°"));
        }
        if p.k_c <= 0. {
            return Err(Error::Invalid("Omerc", "k_0 must be positive"));
        }

        let es = ellps.eccentricity_squared();
        let e = ellps.eccentricity();
        let latc = p.lat_c.to_radians();
        let lonc = p.lon_c.to_radians();
        let ninety = p.alpha == 90.;
        let alpha = p.alpha.to_radians();
        let gamma_c = if p.gamma_c.is_nan() {
            alpha
        } else {
            p.gamma_c.to_radians()
        };
        let sign = 1_f64.copysign(latc);

        // A horrible mess of constants. But by-and-large, just a transcription of
        // the material from Guidance Note 7-2.
        let (s, c) = latc.sin_cos();
        let B = (1. + c.powi(4) * ellps.second_eccentricity_squared()).sqrt();
        let A = ellps.semimajor_axis() * B * p.k_c * (1. - es).sqrt() / (1. - es * s * s);
        let t0 = (FRAC_PI_4 - latc / 2.).tan() / ((1. - e * s) / (1. + e * s)).powf(e / 2.);
        let D = B * (1. - es).sqrt() / (c * (1. - es * s * s).sqrt());
        let DD = if D < 1. { 0. } else { (D * D - 1.).sqrt() };
        let F = D + DD * sign;
        let H = F * t0.powf(B);
        let G = (F - 1. / F) / 2.;

        let sin_gamma_0 = alpha.sin() / D;
        if sin_gamma_0.abs() > 1. || (ninety && latc.abs() < 1e-10) {
            error!("Omerc: initial line does not reach the aposphere: {params:?}");
            return Err(Error::Invalid("Omerc", "|sin(alpha) / D| must be < 1"));
        }
        let gamma_0 = sin_gamma_0.asin();

        // For alpha = 90°, G tan(gamma_0) is ±1 analytically, but not numerically
        let lambda_0 = if ninety {
            lonc - FRAC_PI_2 * sign / B
        } else {
            lonc - (G * gamma_0.tan()).clamp(-1., 1.).asin() / B
        };

        // (uc, vc): Intermediate coordinates of the projection center (vc = 0)
        let uc = if ninety {
            A * (lonc - lambda_0)
        } else {
            (A / B) * DD.atan2(alpha.cos()) * sign
        };
        let u_offset = match p.variant {
            HotineVariant::A => 0.,
            HotineVariant::B => uc,
        };

        if ![A, B, H, lambda_0, gamma_0, u_offset].iter().all(|v| v.is_finite()) {
            error!("Omerc: degenerate constants for {params:?}");
            return Err(Error::Invalid("Omerc", "degenerate parameter combination"));
        }
        debug!("Omerc: A={A}, B={B}, H={H}, lambda_0={lambda_0}, gamma_0={gamma_0}, uc={uc}");

        Ok(Omerc {
            ellps,
            params,
            A,
            B,
            H,
            lambda_0,
            gamma_0,
            gamma_c,
            u_offset,
            interpolate: true,
        })
    }

    #[must_use]
    pub fn parameters(&self) -> &OmercParameters {
        &self.params
    }
}

impl Projection for Omerc {
    fn name(&self) -> &'static str {
        NAME
    }

    // ----- F O R W A R D -----------------------------------------------------------------

    #[allow(non_snake_case)]
    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error> {
        let (lon, lat) = check_geographic(NAME, geo)?;
        if (lat.abs() - FRAC_PI_2).abs() < 1e-12 {
            return Err(Error::OutOfDomain(NAME, format!("pole: {geo}")));
        }
        let e = self.ellps.eccentricity();
        let (A, B) = (self.A, self.B);

        let slat = lat.sin();
        let t = (FRAC_PI_4 - lat / 2.).tan() / ((1. - e * slat) / (1. + e * slat)).powf(e / 2.);
        let Q = self.H / t.powf(B);
        let S = (Q - 1. / Q) / 2.;
        let T = (Q + 1. / Q) / 2.;

        let dlon = B * normalize_longitude(lon - self.lambda_0);
        let V = dlon.sin();
        let (s0, c0) = self.gamma_0.sin_cos();
        let U = (S * s0 - V * c0) / T;
        if !(U.abs() < 1.) {
            return Err(Error::OutOfDomain(NAME, format!("on the aposphere pole: {geo}")));
        }

        let v = A * ((1. - U) / (1. + U)).ln() / (2. * B);
        let u = A * (S * c0 + V * s0).atan2(dlon.cos()) / B - self.u_offset;

        let (sc, cc) = self.gamma_c.sin_cos();
        let x = v * cc + u * sc + self.params.x_0;
        let y = u * cc - v * sc + self.params.y_0;
        finite_projected(NAME, x, y)
    }

    // ----- I N V E R S E -----------------------------------------------------------------

    #[allow(non_snake_case)]
    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error> {
        check_projected(NAME, projected)?;
        let es = self.ellps.eccentricity_squared();
        let (A, B) = (self.A, self.B);

        let (sc, cc) = self.gamma_c.sin_cos();
        let (s0, c0) = self.gamma_0.sin_cos();
        let dx = projected.easting - self.params.x_0;
        let dy = projected.northing - self.params.y_0;

        let v = dx * cc - dy * sc;
        let u = dy * cc + dx * sc + self.u_offset;

        let Q = (-B * v / A).exp();
        let S = (Q - 1. / Q) / 2.;
        let T = (Q + 1. / Q) / 2.;
        let V = (B * u / A).sin();
        let U = (V * c0 + S * s0) / T;
        if !(U.abs() < 1.) {
            return Err(Error::OutOfDomain(NAME, format!("on the aposphere pole: {projected}")));
        }
        let t = (self.H / ((1. + U) / (1. - U)).sqrt()).powf(1. / B);
        let chi = FRAC_PI_2 - 2. * t.atan();

        // Fourier coefficients (the outer factor of *es* moved to the summation step)
        let f = [
            (1. / 2. + es * (5. / 24. + es * (1. / 12. + es * 13. / 360.))),
            es * (7. / 48. + es * (29. / 240. + es * 811. / 11520.)),
            es * es * (7. / 120. + es * 81. / 1120.),
            es * es * es * 4279. / 161280.,
        ];

        let sum: f64 = f
            .iter()
            .enumerate()
            .map(|(i, fi)| fi * (2. * (i + 1) as f64 * chi).sin())
            .sum();
        let lat = chi + es * sum;
        let lon = self.lambda_0 - (S * c0 - V * s0).atan2((B * u / A).cos()) / B;
        finite_geo(NAME, lon, lat)
    }

    fn description(&self) -> String {
        let p = &self.params;
        format!(
            "Hotine Oblique Mercator (variant {:?}), ellps={} latc={} lonc={} alpha={} gamma_c={} k_0={} x_0={} y_0={}",
            p.variant,
            self.ellps,
            p.lat_c,
            p.lon_c,
            p.alpha,
            self.gamma_c.to_degrees(),
            p.k_c,
            p.x_0,
            p.y_0
        )
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }

    fn interpolation(&self) -> bool {
        self.interpolate
    }

    fn set_interpolation(&mut self, interpolate: bool) {
        self.interpolate = interpolate;
    }
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 10] = [
    OpParameter::Flag { key: "inv" },

    // Default to Hotine variant B. Set for variant A
    OpParameter::Flag { key: "no_uoff" },

    OpParameter::Text { key: "ellps",  default: Some("GRS80") },

    // Projection center
    OpParameter::Real { key: "latc",  default: None },
    OpParameter::Real { key: "lonc",  default: None },

    // Azimuth of the initial line
    OpParameter::Real { key: "alpha",  default: None },

    // Angle from the rectified grid to the oblique grid
    OpParameter::Real { key: "gamma_c",  default: Some(f64::NAN) },

    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },

    // Scale factor on the initial line
    OpParameter::Real { key: "k_0",    default: Some(1_f64) },
];

pub fn new(params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    let variant = if params.boolean("no_uoff") {
        HotineVariant::A
    } else {
        HotineVariant::B
    };
    let omerc = OmercParameters::new(
        params.real("latc")?,
        params.real("lonc")?,
        params.real("alpha")?,
    )
    .with_rectified_bearing(params.real("gamma_c")?)
    .with_scale(params.real("k_0")?)
    .with_false_origin(params.real("x_0")?, params.real("y_0")?)
    .with_variant(variant);
    Ok(Box::new(Omerc::new(omerc, params.ellps()?)?))
}

// ----- T E S T S ---------------------------------------------------------------------
