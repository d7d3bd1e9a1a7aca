//! Albers Equal Area Conic, and a table of regional presets
use super::*;
use crate::math::ancillary::{msfn, phi_from_q, qs};

const EPS10: f64 = 1e-10;
const NAME: &str = "aea";

/// Albers Equal Area Conic, following [Snyder (1987)](crate::Bibliography::Sny87),
/// eqs. 14-1 to 14-21.
#[derive(Debug, Clone)]
pub struct Aea {
    ellps: Ellipsoid,
    params: ConicParameters,
    lon_0: f64,
    n: f64,
    c: f64,
    rho0: f64,
    interpolate: bool,
}

impl Aea {
    pub fn new(params: ConicParameters, ellps: Ellipsoid) -> Result<Aea, Error> {
        params.validate("Aea")?;

        let e = ellps.eccentricity();
        let es = ellps.eccentricity_squared();
        let phi1 = params.lat_1.to_radians();
        let phi2 = params.lat_2.to_radians();
        let phi0 = params.lat_0.to_radians();

        let sc = phi1.sin_cos();
        let m1 = msfn(sc, es);
        let q1 = qs(sc.0, e);

        let n = if params.is_tangent() {
            sc.0
        } else {
            let sc = phi2.sin_cos();
            let m2 = msfn(sc, es);
            let q2 = qs(sc.0, e);
            (m1 * m1 - m2 * m2) / (q2 - q1)
        };
        if n.abs() < EPS10 {
            error!("Aea: degenerate cone for {params:?}");
            return Err(Error::Invalid("Aea", "degenerate cone constant"));
        }

        let c = m1 * m1 + n * q1;
        let rho0 = (c - n * qs(phi0.sin(), e)).max(0.).sqrt() / n;
        if !(c.is_finite() && rho0.is_finite()) {
            error!("Aea: non-finite constants for {params:?}");
            return Err(Error::Invalid("Aea", "non-finite cone constants"));
        }
        debug!("Aea: n={n}, c={c}, rho0={rho0}");

        Ok(Aea {
            ellps,
            params,
            lon_0: params.lon_0.to_radians(),
            n,
            c,
            rho0,
            interpolate: true,
        })
    }

    /// Instantiate one of the [ALBERS_PRESETS] by name
    pub fn preset(name: &str) -> Result<Aea, Error> {
        let preset = AlbersPreset::named(name)?;
        Aea::new(preset.params, preset.ellps)
    }

    /// British Columbia Albers
    pub fn bc() -> Result<Aea, Error> {
        Aea::preset("bc")
    }

    /// The contiguous US and its neighbours, on the 20° and 60° parallels
    pub fn us() -> Result<Aea, Error> {
        Aea::preset("us")
    }

    /// Conterminous US, on the 29.5° and 45.5° parallels
    pub fn continental_us() -> Result<Aea, Error> {
        Aea::preset("conus")
    }

    #[must_use]
    pub fn parameters(&self) -> &ConicParameters {
        &self.params
    }
}

impl Projection for Aea {
    fn name(&self) -> &'static str {
        NAME
    }

    // ----- F O R W A R D -----------------------------------------------------------------

    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error> {
        let (lon, phi) = check_geographic(NAME, geo)?;
        let ak = self.ellps.semimajor_axis() * self.params.k_0;
        let e = self.ellps.eccentricity();

        let q = qs(phi.sin(), e);
        let rho = (self.c - self.n * q).max(0.).sqrt() / self.n;
        let theta = self.n * normalize_longitude(lon - self.lon_0);

        let x = ak * rho * theta.sin() + self.params.x_0;
        let y = ak * (self.rho0 - rho * theta.cos()) + self.params.y_0;
        finite_projected(NAME, x, y)
    }

    // ----- I N V E R S E -----------------------------------------------------------------

    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error> {
        check_projected(NAME, projected)?;
        let ak = self.ellps.semimajor_axis() * self.params.k_0;
        let e = self.ellps.eccentricity();
        let n = self.n;

        let mut x = (projected.easting - self.params.x_0) / ak;
        let mut y = self.rho0 - (projected.northing - self.params.y_0) / ak;
        let mut rho = x.hypot(y);
        if n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let q = (self.c - (rho * n) * (rho * n)) / n;
        let phi = phi_from_q(q, e).map_err(|err| match err {
            Error::OutOfDomain(..) => Error::OutOfDomain(NAME, format!("{projected}")),
            other => other,
        })?;

        let lam = x.atan2(y) / n + self.lon_0;
        finite_geo(NAME, lam, phi)
    }

    fn description(&self) -> String {
        format!("Albers Equal Area Conic, ellps={} {}", self.ellps, self.params)
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

// ----- P R E S E T S -----------------------------------------------------------------

/// A named Albers parameter set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlbersPreset {
    pub name: &'static str,
    pub ellps: Ellipsoid,
    pub params: ConicParameters,
}

impl AlbersPreset {
    pub fn named(name: &str) -> Result<AlbersPreset, Error> {
        let key = name.to_lowercase();
        for preset in ALBERS_PRESETS {
            if preset.name == key {
                return Ok(preset);
            }
        }
        warn!("Unknown Albers preset: {name}");
        Err(Error::NotFound(name.to_string(), ": unknown Albers preset".into()))
    }
}

const fn albers(
    name: &'static str,
    lat_1: f64,
    lat_2: f64,
    lon_0: f64,
    lat_0: f64,
    x_0: f64,
) -> AlbersPreset {
    AlbersPreset {
        name,
        ellps: Ellipsoid::GRS80,
        params: ConicParameters {
            lat_1,
            lat_2,
            lon_0,
            lat_0,
            k_0: 1.,
            x_0,
            y_0: 0.,
        },
    }
}

#[rustfmt::skip]
pub const ALBERS_PRESETS: [AlbersPreset; 3] = [
    //      name     lat_1  lat_2   lon_0   lat_0  x_0
    albers("bc",     50.0,  58.5,  -126.0,  45.0,  1_000_000.),
    albers("us",     20.0,  60.0,   -96.0,  40.0,  0.),
    albers("conus",  29.5,  45.5,   -96.0,  37.5,  0.),
];

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 10] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps",  default: Some("GRS80") },
    OpParameter::Text { key: "preset", default: Some("") },

    OpParameter::Real { key: "lat_1", default: Some(f64::NAN) },
    OpParameter::Real { key: "lat_2", default: Some(f64::NAN) },
    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    let preset = params.text("preset")?;
    if !preset.is_empty() {
        if params.given.contains_key("lat_1") {
            warn!("aea: preset={preset} overrides the explicitly given parameters");
        }
        return Ok(Box::new(Aea::preset(&preset)?));
    }

    let conic = ConicParameters::from_parameters(params)?;
    Ok(Box::new(Aea::new(conic, params.ellps()?)?))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Operator;
    use crate::Direction::*;
    use float_eq::assert_float_eq;

    #[test]
    fn snyder() -> Result<(), Error> {
        // Snyder (1987), pp. 292-294: Clarke 1866, standard parallels
        // 29.5 and 45.5, origin at 23N 96W
        let params = ConicParameters::secant(29.5, 45.5, -96., 23.);
        let aea = Aea::new(params, Ellipsoid::CLARKE_1866)?;
        let geo = GeoPoint::new(-75., 35.);
        let xy = aea.to_projected(geo)?;
        assert_float_eq!(xy.easting, 1_885_472.7, abs <= 0.1);
        assert_float_eq!(xy.northing, 1_535_925.0, abs <= 0.1);

        let back = aea.to_geographic(xy)?;
        assert_float_eq!(back.lon, -75., abs <= 1e-9);
        assert_float_eq!(back.lat, 35., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn presets() -> Result<(), Error> {
        let bc = Aea::bc()?;
        let origin = bc.to_projected(GeoPoint::new(-126., 45.))?;
        assert_float_eq!(origin.easting, 1_000_000., abs <= 1e-6);
        assert_float_eq!(origin.northing, 0., abs <= 1e-6);

        let geo = GeoPoint::new(-165., 65.);
        let xy = bc.to_projected(geo)?;
        assert_float_eq!(xy.easting, -784_570.353, abs <= 1e-3);
        assert_float_eq!(xy.northing, 2_724_491.332, abs <= 1e-3);
        let back = bc.to_geographic(xy)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-9);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-9);

        let us = Aea::us()?;
        let geo = GeoPoint::new(-98., 26.);
        let back = us.to_geographic(us.to_projected(geo)?)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-9);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-9);

        let conus = Aea::continental_us()?;
        assert_eq!(conus.parameters().lat_0, 37.5);
        let xy = conus.to_projected(GeoPoint::new(-77., 39.))?;
        assert_float_eq!(xy.easting, 1_619_396.692, abs <= 1e-3);
        assert_float_eq!(xy.northing, 330_548.346, abs <= 1e-3);

        assert_eq!(AlbersPreset::named("BC")?.params.x_0, 1e6);
        assert!(matches!(AlbersPreset::named("ca"), Err(Error::NotFound(..))));
        Ok(())
    }

    #[test]
    fn southern_and_tangent_cones() -> Result<(), Error> {
        let params = ConicParameters::secant(-18., -36., 132., 0.);
        let aea = Aea::new(params, Ellipsoid::GRS80)?;
        let geo = GeoPoint::new(151., -34.);
        let xy = aea.to_projected(geo)?;
        assert_float_eq!(xy.easting, 1_739_768.832, abs <= 1e-3);
        assert_float_eq!(xy.northing, -3_840_349.419, abs <= 1e-3);
        let back = aea.to_geographic(xy)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-9);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-9);

        // The poles map to points, and back
        let back = aea.to_geographic(aea.to_projected(GeoPoint::new(0., -90.))?)?;
        assert_float_eq!(back.lat, -90., abs <= 1e-6);

        let aea = Aea::new(ConicParameters::tangent(45., 10., 45.), Ellipsoid::GRS80)?;
        let xy = aea.to_projected(GeoPoint::new(12., 50.))?;
        assert_float_eq!(xy.easting, 143_976.481, abs <= 1e-3);
        assert_float_eq!(xy.northing, 556_926.043, abs <= 1e-3);

        // Far outside the disk of the cone
        assert!(aea.to_geographic(ProjectedPoint::new(0., -3e7)).is_err());
        Ok(())
    }

    #[test]
    fn definitions() -> Result<(), Error> {
        let op = Operator::new("aea preset=bc")?;
        let mut data = [Coor2D::gis(-126., 45.)];
        assert_eq!(op.apply(&mut data, Fwd), 1);
        assert_float_eq!(data[0][0], 1e6, abs <= 1e-6);

        let op = Operator::new("aea lat_1=29.5 lat_2=45.5 lat_0=23 lon_0=-96 ellps=clrk66")?;
        let mut data = [Coor2D::gis(-75., 35.)];
        op.apply(&mut data, Fwd);
        assert_float_eq!(data[0][0], 1_885_472.7, abs <= 0.1);

        assert!(matches!(Operator::new("aea preset=foo"), Err(Error::NotFound(..))));
        assert!(matches!(Operator::new("aea"), Err(Error::MissingParam(..))));
        assert!(matches!(
            Operator::new("aea lat_1=20 lat_2=-20"),
            Err(Error::Invalid(..))
        ));
        Ok(())
    }
}
