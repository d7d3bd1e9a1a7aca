//! Web Mercator: the spherical Mercator of web map tiles, on a sphere
//! with the WGS84 semimajor axis as radius.
use super::*;
use std::f64::consts::FRAC_PI_4;

/// Latitude limit, in degrees
const MAX_LAT: f64 = 88.;

#[derive(Debug, Clone)]
pub struct WebMercator {
    ellps: Ellipsoid,
    interpolate: bool,
}

impl Default for WebMercator {
    fn default() -> Self {
        WebMercator::new()
    }
}

impl WebMercator {
    #[must_use]
    pub fn new() -> WebMercator {
        WebMercator {
            ellps: Ellipsoid::WEBMERC,
            interpolate: true,
        }
    }
}

impl Projection for WebMercator {
    fn name(&self) -> &'static str {
        "webmerc"
    }

    // ----- F O R W A R D -----------------------------------------------------------------

    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error> {
        let (lon, lat) = check_geographic("webmerc", geo)?;
        if geo.lat.abs() > MAX_LAT {
            return Err(Error::OutOfDomain("webmerc", format!("|lat| > 88: {geo}")));
        }
        let a = self.ellps.semimajor_axis();

        let easting = lon * a;
        let northing = a * (FRAC_PI_4 + lat / 2.0).tan().ln();
        finite_projected("webmerc", easting, northing)
    }

    // ----- I N V E R S E -----------------------------------------------------------------

    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error> {
        check_projected("webmerc", projected)?;
        let a = self.ellps.semimajor_axis();

        let longitude = projected.easting / a;
        let latitude = FRAC_PI_2 - 2.0 * (-projected.northing / a).exp().atan();

        // Not normalized: easting beyond the antimeridian is out of domain
        let geo = GeoPoint::from_radians(longitude, latitude);
        if geo.lon.abs() > 180. + 1e-9 || geo.lat.abs() > MAX_LAT + 1e-9 {
            return Err(Error::OutOfDomain("webmerc", format!("{projected}")));
        }
        finite_geo("webmerc", longitude, latitude)
    }

    fn description(&self) -> String {
        format!(
            "Web Mercator, sphere R={} m, |lat| <= {MAX_LAT}",
            self.ellps.semimajor_axis()
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
pub const GAMUT: [OpParameter; 1] = [
    OpParameter::Flag { key: "inv" },
];

pub fn new(_params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    Ok(Box::new(WebMercator::new()))
}

// ----- T E S T S ---------------------------------------------------------------------
