//! Transverse Mercator, following the series of
//! [Ordnance Survey (2020)](crate::Bibliography::Os20), appendix C
use super::utm::{Hemisphere, UtmZone};
use super::*;

const EPS10: f64 = 1e-10;
const NAME: &str = "tmerc";

/// Largest accepted distance from the central meridian, in degrees. The
/// series round trips to better than 3e-4° out to here, at any latitude.
const MAX_OFFSET: f64 = 18.;

/// Transverse Mercator on a given central meridian.
///
/// The series expansions in the longitude difference, *P*, are accurate
/// to the millimetre within a few degrees of the central meridian, and
/// degrade further out. Points more than 18° from the central meridian
/// are out of domain.
#[derive(Debug, Clone)]
pub struct Tmerc {
    ellps: Ellipsoid,
    lon_0: f64,
    lat_0: f64,
    k_0: f64,
    x_0: f64,
    y_0: f64,
    interpolate: bool,
}

impl Tmerc {
    pub fn new(
        lon_0: f64,
        lat_0: f64,
        k_0: f64,
        x_0: f64,
        y_0: f64,
        ellps: Ellipsoid,
    ) -> Result<Tmerc, Error> {
        if ![lon_0, lat_0, k_0, x_0, y_0].iter().all(|v| v.is_finite()) {
            error!("Tmerc: non-finite parameter");
            return Err(Error::Invalid("Tmerc", "all parameters must be finite"));
        }
        if lat_0.abs() > 90. || lon_0.abs() > 180. {
            return Err(Error::Invalid("Tmerc", "origin outside the geographic domain"));
        }
        if k_0 <= 0. {
            return Err(Error::Invalid("Tmerc", "k_0 must be positive"));
        }
        Ok(Tmerc {
            ellps,
            lon_0,
            lat_0,
            k_0,
            x_0,
            y_0,
            interpolate: true,
        })
    }

    /// The Universal Transverse Mercator projection of a given zone
    pub fn utm(zone: usize, hemisphere: Hemisphere, ellps: Ellipsoid) -> Result<Tmerc, Error> {
        if !(1..=60).contains(&zone) {
            error!("UTM: zone {zone} not in 1..=60");
            return Err(Error::Invalid("Utm", "zone must be in 1..=60"));
        }
        let lon_0 = -183. + 6. * zone as f64;
        let y_0 = match hemisphere {
            Hemisphere::North => 0.,
            Hemisphere::South => 10_000_000.,
        };
        Tmerc::new(lon_0, 0., 0.9996, 500_000., y_0, ellps)
    }

    /// The WGS84 UTM projection of the zone containing `geo`
    pub fn utm_for(geo: GeoPoint) -> Result<Tmerc, Error> {
        let zone = UtmZone::from_geo(geo)?;
        if zone.letter == 'Z' {
            return Err(Error::OutOfDomain("Utm", format!("polar point: {geo}")));
        }
        Tmerc::utm(zone.number, zone.hemisphere(), Ellipsoid::WGS84)
    }

    /// The central meridian, in degrees
    #[must_use]
    pub fn central_meridian(&self) -> f64 {
        self.lon_0
    }

    /// Radii of curvature, scaled by k0, and their ratio less one: (ν, ρ, η²)
    fn curvatures(&self, sinphi: f64) -> (f64, f64, f64) {
        let es = self.ellps.eccentricity_squared();
        let ak0 = self.ellps.semimajor_axis() * self.k_0;
        let w = 1. - es * sinphi * sinphi;
        let nu = ak0 / w.sqrt();
        let rho = ak0 * (1. - es) / (w * w.sqrt());
        (nu, rho, nu / rho - 1.)
    }
}

impl Projection for Tmerc {
    fn name(&self) -> &'static str {
        NAME
    }

    // ----- F O R W A R D -----------------------------------------------------------------

    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error> {
        let (lon, phi) = check_geographic(NAME, geo)?;
        let p = normalize_longitude(lon - self.lon_0.to_radians());
        if p.abs() > MAX_OFFSET.to_radians() {
            return Err(Error::OutOfDomain(
                NAME,
                format!("more than {MAX_OFFSET}° off the central meridian: {geo}"),
            ));
        }

        let (s, c) = phi.sin_cos();
        let (nu, rho, eta2) = self.curvatures(s);
        let t2 = if c.abs() < EPS10 { 0. } else { (s / c) * (s / c) };
        let t4 = t2 * t2;
        let c3 = c * c * c;
        let c5 = c3 * c * c;

        let m = self.ellps.meridional_arc(phi, self.lat_0.to_radians(), self.k_0);

        let i = m + self.y_0;
        let ii = nu / 2. * s * c;
        let iii = nu / 24. * s * c3 * (5. - t2 + 9. * eta2);
        let iiia = nu / 720. * s * c5 * (61. - 58. * t2 + t4);
        let iv = nu * c;
        let v = nu / 6. * c3 * (nu / rho - t2);
        let vi = nu / 120. * c5 * (5. - 18. * t2 + t4 + 14. * eta2 - 58. * t2 * eta2);

        let p2 = p * p;
        let northing = i + p2 * (ii + p2 * (iii + p2 * iiia));
        let easting = self.x_0 + p * (iv + p2 * (v + p2 * vi));
        finite_projected(NAME, easting, northing)
    }

    // ----- I N V E R S E -----------------------------------------------------------------

    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error> {
        check_projected(NAME, projected)?;
        let lon_0 = self.lon_0.to_radians();
        let lat_0 = self.lat_0.to_radians();

        let arc = projected.northing - self.y_0;
        let phi = self.ellps.footpoint_latitude(arc, lat_0, self.k_0)?;
        if (phi.abs() - FRAC_PI_2).abs() < EPS10 {
            return finite_geo(NAME, lon_0, phi.clamp(-FRAC_PI_2, FRAC_PI_2));
        }
        if phi.abs() > FRAC_PI_2 {
            return Err(Error::OutOfDomain(NAME, format!("beyond the pole: {projected}")));
        }

        let (s, c) = phi.sin_cos();
        let (nu, rho, eta2) = self.curvatures(s);
        let t = s / c;
        let t2 = t * t;
        let t4 = t2 * t2;
        let sec = 1. / c;
        let nu3 = nu * nu * nu;
        let nu5 = nu3 * nu * nu;
        let nu7 = nu5 * nu * nu;

        let vii = t / (2. * rho * nu);
        let viii = t / (24. * rho * nu3) * (5. + 3. * t2 + eta2 - 9. * t2 * eta2);
        let ix = t / (720. * rho * nu5) * (61. + 90. * t2 + 45. * t4);
        let x = sec / nu;
        let xi = sec / (6. * nu3) * (nu / rho + 2. * t2);
        let xii = sec / (120. * nu5) * (5. + 28. * t2 + 24. * t4);
        let xiia = sec / (5040. * nu7) * (61. + 662. * t2 + 1320. * t4 + 720. * t4 * t2);

        let e = projected.easting - self.x_0;
        let e2 = e * e;
        let lat = phi - e2 * (vii - e2 * (viii - e2 * ix));
        let lon = lon_0 + e * (x - e2 * (xi - e2 * (xii - e2 * xiia)));
        finite_geo(NAME, lon, lat)
    }

    fn description(&self) -> String {
        format!(
            "Transverse Mercator, ellps={} lon_0={} lat_0={} k_0={} x_0={} y_0={}",
            self.ellps, self.lon_0, self.lat_0, self.k_0, self.x_0, self.y_0
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
pub const GAMUT: [OpParameter; 7] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    let tmerc = Tmerc::new(
        params.real("lon_0")?,
        params.real("lat_0")?,
        params.real("k_0")?,
        params.real("x_0")?,
        params.real("y_0")?,
        params.ellps()?,
    )?;
    Ok(Box::new(tmerc))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angular::dms_to_dd;
    use crate::op::Operator;
    use crate::Direction::*;
    use float_eq::assert_float_eq;

    #[test]
    fn utm() -> Result<(), Error> {
        let utm32 = Tmerc::utm(32, Hemisphere::North, Ellipsoid::GRS80)?;
        assert_eq!(utm32.central_meridian(), 9.);

        // Validation value from PROJ:
        // echo 12 55 0 0 | cct -d18 +proj=utm +zone=32
        let geo = GeoPoint::new(12., 55.);
        let xy = utm32.to_projected(geo)?;
        assert_float_eq!(xy.easting, 691_875.632_139_661, abs <= 1e-4);
        assert_float_eq!(xy.northing, 6_098_907.825_005_012, abs <= 1e-4);

        let back = utm32.to_geographic(xy)?;
        assert_float_eq!(back.lon, 12., abs <= 1e-8);
        assert_float_eq!(back.lat, 55., abs <= 1e-8);

        // Southern hemisphere
        let utm33s = Tmerc::utm(33, Hemisphere::South, Ellipsoid::GRS80)?;
        let geo = GeoPoint::new(18.4, -33.9);
        let xy = utm33s.to_projected(geo)?;
        assert!(xy.northing > 6_000_000. && xy.northing < 10_000_000.);
        let back = utm33s.to_geographic(xy)?;
        assert_float_eq!(back.lon, 18.4, abs <= 1e-7);
        assert_float_eq!(back.lat, -33.9, abs <= 1e-7);

        assert!(matches!(
            Tmerc::utm(61, Hemisphere::North, Ellipsoid::GRS80),
            Err(Error::Invalid(..))
        ));
        assert!(Tmerc::utm(0, Hemisphere::South, Ellipsoid::GRS80).is_err());
        Ok(())
    }

    #[test]
    fn ordnance_survey() -> Result<(), Error> {
        // The worked example of OS (2020), appendix C: National Grid on Airy 1830
        let os = Tmerc::new(-2., 49., 0.999_601_271_7, 400_000., -100_000., Ellipsoid::AIRY)?;
        let geo = GeoPoint::new(dms_to_dd(1, 43, 4.5177), dms_to_dd(52, 39, 27.2531));
        let xy = os.to_projected(geo)?;
        assert_float_eq!(xy.easting, 651_409.903, abs <= 1e-3);
        assert_float_eq!(xy.northing, 313_177.270, abs <= 1e-3);

        let back = os.to_geographic(xy)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-8);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-8);
        Ok(())
    }

    #[test]
    fn domain() -> Result<(), Error> {
        let utm32 = Tmerc::utm(32, Hemisphere::North, Ellipsoid::WGS84)?;

        // The poles map to the central meridian
        let north = utm32.to_projected(GeoPoint::new(9., 90.))?;
        assert_float_eq!(north.easting, 500_000., abs <= 1e-6);
        let back = utm32.to_geographic(north)?;
        assert_float_eq!(back.lat, 90., abs <= 1e-9);

        assert!(matches!(
            utm32.to_projected(GeoPoint::new(-100., 10.)),
            Err(Error::OutOfDomain(..))
        ));

        // Just inside the series limit, the round trip holds at all latitudes
        for lat in [-80., -30., 0., 30., 60., 84.] {
            let geo = GeoPoint::new(9. + 17.9, lat);
            let back = utm32.to_geographic(utm32.to_projected(geo)?)?;
            assert_float_eq!(back.lon, geo.lon, abs <= 1e-3);
            assert_float_eq!(back.lat, geo.lat, abs <= 1e-3);
        }

        // Just outside, points are out of domain
        for lon in [9. + 18.1, 9. - 18.1, 39., 54.] {
            assert!(matches!(
                utm32.to_projected(GeoPoint::new(lon, 30.)),
                Err(Error::OutOfDomain(..))
            ));
        }
        assert!(utm32.to_projected(GeoPoint::new(9., 90.5)).is_err());
        assert!(utm32.to_geographic(ProjectedPoint::new(5e5, 2e7)).is_err());
        Ok(())
    }

    #[test]
    fn automatic_zone() -> Result<(), Error> {
        let geo = GeoPoint::new(7., 60.);
        let utm = Tmerc::utm_for(geo)?;
        assert_eq!(utm.central_meridian(), 9.);
        let back = utm.to_geographic(utm.to_projected(geo)?)?;
        assert_float_eq!(back.lon, 7., abs <= 1e-8);
        assert_float_eq!(back.lat, 60., abs <= 1e-8);

        assert!(Tmerc::utm_for(GeoPoint::new(7., 85.)).is_err());
        Ok(())
    }

    #[test]
    fn definitions() -> Result<(), Error> {
        let op = Operator::new("tmerc lon_0=9 k_0=0.9996 x_0=500000")?;
        let mut data = [Coor2D::gis(12., 55.)];
        assert_eq!(op.apply(&mut data, Fwd), 1);
        assert_float_eq!(data[0][0], 691_875.632, abs <= 1e-3);
        assert_float_eq!(data[0][1], 6_098_907.825, abs <= 1e-3);

        assert!(matches!(
            Operator::new("tmerc k_0=0"),
            Err(Error::Invalid(..))
        ));
        Ok(())
    }
}
