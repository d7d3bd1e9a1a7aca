//! Lambert Conformal Conic
use super::*;
use crate::math::ancillary::{msfn, phi2, ts};

const EPS10: f64 = 1e-10;
const NAME: &str = "lcc";

/// Lambert Conformal Conic, with one (tangent) or two (secant) standard
/// parallels. Follows [Snyder (1987)](crate::Bibliography::Sny87),
/// eqs. 15-1 to 15-11, and the PROJ implementation.
#[derive(Debug, Clone)]
pub struct Lcc {
    ellps: Ellipsoid,
    params: ConicParameters,
    // Precomputed constants, in radians and units of a·k0
    lon_0: f64,
    n: f64,
    c: f64,
    rho0: f64,
    interpolate: bool,
}

impl Lcc {
    /// The general constructor. Coincident standard parallels give the
    /// tangent case.
    pub fn new(params: ConicParameters, ellps: Ellipsoid) -> Result<Lcc, Error> {
        params.validate("Lcc")?;

        let phi1 = params.lat_1.to_radians();
        let phi2 = params.lat_2.to_radians();
        let lat_0 = params.lat_0.to_radians();
        let e = ellps.eccentricity();
        let es = ellps.eccentricity_squared();

        let sc = phi1.sin_cos();
        let mut n = sc.0;

        // Snyder (1987) eq. 14-15
        let m1 = msfn(sc, es);

        // Snyder (1987) eq. 15-9: exp(-𝜓)
        let ml1 = ts(sc, e);

        // Secant case?
        if (phi1 - phi2).abs() >= EPS10 {
            let sc = phi2.sin_cos();
            n = (m1 / msfn(sc, es)).ln();
            let denom = (ml1 / ts(sc, e)).ln();
            if n == 0. || denom == 0. {
                error!("Lcc: degenerate cone for {params:?}");
                return Err(Error::Invalid("Lcc", "degenerate cone constant"));
            }
            n /= denom;
        }

        let c = m1 * ml1.powf(-n) / n;
        let mut rho0 = 0.;
        if (lat_0.abs() - FRAC_PI_2).abs() > EPS10 {
            rho0 = c * ts(lat_0.sin_cos(), e).powf(n);
        }
        if !(n.is_finite() && c.is_finite() && rho0.is_finite()) {
            error!("Lcc: non-finite constants for {params:?}");
            return Err(Error::Invalid("Lcc", "non-finite cone constants"));
        }
        debug!("Lcc: n={n}, c={c}, rho0={rho0}");

        Ok(Lcc {
            ellps,
            params,
            lon_0: params.lon_0.to_radians(),
            n,
            c,
            rho0,
            interpolate: true,
        })
    }

    /// Two standard parallels, natural origin, and false origin
    pub fn secant(
        lat_1: f64,
        lat_2: f64,
        lon_0: f64,
        lat_0: f64,
        x_0: f64,
        y_0: f64,
        ellps: Ellipsoid,
    ) -> Result<Lcc, Error> {
        let params = ConicParameters::secant(lat_1, lat_2, lon_0, lat_0).with_false_origin(x_0, y_0);
        Lcc::new(params, ellps)
    }

    /// One standard parallel and the natural origin, on WGS84
    pub fn tangent(lat_1: f64, lon_0: f64, lat_0: f64) -> Result<Lcc, Error> {
        Lcc::new(ConicParameters::tangent(lat_1, lon_0, lat_0), Ellipsoid::WGS84)
    }

    #[must_use]
    pub fn parameters(&self) -> &ConicParameters {
        &self.params
    }

    /// The cone constant, *n*
    #[must_use]
    pub fn cone_constant(&self) -> f64 {
        self.n
    }
}

impl Projection for Lcc {
    fn name(&self) -> &'static str {
        NAME
    }

    // ----- F O R W A R D -----------------------------------------------------------------

    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error> {
        let (lon, phi) = check_geographic(NAME, geo)?;
        let a = self.ellps.semimajor_axis();
        let e = self.ellps.eccentricity();
        let k_0 = self.params.k_0;

        let lam = normalize_longitude(lon - self.lon_0);
        let mut rho = 0.;

        // Close to one of the poles?
        if (phi.abs() - FRAC_PI_2).abs() < EPS10 {
            if phi * self.n <= 0. {
                return Err(Error::OutOfDomain(NAME, format!("pole opposite the apex: {geo}")));
            }
        } else {
            rho = self.c * ts(phi.sin_cos(), e).powf(self.n);
        }

        let sc = (lam * self.n).sin_cos();
        let x = a * k_0 * rho * sc.0 + self.params.x_0;
        let y = a * k_0 * (self.rho0 - rho * sc.1) + self.params.y_0;
        finite_projected(NAME, x, y)
    }

    // ----- I N V E R S E -----------------------------------------------------------------

    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error> {
        check_projected(NAME, projected)?;
        let a = self.ellps.semimajor_axis();
        let e = self.ellps.eccentricity();
        let k_0 = self.params.k_0;
        let n = self.n;

        let mut x = (projected.easting - self.params.x_0) / (a * k_0);
        let mut y = self.rho0 - (projected.northing - self.params.y_0) / (a * k_0);
        let mut rho = x.hypot(y);

        // On the pole of the apex
        if rho == 0. {
            return finite_geo(NAME, self.lon_0, FRAC_PI_2.copysign(n));
        }

        // Standard parallel on the southern hemisphere?
        if n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let ts0 = (rho / self.c).powf(1. / n);
        let phi = phi2(ts0, e)?;
        let lam = x.atan2(y) / n + self.lon_0;
        finite_geo(NAME, lam, phi)
    }

    fn description(&self) -> String {
        format!("Lambert Conformal Conic, ellps={} {}", self.ellps, self.params)
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
pub const GAMUT: [OpParameter; 9] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },

    OpParameter::Real { key: "lat_1", default: None },
    OpParameter::Real { key: "lat_2", default: Some(f64::NAN) },
    OpParameter::Real { key: "lat_0", default: Some(f64::NAN) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    let mut conic = ConicParameters::from_parameters(params)?;

    // The origin latitude defaults to the standard parallel in
    // the tangent case, and to the equator otherwise
    if conic.lat_0.is_nan() {
        conic.lat_0 = if conic.is_tangent() { conic.lat_1 } else { 0. };
    }
    Ok(Box::new(Lcc::new(conic, params.ellps()?)?))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Operator;
    use crate::Direction::*;
    use float_eq::assert_float_eq;

    fn check(op: &Operator, geo: &[Coor2D], projected: &[Coor2D], tol: f64) {
        let mut operands = geo.to_vec();
        assert_eq!(op.apply(&mut operands, Fwd), geo.len());
        for i in 0..operands.len() {
            assert!(operands[i].hypot2(&projected[i]) < tol);
        }

        assert_eq!(op.apply(&mut operands, Inv), geo.len());
        for i in 0..operands.len() {
            assert!(operands[i].hypot2(&geo[i]) < 1e-9);
        }
    }

    #[test]
    fn one_standard_parallel() -> Result<(), Error> {
        let op = Operator::new("lcc lat_1=57 lon_0=12")?;

        // Validation values from PROJ:
        //     echo 12 55 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        //     echo 10 55 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip
        //     echo 14 59 0 0 | cct -d18 proj=lcc lat_1=57 lon_0=12  -- | clip

        let geo = [
            Coor2D::geo(55., 12.),
            Coor2D::geo(55., 10.),
            Coor2D::geo(59., 14.),
        ];

        let projected = [
            Coor2D::raw(-0.000000000101829246, -222728.122307816054672003),
            Coor2D::raw(-128046.4724386522429995, -220853.7001605064142495),
            Coor2D::raw(115005.41456620067765471, 224484.5143763388914522),
        ];

        check(&op, &geo, &projected, 2e-9);
        Ok(())
    }

    #[test]
    fn two_standard_parallels() -> Result<(), Error> {
        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=33 lat_2=45 lon_0=10 -- | clip
        let op = Operator::new("lcc lat_1=33 lat_2=45 lon_0=10")?;
        let geo = [Coor2D::geo(40., 12.)];
        let projected = [Coor2D::raw(169863.026093938301, 4735925.219292450696)];
        check(&op, &geo, &projected, 9e-9);

        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=39 lat_0=35 lon_0=10 -- | clip
        let op = Operator::new("lcc lat_1=39 lat_0=35 lon_0=10")?;
        let projected = [Coor2D::raw(170800.011728740647, 557172.361112929415)];
        check(&op, &geo, &projected, 2e-9);

        // echo 12 40 0 0 | cct -d12 proj=lcc lat_1=33 lat_2=45 lat_0=35 lon_0=10  x_0=12345 y_0=67890 -- | clip
        let op = Operator::new("lcc lat_1=33 lat_2=45 lat_0=35 lon_0=10 x_0=12345 y_0=67890")?;
        let projected = [Coor2D::raw(182208.026093938301, 622045.440793916583)];
        check(&op, &geo, &projected, 2e-9);
        Ok(())
    }

    #[test]
    fn snyder() -> Result<(), Error> {
        // Snyder (1987), p. 296: Clarke 1866, standard parallels 33 and 45,
        // origin at 23N 96W
        let lcc = Lcc::secant(33., 45., -96., 23., 0., 0., Ellipsoid::CLARKE_1866)?;
        let geo = GeoPoint::new(-75., 35.);
        let xy = lcc.to_projected(geo)?;
        assert_float_eq!(xy.easting, 1_894_410.9, abs <= 1.);
        assert_float_eq!(xy.northing, 1_564_649.5, abs <= 1.);

        let back = lcc.to_geographic(xy)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-9);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-9);

        // The same point round trips in the tangent case
        let lcc = Lcc::tangent(25., -133.459, 12.19)?;
        assert_float_eq!(lcc.cone_constant(), 25_f64.to_radians().sin(), abs <= 1e-15);
        let back = lcc.to_geographic(lcc.to_projected(geo)?)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-9);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn poles_and_antimeridian() -> Result<(), Error> {
        let lcc = Lcc::secant(33., 45., -96., 23., 0., 0., Ellipsoid::CLARKE_1866)?;

        // The pole of the apex is a point, the other pole is out of domain
        let north = lcc.to_projected(GeoPoint::new(0., 90.))?;
        assert_float_eq!(north.easting, 0., abs <= 1e-6);
        let back = lcc.to_geographic(north)?;
        assert_float_eq!(back.lat, 90., abs <= 1e-9);
        assert!(matches!(
            lcc.to_projected(GeoPoint::new(0., -90.)),
            Err(Error::OutOfDomain(..))
        ));

        // Longitudes are reckoned relative to the central meridian, across the antimeridian
        let west = lcc.to_projected(GeoPoint::new(180., 40.))?;
        let east = lcc.to_projected(GeoPoint::new(-180., 40.))?;
        assert_float_eq!(west.easting, east.easting, abs <= 1e-6);
        let back = lcc.to_geographic(lcc.to_projected(GeoPoint::new(170., 40.))?)?;
        assert_float_eq!(back.lon, 170., abs <= 1e-9);

        // Southern hemisphere cones work too
        let lcc = Lcc::secant(-33., -45., 140., -23., 1e6, 1e7, Ellipsoid::GRS80)?;
        assert!(lcc.cone_constant() < 0.);
        let geo = GeoPoint::new(151., -34.);
        let back = lcc.to_geographic(lcc.to_projected(geo)?)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-9);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn bad_parameters() {
        assert!(matches!(
            Lcc::secant(30., -30., 0., 0., 0., 0., Ellipsoid::GRS80),
            Err(Error::Invalid(..))
        ));
        assert!(Lcc::tangent(90., 0., 0.).is_err());
        assert!(Lcc::secant(-90., 30., 0., 0., 0., 0., Ellipsoid::GRS80).is_err());
        assert!(matches!(
            Operator::new("lcc lat_2=45"),
            Err(Error::MissingParam(..))
        ));
        assert!(matches!(
            Operator::new("lcc lat_1=33 ellps=foo"),
            Err(Error::NotFound(..))
        ));
    }
}
