//! The projection contract, and the builtin projections implementing it
use crate::internal::*;
use crate::math::angular::normalize_longitude;
use std::f64::consts::FRAC_PI_2;

pub mod aea;
pub mod lcc;
pub mod ntf;
pub mod omerc;
pub mod tmerc;
pub mod utm;
pub mod webmerc;

pub type AlbersEqualAreaConic = aea::Aea;
pub type LambertConformalConic = lcc::Lcc;
pub type ObliqueMercator = omerc::Omerc;
pub type TransverseMercator = tmerc::Tmerc;

/// The common interface of all map projections.
///
/// `to_projected` takes a geographic point (degrees) to easting/northing
/// (metres), `to_geographic` goes the other way. The two are mutual
/// inverses up to numerical tolerance.
pub trait Projection: std::fmt::Debug + Send + Sync {
    /// Short identifier, as used in definitions ("webmerc", "lcc", ...)
    fn name(&self) -> &'static str;

    /// Forward projection
    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error>;

    /// Inverse projection
    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error>;

    /// Human readable summary of the configuration
    fn description(&self) -> String;

    fn ellipsoid(&self) -> &Ellipsoid;

    /// Advisory flag for clients drawing projected lines, telling
    /// whether intermediate points should be interpolated. Never
    /// consulted by the projections themselves.
    fn interpolation(&self) -> bool;
    fn set_interpolation(&mut self, interpolate: bool);
}

// ----- B U I L T I N S -------------------------------------------------------

/// Instantiate a projection from its parsed definition
pub type ProjectionConstructor = fn(&ParsedParameters) -> Result<Box<dyn Projection>, Error>;

/// The builtin projections: name, parameter gamut, constructor
#[rustfmt::skip]
pub(crate) const BUILTIN_PROJECTIONS: [(&str, &[OpParameter], ProjectionConstructor); 7] = [
    ("aea",     &aea::GAMUT,     aea::new),
    ("lcc",     &lcc::GAMUT,     lcc::new),
    ("ntf",     &ntf::GAMUT,     ntf::new),
    ("omerc",   &omerc::GAMUT,   omerc::new),
    ("tmerc",   &tmerc::GAMUT,   tmerc::new),
    ("utm",     &utm::GAMUT,     utm::new),
    ("webmerc", &webmerc::GAMUT, webmerc::new),
];

/// Look up a builtin projection by name
pub(crate) fn builtin(
    name: &str,
) -> Result<(&'static [OpParameter], ProjectionConstructor), Error> {
    for (id, gamut, constructor) in BUILTIN_PROJECTIONS {
        if id == name {
            return Ok((gamut, constructor));
        }
    }
    Err(Error::NotFound(name.to_string(), ": unknown projection".into()))
}

// ----- C O N I C   P A R A M E T E R S ---------------------------------------

/// The defining parameters shared by the conic projections, in degrees
/// and metres. Coincident standard parallels denote the tangent case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicParameters {
    pub lat_1: f64,
    pub lat_2: f64,
    pub lon_0: f64,
    pub lat_0: f64,
    pub k_0: f64,
    pub x_0: f64,
    pub y_0: f64,
}

impl ConicParameters {
    /// Two standard parallels, and the natural origin
    #[must_use]
    pub fn secant(lat_1: f64, lat_2: f64, lon_0: f64, lat_0: f64) -> ConicParameters {
        ConicParameters {
            lat_1,
            lat_2,
            lon_0,
            lat_0,
            k_0: 1.,
            x_0: 0.,
            y_0: 0.,
        }
    }

    /// One standard parallel, and the natural origin
    #[must_use]
    pub fn tangent(lat_1: f64, lon_0: f64, lat_0: f64) -> ConicParameters {
        ConicParameters::secant(lat_1, lat_1, lon_0, lat_0)
    }

    #[must_use]
    pub fn with_false_origin(mut self, x_0: f64, y_0: f64) -> ConicParameters {
        self.x_0 = x_0;
        self.y_0 = y_0;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, k_0: f64) -> ConicParameters {
        self.k_0 = k_0;
        self
    }

    /// The conic parameters of a definition. `lat_2` defaults to `lat_1`.
    pub(crate) fn from_parameters(params: &ParsedParameters) -> Result<ConicParameters, Error> {
        let lat_1 = params.real("lat_1")?;
        if lat_1.is_nan() {
            return Err(Error::MissingParam("lat_1".to_string()));
        }
        let mut lat_2 = params.real("lat_2")?;
        if lat_2.is_nan() {
            lat_2 = lat_1;
        }
        Ok(ConicParameters {
            lat_1,
            lat_2,
            lon_0: params.real("lon_0")?,
            lat_0: params.real("lat_0")?,
            k_0: params.real("k_0")?,
            x_0: params.real("x_0")?,
            y_0: params.real("y_0")?,
        })
    }

    /// Tangent case, i.e. coincident standard parallels
    #[must_use]
    pub fn is_tangent(&self) -> bool {
        (self.lat_1 - self.lat_2).to_radians().abs() < 1e-10
    }

    /// Reject the parameter combinations no conic can be built from
    pub(crate) fn validate(&self, name: &'static str) -> Result<(), Error> {
        let all = [
            self.lat_1, self.lat_2, self.lon_0, self.lat_0, self.k_0, self.x_0, self.y_0,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            error!("{name}: non-finite parameter in {self:?}");
            return Err(Error::Invalid(name, "all parameters must be finite"));
        }
        if self.lat_1.abs() >= 90. || self.lat_2.abs() >= 90. {
            error!("{name}: standard parallel at a pole: {self:?}");
            return Err(Error::Invalid(name, "|lat_1| and |lat_2| must be < 90°"));
        }
        if self.lat_0.abs() > 90. {
            return Err(Error::Invalid(name, "|lat_0| must be ≤ 90°"));
        }
        if (self.lat_1 + self.lat_2).to_radians().abs() < 1e-10 {
            error!("{name}: standard parallels symmetric around the equator: {self:?}");
            return Err(Error::Invalid(name, "lat_1 + lat_2 must be non-zero"));
        }
        if self.k_0 <= 0. {
            return Err(Error::Invalid(name, "k_0 must be positive"));
        }
        Ok(())
    }
}

impl std::fmt::Display for ConicParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lat_1={} lat_2={} lat_0={} lon_0={} k_0={} x_0={} y_0={}",
            self.lat_1, self.lat_2, self.lat_0, self.lon_0, self.k_0, self.x_0, self.y_0
        )
    }
}

// ----- V A L I D A T I O N ---------------------------------------------------

/// Check a geographic input against the nominal domain,
/// returning (longitude, latitude) in radians.
pub(crate) fn check_geographic(name: &'static str, geo: GeoPoint) -> Result<(f64, f64), Error> {
    if !geo.is_finite() || geo.lon.abs() > 180. || geo.lat.abs() > 90. {
        trace!("{name}: geographic input out of domain: {geo}");
        return Err(Error::OutOfDomain(name, format!("{geo}")));
    }
    Ok(geo.to_radians())
}

/// Check that a projected input is finite
pub(crate) fn check_projected(name: &'static str, xy: ProjectedPoint) -> Result<(), Error> {
    if !xy.is_finite() {
        trace!("{name}: non-finite projected input: {xy}");
        return Err(Error::OutOfDomain(name, format!("{xy}")));
    }
    Ok(())
}

/// Wrap up the result of an inverse projection, given in radians
pub(crate) fn finite_geo(name: &'static str, lam: f64, phi: f64) -> Result<GeoPoint, Error> {
    if !lam.is_finite() || !phi.is_finite() || phi.abs() > FRAC_PI_2 + 1e-12 {
        return Err(Error::OutOfDomain(
            name,
            format!("no geographic result: ({lam}, {phi})"),
        ));
    }
    Ok(GeoPoint::from_radians(normalize_longitude(lam), phi))
}

/// Wrap up the result of a forward projection
pub(crate) fn finite_projected(
    name: &'static str,
    x: f64,
    y: f64,
) -> Result<ProjectedPoint, Error> {
    if !x.is_finite() || !y.is_finite() {
        return Err(Error::OutOfDomain(
            name,
            format!("no projected result: ({x}, {y})"),
        ));
    }
    Ok(ProjectedPoint::new(x, y))
}

// ----- T E S T S -------------------------------------------------------------
