//! Point types: [GeoPoint] and [ProjectedPoint] for the typed
//! projection API, [Coor2D](coor2d::Coor2D) for batch operators.
pub mod coor2d;

/// A geographic position: longitude and latitude in decimal degrees.
///
/// The nominal domain is lon ∈ [-180, 180], lat ∈ [-90, 90].
/// Individual projections may restrict it further.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint { lon, lat }
    }

    /// Build from longitude and latitude in radians
    #[must_use]
    pub fn from_radians(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint {
            lon: lon.to_degrees(),
            lat: lat.to_degrees(),
        }
    }

    /// (longitude, latitude) in radians
    #[must_use]
    pub fn to_radians(&self) -> (f64, f64) {
        (self.lon.to_radians(), self.lat.to_radians())
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lon, self.lat)
    }
}

/// A planar position in metres, relative to the false origin of the projection
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct ProjectedPoint {
    pub easting: f64,
    pub northing: f64,
}

impl ProjectedPoint {
    #[must_use]
    pub fn new(easting: f64, northing: f64) -> ProjectedPoint {
        ProjectedPoint { easting, northing }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.easting.is_finite() && self.northing.is_finite()
    }
}

impl std::fmt::Display for ProjectedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.easting, self.northing)
    }
}
