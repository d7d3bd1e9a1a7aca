use super::{GeoPoint, ProjectedPoint};
use crate::math::angular;

/// Generic 2D Coordinate tuple, with no fixed interpretation of the elements.
///
/// On the geographic side of a projection it holds (longitude, latitude)
/// in degrees, on the projected side (easting, northing) in metres.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor2D(pub [f64; 2]);

use std::ops::{Index, IndexMut};

impl Index<usize> for Coor2D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor2D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor2D {
    /// A `Coor2D` from latitude/longitude in degrees, stored in
    /// longitude/latitude order.
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64) -> Coor2D {
        Coor2D([longitude, latitude])
    }

    /// A `Coor2D` from longitude/latitude in degrees.
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64) -> Coor2D {
        Coor2D([longitude, latitude])
    }

    /// A `Coor2D` from latitude/longitude given as degrees, minutes and seconds
    #[must_use]
    pub fn dms(latitude: (i32, u16, f64), longitude: (i32, u16, f64)) -> Coor2D {
        let lat = angular::dms_to_dd(latitude.0, latitude.1, latitude.2);
        let lon = angular::dms_to_dd(longitude.0, longitude.1, longitude.2);
        Coor2D([lon, lat])
    }

    /// A `Coor2D` from the elements as given, without interpretation
    #[must_use]
    pub fn raw(first: f64, second: f64) -> Coor2D {
        Coor2D([first, second])
    }

    /// A `Coor2D` consisting of 2 `NaN`s
    #[must_use]
    pub fn nan() -> Coor2D {
        Coor2D([f64::NAN, f64::NAN])
    }

    /// A `Coor2D` consisting of 2 `0`s
    #[must_use]
    pub fn origin() -> Coor2D {
        Coor2D([0., 0.])
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// True if any of the elements is NaN
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0[0].is_nan() || self.0[1].is_nan()
    }

    /// Euclidean distance between two coordinate tuples
    #[must_use]
    pub fn hypot2(&self, other: &Coor2D) -> f64 {
        (self.0[0] - other.0[0]).hypot(self.0[1] - other.0[1])
    }
}

// ----- C O N V E R S I O N S -----------------------------------------------

impl From<GeoPoint> for Coor2D {
    fn from(p: GeoPoint) -> Self {
        Coor2D([p.lon, p.lat])
    }
}

impl From<ProjectedPoint> for Coor2D {
    fn from(p: ProjectedPoint) -> Self {
        Coor2D([p.easting, p.northing])
    }
}

impl From<Coor2D> for GeoPoint {
    fn from(c: Coor2D) -> Self {
        GeoPoint::new(c[0], c[1])
    }
}

impl From<Coor2D> for ProjectedPoint {
    fn from(c: Coor2D) -> Self {
        ProjectedPoint::new(c[0], c[1])
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coor2d() {
        let c = Coor2D::geo(55., 12.);
        let d = Coor2D::gis(12., 55.);
        assert_eq!(c, d);
        assert_eq!(d.x(), 12.);
        assert_eq!(d[1], 55.);

        let e = Coor2D::dms((55, 30, 36.), (12, 45, 36.));
        assert!(e.hypot2(&Coor2D::gis(12.76, 55.51)) < 1e-10);

        assert!(Coor2D::nan().is_nan());
        assert!(!Coor2D::origin().is_nan());
    }

    #[test]
    fn conversions() {
        let geo = GeoPoint::new(12., 55.);
        let c: Coor2D = geo.into();
        assert_eq!(c, Coor2D::raw(12., 55.));
        assert_eq!(GeoPoint::from(c), geo);

        let p = ProjectedPoint::new(500_000., 6_000_000.);
        let c = Coor2D::from(p);
        assert_eq!(c[0], 500_000.);
        assert_eq!(ProjectedPoint::from(c), p);
    }
}
