//! *Ellipsoidal map projections, with forward and inverse transforms
//! for each of them*.
//!
//! The projections
//! ===============
//!
//! - [Web Mercator](projection::webmerc::WebMercator), spherical and closed form
//! - [Lambert Conformal Conic](projection::lcc::Lcc), one or two standard parallels
//! - [Albers Equal Area Conic](projection::aea::Aea), with a table of
//!   [regional presets](projection::aea::ALBERS_PRESETS)
//! - [Transverse Mercator and UTM](projection::tmerc::Tmerc), including
//!   [zone derivation](projection::utm::UtmZone)
//! - [Hotine Oblique Mercator](projection::omerc::Omerc)
//! - [The French NTF Lambert zones](projection::ntf::FrenchNtf)
//!
//! All of them are built on the shared [Ellipsoid] model, and share the
//! [Projection] contract: `to_projected` takes geographic coordinates in
//! degrees to easting/northing, `to_geographic` goes the other way.
//!
//! Projections may also be instantiated from a textual definition, and
//! wrapped in an [Operator] with a fixed direction:
//!
//! ```rust
//! use mapproj::prelude::*;
//! # fn main() -> Result<(), Error> {
//! let utm32 = Operator::new("utm zone=32")?;
//! let mut data = [Coor2D::raw(12., 55.)];
//! assert_eq!(utm32.apply(&mut data, Fwd), 1);
//! assert!((data[0][0] - 691_875.632).abs() < 0.01);
//! # Ok(())}
//! ```

pub mod coordinate;
pub mod datum;
pub mod ellipsoid;
pub mod math;
pub mod op;
pub mod projection;

pub use coordinate::coor2d::Coor2D;
pub use coordinate::GeoPoint;
pub use coordinate::ProjectedPoint;
pub use datum::Datum;
pub use datum::ShiftMethod;
pub use ellipsoid::Ellipsoid;
pub use op::Operator;
pub use projection::Projection;

use thiserror::Error;

/// Preamble for application program use
pub mod prelude {
    pub use crate::coordinate::coor2d::Coor2D;
    pub use crate::coordinate::GeoPoint;
    pub use crate::coordinate::ProjectedPoint;
    pub use crate::datum::shift_datum;
    pub use crate::datum::Datum;
    pub use crate::datum::ShiftMethod;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::op::Operator;
    pub use crate::projection::aea::Aea;
    pub use crate::projection::aea::AlbersPreset;
    pub use crate::projection::lcc::Lcc;
    pub use crate::projection::ntf::FrenchNtf;
    pub use crate::projection::ntf::NtfZone;
    pub use crate::projection::omerc::HotineVariant;
    pub use crate::projection::omerc::Omerc;
    pub use crate::projection::omerc::OmercParameters;
    pub use crate::projection::tmerc::Tmerc;
    pub use crate::projection::utm::Hemisphere;
    pub use crate::projection::utm::UtmZone;
    pub use crate::projection::webmerc::WebMercator;
    pub use crate::projection::ConicParameters;
    pub use crate::projection::Projection;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::Error;
}

/// Preamble for crate-internal modules
pub(crate) mod internal {
    pub use log::debug;
    pub use log::error;
    pub use log::trace;
    pub use log::warn;

    pub use std::collections::BTreeMap;
    pub use std::collections::BTreeSet;

    pub use crate::coordinate::coor2d::Coor2D;
    pub use crate::coordinate::GeoPoint;
    pub use crate::coordinate::ProjectedPoint;
    pub use crate::ellipsoid::Ellipsoid;
    pub use crate::op::OpParameter;
    pub use crate::op::ParsedParameters;
    pub use crate::projection::Projection;
    pub use crate::Direction;
    pub use crate::Error;
}

/// The error type of the crate.
///
/// Domain errors (`OutOfDomain`) and non-convergence are reported per
/// coordinate. The remaining variants are configuration errors, reported
/// when a projection, ellipsoid or datum is constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}: coordinate outside the valid domain: {1}")]
    OutOfDomain(&'static str, String),

    #[error("{0}: no convergence after {1} iterations")]
    NonConvergence(&'static str, usize),

    #[error("{0}: {1}")]
    Invalid(&'static str, &'static str),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("syntax error: {0}")]
    Syntax(String),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

impl std::ops::Not for Direction {
    type Output = Direction;
    fn not(self) -> Direction {
        match self {
            Direction::Fwd => Direction::Inv,
            Direction::Inv => Direction::Fwd,
        }
    }
}

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B.R. Bowring (1985): *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202)
    Bow85,

    /// R.E. Deakin (2004): *The Standard and Abridged Molodensky
    /// Coordinate Transformation Formulae*.
    /// [pdf](http://www.mygeodesy.id.au/documents/Molodensky%20V2.pdf)
    Dea04,

    /// IOGP (2019): *Coordinate Conversions and Transformations including Formulas*.
    /// IOGP Publication 373-7-2, Geomatics Guidance Note number 7, part 2.
    Iogp19,

    /// Ordnance Survey (2020): *A guide to coordinate systems in Great Britain*.
    /// Appendix C: Transverse Mercator map projection formulae.
    Os20,

    /// J.P. Snyder (1987): *Map Projections - A Working Manual*.
    /// U.S. Geological Survey Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395)
    Sny87,
}
