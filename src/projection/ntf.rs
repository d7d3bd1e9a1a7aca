//! The French NTF Lambert zones. WGS84 geographic coordinates in,
//! Lambert grid coordinates on the NTF datum out.
use super::lcc::Lcc;
use super::*;
use crate::datum::{shift_datum, Datum, ShiftMethod};
use crate::math::angular::dms_to_dd;
use std::str::FromStr;

const NAME: &str = "ntf";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NtfZone {
    I,
    II,
    III,
    IV,
    /// Lambert II étendu, covering all of mainland France
    IIe,
}

impl FromStr for NtfZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<NtfZone, Error> {
        match s.trim().to_lowercase().as_str() {
            "1" | "i" => Ok(NtfZone::I),
            "2" | "ii" => Ok(NtfZone::II),
            "3" | "iii" => Ok(NtfZone::III),
            "4" | "iv" => Ok(NtfZone::IV),
            "2e" | "iie" => Ok(NtfZone::IIe),
            _ => {
                warn!("Unknown NTF zone: '{s}'");
                Err(Error::NotFound(s.to_string(), ": unknown NTF zone".into()))
            }
        }
    }
}

impl std::fmt::Display for NtfZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            NtfZone::I => "1",
            NtfZone::II => "2",
            NtfZone::III => "3",
            NtfZone::IV => "4",
            NtfZone::IIe => "2e",
        };
        write!(f, "{id}")
    }
}

impl NtfZone {
    /// Standard parallels, origin latitude, and false origin
    #[rustfmt::skip]
    fn constants(&self) -> (f64, f64, f64, f64, f64) {
        match self {
            NtfZone::I   => (48.598_523, 50.395_912, 49.5,   600_000., 200_000.),
            NtfZone::II  => (45.898_919, 47.696_014, 46.8,   600_000., 200_000.),
            NtfZone::III => (43.199_291, 44.996_094, 44.1,   600_000., 200_000.),
            NtfZone::IV  => (41.560_388, 42.767_663, 42.165, 234.358,  185_861.369),
            NtfZone::IIe => (45.898_919, 47.696_014, 46.8,   600_000., 2_200_000.),
        }
    }

    /// The Lambert Conformal Conic of the zone, on the NTF ellipsoid
    pub fn lambert(&self) -> Result<Lcc, Error> {
        let (lat_1, lat_2, lat_0, x_0, y_0) = self.constants();
        Lcc::secant(lat_1, lat_2, paris_meridian(), lat_0, x_0, y_0, Ellipsoid::CLARKE_1880_IGN)
    }
}

/// The longitude of the Paris meridian, east of Greenwich
#[must_use]
pub fn paris_meridian() -> f64 {
    dms_to_dd(2, 20, 14.025)
}

/// The French NTF Lambert grids.
///
/// The datum shift between WGS84 and NTF is handled internally, by a
/// geocentric translation of points at zero ellipsoidal height.
#[derive(Debug, Clone)]
pub struct FrenchNtf {
    zone: NtfZone,
    lambert: Lcc,
    ntf: Datum,
    wgs84: Datum,
    interpolate: bool,
}

impl FrenchNtf {
    /// Zones are given as "1", "2", "3", "4", "2e", or in roman numerals
    pub fn new(zone: &str) -> Result<FrenchNtf, Error> {
        let zone = NtfZone::from_str(zone)?;
        Ok(FrenchNtf {
            zone,
            lambert: zone.lambert()?,
            ntf: Datum::named("NTF")?,
            wgs84: Datum::wgs84(),
            interpolate: true,
        })
    }

    /// Switch to another zone. On failure, the current zone is kept.
    pub fn set_zone(&mut self, zone: &str) -> Result<(), Error> {
        let zone = NtfZone::from_str(zone)?;
        self.lambert = zone.lambert()?;
        self.zone = zone;
        Ok(())
    }

    #[must_use]
    pub fn zone(&self) -> NtfZone {
        self.zone
    }

    /// The underlying Lambert projection, operating on NTF coordinates
    #[must_use]
    pub fn lambert(&self) -> &Lcc {
        &self.lambert
    }
}

impl Projection for FrenchNtf {
    fn name(&self) -> &'static str {
        NAME
    }

    fn to_projected(&self, geo: GeoPoint) -> Result<ProjectedPoint, Error> {
        check_geographic(NAME, geo)?;
        let ntf = shift_datum(geo, &self.wgs84, &self.ntf, ShiftMethod::Geocentric)?;
        self.lambert.to_projected(ntf)
    }

    fn to_geographic(&self, projected: ProjectedPoint) -> Result<GeoPoint, Error> {
        let ntf = self.lambert.to_geographic(projected)?;
        let wgs84 = shift_datum(ntf, &self.ntf, &self.wgs84, ShiftMethod::Geocentric)?;
        let (lam, phi) = wgs84.to_radians();
        finite_geo(NAME, lam, phi)
    }

    fn description(&self) -> String {
        format!("French NTF Lambert zone {}: {}", self.zone, self.lambert.description())
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        self.lambert.ellipsoid()
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
pub const GAMUT: [OpParameter; 2] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "zone", default: Some("2e") },
];

pub fn new(params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    Ok(Box::new(FrenchNtf::new(&params.text("zone")?)?))
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Operator;
    use float_eq::assert_float_eq;

    #[test]
    fn zones() -> Result<(), Error> {
        assert_eq!(NtfZone::from_str("2e")?, NtfZone::IIe);
        assert_eq!(NtfZone::from_str("IIe")?, NtfZone::IIe);
        assert_eq!(NtfZone::from_str("III")?, NtfZone::III);
        assert_eq!(NtfZone::from_str("4")?, NtfZone::IV);
        assert_eq!(NtfZone::IIe.to_string(), "2e");
        assert!(matches!(NtfZone::from_str("5"), Err(Error::NotFound(..))));
        assert!(matches!(FrenchNtf::new("V"), Err(Error::NotFound(..))));

        // Each zone maps its natural origin to its false origin
        for zone in ["1", "2", "3", "4", "2e"] {
            let zone = NtfZone::from_str(zone)?;
            let (_, _, lat_0, x_0, y_0) = zone.constants();
            let xy = zone.lambert()?.to_projected(GeoPoint::new(paris_meridian(), lat_0))?;
            assert_float_eq!(xy.easting, x_0, abs <= 1e-6);
            assert_float_eq!(xy.northing, y_0, abs <= 1e-6);
        }
        Ok(())
    }

    #[test]
    fn paris() -> Result<(), Error> {
        let ntf = FrenchNtf::new("2e")?;
        assert_eq!(ntf.zone(), NtfZone::IIe);

        // Notre-Dame de Paris, WGS84
        let geo = GeoPoint::new(2.3488, 48.8534);
        let xy = ntf.to_projected(geo)?;
        assert_float_eq!(xy.easting, 600_902.72, abs <= 0.05);
        assert_float_eq!(xy.northing, 2_428_339.80, abs <= 0.05);

        let back = ntf.to_geographic(xy)?;
        assert_float_eq!(back.lon, geo.lon, abs <= 1e-7);
        assert_float_eq!(back.lat, geo.lat, abs <= 1e-7);

        // The datum shift moves the point by tens of metres
        let plain = ntf.lambert().to_projected(geo)?;
        let shift = (plain.easting - xy.easting).hypot(plain.northing - xy.northing);
        assert!(shift > 20. && shift < 200.);
        Ok(())
    }

    #[test]
    fn reconfiguration() -> Result<(), Error> {
        let mut ntf = FrenchNtf::new("2")?;
        let geo = GeoPoint::new(2.3488, 48.8534);
        let zone_2 = ntf.to_projected(geo)?;
        assert_float_eq!(zone_2.northing, 428_339.80, abs <= 0.05);

        assert!(ntf.set_zone("9").is_err());
        assert_eq!(ntf.zone(), NtfZone::II);

        ntf.set_zone("2e")?;
        let zone_2e = ntf.to_projected(geo)?;
        assert_float_eq!(zone_2e.northing - zone_2.northing, 2_000_000., abs <= 1e-6);
        assert_float_eq!(zone_2e.easting, zone_2.easting, abs <= 1e-6);
        Ok(())
    }

    #[test]
    fn definitions() -> Result<(), Error> {
        let op = Operator::new("ntf")?;
        assert_eq!(op.projection().name(), "ntf");
        let xy = op.transform(Coor2D::gis(2.3488, 48.8534))?;
        assert_float_eq!(xy[1], 2_428_339.80, abs <= 0.05);

        assert!(Operator::new("ntf zone=1").is_ok());
        assert!(matches!(Operator::new("ntf zone=6"), Err(Error::NotFound(..))));
        Ok(())
    }
}
