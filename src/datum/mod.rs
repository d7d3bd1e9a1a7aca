//! Geodetic datums with a 3 parameter translation to WGS84, and
//! shifts of geographic coordinates between them.
mod molodensky;

use crate::coordinate::GeoPoint;
use crate::ellipsoid::Ellipsoid;
use crate::Error;
use log::trace;

/// A geodetic datum: an ellipsoid and the geocentric translation
/// (dx, dy, dz), in metres, taking its cartesian coordinates to WGS84.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum {
    name: String,
    ellipsoid: Ellipsoid,
    towgs84: [f64; 3],
}

/// The algorithm used by [shift_datum]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ShiftMethod {
    /// Geographic to cartesian on the source ellipsoid, translate,
    /// cartesian to geographic on the target ellipsoid. Exact for
    /// 3 parameter shifts.
    #[default]
    Geocentric,
    /// The standard, or (if `abridged`) abridged, Molodensky formulas
    Molodensky { abridged: bool },
}

// The translations are the commonly used 3 parameter approximations
// (EPSG / NIMA TR8350.2 mean values), good to a few metres.
const DATUM_LIST: [(&str, Ellipsoid, [f64; 3]); 6] = [
    ("WGS84", Ellipsoid::WGS84, [0., 0., 0.]),
    ("NTF", Ellipsoid::CLARKE_1880_IGN, [-168., -60., 320.]),
    ("NAD27", Ellipsoid::CLARKE_1866, [-8., 160., 176.]),
    ("NAD83", Ellipsoid::GRS80, [0., 0., 0.]),
    ("ED50", Ellipsoid::INTERNATIONAL, [-87., -98., -121.]),
    ("OSGB36", Ellipsoid::AIRY, [375., -111., 431.]),
];

impl Datum {
    /// User defined datum
    pub fn new(name: &str, ellipsoid: Ellipsoid, towgs84: [f64; 3]) -> Datum {
        Datum {
            name: name.to_string(),
            ellipsoid,
            towgs84,
        }
    }

    /// Predefined datum: one of "WGS84", "NTF", "NAD27", "NAD83", "ED50", "OSGB36"
    pub fn named(name: &str) -> Result<Datum, Error> {
        for (id, ellipsoid, towgs84) in DATUM_LIST {
            if id == name {
                return Ok(Datum::new(id, ellipsoid, towgs84));
            }
        }
        Err(Error::NotFound(String::from(name), ": unknown datum".into()))
    }

    #[must_use]
    pub fn wgs84() -> Datum {
        Datum::new("WGS84", Ellipsoid::WGS84, [0., 0., 0.])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    #[must_use]
    pub fn towgs84(&self) -> [f64; 3] {
        self.towgs84
    }

    /// The same ellipsoid and translation (names are not compared)
    #[must_use]
    pub fn is_equivalent(&self, other: &Datum) -> bool {
        self.ellipsoid == other.ellipsoid && self.towgs84 == other.towgs84
    }
}

/// Convert a geographic point referenced to datum `from` into the
/// equivalent point on datum `to`, assuming ellipsoidal height 0.
pub fn shift_datum(
    point: GeoPoint,
    from: &Datum,
    to: &Datum,
    method: ShiftMethod,
) -> Result<GeoPoint, Error> {
    shift_datum_with_height(point, 0., from, to, method).map(|(p, _)| p)
}

/// As [shift_datum], but carrying the ellipsoidal height along.
/// Returns the shifted point and its height above the target ellipsoid.
pub fn shift_datum_with_height(
    point: GeoPoint,
    height: f64,
    from: &Datum,
    to: &Datum,
    method: ShiftMethod,
) -> Result<(GeoPoint, f64), Error> {
    if !point.is_finite() || !height.is_finite() {
        return Err(Error::OutOfDomain("datum shift", format!("{point}")));
    }
    if from.is_equivalent(to) {
        return Ok((point, height));
    }

    let (lam, phi) = point.to_radians();
    let translation = [
        from.towgs84[0] - to.towgs84[0],
        from.towgs84[1] - to.towgs84[1],
        from.towgs84[2] - to.towgs84[2],
    ];

    let (lam, phi, h) = match method {
        ShiftMethod::Geocentric => {
            let cart = from.ellipsoid.cartesian(lam, phi, height);
            let shifted = [
                cart[0] + translation[0],
                cart[1] + translation[1],
                cart[2] + translation[2],
            ];
            to.ellipsoid.geographic(shifted)
        }
        ShiftMethod::Molodensky { abridged } => {
            let params = molodensky::Molodensky::new(
                &from.ellipsoid,
                &to.ellipsoid,
                translation,
                abridged,
            );
            let delta = params.deltas(lam, phi, height);
            (lam + delta[0], phi + delta[1], height + delta[2])
        }
    };

    let shifted = GeoPoint::from_radians(lam, phi);
    if !shifted.is_finite() || !h.is_finite() {
        return Err(Error::OutOfDomain("datum shift", format!("{point}")));
    }
    trace!("datum shift {} -> {}: {point} -> {shifted}", from.name, to.name);
    Ok((shifted, h))
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angular::dms_to_dd;
    use float_eq::assert_float_eq;

    // Approximate horizontal distance in metres between nearby points
    fn dist(a: GeoPoint, b: GeoPoint) -> f64 {
        let dy = (a.lat - b.lat).to_radians() * 6_371_000.;
        let dx = (a.lon - b.lon).to_radians() * 6_371_000. * a.lat.to_radians().cos();
        dx.hypot(dy)
    }

    // OGP Publication 373-7-2, Geomatics Guidance Note number 7, part 2:
    // Transformation from WGS84 to ED50. The expected values are from a
    // direct 3 parameter geocentric translation with the same constants.
    fn ogp_setup() -> (Datum, Datum, GeoPoint, GeoPoint) {
        let wgs84 = Datum::wgs84();
        let ed50 = Datum::new("ED50", Ellipsoid::INTERNATIONAL, [-84.87, -96.49, -116.95]);
        let p = GeoPoint::new(dms_to_dd(2, 7, 46.38), dms_to_dd(53, 48, 33.82));
        let q = GeoPoint::new(2.1309658097, 53.8101570592);
        (wgs84, ed50, p, q)
    }

    #[test]
    fn geocentric() -> Result<(), Error> {
        let (wgs84, ed50, p, q) = ogp_setup();

        let (r, h) = shift_datum_with_height(p, 73., &wgs84, &ed50, ShiftMethod::Geocentric)?;
        assert!(dist(r, q) < 0.005);
        assert_float_eq!(h, 28.0247, abs <= 0.005);

        // And back again
        let (r, h) = shift_datum_with_height(q, 28.0247, &ed50, &wgs84, ShiftMethod::Geocentric)?;
        assert!(dist(r, p) < 0.005);
        assert_float_eq!(h, 73., abs <= 0.005);
        Ok(())
    }

    #[test]
    fn molodensky() -> Result<(), Error> {
        let (wgs84, ed50, p, q) = ogp_setup();

        // In the unabridged case, Molodensky replicates the geocentric
        // translation to within 5 mm in the plane and the elevation.
        let method = ShiftMethod::Molodensky { abridged: false };
        let (r, h) = shift_datum_with_height(p, 73., &wgs84, &ed50, method)?;
        assert!(dist(r, q) < 0.005);
        assert_float_eq!(h, 28.0247, abs <= 0.005);

        let (r, _) = shift_datum_with_height(q, 28.0247, &ed50, &wgs84, method)?;
        assert!(dist(r, p) < 0.005);

        // The abridged case is much worse, but still better than a decimetre
        let method = ShiftMethod::Molodensky { abridged: true };
        let (r, h) = shift_datum_with_height(p, 73., &wgs84, &ed50, method)?;
        assert!(dist(r, q) < 0.1);
        assert_float_eq!(h, 28.0247, abs <= 0.075);
        Ok(())
    }

    #[test]
    fn presets() -> Result<(), Error> {
        let ntf = Datum::named("NTF")?;
        assert_eq!(ntf.name(), "NTF");
        assert_eq!(*ntf.ellipsoid(), Ellipsoid::CLARKE_1880_IGN);
        assert_eq!(ntf.towgs84(), [-168., -60., 320.]);
        assert!(matches!(Datum::named("NTF2"), Err(Error::NotFound(..))));

        // Identical datums short circuit
        let p = GeoPoint::new(2.3, 48.8);
        let r = shift_datum(p, &ntf, &ntf, ShiftMethod::default())?;
        assert_eq!(p, r);

        // NAD83 and WGS84 differ only by ellipsoid, in the sub-millimetre range
        let nad83 = Datum::named("NAD83")?;
        let r = shift_datum(p, &Datum::wgs84(), &nad83, ShiftMethod::Geocentric)?;
        assert!(dist(p, r) < 0.001);

        // The NTF shift is in the 100 m range in France
        let r = shift_datum(p, &Datum::wgs84(), &ntf, ShiftMethod::Geocentric)?;
        assert!(dist(p, r) > 20. && dist(p, r) < 200.);
        let back = shift_datum(r, &ntf, &Datum::wgs84(), ShiftMethod::Geocentric)?;
        assert!(dist(p, back) < 0.001);

        let bad = GeoPoint::new(f64::NAN, 0.);
        assert!(shift_datum(bad, &ntf, &nad83, ShiftMethod::Geocentric).is_err());
        Ok(())
    }
}
