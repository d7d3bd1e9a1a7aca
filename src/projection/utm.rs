//! UTM zones, and the `utm` definition: a Transverse Mercator with the
//! central meridian, scale and false origin given by the zone.
use super::tmerc::Tmerc;
use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

/// Latitude band letters, 8° each from 80°S. X is extended to 84°N.
const BAND_LETTERS: &[u8; 20] = b"CDEFGHJKLMNPQRSTUVWX";

/// A UTM grid zone designation, e.g. "32V". Points outside the
/// latitude range of UTM get the band letter 'Z'.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    pub number: usize,
    pub letter: char,
}

impl UtmZone {
    /// The zone of a geographic point, honouring the Norwegian
    /// and Svalbard exceptions.
    pub fn from_geo(geo: GeoPoint) -> Result<UtmZone, Error> {
        let (lon, lat) = (geo.lon, geo.lat);
        if !geo.is_finite() || lon.abs() > 180. || lat.abs() > 90. {
            return Err(Error::OutOfDomain("UtmZone", format!("{geo}")));
        }

        let mut number = (((lon + 180.) / 6.).floor() as usize + 1).min(60);

        // South-western Norway
        if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
            number = 32;
        }

        // Svalbard
        if (72.0..84.0).contains(&lat) {
            number = match lon {
                x if (0.0..9.0).contains(&x) => 31,
                x if (9.0..21.0).contains(&x) => 33,
                x if (21.0..33.0).contains(&x) => 35,
                x if (33.0..42.0).contains(&x) => 37,
                _ => number,
            };
        }

        let letter = if (-80.0..=84.0).contains(&lat) {
            let band = (((lat + 80.) / 8.).floor() as usize).min(BAND_LETTERS.len() - 1);
            BAND_LETTERS[band] as char
        } else {
            'Z'
        };

        Ok(UtmZone { number, letter })
    }

    #[must_use]
    pub fn hemisphere(&self) -> Hemisphere {
        if self.letter >= 'N' {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }
}

impl std::fmt::Display for UtmZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.number, self.letter)
    }
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 4] = [
    OpParameter::Flag    { key: "inv" },
    OpParameter::Flag    { key: "south" },
    OpParameter::Text    { key: "ellps", default: Some("GRS80") },
    OpParameter::Natural { key: "zone",  default: None },
];

pub fn new(params: &ParsedParameters) -> Result<Box<dyn Projection>, Error> {
    let hemisphere = if params.boolean("south") {
        Hemisphere::South
    } else {
        Hemisphere::North
    };
    let zone = params.natural("zone")?;
    Ok(Box::new(Tmerc::utm(zone, hemisphere, params.ellps()?)?))
}

// ----- T E S T S ---------------------------------------------------------------------
