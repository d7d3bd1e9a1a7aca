mod cartesians;
mod meridians;

use crate::Error;
use log::error;

/// Representation of a biaxial ellipsoid of revolution, defined by its
/// semimajor axis and flattening. All other shape and size parameters
/// are derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::GRS80
    }
}

/// The builtin ellipsoids, as (alias list, ellipsoid)
const ELLIPSOID_LIST: [(&[&str], Ellipsoid); 13] = [
    (&["WGS84"], Ellipsoid::WGS84),
    (&["GRS80"], Ellipsoid::GRS80),
    (&["clrk66", "Clarke1866"], Ellipsoid::CLARKE_1866),
    (&["clrk80", "Clarke1880RGS"], Ellipsoid::CLARKE_1880),
    (&["clrk80ign", "Clarke1880"], Ellipsoid::CLARKE_1880_IGN),
    (&["bessel", "Bessel1841"], Ellipsoid::BESSEL),
    (&["intl", "International"], Ellipsoid::INTERNATIONAL),
    (&["airy", "Airy1830"], Ellipsoid::AIRY),
    (&["evrst30", "Everest1830"], Ellipsoid::EVEREST_1830),
    (&["evrstSS", "Everest1830Modified"], Ellipsoid::EVEREST_SABAH_SARAWAK),
    (&["helmert", "Helmert1906"], Ellipsoid::HELMERT),
    (&["sphere"], Ellipsoid::SPHERE),
    (&["webmerc"], Ellipsoid::WEBMERC),
];

impl Ellipsoid {
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1. / 298.257_223_563,
    };
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6_378_137.0,
        f: 1. / 298.257_222_100_882_7,
    };
    pub const CLARKE_1866: Ellipsoid = Ellipsoid {
        a: 6_378_206.4,
        f: 1. / 294.978_698_2,
    };
    pub const CLARKE_1880: Ellipsoid = Ellipsoid {
        a: 6_378_249.145,
        f: 1. / 293.465,
    };
    /// Clarke 1880 as used by the French IGN for the NTF datum
    pub const CLARKE_1880_IGN: Ellipsoid = Ellipsoid {
        a: 6_378_249.2,
        f: 1. / 293.466_021_293_626_9,
    };
    pub const BESSEL: Ellipsoid = Ellipsoid {
        a: 6_377_397.155,
        f: 1. / 299.152_812_8,
    };
    pub const INTERNATIONAL: Ellipsoid = Ellipsoid {
        a: 6_378_388.0,
        f: 1. / 297.0,
    };
    pub const AIRY: Ellipsoid = Ellipsoid {
        a: 6_377_563.396,
        f: 1. / 299.324_964_6,
    };
    pub const EVEREST_1830: Ellipsoid = Ellipsoid {
        a: 6_377_276.345,
        f: 1. / 300.8017,
    };
    /// Everest 1830 (1967 definition), used in Sabah and Sarawak
    pub const EVEREST_SABAH_SARAWAK: Ellipsoid = Ellipsoid {
        a: 6_377_298.556,
        f: 1. / 300.8017,
    };
    pub const HELMERT: Ellipsoid = Ellipsoid {
        a: 6_378_200.0,
        f: 1. / 298.3,
    };
    /// The PROJ "sphere", with the radius of the authalic sphere of Clarke 1866
    pub const SPHERE: Ellipsoid = Ellipsoid { a: 6_370_997.0, f: 0. };
    /// The sphere of Web Mercator, with the WGS84 semimajor axis as radius
    pub const WEBMERC: Ellipsoid = Ellipsoid { a: 6_378_137.0, f: 0. };

    /// User defined ellipsoid. The semimajor axis must be positive and
    /// finite, and the flattening in [0, 1).
    pub fn new(semimajor_axis: f64, flattening: f64) -> Result<Ellipsoid, Error> {
        if !(semimajor_axis.is_finite() && semimajor_axis > 0.) {
            error!("Ellipsoid: bad semimajor axis {semimajor_axis}");
            return Err(Error::Invalid(
                "Ellipsoid",
                "semimajor axis must be positive and finite",
            ));
        }
        if !(0.0..1.0).contains(&flattening) {
            error!("Ellipsoid: bad flattening {flattening}");
            return Err(Error::Invalid("Ellipsoid", "flattening must be in [0, 1)"));
        }
        Ok(Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        })
    }

    /// User defined ellipsoid from its equatorial and polar radii
    pub fn from_radii(semimajor_axis: f64, semiminor_axis: f64) -> Result<Ellipsoid, Error> {
        if !(semiminor_axis.is_finite() && semiminor_axis > 0. && semiminor_axis <= semimajor_axis)
        {
            error!("Ellipsoid: bad semiminor axis {semiminor_axis}");
            return Err(Error::Invalid(
                "Ellipsoid",
                "semiminor axis must be positive and not exceed the semimajor axis",
            ));
        }
        Ellipsoid::new(semimajor_axis, (semimajor_axis - semiminor_axis) / semimajor_axis)
    }

    /// Predefined ellipsoid, by one of its aliases (case sensitive)
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        for (aliases, ellps) in ELLIPSOID_LIST {
            if aliases.contains(&name) {
                return Ok(ellps);
            }
        }
        Err(Error::NotFound(String::from(name), ": unknown ellipsoid".into()))
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N* (or *ν*)
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M* (or *ρ*)
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }
}

impl std::fmt::Display for Ellipsoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (aliases, ellps) in ELLIPSOID_LIST {
            if ellps == *self {
                return write!(f, "{}", aliases[0]);
            }
        }
        if self.f == 0. {
            return write!(f, "a={}", self.a);
        }
        write!(f, "a={} rf={}", self.a, 1. / self.f)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn test_ellipsoid() -> Result<(), Error> {
        // Constructors
        let ellps = Ellipsoid::named("intl")?;
        assert_eq!(ellps.flattening(), 1. / 297.);
        assert_eq!(Ellipsoid::named("International")?, ellps);

        let ellps = Ellipsoid::named("GRS80")?;
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert_eq!(ellps.flattening(), 1. / 298.25722_21008_82711_24316);
        assert_eq!(Ellipsoid::default(), ellps);

        let ellps = Ellipsoid::named("Clarke1880")?;
        assert_eq!(ellps.semimajor_axis(), 6378249.2);
        assert_float_eq!(ellps.semiminor_axis(), 6356515.0, abs <= 1e-6);

        // Unknown and empty names are errors, never a silent default
        assert!(matches!(Ellipsoid::named("foo"), Err(Error::NotFound(..))));
        assert!(matches!(Ellipsoid::named(""), Err(Error::NotFound(..))));
        assert!(matches!(Ellipsoid::named("wgs84"), Err(Error::NotFound(..))));
        Ok(())
    }

    #[test]
    fn user_defined() -> Result<(), Error> {
        let ellps = Ellipsoid::new(6378137.0, 1. / 298.257_222_100_882_7)?;
        assert_eq!(ellps, Ellipsoid::GRS80);

        let ellps = Ellipsoid::from_radii(6378206.4, 6356583.8)?;
        assert_float_eq!(1. / ellps.flattening(), 294.9786982, abs <= 1e-6);

        assert!(Ellipsoid::new(-1., 0.).is_err());
        assert!(Ellipsoid::new(f64::NAN, 0.).is_err());
        assert!(Ellipsoid::new(6378137.0, 1.).is_err());
        assert!(Ellipsoid::new(6378137.0, -0.1).is_err());
        assert!(Ellipsoid::from_radii(6378137.0, 6378138.0).is_err());
        assert!(Ellipsoid::from_radii(6378137.0, 0.).is_err());
        Ok(())
    }

    #[test]
    fn shape_and_size() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;

        // Additional shape descriptors
        assert!((ellps.eccentricity() - 0.081819191).abs() < 1.0e-10);
        assert!((ellps.eccentricity_squared() - 0.00669_43800_22903_41574).abs() < 1.0e-10);
        assert!((ellps.third_flattening() - 0.001_679_220_394_629_406).abs() < 1e-15);

        // Additional size descriptors
        assert!((ellps.semiminor_axis() - 6_356_752.31414_0347).abs() < 1e-9);
        assert!((ellps.semimajor_axis() - 6_378_137.0).abs() < 1e-9);

        let sphere = Ellipsoid::named("webmerc")?;
        assert_eq!(sphere.flattening(), 0.);
        assert_eq!(sphere.eccentricity(), 0.);
        assert_eq!(sphere.semiminor_axis(), sphere.semimajor_axis());
        Ok(())
    }

    #[test]
    fn curvatures() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // The curvatures at the North Pole
        assert!(
            (ellps.meridian_radius_of_curvature(90_f64.to_radians()) - 6_399_593.6259).abs() < 1e-4
        );
        assert!(
            (ellps.prime_vertical_radius_of_curvature(90_f64.to_radians()) - 6_399_593.6259).abs()
                < 1e-4
        );

        // The curvatures at the Equator
        assert!((ellps.meridian_radius_of_curvature(0.0) - 6_335_439.3271).abs() < 1.0e-4);
        assert!(
            (ellps.prime_vertical_radius_of_curvature(0.0) - ellps.semimajor_axis()).abs() < 1.0e-4
        );
        Ok(())
    }

    #[test]
    fn display() {
        assert_eq!(Ellipsoid::GRS80.to_string(), "GRS80");
        assert_eq!(Ellipsoid::CLARKE_1880_IGN.to_string(), "clrk80ign");
    }
}
