use super::*;

use std::f64::consts::FRAC_PI_2;

// ----- Geographic <--> Earth centered cartesian ------------------------------
impl Ellipsoid {
    /// Earth centered cartesian (X, Y, Z) in metres, from longitude and
    /// latitude in radians and ellipsoidal height in metres.
    ///
    /// See [Bowring (1976)](crate::Bibliography::Bow76).
    #[must_use]
    pub fn cartesian(&self, lam: f64, phi: f64, h: f64) -> [f64; 3] {
        let nu = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let r = (nu + h) * cosphi;
        [
            r * coslam,
            r * sinlam,
            (nu * (1.0 - self.eccentricity_squared()) + h) * sinphi,
        ]
    }

    /// (longitude, latitude, height) from Earth centered cartesian
    /// coordinates. Angles in radians, height in metres.
    ///
    /// Non-iterative: Bowring's auxiliary angle in the closed form of
    /// Fukushima (1999), with the height expression recommended by
    /// [Bowring (1985)](crate::Bibliography::Bow85).
    #[must_use]
    pub fn geographic(&self, cartesian: [f64; 3]) -> (f64, f64, f64) {
        let [x, y, z] = cartesian;
        let a = self.a;
        let b = self.semiminor_axis();
        let es = self.eccentricity_squared();
        let eps = self.second_eccentricity_squared();

        let lam = y.atan2(x);

        // Distance from the rotation axis. Points on the axis are
        // handled separately, to stay clear of 0/0.
        let p = x.hypot(y);
        if p < 1.0e-12 {
            return (lam, FRAC_PI_2.copysign(z), z.abs() - b);
        }

        // Parametric latitude, as (cos, sin)
        let t = (z * a) / (p * b);
        let cosbeta = 1.0 / (1.0 + t * t).sqrt();
        let sinbeta = cosbeta * t;

        let num = z + eps * b * sinbeta.powi(3);
        let den = p - es * a * cosbeta.powi(3);
        let phi = num.atan2(den);

        let len = num.hypot(den);
        let (sinphi, cosphi) = (num / len, den / len);
        let nu = a / (1.0 - sinphi * sinphi * es).sqrt();
        let h = p * cosphi + z * sinphi - a * a / nu;

        (lam, phi, h)
    }
}
