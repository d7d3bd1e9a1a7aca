//! The full and abridged Molodensky formulas, following
//! [Deakin (2004)](crate::Bibliography::Dea04) and IOGP Guidance Note 7-2.
#![allow(non_snake_case)]
use crate::ellipsoid::Ellipsoid;

/// Precomputed parameters for a Molodensky shift from one ellipsoid to another
pub(super) struct Molodensky {
    ellps: Ellipsoid,
    a: f64,
    f: f64,
    es: f64,
    dx: f64,
    dy: f64,
    dz: f64,
    da: f64,
    df: f64,
    adffda: f64,
    abridged: bool,
}

impl Molodensky {
    pub(super) fn new(
        from: &Ellipsoid,
        to: &Ellipsoid,
        translation: [f64; 3],
        abridged: bool,
    ) -> Molodensky {
        let a = from.semimajor_axis();
        let f = from.flattening();
        let da = to.semimajor_axis() - a;
        let df = to.flattening() - f;
        Molodensky {
            ellps: *from,
            a,
            f,
            es: from.eccentricity_squared(),
            dx: translation[0],
            dy: translation[1],
            dz: translation[2],
            da,
            df,
            adffda: a * df + f * da,
            abridged,
        }
    }

    /// The corrections (Δλ, Δφ, Δh) at (λ, φ, h), angles in radians.
    /// NaN at the poles, where Δλ is undefined.
    pub(super) fn deltas(&self, lam: f64, phi: f64, h: f64) -> [f64; 3] {
        let (slam, clam) = lam.sin_cos();
        let (sphi, cphi) = phi.sin_cos();

        let N = self.ellps.prime_vertical_radius_of_curvature(phi);
        let M = self.ellps.meridian_radius_of_curvature(phi);

        let fac = self.dx * clam + self.dy * slam;

        if self.abridged {
            let dphi = (-fac * sphi + self.dz * cphi + self.adffda * (2.0 * phi).sin()) / M;

            let dlam_denom = N * cphi;
            if dlam_denom == 0.0 {
                return [f64::NAN; 3];
            }
            let dlam = (self.dy * clam - self.dx * slam) / dlam_denom;

            let dh = fac * cphi + (self.dz + self.adffda * sphi) * sphi - self.da;
            return [dlam, dphi, dh];
        }

        let mut dphi = (self.dz + ((N * self.es * sphi * self.da) / self.a)) * cphi - fac * sphi
            + (M / (1.0 - self.f) + N * (1.0 - self.f)) * self.df * sphi * cphi;
        let dphi_denom = M + h;
        if dphi_denom == 0.0 {
            return [f64::NAN; 3];
        }
        dphi /= dphi_denom;

        let dlam_denom = (N + h) * cphi;
        if dlam_denom == 0.0 {
            return [f64::NAN; 3];
        }
        let dlam = (self.dy * clam - self.dx * slam) / dlam_denom;

        let dh = fac * cphi + self.dz * sphi - (self.a / N) * self.da
            + N * (1.0 - self.f) * self.df * sphi * sphi;

        [dlam, dphi, dh]
    }
}
