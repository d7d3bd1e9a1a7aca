use super::*;
use log::trace;

/// Upper bound on the number of footpoint iterations
const MAX_ITER: usize = 64;

/// Footpoint iterations stop when the arc residual is below this (metres)
const ARC_TOL: f64 = 1e-5;

// ----- Meridian geometry -----------------------------------------------------
impl Ellipsoid {
    /// The meridional arc, *M*, from latitude `origin` to `latitude`,
    /// scaled by `k0`. Both latitudes in radians.
    ///
    /// The series in the third flattening, *n*, given by
    /// [Ordnance Survey (2020)](crate::Bibliography::Os20), eq. C3.
    #[must_use]
    pub fn meridional_arc(&self, latitude: f64, origin: f64, k0: f64) -> f64 {
        let n = self.third_flattening();
        let nn = n * n;
        let nnn = nn * n;
        let b = self.semiminor_axis();

        let dphi = latitude - origin;
        let sphi = latitude + origin;

        let m1 = (1. + n + 1.25 * nn + 1.25 * nnn) * dphi;
        let m2 = (3. * n + 3. * nn + 21. / 8. * nnn) * dphi.sin() * sphi.cos();
        let m3 = (15. / 8. * nn + 15. / 8. * nnn) * (2. * dphi).sin() * (2. * sphi).cos();
        let m4 = 35. / 24. * nnn * (3. * dphi).sin() * (3. * sphi).cos();

        b * k0 * (m1 - m2 + m3 - m4)
    }

    /// The footpoint latitude: the latitude at which the
    /// [meridional arc](Ellipsoid::meridional_arc) from `origin`
    /// equals `arc`.
    ///
    /// Iterates until the arc residual drops below 0.01 mm.
    pub fn footpoint_latitude(&self, arc: f64, origin: f64, k0: f64) -> Result<f64, Error> {
        let ak0 = self.a * k0;
        let mut phi = arc / ak0 + origin;

        for i in 0..MAX_ITER {
            let residual = arc - self.meridional_arc(phi, origin, k0);
            if residual.abs() < ARC_TOL {
                trace!("footpoint_latitude: converged after {i} iterations");
                return Ok(phi);
            }
            phi += residual / ak0;
            if !phi.is_finite() {
                break;
            }
        }
        Err(Error::NonConvergence("footpoint latitude", MAX_ITER))
    }
}
