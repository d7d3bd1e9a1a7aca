use super::{MAX_ITER, TOL};
use crate::Error;
use log::trace;
use std::f64::consts::FRAC_PI_2;

/// ts is the function t(𝜙) of Snyder (1987), eq. (15-9), i.e. the
/// exponential of the negated isometric latitude, exp(-𝜓), evaluated
/// in a numerically stable way.
///
/// Inputs:
///   (sin 𝜙, cos 𝜙): trigs of geographic latitude
///   e: eccentricity of the ellipsoid
/// Output:
///   ts: exp(-𝜓)  =  1 / (tan 𝜒 + sec 𝜒)
///   where 𝜓 is the isometric latitude (dimensionless)
///   and 𝜒 is the conformal latitude (radians)
///
/// At the north pole ts is 0, at the south pole it is infinite.
pub fn ts(sincos: (f64, f64), e: f64) -> f64 {
    // exp(-asinh(tan 𝜙))
    //    = 1 / (tan 𝜙 + sec 𝜙)
    //    = cos 𝜙 / (1 + sin 𝜙)  good for 𝜙 > 0
    //    = (1 - sin 𝜙) / cos 𝜙  good for 𝜙 < 0
    let factor = if sincos.0 > 0. {
        sincos.1 / (1. + sincos.0)
    } else {
        (1. - sincos.0) / sincos.1
    };
    (e * (e * sincos.0).atanh()).exp() * factor
}

/// Snyder (1987) eq. 14-15, the m(𝜙) of the conics, PROJ's pj_msfn()
pub fn msfn(sincos: (f64, f64), es: f64) -> f64 {
    sincos.1 / (1. - sincos.0 * sincos.0 * es).sqrt()
}

/// Snyder (1987) eq. 3-12, the authalic q(𝜙), PROJ's pj_qsfn()
pub fn qs(sinphi: f64, e: f64) -> f64 {
    let es = e * e;
    let one_es = 1.0 - es;

    if e < 1e-7 {
        return 2.0 * sinphi;
    }

    let con = e * sinphi;
    let div1 = 1.0 - con * con;
    let div2 = 1.0 + con;

    one_es * (sinphi / div1 - (0.5 / e) * ((1. - con) / div2).ln())
}

/// Inverse of [ts]: the latitude 𝜙 for which t(𝜙) = `ts0`.
///
/// Snyder (1987) eq. 7-9, iterated from the spherical seed
/// 𝜙 = π/2 - 2 atan(t) until the correction drops below 1e-12 radians.
pub fn phi2(ts0: f64, e: f64) -> Result<f64, Error> {
    let half_e = e / 2.;
    let mut phi = FRAC_PI_2 - 2. * ts0.atan();

    for i in 0..MAX_ITER {
        let con = e * phi.sin();
        let next = FRAC_PI_2 - 2. * (ts0 * ((1. - con) / (1. + con)).powf(half_e)).atan();
        let delta = next - phi;
        phi = next;
        if delta.abs() < TOL {
            trace!("phi2: converged after {} iterations", i + 1);
            return Ok(phi);
        }
        if phi.is_nan() {
            break;
        }
    }
    Err(Error::NonConvergence("phi2", MAX_ITER))
}

/// Inverse of [qs]: the latitude 𝜙 for which q(𝜙) = `q`.
///
/// Snyder (1987) eq. 3-16, iterated from the spherical seed asin(q/2).
/// Values of |q| at the polar limit q(±π/2) return the pole directly.
pub fn phi_from_q(q: f64, e: f64) -> Result<f64, Error> {
    if e < 1e-7 {
        if q.abs() > 2. + 1e-9 {
            return Err(Error::OutOfDomain("authalic latitude", format!("q = {q}")));
        }
        return Ok((q / 2.).clamp(-1., 1.).asin());
    }

    let qp = qs(1., e);
    if q.abs() > qp + 1e-9 {
        return Err(Error::OutOfDomain("authalic latitude", format!("q = {q}")));
    }
    if q.abs() > qp - 1e-10 {
        return Ok(FRAC_PI_2.copysign(q));
    }

    let es = e * e;
    let one_es = 1. - es;
    let mut phi = (q / 2.).clamp(-1., 1.).asin();

    for i in 0..MAX_ITER {
        let (s, c) = phi.sin_cos();
        let con = e * s;
        let com = 1. - con * con;
        let delta = com * com / (2. * c)
            * (q / one_es - s / com + ((1. - con) / (1. + con)).ln() / (2. * e));
        phi += delta;
        if delta.abs() < TOL {
            trace!("phi_from_q: converged after {} iterations", i + 1);
            return Ok(phi);
        }
        if phi.is_nan() {
            break;
        }
    }
    Err(Error::NonConvergence("phi_from_q", MAX_ITER))
}

// ----- Tests ---------------------------------------------------------------------
