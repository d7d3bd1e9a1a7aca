//! Miscellaneous math functions for general use

/// Free functions used in more than one module of the crate.
pub mod ancillary;

/// Free functions for handling and converting between
/// different representations of angles.
pub mod angular;

/// Upper bound on the number of iterations in any of the convergent
/// inverses of the crate
pub const MAX_ITER: usize = 32;

/// Convergence criterion for latitude iterations, in radians
pub const TOL: f64 = 1e-12;
