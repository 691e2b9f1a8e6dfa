//! One-dimensional chain with nearest neighbor hopping `t = D/2`.
use crate::lattice::Lattice;
use crate::utils::binom;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Local Green's function of the one-dimensional lattice.
///
/// ```text
/// G(z) = 1/sqrt(z - D)/sqrt(z + D)
/// ```
pub fn gf_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    let z_rel: Complex64 = z / half_bandwidth;
    1.0 / (half_bandwidth * (z_rel - 1.0).sqrt() * (z_rel + 1.0).sqrt())
}

/// DOS `1/(π sqrt(D² - ϵ²))` with inverse square root singularities at the band edges.
pub fn dos(eps: f64, half_bandwidth: f64) -> f64 {
    if eps.abs() >= half_bandwidth {
        return 0.0;
    }
    1.0 / (PI * (half_bandwidth * half_bandwidth - eps * eps).sqrt())
}

/// Moment `∫ dϵ ϵ^m DOS(ϵ)`, the central binomial coefficients for even `m`.
pub fn dos_moment(m: usize, half_bandwidth: f64) -> f64 {
    if m % 2 == 1 {
        return 0.0;
    }
    let k: usize = m / 2;
    half_bandwidth.powi(m as i32) * binom(2 * k, k) / 4f64.powi(k as i32)
}

#[derive(Debug, Clone, Copy)]
pub struct OneDim {
    pub half_bandwidth: f64,
}

impl Lattice for OneDim {
    fn name(&self) -> &'static str {
        "one-dimensional"
    }

    fn half_bandwidth(&self) -> f64 {
        self.half_bandwidth
    }

    fn gf_z(&self, z: Complex64) -> Complex64 {
        gf_z(z, self.half_bandwidth)
    }

    fn dos(&self, eps: f64) -> f64 {
        dos(eps, self.half_bandwidth)
    }

    fn dos_moment(&self, m: usize) -> f64 {
        dos_moment(m, self.half_bandwidth)
    }
}
