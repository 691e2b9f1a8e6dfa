//! 2D square lattice with nearest neighbor hopping `t = D/4`.
use crate::lattice::Lattice;
use crate::special::{ellipk, ellipk_real};
use crate::utils::binom;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Local Green's function of the 2D square lattice.
///
/// ```text
/// G(z) = 2/(πz) K(D²/z²)
/// ```
///
/// with the complete elliptic integral of the first kind `K`.
pub fn gf_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    let z_rel_inv: Complex64 = half_bandwidth / z;
    let elliptic: Complex64 = ellipk(z_rel_inv * z_rel_inv);
    2.0 / (PI * half_bandwidth) * z_rel_inv * elliptic
}

/// DOS `2/(π²D) K(1 - ϵ²/D²)` with the logarithmic van Hove singularity at `ϵ = 0`.
pub fn dos(eps: f64, half_bandwidth: f64) -> f64 {
    let eps_rel: f64 = eps / half_bandwidth;
    if eps_rel.abs() >= 1.0 {
        return 0.0;
    }
    2.0 / (PI * PI * half_bandwidth) * ellipk_real(1.0 - eps_rel * eps_rel)
}

/// Moment `∫ dϵ ϵ^m DOS(ϵ) = t^m binom(m, m/2)²` for even `m`.
pub fn dos_moment(m: usize, half_bandwidth: f64) -> f64 {
    if m % 2 == 1 {
        return 0.0;
    }
    let hopping: f64 = 0.25 * half_bandwidth;
    hopping.powi(m as i32) * binom(m, m / 2).powi(2)
}

#[derive(Debug, Clone, Copy)]
pub struct Square {
    pub half_bandwidth: f64,
}

impl Lattice for Square {
    fn name(&self) -> &'static str {
        "square"
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
