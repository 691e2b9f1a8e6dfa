//! 3D simple cubic lattice with nearest neighbor hopping `t = D/6`.
use crate::defaults::RETARDED_ETA;
use crate::lattice::Lattice;
use crate::special::{ellipk, ellipk_real};
use crate::utils::binom;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Local Green's function of the 3D simple cubic lattice.
///
/// Uses the representation of Delves and Joyce (Ann. Phys. 291, 71 (2001))
/// as product of two complete elliptic integrals with the same parameter:
///
/// ```text
/// G(ζ) = 3/D (1 - 9ξ⁴) (2K(k²)/π)² / ((1-ξ)³(1+3ξ) ζ),   ζ = 3z/D
/// k² = 16ξ³/((1-ξ)³(1+3ξ)),   ξ = sqrt(1 - sqrt(1 - ζ⁻²)) / sqrt(1 + sqrt(1 - 9ζ⁻²))
/// ```
pub fn gf_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    let one: Complex64 = Complex64::new(1.0, 0.0);
    let scale: f64 = 3.0 / half_bandwidth;
    let z_rel: Complex64 = scale * z;
    let z_inv2: Complex64 = one / (z_rel * z_rel);
    let xi: Complex64 = (one - (one - z_inv2).sqrt()).sqrt() / (one + (one - 9.0 * z_inv2).sqrt()).sqrt();
    let denominator: Complex64 = one / ((one - xi).powi(3) * (one + 3.0 * xi));
    let k2: Complex64 = 16.0 * xi.powi(3) * denominator;
    let elliptic: Complex64 = 2.0 / PI * ellipk(k2);
    scale * (one - 9.0 * xi.powi(4)) * elliptic * elliptic * denominator / z_rel
}

/// DOS of the simple cubic lattice.
///
/// Evaluated as imaginary part of the retarded Green's function, at `ϵ = 0`
/// the limit `3/(π³D) 2 K(k₀²) K(1-k₀²)` with `k₀² = (2-√3)/4` is used.
pub fn dos(eps: f64, half_bandwidth: f64) -> f64 {
    let eps: f64 = eps.abs();
    if eps >= half_bandwidth {
        return 0.0;
    }
    if eps == 0.0 {
        let k0: f64 = 0.25 * (2.0 - 3f64.sqrt());
        return 6.0 / (PI.powi(3) * half_bandwidth) * ellipk_real(k0) * ellipk_real(1.0 - k0);
    }
    let z: Complex64 = Complex64::new(eps, RETARDED_ETA * half_bandwidth);
    (-gf_z(z, half_bandwidth).im / PI).max(0.0)
}

/// Moment `∫ dϵ ϵ^m DOS(ϵ)`.
///
/// The number of closed walks with `2k` steps on the simple cubic lattice is
/// `binom(2k, k) Σ_j binom(k, j)² binom(2j, j)`.
pub fn dos_moment(m: usize, half_bandwidth: f64) -> f64 {
    if m % 2 == 1 {
        return 0.0;
    }
    let k: usize = m / 2;
    let walks: f64 = binom(2 * k, k)
        * (0..=k)
            .map(|j| binom(k, j).powi(2) * binom(2 * j, j))
            .sum::<f64>();
    (half_bandwidth / 6.0).powi(m as i32) * walks
}

#[derive(Debug, Clone, Copy)]
pub struct SimpleCubic {
    pub half_bandwidth: f64,
}

impl Lattice for SimpleCubic {
    fn name(&self) -> &'static str {
        "simple cubic"
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;

    #[test]
    fn center_of_band() {
        let d: f64 = 1.0;
        // the DOS is continuous at the band center
        assert!(dos(0.0, d).abs_diff_eq(&dos(1e-6, d), 1e-4));
        assert!(dos(0.3, d).abs_diff_eq(&dos(-0.3, d), 1e-15));
        assert_eq!(dos(1.0, d), 0.0);
    }

    #[test]
    fn walks() {
        let d: f64 = 6.0;
        assert_eq!(dos_moment(0, d), 1.0);
        assert!(dos_moment(2, d).abs_diff_eq(&6.0, 1e-12));
        assert!(dos_moment(4, d).abs_diff_eq(&90.0, 1e-12));
        assert!(dos_moment(6, d).abs_diff_eq(&1860.0, 1e-9));
        assert_eq!(dos_moment(5, d), 0.0);
    }

    #[test]
    fn asymptotics() {
        let z = Complex64::new(0.3, 1e4);
        assert!((gf_z(z, 1.0) * z - 1.0).norm() < 1e-7);
    }
}
