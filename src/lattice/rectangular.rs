//! 2D rectangular lattice with anisotropic hopping.
//!
//! The hopping in y-direction is `scale` times the hopping in x-direction,
//! `scale = 1` recovers the square lattice.
use crate::defaults::RETARDED_ETA;
use crate::lattice::{onedim, Lattice};
use crate::special::ellipk;
use crate::utils::binom;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Local Green's function of the 2D rectangular lattice.
///
/// ```text
/// G(z) = 2/(πD'ζ) K(4γ/(ζ² - (γ-1)²)) / sqrt(1 - (γ-1)²/ζ²)
/// ```
///
/// with `D' = D/(1+γ)`, `ζ = z/D'` and the anisotropy `γ = scale`.
pub fn gf_z(z: Complex64, half_bandwidth: f64, scale: f64) -> Complex64 {
    let reduced_bandwidth: f64 = half_bandwidth / (1.0 + scale);
    let z_rel: Complex64 = z / reduced_bandwidth;
    let shift: f64 = (scale - 1.0).powi(2);
    let elliptic: Complex64 = ellipk(4.0 * scale / (z_rel * z_rel - shift));
    let z_rel_inv: Complex64 = 1.0 / z_rel;
    let one: Complex64 = Complex64::new(1.0, 0.0);
    let prefactor: Complex64 = one / (one - shift * z_rel_inv * z_rel_inv).sqrt();
    2.0 / (PI * reduced_bandwidth) * z_rel_inv * prefactor * elliptic
}

/// DOS of the rectangular lattice, the imaginary part of the retarded Green's function.
pub fn dos(eps: f64, half_bandwidth: f64, scale: f64) -> f64 {
    if eps.abs() >= half_bandwidth {
        return 0.0;
    }
    let z: Complex64 = Complex64::new(eps, RETARDED_ETA * half_bandwidth);
    (-gf_z(z, half_bandwidth, scale).im / PI).max(0.0)
}

/// Moment `∫ dϵ ϵ^m DOS(ϵ)`.
///
/// The dispersion is the sum of two independent chains with half-bandwidths
/// `D'` and `γD'`, so the moments are the binomial convolution of the chain moments.
pub fn dos_moment(m: usize, half_bandwidth: f64, scale: f64) -> f64 {
    let reduced_bandwidth: f64 = half_bandwidth / (1.0 + scale);
    (0..=m)
        .map(|j| {
            binom(m, j)
                * onedim::dos_moment(j, reduced_bandwidth)
                * onedim::dos_moment(m - j, scale * reduced_bandwidth)
        })
        .sum()
}

#[derive(Debug, Clone, Copy)]
pub struct Rectangular {
    pub half_bandwidth: f64,
    pub scale: f64,
}

impl Lattice for Rectangular {
    fn name(&self) -> &'static str {
        "rectangular"
    }

    fn half_bandwidth(&self) -> f64 {
        self.half_bandwidth
    }

    fn gf_z(&self, z: Complex64) -> Complex64 {
        gf_z(z, self.half_bandwidth, self.scale)
    }

    fn dos(&self, eps: f64) -> f64 {
        dos(eps, self.half_bandwidth, self.scale)
    }

    fn dos_moment(&self, m: usize) -> f64 {
        dos_moment(m, self.half_bandwidth, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;
    use crate::lattice::square;

    #[test]
    fn isotropic_limit() {
        let d: f64 = 1.3;
        for z in [
            Complex64::new(0.3, 0.2),
            Complex64::new(-0.9, 0.01),
            Complex64::new(2.0, 0.5),
            Complex64::new(0.2, -0.3),
        ]
        .iter()
        {
            assert!((gf_z(*z, d, 1.0) - square::gf_z(*z, d)).norm() < 1e-12);
        }
        for m in 0..8 {
            assert!(dos_moment(m, d, 1.0).abs_diff_eq(&square::dos_moment(m, d), 1e-12));
        }
        assert!(dos(0.4, d, 1.0).abs_diff_eq(&square::dos(0.4, d), 1e-8));
    }

    #[test]
    fn second_moment() {
        // t_x² + t_y² summed over two neighbors each
        let d: f64 = 1.0;
        let scale: f64 = 0.5;
        let t_x: f64 = 0.5 * d / (1.0 + scale);
        let expected: f64 = 2.0 * t_x * t_x * (1.0 + scale * scale);
        assert!(dos_moment(2, d, scale).abs_diff_eq(&expected, 1e-14));
        assert_eq!(dos_moment(3, d, scale), 0.0);
    }
}
