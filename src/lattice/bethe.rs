//! Bethe lattice with infinite coordination number.
//!
//! The half-bandwidth corresponds to a nearest neighbor hopping of `t = D/2`,
//! the density of states is the semicircle.
use crate::lattice::Lattice;
use crate::utils::binom;
use num_complex::Complex64;
use std::f64::consts::PI;

// sqrt(z - D) sqrt(z + D), branch cut only on [-D, D]
fn sqrt_band(z_rel: Complex64) -> Complex64 {
    (z_rel - 1.0).sqrt() * (z_rel + 1.0).sqrt()
}

/// Local Green's function of the Bethe lattice for infinite coordination number.
///
/// ```text
/// G(z) = 2(z - sqrt(z² - D²))/D²
/// ```
pub fn gf_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    let z_rel: Complex64 = z / half_bandwidth;
    2.0 / (half_bandwidth * (z_rel + sqrt_band(z_rel)))
}

/// First derivative of the Green's function, `G'(z) = -G(z)/sqrt(z² - D²)`.
pub fn gf_d1_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    let sqrt_term: Complex64 = half_bandwidth * sqrt_band(z / half_bandwidth);
    -gf_z(z, half_bandwidth) / sqrt_term
}

/// Second derivative of the Green's function.
pub fn gf_d2_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    let sqrt_term: Complex64 = half_bandwidth * sqrt_band(z / half_bandwidth);
    let gf: Complex64 = gf_z(z, half_bandwidth);
    let gf_d1: Complex64 = -gf / sqrt_term;
    -gf_d1 / sqrt_term + gf * z / (sqrt_term * sqrt_term * sqrt_term)
}

/// Hilbert transform `∫ dϵ DOS(ϵ)/(ξ - ϵ)` of the semicircular DOS.
pub fn hilbert_transform(xi: Complex64, half_bandwidth: f64) -> Complex64 {
    gf_z(xi, half_bandwidth)
}

/// Nearest neighbor hopping corresponding to `half_bandwidth`.
pub fn hopping(half_bandwidth: f64) -> f64 {
    0.5 * half_bandwidth
}

/// Semicircular DOS `2/(πD) sqrt(1 - (ϵ/D)²)`.
pub fn dos(eps: f64, half_bandwidth: f64) -> f64 {
    let eps_rel: f64 = eps / half_bandwidth;
    if eps_rel.abs() >= 1.0 {
        return 0.0;
    }
    2.0 / (PI * half_bandwidth) * (1.0 - eps_rel * eps_rel).sqrt()
}

/// Moment `∫ dϵ ϵ^m DOS(ϵ)`, given by the Catalan numbers for even `m`.
pub fn dos_moment(m: usize, half_bandwidth: f64) -> f64 {
    if m % 2 == 1 {
        return 0.0;
    }
    let k: usize = m / 2;
    let catalan: f64 = binom(2 * k, k) / (k + 1) as f64;
    half_bandwidth.powi(m as i32) * catalan / 4f64.powi(k as i32)
}

#[derive(Debug, Clone, Copy)]
pub struct Bethe {
    pub half_bandwidth: f64,
}

impl Lattice for Bethe {
    fn name(&self) -> &'static str {
        "Bethe"
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
    fn retarded_branch() {
        let d: f64 = 1.3;
        for x in [-2.0, -0.9, 0.0, 0.4, 1.2, 3.0].iter() {
            let gf = gf_z(Complex64::new(*x, 1e-3), d);
            assert!(gf.im <= 0.0);
            // quadratic equation D²/4 G² - zG + 1 = 0
            let z = Complex64::new(*x, 1e-3);
            assert!((0.25 * d * d * gf * gf - z * gf + 1.0).norm() < 1e-12);
        }
        let z = Complex64::new(0.0, 1e8);
        assert!((gf_z(z, d) * z - 1.0).norm() < 1e-10);
    }

    #[test]
    fn imaginary_part_is_dos() {
        let d: f64 = 1.0;
        for eps in [-0.8, -0.2, 0.5].iter() {
            let gf = gf_z(Complex64::new(*eps, 1e-12), d);
            assert!((-gf.im / PI).abs_diff_eq(&dos(*eps, d), 1e-8));
        }
        assert_eq!(dos(1.5, d), 0.0);
    }

    #[test]
    fn derivatives() {
        let d: f64 = 2.0;
        let z = Complex64::new(0.7, 0.4);
        let h: f64 = 1e-5;
        let d1 = (gf_z(z + h, d) - gf_z(z - h, d)) / (2.0 * h);
        assert!((gf_d1_z(z, d) - d1).norm() < 1e-8);
        let d2 = (gf_d1_z(z + h, d) - gf_d1_z(z - h, d)) / (2.0 * h);
        assert!((gf_d2_z(z, d) - d2).norm() < 1e-7);
    }

    #[test]
    fn moments() {
        let d: f64 = 2.0;
        assert_eq!(dos_moment(0, d), 1.0);
        assert_eq!(dos_moment(1, d), 0.0);
        assert!(dos_moment(2, d).abs_diff_eq(&(d * d / 4.0), 1e-14));
        assert!(dos_moment(4, d).abs_diff_eq(&(2.0 * d.powi(4) / 16.0), 1e-14));
        assert!(hopping(d).abs_diff_eq(&1.0, 1e-14));
    }
}
