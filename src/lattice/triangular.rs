//! 2D triangular lattice.
//!
//! The dispersion `ϵ_k = 2t(cos k₁ + cos k₂ + cos(k₁+k₂))` with the hopping
//! `t = 2D/9` is not particle-hole symmetric: the band is `[-2D/3, 4D/3]`.
//! The DOS has a logarithmic van Hove singularity at `ϵ = -4D/9`.
use crate::lattice::Lattice;
use crate::special::{ellipk, ellipk_real};
use ndarray::prelude::*;
use num_complex::Complex64;
use std::f64::consts::PI;

// neighbors of the triangular lattice in the basis of the primitive vectors
const NEIGHBORS: [(isize, isize); 6] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (-1, -1)];

/// Local Green's function of the 2D triangular lattice.
///
/// ```text
/// G(z) = 4 K(k²) / (πD' (r-1)^{3/2} (r+3)^{1/2}),   k² = 16r/((r-1)³(r+3))
/// ```
///
/// with `D' = 4D/9`, `r = sqrt(2z/D' + 3)` (Horiguchi, J. Math. Phys. 13, 1411 (1972)).
/// For `Re r < 1` and `Im k² < 0` the elliptic integral crosses its branch cut
/// and the retarded sheet is `K(k²) + 2i K(1-k²)`.
pub fn gf_z(z: Complex64, half_bandwidth: f64) -> Complex64 {
    if z.im < 0.0 {
        return gf_z(z.conj(), half_bandwidth).conj();
    }
    let reduced_bandwidth: f64 = 4.0 * half_bandwidth / 9.0;
    let z_rel: Complex64 = z / reduced_bandwidth;
    let r: Complex64 = (2.0 * z_rel + 3.0).sqrt();
    let r_m1: Complex64 = r - 1.0;
    let r_p3: Complex64 = r + 3.0;
    let prefactor: Complex64 = 4.0 / (r_m1.sqrt().powi(3) * r_p3.sqrt());
    let k2: Complex64 = 16.0 * r / (r_m1.powi(3) * r_p3);
    let mut elliptic: Complex64 = ellipk(k2);
    if r.re < 1.0 && k2.im < 0.0 {
        elliptic += Complex64::new(0.0, 2.0) * ellipk(1.0 - k2);
    }
    prefactor * elliptic / (PI * reduced_bandwidth)
}

/// DOS of the triangular lattice, closed form on both sides of the van Hove singularity.
pub fn dos(eps: f64, half_bandwidth: f64) -> f64 {
    let reduced_bandwidth: f64 = 4.0 * half_bandwidth / 9.0;
    let eps_rel: f64 = eps / reduced_bandwidth;
    if !(-1.5..=3.0).contains(&eps_rel) {
        return 0.0;
    }
    let r: f64 = (2.0 * eps_rel + 3.0).sqrt();
    let polynomial: f64 = (r + 1.0).powi(3) * (3.0 - r);
    let value: f64 = if eps_rel <= -1.0 {
        ellipk_real(16.0 * r / polynomial) / polynomial.sqrt()
    } else {
        ellipk_real(polynomial / (16.0 * r)) / (4.0 * r.sqrt())
    };
    4.0 / (PI * PI * reduced_bandwidth) * value
}

/// Number of closed walks with `steps` nearest neighbor hops.
fn closed_walks(steps: usize) -> f64 {
    let size: usize = 2 * steps + 1;
    let mut counts: Array2<f64> = Array2::zeros((size, size));
    counts[[steps, steps]] = 1.0;
    for _ in 0..steps {
        let mut next: Array2<f64> = Array2::zeros((size, size));
        for ((i, j), count) in counts.indexed_iter() {
            if *count == 0.0 {
                continue;
            }
            for (di, dj) in NEIGHBORS.iter() {
                let ni: isize = i as isize + di;
                let nj: isize = j as isize + dj;
                if ni >= 0 && nj >= 0 && (ni as usize) < size && (nj as usize) < size {
                    next[[ni as usize, nj as usize]] += count;
                }
            }
        }
        counts = next;
    }
    counts[[steps, steps]]
}

/// Moment `∫ dϵ ϵ^m DOS(ϵ) = t^m W_m` with the number `W_m` of closed walks of length `m`.
///
/// Odd moments don't vanish, the smallest closed loop is a triangle.
pub fn dos_moment(m: usize, half_bandwidth: f64) -> f64 {
    let hopping: f64 = 2.0 * half_bandwidth / 9.0;
    hopping.powi(m as i32) * closed_walks(m)
}

#[derive(Debug, Clone, Copy)]
pub struct Triangular {
    pub half_bandwidth: f64,
}

impl Lattice for Triangular {
    fn name(&self) -> &'static str {
        "triangular"
    }

    fn half_bandwidth(&self) -> f64 {
        self.half_bandwidth
    }

    fn band_edges(&self) -> (f64, f64) {
        (-2.0 * self.half_bandwidth / 3.0, 4.0 * self.half_bandwidth / 3.0)
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
    fn walks() {
        assert_eq!(closed_walks(0), 1.0);
        assert_eq!(closed_walks(1), 0.0);
        assert_eq!(closed_walks(2), 6.0);
        assert_eq!(closed_walks(3), 12.0);
        assert_eq!(closed_walks(4), 90.0);
    }

    #[test]
    fn band_edges() {
        let d: f64 = 1.0;
        assert_eq!(dos(-0.7, d), 0.0);
        assert_eq!(dos(1.4, d), 0.0);
        assert!(dos(0.0, d) > 0.0);
        // first moment vanishes
        assert!(dos_moment(1, d).abs_diff_eq(&0.0, 1e-15));
        assert!(dos_moment(2, d).abs_diff_eq(&(1.5 * (4.0 / 9.0f64).powi(2)), 1e-14));
    }

    #[test]
    fn van_hove_sheet() {
        // Green's function is continuous across the sheet boundary near the singularity
        let d: f64 = 1.0;
        for x in [-0.6, -0.55, -0.5, -0.45].iter() {
            let gf = gf_z(Complex64::new(*x, 1e-3), d);
            assert!(gf.im < 0.0);
            let gf_close = gf_z(Complex64::new(*x + 1e-6, 1e-3), d);
            assert!((gf - gf_close).norm() < 1e-3);
        }
    }
}
