//! Collection of lattice Green's functions, densities of states and their moments.
//!
//! Every lattice provides free functions `gf_z(z, D, ..)`, `dos(eps, D, ..)`
//! and `dos_moment(m, D, ..)` as well as a value type implementing [Lattice].
//! The Green's functions are the retarded ones for `Im z > 0`, the advanced
//! ones follow from `G(z*) = G(z)*`.
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bethe;
pub mod onedim;
pub mod rectangular;
pub mod simplecubic;
pub mod square;
pub mod triangular;

pub use bethe::Bethe;
pub use onedim::OneDim;
pub use rectangular::Rectangular;
pub use simplecubic::SimpleCubic;
pub use square::Square;
pub use triangular::Triangular;

/// Non-interacting tight-binding lattice characterized by its half-bandwidth.
pub trait Lattice: Send + Sync {
    fn name(&self) -> &'static str;

    fn half_bandwidth(&self) -> f64;

    /// Lower and upper edge of the band.
    fn band_edges(&self) -> (f64, f64) {
        (-self.half_bandwidth(), self.half_bandwidth())
    }

    /// Local Green's function at the complex frequency `z`.
    fn gf_z(&self, z: Complex64) -> Complex64;

    /// Density of states, zero outside of the band.
    fn dos(&self, eps: f64) -> f64;

    /// Moment `∫ dϵ ϵ^m DOS(ϵ)` of the density of states.
    fn dos_moment(&self, m: usize) -> f64;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    Bethe,
    OneDim,
    Square,
    Rectangular,
    Triangular,
    SimpleCubic,
}

impl LatticeKind {
    /// Lattice with the given half-bandwidth, `scale` is only used by the rectangular lattice.
    pub fn build(self, half_bandwidth: f64, scale: f64) -> Box<dyn Lattice> {
        match self {
            LatticeKind::Bethe => Box::new(Bethe { half_bandwidth }),
            LatticeKind::OneDim => Box::new(OneDim { half_bandwidth }),
            LatticeKind::Square => Box::new(Square { half_bandwidth }),
            LatticeKind::Rectangular => Box::new(Rectangular {
                half_bandwidth,
                scale,
            }),
            LatticeKind::Triangular => Box::new(Triangular { half_bandwidth }),
            LatticeKind::SimpleCubic => Box::new(SimpleCubic { half_bandwidth }),
        }
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            LatticeKind::Bethe => "bethe",
            LatticeKind::OneDim => "onedim",
            LatticeKind::Square => "square",
            LatticeKind::Rectangular => "rectangular",
            LatticeKind::Triangular => "triangular",
            LatticeKind::SimpleCubic => "simplecubic",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;

    #[test]
    fn build_all_kinds() {
        let kinds = [
            LatticeKind::Bethe,
            LatticeKind::OneDim,
            LatticeKind::Square,
            LatticeKind::Rectangular,
            LatticeKind::Triangular,
            LatticeKind::SimpleCubic,
        ];
        let z = Complex64::new(0.1, 1e5);
        for kind in kinds.iter() {
            let lattice = kind.build(1.5, 1.0);
            assert_eq!(lattice.half_bandwidth(), 1.5);
            assert!((lattice.gf_z(z) * z - 1.0).norm() < 1e-6, "{} not normalized", kind);
            assert!(lattice.dos_moment(0).abs_diff_eq(&1.0, 1e-14));
        }
    }
}
