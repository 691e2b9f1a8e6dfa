//! Collection of commonly used Green's functions and utilities.
//!
//! The top level contains the Fermi and Bose statistics, Matsubara and Padé
//! frequencies, Green's functions given by a finite number of poles and the
//! occupation of Green's functions on the Matsubara axis. The submodules
//! contain the Fourier transforms between imaginary time and Matsubara
//! frequencies ([fourier]), lattice Green's functions ([lattice]),
//! decompositions of matrix valued Green's functions ([matrix]) and the Padé
//! analytic continuation ([pade]).
//!
//! ```
//! use approx::AbsDiffEq;
//! use gftool::lattice::{Bethe, Lattice};
//!
//! let beta: f64 = 10.0;
//! let lattice = Bethe { half_bandwidth: 1.0 };
//! let iws = gftool::matsubara_frequencies(0..128, beta);
//! let gf_iw = iws.mapv(|iw| lattice.gf_z(iw));
//! // particle-hole symmetric DOS is half filled
//! let occ = gftool::density_iw(iws.view(), gf_iw.view(), beta, &[1.0]).unwrap();
//! assert!(occ.abs_diff_eq(&0.5, 1e-12));
//! ```
pub mod defaults;
pub mod density;
pub mod driver;
pub mod error;
pub mod fourier;
pub mod io;
pub mod lattice;
pub mod matrix;
pub mod pade;
pub mod pole;
pub mod special;
pub mod statistics;
pub mod utils;

pub use density::{chemical_potential, density_iw};
pub use error::{GfError, GfResult};
pub use pole::{pole_gf_d1_z, pole_gf_moments, pole_gf_tau, pole_gf_tau_b, pole_gf_z, PoleGf};
pub use statistics::{
    bose_fct, fermi_fct, fermi_fct_complex, fermi_fct_d1, fermi_fct_inv, matsubara_frequencies,
    matsubara_frequencies_b, pade_frequencies,
};
