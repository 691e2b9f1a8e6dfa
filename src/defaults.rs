use crate::fourier::{IwToTau, TauToIw};
use crate::lattice::LatticeKind;
use crate::pade::PadeKind;

// config file
pub const CONFIG_FILE_NAME: &str = "gftool.toml";

// LATTICE
// lattice whose local Green's function is evaluated by the driver
pub const LATTICE: LatticeKind = LatticeKind::Bethe;
// half-bandwidth D of the density of states
pub const HALF_BANDWIDTH: f64 = 1.0;
// anisotropy of the rectangular lattice, t_y = scale * t_x
pub const RECTANGULAR_SCALE: f64 = 1.0;

// MESH
// inverse temperature beta = 1/(k_B T)
pub const BETA: f64 = 50.0;
// number of positive fermionic Matsubara frequencies
pub const N_MATSUBARA: usize = 1024;
// real frequency window for the analytic continuation
pub const OMEGA_MIN: f64 = -1.5;
pub const OMEGA_MAX: f64 = 1.5;
pub const N_OMEGA: usize = 301;
// distance of the real frequency mesh above the real axis
pub const ETA: f64 = 1.0e-2;

// FOURIER TRANSFORM
pub const IW2TAU_METHOD: IwToTau = IwToTau::Dft;
pub const TAU2IW_METHOD: TauToIw = TauToIw::FtLin;
// high-frequency moments of the Green's function, m_1 = 1 for a normalized DOS
pub const MOMENTS: [f64; 1] = [1.0];
// poles used to represent the high-frequency tail are spread over [-w, w]
pub const TAIL_POLE_WIDTH: f64 = 1.0;

// PADE
pub const PADE_KIND: PadeKind = PadeKind::Gf;
pub const PADE_N_MIN: usize = 10;
pub const PADE_N_MAX: usize = 60;
// approximants with a positive imaginary part larger than this are rejected
pub const PADE_THRESHOLD: f64 = 1.0e-8;

// OUTPUT
pub const OUTPUT_DIRECTORY: &str = ".";
pub const WRITE_FILES: bool = true;

// NUMERICS
// above this value of beta*eps the Bose function is evaluated with negative exponents
pub const BOSE_OVERFLOW: f64 = 700.0;
// maximal number of arithmetic-geometric mean iterations for elliptic integrals
pub const AGM_MAX_ITER: usize = 64;
// relative offset from the real axis used to select the retarded branch
pub const RETARDED_ETA: f64 = 1.0e-14;
// Brent's method
pub const ZBRENT_TOL: f64 = 1.0e-12;
pub const ZBRENT_MAX_ITER: usize = 100;
// maximal number of step doublings while searching a bracket for the chemical potential
pub const MAX_BRACKET_STEPS: usize = 64;
