//! Green's functions given by a finite number of real poles.
//!
//! ```text
//! G(z) = Σ_j r_j / (z - ϵ_j)
//! ```
//!
//! Such Green's functions are used to represent the high-frequency tail of
//! numerical data, where they allow for analytic Fourier transforms.
use crate::defaults::TAIL_POLE_WIDTH;
use crate::error::{GfError, GfResult};
use crate::statistics::fermi_fct;
use crate::utils::linspace;
use log::debug;
use ndarray::prelude::*;
use ndarray_linalg::Solve;
use num_complex::Complex64;

fn check_tau(tau: ArrayView1<f64>, beta: f64) -> GfResult<()> {
    if tau.iter().any(|t| *t < 0.0 || *t > beta) {
        return Err(GfError::InvalidMesh(format!(
            "imaginary times have to be in [0, {}]",
            beta
        )));
    }
    Ok(())
}

fn check_poles(poles: ArrayView1<f64>, weights: ArrayView1<f64>) -> GfResult<()> {
    if poles.len() != weights.len() {
        return Err(GfError::LengthMismatch {
            expected: poles.len(),
            actual: weights.len(),
        });
    }
    Ok(())
}

/// Green's function given by a finite number of `poles` with `weights` at `z`.
pub fn pole_gf_z(z: Complex64, poles: ArrayView1<f64>, weights: ArrayView1<f64>) -> Complex64 {
    poles
        .iter()
        .zip(weights.iter())
        .map(|(p, w)| *w / (z - *p))
        .sum()
}

/// First derivative of [pole_gf_z] with respect to `z`.
pub fn pole_gf_d1_z(z: Complex64, poles: ArrayView1<f64>, weights: ArrayView1<f64>) -> Complex64 {
    poles
        .iter()
        .zip(weights.iter())
        .map(|(p, w)| -*w / ((z - *p) * (z - *p)))
        .sum()
}

/// High-frequency moments `m_k = Σ_j w_j p_j^{k-1}` for `k = 1..=order`.
pub fn pole_gf_moments(poles: ArrayView1<f64>, weights: ArrayView1<f64>, order: usize) -> Array1<f64> {
    (0..order)
        .map(|k| {
            poles
                .iter()
                .zip(weights.iter())
                .map(|(p, w)| w * p.powi(k as i32))
                .sum::<f64>()
        })
        .collect()
}

/// Single fermionic pole in imaginary time, `-exp(-τp)/(1 + exp(-βp))`.
///
/// Both signs of `p` are evaluated without overflow for `0 <= τ <= β`.
fn fermionic_pole_tau(tau: f64, pole: f64, beta: f64) -> f64 {
    if pole >= 0.0 {
        -(-tau * pole).exp() / (1.0 + (-beta * pole).exp())
    } else {
        -((beta - tau) * pole).exp() / (1.0 + (beta * pole).exp())
    }
}

/// Fermionic imaginary time Green's function given by a finite number of `poles`.
///
/// ```text
/// G(τ) = -Σ_j w_j exp(-τ p_j) / (1 + exp(-β p_j)),   0 <= τ <= β
/// ```
pub fn pole_gf_tau(
    tau: ArrayView1<f64>,
    poles: ArrayView1<f64>,
    weights: ArrayView1<f64>,
    beta: f64,
) -> GfResult<Array1<f64>> {
    check_poles(poles, weights)?;
    check_tau(tau, beta)?;
    Ok(tau.mapv(|t| {
        poles
            .iter()
            .zip(weights.iter())
            .map(|(p, w)| w * fermionic_pole_tau(t, *p, beta))
            .sum::<f64>()
    }))
}

/// Bosonic imaginary time Green's function given by a finite number of `poles`.
///
/// ```text
/// G(τ) = -Σ_j w_j exp(-τ p_j) / (1 - exp(-β p_j)),   0 <= τ <= β
/// ```
///
/// All poles have to be positive, a pole at zero is not normalizable.
pub fn pole_gf_tau_b(
    tau: ArrayView1<f64>,
    poles: ArrayView1<f64>,
    weights: ArrayView1<f64>,
    beta: f64,
) -> GfResult<Array1<f64>> {
    check_poles(poles, weights)?;
    check_tau(tau, beta)?;
    if poles.iter().any(|p| *p <= 0.0) {
        return Err(GfError::InvalidParameter(String::from(
            "bosonic poles have to be strictly positive",
        )));
    }
    Ok(tau.mapv(|t| {
        poles
            .iter()
            .zip(weights.iter())
            .map(|(p, w)| -w * (-t * p).exp() / -(-beta * p).exp_m1())
            .sum::<f64>()
    }))
}

/// Fermionic Green's function represented by its poles and residues.
#[derive(Debug, Clone)]
pub struct PoleGf {
    pub residues: Array1<f64>,
    pub poles: Array1<f64>,
}

impl PoleGf {
    pub fn new(residues: Array1<f64>, poles: Array1<f64>) -> GfResult<Self> {
        check_poles(poles.view(), residues.view())?;
        Ok(PoleGf { residues, poles })
    }

    /// Pole Green's function reproducing the given high-frequency `moments`.
    ///
    /// `moments[k]` is the coefficient of `z^{-(k+1)}`. The poles are placed
    /// equidistantly in `[-width, width]` (a single pole sits at zero), the
    /// residues follow from the Vandermonde system `Σ_j r_j p_j^k = m_{k+1}`.
    pub fn from_moments(moments: &[f64], width: f64) -> GfResult<Self> {
        if moments.is_empty() {
            return Err(GfError::EmptyInput("moments"));
        }
        let n: usize = moments.len();
        let poles: Array1<f64> = if n == 1 {
            Array1::zeros(1)
        } else {
            linspace(-width, width, n)
        };
        let vandermonde: Array2<f64> = Array2::from_shape_fn((n, n), |(k, j)| poles[j].powi(k as i32));
        let rhs: Array1<f64> = Array1::from(moments.to_vec());
        let residues: Array1<f64> = vandermonde.solve(&rhs)?;
        debug!("tail poles {} with residues {}", poles, residues);
        Ok(PoleGf { residues, poles })
    }

    /// Tail with the default width used by the Fourier transforms.
    pub fn tail(moments: &[f64]) -> GfResult<Self> {
        Self::from_moments(moments, TAIL_POLE_WIDTH)
    }

    pub fn eval_z(&self, z: Complex64) -> Complex64 {
        pole_gf_z(z, self.poles.view(), self.residues.view())
    }

    pub fn eval_d1_z(&self, z: Complex64) -> Complex64 {
        pole_gf_d1_z(z, self.poles.view(), self.residues.view())
    }

    pub fn eval_tau(&self, tau: ArrayView1<f64>, beta: f64) -> GfResult<Array1<f64>> {
        pole_gf_tau(tau, self.poles.view(), self.residues.view(), beta)
    }

    pub fn moments(&self, order: usize) -> Array1<f64> {
        pole_gf_moments(self.poles.view(), self.residues.view(), order)
    }

    /// Occupation `Σ_j r_j f(p_j)`.
    pub fn occ(&self, beta: f64) -> f64 {
        self.poles
            .iter()
            .zip(self.residues.iter())
            .map(|(p, r)| r * fermi_fct(*p, beta))
            .sum()
    }
}
