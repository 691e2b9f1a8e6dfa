//! Functionality related or derived from the Fermi and Bose statistics.
//!
//! Per default, the functions refer to Fermi statistics,
//! a tailing `_b` indicates Bose statistics instead.
use crate::defaults::BOSE_OVERFLOW;
use crate::error::GfResult;
use ndarray::prelude::*;
use ndarray_linalg::{Eigh, UPLO};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Return the Fermi function `1/(exp(βϵ)+1)`.
///
/// The function is evaluated with a negative exponent for `βϵ > 0`, so no
/// overflow occurs for large arguments.
pub fn fermi_fct(eps: f64, beta: f64) -> f64 {
    let z: f64 = beta * eps;
    if z > 0.0 {
        let exp_m: f64 = (-z).exp();
        exp_m / (1.0 + exp_m)
    } else {
        1.0 / (z.exp() + 1.0)
    }
}

/// Fermi function for complex arguments.
///
/// For complex inputs the function is not as accurate as for real inputs.
pub fn fermi_fct_complex(z: Complex64, beta: f64) -> Complex64 {
    let z: Complex64 = beta * z;
    if z.re > 0.0 {
        let exp_m: Complex64 = (-z).exp();
        exp_m / (1.0 + exp_m)
    } else {
        1.0 / (z.exp() + 1.0)
    }
}

/// Return the 1st derivative of the Fermi function `-β exp(βϵ)/(exp(βϵ)+1)²`.
pub fn fermi_fct_d1(eps: f64, beta: f64) -> f64 {
    let fermi: f64 = fermi_fct(eps, beta);
    -beta * fermi * (1.0 - fermi)
}

/// Inverse of the Fermi function, `fermi_fct(fermi_fct_inv(f, β), β) = f`.
///
/// This is e.g. useful for integrals over the derivative of the Fermi function.
pub fn fermi_fct_inv(fermi: f64, beta: f64) -> f64 {
    -(fermi / (1.0 - fermi)).ln() / beta
}

/// Return the Bose function `1/(exp(βϵ)-1)`.
pub fn bose_fct(eps: f64, beta: f64) -> f64 {
    let betaeps: f64 = beta * eps;
    if betaeps < BOSE_OVERFLOW {
        1.0 / betaeps.exp_m1()
    } else {
        // avoid overflows for big numbers using negative exponents
        -(-betaeps).exp() / (-betaeps).exp_m1()
    }
}

/// Fermionic Matsubara frequency `iω_n = iπ(2n+1)/β`.
pub fn matsubara_frequency(n: i64, beta: f64) -> Complex64 {
    Complex64::new(0.0, PI / beta * (2 * n + 1) as f64)
}

/// Return *fermionic* Matsubara frequencies `iω_n` for the points `n_points`.
///
/// ```
/// use approx::AbsDiffEq;
///
/// let iws = gftool::matsubara_frequencies(0..1024, 1.0);
/// assert!(iws[0].im.abs_diff_eq(&std::f64::consts::PI, 1e-14));
/// ```
pub fn matsubara_frequencies<I: IntoIterator<Item = i64>>(n_points: I, beta: f64) -> Array1<Complex64> {
    n_points
        .into_iter()
        .map(|n| matsubara_frequency(n, beta))
        .collect()
}

/// Return *bosonic* Matsubara frequencies `iν_n = 2iπn/β` for the points `n_points`.
pub fn matsubara_frequencies_b<I: IntoIterator<Item = i64>>(n_points: I, beta: f64) -> Array1<Complex64> {
    n_points
        .into_iter()
        .map(|n| Complex64::new(0.0, 2.0 * PI / beta * n as f64))
        .collect()
}

/// Return `num` *fermionic* Padé frequencies `iz_p` and their residues.
///
/// The Padé frequencies are the poles of the approximation of the Fermi
/// function with `2*num` poles (T. Ozaki, Phys. Rev. B 75, 035123 (2007)).
/// This gives a non-equidistant mesh on the imaginary axis.
/// The residues are given relative to the residue of the Fermi function at
/// the Matsubara frequencies, so the Padé frequencies can be used as drop-in
/// replacement. The actual residues are `-resids/beta`.
///
/// The poles follow from the eigenvalues `μ` of the symmetric tridiagonal
/// matrix with off-diagonal elements `1/(2 sqrt((2k-1)(2k+1)))` as
/// `iz_p = -i/(βμ)`.
pub fn pade_frequencies(num: usize, beta: f64) -> GfResult<(Array1<Complex64>, Array1<f64>)> {
    if num == 0 {
        return Ok((Array1::zeros(0), Array1::zeros(0)));
    }
    let size: usize = 2 * num;
    let mut mat: Array2<f64> = Array2::zeros((size, size));
    for k in 1..size {
        let odd_lower: f64 = (2 * k - 1) as f64;
        let odd_upper: f64 = (2 * k + 1) as f64;
        let element: f64 = 0.5 / (odd_lower * odd_upper).sqrt();
        mat[[k - 1, k]] = element;
        mat[[k, k - 1]] = element;
    }
    let (eig, vecs): (Array1<f64>, Array2<f64>) = mat.eigh(UPLO::Upper)?;

    // negative eigenvalues correspond to the poles in the upper half-plane
    let mut poles: Vec<(f64, f64)> = eig
        .iter()
        .zip(vecs.row(0).iter())
        .filter(|(mu, _)| **mu < 0.0)
        .map(|(mu, w0)| (-1.0 / mu, 0.25 * w0 * w0 / (mu * mu)))
        .collect();
    poles.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let izp: Array1<Complex64> = poles
        .iter()
        .map(|(lambda, _)| Complex64::new(0.0, lambda / beta))
        .collect();
    let resids: Array1<f64> = poles.iter().map(|(_, r)| *r).collect();
    Ok((izp, resids))
}
