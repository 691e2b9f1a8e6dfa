//! Fourier transforms between imaginary time and Matsubara frequencies.
//!
//! The Matsubara Green's function is given on the `N` positive fermionic
//! frequencies `iω_n = iπ(2n+1)/β`, `n = 0..N`. The imaginary time Green's
//! function is given on the `2N+1` equidistant points `τ_l = lβ/(2N)`,
//! `l = 0..=2N`, including both `τ = 0` and `τ = β`.
//!
//! The plain transforms `*_dft` and [tau2iw_ft_lin] assume that the
//! high-frequency tail is already handled, [iw2tau] and [tau2iw] subtract and
//! add a tail given by its moments.
use crate::error::{GfError, GfResult};
use crate::pole::PoleGf;
use crate::statistics::matsubara_frequencies;
use log::debug;
use ndarray::prelude::*;
use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Method used to transform from Matsubara frequencies to imaginary time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum IwToTau {
    Dft,
    DftSoft,
}

/// Method used to transform from imaginary time to Matsubara frequencies.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TauToIw {
    Dft,
    FtLin,
}

/// Equidistant imaginary time mesh with `n_iw` matching Matsubara frequencies.
pub fn tau_mesh(n_iw: usize, beta: f64) -> Array1<f64> {
    let m: usize = 2 * n_iw;
    // l/m is exactly one for the last point, so τ never exceeds β
    Array1::from_shape_fn(m + 1, |l| beta * (l as f64 / m as f64))
}

fn n_iw_from_tau(gf_tau: ArrayView1<f64>) -> GfResult<usize> {
    let n_tau: usize = gf_tau.len();
    if n_tau < 3 || n_tau % 2 == 0 {
        return Err(GfError::InvalidMesh(format!(
            "imaginary time data needs an odd number (>= 3) of points, got {}",
            n_tau
        )));
    }
    Ok((n_tau - 1) / 2)
}

/// Discrete Fourier transform of a fermionic Green's function from Matsubara
/// frequencies to imaginary time.
///
/// ```text
/// G(τ_l) = 2/β Re Σ_n G(iω_n) exp(-iω_n τ_l)
/// ```
///
/// The `1/z` tail has to be removed beforehand, otherwise the result shows
/// strong Gibbs oscillations.
pub fn iw2tau_dft(gf_iw: ArrayView1<Complex64>, beta: f64) -> GfResult<Array1<f64>> {
    let n_iw: usize = gf_iw.len();
    if n_iw == 0 {
        return Err(GfError::EmptyInput("gf_iw"));
    }
    let n_fft: usize = 2 * n_iw;
    let mut buffer: Vec<Complex64> = vec![Complex64::new(0.0, 0.0); n_fft];
    buffer[..n_iw]
        .iter_mut()
        .zip(gf_iw.iter())
        .for_each(|(b, g)| *b = *g);

    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft = planner.plan_fft_forward(n_fft);
    fft.process(&mut buffer);

    // exp(-iω_n τ_l) = exp(-iπl/M) exp(-2πi nl/M) with M = 2N
    let gf_tau: Array1<f64> = (0..=n_fft)
        .map(|l| {
            let phase: Complex64 = Complex64::from_polar(1.0, -PI * l as f64 / n_fft as f64);
            2.0 / beta * (phase * buffer[l % n_fft]).re
        })
        .collect();
    Ok(gf_tau)
}

/// Discrete Fourier transform with a soft cutoff of the Matsubara data.
///
/// The data is extended by `N` frequencies, on which the last value fades to
/// zero like `(1 + cos)/2`. The transform is performed on the doubled mesh and
/// every second imaginary time is returned, so the result lives on the same
/// `2N+1` points as for [iw2tau_dft].
pub fn iw2tau_dft_soft(gf_iw: ArrayView1<Complex64>, beta: f64) -> GfResult<Array1<f64>> {
    let n_iw: usize = gf_iw.len();
    if n_iw == 0 {
        return Err(GfError::EmptyInput("gf_iw"));
    }
    let last: Complex64 = gf_iw[n_iw - 1];
    debug!("Remaining tail approximated by 'cos': {}", last);
    let fading: Array1<Complex64> = Array1::linspace(0.0, PI, n_iw + 1)
        .slice(s![1..])
        .mapv(|x| last * 0.5 * (x.cos() + 1.0));
    let extended: Array1<Complex64> = gf_iw.iter().chain(fading.iter()).cloned().collect();
    let gf_tau: Array1<f64> = iw2tau_dft(extended.view(), beta)?;
    // trim artificial resolution
    Ok(gf_tau.slice(s![..;2]).to_owned())
}

/// Fourier transform from Matsubara frequencies to imaginary time with tail correction.
///
/// The pole Green's function reproducing the high-frequency `moments` is
/// subtracted, the remainder is transformed with `method` and the tail is
/// added back analytically.
pub fn iw2tau(
    gf_iw: ArrayView1<Complex64>,
    beta: f64,
    moments: &[f64],
    method: IwToTau,
) -> GfResult<Array1<f64>> {
    let n_iw: usize = gf_iw.len();
    let tail: PoleGf = PoleGf::tail(moments)?;
    let iws: Array1<Complex64> = matsubara_frequencies(0..n_iw as i64, beta);
    let delta: Array1<Complex64> = &gf_iw - &iws.mapv(|iw| tail.eval_z(iw));
    let delta_tau: Array1<f64> = match method {
        IwToTau::Dft => iw2tau_dft(delta.view(), beta)?,
        IwToTau::DftSoft => iw2tau_dft_soft(delta.view(), beta)?,
    };
    let tail_tau: Array1<f64> = tail.eval_tau(tau_mesh(n_iw, beta).view(), beta)?;
    Ok(delta_tau + tail_tau)
}

/// Phase-shifted inverse FFT of the inner points:
/// `S_n = Σ_{l=1}^{M-1} G(τ_l) exp(iω_n τ_l)` for `n = 0..N`.
fn inner_sum(gf_tau: ArrayView1<f64>, n_iw: usize) -> Vec<Complex64> {
    let n_fft: usize = 2 * n_iw;
    let mut buffer: Vec<Complex64> = (0..n_fft)
        .map(|l| {
            if l == 0 {
                Complex64::new(0.0, 0.0)
            } else {
                gf_tau[l] * Complex64::from_polar(1.0, PI * l as f64 / n_fft as f64)
            }
        })
        .collect();
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft = planner.plan_fft_inverse(n_fft);
    fft.process(&mut buffer);
    buffer.truncate(n_iw);
    buffer
}

/// Discrete Fourier transform from imaginary time to Matsubara frequencies.
///
/// ```text
/// G(iω_n) = ∫_0^β dτ exp(iω_n τ) G(τ)
/// ```
///
/// evaluated with the trapezoidal rule. The result is only accurate for small
/// frequencies, use [tau2iw_ft_lin] for a transform valid for all frequencies.
pub fn tau2iw_dft(gf_tau: ArrayView1<f64>, beta: f64) -> GfResult<Array1<Complex64>> {
    let n_iw: usize = n_iw_from_tau(gf_tau)?;
    let n_tau: usize = gf_tau.len();
    let dtau: f64 = beta / (2 * n_iw) as f64;
    // exp(iω_n β) = -1
    let boundary: f64 = 0.5 * (gf_tau[0] - gf_tau[n_tau - 1]);
    let inner: Vec<Complex64> = inner_sum(gf_tau, n_iw);
    Ok(inner.iter().map(|s| dtau * (*s + boundary)).collect())
}

/// Fourier integration of the piecewise linear interpolation of `G(τ)`.
///
/// The integral of every linear segment is performed exactly (Filon's
/// method). Compared to [tau2iw_dft] this is accurate also for large
/// frequencies and robust against noise in the data.
///
/// With `θ = ω_n Δτ` the inner points carry the weight `2(1 - cos θ)/θ²`,
/// the end points `i/θ + (1 - e^{iθ})/θ²` and its counterpart.
pub fn tau2iw_ft_lin(gf_tau: ArrayView1<f64>, beta: f64) -> GfResult<Array1<Complex64>> {
    let n_iw: usize = n_iw_from_tau(gf_tau)?;
    let n_tau: usize = gf_tau.len();
    let dtau: f64 = beta / (2 * n_iw) as f64;
    let inner: Vec<Complex64> = inner_sum(gf_tau, n_iw);
    let iws: Array1<Complex64> = matsubara_frequencies(0..n_iw as i64, beta);
    let i: Complex64 = Complex64::i();
    let gf_iw: Array1<Complex64> = iws
        .iter()
        .zip(inner.iter())
        .map(|(iw, s)| {
            let theta: f64 = iw.im * dtau;
            let theta2: f64 = theta * theta;
            let weight: f64 = 2.0 * (1.0 - theta.cos()) / theta2;
            let start: Complex64 = i / theta + (1.0 - (i * theta).exp()) / theta2;
            let end: Complex64 = -i / theta + (1.0 - (-i * theta).exp()) / theta2;
            // exp(iω_n β) = -1
            dtau * (weight * *s + gf_tau[0] * start - gf_tau[n_tau - 1] * end)
        })
        .collect();
    Ok(gf_iw)
}

/// Fourier transform from imaginary time to Matsubara frequencies with tail correction.
pub fn tau2iw(
    gf_tau: ArrayView1<f64>,
    beta: f64,
    moments: &[f64],
    method: TauToIw,
) -> GfResult<Array1<Complex64>> {
    let n_iw: usize = n_iw_from_tau(gf_tau)?;
    let tail: PoleGf = PoleGf::tail(moments)?;
    let tail_tau: Array1<f64> = tail.eval_tau(tau_mesh(n_iw, beta).view(), beta)?;
    let delta_tau: Array1<f64> = &gf_tau - &tail_tau;
    let delta_iw: Array1<Complex64> = match method {
        TauToIw::Dft => tau2iw_dft(delta_tau.view(), beta)?,
        TauToIw::FtLin => tau2iw_ft_lin(delta_tau.view(), beta)?,
    };
    let iws: Array1<Complex64> = matsubara_frequencies(0..n_iw as i64, beta);
    Ok(delta_iw + iws.mapv(|iw| tail.eval_z(iw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;
    use crate::pole::{pole_gf_tau, pole_gf_z};
    use ndarray::array;

    const BETA: f64 = 10.0;

    fn poles() -> (Array1<f64>, Array1<f64>) {
        (array![-0.7, -0.1, 0.3, 0.8], array![0.1, 0.3, 0.4, 0.2])
    }

    fn max_deviation_c(a: ArrayView1<Complex64>, b: ArrayView1<Complex64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).norm()).fold(0.0, f64::max)
    }

    fn max_deviation(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
    }

    #[test]
    fn tau_mesh_size() {
        let tau = tau_mesh(512, BETA);
        assert_eq!(tau.len(), 1025);
        assert_eq!(tau[0], 0.0);
        assert!(tau[1024].abs_diff_eq(&BETA, 1e-12));
    }

    #[test]
    fn invalid_tau_data() {
        let even: Array1<f64> = Array1::zeros(4);
        assert!(tau2iw_dft(even.view(), BETA).is_err());
        assert!(tau2iw_ft_lin(even.view(), BETA).is_err());
        let single: Array1<f64> = Array1::zeros(1);
        assert!(tau2iw_dft(single.view(), BETA).is_err());
        let empty: Array1<Complex64> = Array1::zeros(0);
        assert!(iw2tau_dft(empty.view(), BETA).is_err());
    }

    #[test]
    fn iw2tau_of_pole_gf() {
        let (poles, weights) = poles();
        let n_iw: usize = 1024;
        let iws = matsubara_frequencies(0..n_iw as i64, BETA);
        let gf_iw = iws.mapv(|iw| pole_gf_z(iw, poles.view(), weights.view()));
        let tau = tau_mesh(n_iw, BETA);
        let exact = pole_gf_tau(tau.view(), poles.view(), weights.view(), BETA).unwrap();

        let gf_tau = iw2tau(gf_iw.view(), BETA, &[1.0], IwToTau::Dft).unwrap();
        assert_eq!(gf_tau.len(), 2 * n_iw + 1);
        assert!(max_deviation(gf_tau.view(), exact.view()) < 1e-3);

        let m2: f64 = (&poles * &weights).sum();
        let gf_tau = iw2tau(gf_iw.view(), BETA, &[1.0, m2], IwToTau::Dft).unwrap();
        assert!(max_deviation(gf_tau.view(), exact.view()) < 1e-5);

        let gf_tau_soft = iw2tau(gf_iw.view(), BETA, &[1.0, m2], IwToTau::DftSoft).unwrap();
        assert_eq!(gf_tau_soft.len(), 2 * n_iw + 1);
        assert!(max_deviation(gf_tau_soft.view(), exact.view()) < 1e-5);
    }

    #[test]
    fn ft_lin_of_pole_gf() {
        let (poles, weights) = poles();
        let n_iw: usize = 512;
        let tau = tau_mesh(n_iw, BETA);
        let gf_tau = pole_gf_tau(tau.view(), poles.view(), weights.view(), BETA).unwrap();
        let iws = matsubara_frequencies(0..n_iw as i64, BETA);
        let exact = iws.mapv(|iw| pole_gf_z(iw, poles.view(), weights.view()));

        // 1/z tail handled manually: FT(-1/2) = 1/iω_n
        let shifted: Array1<f64> = &gf_tau + 0.5;
        let gf_ft_lin = tau2iw_ft_lin(shifted.view(), BETA).unwrap() + iws.mapv(|iw| 1.0 / iw);
        assert!(max_deviation_c(gf_ft_lin.view(), exact.view()) < 1e-4);
        // error decreases with frequency
        assert!((gf_ft_lin[n_iw - 1] - exact[n_iw - 1]).norm() < 1e-6);

        let gf_dft = tau2iw_dft(shifted.view(), BETA).unwrap() + iws.mapv(|iw| 1.0 / iw);
        assert!((gf_dft[0] - exact[0]).norm() < 1e-3);

        // with two moments subtracted the trapezoidal rule holds on the whole mesh
        let m2: f64 = (&poles * &weights).sum();
        let gf_dft_tail = tau2iw(gf_tau.view(), BETA, &[1.0, m2], TauToIw::Dft).unwrap();
        assert_eq!(gf_dft_tail.len(), n_iw);
        assert!(max_deviation_c(gf_dft_tail.view(), exact.view()) < 1e-6);
    }

    #[test]
    fn round_trip_with_tail() {
        let (poles, weights) = poles();
        let n_iw: usize = 1024;
        let iws = matsubara_frequencies(0..n_iw as i64, BETA);
        let gf_iw = iws.mapv(|iw| pole_gf_z(iw, poles.view(), weights.view()));
        let m2: f64 = (&poles * &weights).sum();
        let moments = [1.0, m2];
        let gf_tau = iw2tau(gf_iw.view(), BETA, &moments, IwToTau::Dft).unwrap();
        let gf_iw_back = tau2iw(gf_tau.view(), BETA, &moments, TauToIw::FtLin).unwrap();
        assert_eq!(gf_iw_back.len(), n_iw);
        assert!(max_deviation_c(gf_iw_back.slice(s![..100]), gf_iw.slice(s![..100])) < 1e-4);
    }
}
