//! Occupation numbers and the chemical potential.
use crate::defaults::{MAX_BRACKET_STEPS, ZBRENT_MAX_ITER, ZBRENT_TOL};
use crate::error::{GfError, GfResult};
use crate::pole::PoleGf;
use crate::utils::zbrent;
use log::{debug, trace};
use ndarray::prelude::*;
use num_complex::Complex64;

/// Occupation per spin of a fermionic Green's function given on Matsubara frequencies.
///
/// ```text
/// n = 1/β Σ_n G(iω_n) e^{iω_n 0⁺}
/// ```
///
/// The high-frequency tail described by `moments` is subtracted and its
/// occupation is added analytically, the remainder decays fast enough so that
/// the Matsubara sum converges. `iws` have to be the first positive fermionic
/// Matsubara frequencies `iω_0, iω_1, ...`.
pub fn density_iw(
    iws: ArrayView1<Complex64>,
    gf_iw: ArrayView1<Complex64>,
    beta: f64,
    moments: &[f64],
) -> GfResult<f64> {
    if iws.len() != gf_iw.len() {
        return Err(GfError::LengthMismatch {
            expected: iws.len(),
            actual: gf_iw.len(),
        });
    }
    if iws.is_empty() {
        return Err(GfError::EmptyInput("iws"));
    }
    let tail: PoleGf = PoleGf::tail(moments)?;
    let delta_sum: f64 = iws
        .iter()
        .zip(gf_iw.iter())
        .map(|(iw, gf)| (gf - tail.eval_z(*iw)).re)
        .sum();
    trace!(
        "remaining tail of the Matsubara sum: {}",
        (gf_iw[gf_iw.len() - 1] - tail.eval_z(iws[iws.len() - 1])).norm()
    );
    Ok(2.0 / beta * delta_sum + tail.occ(beta))
}

/// Search the chemical potential `μ` for which `occ_root(μ) = 0`.
///
/// `occ_root` is the occupation for a given chemical potential minus the
/// target occupation and has to increase monotonically with `μ`. Starting from
/// `mu0` the interval is extended in steps of `step` (doubled each time) until
/// the root is bracketed, afterwards Brent's method refines the root.
pub fn chemical_potential<F: Fn(f64) -> f64>(occ_root: F, mu0: f64, step: f64) -> GfResult<f64> {
    if step <= 0.0 {
        return Err(GfError::InvalidParameter(format!(
            "step has to be positive, got {}",
            step
        )));
    }
    let delta0: f64 = occ_root(mu0);
    if delta0 == 0.0 {
        return Ok(mu0);
    }
    // too many particles: decrease μ, otherwise increase
    let sign: f64 = if delta0 > 0.0 { -1.0 } else { 1.0 };
    let mut mu_last: f64 = mu0;
    let mut current_step: f64 = step;
    for _ in 0..MAX_BRACKET_STEPS {
        let mu: f64 = mu_last + sign * current_step;
        let delta: f64 = occ_root(mu);
        debug!("{: <25} {:>14.8} {:>14.8}", "bracket search (mu, dn):", mu, delta);
        if delta == 0.0 {
            return Ok(mu);
        }
        if delta.signum() != delta0.signum() {
            let (lower, upper) = if mu < mu_last { (mu, mu_last) } else { (mu_last, mu) };
            return zbrent(&occ_root, lower, upper, ZBRENT_TOL, ZBRENT_MAX_ITER);
        }
        mu_last = mu;
        current_step *= 2.0;
    }
    Err(GfError::NotBracketed {
        lower: mu0.min(mu_last),
        upper: mu0.max(mu_last),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::AbsDiffEq;
    use crate::pole::pole_gf_z;
    use crate::statistics::{fermi_fct, matsubara_frequencies};
    use ndarray::array;

    #[test]
    fn density_of_pole_gf() {
        let beta: f64 = 30.0;
        let poles: Array1<f64> = array![-0.8, -0.1, 0.25, 0.9];
        let weights: Array1<f64> = array![0.1, 0.4, 0.3, 0.2];
        let iws = matsubara_frequencies(0..2048, beta);
        let gf_iw = iws.mapv(|iw| pole_gf_z(iw, poles.view(), weights.view()));
        let exact: f64 = PoleGf::new(weights.clone(), poles.clone()).unwrap().occ(beta);

        let with_m1: f64 = density_iw(iws.view(), gf_iw.view(), beta, &[1.0]).unwrap();
        assert!(with_m1.abs_diff_eq(&exact, 5e-4));

        // including the second moment the remainder decays faster
        let m2: f64 = (&poles * &weights).sum();
        let with_m2: f64 = density_iw(iws.view(), gf_iw.view(), beta, &[1.0, m2]).unwrap();
        assert!(with_m2.abs_diff_eq(&exact, 1e-7));
    }

    #[test]
    fn density_mismatch() {
        let iws = matsubara_frequencies(0..4, 1.0);
        let gf_iw = matsubara_frequencies(0..3, 1.0);
        assert!(density_iw(iws.view(), gf_iw.view(), 1.0, &[1.0]).is_err());
    }

    #[test]
    fn chemical_potential_of_single_level() {
        let beta: f64 = 10.0;
        let level: f64 = 0.3;
        let target: f64 = 0.25;
        let occ_root = |mu: f64| fermi_fct(level - mu, beta) - target;
        let mu: f64 = chemical_potential(occ_root, -5.0, 0.1).unwrap();
        assert!(occ_root(mu).abs_diff_eq(&0.0, 1e-10));
        let mu_exact: f64 = level - crate::statistics::fermi_fct_inv(target, beta);
        assert!(mu.abs_diff_eq(&mu_exact, 1e-9));
    }

    #[test]
    fn chemical_potential_unreachable() {
        // occupation can never exceed one
        let occ_root = |mu: f64| fermi_fct(-mu, 1.0) - 2.0;
        let result = chemical_potential(occ_root, 0.0, 1.0);
        assert!(matches!(result, Err(GfError::NotBracketed { lower, .. }) if lower == 0.0));
        assert!(chemical_potential(occ_root, 0.0, -1.0).is_err());
    }
}
