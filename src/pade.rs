//! Padé based analytic continuation of Green's functions and self-energies.
//!
//! The Padé approximants are calculated as continued fractions
//! (H. J. Vidberg and J. W. Serene, J. Low Temp. Phys. 29, 179 (1977)),
//!
//! ```text
//! C_n(z) = a_0/(1 + a_1(z - z_0)/(1 + a_2(z - z_1)/(1 + ...)))
//! ```
//!
//! using the first `n` coefficients. As the result strongly depends on `n`,
//! several approximants are calculated and the causal ones are averaged.
use crate::error::{GfError, GfResult};
use log::{debug, trace};
use ndarray::prelude::*;
use ndarray::Zip;
use num_complex::Complex64;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Asymptotic behavior of the continued function, it determines which
/// number of coefficients is used.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PadeKind {
    /// Any number of coefficients.
    Usual,
    /// Even number of coefficients, the approximant decays as `1/z`.
    Gf,
    /// Odd number of coefficients, the approximant approaches a constant.
    SelfEnergy,
}

impl PadeKind {
    /// Whether an approximant with `n` coefficients has the right asymptotic.
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            PadeKind::Usual => true,
            PadeKind::Gf => n % 2 == 0,
            PadeKind::SelfEnergy => n % 2 == 1,
        }
    }

    /// Whether the approximant is causal at the points `values`.
    ///
    /// Retarded Green's functions and self-energies have a negative imaginary part.
    fn is_causal(&self, values: &[Complex64], threshold: f64) -> bool {
        if values.iter().any(|v| !v.is_finite()) {
            return false;
        }
        match self {
            PadeKind::Usual => true,
            PadeKind::Gf | PadeKind::SelfEnergy => values.iter().all(|v| v.im <= threshold),
        }
    }
}

/// Coefficients of the continued fraction interpolating `fct_z` at the points `z`.
///
/// The coefficients follow from the recursion
///
/// ```text
/// g_i(z_j) = (g_{i-1}(z_{i-1}) - g_{i-1}(z_j)) / ((z_j - z_{i-1}) g_{i-1}(z_j)),   a_i = g_i(z_i)
/// ```
///
/// starting from `g_0(z_j) = fct_z[j]`.
pub fn coefficients(z: ArrayView1<Complex64>, fct_z: ArrayView1<Complex64>) -> GfResult<Array1<Complex64>> {
    if z.len() != fct_z.len() {
        return Err(GfError::LengthMismatch {
            expected: z.len(),
            actual: fct_z.len(),
        });
    }
    if z.is_empty() {
        return Err(GfError::EmptyInput("z"));
    }
    let mut coeff: Array1<Complex64> = fct_z.to_owned();
    for i in 1..z.len() {
        let previous: Complex64 = coeff[i - 1];
        let z_previous: Complex64 = z[i - 1];
        for j in i..z.len() {
            coeff[j] = (previous - coeff[j]) / ((z[j] - z_previous) * coeff[j]);
        }
    }
    if let Some(position) = coeff.iter().position(|c| !c.is_finite()) {
        return Err(GfError::InvalidParameter(format!(
            "Padé coefficient {} is not finite, the input points have to be distinct",
            position
        )));
    }
    Ok(coeff)
}

/// Values `C_1(z), ..., C_{n_max}(z)` of all approximants up to `n_max` coefficients.
///
/// The three-term recurrence `A_i = A_{i-1} + a_i (z - z_{i-1}) A_{i-2}` (same for `B`)
/// is renormalized by `B_i` in every step to avoid overflows.
fn continued_fractions(
    z: Complex64,
    z_in: ArrayView1<Complex64>,
    coeff: ArrayView1<Complex64>,
    n_max: usize,
) -> Vec<Complex64> {
    let mut values: Vec<Complex64> = Vec::with_capacity(n_max);
    let mut a_prev: Complex64 = Complex64::new(0.0, 0.0);
    let mut a_curr: Complex64 = coeff[0];
    let mut b_prev: Complex64 = Complex64::new(1.0, 0.0);
    values.push(a_curr);
    for i in 1..n_max {
        let multiplier: Complex64 = coeff[i] * (z - z_in[i - 1]);
        let a_next: Complex64 = a_curr + multiplier * a_prev;
        let b_next: Complex64 = 1.0 + multiplier * b_prev;
        a_prev = a_curr / b_next;
        b_prev = 1.0 / b_next;
        a_curr = a_next / b_next;
        values.push(a_curr);
    }
    values
}

fn check_coefficients(z_in: ArrayView1<Complex64>, coeff: ArrayView1<Complex64>) -> GfResult<()> {
    if coeff.is_empty() {
        return Err(GfError::EmptyInput("coeff"));
    }
    if z_in.len() < coeff.len() {
        return Err(GfError::LengthMismatch {
            expected: coeff.len(),
            actual: z_in.len(),
        });
    }
    Ok(())
}

/// Padé approximant with `n` coefficients evaluated at `z_out`.
pub fn calc(
    z_out: ArrayView1<Complex64>,
    z_in: ArrayView1<Complex64>,
    coeff: ArrayView1<Complex64>,
    n: usize,
) -> GfResult<Array1<Complex64>> {
    check_coefficients(z_in, coeff)?;
    if n == 0 || n > coeff.len() {
        return Err(GfError::InvalidParameter(format!(
            "number of coefficients has to be in [1, {}], got {}",
            coeff.len(),
            n
        )));
    }
    Ok(z_out.mapv(|z| continued_fractions(z, z_in, coeff, n)[n - 1]))
}

/// Numbers of coefficients in `[n_min, n_max]` matching `kind`.
fn accepted_numbers(n_min: usize, n_max: usize, n_coeff: usize, kind: PadeKind) -> GfResult<Vec<usize>> {
    let n_max: usize = n_max.min(n_coeff);
    let numbers: Vec<usize> = (n_min.max(1)..=n_max).filter(|n| kind.accepts(*n)).collect();
    if numbers.is_empty() {
        return Err(GfError::InvalidParameter(format!(
            "no number of coefficients in [{}, {}] matches {:?}",
            n_min, n_max, kind
        )));
    }
    Ok(numbers)
}

/// Approximants for every accepted number of coefficients `n ∈ [n_min, n_max]`.
///
/// Returns the used numbers of coefficients and the approximants, one row for
/// each number. The output points are evaluated in parallel.
pub fn approximants(
    z_out: ArrayView1<Complex64>,
    z_in: ArrayView1<Complex64>,
    coeff: ArrayView1<Complex64>,
    n_min: usize,
    n_max: usize,
    kind: PadeKind,
) -> GfResult<(Vec<usize>, Array2<Complex64>)> {
    check_coefficients(z_in, coeff)?;
    let numbers: Vec<usize> = accepted_numbers(n_min, n_max, coeff.len(), kind)?;
    let n_last: usize = numbers[numbers.len() - 1];

    let columns: Vec<Vec<Complex64>> = (0..z_out.len())
        .into_par_iter()
        .map(|k| continued_fractions(z_out[k], z_in, coeff, n_last))
        .collect();
    let values: Array2<Complex64> =
        Array2::from_shape_fn((numbers.len(), z_out.len()), |(row, k)| columns[k][numbers[row] - 1]);
    Ok((numbers, values))
}

/// Average of the causal Padé approximants and their spread.
#[derive(Debug, Clone)]
pub struct Averaged {
    /// Mean of the accepted approximants.
    pub x: Array1<Complex64>,
    /// Standard deviation, `σ(Re) + iσ(Im)`.
    pub err: Array1<Complex64>,
    /// Numbers of coefficients of the accepted approximants.
    pub accepted: Vec<usize>,
}

/// Average the approximants with `n ∈ [n_min, n_max]` coefficients which are
/// causal on the points `valid_z`.
///
/// For [PadeKind::Gf] and [PadeKind::SelfEnergy] an approximant is rejected
/// if its imaginary part exceeds `threshold` at any of the `valid_z`, for
/// [PadeKind::Usual] only non-finite approximants are rejected.
#[allow(clippy::too_many_arguments)]
pub fn averaged(
    z_out: ArrayView1<Complex64>,
    z_in: ArrayView1<Complex64>,
    fct_z: ArrayView1<Complex64>,
    valid_z: ArrayView1<Complex64>,
    n_min: usize,
    n_max: usize,
    threshold: f64,
    kind: PadeKind,
) -> GfResult<Averaged> {
    let coeff: Array1<Complex64> = coefficients(z_in, fct_z)?;
    let (numbers, on_valid): (Vec<usize>, Array2<Complex64>) =
        approximants(valid_z, z_in, coeff.view(), n_min, n_max, kind)?;

    let accepted: Vec<usize> = numbers
        .iter()
        .zip(on_valid.outer_iter())
        .filter_map(|(n, row)| {
            let values: Vec<Complex64> = row.to_vec();
            if kind.is_causal(&values, threshold) {
                Some(*n)
            } else {
                trace!("rejected Padé approximant with {} coefficients", n);
                None
            }
        })
        .collect();
    debug!(
        "{} of {} Padé approximants are valid",
        accepted.len(),
        numbers.len()
    );
    if accepted.is_empty() {
        return Err(GfError::NoValidApproximant { n_min, n_max });
    }

    let (all_numbers, on_out): (Vec<usize>, Array2<Complex64>) =
        approximants(z_out, z_in, coeff.view(), n_min, n_max, kind)?;
    let rows: Vec<usize> = all_numbers
        .iter()
        .enumerate()
        .filter(|(_, n)| accepted.contains(*n))
        .map(|(row, _)| row)
        .collect();
    let selected: Array2<Complex64> = on_out.select(Axis(0), &rows);

    let real: Array2<f64> = selected.mapv(|x| x.re);
    let imag: Array2<f64> = selected.mapv(|x| x.im);
    let n_rows: f64 = rows.len() as f64;
    let x: Array1<Complex64> = selected.sum_axis(Axis(0)) / Complex64::new(n_rows, 0.0);
    let err: Array1<Complex64> = Zip::from(&real.std_axis(Axis(0), 0.0))
        .and(&imag.std_axis(Axis(0), 0.0))
        .map_collect(|re, im| Complex64::new(*re, *im));
    Ok(Averaged { x, err, accepted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::bethe;
    use crate::statistics::matsubara_frequencies;
    use crate::utils::linspace;
    use ndarray::{array, s};

    #[test]
    fn interpolates_input() {
        let iws = matsubara_frequencies(0..20, 100.0);
        let gf_iw = iws.mapv(|iw| bethe::gf_z(iw, 1.0));
        let coeff = coefficients(iws.view(), gf_iw.view()).unwrap();
        let values = calc(iws.view(), iws.view(), coeff.view(), 20).unwrap();
        for (value, exact) in values.iter().zip(gf_iw.iter()) {
            assert!((value - exact).norm() < 1e-10);
        }
        // the first coefficient is the first value
        let first = calc(iws.view(), iws.view(), coeff.view(), 1).unwrap();
        assert!(first.iter().all(|v| *v == gf_iw[0]));
    }

    #[test]
    fn invalid_input() {
        let z: Array1<Complex64> = array![Complex64::new(0.0, 1.0), Complex64::new(0.0, 1.0)];
        let fct: Array1<Complex64> = array![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)];
        assert!(coefficients(z.view(), fct.view()).is_err());
        assert!(coefficients(z.view(), fct.slice(s![..1])).is_err());
        let coeff: Array1<Complex64> = array![Complex64::new(1.0, 0.0)];
        assert!(calc(z.view(), z.view(), coeff.view(), 2).is_err());
        assert!(calc(z.view(), z.view(), coeff.view(), 0).is_err());
    }

    #[test]
    fn kinds_select_parity() {
        let iws = matsubara_frequencies(0..12, 10.0);
        let gf_iw = iws.mapv(|iw| bethe::gf_z(iw, 1.0));
        let coeff = coefficients(iws.view(), gf_iw.view()).unwrap();
        let z_out: Array1<Complex64> = array![Complex64::new(0.1, 0.2)];
        let (numbers, values) = approximants(z_out.view(), iws.view(), coeff.view(), 3, 20, PadeKind::Gf).unwrap();
        assert_eq!(numbers, vec![4, 6, 8, 10, 12]);
        assert_eq!(values.dim(), (5, 1));
        let (numbers, _) = approximants(z_out.view(), iws.view(), coeff.view(), 3, 8, PadeKind::SelfEnergy).unwrap();
        assert_eq!(numbers, vec![3, 5, 7]);
        let (numbers, _) = approximants(z_out.view(), iws.view(), coeff.view(), 1, 3, PadeKind::Usual).unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(approximants(z_out.view(), iws.view(), coeff.view(), 5, 5, PadeKind::Gf).is_err());
        // parallel evaluation agrees with the single approximant
        let single = calc(z_out.view(), iws.view(), coeff.view(), 7).unwrap();
        let (_, values) = approximants(z_out.view(), iws.view(), coeff.view(), 7, 7, PadeKind::Usual).unwrap();
        assert!((single[0] - values[[0, 0]]).norm() < 1e-14);
    }

    #[test]
    fn continuation_of_bethe_gf() {
        let _ = env_logger::builder().is_test(true).try_init();
        let iws = matsubara_frequencies(0..100, 100.0);
        let gf_iw = iws.mapv(|iw| bethe::gf_z(iw, 1.0));
        let z_out: Array1<Complex64> = linspace(-1.5, 1.5, 61).mapv(|w| Complex64::new(w, 0.3));
        let valid_z: Array1<Complex64> = linspace(-2.0, 2.0, 101).mapv(|w| Complex64::new(w, 0.01));
        let result = averaged(
            z_out.view(),
            iws.view(),
            gf_iw.view(),
            valid_z.view(),
            20,
            100,
            1e-8,
            PadeKind::Gf,
        )
        .unwrap();
        assert!(!result.accepted.is_empty());
        for (z, value) in z_out.iter().zip(result.x.iter()) {
            assert!((value - bethe::gf_z(*z, 1.0)).norm() < 1e-4);
        }
        assert!(result.err.iter().all(|e| e.re >= 0.0 && e.im >= 0.0));
    }

    #[test]
    fn no_causal_approximant() {
        let iws = matsubara_frequencies(0..10, 10.0);
        let gf_iw = iws.mapv(|iw| bethe::gf_z(iw, 1.0));
        let valid_z: Array1<Complex64> = array![Complex64::new(0.0, 0.1)];
        let result = averaged(
            valid_z.view(),
            iws.view(),
            gf_iw.view(),
            valid_z.view(),
            2,
            10,
            -10.0,
            PadeKind::Gf,
        );
        assert!(matches!(result, Err(GfError::NoValidApproximant { .. })));
    }
}
