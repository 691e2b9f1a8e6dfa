//! Decompositions of matrix valued Green's functions.
//!
//! In the limit of infinite coordination number the self-energy becomes local
//! and the inverse lattice Green's function is a matrix in orbital/site space,
//!
//! ```text
//! (G⁻¹(z))_ii = z - μ_i - t_ii - Σ_i(z),   (G⁻¹(z))_ij = t_ij   for i ≠ j.
//! ```
//!
//! Diagonalizing `G⁻¹ = P diag(ξ) P⁻¹` the Green's function follows from the
//! resolvent `G = P diag(1/ξ) P⁻¹` without additional matrix inversions.
use crate::error::{GfError, GfResult};
use log::trace;
use ndarray::prelude::*;
use ndarray_linalg::{Eig, Eigh, Inverse, UPLO};
use num_complex::Complex64;
use std::str::FromStr;

/// How a [Decomposition] is turned back into a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructKind {
    /// The complete matrix.
    Full,
    /// Only the diagonal elements.
    Diag,
}

impl FromStr for ReconstructKind {
    type Err = GfError;

    /// Any non-empty prefix of "full" or "diag" is accepted, ignoring the case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind: String = s.to_lowercase();
        if !kind.is_empty() && "diag".starts_with(&kind) {
            Ok(ReconstructKind::Diag)
        } else if !kind.is_empty() && "full".starts_with(&kind) {
            Ok(ReconstructKind::Full)
        } else {
            Err(GfError::InvalidParameter(format!(
                "unknown reconstruction kind '{}', use 'full' or 'diag'",
                s
            )))
        }
    }
}

/// Matrix reconstructed from a [Decomposition].
#[derive(Debug, Clone)]
pub enum Reconstructed {
    Full(Array2<Complex64>),
    Diag(Array1<Complex64>),
}

/// Eigen-decomposition `M = rv diag(xi) rv_inv`.
///
/// If the reciprocal of `xi` is taken, the reconstruction gives the inverse
/// of the original matrix.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Right eigenvectors as columns.
    pub rv: Array2<Complex64>,
    /// Eigenvalues.
    pub xi: Array1<Complex64>,
    /// Inverse of `rv`.
    pub rv_inv: Array2<Complex64>,
}

fn check_square(matrix: ArrayView2<Complex64>) -> GfResult<()> {
    if matrix.is_empty() {
        return Err(GfError::EmptyInput("matrix"));
    }
    if matrix.nrows() != matrix.ncols() {
        return Err(GfError::LengthMismatch {
            expected: matrix.nrows(),
            actual: matrix.ncols(),
        });
    }
    Ok(())
}

impl Decomposition {
    pub fn new(rv: Array2<Complex64>, xi: Array1<Complex64>, rv_inv: Array2<Complex64>) -> GfResult<Self> {
        check_square(rv.view())?;
        check_square(rv_inv.view())?;
        if rv.dim() != rv_inv.dim() || xi.len() != rv.nrows() {
            return Err(GfError::LengthMismatch {
                expected: rv.nrows(),
                actual: xi.len(),
            });
        }
        Ok(Decomposition { rv, xi, rv_inv })
    }

    /// General decomposition of the inverse Green's function, `G⁻¹ = P h P⁻¹`.
    pub fn from_gf(g_inv: ArrayView2<Complex64>) -> GfResult<Self> {
        check_square(g_inv)?;
        let (xi, rv): (Array1<Complex64>, Array2<Complex64>) = g_inv.eig()?;
        let rv_inv: Array2<Complex64> = rv.inv()?;
        Ok(Decomposition { rv, xi, rv_inv })
    }

    /// Decomposition of a Hermitian Hamiltonian, `H = U h U†`.
    ///
    /// The transformation is unitary, so `rv_inv` is the conjugate transpose of `rv`.
    pub fn from_hamiltonian(hamiltonian: ArrayView2<Complex64>) -> GfResult<Self> {
        check_square(hamiltonian)?;
        let (eig, rv): (Array1<f64>, Array2<Complex64>) = hamiltonian.eigh(UPLO::Lower)?;
        let rv_inv: Array2<Complex64> = rv.t().mapv(|x| x.conj());
        Ok(Decomposition {
            rv,
            xi: eig.mapv(|e| Complex64::new(e, 0.0)),
            rv_inv,
        })
    }

    /// Decomposition of a complex symmetric matrix, `G⁻¹ = O h Oᵀ`.
    ///
    /// The eigenvectors are normalized with respect to the bilinear form,
    /// `rvᵀ rv = 1`, so that `rv_inv = rvᵀ`. Eigenvalues have to be
    /// non-degenerate.
    pub fn from_symmetric(g_inv: ArrayView2<Complex64>) -> GfResult<Self> {
        check_square(g_inv)?;
        let (xi, mut rv): (Array1<Complex64>, Array2<Complex64>) = g_inv.eig()?;
        for mut column in rv.axis_iter_mut(Axis(1)) {
            let norm2: Complex64 = column.iter().map(|x| x * x).sum();
            if norm2.norm() < f64::EPSILON {
                return Err(GfError::InvalidParameter(String::from(
                    "eigenvector is self-orthogonal, matrix is not diagonalizable by an orthogonal transformation",
                )));
            }
            let norm: Complex64 = norm2.sqrt();
            column.mapv_inplace(|x| x / norm);
        }
        let rv_inv: Array2<Complex64> = rv.t().to_owned();
        trace!("symmetric decomposition with eigenvalues {}", xi);
        Ok(Decomposition { rv, xi, rv_inv })
    }

    /// Transform the eigenvalues, e.g. `|xi| 1.0 / xi` to invert the matrix.
    pub fn apply<F: Fn(Complex64) -> Complex64>(&mut self, func: F) {
        self.xi.mapv_inplace(func);
    }

    fn check_xi(&self, xi: ArrayView1<Complex64>) -> GfResult<()> {
        if xi.len() != self.rv.ncols() {
            return Err(GfError::LengthMismatch {
                expected: self.rv.ncols(),
                actual: xi.len(),
            });
        }
        Ok(())
    }

    /// `rv diag(xi) rv_inv` for alternative eigenvalues `xi`.
    pub fn reconstruct_full(&self, xi: ArrayView1<Complex64>) -> GfResult<Array2<Complex64>> {
        self.check_xi(xi)?;
        // scales column j of rv by xi[j]
        let scaled: Array2<Complex64> = &self.rv * &xi;
        Ok(scaled.dot(&self.rv_inv))
    }

    /// Diagonal of `rv diag(xi) rv_inv`.
    pub fn reconstruct_diag(&self, xi: ArrayView1<Complex64>) -> GfResult<Array1<Complex64>> {
        self.check_xi(xi)?;
        Ok(self
            .rv
            .outer_iter()
            .zip(self.rv_inv.axis_iter(Axis(1)))
            .map(|(row, column)| {
                row.iter()
                    .zip(xi.iter())
                    .zip(column.iter())
                    .map(|((r, x), r_inv)| r * x * r_inv)
                    .sum::<Complex64>()
            })
            .collect())
    }

    /// Diagonals for many sets of eigenvalues, `xi` has the shape `(N, n)`.
    ///
    /// Column `l` of the result is the diagonal for the eigenvalues `xi[.., l]`,
    /// e.g. the diagonal Green's function on a frequency mesh.
    pub fn reconstruct_diag_many(&self, xi: ArrayView2<Complex64>) -> GfResult<Array2<Complex64>> {
        if xi.nrows() != self.rv.ncols() {
            return Err(GfError::LengthMismatch {
                expected: self.rv.ncols(),
                actual: xi.nrows(),
            });
        }
        // weights[i, j] = rv[i, j] rv_inv[j, i]
        let weights: Array2<Complex64> = &self.rv * &self.rv_inv.t();
        Ok(weights.dot(&xi))
    }

    /// Reconstruct the matrix with the current eigenvalues.
    pub fn reconstruct(&self, kind: ReconstructKind) -> GfResult<Reconstructed> {
        self.reconstruct_with(self.xi.view(), kind)
    }

    /// Reconstruct the matrix with alternative eigenvalues `xi`.
    pub fn reconstruct_with(&self, xi: ArrayView1<Complex64>, kind: ReconstructKind) -> GfResult<Reconstructed> {
        match kind {
            ReconstructKind::Full => Ok(Reconstructed::Full(self.reconstruct_full(xi)?)),
            ReconstructKind::Diag => Ok(Reconstructed::Diag(self.reconstruct_diag(xi)?)),
        }
    }

    /// Resolvent `(z - M)⁻¹ = rv diag(1/(z - xi)) rv_inv`, the Green's function
    /// if `self` is the decomposition of a Hamiltonian.
    pub fn gf_z(&self, z: Complex64) -> GfResult<Array2<Complex64>> {
        let resolvent: Array1<Complex64> = self.xi.mapv(|xi| 1.0 / (z - xi));
        self.reconstruct_full(resolvent.view())
    }

    /// Decomposition as tuple `(rv, xi, rv_inv)`.
    pub fn into_parts(self) -> (Array2<Complex64>, Array1<Complex64>, Array2<Complex64>) {
        (self.rv, self.xi, self.rv_inv)
    }
}

/// Green's function from the decomposition of its inverse,
/// `G⁻¹ = P h P⁻¹ ⇒ G = P h⁻¹ P⁻¹` with `diag_inv = h⁻¹`.
pub fn construct_gf_omega(
    rv_inv: ArrayView2<Complex64>,
    diag_inv: ArrayView1<Complex64>,
    rv: ArrayView2<Complex64>,
) -> GfResult<Array2<Complex64>> {
    let decomposition = Decomposition::new(rv.to_owned(), diag_inv.to_owned(), rv_inv.to_owned())?;
    decomposition.reconstruct_full(diag_inv)
}
