use crate::error::{GfError, GfResult};
use log::info;
use ndarray::prelude::*;
use ndarray_npy::write_npy;
use num_complex::Complex64;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the columns `[x, Re y, Im y]` as `(n, 3)` array to `directory/name`.
pub fn write_complex(directory: &Path, name: &str, x: ArrayView1<f64>, y: ArrayView1<Complex64>) -> GfResult<PathBuf> {
    let real: Array1<f64> = y.mapv(|v| v.re);
    let imag: Array1<f64> = y.mapv(|v| v.im);
    write_columns(directory, name, &[x.view(), real.view(), imag.view()])
}

/// Write the `m` data columns of length `n` as `(n, m)` array to `directory/name`.
pub fn write_columns(directory: &Path, name: &str, columns: &[ArrayView1<f64>]) -> GfResult<PathBuf> {
    let n_rows: usize = columns.first().map_or(0, |c| c.len());
    if let Some(column) = columns.iter().find(|c| c.len() != n_rows) {
        return Err(GfError::LengthMismatch {
            expected: n_rows,
            actual: column.len(),
        });
    }
    let table: Array2<f64> = Array2::from_shape_fn((n_rows, columns.len()), |(i, j)| columns[j][i]);
    fs::create_dir_all(directory)?;
    let path: PathBuf = directory.join(name);
    write_npy(&path, &table)?;
    info!("{: <25} {}", "written:", path.display());
    Ok(path)
}
