//! End-to-end evaluation of a lattice Green's function behind the `gftool` binary.
use crate::density::density_iw;
use crate::error::GfResult;
use crate::fourier::{iw2tau, tau2iw, tau_mesh};
use crate::io::{write_columns, write_complex, write_section, Configuration};
use crate::lattice::Lattice;
use crate::pade::{averaged, Averaged};
use crate::statistics::{fermi_fct, matsubara_frequencies};
use crate::utils::{linspace, Timer};
use log::{debug, info};
use ndarray::prelude::*;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::path::Path;

// midpoint rule for the occupation of the DOS
const N_QUADRATURE: usize = 20000;

/// Quantities of a driver run that characterize the accuracy of the tools.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Occupation from the Matsubara sum.
    pub occ_iw: f64,
    /// Occupation `-G(β)` from the imaginary time Green's function.
    pub occ_tau: f64,
    /// Occupation `∫ dϵ DOS(ϵ) f(ϵ)` by quadrature.
    pub occ_dos: f64,
    /// Largest deviation of the back-transformed `G(iω_n)` on the first quarter of the mesh.
    pub fourier_error: f64,
    /// Largest deviation of the Padé continuation from the exact `G(ω + iη)`.
    pub pade_error: f64,
    /// Number of averaged Padé approximants.
    pub n_accepted: usize,
}

fn occupation_from_dos(lattice: &dyn Lattice, beta: f64) -> f64 {
    let (lower, upper) = lattice.band_edges();
    let step: f64 = (upper - lower) / N_QUADRATURE as f64;
    (0..N_QUADRATURE)
        .map(|i| {
            let eps: f64 = lower + (i as f64 + 0.5) * step;
            lattice.dos(eps) * fermi_fct(eps, beta)
        })
        .sum::<f64>()
        * step
}

fn max_deviation(a: ArrayView1<Complex64>, b: ArrayView1<Complex64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Evaluate the configured lattice on the Matsubara axis, transform it to
/// imaginary time and back, compute the occupation and continue it to the
/// real axis. The results are written as `.npy` files if requested.
pub fn run(config: &Configuration) -> GfResult<Summary> {
    config.validate()?;
    let lattice: Box<dyn Lattice> = config
        .lattice
        .kind
        .build(config.lattice.half_bandwidth, config.lattice.scale);
    let beta: f64 = config.mesh.beta;
    let n_iw: usize = config.mesh.n_matsubara;
    let moments: &[f64] = &config.fourier.moments;
    let directory: &Path = Path::new(&config.output.directory);

    write_section("lattice Green's function");
    let timer: Timer = Timer::start();
    info!("{: <25} {}", "lattice:", lattice.name());
    info!("{: <25} {}", "half-bandwidth:", lattice.half_bandwidth());
    info!("{: <25} {}", "beta:", beta);
    info!("{: <25} {}", "Matsubara frequencies:", n_iw);
    let iws: Array1<Complex64> = matsubara_frequencies(0..n_iw as i64, beta);
    let gf_iw: Array1<Complex64> = iws.mapv(|iw| lattice.gf_z(iw));
    debug!("{: <25} {}", "second moment:", lattice.dos_moment(2));
    info!("{}", timer);

    write_section("Fourier transform");
    let timer: Timer = Timer::start();
    info!("{: <25} {:?}", "moments:", moments);
    let gf_tau: Array1<f64> = iw2tau(gf_iw.view(), beta, moments, config.fourier.iw2tau)?;
    let gf_iw_back: Array1<Complex64> = tau2iw(gf_tau.view(), beta, moments, config.fourier.tau2iw)?;
    let n_compare: usize = (n_iw / 4).max(1);
    let fourier_error: f64 = max_deviation(
        gf_iw.slice(s![..n_compare]),
        gf_iw_back.slice(s![..n_compare]),
    );
    info!(
        "{: <25} {:?} -> {:?}",
        "methods:", config.fourier.iw2tau, config.fourier.tau2iw
    );
    info!("{: <25} {:.3e}", "round trip deviation:", fourier_error);
    info!("{}", timer);

    write_section("occupation");
    let timer: Timer = Timer::start();
    let occ_iw: f64 = density_iw(iws.view(), gf_iw.view(), beta, moments)?;
    let occ_tau: f64 = -gf_tau[gf_tau.len() - 1];
    let occ_dos: f64 = occupation_from_dos(lattice.as_ref(), beta);
    info!("{: <25} {:>14.10}", "n from G(iw):", occ_iw);
    info!("{: <25} {:>14.10}", "n from G(tau):", occ_tau);
    info!("{: <25} {:>14.10}", "n from DOS:", occ_dos);
    info!("{}", timer);

    write_section("Pade continuation");
    let timer: Timer = Timer::start();
    let omega: Array1<f64> = linspace(config.mesh.omega_min, config.mesh.omega_max, config.mesh.n_omega);
    let z_out: Array1<Complex64> = omega.mapv(|w| Complex64::new(w, config.mesh.eta));
    // high-order coefficients of distant frequencies only amplify round-off
    let n_in: usize = config.pade.n_max.min(n_iw);
    let result: Averaged = averaged(
        z_out.view(),
        iws.slice(s![..n_in]),
        gf_iw.slice(s![..n_in]),
        z_out.view(),
        config.pade.n_min,
        config.pade.n_max,
        config.pade.threshold,
        config.pade.kind,
    )?;
    let gf_exact: Array1<Complex64> = z_out.mapv(|z| lattice.gf_z(z));
    let pade_error: f64 = max_deviation(result.x.view(), gf_exact.view());
    info!("{: <25} {:?}", "kind:", config.pade.kind);
    info!("{: <25} {:?}", "accepted approximants:", result.accepted);
    info!("{: <25} {:.3e}", "deviation from exact:", pade_error);
    info!("{}", timer);

    if config.output.write_files {
        write_section("output");
        let w_n: Array1<f64> = iws.mapv(|iw| iw.im);
        write_complex(directory, "gf_iw.npy", w_n.view(), gf_iw.view())?;
        let tau: Array1<f64> = tau_mesh(n_iw, beta);
        write_columns(directory, "gf_tau.npy", &[tau.view(), gf_tau.view()])?;
        let err_re: Array1<f64> = result.err.mapv(|x| x.re);
        let err_im: Array1<f64> = result.err.mapv(|x| x.im);
        let pade_re: Array1<f64> = result.x.mapv(|x| x.re);
        let pade_im: Array1<f64> = result.x.mapv(|x| x.im);
        write_columns(
            directory,
            "gf_pade.npy",
            &[omega.view(), pade_re.view(), pade_im.view(), err_re.view(), err_im.view()],
        )?;
        let dos_exact: Array1<f64> = omega.mapv(|w| lattice.dos(w));
        let dos_pade: Array1<f64> = pade_im.mapv(|x| -x / PI);
        write_columns(directory, "dos.npy", &[omega.view(), dos_exact.view(), dos_pade.view()])?;
    }

    Ok(Summary {
        occ_iw,
        occ_tau,
        occ_dos,
        fourier_error,
        pade_error,
        n_accepted: result.accepted.len(),
    })
}
