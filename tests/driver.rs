use approx::AbsDiffEq;
use gftool::driver::run;
use gftool::io::Configuration;
use gftool::lattice::LatticeKind;
use gftool::pade::PadeKind;
use std::env;
use std::fs;

fn small_config() -> Configuration {
    let mut config: Configuration = Configuration::default();
    config.mesh.beta = 20.0;
    config.mesh.n_matsubara = 256;
    config.output.write_files = false;
    config
}

#[test]
fn bethe_lattice_pipeline() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config: Configuration = small_config();
    let summary = run(&config).unwrap();
    // particle-hole symmetric lattice is half filled
    assert!(summary.occ_iw.abs_diff_eq(&0.5, 1e-10));
    assert!(summary.occ_tau.abs_diff_eq(&0.5, 1e-8));
    assert!(summary.occ_dos.abs_diff_eq(&0.5, 1e-6));
    assert!(summary.fourier_error < 1e-3);
    assert!(summary.pade_error < 0.2);
    assert!(summary.n_accepted > 0);
}

#[test]
fn occupations_agree_for_asymmetric_lattice() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut config: Configuration = small_config();
    config.lattice.kind = LatticeKind::Triangular;
    // m_3 of the Green's function is the second moment of the DOS
    config.fourier.moments = vec![1.0, 0.0, 1.5 * (4.0f64 / 9.0).powi(2)];
    config.pade.kind = PadeKind::Gf;
    config.pade.threshold = 1e-2;
    let summary = run(&config).unwrap();
    assert!(summary.occ_iw.abs_diff_eq(&summary.occ_dos, 1e-3));
    assert!(summary.occ_tau.abs_diff_eq(&summary.occ_dos, 1e-3));
}

#[test]
fn output_files_are_written() {
    let mut config: Configuration = small_config();
    let directory = env::temp_dir().join(format!("gftool_driver_{}", std::process::id()));
    config.output.directory = directory.to_string_lossy().into_owned();
    config.output.write_files = true;
    config.mesh.n_omega = 11;
    run(&config).unwrap();
    for name in ["gf_iw.npy", "gf_tau.npy", "gf_pade.npy", "dos.npy"].iter() {
        assert!(directory.join(name).exists(), "{} is missing", name);
    }
    fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn invalid_configuration() {
    let mut config: Configuration = small_config();
    config.fourier.moments.clear();
    assert!(run(&config).is_err());
}
