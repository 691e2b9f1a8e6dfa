use crate::defaults::*;
use crate::error::{GfError, GfResult};
use crate::fourier::{IwToTau, TauToIw};
use crate::lattice::LatticeKind;
use crate::pade::PadeKind;
use serde::{Deserialize, Serialize};

fn default_lattice() -> LatticeKind {
    LATTICE
}
fn default_half_bandwidth() -> f64 {
    HALF_BANDWIDTH
}
fn default_scale() -> f64 {
    RECTANGULAR_SCALE
}
fn default_beta() -> f64 {
    BETA
}
fn default_n_matsubara() -> usize {
    N_MATSUBARA
}
fn default_omega_min() -> f64 {
    OMEGA_MIN
}
fn default_omega_max() -> f64 {
    OMEGA_MAX
}
fn default_n_omega() -> usize {
    N_OMEGA
}
fn default_eta() -> f64 {
    ETA
}
fn default_iw2tau() -> IwToTau {
    IW2TAU_METHOD
}
fn default_tau2iw() -> TauToIw {
    TAU2IW_METHOD
}
fn default_moments() -> Vec<f64> {
    MOMENTS.to_vec()
}
fn default_pade_kind() -> PadeKind {
    PADE_KIND
}
fn default_n_min() -> usize {
    PADE_N_MIN
}
fn default_n_max() -> usize {
    PADE_N_MAX
}
fn default_threshold() -> f64 {
    PADE_THRESHOLD
}
fn default_directory() -> String {
    String::from(OUTPUT_DIRECTORY)
}
fn default_write_files() -> bool {
    WRITE_FILES
}
fn default_lattice_config() -> LatticeConfig {
    LatticeConfig {
        kind: default_lattice(),
        half_bandwidth: default_half_bandwidth(),
        scale: default_scale(),
    }
}
fn default_mesh_config() -> MeshConfig {
    MeshConfig {
        beta: default_beta(),
        n_matsubara: default_n_matsubara(),
        omega_min: default_omega_min(),
        omega_max: default_omega_max(),
        n_omega: default_n_omega(),
        eta: default_eta(),
    }
}
fn default_fourier_config() -> FourierConfig {
    FourierConfig {
        iw2tau: default_iw2tau(),
        tau2iw: default_tau2iw(),
        moments: default_moments(),
    }
}
fn default_pade_config() -> PadeConfig {
    PadeConfig {
        kind: default_pade_kind(),
        n_min: default_n_min(),
        n_max: default_n_max(),
        threshold: default_threshold(),
    }
}
fn default_output_config() -> OutputConfig {
    OutputConfig {
        directory: default_directory(),
        write_files: default_write_files(),
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Configuration {
    #[serde(default = "default_lattice_config")]
    pub lattice: LatticeConfig,
    #[serde(default = "default_mesh_config")]
    pub mesh: MeshConfig,
    #[serde(default = "default_fourier_config")]
    pub fourier: FourierConfig,
    #[serde(default = "default_pade_config")]
    pub pade: PadeConfig,
    #[serde(default = "default_output_config")]
    pub output: OutputConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lattice: default_lattice_config(),
            mesh: default_mesh_config(),
            fourier: default_fourier_config(),
            pade: default_pade_config(),
            output: default_output_config(),
        }
    }
}

impl Configuration {
    /// Check the parameters which can't be expressed by the types.
    pub fn validate(&self) -> GfResult<()> {
        let positive = |name: &str, value: f64| -> GfResult<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(GfError::InvalidParameter(format!(
                    "{} has to be positive, got {}",
                    name, value
                )))
            }
        };
        positive("lattice.half_bandwidth", self.lattice.half_bandwidth)?;
        positive("lattice.scale", self.lattice.scale)?;
        positive("mesh.beta", self.mesh.beta)?;
        positive("mesh.eta", self.mesh.eta)?;
        if self.mesh.n_matsubara == 0 {
            return Err(GfError::InvalidMesh(String::from(
                "at least one Matsubara frequency is required",
            )));
        }
        if self.mesh.n_omega == 0 || self.mesh.omega_min > self.mesh.omega_max {
            return Err(GfError::InvalidMesh(format!(
                "real frequency mesh [{}, {}] with {} points",
                self.mesh.omega_min, self.mesh.omega_max, self.mesh.n_omega
            )));
        }
        if self.fourier.moments.is_empty() {
            return Err(GfError::EmptyInput("fourier.moments"));
        }
        if self.pade.n_min > self.pade.n_max {
            return Err(GfError::InvalidParameter(format!(
                "pade.n_min = {} is larger than pade.n_max = {}",
                self.pade.n_min, self.pade.n_max
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct LatticeConfig {
    #[serde(default = "default_lattice")]
    pub kind: LatticeKind,
    #[serde(default = "default_half_bandwidth")]
    pub half_bandwidth: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct MeshConfig {
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_n_matsubara")]
    pub n_matsubara: usize,
    #[serde(default = "default_omega_min")]
    pub omega_min: f64,
    #[serde(default = "default_omega_max")]
    pub omega_max: f64,
    #[serde(default = "default_n_omega")]
    pub n_omega: usize,
    #[serde(default = "default_eta")]
    pub eta: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FourierConfig {
    #[serde(default = "default_iw2tau")]
    pub iw2tau: IwToTau,
    #[serde(default = "default_tau2iw")]
    pub tau2iw: TauToIw,
    #[serde(default = "default_moments")]
    pub moments: Vec<f64>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct PadeConfig {
    #[serde(default = "default_pade_kind")]
    pub kind: PadeKind,
    #[serde(default = "default_n_min")]
    pub n_min: usize,
    #[serde(default = "default_n_max")]
    pub n_max: usize,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
    #[serde(default = "default_write_files")]
    pub write_files: bool,
}
