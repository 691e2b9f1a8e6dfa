use crate::error::GfResult;
use crate::io::Configuration;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Read the configuration file at `config_file_path`.
///
/// If the file does not exist the default settings are used and written to
/// `config_file_path`, so that the user can see all the used options.
pub fn read_input(config_file_path: &Path) -> GfResult<Configuration> {
    let file_exists: bool = config_file_path.exists();
    let config_string: String = if file_exists {
        fs::read_to_string(config_file_path)?
    } else {
        String::from("")
    };
    // missing sections and keys are filled with the defaults
    let config: Configuration = toml::from_str(&config_string)?;
    config.validate()?;
    if !file_exists {
        info!(
            "{: <25} {}",
            "writing default config:",
            config_file_path.display()
        );
        fs::write(config_file_path, toml::to_string(&config)?)?;
    }
    debug!("{:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::LatticeKind;
    use std::env;

    #[test]
    fn missing_file_is_written() {
        let _ = env_logger::builder().is_test(true).try_init();
        let path = env::temp_dir().join(format!("gftool_defaults_{}.toml", std::process::id()));
        let _ = fs::remove_file(&path);
        let config: Configuration = read_input(&path).unwrap();
        assert!(path.exists());
        let again: Configuration = read_input(&path).unwrap();
        assert_eq!(config.mesh.n_omega, again.mesh.n_omega);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn existing_file_is_kept() {
        let path = env::temp_dir().join(format!("gftool_square_{}.toml", std::process::id()));
        let content: &str = "[lattice]\nkind = \"square\"\n";
        fs::write(&path, content).unwrap();
        let config: Configuration = read_input(&path).unwrap();
        assert_eq!(config.lattice.kind, LatticeKind::Square);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        fs::remove_file(&path).unwrap();
    }
}
