use anyhow::{Context, Result};
use clap::{crate_version, Arg, Command};
use env_logger::Builder;
use gftool::defaults::CONFIG_FILE_NAME;
use gftool::driver::{run, Summary};
use gftool::io::{read_input, write_header, Configuration};
use gftool::utils::Timer;
use log::{info, LevelFilter};
use std::io::Write;
use std::path::Path;

fn main() -> Result<()> {
    let matches = Command::new("gftool")
        .version(crate_version!())
        .about("lattice Green's functions, Fourier transforms and Padé continuation")
        .arg(
            Arg::new("config")
                .help("TOML configuration file, written with the defaults if missing")
                .default_value(CONFIG_FILE_NAME)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("increase the log level"),
        )
        .get_matches();

    let level: LevelFilter = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, level)
        .init();

    let timer: Timer = Timer::start();
    write_header();
    let config_file: &str = matches.value_of("config").unwrap_or(CONFIG_FILE_NAME);
    let config: Configuration = read_input(Path::new(config_file))
        .with_context(|| format!("failed to read the configuration {}", config_file))?;
    let summary: Summary = run(&config).context("gftool run failed")?;
    info!("{:-^80}", "");
    info!("{: <25} {}", "accepted approximants:", summary.n_accepted);
    info!("{: <25} {:.3e}", "occupation mismatch:", (summary.occ_iw - summary.occ_dos).abs());
    info!("{}", timer);
    Ok(())
}
