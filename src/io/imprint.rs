use clap::crate_version;
use log::info;

pub fn write_header() {
    info!("{: ^80}", "-----------------");
    info!("{: ^80}", "GFTOOL");
    info!("{: ^80}", "-----------------");
    let mut version_string: String = "version: ".to_owned();
    version_string.push_str(crate_version!());
    info!("{: ^80}", version_string);
    info!("{: ^80}", "");
    info!("{: ^80}", "::::::::::::::::::::::::::::::::::::::");
    info!("{: ^80}", "::     lattice Green's functions    ::");
    info!("{: ^80}", "::  Fourier transforms  Padé tools  ::");
    info!("{: ^80}", "::::::::::::::::::::::::::::::::::::::");
    info!("{: ^80}", "");
}

/// Centered section title between two rules.
pub fn write_section(title: &str) {
    info!("{:-^80}", "");
    info!("{: ^80}", title);
    info!("{:-^80}", "");
}
