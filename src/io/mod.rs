mod imprint;
mod input;
mod output;
pub(crate) mod settings;

pub use imprint::{write_header, write_section};
pub use input::read_input;
pub use output::{write_columns, write_complex};
pub use settings::{Configuration, FourierConfig, LatticeConfig, MeshConfig, OutputConfig, PadeConfig};
