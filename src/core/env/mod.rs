//! Host environment detection

pub mod distro;
