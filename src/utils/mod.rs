//! Utility modules

pub mod data_dir;
