pub mod config;
pub mod dataset;
pub mod error;
pub mod params;
pub mod vector;

pub use config::Config;
pub use dataset::*;
pub use error::*;
pub use params::*;
pub use vector::*;
