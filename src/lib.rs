//! Conversion between geographic, geocentric and local Cartesian coordinates.
//!
//! A [`coordsys::GeographicCS`] or [`coordsys::LocalCartesianCS`] is built from
//! a plain config, initialized once, and then shared read-only. The
//! [`converter::Converter`] pivots every conversion through the geocentric
//! frame, applying a Helmert datum shift when the two systems' datums differ.
//! Plain [`coordsys::CartesianCS`] systems convert among themselves by unit
//! scaling only.

pub mod config;
pub mod converter;
pub mod coordsys;
pub mod error;
#[cfg(feature = "python")]
mod py;

pub use config::{CartesianConfig, GeographicConfig, LocalCartesianConfig};
pub use converter::{convert, convert_source, CoordSource, Converter};
pub use coordsys::{CartesianCS, CoordSys, CoordSysConfig, GeographicCS, LocalCartesianCS};
pub use error::{ConvertError, CoordSysError};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _geocoords(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
