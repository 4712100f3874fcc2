pub mod cartesian;
pub mod common;
pub mod datum;
pub mod ellipsoid;
pub mod geographic;
pub mod helmert;
pub mod local;

use crate::config::{CartesianConfig, GeographicConfig, LocalCartesianConfig};
use crate::error::CoordSysError;

pub use cartesian::CartesianCS;
pub use datum::{Helmert, HorizontalDatum, VerticalDatum};
pub use ellipsoid::Ellipsoid;
pub use geographic::GeographicCS;
pub use helmert::DatumTransform;
pub use local::LocalCartesianCS;

/// Declarative description of a coordinate system, comparable by value.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordSysConfig {
    Cartesian(CartesianConfig),
    Geographic(GeographicConfig),
    LocalCartesian(LocalCartesianConfig),
}

/// A coordinate system whose tuples can be taken to and from the geocentric
/// (ECEF) frame of its horizontal datum, or a plain Cartesian system that
/// only converts to other Cartesian systems.
///
/// Implementations are configured, then initialized once; afterwards every
/// method takes `&self` and the value may be shared across threads.
pub trait CoordSys: Send + Sync {
    /// Short name used in messages ("Cartesian", "Geographic", "LocalCartesian").
    fn kind(&self) -> &'static str;

    /// The configuration this system was (or will be) initialized from.
    ///
    /// Once initialized, names are given in their resolved spelling so two
    /// systems resolving to the same constants describe equal.
    fn describe(&self) -> CoordSysConfig;

    fn is_initialized(&self) -> bool;

    /// Resolved horizontal datum; fails with `NotInitialized` before `initialize()`.
    fn datum(&self) -> Result<&HorizontalDatum, CoordSysError>;

    /// System tuples -> geocentric metres, in-place.
    fn to_geocentric_batch(&self, coords: &mut [[f64; 3]]) -> Result<(), CoordSysError>;

    /// Geocentric metres -> system tuples, in-place.
    fn from_geocentric_batch(&self, coords: &mut [[f64; 3]]) -> Result<(), CoordSysError>;

    fn ensure_initialized(&self) -> Result<(), CoordSysError> {
        self.datum().map(|_| ())
    }

    /// Units scale of a plain Cartesian system; `None` for georeferenced ones.
    fn cartesian_units(&self) -> Option<f64> {
        None
    }

    fn to_geocentric(&self, coords: &[[f64; 3]]) -> Result<Vec<[f64; 3]>, CoordSysError> {
        let mut out = coords.to_vec();
        self.to_geocentric_batch(&mut out)?;
        Ok(out)
    }

    fn from_geocentric(&self, coords: &[[f64; 3]]) -> Result<Vec<[f64; 3]>, CoordSysError> {
        let mut out = coords.to_vec();
        self.from_geocentric_batch(&mut out)?;
        Ok(out)
    }
}
