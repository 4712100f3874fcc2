//! Plain Cartesian coordinate system: (x, y, z) with a units scale and no
//! geodetic frame.

use tracing::debug;

use super::datum::HorizontalDatum;
use super::{CoordSys, CoordSysConfig};
use crate::config::{validate_to_meters, CartesianConfig};
use crate::error::CoordSysError;

/// Cartesian coordinates in `to_meters` units.
///
/// Only other Cartesian systems can be converted to or from it, by unit
/// scaling; it has no geocentric position.
#[derive(Clone, Debug, Default)]
pub struct CartesianCS {
    config: CartesianConfig,
    initialized: bool,
}

impl CartesianCS {
    pub fn new(config: CartesianConfig) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    pub fn initialize(&mut self) -> Result<(), CoordSysError> {
        self.initialized = false;
        validate_to_meters(self.config.to_meters)?;
        debug!(
            to_meters = self.config.to_meters,
            "initialized Cartesian coordinate system"
        );
        self.initialized = true;
        Ok(())
    }

    pub fn config(&self) -> &CartesianConfig {
        &self.config
    }

    pub fn set_to_meters(&mut self, to_meters: f64) {
        self.config.to_meters = to_meters;
        self.initialized = false;
    }
}

impl CoordSys for CartesianCS {
    fn kind(&self) -> &'static str {
        "Cartesian"
    }

    fn describe(&self) -> CoordSysConfig {
        CoordSysConfig::Cartesian(self.config.clone())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn datum(&self) -> Result<&HorizontalDatum, CoordSysError> {
        self.ensure_initialized()?;
        Err(CoordSysError::NotGeoreferenced("Cartesian"))
    }

    fn ensure_initialized(&self) -> Result<(), CoordSysError> {
        if self.initialized {
            Ok(())
        } else {
            Err(CoordSysError::NotInitialized("Cartesian"))
        }
    }

    fn cartesian_units(&self) -> Option<f64> {
        Some(self.config.to_meters)
    }

    fn to_geocentric_batch(&self, _coords: &mut [[f64; 3]]) -> Result<(), CoordSysError> {
        self.ensure_initialized()?;
        Err(CoordSysError::NotGeoreferenced("Cartesian"))
    }

    fn from_geocentric_batch(&self, _coords: &mut [[f64; 3]]) -> Result<(), CoordSysError> {
        self.ensure_initialized()?;
        Err(CoordSysError::NotGeoreferenced("Cartesian"))
    }
}
