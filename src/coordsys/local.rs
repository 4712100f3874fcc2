//! Local Cartesian (East-North-Up) coordinate system centred on an origin.

use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use super::common::enu_rotation;
use super::datum::HorizontalDatum;
use super::geographic::GeographicCS;
use super::{CoordSys, CoordSysConfig};
use crate::config::{validate_to_meters, GeographicConfig, LocalCartesianConfig};
use crate::error::CoordSysError;

/// Cached frame derived on `initialize()`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Frame {
    /// Rows are East, North, Up at the origin.
    rotation: Matrix3<f64>,
    origin: Vector3<f64>,
}

/// Cartesian coordinates relative to an origin on a geodetic basis.
///
/// x points East, y North and z Up (along the ellipsoid normal) at the
/// origin. Units are metres scaled by `to_meters`.
#[derive(Clone, Debug)]
pub struct LocalCartesianCS {
    basis: GeographicCS,
    origin_lon: f64,
    origin_lat: f64,
    origin_elev: f64,
    to_meters: f64,
    frame: Option<Frame>,
}

impl Default for LocalCartesianCS {
    fn default() -> Self {
        Self::new(LocalCartesianConfig::default())
    }
}

impl LocalCartesianCS {
    pub fn new(config: LocalCartesianConfig) -> Self {
        Self {
            basis: GeographicCS::new(config.geographic),
            origin_lon: config.origin_lon,
            origin_lat: config.origin_lat,
            origin_elev: config.origin_elev,
            to_meters: config.to_meters,
            frame: None,
        }
    }

    /// Initialize the geodetic basis, then derive the origin's geocentric
    /// position and the ENU rotation.
    pub fn initialize(&mut self) -> Result<(), CoordSysError> {
        self.frame = None;

        if !(-180.0..=180.0).contains(&self.origin_lon) {
            return Err(CoordSysError::InvalidParameter(format!(
                "origin longitude {} outside [-180, 180]",
                self.origin_lon
            )));
        }
        if !(-90.0..=90.0).contains(&self.origin_lat) {
            return Err(CoordSysError::InvalidParameter(format!(
                "origin latitude {} outside [-90, 90]",
                self.origin_lat
            )));
        }
        if !self.origin_elev.is_finite() {
            return Err(CoordSysError::InvalidParameter(format!(
                "origin elevation must be finite, got {}",
                self.origin_elev
            )));
        }
        validate_to_meters(self.to_meters)?;
        if self.basis.is_geocentric() {
            return Err(CoordSysError::InvalidParameter(
                "local Cartesian basis must be geographic, not geocentric".into(),
            ));
        }

        self.basis.initialize()?;

        let mut origin = [[self.origin_lon, self.origin_lat, self.origin_elev]];
        self.basis.to_geocentric_batch(&mut origin)?;
        let origin = Vector3::from(origin[0]);
        let rotation = enu_rotation(self.origin_lon.to_radians(), self.origin_lat.to_radians());

        debug!(
            origin_lon = self.origin_lon,
            origin_lat = self.origin_lat,
            origin_elev = self.origin_elev,
            origin_x = origin.x,
            origin_y = origin.y,
            origin_z = origin.z,
            "initialized local Cartesian coordinate system"
        );

        self.frame = Some(Frame { rotation, origin });
        Ok(())
    }

    pub fn basis(&self) -> &GeographicCS {
        &self.basis
    }

    /// Replace the geodetic basis; requires re-initialization.
    pub fn set_geographic(&mut self, config: GeographicConfig) {
        self.basis = GeographicCS::new(config);
        self.frame = None;
    }

    /// Move the origin; requires re-initialization.
    pub fn set_origin(&mut self, lon: f64, lat: f64, elev: f64) {
        self.origin_lon = lon;
        self.origin_lat = lat;
        self.origin_elev = elev;
        self.frame = None;
    }

    pub fn set_to_meters(&mut self, to_meters: f64) {
        self.to_meters = to_meters;
        self.frame = None;
    }

    pub fn origin(&self) -> (f64, f64, f64) {
        (self.origin_lon, self.origin_lat, self.origin_elev)
    }

    /// Geocentric position of the origin (metres).
    pub fn origin_ecef(&self) -> Result<[f64; 3], CoordSysError> {
        let o = self.frame()?.origin;
        Ok([o.x, o.y, o.z])
    }

    /// ENU rotation; rows are East, North, Up in geocentric axes.
    pub fn rotation(&self) -> Result<Matrix3<f64>, CoordSysError> {
        Ok(self.frame()?.rotation)
    }

    fn frame(&self) -> Result<&Frame, CoordSysError> {
        self.frame
            .as_ref()
            .ok_or(CoordSysError::NotInitialized("LocalCartesian"))
    }
}

impl CoordSys for LocalCartesianCS {
    fn kind(&self) -> &'static str {
        "LocalCartesian"
    }

    fn describe(&self) -> CoordSysConfig {
        CoordSysConfig::LocalCartesian(LocalCartesianConfig {
            geographic: self.basis.canonical_config(),
            origin_lon: self.origin_lon,
            origin_lat: self.origin_lat,
            origin_elev: self.origin_elev,
            to_meters: self.to_meters,
        })
    }

    fn is_initialized(&self) -> bool {
        self.frame.is_some()
    }

    fn datum(&self) -> Result<&HorizontalDatum, CoordSysError> {
        self.frame()?;
        self.basis.datum()
    }

    fn to_geocentric_batch(&self, coords: &mut [[f64; 3]]) -> Result<(), CoordSysError> {
        let frame = self.frame()?;
        let rt = frame.rotation.transpose();
        for c in coords.iter_mut() {
            let p = rt * (Vector3::from(*c) * self.to_meters) + frame.origin;
            *c = [p.x, p.y, p.z];
        }
        Ok(())
    }

    fn from_geocentric_batch(&self, coords: &mut [[f64; 3]]) -> Result<(), CoordSysError> {
        let frame = self.frame()?;
        for c in coords.iter_mut() {
            let p = frame.rotation * (Vector3::from(*c) - frame.origin) / self.to_meters;
            *c = [p.x, p.y, p.z];
        }
        Ok(())
    }
}
