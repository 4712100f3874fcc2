//! PyO3 wrappers for the coordinate-system types.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{CartesianConfig, GeographicConfig, LocalCartesianConfig};
use crate::coordsys::{CartesianCS, CoordSys, GeographicCS, LocalCartesianCS};

/// Plain Cartesian coordinate system; converts only to other Cartesian systems.
#[pyclass(name = "Cartesian")]
pub struct PyCartesian {
    pub(crate) inner: CartesianCS,
}

#[pymethods]
impl PyCartesian {
    #[new]
    #[pyo3(signature = (to_meters=1.0))]
    fn new(to_meters: f64) -> Self {
        Self {
            inner: CartesianCS::new(CartesianConfig::default().with_to_meters(to_meters)),
        }
    }

    fn initialize(&mut self) -> PyResult<()> {
        self.inner
            .initialize()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    fn __repr__(&self) -> String {
        format!("Cartesian(to_meters={})", self.inner.config().to_meters)
    }
}

/// Geographic coordinate system (lon, lat, elev) on a named ellipsoid/datum.
#[pyclass(name = "Geographic")]
pub struct PyGeographic {
    pub(crate) inner: GeographicCS,
}

#[pymethods]
impl PyGeographic {
    #[new]
    #[pyo3(signature = (ellipsoid="WGS84", datum_horiz="WGS84", datum_vert="ellipsoid", geoid_height=None, to_meters=1.0, is_geocentric=false))]
    fn new(
        ellipsoid: &str,
        datum_horiz: &str,
        datum_vert: &str,
        geoid_height: Option<f64>,
        to_meters: f64,
        is_geocentric: bool,
    ) -> Self {
        let mut config = GeographicConfig::new(ellipsoid, datum_horiz, datum_vert)
            .with_to_meters(to_meters)
            .geocentric(is_geocentric);
        config.geoid_height = geoid_height;
        Self {
            inner: GeographicCS::new(config),
        }
    }

    /// Resolve names into numeric parameters. Raises ValueError on unknown names.
    fn initialize(&mut self) -> PyResult<()> {
        self.inner
            .initialize()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    fn __repr__(&self) -> String {
        let c = self.inner.config();
        format!(
            "Geographic(ellipsoid='{}', datum_horiz='{}', datum_vert='{}')",
            c.ellipsoid, c.datum_horiz, c.datum_vert
        )
    }
}

/// Local Cartesian (East-North-Up) coordinate system.
#[pyclass(name = "LocalCartesian")]
pub struct PyLocalCartesian {
    pub(crate) inner: LocalCartesianCS,
}

#[pymethods]
impl PyLocalCartesian {
    #[new]
    #[pyo3(signature = (origin_lon=0.0, origin_lat=0.0, origin_elev=0.0, ellipsoid="WGS84", datum_horiz="WGS84", datum_vert="ellipsoid", geoid_height=None, to_meters=1.0))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        origin_lon: f64,
        origin_lat: f64,
        origin_elev: f64,
        ellipsoid: &str,
        datum_horiz: &str,
        datum_vert: &str,
        geoid_height: Option<f64>,
        to_meters: f64,
    ) -> Self {
        let mut geographic = GeographicConfig::new(ellipsoid, datum_horiz, datum_vert);
        geographic.geoid_height = geoid_height;
        let config = LocalCartesianConfig::new(geographic, origin_lon, origin_lat, origin_elev)
            .with_to_meters(to_meters);
        Self {
            inner: LocalCartesianCS::new(config),
        }
    }

    /// Resolve the basis and derive the origin frame.
    fn initialize(&mut self) -> PyResult<()> {
        self.inner
            .initialize()
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    #[getter]
    fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Origin as (lon, lat, elev).
    #[getter]
    fn origin(&self) -> (f64, f64, f64) {
        self.inner.origin()
    }

    fn __repr__(&self) -> String {
        let (lon, lat, elev) = self.inner.origin();
        format!("LocalCartesian(origin_lon={lon}, origin_lat={lat}, origin_elev={elev})")
    }
}
