//! PyO3 binding for batch coordinate conversion.

use ndarray::Array2;
use numpy::{PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use super::coordsys::{PyCartesian, PyGeographic, PyLocalCartesian};
use crate::converter::Converter;
use crate::coordsys::CoordSys;

/// Copy a Python coordinate-system object into an owned Rust value so the
/// conversion can run without the GIL.
fn extract_coordsys(obj: &Bound<'_, PyAny>) -> PyResult<Box<dyn CoordSys>> {
    if let Ok(cart) = obj.downcast::<PyCartesian>() {
        return Ok(Box::new(cart.borrow().inner.clone()));
    }
    if let Ok(geo) = obj.downcast::<PyGeographic>() {
        return Ok(Box::new(geo.borrow().inner.clone()));
    }
    if let Ok(local) = obj.downcast::<PyLocalCartesian>() {
        return Ok(Box::new(local.borrow().inner.clone()));
    }
    Err(PyTypeError::new_err(
        "expected a Cartesian, Geographic or LocalCartesian coordinate system",
    ))
}

/// Convert an (N, 3) array of coordinates from `src` to `dest`.
///
/// Args:
///     coords: (N, 3) f64 array; (lon, lat, elev) for geographic systems,
///         (x, y, z) for Cartesian, local Cartesian or geocentric ones.
///     dest: Destination coordinate system (initialized).
///     src: Source coordinate system (initialized).
///
/// Returns:
///     (N, 3) array in the destination system, same order as the input.
#[pyfunction]
#[pyo3(signature = (coords, dest, src))]
pub fn convert<'py>(
    py: Python<'py>,
    coords: PyReadonlyArray2<'py, f64>,
    dest: &Bound<'py, PyAny>,
    src: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let dest = extract_coordsys(dest)?;
    let src = extract_coordsys(src)?;

    // Copy array to owned ndarray
    let coords: Array2<f64> = coords.as_array().to_owned();

    let result: Array2<f64> = py.allow_threads(move || {
        Converter::new(dest.as_ref(), src.as_ref())
            .and_then(|conv| conv.convert_array(coords.view()))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(PyArray2::from_owned_array(py, result))
}
