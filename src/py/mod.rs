use pyo3::prelude::*;

mod convert;
mod coordsys;

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<coordsys::PyCartesian>()?;
    m.add_class::<coordsys::PyGeographic>()?;
    m.add_class::<coordsys::PyLocalCartesian>()?;
    m.add_function(wrap_pyfunction!(convert::convert, m)?)?;
    Ok(())
}
