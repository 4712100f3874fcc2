//! Converter — batch conversion between any two coordinate systems, pivoting
//! through the geocentric frame. Plain Cartesian systems only scale units.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use tracing::debug;

use crate::coordsys::{CoordSys, DatumTransform};
use crate::error::ConvertError;

/// Points per rayon task in [`Converter::convert_par`].
const PAR_CHUNK: usize = 4096;

enum Path {
    /// Source and destination describe the same system; tuples pass through untouched.
    Identity,
    /// Cartesian -> Cartesian; multiply by the ratio of unit scales.
    Scale(f64),
    /// src -> geocentric -> (datum shift) -> dest.
    Pivot(Option<DatumTransform>),
}

/// A prepared src -> dest conversion.
///
/// Both systems must be initialized; that is checked once here so the
/// numeric loops never fail part-way through.
pub struct Converter<'a> {
    dest: &'a dyn CoordSys,
    src: &'a dyn CoordSys,
    path: Path,
}

impl<'a> Converter<'a> {
    pub fn new(dest: &'a dyn CoordSys, src: &'a dyn CoordSys) -> Result<Self, ConvertError> {
        src.ensure_initialized()?;
        dest.ensure_initialized()?;

        let path = if src.describe() == dest.describe() {
            Path::Identity
        } else {
            match (src.cartesian_units(), dest.cartesian_units()) {
                (Some(src_to_meters), Some(dest_to_meters)) => {
                    Path::Scale(src_to_meters / dest_to_meters)
                }
                (None, None) => {
                    let shift = DatumTransform::new(src.datum()?, dest.datum()?)?;
                    Path::Pivot((!shift.is_identity()).then_some(shift))
                }
                _ => {
                    return Err(ConvertError::IncompatibleSystems {
                        src: src.kind(),
                        dest: dest.kind(),
                    });
                }
            }
        };

        Ok(Self { dest, src, path })
    }

    /// True when conversion returns its input unchanged.
    pub fn is_identity(&self) -> bool {
        matches!(self.path, Path::Identity)
    }

    /// True when a datum shift is applied between the geocentric frames.
    pub fn shifts_datum(&self) -> bool {
        matches!(self.path, Path::Pivot(Some(_)))
    }

    /// Convert coordinates in-place.
    pub fn convert_in_place(&self, coords: &mut [[f64; 3]]) -> Result<(), ConvertError> {
        match &self.path {
            Path::Identity => Ok(()),
            Path::Scale(factor) => {
                for c in coords.iter_mut() {
                    for v in c.iter_mut() {
                        *v *= *factor;
                    }
                }
                Ok(())
            }
            Path::Pivot(shift) => {
                self.src.to_geocentric_batch(coords)?;
                if let Some(t) = shift {
                    t.apply(coords);
                }
                self.dest.from_geocentric_batch(coords)?;
                Ok(())
            }
        }
    }

    /// Convert coordinates, returning a new vector in input order.
    pub fn convert(&self, coords: &[[f64; 3]]) -> Result<Vec<[f64; 3]>, ConvertError> {
        debug!(
            points = coords.len(),
            src = self.src.kind(),
            dest = self.dest.kind(),
            identity = self.is_identity(),
            datum_shift = self.shifts_datum(),
            "converting coordinates"
        );
        let mut out = coords.to_vec();
        self.convert_in_place(&mut out)?;
        Ok(out)
    }

    /// Same as [`Converter::convert`], split over the rayon pool.
    pub fn convert_par(&self, coords: &[[f64; 3]]) -> Result<Vec<[f64; 3]>, ConvertError> {
        let mut out = coords.to_vec();
        out.par_chunks_mut(PAR_CHUNK)
            .try_for_each(|chunk| self.convert_in_place(chunk))?;
        Ok(out)
    }

    /// Convert an interleaved buffer `[c0, c1, c2, c0, c1, c2, ...]` in-place.
    pub fn convert_interleaved(&self, values: &mut [f64]) -> Result<(), ConvertError> {
        if values.len() % 3 != 0 {
            return Err(ConvertError::InterleavedLength(values.len()));
        }
        let mut points: Vec<[f64; 3]> = values
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        self.convert_in_place(&mut points)?;
        for (dst, p) in values.chunks_exact_mut(3).zip(points.iter()) {
            dst.copy_from_slice(p);
        }
        Ok(())
    }

    /// Convert an N x 3 array.
    pub fn convert_array(&self, coords: ArrayView2<'_, f64>) -> Result<Array2<f64>, ConvertError> {
        let points = coords.coordinates()?;
        let out = self.convert(&points)?;
        Ok(Array2::from_shape_fn((out.len(), 3), |(i, k)| out[i][k]))
    }
}

/// Convert `coords` from `src` into `dest`.
pub fn convert(
    coords: &[[f64; 3]],
    dest: &dyn CoordSys,
    src: &dyn CoordSys,
) -> Result<Vec<[f64; 3]>, ConvertError> {
    Converter::new(dest, src)?.convert(coords)
}

/// Anything that can hand the converter a list of coordinate tuples
/// (a mesh, a reader, an in-memory array).
pub trait CoordSource {
    fn coordinates(&self) -> Result<Vec<[f64; 3]>, ConvertError>;
}

impl CoordSource for [[f64; 3]] {
    fn coordinates(&self) -> Result<Vec<[f64; 3]>, ConvertError> {
        Ok(self.to_vec())
    }
}

impl CoordSource for Vec<[f64; 3]> {
    fn coordinates(&self) -> Result<Vec<[f64; 3]>, ConvertError> {
        Ok(self.clone())
    }
}

impl CoordSource for Vec<Vec<f64>> {
    fn coordinates(&self) -> Result<Vec<[f64; 3]>, ConvertError> {
        self.iter()
            .map(|row| match row.as_slice() {
                &[c0, c1, c2] => Ok([c0, c1, c2]),
                other => Err(ConvertError::DimensionMismatch {
                    expected: 3,
                    got: other.len(),
                }),
            })
            .collect()
    }
}

impl CoordSource for ArrayView2<'_, f64> {
    fn coordinates(&self) -> Result<Vec<[f64; 3]>, ConvertError> {
        if self.ncols() != 3 {
            return Err(ConvertError::DimensionMismatch {
                expected: 3,
                got: self.ncols(),
            });
        }
        Ok(self.rows().into_iter().map(|r| [r[0], r[1], r[2]]).collect())
    }
}

impl CoordSource for Array2<f64> {
    fn coordinates(&self) -> Result<Vec<[f64; 3]>, ConvertError> {
        self.view().coordinates()
    }
}

/// Pull coordinates from a source and convert them.
pub fn convert_source<S: CoordSource + ?Sized>(
    source: &S,
    dest: &dyn CoordSys,
    src: &dyn CoordSys,
) -> Result<Vec<[f64; 3]>, ConvertError> {
    let converter = Converter::new(dest, src)?;
    converter.convert(&source.coordinates()?)
}
