//! Datum transform between geocentric frames.
//!
//! Each datum carries its Helmert parameters to WGS84; a transform from datum
//! A to datum B goes A -> WGS84 -> B, precomposed into one affine map.

use nalgebra::{Matrix3, Vector3};

use super::datum::{Helmert, HorizontalDatum};
use crate::error::CoordSysError;

const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Affine map `x' = m * x + t` on geocentric coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Similarity {
    m: Matrix3<f64>,
    t: Vector3<f64>,
}

impl Similarity {
    /// Position-vector Helmert: x' = t + (1 + s) R x.
    fn from_helmert(h: &Helmert) -> Self {
        let rx = h.rx * ARCSEC_TO_RAD;
        let ry = h.ry * ARCSEC_TO_RAD;
        let rz = h.rz * ARCSEC_TO_RAD;
        let scale = 1.0 + h.ds * 1e-6;

        #[rustfmt::skip]
        let r = Matrix3::new(
            1.0, -rz,  ry,
            rz,  1.0, -rx,
            -ry, rx,  1.0,
        );
        Self {
            m: r * scale,
            t: Vector3::new(h.tx, h.ty, h.tz),
        }
    }

    fn inverse(&self) -> Option<Self> {
        let m_inv = self.m.try_inverse()?;
        Some(Self {
            m: m_inv,
            t: -(m_inv * self.t),
        })
    }

    /// `other` after `self`.
    fn then(&self, other: &Similarity) -> Self {
        Self {
            m: other.m * self.m,
            t: other.m * self.t + other.t,
        }
    }

    fn apply(&self, p: [f64; 3]) -> [f64; 3] {
        let v = self.m * Vector3::from(p) + self.t;
        [v.x, v.y, v.z]
    }
}

/// Converts geocentric coordinates from one datum's frame to another's.
#[derive(Clone, Debug)]
pub struct DatumTransform {
    src: HorizontalDatum,
    dst: HorizontalDatum,
    shift: Option<Similarity>,
}

impl DatumTransform {
    pub fn new(src: &HorizontalDatum, dst: &HorizontalDatum) -> Result<Self, CoordSysError> {
        let shift = if src.same_frame(dst) {
            None
        } else {
            let to_wgs84 = Similarity::from_helmert(&src.to_wgs84);
            let from_wgs84 = Similarity::from_helmert(&dst.to_wgs84)
                .inverse()
                .ok_or_else(|| {
                    CoordSysError::InvalidParameter(format!(
                        "singular Helmert parameters for datum {}",
                        dst.name
                    ))
                })?;
            Some(to_wgs84.then(&from_wgs84))
        };
        Ok(Self {
            src: *src,
            dst: *dst,
            shift,
        })
    }

    /// True when source and destination share a frame; `apply` leaves
    /// coordinates bit-for-bit unchanged.
    pub fn is_identity(&self) -> bool {
        self.shift.is_none()
    }

    pub fn source(&self) -> &HorizontalDatum {
        &self.src
    }

    pub fn destination(&self) -> &HorizontalDatum {
        &self.dst
    }

    /// Transform geocentric coordinates in-place.
    pub fn apply(&self, coords: &mut [[f64; 3]]) {
        if let Some(shift) = &self.shift {
            for c in coords.iter_mut() {
                *c = shift.apply(*c);
            }
        }
    }
}
