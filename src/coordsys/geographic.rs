//! Geographic coordinate system: (lon, lat, elev) on a named ellipsoid and datum.

use nalgebra::Vector3;
use tracing::{debug, warn};

use super::common::{ecef_to_geodetic, geodetic_to_ecef};
use super::datum::{HorizontalDatum, VerticalDatum};
use super::ellipsoid::Ellipsoid;
use super::{CoordSys, CoordSysConfig};
use crate::config::{validate_to_meters, GeographicConfig};
use crate::error::CoordSysError;

/// Numeric constants resolved from the config names.
#[derive(Clone, Debug, PartialEq)]
struct Resolved {
    ellipsoid: Ellipsoid,
    datum: HorizontalDatum,
    vertical: VerticalDatum,
}

/// Geographic coordinates on an ellipsoid under a horizontal/vertical datum.
///
/// Tuples are `(lon_deg, lat_deg, elev)` with elevation in `to_meters` units
/// above the vertical datum, or geocentric `(x, y, z)` in `to_meters` units
/// when the config is geocentric. Conversions stay in the datum's own
/// geocentric frame; datum shifts belong to [`super::DatumTransform`].
#[derive(Clone, Debug)]
pub struct GeographicCS {
    config: GeographicConfig,
    resolved: Option<Resolved>,
}

impl Default for GeographicCS {
    fn default() -> Self {
        Self::new(GeographicConfig::default())
    }
}

impl GeographicCS {
    pub fn new(config: GeographicConfig) -> Self {
        Self {
            config,
            resolved: None,
        }
    }

    /// Resolve ellipsoid and datum names into numeric parameters.
    ///
    /// Re-invoking recomputes from the current config. On failure the system
    /// is left uninitialized.
    pub fn initialize(&mut self) -> Result<(), CoordSysError> {
        self.resolved = None;

        let ellipsoid = Ellipsoid::named(&self.config.ellipsoid)?;
        let datum = HorizontalDatum::named(&self.config.datum_horiz)?;
        let vertical = VerticalDatum::resolve(&self.config.datum_vert, self.config.geoid_height)?;
        validate_to_meters(self.config.to_meters)?;

        debug!(
            ellipsoid = ellipsoid.name,
            datum = datum.name,
            vertical = ?vertical,
            geocentric = self.config.is_geocentric,
            "initialized geographic coordinate system"
        );

        self.resolved = Some(Resolved {
            ellipsoid,
            datum,
            vertical,
        });
        Ok(())
    }

    pub fn config(&self) -> &GeographicConfig {
        &self.config
    }

    pub fn set_ellipsoid(&mut self, name: &str) {
        self.config.ellipsoid = name.to_string();
        self.resolved = None;
    }

    pub fn set_datum_horiz(&mut self, name: &str) {
        self.config.datum_horiz = name.to_string();
        self.resolved = None;
    }

    pub fn set_datum_vert(&mut self, name: &str, geoid_height: Option<f64>) {
        self.config.datum_vert = name.to_string();
        self.config.geoid_height = geoid_height;
        self.resolved = None;
    }

    pub fn set_to_meters(&mut self, to_meters: f64) {
        self.config.to_meters = to_meters;
        self.resolved = None;
    }

    pub fn set_geocentric(&mut self, is_geocentric: bool) {
        self.config.is_geocentric = is_geocentric;
        self.resolved = None;
    }

    pub fn is_geocentric(&self) -> bool {
        self.config.is_geocentric
    }

    pub fn ellipsoid(&self) -> Result<&Ellipsoid, CoordSysError> {
        Ok(&self.resolved()?.ellipsoid)
    }

    pub fn vertical_datum(&self) -> Result<&VerticalDatum, CoordSysError> {
        Ok(&self.resolved()?.vertical)
    }

    /// Config with resolved names in their table spelling. Geoid aliases
    /// collapse to "mean sea level"; a geoid height is dropped when the
    /// vertical datum is the ellipsoid.
    pub(crate) fn canonical_config(&self) -> GeographicConfig {
        let mut config = self.config.clone();
        if let Some(r) = &self.resolved {
            config.ellipsoid = r.ellipsoid.name.to_string();
            config.datum_horiz = r.datum.name.to_string();
            match &r.vertical {
                VerticalDatum::Ellipsoid => {
                    config.datum_vert = "ellipsoid".to_string();
                    config.geoid_height = None;
                }
                VerticalDatum::Geoid { geoid_height, .. } => {
                    config.datum_vert = "mean sea level".to_string();
                    config.geoid_height = Some(*geoid_height);
                }
            }
        }
        config
    }

    fn resolved(&self) -> Result<&Resolved, CoordSysError> {
        self.resolved
            .as_ref()
            .ok_or(CoordSysError::NotInitialized("Geographic"))
    }
}

impl CoordSys for GeographicCS {
    fn kind(&self) -> &'static str {
        "Geographic"
    }

    fn describe(&self) -> CoordSysConfig {
        CoordSysConfig::Geographic(self.canonical_config())
    }

    fn is_initialized(&self) -> bool {
        self.resolved.is_some()
    }

    fn datum(&self) -> Result<&HorizontalDatum, CoordSysError> {
        Ok(&self.resolved()?.datum)
    }

    fn to_geocentric_batch(&self, coords: &mut [[f64; 3]]) -> Result<(), CoordSysError> {
        let r = self.resolved()?;
        let to_meters = self.config.to_meters;

        if self.config.is_geocentric {
            if to_meters != 1.0 {
                for c in coords.iter_mut() {
                    for v in c.iter_mut() {
                        *v *= to_meters;
                    }
                }
            }
            return Ok(());
        }

        let offset = r.vertical.offset();
        for c in coords.iter_mut() {
            let h = c[2] * to_meters + offset;
            let p = geodetic_to_ecef(&r.ellipsoid, c[0].to_radians(), c[1].to_radians(), h);
            *c = [p.x, p.y, p.z];
        }
        Ok(())
    }

    fn from_geocentric_batch(&self, coords: &mut [[f64; 3]]) -> Result<(), CoordSysError> {
        let r = self.resolved()?;
        let to_meters = self.config.to_meters;

        if self.config.is_geocentric {
            if to_meters != 1.0 {
                for c in coords.iter_mut() {
                    for v in c.iter_mut() {
                        *v /= to_meters;
                    }
                }
            }
            return Ok(());
        }

        let offset = r.vertical.offset();
        let mut unconverged = 0usize;
        for c in coords.iter_mut() {
            let sol = ecef_to_geodetic(&r.ellipsoid, &Vector3::from(*c));
            if !sol.converged {
                unconverged += 1;
            }
            *c = [
                sol.lon.to_degrees(),
                sol.lat.to_degrees(),
                (sol.h - offset) / to_meters,
            ];
        }

        if unconverged > 0 {
            warn!(
                unconverged,
                total = coords.len(),
                "ellipsoidal height iteration did not converge; returning best estimates"
            );
        }
        Ok(())
    }
}
