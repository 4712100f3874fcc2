//! Declarative coordinate-system parameters.
//!
//! Configs are plain values assembled by whatever loads the model setup; a
//! coordinate system resolves one into numeric constants on `initialize()`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for a geographic (or geocentric) coordinate system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeographicConfig {
    /// Ellipsoid name. Default: "WGS84"
    pub ellipsoid: String,

    /// Horizontal datum name. Default: "WGS84"
    pub datum_horiz: String,

    /// Vertical datum name. Default: "ellipsoid"
    pub datum_vert: String,

    /// Geoid height above the ellipsoid (metres) for geoid-based vertical
    /// datums. Must be given explicitly for "mean sea level".
    pub geoid_height: Option<f64>,

    /// Scale from elevation (or geocentric coordinate) units to metres.
    /// Default: 1.0
    pub to_meters: f64,

    /// Coordinates are geocentric (x, y, z) instead of (lon, lat, elev).
    /// Default: false
    pub is_geocentric: bool,
}

impl Default for GeographicConfig {
    fn default() -> Self {
        Self {
            ellipsoid: "WGS84".to_string(),
            datum_horiz: "WGS84".to_string(),
            datum_vert: "ellipsoid".to_string(),
            geoid_height: None,
            to_meters: 1.0,
            is_geocentric: false,
        }
    }
}

impl GeographicConfig {
    /// Config for the given ellipsoid and datums.
    #[must_use]
    pub fn new(ellipsoid: &str, datum_horiz: &str, datum_vert: &str) -> Self {
        Self {
            ellipsoid: ellipsoid.to_string(),
            datum_horiz: datum_horiz.to_string(),
            datum_vert: datum_vert.to_string(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_geoid_height(mut self, geoid_height: f64) -> Self {
        self.geoid_height = Some(geoid_height);
        self
    }

    #[must_use]
    pub const fn with_to_meters(mut self, to_meters: f64) -> Self {
        self.to_meters = to_meters;
        self
    }

    #[must_use]
    pub const fn geocentric(mut self, is_geocentric: bool) -> Self {
        self.is_geocentric = is_geocentric;
        self
    }
}

/// Parameters for a local Cartesian (East-North-Up) coordinate system.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocalCartesianConfig {
    /// Geodetic basis the origin is expressed in.
    pub geographic: GeographicConfig,

    /// Origin longitude (degrees, [-180, 180]).
    pub origin_lon: f64,

    /// Origin latitude (degrees, [-90, 90]).
    pub origin_lat: f64,

    /// Origin elevation in the basis' elevation units and vertical datum.
    pub origin_elev: f64,

    /// Scale from local x/y/z units to metres. Default: 1.0
    pub to_meters: f64,
}

impl Default for LocalCartesianConfig {
    fn default() -> Self {
        Self {
            geographic: GeographicConfig::default(),
            origin_lon: 0.0,
            origin_lat: 0.0,
            origin_elev: 0.0,
            to_meters: 1.0,
        }
    }
}

impl LocalCartesianConfig {
    #[must_use]
    pub fn new(geographic: GeographicConfig, origin_lon: f64, origin_lat: f64, origin_elev: f64) -> Self {
        Self {
            geographic,
            origin_lon,
            origin_lat,
            origin_elev,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn with_to_meters(mut self, to_meters: f64) -> Self {
        self.to_meters = to_meters;
        self
    }
}

/// Parameters for a plain Cartesian coordinate system with no geodetic frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CartesianConfig {
    /// Scale from x/y/z units to metres. Default: 1.0
    pub to_meters: f64,
}

impl Default for CartesianConfig {
    fn default() -> Self {
        Self { to_meters: 1.0 }
    }
}

impl CartesianConfig {
    #[must_use]
    pub const fn with_to_meters(mut self, to_meters: f64) -> Self {
        self.to_meters = to_meters;
        self
    }
}

/// Check a units scale factor.
pub(crate) fn validate_to_meters(to_meters: f64) -> Result<(), crate::error::CoordSysError> {
    if to_meters.is_finite() && to_meters > 0.0 {
        Ok(())
    } else {
        Err(crate::error::CoordSysError::InvalidParameter(format!(
            "to_meters must be finite and > 0, got {to_meters}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geographic() {
        let cfg = GeographicConfig::default();
        assert_eq!(cfg.ellipsoid, "WGS84");
        assert_eq!(cfg.datum_horiz, "WGS84");
        assert_eq!(cfg.datum_vert, "ellipsoid");
        assert!(cfg.geoid_height.is_none());
        assert!((cfg.to_meters - 1.0).abs() < f64::EPSILON);
        assert!(!cfg.is_geocentric);
    }

    #[test]
    fn test_builder() {
        let cfg = GeographicConfig::new("clrk66", "NAD27", "mean sea level")
            .with_geoid_height(-20.0)
            .with_to_meters(0.3048);
        assert_eq!(cfg.ellipsoid, "clrk66");
        assert_eq!(cfg.geoid_height, Some(-20.0));
        assert!((cfg.to_meters - 0.3048).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_to_meters() {
        assert!(validate_to_meters(1000.0).is_ok());
        assert!(validate_to_meters(0.0).is_err());
        assert!(validate_to_meters(-1.0).is_err());
        assert!(validate_to_meters(f64::INFINITY).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: LocalCartesianConfig = serde_json::from_str(
            r#"{"geographic": {"ellipsoid": "clrk66"}, "origin_lon": -100.0, "origin_lat": 39.0}"#,
        )
        .unwrap();
        assert_eq!(cfg.geographic.ellipsoid, "clrk66");
        assert_eq!(cfg.geographic.datum_horiz, "WGS84");
        assert!((cfg.origin_lon + 100.0).abs() < f64::EPSILON);
        assert!((cfg.to_meters - 1.0).abs() < f64::EPSILON);
    }
}
