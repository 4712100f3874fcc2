//! Horizontal and vertical datum tables.
//!
//! Horizontal datums are anchored to the WGS84 geocentric frame through a
//! 7-parameter Helmert (position vector) transform, PROJ `+towgs84` style.
//! Vertical datums are constant offsets between the elevation reference
//! surface and the ellipsoid.

use crate::error::CoordSysError;

/// 7-parameter similarity transform from a datum's geocentric frame to WGS84.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Helmert {
    /// Translations (metres)
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    /// Rotations (arc-seconds, position vector convention)
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
    /// Scale difference (parts per million)
    pub ds: f64,
}

impl Helmert {
    pub const IDENTITY: Helmert = Helmert::translation(0.0, 0.0, 0.0);

    pub const fn new(tx: f64, ty: f64, tz: f64, rx: f64, ry: f64, rz: f64, ds: f64) -> Self {
        Self {
            tx,
            ty,
            tz,
            rx,
            ry,
            rz,
            ds,
        }
    }

    /// 3-parameter (geocentric translation only) shift.
    pub const fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self::new(tx, ty, tz, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// A named horizontal datum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalDatum {
    pub name: &'static str,
    /// Ellipsoid the datum is usually realised on.
    pub ellipsoid: &'static str,
    pub to_wgs84: Helmert,
}

impl HorizontalDatum {
    const fn new(name: &'static str, ellipsoid: &'static str, to_wgs84: Helmert) -> Self {
        Self {
            name,
            ellipsoid,
            to_wgs84,
        }
    }

    /// Look up a named horizontal datum (case-insensitive).
    pub fn named(name: &str) -> Result<Self, CoordSysError> {
        DATUMS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .ok_or_else(|| CoordSysError::UnknownDatum(name.to_string()))
    }

    /// Whether both datums share the same geocentric frame.
    pub fn same_frame(&self, other: &HorizontalDatum) -> bool {
        self.to_wgs84 == other.to_wgs84
    }
}

pub const WGS84_DATUM: HorizontalDatum =
    HorizontalDatum::new("WGS84", "WGS84", Helmert::IDENTITY);

// PROJ datum list. NAD27 is realised there through the NADCON grids; a grid
// shift is out of reach here so the CONUS mean 3-parameter shift stands in.
static DATUMS: &[HorizontalDatum] = &[
    WGS84_DATUM,
    HorizontalDatum::new("NAD83", "GRS80", Helmert::IDENTITY),
    HorizontalDatum::new("NAD27", "clrk66", Helmert::translation(-8.0, 160.0, 176.0)),
    HorizontalDatum::new("GGRS87", "GRS80", Helmert::translation(-199.87, 74.79, 246.62)),
    HorizontalDatum::new("carthage", "clrk80ign", Helmert::translation(-263.0, 6.0, 431.0)),
    HorizontalDatum::new("ED50", "intl", Helmert::translation(-87.0, -98.0, -121.0)),
    HorizontalDatum::new(
        "WGS72",
        "WGS72",
        Helmert::new(0.0, 0.0, 4.5, 0.0, 0.0, 0.554, 0.2263),
    ),
    HorizontalDatum::new(
        "potsdam",
        "bessel",
        Helmert::new(598.1, 73.7, 418.2, 0.202, 0.045, -2.455, 6.7),
    ),
    HorizontalDatum::new(
        "hermannskogel",
        "bessel",
        Helmert::new(577.326, 90.129, 463.919, 5.137, 1.474, 5.297, 2.4232),
    ),
    HorizontalDatum::new(
        "ire65",
        "mod_airy",
        Helmert::new(482.530, -130.596, 564.557, -1.042, -0.214, -0.631, 8.15),
    ),
    HorizontalDatum::new(
        "nzgd49",
        "intl",
        Helmert::new(59.47, -5.04, 187.44, 0.47, -0.1, 1.024, -4.5993),
    ),
    HorizontalDatum::new(
        "OSGB36",
        "airy",
        Helmert::new(446.448, -125.157, 542.060, 0.1502, 0.2470, 0.8421, -20.4894),
    ),
];

/// All horizontal datums known to [`HorizontalDatum::named`].
pub fn horizontal_datums() -> &'static [HorizontalDatum] {
    DATUMS
}

/// Reference surface for elevations.
#[derive(Clone, Debug, PartialEq)]
pub enum VerticalDatum {
    /// Elevations are ellipsoidal heights.
    Ellipsoid,
    /// Elevations are above a geoid approximated by a constant separation
    /// from the ellipsoid (geoid above ellipsoid is positive).
    Geoid { name: String, geoid_height: f64 },
}

impl VerticalDatum {
    /// Resolve a vertical datum name.
    ///
    /// Geoid-based names ("mean sea level", "msl", "geoid") need an explicit
    /// `geoid_height`; there is no built-in geoid model to fall back on.
    pub fn resolve(name: &str, geoid_height: Option<f64>) -> Result<Self, CoordSysError> {
        let key = name.trim().to_lowercase();
        match key.as_str() {
            "ellipsoid" => Ok(Self::Ellipsoid),
            "mean sea level" | "msl" | "geoid" => match geoid_height {
                Some(h) if h.is_finite() => Ok(Self::Geoid {
                    name: key,
                    geoid_height: h,
                }),
                Some(h) => Err(CoordSysError::InvalidParameter(format!(
                    "geoid height must be finite, got {h}"
                ))),
                None => Err(CoordSysError::MissingVerticalOffset(name.to_string())),
            },
            _ => Err(CoordSysError::UnknownDatum(name.to_string())),
        }
    }

    /// Offset added to an elevation to obtain the ellipsoidal height (metres).
    pub fn offset(&self) -> f64 {
        match self {
            Self::Ellipsoid => 0.0,
            Self::Geoid { geoid_height, .. } => *geoid_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_nad27() {
        let d = HorizontalDatum::named("nad27").unwrap();
        assert_eq!(d.name, "NAD27");
        assert_eq!(d.ellipsoid, "clrk66");
        assert_eq!(d.to_wgs84, Helmert::translation(-8.0, 160.0, 176.0));
    }

    #[test]
    fn test_unknown_datum() {
        let err = HorizontalDatum::named("NAD99").unwrap_err();
        assert_eq!(err, CoordSysError::UnknownDatum("NAD99".into()));
    }

    #[test]
    fn test_nad83_shares_wgs84_frame() {
        let nad83 = HorizontalDatum::named("NAD83").unwrap();
        assert!(nad83.same_frame(&WGS84_DATUM));
        assert_ne!(nad83, WGS84_DATUM);
    }

    #[test]
    fn test_datum_ellipsoids_resolve() {
        use crate::coordsys::ellipsoid::Ellipsoid;
        for d in horizontal_datums() {
            assert!(Ellipsoid::named(d.ellipsoid).is_ok(), "{}", d.name);
        }
    }

    #[test]
    fn test_vertical_ellipsoid() {
        let v = VerticalDatum::resolve("ellipsoid", None).unwrap();
        assert_eq!(v, VerticalDatum::Ellipsoid);
        assert_eq!(v.offset(), 0.0);
    }

    #[test]
    fn test_vertical_msl_requires_offset() {
        let err = VerticalDatum::resolve("mean sea level", None).unwrap_err();
        assert!(matches!(err, CoordSysError::MissingVerticalOffset(_)));

        let v = VerticalDatum::resolve("Mean Sea Level", Some(-28.5)).unwrap();
        assert_eq!(v.offset(), -28.5);
    }

    #[test]
    fn test_vertical_rejects_non_finite_offset() {
        let err = VerticalDatum::resolve("geoid", Some(f64::NAN)).unwrap_err();
        assert!(matches!(err, CoordSysError::InvalidParameter(_)));
    }

    #[test]
    fn test_vertical_unknown() {
        let err = VerticalDatum::resolve("NAVD88", Some(0.0)).unwrap_err();
        assert_eq!(err, CoordSysError::UnknownDatum("NAVD88".into()));
    }
}
