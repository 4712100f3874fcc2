//! Reference ellipsoids and the named ellipsoid table.

use crate::error::CoordSysError;

/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Table name (PROJ `+ellps` spelling)
    pub name: &'static str,
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening (dimensionless)
    pub f: f64,
    /// Semi-minor axis: a * (1 - f)
    pub b: f64,
    /// First eccentricity squared: 2f - f^2
    pub e2: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    pub ep2: f64,
}

impl Ellipsoid {
    pub const fn new(name: &'static str, a: f64, f: f64) -> Self {
        let b = a * (1.0 - f);
        let e2 = 2.0 * f - f * f;
        let ep2 = e2 / (1.0 - e2);
        Self {
            name,
            a,
            f,
            b,
            e2,
            ep2,
        }
    }

    /// Ellipsoid given by its inverse flattening.
    pub const fn from_rf(name: &'static str, a: f64, rf: f64) -> Self {
        Self::new(name, a, 1.0 / rf)
    }

    /// Ellipsoid given by both axes.
    pub const fn from_axes(name: &'static str, a: f64, b: f64) -> Self {
        Self::new(name, a, (a - b) / a)
    }

    /// Look up a named ellipsoid (case-insensitive).
    pub fn named(name: &str) -> Result<Self, CoordSysError> {
        ELLIPSOIDS
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
            .copied()
            .ok_or_else(|| CoordSysError::UnknownEllipsoid(name.to_string()))
    }

    /// Get the first eccentricity (computed at runtime).
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_rf("WGS84", 6_378_137.0, 298.257_223_563);
pub const GRS80: Ellipsoid = Ellipsoid::from_rf("GRS80", 6_378_137.0, 298.257_222_101);
pub const CLARKE_1866: Ellipsoid = Ellipsoid::from_axes("clrk66", 6_378_206.4, 6_356_583.8);

// Values follow the PROJ ellipsoid list. Entries published with a semi-minor
// axis instead of an inverse flattening are stored through `from_axes`.
static ELLIPSOIDS: &[Ellipsoid] = &[
    WGS84,
    GRS80,
    CLARKE_1866,
    Ellipsoid::from_rf("WGS72", 6_378_135.0, 298.26),
    Ellipsoid::from_rf("WGS66", 6_378_145.0, 298.25),
    Ellipsoid::from_rf("WGS60", 6_378_165.0, 298.3),
    Ellipsoid::from_rf("MERIT", 6_378_137.0, 298.257),
    Ellipsoid::from_rf("SGS85", 6_378_136.0, 298.257),
    Ellipsoid::from_rf("IAU76", 6_378_140.0, 298.257),
    Ellipsoid::from_rf("GRS67", 6_378_160.0, 298.247_167_427),
    Ellipsoid::from_rf("aust_SA", 6_378_160.0, 298.25),
    Ellipsoid::from_axes("airy", 6_377_563.396, 6_356_256.910),
    Ellipsoid::from_axes("mod_airy", 6_377_340.189, 6_356_034.446),
    Ellipsoid::from_rf("bessel", 6_377_397.155, 299.152_812_8),
    Ellipsoid::from_rf("bess_nam", 6_377_483.865, 299.152_812_8),
    Ellipsoid::from_rf("clrk80", 6_378_249.145, 293.4663),
    Ellipsoid::from_rf("clrk80ign", 6_378_249.2, 293.466_021_293_626_9),
    Ellipsoid::from_rf("evrst30", 6_377_276.345, 300.8017),
    Ellipsoid::from_rf("fschr60", 6_378_166.0, 298.3),
    Ellipsoid::from_rf("helmert", 6_378_200.0, 298.3),
    Ellipsoid::from_rf("hough", 6_378_270.0, 297.0),
    Ellipsoid::from_rf("intl", 6_378_388.0, 297.0),
    Ellipsoid::from_rf("krass", 6_378_245.0, 298.3),
    Ellipsoid::from_rf("kaula", 6_378_163.0, 298.24),
    Ellipsoid::from_axes("new_intl", 6_378_157.5, 6_356_772.2),
    Ellipsoid::from_axes("SEasia", 6_378_155.0, 6_356_773.3205),
    Ellipsoid::from_axes("sphere", 6_370_997.0, 6_370_997.0),
];

/// All ellipsoids known to [`Ellipsoid::named`].
pub fn ellipsoids() -> &'static [Ellipsoid] {
    ELLIPSOIDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wgs84_constants() {
        assert_eq!(WGS84.a, 6_378_137.0);
        assert_eq!(WGS84.f, 1.0 / 298.257_223_563);
        assert_relative_eq!(WGS84.b, 6_356_752.314_245_179, epsilon = 0.001);
        assert_relative_eq!(WGS84.eccentricity(), 0.081_819_190_842_622, epsilon = 1e-12);
    }

    #[test]
    fn test_grs80_close_to_wgs84() {
        // WGS84 and GRS80 differ only slightly
        assert_relative_eq!(WGS84.a, GRS80.a);
        assert!((WGS84.f - GRS80.f).abs() < 1e-8);
    }

    #[test]
    fn test_clarke_1866() {
        let e = Ellipsoid::named("clrk66").unwrap();
        assert_eq!(e.a, 6_378_206.4);
        assert_relative_eq!(e.b, 6_356_583.8, epsilon = 1e-6);
        assert_relative_eq!(1.0 / e.f, 294.978_698_2, epsilon = 1e-6);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Ellipsoid::named("wgs84").unwrap(), WGS84);
        assert_eq!(Ellipsoid::named(" GRS80 ").unwrap(), GRS80);
    }

    #[test]
    fn test_unknown_ellipsoid() {
        let err = Ellipsoid::named("clrk99").unwrap_err();
        assert_eq!(err, CoordSysError::UnknownEllipsoid("clrk99".into()));
    }

    #[test]
    fn test_sphere_has_no_eccentricity() {
        let s = Ellipsoid::named("sphere").unwrap();
        assert_eq!(s.f, 0.0);
        assert_eq!(s.e2, 0.0);
    }

    #[test]
    fn test_table_names_unique() {
        let names: Vec<_> = ellipsoids().iter().map(|e| e.name.to_lowercase()).collect();
        for (i, n) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(n), "duplicate ellipsoid {n}");
        }
    }
}
