//! Common helpers for ellipsoidal math (geodetic/geocentric kernels, ENU basis).

use nalgebra::{Matrix3, Vector3};

use super::ellipsoid::Ellipsoid;

/// Iteration cap for the inverse ellipsoidal-height solution.
pub const MAX_ITERATIONS: usize = 10;

/// Latitude change (radians) below which the iteration has converged (~1 µm).
const LATITUDE_TOLERANCE: f64 = 1e-13;

/// Geodetic (lon_rad, lat_rad, h_m) -> geocentric (x, y, z) in metres.
pub fn geodetic_to_ecef(ellipsoid: &Ellipsoid, lon: f64, lat: f64, h: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    // Radius of curvature in the prime vertical
    let n = ellipsoid.a / (1.0 - ellipsoid.e2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - ellipsoid.e2) + h) * sin_lat,
    )
}

/// Result of the inverse geocentric -> geodetic solution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticSolution {
    /// Longitude (radians)
    pub lon: f64,
    /// Geodetic latitude (radians)
    pub lat: f64,
    /// Ellipsoidal height (metres)
    pub h: f64,
    /// False if the iteration hit [`MAX_ITERATIONS`]; the values are then the
    /// best estimate reached.
    pub converged: bool,
}

/// Geocentric (x, y, z) -> geodetic, iterating on latitude.
///
/// Starts from the geocentric-to-geodetic latitude of the ellipsoid surface and
/// refines `lat = atan2(z, p (1 - e² N / (N + h)))`. Each step shrinks the
/// error by roughly e², so terrestrial points settle in 3–4 iterations.
pub fn ecef_to_geodetic(ellipsoid: &Ellipsoid, xyz: &Vector3<f64>) -> GeodeticSolution {
    let (x, y, z) = (xyz.x, xyz.y, xyz.z);
    let lon = y.atan2(x);
    let p = x.hypot(y);

    // On the polar axis the latitude is fixed and only the height remains.
    if p == 0.0 {
        let lat = if z == 0.0 {
            0.0
        } else {
            std::f64::consts::FRAC_PI_2.copysign(z)
        };
        let h = if z == 0.0 {
            -ellipsoid.a
        } else {
            z.abs() - ellipsoid.b
        };
        return GeodeticSolution {
            lon,
            lat,
            h,
            converged: true,
        };
    }

    let a = ellipsoid.a;
    let e2 = ellipsoid.e2;
    let height = |lat: f64| {
        let (s, c) = lat.sin_cos();
        let w = (1.0 - e2 * s * s).sqrt();
        (a / w, p * c + z * s - a * w)
    };

    let mut lat = z.atan2(p * (1.0 - e2));
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let (n, h) = height(lat);
        let next = z.atan2(p * (1.0 - e2 * n / (n + h)));
        let delta = (next - lat).abs();
        lat = next;
        if delta < LATITUDE_TOLERANCE {
            converged = true;
            break;
        }
    }

    let (_, h) = height(lat);
    GeodeticSolution {
        lon,
        lat,
        h,
        converged,
    }
}

/// East-North-Up basis at (lon_rad, lat_rad); rows are E, N, U in geocentric axes.
///
/// `R * (ecef - origin)` gives local ENU; `Rᵗ * enu + origin` goes back.
pub fn enu_rotation(lon: f64, lat: f64) -> Matrix3<f64> {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    Matrix3::new(
        -sin_lon,
        cos_lon,
        0.0,
        -sin_lat * cos_lon,
        -sin_lat * sin_lon,
        cos_lat,
        cos_lat * cos_lon,
        cos_lat * sin_lon,
        sin_lat,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordsys::ellipsoid::{CLARKE_1866, WGS84};
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_prime_meridian() {
        let p = geodetic_to_ecef(&WGS84, 0.0, 0.0, 0.0);
        assert_relative_eq!(p.x, WGS84.a);
        assert_relative_eq!(p.y, 0.0);
        assert_relative_eq!(p.z, 0.0);
    }

    #[test]
    fn test_north_pole() {
        let p = geodetic_to_ecef(&WGS84, 0.0, std::f64::consts::FRAC_PI_2, 100.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, WGS84.b + 100.0, epsilon = 1e-6);

        let sol = ecef_to_geodetic(&WGS84, &p);
        assert!(sol.converged);
        assert_relative_eq!(sol.lat, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(sol.h, 100.0, epsilon = 1e-6);
    }

    #[test]
    fn test_known_point() {
        // lon=10°, lat=45°, h=1000 m on WGS84
        let p = geodetic_to_ecef(&WGS84, 10f64.to_radians(), 45f64.to_radians(), 1000.0);
        assert_relative_eq!(p.x, 4_449_654.886_667_983, epsilon = 1e-3);
        assert_relative_eq!(p.y, 784_594.211_360_832, epsilon = 1e-3);
        assert_relative_eq!(p.z, 4_488_055.515_647_106, epsilon = 1e-3);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let cases: [(f64, f64, f64); 5] = [
            (-115.0, 39.0, 12.0),
            (179.5, -89.9, -1000.0),
            (-179.9, 0.0, 10_000.0),
            (0.0, 60.0, 0.0),
            (45.0, -45.0, 4321.0),
        ];
        for &(lon, lat, h) in &cases {
            let p = geodetic_to_ecef(&CLARKE_1866, lon.to_radians(), lat.to_radians(), h);
            let sol = ecef_to_geodetic(&CLARKE_1866, &p);
            assert!(sol.converged);
            assert_relative_eq!(sol.lon.to_degrees(), lon, epsilon = 1e-9);
            assert_relative_eq!(sol.lat.to_degrees(), lat, epsilon = 1e-9);
            assert_relative_eq!(sol.h, h, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_near_centre_returns_best_estimate() {
        let sol = ecef_to_geodetic(&WGS84, &Vector3::new(1000.0, 0.0, 1000.0));
        assert!(!sol.converged);
        assert!(sol.lon.is_finite() && sol.lat.is_finite() && sol.h.is_finite());
        assert_relative_eq!(sol.lon, 0.0);
        assert!(sol.lat > 0.0 && sol.lat <= std::f64::consts::FRAC_PI_2);
        assert!(sol.h < -6.0e6);

        let sol = ecef_to_geodetic(&WGS84, &Vector3::new(10.0, 10.0, 1.0));
        assert!(!sol.converged);
    }

    #[test]
    fn test_nan_input_does_not_panic() {
        let sol = ecef_to_geodetic(&WGS84, &Vector3::new(f64::NAN, 0.0, 0.0));
        assert!(!sol.converged);
        assert!(sol.h.is_nan());
    }

    #[test]
    fn test_enu_is_orthonormal() {
        let r = enu_rotation(-100f64.to_radians(), 39f64.to_radians());
        let rrt = r * r.transpose();
        assert_relative_eq!(rrt, Matrix3::identity(), epsilon = 1e-14);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_enu_up_is_ellipsoid_normal() {
        let (lon, lat) = (30f64.to_radians(), 50f64.to_radians());
        let r = enu_rotation(lon, lat);
        let lower = geodetic_to_ecef(&WGS84, lon, lat, 0.0);
        let upper = geodetic_to_ecef(&WGS84, lon, lat, 1.0);
        let local = r * (upper - lower);
        assert_relative_eq!(local.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(local.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(local.z, 1.0, epsilon = 1e-9);
    }
}
