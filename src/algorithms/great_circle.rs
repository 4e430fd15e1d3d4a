//! Great-circle geometry primitives on the unit sphere
//!
//! All degree/radian conversion happens in this module. Callers hand in
//! [`GeoPoint`]s and bearings in degrees and get back either unit vectors or
//! [`GeoPoint`]s in degrees; everything in between works in radians on
//! Earth-centred Cartesian vectors:
//!
//! - x = cos(lat)·cos(lon)
//! - y = cos(lat)·sin(lon)
//! - z = sin(lat)

use nalgebra::{Unit, Vector3};

use crate::core::{GeoPoint, UnitVector3};

/// Convert a geographic point to its unit vector.
pub fn to_cartesian(point: &GeoPoint) -> UnitVector3 {
    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    // Unit length by construction, up to rounding.
    Unit::new_unchecked(Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat))
}

/// Convert a unit vector back to a geographic point.
///
/// Longitude comes back in (-180, 180].
pub fn to_geo_point(v: &UnitVector3) -> GeoPoint {
    let lat = v.z.clamp(-1.0, 1.0).asin();
    let lon = v.y.atan2(v.x);
    GeoPoint::new(lat.to_degrees(), normalize_longitude(lon.to_degrees()))
}

/// Wrap any finite longitude into (-180, 180].
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    if lon_deg > -180.0 && lon_deg <= 180.0 {
        return lon_deg;
    }
    let wrapped = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Local (north, east) tangent unit vectors at a point given in radians.
fn local_basis(lat: f64, lon: f64) -> (Vector3<f64>, Vector3<f64>) {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let east = Vector3::new(-sin_lon, cos_lon, 0.0);
    (north, east)
}

/// Normal of the great circle through `point` heading along `bearing_deg`.
///
/// The direction of travel is `D = N·cos(b) + E·sin(b)` in the local tangent
/// plane, and the normal is `p × D`. The circle is unbounded: it carries no
/// notion of "in front of" or "behind" the station.
pub fn great_circle_normal(point: &GeoPoint, bearing_deg: f64) -> UnitVector3 {
    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    let (sin_b, cos_b) = bearing_deg.to_radians().sin_cos();

    let (north, east) = local_basis(lat, lon);
    let direction = north * cos_b + east * sin_b;
    let p = to_cartesian(point);

    // p and direction are orthonormal, so the product never vanishes.
    Unit::new_normalize(p.cross(&direction))
}

/// Great-circle arc between two unit vectors, in radians.
pub fn angular_distance(a: &UnitVector3, b: &UnitVector3) -> f64 {
    a.dot(b.as_ref()).clamp(-1.0, 1.0).acos()
}

/// Signed angular offset of `point` from the great circle with the given normal, in radians.
///
/// Zero means the point lies on the circle.
pub fn cross_track_angle(point: &UnitVector3, normal: &UnitVector3) -> f64 {
    point.dot(normal.as_ref()).clamp(-1.0, 1.0).asin()
}

/// Initial great-circle bearing from `from` toward `to`, in degrees [0, 360).
pub fn initial_bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let y = delta_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);

    // rem_euclid rounds tiny negatives up to exactly 360
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_to_cartesian_axes() {
        let v = to_cartesian(&GeoPoint::new(0.0, 0.0));
        assert!((v.x - 1.0).abs() < EPS && v.y.abs() < EPS && v.z.abs() < EPS);

        let v = to_cartesian(&GeoPoint::new(0.0, 90.0));
        assert!(v.x.abs() < EPS && (v.y - 1.0).abs() < EPS && v.z.abs() < EPS);

        let v = to_cartesian(&GeoPoint::new(90.0, 0.0));
        assert!(v.x.abs() < EPS && v.y.abs() < EPS && (v.z - 1.0).abs() < EPS);
    }

    #[test]
    fn test_to_cartesian_is_unit_length() {
        let v = to_cartesian(&GeoPoint::new(43.51793606, -71.36935549));
        assert!((v.norm() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_eq!(normalize_longitude(0.0), 0.0);
        assert_eq!(normalize_longitude(180.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), 180.0);
        assert_eq!(normalize_longitude(-71.25), -71.25);
        assert!((normalize_longitude(190.0) - -170.0).abs() < EPS);
        assert!((normalize_longitude(-190.0) - 170.0).abs() < EPS);
        assert!((normalize_longitude(540.0) - 180.0).abs() < EPS);
        assert!((normalize_longitude(-720.5) - -0.5).abs() < EPS);
    }

    #[test]
    fn test_antimeridian_comes_back_positive() {
        // atan2(+0, -1) is exactly pi; -180 must never be produced
        let v = Unit::new_unchecked(Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(to_geo_point(&v).lon, 180.0);

        let v = Unit::new_unchecked(Vector3::new(-1.0, -0.0, 0.0));
        assert_eq!(to_geo_point(&v).lon, 180.0);
    }

    #[test]
    fn test_normal_is_perpendicular_to_point_and_heading() {
        let p = GeoPoint::new(42.885653, -71.266487);
        let n = great_circle_normal(&p, 37.0);
        let v = to_cartesian(&p);

        assert!((n.norm() - 1.0).abs() < 1e-12);
        assert!(n.dot(v.as_ref()).abs() < 1e-12);
    }

    #[test]
    fn test_equator_heading_east_has_polar_normal() {
        let n = great_circle_normal(&GeoPoint::new(0.0, 0.0), 90.0);
        assert!((n.z - 1.0).abs() < EPS);

        // Heading north along the prime meridian: normal points to -y
        let n = great_circle_normal(&GeoPoint::new(0.0, 0.0), 0.0);
        assert!((n.y + 1.0).abs() < EPS);
    }

    #[test]
    fn test_angular_distance() {
        let a = to_cartesian(&GeoPoint::new(0.0, 0.0));
        let b = to_cartesian(&GeoPoint::new(0.0, 90.0));
        assert!((angular_distance(&a, &b) - std::f64::consts::FRAC_PI_2).abs() < EPS);
        assert_eq!(angular_distance(&a, &a), 0.0);

        let c = to_cartesian(&GeoPoint::new(0.0, 180.0));
        assert!((angular_distance(&a, &c) - std::f64::consts::PI).abs() < 1e-7);
    }

    #[test]
    fn test_initial_bearing_cardinal() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert!(initial_bearing(&origin, &GeoPoint::new(1.0, 0.0)).abs() < 1e-9);
        assert!((initial_bearing(&origin, &GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((initial_bearing(&origin, &GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((initial_bearing(&origin, &GeoPoint::new(0.0, -1.0)) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_on_its_own_circle() {
        let station = GeoPoint::new(43.10195806, -71.18099417);
        let target = GeoPoint::new(43.3, -71.5);
        let bearing = initial_bearing(&station, &target);
        let normal = great_circle_normal(&station, bearing);

        let offset = cross_track_angle(&to_cartesian(&target), &normal);
        assert!(offset.abs() < 1e-12, "offset {}", offset);

        // A point well off the circle has a clearly non-zero offset
        let off = cross_track_angle(&to_cartesian(&GeoPoint::new(43.3, -70.5)), &normal);
        assert!(off.abs() > 1e-3);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_property(
                lat in -89.9..89.9_f64,
                lon in -179.999..180.0_f64,
            ) {
                let p = GeoPoint::new(lat, lon);
                let back = to_geo_point(&to_cartesian(&p));

                prop_assert!((back.lat - lat).abs() < 1e-9, "lat {} -> {}", lat, back.lat);
                prop_assert!((back.lon - lon).abs() < 1e-9, "lon {} -> {}", lon, back.lon);
            }

            #[test]
            fn test_to_geo_point_in_range(
                x in -1.0..1.0_f64,
                y in -1.0..1.0_f64,
                z in -1.0..1.0_f64,
            ) {
                let v = Vector3::new(x, y, z);
                prop_assume!(v.norm() > 1e-6);
                let p = to_geo_point(&Unit::new_normalize(v));

                prop_assert!((-90.0..=90.0).contains(&p.lat));
                prop_assert!(p.lon > -180.0 && p.lon <= 180.0);
            }

            #[test]
            fn test_initial_bearing_in_range(
                lat1 in -80.0..80.0_f64,
                lon1 in -180.0..180.0_f64,
                lat2 in -80.0..80.0_f64,
                lon2 in -180.0..180.0_f64,
            ) {
                let b = initial_bearing(&GeoPoint::new(lat1, lon1), &GeoPoint::new(lat2, lon2));
                prop_assert!((0.0..360.0).contains(&b));
            }
        }
    }
}
