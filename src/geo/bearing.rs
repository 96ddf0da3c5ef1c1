use super::Position;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Initial bearing from `origin` to `target` in degrees, within [0, 360).
pub fn bearing(origin: Position, target: Position) -> f64 {
    let (lat1, lon1) = (origin.latitude, origin.longitude);
    let (lat2, lon2) = (target.latitude, target.longitude);

    // Same latitude: due east or due west, and atan below would divide by zero.
    if lat2 == lat1 {
        return if lon2 > lon1 { 90.0 } else { 270.0 };
    }

    let deg = ((lon2 - lon1) / (lat2 - lat1)).atan().to_degrees();

    //  - | +   (lat2 > lat1)
    // ---o---
    //  + | -   (lat2 < lat1)
    if lat2 > lat1 {
        (360.0 + deg) % 360.0
    } else {
        180.0 + deg
    }
}

/// Haversine great-circle distance in meters on a sphere of Earth's radius.
pub fn distance(pos1: Position, pos2: Position) -> f64 {
    distance_with_radius(pos1, pos2, EARTH_RADIUS_M)
}

pub fn distance_with_radius(pos1: Position, pos2: Position, radius: f64) -> f64 {
    let (lat1, lon1) = (pos1.lat_rad(), pos1.lon_rad());
    let (lat2, lon2) = (pos2.lat_rad(), pos2.lon_rad());

    let hav = ((lat2 - lat1) / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
    2.0 * radius * hav.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ORIGIN: Position = Position {
        latitude: 10.0,
        longitude: 10.0,
    };

    #[rstest]
    #[case(Position::new(11.0, 10.0), 0.0)]
    #[case(Position::new(10.0, 11.0), 90.0)]
    #[case(Position::new(9.0, 10.0), 180.0)]
    #[case(Position::new(10.0, 9.0), 270.0)]
    fn cardinal_bearings(#[case] target: Position, #[case] expected: f64) {
        assert_eq!(bearing(ORIGIN, target), expected);
    }

    #[rstest]
    #[case(Position::new(11.0, 11.0))]
    #[case(Position::new(9.0, 11.0))]
    #[case(Position::new(9.0, 9.0))]
    #[case(Position::new(11.0, 9.0))]
    fn diagonal_bearings_stay_in_range(#[case] target: Position) {
        let b = bearing(ORIGIN, target);
        assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
    }

    #[test]
    fn diagonal_quadrants() {
        assert!((bearing(ORIGIN, Position::new(11.0, 11.0)) - 45.0).abs() < 1e-9);
        assert!((bearing(ORIGIN, Position::new(9.0, 11.0)) - 135.0).abs() < 1e-9);
        assert!((bearing(ORIGIN, Position::new(9.0, 9.0)) - 225.0).abs() < 1e-9);
        assert!((bearing(ORIGIN, Position::new(11.0, 9.0)) - 315.0).abs() < 1e-9);
    }

    #[test]
    fn same_point_bearing_is_finite() {
        let b = bearing(ORIGIN, ORIGIN);
        assert!(b.is_finite());
        assert_eq!(b, 270.0);
    }

    #[test]
    fn distance_to_self_is_zero() {
        for pos in [ORIGIN, Position::new(-33.9, 151.2), Position::new(89.9, -179.9)] {
            assert_eq!(distance(pos, pos), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position::new(51.4700, -0.4543);
        let b = Position::new(40.6413, -73.7781);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_longitude_at_ten_north() {
        let d = distance(ORIGIN, Position::new(10.0, 11.0));
        assert!((d - 109_505.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn custom_radius_scales_linearly() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(0.0, 90.0);
        let quarter = distance_with_radius(a, b, 1.0);
        assert!((quarter - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
