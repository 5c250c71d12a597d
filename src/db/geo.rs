/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in km between two points given in
/// decimal degrees. Inputs are not range-checked.
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_km(-15.4167, 28.2833, -15.4167, 28.2833), 0.0);
    }

    #[test]
    fn test_quarter_meridian() {
        let d = distance_km(0.0, 0.0, 0.0, 90.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM / 2.0;
        assert!((d - expected).abs() < 1e-6);
        assert!((d - 10007.54).abs() < 0.01);
    }

    #[test]
    fn test_symmetric() {
        let lusaka_to_livingstone = distance_km(-15.4167, 28.2833, -17.8419, 25.8544);
        let livingstone_to_lusaka = distance_km(-17.8419, 25.8544, -15.4167, 28.2833);
        assert!((lusaka_to_livingstone - livingstone_to_lusaka).abs() < 1e-9);
        assert!(lusaka_to_livingstone > 350.0 && lusaka_to_livingstone < 400.0);
    }
}
