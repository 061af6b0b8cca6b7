// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Mean radius of Earth, in meters.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS: f64 = 6_371_008.8;

/// Mean diameter of Earth, in meters.
const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

/// Calculates the great-circle distance between two lat-lng positions
/// on Earth using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
/// Returns the result in meters.
///
/// Only meaningful for [Entrance](crate::Entrance) coordinates; node `x`/`y`
/// live in a planar building coordinate system.
pub fn earth_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lng1 = lng1.to_radians();
    let lat2 = lat2.to_radians();
    let lng2 = lng2.to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlng_half = ((lng2 - lng1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlng_half * sin_dlng_half;

    EARTH_DIAMETER * h.sqrt().min(1.0).asin()
}
