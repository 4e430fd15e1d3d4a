//! Spherical geometry for bearing fixes

pub mod great_circle;
pub mod intersection;

pub use great_circle::{
    angular_distance, cross_track_angle, great_circle_normal, initial_bearing,
    normalize_longitude, to_cartesian, to_geo_point,
};
pub use intersection::{
    intersect, resolve_three, spherical_mean, Estimate, MeanFallback, Resolver, ResolverOptions,
    TieBreak,
};
