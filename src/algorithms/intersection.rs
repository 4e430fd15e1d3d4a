//! Intersection and aggregation of great-circle lines of sight
//!
//! Two sightings define two great circles that always cross at a pair of
//! antipodal points. The resolver keeps the candidate whose summed angular
//! distance to both stations is smallest. With a third sighting, the three
//! pairwise crossings are reduced to one estimate by their spherical mean
//! (the renormalized sum of their unit vectors).

use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};

use crate::algorithms::great_circle::{
    angular_distance, great_circle_normal, to_cartesian, to_geo_point,
};
use crate::core::{GeoPoint, Sighting, UnitVector3, DEFAULT_DEGENERACY_EPSILON};
use crate::validation::error::{DegeneracyKind, FixError, FixResult};

/// Rule for choosing between the two antipodal candidates when their distance sums are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the candidate with the smaller longitude.
    #[default]
    SmallerLongitude,
    /// Prefer the candidate with the larger longitude.
    LargerLongitude,
}

/// What to do when three intersections have a zero resultant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanFallback {
    /// Fail with [`DegeneracyKind::ZeroResultant`].
    #[default]
    Error,
    /// Return the intersection of the first two sightings and flag the estimate.
    FirstIntersection,
}

/// Tunable behaviour of the [`Resolver`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Vector magnitude at or below which a cross product or resultant counts as zero
    pub degeneracy_epsilon: f64,
    pub tie_break: TieBreak,
    pub mean_fallback: MeanFallback,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            degeneracy_epsilon: DEFAULT_DEGENERACY_EPSILON,
            tie_break: TieBreak::default(),
            mean_fallback: MeanFallback::default(),
        }
    }
}

/// Outcome of resolving two or three sightings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Best estimate of the target location
    pub point: GeoPoint,
    /// Pairwise intersections in the order (1,2), (2,3), (1,3); one entry for two sightings
    pub intersections: Vec<GeoPoint>,
    /// True when the zero-resultant fallback replaced the spherical mean
    pub fallback_used: bool,
}

/// Great-circle intersection resolver
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Crossing point of two sightings' great circles.
    pub fn intersect(&self, first: &Sighting, second: &Sighting) -> FixResult<GeoPoint> {
        self.intersect_lines(
            &first.location(),
            first.bearing_deg,
            &second.location(),
            second.bearing_deg,
        )
    }

    /// Crossing point of the great circles through `p1` along `bearing1` and `p2` along `bearing2`.
    ///
    /// Fails with [`DegeneracyKind::CoincidentCircles`] when both lines lie on the same circle.
    pub fn intersect_lines(
        &self,
        p1: &GeoPoint,
        bearing1_deg: f64,
        p2: &GeoPoint,
        bearing2_deg: f64,
    ) -> FixResult<GeoPoint> {
        let n1 = great_circle_normal(p1, bearing1_deg);
        let n2 = great_circle_normal(p2, bearing2_deg);

        let candidate = Unit::try_new(n1.cross(n2.as_ref()), self.options.degeneracy_epsilon)
            .ok_or(FixError::DegenerateGeometry(DegeneracyKind::CoincidentCircles))?;
        let antipode = Unit::new_unchecked(-candidate.into_inner());

        let s1 = to_cartesian(p1);
        let s2 = to_cartesian(p2);
        let d_pos = angular_distance(&s1, &candidate) + angular_distance(&s2, &candidate);
        let d_neg = angular_distance(&s1, &antipode) + angular_distance(&s2, &antipode);

        Ok(self.choose_candidate(candidate, antipode, d_pos, d_neg))
    }

    fn choose_candidate(
        &self,
        pos: UnitVector3,
        neg: UnitVector3,
        d_pos: f64,
        d_neg: f64,
    ) -> GeoPoint {
        let pos = to_geo_point(&pos);
        let neg = to_geo_point(&neg);
        if d_pos < d_neg {
            return pos;
        }
        if d_neg < d_pos {
            return neg;
        }

        if pos.lon == neg.lon {
            // Polar candidates share a longitude; keep the northern one.
            return if pos.lat >= neg.lat { pos } else { neg };
        }
        let pos_is_smaller = pos.lon < neg.lon;
        match (self.options.tie_break, pos_is_smaller) {
            (TieBreak::SmallerLongitude, true) | (TieBreak::LargerLongitude, false) => pos,
            _ => neg,
        }
    }

    /// Direction of the summed unit vectors of `points`, renormalized.
    ///
    /// Fails with [`DegeneracyKind::ZeroResultant`] when the vectors cancel out.
    pub fn spherical_mean(&self, points: &[GeoPoint]) -> FixResult<GeoPoint> {
        if points.is_empty() {
            return Err(FixError::invalid_input(
                "points",
                "spherical mean needs at least one point",
            ));
        }

        let sum = points
            .iter()
            .map(|p| to_cartesian(p).into_inner())
            .fold(Vector3::zeros(), |acc, v| acc + v);

        let mean = Unit::try_new(sum, self.options.degeneracy_epsilon)
            .ok_or(FixError::DegenerateGeometry(DegeneracyKind::ZeroResultant))?;
        Ok(to_geo_point(&mean))
    }

    /// Spherical mean of the three pairwise intersections of three sightings.
    pub fn resolve_three(&self, sightings: &[Sighting; 3]) -> FixResult<GeoPoint> {
        Ok(self.resolve(sightings)?.point)
    }

    /// Resolve two or three sightings into one estimate.
    pub fn resolve(&self, sightings: &[Sighting]) -> FixResult<Estimate> {
        match sightings {
            [first, second] => {
                let point = self.intersect(first, second)?;
                Ok(Estimate {
                    point,
                    intersections: vec![point],
                    fallback_used: false,
                })
            }
            [first, second, third] => {
                let p12 = self.intersect(first, second)?;
                let p23 = self.intersect(second, third)?;
                let p13 = self.intersect(first, third)?;
                self.aggregate([p12, p23, p13])
            }
            other => Err(FixError::invalid_input(
                "sightings",
                format!("expected 2 or 3 sightings, got {}", other.len()),
            )),
        }
    }

    fn aggregate(&self, intersections: [GeoPoint; 3]) -> FixResult<Estimate> {
        let (point, fallback_used) = match self.spherical_mean(&intersections) {
            Ok(mean) => (mean, false),
            Err(FixError::DegenerateGeometry(DegeneracyKind::ZeroResultant))
                if self.options.mean_fallback == MeanFallback::FirstIntersection =>
            {
                (intersections[0], true)
            }
            Err(e) => return Err(e),
        };

        Ok(Estimate {
            point,
            intersections: intersections.to_vec(),
            fallback_used,
        })
    }
}

/// Intersect two sightings with default options.
pub fn intersect(first: &Sighting, second: &Sighting) -> FixResult<GeoPoint> {
    Resolver::default().intersect(first, second)
}

/// Resolve three sightings with default options.
pub fn resolve_three(sightings: &[Sighting; 3]) -> FixResult<GeoPoint> {
    Resolver::default().resolve_three(sightings)
}

/// Spherical mean with default options.
pub fn spherical_mean(points: &[GeoPoint]) -> FixResult<GeoPoint> {
    Resolver::default().spherical_mean(points)
}
