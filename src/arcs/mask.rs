//! Land/water mask and open-water ray clipping.
//!
//! The mask holds the study area's land polygons. Clipping a ray against
//! it yields the ray's open-water length: the summed length of every part
//! of the ray not covered by land, which is what the fetch classifier
//! consumes. Water on the far side of an island still counts, matching
//! the original water-arc measurement.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Contains, Coord, EuclideanLength, MultiPolygon, Point, Polygon};

use crate::fetch::RaySet;
use crate::types::DIRECTION_COUNT;

use super::cast::{Ray, RayCaster};

/// Open-water shorter than this (meters) is treated as no water at all.
pub const MIN_OPEN_WATER_M: f64 = 1e-6;

/// Land polygons of the study area, used to clip fetch rays.
#[derive(Clone, Debug)]
pub struct LandWaterMask {
    land: MultiPolygon<f64>,
}

impl LandWaterMask {
    /// Build a mask from land polygons.
    pub fn new(land: MultiPolygon<f64>) -> Self {
        Self { land }
    }

    /// Build a mask from individual land polygons.
    pub fn from_polygons(polygons: Vec<Polygon<f64>>) -> Self {
        Self {
            land: MultiPolygon(polygons),
        }
    }

    /// Number of land polygons in the mask.
    pub fn polygon_count(&self) -> usize {
        self.land.0.len()
    }

    /// True when the coordinate is not inside any land polygon.
    ///
    /// Points exactly on a polygon boundary (the shoreline itself) count
    /// as water.
    pub fn is_water(&self, at: Coord<f64>) -> bool {
        !self.land.contains(&Point::from(at))
    }

    /// Total open-water length of a ray in meters.
    ///
    /// Splits the ray at every crossing with a land polygon edge and sums
    /// the sub-spans whose midpoints lie over water.
    pub fn open_water_length(&self, ray: &Ray) -> f64 {
        let full_length = ray.length_m();
        if full_length <= 0.0 {
            return 0.0;
        }

        // Ray parameters (0..1) of every edge crossing.
        let mut params: Vec<f64> = vec![0.0, 1.0];
        let dir_x = ray.line.dx();
        let dir_y = ray.line.dy();
        let len_sq = full_length * full_length;

        let mut push_param = |p: Coord<f64>, params: &mut Vec<f64>| {
            let t = ((p.x - ray.line.start.x) * dir_x + (p.y - ray.line.start.y) * dir_y) / len_sq;
            params.push(t.clamp(0.0, 1.0));
        };

        for polygon in &self.land.0 {
            let rings =
                std::iter::once(polygon.exterior()).chain(polygon.interiors().iter());
            for ring in rings {
                for edge in ring.lines() {
                    match line_intersection(ray.line, edge) {
                        Some(LineIntersection::SinglePoint { intersection, .. }) => {
                            push_param(intersection, &mut params);
                        }
                        Some(LineIntersection::Collinear { intersection }) => {
                            push_param(intersection.start, &mut params);
                            push_param(intersection.end, &mut params);
                        }
                        None => {}
                    }
                }
            }
        }

        params.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        params.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

        let mut water = 0.0;
        for pair in params.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            if t1 - t0 <= 0.0 {
                continue;
            }
            let mid = 0.5 * (t0 + t1);
            let at = Coord {
                x: ray.line.start.x + mid * dir_x,
                y: ray.line.start.y + mid * dir_y,
            };
            if self.is_water(at) {
                water += (t1 - t0) * full_length;
            }
        }

        water
    }

    /// Cast a full 16-direction fan and collect the open-water lengths.
    ///
    /// Directions with effectively no open water come back absent, so a
    /// landlocked direction never contributes a zero to quadrant counts.
    pub fn cast(&self, caster: &RayCaster, origin: Coord<f64>) -> RaySet {
        let mut lengths = [None; DIRECTION_COUNT];
        for ray in caster.fan(origin) {
            let water = self.open_water_length(&ray);
            if water > MIN_OPEN_WATER_M {
                lengths[ray.direction.index()] = Some(water);
            }
        }
        RaySet::from_lengths(lengths)
            .expect("clipped open-water lengths are finite and non-negative")
    }

    /// Total shoreline perimeter of the land polygons (meters).
    pub fn shoreline_length_m(&self) -> f64 {
        self.land
            .0
            .iter()
            .map(|p| {
                p.exterior().euclidean_length()
                    + p.interiors()
                        .iter()
                        .map(EuclideanLength::euclidean_length)
                        .sum::<f64>()
            })
            .sum()
    }
}
