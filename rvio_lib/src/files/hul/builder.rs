//---------------------------------------------------------------------------//
// Copyright (c) 2024 The rvio contributors. All rights reserved.
//
// This file is part of the Re-Volt I/O (rvio) project.
//
// This file is licensed under the MIT license, which can be found in the
// LICENSE file at the root of this repository.
//---------------------------------------------------------------------------//

//! Convex hull construction.
//!
//! The hull codec doesn't care how the hull is built. Anything implementing [`ConvexHullBuilder`] can be
//! used, so host applications can plug in their own. [`BruteForceHullBuilder`] is a simple implementation,
//! good enough for the small point sets car hulls use.

use getset::*;
use itertools::Itertools;
use nalgebra::Vector3;
use serde_derive::{Serialize, Deserialize};

use std::cmp::Ordering;

use crate::error::{RLibError, Result};

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// The result of building a convex hull, in external space.
#[derive(Default, PartialEq, Clone, Debug, Getters, MutGetters, Setters, Serialize, Deserialize)]
#[getset(get = "pub", get_mut = "pub", set = "pub")]
pub struct HullGeometry {
    vertices: Vec<Vector3<f32>>,
    edges: Vec<[usize; 2]>,

    /// Vertex loops of each face, counter-clockwise when seen from outside.
    faces: Vec<Vec<usize>>,
}

/// Something able to build the convex hull of a point set.
pub trait ConvexHullBuilder {

    /// This function builds the convex hull of the provided points, in external space.
    fn build(&self, points: &[Vector3<f32>]) -> Result<HullGeometry>;
}

/// [`ConvexHullBuilder`] checking every plane through three points. It's O(n^4), so keep it for small point sets.
#[derive(Clone, Debug, Default)]
pub struct BruteForceHullBuilder;

/// A supporting plane found while building, with its outward normal.
struct SupportPlane {
    normal: Vector3<f32>,
    distance: f32,
}

//---------------------------------------------------------------------------//
//                        Implementation of HullGeometry
//---------------------------------------------------------------------------//

impl HullGeometry {
    pub fn new(vertices: Vec<Vector3<f32>>, edges: Vec<[usize; 2]>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            vertices,
            edges,
            faces,
        }
    }

    /// This function returns the edges of the provided face loops, each one once, in the order they're found.
    pub fn edges_from_faces(faces: &[Vec<usize>]) -> Vec<[usize; 2]> {
        let mut edges: Vec<[usize; 2]> = vec![];
        for face in faces {
            for (index, current) in face.iter().enumerate() {
                let next = face[(index + 1) % face.len()];
                let edge = [*current.min(&next), *current.max(&next)];
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }

        edges
    }
}

//---------------------------------------------------------------------------//
//                   Implementation of BruteForceHullBuilder
//---------------------------------------------------------------------------//

impl ConvexHullBuilder for BruteForceHullBuilder {
    fn build(&self, points: &[Vector3<f32>]) -> Result<HullGeometry> {
        let extent = crate::geometry::bounds(points.iter().copied())
            .map(|(min, max)| (max - min).amax())
            .unwrap_or_default();
        let epsilon = (extent * 1e-5).max(1e-6);

        // Repeated points would give us repeated vertices.
        let mut unique: Vec<Vector3<f32>> = vec![];
        for point in points {
            if !unique.iter().any(|other| (other - point).norm() <= epsilon) {
                unique.push(*point);
            }
        }

        if unique.len() < 4 {
            return Err(RLibError::HullDegenerate(format!("{} distinct points, at least 4 are needed", unique.len())));
        }

        let planes = support_planes(&unique, epsilon);
        if planes.len() < 4 {
            return Err(RLibError::HullDegenerate("all the points are on the same plane".to_owned()));
        }

        // Faces, using indices of the unique points.
        let mut faces = planes.iter()
            .map(|plane| face_loop(&unique, plane, epsilon))
            .filter(|face| face.len() >= 3)
            .collect::<Vec<_>>();

        // Only the points used by a face are hull vertices. Keep them in their input order.
        let mut used = faces.iter().flatten().copied().collect::<Vec<_>>();
        used.sort_unstable();
        used.dedup();

        let remap = |index: usize| used.binary_search(&index).unwrap_or_default();
        faces.iter_mut().for_each(|face| face.iter_mut().for_each(|index| *index = remap(*index)));

        let vertices = used.iter().map(|index| unique[*index]).collect();
        let edges = HullGeometry::edges_from_faces(&faces);

        Ok(HullGeometry::new(vertices, edges, faces))
    }
}

/// This function returns the distinct planes through three or more points with every point behind them.
fn support_planes(points: &[Vector3<f32>], epsilon: f32) -> Vec<SupportPlane> {
    let mut planes: Vec<SupportPlane> = vec![];

    for (i, j, k) in (0..points.len()).tuple_combinations() {
        let normal = match (points[j] - points[i]).cross(&(points[k] - points[i])).try_normalize(f32::EPSILON) {
            Some(normal) => normal,
            None => continue,
        };

        let side = |point: &Vector3<f32>| normal.dot(&(point - points[i]));
        let normal = if points.iter().all(|point| side(point) <= epsilon) {
            normal
        } else if points.iter().all(|point| side(point) >= -epsilon) {
            -normal
        } else {
            continue;
        };

        let distance = -normal.dot(&points[i]);
        let known = planes.iter().any(|plane| plane.normal.dot(&normal) > 1.0 - 1e-4 && (plane.distance - distance).abs() <= epsilon);
        if !known {
            planes.push(SupportPlane {
                normal,
                distance,
            });
        }
    }

    planes
}

/// This function returns the corners of the face lying on `plane`, counter-clockwise around its normal.
///
/// Points in the middle of an edge are left out.
fn face_loop(points: &[Vector3<f32>], plane: &SupportPlane, epsilon: f32) -> Vec<usize> {
    let normal = plane.normal;
    let helper = if normal.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    let u = normal.cross(&helper).normalize();
    let w = normal.cross(&u);

    let mut on_plane = points.iter()
        .enumerate()
        .filter(|(_, point)| (normal.dot(point) + plane.distance).abs() <= epsilon)
        .map(|(index, point)| (index, point.dot(&u), point.dot(&w)))
        .collect::<Vec<_>>();

    on_plane.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal).then(a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal)));

    // Andrew's monotone chain, dropping collinear points.
    let cross = |o: &(usize, f32, f32), a: &(usize, f32, f32), b: &(usize, f32, f32)| (a.1 - o.1) * (b.2 - o.2) - (a.2 - o.2) * (b.1 - o.1);
    let area_epsilon = epsilon * epsilon;

    let mut lower: Vec<(usize, f32, f32)> = vec![];
    for point in &on_plane {
        while lower.len() >= 2 && cross(&lower[lower.len() - 2], &lower[lower.len() - 1], point) <= area_epsilon {
            lower.pop();
        }
        lower.push(*point);
    }

    let mut upper: Vec<(usize, f32, f32)> = vec![];
    for point in on_plane.iter().rev() {
        while upper.len() >= 2 && cross(&upper[upper.len() - 2], &upper[upper.len() - 1], point) <= area_epsilon {
            upper.pop();
        }
        upper.push(*point);
    }

    lower.pop();
    upper.pop();
    lower.into_iter().chain(upper).map(|(index, _, _)| index).collect()
}
