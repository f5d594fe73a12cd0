// src/math/voronoi/extractor.rs

//! # Voronoi Boundary Extraction
//!
//! Turns a [`VoronoiDiagram`] into renderable shapes: the finite cell
//! polygons and the unbounded ridges cut off at a far point derived from the
//! spread of the site cloud. Both lists are deduplicated by exact
//! structural equality, first occurrence wins.

use super::diagram::{VertexRef, VoronoiDiagram};
use crate::math::{
    error::{MathError, MathResult},
    geometry::{dedup::dedup_preserving_order, polygon::Polygon},
    types::{Bounds2D, Point2D, Segment},
    utils::simple_geometry::{mean_point, sign},
};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to emit for a region slot that has no finite polygon of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenRegionPolicy {
    /// An open region repeats the last polygon built before it (the empty
    /// polygon if none was built yet). A region without vertices yields the
    /// empty polygon. Duplicates collapse in the dedup step.
    #[default]
    CarryForward,
    /// Open and empty regions leave a gap at their slot.
    Skip,
}

/// Extracted shapes of one tessellation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoronoiBoundaries {
    /// Finite cell polygons, deduplicated, in region order
    pub polygons: Vec<Polygon>,
    /// Unbounded ridges from their finite vertex to a far point, deduplicated
    pub segments: Vec<Segment>,
}

impl VoronoiBoundaries {
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.segments.is_empty()
    }
}

/// Extracts finite cell polygons and unbounded ridge segments using
/// [`OpenRegionPolicy::CarryForward`].
pub fn extract_voronoi_boundaries(diagram: &VoronoiDiagram) -> MathResult<VoronoiBoundaries> {
    extract_voronoi_boundaries_with(diagram, OpenRegionPolicy::default())
}

/// Extracts finite cell polygons and unbounded ridge segments.
pub fn extract_voronoi_boundaries_with(
    diagram: &VoronoiDiagram,
    policy: OpenRegionPolicy,
) -> MathResult<VoronoiBoundaries> {
    if diagram.sites.is_empty() {
        return Ok(VoronoiBoundaries::default());
    }

    let slots = VoronoiExtractor::region_slots(diagram, policy)?;
    let polygons = dedup_preserving_order(slots.into_iter().flatten().collect());
    let segments = dedup_preserving_order(VoronoiExtractor::unbounded_segments(diagram)?);

    debug!(
        "VoronoiExtractor: {} regions -> {} polygons, {} ridges -> {} unbounded segments",
        diagram.regions.len(),
        polygons.len(),
        diagram.ridge_points.len(),
        segments.len()
    );

    Ok(VoronoiBoundaries { polygons, segments })
}

/// Stateless extraction steps, usable individually.
pub struct VoronoiExtractor;

impl VoronoiExtractor {
    /// One slot per region, in region order, before deduplication.
    pub fn region_slots(
        diagram: &VoronoiDiagram,
        policy: OpenRegionPolicy,
    ) -> MathResult<Vec<Option<Polygon>>> {
        let mut slots = Vec::with_capacity(diagram.regions.len());
        let mut last_built = Polygon::empty();

        for (region_idx, region) in diagram.regions.iter().enumerate() {
            if region.contains(&VertexRef::AtInfinity) {
                slots.push(match policy {
                    OpenRegionPolicy::CarryForward => Some(last_built.clone()),
                    OpenRegionPolicy::Skip => None,
                });
                continue;
            }

            if region.is_empty() {
                last_built = Polygon::empty();
                slots.push(match policy {
                    OpenRegionPolicy::CarryForward => Some(Polygon::empty()),
                    OpenRegionPolicy::Skip => None,
                });
                continue;
            }

            let vertices = region
                .iter()
                .map(|v| Self::vertex(diagram, *v))
                .collect::<MathResult<Vec<_>>>()?;
            let polygon = Polygon::new(vertices).map_err(|_| MathError::MalformedDiagram {
                reason: format!(
                    "closed region {} has only {} vertices",
                    region_idx,
                    region.len()
                ),
            })?;
            last_built = polygon.clone();
            slots.push(Some(polygon));
        }

        Ok(slots)
    }

    /// Ridges with exactly one open end, cut at
    /// `finite_vertex + outward_normal * max_extent`.
    pub fn unbounded_segments(diagram: &VoronoiDiagram) -> MathResult<Vec<Segment>> {
        if diagram.ridge_points.len() != diagram.ridge_vertices.len() {
            return Err(MathError::MalformedDiagram {
                reason: format!(
                    "{} ridge point pairs but {} ridge vertex pairs",
                    diagram.ridge_points.len(),
                    diagram.ridge_vertices.len()
                ),
            });
        }

        let Some(center) = mean_point(&diagram.sites) else {
            return Ok(Vec::new());
        };
        let center = center.to_vector();
        let max_extent = Bounds2D::from_points_iter(diagram.sites.iter().copied())
            .map(|b| b.max_extent())
            .unwrap_or(0.0);

        let mut segments = Vec::new();
        for (ridge_idx, (points, ends)) in diagram
            .ridge_points
            .iter()
            .zip(&diagram.ridge_vertices)
            .enumerate()
        {
            let finite_idx = match ends {
                [VertexRef::Finite(_), VertexRef::Finite(_)] => continue,
                [VertexRef::Finite(i), VertexRef::AtInfinity]
                | [VertexRef::AtInfinity, VertexRef::Finite(i)] => *i,
                [VertexRef::AtInfinity, VertexRef::AtInfinity] => {
                    return Err(MathError::MalformedDiagram {
                        reason: format!("ridge {} has no finite vertex", ridge_idx),
                    });
                }
            };

            let finite = Self::vertex(diagram, VertexRef::Finite(finite_idx))?.to_vector();
            let a = Self::site(diagram, points[0])?.to_vector();
            let b = Self::site(diagram, points[1])?.to_vector();

            let direction = outward_direction(a, b, center);
            if direction == Vector2::zeros() {
                warn!(
                    "VoronoiExtractor: ridge {} has no defined outward direction, emitting a zero-length segment.",
                    ridge_idx
                );
            }
            let far_point = finite + direction * max_extent;

            segments.push(Segment::new(
                Point2D::from_vector(finite),
                Point2D::from_vector(far_point),
            ));
        }

        Ok(segments)
    }

    fn vertex(diagram: &VoronoiDiagram, vertex: VertexRef) -> MathResult<Point2D> {
        let VertexRef::Finite(index) = vertex else {
            return Err(MathError::MalformedDiagram {
                reason: "vertex at infinity has no coordinates".to_string(),
            });
        };
        diagram
            .vertices
            .get(index)
            .copied()
            .ok_or(MathError::IndexOutOfRange {
                table: "vertex",
                index,
                len: diagram.vertices.len(),
            })
    }

    fn site(diagram: &VoronoiDiagram, index: usize) -> MathResult<Point2D> {
        diagram
            .sites
            .get(index)
            .copied()
            .ok_or(MathError::IndexOutOfRange {
                table: "site",
                index,
                len: diagram.sites.len(),
            })
    }
}

/// Normal of the site pair `(a, b)` oriented away from `center`. Zero if the
/// ridge midpoint lies exactly on the line through `center` along the
/// tangent, or if the two sites coincide.
fn outward_direction(a: Vector2<f64>, b: Vector2<f64>, center: Vector2<f64>) -> Vector2<f64> {
    let Some(tangent) = (b - a).try_normalize(0.0) else {
        return Vector2::zeros();
    };
    let normal = Vector2::new(-tangent.y, tangent.x);
    let midpoint = (a + b) * 0.5;
    normal * sign((midpoint - center).dot(&normal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::polygon::PolygonProperties;
    use approx::assert_relative_eq;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn square_diagram() -> VoronoiDiagram {
        // Handgebautes Diagramm: eine geschlossene Region, zwei offene
        VoronoiDiagram {
            sites: vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(4.0, 0.0),
                Point2D::new(0.0, 4.0),
            ],
            vertices: vec![
                Point2D::new(1.0, 1.0),
                Point2D::new(2.0, 1.0),
                Point2D::new(2.0, 2.0),
                Point2D::new(1.0, 2.0),
            ],
            regions: vec![
                vec![VertexRef::AtInfinity, VertexRef::Finite(0)],
                vec![
                    VertexRef::Finite(0),
                    VertexRef::Finite(1),
                    VertexRef::Finite(2),
                    VertexRef::Finite(3),
                ],
                vec![VertexRef::Finite(2), VertexRef::AtInfinity],
                vec![],
            ],
            site_regions: vec![0, 1, 2],
            ridge_points: vec![[0, 1], [1, 2]],
            ridge_vertices: vec![
                [VertexRef::Finite(0), VertexRef::AtInfinity],
                [VertexRef::Finite(1), VertexRef::Finite(2)],
            ],
        }
    }

    #[test]
    fn test_carry_forward_fills_open_slots() {
        let diagram = square_diagram();
        let slots =
            VoronoiExtractor::region_slots(&diagram, OpenRegionPolicy::CarryForward).unwrap();

        assert_eq!(slots.len(), 4);
        // Vor der ersten geschlossenen Region: leeres Polygon
        assert_eq!(slots[0], Some(Polygon::empty()));
        assert_eq!(slots[1].as_ref().unwrap().len(), 4);
        // Offene Region wiederholt das letzte Polygon
        assert_eq!(slots[2], slots[1]);
        assert_eq!(slots[3], Some(Polygon::empty()));

        let boundaries = extract_voronoi_boundaries(&diagram).unwrap();
        // leer, Quadrat, (Quadrat), (leer) -> dedupliziert
        assert_eq!(boundaries.polygons.len(), 2);
        assert!(boundaries.polygons[0].is_empty());
        assert_eq!(boundaries.polygons[1].len(), 4);
    }

    #[test]
    fn test_skip_policy_leaves_gaps() {
        let diagram = square_diagram();
        let slots = VoronoiExtractor::region_slots(&diagram, OpenRegionPolicy::Skip).unwrap();
        assert_eq!(slots.len(), 4);
        assert!(slots[0].is_none());
        assert!(slots[1].is_some());
        assert!(slots[2].is_none());
        assert!(slots[3].is_none());

        let boundaries =
            extract_voronoi_boundaries_with(&diagram, OpenRegionPolicy::Skip).unwrap();
        assert_eq!(boundaries.polygons.len(), 1);
    }

    #[test]
    fn test_unbounded_segment_points_away_from_center() {
        let diagram = square_diagram();
        let segments = VoronoiExtractor::unbounded_segments(&diagram).unwrap();
        assert_eq!(segments.len(), 1);

        // Sites (0,0),(4,0): Tangente (1,0), Normale (0,1).
        // Zentrum (4/3, 4/3), Mittelpunkt (2,0) -> Skalarprodukt negativ -> nach unten.
        // Ausdehnung 4 -> Fernpunkt (1,1) + (0,-1)*4
        let s = segments[0];
        assert_eq!(s.start, Point2D::new(1.0, 1.0));
        assert_relative_eq!(s.end.x, 1.0);
        assert_relative_eq!(s.end.y, -3.0);
    }

    #[test]
    fn test_empty_sites_give_empty_output() {
        let boundaries = extract_voronoi_boundaries(&VoronoiDiagram::default()).unwrap();
        assert!(boundaries.is_empty());
    }

    #[test]
    fn test_out_of_range_vertex_is_error() {
        let mut diagram = square_diagram();
        diagram.regions[1][2] = VertexRef::Finite(17);
        assert_eq!(
            extract_voronoi_boundaries(&diagram),
            Err(MathError::IndexOutOfRange {
                table: "vertex",
                index: 17,
                len: 4
            })
        );

        let mut diagram = square_diagram();
        diagram.ridge_points[0] = [0, 9];
        assert!(matches!(
            extract_voronoi_boundaries(&diagram),
            Err(MathError::IndexOutOfRange { table: "site", .. })
        ));
    }

    #[test]
    fn test_malformed_regions_and_ridges() {
        let mut diagram = square_diagram();
        diagram.regions[1] = vec![VertexRef::Finite(0), VertexRef::Finite(1)];
        assert!(matches!(
            extract_voronoi_boundaries(&diagram),
            Err(MathError::MalformedDiagram { .. })
        ));

        let mut diagram = square_diagram();
        diagram.ridge_vertices[0] = [VertexRef::AtInfinity, VertexRef::AtInfinity];
        assert!(matches!(
            extract_voronoi_boundaries(&diagram),
            Err(MathError::MalformedDiagram { .. })
        ));
    }

    #[test]
    fn test_finite_only_diagram_has_no_segments() {
        let mut diagram = square_diagram();
        diagram.regions = vec![diagram.regions[1].clone()];
        diagram.ridge_vertices = vec![[VertexRef::Finite(1), VertexRef::Finite(2)]; 2];
        let boundaries = extract_voronoi_boundaries(&diagram).unwrap();
        assert!(boundaries.segments.is_empty());
        assert_eq!(boundaries.polygons.len(), 1);
    }

    #[test]
    fn test_outward_direction_zero_sign() {
        // Mittelpunkt genau im Zentrum -> keine Richtung
        let a = Vector2::new(-1.0, 0.0);
        let b = Vector2::new(1.0, 0.0);
        assert_eq!(outward_direction(a, b, Vector2::zeros()), Vector2::zeros());
        assert_eq!(
            outward_direction(a, b, Vector2::new(0.0, -1.0)),
            Vector2::new(0.0, 1.0)
        );
    }

    #[test]
    fn test_grid_center_cell_is_a_clean_square() {
        let sites: Vec<Point2D> = (0..3)
            .flat_map(|i| (0..3).map(move |j| Point2D::new(10.0 * i as f64, 10.0 * j as f64)))
            .collect();
        let diagram = VoronoiDiagram::from_sites(&sites).unwrap();
        let boundaries =
            extract_voronoi_boundaries_with(&diagram, OpenRegionPolicy::Skip).unwrap();

        assert_eq!(boundaries.polygons.len(), 1);
        let cell = &boundaries.polygons[0];
        assert_eq!(cell.len(), 4);
        assert_relative_eq!(cell.area(), 100.0, epsilon = 1e-6);
        assert!(cell.contains_point(Point2D::new(10.0, 10.0)));
        // 8 Hüllenkanten, jede mit einem offenen Ende
        assert_eq!(boundaries.segments.len(), 8);
    }

    #[test]
    fn test_cells_contain_their_sites() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let sites: Vec<Point2D> = (0..23)
                .map(|_| Point2D::new(rng.random_range(0.0..105.0), rng.random_range(0.0..68.0)))
                .collect();
            let diagram = VoronoiDiagram::from_sites(&sites).unwrap();

            for (site_idx, &site) in sites.iter().enumerate() {
                let region = diagram.region_of_site(site_idx).unwrap();
                if region.contains(&VertexRef::AtInfinity) {
                    continue;
                }
                let vertices: Vec<Point2D> = region
                    .iter()
                    .map(|v| diagram.vertices[v.index().unwrap()])
                    .collect();
                let cell = Polygon::new(vertices).unwrap();
                assert!(
                    cell.contains_point(site),
                    "cell of site {} does not contain it",
                    site
                );
            }

            let boundaries = extract_voronoi_boundaries(&diagram).unwrap();
            let closed = diagram
                .regions
                .iter()
                .filter(|r| !r.contains(&VertexRef::AtInfinity))
                .count();
            // Jedes endliche Polygon gehört zu genau einer geschlossenen Region
            // (plus höchstens ein leeres Füll-Polygon vor der ersten)
            assert!(boundaries.polygons.len() <= closed + 1);
            for polygon in boundaries.polygons.iter().filter(|p| !p.is_empty()) {
                assert!(sites.iter().any(|&s| polygon.contains_point(s)));
            }
            let open_ridges = diagram
                .ridge_vertices
                .iter()
                .filter(|r| r.contains(&VertexRef::AtInfinity))
                .count();
            assert_eq!(boundaries.segments.len(), open_ridges);
        }
    }

    #[test]
    fn test_outputs_never_contain_duplicates() {
        let mut rng = StdRng::seed_from_u64(11);
        let sites: Vec<Point2D> = (0..30)
            .map(|_| Point2D::new(rng.random_range(-50.0..50.0), rng.random_range(-30.0..30.0)))
            .collect();
        let diagram = VoronoiDiagram::from_sites(&sites).unwrap();
        let boundaries = extract_voronoi_boundaries(&diagram).unwrap();

        for (i, a) in boundaries.polygons.iter().enumerate() {
            assert!(!boundaries.polygons[i + 1..].contains(a));
        }
        for (i, a) in boundaries.segments.iter().enumerate() {
            assert!(!boundaries.segments[i + 1..].contains(a));
        }
        assert_eq!(
            dedup_preserving_order(boundaries.polygons.clone()),
            boundaries.polygons
        );
    }
}
