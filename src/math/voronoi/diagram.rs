// src/math/voronoi/diagram.rs

use crate::math::{
    error::{MathError, MathResult},
    types::{Bounds2D, Point2D, SpadePoint},
    utils::constants,
};
use serde::{Deserialize, Serialize};
use spade::{DelaunayTriangulation, Triangulation};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Referenz auf einen Voronoi-Vertex: entweder ein Index in die
/// Vertex-Tabelle oder der Marker für einen Vertex im Unendlichen
/// (die Region bzw. der Grat ist dort offen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexRef {
    Finite(usize),
    AtInfinity,
}

impl VertexRef {
    pub fn is_finite(&self) -> bool {
        matches!(self, VertexRef::Finite(_))
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            VertexRef::Finite(i) => Some(*i),
            VertexRef::AtInfinity => None,
        }
    }
}

/// Beschreibung eines Voronoi-Diagramms, wie sie der Extractor konsumiert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoronoiDiagram {
    /// Die ursprünglichen Generatorpunkte (Sites)
    pub sites: Vec<Point2D>,
    /// Koordinaten der Voronoi-Vertices
    pub vertices: Vec<Point2D>,
    /// Regionen als Liste von Vertex-Referenzen
    pub regions: Vec<Vec<VertexRef>>,
    /// Region jeder Site (`site_regions[i]` gehört zu `sites[i]`)
    pub site_regions: Vec<usize>,
    /// Pro Grat: die beiden Sites links und rechts davon
    pub ridge_points: Vec<[usize; 2]>,
    /// Pro Grat: die beiden begrenzenden Vertices
    pub ridge_vertices: Vec<[VertexRef; 2]>,
}

impl VoronoiDiagram {
    /// Berechnet das Voronoi-Diagramm der Sites über eine Delaunay-Triangulation.
    ///
    /// Jeder Umkreismittelpunkt eines inneren Dreiecks wird ein Voronoi-Vertex,
    /// jede Delaunay-Kante ein Grat. Sites auf der konvexen Hülle haben offene
    /// Regionen. Zusammenfallende Sites teilen sich eine Region.
    pub fn from_sites(sites: &[Point2D]) -> MathResult<Self> {
        if sites.is_empty() {
            return Ok(Self::default());
        }
        if let Some(bad) = sites.iter().find(|p| !p.is_finite()) {
            return Err(MathError::InvalidInput {
                message: format!("non-finite Voronoi site {}", bad),
            });
        }

        let mut triangulation: DelaunayTriangulation<SpadePoint> = DelaunayTriangulation::new();
        let mut site_regions = Vec::with_capacity(sites.len());
        // Triangulations-Vertex -> erste Site, die ihn erzeugt hat
        let mut vertex_to_site: HashMap<usize, usize> = HashMap::new();

        for (site_idx, &site) in sites.iter().enumerate() {
            let handle = triangulation
                .insert(site.into())
                .map_err(|e| MathError::TriangulationFailed {
                    reason: format!("failed to insert site {} ({}): {:?}", site_idx, site, e),
                })?;
            let region = handle.index();
            if vertex_to_site.contains_key(&region) {
                warn!(
                    "VoronoiDiagram: site {} at {} coincides with an earlier site, sharing its region.",
                    site_idx, site
                );
            } else {
                vertex_to_site.insert(region, site_idx);
            }
            site_regions.push(region);
        }

        let unique_sites = triangulation.num_vertices();
        if unique_sites < 3 {
            return Err(MathError::InsufficientPoints {
                expected: 3,
                actual: unique_sites,
            });
        }
        if triangulation.num_inner_faces() == 0 {
            return Err(MathError::TriangulationFailed {
                reason: format!("all {} sites are collinear", unique_sites),
            });
        }

        // Voronoi-Vertices: ein Umkreismittelpunkt pro innerem Dreieck.
        // Liegen vier oder mehr Sites auf einem Kreis, haben benachbarte
        // Dreiecke denselben Umkreismittelpunkt; diese teilen sich einen Vertex.
        let bounds = Bounds2D::from_points_iter(sites.iter().copied());
        let merge_tolerance =
            constants::EPSILON * bounds.map_or(1.0, |b| b.max_extent().max(1.0));
        let mut face_to_vertex: HashMap<usize, usize> = HashMap::new();
        let mut vertices: Vec<Point2D> = Vec::with_capacity(triangulation.num_inner_faces());
        for face in triangulation.inner_faces() {
            let center = Point2D::from(face.circumcenter());
            let index = match vertices
                .iter()
                .position(|v| v.distance_to(center) <= merge_tolerance)
            {
                Some(existing) => existing,
                None => {
                    vertices.push(center);
                    vertices.len() - 1
                }
            };
            face_to_vertex.insert(face.fix().index(), index);
        }

        // Regionen: pro Triangulations-Vertex
        let mut regions = Vec::with_capacity(unique_sites);
        for vertex in triangulation.vertices() {
            let generator = Point2D::from(vertex.position());
            let mut is_open = false;
            let mut finite: Vec<usize> = Vec::new();

            for edge in vertex.out_edges() {
                match edge.face().as_inner() {
                    Some(inner) => {
                        if let Some(&v) = face_to_vertex.get(&inner.fix().index()) {
                            finite.push(v);
                        }
                    }
                    None => is_open = true,
                }
            }

            // CCW um den Generator sortieren
            finite.sort_by(|&a, &b| {
                let pa = vertices[a];
                let pb = vertices[b];
                let angle_a = (pa.y - generator.y).atan2(pa.x - generator.x);
                let angle_b = (pb.y - generator.y).atan2(pb.x - generator.x);
                angle_a.total_cmp(&angle_b)
            });
            finite.dedup();

            let mut region = Vec::with_capacity(finite.len() + 1);
            if is_open {
                region.push(VertexRef::AtInfinity);
            }
            region.extend(finite.into_iter().map(VertexRef::Finite));
            regions.push(region);
        }

        // Grate: pro Delaunay-Kante
        let mut ridge_points = Vec::with_capacity(triangulation.num_undirected_edges());
        let mut ridge_vertices = Vec::with_capacity(triangulation.num_undirected_edges());
        for edge in triangulation.undirected_edges() {
            let [a, b] = edge.vertices();
            let site_of = |index: usize| -> MathResult<usize> {
                vertex_to_site
                    .get(&index)
                    .copied()
                    .ok_or_else(|| MathError::MalformedDiagram {
                        reason: format!("triangulation vertex {} has no site", index),
                    })
            };
            let directed = edge.as_directed();
            let side = |face: Option<usize>| match face.and_then(|f| face_to_vertex.get(&f)) {
                Some(&v) => VertexRef::Finite(v),
                None => VertexRef::AtInfinity,
            };
            let left = side(directed.face().as_inner().map(|f| f.fix().index()));
            let right = side(directed.rev().face().as_inner().map(|f| f.fix().index()));

            // Kante zwischen zwei Dreiecken mit gemeinsamem Umkreismittelpunkt
            if left.is_finite() && left == right {
                continue;
            }

            ridge_points.push([site_of(a.fix().index())?, site_of(b.fix().index())?]);
            ridge_vertices.push([left, right]);
        }

        debug!(
            "VoronoiDiagram: {} sites in {:?} -> {} regions, {} vertices, {} ridges",
            sites.len(),
            bounds.map(|b| b.to_string()),
            regions.len(),
            vertices.len(),
            ridge_points.len()
        );

        Ok(Self {
            sites: sites.to_vec(),
            vertices,
            regions,
            site_regions,
            ridge_points,
            ridge_vertices,
        })
    }

    /// Region einer Site, falls der Index gültig ist
    pub fn region_of_site(&self, site: usize) -> Option<&[VertexRef]> {
        self.site_regions
            .get(site)
            .and_then(|&r| self.regions.get(r))
            .map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}
