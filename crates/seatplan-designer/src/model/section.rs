use serde::{Deserialize, Serialize};

use super::{Seat, SectionId};
use crate::geometry::{self, BoundingBox, Point};
use seatplan_core::ModelError;

/// A polygonal region of the venue that owns a set of seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub points: Vec<Point>,
    pub color: String,
    pub opacity: f64,
    pub seats: Vec<Seat>,
}

impl Section {
    pub const DEFAULT_COLOR: &'static str = "#4a90d9";
    pub const DEFAULT_OPACITY: f64 = 0.35;

    /// Creates an empty section with the default look.
    pub fn new(id: SectionId, name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            id,
            name: name.into(),
            points,
            color: Self::DEFAULT_COLOR.to_string(),
            opacity: Self::DEFAULT_OPACITY,
            seats: Vec::new(),
        }
    }

    /// Checks a drawn outline and returns it with repeated consecutive
    /// vertices removed.
    ///
    /// The outline needs at least three distinct vertices that do not all lie
    /// on one line (within `epsilon`).
    pub fn validate_outline(points: &[Point], epsilon: f64) -> Result<Vec<Point>, ModelError> {
        let outline = geometry::dedup_consecutive(points);
        if outline.len() < 3 {
            return Err(ModelError::InvalidGeometry(format!(
                "outline needs at least 3 distinct vertices, got {}",
                outline.len()
            )));
        }
        if geometry::is_collinear(&outline, epsilon) {
            return Err(ModelError::InvalidGeometry(
                "outline vertices are collinear".to_string(),
            ));
        }
        Ok(outline)
    }

    /// Bounding box of the outline; `None` for an empty outline.
    pub fn bounds(&self) -> Option<BoundingBox> {
        geometry::bounding_box(&self.points)
    }

    /// Ray-casting containment test against the outline.
    pub fn contains_point(&self, p: &Point) -> bool {
        geometry::point_in_polygon(p, &self.points)
    }

    pub fn seat(&self, id: u64) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub fn properties(&self) -> SectionProperties {
        SectionProperties {
            name: self.name.clone(),
            color: self.color.clone(),
            opacity: self.opacity,
        }
    }

    pub fn apply_properties(&mut self, props: &SectionProperties) {
        self.name = props.name.clone();
        self.color = props.color.clone();
        self.opacity = props.opacity.clamp(0.0, 1.0);
    }
}

/// The editable, non-geometric properties of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    pub name: String,
    pub color: String,
    pub opacity: f64,
}
