//! Alignment of selected sections.

use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;
use crate::model::{SectionId, VenueStore};

/// Edge or center line that sections are aligned to.
///
/// World space is y-down, so `Top` is the smallest y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    CenterHorizontal,
    Right,
    Top,
    CenterVertical,
    Bottom,
}

impl Alignment {
    pub fn label(&self) -> &'static str {
        match self {
            Alignment::Left => "Align left",
            Alignment::CenterHorizontal => "Align horizontal centers",
            Alignment::Right => "Align right",
            Alignment::Top => "Align top",
            Alignment::CenterVertical => "Align vertical centers",
            Alignment::Bottom => "Align bottom",
        }
    }
}

/// Calculates the deltas `(id, dx, dy)` that align each of `sections`.
///
/// Sections that are missing, have no outline, or are already aligned are
/// left out.
pub fn alignment_deltas(store: &VenueStore, sections: &[SectionId], alignment: Alignment) -> Vec<(SectionId, f64, f64)> {
    let boxes: Vec<(SectionId, BoundingBox)> = sections
        .iter()
        .filter_map(|id| store.section(*id))
        .filter_map(|s| s.bounds().map(|b| (s.id, b)))
        .collect();
    let Some(total) = boxes
        .iter()
        .map(|(_, b)| *b)
        .reduce(|acc, b| acc.union(&b))
    else {
        return Vec::new();
    };

    let target = match alignment {
        Alignment::Left => total.min_x,
        Alignment::Right => total.max_x,
        Alignment::CenterHorizontal => total.center().x,
        Alignment::Top => total.min_y,
        Alignment::Bottom => total.max_y,
        Alignment::CenterVertical => total.center().y,
    };

    boxes
        .into_iter()
        .filter_map(|(id, b)| {
            let (dx, dy) = match alignment {
                Alignment::Left => (target - b.min_x, 0.0),
                Alignment::Right => (target - b.max_x, 0.0),
                Alignment::CenterHorizontal => (target - b.center().x, 0.0),
                Alignment::Top => (0.0, target - b.min_y),
                Alignment::Bottom => (0.0, target - b.max_y),
                Alignment::CenterVertical => (0.0, target - b.center().y),
            };
            (dx.abs() > f64::EPSILON || dy.abs() > f64::EPSILON).then_some((id, dx, dy))
        })
        .collect()
}
