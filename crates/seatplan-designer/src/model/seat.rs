use serde::{Deserialize, Serialize};

use super::{GroupId, SeatId, SectionId};
use crate::geometry::Point;

/// Sale status of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    #[default]
    Available,
    Reserved,
    Sold,
    Blocked,
}

/// Physical type of a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    #[default]
    Standard,
    Accessible,
    Companion,
    Vip,
}

/// A seat, owned by exactly one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub x: f64,
    pub y: f64,
    pub row: String,
    pub number: u32,
    pub status: SeatStatus,
    pub kind: SeatKind,
    /// Rotation in degrees.
    pub angle: f64,
    pub section_id: SectionId,
    pub group_id: Option<GroupId>,
    pub category_id: Option<String>,
}

impl Seat {
    /// Creates an available standard seat.
    pub fn new(id: SeatId, section_id: SectionId, position: Point, row: impl Into<String>, number: u32) -> Self {
        Self {
            id,
            x: position.x,
            y: position.y,
            row: row.into(),
            number,
            status: SeatStatus::Available,
            kind: SeatKind::Standard,
            angle: 0.0,
            section_id,
            group_id: None,
            category_id: None,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }

    /// Human readable label such as `"B12"`.
    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }

    pub fn attributes(&self) -> SeatAttributes {
        SeatAttributes {
            row: self.row.clone(),
            number: self.number,
            status: self.status,
            kind: self.kind,
            category_id: self.category_id.clone(),
        }
    }

    pub fn apply_attributes(&mut self, attrs: &SeatAttributes) {
        self.row = attrs.row.clone();
        self.number = attrs.number;
        self.status = attrs.status;
        self.kind = attrs.kind;
        self.category_id = attrs.category_id.clone();
    }
}

/// The editable, non-geometric attributes of a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatAttributes {
    pub row: String,
    pub number: u32,
    pub status: SeatStatus,
    pub kind: SeatKind,
    pub category_id: Option<String>,
}

/// Label of the row after `label`.
///
/// Alphabetic labels count like spreadsheet columns (`A`, `B`, ..., `Z`, `AA`),
/// numeric labels increment, anything else gets a `'` suffix.
pub fn next_row_label(label: &str) -> String {
    if label.is_empty() {
        return "A".to_string();
    }
    if let Ok(n) = label.parse::<u64>() {
        return (n + 1).to_string();
    }
    if !label.chars().all(|c| c.is_ascii_alphabetic()) {
        return format!("{label}'");
    }

    let lower = label.chars().all(|c| c.is_ascii_lowercase());
    let (base, last) = if lower { (b'a', b'z') } else { (b'A', b'Z') };
    let mut bytes: Vec<u8> = label.bytes().collect();
    if !lower {
        bytes.iter_mut().for_each(|b| *b = b.to_ascii_uppercase());
    }

    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, base);
            break;
        }
        i -= 1;
        if bytes[i] == last {
            bytes[i] = base;
        } else {
            bytes[i] += 1;
            break;
        }
    }
    String::from_utf8(bytes).unwrap_or_else(|_| format!("{label}'"))
}
