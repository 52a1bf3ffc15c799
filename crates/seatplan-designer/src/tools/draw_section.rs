//! Section drawing tools: click-by-click polygons and drag-out boxes.

use crate::commands::Command;
use crate::geometry::{BoundingBox, Point};
use crate::input::{Key, PointerButton, ToolEvent};
use crate::model::{Section, SectionId};
use crate::overlay::{Cursor, EngineNotification, Overlay};

use super::{Tool, ToolContext, ToolId};

/// How a polygon draft ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    Explicit,
    AutoClosed,
    VertexCap,
}

/// Creates a section from a finished outline, selects it, and raises the
/// matching notification.
fn commit_section(ctx: &mut ToolContext<'_>, points: Vec<Point>, completion: Completion) -> Option<SectionId> {
    let id = ctx.store_mut().generate_id();
    let name = format!("Section {}", ctx.store().len() + 1);
    let section = Section::new(id, name, points);
    if !ctx.execute(Command::add_section(section)) {
        return None;
    }
    ctx.select_sections([id], false);
    match completion {
        Completion::AutoClosed => ctx.notify(EngineNotification::PolygonAutoClosed { section_id: id }),
        Completion::VertexCap => ctx.notify(EngineNotification::MaxVerticesReached { section_id: id }),
        Completion::Explicit => {}
    }
    Some(id)
}

/// Draws a polygonal section one vertex per click.
///
/// A click within the close radius of the first vertex, with at least three
/// vertices collected, closes the polygon without adding the click. Reaching
/// the vertex cap completes it on its own. Enter or a double click completes,
/// Backspace drops the last vertex, Escape discards the draft.
///
/// Completion needs at least three vertices that are not all collinear;
/// otherwise it is rejected and the draft is kept.
#[derive(Debug, Clone, Default)]
pub struct DrawSectionTool {
    vertices: Vec<Point>,
    hover: Option<Point>,
}

impl DrawSectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices collected so far.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Whether a click at `screen` would close the polygon.
    fn closes_at(&self, ctx: &ToolContext<'_>, screen: &Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        let first = ctx.world_to_screen(&self.vertices[0]);
        first.distance_to(screen) <= ctx.config().drawing.close_radius_px
    }

    /// Adds a vertex at `world`, snapped as configured.
    ///
    /// Returns the id of the section if this click closed or completed the
    /// polygon.
    pub fn add_point(&mut self, ctx: &mut ToolContext<'_>, world: Point) -> Option<SectionId> {
        ctx.mark_handled();
        let screen = ctx.world_to_screen(&world);
        if self.closes_at(ctx, &screen) {
            tracing::debug!("Draw section: closing polygon at first vertex");
            return self.finish(ctx, Completion::AutoClosed);
        }

        let max_vertices = ctx.config().drawing.max_vertices;
        if self.vertices.len() >= max_vertices {
            return self.finish(ctx, Completion::VertexCap);
        }

        let point = ctx.snap_point(&world, &self.vertices);
        if self.vertices.last() == Some(&point) {
            tracing::debug!("Draw section: ignored repeated vertex");
            self.show_preview(ctx);
            return None;
        }
        self.vertices.push(point);
        tracing::debug!(
            "Draw section: vertex {} at ({:.2}, {:.2})",
            self.vertices.len(),
            point.x,
            point.y
        );

        if self.vertices.len() >= max_vertices {
            tracing::debug!("Draw section: vertex cap of {} reached", max_vertices);
            return self.finish(ctx, Completion::VertexCap);
        }
        self.show_preview(ctx);
        None
    }

    /// Completes the polygon from the collected vertices.
    ///
    /// Returns `None` and keeps the draft if the outline is not a valid
    /// polygon.
    pub fn complete(&mut self, ctx: &mut ToolContext<'_>) -> Option<SectionId> {
        ctx.mark_handled();
        self.finish(ctx, Completion::Explicit)
    }

    fn finish(&mut self, ctx: &mut ToolContext<'_>, completion: Completion) -> Option<SectionId> {
        let epsilon = ctx.config().drawing.collinear_epsilon;
        let outline = match Section::validate_outline(&self.vertices, epsilon) {
            Ok(outline) => outline,
            Err(err) => {
                tracing::debug!("Draw section: rejected {} vertices: {}", self.vertices.len(), err);
                self.show_preview(ctx);
                return None;
            }
        };

        let draft = std::mem::take(&mut self.vertices);
        self.hover = None;
        ctx.set_overlay(None);
        let id = commit_section(ctx, outline, completion);
        if id.is_none() {
            self.vertices = draft;
            self.show_preview(ctx);
        }
        id
    }

    /// Drops the last vertex.
    pub fn remove_last_point(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let removed = self.vertices.pop().is_some();
        if removed {
            self.show_preview(ctx);
            ctx.mark_handled();
        }
        removed
    }

    fn show_preview(&self, ctx: &mut ToolContext<'_>) {
        if self.vertices.is_empty() {
            ctx.set_overlay(None);
            return;
        }
        let cursor = self
            .hover
            .or_else(|| self.vertices.last().copied())
            .unwrap_or_default();
        let can_close = self.closes_at(ctx, &ctx.world_to_screen(&cursor));
        ctx.set_overlay(Some(Overlay::SectionPreview {
            points: self.vertices.clone(),
            cursor,
            can_close,
        }));
    }
}

impl Tool for DrawSectionTool {
    fn id(&self) -> ToolId {
        ToolId::DrawSection
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if self.closes_at(ctx, &event.screen) {
            self.hover = self.vertices.first().copied();
        } else {
            self.hover = Some(ctx.snap_point(&event.world, &self.vertices));
        }
        if !self.vertices.is_empty() {
            self.show_preview(ctx);
            ctx.mark_handled();
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.is_drag || event.button != Some(PointerButton::Primary) {
            return;
        }
        self.add_point(ctx, event.world);
    }

    fn on_double_click(&mut self, ctx: &mut ToolContext<'_>, _event: &ToolEvent) {
        // The second click of the pair was dropped as a repeated vertex.
        self.complete(ctx);
    }

    fn on_key_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        match event.key {
            Some(Key::Escape) => {
                if self.cancel(ctx) {
                    ctx.mark_handled();
                }
            }
            Some(Key::Enter) => {
                self.complete(ctx);
            }
            Some(Key::Backspace) => {
                self.remove_last_point(ctx);
            }
            _ => {}
        }
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        self.hover = None;
        if self.vertices.is_empty() {
            return false;
        }
        tracing::debug!("Draw section: discarded {} vertices", self.vertices.len());
        self.vertices.clear();
        ctx.set_overlay(None);
        true
    }

    fn is_busy(&self) -> bool {
        !self.vertices.is_empty()
    }
}

/// Draws a rectangular section by dragging from corner to corner.
///
/// Boxes narrower or shorter than the configured minimum are dropped.
#[derive(Debug, Clone, Default)]
pub struct DrawBoxTool {
    start: Option<Point>,
}

impl DrawBoxTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn bounds(&self, ctx: &ToolContext<'_>, world: &Point) -> Option<BoundingBox> {
        let start = self.start?;
        Some(BoundingBox::from_corners(start, ctx.snap_to_grid(world)))
    }
}

impl Tool for DrawBoxTool {
    fn id(&self) -> ToolId {
        ToolId::DrawSectionBox
    }

    fn cursor(&self) -> Cursor {
        Cursor::Crosshair
    }

    fn on_pointer_down(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if event.button == Some(PointerButton::Primary) {
            self.start = Some(ctx.snap_to_grid(&event.world));
            ctx.mark_handled();
        }
    }

    fn on_pointer_move(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        if !event.is_drag {
            return;
        }
        if let Some(bounds) = self.bounds(ctx, &event.world) {
            ctx.set_overlay(Some(Overlay::BoxPreview { bounds }));
            ctx.mark_handled();
        }
    }

    fn on_pointer_up(&mut self, ctx: &mut ToolContext<'_>, event: &ToolEvent) {
        let bounds = self.bounds(ctx, &event.world);
        self.start = None;
        ctx.set_overlay(None);
        let Some(bounds) = bounds else {
            return;
        };
        ctx.mark_handled();
        if !event.is_drag {
            return;
        }

        let min_size = ctx.config().drawing.min_box_size;
        if bounds.width() < min_size || bounds.height() < min_size {
            tracing::debug!(
                "Draw box: rejected {:.2} x {:.2} (minimum {:.2})",
                bounds.width(),
                bounds.height(),
                min_size
            );
            return;
        }
        commit_section(ctx, bounds.corners().to_vec(), Completion::Explicit);
    }

    fn cancel(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        if self.start.take().is_some() {
            ctx.set_overlay(None);
            true
        } else {
            false
        }
    }

    fn is_busy(&self) -> bool {
        self.start.is_some()
    }
}
