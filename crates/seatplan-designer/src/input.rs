//! Input model: host events, modifier keys, and the canonical tool event.
//!
//! The host hands raw [`HostEvent`]s to the engine. The dispatcher converts
//! each one exactly once into a [`ToolEvent`] carrying screen, world and
//! viewport coordinates, the modifier flags and the drag classification, and
//! forwards that to the active tool.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::viewport::ViewportState;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    /// Left mouse button, pen or single-finger touch.
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key, named as browsers report `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Escape,
    Enter,
    Delete,
    Backspace,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Char(char),
    Other(String),
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "Enter" | "Return" => Key::Enter,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            " " | "Space" | "Spacebar" => Key::Space,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }

    /// True for the given letter regardless of case.
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// A raw event as delivered by the host, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    PointerUp {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },
    DoubleClick {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    Wheel {
        x: f64,
        y: f64,
        delta_x: f64,
        delta_y: f64,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },
    /// Any event type the engine does not handle; always a no-op.
    Unsupported {
        kind: String,
    },
}

impl HostEvent {
    /// Primary-button press without modifiers.
    pub fn down(x: f64, y: f64) -> Self {
        HostEvent::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    /// Pointer move without modifiers.
    pub fn moved(x: f64, y: f64) -> Self {
        HostEvent::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button release without modifiers.
    pub fn up(x: f64, y: f64) -> Self {
        HostEvent::PointerUp {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    /// Key press by browser key name.
    pub fn key(name: &str) -> Self {
        HostEvent::KeyDown {
            key: Key::from_name(name),
            modifiers: Modifiers::NONE,
        }
    }

    /// Key press by browser key name with modifiers.
    pub fn key_with(name: &str, modifiers: Modifiers) -> Self {
        HostEvent::KeyDown {
            key: Key::from_name(name),
            modifiers,
        }
    }

    /// Primary-button press with modifiers.
    pub fn down_with(x: f64, y: f64, modifiers: Modifiers) -> Self {
        HostEvent::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers,
        }
    }

    /// Primary-button release with modifiers.
    pub fn up_with(x: f64, y: f64, modifiers: Modifiers) -> Self {
        HostEvent::PointerUp {
            x,
            y,
            button: PointerButton::Primary,
            modifiers,
        }
    }

    /// Vertical wheel scroll; negative `delta_y` zooms in.
    pub fn wheel(x: f64, y: f64, delta_y: f64) -> Self {
        HostEvent::Wheel {
            x,
            y,
            delta_x: 0.0,
            delta_y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        HostEvent::DoubleClick {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_up(name: &str) -> Self {
        HostEvent::KeyUp {
            key: Key::from_name(name),
            modifiers: Modifiers::NONE,
        }
    }

    /// Screen position for pointer events.
    pub fn screen_position(&self) -> Option<Point> {
        match self {
            HostEvent::PointerDown { x, y, .. }
            | HostEvent::PointerMove { x, y, .. }
            | HostEvent::PointerUp { x, y, .. }
            | HostEvent::DoubleClick { x, y, .. }
            | HostEvent::Wheel { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

/// Which handler of the active tool an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEventKind {
    PointerDown,
    PointerMove,
    PointerUp,
    DoubleClick,
    Wheel,
    KeyDown,
    KeyUp,
}

/// The canonical event forwarded to tools.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolEvent {
    pub kind: ToolEventKind,
    /// Pointer position in screen pixels. Key events carry the last known
    /// pointer position.
    pub screen: Point,
    /// Pointer position in world units.
    pub world: Point,
    pub viewport: ViewportState,
    pub modifiers: Modifiers,
    pub button: Option<PointerButton>,
    pub key: Option<Key>,
    /// Wheel delta in pixels (positive y scrolls down).
    pub wheel_delta: Point,
    /// Whether a button is held down.
    pub pressed: bool,
    /// Whether the current press has moved past the drag threshold.
    pub is_drag: bool,
    /// Screen position of the current press, if any.
    pub press_screen: Option<Point>,
    /// World position of the current press, if any.
    pub press_world: Option<Point>,
}

impl ToolEvent {
    pub fn is_key(&self, key: &Key) -> bool {
        self.key.as_ref() == Some(key)
    }
}

/// Buffers the press point and classifies a gesture as a drag once the
/// pointer has moved past a screen-space threshold.
///
/// The threshold is measured in screen pixels so it feels the same at every
/// zoom level. Once a press becomes a drag it stays one until release.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    press_screen: Option<Point>,
    press_world: Option<Point>,
    button: Option<PointerButton>,
    dragging: bool,
}

impl DragTracker {
    pub fn press(&mut self, screen: Point, world: Point, button: PointerButton) {
        self.press_screen = Some(screen);
        self.press_world = Some(world);
        self.button = Some(button);
        self.dragging = false;
    }

    /// Feeds a pointer position; returns whether the press is now a drag.
    pub fn update(&mut self, screen: Point, threshold_px: f64) -> bool {
        if let Some(start) = self.press_screen {
            if !self.dragging && start.distance_to(&screen) > threshold_px {
                self.dragging = true;
            }
        }
        self.dragging
    }

    /// Ends the press.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn is_pressed(&self) -> bool {
        self.press_screen.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn press_screen(&self) -> Option<Point> {
        self.press_screen
    }

    pub fn press_world(&self) -> Option<Point> {
        self.press_world
    }

    pub fn button(&self) -> Option<PointerButton> {
        self.button
    }
}
