use crate::foundation::core::{Point, Rect};

/// Pointer events the controller reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// Pointer entered the container.
    Enter,
    /// Pointer left the container.
    Leave,
    /// Click or tap inside the container.
    Click,
}

/// A pointer event in client (viewport) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Pointer position in client coordinates.
    pub client: Point,
}

impl PointerEvent {
    /// Build an event.
    pub fn new(kind: PointerKind, client: Point) -> Self {
        Self { kind, client }
    }

    /// Position relative to the container's client-space `bounds`.
    pub fn local(&self, bounds: Rect) -> Point {
        Point::new(self.client.x - bounds.x0, self.client.y - bounds.y0)
    }
}
