use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::animation::ease::{Ease, OpacityTween};
use crate::foundation::core::{Rect, Rgba8, Size};
use crate::foundation::error::RippleResult;
use crate::render::backend::{CellRenderer, OPACITY_EPSILON, RenderFrame};

/// One styled element standing in for a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelNode {
    /// Grid slot of the cell this node mirrors.
    pub slot: u32,
    /// Placement in logical units.
    pub rect: Rect,
    /// Opacity as of the last render.
    pub opacity: f32,
    /// Whether the node is displayed at all.
    pub visible: bool,
    tween: OpacityTween,
}

impl PixelNode {
    /// Inline style declaration for this node.
    pub fn style(&self, fill: Rgba8) -> String {
        let mut s = String::with_capacity(96);
        let _ = write!(
            s,
            "left:{}px;top:{}px;width:{}px;height:{}px;background:{};opacity:{:.3}",
            self.rect.x0,
            self.rect.y0,
            self.rect.width(),
            self.rect.height(),
            fill.to_hex(),
            self.opacity,
        );
        if !self.visible {
            s.push_str(";display:none");
        }
        s
    }

    /// Whether the node is still tweening at `now_ms`.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        !self.tween.is_settled(now_ms)
    }
}

/// Paints cells as individually styled nodes whose opacity eases toward the animator's value.
#[derive(Clone, Debug)]
pub struct NodeRenderer {
    nodes: BTreeMap<u32, PixelNode>,
    fill: Rgba8,
    logical: Size,
    tween_ms: f64,
    ease: Ease,
}

impl NodeRenderer {
    /// A renderer whose opacity tweens last `tween_ms` with `ease`.
    pub fn new(tween_ms: f64, ease: Ease) -> Self {
        Self {
            nodes: BTreeMap::new(),
            fill: Rgba8::WHITE,
            logical: Size::ZERO,
            tween_ms: tween_ms.max(0.0),
            ease,
        }
    }

    /// Mounted nodes in slot order.
    pub fn nodes(&self) -> impl Iterator<Item = &PixelNode> {
        self.nodes.values()
    }

    /// Node for a grid slot.
    pub fn node(&self, slot: u32) -> Option<&PixelNode> {
        self.nodes.get(&slot)
    }

    /// Fill color of the last render.
    pub fn fill(&self) -> Rgba8 {
        self.fill
    }

    /// Logical size of the container.
    pub fn logical_size(&self) -> Size {
        self.logical
    }

    /// Whether any node is mid-tween at `now_ms`.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.nodes.values().any(|n| n.is_animating(now_ms))
    }

    /// Advance running tweens to `now_ms` without new targets.
    ///
    /// The controller stops requesting frames once a sweep completes; hosts keep calling this
    /// while [`NodeRenderer::is_animating`] holds so the last fade-out settles.
    pub fn advance(&mut self, now_ms: f64) {
        for node in self.nodes.values_mut() {
            node.opacity = node.tween.sample(now_ms);
            node.visible = node.opacity > OPACITY_EPSILON;
        }
    }

    fn remount(&mut self, frame: &RenderFrame<'_>) {
        self.nodes = frame
            .cells
            .iter()
            .map(|c| {
                (
                    c.slot,
                    PixelNode {
                        slot: c.slot,
                        rect: c.snapped_rect(),
                        opacity: c.opacity,
                        visible: c.opacity > OPACITY_EPSILON,
                        tween: OpacityTween::settled(c.opacity),
                    },
                )
            })
            .collect();
        tracing::trace!(nodes = self.nodes.len(), "mounted pixel nodes");
    }
}

impl Default for NodeRenderer {
    fn default() -> Self {
        Self::new(80.0, Ease::default())
    }
}

impl CellRenderer for NodeRenderer {
    fn resize(&mut self, logical: Size, _device_pixel_ratio: f64) -> RippleResult<()> {
        self.logical = logical;
        self.nodes.clear();
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame<'_>) -> RippleResult<()> {
        self.fill = frame.fill;
        let same_set = self.nodes.len() == frame.cells.len()
            && frame.cells.iter().all(|c| self.nodes.contains_key(&c.slot));
        if !same_set {
            self.remount(frame);
            return Ok(());
        }

        for cell in frame.cells {
            let Some(node) = self.nodes.get_mut(&cell.slot) else {
                continue;
            };
            node.rect = cell.snapped_rect();
            if node.tween.target() != cell.opacity {
                node.tween
                    .retarget(cell.opacity, frame.now_ms, self.tween_ms, self.ease);
            }
            node.opacity = node.tween.sample(frame.now_ms);
            node.visible = node.opacity > OPACITY_EPSILON;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/nodes.rs"]
mod tests;
