//! The scroll adjustment itself.
//!
//! Best-effort by contract: every failure path is a silent no-op
//! reported through [`Adjustment`], never an error. The operation reads
//! one geometry snapshot and performs at most one scroll write.

use tracing::debug;

use crate::geometry::Rect;
use crate::nav::{NavNode, NavTree};

/// Outcome of one adjustment attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// No link is marked active
    NoActiveLink,
    /// The active link has no scrollable ancestor
    NoContainer,
    /// The link is already fully visible, nothing written
    AlreadyVisible,
    /// The container offset was rewritten
    Scrolled { from: u16, to: u16 },
}

/// Scroll the active link's container so the link sits `top_bias` of a
/// viewport below the top edge. Instant write, no animation.
pub fn adjust_scroll_to_active(tree: &mut NavTree, top_bias: f64) -> Adjustment {
    let Some(active) = tree.active_path() else {
        debug!("no active link, skipping scroll adjustment");
        return Adjustment::NoActiveLink;
    };
    let link_height = match tree.node_at(&active) {
        Some(NavNode::Link(link)) => link.height,
        _ => return Adjustment::NoActiveLink,
    };

    let Some(container_path) = tree.container_path(&active) else {
        debug!("active link has no scroll container, skipping");
        return Adjustment::NoContainer;
    };
    let Some(container) = tree.section_at(&container_path) else {
        return Adjustment::NoContainer;
    };
    let Some(state) = container.scroll else {
        return Adjustment::NoContainer;
    };
    let Some(offset_top) = tree.offset_within(&container_path, &active) else {
        return Adjustment::NoContainer;
    };
    let content_height = container.content_height();

    // Geometry snapshot in viewport coordinates, container top at 0
    let container_rect = Rect::from_top_height(0, state.viewport_height);
    let link_rect =
        Rect::from_top_height(offset_top as i32 - state.offset as i32, link_height);

    // Already fully visible: don't write, prevents jitter on repeat
    // invocations
    if container_rect.contains(&link_rect) {
        return Adjustment::AlreadyVisible;
    }

    // Bias the link toward the upper portion of the viewport rather
    // than flush to the top
    let bias = (state.viewport_height as f64 * top_bias).round() as i32;
    let max_scroll = state.max_scroll(content_height);
    let target = (offset_top as i32 - bias).clamp(0, max_scroll as i32) as u16;

    let from = state.offset;
    if let Some(section) = tree.section_at_mut(&container_path) {
        if let Some(state) = section.scroll.as_mut() {
            state.offset = target;
        }
    }
    debug!(from, to = target, "scrolled active link into view");
    Adjustment::Scrolled { from, to: target }
}
