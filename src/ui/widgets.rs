//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a list that keeps the highlighted option card visible.
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Shift `area` sideways by `offset` cells, clamped to `bounds`.
pub fn shifted(area: Rect, offset: i16, bounds: Rect) -> Rect {
    let max_x = bounds.x + bounds.width.saturating_sub(area.width);
    let x = (i32::from(area.x) + i32::from(offset)).clamp(i32::from(bounds.x), i32::from(max_x));
    Rect {
        x: x as u16,
        ..area
    }
}
