//! Rendering for the allocation form.
//!
//! Pure presentation: values and bounds always come from the engine, and
//! the focused field shows the direct-entry buffer while one is pending.

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use roomalloc_app::App;
use roomalloc_core::GuestCategory;

use crate::input::EntryState;

/// Draw the whole widget into the frame.
pub fn draw(frame: &mut Frame, app: &App, entry: &EntryState) {
    let set = app.allocations();
    let mut lines = Vec::new();

    lines.push(Line::from(format!(
        "Guests: {} / Rooms: {}",
        set.total_guests(),
        set.room_count()
    )));
    lines.push(Line::from(format!("Unallocated: {}", set.unallocated())));
    lines.push(Line::default());

    for (index, room) in set.rooms().iter().enumerate() {
        lines.push(Line::from(format!("Room {}: {} guests", index + 1, room.occupants())));
        lines.push(field_line(app, entry, index, GuestCategory::Adult));
        lines.push(field_line(app, entry, index, GuestCategory::Child));
        lines.push(Line::default());
    }

    lines.push(Line::from("Tab/Up/Down focus  +/- step  digits+Enter set  q quit"));

    let block = Block::default().borders(Borders::ALL).title(" roomalloc ");
    frame.render_widget(Paragraph::new(lines).block(block), frame.area());
}

fn field_line(
    app: &App,
    entry: &EntryState,
    room_index: usize,
    category: GuestCategory,
) -> Line<'static> {
    let set = app.allocations();
    let room = &set.rooms()[room_index];
    let value = room.value_of(category);
    let focused = app.cursor().is_focused(room_index, category);

    let label = match category {
        GuestCategory::Adult => "Adults   (age 20+)",
        GuestCategory::Child => "Children",
    };
    let shown = match entry.pending() {
        Some(pending) if focused => pending.to_string(),
        _ => value.to_string(),
    };
    let bound = set.compute_bound(room_index, category).unwrap_or(value);

    let value_style = if focused {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("  {label:<20} ")),
        Span::styled(format!("[ {shown:>2} ]"), value_style),
        Span::raw(format!("  ({}-{bound})", category.minimum())),
    ])
}
