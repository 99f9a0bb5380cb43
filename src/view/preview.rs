//! Text preview of a laid out day column.
//!
//! The column is drawn into a ratatui [`Buffer`]: slot group labels in a left gutter, each
//! event as a bordered box placed by its style percentages. Events are painted in render
//! order, so later events cover earlier ones the way the cascade intends.

use crate::layout::{EventStyle, StyledEvent};
use crate::model::CalendarEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Clear, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Width of the label gutter: `HH:MM` plus one space.
pub const GUTTER_WIDTH: u16 = 6;

/// Widget rendering one column of styled events.
#[derive(Debug, Clone, Copy)]
pub struct ColumnPreview<'a> {
    events: &'a [StyledEvent<'a, CalendarEvent>],
    labels: &'a [String],
}

impl<'a> ColumnPreview<'a> {
    /// Preview `events` (in render order) with one label per slot group.
    pub fn new(events: &'a [StyledEvent<'a, CalendarEvent>], labels: &'a [String]) -> Self {
        Self { events, labels }
    }
}

impl Widget for ColumnPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= GUTTER_WIDTH || area.height == 0 {
            return;
        }

        let grid = Rect::new(
            area.x + GUTTER_WIDTH,
            area.y,
            area.width - GUTTER_WIDTH,
            area.height,
        );

        let label_style = Style::default().fg(Color::DarkGray);
        let groups = self.labels.len();
        for (group, label) in self.labels.iter().enumerate() {
            let row = group * usize::from(grid.height) / groups;
            if let Ok(row) = u16::try_from(row) {
                buf.set_stringn(
                    area.x,
                    area.y + row,
                    label,
                    usize::from(GUTTER_WIDTH - 1),
                    label_style,
                );
            }
        }

        let event_style = Style::default().fg(Color::Cyan);
        for styled in self.events {
            if let Some(rect) = event_rect(grid, &styled.style) {
                draw_event(rect, &styled.event.title, event_style, buf);
            }
        }
    }
}

/// Scale a percentage onto `extent` cells, clamped to `[0, extent]`.
fn scale(percent: f64, extent: u16) -> u16 {
    let cells = (percent / 100.0 * f64::from(extent)).round();
    if cells.is_nan() || cells <= 0.0 {
        0
    } else if cells >= f64::from(extent) {
        extent
    } else {
        cells as u16
    }
}

/// Cell rectangle for `style` inside `grid`; at least one row tall.
fn event_rect(grid: Rect, style: &EventStyle) -> Option<Rect> {
    let top = scale(style.top, grid.height);
    if top >= grid.height {
        return None;
    }
    let bottom = scale(style.top + style.height, grid.height)
        .max(top + 1)
        .min(grid.height);

    let left = scale(style.x_offset, grid.width);
    let right = scale(style.x_offset + style.width, grid.width);
    if right <= left {
        return None;
    }

    Some(Rect::new(
        grid.x + left,
        grid.y + top,
        right - left,
        bottom - top,
    ))
}

fn draw_event(rect: Rect, title: &str, style: Style, buf: &mut Buffer) {
    Clear.render(rect, buf);

    if rect.height >= 2 && rect.width >= 3 {
        let title = truncate_to_width(title, usize::from(rect.width - 2));
        Block::bordered()
            .border_style(style)
            .title(title)
            .render(rect, buf);
    } else {
        let title = truncate_to_width(title, usize::from(rect.width));
        buf.set_stringn(rect.x, rect.y, title, usize::from(rect.width), style);
    }
}

/// Longest prefix of `text` that fits in `max_width` terminal cells.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}

/// Convert a buffer to text, one line per row with trailing blanks removed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::with_capacity(usize::from(area.height));

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Render `events` into a `width` x `height` preview and return it as text.
pub fn render_preview(
    events: &[StyledEvent<'_, CalendarEvent>],
    labels: &[String],
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    ColumnPreview::new(events, labels).render(area, &mut buffer);
    buffer_to_string(&buffer)
}
