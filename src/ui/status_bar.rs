use crate::domain::Filter;
use crate::ui::styles::{active_tab_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Build the status line: filter tabs followed by the latest message
fn status_line(filter: Filter, status: Option<&str>) -> Line<'static> {
    let mut spans = Vec::new();
    for tab in Filter::all() {
        let label = format!(" {} ", tab.to_tag());
        if *tab == filter {
            spans.push(Span::styled(label, active_tab_style()));
        } else {
            spans.push(Span::styled(label, hint_style()));
        }
    }

    if let Some(message) = status {
        spans.push(Span::raw("  "));
        spans.push(Span::raw(message.to_string()));
    }

    Line::from(spans)
}

/// Render the status bar
pub fn render_status_bar(f: &mut Frame, filter: Filter, status: Option<&str>, area: Rect) {
    f.render_widget(Paragraph::new(status_line(filter, status)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_highlights_filter() {
        let line = status_line(Filter::Active, Some("Task added"));
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.spans[1].style, active_tab_style());
        assert_eq!(line.spans[0].style, hint_style());
        assert_eq!(line.spans[4].content, "Task added");
    }
}
