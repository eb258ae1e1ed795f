use crate::app::{FormField, InputFormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add-task form
pub fn render_input_form(f: &mut Frame, form: &InputFormState, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    let editing = form.editing_field;
    push_field(&mut lines, "Task:", &form.text, editing == FormField::Text);
    push_field(&mut lines, "Due (YYYY-MM-DDTHH:MM):", &form.due, editing == FormField::Due);

    match &form.error {
        Some(error) => lines.push(Line::styled(error.clone(), error_style())),
        None => lines.push(Line::raw("")),
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("Tab to switch fields  ·  Enter to add  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn push_field(lines: &mut Vec<Line<'static>>, label: &str, value: &str, editing: bool) {
    let label = if editing {
        format!("{} (editing)", label)
    } else {
        label.to_string()
    };
    lines.push(Line::raw(label));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_field_marks_editing() {
        let mut lines = Vec::new();
        push_field(&mut lines, "Task:", "Buy milk", true);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[0].content, "Task: (editing)");
        assert_eq!(lines[1].spans[1].content, "Buy milk");
        assert_eq!(lines[1].spans[2].content, "█");

        let mut lines = Vec::new();
        push_field(&mut lines, "Task:", "", false);
        assert_eq!(lines[0].spans[0].content, "Task:");
        assert_eq!(lines[1].spans[2].content, "");
    }
}
