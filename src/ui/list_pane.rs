use crate::app::AppState;
use crate::domain::{checkbox, Filter, TaskView};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{
    border_style, default_style, done_style, due_style, hint_style, selected_style, title_style,
    urgency_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let rows = app.list.presenter();
    let filter = rows.filter();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(pane_title(filter, rows.len()), title_style()));

    if rows.is_empty() {
        let message = Line::styled(empty_message(filter), hint_style());
        f.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let items: Vec<ListItem> = rows
        .views()
        .iter()
        .enumerate()
        .map(|(idx, view)| {
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_task_line(view)).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn pane_title(filter: Filter, count: usize) -> String {
    format!(" Tasks ⏳ [{}] ({}) ", filter.to_tag(), count)
}

fn empty_message(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "No tasks yet. Press 'a' to add one.",
        Filter::Active => "Nothing left to do.",
        Filter::Completed => "No completed tasks.",
    }
}

/// Create a single line for a task
/// Format: [ ] Buy milk   Mon, Oct 19, 03:45 PM   Time left: 59m 58s
fn create_task_line(view: &TaskView) -> Line<'static> {
    let text_style = if view.completed {
        done_style()
    } else {
        default_style()
    };

    Line::from(vec![
        Span::raw(format!("{} ", checkbox(view.completed))),
        Span::styled(view.text.clone(), text_style),
        Span::raw("   "),
        Span::styled(view.due_display.clone(), due_style()),
        Span::raw("   "),
        Span::styled(view.countdown_label(), urgency_style(view.urgency)),
    ])
}
