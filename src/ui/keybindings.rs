use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hint text for a UI mode
fn hints(mode: UiMode) -> Vec<&'static str> {
    match mode {
        UiMode::Normal => vec![
            " ↑/↓ select   ",
            "Enter/Space done   ",
            "a add   ",
            "d delete   ",
            "1/2/3 all/active/completed   ",
            "f next filter   ",
            "q quit",
        ],
        UiMode::AddingTask => vec![
            " Tab switch field   ",
            "Enter add   ",
            "Esc cancel",
        ],
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let line = Line::from(hints(mode).into_iter().map(Span::raw).collect::<Vec<_>>());
    let paragraph = Paragraph::new(line).style(hint_style());
    f.render_widget(paragraph, area);
}
