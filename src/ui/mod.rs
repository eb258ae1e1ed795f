pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod status_bar;
pub mod styles;

use crate::app::AppState;
use crate::persistence::KeyValueStore;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;
use status_bar::render_status_bar;

/// Main render function - draws the entire UI
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_list_pane(f, app, layout.list_area);
    render_status_bar(f, app.list.filter(), app.status.as_deref(), layout.status_area);

    // Render input form if active
    if let Some(form) = &app.input_form {
        render_input_form(f, form, size);
    }
}
