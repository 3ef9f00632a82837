use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CommandPalette, ControlCenter, FilePicker, Header, MessageList, MessageListState, Sidebar,
    ToastStack, WelcomeBanner,
};
use crate::tui::palette::Palette;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Block;

/// Split the screen into header, timeline and composer.
pub fn screen_layout(area: Rect, input_height: u16) -> [Rect; 3] {
    use Constraint::{Length, Min};
    Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(area)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let palette = Palette::for_theme(app.theme);
    let screen = frame.area();
    frame.render_widget(Block::default().style(palette.base()), screen);

    let input_height = tui.input_box.calculate_height(screen.width);
    let [header_area, main_area, input_area] = screen_layout(screen, input_height);

    Header::new(&app.assistant_name, app.theme, app.is_waiting(), &palette)
        .render(frame, header_area);

    if app.messages.is_empty() {
        WelcomeBanner::new(&app.assistant_name, &tui.welcome.text, &palette)
            .render(frame, main_area);
    } else {
        MessageList::new(
            &mut tui.message_list,
            &app.messages,
            &app.assistant_name,
            &palette,
        )
        .render(frame, main_area);
    }

    tui.input_box.render(frame, input_area, &palette);

    // Overlays, bottom to top
    if app.sidebar_open {
        Sidebar::new(
            &mut tui.sidebar,
            &app.conversations,
            app.current_conversation_id.as_deref(),
            &palette,
        )
        .render(frame, screen);
    }
    if let Some(state) = tui.command_palette.as_mut() {
        CommandPalette::new(state, &palette).render(frame, screen);
    }
    if let Some(state) = tui.control_center.as_mut() {
        ControlCenter::new(state, &palette).render(frame, screen);
    }
    if let Some(state) = tui.file_picker.as_mut() {
        FilePicker::new(state, &palette).render(frame, screen);
    }

    ToastStack::new(&app.toasts, &palette).render(frame, main_area);
}

/// Hit test: given a screen row, find which message index (if any) is under it.
pub fn hit_test_message(
    screen_y: u16,
    frame_area: Rect,
    input_height: u16,
    list: &MessageListState,
) -> Option<usize> {
    let [_header, main_area, _input] = screen_layout(frame_area, input_height);

    if screen_y < main_area.y || screen_y >= main_area.y + main_area.height {
        return None;
    }
    list.index_at(screen_y - main_area.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::types::Message;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_conversation_shows_welcome() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.welcome.text = "Good morning".into();
        let text = draw(&app, &mut tui, 100, 30);
        assert!(text.contains("Good morning"));
        assert!(text.contains("Assign a task or explore an idea..."));
    }

    #[test]
    fn messages_replace_welcome() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello there".into()));
        let mut tui = TuiState::new();
        tui.welcome.text = "Good morning".into();
        let text = draw(&app, &mut tui, 100, 30);
        assert!(text.contains("hello there"));
        assert!(!text.contains("Good morning"));
    }

    #[test]
    fn overlays_render_on_top() {
        let mut app = test_app();
        update(&mut app, Action::ToggleSidebar);
        let mut tui = TuiState::new();
        tui.sidebar.open(&app.conversations, app.current_conversation_id.as_deref());
        let text = draw(&app, &mut tui, 100, 30);
        assert!(text.contains("Conversations"));
        assert!(text.contains("Advanced React project"));
    }

    #[test]
    fn toasts_are_drawn() {
        let mut app = test_app();
        app.toasts.success("New conversation created");
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui, 100, 30);
        assert!(text.contains("New conversation created"));
    }

    #[test]
    fn hit_test_maps_rows_to_messages() {
        let mut app = test_app();
        app.messages.push(Message::user("first"));
        app.messages.push(Message::user("second"));
        let mut tui = TuiState::new();
        draw(&app, &mut tui, 80, 40);

        let area = Rect::new(0, 0, 80, 40);
        let input_height = tui.input_box.calculate_height(80);
        let first_height = tui.message_list.layout.heights[0];

        // Row 0 is the header
        assert_eq!(hit_test_message(0, area, input_height, &tui.message_list), None);
        assert_eq!(
            hit_test_message(1, area, input_height, &tui.message_list),
            Some(0)
        );
        assert_eq!(
            hit_test_message(1 + first_height, area, input_height, &tui.message_list),
            Some(1)
        );
        // Composer rows are outside the timeline
        assert_eq!(hit_test_message(39, area, input_height, &tui.message_list), None);
    }
}
