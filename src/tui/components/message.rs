use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::types::{Message, Role};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by the user bubble's borders and padding.
const BUBBLE_OVERHEAD_H: u16 = 2 + CONTENT_PAD_H * 2;
/// Top + bottom borders of the user bubble.
const BUBBLE_OVERHEAD_V: u16 = 2;
/// Indent of assistant text under its label.
const ASSISTANT_INDENT: u16 = 2;
/// Blank row after every message.
const SPACING: u16 = 1;

pub const TOOLBAR_TEXT: &str = "[r] Regenerate  [c] Copy  [s] Share  [+] Helpful  [-] Not helpful";

/// A stateless component that renders a single chat turn.
///
/// # Design
///
/// `MessageView` is a **transient component**: it's created fresh each frame
/// with the data it needs to render. The two UI toggles (`show_thinking`,
/// `show_toolbar`) are passed in from `MessageListState`, which keeps them
/// per message index.
///
/// # Layout
///
/// - **User** turns are a rounded bubble occupying the right four fifths.
/// - **Assistant** turns are a label line, an optional collapsible thinking
///   trace, the reply text, an optional toolbar and numbered suggestions.
///
/// Text is wrapped with `textwrap` before rendering, so
/// [`calculate_height`](Self::calculate_height) and the render pass always
/// agree on the number of rows.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub assistant_name: &'a str,
    pub show_thinking: bool,
    pub show_toolbar: bool,
    pub is_selected: bool,
    pub palette: &'a Palette,
}

impl<'a> MessageView<'a> {
    pub fn new(
        message: &'a Message,
        assistant_name: &'a str,
        show_thinking: bool,
        show_toolbar: bool,
        is_selected: bool,
        palette: &'a Palette,
    ) -> Self {
        Self {
            message,
            assistant_name,
            show_thinking,
            show_toolbar,
            is_selected,
            palette,
        }
    }

    /// Calculate the height required for a message given a width.
    pub fn calculate_height(
        message: &Message,
        width: u16,
        show_thinking: bool,
        show_toolbar: bool,
    ) -> u16 {
        match message.role {
            Role::User => {
                let inner = bubble_width(width).saturating_sub(BUBBLE_OVERHEAD_H);
                if inner == 0 {
                    return 1;
                }
                let lines = wrap_text(message.content.trim(), inner).len() as u16;
                lines.max(1) + BUBBLE_OVERHEAD_V + SPACING
            }
            Role::Assistant => {
                assistant_lines(message, "", width, show_thinking, show_toolbar, None).len()
                    as u16
            }
        }
    }

    fn render_user(&self, area: Rect, buf: &mut Buffer) {
        let bubble_w = bubble_width(area.width);
        let bubble_area = Rect {
            x: area.x + area.width.saturating_sub(bubble_w),
            y: area.y,
            width: bubble_w,
            height: area.height.saturating_sub(SPACING),
        };

        let border_style = if self.is_selected {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.user).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .title(" you ")
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let lines: Vec<Line> = wrap_text(self.message.content.trim(), inner_area.width)
            .into_iter()
            .map(Line::from)
            .collect();
        Paragraph::new(lines)
            .style(Style::default().fg(self.palette.foreground))
            .render(inner_area, buf);
    }
}

// Implement Widget for easy usage in ScrollView
impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.message.role {
            Role::User => self.render_user(area, buf),
            Role::Assistant => {
                let lines = assistant_lines(
                    self.message,
                    self.assistant_name,
                    area.width,
                    self.show_thinking,
                    self.show_toolbar,
                    Some((self.palette, self.is_selected)),
                );
                Paragraph::new(lines).render(area, buf);
            }
        }
    }
}

/// Component trait implementation.
///
/// `MessageView` is stateless, so the `&mut self` required by the trait is a
/// no-op. Rendering is delegated to the [`Widget`] implementation.
impl<'a> Component for MessageView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

/// User bubbles take the right four fifths of the row.
fn bubble_width(width: u16) -> u16 {
    if width < 20 { width } else { width - width / 5 }
}

/// Wrap text to `width` columns, keeping blank lines between paragraphs.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Build the rows of an assistant turn. Styling is skipped when `style` is
/// None (height calculation only).
fn assistant_lines(
    message: &Message,
    assistant_name: &str,
    width: u16,
    show_thinking: bool,
    show_toolbar: bool,
    style: Option<(&Palette, bool)>,
) -> Vec<Line<'static>> {
    let text_width = width.saturating_sub(ASSISTANT_INDENT);
    let indent = " ".repeat(ASSISTANT_INDENT as usize);

    let (label, body, muted, accent) = match style {
        Some((palette, is_selected)) => {
            let mut label = Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD);
            if is_selected {
                label = label.bg(palette.selection);
            }
            (
                label,
                Style::default().fg(palette.assistant),
                palette.muted(),
                palette.accent(),
            )
        }
        None => (
            Style::default(),
            Style::default(),
            Style::default(),
            Style::default(),
        ),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("◉ ", accent),
        Span::styled(assistant_name.to_string(), label),
    ])];

    if let Some(trace) = &message.thinking_process {
        let marker = if show_thinking { "▾" } else { "▸" };
        lines.push(Line::from(Span::styled(
            format!("{indent}{marker} Thinking process"),
            muted.add_modifier(Modifier::ITALIC),
        )));
        if show_thinking {
            let step_width = text_width.saturating_sub(2);
            for (heading, body_text) in trace.steps() {
                lines.push(Line::from(Span::styled(
                    format!("{indent}  {heading}"),
                    muted.add_modifier(Modifier::BOLD),
                )));
                for row in wrap_text(body_text, step_width) {
                    lines.push(Line::from(Span::styled(
                        format!("{indent}  {row}"),
                        muted,
                    )));
                }
            }
        }
    }

    for row in wrap_text(message.content.trim(), text_width) {
        lines.push(Line::from(Span::styled(format!("{indent}{row}"), body)));
    }

    if show_toolbar {
        let toolbar = super::overlay::truncate_str(TOOLBAR_TEXT, text_width as usize);
        lines.push(Line::from(Span::styled(format!("{indent}{toolbar}"), accent)));
    }

    for (idx, suggestion) in message.suggestions.iter().enumerate() {
        let chip = format!("[{}] → {}", idx + 1, suggestion);
        let chip = super::overlay::truncate_str(&chip, text_width as usize);
        lines.push(Line::from(Span::styled(format!("{indent}{chip}"), muted)));
    }

    lines.extend((0..SPACING).map(|_| Line::from("")));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::theme::Theme;
    use crate::core::types::{Contribution, ThinkingProcess};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn assistant_with_trace() -> Message {
        let mut msg = Message::assistant("Short answer.");
        msg.thinking_process = Some(ThinkingProcess {
            analysis: "analysis".into(),
            plan: "plan".into(),
            contributions: vec![Contribution {
                agent: "Logic".into(),
                response: "structure".into(),
            }],
            verification: "checked".into(),
            synthesis: "done".into(),
        });
        msg.suggestions = vec!["More?".into(), "Example?".into()];
        msg
    }

    fn render(message: &Message, show_thinking: bool, show_toolbar: bool) -> String {
        let width = 60;
        let height =
            MessageView::calculate_height(message, width, show_thinking, show_toolbar);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let palette = Palette::for_theme(Theme::Light);
        let mut view = MessageView::new(
            message,
            "ORION",
            show_thinking,
            show_toolbar,
            false,
            &palette,
        );
        terminal
            .draw(|f| Component::render(&mut view, f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn user_height_includes_borders_and_spacing() {
        let msg = Message::user("Hello");
        assert_eq!(
            MessageView::calculate_height(&msg, 80, false, false),
            1 + BUBBLE_OVERHEAD_V + SPACING
        );
    }

    #[test]
    fn user_height_wraps() {
        let msg = Message::user("Hello world");
        // bubble is the full width below 20 columns: 9 - 4 = 5 columns of text
        assert_eq!(
            MessageView::calculate_height(&msg, 9, false, false),
            2 + BUBBLE_OVERHEAD_V + SPACING
        );
    }

    #[test]
    fn zero_width_user_message_has_minimum_height() {
        let msg = Message::user("Hello");
        assert_eq!(MessageView::calculate_height(&msg, 0, false, false), 1);
    }

    #[test]
    fn collapsed_assistant_height() {
        let msg = assistant_with_trace();
        // label + trace header + 1 content + 2 suggestions + spacing
        assert_eq!(MessageView::calculate_height(&msg, 60, false, false), 6);
    }

    #[test]
    fn expanding_trace_and_toolbar_adds_rows() {
        let msg = assistant_with_trace();
        let collapsed = MessageView::calculate_height(&msg, 60, false, false);
        // 5 steps, each a heading plus one body row
        assert_eq!(
            MessageView::calculate_height(&msg, 60, true, false),
            collapsed + 10
        );
        assert_eq!(
            MessageView::calculate_height(&msg, 60, false, true),
            collapsed + 1
        );
    }

    #[test]
    fn render_shows_trace_only_when_expanded() {
        let msg = assistant_with_trace();
        let collapsed = render(&msg, false, false);
        assert!(collapsed.contains("▸ Thinking process"));
        assert!(!collapsed.contains("Request analysis"));
        let expanded = render(&msg, true, false);
        assert!(expanded.contains("▾ Thinking process"));
        assert!(expanded.contains("1. Request analysis"));
        assert!(expanded.contains("3. Logic agent contribution"));
        assert!(expanded.contains("5. Final synthesis"));
    }

    #[test]
    fn render_shows_toolbar_and_suggestions() {
        let msg = assistant_with_trace();
        let text = render(&msg, false, true);
        assert!(text.contains("[c] Copy"));
        assert!(text.contains("[1] → More?"));
        assert!(text.contains("[2] → Example?"));
        assert!(!render(&msg, false, false).contains("[c] Copy"));
    }

    #[test]
    fn render_user_bubble() {
        let msg = Message::user("ping");
        let text = render(&msg, false, false);
        assert!(text.contains("you"));
        assert!(text.contains("ping"));
    }
}
