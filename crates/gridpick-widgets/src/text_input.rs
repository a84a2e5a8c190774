//! Single-line search field.

use gridpick_core::command::Command;
use gridpick_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Style configuration for the text input.
#[derive(Debug, Clone)]
pub struct TextInputStyle {
    /// Style applied to the prompt string.
    pub prompt: Style,
    /// Style applied to the input text.
    pub text: Style,
    /// Style applied to the placeholder text.
    pub placeholder: Style,
    /// Style applied to the cursor character.
    pub cursor: Style,
}

impl Default for TextInputStyle {
    fn default() -> Self {
        Self {
            prompt: Style::default().fg(Color::Cyan),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Messages for the text input component.
#[derive(Debug, Clone)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Paste text at cursor position.
    Paste(String),
    /// Emitted when the input value changes.
    Changed(String),
    /// Emitted when Enter is pressed.
    Submit(String),
}

/// A single-line text input.
///
/// Owners that need the value synchronously read [`value`](TextInput::value)
/// right after forwarding a key, instead of waiting for
/// [`Message::Changed`].
///
/// ```ignore
/// let mut search = TextInput::new("Type to filter").with_prompt("/ ");
/// search.focus();
/// let cmd = search.update(text_input::Message::KeyPress(key));
/// table.set_query(&search.value());
/// ```
pub struct TextInput {
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    placeholder: String,
    prompt: String,
    style: TextInputStyle,
}

impl TextInput {
    /// Create a new text input with the given placeholder text.
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            focus: false,
            placeholder: placeholder.into(),
            prompt: String::new(),
            style: TextInputStyle::default(),
        }
    }

    /// Set a prompt string displayed before the input (e.g., `/ `).
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set custom styles for the input.
    pub fn with_style(mut self, style: TextInputStyle) -> Self {
        self.style = style;
        self
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the text and move the cursor to its end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    /// Clear the text.
    pub fn reset(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn changed(&self) -> Command<Message> {
        Command::message(Message::Changed(self.value()))
    }

    fn insert_str(&mut self, text: &str) -> Command<Message> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if chars.is_empty() {
            return Command::none();
        }
        let n = chars.len();
        self.value.splice(self.cursor..self.cursor, chars);
        self.cursor += n;
        self.changed()
    }

    fn delete_backward(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_forward(&mut self) -> Command<Message> {
        if self.cursor >= self.value.len() {
            return Command::none();
        }
        self.value.remove(self.cursor);
        self.changed()
    }

    fn delete_word_backward(&mut self) -> Command<Message> {
        let mut start = self.cursor;
        while start > 0 && self.value[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && self.value[start - 1] != ' ' {
            start -= 1;
        }
        if start == self.cursor {
            return Command::none();
        }
        self.value.drain(start..self.cursor);
        self.cursor = start;
        self.changed()
    }

    fn delete_to_start(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        self.value.drain(..self.cursor);
        self.cursor = 0;
        self.changed()
    }

    fn delete_to_end(&mut self) -> Command<Message> {
        if self.cursor >= self.value.len() {
            return Command::none();
        }
        self.value.truncate(self.cursor);
        self.changed()
    }
}

impl Component for TextInput {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                if !self.focus {
                    return Command::none();
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                        self.insert_str(&c.to_string())
                    }
                    (KeyCode::Backspace, KeyModifiers::NONE) => self.delete_backward(),
                    (KeyCode::Delete, KeyModifiers::NONE) => self.delete_forward(),
                    (KeyCode::Char('w'), m) if m.contains(KeyModifiers::CONTROL) => {
                        self.delete_word_backward()
                    }
                    (KeyCode::Backspace, m) if m.contains(KeyModifiers::ALT) => {
                        self.delete_word_backward()
                    }
                    (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => {
                        self.delete_to_start()
                    }
                    (KeyCode::Char('k'), m) if m.contains(KeyModifiers::CONTROL) => {
                        self.delete_to_end()
                    }
                    (KeyCode::Left, _) => {
                        self.cursor = self.cursor.saturating_sub(1);
                        Command::none()
                    }
                    (KeyCode::Right, _) => {
                        self.cursor = (self.cursor + 1).min(self.value.len());
                        Command::none()
                    }
                    (KeyCode::Home, _) => {
                        self.cursor = 0;
                        Command::none()
                    }
                    (KeyCode::Char('a'), m) if m.contains(KeyModifiers::CONTROL) => {
                        self.cursor = 0;
                        Command::none()
                    }
                    (KeyCode::End, _) => {
                        self.cursor = self.value.len();
                        Command::none()
                    }
                    (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                        self.cursor = self.value.len();
                        Command::none()
                    }
                    (KeyCode::Enter, _) => Command::message(Message::Submit(self.value())),
                    _ => Command::none(),
                }
            }
            Message::Paste(text) => {
                if !self.focus {
                    return Command::none();
                }
                self.insert_str(&text)
            }
            Message::Changed(_) | Message::Submit(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let prompt_len = self.prompt.chars().count();
        let available = (area.width as usize).saturating_sub(prompt_len).max(1);
        // Keep the cursor cell on screen.
        let offset = (self.cursor + 1).saturating_sub(available);

        let mut spans = Vec::new();
        if !self.prompt.is_empty() {
            spans.push(Span::styled(self.prompt.as_str(), self.style.prompt));
        }

        if self.value.is_empty() {
            if self.focus {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
        } else {
            let end = (offset + available).min(self.value.len());
            let visible = &self.value[offset..end];
            if self.focus {
                let at = self.cursor - offset;
                let before: String = visible[..at.min(visible.len())].iter().collect();
                if !before.is_empty() {
                    spans.push(Span::styled(before, self.style.text));
                }
                match visible.get(at) {
                    Some(c) => {
                        spans.push(Span::styled(c.to_string(), self.style.cursor));
                        let after: String = visible[at + 1..].iter().collect();
                        if !after.is_empty() {
                            spans.push(Span::styled(after, self.style.text));
                        }
                    }
                    None => spans.push(Span::styled(" ", self.style.cursor)),
                }
            } else {
                spans.push(Span::styled(visible.iter().collect::<String>(), self.style.text));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn key_ctrl(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::CONTROL))
    }

    fn typed(text: &str) -> TextInput {
        let mut input = TextInput::new("");
        input.focus();
        input.set_value(text);
        input
    }

    #[test]
    fn typing_emits_changed() {
        let mut input = TextInput::new("Search");
        input.focus();
        input.update(key(KeyCode::Char('h')));
        let cmd = input.update(key(KeyCode::Char('i')));
        assert_eq!(input.value(), "hi");
        match cmd.into_message() {
            Some(Message::Changed(v)) => assert_eq!(v, "hi"),
            other => panic!("expected Changed, got {other:?}"),
        }
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut input = TextInput::new("");
        input.update(key(KeyCode::Char('a')));
        input.update(Message::Paste("abc".into()));
        assert!(input.is_empty());
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = typed("abc");
        input.update(key(KeyCode::Backspace));
        assert_eq!(input.value(), "ab");
        input.update(key(KeyCode::Home));
        input.update(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn backspace_at_start_is_silent() {
        let mut input = typed("");
        assert!(input.update(key(KeyCode::Backspace)).is_none());
    }

    #[test]
    fn cursor_movement_inserts_in_place() {
        let mut input = typed("ac");
        input.update(key(KeyCode::Left));
        input.update(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "abc");
        input.update(key(KeyCode::End));
        assert_eq!(input.cursor_position(), 3);
    }

    #[test]
    fn ctrl_u_and_ctrl_k() {
        let mut input = typed("hello world");
        for _ in 0..5 {
            input.update(key(KeyCode::Left));
        }
        input.update(key_ctrl(KeyCode::Char('k')));
        assert_eq!(input.value(), "hello ");
        input.update(key_ctrl(KeyCode::Char('u')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut input = typed("design systems");
        input.update(key_ctrl(KeyCode::Char('w')));
        assert_eq!(input.value(), "design ");
        input.update(key_ctrl(KeyCode::Char('w')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn paste_inserts_at_cursor_and_drops_newlines() {
        let mut input = typed("ab");
        input.update(key(KeyCode::Left));
        input.update(Message::Paste("x\ny".into()));
        assert_eq!(input.value(), "axyb");
    }

    #[test]
    fn enter_submits() {
        let mut input = typed("ops");
        match input.update(key(KeyCode::Enter)).into_message() {
            Some(Message::Submit(v)) => assert_eq!(v, "ops"),
            other => panic!("expected Submit, got {other:?}"),
        }
    }

    #[test]
    fn renders_placeholder_and_prompt() {
        let input = TextInput::new("Type to filter").with_prompt("/ ");
        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal.draw(|f| input.view(f, f.area())).unwrap();
        let line: String = (0..20)
            .map(|x| terminal.backend().buffer()[(x, 0)].symbol().to_string())
            .collect();
        assert_eq!(line, "/ Type to filter    ");
    }

    #[test]
    fn long_values_scroll_to_the_cursor() {
        let input = typed("abcdefghij");
        let mut terminal = Terminal::new(TestBackend::new(5, 1)).unwrap();
        terminal.draw(|f| input.view(f, f.area())).unwrap();
        let line: String = (0..5)
            .map(|x| terminal.backend().buffer()[(x, 0)].symbol().to_string())
            .collect();
        assert_eq!(line, "ghij ");
    }
}
