//! Searchable dropdown backed by a [`TableView`].
//!
//! A combobox is **closed** (only the trigger is drawn) or **open** (a panel
//! with a search field and the table is drawn under the trigger).
//!
//! - Enter, Space or Down on the focused trigger, or a click on it, opens
//!   the panel.  Focus moves into the search field once the panel has been
//!   drawn, via [`Command::after_render`].
//! - Activating a table row chooses it and closes the panel.  Escape closes
//!   it, and so does a left press outside the trigger and panel.  Every way
//!   of closing resets the search text.
//! - The trigger shows the chosen row's display columns joined with
//!   `" | "`, or the placeholder.  The clear button (or Backspace/Delete on
//!   the trigger) drops the choice without opening or closing anything.
//!
//! Outside presses arrive through a [`pointer_presses`] subscription that
//! [`subscriptions`](Component::subscriptions) returns only while open, so
//! the runtime starts the listener on open and stops it on close.

use crate::chrome::{border_block, focus_block};
use crate::data::{Column, Row};
use crate::focus::FocusGroup;
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::overlay::{anchored_panel, render_overlay};
use crate::render::{fit, RendererKind};
use crate::table_view::{self, TableView};
use crate::text_input::{self, TextInput};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use gridpick_core::command::Command;
use gridpick_core::component::Component;
use gridpick_core::subscription::Subscription;
use gridpick_core::subscriptions::pointer_presses;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::cell::Cell as StdCell;
use std::sync::atomic::{AtomicU64, Ordering};

const TRIGGER: usize = 0;
const SEARCH: usize = 1;
const TABLE: usize = 2;

/// Default trigger text when nothing is chosen.
pub const DEFAULT_PLACEHOLDER: &str = "Select an option...";
/// Default joiner for display-column values.
pub const DEFAULT_SEPARATOR: &str = " | ";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Messages for the combobox.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press; ignored unless the combobox has focus.
    KeyPress(KeyEvent),
    /// A mouse event over the trigger or panel.
    Mouse(MouseEvent),
    /// Bracketed paste, inserted into the search field while it has focus.
    Paste(String),
    /// Open when closed, close when open.
    Toggle,
    /// Drop the current choice.
    Clear,
    /// Move focus into the search field. Scheduled after the opening render.
    FocusSearch,
    /// A left press anywhere on screen, from the open-state subscription.
    Pointer { column: u16, row: u16 },
    /// Output of the embedded search field.
    Search(text_input::Message),
    /// Output of the embedded table.
    Table(table_view::Message),
    /// A row was chosen.
    Selected(Choice),
    /// The choice was cleared.
    Cleared,
}

/// Payload of [`Message::Selected`].
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub row: Row,
    /// Rendered values of the display columns, in display-column order.
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseReason {
    Selection,
    Escape,
    Outside,
    Toggle,
}

/// Configurable key bindings for the combobox.
pub struct ComboboxKeyBindings {
    /// Open or close from the trigger. Default: Enter, Space
    pub toggle: Binding,
    /// Open from the trigger; from the search field, move into the table.
    /// Default: Down
    pub down: Binding,
    /// Close the panel. Default: Esc
    pub close: Binding,
    /// Clear the choice from the trigger. Default: Backspace, Delete
    pub clear: Binding,
    /// Next field inside the panel. Default: Tab
    pub next_field: Binding,
    /// Previous field inside the panel. Default: Shift+Tab
    pub prev_field: Binding,
}

impl Default for ComboboxKeyBindings {
    fn default() -> Self {
        Self {
            toggle: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                ],
                "open",
            ),
            down: Binding::new(KeyCombination::new(KeyCode::Down), "to table"),
            close: Binding::new(KeyCombination::new(KeyCode::Esc), "close"),
            clear: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Backspace),
                    KeyCombination::new(KeyCode::Delete),
                ],
                "clear",
            ),
            next_field: Binding::new(KeyCombination::new(KeyCode::Tab), "next field"),
            prev_field: Binding::new(KeyCombination::new(KeyCode::BackTab), "prev field"),
        }
    }
}

impl KeyMap for ComboboxKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle, &self.close, &self.clear]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.toggle, &self.down, &self.close, &self.clear],
            vec![&self.next_field, &self.prev_field],
        ]
    }
}

/// Style configuration for the combobox trigger.
#[derive(Debug, Clone)]
pub struct ComboboxStyle {
    /// Trigger text when a row is chosen.
    pub text: Style,
    /// Trigger text when nothing is chosen.
    pub placeholder: Style,
    /// The clear button.
    pub clear: Style,
    /// The open/closed arrow.
    pub arrow: Style,
    /// Trigger border while the trigger has focus.
    pub focused_border: Style,
    /// Trigger border otherwise.
    pub unfocused_border: Style,
}

impl Default for ComboboxStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            clear: Style::default().fg(Color::Red),
            arrow: Style::default().fg(Color::Cyan),
            focused_border: Style::default().fg(Color::Cyan),
            unfocused_border: Style::default().fg(Color::DarkGray),
        }
    }
}

type SelectFn = Box<dyn Fn(&Choice) + Send>;

/// A dropdown whose options are the rows of a searchable table.
///
/// # Example
///
/// ```ignore
/// let picker = Combobox::new(rows, columns)
///     .with_display_columns(["name", "department"])
///     .with_placeholder("Search and select a user...")
///     .with_renderer(RendererKind::Kit);
///
/// // In the parent's update:
/// match msg {
///     Msg::Picker(combobox::Message::Selected(choice)) => { /* ... */ }
///     Msg::Picker(m) => return self.picker.update(m).map(Msg::Picker),
/// }
/// ```
pub struct Combobox {
    id: u64,
    state: State,
    focus: bool,
    slots: FocusGroup<3>,
    search: TextInput,
    table: TableView,
    chosen: Option<Row>,
    display_columns: Vec<String>,
    placeholder: String,
    separator: String,
    label: String,
    panel_height: u16,
    panel_width: Option<u16>,
    style: ComboboxStyle,
    key_bindings: ComboboxKeyBindings,
    on_select: Option<SelectFn>,
    trigger_area: StdCell<Rect>,
    clear_area: StdCell<Option<Rect>>,
    search_area: StdCell<Option<Rect>>,
    panel_area: StdCell<Option<Rect>>,
}

impl Combobox {
    /// Create a closed combobox over `rows`. Every column is searched; by
    /// default every column is also a display column.
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        let display_columns = columns.iter().map(|c| c.id.clone()).collect();
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            state: State::Closed,
            focus: false,
            slots: FocusGroup::new(),
            search: TextInput::new("Search...").with_prompt("/ "),
            table: TableView::new(rows, columns),
            chosen: None,
            display_columns,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            label: String::new(),
            panel_height: 14,
            panel_width: None,
            style: ComboboxStyle::default(),
            key_bindings: ComboboxKeyBindings::default(),
            on_select: None,
            trigger_area: StdCell::new(Rect::default()),
            clear_area: StdCell::new(None),
            search_area: StdCell::new(None),
            panel_area: StdCell::new(None),
        }
    }

    /// Columns (by id, in order) shown on the trigger and reported on
    /// selection. Unknown ids render as empty strings.
    pub fn with_display_columns<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.display_columns = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Title on the trigger border.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Height of the open panel, search field included.
    pub fn with_panel_height(mut self, height: u16) -> Self {
        self.panel_height = height.max(5);
        self
    }

    /// Width of the open panel. Defaults to the trigger width.
    pub fn with_panel_width(mut self, width: u16) -> Self {
        self.panel_width = Some(width);
        self
    }

    /// Renderer for the embedded table.
    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.table.set_renderer(renderer);
        self
    }

    pub fn with_style(mut self, style: ComboboxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_key_bindings(mut self, bindings: ComboboxKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Call `f` on every choice, in addition to [`Message::Selected`].
    pub fn on_select(mut self, f: impl Fn(&Choice) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn key_bindings(&self) -> &ComboboxKeyBindings {
        &self.key_bindings
    }

    /// Instance id, also the discriminant of its pointer subscription.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove focus. An open panel stays open.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    pub fn is_open(&self) -> bool {
        self.state == State::Open
    }

    /// Current search text.
    pub fn query(&self) -> String {
        self.search.value()
    }

    /// The chosen row.
    pub fn selected_row(&self) -> Option<&Row> {
        self.chosen.as_ref()
    }

    /// The embedded table.
    pub fn table(&self) -> &TableView {
        &self.table
    }

    pub fn trigger_focused(&self) -> bool {
        self.focus && self.slots.is_focused(TRIGGER)
    }

    pub fn search_focused(&self) -> bool {
        self.focus && self.slots.is_focused(SEARCH)
    }

    pub fn table_focused(&self) -> bool {
        self.focus && self.slots.is_focused(TABLE)
    }

    /// Rendered values of the display columns for `row`.
    pub fn display_values(&self, row: &Row) -> Vec<String> {
        self.display_columns
            .iter()
            .map(|id| {
                self.table
                    .columns()
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|c| c.render(row))
                    .unwrap_or_default()
            })
            .collect()
    }

    /// What the trigger shows.
    pub fn trigger_text(&self) -> String {
        match self.chosen {
            Some(ref row) => self.display_values(row).join(&self.separator),
            None => self.placeholder.clone(),
        }
    }

    /// Whether a screen cell is inside the trigger or the open panel, as of
    /// the last render.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let pos = Position::new(column, row);
        self.trigger_area.get().contains(pos)
            || self.panel_area.get().is_some_and(|panel| panel.contains(pos))
    }

    fn open(&mut self) -> Command<Message> {
        self.state = State::Open;
        self.table.set_query("");
        log::debug!("combobox {} opened", self.id);
        Command::after_render(Message::FocusSearch)
    }

    fn close(&mut self, reason: CloseReason) {
        self.state = State::Closed;
        self.search.reset();
        self.table.set_query("");
        self.slots.focus(TRIGGER);
        self.sync_focus();
        self.search_area.set(None);
        self.panel_area.set(None);
        log::debug!("combobox {} closed ({reason:?})", self.id);
    }

    fn clear(&mut self) -> Command<Message> {
        if self.chosen.take().is_none() {
            return Command::none();
        }
        self.table.clear_selection();
        self.search.reset();
        self.table.set_query("");
        self.slots.focus(TRIGGER);
        self.sync_focus();
        log::debug!("combobox {} cleared", self.id);
        Command::message(Message::Cleared)
    }

    fn choose(&mut self, row: Row) -> Command<Message> {
        let values = self.display_values(&row);
        self.chosen = Some(row.clone());
        self.close(CloseReason::Selection);
        let choice = Choice { row, values };
        if let Some(ref f) = self.on_select {
            f(&choice);
        }
        Command::message(Message::Selected(choice))
    }

    fn focus_slot(&mut self, slot: usize) {
        self.slots.focus(slot);
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        match self.slots.focused() {
            SEARCH => {
                self.search.focus();
                self.table.blur();
            }
            TABLE => {
                self.table.focus();
                self.search.blur();
            }
            _ => {
                self.search.blur();
                self.table.blur();
            }
        }
    }

    /// Move focus into the table, landing on the first row if nothing
    /// there has focus yet.
    fn enter_table(&mut self) {
        self.focus_slot(TABLE);
        if self.table.focused_row().is_none() {
            self.table.update(table_view::Message::FocusRow(0));
        }
    }

    /// Forward to the table. An activation chooses the row and closes the
    /// panel within this same update.
    fn table_update(&mut self, msg: table_view::Message) -> Command<Message> {
        match self.table.update(msg).try_into_message() {
            Ok(table_view::Message::Activated(activation)) if self.is_open() => {
                self.choose(activation.row)
            }
            Ok(table_view::Message::Activated(_)) => Command::none(),
            Ok(msg) => Command::message(Message::Table(msg)),
            Err(cmd) => cmd.map(Message::Table),
        }
    }

    fn search_key(&mut self, msg: text_input::Message) -> Command<Message> {
        let cmd = self.search.update(msg);
        self.table.set_query(self.search.value());
        cmd.map(Message::Search)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let kb = &self.key_bindings;
        if self.state == State::Closed {
            if kb.toggle.matches(&key) || kb.down.matches(&key) {
                return self.open();
            }
            if kb.clear.matches(&key) {
                return self.clear();
            }
            return Command::none();
        }

        if kb.close.matches(&key) {
            self.close(CloseReason::Escape);
            return Command::none();
        }
        if kb.next_field.matches(&key) || kb.prev_field.matches(&key) {
            let forward = kb.next_field.matches(&key);
            self.slots.cycle_within(&[SEARCH, TABLE], forward);
            self.sync_focus();
            return Command::none();
        }

        match self.slots.focused() {
            SEARCH if kb.down.matches(&key) => {
                self.enter_table();
                Command::none()
            }
            SEARCH => self.search_key(text_input::Message::KeyPress(key)),
            TABLE => self.table_update(table_view::Message::KeyPress(key)),
            _ => {
                if kb.toggle.matches(&key) {
                    self.close(CloseReason::Toggle);
                } else if kb.down.matches(&key) {
                    self.enter_table();
                }
                Command::none()
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        let pos = Position::new(mouse.column, mouse.row);
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            if self.is_open() {
                return self.table_update(table_view::Message::Mouse(mouse));
            }
            return Command::none();
        }

        // The clear button sits inside the trigger; handle it first so the
        // press never toggles.
        if self.clear_area.get().is_some_and(|r| r.contains(pos)) {
            return self.clear();
        }
        if self.trigger_area.get().contains(pos) {
            return self.update(Message::Toggle);
        }
        if !self.is_open() {
            return Command::none();
        }
        if self.search_area.get().is_some_and(|r| r.contains(pos)) {
            self.focus_slot(SEARCH);
            return Command::none();
        }
        if self.panel_area.get().is_some_and(|r| r.contains(pos)) {
            self.focus_slot(TABLE);
            return self.table_update(table_view::Message::Mouse(mouse));
        }
        // Outside presses are handled by the pointer subscription.
        Command::none()
    }
}

impl Component for Combobox {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                if !self.focus {
                    return Command::none();
                }
                self.handle_key(key)
            }
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::Paste(text) => {
                if self.is_open() && self.slots.is_focused(SEARCH) {
                    self.search_key(text_input::Message::Paste(text))
                } else {
                    Command::none()
                }
            }
            Message::Toggle => {
                if self.is_open() {
                    self.close(CloseReason::Toggle);
                    Command::none()
                } else {
                    self.open()
                }
            }
            Message::Clear => self.clear(),
            Message::FocusSearch => {
                if self.is_open() {
                    self.focus_slot(SEARCH);
                }
                Command::none()
            }
            Message::Pointer { column, row } => {
                if self.is_open() && !self.contains(column, row) {
                    self.close(CloseReason::Outside);
                }
                Command::none()
            }
            // Activations sent in by a parent.
            Message::Table(table_view::Message::Activated(activation)) => {
                if self.is_open() {
                    self.choose(activation.row)
                } else {
                    Command::none()
                }
            }
            Message::Table(msg) => self.table_update(msg),
            Message::Search(_) | Message::Selected(_) | Message::Cleared => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let trigger = Rect {
            height: area.height.min(3),
            ..area
        };
        self.trigger_area.set(trigger);

        let border = if self.trigger_focused() {
            self.style.focused_border
        } else {
            self.style.unfocused_border
        };
        let block = border_block(&self.label, border);
        let inner = block.inner(trigger);
        frame.render_widget(block, trigger);

        let [text_area, icons] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(4)]).areas(inner);
        let text_style = if self.chosen.is_some() {
            self.style.text
        } else {
            self.style.placeholder
        };
        frame.render_widget(
            Paragraph::new(fit(&self.trigger_text(), text_area.width)).style(text_style),
            text_area,
        );

        let mut clear_area = None;
        if inner.height > 0 && icons.width == 4 {
            if self.chosen.is_some() {
                let rect = Rect::new(icons.x, icons.y, 3, 1);
                frame.render_widget(Paragraph::new(" × ").style(self.style.clear), rect);
                clear_area = Some(rect);
            }
            let arrow = if self.is_open() { "▴" } else { "▾" };
            frame.render_widget(
                Paragraph::new(arrow).style(self.style.arrow),
                Rect::new(icons.x + 3, icons.y, 1, 1),
            );
        }
        self.clear_area.set(clear_area);

        if !self.is_open() {
            self.search_area.set(None);
            self.panel_area.set(None);
            return;
        }

        let anchor = Rect {
            width: self.panel_width.unwrap_or(trigger.width),
            ..trigger
        };
        let panel = anchored_panel(anchor, self.panel_height, frame.area());
        let panel = render_overlay(frame, panel, None);
        self.panel_area.set(Some(panel));

        let [search_rect, table_rect] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(panel);
        self.search_area.set(Some(search_rect));

        let search_block = focus_block("", self.search_focused());
        let search_inner = search_block.inner(search_rect);
        frame.render_widget(search_block, search_rect);
        self.search.view(frame, search_inner);
        self.table.view(frame, table_rect);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.is_open() {
            vec![pointer_presses(self.id, |column, row| Message::Pointer {
                column,
                row,
            })]
        } else {
            vec![]
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RowId;
    use crossterm::event::KeyModifiers;
    use gridpick_core::testing::TestProgram;
    use gridpick_core::Model;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(column: u16, row: u16) -> Message {
        Message::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn users() -> Vec<Row> {
        vec![
            Row::new(1)
                .with("name", "John Doe")
                .with("department", "Engineering")
                .with("status", "Active"),
            Row::new(2)
                .with("name", "Jane Smith")
                .with("department", "Design")
                .with("status", "Active"),
            Row::new(3)
                .with("name", "Emily Taylor")
                .with("department", "Design")
                .with("status", "Inactive"),
        ]
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").with_width(14),
            Column::new("department", "Department").with_width(12),
            Column::new("status", "Status").with_width(8),
        ]
    }

    fn combobox() -> Combobox {
        let mut cb = Combobox::new(users(), columns()).with_display_columns(["name", "department"]);
        cb.focus();
        cb
    }

    /// Feed `msg` and every immediate follow-up back into the combobox,
    /// returning the outward messages (`Selected` / `Cleared`).
    fn run(cb: &mut Combobox, msg: Message) -> Vec<Message> {
        let mut queue = VecDeque::from([msg]);
        let mut out = Vec::new();
        while let Some(msg) = queue.pop_front() {
            if matches!(msg, Message::Selected(_) | Message::Cleared) {
                out.push(msg);
                continue;
            }
            queue.extend(cb.update(msg).into_messages());
        }
        out
    }

    /// Open with Enter and deliver the deferred focus move.
    fn open(cb: &mut Combobox) {
        let cmd = cb.update(key(KeyCode::Enter));
        assert!(matches!(cmd.into_after_render(), Some(Message::FocusSearch)));
        cb.update(Message::FocusSearch);
    }

    fn type_text(cb: &mut Combobox, text: &str) {
        for c in text.chars() {
            run(cb, key(KeyCode::Char(c)));
        }
    }

    fn draw(cb: &Combobox, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| cb.view(f, Rect::new(0, 0, f.area().width, 3)))
            .unwrap();
        gridpick_core::testing::buffer_to_string(terminal.backend().buffer())
    }

    fn choice(out: &[Message]) -> &Choice {
        match out {
            [Message::Selected(choice)] => choice,
            other => panic!("expected one Selected, got {other:?}"),
        }
    }

    #[test]
    fn starts_closed_with_placeholder() {
        let cb = combobox();
        assert!(!cb.is_open());
        assert_eq!(cb.trigger_text(), DEFAULT_PLACEHOLDER);
        assert!(draw(&cb, 60, 20).contains(DEFAULT_PLACEHOLDER));
    }

    #[test]
    fn opening_defers_focus_to_search() {
        let mut cb = combobox();
        for code in [KeyCode::Enter, KeyCode::Char(' '), KeyCode::Down] {
            let cmd = cb.update(key(code));
            assert!(cb.is_open(), "{code:?} should open");
            assert!(cb.trigger_focused());
            assert!(!cb.search_focused());
            assert!(matches!(cmd.into_after_render(), Some(Message::FocusSearch)));
            cb.update(Message::FocusSearch);
            assert!(cb.search_focused());
            cb.update(key(KeyCode::Esc));
        }
    }

    #[test]
    fn unfocused_combobox_ignores_keys() {
        let mut cb = combobox();
        cb.blur();
        cb.update(key(KeyCode::Enter));
        assert!(!cb.is_open());
    }

    #[test]
    fn typing_filters_synchronously() {
        let mut cb = combobox();
        open(&mut cb);
        type_text(&mut cb, "design");
        assert_eq!(cb.query(), "design");
        assert_eq!(cb.table().query(), "design");
        assert_eq!(cb.table().visible_len(), 2);
        run(&mut cb, key(KeyCode::Backspace));
        assert_eq!(cb.table().query(), "desig");
    }

    #[test]
    fn choosing_a_row_closes_and_updates_trigger() {
        let mut cb = combobox();
        open(&mut cb);
        type_text(&mut cb, "design");
        run(&mut cb, key(KeyCode::Down));
        assert!(cb.table_focused());
        assert_eq!(cb.table().focus_index(), Some(0));

        let out = run(&mut cb, key(KeyCode::Enter));
        let choice = choice(&out);
        assert_eq!(choice.row.id, RowId::Int(2));
        assert_eq!(choice.values, vec!["Jane Smith", "Design"]);

        assert!(!cb.is_open());
        assert_eq!(cb.query(), "");
        assert_eq!(cb.table().query(), "");
        assert!(cb.trigger_focused());
        assert_eq!(cb.trigger_text(), "Jane Smith | Design");
        assert_eq!(cb.selected_row().map(|r| &r.id), Some(&RowId::Int(2)));
    }

    #[test]
    fn callback_gets_display_values_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut cb = Combobox::new(users(), columns())
            .with_display_columns(["status", "name"])
            .on_select(move |c| sink.lock().unwrap().push(c.values.clone()));
        cb.focus();
        open(&mut cb);
        run(&mut cb, key(KeyCode::Down));
        run(&mut cb, key(KeyCode::Enter));
        assert_eq!(*seen.lock().unwrap(), vec![vec!["Active", "John Doe"]]);
    }

    #[test]
    fn unknown_display_column_renders_empty() {
        let cb = Combobox::new(users(), columns()).with_display_columns(["name", "nope"]);
        assert_eq!(cb.display_values(&users()[0]), vec!["John Doe", ""]);
    }

    #[test]
    fn escape_closes_and_resets_query() {
        let mut cb = combobox();
        open(&mut cb);
        type_text(&mut cb, "emily");
        run(&mut cb, key(KeyCode::Esc));
        assert!(!cb.is_open());
        assert_eq!(cb.query(), "");
        assert_eq!(cb.table().visible_len(), 3);
        assert!(cb.trigger_focused());
    }

    #[test]
    fn escape_from_table_closes_too() {
        let mut cb = combobox();
        open(&mut cb);
        run(&mut cb, key(KeyCode::Tab));
        assert!(cb.table_focused());
        run(&mut cb, key(KeyCode::Esc));
        assert!(!cb.is_open());
    }

    #[test]
    fn tab_cycles_between_search_and_table() {
        let mut cb = combobox();
        open(&mut cb);
        run(&mut cb, key(KeyCode::Tab));
        assert!(cb.table_focused());
        run(&mut cb, key(KeyCode::Tab));
        assert!(cb.search_focused());
        run(&mut cb, key(KeyCode::BackTab));
        assert!(cb.table_focused());
    }

    #[test]
    fn pointer_subscription_only_while_open() {
        let mut cb = combobox();
        assert!(cb.subscriptions().is_empty());
        open(&mut cb);
        let subs = cb.subscriptions();
        assert_eq!(subs.len(), 1);
        assert_eq!(
            subs[0].id(),
            pointer_presses(cb.id(), |_, _| ()).id()
        );
        run(&mut cb, key(KeyCode::Esc));
        assert!(cb.subscriptions().is_empty());
    }

    #[test]
    fn two_comboboxes_have_distinct_subscriptions() {
        let mut a = combobox();
        let mut b = combobox();
        open(&mut a);
        open(&mut b);
        assert_ne!(a.subscriptions()[0].id(), b.subscriptions()[0].id());
    }

    #[test]
    fn outside_press_closes_inside_press_does_not() {
        let mut cb = combobox();
        open(&mut cb);
        type_text(&mut cb, "jo");
        draw(&cb, 60, 24);

        // Inside the panel (below the trigger).
        run(&mut cb, Message::Pointer { column: 5, row: 6 });
        assert!(cb.is_open());
        // Inside the trigger.
        run(&mut cb, Message::Pointer { column: 5, row: 1 });
        assert!(cb.is_open());

        run(&mut cb, Message::Pointer { column: 5, row: 22 });
        assert!(!cb.is_open());
        assert_eq!(cb.query(), "");
    }

    #[test]
    fn clicking_trigger_toggles() {
        let mut cb = combobox();
        draw(&cb, 60, 24);
        let cmd = cb.update(press(5, 1));
        assert!(cb.is_open());
        assert!(matches!(cmd.into_after_render(), Some(Message::FocusSearch)));
        draw(&cb, 60, 24);
        cb.update(press(5, 1));
        assert!(!cb.is_open());
    }

    #[test]
    fn clicking_a_row_chooses_it() {
        let mut cb = combobox();
        open(&mut cb);
        let screen = draw(&cb, 60, 24);
        // Trigger rows 0-2, search rows 3-5, table border 6, header 7.
        assert!(screen.lines().nth(8).unwrap_or("").contains("John Doe"), "{screen}");
        let out = run(&mut cb, press(5, 9));
        assert_eq!(choice(&out).row.id, RowId::Int(2));
        assert!(!cb.is_open());
    }

    #[test]
    fn clear_button_clears_without_toggling() {
        let mut cb = combobox();
        open(&mut cb);
        run(&mut cb, key(KeyCode::Down));
        run(&mut cb, key(KeyCode::Enter));
        let screen = draw(&cb, 60, 24);
        assert!(screen.contains("John Doe | Engineering"));
        assert!(screen.contains('×'));

        // Icons occupy the last four inner columns: " × " then the arrow.
        let out = run(&mut cb, press(56, 1));
        assert!(matches!(out.as_slice(), [Message::Cleared]));
        assert!(!cb.is_open());
        assert!(cb.selected_row().is_none());
        assert!(cb.table().selected().is_none());
        assert_eq!(cb.trigger_text(), DEFAULT_PLACEHOLDER);
        assert!(!draw(&cb, 60, 24).contains('×'));
    }

    #[test]
    fn clear_while_open_keeps_panel_open() {
        let mut cb = combobox();
        open(&mut cb);
        run(&mut cb, key(KeyCode::Down));
        run(&mut cb, key(KeyCode::Enter));
        open(&mut cb);
        type_text(&mut cb, "em");
        draw(&cb, 60, 24);
        run(&mut cb, press(56, 1));
        assert!(cb.is_open());
        assert!(cb.selected_row().is_none());
        assert_eq!(cb.query(), "");
    }

    #[test]
    fn backspace_on_trigger_clears() {
        let mut cb = combobox();
        open(&mut cb);
        run(&mut cb, key(KeyCode::Down));
        run(&mut cb, key(KeyCode::Enter));
        let out = run(&mut cb, key(KeyCode::Backspace));
        assert!(matches!(out.as_slice(), [Message::Cleared]));
        assert!(!cb.is_open());
        // Nothing left to clear.
        assert!(run(&mut cb, key(KeyCode::Delete)).is_empty());
    }

    #[test]
    fn paste_goes_to_search_field() {
        let mut cb = combobox();
        open(&mut cb);
        run(&mut cb, Message::Paste("taylor".into()));
        assert_eq!(cb.table().visible_len(), 1);
    }

    #[test]
    fn kit_renderer_in_panel() {
        let mut cb = combobox().with_renderer(RendererKind::Kit);
        cb.focus();
        open(&mut cb);
        let screen = draw(&cb, 60, 24);
        assert!(screen.contains("Emily Taylor"));
        assert!(screen.contains("Department"));
    }

    struct Picker {
        combobox: Combobox,
    }

    #[derive(Debug)]
    enum PickerMsg {
        Combobox(Message),
    }

    impl Model for Picker {
        type Message = PickerMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<PickerMsg>) {
            (Picker { combobox: combobox() }, Command::none())
        }

        fn update(&mut self, msg: PickerMsg) -> Command<PickerMsg> {
            match msg {
                PickerMsg::Combobox(m) => self.combobox.update(m).map(PickerMsg::Combobox),
            }
        }

        fn view(&self, frame: &mut Frame) {
            let area = frame.area();
            self.combobox.view(frame, Rect { height: 3, ..area });
        }
    }

    #[test]
    fn search_focus_arrives_after_the_panel_is_drawn() {
        let mut prog = TestProgram::<Picker>::new(());
        prog.send(PickerMsg::Combobox(key(KeyCode::Enter)));
        prog.drain_messages();
        assert!(prog.model().combobox.is_open());
        assert!(!prog.model().combobox.search_focused());
        assert_eq!(prog.deferred_count(), 1);

        let screen = prog.frame(60, 24);
        assert!(screen.contains("Search..."));
        assert!(prog.model().combobox.search_focused());
    }

    #[test]
    fn picking_closes_before_queued_keys_arrive() {
        let mut prog = TestProgram::<Picker>::new(());
        prog.send(PickerMsg::Combobox(key(KeyCode::Enter)));
        prog.drain_messages();
        prog.frame(60, 24);
        prog.send(PickerMsg::Combobox(key(KeyCode::Down)));
        assert!(prog.model().combobox.table_focused());

        prog.send(PickerMsg::Combobox(key(KeyCode::Enter)));
        assert!(!prog.model().combobox.is_open());
        prog.send(PickerMsg::Combobox(key(KeyCode::Down)));
        prog.send(PickerMsg::Combobox(key(KeyCode::Enter)));
        prog.drain_messages();

        let cb = &prog.model().combobox;
        assert!(!cb.is_open());
        assert_eq!(cb.selected_row().map(|r| &r.id), Some(&RowId::Int(1)));
        assert_eq!(cb.selected_row().map(|r| &r.id), cb.table().selected());
    }
}
