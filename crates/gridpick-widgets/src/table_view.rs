//! Filterable table with single-row selection and roving keyboard focus.
//!
//! The view keeps the rows that match its search query, a selected row id
//! and a focus position into the matching rows.  Arrow keys, Home and End
//! move focus (wrapping at the ends); Enter, Space or a click activate a row,
//! which selects it and reports it together with every column's rendered
//! value.

use crate::a11y::{CellSnapshot, GridSnapshot, RowSnapshot, Role};
use crate::chrome::border_block;
use crate::data::{Column, Row, RowId};
use crate::filter::filter_indices;
use crate::key::{Binding, KeyCombination, KeyMap};
use crate::render::{body_area, Grid, GridRow, RendererKind};
use crate::selection::RovingFocus;
use crate::text::single_line;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use gridpick_core::command::Command;
use gridpick_core::component::Component;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;
use std::cell::Cell as StdCell;

/// Shown instead of rows when the table has no rows at all.
pub const NO_DATA: &str = "No data";
/// Shown instead of rows when the query filtered every row out.
pub const NO_MATCHES: &str = "No matches";

/// Messages for the table view.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press; ignored unless the view has focus.
    KeyPress(KeyEvent),
    /// A mouse event. Left presses on a row activate it and the wheel moves
    /// the focused row. Unlike key presses these act whether or not the view
    /// has focus. Parents forward only events that land on the table.
    Mouse(MouseEvent),
    /// Move focus to a position in the visible rows.
    FocusRow(usize),
    /// A row was activated.
    Activated(Activation),
}

/// Payload of [`Message::Activated`].
#[derive(Debug, Clone, PartialEq)]
pub struct Activation {
    pub row: Row,
    /// Rendered value of every column, in column order.
    pub values: Vec<String>,
}

/// Configurable key bindings for the table view.
pub struct TableKeyBindings {
    /// Focus previous row. Default: Up
    pub up: Binding,
    /// Focus next row. Default: Down
    pub down: Binding,
    /// Focus first row. Default: Home
    pub first: Binding,
    /// Focus last row. Default: End
    pub last: Binding,
    /// Activate focused row. Default: Enter, Space
    pub activate: Binding,
}

impl Default for TableKeyBindings {
    fn default() -> Self {
        Self {
            up: Binding::new(KeyCombination::new(KeyCode::Up), "up"),
            down: Binding::new(KeyCombination::new(KeyCode::Down), "down"),
            first: Binding::new(KeyCombination::new(KeyCode::Home), "first"),
            last: Binding::new(KeyCombination::new(KeyCode::End), "last"),
            activate: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                ],
                "select",
            ),
        }
    }
}

impl KeyMap for TableKeyBindings {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.activate]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.up, &self.down, &self.first, &self.last],
            vec![&self.activate],
        ]
    }
}

/// Style configuration for the table view.
#[derive(Debug, Clone)]
pub struct TableStyle {
    /// Header line.
    pub header: Style,
    /// Base style for body rows.
    pub normal: Style,
    /// Rows whose id is selected.
    pub selected: Style,
    /// The focused row while the view has focus.
    pub focused_row: Style,
    /// "No data" / "No matches".
    pub placeholder: Style,
    /// Border when the view has focus.
    pub focused_border: Style,
    /// Border when the view does not have focus.
    pub unfocused_border: Style,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            normal: Style::default(),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            focused_row: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            focused_border: Style::default().fg(Color::Cyan),
            unfocused_border: Style::default().fg(Color::DarkGray),
        }
    }
}

type SelectFn = Box<dyn Fn(&Activation) + Send>;

/// A searchable data table.
///
/// # Example
///
/// ```ignore
/// let mut table = TableView::new(rows, columns)
///     .with_title(" People ")
///     .with_height(12)
///     .with_renderer(RendererKind::Kit);
/// table.focus();
/// table.set_query("design");
/// ```
pub struct TableView {
    rows: Vec<Row>,
    columns: Vec<Column>,
    query: String,
    visible: Vec<usize>,
    selected: Option<RowId>,
    cursor: RovingFocus,
    focus: bool,
    height: Option<u16>,
    width: Option<u16>,
    title: String,
    renderer: RendererKind,
    style: TableStyle,
    key_bindings: TableKeyBindings,
    on_select: Option<SelectFn>,
    body: StdCell<Rect>,
    offset: StdCell<usize>,
}

impl TableView {
    /// Create a view over `rows` with an empty query.
    pub fn new(rows: Vec<Row>, columns: Vec<Column>) -> Self {
        let visible = (0..rows.len()).collect();
        Self {
            rows,
            columns,
            query: String::new(),
            visible,
            selected: None,
            cursor: RovingFocus::new(),
            focus: false,
            height: None,
            width: None,
            title: String::new(),
            renderer: RendererKind::default(),
            style: TableStyle::default(),
            key_bindings: TableKeyBindings::default(),
            on_select: None,
            body: StdCell::new(Rect::default()),
            offset: StdCell::new(0),
        }
    }

    /// Choose the renderer.
    pub fn with_renderer(mut self, renderer: RendererKind) -> Self {
        self.renderer = renderer;
        self
    }

    /// Cap the rendered height (including border and header).
    pub fn with_height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    /// Cap the rendered width.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the border title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Set custom key bindings.
    pub fn with_key_bindings(mut self, bindings: TableKeyBindings) -> Self {
        self.key_bindings = bindings;
        self
    }

    /// Start with a search query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    /// Call `f` on every activation, in addition to [`Message::Activated`].
    pub fn on_select(mut self, f: impl Fn(&Activation) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Get a reference to the current key bindings.
    pub fn key_bindings(&self) -> &TableKeyBindings {
        &self.key_bindings
    }

    pub fn renderer(&self) -> RendererKind {
        self.renderer
    }

    pub fn set_renderer(&mut self, renderer: RendererKind) {
        self.renderer = renderer;
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Re-filter with `query`. Selection and focus position are kept as is.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the rows and re-filter.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.refilter();
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows matching the query, in order.
    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible.iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Id of the selected row.
    pub fn selected(&self) -> Option<&RowId> {
        self.selected.as_ref()
    }

    /// The selected row, looked up among all rows.
    pub fn selected_row(&self) -> Option<&Row> {
        let id = self.selected.as_ref()?;
        self.rows.iter().find(|r| &r.id == id)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Raw focus position, possibly stale.
    pub fn focus_index(&self) -> Option<usize> {
        self.cursor.index()
    }

    /// The row under focus, if the position is not stale.
    pub fn focused_row(&self) -> Option<&Row> {
        let pos = self.cursor.current(self.visible.len())?;
        Some(&self.rows[self.visible[pos]])
    }

    /// Text shown instead of rows, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        if !self.visible.is_empty() {
            None
        } else if self.rows.is_empty() {
            Some(NO_DATA)
        } else {
            Some(NO_MATCHES)
        }
    }

    /// Visible-row position under a screen cell, from the last render.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let body = self.body.get();
        if !body.contains(Position::new(column, row)) {
            return None;
        }
        let pos = self.offset.get() + (row - body.y) as usize;
        (pos < self.visible.len()).then_some(pos)
    }

    /// Accessibility snapshot of the current state.
    pub fn accessibility(&self) -> GridSnapshot {
        let focused = self.cursor.current(self.visible.len());
        let rows = self
            .visible
            .iter()
            .enumerate()
            .map(|(position, &i)| {
                let row = &self.rows[i];
                RowSnapshot {
                    id: row.id.clone(),
                    position,
                    selected: self.selected.as_ref() == Some(&row.id),
                    focusable: true,
                    focused: focused == Some(position),
                    cells: self
                        .columns
                        .iter()
                        .map(|col| CellSnapshot {
                            column: col.id.clone(),
                            title: col.render(row),
                        })
                        .collect(),
                }
            })
            .collect();
        GridSnapshot {
            role: Role::Grid,
            label: self.title.trim().to_string(),
            rows,
            status: self.placeholder().map(str::to_string),
        }
    }

    fn refilter(&mut self) {
        self.visible = filter_indices(&self.rows, &self.columns, &self.query);
        log::trace!(
            "table query {:?} matches {}/{} rows",
            self.query,
            self.visible.len(),
            self.rows.len()
        );
    }

    fn activate(&mut self, pos: usize) -> Command<Message> {
        let Some(&index) = self.visible.get(pos) else {
            return Command::none();
        };
        let row = self.rows[index].clone();
        self.cursor.set(pos);
        self.selected = Some(row.id.clone());
        let values = self.columns.iter().map(|col| col.render(&row)).collect();
        let activation = Activation { row, values };
        log::debug!("table row {} activated", activation.row.id);
        if let Some(ref f) = self.on_select {
            f(&activation);
        }
        Command::message(Message::Activated(activation))
    }

    fn sized(&self, area: Rect) -> Rect {
        Rect {
            width: self.width.map_or(area.width, |w| w.min(area.width)),
            height: self.height.map_or(area.height, |h| h.min(area.height)),
            ..area
        }
    }

    fn grid(&self, offset: usize) -> Grid<'_> {
        let count = self.visible.len();
        Grid {
            headers: self.columns.iter().map(|c| c.header.as_str()).collect(),
            widths: self.columns.iter().map(|c| c.width.constraint()).collect(),
            rows: self
                .visible
                .iter()
                .map(|&i| {
                    let row = &self.rows[i];
                    GridRow {
                        cells: self
                            .columns
                            .iter()
                            .map(|col| single_line(&col.render(row)))
                            .collect(),
                        selected: self.selected.as_ref() == Some(&row.id),
                    }
                })
                .collect(),
            offset,
            focused: if self.focus {
                self.cursor.current(count)
            } else {
                None
            },
            placeholder: self.placeholder(),
            style: &self.style,
        }
    }
}

impl Component for TableView {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        let count = self.visible.len();
        match msg {
            Message::KeyPress(key) if self.focus => {
                if self.key_bindings.up.matches(&key) {
                    self.cursor.prev(count);
                } else if self.key_bindings.down.matches(&key) {
                    self.cursor.next(count);
                } else if self.key_bindings.first.matches(&key) {
                    self.cursor.home(count);
                } else if self.key_bindings.last.matches(&key) {
                    self.cursor.end(count);
                } else if self.key_bindings.activate.matches(&key) {
                    if let Some(pos) = self.cursor.current(count) {
                        return self.activate(pos);
                    }
                }
                Command::none()
            }
            Message::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    match self.row_at(mouse.column, mouse.row) {
                        Some(pos) => self.activate(pos),
                        None => Command::none(),
                    }
                }
                MouseEventKind::ScrollDown
                    if self.body.get().contains(Position::new(mouse.column, mouse.row)) =>
                {
                    self.cursor.next(count);
                    Command::none()
                }
                MouseEventKind::ScrollUp
                    if self.body.get().contains(Position::new(mouse.column, mouse.row)) =>
                {
                    self.cursor.prev(count);
                    Command::none()
                }
                _ => Command::none(),
            },
            Message::FocusRow(pos) => {
                self.cursor.set(pos);
                Command::none()
            }
            Message::KeyPress(_) | Message::Activated(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let area = self.sized(area);
        let border = if self.focus {
            self.style.focused_border
        } else {
            self.style.unfocused_border
        };
        let block = border_block(&self.title, border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let body = body_area(inner);
        let offset = self
            .cursor
            .scroll(self.offset.get(), body.height as usize, self.visible.len());
        self.offset.set(offset);
        self.body.set(body);

        self.renderer
            .renderer()
            .render(frame, inner, &self.grid(offset));
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use gridpick_core::testing::buffer_to_string;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Message {
        Message::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").with_width(10),
            Column::new("team", "Team").with_width(16),
            Column::new("age", "Age").with_width(4),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new(1).with("name", "Alice").with("team", "Design").with("age", 34),
            Row::new(2).with("name", "Bob").with("team", "Platform").with("age", 41),
            Row::new(3).with("name", "Carol").with("team", "design systems").with("age", 29),
        ]
    }

    fn table() -> TableView {
        let mut t = TableView::new(rows(), columns());
        t.focus();
        t
    }

    fn draw(t: &TableView, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| t.view(f, f.area())).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn activation(cmd: Command<Message>) -> Option<Activation> {
        match cmd.into_message() {
            Some(Message::Activated(a)) => Some(a),
            _ => None,
        }
    }

    #[test]
    fn down_and_up_wrap() {
        let mut t = table();
        t.update(key(KeyCode::Down));
        assert_eq!(t.focus_index(), Some(0));
        t.update(key(KeyCode::Down));
        t.update(key(KeyCode::Down));
        t.update(key(KeyCode::Down));
        assert_eq!(t.focus_index(), Some(0));
        t.update(key(KeyCode::Up));
        assert_eq!(t.focus_index(), Some(2));
    }

    #[test]
    fn up_from_nothing_goes_to_last() {
        let mut t = table();
        t.update(key(KeyCode::Up));
        assert_eq!(t.focus_index(), Some(2));
    }

    #[test]
    fn home_and_end() {
        let mut t = table();
        t.update(key(KeyCode::End));
        assert_eq!(t.focus_index(), Some(2));
        t.update(key(KeyCode::Home));
        assert_eq!(t.focus_index(), Some(0));
    }

    #[test]
    fn navigation_is_within_filtered_rows() {
        let mut t = table();
        t.set_query("design");
        t.update(key(KeyCode::End));
        assert_eq!(t.focus_index(), Some(1));
        assert_eq!(t.focused_row().map(|r| &r.id), Some(&RowId::Int(3)));
    }

    #[test]
    fn unfocused_ignores_keys() {
        let mut t = table();
        t.blur();
        t.update(key(KeyCode::Down));
        assert_eq!(t.focus_index(), None);
    }

    #[test]
    fn enter_activates_with_every_column() {
        let mut t = table();
        t.update(key(KeyCode::Down));
        t.update(key(KeyCode::Down));
        let a = activation(t.update(key(KeyCode::Enter))).expect("activation");
        assert_eq!(a.row.id, RowId::Int(2));
        assert_eq!(a.values, vec!["Bob", "Platform", "41"]);
        assert_eq!(t.selected(), Some(&RowId::Int(2)));
    }

    #[test]
    fn space_activates_too() {
        let mut t = table();
        t.update(key(KeyCode::Home));
        assert!(activation(t.update(key(KeyCode::Char(' ')))).is_some());
        assert_eq!(t.selected(), Some(&RowId::Int(1)));
    }

    #[test]
    fn enter_without_focus_position_does_nothing() {
        let mut t = table();
        assert!(t.update(key(KeyCode::Enter)).is_none());
        assert_eq!(t.selected(), None);
    }

    #[test]
    fn callback_runs_once_per_activation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let mut t = TableView::new(rows(), columns()).on_select(move |a| {
            assert_eq!(a.values.len(), 3);
            seen.fetch_add(1, Ordering::SeqCst);
        });
        t.focus();
        t.update(key(KeyCode::Down));
        let cmd = t.update(key(KeyCode::Enter));
        assert_eq!(cmd.into_messages().len(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn refilter_keeps_selection_and_focus() {
        let mut t = table();
        t.update(key(KeyCode::End));
        t.update(key(KeyCode::Enter));
        t.set_query("bob");
        assert_eq!(t.selected(), Some(&RowId::Int(3)));
        assert_eq!(t.focus_index(), Some(2));
        t.set_query("");
        assert_eq!(t.focused_row().map(|r| &r.id), Some(&RowId::Int(3)));
    }

    #[test]
    fn stale_focus_is_inert_until_moved() {
        let mut t = table();
        t.update(key(KeyCode::End)); // position 2
        t.set_query("bob"); // one row left
        assert!(t.focused_row().is_none());
        assert!(t.update(key(KeyCode::Enter)).is_none());
        t.update(key(KeyCode::Down));
        assert_eq!(t.focus_index(), Some(0));
        let a = activation(t.update(key(KeyCode::Enter))).expect("activation");
        assert_eq!(a.row.id, RowId::Int(2));
    }

    #[test]
    fn empty_table_says_no_data() {
        let mut t = TableView::new(Vec::new(), columns());
        t.focus();
        t.update(key(KeyCode::Down));
        assert_eq!(t.focus_index(), None);
        assert_eq!(t.placeholder(), Some(NO_DATA));
        for kind in [RendererKind::Plain, RendererKind::Kit] {
            t.set_renderer(kind);
            assert!(draw(&t, 40, 6).contains("No data"));
        }
    }

    #[test]
    fn filtered_out_table_says_no_matches() {
        let mut t = table();
        t.set_query("zzz");
        assert_eq!(t.placeholder(), Some(NO_MATCHES));
        for kind in [RendererKind::Plain, RendererKind::Kit] {
            t.set_renderer(kind);
            let screen = draw(&t, 40, 6);
            assert!(screen.contains("No matches"));
            assert!(!screen.contains("No data"));
        }
    }

    #[test]
    fn both_renderers_show_the_same_rows() {
        for kind in [RendererKind::Plain, RendererKind::Kit] {
            let mut t = table().with_renderer(kind);
            t.set_query("design");
            let screen = draw(&t, 40, 6);
            let lines: Vec<&str> = screen.lines().collect();
            assert!(lines[1].contains("Name"), "{kind:?}: {screen}");
            assert!(lines[2].contains("Alice"), "{kind:?}: {screen}");
            assert!(lines[3].contains("Carol"), "{kind:?}: {screen}");
            assert!(!screen.contains("Bob"), "{kind:?}: {screen}");
        }
    }

    #[test]
    fn long_cells_are_truncated_but_title_keeps_full_text() {
        let narrow = || vec![Column::new("team", "Team").with_width(6)];
        for kind in [RendererKind::Plain, RendererKind::Kit] {
            let t = TableView::new(rows(), narrow()).with_renderer(kind);
            let screen = draw(&t, 20, 6);
            assert!(screen.contains("Platf…"), "{kind:?}: {screen}");
            assert_eq!(t.accessibility().rows[1].cells[0].title, "Platform");
        }
    }

    #[test]
    fn click_activates_row_under_pointer() {
        for kind in [RendererKind::Plain, RendererKind::Kit] {
            let mut t = TableView::new(rows(), columns()).with_renderer(kind);
            draw(&t, 40, 8);
            // Border at y=0, header at y=1, first body row at y=2.
            let a = activation(t.update(click(3, 3))).expect("activation");
            assert_eq!(a.row.id, RowId::Int(2));
            assert_eq!(t.focus_index(), Some(1));
            assert!(t.update(click(3, 1)).is_none());
            assert!(t.update(click(3, 6)).is_none());
        }
    }

    #[test]
    fn wheel_moves_focus_without_keyboard_focus() {
        let mut t = TableView::new(rows(), columns());
        draw(&t, 40, 8);
        let wheel = |kind, row| {
            Message::Mouse(MouseEvent {
                kind,
                column: 3,
                row,
                modifiers: KeyModifiers::NONE,
            })
        };
        t.update(wheel(MouseEventKind::ScrollDown, 3));
        assert_eq!(t.focus_index(), Some(0));
        t.update(wheel(MouseEventKind::ScrollUp, 3));
        assert_eq!(t.focus_index(), Some(2));
        // Over the header, outside the body.
        t.update(wheel(MouseEventKind::ScrollDown, 1));
        assert_eq!(t.focus_index(), Some(2));
        // Keys still need focus.
        t.update(key(KeyCode::Down));
        assert_eq!(t.focus_index(), Some(2));
    }

    #[test]
    fn focused_row_scrolls_into_view() {
        let mut rows = Vec::new();
        for i in 0..20 {
            rows.push(Row::new(i).with("name", format!("person-{i:02}")));
        }
        let mut t = TableView::new(rows, vec![Column::new("name", "Name")]).with_height(7);
        t.focus();
        t.update(key(KeyCode::End));
        let screen = draw(&t, 30, 10);
        assert!(screen.contains("person-19"));
        assert!(!screen.contains("person-00"));
        // Body is 4 rows tall, so clicking its last line hits the focused row.
        let a = activation(t.update(click(2, 5))).expect("activation");
        assert_eq!(a.row.id, RowId::Int(19));
    }

    #[test]
    fn focused_row_is_highlighted_only_while_focused() {
        let mut t = table();
        t.update(key(KeyCode::Down));
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal.draw(|f| t.view(f, f.area())).unwrap();
        let cell = &terminal.backend().buffer()[(2, 2)];
        assert!(cell.modifier.contains(Modifier::REVERSED));

        t.blur();
        terminal.draw(|f| t.view(f, f.area())).unwrap();
        let cell = &terminal.backend().buffer()[(2, 2)];
        assert!(!cell.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn accessibility_snapshot_tracks_state() {
        let mut t = table().with_title(" People ");
        t.update(key(KeyCode::Down));
        t.update(key(KeyCode::Down));
        t.update(key(KeyCode::Enter));
        t.update(key(KeyCode::Down));

        let snap = t.accessibility();
        assert_eq!(snap.role, Role::Grid);
        assert_eq!(snap.label, "People");
        assert_eq!(snap.rows.len(), 3);
        assert!(snap.rows.iter().all(|r| r.focusable));
        assert_eq!(snap.focused_row().map(|r| r.position), Some(2));
        let selected: Vec<_> = snap.selected_rows().map(|r| r.id.clone()).collect();
        assert_eq!(selected, vec![RowId::Int(2)]);
        assert_eq!(snap.rows[0].cells[2].title, "34");
        assert_eq!(snap.status, None);
    }

    #[test]
    fn design_example() {
        let rows = vec![
            Row::new(1).with("name", "Alice").with("team", "Design"),
            Row::new(2).with("name", "Bob").with("team", "Platform"),
            Row::new(3).with("name", "Carol").with("team", json!("design systems")),
        ];
        let cols = vec![Column::new("name", "Name"), Column::new("team", "Team")];
        let mut t = TableView::new(rows, cols).with_query("design");
        t.focus();
        let ids: Vec<_> = t.visible_rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![RowId::Int(1), RowId::Int(3)]);
        t.update(key(KeyCode::Down));
        t.update(key(KeyCode::Down));
        let a = activation(t.update(key(KeyCode::Enter))).expect("activation");
        assert_eq!(a.values, vec!["Carol", "design systems"]);
    }

    #[test]
    fn replacing_rows_applies_the_current_query() {
        let mut t = table();
        t.set_query("design");
        t.set_rows(vec![
            Row::new("x").with("name", "Dana").with("team", "Design"),
            Row::new("y").with("name", "Eve").with("team", "Sales"),
        ]);
        let names: Vec<_> = t.visible_rows().iter().map(|r| r.id.clone()).collect();
        assert_eq!(names, vec![RowId::from("x")]);
        assert_eq!(t.query(), "design");
    }
}
