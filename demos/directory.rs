//! # Directory Example
//!
//! A staff directory showing the gridpick widgets together:
//! - Two comboboxes over the same rows, one per table renderer
//! - A standalone table with its own search field
//! - Mouse support, including closing an open dropdown by clicking elsewhere
//!
//! Run with: `cargo run --example directory`
//! Pass `--kit` to start the standalone table with the kit renderer, and set
//! `GRIDPICK_LOG=path` to write debug logs to a file.

use gridpick::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use gridpick::ratatui::layout::{Constraint, Layout, Position, Rect};
use gridpick::ratatui::style::{Color, Modifier, Style};
use gridpick::ratatui::text::{Line, Span};
use gridpick::ratatui::widgets::Paragraph;
use gridpick::ratatui::Frame;
use gridpick::widgets::chrome::focus_block;
use gridpick::widgets::combobox::{self, Combobox};
use gridpick::widgets::data::{Column, Row};
use gridpick::widgets::focus::FocusGroup;
use gridpick::widgets::key::{help_line, KeyMap};
use gridpick::widgets::render::RendererKind;
use gridpick::widgets::table_view::{self, TableView};
use gridpick::widgets::text_input::{self, TextInput};
use gridpick::{
    run_with, terminal_events, Command, Component, Model, ProgramOptions,
    Subscription, TerminalEvent,
};
use serde_json::{json, Value};
use std::cell::Cell as StdCell;

const USERS: usize = 0;
const ROLES: usize = 1;
const SEARCH: usize = 2;
const TABLE: usize = 3;

struct Directory {
    users: Combobox,
    roles: Combobox,
    search: TextInput,
    table: TableView,
    focus: FocusGroup<4>,
    last: Option<String>,
    search_area: StdCell<Rect>,
    table_area: StdCell<Rect>,
}

#[derive(Debug)]
enum Msg {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Users(combobox::Message),
    Roles(combobox::Message),
    Search(text_input::Message),
    Table(table_view::Message),
}

struct Flags {
    rows: Vec<Row>,
    renderer: RendererKind,
}

fn sample_users() -> Value {
    json!([
        { "id": 1, "name": "John Doe", "email": "john.doe@company.com", "department": "Engineering", "role": "Senior Developer", "status": "Active", "joinDate": "2022-01-15", "salary": 95000 },
        { "id": 2, "name": "Jane Smith", "email": "jane.smith@company.com", "department": "Design", "role": "UI/UX Designer", "status": "Active", "joinDate": "2021-08-22", "salary": 78000 },
        { "id": 3, "name": "Mike Johnson", "email": "mike.johnson@company.com", "department": "Engineering", "role": "Tech Lead", "status": "Active", "joinDate": "2020-03-10", "salary": 120000 },
        { "id": 4, "name": "Sarah Wilson", "email": "sarah.wilson@company.com", "department": "Marketing", "role": "Marketing Manager", "status": "Active", "joinDate": "2021-11-05", "salary": 85000 },
        { "id": 5, "name": "David Brown", "email": "david.brown@company.com", "department": "Engineering", "role": "Junior Developer", "status": "Inactive", "joinDate": "2023-02-18", "salary": 65000 },
        { "id": 6, "name": "Lisa Davis", "email": "lisa.davis@company.com", "department": "HR", "role": "HR Specialist", "status": "Active", "joinDate": "2022-06-30", "salary": 70000 },
        { "id": 7, "name": "Tom Anderson", "email": "tom.anderson@company.com", "department": "Sales", "role": "Sales Representative", "status": "Active", "joinDate": "2021-09-12", "salary": 60000 },
        { "id": 8, "name": "Emily Taylor", "email": "emily.taylor@company.com", "department": "Design", "role": "Product Designer", "status": "Active", "joinDate": "2022-04-25", "salary": 82000 },
        { "id": 9, "name": "Chris Martinez", "email": "chris.martinez@company.com", "department": "Engineering", "role": "DevOps Engineer", "status": "Active", "joinDate": "2020-12-01", "salary": 105000 },
        { "id": 10, "name": "Amanda White", "email": "amanda.white@company.com", "department": "Finance", "role": "Financial Analyst", "status": "Active", "joinDate": "2023-01-09", "salary": 72000 },
        { "id": 11, "name": "Kevin Lee", "email": "kevin.lee@company.com", "department": "Engineering", "role": "QA Engineer", "status": "Active", "joinDate": "2022-10-17", "salary": 68000 },
        { "id": 12, "name": "Rachel Green", "email": "rachel.green@company.com", "department": "Marketing", "role": "Content Strategist", "status": "Inactive", "joinDate": "2021-05-14", "salary": 64000 }
    ])
}

/// `95000` -> `$95,000`.
fn dollars(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").with_width(16),
        Column::new("email", "Email").with_width(26),
        Column::new("department", "Department").with_width(12),
        Column::new("role", "Role").with_width(20),
        Column::new("status", "Status").with_width(9),
        Column::new("joinDate", "Join Date").with_width(11),
        Column::derived("salary", "Salary", |row| match row.get("salary") {
            Some(Value::Number(n)) => n.as_i64().map_or(Value::Null, |n| dollars(n).into()),
            _ => Value::Null,
        })
        .with_width(9),
    ]
}

impl Directory {
    fn sync_focus(&mut self) {
        let slot = self.focus.focused();
        if slot == USERS {
            self.users.focus();
        } else {
            self.users.blur();
        }
        if slot == ROLES {
            self.roles.focus();
        } else {
            self.roles.blur();
        }
        if slot == SEARCH {
            self.search.focus();
        } else {
            self.search.blur();
        }
        if slot == TABLE {
            self.table.focus();
        } else {
            self.table.blur();
        }
    }

    fn focus_slot(&mut self, slot: usize) {
        self.focus.focus(slot);
        self.sync_focus();
    }

    /// Whether `slot` holds a combobox that is open.
    fn open_combobox(&self, slot: usize) -> bool {
        match slot {
            USERS => self.users.is_open(),
            ROLES => self.roles.is_open(),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        let slot = self.focus.focused();
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return Command::quit(),
                KeyCode::Char('r') => {
                    let next = match self.table.renderer() {
                        RendererKind::Plain => RendererKind::Kit,
                        RendererKind::Kit => RendererKind::Plain,
                    };
                    self.table.set_renderer(next);
                    return Command::none();
                }
                _ => {}
            }
        }
        if !self.open_combobox(slot) {
            match key.code {
                KeyCode::Tab => {
                    self.focus.focus_next();
                    self.sync_focus();
                    return Command::none();
                }
                KeyCode::BackTab => {
                    self.focus.focus_prev();
                    self.sync_focus();
                    return Command::none();
                }
                KeyCode::Char('q') if slot != SEARCH => return Command::quit(),
                _ => {}
            }
        }
        match slot {
            USERS => self.update(Msg::Users(combobox::Message::KeyPress(key))),
            ROLES => self.update(Msg::Roles(combobox::Message::KeyPress(key))),
            SEARCH => self.update(Msg::Search(text_input::Message::KeyPress(key))),
            _ => self.update(Msg::Table(table_view::Message::KeyPress(key))),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Msg> {
        let (column, row) = (mouse.column, mouse.row);
        let pressed = matches!(mouse.kind, MouseEventKind::Down(_));
        // Open panels are drawn on top, so they get the first look.
        let order = if self.roles.is_open() {
            [ROLES, USERS]
        } else {
            [USERS, ROLES]
        };
        for slot in order {
            let hit = match slot {
                USERS => self.users.contains(column, row),
                _ => self.roles.contains(column, row),
            };
            if hit {
                if pressed {
                    self.focus_slot(slot);
                }
                return match slot {
                    USERS => self.update(Msg::Users(combobox::Message::Mouse(mouse))),
                    _ => self.update(Msg::Roles(combobox::Message::Mouse(mouse))),
                };
            }
        }
        let pos = Position::new(column, row);
        if self.search_area.get().contains(pos) {
            if pressed {
                self.focus_slot(SEARCH);
            }
            return Command::none();
        }
        if self.table_area.get().contains(pos) {
            if pressed {
                self.focus_slot(TABLE);
            }
            return self.update(Msg::Table(table_view::Message::Mouse(mouse)));
        }
        Command::none()
    }

    fn help(&self) -> String {
        let bindings = match self.focus.focused() {
            USERS => self.users.key_bindings().short_help(),
            ROLES => self.roles.key_bindings().short_help(),
            SEARCH => Vec::new(),
            _ => self.table.key_bindings().short_help(),
        };
        let local = help_line(&bindings);
        let global = "tab next • ctrl+r switch renderer • ctrl+c quit";
        if local.is_empty() {
            global.to_string()
        } else {
            format!("{local} • {global}")
        }
    }
}

impl Model for Directory {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let users = Combobox::new(flags.rows.clone(), columns())
            .with_display_columns(["name", "email", "department"])
            .with_placeholder("Search and select a user...")
            .with_label("User (plain)")
            .with_panel_width(100)
            .with_renderer(RendererKind::Plain);
        let roles = Combobox::new(flags.rows.clone(), columns())
            .with_display_columns(["name", "role", "status"])
            .with_placeholder("Pick someone by role...")
            .with_label("Role (kit)")
            .with_panel_width(100)
            .with_renderer(RendererKind::Kit);
        let table = TableView::new(flags.rows, columns())
            .with_title("Everyone")
            .with_renderer(flags.renderer);

        let mut app = Directory {
            users,
            roles,
            search: TextInput::new("Filter the table...").with_prompt("/ "),
            table,
            focus: FocusGroup::new(),
            last: None,
            search_area: StdCell::new(Rect::default()),
            table_area: StdCell::new(Rect::default()),
        };
        app.sync_focus();
        let setup = Command::batch([
            Command::enable_mouse_capture(),
            Command::set_title("gridpick directory"),
        ]);
        (app, setup)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Mouse(mouse) => self.handle_mouse(mouse),
            Msg::Paste(text) => match self.focus.focused() {
                USERS => self.update(Msg::Users(combobox::Message::Paste(text))),
                ROLES => self.update(Msg::Roles(combobox::Message::Paste(text))),
                SEARCH => self.update(Msg::Search(text_input::Message::Paste(text))),
                _ => Command::none(),
            },
            Msg::Users(combobox::Message::Selected(choice))
            | Msg::Roles(combobox::Message::Selected(choice)) => {
                self.last = Some(choice.values.join(" | "));
                Command::none()
            }
            Msg::Users(combobox::Message::Cleared) | Msg::Roles(combobox::Message::Cleared) => {
                self.last = None;
                Command::none()
            }
            Msg::Users(m) => self.users.update(m).map(Msg::Users),
            Msg::Roles(m) => self.roles.update(m).map(Msg::Roles),
            Msg::Search(m) => {
                let cmd = self.search.update(m);
                self.table.set_query(self.search.value());
                cmd.map(Msg::Search)
            }
            Msg::Table(table_view::Message::Activated(activation)) => {
                self.last = Some(activation.values.join(" | "));
                Command::none()
            }
            Msg::Table(m) => self.table.update(m).map(Msg::Table),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let [title_area, pickers_area, search_area, table_area, status_area, help_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "gridpick",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" staff directory"),
            ])),
            title_area,
        );

        let search_block = focus_block("Search", self.search.focused());
        let inner = search_block.inner(search_area);
        frame.render_widget(search_block, search_area);
        self.search.view(frame, inner);
        self.search_area.set(search_area);

        self.table.view(frame, table_area);
        self.table_area.set(table_area);

        let status = match self.last {
            Some(ref text) => Line::from(vec![
                Span::styled("Selected: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(text.as_str()),
            ]),
            None => Line::styled("Nothing selected", Style::default().fg(Color::DarkGray)),
        };
        frame.render_widget(Paragraph::new(status), status_area);
        frame.render_widget(
            Paragraph::new(self.help()).style(Style::default().fg(Color::DarkGray)),
            help_area,
        );

        // Comboboxes last so an open panel covers what is below it.
        let [users_area, roles_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
                .spacing(1u16)
                .areas(pickers_area);
        if self.users.is_open() {
            self.roles.view(frame, roles_area);
            self.users.view(frame, users_area);
        } else {
            self.users.view(frame, users_area);
            self.roles.view(frame, roles_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Msg::Key(key)),
            TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            _ => None,
        })];
        subs.extend(self.users.subscriptions().into_iter().map(|s| s.map(Msg::Users)));
        subs.extend(self.roles.subscriptions().into_iter().map(|s| s.map(Msg::Roles)));
        subs
    }
}

#[gridpick::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<Row> = serde_json::from_value(sample_users())?;
    let renderer = if std::env::args().any(|arg| arg == "--kit") {
        RendererKind::Kit
    } else {
        RendererKind::Plain
    };
    let options = ProgramOptions {
        log_file: std::env::var_os("GRIDPICK_LOG").map(Into::into),
        ..ProgramOptions::default()
    };

    let app = run_with::<Directory>(Flags { rows, renderer }, options).await?;
    if let Some(last) = app.last {
        println!("{last}");
    }
    Ok(())
}
