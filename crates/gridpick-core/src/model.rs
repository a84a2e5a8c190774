use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait.
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) builds the initial state and may return a
///    [`Command`].
/// 2. [`view`](Model::view) draws the state into a [`ratatui::Frame`].
/// 3. Input arrives as messages through [`Subscription`]s.
/// 4. [`update`](Model::update) handles each message and may return a
///    [`Command`] for follow-up work.
/// 5. Steps 2-4 repeat until a [`Command::quit`] is returned.
///
/// # Example
///
/// ```rust,ignore
/// use gridpick_core::{Command, Model};
/// use gridpick_widgets::table_view::{self, TableView};
/// use ratatui::Frame;
///
/// struct Directory { table: TableView }
///
/// #[derive(Debug)]
/// enum Msg { Table(table_view::Message) }
///
/// impl Model for Directory {
///     type Message = Msg;
///     type Flags = (Vec<Row>, Vec<Column>);
///
///     fn init((rows, columns): Self::Flags) -> (Self, Command<Msg>) {
///         let mut table = TableView::new(rows, columns);
///         table.focus();
///         (Directory { table }, Command::none())
///     }
///
///     fn update(&mut self, msg: Msg) -> Command<Msg> {
///         match msg {
///             Msg::Table(m) => self.table.update(m).map(Msg::Table),
///         }
///     }
///
///     fn view(&self, frame: &mut Frame) {
///         self.table.view(frame, frame.area());
///     }
/// }
/// ```
pub trait Model: Sized + Send + 'static {
    /// The application's message type.
    type Message: Send + 'static;

    /// Initialization data passed to [`Model::init`].
    ///
    /// Use `()` when no startup data is needed.
    type Flags: Send + 'static;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a command for side effects.
    ///
    /// After `update` returns, the runtime re-renders and reconciles
    /// [`subscriptions`](Model::subscriptions).
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state to a ratatui [`Frame`].
    ///
    /// Takes `&self`; widgets that need to remember where they were drawn
    /// (for mouse hit testing) keep that in interior-mutable cells.
    fn view(&self, frame: &mut Frame);

    /// Declare active subscriptions.  Called after every update.
    ///
    /// The runtime diffs the returned list against the active set by
    /// [`SubscriptionId`](crate::SubscriptionId): new ones are started and
    /// missing ones are aborted.  A component that only needs a listener in
    /// some states simply stops returning it.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
