use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`] area.
///
/// `Component` mirrors [`Model`](crate::Model) except that
/// [`view`](Component::view) receives the area to draw into, so parents decide
/// placement.  Parents wrap the component's message type in one of their own
/// variants and lift returned commands with [`Command::map`]:
///
/// ```rust,ignore
/// use gridpick_core::{Command, Component, Model};
/// use gridpick_widgets::combobox::{self, Combobox};
///
/// #[derive(Debug)]
/// enum AppMsg { Picker(combobox::Message) }
///
/// fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::Picker(combobox::Message::Selected(choice)) => {
///             self.last_choice = Some(choice);
///             Command::none()
///         }
///         AppMsg::Picker(m) => self.picker.update(m).map(AppMsg::Picker),
///     }
/// }
///
/// fn subscriptions(&self) -> Vec<Subscription<AppMsg>> {
///     self.picker
///         .subscriptions()
///         .into_iter()
///         .map(|sub| sub.map(AppMsg::Picker))
///         .collect()
/// }
/// ```
pub trait Component: Send + 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area` of the [`Frame`].
    ///
    /// Overlays (such as an open dropdown panel) may draw outside `area`,
    /// but must stay inside `frame.area()`.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Declare active subscriptions for this component.
    ///
    /// The parent collects these and returns them from its own
    /// [`Model::subscriptions`](crate::Model::subscriptions), mapped into the
    /// parent message type.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus.
    fn focused(&self) -> bool {
        false
    }
}
