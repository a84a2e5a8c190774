//! Side effects returned from `init` and `update`.

use std::sync::Arc;

/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Model::init`](crate::Model::init).
///
/// A command is one of: nothing, a message to deliver now, a message to
/// deliver after the next render pass, a terminal change, quitting, or a
/// batch of those.
///
/// ```rust,ignore
/// // Deliver a message once the next frame has been drawn:
/// let cmd = Command::after_render(Msg::FocusSearch);
///
/// // Lift a child's command into the parent's message type:
/// let cmd = self.picker.update(m).map(Msg::Picker);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    /// Held by the runtime until its next render pass completes.
    AfterRender(Msg),
    Quit,
    Terminal(TerminalCommand),
    Batch(Vec<Command<Msg>>),
}

/// Terminal changes applied by the runtime while the program runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Start reporting clicks, releases, wheel and drag.
    EnableMouseCapture,
    /// Set the terminal window title.
    SetTitle(String),
}

impl<Msg: Send + 'static> Command<Msg> {
    fn from_inner(inner: CommandInner<Msg>) -> Self {
        Command { inner }
    }

    pub fn none() -> Self {
        Self::from_inner(CommandInner::None)
    }

    /// Deliver `msg` to `update` as soon as possible.
    pub fn message(msg: Msg) -> Self {
        Self::from_inner(CommandInner::Message(msg))
    }

    /// Deliver `msg` once the next render pass has completed.
    ///
    /// Use this when the handler needs whatever `view` is about to draw,
    /// e.g. moving input focus into a field that only becomes visible on
    /// the next frame.
    pub fn after_render(msg: Msg) -> Self {
        Self::from_inner(CommandInner::AfterRender(msg))
    }

    /// End the program after the current batch of messages.
    pub fn quit() -> Self {
        Self::from_inner(CommandInner::Quit)
    }

    pub fn terminal(cmd: TerminalCommand) -> Self {
        Self::from_inner(CommandInner::Terminal(cmd))
    }

    /// Combine commands. `none` entries are dropped and a single survivor
    /// is returned unwrapped.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.pop() {
            None => Command::none(),
            Some(last) if cmds.is_empty() => last,
            Some(last) => {
                cmds.push(last);
                Self::from_inner(CommandInner::Batch(cmds))
            }
        }
    }

    /// Start reporting clicks, releases, wheel and drag.
    pub fn enable_mouse_capture() -> Self {
        Command::terminal(TerminalCommand::EnableMouseCapture)
    }

    pub fn set_title(title: impl Into<String>) -> Self {
        Command::terminal(TerminalCommand::SetTitle(title.into()))
    }

    /// Convert the message type, for embedding a component in a parent.
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        let f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync> = Arc::new(f);
        self.map_shared(&f)
    }

    fn map_shared<NewMsg: Send + 'static>(
        self,
        f: &Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Message(msg) => CommandInner::Message(f(msg)),
            CommandInner::AfterRender(msg) => CommandInner::AfterRender(f(msg)),
            CommandInner::Quit => CommandInner::Quit,
            CommandInner::Terminal(cmd) => CommandInner::Terminal(cmd),
            CommandInner::Batch(cmds) => {
                CommandInner::Batch(cmds.into_iter().map(|cmd| cmd.map_shared(f)).collect())
            }
        };
        Command::from_inner(inner)
    }

    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// The message of a [`message`](Command::message) command.
    pub fn into_message(self) -> Option<Msg> {
        self.try_into_message().ok()
    }

    /// Split off the message of a [`message`](Command::message) command,
    /// handing any other command back unchanged.
    pub fn try_into_message(self) -> Result<Msg, Self> {
        match self.inner {
            CommandInner::Message(msg) => Ok(msg),
            inner => Err(Self::from_inner(inner)),
        }
    }

    /// The message of an [`after_render`](Command::after_render) command.
    pub fn into_after_render(self) -> Option<Msg> {
        match self.inner {
            CommandInner::AfterRender(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// Every immediate message, in order, through nested batches.
    /// Deferred messages are not included.
    pub fn into_messages(self) -> Vec<Msg> {
        match self.inner {
            CommandInner::Message(msg) => vec![msg],
            CommandInner::Batch(cmds) => cmds.into_iter().flat_map(Command::into_messages).collect(),
            _ => Vec::new(),
        }
    }
}

impl<Msg: Send + 'static> std::fmt::Debug for Command<Msg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            CommandInner::None => f.write_str("Command::None"),
            CommandInner::Message(_) => f.write_str("Command::Message"),
            CommandInner::AfterRender(_) => f.write_str("Command::AfterRender"),
            CommandInner::Quit => f.write_str("Command::Quit"),
            CommandInner::Terminal(cmd) => write!(f, "Command::Terminal({cmd:?})"),
            CommandInner::Batch(cmds) => write!(f, "Command::Batch({})", cmds.len()),
        }
    }
}
