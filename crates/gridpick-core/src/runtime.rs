//! Terminal ownership and the event loop.

use crate::command::{Command, CommandInner, TerminalCommand};
use crate::model::Model;
use crate::subscription::SubscriptionManager;
use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stderr, stdout, Stderr, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Upper bound on messages handled per wakeup before a redraw gets a turn.
const MAX_BATCH: usize = 64;

/// Where the UI is drawn.
///
/// Switch to [`Stderr`](OutputTarget::Stderr) when stdout is piped so the UI
/// still reaches the terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

enum Output {
    Stdout(Stdout),
    Stderr(Stderr),
}

impl Output {
    fn new(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Output::Stdout(stdout()),
            OutputTarget::Stderr => Output::Stderr(stderr()),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::Stderr(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::Stderr(w) => w.flush(),
        }
    }
}

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// Terminal setup, drawing or teardown failed, or the log file could
    /// not be opened.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration options for a [`Program`].
///
/// Override only what you need with struct update syntax:
///
/// ```rust,ignore
/// use gridpick_core::ProgramOptions;
///
/// let opts = ProgramOptions {
///     mouse_capture: true,
///     title: Some("Directory".into()),
///     log_file: Some("gridpick.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
pub struct ProgramOptions {
    /// Redraw rate cap (default: 60, clamped to 1..=120).
    pub fps: u32,
    /// Draw on the alternate screen (default: true).
    pub alt_screen: bool,
    /// Capture mouse events (default: false). Widgets that react to clicks
    /// need this, or [`Command::enable_mouse_capture`].
    pub mouse_capture: bool,
    /// Deliver pastes as a single event (default: true).
    pub bracketed_paste: bool,
    pub title: Option<String>,
    /// Restore the terminal before the panic message prints (default: true).
    pub catch_panics: bool,
    /// End the program on a Ctrl-C signal (default: true).
    pub handle_signals: bool,
    /// Route `log` records to this file. The UI owns the terminal, so there
    /// is no other place for diagnostics to go.
    pub log_file: Option<PathBuf>,
    /// Most verbose level written to `log_file` (default: `Debug`).
    pub log_level: log::LevelFilter,
    pub output: OutputTarget,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            mouse_capture: false,
            bracketed_paste: true,
            title: None,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            log_level: log::LevelFilter::Debug,
            output: OutputTarget::default(),
        }
    }
}

/// The terminal while a program owns it.
struct Screen {
    terminal: Terminal<CrosstermBackend<Output>>,
    alt_screen: bool,
    target: OutputTarget,
}

impl Screen {
    /// Enter raw mode and apply `options`. A failure part way through
    /// restores what was already changed.
    fn enter(options: &ProgramOptions) -> io::Result<Self> {
        if options.catch_panics {
            install_panic_hook(options.alt_screen, options.output);
        }
        enable_raw_mode()?;
        Self::configure(options)
            .inspect_err(|_| {
                let _ = leave_screen(options.alt_screen, options.output);
            })
    }

    fn configure(options: &ProgramOptions) -> io::Result<Self> {
        let mut out = Output::new(options.output);
        if options.alt_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if options.bracketed_paste {
            execute!(out, EnableBracketedPaste)?;
        }
        if options.mouse_capture {
            execute!(out, EnableMouseCapture)?;
        }
        if let Some(ref title) = options.title {
            execute!(out, SetTitle(title))?;
        }
        execute!(out, cursor::Hide)?;
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(out))?,
            alt_screen: options.alt_screen,
            target: options.output,
        })
    }

    fn apply(&mut self, cmd: TerminalCommand) {
        let out = self.terminal.backend_mut();
        let result = match cmd {
            TerminalCommand::EnableMouseCapture => execute!(out, EnableMouseCapture),
            TerminalCommand::SetTitle(ref title) => execute!(out, SetTitle(title)),
        };
        if let Err(err) = result {
            log::warn!("terminal command {cmd:?} failed: {err}");
        }
    }

    fn leave(&self) -> io::Result<()> {
        leave_screen(self.alt_screen, self.target)
    }
}

/// The program runtime: owns the terminal, feeds messages to the model and
/// redraws it.
///
/// Each wakeup handles the waiting messages, reconciles subscriptions, and
/// marks the screen dirty; the next frame tick redraws it.  Messages from
/// [`Command::after_render`] are held until that redraw has completed.
///
/// ```rust,ignore
/// use gridpick_core::{Program, ProgramError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ProgramError> {
///     let model = Program::<Directory>::new(flags)?.run().await?;
///     Ok(())
/// }
/// ```
pub struct Program<M: Model> {
    model: M,
    screen: Screen,
    tx: mpsc::UnboundedSender<M::Message>,
    rx: mpsc::UnboundedReceiver<M::Message>,
    subscriptions: SubscriptionManager<M::Message>,
    deferred: Vec<M::Message>,
    fps: u32,
    handle_signals: bool,
    dirty: bool,
    quit: bool,
}

impl<M: Model> Program<M> {
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// The log file is opened before the terminal is touched, so a bad path
    /// fails without leaving the terminal in raw mode.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(ref path) = options.log_file {
            init_logging(path, options.log_level)?;
        }

        let (model, init_cmd) = M::init(flags);
        let screen = Screen::enter(&options)?;
        let (tx, rx) = mpsc::unbounded_channel();

        let mut program = Self {
            model,
            screen,
            subscriptions: SubscriptionManager::new(tx.clone()),
            tx,
            rx,
            deferred: Vec::new(),
            fps: options.fps.clamp(1, 120),
            handle_signals: options.handle_signals,
            dirty: true,
            quit: false,
        };
        log::debug!("program started ({} fps)", program.fps);

        program.apply(init_cmd);
        program.subscriptions.reconcile(program.model.subscriptions());
        Ok(program)
    }

    /// A handle for sending messages into the program from elsewhere.
    pub fn sender(&self) -> mpsc::UnboundedSender<M::Message> {
        self.tx.clone()
    }

    /// Run until the model quits, then restore the terminal and hand the
    /// model back.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let outcome = self.event_loop().await;

        log::debug!("program stopping");
        self.subscriptions.shutdown();
        self.screen.leave()?;

        outcome.map(|()| self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.draw()?;

        let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(self.fps)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.handle_signals;

        while !self.quit {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    log::debug!("ctrl+c signal received");
                    break;
                }

                Some(msg) = self.rx.recv() => {
                    self.handle(msg);
                    for _ in 1..MAX_BATCH {
                        match self.rx.try_recv() {
                            Ok(msg) => self.handle(msg),
                            Err(_) => break,
                        }
                    }
                }

                _ = frames.tick() => {
                    if self.dirty {
                        self.draw()?;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.apply(cmd);
        self.subscriptions.reconcile(self.model.subscriptions());
        self.dirty = true;
    }

    fn apply(&mut self, cmd: Command<M::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => {
                let _ = self.tx.send(msg);
            }
            CommandInner::AfterRender(msg) => {
                self.deferred.push(msg);
                self.dirty = true;
            }
            CommandInner::Quit => self.quit = true,
            CommandInner::Terminal(cmd) => self.screen.apply(cmd),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.apply(cmd);
                }
            }
        }
    }

    /// Draw a frame, then release the messages that were waiting for it.
    fn draw(&mut self) -> Result<(), ProgramError> {
        let model = &self.model;
        self.screen.terminal.draw(|frame| model.view(frame))?;
        self.dirty = false;
        for msg in self.deferred.drain(..) {
            let _ = self.tx.send(msg);
        }
        Ok(())
    }
}

fn init_logging(path: &Path, level: log::LevelFilter) -> Result<(), ProgramError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    // The embedding application may have installed a logger already.
    if simplelog::WriteLogger::init(level, simplelog::Config::default(), file).is_err() {
        log::debug!("logger already installed, leaving it in place");
    }
    Ok(())
}

fn install_panic_hook(alt_screen: bool, target: OutputTarget) {
    static INSTALLED: Once = Once::new();
    INSTALLED.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = leave_screen(alt_screen, target);
            previous(info);
        }));
    });
}

/// Undo everything [`Screen::enter`] may have changed. Keeps going past
/// individual failures and reports only raw mode, the one that leaves the
/// terminal unusable.
fn leave_screen(alt_screen: bool, target: OutputTarget) -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut out = Output::new(target);
    execute!(out, DisableBracketedPaste).ok();
    execute!(out, DisableMouseCapture).ok();
    execute!(out, cursor::Show).ok();
    if alt_screen {
        execute!(out, LeaveAlternateScreen).ok();
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = ProgramOptions::default();
        assert_eq!(opts.fps, 60);
        assert!(opts.alt_screen);
        assert!(!opts.mouse_capture);
        assert!(opts.log_file.is_none());
        assert_eq!(opts.log_level, log::LevelFilter::Debug);
        assert_eq!(opts.output, OutputTarget::Stdout);
    }

    #[test]
    fn missing_log_directory_is_an_error() {
        let path = std::env::temp_dir()
            .join("gridpick-no-such-dir")
            .join("nested")
            .join("run.log");
        let err = init_logging(&path, log::LevelFilter::Debug);
        assert!(matches!(err, Err(ProgramError::Io(_))));
    }
}
