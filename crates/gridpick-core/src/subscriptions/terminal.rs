use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc};
use tokio::task::AbortHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

const HUB_CAPACITY: usize = 256;

/// The running event pump: its broadcast sender and its task.
struct Pump {
    tx: broadcast::Sender<TerminalEvent>,
    task: AbortHandle,
}

/// The shared event pump, present while it runs.
///
/// crossterm hands each event to exactly one `EventStream`, so every terminal
/// subscription reads from this broadcast channel instead of opening its own
/// stream.
static HUB: Mutex<Option<Pump>> = Mutex::new(None);

/// Marker type identifying the app-wide terminal event subscription.
pub struct TerminalEvents;

/// Marker type identifying per-widget pointer press subscriptions.
pub struct PointerPresses;

fn hub_receiver() -> broadcast::Receiver<TerminalEvent> {
    connect(&HUB, |tx| tokio::spawn(pump(tx)).abort_handle())
}

/// Join the running pump, or start one with `start`.
///
/// A pump without receivers is idle (or belongs to a runtime that no longer
/// exists). It is aborted before its replacement starts so that only one
/// `EventStream` is ever reading.
fn connect(
    hub: &Mutex<Option<Pump>>,
    start: impl FnOnce(broadcast::Sender<TerminalEvent>) -> AbortHandle,
) -> broadcast::Receiver<TerminalEvent> {
    let mut hub = hub.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(current) = hub.as_ref() {
        if current.tx.receiver_count() > 0 {
            return current.tx.subscribe();
        }
    }
    if let Some(idle) = hub.take() {
        log::debug!("stopping idle terminal event pump");
        idle.task.abort();
    }
    let (tx, rx) = broadcast::channel(HUB_CAPACITY);
    log::debug!("starting terminal event pump");
    let task = start(tx.clone());
    *hub = Some(Pump { tx, task });
    rx
}

fn release(tx: &broadcast::Sender<TerminalEvent>) {
    let mut hub = HUB.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if hub.as_ref().is_some_and(|current| current.tx.same_channel(tx)) {
        *hub = None;
    }
}

async fn pump(tx: broadcast::Sender<TerminalEvent>) {
    let mut events = EventStream::new();
    while let Some(result) = events.next().await {
        let event = match result {
            Ok(event) => TerminalEvent::from(event),
            Err(err) => {
                log::warn!("terminal event read failed: {err}");
                continue;
            }
        };
        if tx.send(event).is_err() && tx.receiver_count() == 0 {
            log::debug!("terminal event pump has no subscribers, stopping");
            break;
        }
    }
    release(&tx);
}

fn hub_subscription<Msg: Send + 'static>(
    id: SubscriptionId,
    map: Arc<dyn Fn(TerminalEvent) -> Option<Msg> + Send + Sync>,
) -> Subscription<Msg> {
    // The receiver is created inside the spawned task, so building the
    // subscription on every update cycle never touches crossterm.
    Subscription {
        id,
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let handle = tokio::spawn(async move {
                let mut stream = BroadcastStream::new(hub_receiver());
                while let Some(item) = stream.next().await {
                    match item {
                        Ok(event) => {
                            if let Some(msg) = map(event) {
                                if tx.send(msg).is_err() {
                                    break;
                                }
                            }
                        }
                        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                            log::warn!("terminal subscriber lagged, {skipped} events dropped");
                        }
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}

/// Subscribe to every terminal event (keys, mouse, resize, focus, paste).
///
/// The `map` closure returns `Some(msg)` to forward an event or `None` to
/// discard it.  There is one such subscription per program.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         TerminalEvent::Mouse(mouse) => Some(Msg::Mouse(mouse)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    hub_subscription(SubscriptionId::of::<TerminalEvents>(), Arc::new(map))
}

/// Subscribe to left-button presses anywhere on the screen.
///
/// `owner` distinguishes subscriptions held by different widgets; each
/// widget passes its own instance id.  Widgets return this only while they
/// need it (an open dropdown listening for outside clicks), and the runtime
/// stops the listener as soon as they stop returning it.
pub fn pointer_presses<Msg: Send + 'static>(
    owner: u64,
    map: impl Fn(u16, u16) -> Msg + Send + Sync + 'static,
) -> Subscription<Msg> {
    hub_subscription(
        SubscriptionId::new::<PointerPresses>(owner),
        Arc::new(move |event: TerminalEvent| {
            event.left_press().map(|(column, row)| map(column, row))
        }),
    )
}
