//! Event stream listener and dispatcher
//!
//! [`EventListener`] owns the connection to Hyprland's event socket
//! (`.socket2.sock`), reads it line by line and fans every line out to the
//! registered sinks.
//!
//! ## Architecture
//!
//! ```text
//! +---------------+      +---------+      +-------------------+
//! | reader task   | ---> | bounded | ---> | listen() loop     |
//! | (socket lines)|      | mpsc    |      | parse + dispatch  |
//! +---------------+      +---------+      +-------------------+
//! ```
//!
//! ## Dispatch order
//!
//! For each line:
//!
//! 1. the catch-all callback ([`EventListener::on_all_events`])
//! 2. the observer's [`EventHandler::all`]
//! 3. for an unknown kind: the unknown callback, then [`EventHandler::unknown`]
//! 4. for a known kind: typed decoding, then the kind's callback, then the
//!    observer method for that kind
//!
//! A decoding failure ends the session with [`HyprError::Decode`] unless the
//! listener was configured with [`DecodePolicy::Skip`].

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hypr_ipc_config::{Config, DecodePolicy, ListenerConfig, SocketConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::catalog::{Event, EventKind};
use crate::event::EventContext;
use crate::handler::{self, EventHandler};
use crate::socket;
use crate::HyprError;

/// Callback receiving the raw envelope only
pub(crate) type RawCallback = Arc<dyn Fn(&EventContext) + Send + Sync>;

/// Callback receiving the envelope and the decoded event
pub(crate) type TypedCallback = Arc<dyn Fn(&EventContext, &Event) + Send + Sync>;

/// Registered sinks, guarded by one lock
#[derive(Default)]
struct Sinks {
    all: Option<RawCallback>,
    unknown: Option<RawCallback>,
    typed: HashMap<EventKind, TypedCallback>,
    handler: Option<Arc<dyn EventHandler>>,
    /// Kinds with a typed callback registered; never shrinks
    subscriptions: HashSet<EventKind>,
}

/// Sinks cloned out of the lock for one dispatch
struct Snapshot {
    all: Option<RawCallback>,
    unknown: Option<RawCallback>,
    typed: Option<TypedCallback>,
    handler: Option<Arc<dyn EventHandler>>,
}

/// The active stream connection
struct ActiveConnection {
    id: u64,
    close: CancellationToken,
}

#[derive(Default)]
struct ConnectionState {
    active: Option<ActiveConnection>,
    socket_path: Option<PathBuf>,
    next_id: u64,
}

/// Listener for Hyprland's event socket
///
/// Callbacks and an optional observer can be registered at any time, including
/// from inside a running callback. The listener is `Send + Sync` and is
/// normally shared through an `Arc` between the task running
/// [`listen`](Self::listen) and the code registering sinks.
///
/// # Example
///
/// ```ignore
/// let listener = EventListener::default();
/// listener.on_workspace_v2(|_ctx, id, name| println!("workspace {} ({})", name, id));
///
/// let cancel = CancellationToken::new();
/// let err = listener.listen(cancel.clone()).await.unwrap_err();
/// ```
pub struct EventListener {
    socket: SocketConfig,
    queue_capacity: usize,
    decode_policy: DecodePolicy,
    sinks: Mutex<Sinks>,
    connection: Mutex<ConnectionState>,
}

impl Default for EventListener {
    fn default() -> Self {
        Self::new(SocketConfig::default(), ListenerConfig::default())
    }
}

impl EventListener {
    /// Create a listener with explicit socket and listener settings
    pub fn new(socket: SocketConfig, listener: ListenerConfig) -> Self {
        Self {
            socket,
            queue_capacity: listener.queue_capacity.max(1),
            decode_policy: listener.decode_policy,
            sinks: Mutex::new(Sinks::default()),
            connection: Mutex::new(ConnectionState::default()),
        }
    }

    /// Create a listener from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.socket.clone(), config.listener.clone())
    }

    /// How decoding failures are treated
    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy
    }

    fn sinks(&self) -> MutexGuard<'_, Sinks> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn connection(&self) -> MutexGuard<'_, ConnectionState> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the callback invoked for every event, before any other sink
    ///
    /// Replaces a previously registered catch-all callback.
    pub fn on_all_events<F>(&self, callback: F)
    where
        F: Fn(&EventContext) + Send + Sync + 'static,
    {
        self.sinks().all = Some(Arc::new(callback));
    }

    /// Register the callback invoked for events whose kind is not in the catalog
    ///
    /// Replaces a previously registered unknown callback.
    pub fn on_unknown<F>(&self, callback: F)
    where
        F: Fn(&EventContext) + Send + Sync + 'static,
    {
        self.sinks().unknown = Some(Arc::new(callback));
    }

    /// Register a callback for one known kind, receiving the decoded event
    ///
    /// Replaces a previously registered callback for the same kind. The typed
    /// `on_<kind>` methods are thin wrappers around this one.
    pub fn on<F>(&self, kind: EventKind, callback: F)
    where
        F: Fn(&EventContext, &Event) + Send + Sync + 'static,
    {
        let mut sinks = self.sinks();
        sinks.typed.insert(kind, Arc::new(callback));
        sinks.subscriptions.insert(kind);
    }

    /// Attach the observer, replacing any previous one
    pub fn set_handler(&self, handler: Arc<dyn EventHandler>) {
        self.sinks().handler = Some(handler);
    }

    /// Whether an event of `kind` would reach at least one sink
    ///
    /// True whenever a catch-all callback or an observer is attached, since
    /// either one sees every line. In that case the set of kinds with a typed
    /// callback is not consulted. Otherwise known kinds consult that set, and
    /// any other kind reports whether an unknown callback is registered.
    pub fn has_handler(&self, kind: &str) -> bool {
        let sinks = self.sinks();
        if sinks.all.is_some() || sinks.handler.is_some() {
            return true;
        }

        match EventKind::from_name(kind) {
            Some(kind) => sinks.subscriptions.contains(&kind),
            None => sinks.unknown.is_some(),
        }
    }

    /// Whether a stream connection is currently registered
    pub fn is_connected(&self) -> bool {
        self.connection().active.is_some()
    }

    /// Event socket path resolved by the most recent `listen` call
    pub fn socket_path(&self) -> Option<PathBuf> {
        self.connection().socket_path.clone()
    }

    /// Close the active stream connection, if any
    ///
    /// The running [`listen`](Self::listen) call then returns
    /// [`HyprError::StreamClosed`].
    pub fn close(&self) {
        if let Some(active) = self.connection().active.take() {
            debug!("Closing Hyprland event connection {}", active.id);
            active.close.cancel();
        }
    }

    /// Frame and dispatch a single line without a socket
    ///
    /// Events built here carry a fresh, never-cancelled token.
    ///
    /// # Errors
    ///
    /// Returns `HyprError::MalformedEvent` if the line has no `>>` separator,
    /// or `HyprError::Decode` if a known event fails to decode under
    /// [`DecodePolicy::Fail`].
    pub fn process_line(&self, line: &str) -> Result<(), HyprError> {
        let ctx = EventContext::parse(line)?;
        self.dispatch(&ctx)
    }

    /// Connect to the event socket and dispatch events until the session ends
    ///
    /// Only one stream connection is active per listener; calling `listen`
    /// again closes the connection of the earlier call, which then returns
    /// `HyprError::StreamClosed`.
    ///
    /// On every exit path the connection is closed and the reader task has
    /// finished before this returns, and [`is_connected`](Self::is_connected)
    /// reports `false`.
    ///
    /// # Errors
    ///
    /// This only returns when the session ends, always with the reason:
    ///
    /// - `HyprError::InstanceNotSet` / `HyprError::ConnectionFailed` if the
    ///   socket cannot be resolved or opened
    /// - `HyprError::Cancelled` if `cancel` was triggered
    /// - `HyprError::StreamClosed` if the compositor closed the stream or
    ///   [`close`](Self::close) was called
    /// - `HyprError::MalformedEvent` for a line without `>>`
    /// - `HyprError::Decode` for an undecodable known event under
    ///   [`DecodePolicy::Fail`]
    pub async fn listen(&self, cancel: CancellationToken) -> Result<(), HyprError> {
        let path = socket::event_socket_path(&self.socket)?;
        self.connection().socket_path = Some(path.clone());

        debug!("Connecting to Hyprland event socket at {}", path.display());
        let stream = UnixStream::connect(&path)
            .await
            .map_err(|e| HyprError::ConnectionFailed {
                path: path.clone(),
                source: e,
            })?;

        let close = CancellationToken::new();
        let id = self.register(close.clone());
        debug!("Hyprland event connection {} established", id);

        let (tx, mut rx) = mpsc::channel(self.queue_capacity);
        let reader = tokio::spawn(read_lines(stream, tx, close.clone()));

        let result = loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("Event listener cancelled");
                    break Err(HyprError::Cancelled);
                }
                line = rx.recv() => {
                    let Some(line) = line else {
                        break Err(HyprError::StreamClosed);
                    };
                    if let Err(e) = self.handle_line(&line, &cancel) {
                        break Err(e);
                    }
                }
            }
        };

        close.cancel();
        drop(rx);
        if let Err(e) = reader.await {
            warn!("Event reader task failed: {}", e);
        }
        self.release(id);

        result
    }

    fn handle_line(&self, line: &str, cancel: &CancellationToken) -> Result<(), HyprError> {
        let ctx = EventContext::parse(line)?.with_cancellation(cancel.clone());
        self.dispatch(&ctx)
    }

    /// Record a new active connection, closing the previous one
    fn register(&self, close: CancellationToken) -> u64 {
        let mut state = self.connection();
        let id = state.next_id;
        state.next_id += 1;

        if let Some(previous) = state.active.replace(ActiveConnection { id, close }) {
            debug!(
                "Replacing Hyprland event connection {} with {}",
                previous.id, id
            );
            previous.close.cancel();
        }
        id
    }

    /// Forget connection `id` if it is still the active one
    fn release(&self, id: u64) {
        let mut state = self.connection();
        if state.active.as_ref().is_some_and(|active| active.id == id) {
            state.active = None;
        }
    }

    fn snapshot(&self, kind: Option<EventKind>) -> Snapshot {
        let sinks = self.sinks();
        Snapshot {
            all: sinks.all.clone(),
            unknown: sinks.unknown.clone(),
            typed: kind.and_then(|kind| sinks.typed.get(&kind).cloned()),
            handler: sinks.handler.clone(),
        }
    }

    /// Deliver one framed event to every matching sink
    fn dispatch(&self, ctx: &EventContext) -> Result<(), HyprError> {
        let kind = ctx.known_kind();
        let sinks = self.snapshot(kind);

        if let Some(all) = &sinks.all {
            all(ctx);
        }
        if let Some(handler) = &sinks.handler {
            handler.all(ctx);
        }

        let Some(kind) = kind else {
            trace!("Unknown Hyprland event kind: {}", ctx.kind());
            if let Some(unknown) = &sinks.unknown {
                unknown(ctx);
            }
            if let Some(handler) = &sinks.handler {
                handler.unknown(ctx);
            }
            return Ok(());
        };

        let event = match Event::decode(kind, ctx.data()) {
            Ok(event) => event,
            Err(source) => match self.decode_policy {
                DecodePolicy::Fail => {
                    return Err(HyprError::Decode {
                        kind: kind.to_string(),
                        source,
                    })
                }
                DecodePolicy::Skip => {
                    warn!("Skipping undecodable `{}` event: {}", kind, source);
                    return Ok(());
                }
            },
        };

        if let Some(typed) = &sinks.typed {
            typed(ctx, &event);
        }
        if let Some(handler) = &sinks.handler {
            handler::deliver(handler.as_ref(), ctx, &event);
        }

        Ok(())
    }
}

/// Reader task: forward socket lines into the queue until EOF, error or close
async fn read_lines(stream: UnixStream, tx: mpsc::Sender<String>, close: CancellationToken) {
    let mut lines = BufReader::new(stream).lines();

    loop {
        let line = tokio::select! {
            _ = close.cancelled() => break,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("Hyprland event socket reached EOF");
                break;
            }
            Err(e) => {
                warn!("Failed to read from Hyprland event socket: {}", e);
                break;
            }
        };

        trace!("Received event line: {}", line);
        tokio::select! {
            _ = close.cancelled() => break,
            sent = tx.send(line) => {
                if sent.is_err() {
                    break;
                }
            }
        }
    }

    debug!("Event reader task finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixListener;
    use tokio::time::timeout;

    const INSTANCE: &str = "test_instance";
    const TIMEOUT: Duration = Duration::from_secs(5);

    type Log = Arc<Mutex<Vec<String>>>;

    fn new_log() -> Log {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    struct Recorder {
        log: Log,
    }

    impl EventHandler for Recorder {
        fn all(&self, ctx: &EventContext) {
            self.log.lock().unwrap().push(format!("observer all {}", ctx.kind()));
        }

        fn unknown(&self, ctx: &EventContext) {
            self.log
                .lock()
                .unwrap()
                .push(format!("observer unknown {}", ctx.kind()));
        }

        fn workspace_v2(&self, _ctx: &EventContext, id: i64, name: &str) {
            self.log
                .lock()
                .unwrap()
                .push(format!("observer workspace_v2 {} {}", id, name));
        }
    }

    fn recording_listener(policy: DecodePolicy, log: &Log) -> EventListener {
        let listener = EventListener::new(
            SocketConfig::default(),
            ListenerConfig {
                decode_policy: policy,
                ..ListenerConfig::default()
            },
        );

        let l = log.clone();
        listener.on_all_events(move |ctx| l.lock().unwrap().push(format!("all {}", ctx.kind())));
        let l = log.clone();
        listener.on_unknown(move |ctx| l.lock().unwrap().push(format!("unknown {}", ctx.kind())));
        let l = log.clone();
        listener.on_workspace_v2(move |_ctx, id, name| {
            l.lock().unwrap().push(format!("workspace_v2 {} {}", id, name))
        });
        listener.set_handler(Arc::new(Recorder { log: log.clone() }));
        listener
    }

    #[test]
    fn test_dispatch_order_known_kind() {
        let log = new_log();
        let listener = recording_listener(DecodePolicy::Fail, &log);

        listener.process_line("workspacev2>>3,coding").unwrap();

        assert_eq!(
            entries(&log),
            vec![
                "all workspacev2",
                "observer all workspacev2",
                "workspace_v2 3 coding",
                "observer workspace_v2 3 coding",
            ]
        );
    }

    #[test]
    fn test_dispatch_order_unknown_kind() {
        let log = new_log();
        let listener = recording_listener(DecodePolicy::Fail, &log);

        listener.process_line("myplugin>>foo,bar").unwrap();

        assert_eq!(
            entries(&log),
            vec![
                "all myplugin",
                "observer all myplugin",
                "unknown myplugin",
                "observer unknown myplugin",
            ]
        );
    }

    #[test]
    fn test_known_kind_without_callback_skips_unknown_sinks() {
        let log = new_log();
        let listener = recording_listener(DecodePolicy::Fail, &log);

        listener.process_line("submap>>resize").unwrap();

        assert_eq!(entries(&log), vec!["all submap", "observer all submap"]);
    }

    #[test]
    fn test_decode_failure_is_fatal_by_default() {
        let log = new_log();
        let listener = recording_listener(DecodePolicy::Fail, &log);

        let err = listener.process_line("workspacev2>>x,coding").unwrap_err();
        match err {
            HyprError::Decode { kind, .. } => assert_eq!(kind, "workspacev2"),
            other => panic!("Expected Decode error, got: {:?}", other),
        }

        // catch-all sinks have already seen the line
        assert_eq!(
            entries(&log),
            vec!["all workspacev2", "observer all workspacev2"]
        );
    }

    #[test]
    fn test_decode_failure_skipped_when_configured() {
        let log = new_log();
        let listener = recording_listener(DecodePolicy::Skip, &log);

        listener.process_line("workspacev2>>x,coding").unwrap();
        listener.process_line("workspacev2>>4,music").unwrap();

        assert_eq!(
            entries(&log),
            vec![
                "all workspacev2",
                "observer all workspacev2",
                "all workspacev2",
                "observer all workspacev2",
                "workspace_v2 4 music",
                "observer workspace_v2 4 music",
            ]
        );
    }

    #[test]
    fn test_malformed_line() {
        let listener = EventListener::default();
        let err = listener.process_line("no separator here").unwrap_err();
        assert!(matches!(err, HyprError::MalformedEvent { .. }));
    }

    #[test]
    fn test_has_handler() {
        let listener = EventListener::default();
        assert!(!listener.has_handler("workspace"));
        assert!(!listener.has_handler("myplugin"));

        listener.on_open_window(|_, _, _, _, _| {});
        assert!(listener.has_handler("openwindow"));
        assert!(!listener.has_handler("closewindow"));
        assert!(!listener.has_handler("myplugin"));

        // the unknown fallback does not subscribe any known kind
        listener.on_unknown(|_| {});
        assert!(listener.has_handler("myplugin"));
        assert!(!listener.has_handler("bell"));

        listener.on_all_events(|_| {});
        assert!(listener.has_handler("closewindow"));
        assert!(listener.has_handler("anything"));
    }

    #[test]
    fn test_has_handler_with_observer_only() {
        struct Nothing;
        impl EventHandler for Nothing {}

        let listener = EventListener::default();
        listener.set_handler(Arc::new(Nothing));
        assert!(listener.has_handler("configreloaded"));
        assert!(listener.has_handler("myplugin"));
    }

    #[test]
    fn test_typed_registration_subscribes_its_own_kind() {
        let listener = EventListener::default();
        listener.on_workspace_v2(|_, _, _| {});
        listener.on_config_reloaded(|_| {});
        assert!(listener.has_handler("workspacev2"));
        assert!(!listener.has_handler("workspace"));
        assert!(listener.has_handler("configreloaded"));
        assert!(!listener.has_handler("ignoregrouplock"));
    }

    #[test]
    fn test_later_registration_replaces_earlier() {
        let log = new_log();
        let listener = EventListener::default();

        let l = log.clone();
        listener.on_submap(move |_, name| l.lock().unwrap().push(format!("first {}", name)));
        let l = log.clone();
        listener.on_submap(move |_, name| l.lock().unwrap().push(format!("second {}", name)));

        listener.process_line("submap>>resize").unwrap();
        assert_eq!(entries(&log), vec!["second resize"]);
    }

    #[test]
    fn test_callback_may_register_callbacks() {
        let log = new_log();
        let listener = Arc::new(EventListener::default());

        let inner = listener.clone();
        let l = log.clone();
        listener.on_all_events(move |_| {
            let l = l.clone();
            inner.on_bell(move |_, address| l.lock().unwrap().push(format!("bell {}", address)));
        });

        // sinks are snapshotted per line, so the new callback sees the next one
        listener.process_line("bell>>abc").unwrap();
        assert!(entries(&log).is_empty());
        listener.process_line("bell>>def").unwrap();
        assert_eq!(entries(&log), vec!["bell def"]);
    }

    #[test]
    fn test_context_exposes_raw_line() {
        let log = new_log();
        let listener = EventListener::default();

        let l = log.clone();
        listener.on_active_window(move |ctx, class, title| {
            l.lock()
                .unwrap()
                .push(format!("{}|{}|{}|{}", ctx.raw(), ctx.data(), class, title))
        });

        listener
            .process_line("activewindow>>kitty,~/src, main")
            .unwrap();
        assert_eq!(
            entries(&log),
            vec!["activewindow>>kitty,~/src, main|kitty,~/src, main|kitty|~/src, main"]
        );
    }

    // Mock compositor

    fn socket_config(dir: &Path) -> SocketConfig {
        SocketConfig {
            instance: Some(INSTANCE.to_string()),
            runtime_dir: Some(dir.to_path_buf()),
        }
    }

    fn bind_event_socket(dir: &Path) -> UnixListener {
        let instance_dir = dir.join("hypr").join(INSTANCE);
        std::fs::create_dir_all(&instance_dir).unwrap();
        UnixListener::bind(instance_dir.join(".socket2.sock")).unwrap()
    }

    fn mock_listener(dir: &Path) -> EventListener {
        EventListener::new(socket_config(dir), ListenerConfig::default())
    }

    async fn wait_connected(listener: &EventListener) {
        timeout(TIMEOUT, async {
            while !listener.is_connected() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("listener never connected");
    }

    #[tokio::test]
    async fn test_listen_delivers_events_until_stream_closes() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());

        tokio::spawn(async move {
            let (mut conn, _) = server.accept().await.unwrap();
            conn.write_all(b"workspacev2>>3,coding\nmyplugin>>foo\nsubmap>>resize\r\n")
                .await
                .unwrap();
            // dropping the connection ends the stream
        });

        let log = new_log();
        let listener = mock_listener(dir.path());
        let l = log.clone();
        listener.on_all_events(move |ctx| l.lock().unwrap().push(ctx.raw().to_string()));

        let result = timeout(TIMEOUT, listener.listen(CancellationToken::new()))
            .await
            .unwrap();

        assert!(matches!(result, Err(HyprError::StreamClosed)));
        assert_eq!(
            entries(&log),
            vec!["workspacev2>>3,coding", "myplugin>>foo", "submap>>resize"]
        );
        assert!(!listener.is_connected());
        assert_eq!(
            listener.socket_path(),
            Some(
                dir.path()
                    .join("hypr")
                    .join(INSTANCE)
                    .join(".socket2.sock")
            )
        );
    }

    #[tokio::test]
    async fn test_listen_cancellation_closes_connection() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());
        let (eof_tx, eof_rx) = tokio::sync::oneshot::channel();

        tokio::spawn(async move {
            let (mut conn, _) = server.accept().await.unwrap();
            conn.write_all(b"bell>>\n").await.unwrap();
            let mut rest = Vec::new();
            let _ = conn.read_to_end(&mut rest).await;
            let _ = eof_tx.send(());
        });

        let listener = Arc::new(mock_listener(dir.path()));
        let cancel = CancellationToken::new();

        let task = {
            let listener = listener.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { listener.listen(cancel).await })
        };

        wait_connected(&listener).await;
        cancel.cancel();

        let result = timeout(TIMEOUT, task).await.unwrap().unwrap();
        assert!(matches!(result, Err(HyprError::Cancelled)));
        assert!(!listener.is_connected());

        // the compositor side observes the connection closing
        timeout(TIMEOUT, eof_rx).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_callbacks_see_the_callers_token() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());

        tokio::spawn(async move {
            let (mut conn, _) = server.accept().await.unwrap();
            conn.write_all(b"bell>>\nbell>>\n").await.unwrap();
            let mut rest = Vec::new();
            let _ = conn.read_to_end(&mut rest).await;
        });

        let count = Arc::new(Mutex::new(0));
        let listener = mock_listener(dir.path());
        let c = count.clone();
        listener.on_bell(move |ctx, _| {
            *c.lock().unwrap() += 1;
            ctx.cancellation().cancel();
        });

        let cancel = CancellationToken::new();
        let result = timeout(TIMEOUT, listener.listen(cancel.clone()))
            .await
            .unwrap();

        assert!(matches!(result, Err(HyprError::Cancelled)));
        assert!(cancel.is_cancelled());
        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!listener.is_connected());
    }

    #[tokio::test]
    async fn test_listen_malformed_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());

        tokio::spawn(async move {
            let (mut conn, _) = server.accept().await.unwrap();
            conn.write_all(b"bell>>\ngarbage\nbell>>\n").await.unwrap();
            let mut rest = Vec::new();
            let _ = conn.read_to_end(&mut rest).await;
        });

        let count = Arc::new(Mutex::new(0));
        let listener = mock_listener(dir.path());
        let c = count.clone();
        listener.on_bell(move |_, _| *c.lock().unwrap() += 1);

        let result = timeout(TIMEOUT, listener.listen(CancellationToken::new()))
            .await
            .unwrap();

        match result {
            Err(HyprError::MalformedEvent { line }) => assert_eq!(line, "garbage"),
            other => panic!("Expected MalformedEvent, got: {:?}", other),
        }
        assert_eq!(*count.lock().unwrap(), 1);
        assert!(!listener.is_connected());
    }

    #[tokio::test]
    async fn test_listen_decode_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());

        tokio::spawn(async move {
            let (mut conn, _) = server.accept().await.unwrap();
            conn.write_all(b"fullscreen>>maybe\n").await.unwrap();
            let mut rest = Vec::new();
            let _ = conn.read_to_end(&mut rest).await;
        });

        let listener = mock_listener(dir.path());
        let result = timeout(TIMEOUT, listener.listen(CancellationToken::new()))
            .await
            .unwrap();

        match result {
            Err(HyprError::Decode { kind, .. }) => assert_eq!(kind, "fullscreen"),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_listen_without_socket() {
        let dir = tempfile::tempdir().unwrap();
        let listener = mock_listener(dir.path());

        let err = listener
            .listen(CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, HyprError::ConnectionFailed { .. }));
        assert!(err.is_socket_error());
        assert!(!listener.is_connected());
    }

    #[tokio::test]
    async fn test_close_ends_listen_with_stream_closed() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());

        tokio::spawn(async move {
            let (mut conn, _) = server.accept().await.unwrap();
            let mut rest = Vec::new();
            let _ = conn.read_to_end(&mut rest).await;
        });

        let listener = Arc::new(mock_listener(dir.path()));
        let task = {
            let listener = listener.clone();
            tokio::spawn(async move { listener.listen(CancellationToken::new()).await })
        };

        wait_connected(&listener).await;
        listener.close();

        let result = timeout(TIMEOUT, task).await.unwrap().unwrap();
        assert!(matches!(result, Err(HyprError::StreamClosed)));
        assert!(!listener.is_connected());
    }

    #[tokio::test]
    async fn test_second_listen_replaces_first() {
        let dir = tempfile::tempdir().unwrap();
        let server = bind_event_socket(dir.path());

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((conn, _)) = server.accept().await {
                held.push(conn);
            }
        });

        let listener = Arc::new(mock_listener(dir.path()));
        let first = {
            let listener = listener.clone();
            tokio::spawn(async move { listener.listen(CancellationToken::new()).await })
        };
        wait_connected(&listener).await;

        let cancel = CancellationToken::new();
        let second = {
            let listener = listener.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move { listener.listen(cancel).await })
        };

        let result = timeout(TIMEOUT, first).await.unwrap().unwrap();
        assert!(matches!(result, Err(HyprError::StreamClosed)));

        // the second session is unaffected by the first one ending
        wait_connected(&listener).await;
        cancel.cancel();
        let result = timeout(TIMEOUT, second).await.unwrap().unwrap();
        assert!(matches!(result, Err(HyprError::Cancelled)));
        assert!(!listener.is_connected());
    }
}
