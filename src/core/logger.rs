//! Asynchronous dispatch engine
//!
//! A [`Logger`] owns a bounded queue of [`Envelope`]s and one dispatch thread.
//! Producers format and enqueue on their own thread; the dispatch thread is the
//! only place writers run, so writers never see concurrent calls.

use super::{
    caller::CallerLocation,
    config::LoggerConfig,
    envelope::Envelope,
    error::{LoggerError, Result},
    log_level::{LevelMask, LogLevel},
    metrics::LoggerMetrics,
    registry::WriterRegistry,
    writer::LogWriter,
};
use crossbeam_channel::{bounded, select, Receiver, Sender, TrySendError};
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const DISPATCH_THREAD_NAME: &str = "fanout-logger";

struct ActiveWriter {
    name: String,
    writer: Box<dyn LogWriter>,
}

type WriterSet = Arc<Mutex<Vec<ActiveWriter>>>;

/// Level-filtered logger with asynchronous fan-out to its writers
///
/// # Example
///
/// ```
/// use fanout_logger::prelude::*;
/// use fanout_logger::{error, info};
///
/// let mut registry = WriterRegistry::new();
/// fanout_logger::writers::register_builtin_writers(&mut registry, &LoggerConfig::default())?;
///
/// let logger = Logger::builder()
///     .level_mask(LogLevel::Info | LogLevel::Error)
///     .annotate_caller(false)
///     .build(&registry)?;
///
/// info!(logger, "listening on port {}", 8080);
/// error!(logger, "upstream {} unreachable", "db-1");
/// logger.close();
/// # Ok::<(), fanout_logger::LoggerError>(())
/// ```
pub struct Logger {
    level_mask: LevelMask,
    annotate_caller: bool,
    caller_depth: usize,
    writer_names: Vec<String>,
    writers: WriterSet,
    sender: Sender<Envelope>,
    stop: Sender<()>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    closed: AtomicBool,
    in_flight: AtomicUsize,
    idle_lock: Mutex<()>,
    idle: Condvar,
    metrics: Arc<LoggerMetrics>,
}

/// Marks a producer as between its `closed` check and the end of its enqueue
struct InFlight<'a>(&'a Logger);

impl<'a> InFlight<'a> {
    fn enter(logger: &'a Logger) -> Self {
        logger.in_flight.fetch_add(1, Ordering::SeqCst);
        Self(logger)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let logger = self.0;
        if logger.in_flight.fetch_sub(1, Ordering::SeqCst) == 1
            && logger.closed.load(Ordering::SeqCst)
        {
            // Taking the lock orders this wake-up after close() starts waiting
            let _guard = logger.idle_lock.lock();
            logger.idle.notify_all();
        }
    }
}

impl Logger {
    /// Activate the writers named in `config` and start the dispatch thread.
    ///
    /// Names missing from `registry` are skipped, as is any writer whose
    /// factory or `init` panics. A name listed twice activates one writer.
    pub fn new(config: LoggerConfig, registry: &WriterRegistry) -> Result<Self> {
        config.validate()?;

        let mut active: Vec<ActiveWriter> = Vec::with_capacity(config.writers.len());
        for name in &config.writers {
            if active.iter().any(|w| &w.name == name) {
                continue;
            }
            let created = panic::catch_unwind(AssertUnwindSafe(|| {
                registry.create(name).map(|mut writer| {
                    writer.init();
                    writer
                })
            }));
            match created {
                Ok(Some(writer)) => active.push(ActiveWriter {
                    name: name.clone(),
                    writer,
                }),
                Ok(None) => eprintln!(
                    "[LOGGER WARNING] Writer '{}' is not registered and will be skipped",
                    name
                ),
                Err(panic_info) => eprintln!(
                    "[LOGGER ERROR] Writer '{}' panicked during init: {}. It will not be activated.",
                    name,
                    panic_message(panic_info.as_ref())
                ),
            }
        }

        let writer_names = active.iter().map(|w| w.name.clone()).collect();
        let writers: WriterSet = Arc::new(Mutex::new(active));
        let metrics = Arc::new(LoggerMetrics::new());
        let (sender, receiver) = bounded(config.queue_capacity);
        let (stop, stop_signal) = bounded(1);

        let spawned = {
            let writers = Arc::clone(&writers);
            let metrics = Arc::clone(&metrics);
            thread::Builder::new()
                .name(DISPATCH_THREAD_NAME.to_string())
                .spawn(move || Self::run(receiver, stop_signal, writers, metrics))
        };
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                Self::destroy_writers(&writers, &metrics);
                return Err(LoggerError::io_operation(
                    "starting logger",
                    "cannot spawn dispatch thread",
                    e,
                ));
            }
        };

        Ok(Self {
            level_mask: config.level_mask,
            annotate_caller: config.annotate_caller,
            caller_depth: config.caller_depth,
            writer_names,
            writers,
            sender,
            stop,
            worker: Mutex::new(Some(handle)),
            closed: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
            idle_lock: Mutex::new(()),
            idle: Condvar::new(),
            metrics,
        })
    }

    /// Dispatch loop: deliver envelopes until the stop signal arrives, then
    /// deliver whatever is still queued and exit.
    fn run(
        envelopes: Receiver<Envelope>,
        stop: Receiver<()>,
        writers: WriterSet,
        metrics: Arc<LoggerMetrics>,
    ) {
        loop {
            select! {
                recv(envelopes) -> envelope => match envelope {
                    Ok(envelope) => Self::dispatch(&writers, &envelope, &metrics),
                    Err(_) => break,
                },
                recv(stop) -> _ => {
                    while let Ok(envelope) = envelopes.try_recv() {
                        Self::dispatch(&writers, &envelope, &metrics);
                    }
                    break;
                }
            }
        }
    }

    /// Hand one envelope to every writer, in activation order.
    ///
    /// Each call is isolated with `catch_unwind` so a panicking writer does
    /// not stop the others or the loop.
    fn dispatch(writers: &WriterSet, envelope: &Envelope, metrics: &LoggerMetrics) {
        let mut writers = writers.lock();
        for active in writers.iter_mut() {
            let result =
                panic::catch_unwind(AssertUnwindSafe(|| active.writer.write_msg(envelope)));
            if let Err(panic_info) = result {
                metrics.record_writer_panic();
                eprintln!(
                    "[LOGGER CRITICAL] Writer '{}' panicked: {}. Other writers continue to function.",
                    active.name,
                    panic_message(panic_info.as_ref())
                );
            }
        }
        metrics.record_delivered();
    }

    fn destroy_writers(writers: &WriterSet, metrics: &LoggerMetrics) {
        let owned = std::mem::take(&mut *writers.lock());
        for mut active in owned {
            if let Err(panic_info) =
                panic::catch_unwind(AssertUnwindSafe(|| active.writer.destroy()))
            {
                metrics.record_writer_panic();
                eprintln!(
                    "[LOGGER ERROR] Writer '{}' panicked during destroy: {}",
                    active.name,
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }

    /// Whether a call at `level` would be emitted
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level_mask.contains(level)
    }

    #[inline]
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.submit(level, args, Location::caller());
        }
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Trace) {
            self.submit(LogLevel::Trace, args, Location::caller());
        }
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Debug) {
            self.submit(LogLevel::Debug, args, Location::caller());
        }
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Info) {
            self.submit(LogLevel::Info, args, Location::caller());
        }
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Warn) {
            self.submit(LogLevel::Warn, args, Location::caller());
        }
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Error) {
            self.submit(LogLevel::Error, args, Location::caller());
        }
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Critical) {
            self.submit(LogLevel::Critical, args, Location::caller());
        }
    }

    /// Internal write routine; caller depth is counted from this frame.
    #[inline(never)]
    fn submit(&self, level: LogLevel, args: fmt::Arguments<'_>, call_site: &Location<'_>) {
        let _in_flight = InFlight::enter(self);
        if self.closed.load(Ordering::SeqCst) {
            self.metrics.record_rejected();
            return;
        }
        let message = self.render(level, args, call_site);
        self.enqueue(Envelope::new(level, message));
    }

    fn render(&self, level: LogLevel, args: fmt::Arguments<'_>, call_site: &Location<'_>) -> String {
        let mut message = String::new();
        if self.annotate_caller {
            if let Some(caller) = CallerLocation::resolve(self.caller_depth, call_site) {
                let _ = write!(message, "[{}] ", caller);
            }
        }
        // A failing Display impl truncates the message instead of panicking.
        let _ = write!(message, "[{}] {}", level.tag(), args);
        message
    }

    /// Queue an envelope, waiting for a free slot when the queue is full
    fn enqueue(&self, envelope: Envelope) {
        match self.sender.try_send(envelope) {
            Ok(()) => {
                self.metrics.record_enqueued();
            }
            Err(TrySendError::Full(envelope)) => {
                self.metrics.record_blocked();
                match self.sender.send(envelope) {
                    Ok(()) => {
                        self.metrics.record_enqueued();
                    }
                    Err(_) => {
                        // Dispatch thread exited while we waited
                        self.metrics.record_rejected();
                    }
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                self.metrics.record_rejected();
            }
        }
    }

    /// Flush every active writer.
    ///
    /// Envelopes still in the queue are not delivered first; this only
    /// pushes out what the writers have already buffered.
    pub fn flush(&self) {
        let mut writers = self.writers.lock();
        for active in writers.iter_mut() {
            if let Err(panic_info) =
                panic::catch_unwind(AssertUnwindSafe(|| active.writer.flush()))
            {
                self.metrics.record_writer_panic();
                eprintln!(
                    "[LOGGER ERROR] Writer '{}' panicked during flush: {}",
                    active.name,
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }

    /// Stop the dispatch thread and destroy every writer.
    ///
    /// Envelopes already queued are delivered before the thread exits. Calls
    /// made after this point are dropped and counted as rejected; calling
    /// `close` again does nothing.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        // Producers that got past the closed check finish enqueueing first,
        // so everything accepted is delivered.
        let mut idle = self.idle_lock.lock();
        while self.in_flight.load(Ordering::SeqCst) > 0 {
            self.idle.wait(&mut idle);
        }
        drop(idle);

        // Fails only if the dispatch thread is already gone.
        let _ = self.stop.send(());

        if let Some(handle) = self.worker.lock().take() {
            if let Err(panic_info) = handle.join() {
                eprintln!(
                    "[LOGGER ERROR] Dispatch thread panicked during shutdown: {}",
                    panic_message(panic_info.as_ref())
                );
            }
        }

        Self::destroy_writers(&self.writers, &self.metrics);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn level_mask(&self) -> LevelMask {
        self.level_mask
    }

    /// Writers activated at construction, in dispatch order
    pub fn writer_names(&self) -> &[String] {
        &self.writer_names
    }

    /// Envelopes waiting in the queue
    pub fn queued(&self) -> usize {
        self.sender.len()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level_mask", &self.level_mask)
            .field("annotate_caller", &self.annotate_caller)
            .field("caller_depth", &self.caller_depth)
            .field("writers", &self.writer_names)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Starts from [`LoggerConfig::default`], so the writer list begins as
/// `["console"]`; use [`writers`](LoggerBuilder::writers) to replace it.
///
/// # Example
/// ```
/// use fanout_logger::prelude::*;
///
/// let registry = WriterRegistry::new();
/// let logger = Logger::builder()
///     .queue_capacity(64)
///     .level_mask(LogLevel::Warn | LogLevel::Error | LogLevel::Critical)
///     .writers(["console"])
///     .build(&registry)
///     .unwrap();
/// assert!(logger.writer_names().is_empty()); // "console" was never registered
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every setting with `config`
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_mask(mut self, mask: impl Into<LevelMask>) -> Self {
        self.config.level_mask = mask.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn annotate_caller(mut self, annotate: bool) -> Self {
        self.config.annotate_caller = annotate;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller_depth(mut self, depth: usize) -> Self {
        self.config.caller_depth = depth;
        self
    }

    /// Append one writer name to the activation list
    #[must_use = "builder methods return a new value"]
    pub fn writer(mut self, name: impl Into<String>) -> Self {
        self.config.writers.push(name.into());
        self
    }

    /// Replace the activation list
    #[must_use = "builder methods return a new value"]
    pub fn writers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.writers = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self, registry: &WriterRegistry) -> Result<Logger> {
        Logger::new(self.config, registry)
    }
}
