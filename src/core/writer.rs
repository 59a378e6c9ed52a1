//! Writer trait for log output destinations

use super::envelope::Envelope;

/// An output sink driven by the dispatch thread
///
/// The engine calls [`init`](LogWriter::init) once before the first write,
/// [`destroy`](LogWriter::destroy) once after the last one, and never calls
/// any method from two threads at the same time, so implementations do not
/// need internal synchronization.
///
/// There is no error channel. A writer that cannot write handles the failure
/// itself (report, drop or retry) without stalling the dispatch thread.
///
/// # Example
///
/// ```
/// use fanout_logger::{Envelope, LogWriter};
///
/// struct Stderr;
///
/// impl LogWriter for Stderr {
///     fn write_msg(&mut self, envelope: &Envelope) {
///         eprintln!("{}", envelope.message());
///     }
/// }
/// ```
pub trait LogWriter: Send {
    /// Acquire resources (open files, connect sockets)
    fn init(&mut self) {}

    /// Emit one envelope. Runs on the dispatch thread; must not block indefinitely.
    fn write_msg(&mut self, envelope: &Envelope);

    /// Push buffered output to its destination without closing the writer
    fn flush(&mut self) {}

    /// Release resources. Nothing is called on the writer afterwards.
    fn destroy(&mut self) {}
}
