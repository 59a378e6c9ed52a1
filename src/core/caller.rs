//! Source location annotation for log messages
//!
//! Depth counts frames above the logger's internal write routine: depth 0 is
//! the routine itself, depth 1 the emission method (`info`, `log`, ...), and
//! depth 2, the default, the code that called the emission method.

use std::fmt;
use std::panic::Location;
use std::path::Path;

pub const DEFAULT_CALLER_DEPTH: usize = 2;

/// Symbol fragment identifying the internal write routine on the stack
pub(crate) const WRITE_ROUTINE: &str = "Logger::submit";

/// Where a log call came from: file basename and line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    pub file: String,
    pub line: u32,
}

impl CallerLocation {
    pub fn new(file: &str, line: u32) -> Option<Self> {
        let file = Path::new(file).file_name()?.to_string_lossy().into_owned();
        Some(Self { file, line })
    }

    pub fn from_location(location: &Location<'_>) -> Option<Self> {
        Self::new(location.file(), location.line())
    }

    /// Resolve the frame `depth` levels above the write routine.
    ///
    /// `call_site` is the `#[track_caller]` location of the emission call and
    /// answers the default depth directly. Other depths inspect the live stack,
    /// which needs debug info and fails on frames the optimizer folded away;
    /// callers treat `None` as "emit without annotation".
    pub fn resolve(depth: usize, call_site: &Location<'_>) -> Option<Self> {
        if depth == DEFAULT_CALLER_DEPTH {
            Self::from_location(call_site)
        } else {
            Self::from_stack(depth)
        }
    }

    fn from_stack(depth: usize) -> Option<Self> {
        let mut frames: Vec<(Option<String>, Option<String>, Option<u32>)> = Vec::new();
        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                frames.push((
                    symbol.name().map(|name| name.to_string()),
                    symbol.filename().map(|path| path.to_string_lossy().into_owned()),
                    symbol.lineno(),
                ));
            });
            true
        });

        let anchor = frames.iter().position(|(name, _, _)| {
            name.as_deref()
                .is_some_and(|name| name.contains(WRITE_ROUTINE))
        })?;
        let (_, file, line) = frames.get(anchor + depth)?;
        Self::new(file.as_deref()?, (*line)?)
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
