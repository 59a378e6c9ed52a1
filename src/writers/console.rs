//! Console writer implementation

use crate::core::{Envelope, LogWriter, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Stdout, Write};

/// Writes one `"<date> <time> <message>"` line per envelope
///
/// Writes to standard output unless built with [`ConsoleWriter::with_output`].
/// Holds no resource of its own, so `init` and `destroy` do nothing.
pub struct ConsoleWriter<W: Write + Send = Stdout> {
    out: W,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleWriter<Stdout> {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for ConsoleWriter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsoleWriter<W> {
    pub fn with_output(out: W) -> Self {
        Self {
            out,
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Color each line by level. Has no effect without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this writer
    ///
    /// # Examples
    ///
    /// ```
    /// use fanout_logger::writers::ConsoleWriter;
    /// use fanout_logger::TimestampFormat;
    ///
    /// let writer = ConsoleWriter::new().with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_line(&self, envelope: &Envelope) -> String {
        let timestamp = self.timestamp_format.format(envelope.timestamp());
        format!("{} {}", timestamp, self.paint(envelope))
    }

    #[cfg(feature = "console")]
    fn paint(&self, envelope: &Envelope) -> String {
        if self.use_colors {
            envelope
                .message()
                .color(envelope.level().color_code())
                .to_string()
        } else {
            envelope.message().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, envelope: &Envelope) -> String {
        envelope.message().to_string()
    }
}

impl<W: Write + Send> LogWriter for ConsoleWriter<W> {
    fn write_msg(&mut self, envelope: &Envelope) {
        let line = self.format_line(envelope);
        if let Err(e) = writeln!(self.out, "{}", line) {
            eprintln!("[LOGGER ERROR] Console writer failed: {}", e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            eprintln!("[LOGGER ERROR] Console writer flush failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_line_layout() {
        let mut writer = ConsoleWriter::with_output(Vec::new());
        writer.write_msg(&Envelope::new(LogLevel::Info, "[I] x=1"));
        writer.write_msg(&Envelope::new(LogLevel::Error, "[E] boom"));
        writer.flush();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        // "YYYY/MM/DD HH:MM:SS " precedes the message
        assert_eq!(&lines[0][20..], "[I] x=1");
        assert_eq!(&lines[1][20..], "[E] boom");
        assert_eq!(&lines[0][4..5], "/");
    }

    #[test]
    fn test_custom_timestamp() {
        let mut writer = ConsoleWriter::with_output(Vec::new())
            .with_timestamp_format(TimestampFormat::Unix);
        writer.write_msg(&Envelope::new(LogLevel::Warn, "[W] hot"));

        let output = String::from_utf8(writer.into_inner()).unwrap();
        let (stamp, message) = output.trim_end().split_once(' ').unwrap();
        assert!(stamp.parse::<i64>().is_ok());
        assert_eq!(message, "[W] hot");
    }

    #[test]
    fn test_invalid_custom_timestamp_still_writes() {
        let mut writer = ConsoleWriter::with_output(Vec::new())
            .with_timestamp_format(TimestampFormat::Custom("%Q".to_string()));
        writer.write_msg(&Envelope::new(LogLevel::Error, "[E] kept"));

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(&output.trim_end()[20..], "[E] kept");
    }
}
