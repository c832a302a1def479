//! Line formatting
//!
//! A format string is compiled once into a [`LineFormat`] and rendered per
//! record. Recognized tokens: `{timestamp}`, `{service}`, `{levelname}`,
//! `{message}`, and `{target}` (the emitting module path). Anything else,
//! including an unterminated `{`, passes through literally.

use crate::record::LogRecord;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Timestamp,
    Service,
    Level,
    Message,
    Target,
}

/// A compiled line format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    segments: Vec<Segment>,
}

impl LineFormat {
    /// Compile a format string.
    ///
    /// Compilation never fails: unrecognized tokens stay in the output
    /// verbatim, so a typo degrades the line rather than the process.
    pub fn parse(format: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars();

        while let Some(c) = chars.next() {
            if c != '{' {
                literal.push(c);
                continue;
            }

            let mut name = String::new();
            let mut closed = false;
            for t in chars.by_ref() {
                if t == '}' {
                    closed = true;
                    break;
                }
                name.push(t);
            }

            if !closed {
                // Unterminated brace: keep it as written
                literal.push('{');
                literal.push_str(&name);
                continue;
            }

            let segment = match name.as_str() {
                "timestamp" => Segment::Timestamp,
                "service" => Segment::Service,
                "levelname" => Segment::Level,
                "message" => Segment::Message,
                "target" => Segment::Target,
                _ => {
                    literal.push('{');
                    literal.push_str(&name);
                    literal.push('}');
                    continue;
                }
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Render one record to a line (without a trailing newline)
    pub fn render(&self, record: &LogRecord) -> String {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Timestamp => {
                    line.push_str(&record.timestamp.format(TIMESTAMP_FORMAT).to_string())
                }
                Segment::Service => line.push_str(&record.service),
                Segment::Level => line.push_str(record.level.as_str()),
                Segment::Message => line.push_str(&record.message),
                Segment::Target => line.push_str(&record.target),
            }
        }
        line
    }
}
