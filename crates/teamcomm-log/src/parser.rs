use crate::ir::{FieldKey, LogRecord, RecordKind};
use once_cell::sync::Lazy;
use regex::Regex;

// `[0-9]` rather than `\d`: the log writer only emits ASCII digits.
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"时间=([0-9]+)ms").unwrap());
static ROBOT_FROM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"来自机器人([0-9]+)号").unwrap());
static ROBOT_SELF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"机器人: ([0-9]+)号").unwrap());

/// A line-oriented parser for team-communication logs.
///
/// Input can be fed all at once through [`RecordParser::parse`] or in arbitrary
/// chunks through [`RecordParser::update`] followed by [`RecordParser::finish`].
/// Both paths produce the same records.
///
/// The parser is lenient. Lines it does not recognise are dropped, and a start
/// line without a time or robot marker still opens a record with defaults.
pub struct RecordParser {
    source_file: String,
    current: Option<LogRecord>,
    buffer: String,
    line_no: usize,
}

impl RecordParser {
    /// Creates a parser whose records are tagged with `source_file`.
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            current: None,
            buffer: String::new(),
            line_no: 0,
        }
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Appends input to the internal buffer and processes every complete line.
    ///
    /// # Returns
    ///
    /// The records closed during this call. A record is closed when the next
    /// start marker arrives, so the record still collecting fields is held
    /// back until a later `update` or [`RecordParser::finish`].
    pub fn update(&mut self, input: &str) -> Vec<LogRecord> {
        // The buffer holds no newline between calls, so only new input is searched
        let start = self.buffer.len();
        self.buffer.push_str(input);

        let mut closed = Vec::new();
        let Some(last_nl) = self.buffer[start..].rfind('\n').map(|i| start + i) else {
            return closed; // No full lines yet
        };

        let chunk: String = self.buffer.drain(..=last_nl).collect();
        for line in chunk.split_terminator('\n') {
            self.process_line(line, &mut closed);
        }
        closed
    }

    /// Flushes any partial trailing line and closes the open record.
    pub fn finish(mut self) -> Vec<LogRecord> {
        let mut closed = Vec::new();
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.process_line(&rest, &mut closed);
        }
        closed.extend(self.current.take());
        closed
    }

    /// Parses a whole log in one call.
    pub fn parse(mut self, input: &str) -> Vec<LogRecord> {
        let mut records = self.update(input);
        records.extend(self.finish());
        records
    }

    fn process_line(&mut self, raw: &str, closed: &mut Vec<LogRecord>) {
        self.line_no += 1;
        let line = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

        if let Some(kind) = start_kind(line) {
            closed.extend(self.current.take());
            let mut record = LogRecord::new(kind, self.source_file.as_str());
            record.line = self.line_no;
            record.timestamp_ms = extract_timestamp(line);
            record.robot_id = extract_robot_id(line);
            self.current = Some(record);
        } else if !line.is_empty()
            && let Some(record) = self.current.as_mut()
            && let Some((key, value)) = classify_field(line)
        {
            record.fields.insert(key, value);
        }
    }
}

/// Parses `content` into records tagged with `source_file`.
pub fn parse(content: &str, source_file: &str) -> Vec<LogRecord> {
    RecordParser::new(source_file).parse(content)
}

/// Returns the kind of record a trimmed line opens, if it is a start line.
pub fn start_kind(line: &str) -> Option<RecordKind> {
    if line.starts_with(RecordKind::Send.marker()) {
        Some(RecordKind::Send)
    } else if line.starts_with(RecordKind::Receive.marker()) {
        Some(RecordKind::Receive)
    } else {
        None
    }
}

/// Milliseconds from the first `时间=<n>ms` in the line, or 0.
pub fn extract_timestamp(line: &str) -> u64 {
    TIME_RE
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Robot number from `来自机器人<n>号`, falling back to `机器人: <n>号`.
pub fn extract_robot_id(line: &str) -> Option<u32> {
    ROBOT_FROM_RE
        .captures(line)
        .or_else(|| ROBOT_SELF_RE.captures(line))
        .and_then(|caps| caps[1].parse().ok())
}

/// Matches a detail line against the field labels in priority order.
///
/// The label may appear anywhere in the line. Only its first occurrence is
/// removed and the remainder is trimmed.
pub fn classify_field(line: &str) -> Option<(FieldKey, String)> {
    FieldKey::PRIORITY.iter().find_map(|&key| {
        let label = key.label();
        line.contains(label)
            .then(|| (key, line.replacen(label, "", 1).trim().to_string()))
    })
}
