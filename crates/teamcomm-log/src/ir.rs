use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction of a team message, taken from the record's start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Send,
    Receive,
}

impl RecordKind {
    /// The literal tag that opens a record of this kind.
    pub fn marker(self) -> &'static str {
        match self {
            RecordKind::Send => "[发送]",
            RecordKind::Receive => "[接收]",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Send => "send",
            RecordKind::Receive => "receive",
        }
    }
}

/// Known detail lines that may follow a start marker.
///
/// Variant order is the matching priority: when a line contains more than one
/// label, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Position,
    Ball,
    Role,
    PassTarget,
    MessageBudget,
}

impl FieldKey {
    pub const PRIORITY: [FieldKey; 5] = [
        FieldKey::Position,
        FieldKey::Ball,
        FieldKey::Role,
        FieldKey::PassTarget,
        FieldKey::MessageBudget,
    ];

    /// Label text as written by the robots, delimiter included.
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Position => "位置:",
            FieldKey::Ball => "球:",
            FieldKey::Role => "角色:",
            FieldKey::PassTarget => "传球目标:",
            FieldKey::MessageBudget => "消息预算剩余:",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Position => "position",
            FieldKey::Ball => "ball",
            FieldKey::Role => "role",
            FieldKey::PassTarget => "passTarget",
            FieldKey::MessageBudget => "messageBudget",
        }
    }
}

/// One send/receive entry from a team-communication log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub kind: RecordKind,
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robot_id: Option<u32>,
    pub source_file: String,
    /// 1-based line of the start marker.
    pub line: usize,
    #[serde(default)]
    pub fields: BTreeMap<FieldKey, String>,
}

impl LogRecord {
    pub fn new(kind: RecordKind, source_file: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp_ms: 0,
            robot_id: None,
            source_file: source_file.into(),
            line: 0,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(&self, key: FieldKey) -> Option<&str> {
        self.fields.get(&key).map(String::as_str)
    }
}
