use crate::ir::{LogRecord, RecordKind};
use serde::Serialize;
use std::collections::BTreeSet;

/// Summary counters shown on top of a team's viewer page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogStats {
    pub total: usize,
    pub sent: usize,
    pub received: usize,
    /// Distinct robot ids, ascending. Records without an id, or with id 0, are
    /// not counted.
    pub robots: BTreeSet<u32>,
}

impl LogStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total += 1;
            match record.kind {
                RecordKind::Send => stats.sent += 1,
                RecordKind::Receive => stats.received += 1,
            }
            stats.robots.extend(record.robot_id.filter(|&id| id != 0));
        }
        stats
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }
}
