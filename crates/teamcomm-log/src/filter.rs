use crate::ir::{LogRecord, RecordKind};

/// Narrows a record list the way the viewer's filter bar does.
///
/// Unset criteria match everything. A robot filter never matches a record
/// without a robot id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub kind: Option<RecordKind>,
    pub robot: Option<u32>,
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn robot(mut self, robot: u32) -> Self {
        self.robot = Some(robot);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        if self.kind.is_some_and(|kind| kind != record.kind) {
            return false;
        }
        if self.robot.is_some() && self.robot != record.robot_id {
            return false;
        }
        match self.search.as_deref().map(str::to_lowercase) {
            Some(term) if !term.is_empty() => serde_json::to_string(record)
                .map(|json| json.to_lowercase().contains(&term))
                .unwrap_or(false),
            _ => true,
        }
    }

    pub fn apply<'a>(&self, records: &'a [LogRecord]) -> Vec<&'a LogRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FieldKey;

    fn record(kind: RecordKind, robot: Option<u32>, role: &str) -> LogRecord {
        let mut r = LogRecord::new(kind, "team_comm_p1.txt");
        r.robot_id = robot;
        r.fields.insert(FieldKey::Role, role.to_string());
        r
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = RecordFilter::new();
        assert!(filter.matches(&record(RecordKind::Send, None, "Striker")));
        assert!(filter.search("").matches(&record(RecordKind::Receive, Some(2), "x")));
    }

    #[test]
    fn test_kind_and_robot() {
        let filter = RecordFilter::new().kind(RecordKind::Receive).robot(3);
        assert!(filter.matches(&record(RecordKind::Receive, Some(3), "Goalie")));
        assert!(!filter.matches(&record(RecordKind::Send, Some(3), "Goalie")));
        assert!(!filter.matches(&record(RecordKind::Receive, Some(4), "Goalie")));
        assert!(!filter.matches(&record(RecordKind::Receive, None, "Goalie")));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = vec![
            record(RecordKind::Send, Some(1), "Striker"),
            record(RecordKind::Send, Some(1), "Goalie"),
        ];
        let hits = RecordFilter::new().search("STRIKER").apply(&records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field(FieldKey::Role), Some("Striker"));
    }
}
