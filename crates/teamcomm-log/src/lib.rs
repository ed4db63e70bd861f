//! # Team-Communication Log Parser
//!
//! Parser for the `team_comm_p<N>.txt` logs written by each simulated robot,
//! producing an ordered list of typed [`LogRecord`](ir::LogRecord)s.
//!
//! ## Overview
//!
//! A log is a sequence of entries. Each entry starts with a `[发送]` (send) or
//! `[接收]` (receive) line and is followed by indented detail lines:
//!
//! ```text
//! [接收] 时间=1520ms 来自机器人3号
//!   位置: (-1200, 340)
//!   球: (150, -20)
//!   角色: supporter
//!   传球目标: 4 | 行走目标: (0, 0)
//!   机器人状态: 站立
//! ```
//!
//! The parser handles:
//!
//! - **Multi-line records**: detail lines attach to the most recent start line
//! - **Optional markers**: missing time or robot markers fall back to `0` / `None`
//! - **Unknown lines**: headers, blank lines and unlisted details are skipped
//! - **Incremental updates**: logs that are still being written can be fed in chunks
//!
//! The parser never fails. Log format drift degrades the output rather than
//! stopping it.
//!
//! ## Record IR
//!
//! The [`ir`] module defines the record schema:
//!
//! - [`LogRecord`](ir::LogRecord) - kind, timestamp, robot id, provenance, fields
//! - [`RecordKind`](ir::RecordKind) - `Send` / `Receive`
//! - [`FieldKey`](ir::FieldKey) - the five known detail labels, in match priority
//!
//! ## Examples
//!
//! ### One-shot Parsing
//!
//! ```
//! use teamcomm_log::ir::{FieldKey, RecordKind};
//!
//! let log = "[发送] 时间=120ms 来自机器人3号\n位置: (1,2)\n[接收] 时间=200ms\n球: (3,4)\n";
//! let records = teamcomm_log::parse(log, "team_comm_p3.txt");
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].kind, RecordKind::Send);
//! assert_eq!(records[0].robot_id, Some(3));
//! assert_eq!(records[0].field(FieldKey::Position), Some("(1,2)"));
//! assert_eq!(records[1].robot_id, None);
//! ```
//!
//! ### Streaming/Incremental Parsing
//!
//! ```
//! use teamcomm_log::RecordParser;
//!
//! let mut parser = RecordParser::new("team_comm_p1.txt");
//!
//! // The first record stays open until the next start line arrives
//! let first = parser.update("[发送] 时间=40ms\n  角色: goalie\n");
//! assert!(first.is_empty());
//!
//! let second = parser.update("[接收] 时间=52ms 来自机器人2号\n");
//! assert_eq!(second.len(), 1);
//!
//! let rest = parser.finish();
//! assert_eq!(rest.len(), 1);
//! ```
//!
//! ### Exporting to JSON
//!
//! ```no_run
//! use std::fs;
//!
//! let log = fs::read_to_string("team_comm_p1.txt")?;
//! let records = teamcomm_log::parse(&log, "team_comm_p1.txt");
//! let json = serde_json::to_string_pretty(&records)?;
//! fs::write("records.json", json)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Client-side style record filtering.
pub mod filter;
/// Typed record Intermediate Representation (IR).
pub mod ir;
/// Line-oriented parser implementation.
pub mod parser;
/// Aggregate counters over parsed records.
pub mod stats;


pub use filter::RecordFilter;
pub use parser::{RecordParser, parse};
pub use stats::LogStats;

/// Schema version for the record JSON shape.
///
/// - MAJOR: Breaking changes to record structure
/// - MINOR: New optional fields or field keys
/// - PATCH: Bug fixes to parsing behavior
pub const SCHEMA_VERSION: &str = "1.1.0";
