//! # Team-Communication Viewer Generator
//!
//! Walks a simulator log tree and writes a self-contained HTML page per team.
//!
//! ```text
//! <log_root>/
//! └── 20251102_143107/          match
//!     ├── Team5/                team
//!     │   ├── team_comm_p1.txt
//!     │   ├── team_comm_p2.txt
//!     │   └── view_logs_standalone.html   ← generated
//!     └── Team12/
//! ```
//!
//! The page embeds either the raw logs, re-parsed in the browser, or the
//! records already parsed by [`teamcomm_log`], and needs no server to open.
//!
//! ```no_run
//! use teamcomm_viewer::{EmbedMode, Generator, ViewerConfig};
//!
//! let config = ViewerConfig::new()
//!     .with_log_root("Config/Sim_Logs")
//!     .with_embed(EmbedMode::Parsed);
//! let report = Generator::new(config)?.run()?;
//! println!("{} page(s) written", report.generated());
//! # Ok::<(), teamcomm_viewer::ViewerError>(())
//! ```

pub mod bundle;
pub mod config;
pub mod error;
pub mod generate;
pub mod render;
pub mod scanner;
pub mod watch;

pub use bundle::{LogFile, TeamBundle, load_bundle};
pub use config::{EmbedMode, ViewerConfig};
pub use error::ViewerError;
pub use generate::{GenerateReport, Generator, TeamOutcome, TeamStatus};
pub use render::render_viewer;
pub use scanner::{MatchDir, SimLogScanner, TeamDir};
