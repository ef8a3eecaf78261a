//! Shadow window reader.
//!
//! A shadow window directory holds a `window-summary.md` and one
//! `checkpoint-HNN/` directory per completed hour. The reader extracts the
//! labeled metrics the classification report needs from the summary and from
//! the checkpoint of the last completed hour:
//!
//! ```text
//! <window-dir>/
//!   window-summary.md                      Duration Hours, Overall Status
//!   checkpoint-H24/
//!     shadow-gate-decision.md              Mismatch rate, incidents, Decision
//!     alert-probe.md                       optional
//! ```

pub mod error;
pub mod extract;
pub mod window;

pub use error::WindowError;
pub use extract::{extract_decimal, extract_number, extract_text};
pub use window::{
    ALERT_PROBE_FILE, AlertProbe, DECISION_FILE, DecisionFields, SUMMARY_FILE, SummaryFields,
    WindowMetrics, checkpoint_dir, parse_decision, parse_summary, read_window,
};
