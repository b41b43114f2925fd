//! Rule-based security screener for finsift.
//!
//! Consumes securities (with OHLC history) plus user-defined filters,
//! derives a per-security snapshot of current indicator values, evaluates
//! every enabled filter against that snapshot, and returns the securities
//! matching all of them, ranked by absolute 1-day change.
//!
//! The engine never fails for data-quality reasons: securities with too
//! little history are skipped, malformed filters evaluate to no-match, and
//! numeric edge cases resolve to "no value" rather than NaN.

mod engine;
mod filter;
mod preset;
mod snapshot;

pub use engine::{screen, MatchValues, ScreenMatch};
pub use filter::{Condition, Filter, FilterParseError, IndicatorId};
pub use preset::{apply_preset, preset_catalog, Preset, PresetFilter};
pub use snapshot::{Snapshot, MIN_HISTORY};
