//! Migration engine.
//!
//! Every input line goes through the same short pipeline:
//!
//! ```text
//! raw line ── classify (classify.rs)
//!               │
//!               ├─ skip          blank / '#' comment
//!               ├─ Scalar        normalize_key (normalize.rs) ──▶ written immediately
//!               ├─ Weight        upsert into the weights map
//!               └─ tm / lm / ff  DeclarationBody::of (body.rs)
//!                                  ├─ Positional ─▶ positional.rs
//!                                  └─ Flagged    ─▶ flagged.rs
//!                                        └─ grammar class inference (infer.rs)
//!                                                   │
//!                                                   v
//!                                  feature_functions / grammars accumulators
//!
//! end of input ── emit.rs ─▶ feature_functions = [..]  grammars = [..]  weights = {..}
//! ```
//!
//! ## Responsibilities by module
//!
//! - `classify.rs`: decides which of the five line categories a line belongs
//!   to and splits off its key/value or declaration body.
//! - `normalize.rs`: legacy key spellings to canonical ones.
//! - `body.rs`: picks the positional or flag-style reading of a declaration
//!   body and dispatches it.
//! - `flagged.rs`: `TYPE -key value ...` bodies.
//! - `positional.rs`: fixed-arity `tm` and `lm` bodies.
//! - `infer.rs`: grammar class inference and the directory probe seam.
//! - `emit.rs`: the output format.
//! - `session.rs`: owns the accumulators and the output sink for one run.
//! - `metrics.rs`: counts, timing and the optional per-line trace.
//!
//! ## Debugging
//!
//! Set `SEVENIZE_LOG=debug` to log every classification and class decision.

#[path = "engine/body.rs"]
mod body;
#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/emit.rs"]
mod emit;
#[path = "engine/flagged.rs"]
mod flagged;
#[path = "engine/infer.rs"]
mod infer;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/positional.rs"]
mod positional;
#[path = "engine/session.rs"]
mod session;

pub use classify::LineCategory;
pub use infer::{FsProbe, PathProbe};
pub use metrics::{CategoryCounts, RunMetrics, TraceEntry};
pub use session::Session;

#[cfg(test)]
pub(crate) use infer::StaticProbe;
