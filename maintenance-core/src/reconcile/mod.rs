//! Reconciliation of the desired schedule against the remote incidents.
//!
//! Two steps, in this order:
//! - [`adjust`] drops desired terms that collide with incidents created by
//!   other means (those incidents are reported, never touched)
//! - [`ReconcilePlan::compute`] diffs what is left against the incidents this
//!   tool manages and yields the deletions and additions to issue

mod adjust;
mod change;
mod plan;

pub use adjust::{Adjustment, Notice, adjust};
pub use change::{Change, ChangeKind};
pub use plan::{ApplyStats, ReconcilePlan, Skip, SkipReason, diff_adds, diff_deletes};
