//! Built-in predicate implementations, one module per concern.
//!
//! Checks return [`Verdict::Pass`](crate::rules::Verdict::Pass) for blank
//! values unless blankness is what they check; the required rules own that.

pub(crate) mod budget;
pub(crate) mod dates;
pub(crate) mod format;
pub(crate) mod hierarchy;
pub(crate) mod membership;
pub(crate) mod placement;
pub(crate) mod required;
pub(crate) mod uniqueness;
