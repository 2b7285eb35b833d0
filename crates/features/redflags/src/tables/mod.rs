//! Static rule tables, one per issue.
//!
//! Predicates match on `Some(..)` only, so an unanswered field never fires.

mod recovery;
mod sexual_health;
