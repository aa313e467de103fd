// Request-level workflows: what a CLI command or HTTP handler actually runs.
//
// - check: one upload against the whole corpus (optionally persisted)
// - compare: two stored documents against each other

pub mod check;
pub mod compare;

pub use check::CheckOptions;
