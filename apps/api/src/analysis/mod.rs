// Full profile analysis: shortlist → rank → gaps → blended scores.
// The pipeline is pure; handlers supply the catalog, relevance scorer and current year.

pub mod handlers;
pub mod pipeline;
pub mod shortlist;
