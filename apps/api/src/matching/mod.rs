// Scoring core: job ranking, sub-scores, weight selection, skill gaps and levels.
// Every function here is a pure function of its inputs; shared collaborators
// (catalog, relevance scorer) are read-only.

pub mod gaps;
pub mod handlers;
pub mod ranker;
pub mod relevance;
pub mod role_match;
pub mod skill_levels;
pub mod sub_scores;
pub mod weights;
