mod claim_adjudicator;
mod keyword_scorer;

pub use claim_adjudicator::{ClaimAdjudicator, ClaimOutcome, Disclosure};
pub use keyword_scorer::keyword_score;
