mod match_record;

pub use match_record::{CreateMatch, MatchFilter, MatchRecord, MatchState, MatchStatus};
