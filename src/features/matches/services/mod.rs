mod match_ledger;

pub use match_ledger::MatchLedger;
