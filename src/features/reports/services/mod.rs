mod candidate_matcher;
mod report_service;

pub use candidate_matcher::{CandidateMatcher, MatchStrategy};
pub use report_service::ReportService;
