use std::collections::HashSet;

use crate::shared::text::tokenize;

/// Count how many words of the claimant's verification text also appear in
/// the found item's description.
///
/// Every occurrence in the verification text counts, so repeating a shared
/// word raises the score. Zero means no credible overlap.
pub fn keyword_score(found_description: &str, verification_text: &str) -> usize {
    let vocabulary: HashSet<String> = tokenize(found_description).into_iter().collect();

    tokenize(verification_text)
        .iter()
        .filter(|token| vocabulary.contains(*token))
        .count()
}
