//! Winner computation over a candidate roster.

use crate::domain::entities::Candidate;

/// Outcome of a tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    /// The roster is empty; no winner can be reported.
    NoCandidates,
    /// Exactly one candidate holds the maximum vote count.
    Sole(String),
    /// Several candidates tie at the maximum vote count.
    Tie(Vec<String>),
}

impl Winner {
    /// One-line result suitable for the results panel.
    #[must_use]
    pub fn headline(&self) -> String {
        match self {
            Self::NoCandidates => "No winner".to_string(),
            Self::Sole(name) => format!("Winner: {name}"),
            Self::Tie(names) => format!("Tie between: {}", names.join(", ")),
        }
    }
}

/// Finds the candidate(s) holding the maximum vote count.
///
/// With an all-zero roster every candidate ties at zero.
#[must_use]
pub fn winner(candidates: &[Candidate]) -> Winner {
    let Some(max_votes) = candidates.iter().map(|c| c.votes).max() else {
        return Winner::NoCandidates;
    };

    let mut leaders: Vec<String> = candidates
        .iter()
        .filter(|c| c.votes == max_votes)
        .map(|c| c.name.clone())
        .collect();

    if leaders.len() == 1 {
        Winner::Sole(leaders.remove(0))
    } else {
        Winner::Tie(leaders)
    }
}
