use agora_core::Proposal;
use agora_ports::SelectionRule;

/// First-come-first-served selection
///
/// The earliest-collected proposal wins regardless of price. Useful for
/// markets where submission order matters more than the offered amount.
pub struct FirstComeFirstServed;

impl SelectionRule for FirstComeFirstServed {
    fn name(&self) -> &str {
        "First Come First Served"
    }

    fn select<'a>(&self, candidates: &'a [Proposal]) -> Option<&'a Proposal> {
        candidates.first()
    }
}
