use agora_core::Proposal;
use agora_ports::SelectionRule;

/// Standard price-priority selection
///
/// Proposals are ranked by:
/// 1. Strictly highest offered price
/// 2. Collection order (earliest submitted wins at the same price)
pub struct PricePriority;

impl SelectionRule for PricePriority {
    fn name(&self) -> &str {
        "Price Priority"
    }

    fn select<'a>(&self, candidates: &'a [Proposal]) -> Option<&'a Proposal> {
        // reduce keeps the earlier element on ties, giving the stable
        // earliest-collected tie-break.
        candidates
            .iter()
            .reduce(|best, candidate| if candidate.price > best.price { candidate } else { best })
    }
}
