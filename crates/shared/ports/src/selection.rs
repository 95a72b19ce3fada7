use agora_core::Proposal;

/// Port for winner selection within one contested group
///
/// Given every validated proposal for a single asset, in collection order,
/// pick the one to execute. Implementations must be deterministic: the
/// same candidate list always yields the same winner.
pub trait SelectionRule: Send {
    /// Select the winning proposal, or `None` for an empty group
    fn select<'a>(&self, candidates: &'a [Proposal]) -> Option<&'a Proposal>;

    /// Get the name of the rule
    fn name(&self) -> &str;
}
