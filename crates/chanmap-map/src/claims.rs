use std::collections::BTreeSet;

/// Source and target names already consumed by a generic pass.
///
/// Owned by a single engine run. The exact and rule passes never consult it,
/// so a channel matched by a rule can still be matched again generically.
#[derive(Debug, Clone, Default)]
pub struct ClaimSet {
    sources: BTreeSet<String>,
    targets: BTreeSet<String>,
}

impl ClaimSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, source: &str, target: &str) {
        self.claim_source(source);
        self.claim_target(target);
    }

    pub fn claim_source(&mut self, source: &str) {
        self.sources.insert(source.to_string());
    }

    pub fn claim_target(&mut self, target: &str) {
        self.targets.insert(target.to_string());
    }

    pub fn is_source_claimed(&self, source: &str) -> bool {
        self.sources.contains(source)
    }

    pub fn is_target_claimed(&self, target: &str) -> bool {
        self.targets.contains(target)
    }

    pub fn claimed_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn claimed_targets(&self) -> usize {
        self.targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_are_tracked_per_side() {
        let mut claims = ClaimSet::new();
        claims.claim("Engine Speed", "AV_Eng");
        claims.claim_target("Throttle");
        assert!(claims.is_source_claimed("Engine Speed"));
        assert!(claims.is_target_claimed("Throttle"));
        assert!(!claims.is_source_claimed("AV_Eng"));
        assert_eq!(claims.claimed_sources(), 1);
        assert_eq!(claims.claimed_targets(), 2);
    }
}
