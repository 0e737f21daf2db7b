use crate::types::CaseRecord;

/// Heuristic identity comparison for free-text legal case names.
///
/// Sources render the same case inconsistently (abbreviations, missing
/// "et al." suffixes, "State v." shorthand), so exact string equality would
/// silently drop correct matches. The rules run in a fixed order (containment,
/// then party-prefix equality) and trade a few false positives for far fewer
/// false negatives. Prefix lengths are untuned constants; they live here as
/// fields so a labeled corpus can revisit them without touching the rules.
#[derive(Debug, Clone, Copy)]
pub struct NameMatcher {
    /// Per-party prefix length compared by `matches`.
    pub exact_prefix: usize,
    /// Looser per-party prefix length used by the party-partial rule of
    /// `best_match`.
    pub partial_prefix: usize,
}

impl Default for NameMatcher {
    fn default() -> Self {
        Self {
            exact_prefix: 6,
            partial_prefix: 8,
        }
    }
}

/// Lowercase, canonicalize " v. " / " vs. " to " v ", drop everything but
/// letters, digits and spaces, collapse runs of whitespace.
pub fn normalize(name: &str) -> String {
    let lowered = name
        .to_lowercase()
        .replace(" v. ", " v ")
        .replace(" vs. ", " v ");
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Dedup key for a case display name: normalized without separator
/// canonicalization, truncated to 60 characters.
pub fn dedup_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == ' ')
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(60).collect()
}

/// Split a normalized name into its two party names, or None if the name
/// does not have exactly one " v " separator.
fn split_parties(normalized: &str) -> Option<(&str, &str)> {
    let mut parts = normalized.split(" v ");
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first.trim(), second.trim()))
}

// Normalized names are ASCII by construction, so byte slicing is safe.
fn prefix(s: &str, len: usize) -> &str {
    &s[..s.len().min(len)]
}

impl NameMatcher {
    /// Do two free-text case names refer to the same case?
    ///
    /// Symmetric by construction: both names go through the same
    /// normalization and every rule treats its arguments alike.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        let na = normalize(a);
        let nb = normalize(b);
        if na.is_empty() || nb.is_empty() {
            return false;
        }

        // One name a shortened form of the other.
        if na.contains(&nb) || nb.contains(&na) {
            return true;
        }

        // Same party pair, tolerating suffix variation on each party.
        match (split_parties(&na), split_parties(&nb)) {
            (Some((a1, a2)), Some((b1, b2))) => {
                prefix(a1, self.exact_prefix) == prefix(b1, self.exact_prefix)
                    && prefix(a2, self.exact_prefix) == prefix(b2, self.exact_prefix)
            },
            _ => false,
        }
    }

    /// Pick the candidate that best represents `target`.
    ///
    /// Tie-break order: exact identity per `matches`, then the party-partial
    /// rule (both party prefixes contained in the display name), then the
    /// first candidate in the adapter's relevance order, then none.
    pub fn best_match(&self, target: &str, candidates: &[CaseRecord]) -> Option<CaseRecord> {
        if let Some(r) = candidates
            .iter()
            .find(|r| self.matches(target, &r.case_name))
        {
            return Some(r.clone());
        }

        let normalized_target = normalize(target);
        if let Some((p1, p2)) = split_parties(&normalized_target) {
            let p1 = prefix(p1, self.partial_prefix);
            let p2 = prefix(p2, self.partial_prefix);
            if !p1.is_empty() && !p2.is_empty() {
                if let Some(r) = candidates.iter().find(|r| {
                    let name = r.case_name.to_lowercase();
                    name.contains(p1) && name.contains(p2)
                }) {
                    return Some(r.clone());
                }
            }
        }

        candidates.first().cloned()
    }
}
