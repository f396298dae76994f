//! Turns a [`ReconstructionPlan`] into the scheduler's working set: each
//! term resolved to the fetch-info that covers it, grouped under a stable
//! key so two terms served by the same xorb byte range share one fetch.

use std::collections::HashMap;

use xet_cas_client::{FetchInfo, ReconstructionPlan, Term};

use crate::error::DownloadError;

/// Identifies one xorb byte range a fetch-info names. Two terms that
/// resolve to the same fetch-info (same hash, same chunk range, same URL
/// byte range) share a key, and therefore a single HTTP fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FetchRangeKey {
    pub(crate) hash: String,
    pub(crate) chunk_lo: i32,
    pub(crate) chunk_hi: i32,
    pub(crate) url_lo: u64,
    pub(crate) url_hi: u64,
}

impl FetchRangeKey {
    fn from_fetch_info(hash: &str, info: &FetchInfo) -> Self {
        Self {
            hash: hash.to_string(),
            chunk_lo: info.range.start,
            chunk_hi: info.range.end,
            url_lo: info.url_range.start,
            url_hi: info.url_range.end,
        }
    }
}

/// One term of the plan, paired with the fetch-info and key that will
/// serve it.
pub(crate) struct PlannedTerm {
    pub(crate) term: Term,
    pub(crate) key: FetchRangeKey,
    pub(crate) fetch_info: FetchInfo,
}

/// Resolves every term in `plan` to its covering fetch-info, and counts
/// how many terms reference each xorb hash (spec §4.7 "Planning" —
/// `xorb_usage_count`, the basis for per-download caching).
pub(crate) fn build_planned_terms(
    plan: &ReconstructionPlan,
) -> Result<(Vec<PlannedTerm>, HashMap<String, usize>), DownloadError> {
    let mut hash_usage: HashMap<String, usize> = HashMap::new();
    for term in &plan.terms {
        *hash_usage.entry(term.hash.clone()).or_insert(0) += 1;
    }

    let mut planned = Vec::with_capacity(plan.terms.len());
    for term in &plan.terms {
        let fetch_info = plan.fetch_info_for(term)?;
        let key = FetchRangeKey::from_fetch_info(&term.hash, fetch_info);
        planned.push(PlannedTerm {
            term: term.clone(),
            key,
            fetch_info: fetch_info.clone(),
        });
    }

    Ok((planned, hash_usage))
}

/// Sum of `unpacked_length` over every planned term sharing `key` — the
/// total decompressed size the fetch for that key must produce, used to
/// preallocate the batch decode buffer (spec §4.7 "Fetching a xorb").
pub(crate) fn total_len_for_key(planned: &[PlannedTerm], key: &FetchRangeKey) -> usize {
    planned
        .iter()
        .filter(|p| &p.key == key)
        .map(|p| p.term.unpacked_length as usize)
        .sum()
}
