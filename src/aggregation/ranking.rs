//! Top-N unresolved risks.
//!
//! Ordering is score descending, then creation time ascending (the oldest
//! open risk surfaces first), then id ascending so the result never depends
//! on input order.

use crate::core::Risk;
use crate::scoring::ScoredRisk;
use std::cmp::Ordering;

/// Compare two risks in ranking order.
pub fn ranking_order(a: &Risk, b: &Risk) -> Ordering {
    b.score()
        .cmp(&a.score())
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

fn select<'a, T>(items: &'a [T], n: usize, risk_of: impl Fn(&T) -> &Risk) -> Vec<&'a T> {
    let mut open: Vec<&T> = items
        .iter()
        .filter(|item| !risk_of(*item).is_resolved())
        .collect();
    open.sort_by(|a, b| ranking_order(risk_of(*a), risk_of(*b)));
    open.truncate(n);
    open
}

/// The `n` most severe unresolved risks; fewer when fewer qualify.
pub fn top_risks(risks: &[Risk], n: usize) -> Vec<Risk> {
    let ranked: Vec<Risk> = select(risks, n, |risk| risk)
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(
        input = risks.len(),
        requested = n,
        returned = ranked.len(),
        "ranked top risks"
    );
    ranked
}

/// Same selection over already-annotated risks.
pub fn top_scored(scored: &[ScoredRisk], n: usize) -> Vec<ScoredRisk> {
    select(scored, n, |item| &item.risk)
        .into_iter()
        .cloned()
        .collect()
}
