//! Recruiter dashboard command handlers.

use anyhow::Result;
use recrute_core::SessionManager;
use recrute_core::types::{CandidateFilter, Role};

use super::{format_date, or_dash, require};

pub async fn overview(session: &SessionManager, limit: u32) -> Result<()> {
    require(session, Some(Role::Recruiter)).await?;
    let dashboard = session.dashboard();

    let stats = dashboard.stats().await?;
    println!("open offers:        {}", stats.open_offers);
    println!("applications:       {}", stats.total_candidatures);
    println!("  pending:          {}", stats.pending);
    println!("  accepted:         {}", stats.accepted);
    println!("  last 7 days:      {}", stats.last_week);

    let top = dashboard.top_candidates(limit).await?;
    println!();
    println!("Top candidates");
    if top.is_empty() {
        println!("  none yet");
    }
    for c in &top {
        println!(
            "  {}  {}  avg {:.1}  best {:.1}  ({} applications)",
            c.id,
            or_dash(c.name.as_deref()),
            c.average_score,
            c.best_score,
            c.candidature_count
        );
    }

    let latest = dashboard.latest_candidatures(limit).await?;
    println!();
    println!("Latest applications");
    if latest.is_empty() {
        println!("  none yet");
    }
    for c in &latest {
        println!(
            "  {}  {}  {}  {}  {}",
            format_date(&c.applied_at),
            or_dash(c.candidate_name.as_deref()),
            c.offer_title,
            c.status,
            c.matching_score
                .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"))
        );
    }
    Ok(())
}

pub async fn candidates(session: &SessionManager, filter: &CandidateFilter) -> Result<()> {
    require(session, Some(Role::Recruiter)).await?;
    let rows = session.dashboard().candidates(filter).await?;
    if rows.is_empty() {
        println!("No applications match.");
        return Ok(());
    }
    for row in &rows {
        println!(
            "{}  {}  {}  {}  {}  {}",
            row.candidature_id,
            or_dash(row.name.as_deref()),
            row.offer_title,
            row.status,
            row.matching_score
                .map_or_else(|| "-".to_string(), |s| format!("{s:.1}")),
            format_date(&row.applied_at)
        );
    }
    Ok(())
}
