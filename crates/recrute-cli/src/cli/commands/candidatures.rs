//! Application command handlers.

use anyhow::{Result, bail};
use recrute_core::SessionManager;
use recrute_core::types::{Candidature, CandidatureStatus, Role};

use super::{format_date, or_dash, require};

pub async fn apply(session: &SessionManager, offer_id: &str, cv_id: &str) -> Result<()> {
    require(session, Some(Role::Candidate)).await?;
    let candidature = session.candidatures().apply(offer_id, cv_id).await?;
    println!("Applied to offer {} ({})", candidature.offer_id, candidature.id);
    if let Some(score) = candidature.matching_score {
        println!("matching score: {score:.1}");
    }
    Ok(())
}

/// Own applications, or with `offer_id` the ones received for that offer.
pub async fn list(session: &SessionManager, offer_id: Option<&str>) -> Result<()> {
    let candidatures = match offer_id {
        Some(offer_id) => {
            require(session, Some(Role::Recruiter)).await?;
            session.candidatures().for_offer(offer_id).await?
        }
        None => {
            let user = require(session, None).await?;
            if user.role == Role::Recruiter {
                bail!(
                    "Recruiters list applications per offer: `recrute candidatures list --offer <OFFER_ID>`"
                );
            }
            session.candidatures().mine().await?
        }
    };

    if candidatures.is_empty() {
        println!("No applications found.");
        return Ok(());
    }
    for c in &candidatures {
        println!(
            "{}  offer {}  {}  {}  {}",
            c.id,
            c.offer_id,
            c.status,
            score_label(c),
            format_date(&c.applied_at)
        );
    }
    Ok(())
}

pub async fn show(session: &SessionManager, id: &str) -> Result<()> {
    require(session, None).await?;
    let c = session.candidatures().get(id).await?;
    println!("{}  [{}]", c.id, c.status);
    println!("offer:     {}", c.offer_id);
    println!("candidate: {}", or_dash(Some(c.candidate_id.as_str())));
    println!("score:     {}", score_label(&c));
    println!("applied:   {}", format_date(&c.applied_at));
    if let Some(explanation) = c.explanation.as_deref() {
        println!();
        println!("{explanation}");
    }
    Ok(())
}

pub async fn set_status(
    session: &SessionManager,
    id: &str,
    status: CandidatureStatus,
) -> Result<()> {
    require(session, Some(Role::Recruiter)).await?;
    let updated = session.candidatures().update_status(id, status).await?;
    println!("Application {} is now {}", updated.id, updated.status);
    Ok(())
}

fn score_label(c: &Candidature) -> String {
    c.matching_score
        .map_or_else(|| "-".to_string(), |s| format!("{s:.1}"))
}
