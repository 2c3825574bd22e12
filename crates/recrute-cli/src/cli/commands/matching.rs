//! Matching command handlers.

use anyhow::Result;
use recrute_core::SessionManager;
use recrute_core::types::{MatchingList, MatchingResult, Role};

use super::{or_dash, require};

pub async fn score(session: &SessionManager, cv_id: &str, offer_id: &str, explain: bool) -> Result<()> {
    require(session, None).await?;
    let result = session.matching().score(cv_id, offer_id, explain).await?;
    print_result(&result);
    if let Some(explanations) = &result.explanations {
        println!("{}", serde_json::to_string_pretty(explanations)?);
    }
    Ok(())
}

pub async fn offers(session: &SessionManager, cv_id: &str, top_k: u32) -> Result<()> {
    require(session, Some(Role::Candidate)).await?;
    let list = session.matching().offers_for_cv(cv_id, top_k).await?;
    print_list(&list);
    Ok(())
}

pub async fn candidates(session: &SessionManager, offer_id: &str, top_k: u32) -> Result<()> {
    require(session, Some(Role::Recruiter)).await?;
    let list = session.matching().best_candidates(offer_id, top_k).await?;
    print_list(&list);
    Ok(())
}

fn print_result(result: &MatchingResult) {
    println!(
        "score {:.2}  {}",
        result.final_score,
        or_dash(Some(result.recommendation.as_str()))
    );
}

fn print_list(list: &MatchingList) {
    if list.matches.is_empty() {
        println!("No matches found.");
        return;
    }
    for m in &list.matches {
        let target = m.offer_id.as_deref().or(m.cv_id.as_deref());
        println!(
            "{}  {:.2}  {}",
            or_dash(target),
            m.final_score,
            or_dash(Some(m.recommendation.as_str()))
        );
    }
    println!("{} result(s)", list.total_results.max(list.matches.len()));
}
