//! Offer command handlers.

use anyhow::Result;
use recrute_core::SessionManager;
use recrute_core::types::{JobOffer, NewJobOffer, OfferQuery, OfferStatus, Role};

use super::{format_date, or_dash, require};

pub async fn list(
    session: &SessionManager,
    page: u32,
    limit: u32,
    status: Option<OfferStatus>,
    location: Option<String>,
) -> Result<()> {
    require(session, None).await?;
    let query = OfferQuery {
        page,
        limit,
        status,
        location,
        mine: false,
    };
    let offers = session.offers().list(&query).await?;
    print_offers(&offers);
    Ok(())
}

pub async fn mine(session: &SessionManager, page: u32, limit: u32) -> Result<()> {
    require(session, Some(Role::Recruiter)).await?;
    let offers = session.offers().mine(page, limit).await?;
    print_offers(&offers);
    Ok(())
}

pub async fn show(session: &SessionManager, id: &str) -> Result<()> {
    require(session, None).await?;
    let offer = session.offers().get(id).await?;

    println!("{}  [{}]", offer.title, offer.status);
    println!("id:          {}", offer.id);
    println!("location:    {}", or_dash(offer.location.as_deref()));
    println!("contract:    {}", or_dash(offer.contract_type.as_deref()));
    match (offer.salary_min, offer.salary_max) {
        (Some(min), Some(max)) => println!("salary:      {min:.0} - {max:.0}"),
        (Some(min), None) => println!("salary:      from {min:.0}"),
        (None, Some(max)) => println!("salary:      up to {max:.0}"),
        (None, None) => {}
    }
    if let Some(years) = offer.experience_required {
        println!("experience:  {years} years");
    }
    if let Some(skills) = offer.required_skills.as_deref() {
        println!("skills:      {skills}");
    }
    println!("published:   {}", format_date(&offer.published_at));
    if !offer.description.is_empty() {
        println!();
        println!("{}", offer.description);
    }
    Ok(())
}

pub async fn create(session: &SessionManager, offer: &NewJobOffer) -> Result<()> {
    require(session, Some(Role::Recruiter)).await?;
    let created = session.offers().create(offer).await?;
    println!("Created offer {} ({})", created.id, created.title);
    Ok(())
}

fn print_offers(offers: &[JobOffer]) {
    if offers.is_empty() {
        println!("No offers found.");
        return;
    }
    for offer in offers {
        println!(
            "{}  {}  {}  {}  {}",
            offer.id,
            offer.title,
            or_dash(offer.location.as_deref()),
            offer.status,
            format_date(&offer.published_at)
        );
    }
}
