//! Candidate profile command handlers.

use anyhow::{Result, bail};
use recrute_core::SessionManager;
use recrute_core::types::{CandidateProfile, CandidateProfileUpdate, Role};

use super::{or_dash, require};

pub async fn show(session: &SessionManager) -> Result<()> {
    let user = require(session, Some(Role::Candidate)).await?;
    let profile = session.profile().get().await?;
    println!("email:     {}", user.email);
    print_profile(&profile);
    Ok(())
}

pub async fn update(session: &SessionManager, update: &CandidateProfileUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("Nothing to update: pass --name, --phone or --location");
    }
    require(session, Some(Role::Candidate)).await?;
    let profile = session.profile().update(update).await?;
    println!("Profile updated.");
    print_profile(&profile);
    Ok(())
}

fn print_profile(profile: &CandidateProfile) {
    println!("name:      {}", or_dash(profile.name.as_deref()));
    println!("phone:     {}", or_dash(profile.phone.as_deref()));
    println!("location:  {}", or_dash(profile.location.as_deref()));
    if let Some(birth_date) = profile.birth_date.as_deref() {
        println!("born:      {birth_date}");
    }
}
