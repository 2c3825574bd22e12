//! CV command handlers (candidates only).

use std::path::Path;

use anyhow::Result;
use recrute_core::SessionManager;
use recrute_core::types::Role;

use super::{format_date, require};

pub async fn list(session: &SessionManager) -> Result<()> {
    require(session, Some(Role::Candidate)).await?;
    let cvs = session.cvs().mine().await?;
    if cvs.is_empty() {
        println!("No CVs uploaded yet.");
        return Ok(());
    }
    for cv in cvs {
        println!("{}  {}  {}", cv.id, cv.file_name, format_date(&cv.uploaded_at));
    }
    Ok(())
}

pub async fn upload(session: &SessionManager, file: &Path) -> Result<()> {
    require(session, Some(Role::Candidate)).await?;
    let cv = session.cvs().upload(file, None).await?;
    println!("Uploaded {} as {}", cv.file_name, cv.id);
    Ok(())
}

pub async fn show(session: &SessionManager, id: &str) -> Result<()> {
    require(session, Some(Role::Candidate)).await?;
    let cv = session.cvs().get(id).await?;
    println!("{}  {}", cv.id, cv.file_name);
    println!("uploaded: {}", format_date(&cv.uploaded_at));
    if let Some(structure) = &cv.json_structure {
        println!("{}", serde_json::to_string_pretty(structure)?);
    }
    Ok(())
}

pub async fn delete(session: &SessionManager, id: &str) -> Result<()> {
    require(session, Some(Role::Candidate)).await?;
    session.cvs().delete(id).await?;
    println!("Deleted CV {id}");
    Ok(())
}
