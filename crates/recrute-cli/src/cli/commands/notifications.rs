//! Notification command handlers.

use anyhow::Result;
use recrute_core::SessionManager;

use super::{format_date, require};

pub async fn list(session: &SessionManager) -> Result<()> {
    require(session, None).await?;
    let notifications = session.notifications().list().await?;
    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }
    for n in notifications {
        let marker = if n.read { ' ' } else { '*' };
        println!(
            "{marker} {}  {}  {}  {}",
            n.id,
            format_date(&n.created_at),
            n.title,
            n.message
        );
    }
    Ok(())
}

pub async fn read(session: &SessionManager, id: &str) -> Result<()> {
    require(session, None).await?;
    session.notifications().mark_read(id).await?;
    println!("Marked {id} as read.");
    Ok(())
}
