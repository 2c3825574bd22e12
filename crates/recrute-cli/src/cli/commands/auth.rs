//! Login, registration and session commands.

use anyhow::{Context, Result};
use recrute_core::guard;
use recrute_core::types::{Registration, Role};
use recrute_core::{SessionManager, SessionState};

pub async fn login(session: &SessionManager, email: &str, password: &str) -> Result<()> {
    let user = session.sign_in(email.trim(), password).await?;
    println!("Logged in as {} ({})", user.email, user.role);
    Ok(())
}

pub async fn register(
    session: &SessionManager,
    email: String,
    password: String,
    role: Role,
    name: Option<String>,
) -> Result<()> {
    let registration = Registration {
        email: email.trim().to_string(),
        password,
        role,
        display_name: name.filter(|n| !n.trim().is_empty()),
    };
    let user = session
        .sign_up(&registration)
        .await
        .context("registration failed")?;
    println!("Account created. Logged in as {} ({})", user.email, user.role);
    Ok(())
}

pub fn logout(session: &SessionManager) -> Result<()> {
    session.logout()?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(session: &SessionManager) -> Result<()> {
    match session.initialize().await {
        SessionState::Authenticated { user } => {
            println!("{} ({})", user.email, user.role);
            println!("id:   {}", user.id);
            println!("home: {}", guard::home_for(user.role));
        }
        _ => println!("Not logged in."),
    }
    Ok(())
}
