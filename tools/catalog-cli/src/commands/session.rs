//! Admin session commands.

use std::path::Path;

use admin_session::{
    Access, AuthToken, FileTokenStore, GuardDecision, LoginRequest, LoginResponse,
    SessionContext, TokenKind,
};
use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.session();

    match args.command {
        SessionCommand::Login {
            token,
            response,
            access,
        } => {
            let kind = if access { TokenKind::Access } else { TokenKind::Admin };
            login(&mut session, token, response.as_deref(), kind, ctx).await
        }
        SessionCommand::Request { email, password } => {
            let request = LoginRequest::new(email, password);
            request.validate()?;
            ctx.output.json(&request);
            Ok(())
        }
        SessionCommand::Logout { yes } => logout(&mut session, yes, ctx),
        SessionCommand::Status => status(&session, ctx),
    }
}

async fn login(
    session: &mut SessionContext<FileTokenStore>,
    token: Option<String>,
    response: Option<&str>,
    kind: TokenKind,
    ctx: &Context,
) -> Result<()> {
    let token = match (token, response) {
        (Some(value), _) => AuthToken::new(value, kind)?,
        (None, Some(path)) => token_from_response(&ctx.resolve_path(path), kind).await?,
        (None, None) => anyhow::bail!("Pass --token or --response"),
    };

    session.login(token)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "loggedIn": true, "kind": kind.to_string() }));
    } else {
        ctx.output.success(&format!("Logged in ({} session)", kind));
    }
    Ok(())
}

async fn token_from_response(path: &Path, kind: TokenKind) -> Result<AuthToken> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read login response: {}", path.display()))?;
    let token = LoginResponse::parse(&body)?.into_token(kind)?;
    Ok(token)
}

fn logout(session: &mut SessionContext<FileTokenStore>, yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !ctx.output.is_json() && session.is_authenticated() {
        let confirmed = Confirm::new()
            .with_prompt("Log out of the admin console?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Logout cancelled");
            return Ok(());
        }
    }

    let outcome = session.logout()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "message": outcome.message(),
            "redirect": outcome.redirect(),
        }));
        return Ok(());
    }

    match outcome.message() {
        Some(message) => ctx.output.success(message),
        None => ctx.output.info("No active session"),
    }
    ctx.output.kv("redirect", outcome.redirect());
    Ok(())
}

fn status(session: &SessionContext<FileTokenStore>, ctx: &Context) -> Result<()> {
    let current = session.current()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "authenticated": current.is_some(),
            "kind": current.as_ref().map(|t| t.kind().to_string()),
            "tokenFile": session.store().path().display().to_string(),
        }));
        return Ok(());
    }

    ctx.output.header("Session");
    ctx.output
        .kv("token file", &session.store().path().display().to_string());
    match current {
        Some(token) => ctx.output.kv("status", &format!("signed in ({})", token.kind())),
        None => ctx.output.kv("status", "signed out"),
    }
    for (label, access) in [("public pages", Access::Public), ("private pages", Access::Private)] {
        let decision = match session.guard(access) {
            GuardDecision::Allow => "allow".to_string(),
            GuardDecision::Redirect(to) => format!("redirect to {}", to),
        };
        ctx.output.kv(label, &decision);
    }
    Ok(())
}
