// crates/portal-client/src/cli/admin.rs
// Admin reset/seed actions; destructive ones need --yes

use super::Context;
use super::browse::{drain_notifications, outcome_line};
use crate::api::ResetEndpoint;
use crate::api::admin::{self, AFTER_RESET_ROUTE};
use crate::controller::{MutationController, Reconcile};
use crate::notify::Notification;
use anyhow::{Result, bail};
use portal_types::ActionResult;
use std::fmt::Write;
use tracing::info;

pub fn endpoints(ctx: &Context) -> String {
    let flavor = ctx.settings.backend;
    let mut out = format!("Admin endpoints ({flavor} backend)\n");
    for endpoint in ResetEndpoint::offered_by(flavor) {
        let marker = if endpoint.is_destructive() { " (destructive)" } else { "" };
        let _ = writeln!(out, "  {}{}  {}", endpoint, marker, endpoint.confirm_prompt());
    }
    out
}

/// Destructive endpoints only run with `--yes`
pub async fn reset(ctx: &Context, name: &str, yes: bool) -> Result<String> {
    let endpoint: ResetEndpoint = name.parse()?;
    let flavor = ctx.settings.backend;
    if !ResetEndpoint::offered_by(flavor).contains(&endpoint) {
        bail!("{endpoint} is not served by the {flavor} backend (see `portal admin endpoints`)");
    }

    if endpoint.is_destructive() && !yes {
        return Ok(format!(
            "{}\nRun again with --yes to confirm {endpoint}.\n",
            endpoint.confirm_prompt()
        ));
    }

    info!(endpoint = %endpoint, "running admin action");
    let mut mutations = MutationController::new(ctx.portal.clone());
    let done = mutations
        .run_with(
            &admin::reset(endpoint),
            |_: &ActionResult| Reconcile::Navigate(AFTER_RESET_ROUTE.to_string()),
            None,
        )
        .await?;

    let message = if done.response.message.is_empty() {
        endpoint.success_message().to_string()
    } else {
        done.response.message.clone()
    };
    mutations
        .notifications_mut()
        .push(Notification::success(message));

    let mut out = drain_notifications(&mut mutations);
    let _ = writeln!(out, "{}", outcome_line(&done.outcome));
    Ok(out)
}
