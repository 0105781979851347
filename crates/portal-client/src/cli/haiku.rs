// crates/portal-client/src/cli/haiku.rs
// Haiku service commands

use super::Context;
use super::browse::drain_notifications;
use crate::api::{HaikuPages, haiku};
use crate::controller::detail::{self, DetailController, DetailFallback};
use crate::controller::{
    ErrorPolicy, MutationController, MutationOutcome, PaginatedListController, Reconcile,
};
use crate::notify::Notification;
use crate::view;
use anyhow::Result;
use portal_types::{DeleteHaikuResponse, GenerateMediaResponse, SendMessageResponse};
use std::fmt::Write;

pub async fn list(ctx: &Context) -> Result<String> {
    let mut haikus =
        PaginatedListController::new(HaikuPages::new(ctx.haiku.clone()), ErrorPolicy::KeepItems);
    let _ = haikus.load(1).await;
    Ok(view::render_haiku_list(&haikus.view()))
}

pub async fn show(ctx: &Context, id: &str) -> Result<String> {
    let mut detail = DetailController::new(DetailFallback::ShowError);
    let state = detail.load(detail::haiku_overview(&ctx.haiku, id)).await;
    Ok(view::render_detail(state, view::render_haiku))
}

/// New haikus only exist server-side after the first chat message
pub fn new() -> String {
    let id = haiku::new_id();
    format!("{id}\nStart it with: portal haiku chat {id} \"<message>\"\n")
}

pub async fn chat(ctx: &Context, id: &str, message: &str) -> Result<String> {
    let mut mutations = MutationController::new(ctx.haiku.clone());
    let done = mutations
        .run::<SendMessageResponse>(&haiku::send_message(id, message)?, Reconcile::Nothing, None)
        .await?;

    let reply = done.response;
    let mut out = format!("{}: {}\n", reply.chat.role, reply.chat.message);
    if let Some(lines) = reply.haiku.english_lines() {
        out.push('\n');
        for line in lines {
            let _ = writeln!(out, "  {line}");
        }
    }
    let _ = writeln!(out, "{}", view::status_badge(&reply.haiku.status()));
    Ok(out)
}

pub async fn media(ctx: &Context, id: &str) -> Result<String> {
    let mut mutations = MutationController::new(ctx.haiku.clone());
    let done = mutations
        .run::<GenerateMediaResponse>(
            &haiku::generate_media(id),
            Reconcile::Navigate(haiku::haiku_path(id)),
            None,
        )
        .await?;
    let links = done.response.haiku.audio_links().count();
    let mut out = format!(
        "Media generation {} for {id} ({links} audio links)\n",
        view::status_badge(&done.response.haiku.status())
    );
    if let MutationOutcome::Navigate(route) = done.outcome {
        let _ = writeln!(out, "-> {route}");
    }
    Ok(out)
}

/// Delete and drop the haiku from the list view without refetching it
pub async fn delete(ctx: &Context, id: &str) -> Result<String> {
    let mut haikus =
        PaginatedListController::new(HaikuPages::new(ctx.haiku.clone()), ErrorPolicy::KeepItems);
    let _ = haikus.load(1).await;

    let mut mutations = MutationController::new(ctx.haiku.clone());
    let done = mutations
        .run::<DeleteHaikuResponse>(
            &haiku::delete(id),
            Reconcile::RemoveFromList,
            Some(&mut haikus),
        )
        .await?;

    let text = match done.response.text() {
        "" => format!("Deleted haiku {id}"),
        text => text.to_string(),
    };
    mutations
        .notifications_mut()
        .push(Notification::success(text));

    let mut out = drain_notifications(&mut mutations);
    out.push('\n');
    out.push_str(&view::render_haiku_list(&haikus.view()));
    Ok(out)
}
