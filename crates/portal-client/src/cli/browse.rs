// crates/portal-client/src/cli/browse.rs
// Language portal pages: lists, detail views, session launch and review

use super::Context;
use crate::api::{groups, study_activities, study_sessions, words};
use crate::controller::detail::{self, DetailController, DetailFallback};
use crate::controller::{
    ErrorPolicy, MutationController, PageSource, PaginatedListController, Reconcile,
};
use crate::notify::Notification;
use crate::view::{self, Column, ListFrame};
use anyhow::Result;
use portal_types::{ActionResult, LaunchResponse};

/// Load `page` from `source` and render it; fetch errors become the error banner
async fn render_page<T, S>(
    source: S,
    policy: ErrorPolicy,
    page: u32,
    frame: ListFrame<'_>,
    columns: &[Column<T>],
) -> String
where
    S: PageSource<T>,
{
    let mut list = PaginatedListController::new(source, policy);
    // The error is already recorded in the list state
    let _ = list.load(page).await;
    view::render_list(frame, &list.view(), columns)
}

pub async fn words_list(ctx: &Context, page: u32) -> Result<String> {
    let frame = ListFrame::new("Words", "words").with_hint(view::WORDS_EMPTY_HINT);
    Ok(render_page(
        words::pages(ctx.portal.clone()),
        ErrorPolicy::KeepItems,
        page,
        frame,
        &view::word_columns(),
    )
    .await)
}

pub async fn word_show(ctx: &Context, id: i64) -> Result<String> {
    let mut detail = DetailController::new(DetailFallback::NotFound);
    let state = detail.load(words::get(&ctx.portal, id)).await;
    Ok(view::render_detail(state, view::render_word))
}

pub async fn groups_list(ctx: &Context, page: u32) -> Result<String> {
    Ok(render_page(
        groups::pages(ctx.portal.clone()),
        ErrorPolicy::ClearItems,
        page,
        ListFrame::new("Word Groups", "groups"),
        &view::group_columns(),
    )
    .await)
}

pub async fn group_show(
    ctx: &Context,
    id: i64,
    words_page: u32,
    sessions_page: u32,
) -> Result<String> {
    let mut detail = DetailController::new(DetailFallback::NotFound);
    let state = detail
        .load(detail::group_overview(&ctx.portal, id, words_page, sessions_page))
        .await;
    Ok(view::render_detail(state, view::render_group))
}

pub async fn sessions_list(ctx: &Context, page: u32) -> Result<String> {
    Ok(render_page(
        study_sessions::pages(ctx.portal.clone()),
        ErrorPolicy::KeepItems,
        page,
        ListFrame::new("Study Sessions", "study sessions"),
        &view::session_columns(),
    )
    .await)
}

pub async fn session_show(ctx: &Context, id: i64, page: u32) -> Result<String> {
    let mut detail = DetailController::new(DetailFallback::NotFound);
    let state = detail
        .load(detail::session_overview(&ctx.portal, id, page))
        .await;
    Ok(view::render_detail(state, view::render_session))
}

pub async fn activities_list(ctx: &Context) -> Result<String> {
    let mut detail = DetailController::new(DetailFallback::ShowError);
    let state = detail.load(detail::activities_overview(&ctx.portal)).await;
    Ok(view::render_detail(state, view::render_activities))
}

pub async fn dashboard(ctx: &Context) -> Result<String> {
    let mut detail = DetailController::new(DetailFallback::ShowError);
    let state = detail.load(detail::dashboard(&ctx.portal)).await;
    Ok(view::render_detail(state, view::render_dashboard))
}

/// Start a session and report the route of the new session page
pub async fn activity_launch(ctx: &Context, activity: i64, group: i64) -> Result<String> {
    let mut mutations = MutationController::new(ctx.portal.clone());
    let done = mutations
        .run_with(
            &study_activities::launch(group, activity)?,
            |launched: &LaunchResponse| {
                Reconcile::Navigate(study_activities::session_route(launched))
            },
            None,
        )
        .await?;
    Ok(format!(
        "Started study session {}\n{}\n",
        done.response.id,
        outcome_line(&done.outcome)
    ))
}

pub async fn session_review(
    ctx: &Context,
    session: i64,
    word: i64,
    correct: bool,
) -> Result<String> {
    let mut mutations = MutationController::new(ctx.portal.clone());
    let mutation = study_sessions::review(session, word, correct)?;
    let verdict = if correct { "correct" } else { "wrong" };
    mutations
        .run::<ActionResult>(
            &mutation,
            Reconcile::Notify(Notification::success(format!(
                "Recorded word {word} as {verdict}"
            ))),
            None,
        )
        .await?;
    Ok(drain_notifications(&mut mutations))
}

pub(super) fn outcome_line(outcome: &crate::controller::MutationOutcome) -> String {
    use crate::controller::MutationOutcome;
    match outcome {
        MutationOutcome::Navigate(route) => format!("-> {route}"),
        MutationOutcome::Notified(_) => String::new(),
        MutationOutcome::Removed(true) => "Removed from list".to_string(),
        MutationOutcome::Removed(false) | MutationOutcome::Done => String::new(),
    }
}

pub(super) fn drain_notifications(mutations: &mut MutationController) -> String {
    mutations
        .notifications_mut()
        .drain()
        .iter()
        .map(|n| format!("{}\n", view::render_notification(n)))
        .collect()
}
