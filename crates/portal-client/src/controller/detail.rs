// crates/portal-client/src/controller/detail.rs
// Detail controller: fixed fan-out of GETs merged once all resolve

use crate::api::{dashboard, groups, haiku, study_activities, study_sessions};
use crate::client::ResourceClient;
use crate::error::Result;
use portal_types::{
    Chat, GroupDetail, Haiku, Page, QuickStats, StudyActivity, StudyProgress, StudySession, Word,
};
use std::future::Future;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    Loaded(T),
    NotFound,
    Failed(String),
}

impl<T> DetailState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            DetailState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// What a detail page shows when any leg of its fan-out fails.
///
/// The pages disagree: some fall back to "not found", some never leave
/// the loading state, some show the error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailFallback {
    #[default]
    NotFound,
    KeepLoading,
    ShowError,
}

pub struct DetailController<T> {
    state: DetailState<T>,
    fallback: DetailFallback,
    last_error: Option<String>,
}

impl<T> DetailController<T> {
    pub fn new(fallback: DetailFallback) -> Self {
        Self {
            state: DetailState::Loading,
            fallback,
            last_error: None,
        }
    }

    /// Await a fan-out and record the outcome.
    ///
    /// `Ok(None)` means the primary record came back as `null`.
    pub async fn load<F>(&mut self, fetch: F) -> &DetailState<T>
    where
        F: Future<Output = Result<Option<T>>>,
    {
        self.state = DetailState::Loading;
        self.last_error = None;

        self.state = match fetch.await {
            Ok(Some(value)) => DetailState::Loaded(value),
            Ok(None) => {
                debug!("detail record missing");
                DetailState::NotFound
            }
            Err(e) => {
                error!(error = %e, "failed to load detail");
                let message = e.to_user_string();
                self.last_error = Some(message.clone());
                match self.fallback {
                    DetailFallback::NotFound => DetailState::NotFound,
                    DetailFallback::KeepLoading => DetailState::Loading,
                    DetailFallback::ShowError => DetailState::Failed(message),
                }
            }
        };
        &self.state
    }

    pub fn state(&self) -> &DetailState<T> {
        &self.state
    }

    /// Mutable access for local reconciliation (e.g. appending chat turns)
    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            DetailState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Error of the last failed load, even when the fallback hides it
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn fallback(&self) -> DetailFallback {
        self.fallback
    }
}

// ═══════════════════════════════════════
// FAN-OUTS
// ═══════════════════════════════════════

/// Group header plus one page each of its words and study sessions
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOverview {
    pub group: GroupDetail,
    pub words: Page<Word>,
    pub sessions: Page<StudySession>,
}

pub async fn group_overview(
    client: &ResourceClient,
    group_id: i64,
    words_page: u32,
    sessions_page: u32,
) -> Result<Option<GroupOverview>> {
    let (group, words, sessions) = tokio::try_join!(
        groups::get(client, group_id),
        groups::words(client, group_id, words_page),
        groups::study_sessions(client, group_id, sessions_page),
    )?;
    Ok(group.map(|group| GroupOverview {
        group,
        words,
        sessions,
    }))
}

/// Study session header plus one page of reviewed words
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOverview {
    pub session: StudySession,
    pub words: Page<Word>,
}

pub async fn session_overview(
    client: &ResourceClient,
    session_id: i64,
    words_page: u32,
) -> Result<Option<SessionOverview>> {
    let (session, words) = tokio::try_join!(
        study_sessions::get(client, session_id),
        study_sessions::words(client, session_id, words_page),
    )?;
    Ok(session.map(|session| SessionOverview { session, words }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: QuickStats,
    pub progress: StudyProgress,
    pub last_session: Option<StudySession>,
}

/// Dashboard cards. Never `NotFound`: an absent last session is a valid state.
pub async fn dashboard(client: &ResourceClient) -> Result<Option<Dashboard>> {
    let (stats, progress, last_session) = tokio::try_join!(
        dashboard::quick_stats(client),
        dashboard::study_progress(client),
        dashboard::last_study_session(client),
    )?;
    Ok(Some(Dashboard {
        stats,
        progress,
        last_session,
    }))
}

/// Launchable activities next to the most recent sessions
#[derive(Debug, Clone, PartialEq)]
pub struct ActivitiesOverview {
    pub activities: Vec<StudyActivity>,
    pub recent_sessions: Vec<StudySession>,
}

/// How many recent sessions the activities page shows
pub const RECENT_SESSIONS: u32 = 5;

pub async fn activities_overview(client: &ResourceClient) -> Result<Option<ActivitiesOverview>> {
    let (activities, recent) = tokio::try_join!(
        study_activities::list(client),
        study_sessions::recent(client, RECENT_SESSIONS),
    )?;
    Ok(Some(ActivitiesOverview {
        activities,
        recent_sessions: recent.items,
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct HaikuOverview {
    pub haiku: Haiku,
    pub chats: Vec<Chat>,
}

/// Haiku record and its chat transcript, fetched from the haiku service.
///
/// Deployments that embed `chats` in the record reply serve no history route,
/// so the second request is only made when the transcript is missing.
pub async fn haiku_overview(
    client: &ResourceClient,
    haiku_id: &str,
) -> Result<Option<HaikuOverview>> {
    let reply = haiku::get(client, haiku_id).await?;
    let Some(haiku) = reply.haiku else {
        return Ok(None);
    };
    let chats = match reply.chats {
        Some(chats) => chats,
        None => haiku::history(client, haiku_id).await?,
    };
    Ok(Some(HaikuOverview { haiku, chats }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;

    #[tokio::test]
    async fn test_loaded() {
        let mut detail = DetailController::new(DetailFallback::NotFound);
        let state = detail.load(async { Ok(Some(42)) }).await;
        assert_eq!(state, &DetailState::Loaded(42));
        assert_eq!(detail.state().loaded(), Some(&42));
    }

    #[tokio::test]
    async fn test_null_record_is_not_found() {
        let mut detail: DetailController<i32> = DetailController::new(DetailFallback::ShowError);
        detail.load(async { Ok(None) }).await;
        assert_eq!(detail.state(), &DetailState::NotFound);
        assert!(detail.last_error().is_none());
    }

    #[tokio::test]
    async fn test_failure_fallbacks() {
        let cases = [
            (DetailFallback::NotFound, DetailState::NotFound),
            (DetailFallback::KeepLoading, DetailState::Loading),
            (
                DetailFallback::ShowError,
                DetailState::Failed("HTTP error! status: 500".to_string()),
            ),
        ];
        for (fallback, expected) in cases {
            let mut detail: DetailController<i32> = DetailController::new(fallback);
            detail
                .load(async { Err(PortalError::Status { status: 500 }) })
                .await;
            assert_eq!(detail.state(), &expected, "fallback {:?}", fallback);
            assert_eq!(detail.last_error(), Some("HTTP error! status: 500"));
        }
    }

    #[tokio::test]
    async fn test_reload_clears_previous_error() {
        let mut detail = DetailController::new(DetailFallback::NotFound);
        detail
            .load(async { Err(PortalError::Status { status: 502 }) })
            .await;
        detail.load(async { Ok(Some("ok")) }).await;
        assert!(detail.last_error().is_none());
        assert_eq!(detail.loaded_mut().map(|v| *v), Some("ok"));
    }
}
