// crates/portal-client/src/api/study_sessions.rs

use crate::client::{ResourceClient, paged};
use crate::controller::{Mutation, PathPages};
use crate::error::Result;
use portal_types::{Page, ReviewRequest, StudySession, Word};

pub const PATH: &str = "/study_sessions";

pub async fn list(client: &ResourceClient, page: u32) -> Result<Page<StudySession>> {
    client.get(&paged(PATH, page)).await
}

/// First page of the most recent sessions, capped at `limit`
pub async fn recent(client: &ResourceClient, limit: u32) -> Result<Page<StudySession>> {
    client.get(&format!("{PATH}?limit={limit}")).await
}

pub async fn get(client: &ResourceClient, id: i64) -> Result<Option<StudySession>> {
    client.get(&format!("{PATH}/{id}")).await
}

pub async fn words(client: &ResourceClient, id: i64, page: u32) -> Result<Page<Word>> {
    client.get(&paged(&format!("{PATH}/{id}/words"), page)).await
}

pub fn review_path(session_id: i64, word_id: i64) -> String {
    format!("{PATH}/{session_id}/words/{word_id}/review")
}

/// Record one answer for a word reviewed in a session
pub fn review(session_id: i64, word_id: i64, correct: bool) -> Result<Mutation> {
    Mutation::post_json(review_path(session_id, word_id), &ReviewRequest { correct })
}

pub fn pages(client: ResourceClient) -> PathPages {
    PathPages::new(client, PATH)
}
