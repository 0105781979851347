// crates/portal-client/src/api/groups.rs

use crate::client::{ResourceClient, paged};
use crate::controller::PathPages;
use crate::error::Result;
use portal_types::{Group, GroupDetail, Page, StudySession, Word};

pub const PATH: &str = "/groups";

pub async fn list(client: &ResourceClient, page: u32) -> Result<Page<Group>> {
    client.get(&paged(PATH, page)).await
}

pub async fn get(client: &ResourceClient, id: i64) -> Result<Option<GroupDetail>> {
    client.get(&format!("{PATH}/{id}")).await
}

pub async fn words(client: &ResourceClient, id: i64, page: u32) -> Result<Page<Word>> {
    client.get(&paged(&format!("{PATH}/{id}/words"), page)).await
}

pub async fn study_sessions(
    client: &ResourceClient,
    id: i64,
    page: u32,
) -> Result<Page<StudySession>> {
    client
        .get(&paged(&format!("{PATH}/{id}/study_sessions"), page))
        .await
}

pub fn pages(client: ResourceClient) -> PathPages {
    PathPages::new(client, PATH)
}
