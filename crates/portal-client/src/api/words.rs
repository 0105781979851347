// crates/portal-client/src/api/words.rs

use crate::client::{ResourceClient, paged};
use crate::controller::PathPages;
use crate::error::Result;
use portal_types::{Page, Word, WordDetail};

pub const PATH: &str = "/words";

pub async fn list(client: &ResourceClient, page: u32) -> Result<Page<Word>> {
    client.get(&paged(PATH, page)).await
}

/// `None` when the backend answers `null` for an unknown id
pub async fn get(client: &ResourceClient, id: i64) -> Result<Option<WordDetail>> {
    client.get(&format!("{PATH}/{id}")).await
}

pub fn pages(client: ResourceClient) -> PathPages {
    PathPages::new(client, PATH)
}
