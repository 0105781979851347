// crates/portal-client/src/api/haiku.rs
// Haiku service bindings (separate base URL from the portal API)

use crate::client::ResourceClient;
use crate::controller::{Mutation, PageSource};
use crate::error::Result;
use async_trait::async_trait;
use portal_types::{
    Chat, ChatHistory, Haiku, HaikuList, HaikuReply, Identified, Page, SendMessageRequest,
};

pub const PATH: &str = "/haiku";

pub async fn list(client: &ResourceClient) -> Result<Vec<Haiku>> {
    let reply: HaikuList = client.get(PATH).await?;
    Ok(reply.haikus)
}

/// Haiku record plus the transcript when the deployment embeds it.
///
/// `haiku` is `None` when the service answers `null` or an empty record.
pub async fn get(client: &ResourceClient, id: &str) -> Result<HaikuReply> {
    let mut reply: HaikuReply = client.get(&haiku_path(id)).await?;
    reply.haiku = reply.haiku.filter(|h| h.identifier().is_some());
    Ok(reply)
}

pub async fn history(client: &ResourceClient, id: &str) -> Result<Vec<Chat>> {
    let reply: ChatHistory = client.get(&format!("/chat/{id}/history")).await?;
    Ok(reply.messages)
}

/// One chat turn; the reply carries the assistant message and the updated haiku
pub fn send_message(id: &str, message: &str) -> Result<Mutation> {
    let body = SendMessageRequest {
        message: message.to_string(),
    };
    Mutation::post_json(format!("/chat/{id}"), &body)
}

/// Kick off image and audio generation for a finished haiku
pub fn generate_media(id: &str) -> Mutation {
    Mutation::post(haiku_path(id), None)
}

/// Targets `id`, so a successful delete can drop it from a loaded list
pub fn delete(id: &str) -> Mutation {
    Mutation::delete(haiku_path(id)).with_target(id)
}

pub fn haiku_path(id: &str) -> String {
    format!("{PATH}/{id}")
}

/// Id for a haiku that does not exist yet; the service creates it on the first chat turn
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// The haiku list is not paginated, so it is served as a single page
#[derive(Debug, Clone)]
pub struct HaikuPages {
    client: ResourceClient,
}

impl HaikuPages {
    pub fn new(client: ResourceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource<Haiku> for HaikuPages {
    async fn fetch_page(&self, _page: u32) -> Result<Page<Haiku>> {
        Ok(Page::whole(list(&self.client).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_ne!(id, new_id());
    }

    #[test]
    fn test_haiku_path() {
        assert_eq!(haiku_path("abc"), "/haiku/abc");
    }

    #[test]
    fn test_mutations_target_haiku_routes() {
        let chat = send_message("abc", "autumn").unwrap();
        assert_eq!(chat.path, "/chat/abc");
        assert_eq!(chat.payload, Some(serde_json::json!({"message": "autumn"})));

        assert_eq!(generate_media("abc").path, "/haiku/abc");
        assert!(generate_media("abc").payload.is_none());

        let removal = delete("abc");
        assert_eq!(removal.target_id.as_deref(), Some("abc"));
    }
}
