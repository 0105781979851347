// crates/portal-client/src/api/study_activities.rs

use crate::client::ResourceClient;
use crate::controller::Mutation;
use crate::error::Result;
use portal_types::{LaunchRequest, LaunchResponse, StudyActivity};

pub const PATH: &str = "/study_activities";

/// Not paginated: the backend returns a bare array
pub async fn list(client: &ResourceClient) -> Result<Vec<StudyActivity>> {
    client.get(PATH).await
}

pub fn launch_request(group_id: i64, activity_id: i64) -> LaunchRequest {
    LaunchRequest {
        group_id,
        study_activity_id: activity_id,
    }
}

/// Start a study session; the reply carries the new session id
pub fn launch(group_id: i64, activity_id: i64) -> Result<Mutation> {
    Mutation::post_json(PATH, &launch_request(group_id, activity_id))
}

/// Route shown after a successful launch
pub fn session_route(launched: &LaunchResponse) -> String {
    format!("/study_sessions/{}", launched.id)
}
