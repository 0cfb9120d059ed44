use std::sync::Arc;

use lib::SharedState;
use poem_ext::{response, responses::internal_server_error};
use poem_openapi::OpenApi;
use schemas::quiz::responses::ClearedResponses;

use super::Tags;

pub struct Admin {
    pub state: Arc<SharedState>,
}

#[OpenApi(tag = "Tags::Admin")]
impl Admin {
    /// Delete all stored responses. Irreversible; intended for operator use
    /// between quiz sessions.
    #[oai(path = "/responses", method = "delete")]
    async fn clear_responses(&self) -> ClearResponses::Response {
        let deleted = self
            .state
            .storage
            .clear()
            .await
            .map_err(internal_server_error)?;
        ClearResponses::ok(ClearedResponses {
            deleted,
            message: format!("cleared {deleted} submissions"),
        })
    }
}

response!(ClearResponses = {
    Ok(200) => ClearedResponses,
});
