use std::sync::Arc;

use lib::SharedState;
use poem_ext::{response, responses::internal_server_error};
use poem_openapi::{param::Path, payload::Json, OpenApi};
use schemas::quiz::responses::{ScoredResponse, SubmitRequest, Submitted};
use uuid::Uuid;

use super::Tags;
use crate::services::submission::SubmissionService;

pub struct Responses {
    pub state: Arc<SharedState>,
    pub submission: SubmissionService,
}

#[OpenApi(tag = "Tags::Responses")]
impl Responses {
    /// Submit a completed quiz.
    #[oai(path = "/responses", method = "post")]
    async fn submit_response(&self, data: Json<SubmitRequest>) -> SubmitResponse::Response {
        let Json(data) = data;
        let id = self
            .submission
            .submit(data.name, data.answers, data.timestamp)
            .await
            .map_err(internal_server_error)?;
        SubmitResponse::ok(Submitted { id })
    }

    /// List all responses, most recent first.
    #[oai(path = "/responses", method = "get")]
    async fn list_responses(&self) -> ListResponses::Response {
        ListResponses::ok(
            self.state
                .storage
                .get_all()
                .await
                .map_err(internal_server_error)?
                .into_iter()
                .map(|record| ScoredResponse::from(record, &self.state.questions))
                .collect(),
        )
    }

    /// Get a single response by id.
    #[oai(path = "/responses/:response_id", method = "get")]
    async fn get_response(&self, response_id: Path<Uuid>) -> GetResponse::Response {
        match self
            .state
            .storage
            .get(response_id.0)
            .await
            .map_err(internal_server_error)?
        {
            Some(record) => GetResponse::ok(ScoredResponse::from(record, &self.state.questions)),
            None => GetResponse::response_not_found(),
        }
    }
}

response!(SubmitResponse = {
    /// Response has been stored successfully
    Ok(201) => Submitted,
});

response!(ListResponses = {
    Ok(200) => Vec<ScoredResponse>,
});

response!(GetResponse = {
    Ok(200) => ScoredResponse,
    /// Response does not exist.
    ResponseNotFound(404, error),
});
