use std::sync::Arc;

use lib::{questions::Question, SharedState};
use poem_ext::response;
use poem_openapi::OpenApi;

use super::Tags;

pub struct Questions {
    pub state: Arc<SharedState>,
}

#[OpenApi(tag = "Tags::Questions")]
impl Questions {
    /// List all questions of the quiz in presentation order.
    #[oai(path = "/questions", method = "get")]
    async fn list_questions(&self) -> ListQuestions::Response {
        ListQuestions::ok(self.state.questions.questions().to_vec())
    }
}

response!(ListQuestions = {
    Ok(200) => Vec<Question>,
});
