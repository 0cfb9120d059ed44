use lib::questions::Question;
use schemas::quiz::responses::{
    ClearedResponses, GetResponseError, ScoredResponse, SubmitRequest, Submitted,
};

use super::client;

client!(Quiz {
    /// List all questions of the quiz in presentation order.
    pub list_questions(): get "questions" => Vec<Question>;
    /// Submit a completed quiz.
    pub submit_response(json: SubmitRequest): post "responses" => Submitted;
    /// List all responses, most recent first.
    pub list_responses(): get "responses" => Vec<ScoredResponse>;
    /// Get a single response by id.
    pub get_response(path: response_id): get "responses/{response_id}" => ScoredResponse, GetResponseError;
    /// Delete all stored responses.
    pub clear_responses(): delete "responses" => ClearedResponses;
});
