use std::sync::Arc;

use lib::SharedState;
use poem_openapi::OpenApi;

use self::{admin::Admin, questions::Questions, responses::Responses};
use crate::services::submission::SubmissionService;

mod admin;
mod questions;
mod responses;

#[derive(poem_openapi::Tags)]
pub enum Tags {
    /// Endpoints for the quiz question bank
    Questions,
    /// Endpoints for submitting and reviewing quiz responses
    Responses,
    /// Endpoints for operators
    Admin,
}

pub fn get_api(state: Arc<SharedState>) -> impl OpenApi {
    let submission = SubmissionService::new(state.storage.clone());
    (
        Questions {
            state: state.clone(),
        },
        Responses {
            state: state.clone(),
            submission,
        },
        Admin { state },
    )
}
