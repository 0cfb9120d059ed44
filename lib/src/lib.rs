#![forbid(unsafe_code)]
#![warn(clippy::dbg_macro, clippy::use_debug, clippy::todo)]

use std::sync::Arc;

use crate::{questions::QuestionBank, storage::Storage};

pub mod config;
pub mod questions;
pub mod storage;

#[derive(Debug, Clone)]
pub struct SharedState {
    pub storage: Storage,
    pub questions: Arc<QuestionBank>,
}
