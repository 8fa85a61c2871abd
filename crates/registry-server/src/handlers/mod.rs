//! HTTP request handlers
//!
//! Handlers are stateless: everything they need comes from [`AppState`],
//! which is cheap to clone per request.

pub mod student;

use std::sync::Arc;

use registry_core::{StudentStore, Validator};

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
    pub validator: Validator,
}

impl AppState {
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            validator: Validator::new(),
        }
    }
}
