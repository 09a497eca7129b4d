use std::sync::Arc;

use crate::repositories::CatRepositoryStorage;

/// Shared handles injected into every request handler. The store handle is
/// opened once at startup and shared for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub cat_repository: Arc<CatRepositoryStorage>,
}

impl AppState {
    pub fn cat_repository(&self) -> Arc<CatRepositoryStorage> {
        self.cat_repository.clone()
    }
}
