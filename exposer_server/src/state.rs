use std::sync::Arc;

use exposer_core::PostRepository;

#[derive(Clone)]
pub struct AppState {
    /// The upstream behind every route. Handlers only see the trait.
    pub repository: Arc<dyn PostRepository>,
}
