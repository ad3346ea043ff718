use crate::di::DependenciesInject;
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(pool: ConnectionPool) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(pool, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
        }
    }
}
