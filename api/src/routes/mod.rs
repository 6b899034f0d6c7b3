pub mod chat;
pub mod docs_route;
pub mod health_route;
pub mod models_route;
pub mod template;
