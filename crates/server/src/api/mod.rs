pub mod agent;
pub mod audit;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod trending;

pub use routes::create_router;
