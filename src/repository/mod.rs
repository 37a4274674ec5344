//! Repository Layer
//!
//! GraphQL data access for the shop and admin endpoints.

mod traits;
mod http;
mod documents;
mod link_repo;
mod order_repo;
mod memory_repo;


pub use traits::{LinkRepository, OrderRepository, Transport};
pub use http::GraphqlClient;
pub use link_repo::GraphqlLinkRepository;
pub use order_repo::GraphqlOrderRepository;
pub use memory_repo::{FailPoint, InMemoryLinkRepository};
