//! Storefront Core
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: GraphQL data access for the shop and admin endpoints
//! - editor, sync: Collection link editing and saving
//! - orders, cart, tree: View-models for the account page, cart and sidebar

pub mod domain;
pub mod repository;
pub mod editor;
pub mod sync;
pub mod orders;
pub mod cart;
pub mod tree;
pub mod config;

pub use config::Config;
pub use editor::LinkEditor;
pub use sync::{LinkSynchronizer, SaveError, SaveReport, SaveStatus};

use domain::DomainResult;
use orders::{summarize, OrderOverview};
use repository::{GraphqlClient, GraphqlLinkRepository, GraphqlOrderRepository, OrderRepository};
use rolling_logger::{LogBuffer, LoggerError};

/// Install the tracing subscriber described by `config`
pub fn init_logging(config: &Config) -> Result<LogBuffer, LoggerError> {
    rolling_logger::init(&config.log_filter, config.log_capacity)
}

/// Repositories for both endpoints, sharing one HTTP connection pool
pub struct Backend {
    pub links: GraphqlLinkRepository<GraphqlClient>,
    pub orders: GraphqlOrderRepository<GraphqlClient>,
}

impl Backend {
    pub fn connect(config: &Config) -> Self {
        let http = reqwest::Client::new();
        let language = config.default_language.clone();

        Self {
            links: GraphqlLinkRepository::new(
                GraphqlClient::with_client(http.clone(), config.admin_api_url.clone()),
                language.clone(),
            ),
            orders: GraphqlOrderRepository::new(
                GraphqlClient::with_client(http, config.shop_api_url.clone()),
                language,
            ),
        }
    }

    /// Link synchronizer over the admin endpoint, using the configured reset delay
    pub fn link_synchronizer(&self, config: &Config) -> LinkSynchronizer<GraphqlLinkRepository<GraphqlClient>> {
        LinkSynchronizer::new(self.links.clone()).with_reset_delay(config.status_reset())
    }

    /// Fetch the newest `order_preview_take` orders of the signed-in customer
    pub async fn order_overview(&self, config: &Config) -> DomainResult<OrderOverview> {
        let take = config.order_preview_take;
        let page = self.orders.customer_orders(0, take).await?;
        Ok(summarize(Some(&page), take))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_order_overview_uses_configured_take() {
        let mut server = Server::new_async().await;
        let config = Config {
            shop_api_url: format!("{}/shop-api", server.url()),
            order_preview_take: 2,
            ..Config::default()
        };

        let mock = server
            .mock("POST", "/shop-api")
            .match_query(Matcher::UrlEncoded("languageCode".into(), "de".into()))
            .match_body(Matcher::PartialJson(json!({ "variables": { "skip": 0, "take": 2 } })))
            .with_status(200)
            .with_body(
                json!({
                    "data": {
                        "activeCustomer": {
                            "orders": {
                                "items": [
                                    { "id": "a", "updatedAt": "2024-01-01T00:00:00Z" },
                                    { "id": "b", "updatedAt": "2024-02-01T00:00:00Z" }
                                ],
                                "totalItems": 9
                            }
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let backend = Backend::connect(&config);
        let overview = backend.order_overview(&config).await.expect("Overview failed");
        mock.assert_async().await;

        match overview {
            OrderOverview::Orders(orders) => {
                let ids: Vec<&str> = orders.iter().map(|o| o.id.as_str()).collect();
                assert_eq!(ids, vec!["b", "a"]);
            }
            other => panic!("expected orders, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_survives_link_synchronizer() {
        let config = Config {
            status_reset_ms: 50,
            ..Config::default()
        };
        let backend = Backend::connect(&config);

        let sync = backend.link_synchronizer(&config);
        assert_eq!(sync.status().current(), SaveStatus::Idle);
        // orders stay reachable after building the synchronizer
        let _orders = &backend.orders;
        let _second = backend.link_synchronizer(&config);
    }
}
