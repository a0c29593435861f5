//! Builders wiring the document store into the HTTP state.

use std::sync::Arc;

use gift_exchange_backend::domain::GiftExchangeService;
use gift_exchange_backend::domain::ports::UserDocumentStore;
use gift_exchange_backend::inbound::http::state::HttpState;

use super::config::DocumentStore;

/// One service instance serves both the command and the query port.
fn service_state<S>(store: Arc<S>) -> HttpState
where
    S: UserDocumentStore + 'static,
{
    let service = Arc::new(GiftExchangeService::new(store));
    HttpState::new(service.clone(), service)
}

/// Build handler state for whichever store was selected at startup.
pub fn build_http_state(store: &DocumentStore) -> HttpState {
    match store {
        DocumentStore::InMemory(store) => service_state(Arc::clone(store)),
        DocumentStore::Postgres { store, .. } => service_state(Arc::clone(store)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_exchange_backend::domain::ports::CreateUserRequest;
    use gift_exchange_backend::outbound::memory::InMemoryUserDocumentStore;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn command_and_query_ports_share_one_store() {
        let store = DocumentStore::InMemory(Arc::new(InMemoryUserDocumentStore::new()));
        let state = build_http_state(&store);

        state
            .gift_exchanges
            .create_user(CreateUserRequest {
                email: Some("a@example.com".to_owned()),
            })
            .await
            .expect("user created");

        assert!(
            state
                .directory
                .user_exists("a@example.com")
                .await
                .expect("lookup succeeds")
        );
    }
}
