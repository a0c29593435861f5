//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see the
//! driving ports, so they stay testable with mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{GiftExchangeCommand, UserDirectoryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub gift_exchanges: Arc<dyn GiftExchangeCommand>,
    pub directory: Arc<dyn UserDirectoryQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use gift_exchange_backend::domain::GiftExchangeService;
    /// use gift_exchange_backend::inbound::http::state::HttpState;
    /// use gift_exchange_backend::outbound::memory::InMemoryUserDocumentStore;
    ///
    /// let service = Arc::new(GiftExchangeService::new(Arc::new(
    ///     InMemoryUserDocumentStore::new(),
    /// )));
    /// let state = HttpState::new(service.clone(), service);
    /// ```
    pub fn new(
        gift_exchanges: Arc<dyn GiftExchangeCommand>,
        directory: Arc<dyn UserDirectoryQuery>,
    ) -> Self {
        Self {
            gift_exchanges,
            directory,
        }
    }
}
