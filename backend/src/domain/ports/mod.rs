//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod gift_exchange_command;
mod user_directory_query;
mod user_document_store;

#[cfg(test)]
pub use gift_exchange_command::MockGiftExchangeCommand;
pub use gift_exchange_command::{
    AddDrawingRequest, AddGiftExchangeRequest, AddParticipantRequest, CreateUserRequest,
    DeleteUserRequest, DrawingLocator, ExchangeLocator, GiftExchangeCommand, NewParticipantInput,
    ParticipantLocator, ParticipantUpdates, RenameGiftExchangeRequest, RestrictionRequest,
    UpdateParticipantRequest,
};
#[cfg(test)]
pub use user_directory_query::MockUserDirectoryQuery;
pub use user_directory_query::UserDirectoryQuery;
#[cfg(test)]
pub use user_document_store::MockUserDocumentStore;
pub use user_document_store::{
    NestedSelector, TargetedUpdate, UpdateCounts, UserDocumentStore, UserDocumentStoreError,
    UserFilter, apply_targeted_update,
};
