/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public deeds tenant adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod registry;
pub mod types;
pub mod wallet;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    GENERIC_ERROR_KEY,
    RemoteBody,
    RemoteResponse,
    Result,
    TenantClient,
    TenantError,
};

pub use registry::ServiceRegistry;

// Re-export all types
pub use types::*;

// Re-export commonly used types from wallet
pub use wallet::{
    ConnectorOutcome,
    HandshakeController,
    HandshakeOutcome,
    HubConnector,
    LocalWalletProvider,
    MockWalletProvider,
    ProviderError,
    SignedToken,
    WalletProvider,
};
