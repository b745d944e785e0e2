/*
[INPUT]:  Wallet providers and caller-supplied challenges
[OUTPUT]: Signed-message tokens, wallet errors, signed hub connections
[POS]:    Wallet layer - handles the wallet authentication handshake
[UPDATE]: When the handshake flow or supported wallet types change
*/

pub mod connector;
pub mod handshake;
pub mod local;
pub mod provider;
pub mod token;

pub use connector::{ConnectorOutcome, HubConnector};
pub use handshake::{HandshakeController, HandshakeOutcome, HandshakeState, NegotiationOutcome};
pub use local::LocalWalletProvider;
pub use provider::{MockWalletProvider, ProviderError, RpcRequest, WalletProvider};
pub use token::{SIGNED_MESSAGE_PREFIX, SignedToken};
