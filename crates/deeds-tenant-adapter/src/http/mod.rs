/*
[INPUT]:  HTTP client configuration and REST endpoints
[OUTPUT]: Classified HTTP outcomes and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod hub;
pub mod report;
pub mod response;
pub mod tenant;
pub mod wom;

pub use error::{Result, TenantError};
pub use response::{GENERIC_ERROR_KEY, RemoteBody, RemoteResponse, error_key};

pub use client::{ClientConfig, TenantClient};
