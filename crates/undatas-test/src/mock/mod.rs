//! Mock transport for testing.

mod transport;

pub use transport::MockTransport;
use undatas_client::{UdClient, UdConfig, UdCredentials};

/// Creates a client with default configuration wired to `transport`.
///
/// Panics if the client cannot be created; intended for tests only.
pub fn create_mock_client(transport: &MockTransport) -> UdClient {
    let credentials = UdCredentials::new("test-token").expect("valid test token");
    UdClient::with_transport(UdConfig::default(), credentials, transport.clone())
        .expect("mock client")
}
