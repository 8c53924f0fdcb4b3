//! Transport-level failure handling for the gRPC connector.
//!
//! These tests exercise the real tonic client against targets that are
//! guaranteed to be unreachable, verifying that failures surface as
//! `ConnectivityError` instead of panics.

use meshprobe_controller_client::{ControllerConnector, GrpcConnector};

#[tokio::test]
async fn refused_connection_surfaces_as_connectivity_error() {
    // Bind a listener and drop it so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("should bind ephemeral port");
    let addr = listener.local_addr().expect("should read local addr");
    drop(listener);

    let connector = GrpcConnector::new(addr.to_string());
    let err = connector
        .connect()
        .await
        .err()
        .expect("connecting to a closed port should fail");

    assert_eq!(err.target, addr.to_string());
    assert!(!err.reason.is_empty());
}

#[tokio::test]
async fn malformed_target_surfaces_as_connectivity_error() {
    let connector = GrpcConnector::new("not a host:port");
    let result = connector.connect().await;
    assert!(result.is_err());
}
