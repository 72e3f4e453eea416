//! Shared helpers for the router suite.

#![allow(dead_code)]

use std::sync::Once;

use contractapi::{Response, Router};
use contractapi_storage::MemoryState;
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Route router logs to the test writer; filtered by `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A deployed chaincode: one router over one world state.
pub struct TestChaincode {
    pub router: Router,
    pub state: MemoryState,
}

impl TestChaincode {
    pub fn new(router: Router) -> Self {
        init_tracing();
        Self {
            router,
            state: MemoryState::new(),
        }
    }

    /// Invoke with raw arguments
    pub fn invoke(&self, args: &[&str]) -> Response {
        let (function, rest) = args.split_first().expect("function name required");
        self.router
            .invoke(self.state.stub(*function, rest.iter().copied()))
    }

    /// Invoke and require success with an empty payload
    pub fn submit(&self, args: &[&str]) {
        match self.invoke(args) {
            Response::Success { payload } => {
                assert!(payload.is_empty(), "{:?} returned {:?}", args, payload)
            }
            Response::Failure { message } => panic!("{:?} failed: {}", args, message),
        }
    }

    /// Invoke and require success with the given payload
    pub fn query(&self, args: &[&str], expected: &str) {
        match self.invoke(args) {
            Response::Success { payload } => assert_eq!(payload, expected, "{:?}", args),
            Response::Failure { message } => panic!("{:?} failed: {}", args, message),
        }
    }

    /// Invoke and require failure with the given message
    pub fn query_err(&self, args: &[&str], expected: &str) {
        let response = self.invoke(args);
        assert_eq!(response.status(), Response::ERROR, "{:?}", args);
        assert_eq!(response.message(), Some(expected), "{:?}", args);
    }

    /// Invoke and require failure, message unchecked
    pub fn submit_err(&self, args: &[&str]) {
        let response = self.invoke(args);
        assert!(!response.is_success(), "{:?} succeeded", args);
    }
}
