//! End-to-end tests: the real reqwest adapter, character service, wizard
//! controller and list view against an in-process fake character API.
//!
//! ```bash
//! cargo test -p pcm-player --lib e2e_tests
//! ```

mod fake_server;

pub use fake_server::FakeServer;
