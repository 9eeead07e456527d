mod fixtures;
pub mod object_store;
pub mod server;
pub mod tracing;

pub use fixtures::{LogRoot, NOVA_LOG};
pub use object_store::FakeObjectStore;
pub use server::TestServer;
pub use tracing::{CapturedEvent, init_test_tracing};
