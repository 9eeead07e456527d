use crate::harness::{CapturedEvent, LogRoot, init_test_tracing};
use arc_swap::ArcSwap;
use logview_core::conf::{LogviewConfig, validate_config};
use logview_core::server::{build_pingora_server, build_runtime_state};
use reqwest::blocking::{Client, RequestBuilder};
use std::net::TcpStream;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Handle to a running log server serving a fresh [`LogRoot`].
pub struct TestServer {
    base_url: String,
    client: Client,
    root: LogRoot,
}

impl TestServer {
    /// Start a server with default settings and folder indexes enabled.
    pub fn start() -> Self {
        Self::start_with(|_| {})
    }

    /// Start a server, letting the caller adjust the config first. The
    /// listen address and root path are filled in afterwards.
    ///
    /// Ports are allocated dynamically, so tests can run in parallel.
    pub fn start_with(configure: impl FnOnce(&mut LogviewConfig)) -> Self {
        // Initialize tracing (this must happen first).
        init_test_tracing(events());

        let root = LogRoot::new();
        let listen_port = free_port();

        let mut cfg = LogviewConfig::default();
        cfg.general.generate_folder_index = true;
        configure(&mut cfg);
        cfg.server.listen = format!("127.0.0.1:{listen_port}");
        cfg.server.root_path = root.path().to_path_buf();
        validate_config(&cfg).expect("invalid test config");

        // Build initial runtime state (static for tests)
        let runtime_state = build_runtime_state(&cfg).expect("failed to build runtime state");

        // Wrap in ArcSwap (matches production shape)
        let state = Arc::new(ArcSwap::from_pointee(runtime_state));

        let server = build_pingora_server(&cfg, state).expect("failed to build log server");

        // Run server in background thread
        thread::spawn(move || {
            server.run_forever();
        });

        let base_url = format!("http://127.0.0.1:{listen_port}");

        // Wait for server to accept connections
        wait_for_server(&base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build client");

        Self {
            base_url,
            client,
            root,
        }
    }

    /// Convenience helper for GET requests.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub fn head(&self, path: &str) -> RequestBuilder {
        self.client.head(format!("{}{}", self.base_url, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn root(&self) -> &LogRoot {
        &self.root
    }

    /// Events captured from every server started by this test binary.
    pub fn events(&self) -> Vec<CapturedEvent> {
        events().lock().unwrap().clone()
    }
}

/// Poll until the server responds (or panic).
fn wait_for_server(listen_addr: &str) {
    let addr = listen_addr.strip_prefix("http://").unwrap_or(listen_addr);

    let deadline = Instant::now() + Duration::from_secs(2);

    loop {
        match TcpStream::connect(addr) {
            Ok(_) => return,
            Err(_) => {
                if Instant::now() > deadline {
                    panic!("server failed to start at {}", listen_addr);
                }
                thread::sleep(Duration::from_millis(25));
            }
        }
    }
}

static EVENTS: OnceLock<Arc<Mutex<Vec<CapturedEvent>>>> = OnceLock::new();

fn events() -> Arc<Mutex<Vec<CapturedEvent>>> {
    EVENTS
        .get_or_init(|| Arc::new(Mutex::new(Vec::new())))
        .clone()
}

/// Allocate a free port on localhost.
/// This is required to avoid port collisions when running tests in parallel.
fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
