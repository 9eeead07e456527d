use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

/// Minimal HTTP server answering `GET /<path>` from a fixed map of objects.
pub struct FakeObjectStore {
    base_url: String,
}

impl FakeObjectStore {
    pub fn start(objects: &[(&str, &str)]) -> Self {
        let objects: HashMap<String, String> = objects
            .iter()
            .map(|(path, body)| (path.to_string(), body.to_string()))
            .collect();

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind object store");
        let addr = listener.local_addr().expect("object store has no address");

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let Ok(reader_stream) = stream.try_clone() else { continue };
                let mut reader = BufReader::new(reader_stream);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                let mut line = String::new();
                while reader.read_line(&mut line).is_ok_and(|n| n > 2) {
                    line.clear();
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let response = match objects.get(path) {
                    Some(body) => format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    ),
                    None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                        .to_string(),
                };

                let mut stream = stream;
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self {
            base_url: format!("http://{addr}"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
