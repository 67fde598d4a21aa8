#[cfg(test)]
pub mod test_helpers {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::provider::{FetchError, Fetcher};
    use crate::suggestion::Suggestion;

    pub const TEST_ID: &str = "test-search-results";

    #[derive(Default)]
    struct Script {
        calls: Vec<String>,
        responses: HashMap<String, Result<Vec<Suggestion>, FetchError>>,
        delays: HashMap<String, Duration>,
    }

    /// Fetcher with canned responses that records every query it receives
    ///
    /// Unscripted queries succeed with an empty list. Clones share the script,
    /// so a test can keep one clone while the cache owns another.
    #[derive(Clone, Default)]
    pub struct ScriptedFetcher {
        script: Arc<Mutex<Script>>,
    }

    impl ScriptedFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, query: &str, response: Result<Vec<Suggestion>, FetchError>) {
            self.script
                .lock()
                .unwrap()
                .responses
                .insert(query.to_string(), response);
        }

        pub fn delay(&self, query: &str, delay: Duration) {
            self.script
                .lock()
                .unwrap()
                .delays
                .insert(query.to_string(), delay);
        }

        pub fn calls(&self) -> Vec<String> {
            self.script.lock().unwrap().calls.clone()
        }
    }

    impl Fetcher for ScriptedFetcher {
        type Output = Vec<Suggestion>;

        async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>, FetchError> {
            let (response, delay) = {
                let mut script = self.script.lock().unwrap();
                script.calls.push(query.to_string());
                (
                    script.responses.get(query).cloned(),
                    script.delays.get(query).copied(),
                )
            };

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            response.unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    pub fn plumber() -> Suggestion {
        Suggestion::canonical("plumber", "plumber")
    }

    /// Serve exactly one HTTP response on a local port
    ///
    /// Returns the base URL and a handle resolving to the request line the
    /// server received.
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{}", addr), handle)
    }
}
