//! HTTP song store using reqwest

use super::config::SyncConfig;
use super::error::SyncError;
use super::traits::SongStore;
use crate::model::{RankedEntry, Song};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// Talks to the song service over HTTP
///
/// - search: `GET /search-songs?track=<query>&rank=<n>`
/// - load: `GET /songs`
/// - save: `POST /songs` with a JSON array body
pub struct HttpSongStore {
    client: Client,
    config: SyncConfig,
}

impl HttpSongStore {
    pub fn new(config: SyncConfig) -> Result<Self, SyncError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| SyncError::Transport {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Fail on non-success statuses, keeping the body for the error message
    async fn check_status(response: Response) -> Result<Response, SyncError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        Err(SyncError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SyncError> {
        let response = Self::check_status(response).await?;
        response.json::<T>().await.map_err(|e| SyncError::Decode {
            message: e.to_string(),
        })
    }
}

fn transport(err: reqwest::Error) -> SyncError {
    SyncError::Transport {
        message: err.to_string(),
    }
}

#[async_trait]
impl SongStore for HttpSongStore {
    async fn search(&self, query: &str, target_rank: u32) -> Result<Vec<Song>, SyncError> {
        let url = self.config.endpoint("search-songs");
        let rank = target_rank.to_string();
        log::debug!("GET {} track={:?} rank={}", url, query, rank);

        let response = self
            .client
            .get(&url)
            .query(&[("track", query), ("rank", rank.as_str())])
            .send()
            .await
            .map_err(transport)?;

        Self::decode(response).await
    }

    async fn load(&self) -> Result<Vec<RankedEntry>, SyncError> {
        let url = self.config.endpoint("songs");
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport)?;
        Self::decode(response).await
    }

    async fn save(&self, entries: &[RankedEntry]) -> Result<(), SyncError> {
        let url = self.config.endpoint("songs");
        log::debug!("POST {} ({} entries)", url, entries.len());

        let response = self
            .client
            .post(&url)
            .json(entries)
            .send()
            .await
            .map_err(transport)?;

        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accept one connection, answer with `status`/`body`, return the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (HttpSongStore, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request_complete(&request) {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(request).unwrap()
        });

        let config = SyncConfig::new(format!("http://{}", addr)).with_timeout(Duration::from_secs(5));
        (HttpSongStore::new(config).unwrap(), handle)
    }

    /// Headers received and, if announced, the whole body
    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    fn request_body(request: &str) -> &str {
        request.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_search_sends_track_and_rank() {
        let (store, server) = serve_once(
            "200 OK",
            r#"[{"name":"The Less I Know the Better","artist":"Tame Impala","uri":"spotify:track:1","album_cover_url":"c.jpg","rank":4}]"#,
        )
        .await;

        let songs = store.search("the less & i", 4).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(
            request_line(&request),
            "GET /search-songs?track=the+less+%26+i&rank=4 HTTP/1.1"
        );
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].artist, "Tame Impala");
        assert_eq!(songs[0].uri, "spotify:track:1");
    }

    #[tokio::test]
    async fn test_save_posts_flat_entries() {
        let (store, server) = serve_once("200 OK", "").await;
        let entries = vec![RankedEntry::new(Song::new("A", "B"), 1)];

        store.save(&entries).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request_line(&request), "POST /songs HTTP/1.1");
        assert!(request.to_lowercase().contains("content-type: application/json"));
        let body: serde_json::Value = serde_json::from_str(request_body(&request)).unwrap();
        assert_eq!(
            body,
            json!([{"name": "A", "artist": "B", "uri": "", "album_cover_url": "", "rank": 1}])
        );
    }

    #[tokio::test]
    async fn test_load_reads_ranked_entries() {
        let (store, server) = serve_once(
            "200 OK",
            r#"[{"name":"A","artist":"B","uri":"spotify:track:a","album_cover_url":"a.jpg","rank":2}]"#,
        )
        .await;

        let entries = store.load().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(request_line(&request), "GET /songs HTTP/1.1");
        assert_eq!(entries, vec![RankedEntry::new(
            Song::new("A", "B").with_uri("spotify:track:a").with_artwork("a.jpg"),
            2
        )]);
    }

    #[tokio::test]
    async fn test_server_error_becomes_status() {
        let (store, server) = serve_once("500 Internal Server Error", "boom").await;

        let err = store.load().await.unwrap_err();
        server.await.unwrap();

        assert_eq!(
            err,
            SyncError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_failed_save_is_status_error() {
        let (store, server) = serve_once("406 Not Acceptable", "{\"error\":\"Database error\"}").await;

        let err = store.save(&[RankedEntry::new(Song::new("A", "B"), 1)]).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, SyncError::Status { status: 406, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (store, server) = serve_once("200 OK", "not json").await;

        let err = store.search("x", 1).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, SyncError::Decode { .. }));
    }

    #[test]
    fn test_client_builds_with_timeout() {
        let config = SyncConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let store = HttpSongStore::new(config).unwrap();
        assert_eq!(store.config().timeout, Some(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) is not expected to be listening for HTTP
        let config =
            SyncConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_secs(2));
        let store = HttpSongStore::new(config).unwrap();

        let err = store.load().await.unwrap_err();
        assert!(err.is_remote(), "unexpected error: {:?}", err);
    }
}
