//! Remote references served by a local HTTP server

use super::test_utils::{parse, Workspace};
use drytoml::error::{FetchError, ResolveError};
use drytoml::fetch::CacheService;
use drytoml::Resolver;
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tiny_http::{Response, Server, StatusCode};

/// Serves fixed documents by path and counts requests
struct DocumentServer {
    server: Arc<Server>,
    port: u16,
    hits: Arc<AtomicUsize>,
}

impl DocumentServer {
    fn start(documents: &[(&str, &str)]) -> Self {
        Self::start_raw(
            documents
                .iter()
                .map(|(path, body)| (path.to_string(), body.as_bytes().to_vec()))
                .collect(),
        )
    }

    fn start_raw(documents: HashMap<String, Vec<u8>>) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = Arc::new(Server::from_listener(listener, None).unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let server_for_thread = Arc::clone(&server);
        let hits_for_thread = Arc::clone(&hits);
        thread::spawn(move || {
            for request in server_for_thread.incoming_requests() {
                hits_for_thread.fetch_add(1, Ordering::SeqCst);
                let response = match documents.get(request.url()) {
                    Some(body) => Response::from_data(body.clone()),
                    None => Response::from_string("not found").with_status_code(StatusCode(404)),
                };
                let _ = request.respond(response);
            }
        });

        Self { server, port, hits }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for DocumentServer {
    fn drop(&mut self) {
        self.server.unblock();
    }
}

#[test]
fn test_remote_parent_is_fetched_and_cached() {
    let server = DocumentServer::start(&[(
        "/styles/black.toml",
        "[tool.black]\nline-length = 100\nskip-string-normalization = true\n",
    )]);
    let ws = Workspace::new();
    let child = ws.write(
        "pyproject.toml",
        &format!(
            "[tool.black]\n__extends = \"{}\"\nline-length = 79\n",
            server.url("/styles/black.toml")
        ),
    );

    let fetcher = ws.fetcher();
    let first = Resolver::new(&fetcher).resolve_file(&child).unwrap();
    assert_eq!(
        first,
        parse("[tool.black]\nline-length = 79\nskip-string-normalization = true\n")
    );
    assert_eq!(server.hits(), 1);

    let cached = CacheService::new(ws.cache_dir())
        .get(&server.url("/styles/black.toml"))
        .unwrap();
    assert!(cached.unwrap().contains("skip-string-normalization"));

    let second = Resolver::new(&fetcher).resolve_file(&child).unwrap();
    assert_eq!(first, second);
    assert_eq!(server.hits(), 1, "second resolution should be served from cache");
}

#[test]
fn test_relative_reference_inside_remote_document() {
    let server = DocumentServer::start(&[
        (
            "/styles/python/pyproject.toml",
            "__extends = \"../common/base.toml\"\n[tool.isort]\nprofile = \"black\"\n",
        ),
        ("/styles/common/base.toml", "[tool.isort]\nline_length = 88\n"),
    ]);
    let ws = Workspace::new();
    let child = ws.write(
        "pyproject.toml",
        &format!("__extends = \"{}\"\n", server.url("/styles/python/pyproject.toml")),
    );

    let fetcher = ws.fetcher();
    let resolved = Resolver::new(&fetcher).resolve_file(&child).unwrap();
    assert_eq!(
        resolved,
        parse("[tool.isort]\nprofile = \"black\"\nline_length = 88\n")
    );
    assert_eq!(server.hits(), 2);
}

#[test]
fn test_http_error_status_is_reported_and_not_cached() {
    let server = DocumentServer::start(&[]);
    let ws = Workspace::new();
    let url = server.url("/missing.toml");
    let child = ws.write("pyproject.toml", &format!("__extends = \"{}\"\n", url));

    let fetcher = ws.fetcher();
    let err = Resolver::new(&fetcher).resolve_file(&child).unwrap_err();
    match err {
        ResolveError::Fetch {
            url: failed,
            source: FetchError::Status { status },
        } => {
            assert_eq!(failed, url);
            assert_eq!(status, 404);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(CacheService::new(ws.cache_dir()).get(&url).unwrap(), None);
}

#[test]
fn test_invalid_utf8_response_is_rejected_and_not_cached() {
    let mut documents = HashMap::new();
    documents.insert("/broken.toml".to_string(), b"a = \"\xff\xfe\"\n".to_vec());
    let server = DocumentServer::start_raw(documents);
    let ws = Workspace::new();
    let url = server.url("/broken.toml");
    let child = ws.write("pyproject.toml", &format!("__extends = \"{}\"\n", url));

    let fetcher = ws.fetcher();
    let err = Resolver::new(&fetcher).resolve_file(&child).unwrap_err();
    assert!(
        matches!(
            err,
            ResolveError::Fetch {
                source: FetchError::Decode(_),
                ..
            }
        ),
        "unexpected error: {err}"
    );
    assert_eq!(server.hits(), 1);
    assert_eq!(CacheService::new(ws.cache_dir()).get(&url).unwrap(), None);
}
