//! Dynamic-render server
//!
//! Every request goes through the content pipeline again: the listing is
//! recomputed and posts are re-read and re-rendered, so edits show up on
//! the next reload without a build step.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::ContentLoader;
use crate::error::ContentError;
use crate::templates;
use crate::Site;

/// Server state
struct ServerState {
    config: SiteConfig,
    loader: ContentLoader,
}

/// Build the router for a site
pub fn router(site: &Site) -> Router {
    let state = Arc::new(ServerState {
        config: site.config.clone(),
        loader: site.loader(),
    });

    let blog_root = site.config.blog_root();
    let index_path = if blog_root.is_empty() {
        "/".to_string()
    } else {
        blog_root.clone()
    };

    let mut app = Router::new()
        .route(&index_path, get(index_handler))
        .route(&format!("{}/:slug", blog_root), get(post_handler))
        .route("/api/posts", get(api_list_handler))
        .route("/api/posts/:slug", get(api_post_handler));

    if !blog_root.is_empty() {
        app = app
            .route(&format!("{}/", blog_root), get(index_handler))
            .route(
                "/",
                get(move || std::future::ready(Redirect::temporary(&index_path))),
            );
    }

    app.fallback_service(ServeDir::new(&site.public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}{}", ip, port, site.config.blog_root());
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run blocking pipeline work off the async workers
async fn run_blocking<T, F>(state: &Arc<ServerState>, f: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&ServerState) -> Result<T, ContentError> + Send + 'static,
{
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || f(&state)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(error_response(e)),
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response())
        }
    }
}

fn error_response(e: ContentError) -> Response {
    match e {
        ContentError::NotFound(slug) => {
            tracing::debug!("Not found: {}", slug);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
        e => {
            tracing::error!("Content error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    match run_blocking(&state, |s| s.loader.list_posts()).await {
        Ok(posts) => Html(templates::index_page(&state.config, &posts)).into_response(),
        Err(response) => response,
    }
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let requested = slug.clone();
    match run_blocking(&state, move |s| s.loader.get_post(&slug)).await {
        Ok(post) => Html(templates::post_page(&state.config, &post)).into_response(),
        Err(response) if response.status() == StatusCode::NOT_FOUND => (
            StatusCode::NOT_FOUND,
            Html(templates::not_found_page(&state.config, &requested)),
        )
            .into_response(),
        Err(response) => response,
    }
}

async fn api_list_handler(State(state): State<Arc<ServerState>>) -> Response {
    match run_blocking(&state, |s| s.loader.list_posts()).await {
        Ok(posts) => Json(posts).into_response(),
        Err(response) => response,
    }
}

async fn api_post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    match run_blocking(&state, move |s| s.loader.get_post(&slug)).await {
        Ok(post) => Json(post).into_response(),
        Err(response) => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    async fn fetch(addr: SocketAddr, path: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn serve(site: &Site) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(site);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.content_dir).unwrap();
        for (name, content) in files {
            fs::write(site.content_dir.join(name), content).unwrap();
        }
        (dir, site)
    }

    #[tokio::test]
    async fn test_post_and_listing() {
        let (_dir, site) = site_with(&[
            ("hello.md", "---\ntitle: Hello\ndate: 2024-01-01\n---\n<video src=\"/a.mp4\"></video>\n"),
        ]);
        let addr = serve(&site).await;

        let post = fetch(addr, "/blog/hello").await;
        assert!(post.starts_with("HTTP/1.1 200"));
        assert!(post.contains("<video src=\"/a.mp4\"></video>"));

        let listing = fetch(addr, "/api/posts").await;
        assert!(listing.contains("\"slug\":\"hello\""));
    }

    #[tokio::test]
    async fn test_unknown_slug_is_404() {
        let (_dir, site) = site_with(&[]);
        let addr = serve(&site).await;

        let page = fetch(addr, "/blog/does-not-exist").await;
        assert!(page.starts_with("HTTP/1.1 404"));
        assert!(page.contains("does-not-exist"));

        let api = fetch(addr, "/api/posts/does-not-exist").await;
        assert!(api.starts_with("HTTP/1.1 404"));
    }

    #[tokio::test]
    async fn test_new_posts_show_up_without_restart() {
        let (_dir, site) = site_with(&[]);
        let addr = serve(&site).await;
        assert!(fetch(addr, "/blog/later").await.starts_with("HTTP/1.1 404"));

        fs::write(site.content_dir.join("later.md"), "Written later").unwrap();
        let page = fetch(addr, "/blog/later").await;
        assert!(page.starts_with("HTTP/1.1 200"));
        assert!(page.contains("<p>Written later</p>"));
    }
}
