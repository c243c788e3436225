//! Shared harness: the full router served on an OS-assigned port over a
//! fresh in-memory store, one instance per test.

use api_videohub::{build_router, VideoStore};

pub async fn spawn_app() -> String {
    let store = VideoStore::in_memory().await.expect("in-memory store");
    let app = build_router(store, "frontend");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    format!("http://{addr}")
}
