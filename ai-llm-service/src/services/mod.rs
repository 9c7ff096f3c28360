pub mod gemini_service;
pub mod open_ai_service;

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    pub async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}
