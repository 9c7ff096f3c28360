pub mod catalog;
pub mod conversion_chat;
pub mod health_route;
pub mod unit_selection;

#[cfg(test)]
pub(crate) mod test_support {
    use std::{fs, path::Path, sync::Arc};

    use ai_llm_service::ProviderSettings;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use contextor::{ChatPipeline, ContextorConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{build_router, core::app_state::AppState};

    /// Router over a one-document corpus in `dir`, with providers pointed at
    /// a closed local port so any provider call fails fast.
    pub fn app(dir: &Path) -> Router {
        fs::write(
            dir.join("length.txt"),
            "LENGTH CONVERSIONS\n1 mile = 1.609344 kilometer\n1 kilometer = 1000 meter\n",
        )
        .unwrap();
        let pipeline = ChatPipeline::new(ContextorConfig {
            formulas_dir: dir.to_path_buf(),
            ..ContextorConfig::default()
        })
        .unwrap();
        let settings = ProviderSettings {
            openai_endpoint: "http://127.0.0.1:1".into(),
            gemini_endpoint: "http://127.0.0.1:1".into(),
            timeout_secs: Some(2),
            ..ProviderSettings::default()
        };
        build_router(Arc::new(AppState::new(pipeline, settings)))
    }

    pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }
}
