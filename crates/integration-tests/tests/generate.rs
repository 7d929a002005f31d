//! End-to-end tests for `POST /generate-audio`

mod harness;

use std::time::Duration;

use harness::config::ConfigBuilder;
use harness::mock_engine::{MockEngine, fake_audio};
use harness::server::TestServer;

#[tokio::test]
async fn returns_wav_audio_for_text() {
    let mock = MockEngine::start().await.unwrap();
    let config = ConfigBuilder::new().with_http_engine(&mock.base_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.generate(&serde_json::json!({"text": "hello"})).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "audio/wav");

    let body = resp.bytes().await.unwrap();
    assert_eq!(body.as_ref(), fake_audio("en", "hello").as_slice());

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "hello");
    assert_eq!(calls[0].language, "en");
    assert_eq!(calls[0].speaker_wav, None);
}

#[tokio::test]
async fn forwards_language_and_speaker_sample() {
    let mock = MockEngine::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_http_engine(&mock.base_url())
        .with_speaker_wav("/voices/narrator.wav")
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .generate(&serde_json::json!({"text": "bonjour", "language": "fr"}))
        .await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.bytes().await.unwrap().as_ref(), fake_audio("fr", "bonjour").as_slice());

    let calls = mock.calls();
    assert_eq!(calls[0].language, "fr");
    assert_eq!(calls[0].speaker_wav.as_deref(), Some("/voices/narrator.wav"));
}

#[tokio::test]
async fn empty_text_is_forwarded() {
    let mock = MockEngine::start().await.unwrap();
    let config = ConfigBuilder::new().with_http_engine(&mock.base_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.generate(&serde_json::json!({"text": ""})).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(mock.calls()[0].text, "");
}

#[tokio::test]
async fn long_text_is_delivered_intact() {
    let mock = MockEngine::start().await.unwrap();
    let config = ConfigBuilder::new().with_http_engine(&mock.base_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let text = "-Chapitre un: l'été & la mer? ".repeat(8_000);
    let resp = server.generate(&serde_json::json!({"text": text, "language": "fr"})).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(mock.calls()[0].text, text);
}

#[tokio::test]
async fn unavailable_engine_returns_detail() {
    let config = ConfigBuilder::new().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.generate(&serde_json::json!({"text": "hello"})).await;

    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json, serde_json::json!({"detail": "TTS Engine not initialized"}));
}

#[tokio::test]
async fn engine_failure_message_reaches_client() {
    let mock = MockEngine::start_failing("speaker embedding failed").await.unwrap();
    let config = ConfigBuilder::new().with_http_engine(&mock.base_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.generate(&serde_json::json!({"text": "hello"})).await;

    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    let detail = json["detail"].as_str().unwrap();
    assert!(detail.contains("speaker embedding failed"), "unexpected detail: {detail}");
}

#[tokio::test]
async fn empty_engine_output_is_an_error() {
    let mock = MockEngine::start_silent().await.unwrap();
    let config = ConfigBuilder::new().with_http_engine(&mock.base_url()).build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.generate(&serde_json::json!({"text": "hello"})).await;

    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["detail"], "engine produced no audio");
}

#[tokio::test]
async fn slow_engine_times_out() {
    let mock = MockEngine::start_slow(Duration::from_secs(2)).await.unwrap();
    let config = ConfigBuilder::new()
        .with_http_engine(&mock.base_url())
        .with_timeout("100ms")
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.generate(&serde_json::json!({"text": "hello"})).await;

    assert_eq!(resp.status(), 500);

    let json: serde_json::Value = resp.json().await.unwrap();
    let detail = json["detail"].as_str().unwrap();
    assert!(detail.starts_with("synthesis timed out"), "unexpected detail: {detail}");
}

#[tokio::test]
async fn concurrent_requests_receive_their_own_audio() {
    let mock = MockEngine::start_slow(Duration::from_millis(50)).await.unwrap();
    let output_dir = tempfile::tempdir().unwrap();
    let config = ConfigBuilder::new()
        .with_http_engine(&mock.base_url())
        .with_output_dir(output_dir.path())
        .build();

    let server = TestServer::start(config).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..8 {
        let client = server.client().clone();
        let url = server.url("/generate-audio");
        tasks.spawn(async move {
            let text = format!("sentence number {i}");
            let resp = client
                .post(url)
                .json(&serde_json::json!({"text": text}))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 200);
            (text, resp.bytes().await.unwrap())
        });
    }

    while let Some(result) = tasks.join_next().await {
        let (text, body) = result.unwrap();
        assert_eq!(body.as_ref(), fake_audio("en", &text).as_slice());
    }

    assert_eq!(mock.calls().len(), 8);

    let leftovers = std::fs::read_dir(output_dir.path()).unwrap().count();
    assert_eq!(leftovers, 0, "temporary output files were not cleaned up");
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let config = ConfigBuilder::new().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/generate-audio"))
        .header("content-type", "application/json")
        .body("{\"language\": \"en\"}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = resp.json().await.unwrap();
    assert!(json["detail"].is_string());
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let config = ConfigBuilder::new().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/generate-audio"))
        .header("content-type", "text/plain")
        .body("hello")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 415);
}

#[tokio::test]
async fn get_is_not_allowed() {
    let config = ConfigBuilder::new().build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/generate-audio")).send().await.unwrap();

    assert_eq!(resp.status(), 405);
}
