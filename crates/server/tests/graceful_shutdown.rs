//! Shutdown behaviour of a served router with a run in flight.

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

use common::TestFixture;
use reelsmith_server::shutdown::cancel_on_shutdown;

#[tokio::test]
async fn test_shutdown_cancels_in_flight_run() {
    let fixture = TestFixture::new().await;
    fixture.renderer.set_delay(Duration::from_secs(5)).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = {
        let router = fixture.router.clone();
        let agent = Arc::clone(&fixture.agent);
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(cancel_on_shutdown(agent, async move {
                    shutdown_rx.await.ok();
                }))
                .await
        })
    };

    let request = tokio::spawn(async move {
        reqwest::Client::new()
            .post(format!("http://{}/api/v1/agent/run", addr))
            .json(&json!({ "limit": 3 }))
            .send()
            .await
    });

    for _ in 0..200 {
        if fixture.renderer.call_count().await > 0 {
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }
    assert!(fixture.agent.is_running(), "run never reached the renderer");
    shutdown_tx.send(()).unwrap();

    let response = timeout(Duration::from_secs(3), request)
        .await
        .expect("in-flight run was not cancelled by shutdown")
        .unwrap()
        .unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let results = body["run"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for result in results {
        assert_eq!(result["status"], "failed");
        assert_eq!(result["error"], "run cancelled");
    }
    assert_eq!(body["run"]["summary"]["failed"], 3);

    timeout(Duration::from_secs(3), server)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
    assert!(!fixture.agent.is_running());
}

#[tokio::test]
async fn test_shutdown_when_idle_stops_server() {
    let fixture = TestFixture::new().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = {
        let router = fixture.router.clone();
        let agent = Arc::clone(&fixture.agent);
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(cancel_on_shutdown(agent, async move {
                    shutdown_rx.await.ok();
                }))
                .await
        })
    };

    shutdown_tx.send(()).unwrap();
    timeout(Duration::from_secs(3), server)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();
    assert_eq!(fixture.renderer.call_count().await, 0);
}
