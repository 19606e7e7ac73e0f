//! Driving the adapter the way a function runtime does.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use tower::ServiceExt;

use alb_lambda::routing::Router;
use alb_lambda::{
    handler_fn, wrap, AdapterError, Context, Invocation, Request, ResponseOptions, ResponseWriter,
};

mod common;

fn echo_router() -> Router {
    Router::new()
        .method(
            "GET",
            "/hello",
            handler_fn(|w: &mut dyn ResponseWriter, req: Request| {
                let name = req.url().query("name").unwrap_or_else(|| "world".into());
                w.headers().set("Content-Type", "text/plain; charset=utf-8");
                w.write_body(format!("hello {name}").as_bytes());
            }),
        )
        .path(
            "/arn",
            handler_fn(|w: &mut dyn ResponseWriter, req: Request| {
                let arn = req.elb().map(|e| e.target_group_arn.clone()).unwrap_or_default();
                w.write_body(arn.as_bytes());
            }),
        )
}

#[tokio::test]
async fn test_oneshot_invocation() {
    let adapter = wrap(echo_router(), ResponseOptions::default());
    let payload = json!({
        "httpMethod": "GET",
        "path": "/hello",
        "queryStringParameters": { "name": "alb" },
        "body": "",
        "isBase64Encoded": false
    });

    let out = adapter
        .oneshot(Invocation::new(Context::background(), payload))
        .await
        .unwrap();

    assert_eq!(out["statusCode"], 200);
    assert_eq!(out["statusDescription"], "OK");
    assert_eq!(out["body"], "hello alb");
    assert_eq!(out["isBase64Encoded"], false);
    assert_eq!(out["headers"]["Content-Type"], "text/plain; charset=utf-8");
}

#[tokio::test]
async fn test_not_found_route() {
    let adapter = wrap(echo_router(), ResponseOptions::default());
    let out = adapter
        .oneshot(Invocation::new(
            Context::background(),
            json!({ "httpMethod": "POST", "path": "/hello" }),
        ))
        .await
        .unwrap();

    assert_eq!(out["statusCode"], 404);
    assert_eq!(out["statusDescription"], "Not Found");
    assert_eq!(out["body"], "404 page not found\n");
}

#[tokio::test]
async fn test_errors_surface_from_service() {
    let adapter = wrap(echo_router(), ResponseOptions::default());
    let err = adapter
        .oneshot(Invocation::new(
            Context::background(),
            json!({ "httpMethod": 1 }),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_concurrent_invocations_share_nothing() {
    let adapter = Arc::new(wrap(echo_router(), ResponseOptions::default()));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let adapter = adapter.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            let payload = json!({
                "httpMethod": "GET",
                "path": "/arn",
                "requestContext": { "elb": { "targetGroupArn": format!("arn:tg/{i}") } }
            });
            adapter.invoke(Context::background(), payload)
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        let out = task.await.unwrap().unwrap();
        assert_eq!(out["body"], format!("arn:tg/{i}"));
    }
}

#[test]
fn test_parent_context_reaches_handler() {
    let deadline = Instant::now() + Duration::from_secs(30);
    let adapter = wrap(
        handler_fn(move |w: &mut dyn ResponseWriter, req: Request| {
            let ctx = req.context();
            assert_eq!(ctx.request_id(), Some("c0ffee"));
            assert_eq!(ctx.deadline(), Some(deadline));
            assert!(req.elb().is_some());
            w.write_body(b"ok");
        }),
        ResponseOptions::default(),
    );

    let ctx = Context::background()
        .with_request_id("c0ffee")
        .with_deadline(deadline);
    let out = adapter.invoke(ctx, json!({ "path": "/" })).unwrap();
    assert_eq!(out["body"], "ok");
}

#[test]
fn test_multi_value_options_end_to_end() {
    let mut req = alb_lambda::AlbRequest::default();
    req.multi_value_headers
        .insert("accept".into(), vec!["text/html".into()]);

    let resp = common::invoke(
        handler_fn(|w, r| {
            let accept = r.headers().get_all("Accept").to_vec();
            w.headers().insert_values("Some-H", vec!["a".into(), "b".into()]);
            w.headers().insert_values("Echo-Accept", accept);
        }),
        ResponseOptions {
            multi_value_headers: true,
        },
        &req,
    )
    .unwrap();

    assert!(resp.headers.is_none());
    let multi = resp.multi_value_headers.unwrap();
    assert_eq!(multi["Some-H"], vec!["a", "b"]);
    assert_eq!(multi["Echo-Accept"], vec!["text/html"]);
}
