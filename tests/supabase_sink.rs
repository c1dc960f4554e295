// tests/supabase_sink.rs
use std::sync::{Arc, Mutex};
use std::time::Duration;

use course_scraper::config::env::SupabaseConfig;
use course_scraper::model::course_record::CourseRecord;
use course_scraper::sink::RecordSink;
use course_scraper::sink::supabase_sink::SupabaseSink;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone, Debug)]
struct Captured {
    head: String,
    body: serde_json::Value,
}

/// Minimal PostgREST stand-in: 201 for every insert except course codes starting with "BAD".
async fn spawn_postgrest() -> (String, Arc<Mutex<Vec<Captured>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let store = Arc::clone(&captured);
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { break };
            let store = Arc::clone(&store);
            tokio::spawn(async move { handle(stream, store).await });
        }
    });

    (format!("http://{}", addr), captured)
}

async fn handle(mut stream: TcpStream, store: Arc<Mutex<Vec<Captured>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let (head, body) = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).to_string();
        let Some(split) = text.find("\r\n\r\n") else { continue };
        let head = text[..split].to_string();
        let length = head
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        if buf.len() >= split + 4 + length {
            break (head, buf[split + 4..split + 4 + length].to_vec());
        }
    };

    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let rejected = body["course_code"].as_str().unwrap_or_default().starts_with("BAD");
    store.lock().unwrap().push(Captured { head, body });

    let response = if rejected {
        let msg = r#"{"message":"duplicate key value"}"#;
        format!(
            "HTTP/1.1 409 Conflict\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            msg.len(),
            msg
        )
    } else {
        "HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
    };
    stream.write_all(response.as_bytes()).await.unwrap();
    stream.shutdown().await.ok();
}

#[tokio::test]
async fn inserts_every_row_and_reports_rejections() {
    let (url, captured) = spawn_postgrest().await;
    let sink = SupabaseSink::new(&SupabaseConfig {
        url,
        key: "service-key".into(),
        table: "courses".into(),
    }, Duration::from_secs(5))
    .unwrap();

    let mut good = CourseRecord::new("CISC124", "Computing II");
    good.course_learning_outcomes = vec!["Design classes.".into()];
    let records = [good, CourseRecord::new("BAD 001", "Broken"), CourseRecord::new("MATH110", "Linear Algebra")];

    let report = sink.write(&records).await.unwrap();
    assert_eq!(report.written, 2);
    assert_eq!(report.failed, ["BAD 001"]);

    let captured = captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 3);

    let first = &captured[0];
    assert!(first.head.starts_with("POST /rest/v1/courses "));
    let head = first.head.to_ascii_lowercase();
    assert!(head.contains("apikey: service-key"));
    assert!(head.contains("authorization: bearer service-key"));
    assert_eq!(first.body["course_learning_outcomes"][0], "Design classes.");
    assert!(first.body["average_gpa"].is_null());
    assert!(first.body["average_enrollment"].is_null());
    assert_eq!(captured[2].body["course_code"], "MATH110");
}

#[tokio::test]
async fn stalled_endpoint_times_out_per_row() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    let sink = SupabaseSink::new(&SupabaseConfig {
        url: format!("http://{}", addr),
        key: "service-key".into(),
        table: "courses".into(),
    }, Duration::from_millis(200))
    .unwrap();

    let records = [CourseRecord::new("CISC124", "Computing II"), CourseRecord::new("MATH110", "Linear Algebra")];
    let report = tokio::time::timeout(Duration::from_secs(10), sink.write(&records))
        .await
        .expect("sink should give up on a stalled endpoint")
        .unwrap();

    assert_eq!(report.written, 0);
    assert_eq!(report.failed, ["CISC124", "MATH110"]);
}
