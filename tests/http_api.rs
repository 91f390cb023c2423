#[path = "common/mod.rs"]
mod common;

use common::*;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use yt_comments::{ApiError, ChannelPart, CommentFetcher, HttpApi, Video, YouTubeApi};

/// Serves each canned `(status line, body)` to one connection, in order, and
/// reports every request line it saw.
fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            loop {
                let mut header = String::new();
                if reader.read_line(&mut header).unwrap() == 0 || header == "\r\n" {
                    break;
                }
            }
            let _ = tx.send(request_line.trim_end().to_string());
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            )
            .unwrap();
            stream.flush().unwrap();
        }
    });

    (base, rx)
}

fn api(base: &str) -> HttpApi {
    HttpApi::new("k").unwrap().with_base_url(base)
}

#[test]
fn comment_threads_request_and_disabled_envelope() {
    let (base, requests) = serve(vec![(
        "403 Forbidden",
        r#"{"error":{"code":403,"message":"The video has disabled comments.","errors":[{"reason":"commentsDisabled"}]}}"#,
    )]);

    let err = api(&base).comment_threads("vid", 100, Some("tok")).unwrap_err();
    assert_eq!(
        requests.recv().unwrap(),
        "GET /commentThreads?part=snippet%2Creplies&videoId=vid&maxResults=100&textFormat=plainText&pageToken=tok&key=k HTTP/1.1"
    );
    match &err {
        ApiError::Http { status, message } => {
            assert_eq!(*status, 403);
            assert_eq!(message, "The video has disabled comments.");
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
    assert!(err.is_comments_disabled());
}

#[test]
fn success_body_decodes() {
    let (base, requests) = serve(vec![(
        "200 OK",
        r#"{"items":[{"id":"UCx","contentDetails":{"relatedPlaylists":{"uploads":"UUx"}}}]}"#,
    )]);

    let resp = api(&base).channels_by_id("UCx", ChannelPart::ContentDetails).unwrap();
    assert_eq!(requests.recv().unwrap(), "GET /channels?part=contentDetails&id=UCx&key=k HTTP/1.1");
    assert_eq!(resp.items.len(), 1);
    assert_eq!(resp.items[0].content_details.as_ref().unwrap().related_playlists.uploads, "UUx");
}

#[test]
fn search_request_line() {
    let (base, requests) = serve(vec![("200 OK", r#"{"items":[{"snippet":{"channelId":"UCfound"}}]}"#)]);
    let resp = api(&base).search_channels("some name", 1).unwrap();
    assert_eq!(
        requests.recv().unwrap(),
        "GET /search?part=snippet&q=some+name&type=channel&maxResults=1&key=k HTTP/1.1"
    );
    assert_eq!(resp.items[0].snippet.channel_id, "UCfound");
}

#[test]
fn non_json_error_falls_back_to_reason() {
    let (base, _requests) = serve(vec![("500 Internal Server Error", "upstream exploded")]);
    let err = api(&base).channels_by_username("someone").unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert!(!err.is_comments_disabled());
}

#[test]
fn garbage_success_body_is_decode_error() {
    let (base, _requests) = serve(vec![("200 OK", "not json")]);
    let err = api(&base).playlist_items("UUx", 50, None).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn fetcher_over_http_treats_403_as_disabled() {
    let (base, _requests) = serve(vec![("403 Forbidden", r#"{"error":{"code":403,"message":"disabled"}}"#)]);
    let http = api(&base);
    let video = Video { video_id: "vid".into(), title: "T".into(), published_at: String::new() };

    let (records, logs) = with_captured_logs(|| CommentFetcher::new(&http, 100).fetch(&video, "Chan"));
    assert!(records.is_empty());
    assert!(logs.contains("Comments disabled for video vid"), "logs were: {logs}");
}
