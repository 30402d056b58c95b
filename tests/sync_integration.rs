//! Integration tests for the full crawl against a mock API.

use std::path::Path;
use std::sync::Mutex;

use talksync_core::progress::format_event;
use talksync_core::{
    ApiError, DownloadError, NoopReporter, ProgressEvent, ProgressReporter, SelectError,
    SyncConfig, SyncError, Syncer,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects every progress line for assertions.
#[derive(Default)]
struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressReporter for &RecordingReporter {
    fn report(&self, event: ProgressEvent<'_>) {
        self.lines.lock().unwrap().push(format_event(event));
    }
}

fn config_for(server: &MockServer, root: &Path) -> SyncConfig {
    SyncConfig {
        base_url: format!("{}/public", server.uri()),
        downloads_root: root.to_path_buf(),
        ..SyncConfig::default()
    }
}

async fn mount_json(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// One conference, one event, an opus and a webm recording in English plus a
/// German translation.
async fn mount_single_event_api(server: &MockServer, recordings: &str) {
    let base = server.uri();
    mount_json(
        server,
        "/public/conferences",
        format!(
            r#"{{"conferences":[{{"acronym":"foo","title":"Foo/Bar Con",
                "slug":"foo","url":"{base}/public/conferences/foo"}}]}}"#
        ),
    )
    .await;
    mount_json(
        server,
        "/public/conferences/foo",
        format!(
            r#"{{"acronym":"foo","events":[{{"title":"Intro: A/V","subtitle":"",
                "persons":["Jane Doe"],"original_language":"en",
                "description":"<p>An introduction to audio and video handling in practice</p>",
                "url":"{base}/public/events/intro"}}]}}"#
        ),
    )
    .await;
    mount_json(
        server,
        "/public/events/intro",
        format!(r#"{{"recordings":[{recordings}]}}"#),
    )
    .await;
}

fn default_recordings(base: &str) -> String {
    format!(
        r#"{{"mime_type":"audio/opus","language":"en","width":0,"height":0,
             "high_quality":false,"size":30,"length":1800,
             "recording_url":"{base}/cdn/intro.opus","url":"{base}/public/recordings/1"}},
           {{"mime_type":"video/webm","language":"en","width":1920,"height":1080,
             "high_quality":true,"size":400,"length":1800,
             "recording_url":"{base}/cdn/intro.webm","url":"{base}/public/recordings/2"}},
           {{"mime_type":"video/webm","language":"de","width":3840,"height":2160,
             "high_quality":true,"size":900,"length":1800,
             "recording_url":"{base}/cdn/intro-de.webm","url":"{base}/public/recordings/3"}}"#
    )
}

#[tokio::test]
async fn test_sync_downloads_preferred_rendition_to_sanitized_path() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_single_event_api(&server, &default_recordings(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/cdn/intro.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"webm payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let reporter = RecordingReporter::default();
    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        &reporter,
    );
    let stats = syncer.run().await.unwrap();

    let expected = temp_dir
        .path()
        .join("Foo-Bar Con")
        .join("Jane Doe - Intro- A-V.webm");
    assert_eq!(std::fs::read(&expected).unwrap(), b"webm payload");
    assert_eq!(stats.conferences, 1);
    assert_eq!(stats.events, 1);
    assert_eq!(stats.downloaded, 1);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.bytes_downloaded, 12);

    let lines = reporter.lines();
    assert!(lines[0].starts_with("Found conference: Foo/Bar Con, URL: "));
    assert!(lines[1].starts_with("\tFound event: Intro: A/V - An introduction"));
    assert!(lines[1].ends_with("..."));
    // German translation is filtered before candidates are listed.
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("\t\tFound ")).count(),
        2
    );
    assert!(lines.iter().any(|l| l.contains("Downloading:") && l.ends_with("/cdn/intro.webm")));
    assert_eq!(lines.last().map(String::as_str), Some("Done."));
}

#[tokio::test]
async fn test_sync_second_run_skips_existing_file() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_single_event_api(&server, &default_recordings(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/cdn/intro.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"webm payload".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server, temp_dir.path());
    let first = Syncer::with_client(reqwest::Client::new(), config.clone(), NoopReporter)
        .run()
        .await
        .unwrap();

    let reporter = RecordingReporter::default();
    let second = Syncer::with_client(reqwest::Client::new(), config, &reporter)
        .run()
        .await
        .unwrap();

    assert_eq!(first.downloaded, 1);
    assert_eq!(second.downloaded, 0);
    assert_eq!(second.skipped, 1);

    let lines = reporter.lines();
    assert!(lines.iter().all(|l| !l.contains("Downloading:")));
    assert!(
        lines
            .iter()
            .any(|l| l.contains("Jane Doe - Intro- A-V.webm already exists - skipping!"))
    );
}

#[tokio::test]
async fn test_sync_include_translations_picks_wider_translation() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_single_event_api(&server, &default_recordings(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/cdn/intro-de.webm"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"de".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let config = SyncConfig {
        restrict_to_original_language: false,
        ..config_for(&server, temp_dir.path())
    };
    let syncer = Syncer::with_client(reqwest::Client::new(), config, NoopReporter);
    syncer.run().await.unwrap();

    let expected = temp_dir
        .path()
        .join("Foo-Bar Con")
        .join("Jane Doe - Intro- A-V.webm");
    assert_eq!(std::fs::read(&expected).unwrap(), b"de");
}

#[tokio::test]
async fn test_sync_unknown_mime_type_aborts_before_download() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let base = server.uri();
    let recordings = format!(
        r#"{{"mime_type":"video/webm","language":"en","width":1920,
             "recording_url":"{base}/cdn/intro.webm"}},
           {{"mime_type":"video/x-flv","language":"en","width":640,
             "recording_url":"{base}/cdn/intro.flv"}}"#
    );
    mount_single_event_api(&server, &recordings).await;
    Mock::given(method("GET"))
        .and(path("/cdn/intro.webm"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        NoopReporter,
    );
    let result = syncer.run().await;

    match result {
        Err(SyncError::Select {
            source: SelectError::UnknownMimeType { mime_type },
            ..
        }) => assert_eq!(mime_type, "video/x-flv"),
        other => panic!("Expected UnknownMimeType, got: {other:?}"),
    }
    assert!(!temp_dir.path().join("Foo-Bar Con").exists());
}

#[tokio::test]
async fn test_sync_no_original_language_recording_aborts() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let base = server.uri();
    let recordings = format!(
        r#"{{"mime_type":"video/webm","language":"de","width":1920,
             "recording_url":"{base}/cdn/intro-de.webm"}}"#
    );
    mount_single_event_api(&server, &recordings).await;

    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        NoopReporter,
    );
    let result = syncer.run().await;

    assert!(
        matches!(
            result,
            Err(SyncError::Select {
                source: SelectError::NoCandidates { .. },
                ..
            })
        ),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_sync_event_list_decode_failure_aborts() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let base = server.uri();
    mount_json(
        &server,
        "/public/conferences",
        format!(r#"{{"conferences":[{{"title":"Broken","url":"{base}/public/conferences/broken"}}]}}"#),
    )
    .await;
    mount_json(&server, "/public/conferences/broken", "not json".to_string()).await;

    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        NoopReporter,
    );
    let result = syncer.run().await;

    assert!(
        matches!(result, Err(SyncError::Api(ApiError::Decode { .. }))),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_sync_first_error_stops_remaining_conferences() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let base = server.uri();
    mount_json(
        &server,
        "/public/conferences",
        format!(
            r#"{{"conferences":[
                {{"title":"First","url":"{base}/public/conferences/first"}},
                {{"title":"Second","url":"{base}/public/conferences/second"}}]}}"#
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/public/conferences/first"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/conferences/second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"events":[]}"#))
        .expect(0)
        .mount(&server)
        .await;

    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        NoopReporter,
    );
    let result = syncer.run().await;

    assert!(
        matches!(
            result,
            Err(SyncError::Api(ApiError::HttpStatus { status: 503, .. }))
        ),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_sync_media_download_failure_is_fatal() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_single_event_api(&server, &default_recordings(&server.uri())).await;
    Mock::given(method("GET"))
        .and(path("/cdn/intro.webm"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        NoopReporter,
    );
    let result = syncer.run().await;

    assert!(
        matches!(
            result,
            Err(SyncError::Download(DownloadError::HttpStatus { status: 404, .. }))
        ),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_sync_empty_conference_list_is_success() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    mount_json(&server, "/public/conferences", r#"{"conferences":[]}"#.to_string()).await;

    let syncer = Syncer::with_client(
        reqwest::Client::new(),
        config_for(&server, temp_dir.path()),
        NoopReporter,
    );
    let stats = syncer.run().await.unwrap();

    assert_eq!(stats.conferences, 0);
    assert_eq!(stats.downloaded, 0);
}
