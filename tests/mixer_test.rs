use std::collections::HashMap;
use std::sync::Mutex;

use mixcli::error::Error;
use mixcli::mixer::{self, TrackSink, TrackSource};
use mixcli::types::{PlaylistItem, PlaylistTrack};
use mixcli::utils;

fn item(id: &str) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            id: Some(id.to_string()),
        }),
    }
}

fn items(prefix: &str, count: usize) -> Vec<PlaylistItem> {
    (0..count).map(|i| item(&format!("{}{}", prefix, i))).collect()
}

/// In-memory paginated source recording every page request it serves.
struct FakeSource {
    playlists: HashMap<String, Vec<PlaylistItem>>,
    requests: Mutex<Vec<(String, usize, usize)>>,
    fail_for: Option<String>,
}

impl FakeSource {
    fn new(playlists: Vec<(&str, Vec<PlaylistItem>)>) -> Self {
        FakeSource {
            playlists: playlists
                .into_iter()
                .map(|(id, items)| (id.to_string(), items))
                .collect(),
            requests: Mutex::new(Vec::new()),
            fail_for: None,
        }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl TrackSource for FakeSource {
    async fn playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PlaylistItem>, Error> {
        self.requests
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), offset, limit));

        if self.fail_for.as_deref() == Some(playlist_id) {
            return Err(Error::Fetch {
                what: "playlist items".to_string(),
                source: "simulated page failure".into(),
            });
        }

        let all = &self.playlists[playlist_id];
        let end = (offset + limit).min(all.len());
        let start = offset.min(all.len());
        Ok(all[start..end].to_vec())
    }
}

/// Sink recording every batch, optionally failing some of them.
struct FakeSink {
    batches: Mutex<Vec<Vec<String>>>,
    fail_batches: Vec<usize>,
}

impl FakeSink {
    fn new() -> Self {
        FakeSink {
            batches: Mutex::new(Vec::new()),
            fail_batches: Vec::new(),
        }
    }

    fn failing_on(fail_batches: Vec<usize>) -> Self {
        FakeSink {
            batches: Mutex::new(Vec::new()),
            fail_batches,
        }
    }
}

impl TrackSink for FakeSink {
    async fn add_tracks(&self, _playlist_id: &str, track_ids: &[String]) -> Result<(), Error> {
        let mut batches = self.batches.lock().unwrap();
        let index = batches.len();
        batches.push(track_ids.to_vec());

        if self.fail_batches.contains(&index) {
            return Err(Error::Write("simulated write failure".into()));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_collect_tracks_pages_with_offset_cursor() {
    let source = FakeSource::new(vec![("p1", items("t", 7))]);

    let tracks = mixer::collect_tracks(&source, &["p1".to_string()], 3)
        .await
        .unwrap();

    // 7 tracks over pages of 3: offsets 0, 3, 6; the last page is short.
    let requests = source.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![
            ("p1".to_string(), 0, 3),
            ("p1".to_string(), 3, 3),
            ("p1".to_string(), 6, 3),
        ]
    );

    let expected: Vec<String> = (0..7).map(|i| format!("t{}", i)).collect();
    assert_eq!(tracks, expected);
}

#[tokio::test]
async fn test_collect_tracks_full_final_page_costs_one_probe() {
    let source = FakeSource::new(vec![("p1", items("t", 6))]);

    let tracks = mixer::collect_tracks(&source, &["p1".to_string()], 3)
        .await
        .unwrap();

    // A track count that is an exact multiple of the page size cannot be
    // detected as final until an empty page comes back.
    assert_eq!(source.request_count(), 3);
    assert_eq!(tracks.len(), 6);
}

#[tokio::test]
async fn test_collect_tracks_empty_playlist() {
    let source = FakeSource::new(vec![("p1", Vec::new())]);

    let tracks = mixer::collect_tracks(&source, &["p1".to_string()], 100)
        .await
        .unwrap();

    assert_eq!(source.request_count(), 1);
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_collect_tracks_skips_items_without_track() {
    let source = FakeSource::new(vec![(
        "p1",
        vec![
            item("t0"),
            PlaylistItem { track: None },
            PlaylistItem {
                track: Some(PlaylistTrack { id: None }),
            },
            item("t1"),
        ],
    )]);

    let tracks = mixer::collect_tracks(&source, &["p1".to_string()], 100)
        .await
        .unwrap();

    assert_eq!(tracks, vec!["t0".to_string(), "t1".to_string()]);
}

#[tokio::test]
async fn test_collect_tracks_concatenates_in_selection_order() {
    let source = FakeSource::new(vec![("p1", items("a", 3)), ("p2", items("b", 2))]);

    let tracks = mixer::collect_tracks(&source, &["p2".to_string(), "p1".to_string()], 100)
        .await
        .unwrap();

    assert_eq!(tracks, vec!["b0", "b1", "a0", "a1", "a2"]);
}

#[tokio::test]
async fn test_collect_tracks_duplicate_selection_fetches_twice() {
    let source = FakeSource::new(vec![("p1", items("a", 2))]);

    let tracks = mixer::collect_tracks(&source, &["p1".to_string(), "p1".to_string()], 100)
        .await
        .unwrap();

    assert_eq!(tracks, vec!["a0", "a1", "a0", "a1"]);
    assert_eq!(source.request_count(), 2);
}

#[tokio::test]
async fn test_collect_tracks_aborts_on_page_failure() {
    let mut source = FakeSource::new(vec![("p1", items("a", 2)), ("p2", items("b", 2))]);
    source.fail_for = Some("p2".to_string());

    let result =
        mixer::collect_tracks(&source, &["p1".to_string(), "p2".to_string()], 100).await;

    // The aggregate from p1 is discarded, not returned partially.
    assert!(matches!(result, Err(Error::Fetch { .. })));
}

#[tokio::test]
async fn test_push_in_batches_empty_input_issues_no_calls() {
    let sink = FakeSink::new();

    let report = mixer::push_in_batches(&sink, "dest", &[], 20).await;

    assert_eq!(report.attempted, 0);
    assert_eq!(report.succeeded, 0);
    assert!(sink.batches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_push_in_batches_partitions_without_gaps_or_overlaps() {
    let tracks: Vec<String> = (0..45).map(|i| format!("t{}", i)).collect();
    let sink = FakeSink::new();

    let report = mixer::push_in_batches(&sink, "dest", &tracks, 20).await;

    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 3);

    let batches = sink.batches.lock().unwrap().clone();
    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![20, 20, 5]);

    // Concatenated batches reproduce the input exactly.
    let written: Vec<String> = batches.into_iter().flatten().collect();
    assert_eq!(written, tracks);
}

#[tokio::test]
async fn test_push_in_batches_continues_past_failed_batch() {
    let tracks: Vec<String> = (0..50).map(|i| format!("t{}", i)).collect();
    let sink = FakeSink::failing_on(vec![1]);

    let report = mixer::push_in_batches(&sink, "dest", &tracks, 20).await;

    // The failed middle batch does not stop the remaining ones.
    assert_eq!(report.attempted, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(sink.batches.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_mix_two_playlists_end_to_end() {
    let source = FakeSource::new(vec![("p1", items("x", 3)), ("p2", items("y", 2))]);

    let mut tracks = mixer::collect_tracks(
        &source,
        &["p1".to_string(), "p2".to_string()],
        mixer::PAGE_SIZE,
    )
    .await
    .unwrap();

    // Aggregation is playlist-then-track ordered before the shuffle.
    assert_eq!(tracks, vec!["x0", "x1", "x2", "y0", "y1"]);

    utils::shuffle_tracks(&mut tracks);

    let sink = FakeSink::new();
    let report = mixer::push_in_batches(&sink, "dest", &tracks, mixer::BATCH_SIZE).await;

    // 5 tracks fit one batch of 20.
    assert_eq!(report.attempted, 1);
    assert_eq!(report.succeeded, 1);

    let batches = sink.batches.lock().unwrap().clone();
    assert_eq!(batches.len(), 1);

    let mut written = batches[0].clone();
    written.sort();
    assert_eq!(written, vec!["x0", "x1", "x2", "y0", "y1"]);
}
