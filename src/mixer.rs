//! Fetch/shuffle/write orchestration over the authenticated client.
//!
//! The two loops here are deliberately split from the HTTP client behind
//! small trait seams so the paging and batching contracts can be exercised
//! against in-memory fakes.

use std::future::Future;

use crate::{error::Error, types::PlaylistItem, warning};

/// Fixed page size for the offset-cursor playlist-item listing.
pub const PAGE_SIZE: usize = 100;

/// Maximum number of tracks submitted per add-tracks call.
pub const BATCH_SIZE: usize = 20;

/// Paginated read access to a playlist's items.
pub trait TrackSource {
    fn playlist_items(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<PlaylistItem>, Error>> + Send;
}

/// Batched write access to a playlist.
pub trait TrackSink {
    fn add_tracks(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Outcome of the batched write phase. `attempted` counts every chunk the
/// loop issued; `succeeded` only those the API accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
}

/// Aggregates the track ids of the given playlists, in playlist order and
/// track-within-playlist order.
///
/// Each playlist is paged with an offset cursor of `page_size` items;
/// paging stops once a page comes back with fewer items than requested,
/// so a playlist whose length is an exact multiple of the page size costs
/// one extra probe request. Items without an underlying track contribute
/// nothing. The first failed page aborts the whole aggregation.
pub async fn collect_tracks<S: TrackSource>(
    source: &S,
    playlist_ids: &[String],
    page_size: usize,
) -> Result<Vec<String>, Error> {
    let mut all_tracks = Vec::new();

    for playlist_id in playlist_ids {
        let mut offset = 0;
        loop {
            let items = source.playlist_items(playlist_id, offset, page_size).await?;
            let count = items.len();

            all_tracks.extend(
                items
                    .into_iter()
                    .filter_map(|item| item.track.and_then(|track| track.id)),
            );

            if count < page_size {
                break;
            }
            offset += page_size;
        }
    }

    Ok(all_tracks)
}

/// Writes `track_ids` to the playlist in consecutive chunks of at most
/// `batch_size`, in order.
///
/// Best-effort by design: a failed chunk is logged and the loop moves on
/// to the next one, so a partial playlist is still produced. The report
/// carries both the attempted and the verified-successful chunk counts.
pub async fn push_in_batches<S: TrackSink>(
    sink: &S,
    playlist_id: &str,
    track_ids: &[String],
    batch_size: usize,
) -> BatchReport {
    let mut report = BatchReport {
        attempted: 0,
        succeeded: 0,
    };

    for chunk in track_ids.chunks(batch_size) {
        report.attempted += 1;
        match sink.add_tracks(playlist_id, chunk).await {
            Ok(()) => report.succeeded += 1,
            Err(e) => warning!("Failed to add a batch of {} tracks: {}", chunk.len(), e),
        }
    }

    report
}
