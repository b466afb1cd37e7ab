//! Feed assembly
//!
//! Turns catalog rows into playable [`Track`]s: one catalog query, one batched
//! profile lookup for the distinct uploaders, then a row-to-track mapping that
//! credits each track to its uploader's display name.

use crate::error::Result;
use crate::traits::{ProfileDirectory, TrackCatalog};
use crate::types::{AudioStoryRow, Track, TrackQuery, UserId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Artist shown when the uploader has no resolvable profile name
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Fetch the feed for `query` and resolve artist names
///
/// A failed profile lookup degrades to [`UNKNOWN_ARTIST`] for every track
/// rather than failing the feed; a failed catalog query is returned as is.
pub async fn load_feed<C, P>(catalog: &C, profiles: &P, query: &TrackQuery) -> Result<Vec<Track>>
where
    C: TrackCatalog + ?Sized,
    P: ProfileDirectory + ?Sized,
{
    let rows = catalog.fetch_tracks(query).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let uploaders = distinct_uploaders(&rows);
    let names = match profiles.fetch_profile_names(&uploaders).await {
        Ok(names) => names,
        Err(e) => {
            warn!("Profile lookup failed, using placeholder artists: {}", e);
            HashMap::new()
        }
    };

    debug!(
        "Loaded feed: {} tracks from {} uploaders",
        rows.len(),
        uploaders.len()
    );
    Ok(build_tracks(rows, &names))
}

/// Map rows to tracks using the resolved uploader names
pub fn build_tracks(rows: Vec<AudioStoryRow>, names: &HashMap<UserId, String>) -> Vec<Track> {
    rows.into_iter()
        .map(|row| {
            let artist = names
                .get(&row.uploaded_by)
                .filter(|name| !name.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
            row.into_track(artist)
        })
        .collect()
}

/// Distinct uploader ids in first-seen order
pub fn distinct_uploaders(rows: &[AudioStoryRow]) -> Vec<UserId> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(&row.uploaded_by))
        .map(|row| row.uploaded_by.clone())
        .collect()
}

/// Randomly permuted copy of `tracks` (shuffle page ordering)
pub fn shuffled(tracks: &[Track]) -> Vec<Track> {
    shuffled_with(tracks, &mut rand::thread_rng())
}

/// [`shuffled`] with a caller-supplied RNG
pub fn shuffled_with<R: Rng + ?Sized>(tracks: &[Track], rng: &mut R) -> Vec<Track> {
    let mut out = tracks.to_vec();
    out.shuffle(rng);
    out
}
