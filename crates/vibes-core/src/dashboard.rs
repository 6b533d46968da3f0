//! Dashboard aggregation — fetch the listener's profile and top items, then
//! shape them for display.
//!
//! Profile, top artists and top tracks are fetched concurrently and joined;
//! all three are required. Audio features are enhancement, not core content:
//! that fetch is best-effort and any failure degrades to `avg_features: None`,
//! which switches the content view from the radar chart to the genre tally.

use reqwest::Client;
use tracing::warn;

use crate::api::{self, Artist, AudioFeatures, Profile, Track};
use crate::error::ConnectError;

/// The nine radar axes, in drawing order.
pub const FEATURE_LABELS: [&str; 9] = [
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "liveness",
    "loudness",
    "speechiness",
    "tempo",
    "valence",
];

pub const TOP_ARTIST_LIMIT: u32 = 5;
pub const TOP_TRACK_LIMIT: u32 = 50;
/// Maximum ids per audio-features request.
pub const FEATURE_BATCH: usize = 100;
/// How many genres the tally keeps.
pub const GENRE_LIMIT: usize = 15;

/// Per-axis averages, each in [0,1], ordered as `FEATURE_LABELS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureAverages(pub [f64; 9]);

impl FeatureAverages {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LABELS.iter().copied().zip(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub name: String,
    pub count: usize,
}

/// Everything the content view needs, produced fresh each session.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub display_name: Option<String>,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub avg_features: Option<FeatureAverages>,
}

pub async fn load_dashboard(client: &Client, token: &str) -> Result<DashboardData, ConnectError> {
    let (profile, artists, tracks) = tokio::join!(
        api::get_profile(client, token),
        api::get_top_artists(client, token, TOP_ARTIST_LIMIT),
        api::get_top_tracks(client, token, TOP_TRACK_LIMIT),
    );
    let profile = profile?;
    let artists = artists?;
    let tracks = tracks?;

    let ids: Vec<String> = tracks.iter().filter_map(|t| t.id.clone()).collect();
    let features = fetch_all_features(client, token, &ids).await;

    Ok(assemble(profile, artists, tracks, features))
}

/// Fetch audio features in batches of `FEATURE_BATCH`. Any failed batch fails
/// the whole feature set — the caller degrades, it never partially averages.
async fn fetch_all_features(
    client: &Client,
    token: &str,
    ids: &[String],
) -> Result<Vec<AudioFeatures>, ConnectError> {
    let mut all = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(FEATURE_BATCH) {
        all.extend(api::get_audio_features(client, token, chunk).await?);
    }
    Ok(all)
}

/// Combine the joined responses. Separated from the fetch path so the
/// degraded branch is testable without a network.
pub fn assemble(
    profile: Profile,
    artists: Vec<Artist>,
    tracks: Vec<Track>,
    features: Result<Vec<AudioFeatures>, ConnectError>,
) -> DashboardData {
    let avg_features = match features {
        Ok(list) => Some(normalize_features(&list)),
        Err(e) => {
            warn!("audio features unavailable, falling back to genres: {e}");
            None
        }
    };

    DashboardData {
        display_name: profile.display_name,
        artists,
        tracks,
        avg_features,
    }
}

/// Average the nine features across all records.
///
/// The denominator is the number of records processed: a record missing a
/// field contributes 0 to that field's sum but still counts. Loudness and
/// tempo are rescaled per value before summing; the other seven fields are
/// already in [0,1] and pass through.
pub fn normalize_features(list: &[AudioFeatures]) -> FeatureAverages {
    let mut sums = [0.0f64; 9];
    let count = list.len();

    for f in list {
        add_present(&mut sums[0], f.acousticness);
        add_present(&mut sums[1], f.danceability);
        add_present(&mut sums[2], f.energy);
        add_present(&mut sums[3], f.instrumentalness);
        add_present(&mut sums[4], f.liveness);
        add_present(&mut sums[5], f.loudness.map(rescale_loudness));
        add_present(&mut sums[6], f.speechiness);
        add_present(&mut sums[7], f.tempo.map(rescale_tempo));
        add_present(&mut sums[8], f.valence);
    }

    if count == 0 {
        return FeatureAverages([0.0; 9]);
    }
    FeatureAverages(sums.map(|s| s / count as f64))
}

fn add_present(sum: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *sum += v;
    }
}

/// Map raw decibels (-60..0 typical) onto [0,1]; quieter than -60 dB clamps
/// to 0.
pub fn rescale_loudness(db: f64) -> f64 {
    ((db + 60.0) / 60.0).max(0.0)
}

/// Map beats per minute (50..200 useful range) onto [0,1].
pub fn rescale_tempo(bpm: f64) -> f64 {
    ((bpm - 50.0) / 150.0).clamp(0.0, 1.0)
}

/// Tally genre strings across the given artists' genre lists: trimmed,
/// empties dropped, sorted descending by count with first-encounter order
/// breaking ties, truncated to `GENRE_LIMIT`.
pub fn top_genres(artists: &[Artist]) -> Vec<GenreCount> {
    let mut tally: Vec<GenreCount> = Vec::new();

    for artist in artists {
        for genre in &artist.genres {
            let name = genre.trim();
            if name.is_empty() {
                continue;
            }
            match tally.iter_mut().find(|g| g.name == name) {
                Some(entry) => entry.count += 1,
                None => tally.push(GenreCount {
                    name: name.to_string(),
                    count: 1,
                }),
            }
        }
    }

    tally.sort_by(|a, b| b.count.cmp(&a.count));
    tally.truncate(GENRE_LIMIT);
    tally
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist_with_genres(genres: &[&str]) -> Artist {
        let body = format!(
            r#"{{"id":"a","name":"A","genres":[{}]}}"#,
            genres
                .iter()
                .map(|g| format!("\"{g}\""))
                .collect::<Vec<_>>()
                .join(",")
        );
        serde_json::from_str(&body).unwrap()
    }

    fn full_record() -> AudioFeatures {
        AudioFeatures {
            acousticness: Some(0.2),
            danceability: Some(0.4),
            energy: Some(0.6),
            instrumentalness: Some(0.1),
            liveness: Some(0.3),
            loudness: Some(-30.0),
            speechiness: Some(0.05),
            tempo: Some(125.0),
            valence: Some(0.8),
        }
    }

    #[test]
    fn empty_input_averages_to_zero() {
        let avg = normalize_features(&[]);
        assert_eq!(avg.0, [0.0; 9]);
    }

    #[test]
    fn duplicated_records_do_not_shift_the_average() {
        let one = normalize_features(&[full_record()]);
        let many = normalize_features(&vec![full_record(); 7]);
        for (a, b) in one.0.iter().zip(many.0.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn missing_field_still_counts_toward_the_denominator() {
        let mut partial = full_record();
        partial.energy = None;
        let avg = normalize_features(&[full_record(), partial]);
        // energy: (0.6 + 0) / 2 records
        assert!((avg.0[2] - 0.3).abs() < 1e-12);
        // acousticness present in both: unchanged
        assert!((avg.0[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn loudness_rescale_endpoints() {
        assert_eq!(rescale_loudness(-60.0), 0.0);
        assert_eq!(rescale_loudness(0.0), 1.0);
        assert_eq!(rescale_loudness(-120.0), 0.0);
    }

    #[test]
    fn tempo_rescale_endpoints() {
        assert_eq!(rescale_tempo(50.0), 0.0);
        assert_eq!(rescale_tempo(200.0), 1.0);
        assert_eq!(rescale_tempo(300.0), 1.0);
    }

    #[test]
    fn averages_use_rescaled_loudness_and_tempo() {
        let avg = normalize_features(&[full_record()]);
        assert!((avg.0[5] - 0.5).abs() < 1e-12); // -30 dB → 0.5
        assert!((avg.0[7] - 0.5).abs() < 1e-12); // 125 bpm → 0.5
    }

    #[test]
    fn genres_tally_and_order() {
        let artists = vec![
            artist_with_genres(&["pop", "rock"]),
            artist_with_genres(&["pop"]),
        ];
        let genres = top_genres(&artists);
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[0].name, "pop");
        assert_eq!(genres[0].count, 2);
        assert_eq!(genres[1].name, "rock");
        assert_eq!(genres[1].count, 1);
    }

    #[test]
    fn genre_ties_keep_first_encounter_order() {
        let artists = vec![artist_with_genres(&["shoegaze", "ambient", "dub"])];
        let genres = top_genres(&artists);
        let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["shoegaze", "ambient", "dub"]);
    }

    #[test]
    fn genre_list_truncates_to_fifteen() {
        let many: Vec<String> = (0..20).map(|i| format!("genre-{i}")).collect();
        let refs: Vec<&str> = many.iter().map(|s| s.as_str()).collect();
        let artists = vec![artist_with_genres(&refs)];
        assert_eq!(top_genres(&artists).len(), GENRE_LIMIT);
    }

    #[test]
    fn blank_genres_are_dropped() {
        let artists = vec![artist_with_genres(&["  ", "dub", ""])];
        let genres = top_genres(&artists);
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].name, "dub");
    }
}
