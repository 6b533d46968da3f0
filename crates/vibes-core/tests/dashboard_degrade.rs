//! Degraded-path scenarios: the audio-features fetch failing must never take
//! the dashboard down with it.

use vibes_core::api::{Artist, AudioFeatures, Profile, Track};
use vibes_core::dashboard::{assemble, top_genres};
use vibes_core::ConnectError;

fn profile() -> Profile {
    serde_json::from_str(r#"{"display_name":"listener"}"#).unwrap()
}

fn artists() -> Vec<Artist> {
    serde_json::from_str(
        r#"[
            {"id":"a1","name":"First","genres":["pop","rock"]},
            {"id":"a2","name":"Second","genres":["pop"]}
        ]"#,
    )
    .unwrap()
}

fn tracks() -> Vec<Track> {
    serde_json::from_str(r#"[{"id":"t1","name":"Song","artists":[{"name":"First"}]}]"#).unwrap()
}

#[test]
fn feature_failure_degrades_to_genre_view() {
    let features = Err(ConnectError::Api {
        status: 403,
        message: "Forbidden".to_string(),
    });

    let data = assemble(profile(), artists(), tracks(), features);

    assert!(data.avg_features.is_none());
    assert_eq!(data.display_name.as_deref(), Some("listener"));
    assert_eq!(data.artists.len(), 2);
    assert_eq!(data.tracks.len(), 1);

    // The fallback content is still derivable from what survived.
    let genres = top_genres(&data.artists);
    assert_eq!(genres[0].name, "pop");
    assert_eq!(genres[0].count, 2);
}

#[test]
fn feature_success_yields_averages() {
    let features: Vec<AudioFeatures> =
        serde_json::from_str(r#"[{"energy":0.9,"valence":0.3}]"#).unwrap();

    let data = assemble(profile(), artists(), tracks(), Ok(features));

    let avg = data.avg_features.expect("averages present");
    let energy = avg.iter().find(|(k, _)| *k == "energy").unwrap().1;
    assert!((energy - 0.9).abs() < 1e-12);
}

#[test]
fn empty_feature_list_still_counts_as_averages() {
    // An empty-but-successful fetch renders a zeroed radar, not the genre
    // fallback — only a failed fetch degrades.
    let data = assemble(profile(), artists(), tracks(), Ok(Vec::new()));
    let avg = data.avg_features.expect("averages present");
    assert!(avg.iter().all(|(_, v)| v == 0.0));
}
