#[cfg(test)]
mod derivation_tests {
    use crate::common::{PlayerSnapshotBuilder, servers};
    use playback_controls::controls::{
        ControlsSettings, compute_is_loading, compute_seek_label, derive_controls_state,
        resolve_audio_label, resolve_subtitle_label, resolve_track_label,
    };
    use playback_controls::{ControlsDeriver, SeekMultiplier, SourceDataState};

    #[test]
    fn test_ninety_minute_movie_uses_hour_format() {
        let snapshot = PlayerSnapshotBuilder::movie().build();
        let label = compute_seek_label(&snapshot, SeekMultiplier(1));

        assert_eq!(label, "+0:30:10");
        assert_eq!(label.matches(':').count(), 2);
    }

    #[test]
    fn test_episode_uses_minute_format() {
        let snapshot = PlayerSnapshotBuilder::episode().build();
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier(6)), "+06:00");
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier(-6)), "-04:00");
    }

    #[test]
    fn test_label_keeps_format_near_the_start() {
        // Target under an hour, but the media is long: still H:MM:SS
        let snapshot = PlayerSnapshotBuilder::movie().at(20_000).build();
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier(-1)), "-0:00:10");
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier(-9)), "-0:00:00");
    }

    #[test]
    fn test_label_clamps_at_the_end() {
        let snapshot = PlayerSnapshotBuilder::episode().at(1_315_000).build();
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier(3)), "+22:00");
    }

    #[test]
    fn test_unknown_duration() {
        let snapshot = PlayerSnapshotBuilder::unknown_duration().build();
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier(1)), "+00:40");
        assert_eq!(compute_seek_label(&snapshot, SeekMultiplier::NONE), "");
    }

    #[test]
    fn test_subtitle_scenarios() {
        let two = PlayerSnapshotBuilder::movie()
            .with_subtitles(&["en", "fr"], 1)
            .build();
        assert_eq!(resolve_subtitle_label(&two).as_deref(), Some("fr"));

        let none = PlayerSnapshotBuilder::movie().with_subtitles(&[], 0).build();
        assert_eq!(resolve_subtitle_label(&none), None);

        let off = PlayerSnapshotBuilder::movie()
            .with_subtitles(&["en"], -1)
            .build();
        assert_eq!(resolve_subtitle_label(&off), None);
    }

    #[test]
    fn test_audio_label_rules() {
        let single = PlayerSnapshotBuilder::movie().with_audios(&["AAC 2.0"], 0).build();
        assert_eq!(
            resolve_audio_label(&single.available_audios, single.selected_audio_index),
            None
        );
        // The generic resolver has no lone-track rule
        assert_eq!(
            resolve_track_label(&single.available_audios, 0).as_deref(),
            Some("AAC 2.0")
        );

        let dual = PlayerSnapshotBuilder::movie()
            .with_audios(&["English", "Japanese"], 0)
            .build();
        assert_eq!(
            resolve_audio_label(&dual.available_audios, dual.selected_audio_index).as_deref(),
            Some("English")
        );
    }

    #[test]
    fn test_loading_matrix() {
        let steady = PlayerSnapshotBuilder::movie().build();
        let stalled = PlayerSnapshotBuilder::movie().buffering().build();
        let success = SourceDataState::Success(None);

        assert!(!compute_is_loading(&steady, SeekMultiplier::NONE, &success));
        assert!(compute_is_loading(&stalled, SeekMultiplier::NONE, &success));
        assert!(!compute_is_loading(&stalled, SeekMultiplier(4), &success));
        assert!(compute_is_loading(&steady, SeekMultiplier(4), &SourceDataState::Idle));
        assert!(compute_is_loading(
            &stalled,
            SeekMultiplier(-4),
            &SourceDataState::Error("blocked".into())
        ));
    }

    #[test]
    fn test_memoized_and_plain_derivation_agree() {
        let settings = ControlsSettings::default();
        let mut deriver = ControlsDeriver::new(settings.clone()).unwrap();
        let links = servers();
        let snapshots = [
            PlayerSnapshotBuilder::movie()
                .with_subtitles(&["en", "es"], 0)
                .build(),
            PlayerSnapshotBuilder::episode().buffering().build(),
            PlayerSnapshotBuilder::unknown_duration()
                .with_audios(&["Main", "Commentary"], 1)
                .build(),
        ];
        let sources = [
            SourceDataState::Loading,
            SourceDataState::Success(None),
            SourceDataState::Error("timeout".into()),
        ];

        for snapshot in &snapshots {
            for source in &sources {
                for m in [-2, 0, 3] {
                    for server in [-1, 1, 5] {
                        let memoized =
                            deriver.derive(snapshot, SeekMultiplier(m), source, &links, server);
                        let plain = derive_controls_state(
                            snapshot,
                            SeekMultiplier(m),
                            source,
                            &links,
                            server,
                            &settings,
                        )
                        .unwrap();
                        assert_eq!(memoized, plain);
                    }
                }
            }
        }
    }
}
