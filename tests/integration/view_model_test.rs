#[cfg(test)]
mod view_model_tests {
    use crate::common::{FakePlayer, FakeSources, PlayerSnapshotBuilder, servers, settle};
    use playback_controls::controls::{BackAction, SideSheet, TopBarState};
    use playback_controls::ui::{ChannelNavigator, NavigationIntent};
    use playback_controls::core::ViewModel;
    use playback_controls::{Config, PlaybackControlsViewModel, SeekMultiplier};
    use std::sync::Arc;

    fn build(player: &FakePlayer, sources: &FakeSources) -> PlaybackControlsViewModel {
        PlaybackControlsViewModel::new(
            Arc::new(player.clone()),
            Arc::new(sources.clone()),
            &Config::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_spinner_until_sources_resolve() {
        let player = FakePlayer::new(
            PlayerSnapshotBuilder::movie()
                .with_subtitles(&["en", "fr"], 1)
                .with_audios(&["English", "French"], 1)
                .build(),
        );
        let sources = FakeSources::loading();
        let vm = build(&player, &sources);
        vm.initialize().await;

        let state = vm.derived_state();
        assert!(state.is_loading);
        assert_eq!(state.selected_server_label, "Default Server");
        assert!(vm.overlay_visibility().spinner);

        sources.resolve(servers()).await;
        vm.refresh().await;
        settle().await;

        let state = vm.derived_state();
        assert!(!state.is_loading);
        assert_eq!(state.selected_server_label, "Vidcloud");
        assert_eq!(state.selected_subtitle_label.as_deref(), Some("fr"));
        assert_eq!(state.selected_audio_label.as_deref(), Some("French"));
        assert!(!vm.overlay_visibility().spinner);

        vm.select_server(2).await;
        settle().await;
        assert_eq!(vm.derived_state().selected_server_label, "MixDrop");
    }

    #[tokio::test]
    async fn test_buffering_hidden_while_seeking() {
        let player = FakePlayer::new(PlayerSnapshotBuilder::movie().buffering().build());
        let sources = FakeSources::loading();
        sources.resolve(servers()).await;
        let vm = build(&player, &sources);

        assert!(vm.derived_state().is_loading);

        vm.seek_forward().await;
        settle().await;
        assert!(!vm.derived_state().is_loading);
        assert_eq!(vm.derived_state().seek_label, "+0:30:10");

        let target = vm.commit_seek().await;
        assert_eq!(target, Some(1_810_000));
        settle().await;
        assert!(vm.derived_state().is_loading);
        assert_eq!(vm.derived_state().seek_label, "");
    }

    #[tokio::test]
    async fn test_hidden_controls_and_seek_bar() {
        let player = FakePlayer::new(PlayerSnapshotBuilder::episode().build());
        let sources = FakeSources::loading();
        sources.resolve(servers()).await;
        let vm = build(&player, &sources);

        vm.show_controls(false).await;
        settle().await;
        let hidden = vm.overlay_visibility();
        assert!(!hidden.top_bar);
        assert!(!hidden.bottom_bar);

        vm.seek_forward().await;
        settle().await;
        let seeking = vm.overlay_visibility();
        assert!(!seeking.top_bar);
        assert!(seeking.bottom_bar);
        assert!(seeking.bottom_bar_seeking);
        assert!(seeking.seek_indicator);

        vm.set_seek_multiplier(SeekMultiplier(-2)).await;
        settle().await;
        let rewinding = vm.overlay_visibility();
        assert!(!rewinding.bottom_bar);
        assert!(rewinding.seek_indicator);
        assert_eq!(vm.derived_state().seek_label, "-04:40");

        vm.cancel_seek().await;
        settle().await;
        assert!(!vm.overlay_visibility().seek_indicator);

        assert_eq!(vm.handle_back().await, BackAction::ShowControls);
        settle().await;
        assert!(vm.overlay_visibility().top_bar);
    }

    #[tokio::test]
    async fn test_side_sheet_hides_controls() {
        let player = FakePlayer::new(PlayerSnapshotBuilder::movie().build());
        let sources = FakeSources::loading();
        let vm = build(&player, &sources);

        vm.open_side_sheet(SideSheet::Servers).await;
        settle().await;
        assert_eq!(vm.side_sheet(), Some(SideSheet::Servers));
        assert!(!vm.overlay_visibility().top_bar);

        vm.dismiss_side_sheet().await;
        assert_eq!(vm.side_sheet(), None);
    }

    #[tokio::test]
    async fn test_derived_state_notifies_subscribers() {
        let player = FakePlayer::new(PlayerSnapshotBuilder::movie().build());
        let sources = FakeSources::loading();
        let vm = build(&player, &sources);
        let mut subscriber = vm
            .subscribe_to_property("derived_state")
            .expect("derived_state is observable");

        player
            .state
            .update(|snapshot| snapshot.selected_subtitle_index = 0)
            .await;
        player
            .state
            .update(|snapshot| {
                snapshot.available_subtitles =
                    vec![playback_controls::SubtitleTrack::new("de")];
            })
            .await;
        vm.refresh().await;

        let changed = tokio::time::timeout(
            std::time::Duration::from_millis(200),
            subscriber.wait_for_change(),
        )
        .await
        .expect("derived state should change within timeout");
        assert!(changed);
        assert_eq!(vm.derived_state().selected_subtitle_label.as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_episode_top_bar_flow() {
        let player = FakePlayer::new(PlayerSnapshotBuilder::episode().build());
        let sources = FakeSources::loading();
        sources.resolve(servers()).await;
        let (navigator, mut receiver) = ChannelNavigator::new();
        let vm = build(&player, &sources).with_navigator(Arc::new(navigator));

        vm.set_top_bar(TopBarState::episode("Severance S02E04", false))
            .await;
        settle().await;
        assert!(vm.overlay_visibility().show_next_episode);
        assert!(vm.next_episode());

        vm.set_top_bar(TopBarState::episode("Severance S02E10", true))
            .await;
        settle().await;
        assert!(!vm.overlay_visibility().show_next_episode);
        assert!(!vm.next_episode());

        assert!(vm.navigate_back());
        assert_eq!(receiver.recv().await, Some(NavigationIntent::PlayNextEpisode));
        assert_eq!(receiver.recv().await, Some(NavigationIntent::NavigateBack));
    }
}
