use playback_controls::{AudioTrack, PlayerSnapshot, SubtitleTrack};

pub struct PlayerSnapshotBuilder {
    snapshot: PlayerSnapshot,
}

impl PlayerSnapshotBuilder {
    /// A 90 minute feature, thirty minutes in
    pub fn movie() -> Self {
        Self {
            snapshot: PlayerSnapshot {
                position_ms: 1_800_000,
                duration_ms: 5_400_000,
                ..Default::default()
            },
        }
    }

    /// A 22 minute episode, five minutes in
    pub fn episode() -> Self {
        Self {
            snapshot: PlayerSnapshot {
                position_ms: 300_000,
                duration_ms: 1_320_000,
                ..Default::default()
            },
        }
    }

    /// A live stream or a source still probing: no duration yet
    pub fn unknown_duration() -> Self {
        Self {
            snapshot: PlayerSnapshot {
                position_ms: 30_000,
                ..Default::default()
            },
        }
    }

    pub fn at(mut self, position_ms: i64) -> Self {
        self.snapshot.position_ms = position_ms;
        self
    }

    pub fn buffering(mut self) -> Self {
        self.snapshot.is_buffering = true;
        self
    }

    pub fn with_subtitles(mut self, languages: &[&str], selected: i32) -> Self {
        self.snapshot.available_subtitles =
            languages.iter().map(|l| SubtitleTrack::new(*l)).collect();
        self.snapshot.selected_subtitle_index = selected;
        self
    }

    pub fn with_audios(mut self, labels: &[&str], selected: i32) -> Self {
        self.snapshot.available_audios = labels.iter().map(|l| AudioTrack::new(*l)).collect();
        self.snapshot.selected_audio_index = selected;
        self
    }

    pub fn build(self) -> PlayerSnapshot {
        self.snapshot
    }
}
