use super::{ComputedProperty, Property, PropertyLike, PropertySubscriber, ViewModel};
use crate::config::Config;
use crate::controls::{
    BackAction, ControlsDeriver, ControlsSettings, DerivedControlsState, OverlayVisibility,
    SideSheet, TopBarState, handle_back,
};
use crate::models::{SourceDataState, SourceLink};
use crate::player::{
    PlayerSnapshot, PlayerStateProvider, SeekMultiplier, SourceStateProvider,
    seek_target_with_step,
};
use crate::ui::PlaybackNavigator;
use crate::utils::errors::Result;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// State behind the television playback-controls overlay.
///
/// Inputs are plain [`Property`] values fed from the player and source
/// providers or from user actions; the overlay reads the two computed
/// properties, which recompute whenever an input changes.
pub struct PlaybackControlsViewModel {
    player: Arc<dyn PlayerStateProvider>,
    sources: Arc<dyn SourceStateProvider>,
    settings: ControlsSettings,
    poll_interval: Duration,
    snapshot: Property<PlayerSnapshot>,
    source_state: Property<SourceDataState>,
    servers: Property<Vec<SourceLink>>,
    selected_server: Property<i32>,
    seek_multiplier: Property<SeekMultiplier>,
    controls_visible: Property<bool>,
    side_sheet: Property<Option<SideSheet>>,
    top_bar: Property<TopBarState>,
    navigator: Option<Arc<dyn PlaybackNavigator>>,
    deriver: Arc<Mutex<ControlsDeriver>>,
    derived: ComputedProperty<DerivedControlsState>,
    visibility: ComputedProperty<OverlayVisibility>,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PlaybackControlsViewModel {
    /// Must be called inside a tokio runtime: the computed properties spawn their
    /// recompute tasks here. Fails when `config` does not validate.
    pub fn new(
        player: Arc<dyn PlayerStateProvider>,
        sources: Arc<dyn SourceStateProvider>,
        config: &Config,
    ) -> Result<Self> {
        config.validate()?;
        let settings = config.controls_settings();

        let snapshot = Property::new(player.snapshot(), "snapshot");
        let source_state = Property::new(sources.source_state(), "source_state");
        let servers = Property::new(sources.source_links(), "servers");
        let selected_server = Property::new(0, "selected_server");
        let seek_multiplier = Property::new(SeekMultiplier::NONE, "seek_multiplier");
        let controls_visible = Property::new(true, "controls_visible");
        let side_sheet = Property::new(None, "side_sheet");
        let top_bar = Property::new(TopBarState::default(), "top_bar");

        let deriver = Arc::new(Mutex::new(ControlsDeriver::new(settings.clone())?));

        let derived = {
            let (snapshot, source_state, servers, selected_server, seek_multiplier) = (
                snapshot.clone(),
                source_state.clone(),
                servers.clone(),
                selected_server.clone(),
                seek_multiplier.clone(),
            );
            let deriver = deriver.clone();
            let dependencies: Vec<Arc<dyn PropertyLike>> = vec![
                Arc::new(snapshot.clone()),
                Arc::new(source_state.clone()),
                Arc::new(servers.clone()),
                Arc::new(selected_server.clone()),
                Arc::new(seek_multiplier.clone()),
            ];

            ComputedProperty::new("derived_state", dependencies, move || {
                lock(&*deriver).derive(
                    &snapshot.get_sync(),
                    seek_multiplier.get_sync(),
                    &source_state.get_sync(),
                    &servers.get_sync(),
                    selected_server.get_sync(),
                )
            })
        };

        let visibility = {
            let derived_state = derived.property();
            let (controls_visible, seek_multiplier, top_bar) = (
                controls_visible.clone(),
                seek_multiplier.clone(),
                top_bar.clone(),
            );
            let dependencies: Vec<Arc<dyn PropertyLike>> = vec![
                Arc::new(derived_state.clone()),
                Arc::new(controls_visible.clone()),
                Arc::new(seek_multiplier.clone()),
                Arc::new(top_bar.clone()),
            ];

            ComputedProperty::new("overlay_visibility", dependencies, move || {
                OverlayVisibility::compute(
                    controls_visible.get_sync(),
                    seek_multiplier.get_sync(),
                    derived_state.get_sync().is_loading,
                    top_bar.get_sync().has_next_episode(),
                )
            })
        };

        Ok(Self {
            player,
            sources,
            settings,
            poll_interval: config.poll_interval(),
            snapshot,
            source_state,
            servers,
            selected_server,
            seek_multiplier,
            controls_visible,
            side_sheet,
            top_bar,
            navigator: None,
            deriver,
            derived,
            visibility,
            poll_handle: Mutex::new(None),
        })
    }

    /// Host that receives the top bar's back and next-episode requests
    pub fn with_navigator(mut self, navigator: Arc<dyn PlaybackNavigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Pull the latest player and source state. Unchanged values do not trigger a recompute.
    pub async fn refresh_from_providers(&self) {
        let snapshot_changed = self.snapshot.set_if_changed(self.player.snapshot()).await;
        let source_changed = self
            .source_state
            .set_if_changed(self.sources.source_state())
            .await;
        let servers_changed = self
            .servers
            .set_if_changed(self.sources.source_links())
            .await;

        if snapshot_changed || source_changed || servers_changed {
            debug!(
                snapshot_changed,
                source_changed, servers_changed, "Controls inputs refreshed"
            );
        }
    }

    /// Refresh from the providers on the configured interval until `dispose()`
    pub fn start_polling(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        let interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let Some(view_model) = weak.upgrade() else {
                    break;
                };
                view_model.refresh_from_providers().await;
            }
        });

        if let Some(previous) = lock(&self.poll_handle).replace(handle) {
            previous.abort();
        }
        debug!(interval_ms = interval.as_millis() as u64, "Started controls polling");
    }

    pub fn is_polling(&self) -> bool {
        lock(&self.poll_handle)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn seek_forward(&self) {
        self.seek_multiplier.update(|m| *m = m.forward()).await;
    }

    pub async fn seek_backward(&self) {
        self.seek_multiplier.update(|m| *m = m.backward()).await;
    }

    pub async fn set_seek_multiplier(&self, multiplier: SeekMultiplier) {
        self.seek_multiplier.set_if_changed(multiplier).await;
    }

    pub async fn cancel_seek(&self) {
        self.seek_multiplier.set_if_changed(SeekMultiplier::NONE).await;
    }

    /// Resolve the queued steps into a position and clear them.
    ///
    /// Returns the position the player should seek to, or `None` when nothing was queued.
    pub async fn commit_seek(&self) -> Option<i64> {
        let multiplier = self.seek_multiplier.get_sync();
        if !multiplier.is_pending() {
            return None;
        }

        let snapshot = self.snapshot.get_sync();
        let target = seek_target_with_step(
            snapshot.position_ms,
            snapshot.duration_ms,
            multiplier,
            self.settings.seek_step_ms,
        );
        self.seek_multiplier.set(SeekMultiplier::NONE).await;

        info!(
            steps = multiplier.value(),
            from_ms = snapshot.position_ms,
            to_ms = target,
            "Committing seek"
        );
        Some(target)
    }

    pub async fn show_controls(&self, visible: bool) {
        self.controls_visible.set_if_changed(visible).await;
    }

    /// Back press while the player is in front
    pub async fn handle_back(&self) -> BackAction {
        let action = handle_back(self.controls_visible.get_sync());
        if action == BackAction::ShowControls {
            self.show_controls(true).await;
        }
        action
    }

    /// Opening a side panel hides the controls behind it
    pub async fn open_side_sheet(&self, sheet: SideSheet) {
        self.show_controls(false).await;
        self.side_sheet.set_if_changed(Some(sheet)).await;
        debug!(?sheet, "Opened side sheet");
    }

    pub async fn dismiss_side_sheet(&self) {
        self.side_sheet.set_if_changed(None).await;
    }

    pub async fn select_server(&self, index: i32) {
        self.selected_server.set_if_changed(index).await;
    }

    /// Title and episode position of what is playing
    pub async fn set_top_bar(&self, top_bar: TopBarState) {
        self.top_bar.set_if_changed(top_bar).await;
    }

    /// Top bar navigation icon. Returns whether a host received the request.
    pub fn navigate_back(&self) -> bool {
        let Some(navigator) = &self.navigator else {
            warn!("Back requested with no navigator attached");
            return false;
        };
        navigator.navigate_back();
        true
    }

    /// Ignored for movies and for the last episode of a show
    pub fn next_episode(&self) -> bool {
        let top_bar = self.top_bar.get_sync();
        if !top_bar.has_next_episode() {
            debug!(title = %top_bar.title, "No next episode to play");
            return false;
        }
        let Some(navigator) = &self.navigator else {
            warn!("Next episode requested with no navigator attached");
            return false;
        };
        info!(title = %top_bar.title, "Requesting next episode");
        navigator.play_next_episode();
        true
    }

    pub fn derived_state(&self) -> DerivedControlsState {
        self.derived.get_sync()
    }

    pub fn overlay_visibility(&self) -> OverlayVisibility {
        self.visibility.get_sync()
    }

    pub fn seek_multiplier(&self) -> SeekMultiplier {
        self.seek_multiplier.get_sync()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible.get_sync()
    }

    pub fn side_sheet(&self) -> Option<SideSheet> {
        self.side_sheet.get_sync()
    }

    pub fn top_bar(&self) -> TopBarState {
        self.top_bar.get_sync()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.snapshot.get_sync()
    }

    /// How many times the derived state was actually recomputed
    pub fn derivation_count(&self) -> u64 {
        lock(&*self.deriver).recomputations()
    }
}

#[async_trait::async_trait]
impl ViewModel for PlaybackControlsViewModel {
    async fn initialize(&self) {
        self.refresh_from_providers().await;
    }

    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber> {
        match property_name {
            "snapshot" => Some(self.snapshot.subscribe()),
            "source_state" => Some(self.source_state.subscribe()),
            "servers" => Some(self.servers.subscribe()),
            "selected_server" => Some(self.selected_server.subscribe()),
            "seek_multiplier" => Some(self.seek_multiplier.subscribe()),
            "controls_visible" => Some(self.controls_visible.subscribe()),
            "side_sheet" => Some(self.side_sheet.subscribe()),
            "top_bar" => Some(self.top_bar.subscribe()),
            "derived_state" => Some(self.derived.subscribe()),
            "overlay_visibility" => Some(self.visibility.subscribe()),
            _ => None,
        }
    }

    async fn refresh(&self) {
        self.refresh_from_providers().await;
    }

    fn dispose(&self) {
        if let Some(handle) = lock(&self.poll_handle).take() {
            handle.abort();
            debug!("Stopped controls polling");
        }
    }
}

impl std::fmt::Debug for PlaybackControlsViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackControlsViewModel")
            .field("settings", &self.settings)
            .field("seek_multiplier", &self.seek_multiplier.get_sync())
            .field("controls_visible", &self.controls_visible.get_sync())
            .finish_non_exhaustive()
    }
}
