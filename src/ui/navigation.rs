use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::utils::ControlsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// A browsable catalog row, e.g. "Trending this week"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub can_paginate: bool,
}

/// Requests the search page and the player overlay raise to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationIntent {
    OpenSearchExpanded,
    OpenSeeAll(Category),
    OpenGenre(Genre),
    /// Leave the player
    NavigateBack,
    PlayNextEpisode,
}

/// Navigation requests raised by the search screen.
///
/// Implementations decide how the destination is shown; the caller only states intent.
pub trait SearchScreenNavigator: Send + Sync {
    fn open_search_expanded_screen(&self);

    fn open_see_all_screen(&self, item: Category);

    fn open_genre_screen(&self, genre: Genre);
}

/// Navigation requests raised by the player's top bar
pub trait PlaybackNavigator: Send + Sync {
    fn navigate_back(&self);

    fn play_next_episode(&self);
}

/// Forwards every request to the host as a [`NavigationIntent`]
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: mpsc::UnboundedSender<NavigationIntent>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NavigationIntent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn send(&self, intent: NavigationIntent) -> Result<(), ControlsError> {
        debug!(?intent, "Navigation requested");
        self.sender
            .send(intent)
            .map_err(|e| ControlsError::Navigation(format!("host stopped listening: {:?}", e.0)))
    }

    fn send_or_warn(&self, intent: NavigationIntent) {
        if let Err(e) = self.send(intent) {
            warn!("Dropping navigation request: {}", e);
        }
    }
}

impl SearchScreenNavigator for ChannelNavigator {
    fn open_search_expanded_screen(&self) {
        self.send_or_warn(NavigationIntent::OpenSearchExpanded);
    }

    fn open_see_all_screen(&self, item: Category) {
        self.send_or_warn(NavigationIntent::OpenSeeAll(item));
    }

    fn open_genre_screen(&self, genre: Genre) {
        self.send_or_warn(NavigationIntent::OpenGenre(genre));
    }
}

impl PlaybackNavigator for ChannelNavigator {
    fn navigate_back(&self) {
        self.send_or_warn(NavigationIntent::NavigateBack);
    }

    fn play_next_episode(&self) {
        self.send_or_warn(NavigationIntent::PlayNextEpisode);
    }
}
