pub mod playback_controls_view_model;
pub mod property;

pub use playback_controls_view_model::PlaybackControlsViewModel;
pub use property::{ComputedProperty, Property, PropertyLike, PropertySubscriber};

#[async_trait::async_trait]
pub trait ViewModel: Send + Sync {
    async fn initialize(&self);

    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber>;

    async fn refresh(&self);

    fn dispose(&self);
}
