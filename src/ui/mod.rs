pub mod navigation;

pub use navigation::{
    Category, ChannelNavigator, Genre, NavigationIntent, PlaybackNavigator, SearchScreenNavigator,
};
