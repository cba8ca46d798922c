pub mod animation;
pub mod detail_view;
pub mod loading_button;
pub mod main_view;

pub use detail_view::{DetailMessage, DetailView};
pub use main_view::{MainMessage, MainView};
