pub mod artist_list;
pub mod connect_panel;
pub mod error_panel;
pub mod genre_tags;
pub mod header;
pub mod loading_panel;
pub mod radar;
