pub mod card;
pub mod stats_view;
pub mod toggle_list;
