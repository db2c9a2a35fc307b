pub mod like_button;
pub mod nav;
pub mod pagination;
pub mod post_card;
pub mod search_box;
pub mod share_menu;
pub mod stat_card;
pub mod toast;
pub mod traffic_chart;
