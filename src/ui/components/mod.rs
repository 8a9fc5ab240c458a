pub mod bar_chart;
pub mod menu;
pub mod progress_bar;
pub mod stats_sidebar;
