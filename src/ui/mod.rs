pub mod gesture;
pub mod plot_panel;
