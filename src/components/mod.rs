pub mod app;
pub mod topo_plot;
