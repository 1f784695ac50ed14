pub mod components;
pub mod dijkstra;
