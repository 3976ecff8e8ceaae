// Screen 1: Graph (live sample chart with hover tooltip)
// Screen 2: Nodes (cluster node table)
//
// dashboard.rs owns the frame (tabs, footer, help overlay) and
// dispatches the body to the active screen.
pub mod dashboard;
pub mod graph;

pub use dashboard::DashboardView;
pub use graph::GraphLayout;
