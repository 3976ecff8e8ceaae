/// Cluster node status records

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStage {
    Waiting,
    Running,
    Loading,
    Stopped,
}

impl NodeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStage::Waiting => "WAITING",
            NodeStage::Running => "RUNNING",
            NodeStage::Loading => "LOADING",
            NodeStage::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for NodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterNode {
    pub id: u32,
    pub ip_address: String,
    pub cluster_id: String,
    pub stage: NodeStage,
}

impl ClusterNode {
    fn new(id: u32, ip_address: &str, cluster_id: &str, stage: NodeStage) -> Self {
        Self {
            id,
            ip_address: ip_address.to_string(),
            cluster_id: cluster_id.to_string(),
            stage,
        }
    }
}

/// Fixed node listing served by the mock API
pub fn mock_nodes() -> Vec<ClusterNode> {
    vec![
        ClusterNode::new(100, "172.16.0.188", "A1", NodeStage::Waiting),
        ClusterNode::new(101, "172.16.0.189", "A1", NodeStage::Running),
        ClusterNode::new(102, "172.16.0.186", "A1", NodeStage::Waiting),
        ClusterNode::new(103, "172.16.0.184", "A1", NodeStage::Loading),
        ClusterNode::new(104, "172.16.0.183", "A1", NodeStage::Waiting),
        ClusterNode::new(105, "172.16.0.182", "B1", NodeStage::Stopped),
        ClusterNode::new(106, "172.16.0.181", "B1", NodeStage::Running),
        ClusterNode::new(107, "172.16.0.180", "B1", NodeStage::Loading),
    ]
}

/// Count of nodes per stage, in display order
pub fn stage_counts(nodes: &[ClusterNode]) -> Vec<(NodeStage, usize)> {
    [
        NodeStage::Running,
        NodeStage::Loading,
        NodeStage::Waiting,
        NodeStage::Stopped,
    ]
    .into_iter()
    .map(|stage| (stage, nodes.iter().filter(|n| n.stage == stage).count()))
    .collect()
}
