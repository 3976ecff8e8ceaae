pub mod buffer;
pub mod live_view;
pub mod nodes;
pub mod poller;
pub mod resolver;
pub mod sample;
pub mod scale;
pub mod source;

pub use buffer::SampleBuffer;
pub use live_view::{LiveView, PollStats};
pub use nodes::{ClusterNode, NodeStage};
pub use poller::{PollEvent, Poller};
pub use resolver::{nearest_sample, resolve, resolve_at, ZeroValuePolicy};
pub use sample::{Sample, SampleDto};
pub use scale::{TimeScale, ValueScale};
pub use source::{FetchError, HttpSampleSource, NodeClient, SampleSource};
