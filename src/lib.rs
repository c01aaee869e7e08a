pub mod config; // 计数配置参数
pub mod counting; // 计数核心
pub mod detection; // 跟踪输入契约
pub mod input; // 跟踪结果读取
pub mod pipeline; // 读取+计数双线程流水线
pub mod report; // 逐帧报告输出

pub use crate::config::{Args, CounterConfig};
pub use crate::counting::{
    classify, CrossingEvent, FrameSummary, Location, SpatialBand, WindowAggregator, Zone,
    ZoneCounter,
};
pub use crate::detection::{BBox, Point, TrackRecord, TrackedFrame};
pub use crate::input::{FrameSource, JsonLinesSource, ReplaySource};
pub use crate::pipeline::{RunSummary, StopHandle, StopReason};
pub use crate::report::{FrameReport, JsonLinesSink, LogSink, MemorySink, ReportSink};
