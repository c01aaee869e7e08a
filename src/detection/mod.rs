/// 跟踪输入 (Tracker Input)
///
/// 外部检测+跟踪系统的输出契约
/// - types:   跟踪框、跟踪记录、帧
/// - tracker: 确认/新鲜度过滤,中心点计算
pub mod tracker;
pub mod types;

pub use tracker::{countable_entities, TrackedEntity};
pub use types::{BBox, Point, TrackRecord, TrackedFrame};
