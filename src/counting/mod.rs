/// 计数核心 (Counting Core)
///
/// 跟踪对象 → 区域分类 → 进出状态机 → 窗口聚合
/// - geometry:   Inner / Strip / Outer 三区域分类
/// - crossing:   每个跟踪ID的进出状态机
/// - aggregator: 按固定帧数结算进出人数
/// - counter:    帧级驱动
pub mod aggregator;
pub mod counter;
pub mod crossing;
pub mod geometry;

pub use aggregator::{WindowAggregator, WindowCounts};
pub use counter::{FrameSummary, ZoneCounter};
pub use crossing::{CrossingEvent, CrossingRegistry, EntityState, Location};
pub use geometry::{classify, Rect, SpatialBand, Zone};
