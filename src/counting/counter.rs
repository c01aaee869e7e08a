//! 帧级计数核心
//! Frame-level driver of the counting core: filter → classify → step → aggregate

use super::aggregator::{WindowAggregator, WindowCounts};
use super::crossing::{CrossingEvent, CrossingRegistry, Location};
use super::geometry::Zone;
use crate::config::CounterConfig;
use crate::detection::{countable_entities, TrackedFrame};
use tracing::{debug, info};

/// 单帧处理结果
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    /// 帧号 (从1开始)
    pub frame_index: u64,
    /// 本帧通过过滤的实体数量
    pub current_count: usize,
    /// 最近一个窗口的进入数量
    pub inflow_count: usize,
    /// 最近一个窗口的离开数量
    pub outflow_count: usize,
    /// 本帧产生的事件 (id, 事件)
    pub events: Vec<(u64, CrossingEvent)>,
    /// 本帧结算的窗口
    pub window: Option<WindowCounts>,
    /// 本帧清除的过期实体数量
    pub evicted: usize,
}

/// 区域进出计数器
pub struct ZoneCounter {
    zone: Zone,
    registry: CrossingRegistry,
    aggregator: WindowAggregator,
    max_frames_since_update: u32,
    frame_count: u64,
}

impl ZoneCounter {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            zone: config.zone(),
            registry: CrossingRegistry::new(config.eviction_frames),
            aggregator: WindowAggregator::new(config.window_size),
            max_frames_since_update: config.max_frames_since_update,
            frame_count: 0,
        }
    }

    /// 处理一帧跟踪结果
    ///
    /// 空帧同样推进帧计数
    pub fn process_frame(&mut self, frame: &TrackedFrame) -> FrameSummary {
        self.frame_count += 1;
        let frame_index = self.frame_count;

        if let (Some(w), Some(h)) = (frame.width, frame.height) {
            if w as f32 != self.zone.frame_width || h as f32 != self.zone.frame_height {
                info!("📐 帧尺寸变化: {}x{}", w, h);
                self.zone = self.zone.resized(w as f32, h as f32);
            }
        }

        let mut current_count = 0;
        let mut events = Vec::new();
        for entity in countable_entities(frame, self.max_frames_since_update) {
            current_count += 1;
            let band = self.zone.classify(entity.position);
            if let Some(event) = self.registry.observe(entity.id, band, frame_index) {
                debug!(id = entity.id, ?event, frame_index, "越界事件");
                self.aggregator.record(entity.id, event);
                events.push((entity.id, event));
            }
        }

        let evicted = self.registry.evict_stale(frame_index);
        if evicted > 0 {
            debug!(evicted, frame_index, "清除过期实体");
        }

        let window = self.aggregator.observe(frame_index);
        if let Some(w) = &window {
            debug!(
                frame_index,
                inflow = w.inflow,
                outflow = w.outflow,
                "窗口结算"
            );
        }

        FrameSummary {
            frame_index,
            current_count,
            inflow_count: self.aggregator.inflow_count(),
            outflow_count: self.aggregator.outflow_count(),
            events,
            window,
            evicted,
        }
    }

    /// 重置全部状态 (实体状态、窗口、帧计数)
    pub fn reset(&mut self) {
        self.registry.clear();
        self.aggregator.reset();
        self.frame_count = 0;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn location(&self, id: u64) -> Option<Location> {
        self.registry.location(id)
    }

    pub fn tracked_entities(&self) -> usize {
        self.registry.len()
    }

    pub fn aggregator(&self) -> &WindowAggregator {
        &self.aggregator
    }
}
