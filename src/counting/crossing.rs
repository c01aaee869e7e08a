//! 进出状态机
//! Per-entity crossing state machine
//!
//! 每个跟踪ID一份状态,只有跨越整条缓冲带 (Inner ↔ Outer) 才计为一次进出。
//! 落在缓冲带内的抖动不会改变状态。
//!
//! | 状态 \ 区域 | Inner              | Strip     | Outer               |
//! |-------------|--------------------|-----------|---------------------|
//! | Undefined   | Inside             | Undefined | Outside             |
//! | Inside      | Inside             | Inside    | Transient           |
//! | Outside     | Transient          | Outside   | Outside             |
//! | Transient   | Inside + 进入事件  | Transient | Outside + 离开事件  |
//!
//! Transient 只有在到达 Inner 或 Outer 时才会解除;停留在缓冲带内会一直保持 Transient。

use super::geometry::SpatialBand;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// 实体相对监控区域的位置状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Location {
    /// 首次出现前的初始状态
    #[default]
    Undefined,
    Inside,
    Outside,
    /// 已越过边界,等待确认方向
    Transient,
}

/// 进出事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CrossingEvent {
    /// 从外部进入 (inflow)
    Inflow,
    /// 从内部离开 (outflow)
    Outflow,
}

impl Location {
    /// 状态转移
    ///
    /// 触发事件时立即写入目标稳定状态,下一帧不会重复计数
    pub fn step(self, band: SpatialBand) -> (Location, Option<CrossingEvent>) {
        use Location::*;
        use SpatialBand::*;

        match (self, band) {
            (Undefined, Inner) => (Inside, None),
            (Undefined, Outer) => (Outside, None),
            (Undefined, Strip) => (Undefined, None),

            (Inside, Outer) => (Transient, None),
            (Inside, _) => (Inside, None),

            (Outside, Inner) => (Transient, None),
            (Outside, _) => (Outside, None),

            (Transient, Inner) => (Inside, Some(CrossingEvent::Inflow)),
            (Transient, Outer) => (Outside, Some(CrossingEvent::Outflow)),
            (Transient, Strip) => (Transient, None),
        }
    }
}

/// 单个实体的状态记录
#[derive(Debug, Clone, PartialEq)]
pub struct EntityState {
    pub location: Location,
    /// 首次出现的帧号
    pub first_seen: u64,
    /// 最近一次出现的帧号
    pub last_seen: u64,
}

impl EntityState {
    fn new(frame: u64) -> Self {
        Self {
            location: Location::Undefined,
            first_seen: frame,
            last_seen: frame,
        }
    }
}

/// 实体状态表 (按跟踪ID索引,首次出现时创建)
pub struct CrossingRegistry {
    states: HashMap<u64, EntityState>,

    /// 超过该帧数未出现的实体被清除 (0 = 永不清除)
    eviction_frames: u64,
}

impl CrossingRegistry {
    pub fn new(eviction_frames: u64) -> Self {
        Self {
            states: HashMap::new(),
            eviction_frames,
        }
    }

    /// 推进单个实体的状态机
    pub fn observe(&mut self, id: u64, band: SpatialBand, frame: u64) -> Option<CrossingEvent> {
        let state = self
            .states
            .entry(id)
            .or_insert_with(|| EntityState::new(frame));

        let (next, event) = state.location.step(band);
        if next != state.location {
            debug!(id, from = ?state.location, to = ?next, ?band, frame, "状态转移");
        }
        state.location = next;
        state.last_seen = frame;
        event
    }

    /// 清除长时间未出现的实体,返回清除数量
    pub fn evict_stale(&mut self, frame: u64) -> usize {
        if self.eviction_frames == 0 {
            return 0;
        }
        let before = self.states.len();
        let ttl = self.eviction_frames;
        self.states.retain(|&id, s| {
            let keep = frame.saturating_sub(s.last_seen) <= ttl;
            if !keep {
                debug!(
                    id,
                    first_seen = s.first_seen,
                    last_seen = s.last_seen,
                    location = ?s.location,
                    "实体过期"
                );
            }
            keep
        });
        before - self.states.len()
    }

    pub fn location(&self, id: u64) -> Option<Location> {
        self.states.get(&id).map(|s| s.location)
    }

    pub fn get(&self, id: u64) -> Option<&EntityState> {
        self.states.get(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::geometry::SpatialBand::*;

    fn run(bands: &[SpatialBand]) -> (Location, Vec<CrossingEvent>) {
        let mut loc = Location::Undefined;
        let mut events = Vec::new();
        for &b in bands {
            let (next, ev) = loc.step(b);
            loc = next;
            events.extend(ev);
        }
        (loc, events)
    }

    #[test]
    fn test_first_sighting() {
        assert_eq!(Location::Undefined.step(Inner), (Location::Inside, None));
        assert_eq!(Location::Undefined.step(Outer), (Location::Outside, None));
        assert_eq!(Location::Undefined.step(Strip), (Location::Undefined, None));
    }

    #[test]
    fn test_stays_inside() {
        let (loc, events) = run(&[Inner; 100]);
        assert_eq!(loc, Location::Inside);
        assert!(events.is_empty());
    }

    #[test]
    fn test_strip_jitter_is_ignored() {
        let (loc, events) = run(&[Inner, Strip, Inner, Strip, Strip, Inner]);
        assert_eq!(loc, Location::Inside);
        assert!(events.is_empty());

        let (loc, events) = run(&[Outer, Strip, Outer, Strip, Outer]);
        assert_eq!(loc, Location::Outside);
        assert!(events.is_empty());
    }

    #[test]
    fn test_inflow() {
        let (loc, events) = run(&[Outer, Strip, Inner, Inner, Inner]);
        assert_eq!(loc, Location::Inside);
        assert_eq!(events, vec![CrossingEvent::Inflow]);
    }

    #[test]
    fn test_outflow() {
        let (loc, events) = run(&[Inner, Strip, Outer, Outer, Outer]);
        assert_eq!(loc, Location::Outside);
        assert_eq!(events, vec![CrossingEvent::Outflow]);
    }

    #[test]
    fn test_transient_holds_in_strip() {
        let (loc, events) = run(&[Outer, Inner, Strip, Strip, Strip]);
        assert_eq!(loc, Location::Transient);
        assert!(events.is_empty());
    }

    #[test]
    fn test_retreat_resolves_as_outflow() {
        // 刚越过边界就退回外部,按 Transient 所在区域决定方向
        let (loc, events) = run(&[Outer, Inner, Strip, Outer]);
        assert_eq!(loc, Location::Outside);
        assert_eq!(events, vec![CrossingEvent::Outflow]);
    }

    #[test]
    fn test_registry_lazy_create_and_evict() {
        let mut reg = CrossingRegistry::new(5);
        assert!(reg.is_empty());
        assert_eq!(reg.observe(1, Outer, 1), None);
        assert_eq!(reg.observe(2, Inner, 1), None);
        assert_eq!(reg.location(1), Some(Location::Outside));
        assert_eq!(reg.get(2).map(|s| s.first_seen), Some(1));

        reg.observe(2, Inner, 4);
        assert_eq!(reg.evict_stale(6), 0);
        assert_eq!(reg.evict_stale(7), 1);
        assert_eq!(reg.location(1), None);
        assert_eq!(reg.location(2), Some(Location::Inside));
        assert_eq!(reg.evict_stale(10), 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_registry_no_eviction() {
        let mut reg = CrossingRegistry::new(0);
        reg.observe(1, Inner, 1);
        assert_eq!(reg.evict_stale(1_000_000), 0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_registry_events() {
        let mut reg = CrossingRegistry::new(0);
        let events: Vec<_> = [Outer, Strip, Inner, Inner]
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| reg.observe(42, b, i as u64 + 1))
            .collect();
        assert_eq!(events, vec![CrossingEvent::Inflow]);
        assert_eq!(reg.location(42), Some(Location::Inside));
    }
}
