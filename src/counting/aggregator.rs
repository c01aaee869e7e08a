//! 窗口聚合
//! Windowed inflow/outflow aggregation
//!
//! 每 `window_size` 帧结算一次: 本窗口内进入/离开的不同ID数量成为新的计数,
//! 然后清空两个集合。计数在两次结算之间保持不变。

use super::crossing::CrossingEvent;
use serde::Serialize;
use std::collections::HashSet;

/// 一个窗口的结算结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowCounts {
    /// 结算时的帧号
    pub frame_index: u64,
    pub inflow: usize,
    pub outflow: usize,
}

/// 窗口聚合器
pub struct WindowAggregator {
    window_size: u64,
    inflow: HashSet<u64>,
    outflow: HashSet<u64>,
    inflow_count: usize,
    outflow_count: usize,
    windows_flushed: u64,
}

impl WindowAggregator {
    pub fn new(window_size: u64) -> Self {
        Self {
            window_size,
            inflow: HashSet::new(),
            outflow: HashSet::new(),
            inflow_count: 0,
            outflow_count: 0,
            windows_flushed: 0,
        }
    }

    /// 记录事件 (同一窗口内重复的ID只计一次)
    pub fn record(&mut self, id: u64, event: CrossingEvent) {
        match event {
            CrossingEvent::Inflow => self.inflow.insert(id),
            CrossingEvent::Outflow => self.outflow.insert(id),
        };
    }

    /// 帧号为窗口长度的正整数倍时结算
    pub fn observe(&mut self, frame_index: u64) -> Option<WindowCounts> {
        if self.window_size == 0 || frame_index == 0 || frame_index % self.window_size != 0 {
            return None;
        }

        self.inflow_count = self.inflow.len();
        self.outflow_count = self.outflow.len();
        self.inflow.clear();
        self.outflow.clear();
        self.windows_flushed += 1;

        Some(WindowCounts {
            frame_index,
            inflow: self.inflow_count,
            outflow: self.outflow_count,
        })
    }

    /// 清空所有状态 (集合与已发布计数)
    pub fn reset(&mut self) {
        self.inflow.clear();
        self.outflow.clear();
        self.inflow_count = 0;
        self.outflow_count = 0;
        self.windows_flushed = 0;
    }

    /// 上一窗口的进入数量
    pub fn inflow_count(&self) -> usize {
        self.inflow_count
    }

    /// 上一窗口的离开数量
    pub fn outflow_count(&self) -> usize {
        self.outflow_count
    }

    /// 当前窗口内尚未结算的 (进入, 离开) 数量
    pub fn pending(&self) -> (usize, usize) {
        (self.inflow.len(), self.outflow.len())
    }

    pub fn windows_flushed(&self) -> u64 {
        self.windows_flushed
    }
}
