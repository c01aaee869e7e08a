/// 计数流水线 (Counting Pipeline)
///
/// 双线程架构,通过 crossbeam 通道通信:
/// - Reader:       读取跟踪结果 (独立线程)
/// - CountingLoop: 区域分类 + 状态机 + 窗口统计 (调用线程)
pub mod counting;
pub mod reader;

pub use counting::CountingLoop;
pub use reader::Reader;

use crate::config::CounterConfig;
use crate::counting::ZoneCounter;
use crate::detection::TrackedFrame;
use crate::input::FrameSource;
use crate::report::ReportSink;
use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// ========== 通道消息类型定义 ==========

/// 读取线程 → 计数线程
#[derive(Clone, Debug)]
pub enum SourceEvent {
    Frame(TrackedFrame),
    /// 输入结束
    End,
    /// 连续读取失败,终止
    Failed(String),
}

/// 停止原因
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    MaxFrames,
    Stopped,
    Disconnected,
}

/// 运行统计
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    /// 所有已结算窗口的进入数量之和
    pub total_inflow: u64,
    /// 所有已结算窗口的离开数量之和
    pub total_outflow: u64,
    pub windows: u64,
    /// 单帧最大实体数量
    pub peak_count: usize,
    pub reason: StopReason,
}

impl RunSummary {
    fn new() -> Self {
        Self {
            frames: 0,
            total_inflow: 0,
            total_outflow: 0,
            windows: 0,
            peak_count: 0,
            reason: StopReason::EndOfStream,
        }
    }
}

// ========== 停止信号 ==========

/// 跨线程停止标志
#[derive(Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ========== 帧率估计 ==========

/// 平滑帧率: fps = (fps + 1 / 本帧耗时) / 2
#[derive(Clone, Debug, Default)]
pub struct FpsMeter {
    fps: f64,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, latency: Duration) -> f64 {
        let secs = latency.as_secs_f64();
        if secs > 0.0 {
            self.fps = (self.fps + 1.0 / secs) / 2.0;
        }
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

// ========== 启动入口 ==========

/// 启动读取线程并在当前线程运行计数循环
///
/// 只有输入源连续读取失败会返回错误
pub fn run<F, S>(
    source: F,
    config: &CounterConfig,
    sink: &mut S,
    max_frames: Option<u64>,
    stop: StopHandle,
) -> Result<RunSummary>
where
    F: FrameSource + 'static,
    S: ReportSink + ?Sized,
{
    let (tx, rx) = crossbeam_channel::bounded(config.channel_capacity.max(1));

    let mut reader = Reader::new(
        source,
        tx,
        config.max_read_failures,
        Duration::from_millis(config.retry_delay_ms),
        stop.clone(),
    );
    let handle = std::thread::Builder::new()
        .name("track-reader".to_string())
        .spawn(move || reader.run())?;

    let mut counting = CountingLoop::new(ZoneCounter::new(config), rx, max_frames, stop.clone());
    let result = counting.run(sink);

    // 计数循环提前结束时通知读取线程
    stop.stop();
    drop(counting);

    match &result {
        Ok(summary) if summary.reason == StopReason::EndOfStream => {
            handle
                .join()
                .map_err(|_| anyhow!("读取线程异常退出"))?;
        }
        Err(_) => {
            let _ = handle.join();
        }
        // 读取线程可能阻塞在输入上,不等待
        _ => {}
    }

    if let Ok(summary) = &result {
        info!(
            "✅ 处理完成: {} 帧 | {} 个窗口 | 累计进入 {} | 累计离开 {} | 峰值 {} ({:?})",
            summary.frames,
            summary.windows,
            summary.total_inflow,
            summary.total_outflow,
            summary.peak_count,
            summary.reason
        );
    }
    result
}
