/// 计数循环 (CountingLoop)
/// 职责: 接收 SourceEvent → 逐帧计数 → 输出 FrameReport
///
/// 帧严格按顺序处理,上一帧的状态写入完成后才处理下一帧
use super::{FpsMeter, RunSummary, SourceEvent, StopHandle, StopReason};
use crate::counting::ZoneCounter;
use crate::report::{FrameReport, ReportSink};
use anyhow::{bail, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// 检查停止标志的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct CountingLoop {
    counter: ZoneCounter,
    rx: Receiver<SourceEvent>,
    max_frames: Option<u64>,
    stop: StopHandle,
    fps: FpsMeter,
}

impl CountingLoop {
    pub fn new(
        counter: ZoneCounter,
        rx: Receiver<SourceEvent>,
        max_frames: Option<u64>,
        stop: StopHandle,
    ) -> Self {
        Self {
            counter,
            rx,
            max_frames,
            stop,
            fps: FpsMeter::new(),
        }
    }

    pub fn run<S: ReportSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunSummary> {
        info!("🔢 计数线程启动");
        let mut summary = RunSummary::new();

        loop {
            if self.stop.is_stopped() {
                info!("🛑 收到停止信号");
                summary.reason = StopReason::Stopped;
                break;
            }

            let event = match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("⚠️  输入通道已断开");
                    summary.reason = StopReason::Disconnected;
                    break;
                }
            };

            match event {
                SourceEvent::Frame(frame) => {
                    let start = Instant::now();
                    let frame_summary = self.counter.process_frame(&frame);
                    let fps = self.fps.update(start.elapsed());
                    sink.emit(&FrameReport::from_summary(&frame_summary, fps))?;

                    summary.frames += 1;
                    summary.peak_count = summary.peak_count.max(frame_summary.current_count);
                    if let Some(w) = frame_summary.window {
                        summary.windows += 1;
                        summary.total_inflow += w.inflow as u64;
                        summary.total_outflow += w.outflow as u64;
                    }

                    if self.max_frames.is_some_and(|max| summary.frames >= max) {
                        info!("⏹️  已处理 {} 帧,达到上限", summary.frames);
                        summary.reason = StopReason::MaxFrames;
                        break;
                    }
                }
                SourceEvent::End => {
                    summary.reason = StopReason::EndOfStream;
                    break;
                }
                SourceEvent::Failed(msg) => {
                    sink.flush()?;
                    bail!("输入读取失败: {}", msg);
                }
            }
        }

        sink.flush()?;
        Ok(summary)
    }

    pub fn counter(&self) -> &ZoneCounter {
        &self.counter
    }
}
