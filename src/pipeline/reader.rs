/// 读取器 (Reader)
/// 职责: 从输入源逐帧读取跟踪结果 → 发送 SourceEvent
use super::{SourceEvent, StopHandle};
use crate::input::FrameSource;
use crossbeam_channel::Sender;
use std::time::Duration;
use tracing::{error, info, warn};

pub struct Reader<F> {
    source: F,
    tx: Sender<SourceEvent>,
    max_failures: u32,
    retry_delay: Duration,
    stop: StopHandle,

    // 统计
    frames: u64,
    failures: u32,
}

impl<F: FrameSource> Reader<F> {
    pub fn new(
        source: F,
        tx: Sender<SourceEvent>,
        max_failures: u32,
        retry_delay: Duration,
        stop: StopHandle,
    ) -> Self {
        Self {
            source,
            tx,
            max_failures,
            retry_delay,
            stop,
            frames: 0,
            failures: 0,
        }
    }

    pub fn run(&mut self) {
        info!("📥 读取线程启动");

        while !self.stop.is_stopped() {
            match self.source.next_frame() {
                Ok(Some(frame)) => {
                    self.failures = 0;
                    self.frames += 1;
                    if self.tx.send(SourceEvent::Frame(frame)).is_err() {
                        // 计数线程已退出
                        break;
                    }
                }
                Ok(None) => {
                    info!("📭 输入结束,共读取 {} 帧", self.frames);
                    let _ = self.tx.send(SourceEvent::End);
                    break;
                }
                Err(e) => {
                    self.failures += 1;
                    if self.failures >= self.max_failures {
                        error!("❌ 连续 {} 次读取失败,停止: {:#}", self.failures, e);
                        let _ = self.tx.send(SourceEvent::Failed(format!("{:#}", e)));
                        break;
                    }
                    warn!(
                        "⚠️  读取失败 ({}/{}): {:#}",
                        self.failures, self.max_failures, e
                    );
                    std::thread::sleep(self.retry_delay);
                }
            }
        }

        info!("✅ 读取线程退出");
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
