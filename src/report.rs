//! 计数结果输出
//! Per-frame report contract toward the reporting layer

use crate::counting::{FrameSummary, WindowCounts};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// 窗口结算信息
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowReport {
    /// 结算时间 (RFC 3339)
    pub timestamp: String,
    pub inflow: usize,
    pub outflow: usize,
}

impl WindowReport {
    pub fn now(counts: &WindowCounts) -> Self {
        Self {
            timestamp: chrono::Local::now().to_rfc3339(),
            inflow: counts.inflow,
            outflow: counts.outflow,
        }
    }
}

/// 单帧报告 (计数线程 → 输出)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame_index: u64,
    /// 本帧有效实体数量
    pub current_count: usize,
    /// 最近窗口进入数量 (仅在窗口结算时更新)
    pub inflow_count: usize,
    /// 最近窗口离开数量 (仅在窗口结算时更新)
    pub outflow_count: usize,
    /// 平滑处理帧率 (仅供展示)
    pub fps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowReport>,
}

impl FrameReport {
    pub fn from_summary(summary: &FrameSummary, fps: f64) -> Self {
        Self {
            frame_index: summary.frame_index,
            current_count: summary.current_count,
            inflow_count: summary.inflow_count,
            outflow_count: summary.outflow_count,
            fps,
            window: summary.window.as_ref().map(WindowReport::now),
        }
    }
}

/// 报告输出接口
pub trait ReportSink {
    fn emit(&mut self, report: &FrameReport) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit(&mut self, report: &FrameReport) -> Result<()> {
        (**self).emit(report)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// 多路输出
impl<S: ReportSink> ReportSink for Vec<S> {
    fn emit(&mut self, report: &FrameReport) -> Result<()> {
        self.iter_mut().try_for_each(|s| s.emit(report))
    }

    fn flush(&mut self) -> Result<()> {
        self.iter_mut().try_for_each(|s| s.flush())
    }
}

/// 每帧一行 JSON
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("创建输出文件失败: {}", path.display()))?;
        info!("📤 逐帧报告输出: {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn emit(&mut self, report: &FrameReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, report).context("序列化报告失败")?;
        self.writer.write_all(b"\n").context("写入报告失败")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("刷新输出失败")
    }
}

/// 日志输出 (窗口结算时 info,逐帧 debug)
#[derive(Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn emit(&mut self, report: &FrameReport) -> Result<()> {
        if let Some(w) = &report.window {
            info!(
                "📊 [帧{}] 进入: {} | 离开: {} | 当前: {} | FPS: {:.2}",
                report.frame_index, w.inflow, w.outflow, report.current_count, report.fps
            );
        } else {
            debug!(
                frame = report.frame_index,
                count = report.current_count,
                fps = report.fps,
                "帧报告"
            );
        }
        Ok(())
    }
}

/// 内存收集
#[derive(Default)]
pub struct MemorySink {
    pub reports: Vec<FrameReport>,
}

impl ReportSink for MemorySink {
    fn emit(&mut self, report: &FrameReport) -> Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}
