//! 计数器配置 - 命令行参数 + JSON文件

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::counting::Zone;

/// 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "区域进出计数 - Zone inflow/outflow counter", long_about = None)]
pub struct Args {
    /// 跟踪结果输入 (JSON Lines, `-` 表示标准输入)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// JSON配置文件 (不存在时以默认值创建)
    #[arg(short, long)]
    pub config: Option<String>,

    /// 逐帧报告输出文件 (JSON Lines)
    #[arg(short, long)]
    pub output: Option<String>,

    /// 监控矩形到帧边缘的距离 (像素)
    #[arg(long)]
    pub margin: Option<f32>,

    /// 缓冲带宽度 (像素)
    #[arg(long)]
    pub strip_width: Option<f32>,

    /// 每个统计窗口的帧数
    #[arg(long)]
    pub window_size: Option<u64>,

    /// 帧宽 (输入未携带尺寸时使用)
    #[arg(long)]
    pub width: Option<u32>,

    /// 帧高 (输入未携带尺寸时使用)
    #[arg(long)]
    pub height: Option<u32>,

    /// 实体状态保留帧数 (0 = 永不清除)
    #[arg(long)]
    pub eviction_frames: Option<u64>,

    /// 处理指定帧数后停止
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// 日志级别 (trace/debug/info/warn/error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// 命令行参数覆盖配置文件
    pub fn apply(&self, config: &mut CounterConfig) {
        if let Some(v) = self.margin {
            config.margin = v;
        }
        if let Some(v) = self.strip_width {
            config.strip_width = v;
        }
        if let Some(v) = self.window_size {
            config.window_size = v;
        }
        if let Some(v) = self.width {
            config.frame_width = v;
        }
        if let Some(v) = self.height {
            config.frame_height = v;
        }
        if let Some(v) = self.eviction_frames {
            config.eviction_frames = v;
        }
    }
}

/// 计数器参数配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    // === 区域参数 ===
    pub margin: f32,       // 监控矩形边距
    pub strip_width: f32,  // 缓冲带宽度 (监控矩形内侧)
    pub frame_width: u32,  // 默认帧宽
    pub frame_height: u32, // 默认帧高

    // === 统计参数 ===
    pub window_size: u64,             // 统计窗口帧数
    pub max_frames_since_update: u32, // 跟踪丢失超过该帧数则跳过
    pub eviction_frames: u64,         // 实体状态保留帧数

    // === 输入参数 ===
    pub max_read_failures: u32,  // 连续读取失败上限
    pub retry_delay_ms: u64,     // 读取失败后重试间隔
    pub channel_capacity: usize, // 读取线程 → 计数线程的队列长度
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            strip_width: 10.0,
            frame_width: 640,
            frame_height: 480,

            window_size: 30,
            max_frames_since_update: 1,
            eviction_frames: 60,

            max_read_failures: 3,
            retry_delay_ms: 100,
            channel_capacity: 8,
        }
    }
}

impl CounterConfig {
    /// 从JSON文件加载配置,文件不存在时写入默认配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("📝 配置文件不存在,创建默认配置: {}", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        info!("✅ 配置已从 {} 加载", path.display());
        Ok(config)
    }

    /// 保存配置到JSON文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        fs::write(path, json).with_context(|| format!("保存配置失败: {}", path.display()))?;
        info!("💾 配置已保存到 {}", path.display());
        Ok(())
    }

    /// 参数检查
    ///
    /// 边距过大导致监控矩形为空不是错误,只给出警告
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            bail!("window_size 必须大于 0");
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            bail!("margin 必须为非负数: {}", self.margin);
        }
        if !self.strip_width.is_finite() || self.strip_width < 0.0 {
            bail!("strip_width 必须为非负数: {}", self.strip_width);
        }
        if self.frame_width == 0 || self.frame_height == 0 {
            bail!(
                "帧尺寸无效: {}x{}",
                self.frame_width,
                self.frame_height
            );
        }
        if self.zone().inner_rect().is_empty() {
            warn!(
                "⚠️  margin + strip_width = {} 超过 {}x{} 的一半,内部区域为空,不会产生进入事件",
                self.margin + self.strip_width,
                self.frame_width,
                self.frame_height
            );
        }
        Ok(())
    }

    /// 默认帧尺寸下的监控区域
    pub fn zone(&self) -> Zone {
        Zone::new(
            self.frame_width as f32,
            self.frame_height as f32,
            self.margin,
            self.strip_width,
        )
    }

    /// 打印当前配置
    pub fn print_summary(&self) {
        info!("🎛️  当前计数配置:");
        info!("  帧尺寸: {}x{}", self.frame_width, self.frame_height);
        info!("  边距: {:.1}  缓冲带: {:.1}", self.margin, self.strip_width);
        let zone = self.zone();
        let boundary = zone.boundary_rect();
        let inner = zone.inner_rect();
        info!(
            "  监控矩形: [{:.0}, {:.0}] x [{:.0}, {:.0}]",
            boundary.left, boundary.right, boundary.top, boundary.bottom
        );
        info!(
            "  内部区域: [{:.0}, {:.0}] x [{:.0}, {:.0}]",
            inner.left, inner.right, inner.top, inner.bottom
        );
        info!("  统计窗口: {} 帧", self.window_size);
        info!("  状态保留: {} 帧", self.eviction_frames);
    }
}
