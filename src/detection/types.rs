/// 跟踪输入数据结构定义
/// Data structures for the tracker → counter contract
use serde::{Deserialize, Serialize};

// ========== 数据结构 ==========

/// 二维点 (像素坐标)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 跟踪框 (top-left / bottom-right)
///
/// JSON中表示为 `[x1, y1, x2, y2]`
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// 以中心点和尺寸构造
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x1: cx - width / 2.0,
            y1: cy - height / 2.0,
            x2: cx + width / 2.0,
            y2: cy + height / 2.0,
        }
    }

    /// 获取中心点
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// 跟踪记录 (外部跟踪器 → 计数核心)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    /// 跟踪ID (活跃轨迹内唯一)
    pub id: u64,

    /// 当前边界框
    pub bbox: BBox,

    /// 跟踪器是否已确认该轨迹 (缺省视为已确认)
    #[serde(default = "default_confirmed")]
    pub confirmed: bool,

    /// 距上次匹配到检测的帧数
    #[serde(default)]
    pub frames_since_update: u32,
}

fn default_confirmed() -> bool {
    true
}

impl TrackRecord {
    pub fn new(id: u64, bbox: BBox) -> Self {
        Self {
            id,
            bbox,
            confirmed: true,
            frames_since_update: 0,
        }
    }
}

/// 一帧的跟踪结果 (跟踪线程 → 计数线程)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedFrame {
    /// 帧宽 (缺省使用配置值)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// 帧高 (缺省使用配置值)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default)]
    pub tracks: Vec<TrackRecord>,
}

impl TrackedFrame {
    pub fn new(tracks: Vec<TrackRecord>) -> Self {
        Self {
            tracks,
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
