/// 跟踪结果输入 (Track Input)
///
/// 外部跟踪器逐帧输出的读取
/// - FrameSource:     输入源接口
/// - JsonLinesSource: 每行一帧的 JSON Lines 读取器 (文件或标准输入)
pub mod jsonl;

pub use jsonl::JsonLinesSource;

use crate::detection::TrackedFrame;
use anyhow::Result;

/// 逐帧输入源
///
/// - `Ok(Some(frame))`: 读取到一帧
/// - `Ok(None)`:        输入结束
/// - `Err(_)`:          读取失败 (由调用方决定是否重试)
pub trait FrameSource: Send {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>> {
        (**self).next_frame()
    }
}

/// 内存输入源 (按顺序回放预先准备的帧)
pub struct ReplaySource {
    frames: std::vec::IntoIter<Result<TrackedFrame>>,
}

impl ReplaySource {
    pub fn new(frames: Vec<TrackedFrame>) -> Self {
        Self::with_results(frames.into_iter().map(Ok).collect())
    }

    /// 允许混入读取失败
    pub fn with_results(frames: Vec<Result<TrackedFrame>>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>> {
        self.frames.next().transpose()
    }
}
