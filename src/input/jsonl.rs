/// JSON Lines 跟踪结果读取器
///
/// 每行一帧:
/// `{"width":640,"height":480,"tracks":[{"id":1,"bbox":[10,10,50,90],"confirmed":true,"frames_since_update":0}]}`
use super::FrameSource;
use crate::detection::TrackedFrame;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::info;

pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    line_no: u64,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            line_no: 0,
        }
    }

    /// 已读取的行数
    pub fn line_no(&self) -> u64 {
        self.line_no
    }
}

impl JsonLinesSource<Box<dyn BufRead + Send>> {
    /// 打开文件, `-` 表示标准输入
    pub fn open(path: &str) -> Result<Self> {
        let reader: Box<dyn BufRead + Send> = if path == "-" {
            info!("📥 从标准输入读取跟踪结果");
            Box::new(BufReader::new(io::stdin()))
        } else {
            let file = File::open(Path::new(path))
                .with_context(|| format!("打开输入文件失败: {}", path))?;
            info!("📥 输入文件: {}", path);
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(reader))
    }
}

impl<R: BufRead + Send> FrameSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<TrackedFrame>> {
        loop {
            self.line.clear();
            let n = self
                .reader
                .read_line(&mut self.line)
                .with_context(|| format!("读取第 {} 行失败", self.line_no + 1))?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }
            let frame = serde_json::from_str(text)
                .with_context(|| format!("第 {} 行解析失败", self.line_no))?;
            return Ok(Some(frame));
        }
    }
}
