//! 区域几何分类
//! Geometry classifier: inner region / buffer strip / outer region
//!
//! 监控矩形为帧内缩 `margin` 的矩形,其内侧贴边一条宽 `strip_width` 的缓冲带。
//! 缓冲带以内 (内缩 `margin + strip_width`) 为 Inner,监控矩形以外为 Outer。
//! 所有边界判定均为闭区间,三个区域互不重叠且覆盖整个平面。

use crate::detection::Point;
use serde::Serialize;

/// 空间区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpatialBand {
    /// 缓冲带以内 (内缩 `margin + strip_width`,含边界)
    Inner,
    /// 缓冲带 (监控矩形内侧 `strip_width` 像素)
    Strip,
    /// 监控矩形以外
    Outer,
}

/// 轴对齐矩形 (闭区间)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// 帧矩形向内收缩 `inset` 像素 (负值表示向外扩展)
    pub fn inset(width: f32, height: f32, inset: f32) -> Self {
        Self {
            left: inset,
            top: inset,
            right: width - inset,
            bottom: height - inset,
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// 收缩过度时矩形为空
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }
}

/// 区域分类 (纯函数)
pub fn classify(
    point: Point,
    frame_width: f32,
    frame_height: f32,
    margin: f32,
    strip_width: f32,
) -> SpatialBand {
    if !Rect::inset(frame_width, frame_height, margin).contains(point) {
        SpatialBand::Outer
    } else if Rect::inset(frame_width, frame_height, margin + strip_width).contains(point) {
        SpatialBand::Inner
    } else {
        SpatialBand::Strip
    }
}

/// 监控区域 (帧尺寸 + 边距 + 缓冲带宽度)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zone {
    pub frame_width: f32,
    pub frame_height: f32,
    pub margin: f32,
    pub strip_width: f32,
}

impl Zone {
    pub fn new(frame_width: f32, frame_height: f32, margin: f32, strip_width: f32) -> Self {
        Self {
            frame_width,
            frame_height,
            margin,
            strip_width,
        }
    }

    pub fn classify(&self, point: Point) -> SpatialBand {
        classify(
            point,
            self.frame_width,
            self.frame_height,
            self.margin,
            self.strip_width,
        )
    }

    /// 同样的边距,不同的帧尺寸
    pub fn resized(&self, frame_width: f32, frame_height: f32) -> Self {
        Self {
            frame_width,
            frame_height,
            ..*self
        }
    }

    /// 缓冲带内沿 (Inner 区域)
    pub fn inner_rect(&self) -> Rect {
        Rect::inset(
            self.frame_width,
            self.frame_height,
            self.margin + self.strip_width,
        )
    }

    /// 监控矩形 (缓冲带外沿,以外为 Outer)
    pub fn boundary_rect(&self) -> Rect {
        Rect::inset(self.frame_width, self.frame_height, self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> Zone {
        Zone::new(640.0, 480.0, 20.0, 10.0)
    }

    #[test]
    fn test_reference_points() {
        let z = zone();
        assert_eq!(z.classify(Point::new(320.0, 240.0)), SpatialBand::Inner);
        assert_eq!(z.classify(Point::new(25.0, 25.0)), SpatialBand::Strip);
        assert_eq!(z.classify(Point::new(15.0, 15.0)), SpatialBand::Outer);
        assert_eq!(z.classify(Point::new(5.0, 5.0)), SpatialBand::Outer);
        assert_eq!(z.classify(Point::new(635.0, 240.0)), SpatialBand::Outer);
        assert_eq!(z.classify(Point::new(320.0, 455.0)), SpatialBand::Strip);
    }

    #[test]
    fn test_boundaries_inclusive() {
        let z = zone();
        // 监控矩形边界属于 Strip
        assert_eq!(z.classify(Point::new(20.0, 20.0)), SpatialBand::Strip);
        assert_eq!(z.classify(Point::new(620.0, 460.0)), SpatialBand::Strip);
        assert_eq!(z.classify(Point::new(19.99, 240.0)), SpatialBand::Outer);
        // 缓冲带内沿属于 Inner
        assert_eq!(z.classify(Point::new(30.0, 30.0)), SpatialBand::Inner);
        assert_eq!(z.classify(Point::new(610.0, 450.0)), SpatialBand::Inner);
        assert_eq!(z.classify(Point::new(29.99, 240.0)), SpatialBand::Strip);
    }

    #[test]
    fn test_partition_and_determinism() {
        let z = zone();
        let mut counts = [0usize; 3];
        for x in (-20..=660).step_by(5) {
            for y in (-20..=500).step_by(5) {
                let p = Point::new(x as f32, y as f32);
                let band = z.classify(p);
                assert_eq!(band, z.classify(p));
                let in_inner = z.inner_rect().contains(p);
                let in_boundary = z.boundary_rect().contains(p);
                match band {
                    SpatialBand::Inner => {
                        assert!(in_inner && in_boundary);
                        counts[0] += 1;
                    }
                    SpatialBand::Strip => {
                        assert!(!in_inner && in_boundary);
                        counts[1] += 1;
                    }
                    SpatialBand::Outer => {
                        assert!(!in_boundary);
                        counts[2] += 1;
                    }
                }
            }
        }
        assert!(counts.iter().all(|&c| c > 0));
    }

    #[test]
    fn test_degenerate_geometry() {
        // margin + strip_width 超过帧尺寸一半: Inner 为空
        let z = Zone::new(100.0, 80.0, 30.0, 20.0);
        assert!(z.inner_rect().is_empty());
        assert!(!z.boundary_rect().is_empty());
        assert_eq!(z.classify(Point::new(50.0, 40.0)), SpatialBand::Strip);

        // 零边距: 帧内没有 Outer
        let z = Zone::new(100.0, 80.0, 0.0, 10.0);
        assert_eq!(z.classify(Point::new(0.0, 0.0)), SpatialBand::Strip);
        assert_eq!(z.classify(Point::new(-1.0, 0.0)), SpatialBand::Outer);
    }

    #[test]
    fn test_resized_keeps_margins() {
        let z = zone().resized(1280.0, 720.0);
        assert_eq!(z.margin, 20.0);
        assert_eq!(z.classify(Point::new(1240.0, 360.0)), SpatialBand::Inner);
        assert_eq!(z.classify(Point::new(1255.0, 360.0)), SpatialBand::Strip);
    }
}
