//! 跟踪结果过滤
//! Filtering of tracker output before counting

use super::types::{Point, TrackRecord, TrackedFrame};

/// 跟踪对象 (通过确认与新鲜度过滤后的轨迹)
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedEntity {
    /// 唯一跟踪ID
    pub id: u64,

    /// 计数使用的位置 (边界框中心)
    pub position: Point,
}

impl TrackedEntity {
    pub fn from_record(record: &TrackRecord) -> Self {
        Self {
            id: record.id,
            position: record.bbox.center(),
        }
    }
}

impl TrackRecord {
    /// 已确认且最近更新过 (丢失帧数不超过 `max_frames_since_update`)
    pub fn is_countable(&self, max_frames_since_update: u32) -> bool {
        self.confirmed && self.frames_since_update <= max_frames_since_update
    }
}

/// 提取当前帧中可计数的跟踪对象
///
/// 未确认或已过期的轨迹直接跳过,不是错误
pub fn countable_entities(
    frame: &TrackedFrame,
    max_frames_since_update: u32,
) -> impl Iterator<Item = TrackedEntity> + '_ {
    frame
        .tracks
        .iter()
        .filter(move |t| t.is_countable(max_frames_since_update))
        .map(TrackedEntity::from_record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::BBox;

    fn record(id: u64, confirmed: bool, age: u32) -> TrackRecord {
        TrackRecord {
            id,
            bbox: BBox::new(0.0, 0.0, 10.0, 20.0),
            confirmed,
            frames_since_update: age,
        }
    }

    #[test]
    fn test_filter_unconfirmed_and_stale() {
        let frame = TrackedFrame::new(vec![
            record(1, true, 0),
            record(2, false, 0),
            record(3, true, 1),
            record(4, true, 2),
        ]);
        let ids: Vec<u64> = countable_entities(&frame, 1).map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_position_is_center() {
        let e = TrackedEntity::from_record(&record(9, true, 0));
        assert_eq!(e.position, Point::new(5.0, 10.0));
    }
}
