use shared::{WeekBucketDto, WeekListResponse};

use crate::backend::domain::models::WeekBucket;

pub struct WeekMapper;

impl WeekMapper {
    /// Convert a bucket and its position in the window to a DTO
    pub fn to_dto(index: usize, bucket: &WeekBucket) -> WeekBucketDto {
        WeekBucketDto {
            index,
            start_date: bucket.start_date.format("%Y-%m-%d").to_string(),
            end_date: bucket.end_date.format("%Y-%m-%d").to_string(),
            label: bucket.label.clone(),
            selected: bucket.selected,
        }
    }

    pub fn to_week_list_response(buckets: &[WeekBucket]) -> WeekListResponse {
        WeekListResponse {
            weeks: buckets
                .iter()
                .enumerate()
                .map(|(index, bucket)| Self::to_dto(index, bucket))
                .collect(),
        }
    }
}
