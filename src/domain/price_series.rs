//! Daily adjusted-close price series for a single ticker.

use chrono::NaiveDate;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub adj_close: f64,
}

/// Trading-day price history, sorted by date, one point per date.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    date_index: HashMap<NaiveDate, usize>,
}

impl PriceSeries {
    /// Sorts by date. A date supplied twice keeps its last value.
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        let date_index = deduped
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date, i))
            .collect();
        Self {
            points: deduped,
            date_index,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Most recent adjusted close.
    pub fn latest_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.adj_close)
    }

    /// Exact lookup; `None` for dates that are not trading days in the series.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.date_index.get(&date).map(|&i| self.points[i].adj_close)
    }

    /// Last close within `[start, end]`, i.e. the closest trading day at or
    /// before `end` that is not before `start`.
    pub fn last_close_in(&self, start: NaiveDate, end: NaiveDate) -> Option<f64> {
        let upper = self.points.partition_point(|p| p.date <= end);
        self.points[..upper]
            .last()
            .filter(|p| p.date >= start)
            .map(|p| p.adj_close)
    }
}
