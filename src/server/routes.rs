use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::price::parse_iso_date;
use crate::query::{Categories, DEFAULT_WINDOW_DAYS, DateBounds, DateRange, EventFilter, PriceStatistics, QueryEngine};
use crate::server::AppState;
use crate::server::dto::{EventImpactResponse, EventsResponse, HealthResponse, PricesResponse};
use crate::server::error::{ApiError, ApiResult};
use crate::Error;

// Query values arrive as raw strings so that malformed input yields the JSON
// error body instead of axum's plain-text rejection.

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventParams {
    pub category: Option<String>,
    pub impact_level: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImpactParams {
    pub event_date: Option<String>,
    pub window_days: Option<String>,
}

/// Empty strings count as absent
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn optional_date(value: Option<&str>) -> crate::Result<Option<NaiveDate>> {
    present(value).map(parse_iso_date).transpose()
}

fn range_of(start: Option<&str>, end: Option<&str>) -> crate::Result<DateRange> {
    Ok(DateRange::new(optional_date(start)?, optional_date(end)?))
}

impl RangeParams {
    fn range(&self) -> crate::Result<DateRange> {
        range_of(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

impl EventParams {
    fn filter(&self) -> crate::Result<EventFilter> {
        let mut filter = EventFilter::new().with_range(range_of(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )?);
        if let Some(category) = present(self.category.as_deref()) {
            filter = filter.with_category(category);
        }
        if let Some(level) = present(self.impact_level.as_deref()) {
            filter = filter.with_impact_level(level);
        }
        Ok(filter)
    }
}

impl ImpactParams {
    fn event_date(&self) -> crate::Result<NaiveDate> {
        let raw = present(self.event_date.as_deref()).ok_or(Error::MissingParameter("event_date"))?;
        parse_iso_date(raw)
    }

    fn window_days(&self) -> crate::Result<u32> {
        match present(self.window_days.as_deref()) {
            None => Ok(DEFAULT_WINDOW_DAYS),
            Some(raw) => raw
                .parse()
                .map_err(|_| Error::InvalidParameter(format!("window_days must be a non-negative integer, got {raw:?}"))),
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<PricesResponse>> {
    let range = params.range()?;
    let engine = QueryEngine::new(&state.store);
    let rows = engine.filter_prices(range);
    tracing::debug!("Serving {} prices for {}", rows.len(), range);
    Ok(Json(PricesResponse::from(rows)))
}

pub async fn get_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventParams>,
) -> ApiResult<Json<EventsResponse>> {
    let filter = params.filter()?;
    let engine = QueryEngine::new(&state.store);
    Ok(Json(engine.filter_events(&filter).into_iter().collect()))
}

pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeParams>,
) -> ApiResult<Json<PriceStatistics>> {
    let range = params.range()?;
    let engine = QueryEngine::new(&state.store);
    Ok(Json(engine.statistics(range)?))
}

pub async fn get_event_impact(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImpactParams>,
) -> ApiResult<Json<EventImpactResponse>> {
    let event_date = params.event_date()?;
    let window_days = params.window_days()?;

    let engine = QueryEngine::new(&state.store);
    let result = engine.event_impact(event_date, window_days);
    Ok(Json(result.into()))
}

pub async fn get_categories(State(state): State<Arc<AppState>>) -> Json<Categories> {
    Json(QueryEngine::new(&state.store).categories())
}

pub async fn get_date_range(State(state): State<Arc<AppState>>) -> ApiResult<Json<DateBounds>> {
    QueryEngine::new(&state.store)
        .date_range()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no price data loaded".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_params_are_absent() {
        let params = RangeParams {
            start_date: Some("".into()),
            end_date: Some("  ".into()),
        };
        assert!(params.range().unwrap().is_unbounded());
    }

    #[test]
    fn test_impact_params() {
        let params = ImpactParams::default();
        assert!(matches!(params.event_date(), Err(Error::MissingParameter("event_date"))));
        assert_eq!(params.window_days().unwrap(), DEFAULT_WINDOW_DAYS);

        let params = ImpactParams {
            event_date: Some("2020-03-11".into()),
            window_days: Some("-3".into()),
        };
        assert!(params.event_date().is_ok());
        assert!(matches!(params.window_days(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_event_params_build_filter() {
        let params = EventParams {
            category: Some("Geopolitical".into()),
            impact_level: None,
            start_date: Some("2000-01-01".into()),
            end_date: None,
        };
        let filter = params.filter().unwrap();
        assert_eq!(filter.category.as_deref(), Some("Geopolitical"));
        assert_eq!(filter.impact_level, None);
        assert!(filter.range.start.is_some());
        assert!(filter.range.end.is_none());
    }
}
