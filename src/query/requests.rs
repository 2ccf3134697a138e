use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::appointments::{AppointmentFilter, DateRange},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DateFilter {
    Today,
    Tomorrow,
    /// Today through seven days from now.
    Week,
}

impl DateFilter {
    pub fn range(self, today: NaiveDate) -> DateRange {
        match self {
            DateFilter::Today => DateRange::day(today),
            DateFilter::Tomorrow => DateRange::day(today + Duration::days(1)),
            DateFilter::Week => DateRange {
                from: today,
                to: today + Duration::days(7),
            },
        }
    }
}

impl FromStr for DateFilter {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateFilter::Today),
            "tomorrow" => Ok(DateFilter::Tomorrow),
            "week" => Ok(DateFilter::Week),
            _ => Err(ApiError::validation(
                "dateFilter must be one of: today, tomorrow, week",
            )),
        }
    }
}

#[derive(Deserialize)]
pub struct AppointmentsRequest {
    #[serde(default, deserialize_with = "crate::utils::deserialize_optional_id")]
    pub department: Option<u64>,
    pub date: Option<String>,
    #[serde(rename = "dateFilter")]
    pub date_filter: Option<String>,
}

impl AppointmentsRequest {
    /// An explicit `date` wins over `dateFilter`; blank values count as absent.
    pub fn into_filter(self, today: NaiveDate) -> Result<AppointmentFilter, ApiError> {
        let date = self.date.filter(|date| !date.trim().is_empty());
        let date_filter = self.date_filter.filter(|filter| !filter.trim().is_empty());

        let dates = match (date, date_filter) {
            (Some(date), _) => Some(DateRange::day(crate::utils::parse_date_str(date)?)),
            (None, Some(filter)) => Some(filter.trim().parse::<DateFilter>()?.range(today)),
            (None, None) => None,
        };

        Ok(AppointmentFilter {
            department_id: self.department,
            dates,
        })
    }
}

#[derive(Deserialize)]
pub struct DentistsRequest {
    #[serde(default, deserialize_with = "crate::utils::deserialize_optional_id")]
    pub department: Option<u64>,
}
