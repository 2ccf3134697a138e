#[macro_export]
macro_rules! json_funcs {
    ( $( ( $method:ident, $func_name:ident, $url:literal $(, $arg:ident : $ty:ty )* ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[$method($url)]
                async fn $func_name(
                    ctx: web::Data<AppContext>,
                    $( $arg: $ty ),*
                ) -> Result<HttpResponse, ApiError> {
                    let response = [<$func_name _impl>](ctx, $( $arg ),*).await?;
                    Ok(HttpResponse::Ok().json(response))
                }
            }
        )+
    };
}

use actix_web::web;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};

use crate::error::ApiError;

const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date_str<S: AsRef<str>>(s: S) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(s.as_ref().trim(), DATE_FMT)
        .map_err(|_| ApiError::validation("Date must be formatted as YYYY-MM-DD"))
}

pub fn format_date_str(date: &NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(u64),
    Text(String),
}

/// Accepts an id as a JSON number or a numeric string; an empty string means
/// the id was not given. Form selects post strings, API clients post numbers.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IdValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IdValue::Number(id)) => Ok(Some(id)),
        Some(IdValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse()
                    .map(Some)
                    .map_err(|_| de::Error::custom(format!("'{}' is not a valid id", text)))
            }
        }
    }
}

/// Malformed JSON bodies answer with the same error shape as the handlers.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::Validation(err.to_string()).into())
}
