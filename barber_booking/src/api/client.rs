use std::time::Duration;

use log::debug;
use reqwest::{blocking::RequestBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::model::{Booking, BookingId, BookingStatus, TimeSlot};

use super::{
    models::{ErrorResponse, NewBooking, SlotQuery, StatusUpdateRequest},
    AdminApi, ApiError, ApiResult, BookingApi,
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP клиент сервиса бронирования.
pub struct Client {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Client {
    /// Создаёт новый инстанс клиента для сервиса по указанному адресу.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        // Сервис сам решает сколько ждать, свои таймауты не добавляем.
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Option::<Duration>::None)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn get<R: DeserializeOwned>(&self, api_method: &str) -> ApiResult<R> {
        let body = self.send(self.request(Method::GET, api_method))?;

        Ok(serde_json::from_str(&body)?)
    }

    fn request(&self, http_method: Method, api_method: &str) -> RequestBuilder {
        let url = self.build_url(api_method);

        debug!("Запрос в АПИ: {} {}", http_method, url);
        self.client.request(http_method, url)
    }

    fn send(&self, req: RequestBuilder) -> ApiResult<String> {
        let resp = req.send()?;

        let status = resp.status();
        let body = resp.text()?;

        debug!("Ответ АПИ {}: {}", status, body);

        if !status.is_success() {
            return Err(classify(status, &body));
        }

        Ok(body)
    }

    fn available_times_request(&self, query: &SlotQuery) -> RequestBuilder {
        self.request(Method::GET, "/bookings/available-times")
            .query(query)
    }

    fn build_url(&self, method: &str) -> String {
        format!("{}/api/{}", self.base_url, method.trim_start_matches('/'))
    }
}

/// Превращает неуспешный ответ в ошибку.
fn classify(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::CONFLICT => ApiError::Conflict,
        StatusCode::BAD_REQUEST => match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                details: Some(details),
            }) if !details.is_empty() => ApiError::Validation(details),
            Ok(_) => ApiError::Status(status),
            Err(e) => ApiError::Deserialize(e),
        },
        _ => ApiError::Status(status),
    }
}

impl BookingApi for Client {
    fn available_times(&self, query: &SlotQuery) -> ApiResult<Vec<TimeSlot>> {
        let body = self.send(self.available_times_request(query))?;

        Ok(serde_json::from_str(&body)?)
    }

    fn create_booking(&self, booking: &NewBooking) -> ApiResult<()> {
        debug!("Бронирование {:?}", booking);

        let req = self.request(Method::POST, "/bookings").json(booking);

        self.send(req)?;

        Ok(())
    }
}

impl AdminApi for Client {
    fn list_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.get("/bookings")
    }

    fn update_status(&self, id: &BookingId, status: BookingStatus) -> ApiResult<()> {
        let req = self
            .request(Method::PATCH, &format!("/bookings/{}/status", id))
            .json(&StatusUpdateRequest { status });

        self.send(req)?;

        Ok(())
    }

    fn delete_booking(&self, id: &BookingId) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, &format!("/bookings/{}", id)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Master, Service};

    #[test]
    fn build_url_trims_slashes() {
        let client = Client::new("http://localhost:5000/").unwrap();

        assert_eq!(
            "http://localhost:5000/api/bookings/available-times",
            client.build_url("/bookings/available-times")
        );
    }

    #[test]
    fn available_times_query_string() {
        let client = Client::new("http://localhost:5000").unwrap();
        let query = SlotQuery {
            date: chrono::NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            master: Master::Gegham,
            service: Service::HairBeard,
        };

        let req = client.available_times_request(&query).build().unwrap();

        assert_eq!(
            "http://localhost:5000/api/bookings/available-times?date=2025-06-10&master=gegham&service=hairBeard",
            req.url().as_str()
        );
    }

    #[test]
    fn classify_conflict() {
        assert!(matches!(
            classify(StatusCode::CONFLICT, r#"{"error": "taken"}"#),
            ApiError::Conflict
        ));
        assert!(matches!(
            classify(StatusCode::CONFLICT, "<html>"),
            ApiError::Conflict
        ));
    }

    #[test]
    fn classify_validation_details() {
        let err = classify(
            StatusCode::BAD_REQUEST,
            r#"{"error": "validation", "details": ["phone is invalid", "name is too long"]}"#,
        );

        match err {
            ApiError::Validation(details) => {
                assert_eq!(vec!["phone is invalid", "name is too long"], details)
            }
            e => panic!("unexpected {:?}", e),
        }
    }

    #[test]
    fn classify_bad_request_without_details() {
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, r#"{"error": "bad"}"#),
            ApiError::Status(StatusCode::BAD_REQUEST)
        ));
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, r#"{"details": []}"#),
            ApiError::Status(StatusCode::BAD_REQUEST)
        ));
    }

    #[test]
    fn classify_bad_request_not_json() {
        assert!(matches!(
            classify(StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::Deserialize(_)
        ));
    }

    #[test]
    fn classify_other_status() {
        assert!(matches!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, ""),
            ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }
}
