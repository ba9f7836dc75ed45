mod client;
mod models;

use reqwest::StatusCode;

use crate::model::{Booking, BookingId, BookingStatus, TimeSlot};

pub use client::Client;
pub use models::{NewBooking, SlotQuery};

/// Операции сервиса бронирования, которые нужны клиентской форме.
pub trait BookingApi {
    /// Свободное время на дату у мастера для услуги.
    fn available_times(&self, query: &SlotQuery) -> ApiResult<Vec<TimeSlot>>;

    /// Создаёт бронирование.
    fn create_booking(&self, booking: &NewBooking) -> ApiResult<()>;
}

/// Операции сервиса бронирования для админки.
pub trait AdminApi {
    fn list_bookings(&self) -> ApiResult<Vec<Booking>>;

    fn update_status(&self, id: &BookingId, status: BookingStatus) -> ApiResult<()>;

    fn delete_booking(&self, id: &BookingId) -> ApiResult<()>;
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("transport")]
    Transport(#[from] reqwest::Error),

    #[error("deserialize")]
    Deserialize(#[from] serde_json::Error),

    #[error("slot is already taken")]
    Conflict,

    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("got unexpected status {0}")]
    Status(StatusCode),
}
