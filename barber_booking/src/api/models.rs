use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{BookingStatus, Master, Service, TimeSlot};

/// Ключ запроса свободного времени.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub master: Master,
    pub service: Service,
}

/// Тело запроса на создание бронирования.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub client_name: String,
    pub service: Service,
    pub master: Master,
    pub date: NaiveDate,
    pub time: TimeSlot,
    pub phone: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_chat_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(super) struct StatusUpdateRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub(super) struct ErrorResponse {
    pub details: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_booking_wire_format() {
        let booking = NewBooking {
            client_name: "Արամ".to_owned(),
            service: Service::HairBeard,
            master: Master::Gegham,
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            time: TimeSlot::new("10:00").unwrap(),
            phone: "+37491123456".to_owned(),
            user_chat_id: Some(42),
            telegram_name: Some("Aram".to_owned()),
        };

        let json = serde_json::to_value(&booking).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "clientName": "Արամ",
                "service": "hairBeard",
                "master": "gegham",
                "date": "2025-06-10",
                "time": "10:00",
                "phone": "+37491123456",
                "userChatId": 42,
                "telegramName": "Aram",
            })
        );
    }

    #[test]
    fn new_booking_without_identity() {
        let booking = NewBooking {
            client_name: "Արամ".to_owned(),
            service: Service::Haircut,
            master: Master::Gegham,
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            time: TimeSlot::new("11:00").unwrap(),
            phone: "+37491123456".to_owned(),
            user_chat_id: None,
            telegram_name: None,
        };

        let json = serde_json::to_value(&booking).unwrap();

        assert!(json.get("userChatId").is_none());
        assert!(json.get("telegramName").is_none());
    }
}
