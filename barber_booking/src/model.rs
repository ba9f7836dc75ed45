use anyhow::anyhow;
use chrono::NaiveDate;
use enum_iterator::all;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{newtype, phone::PhoneDraft};

/// Услуга, которую можно забронировать.
#[derive(
    Serialize,
    Deserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
#[serde(rename_all = "camelCase")]
pub enum Service {
    /// Стрижка.
    #[default]
    #[display(fmt = "haircut")]
    Haircut,

    /// Стрижка и борода.
    #[display(fmt = "hairBeard")]
    HairBeard,

    /// Только борода.
    #[display(fmt = "beard")]
    Beard,
}

impl Service {
    pub fn from_id(id: &str) -> Option<Self> {
        all::<Self>().find(|s| s.to_string() == id)
    }
}

/// Мастер. Пока он один, но форма не должна на это полагаться.
#[derive(
    Serialize,
    Deserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
)]
#[serde(rename_all = "camelCase")]
pub enum Master {
    #[default]
    #[display(fmt = "gegham")]
    Gegham,
}

impl Master {
    pub fn from_id(id: &str) -> Option<Self> {
        all::<Self>().find(|m| m.to_string() == id)
    }
}

/// Статус бронирования в админке.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    enum_iterator::Sequence,
    clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum BookingStatus {
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "confirmed")]
    Confirmed,
    #[display(fmt = "completed")]
    Completed,
    #[display(fmt = "cancelled")]
    Cancelled,
}

newtype!(TimeSlot, time_slot_validate);

fn time_slot_validate(value: &str) -> anyhow::Result<()> {
    let re = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$")?;
    if !re.is_match(value) {
        return Err(anyhow!("should be in HH:MM format, got \"{}\"", value));
    }

    Ok(())
}

newtype!(BookingId, booking_id_validate);

fn booking_id_validate(value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("shouldn't be empty"));
    }

    Ok(())
}

/// Данные пользователя, которые может передать приложение-хост
/// (например Telegram Web App).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Числовой идентификатор пользователя.
    pub id: i64,

    /// Отображаемое имя.
    pub display_name: String,
}

/// Черновик бронирования, который пользователь заполняет поле за полем.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    pub client_name: String,
    pub service: Service,
    pub master: Master,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub phone: PhoneDraft,
}

/// Запись о бронировании, как её отдаёт сервис.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: BookingId,
    pub client_name: String,
    // Неизвестные идентификаторы услуг и мастеров показываем как есть.
    pub service: String,
    pub master: String,
    pub date: String,
    pub time: String,
    pub phone: String,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! time_slot_tests {
        ($($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, valid) = $value;
                assert_eq!(valid, TimeSlot::new(input).is_ok(), "{}", input);
            }
        )*
        }
    }

    time_slot_tests! {
        time_slot_morning: ("09:00", true),
        time_slot_midnight: ("00:00", true),
        time_slot_last_minute: ("23:59", true),
        time_slot_hour_overflow: ("24:00", false),
        time_slot_minute_overflow: ("10:60", false),
        time_slot_single_digit_hour: ("9:00", false),
        time_slot_with_seconds: ("10:00:00", false),
        time_slot_empty: ("", false),
    }

    #[test]
    fn service_wire_ids() {
        assert_eq!("hairBeard", Service::HairBeard.to_string());
        assert_eq!(
            "\"hairBeard\"",
            serde_json::to_string(&Service::HairBeard).unwrap()
        );
        assert_eq!(Some(Service::Beard), Service::from_id("beard"));
        assert_eq!(None, Service::from_id("manicure"));
    }

    #[test]
    fn master_from_id() {
        assert_eq!(Some(Master::Gegham), Master::from_id("gegham"));
        assert_eq!(None, Master::from_id("armen"));
    }

    #[test]
    fn booking_deserialize() {
        let raw = r#"{
            "_id": "65f0c1",
            "clientName": "Արամ",
            "service": "haircut",
            "master": "gegham",
            "date": "2025-06-10",
            "time": "10:00",
            "phone": "+37491123456",
            "status": "pending",
            "createdAt": "2025-06-09T10:00:00Z"
        }"#;

        let booking: Booking = serde_json::from_str(raw).unwrap();

        assert_eq!(booking.id, "65f0c1");
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.client_name, "Արամ");
    }

    #[test]
    fn time_slots_list_fails_on_malformed_entry() {
        let res: Result<Vec<TimeSlot>, _> = serde_json::from_str(r#"["10:00", "ten"]"#);
        assert!(res.is_err());
    }
}
