use log::info;

use crate::{
    api::{AdminApi, ApiError},
    model::{Booking, BookingId, BookingStatus, Master, Service},
    text::{master_name, service_name, status_label, text, Lang, Text},
};

/// Фильтр списка бронирований по статусу.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BookingStatus),
}

impl From<Option<BookingStatus>> for StatusFilter {
    fn from(value: Option<BookingStatus>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl StatusFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => booking.status == *status,
        }
    }

    pub fn label(&self, lang: Lang) -> &'static str {
        match self {
            Self::All => text(lang, Text::All),
            Self::Only(status) => status_label(lang, *status),
        }
    }
}

pub fn filter_bookings(bookings: &[Booking], filter: StatusFilter) -> Vec<&Booking> {
    bookings.iter().filter(|b| filter.matches(b)).collect()
}

/// Действие администратора над бронированием.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, enum_iterator::Sequence)]
pub enum Action {
    #[display(fmt = "confirm")]
    Confirm,
    #[display(fmt = "complete")]
    Complete,
    #[display(fmt = "cancel")]
    Cancel,
}

impl Action {
    /// Статус, в который переводит действие.
    pub fn target(&self) -> BookingStatus {
        match self {
            Self::Confirm => BookingStatus::Confirmed,
            Self::Complete => BookingStatus::Completed,
            Self::Cancel => BookingStatus::Cancelled,
        }
    }

    /// Подпись кнопки действия.
    pub fn label(&self, lang: Lang) -> &'static str {
        let key = match self {
            Self::Confirm => Text::Confirm,
            Self::Complete => Text::Complete,
            Self::Cancel => Text::Cancel,
        };
        text(lang, key)
    }

    pub fn is_allowed_from(&self, status: BookingStatus) -> bool {
        matches!(
            (self, status),
            (Self::Confirm, BookingStatus::Pending)
                | (Self::Complete, BookingStatus::Confirmed)
                | (Self::Cancel, BookingStatus::Pending | BookingStatus::Confirmed)
        )
    }
}

/// Действия, доступные для бронирования в указанном статусе.
pub fn available_actions(status: BookingStatus) -> Vec<Action> {
    enum_iterator::all::<Action>()
        .filter(|a| a.is_allowed_from(status))
        .collect()
}

/// Применяет действие к бронированию из списка.
/// Недопустимый переход отклоняется без запроса к сервису.
pub fn perform(
    api: &dyn AdminApi,
    bookings: &mut [Booking],
    id: &BookingId,
    action: Action,
) -> Result<(), AdminError> {
    let booking = bookings
        .iter_mut()
        .find(|b| &b.id == id)
        .ok_or_else(|| AdminError::NotFound(id.clone()))?;

    if !action.is_allowed_from(booking.status) {
        return Err(AdminError::TransitionNotAllowed {
            action,
            status: booking.status,
        });
    }

    let target = action.target();

    api.update_status(id, target)
        .map_err(AdminError::UpdateStatus)?;

    info!("Бронирование {} переведено в статус {}", id, target);
    booking.status = target;

    Ok(())
}

/// Удаляет бронирование и убирает его из списка.
pub fn delete(api: &dyn AdminApi, bookings: &mut Vec<Booking>, id: &BookingId) -> Result<(), AdminError> {
    api.delete_booking(id).map_err(AdminError::Delete)?;

    info!("Бронирование {} удалено", id);
    bookings.retain(|b| &b.id != id);

    Ok(())
}

/// Рисует таблицу бронирований.
pub fn render_table(bookings: &[&Booking], lang: Lang) -> String {
    if bookings.is_empty() {
        return text(lang, Text::NoBookings).to_owned();
    }

    let header = [
        "ID",
        text(lang, Text::ClientName),
        text(lang, Text::Service),
        text(lang, Text::Master),
        text(lang, Text::Date),
        text(lang, Text::Time),
        text(lang, Text::Phone),
        text(lang, Text::Status),
        text(lang, Text::Actions),
    ]
    .map(str::to_owned);

    let rows: Vec<[String; 9]> = bookings
        .iter()
        .map(|b| {
            let actions = available_actions(b.status)
                .iter()
                .map(|a| a.label(lang))
                .chain(std::iter::once(text(lang, Text::Delete)))
                .collect::<Vec<_>>()
                .join(", ");

            [
                b.id.to_string(),
                b.client_name.clone(),
                Service::from_id(&b.service)
                    .map_or_else(|| b.service.clone(), |s| service_name(lang, s).to_owned()),
                Master::from_id(&b.master)
                    .map_or_else(|| b.master.clone(), |m| master_name(lang, m).to_owned()),
                b.date.clone(),
                b.time.clone(),
                b.phone.clone(),
                status_label(lang, b.status).to_owned(),
                actions,
            ]
        })
        .collect();

    let mut widths = header.clone().map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("booking {0} not found")]
    NotFound(BookingId),

    #[error("can't {action} booking in status {status}")]
    TransitionNotAllowed {
        action: Action,
        status: BookingStatus,
    },

    #[error("update status")]
    UpdateStatus(#[source] ApiError),

    #[error("delete booking")]
    Delete(#[source] ApiError),
}

impl AdminError {
    pub fn message(&self, lang: Lang) -> &'static str {
        let key = match self {
            Self::NotFound(_) => Text::BookingNotFound,
            Self::TransitionNotAllowed { .. } => Text::TransitionNotAllowed,
            Self::UpdateStatus(ApiError::Transport(_)) | Self::Delete(ApiError::Transport(_)) => {
                Text::ConnectionError
            }
            Self::UpdateStatus(_) => Text::StatusUpdateError,
            Self::Delete(_) => Text::DeleteError,
        };
        text(lang, key)
    }
}
