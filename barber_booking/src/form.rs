use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::{
    api::{ApiError, ApiResult, BookingApi, NewBooking, SlotQuery},
    dates::{is_date_allowed, Clock, DateWindow},
    model::{BookingDraft, Identity, Master, Service, TimeSlot},
    phone::{Edit, PhoneDraft},
    text::{text, Lang, Text},
};

/// Обязательное поле формы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Phone,
    Date,
    Time,
}

impl RequiredField {
    pub fn message(&self, lang: Lang) -> &'static str {
        let key = match self {
            Self::Name => Text::NameRequired,
            Self::Phone => Text::PhoneRequired,
            Self::Date => Text::DateRequired,
            Self::Time => Text::TimeRequired,
        };
        text(lang, key)
    }
}

/// Запрос свободного времени, выданный формой.
/// Результат применяется только для последнего выданного запроса.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub query: SlotQuery,
}

/// Контроллер формы бронирования.
///
/// Держит черновик в согласованном состоянии и решает когда надо
/// перезапрашивать свободное время. Сам в сеть ходит только через
/// переданный [`BookingApi`].
pub struct BookingForm {
    draft: BookingDraft,
    slots: Vec<TimeSlot>,
    identity: Option<Identity>,
    clock: Box<dyn Clock>,

    /// Номер последнего выданного запроса свободного времени.
    generation: u64,

    /// Номер запроса, который ещё не завершился.
    pending: Option<u64>,

    submitting: bool,
}

impl BookingForm {
    /// Создаёт пустую форму. Имя заполняется из данных хоста, если они есть.
    pub fn new(clock: Box<dyn Clock>, identity: Option<Identity>) -> Self {
        let draft = BookingDraft {
            client_name: default_name(identity.as_ref()),
            ..Default::default()
        };

        Self {
            draft,
            slots: Vec::new(),
            identity,
            clock,
            generation: 0,
            pending: None,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Свободное время для текущих даты, мастера и услуги.
    pub fn available_times(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Идёт загрузка свободного времени. В это время выбирать время нельзя.
    pub fn is_loading_times(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Окно допустимых дат на текущий момент.
    pub fn date_window(&self) -> DateWindow {
        DateWindow::current(self.clock.as_ref())
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.client_name = name.to_owned();
    }

    /// Выбирает дату. Дата вне окна отклоняется и черновик не меняется.
    pub fn set_date(&mut self, date: NaiveDate) -> Result<FetchTicket, FormError> {
        if !is_date_allowed(self.clock.as_ref(), date) {
            debug!("Дата {} вне окна {:?}", date, self.date_window());
            return Err(FormError::DateOutOfRange(date));
        }

        self.draft.date = Some(date);
        self.draft.time = None;

        Ok(self.issue_fetch(date))
    }

    /// Выбирает мастера. Если дата уже выбрана, возвращает новый запрос времени.
    pub fn set_master(&mut self, master: Master) -> Option<FetchTicket> {
        self.draft.master = master;
        self.draft.time = None;

        self.refresh_times()
    }

    /// Выбирает услугу. Если дата уже выбрана, возвращает новый запрос времени.
    pub fn set_service(&mut self, service: Service) -> Option<FetchTicket> {
        self.draft.service = service;
        self.draft.time = None;

        self.refresh_times()
    }

    /// Перезапрашивает свободное время для текущего ключа.
    /// Выбранное время сохранится, если оно всё ещё свободно.
    pub fn refresh_times(&mut self) -> Option<FetchTicket> {
        let date = self.draft.date?;

        Some(self.issue_fetch(date))
    }

    fn issue_fetch(&mut self, date: NaiveDate) -> FetchTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.slots.clear();

        FetchTicket {
            generation: self.generation,
            query: SlotQuery {
                date,
                master: self.draft.master,
                service: self.draft.service,
            },
        }
    }

    /// Применяет результат запроса свободного времени.
    /// Возвращает `false` если запрос устарел и результат отброшен.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: ApiResult<Vec<TimeSlot>>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Отбрасываем устаревший ответ для {:?} (запрос {}, актуальный {})",
                ticket.query, ticket.generation, self.generation
            );
            return false;
        }

        self.pending = None;

        self.slots = match result {
            Ok(slots) => slots,
            Err(e) => {
                warn!("Не удалось получить свободное время для {:?}: {}", ticket.query, e);
                Vec::new()
            }
        };

        if let Some(time) = &self.draft.time {
            if !self.slots.contains(time) {
                debug!("Время {} больше не свободно, сбрасываем", time);
                self.draft.time = None;
            }
        }

        true
    }

    /// Выполняет запрос свободного времени и применяет результат.
    pub fn fetch_available_times(&mut self, api: &dyn BookingApi, ticket: FetchTicket) -> bool {
        let result = api.available_times(&ticket.query);

        self.finish_fetch(ticket, result)
    }

    /// Выбирает время из списка свободного.
    pub fn select_time(&mut self, time: &str) -> Result<(), FormError> {
        if self.draft.date.is_none() {
            return Err(FormError::NoDate);
        }

        if self.is_loading_times() {
            return Err(FormError::TimesLoading);
        }

        let slot = self
            .slots
            .iter()
            .find(|s| *s == &time)
            .ok_or_else(|| FormError::TimeUnavailable(time.to_owned()))?;

        self.draft.time = Some(slot.clone());

        Ok(())
    }

    /// Сохраняет телефон, предварительно прогнав его через маску.
    pub fn update_phone(&mut self, raw: &str) {
        self.draft.phone = PhoneDraft::from_input(raw);
    }

    /// Редактирует телефон. Правки, задевающие префикс, подавляются.
    pub fn edit_phone(&mut self, edit: Edit<'_>) -> bool {
        self.draft.phone.apply(edit)
    }

    /// Возвращает незаполненные обязательные поля по порядку.
    pub fn validate(&self) -> Vec<RequiredField> {
        let mut missing = Vec::with_capacity(4);

        if self.draft.client_name.trim().is_empty() {
            missing.push(RequiredField::Name);
        }
        if self.draft.phone.is_blank() {
            missing.push(RequiredField::Phone);
        }
        if self.draft.date.is_none() {
            missing.push(RequiredField::Date);
        }
        if self.draft.time.is_none() {
            missing.push(RequiredField::Time);
        }

        missing
    }

    /// Проверяет форму и собирает тело запроса. Форма переходит в состояние
    /// отправки до вызова [`BookingForm::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<NewBooking, FormError> {
        if self.submitting {
            return Err(FormError::Busy);
        }

        let missing = self.validate();

        let (Some(date), Some(time), true) = (self.draft.date, &self.draft.time, missing.is_empty())
        else {
            return Err(FormError::Validation(missing));
        };

        let booking = NewBooking {
            client_name: self.draft.client_name.trim().to_owned(),
            service: self.draft.service,
            master: self.draft.master,
            date,
            time: time.clone(),
            phone: self.draft.phone.canonical(),
            user_chat_id: self.identity.as_ref().map(|i| i.id),
            telegram_name: self.identity.as_ref().map(|i| i.display_name.clone()),
        };

        self.submitting = true;

        Ok(booking)
    }

    /// Применяет ответ сервиса на бронирование.
    /// При успехе форма очищается, при ошибке черновик остаётся как был.
    pub fn finish_submit(&mut self, result: ApiResult<()>) -> Result<(), FormError> {
        self.submitting = false;

        match result {
            Ok(()) => {
                info!(
                    "Бронирование на {:?} {:?} создано",
                    self.draft.date, self.draft.time
                );
                self.reset();
                Ok(())
            }
            Err(e) => {
                warn!("Бронирование не удалось: {}", e);
                Err(e.into())
            }
        }
    }

    /// Отправляет бронирование.
    pub fn submit(&mut self, api: &dyn BookingApi) -> Result<(), FormError> {
        let booking = self.begin_submit()?;

        let result = api.create_booking(&booking);

        self.finish_submit(result)
    }

    fn reset(&mut self) {
        self.draft.client_name = default_name(self.identity.as_ref());
        self.draft.date = None;
        self.draft.time = None;
        self.draft.phone = PhoneDraft::default();
        self.slots.clear();

        // Ответы на запросы, выданные до сброса, уже не относятся к форме.
        self.generation += 1;
        self.pending = None;
    }
}

fn default_name(identity: Option<&Identity>) -> String {
    identity.map(|i| i.display_name.clone()).unwrap_or_default()
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("required fields are missing: {0:?}")]
    Validation(Vec<RequiredField>),

    #[error("date {0} is out of range")]
    DateOutOfRange(NaiveDate),

    #[error("date is not selected")]
    NoDate,

    #[error("time {0} is not available")]
    TimeUnavailable(String),

    #[error("available times are still loading")]
    TimesLoading,

    #[error("booking is already being submitted")]
    Busy,

    #[error("slot is already taken")]
    SlotConflict,

    #[error("server rejected booking: {}", .0.join(", "))]
    ServerValidation(Vec<String>),

    #[error("connection error")]
    Transport(#[source] ApiError),

    #[error("booking failed with status {0}")]
    Server(u16),
}

impl From<ApiError> for FormError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Conflict => Self::SlotConflict,
            ApiError::Validation(details) => Self::ServerValidation(details),
            ApiError::Status(status) => Self::Server(status.as_u16()),
            e @ (ApiError::Transport(_) | ApiError::Deserialize(_)) => Self::Transport(e),
        }
    }
}

impl FormError {
    /// Текст ошибки для пользователя.
    pub fn message(&self, lang: Lang) -> String {
        match self {
            Self::Validation(fields) => format!(
                "{} {}",
                text(lang, Text::FillAll),
                fields
                    .iter()
                    .map(|f| f.message(lang))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::DateOutOfRange(_) => text(lang, Text::DateOutOfRange).to_owned(),
            Self::NoDate => text(lang, Text::SelectDateFirst).to_owned(),
            Self::TimeUnavailable(_) => text(lang, Text::TimeUnavailable).to_owned(),
            Self::TimesLoading => text(lang, Text::LoadingTimes).to_owned(),
            Self::Busy => text(lang, Text::Booking).to_owned(),
            Self::SlotConflict => text(lang, Text::SlotTaken).to_owned(),
            Self::ServerValidation(details) => details.join(", "),
            Self::Transport(_) => text(lang, Text::ConnectionError).to_owned(),
            Self::Server(_) => text(lang, Text::Error).to_owned(),
        }
    }
}
