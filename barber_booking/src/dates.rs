use chrono::{Days, Local, NaiveDate};

/// Источник текущей даты, чтобы окно дат можно было проверять в тестах.
pub trait Clock {
    /// Текущая дата по локальному календарю клиента.
    fn today(&self) -> NaiveDate;
}

/// Часы по локальному времени машины.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Первый доступный для записи день, считая от сегодня.
const FIRST_DAY_OFFSET: u64 = 1;

/// Последний доступный для записи день, считая от сегодня.
const LAST_DAY_OFFSET: u64 = 5;

/// Окно дат, на которые можно записаться. Границы включаются.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateWindow {
    /// Окно относительно указанного дня.
    pub fn starting_from(today: NaiveDate) -> Self {
        Self {
            min: today + Days::new(FIRST_DAY_OFFSET),
            max: today + Days::new(LAST_DAY_OFFSET),
        }
    }

    /// Окно на текущий момент. Не кэшируется, в полночь сдвигается само.
    pub fn current(clock: &dyn Clock) -> Self {
        Self::starting_from(clock.today())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

/// Проверяет что на дату можно записаться.
pub fn is_date_allowed(clock: &dyn Clock, date: NaiveDate) -> bool {
    DateWindow::current(clock).contains(date)
}
