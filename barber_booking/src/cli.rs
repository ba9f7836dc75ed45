use std::{
    fmt::Display,
    io::IsTerminal,
    time::{Duration, Instant},
};

use anyhow::Context;
use chrono::Weekday;
use colored::{Color, Colorize};
use enum_iterator::all;
use inquire::{validator::Validation, Confirm, DateSelect, Select};
use log::debug;

use barber_booking::{
    admin::{self, Action, StatusFilter},
    api::{AdminApi, BookingApi},
    form::BookingForm,
    model::{Booking, BookingId, Master, Service},
    notice::Notice,
    phone::{format_phone, PhoneDraft},
    text::{master_name, service_name, status_color, text, Lang, Text},
};

/// Вариант выбора с подписью на языке интерфейса.
struct Choice<T> {
    value: T,
    label: &'static str,
}

impl<T> Display for Choice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Проводит пользователя через форму бронирования.
/// После ошибки форма остаётся заполненной и можно попробовать снова.
pub fn book(
    form: &mut BookingForm,
    api: &dyn BookingApi,
    lang: Lang,
    ttl: Duration,
) -> anyhow::Result<()> {
    let mut last: Option<Notice> = None;

    loop {
        // Уведомление о прошлой ошибке показываем, только пока оно не истекло.
        if let Some(notice) = last.take().filter(|n| n.is_visible_at(Instant::now())) {
            println!("{}", notice);
        }

        fill(form, api, lang)?;

        println!("{}", text(lang, Text::Booking));

        match form.submit(api) {
            Ok(()) => {
                println!("{}", Notice::success(text(lang, Text::Success), ttl));
                return Ok(());
            }
            Err(e) => {
                debug!("Ошибка отправки формы: {:?}", e);
                let notice = Notice::error(e.message(lang), ttl);
                println!("{}", notice);
                last = Some(notice);

                let again = Confirm::new(text(lang, Text::Book))
                    .with_default(true)
                    .prompt()?;
                if !again {
                    return Ok(());
                }
            }
        }
    }
}

fn fill(form: &mut BookingForm, api: &dyn BookingApi, lang: Lang) -> anyhow::Result<()> {
    let name = ask_name(&form.draft().client_name, lang)?;
    form.set_name(&name);

    let service = ask_choice(
        text(lang, Text::ChooseService),
        all::<Service>().map(|s| Choice {
            value: s,
            label: service_name(lang, s),
        }),
        form.draft().service,
    )?;
    if service != form.draft().service {
        // Время перезапросит выбор даты ниже.
        let _ = form.set_service(service);
    }

    let master = ask_choice(
        text(lang, Text::ChooseMaster),
        all::<Master>().map(|m| Choice {
            value: m,
            label: master_name(lang, m),
        }),
        form.draft().master,
    )?;
    if master != form.draft().master {
        let _ = form.set_master(master);
    }

    loop {
        ask_date(form, api, lang)?;

        if form.available_times().is_empty() {
            println!("{}", text(lang, Text::NoTimes));
            continue;
        }

        let times: Vec<String> = form
            .available_times()
            .iter()
            .map(|t| t.to_string())
            .collect();
        let time = Select::new(text(lang, Text::SelectTime), times).prompt()?;

        match form.select_time(&time) {
            Ok(()) => break,
            Err(e) => println!("{}", e.message(lang)),
        }
    }

    let phone = ask_phone(form.draft().phone.as_str(), lang)?;
    form.update_phone(&phone);

    Ok(())
}

fn ask_name(current: &str, lang: Lang) -> anyhow::Result<String> {
    let required = text(lang, Text::NameRequired);

    let name = inquire::Text::new(text(lang, Text::ClientName))
        .with_placeholder(text(lang, Text::NamePlaceholder))
        .with_initial_value(current)
        .with_validator(move |s: &str| {
            if s.trim().is_empty() {
                return Ok(Validation::Invalid(required.into()));
            }
            Ok(Validation::Valid)
        })
        .prompt()?;

    Ok(name)
}

fn ask_choice<T: PartialEq>(
    title: &str,
    choices: impl Iterator<Item = Choice<T>>,
    current: T,
) -> anyhow::Result<T> {
    let choices: Vec<Choice<T>> = choices.collect();
    let cursor = choices.iter().position(|c| c.value == current).unwrap_or(0);

    let choice = Select::new(title, choices)
        .with_starting_cursor(cursor)
        .prompt()?;

    Ok(choice.value)
}

/// Спрашивает дату, пока не будет выбрана допустимая, и загружает свободное время.
fn ask_date(form: &mut BookingForm, api: &dyn BookingApi, lang: Lang) -> anyhow::Result<()> {
    loop {
        let window = form.date_window();
        let starting = form
            .draft()
            .date
            .filter(|d| window.contains(*d))
            .unwrap_or(window.min);

        let date = DateSelect::new(text(lang, Text::Date))
            .with_min_date(window.min)
            .with_max_date(window.max)
            .with_starting_date(starting)
            .with_week_start(Weekday::Mon)
            .prompt()?;

        match form.set_date(date) {
            Ok(ticket) => {
                println!("{}", text(lang, Text::LoadingTimes));
                form.fetch_available_times(api, ticket);
                return Ok(());
            }
            Err(e) => println!("{}", e.message(lang)),
        }
    }
}

fn ask_phone(current: &str, lang: Lang) -> anyhow::Result<String> {
    let required = text(lang, Text::PhoneRequired);

    let phone = inquire::Text::new(text(lang, Text::Phone))
        .with_placeholder(text(lang, Text::PhonePlaceholder))
        .with_initial_value(current)
        .with_formatter(&format_phone)
        .with_validator(move |s: &str| {
            if PhoneDraft::from_input(s).is_blank() {
                return Ok(Validation::Invalid(required.into()));
            }
            Ok(Validation::Valid)
        })
        .prompt()?;

    Ok(phone)
}

/// Выводит список бронирований.
pub fn list(api: &dyn AdminApi, filter: StatusFilter, lang: Lang) -> anyhow::Result<()> {
    let bookings = load(api, lang)?;

    println!("{}: {}", text(lang, Text::Status), filter.label(lang));
    print_table(&admin::filter_bookings(&bookings, filter), lang);

    Ok(())
}

/// Меняет статус бронирования.
pub fn act(api: &dyn AdminApi, id: &BookingId, action: Action, lang: Lang) -> anyhow::Result<()> {
    let mut bookings = load(api, lang)?;

    admin::perform(api, &mut bookings, id, action).map_err(|e| {
        let msg = e.message(lang);
        anyhow::Error::new(e).context(msg)
    })?;

    print_table(&admin::filter_bookings(&bookings, StatusFilter::All), lang);

    Ok(())
}

/// Удаляет бронирование после подтверждения.
pub fn remove(api: &dyn AdminApi, id: &BookingId, yes: bool, lang: Lang) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new(text(lang, Text::DeleteConfirm))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            return Ok(());
        }
    }

    let mut bookings = load(api, lang)?;

    admin::delete(api, &mut bookings, id).map_err(|e| {
        let msg = e.message(lang);
        anyhow::Error::new(e).context(msg)
    })?;

    print_table(&admin::filter_bookings(&bookings, StatusFilter::All), lang);

    Ok(())
}

/// Выводит таблицу бронирований. В терминале строки окрашиваются по статусу.
fn print_table(bookings: &[&Booking], lang: Lang) {
    let table = admin::render_table(bookings, lang);

    let use_color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    if !use_color {
        println!("{}", table.trim_end());
        return;
    }

    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for (line, booking) in lines.zip(bookings) {
        println!("{}", paint(line, status_color(booking.status)));
    }
}

/// Красит строку цветом в формате `#rrggbb`.
fn paint(line: &str, hex: &str) -> String {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
    };

    match (hex.starts_with('#'), channel(1), channel(3), channel(5)) {
        (true, Some(r), Some(g), Some(b)) => line.color(Color::TrueColor { r, g, b }).to_string(),
        _ => line.to_owned(),
    }
}

fn load(api: &dyn AdminApi, lang: Lang) -> anyhow::Result<Vec<Booking>> {
    println!("{}", text(lang, Text::AdminTitle));
    debug!("{}", text(lang, Text::Loading));

    api.list_bookings().context(text(lang, Text::LoadError))
}
