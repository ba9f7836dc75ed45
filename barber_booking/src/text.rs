use serde::{Deserialize, Serialize};

use crate::model::{BookingStatus, Master, Service};

/// Язык интерфейса.
#[derive(
    Serialize,
    Deserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    enum_iterator::Sequence,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[display(fmt = "ru")]
    Ru,
    #[default]
    #[display(fmt = "hy")]
    Hy,
}

/// Ключи текстов интерфейса.
#[derive(Debug, Clone, Copy, PartialEq, Eq, enum_iterator::Sequence)]
pub enum Text {
    ClientName,
    NamePlaceholder,
    ChooseService,
    ChooseMaster,
    Date,
    Time,
    Phone,
    PhonePlaceholder,
    Book,
    Booking,
    FillAll,
    Success,
    Error,
    ConnectionError,
    SlotTaken,
    NameRequired,
    PhoneRequired,
    DateRequired,
    TimeRequired,
    DateOutOfRange,
    TimeUnavailable,
    LoadingTimes,
    SelectDateFirst,
    NoTimes,
    SelectTime,

    AdminTitle,
    All,
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Service,
    Master,
    Status,
    Actions,
    Confirm,
    Complete,
    Cancel,
    Delete,
    Loading,
    NoBookings,
    LoadError,
    StatusUpdateError,
    DeleteError,
    DeleteConfirm,
    TransitionNotAllowed,
    BookingNotFound,
}

/// Возвращает текст по ключу на нужном языке.
pub fn text(lang: Lang, key: Text) -> &'static str {
    match lang {
        Lang::Ru => ru(key),
        Lang::Hy => hy(key),
    }
}

fn ru(key: Text) -> &'static str {
    match key {
        Text::ClientName => "Имя клиента",
        Text::NamePlaceholder => "Введите ваше имя",
        Text::ChooseService => "Выберите услугу",
        Text::ChooseMaster => "Выберите мастера",
        Text::Date => "Дата",
        Text::Time => "Время",
        Text::Phone => "Телефон",
        Text::PhonePlaceholder => "+374 XX XXX XXX",
        Text::Book => "Забронировать",
        Text::Booking => "Бронирование...",
        Text::FillAll => "Заполните все поля!",
        Text::Success => "Бронирование успешно!",
        Text::Error => "Ошибка бронирования",
        Text::ConnectionError => "Ошибка соединения с сервером",
        Text::SlotTaken => "Это время уже занято",
        Text::NameRequired => "Имя обязательно для заполнения",
        Text::PhoneRequired => "Телефон обязателен для заполнения",
        Text::DateRequired => "Дата обязательна для заполнения",
        Text::TimeRequired => "Время обязательно для заполнения",
        Text::DateOutOfRange => "Выбранная дата вне допустимого диапазона",
        Text::TimeUnavailable => "Это время недоступно",
        Text::LoadingTimes => "Загрузка доступных времен...",
        Text::SelectDateFirst => "Сначала выберите дату",
        Text::NoTimes => "Нет доступных времен",
        Text::SelectTime => "Выберите время",

        Text::AdminTitle => "Панель администратора",
        Text::All => "Все",
        Text::Pending => "Ожидают",
        Text::Confirmed => "Подтверждены",
        Text::Completed => "Завершены",
        Text::Cancelled => "Отменены",
        Text::Service => "Услуга",
        Text::Master => "Мастер",
        Text::Status => "Статус",
        Text::Actions => "Действия",
        Text::Confirm => "Подтвердить",
        Text::Complete => "Завершить",
        Text::Cancel => "Отменить",
        Text::Delete => "Удалить",
        Text::Loading => "Загрузка...",
        Text::NoBookings => "Нет бронирований",
        Text::LoadError => "Ошибка загрузки данных",
        Text::StatusUpdateError => "Ошибка обновления статуса",
        Text::DeleteError => "Ошибка удаления бронирования",
        Text::DeleteConfirm => "Вы уверены, что хотите удалить это бронирование?",
        Text::TransitionNotAllowed => "Это действие недоступно для текущего статуса",
        Text::BookingNotFound => "Бронирование не найдено",
    }
}

fn hy(key: Text) -> &'static str {
    match key {
        Text::ClientName => "Հաճախորդի անուն",
        Text::NamePlaceholder => "Մուտքագրեք ձեր անունը",
        Text::ChooseService => "Ընտրեք ծառայությունը",
        Text::ChooseMaster => "Ընտրեք վարպետին",
        Text::Date => "Ամսաթիվ",
        Text::Time => "Ժամ",
        Text::Phone => "Հեռախոս",
        Text::PhonePlaceholder => "+374 XX XXX XXX",
        Text::Book => "Ամրագրել",
        Text::Booking => "Ամրագրվում է...",
        Text::FillAll => "Լրացրեք բոլոր դաշտերը!",
        Text::Success => "Ամրագրումը հաջողվեց!",
        Text::Error => "Ամրագրման սխալ",
        Text::ConnectionError => "Սերվերի հետ կապի սխալ",
        Text::SlotTaken => "Այս ժամը արդեն զբաղված է",
        Text::NameRequired => "Անունը պարտադիր է",
        Text::PhoneRequired => "Հեռախոսը պարտադիր է",
        Text::DateRequired => "Ամսաթիվը պարտադիր է",
        Text::TimeRequired => "Ժամը պարտադիր է",
        Text::DateOutOfRange => "Ընտրված ամսաթիվը թույլատրելի միջակայքից դուրս է",
        Text::TimeUnavailable => "Այս ժամը հասանելի չէ",
        Text::LoadingTimes => "Բեռնվում են հասանելի ժամերը...",
        Text::SelectDateFirst => "Նախ ընտրեք ամսաթիվը",
        Text::NoTimes => "Հասանելի ժամեր չկան",
        Text::SelectTime => "Ընտրեք ժամը",

        Text::AdminTitle => "Ադմինիստրատորի վահանակ",
        Text::All => "Բոլորը",
        Text::Pending => "Սպասում են",
        Text::Confirmed => "Հաստատված",
        Text::Completed => "Ավարտված",
        Text::Cancelled => "Չեղարկված",
        Text::Service => "Ծառայություն",
        Text::Master => "Վարպետ",
        Text::Status => "Կարգավիճակ",
        Text::Actions => "Գործողություններ",
        Text::Confirm => "Հաստատել",
        Text::Complete => "Ավարտել",
        Text::Cancel => "Չեղարկել",
        Text::Delete => "Ջնջել",
        Text::Loading => "Բեռնվում է...",
        Text::NoBookings => "Ամրագրումներ չկան",
        Text::LoadError => "Տվյալների բեռնման սխալ",
        Text::StatusUpdateError => "Կարգավիճակի թարմացման սխալ",
        Text::DeleteError => "Ամրագրման ջնջման սխալ",
        Text::DeleteConfirm => "Վստա՞հ եք, որ ցանկանում եք ջնջել այս ամրագրումը",
        Text::TransitionNotAllowed => "Այս գործողությունը հասանելի չէ ընթացիկ կարգավիճակի համար",
        Text::BookingNotFound => "Ամրագրումը չի գտնվել",
    }
}

/// Подпись статуса бронирования.
pub fn status_label(lang: Lang, status: BookingStatus) -> &'static str {
    let key = match status {
        BookingStatus::Pending => Text::Pending,
        BookingStatus::Confirmed => Text::Confirmed,
        BookingStatus::Completed => Text::Completed,
        BookingStatus::Cancelled => Text::Cancelled,
    };
    text(lang, key)
}

/// Цвет плашки статуса в админке.
pub fn status_color(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "#ffa500",
        BookingStatus::Confirmed => "#32cd32",
        BookingStatus::Completed => "#4169e1",
        BookingStatus::Cancelled => "#dc143c",
    }
}

pub fn service_name(lang: Lang, service: Service) -> &'static str {
    match (lang, service) {
        (Lang::Ru, Service::Haircut) => "Стрижка",
        (Lang::Ru, Service::HairBeard) => "Стрижка + борода",
        (Lang::Ru, Service::Beard) => "Борода",
        (Lang::Hy, Service::Haircut) => "Մազերի կտրվածք",
        (Lang::Hy, Service::HairBeard) => "Մազ + մորուք",
        (Lang::Hy, Service::Beard) => "Մորուք",
    }
}

pub fn master_name(lang: Lang, master: Master) -> &'static str {
    match (lang, master) {
        (Lang::Ru, Master::Gegham) => "Гегам",
        (Lang::Hy, Master::Gegham) => "Գեղամ",
    }
}

#[cfg(test)]
mod tests {
    use enum_iterator::all;

    use super::*;

    #[test]
    fn every_key_is_translated() {
        for lang in all::<Lang>() {
            for key in all::<Text>() {
                assert!(!text(lang, key).trim().is_empty(), "{} {:?}", lang, key);
            }
        }
    }

    #[test]
    fn languages_differ() {
        assert_ne!(text(Lang::Ru, Text::SlotTaken), text(Lang::Hy, Text::SlotTaken));
        assert_eq!("Это время уже занято", text(Lang::Ru, Text::SlotTaken));
    }

    #[test]
    fn status_labels() {
        assert_eq!("Ожидают", status_label(Lang::Ru, BookingStatus::Pending));
        assert_eq!("Չեղարկված", status_label(Lang::Hy, BookingStatus::Cancelled));
    }

    #[test]
    fn status_colors_are_distinct() {
        let colors: Vec<_> = all::<BookingStatus>().map(status_color).collect();
        for (i, c) in colors.iter().enumerate() {
            assert!(!colors[i + 1..].contains(c), "{}", c);
        }
    }

    #[test]
    fn lang_parses_from_config() {
        #[derive(Deserialize)]
        struct Wrapper {
            lang: Lang,
        }

        let w: Wrapper = serde_json::from_str(r#"{"lang": "ru"}"#).unwrap();
        assert_eq!(Lang::Ru, w.lang);
    }
}
