//! Клиентская часть записи в барбершоп: форма бронирования с маской
//! телефона и окном дат, клиент сервиса бронирования и операции админки.

pub mod admin;
pub mod api;
pub mod config;
pub mod dates;
pub mod form;
mod macros;
pub mod model;
pub mod notice;
pub mod phone;
pub mod text;
