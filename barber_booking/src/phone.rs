use std::fmt::Display;

/// Неизменяемый префикс отображаемого номера.
pub const PREFIX: &str = "+374 (";

/// Длина префикса в символах.
pub const PREFIX_LEN: usize = 6;

const COUNTRY_CODE: &str = "374";

/// 2 цифры кода оператора + 3 + 3.
const MAX_DIGITS: usize = 8;

/// Форматирует произвольный ввод в маску `+374 (AA) BBB-CCC`.
///
/// Незаполненные группы не выводятся: `+374 (9`, `+374 (91) `,
/// `+374 (91) 123`, `+374 (91) 123-4`.
pub fn format_phone(raw: &str) -> String {
    let digits = subscriber_digits(raw);

    let mut out = String::with_capacity(PREFIX.len() + 11);
    out.push_str(PREFIX);

    let (area, rest) = digits.split_at(digits.len().min(2));
    out.push_str(area);
    if area.len() == 2 {
        out.push_str(") ");
    }

    let (first, second) = rest.split_at(rest.len().min(3));
    out.push_str(first);
    if !second.is_empty() {
        out.push('-');
        out.push_str(second);
    }

    out
}

/// Приводит номер к каноническому виду `+374XXXXXXXX`.
pub fn normalize_phone(raw: &str) -> String {
    format!("+{}{}", COUNTRY_CODE, subscriber_digits(raw))
}

/// Цифры абонентского номера без кода страны, не больше 8.
fn subscriber_digits(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let digits = digits.strip_prefix(COUNTRY_CODE).unwrap_or(&digits);

    digits.chars().take(MAX_DIGITS).collect()
}

/// Редактирование поля телефона.
/// Позиции считаются в символах отображаемой строки, `start..end` это
/// выделение (при `start == end` просто курсор).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit<'a> {
    Backspace { start: usize, end: usize },
    Delete { start: usize, end: usize },
    Insert { start: usize, end: usize, text: &'a str },
}

/// Отображаемое значение поля телефона.
/// Всегда начинается с [`PREFIX`], хранит только отформатированную строку.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneDraft(String);

impl Default for PhoneDraft {
    fn default() -> Self {
        Self(PREFIX.to_owned())
    }
}

impl PhoneDraft {
    /// Создаёт значение поля из произвольного ввода.
    pub fn from_input(raw: &str) -> Self {
        Self(format_phone(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Проверяет что пользователь не ввёл ни одной цифры номера.
    pub fn is_blank(&self) -> bool {
        subscriber_digits(&self.0).is_empty()
    }

    /// Номер в каноническом виде для отправки на сервер.
    pub fn canonical(&self) -> String {
        normalize_phone(&self.0)
    }

    /// Применяет редактирование. Возвращает `false` если оно было подавлено,
    /// в этом случае значение не меняется.
    pub fn apply(&mut self, edit: Edit<'_>) -> bool {
        let chars: Vec<char> = self.0.chars().collect();
        let len = chars.len();

        let (start, end, text) = match edit {
            Edit::Backspace { start, end } | Edit::Delete { start, end }
                if start.min(len) < end.min(len) =>
            {
                (start.min(len), end.min(len), String::new())
            }
            Edit::Backspace { start, .. } => {
                let caret = start.min(len);
                if caret <= PREFIX_LEN {
                    return false;
                }
                // Пунктуацию маска всё равно вернёт, поэтому удаляем ближайшую цифру.
                match (PREFIX_LEN..caret).rev().find(|&i| chars[i].is_ascii_digit()) {
                    Some(i) => (i, i + 1, String::new()),
                    None => return false,
                }
            }
            Edit::Delete { start, .. } => {
                let caret = start.min(len);
                if caret < PREFIX_LEN {
                    return false;
                }
                match (caret..len).find(|&i| chars[i].is_ascii_digit()) {
                    Some(i) => (i, i + 1, String::new()),
                    None => return false,
                }
            }
            Edit::Insert { start, end, text } => {
                let (start, end) = (start.min(len), end.min(len));
                let (start, end) = if start == end {
                    let at = start.max(PREFIX_LEN);
                    (at, at)
                } else {
                    (start, end)
                };
                // Вставили номер целиком, вместе с кодом страны.
                let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
                let text = if digits > MAX_DIGITS {
                    subscriber_digits(text)
                } else {
                    text.to_owned()
                };
                (start, end, text)
            }
        };

        if start < PREFIX_LEN {
            return false;
        }

        let mut edited: String = chars[..start].iter().collect();
        edited.push_str(&text);
        edited.extend(&chars[end..]);

        self.0 = format_phone(&edited);

        true
    }
}

impl Display for PhoneDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
