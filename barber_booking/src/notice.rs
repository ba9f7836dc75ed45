use std::{
    fmt::Display,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Временное уведомление для пользователя.
/// Скрывается само спустя заданное время.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>, kind: NoticeKind, ttl: Duration, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind,
            expires_at: now + ttl,
        }
    }

    pub fn success(text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(text, NoticeKind::Success, ttl, Instant::now())
    }

    pub fn error(text: impl Into<String>, ttl: Duration) -> Self {
        Self::new(text, NoticeKind::Error, ttl, Instant::now())
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            NoticeKind::Success => write!(f, "✔ {}", self.text),
            NoticeKind::Error => write!(f, "✘ {}", self.text),
        }
    }
}
