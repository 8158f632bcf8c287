use chrono::{NaiveDateTime, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfDay {
    Morning,
    Day,
    Evening,
    Night,
}

impl PartOfDay {
    pub fn of(time: NaiveTime) -> Self {
        match time.hour() {
            6..=11 => Self::Morning,
            12..=17 => Self::Day,
            18..=22 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            Self::Morning => "Доброе утро",
            Self::Day => "Добрый день",
            Self::Evening => "Добрый вечер",
            Self::Night => "Доброй ночи",
        }
    }
}

pub fn greeting(at: NaiveDateTime) -> &'static str {
    let phrase = PartOfDay::of(at.time()).greeting();
    tracing::debug!(%at, phrase, "greeting generated");
    phrase
}
