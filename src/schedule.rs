use std::{fmt, path::Path, str::FromStr};

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{PortalError, PortalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKind {
    Lecture,
    Lab,
}

impl LessonKind {
    /// The label the schedule (and the portal) use.
    pub fn as_str(self) -> &'static str {
        match self {
            LessonKind::Lecture => "curs",
            LessonKind::Lab => "laborator",
        }
    }
}

impl FromStr for LessonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "curs" => Ok(LessonKind::Lecture),
            "laborator" => Ok(LessonKind::Lab),
            other => Err(format!("unknown lesson type {other:?}")),
        }
    }
}

impl fmt::Display for LessonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub date: NaiveDate,
    pub kind: LessonKind,
    pub name: String,
}

pub struct ScheduleParser {
    // `DD.MM.YYYY type   name`
    line_regex: Regex,
}

impl ScheduleParser {
    pub fn new() -> PortalResult<Self> {
        let line_regex = Regex::new(r"^(\d{2}\.\d{2}\.\d{4}) (\S+)   (.+)$")
            .map_err(|e| PortalError::Configuration(e.to_string()))?;
        Ok(Self { line_regex })
    }

    pub fn parse_line(&self, line: &str, line_number: usize) -> PortalResult<TopicRecord> {
        let schedule_error = |reason: String| PortalError::Schedule {
            line: line_number,
            reason,
        };
        let Some(caps) = self.line_regex.captures(line.trim_end()) else {
            return Err(schedule_error(format!(
                "expected `DD.MM.YYYY type   name`, got {line:?}"
            )));
        };
        let date = NaiveDate::parse_from_str(&caps[1], "%d.%m.%Y")
            .map_err(|e| schedule_error(format!("bad date {:?}: {e}", &caps[1])))?;
        let kind = caps[2].parse::<LessonKind>().map_err(schedule_error)?;
        Ok(TopicRecord {
            date,
            kind,
            name: caps[3].trim().to_string(),
        })
    }

    /// Parses every non-blank line and sorts by date. Entries on the same date
    /// keep their input order.
    pub fn parse(&self, text: &str) -> PortalResult<Vec<TopicRecord>> {
        let mut topics = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| self.parse_line(line, i + 1))
            .collect::<PortalResult<Vec<_>>>()?;
        topics.sort_by_key(|topic| topic.date);
        Ok(topics)
    }
}

pub fn load_schedule(path: &Path) -> PortalResult<Vec<TopicRecord>> {
    let text = std::fs::read_to_string(path)?;
    ScheduleParser::new()?.parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = include_str!("../schedule.txt");

    #[test]
    fn test_parse_single_line() {
        let parser = ScheduleParser::new().unwrap();
        let topic = parser
            .parse_line(
                "06.09.2024 curs   Развитие языка С++: стандарты, компиляторы, среда разработки",
                1,
            )
            .unwrap();
        assert_eq!(topic.date, NaiveDate::from_ymd_opt(2024, 9, 6).unwrap());
        assert_eq!(topic.kind, LessonKind::Lecture);
        assert_eq!(topic.kind.as_str(), "curs");
        assert_eq!(
            topic.name,
            "Развитие языка С++: стандарты, компиляторы, среда разработки"
        );
    }

    #[test]
    fn test_parse_sample_sorted() {
        let topics = ScheduleParser::new().unwrap().parse(SAMPLE).unwrap();
        assert_eq!(topics.len(), 20);
        assert_eq!(
            topics.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 9, 6).unwrap()
        );
        assert_eq!(
            topics.last().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 11, 22).unwrap()
        );
        assert!(topics.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_same_date_keeps_input_order() {
        let topics = ScheduleParser::new().unwrap().parse(SAMPLE).unwrap();
        assert_eq!(topics[0].kind, LessonKind::Lecture);
        assert_eq!(topics[1].kind, LessonKind::Lab);
        assert_eq!(topics[1].name, "ЛР №1: Создание проекта. Работа с GIT");
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let parser = ScheduleParser::new().unwrap();
        let err = parser
            .parse("06.09.2024 curs   A\n\n31.02.2024 curs   B")
            .unwrap_err();
        assert!(matches!(err, PortalError::Schedule { line: 3, .. }));
    }

    #[test]
    fn test_unknown_kind() {
        let parser = ScheduleParser::new().unwrap();
        assert!(parser.parse_line("06.09.2024 seminar   A", 1).is_err());
    }
}
