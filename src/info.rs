use crate::refs::{ObjectReferences, RefType};
use chrono::{Datelike, NaiveDate};
use pdf_writer::{Date, Pdf, TextStr};

/// The document information dictionary.
///
/// Nothing here reads the clock: the creation date is whatever the caller set, so
/// the same metadata always serializes to the same bytes.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Written as a day-precision `/CreationDate`
    pub created: Option<NaiveDate>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn created(&mut self, date: NaiveDate) -> &mut Self {
        self.created = Some(date);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut dict = writer.document_info(id);

        if let Some(title) = &self.title {
            dict.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            dict.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            dict.subject(TextStr(subject));
        }
        dict.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        if let Some(created) = self.created {
            dict.creation_date(
                Date::new(created.year().clamp(0, 9999) as u16)
                    .month(created.month() as u8)
                    .day(created.day() as u8),
            );
        }
    }
}
