//! Построчный разбор CSV-выгрузок: дескриптор формата и общий цикл чтения.
//!
//! Каждый формат описывается статическим [`FormatSpec`]; весь специфичный
//! для банка код живёт в извлекающих функциях, общий цикл — здесь.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::Encoding;
use rust_decimal::Decimal;

use crate::error::{Result, VypisError};
use crate::model::Transaction;
use crate::registry::SourceTag;

/// Кодировка исходного файла. Закрытый набор — по одной на поддерживаемые банки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, включая вариант с BOM.
    Utf8,
    /// UTF-16 c BOM; без BOM считаем little-endian.
    Utf16,
    ShiftJis,
    /// Выгрузки DKB; по WHATWG это windows-1252.
    Latin1,
}

impl TextEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Utf16 => encoding_rs::UTF_16LE,
            TextEncoding::ShiftJis => encoding_rs::SHIFT_JIS,
            TextEncoding::Latin1 => encoding_rs::WINDOWS_1252,
        }
    }

    /// Декодирует файл целиком. Некорректные байты — ошибка формата,
    /// молча подставлять replacement-символы нельзя.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        let encoding = self.encoding();
        let (text, _, had_errors) = encoding.decode(bytes);
        if had_errors {
            return Err(VypisError::Format(format!(
                "malformed {} data",
                encoding.name()
            )));
        }
        Ok(text.into_owned())
    }
}

/// Одна запись CSV вместе с заголовком, доступ к ячейкам по имени колонки.
pub struct Row<'a> {
    headers: &'a StringRecord,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    pub fn new(headers: &'a StringRecord, record: &'a StringRecord) -> Self {
        Row { headers, record }
    }

    pub fn get(&self, field: &str) -> Result<&'a str> {
        let idx = self
            .headers
            .iter()
            .position(|h| h.trim() == field)
            .ok_or_else(|| {
                VypisError::Format(format!("unexpected layout: missing column {field:?}"))
            })?;
        Ok(self.record.get(idx).unwrap_or(""))
    }

    /// Строка без транзакции: пустая либо с единственной непустой ячейкой
    /// (итоговые и секционные строки в хвосте выгрузки).
    fn is_noise(&self) -> bool {
        self.record.iter().filter(|c| !c.trim().is_empty()).count() <= 1
    }
}

/// Как взять дату транзакции из записи.
#[derive(Debug, Clone, Copy)]
pub enum DateSpec {
    Column {
        field: &'static str,
        fmt: &'static str,
    },
    /// Ячейка может содержать период «от - до»; датой считается конец периода.
    RangeEnd {
        field: &'static str,
        fmt: &'static str,
    },
}

impl DateSpec {
    pub fn parse(&self, row: &Row) -> Result<NaiveDate> {
        match *self {
            DateSpec::Column { field, fmt } => parse_date(row.get(field)?, fmt),
            DateSpec::RangeEnd { field, fmt } => {
                let cell = row.get(field)?;
                let end = cell.rsplit(" - ").next().unwrap_or(cell);
                parse_date(end, fmt)
            }
        }
    }
}

fn parse_date(cell: &str, fmt: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), fmt)
        .map_err(|e| VypisError::Format(format!("date {:?}: {e}", cell.trim())))
}

/// Как заполнить текстовое поле канонической записи.
pub enum TextRule {
    Column(&'static str),
    Empty,
    With(fn(&Row) -> Result<String>),
}

impl TextRule {
    pub fn extract(&self, row: &Row) -> Result<String> {
        match self {
            TextRule::Column(field) => Ok(row.get(field)?.trim().to_string()),
            TextRule::Empty => Ok(String::new()),
            TextRule::With(f) => f(row),
        }
    }
}

/// Статическое описание одного формата выгрузки. После регистрации не меняется.
pub struct FormatSpec {
    pub encoding: TextEncoding,
    pub delimiter: u8,
    /// Служебные строки перед заголовком таблицы.
    pub skip: usize,
    /// Обязательные колонки; отсутствие любой из них — ошибка раскладки.
    pub columns: &'static [&'static str],
    pub date: DateSpec,
    pub num: TextRule,
    pub description: TextRule,
    pub memo: TextRule,
    pub withdrawal: fn(&Row) -> Result<Decimal>,
    pub deposit: fn(&Row) -> Result<Decimal>,
}

impl FormatSpec {
    /// Разбирает файл целиком. Любая нераспознанная строка данных —
    /// ошибка всего файла: терять строки выписки молча нельзя.
    pub fn parse(&self, bytes: &[u8], tag: SourceTag) -> Result<Vec<Transaction>> {
        let text = self.encoding.decode(bytes)?;
        let body = skip_lines(&text, self.skip);

        let mut rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(body.as_bytes());
        let headers = rdr.headers()?.clone();
        for column in self.columns {
            if !headers.iter().any(|h| h.trim() == *column) {
                return Err(VypisError::Format(format!(
                    "unexpected layout: missing column {column:?}"
                )));
            }
        }

        let mut out = Vec::new();
        let mut row_no: u64 = 0;
        for record in rdr.records() {
            let record = record?;
            let row = Row::new(&headers, &record);
            if row.is_noise() {
                continue;
            }
            row_no += 1;
            out.push(self.transaction(&row, tag, row_no).map_err(|e| at_row(e, row_no))?);
        }
        Ok(out)
    }

    fn transaction(&self, row: &Row, tag: SourceTag, row_no: u64) -> Result<Transaction> {
        Ok(Transaction {
            date: self.date.parse(row)?,
            num: self.num.extract(row)?,
            description: self.description.extract(row)?,
            memo: self.memo.extract(row)?,
            amount: (self.deposit)(row)? - (self.withdrawal)(row)?,
            source: tag,
            row: row_no,
        })
    }
}

fn at_row(err: VypisError, row_no: u64) -> VypisError {
    match err {
        VypisError::Format(msg) => VypisError::Format(format!("row {row_no}: {msg}")),
        other => other,
    }
}

fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

/// Сумма из ячейки; пустая ячейка означает ноль.
pub fn cell_amount(row: &Row, field: &str) -> Result<Decimal> {
    let raw = row.get(field)?.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    raw.parse()
        .map_err(|e| VypisError::Format(format!("{field} {raw:?}: {e}")))
}

/// Модуль суммы, если она отрицательна, иначе ноль.
pub fn neg_part(amount: Decimal) -> Decimal {
    if amount < Decimal::ZERO {
        -amount
    } else {
        Decimal::ZERO
    }
}

/// Сумма, если она положительна, иначе ноль.
pub fn pos_part(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}
