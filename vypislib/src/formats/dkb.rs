//! Форматы DKB: giro-счёт и две ревизии кредитной карты (latin-1, «;»).
//!
//! Дата giro — Wertstellung, дата карты — Belegdatum. Сумма уже со знаком:
//! зачисления положительные, инверсия не нужна.

use rust_decimal::Decimal;

use crate::error::{Result, VypisError};
use crate::rows::{neg_part, pos_part, DateSpec, FormatSpec, Row, TextEncoding, TextRule};

/// Немецкая запись суммы: точка разделяет разряды, запятая — дробную часть.
fn betrag_eur(row: &Row) -> Result<Decimal> {
    let raw = row.get("Betrag (EUR)")?.trim();
    raw.replace('.', "")
        .replace(',', ".")
        .parse()
        .map_err(|e| VypisError::Format(format!("Betrag (EUR) {raw:?}: {e}")))
}

fn withdrawal(row: &Row) -> Result<Decimal> {
    Ok(neg_part(betrag_eur(row)?))
}

fn deposit(row: &Row) -> Result<Decimal> {
    Ok(pos_part(betrag_eur(row)?))
}

pub static GIRO_V1: FormatSpec = FormatSpec {
    encoding: TextEncoding::Latin1,
    delimiter: b';',
    skip: 6,
    columns: &[
        "Wertstellung",
        "Auftraggeber / Begünstigter",
        "Verwendungszweck",
        "Betrag (EUR)",
    ],
    date: DateSpec::Column {
        field: "Wertstellung",
        fmt: "%d.%m.%Y",
    },
    num: TextRule::Empty,
    description: TextRule::Column("Auftraggeber / Begünstigter"),
    memo: TextRule::Column("Verwendungszweck"),
    withdrawal,
    deposit,
};

/// Ревизия с периодом «von - bis» в Belegdatum; датой считается конец периода.
pub static CC_VON_BIS_V1: FormatSpec = FormatSpec {
    encoding: TextEncoding::Latin1,
    delimiter: b';',
    skip: 7,
    columns: &["Belegdatum", "Beschreibung", "Betrag (EUR)"],
    date: DateSpec::RangeEnd {
        field: "Belegdatum",
        fmt: "%d.%m.%Y",
    },
    num: TextRule::Empty,
    description: TextRule::Column("Beschreibung"),
    memo: TextRule::Empty,
    withdrawal,
    deposit,
};

pub static CC_ZEITRAUM_V1: FormatSpec = FormatSpec {
    encoding: TextEncoding::Latin1,
    delimiter: b';',
    skip: 6,
    columns: &["Belegdatum", "Beschreibung", "Betrag (EUR)"],
    date: DateSpec::Column {
        field: "Belegdatum",
        fmt: "%d.%m.%Y",
    },
    num: TextRule::Empty,
    description: TextRule::Column("Beschreibung"),
    memo: TextRule::Empty,
    withdrawal,
    deposit,
};
