//! Форматы Shinsei: три ревизии, японские и английские выгрузки.
//!
//! Списание и зачисление лежат в отдельных колонках, пустая ячейка — ноль.

use rust_decimal::Decimal;

use crate::error::Result;
use crate::rows::{cell_amount, DateSpec, FormatSpec, Row, TextEncoding, TextRule};

fn shiharai(row: &Row) -> Result<Decimal> {
    cell_amount(row, "お支払金額")
}

fn azukari(row: &Row) -> Result<Decimal> {
    cell_amount(row, "お預り金額")
}

fn shukkin(row: &Row) -> Result<Decimal> {
    cell_amount(row, "出金金額")
}

fn nyukin(row: &Row) -> Result<Decimal> {
    cell_amount(row, "入金金額")
}

fn cr(row: &Row) -> Result<Decimal> {
    cell_amount(row, "CR")
}

fn dr(row: &Row) -> Result<Decimal> {
    cell_amount(row, "DR")
}

fn debit(row: &Row) -> Result<Decimal> {
    cell_amount(row, "Debit")
}

fn credit(row: &Row) -> Result<Decimal> {
    cell_amount(row, "Credit")
}

pub static V1: FormatSpec = FormatSpec {
    encoding: TextEncoding::Utf16,
    delimiter: b'\t',
    skip: 8,
    columns: &["取引日", "摘要", "お支払金額", "お預り金額"],
    date: DateSpec::Column {
        field: "取引日",
        fmt: "%Y/%m/%d",
    },
    num: TextRule::Empty,
    description: TextRule::Column("摘要"),
    memo: TextRule::Empty,
    withdrawal: shiharai,
    deposit: azukari,
};

/// Английская выгрузка v1 путает колонки: в CR лежит списание, в DR — зачисление.
pub static V1_EN: FormatSpec = FormatSpec {
    encoding: TextEncoding::Utf16,
    delimiter: b'\t',
    skip: 8,
    columns: &["Value Date", "Description", "CR", "DR"],
    date: DateSpec::Column {
        field: "Value Date",
        fmt: "%Y/%m/%d",
    },
    num: TextRule::Empty,
    description: TextRule::Column("Description"),
    memo: TextRule::Empty,
    withdrawal: cr,
    deposit: dr,
};

pub static V2: FormatSpec = FormatSpec {
    encoding: TextEncoding::ShiftJis,
    delimiter: b',',
    skip: 0,
    columns: &["取引日", "摘要", "出金金額", "入金金額"],
    date: DateSpec::Column {
        field: "取引日",
        fmt: "%Y/%m/%d",
    },
    num: TextRule::Empty,
    description: TextRule::Column("摘要"),
    memo: TextRule::Empty,
    withdrawal: shukkin,
    deposit: nyukin,
};

pub static V2_EN: FormatSpec = FormatSpec {
    encoding: TextEncoding::ShiftJis,
    delimiter: b',',
    skip: 0,
    columns: &["Value Date", "Description", "Debit", "Credit"],
    date: DateSpec::Column {
        field: "Value Date",
        fmt: "%Y/%m/%d",
    },
    num: TextRule::Empty,
    description: TextRule::Column("Description"),
    memo: TextRule::Empty,
    withdrawal: debit,
    deposit: credit,
};

/// Та же раскладка, что v2, но банк перешёл на UTF-8 с BOM.
pub static V3: FormatSpec = FormatSpec {
    encoding: TextEncoding::Utf8,
    delimiter: b',',
    skip: 0,
    columns: &["取引日", "摘要", "出金金額", "入金金額"],
    date: DateSpec::Column {
        field: "取引日",
        fmt: "%Y/%m/%d",
    },
    num: TextRule::Empty,
    description: TextRule::Column("摘要"),
    memo: TextRule::Empty,
    withdrawal: shukkin,
    deposit: nyukin,
};
