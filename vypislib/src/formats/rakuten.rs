//! Форматы Rakuten: расчётный счёт и дебетовая карта JCB.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{Result, VypisError};
use crate::rows::{
    cell_amount, neg_part, pos_part, DateSpec, FormatSpec, Row, TextEncoding, TextRule,
};

// Описание JCB-дебета: «JCBデビット A0000001 0000000000000001».
static JCB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<description>JCBデビット) (?P<mode>[AB])(?P<number>\d{7}) (?P<reference>\d{16})$",
    )
    .unwrap()
});

/// Выделяет из описания номер подтверждения JCB либо возвращает текст как есть.
pub fn try_jcb(text: &str, return_number: bool) -> String {
    match JCB_RE.captures(text) {
        Some(caps) => {
            if return_number {
                caps["number"].to_string()
            } else {
                format!(
                    "{} {} {}",
                    &caps["description"], &caps["mode"], &caps["reference"]
                )
            }
        }
        None => {
            if return_number {
                String::new()
            } else {
                text.to_string()
            }
        }
    }
}

fn jcb_number(row: &Row) -> Result<String> {
    Ok(try_jcb(row.get("入出金先内容")?.trim(), true))
}

fn jcb_description(row: &Row) -> Result<String> {
    Ok(try_jcb(row.get("入出金先内容")?.trim(), false))
}

fn flow_withdrawal(row: &Row) -> Result<Decimal> {
    Ok(neg_part(cell_amount(row, "入出金(円)")?))
}

fn flow_deposit(row: &Row) -> Result<Decimal> {
    Ok(pos_part(cell_amount(row, "入出金(円)")?))
}

fn charge_withdrawal(row: &Row) -> Result<Decimal> {
    Ok(pos_part(cell_amount(row, "ご利用金額（円）")?))
}

fn charge_deposit(row: &Row) -> Result<Decimal> {
    Ok(neg_part(cell_amount(row, "ご利用金額（円）")?))
}

/// Сводит сведения о валюте покупки в одно поле memo.
fn conversion_info(row: &Row) -> Result<String> {
    match row.get("使用地域")?.trim() {
        "国内" => Ok("Domestic".to_string()),
        "海外" => Ok(format!(
            "Local: {} {}, Rate: {}",
            row.get("現地通貨額")?.trim(),
            row.get("通貨略称")?.trim(),
            row.get("換算レート")?.trim(),
        )),
        other => Err(VypisError::Format(format!("unknown region: {other}"))),
    }
}

pub static V1: FormatSpec = FormatSpec {
    encoding: TextEncoding::ShiftJis,
    delimiter: b',',
    skip: 0,
    columns: &["取引日", "入出金(円)", "入出金先内容"],
    date: DateSpec::Column {
        field: "取引日",
        fmt: "%Y%m%d",
    },
    num: TextRule::With(jcb_number),
    description: TextRule::With(jcb_description),
    memo: TextRule::Empty,
    withdrawal: flow_withdrawal,
    deposit: flow_deposit,
};

/// У карты положительная сумма — трата, полярность обращается к канонической.
pub static JCB_V1: FormatSpec = FormatSpec {
    encoding: TextEncoding::ShiftJis,
    delimiter: b',',
    skip: 0,
    columns: &["ご利用日", "ご利用先", "ご利用金額（円）", "承認番号", "使用地域"],
    date: DateSpec::Column {
        field: "ご利用日",
        fmt: "%Y%m%d",
    },
    num: TextRule::Column("承認番号"),
    description: TextRule::Column("ご利用先"),
    memo: TextRule::With(conversion_info),
    withdrawal: charge_withdrawal,
    deposit: charge_deposit,
};
