//! Доменная модель — единый «нормализованный» слой между форматами банков.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::registry::SourceTag;

/// Каноническая транзакция. Знак суммы единый для всех форматов:
/// положительная — зачисление, отрицательная — списание.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub num: String,
    pub description: String,
    pub memo: String,
    pub amount: Decimal,
    pub source: SourceTag,
    /// Порядковый номер строки данных в исходном файле, с единицы.
    pub row: u64,
}
