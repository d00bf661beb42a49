//! Реестр форматов: имя каталога института — это внешний строковый контракт,
//! внутри он сразу превращается в закрытое перечисление.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VypisError};
use crate::formats::{dkb, rakuten, shinsei, smbc};
use crate::rows::FormatSpec;

/// Поддерживаемые институты и ревизии их форматов. Ревизия — отдельный тег:
/// старые выгрузки должны разбираться всегда, новый формат — новый тег.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    DkbGiroV1,
    DkbCcVonBisV1,
    DkbCcZeitraumV1,
    ShinseiV1,
    ShinseiV1En,
    ShinseiV2,
    ShinseiV2En,
    ShinseiV3,
    SmbcV1,
    SmbcV2,
    RakutenV1,
    RakutenJcbV1,
}

pub const ALL: [SourceTag; 12] = [
    SourceTag::DkbGiroV1,
    SourceTag::DkbCcVonBisV1,
    SourceTag::DkbCcZeitraumV1,
    SourceTag::ShinseiV1,
    SourceTag::ShinseiV1En,
    SourceTag::ShinseiV2,
    SourceTag::ShinseiV2En,
    SourceTag::ShinseiV3,
    SourceTag::SmbcV1,
    SourceTag::SmbcV2,
    SourceTag::RakutenV1,
    SourceTag::RakutenJcbV1,
];

impl SourceTag {
    /// Имя каталога института во входном дереве.
    pub fn dir_name(self) -> &'static str {
        match self {
            SourceTag::DkbGiroV1 => "dkb_giro_v1",
            SourceTag::DkbCcVonBisV1 => "dkb_cc_von_bis_v1",
            SourceTag::DkbCcZeitraumV1 => "dkb_cc_zeitraum_v1",
            SourceTag::ShinseiV1 => "shinsei_v1",
            SourceTag::ShinseiV1En => "shinsei_v1_en",
            SourceTag::ShinseiV2 => "shinsei_v2",
            SourceTag::ShinseiV2En => "shinsei_v2_en",
            SourceTag::ShinseiV3 => "shinsei_v3",
            SourceTag::SmbcV1 => "smbc_v1",
            SourceTag::SmbcV2 => "smbc_v2",
            SourceTag::RakutenV1 => "rakuten_v1",
            SourceTag::RakutenJcbV1 => "rakuten_jcb_v1",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<SourceTag> {
        ALL.into_iter().find(|tag| tag.dir_name() == name)
    }

    /// Дескриптор формата. Тотальная функция: на каждый тег есть парсер.
    pub fn spec(self) -> &'static FormatSpec {
        match self {
            SourceTag::DkbGiroV1 => &dkb::GIRO_V1,
            SourceTag::DkbCcVonBisV1 => &dkb::CC_VON_BIS_V1,
            SourceTag::DkbCcZeitraumV1 => &dkb::CC_ZEITRAUM_V1,
            SourceTag::ShinseiV1 => &shinsei::V1,
            SourceTag::ShinseiV1En => &shinsei::V1_EN,
            SourceTag::ShinseiV2 => &shinsei::V2,
            SourceTag::ShinseiV2En => &shinsei::V2_EN,
            SourceTag::ShinseiV3 => &shinsei::V3,
            SourceTag::SmbcV1 => &smbc::V1,
            SourceTag::SmbcV2 => &smbc::V2,
            SourceTag::RakutenV1 => &rakuten::V1,
            SourceTag::RakutenJcbV1 => &rakuten::JCB_V1,
        }
    }
}

/// Поиск парсера по имени каталога института.
pub fn lookup(name: &str) -> Result<SourceTag> {
    SourceTag::from_dir_name(name)
        .ok_or_else(|| VypisError::UnknownFormat(name.to_string()))
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
