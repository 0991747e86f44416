//! Value types shared by the metadata store and the formatting engine

pub mod metadata;
pub mod numbering;

pub use metadata::CurrencyMetadata;
pub use numbering::{
    GroupRule, LadderStep, NumberingSystem, CHINESE_LADDER, INDIAN_LADDER, INTERNATIONAL_LADDER,
};
