use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fine-grained column classification produced by the analysis pipeline.
///
/// The set is closed; a label outside it fails at the parse boundary rather
/// than producing a catch-all variant, which keeps [`DataSubtype::column_type`]
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSubtype {
    Int,
    Float,
    Binary,
    Date,
    Timestamp,
    SingleCategory,
    MultipleCategories,
    Image,
    Video,
    Audio,
    ShortText,
    RichText,
    Array,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown data subtype '{0}'")]
pub struct UnknownSubtype(pub String);

impl FromStr for DataSubtype {
    type Err = UnknownSubtype;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Int" => Ok(Self::Int),
            "Float" => Ok(Self::Float),
            "Binary" => Ok(Self::Binary),
            "Date" => Ok(Self::Date),
            "Timestamp" => Ok(Self::Timestamp),
            "Category" => Ok(Self::SingleCategory),
            "Multiple categories" => Ok(Self::MultipleCategories),
            "Image" => Ok(Self::Image),
            "Video" => Ok(Self::Video),
            "Audio" => Ok(Self::Audio),
            "Short Text" => Ok(Self::ShortText),
            "Rich Text" => Ok(Self::RichText),
            "Array" => Ok(Self::Array),
            other => Err(UnknownSubtype(other.to_string())),
        }
    }
}

impl DataSubtype {
    pub const ALL: [DataSubtype; 13] = [
        Self::Int,
        Self::Float,
        Self::Binary,
        Self::Date,
        Self::Timestamp,
        Self::SingleCategory,
        Self::MultipleCategories,
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::ShortText,
        Self::RichText,
        Self::Array,
    ];

    /// The PostgreSQL column type a value of this subtype is published as.
    pub fn column_type(self) -> &'static str {
        match self {
            Self::Int => "int8",
            Self::Float => "float8",
            Self::Binary => "bool",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::SingleCategory
            | Self::MultipleCategories
            | Self::Image
            | Self::Video
            | Self::Audio
            | Self::ShortText
            | Self::RichText
            | Self::Array => "text",
        }
    }

    /// The wire label the analysis pipeline uses for this subtype.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Binary => "Binary",
            Self::Date => "Date",
            Self::Timestamp => "Timestamp",
            Self::SingleCategory => "Category",
            Self::MultipleCategories => "Multiple categories",
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::ShortText => "Short Text",
            Self::RichText => "Rich Text",
            Self::Array => "Array",
        }
    }
}

/// Coarse column classification. Only `Numeric` changes published DDL (it
/// adds min/max columns for predicted outputs); labels this crate does not
/// know about deserialize as `Other` instead of failing the whole model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Numeric,
    Date,
    Categorical,
    Sequential,
    Text,
    #[serde(rename = "File Path")]
    FilePath,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTyping {
    /// Kept as the raw wire label; parsed per column during DDL generation so
    /// one unknown subtype degrades that column instead of the whole model.
    pub data_subtype: String,
    pub data_type: DataType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub typing: ColumnTyping,
}

/// What the training pipeline hands over per model. `data_analysis` is keyed
/// by column name; `predict` names the model's output columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub name: String,
    pub data_analysis: BTreeMap<String, ColumnAnalysis>,
    pub predict: Vec<String>,
}

impl ModelMetadata {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parsing model metadata")
    }
}
