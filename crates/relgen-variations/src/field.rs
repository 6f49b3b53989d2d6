//! Named access to record fields and pipeline output emission

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::document::VariationRecord;
use crate::{Error, Result};

/// Fields of a [`VariationRecord`] that can be queried by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariationField {
    Envfiles,
    Pump,
    Sink,
    Deb,
    Rpm,
}

impl VariationField {
    /// Every field, in name order.
    pub const ALL: [VariationField; 5] = [
        Self::Deb,
        Self::Envfiles,
        Self::Pump,
        Self::Rpm,
        Self::Sink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Envfiles => "envfiles",
            Self::Pump => "pump",
            Self::Sink => "sink",
            Self::Deb => "deb",
            Self::Rpm => "rpm",
        }
    }

    /// The field's value in `record` as JSON.
    pub fn value(self, record: &VariationRecord) -> Result<serde_json::Value> {
        let value = match self {
            Self::Envfiles => serde_json::to_value(&record.envfiles)?,
            Self::Pump => serde_json::to_value(&record.pump)?,
            Self::Sink => serde_json::to_value(&record.sink)?,
            Self::Deb => serde_json::to_value(&record.distros.deb)?,
            Self::Rpm => serde_json::to_value(&record.distros.rpm)?,
        };
        Ok(value)
    }
}

impl FromStr for VariationField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::UnknownField {
                field: s.to_string(),
                expected: Self::ALL.map(Self::as_str).join(", "),
            })
    }
}

impl fmt::Display for VariationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emit `fields` of `record` as multi-line step outputs.
///
/// Each field is written as `name<<EOF`, its compact JSON value and `EOF`,
/// in name order. An empty `fields` emits every field.
pub fn write_outputs<W: Write>(
    out: &mut W,
    record: &VariationRecord,
    fields: &[VariationField],
) -> Result<()> {
    let mut selected: Vec<VariationField> = if fields.is_empty() {
        VariationField::ALL.to_vec()
    } else {
        fields.to_vec()
    };
    selected.sort_by_key(|f| f.as_str());
    selected.dedup();

    for field in selected {
        let json = serde_json::to_string(&field.value(record)?)?;
        write!(out, "{}<<EOF\n{}\nEOF\n", field, json)?;
    }
    Ok(())
}
