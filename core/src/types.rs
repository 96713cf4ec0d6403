//! Response models for the simPRO API.
//!
//! # Design
//! Field names follow the remote schema exactly (`ID`, `Name`, ...). Every
//! struct derives `Default` and uses `#[serde(default)]`, so a missing field
//! decodes to its zero value and an empty response body maps to a zero-valued
//! result. A `null` field is treated like a missing one. `BusinessGroup` is
//! the one nullable reference: it is an `Option` so "absent" stays
//! distinguishable from "present with ID 0".

use serde::{Deserialize, Deserializer, Serialize};

/// A company as returned by the companies collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompanySummary {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
}

/// Full company record for the currently selected company.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "PascalCase")]
pub struct Company {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: CompanyAddress,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub timezone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "PascalCase")]
pub struct CompanyAddress {
    #[serde(deserialize_with = "null_as_default")]
    pub line1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub line2: String,
}

/// A security group as returned by the security groups collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SecurityGroupSummary {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
}

/// Full security group record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "PascalCase")]
pub struct SecurityGroup {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub business_group: Option<BusinessGroupRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub dashboards: Vec<DashboardRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BusinessGroupRef {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DashboardRef {
    #[serde(rename = "ID", deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(rename = "Name", deserialize_with = "null_as_default")]
    pub name: String,
}

/// A JSON `null` leaves the zero value in place, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
