//! Grant records as exchanged with the grant catalog API

use serde::{Deserialize, Deserializer, Serialize};

/// Funding source of a grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GrantType {
    Federal,
    Provincial,
    Private,
    #[serde(other)]
    #[value(skip)]
    Other,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::Federal => "federal",
            GrantType::Provincial => "provincial",
            GrantType::Private => "private",
            GrantType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "federal" => GrantType::Federal,
            "provincial" => GrantType::Provincial,
            "private" => GrantType::Private,
            _ => GrantType::Other,
        }
    }
}

/// A grant as returned by `GET /api/grants`
///
/// Only the fields consulted for image selection are modelled; everything
/// else in the payload is ignored on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// `None` means the grant is available nationwide
    #[serde(default)]
    pub province: Option<String>,
    #[serde(rename = "type", default)]
    pub grant_type: Option<GrantType>,
    #[serde(default)]
    pub funding_organization: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Grant {
    /// Current image, treating an empty string as unassigned
    pub fn current_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Organization names worth checking for a brand match, most specific first
    pub fn organization_names(&self) -> impl Iterator<Item = &str> {
        self.funding_organization
            .as_deref()
            .into_iter()
            .chain(self.organization.as_deref())
            .chain(std::iter::once(self.title.as_str()))
    }
}

/// Read a JSON `null` as an empty string
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /api/admin/grants/update-image`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpdate<'a> {
    pub id: i64,
    pub image_url: &'a str,
}

/// Body of `POST /api/admin/grants/add`
///
/// Fields the selector needs are typed; the rest of the record (deadlines,
/// websites, contact details, ...) is passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrant {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "type")]
    pub grant_type: GrantType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_amount: Option<String>,
    #[serde(default)]
    pub eligibility_criteria: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NewGrant {
    /// View of the record as a `Grant`, for running it through the selector
    /// before it has an id
    pub fn as_grant(&self, provisional_id: i64) -> Grant {
        Grant {
            id: provisional_id,
            title: self.title.clone(),
            description: self.description.clone(),
            industry: self.industry.clone(),
            category: self.category.clone(),
            province: self.province.clone(),
            grant_type: Some(self.grant_type),
            funding_organization: self.funding_organization.clone(),
            organization: None,
            image_url: self.image_url.clone(),
        }
    }
}
