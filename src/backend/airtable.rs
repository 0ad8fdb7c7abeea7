//! Airtable REST adapter.
//!
//! Owns the mapping between Airtable table/field names and the portal
//! models. All other modules work with the mapped models only.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use subtle::ConstantTimeEq;

use crate::errors::PortalError;
use crate::models::{
    ClinicalProgram, MemberAccount, ProgramArea, ProgramSlug, ResourceFilters, ResourceItem,
    ResourceType, SubscriptionStatus,
};

use super::{apply_filters, PortalBackend};

const API_URL: &str = "https://api.airtable.com/v0";

const MEMBERS_TABLE: &str = "Members";
const PROGRAMS_TABLE: &str = "Programs";
const RESOURCES_TABLE: &str = "Resources";

/// One page of an Airtable list response.
#[derive(Debug, Deserialize)]
struct RecordPage {
    records: Vec<Record>,
    offset: Option<String>,
}

/// A single Airtable record: opaque id plus a field map.
#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    #[serde(default)]
    fields: Value,
}

/// Error body returned by the Airtable API.
#[derive(Debug, Deserialize)]
struct AirtableErrorBody {
    error: AirtableErrorDetails,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AirtableErrorDetails {
    Typed {
        #[serde(rename = "type")]
        error_type: String,
        message: String,
    },
    Plain(String),
}

/// Live Airtable implementation of the backend seam.
pub struct AirtableBackend {
    client: reqwest::Client,
    api_key: String,
    base_id: String,
}

impl AirtableBackend {
    pub fn new(api_key: String, base_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_id,
        }
    }

    /// Fetch every record of a table, following pagination offsets.
    async fn list_records(
        &self,
        table: &str,
        filter_formula: Option<&str>,
    ) -> Result<Vec<Record>, PortalError> {
        let url = format!("{}/{}/{}", API_URL, self.base_id, table);
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.client.get(&url).bearer_auth(&self.api_key);
            if let Some(formula) = filter_formula {
                request = request.query(&[("filterByFormula", formula)]);
            }
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let response = request.send().await?;
            let page: RecordPage = Self::parse_response(response).await?;
            records.extend(page.records);

            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }

        Ok(records)
    }

    /// Fetch a single record by Airtable record id.
    async fn fetch_record(&self, table: &str, id: &str) -> Result<Record, PortalError> {
        let url = format!("{}/{}/{}/{}", API_URL, self.base_id, table, id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PortalError::NotFound(format!("Resource {} not found", id)));
        }
        Self::parse_response(response).await
    }

    /// Decode a successful response, or map an Airtable error body into a
    /// passthrough backend error preserving status and kind.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PortalError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<AirtableErrorBody>().await {
            Ok(body) => match body.error {
                AirtableErrorDetails::Typed {
                    error_type,
                    message,
                } => {
                    return Err(PortalError::Backend {
                        message,
                        code: Some(error_type),
                        status: Some(status.as_u16()),
                    })
                }
                AirtableErrorDetails::Plain(message) => message,
            },
            Err(_) => format!("Airtable request failed with status {}", status),
        };

        Err(PortalError::Backend {
            message,
            code: None,
            status: Some(status.as_u16()),
        })
    }
}

#[async_trait]
impl PortalBackend for AirtableBackend {
    async fn authenticate_member(
        &self,
        email: &str,
        password: &str,
    ) -> Result<MemberAccount, PortalError> {
        let formula = format!(
            "LOWER({{Email}}) = '{}'",
            email.trim().to_lowercase().replace('\'', "\\'")
        );
        let records = self.list_records(MEMBERS_TABLE, Some(&formula)).await?;

        let record = records.first().ok_or_else(invalid_credentials)?;
        let stored_password = str_field(&record.fields, "Password").unwrap_or_default();

        // Constant-time comparison to avoid leaking prefix length
        let matches: bool = stored_password
            .as_bytes()
            .ct_eq(password.as_bytes())
            .into();
        if !matches {
            return Err(invalid_credentials());
        }

        Ok(member_from_record(record))
    }

    async fn clinical_programs(&self) -> Result<Vec<ClinicalProgram>, PortalError> {
        let records = self.list_records(PROGRAMS_TABLE, None).await?;
        Ok(records.iter().filter_map(program_from_record).collect())
    }

    async fn program_documentation_forms(
        &self,
        slug: ProgramSlug,
    ) -> Result<Vec<ResourceItem>, PortalError> {
        let records = self.list_records(RESOURCES_TABLE, None).await?;
        Ok(records
            .iter()
            .filter_map(resource_from_record)
            .filter(|r| r.resource_type == ResourceType::DocumentationForms)
            .filter(|r| r.program.is_some_and(|p| p.matches(slug)))
            .collect())
    }

    async fn resources(
        &self,
        filters: &ResourceFilters,
    ) -> Result<Vec<ResourceItem>, PortalError> {
        let records = self.list_records(RESOURCES_TABLE, None).await?;
        let items = records.iter().filter_map(resource_from_record).collect();
        Ok(apply_filters(items, filters))
    }

    async fn resource_by_id(&self, id: &str) -> Result<ResourceItem, PortalError> {
        let record = self.fetch_record(RESOURCES_TABLE, id).await?;
        resource_from_record(&record)
            .ok_or_else(|| PortalError::NotFound(format!("Resource {} not found", id)))
    }
}

fn invalid_credentials() -> PortalError {
    PortalError::InvalidCredentials("Invalid email or password".to_string())
}

// ==================== FIELD MAPPING ====================

fn str_field(fields: &Value, name: &str) -> Option<String> {
    fields.get(name)?.as_str().map(|s| s.to_string())
}

fn i64_field(fields: &Value, name: &str) -> Option<i64> {
    fields.get(name)?.as_i64()
}

fn f64_field(fields: &Value, name: &str) -> Option<f64> {
    fields.get(name)?.as_f64()
}

fn str_list_field(fields: &Value, name: &str) -> Option<Vec<String>> {
    let list = fields.get(name)?.as_array()?;
    Some(
        list.iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
    )
}

fn member_from_record(record: &Record) -> MemberAccount {
    let fields = &record.fields;
    let subscription_status = str_field(fields, "Subscription Status")
        .and_then(|s| SubscriptionStatus::from_str(&s))
        .unwrap_or_else(|| {
            tracing::warn!("Member {} has unknown subscription status", record.id);
            SubscriptionStatus::Trial
        });

    MemberAccount {
        id: record.id.clone(),
        pharmacy_name: str_field(fields, "Pharmacy Name").unwrap_or_default(),
        email: str_field(fields, "Email").unwrap_or_default(),
        subscription_status,
        last_login: str_field(fields, "Last Login")
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
    }
}

fn program_from_record(record: &Record) -> Option<ClinicalProgram> {
    let fields = &record.fields;
    let raw_slug = str_field(fields, "Slug")?;
    let Some(slug) = ProgramSlug::from_str(&raw_slug) else {
        tracing::warn!("Skipping program {} with unknown slug {}", record.id, raw_slug);
        return None;
    };

    Some(ClinicalProgram {
        slug,
        name: str_field(fields, "Name").unwrap_or_default(),
        description: str_field(fields, "Description").unwrap_or_default(),
        icon: str_field(fields, "Icon").unwrap_or_default(),
        resource_count: i64_field(fields, "Resource Count").unwrap_or(0),
        last_updated: str_field(fields, "Last Updated"),
        download_count: i64_field(fields, "Download Count"),
    })
}

fn resource_from_record(record: &Record) -> Option<ResourceItem> {
    let fields = &record.fields;
    let raw_type = str_field(fields, "Type")?;
    let Some(resource_type) = ResourceType::from_str(&raw_type) else {
        tracing::warn!("Skipping resource {} with unknown type {}", record.id, raw_type);
        return None;
    };

    Some(ResourceItem {
        id: record.id.clone(),
        name: str_field(fields, "Name").unwrap_or_default(),
        program: str_field(fields, "Program").and_then(|p| ProgramArea::from_str(&p)),
        resource_type,
        category: str_field(fields, "Category"),
        tags: str_list_field(fields, "Tags"),
        file_url: str_field(fields, "File URL"),
        size_mb: f64_field(fields, "Size MB"),
        last_updated: str_field(fields, "Last Updated"),
        download_count: i64_field(fields, "Download Count"),
        bookmarked: false,
    })
}
