use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// One field of the service-request form.
///
/// String names match the JSON keys of [`SubmissionRequest`].
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Company,
    Phone,
    ProjectName,
    Location,
    Capital,
    Description,
}

impl Field {
    /// Locale key of the human readable label.
    pub fn label_key(&self) -> String {
        format!("submission.field.{}", self.as_ref())
    }
}

/// Payload exchanged between the form and `POST /submission`.
///
/// Every field defaults to the empty string, so a body missing keys still
/// deserializes; whether that is acceptable is decided by the policy.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRequest {
    pub full_name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub project_name: String,
    pub location: String,
    pub capital: String,
    pub description: String,
}

impl SubmissionRequest {
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Company => &self.company,
            Field::Phone => &self.phone,
            Field::ProjectName => &self.project_name,
            Field::Location => &self.location,
            Field::Capital => &self.capital,
            Field::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FullName => self.full_name = value,
            Field::Email => self.email = value,
            Field::Company => self.company = value,
            Field::Phone => self.phone = value,
            Field::ProjectName => self.project_name = value,
            Field::Location => self.location = value,
            Field::Capital => self.capital = value,
            Field::Description => self.description = value,
        }
    }

    /// Empty after trimming whitespace.
    pub fn is_blank(&self, field: Field) -> bool {
        self.get(field).trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        Field::VARIANTS.iter().all(|field| self.get(*field).is_empty())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Body returned by `POST /submission`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
    pub status: ResultStatus,
    pub message: String,
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}
