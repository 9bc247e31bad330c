use std::{collections::BTreeSet, str::FromStr};

use strum::VariantArray;

use crate::{Field, SubmissionRequest};

/// Fields required unless configuration says otherwise.
pub const DEFAULT_REQUIRED_FIELDS: [Field; 3] = [Field::FullName, Field::Phone, Field::ProjectName];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

/// Set of fields that must be non-blank for a submission to be accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequiredFieldPolicy {
    fields: BTreeSet<Field>,
}

impl Default for RequiredFieldPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_REQUIRED_FIELDS)
    }
}

impl RequiredFieldPolicy {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    /// Accepts every submission.
    pub fn none() -> Self {
        Self::new([])
    }

    /// Blank names are skipped, so an empty environment list means no field.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownField> {
        let fields = names
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty())
            .map(|name| Field::from_str(name).map_err(|_| UnknownField(name.to_owned())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(fields))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Required fields that are blank, in form order.
    pub fn missing(&self, request: &SubmissionRequest) -> Vec<Field> {
        Field::VARIANTS
            .iter()
            .copied()
            .filter(|field| self.contains(*field) && request.is_blank(*field))
            .collect()
    }

    pub fn check(&self, request: &SubmissionRequest) -> Result<(), Vec<Field>> {
        let missing = self.missing(request);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> SubmissionRequest {
        SubmissionRequest {
            full_name: "Ali".to_owned(),
            phone: "0550000000".to_owned(),
            project_name: "Cafe".to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_policy_accepts_request_without_email() {
        let policy = RequiredFieldPolicy::default();
        assert!(policy.check(&scenario_a()).is_ok());
    }

    #[test]
    fn test_email_policy_rejects_request_without_email() {
        let policy = RequiredFieldPolicy::new([Field::FullName, Field::Email, Field::ProjectName]);
        assert_eq!(policy.check(&scenario_a()), Err(vec![Field::Email]));
    }

    #[test]
    fn test_missing_is_in_form_order() {
        let policy = RequiredFieldPolicy::new([Field::ProjectName, Field::FullName, Field::Phone]);
        let missing = policy.missing(&SubmissionRequest::default());
        assert_eq!(missing, vec![Field::FullName, Field::Phone, Field::ProjectName]);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut request = scenario_a();
        request.full_name = " \t".to_owned();
        assert_eq!(
            RequiredFieldPolicy::default().check(&request),
            Err(vec![Field::FullName])
        );
    }

    #[test]
    fn test_empty_policy_accepts_everything() {
        assert!(RequiredFieldPolicy::none().check(&SubmissionRequest::default()).is_ok());
    }

    #[test]
    fn test_check_is_idempotent() {
        let policy = RequiredFieldPolicy::default();
        let request = SubmissionRequest {
            full_name: "Ali".to_owned(),
            ..Default::default()
        };
        assert_eq!(policy.check(&request), policy.check(&request));
    }

    #[test]
    fn test_from_names() {
        let policy = RequiredFieldPolicy::from_names(&["fullName", " email "]).unwrap();
        assert!(policy.contains(Field::FullName));
        assert!(policy.contains(Field::Email));
        assert!(!policy.contains(Field::Phone));

        assert_eq!(
            RequiredFieldPolicy::from_names(&["name"]),
            Err(UnknownField("name".to_owned()))
        );
    }

    #[test]
    fn test_blank_names_are_skipped() {
        assert_eq!(
            RequiredFieldPolicy::from_names(&[""]),
            Ok(RequiredFieldPolicy::none())
        );
        assert_eq!(
            RequiredFieldPolicy::from_names(&["phone", "  "]),
            Ok(RequiredFieldPolicy::new([Field::Phone]))
        );
    }
}
