use std::{collections::HashMap, sync::Arc};

use crate::{Field, Language, SubmissionRequest, Translate};

pub(crate) mod filters {
    use std::sync::Arc;

    use crate::{Language, Translate};

    #[askama::filter_fn]
    pub fn t(value: &str, values: &dyn askama::Values) -> askama::Result<String> {
        let language = askama::get_value::<Language>(values, "language")
            .copied()
            .unwrap_or_default();

        Ok(match askama::get_value::<Arc<dyn Translate>>(values, "translate") {
            Ok(translate) => translate.translate(language, value),
            Err(_) => value.to_owned(),
        })
    }
}

/// Renders email templates with the injected translator.
pub struct Template {
    language: Language,
    translate: Arc<dyn Translate>,
}

impl Template {
    pub fn new(language: Language, translate: Arc<dyn Translate>) -> Self {
        Self {
            language,
            translate,
        }
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Result<String, askama::Error> {
        let mut values: HashMap<&str, Box<dyn std::any::Any>> = HashMap::new();
        values.insert("language", Box::new(self.language));
        values.insert("translate", Box::new(self.translate.clone()));

        template.render_with_values(&values)
    }
}

pub struct Row {
    pub label: String,
    pub value: String,
}

/// Notification sent to the firm for every accepted submission.
#[derive(askama::Template)]
#[template(path = "emails/submission.html")]
pub struct SubmissionEmail {
    pub lang: &'static str,
    pub dir: &'static str,
    pub contact: Vec<Row>,
    pub project: Vec<Row>,
    pub description_label: String,
    pub description: String,
}

impl SubmissionEmail {
    pub fn new(language: Language, request: &SubmissionRequest, translate: &dyn Translate) -> Self {
        let t = |key: &str| translate.translate(language, key);
        let not_specified = t("submission.email.not_specified");
        let row = |field: Field| {
            let value = request.get(field).trim();
            Row {
                label: t(&field.label_key()),
                value: if value.is_empty() {
                    not_specified.clone()
                } else {
                    value.to_owned()
                },
            }
        };

        let description = match request.description.trim() {
            "" => t("submission.email.no_description"),
            value => value.to_owned(),
        };

        Self {
            lang: language.code(),
            dir: language.dir(),
            contact: vec![
                row(Field::FullName),
                row(Field::Email),
                row(Field::Company),
                row(Field::Phone),
            ],
            project: vec![row(Field::ProjectName), row(Field::Location), row(Field::Capital)],
            description_label: t(&Field::Description.label_key()),
            description,
        }
    }
}

/// Subject line of the notification, always naming the project and the requester.
pub fn subject(language: Language, request: &SubmissionRequest, translate: &dyn Translate) -> String {
    format!(
        "{}: {} {} {}",
        translate.translate(language, "submission.email.subject_prefix"),
        request.project_name.trim(),
        translate.translate(language, "submission.email.subject_from"),
        request.full_name.trim()
    )
}
