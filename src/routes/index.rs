use axum::response::IntoResponse;
use sajadwa_submission::{Field, Language};
use strum::VariantArray;

use crate::{
    config::SiteConfig,
    template::{Template, filters},
};

/// One input of the service-request form.
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub input_type: &'static str,
    pub required: bool,
    /// Phone numbers, emails and amounts stay left-to-right in Arabic.
    pub ltr: bool,
    pub multiline: bool,
}

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub language: Language,
    pub site: SiteConfig,
    pub fields: Vec<FormField>,
    pub required_fields: String,
}

pub async fn page(
    template: Template,
    axum::extract::State(state): axum::extract::State<crate::routes::AppState>,
) -> impl IntoResponse {
    let policy = state.handler.policy();

    let fields = Field::VARIANTS
        .iter()
        .map(|field| FormField {
            name: field.as_ref(),
            label: template.t(&format!("form.{field}")),
            input_type: match field {
                Field::Email => "email",
                Field::Phone => "tel",
                _ => "text",
            },
            required: policy.contains(*field),
            ltr: matches!(field, Field::Email | Field::Phone | Field::Capital),
            multiline: matches!(field, Field::Description),
        })
        .collect();

    let required_fields = policy
        .fields()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join(",");

    template.render(IndexTemplate {
        language: template.language,
        site: template.site.clone(),
        fields,
        required_fields,
    })
}
