use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, OffsetDateTime};
use validator::Validate;

use super::repo_types::Customer;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Request body for creating or replacing a customer.
///
/// Kept loosely typed: a value of the wrong JSON type becomes a field error
/// in `validation` instead of rejecting the whole body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CustomerPayload {
    pub name: Option<Value>,
    pub ident_document: Option<Value>,
    pub birth_date: Option<Value>,
    pub street_name: Option<Value>,
    pub house_number: Option<Value>,
    pub complements: Option<Value>,
    pub district: Option<Value>,
    pub municipality: Option<Value>,
    pub state: Option<Value>,
    pub phone: Option<Value>,
    pub email: Option<Value>,
}

/// Text fields of a customer once their JSON types are known.
///
/// Length and e-mail rules are declared here; presence, the state code and
/// the birth date are checked in `validation`.
#[derive(Debug, Default, Clone, Validate)]
pub struct CustomerFields {
    #[validate(length(
        min = 5,
        max = 100,
        message = "O nome deve ter, no mínimo, 5 e, no máximo, 100 caracteres."
    ))]
    pub name: Option<String>,
    #[validate(length(
        equal = 14,
        message = "O CPF deve ter exatamente 14 caracteres (000.000.000-00)."
    ))]
    pub ident_document: Option<String>,
    pub birth_date: Option<String>,
    #[validate(length(
        min = 1,
        max = 40,
        message = "O logradouro deve ter, no mínimo, 1 e, no máximo, 40 caracteres."
    ))]
    pub street_name: Option<String>,
    #[validate(length(
        min = 1,
        max = 10,
        message = "O número da casa deve ter, no mínimo, 1 e, no máximo, 10 caracteres."
    ))]
    pub house_number: Option<String>,
    #[validate(length(max = 20, message = "O complemento deve ter, no máximo, 20 caracteres."))]
    pub complements: Option<String>,
    #[validate(length(
        min = 1,
        max = 25,
        message = "O bairro deve ter, no mínimo, 1 e, no máximo, 25 caracteres."
    ))]
    pub district: Option<String>,
    #[validate(length(
        min = 1,
        max = 40,
        message = "O município deve ter, no mínimo, 1 e, no máximo, 40 caracteres."
    ))]
    pub municipality: Option<String>,
    pub state: Option<String>,
    #[validate(length(
        min = 14,
        max = 15,
        message = "O telefone deve ter, no mínimo, 14 e, no máximo, 15 caracteres."
    ))]
    pub phone: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

impl CustomerFields {
    pub fn normalized(mut self) -> Self {
        let trim = |s: Option<String>| s.map(|s| s.trim().to_string());
        let trim_blank = |s: Option<String>| trim(s).filter(|s| !s.is_empty());
        self.name = trim(self.name);
        self.ident_document = trim(self.ident_document);
        self.street_name = trim(self.street_name);
        self.house_number = trim(self.house_number);
        self.district = trim(self.district);
        self.municipality = trim(self.municipality);
        self.phone = trim(self.phone);
        self.state = self.state.map(|s| s.trim().to_uppercase());
        self.email = self.email.map(|e| e.trim().to_lowercase());
        self.complements = trim_blank(self.complements);
        self.birth_date = trim_blank(self.birth_date);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub ident_document: String,
    #[serde(with = "iso_date::option")]
    pub birth_date: Option<Date>,
    pub street_name: String,
    pub house_number: String,
    pub complements: Option<String>,
    pub district: String,
    pub municipality: String,
    pub state: String,
    pub phone: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            ident_document: c.ident_document,
            birth_date: c.birth_date,
            street_name: c.street_name,
            house_number: c.house_number,
            complements: c.complements,
            district: c.district,
            municipality: c.municipality,
            state: c.state,
            phone: c.phone,
            email: c.email,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
