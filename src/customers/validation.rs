use std::borrow::Cow;

use serde_json::Value;
use time::{macros::date, macros::format_description, Date, OffsetDateTime};
use validator::{Validate, ValidationError, ValidationErrors};

use super::dto::{CustomerFields, CustomerPayload};
use super::repo_types::NewCustomer;

/// Brazilian federative unit codes.
pub const VALID_STATES: [&str; 27] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA", "PB",
    "PE", "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO",
];

pub const MIN_BIRTH_DATE: Date = date!(1925 - 01 - 01);
pub const MIN_AGE_YEARS: i32 = 18;

/// A failure found before the declared rules run.
struct Issue {
    field: &'static str,
    code: &'static str,
    message: Cow<'static, str>,
}

fn issue(
    errors: &mut ValidationErrors,
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    errors.add(field, err);
}

/// Reads a text field; absent or `null` is `None`, any other non-string
/// type is recorded as a type error.
fn text(
    issues: &mut Vec<Issue>,
    field: &'static str,
    label: &str,
    value: Option<Value>,
    required: bool,
) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        None | Some(Value::Null) => {
            if required {
                issues.push(Issue {
                    field,
                    code: "required",
                    message: format!("{label} é obrigatório(a).").into(),
                });
            }
            None
        }
        Some(_) => {
            issues.push(Issue {
                field,
                code: "type",
                message: format!("{label} deve ser um texto.").into(),
            });
            None
        }
    }
}

fn typed_fields(payload: CustomerPayload, issues: &mut Vec<Issue>) -> CustomerFields {
    CustomerFields {
        name: text(issues, "name", "O nome", payload.name, true),
        ident_document: text(issues, "ident_document", "O CPF", payload.ident_document, true),
        birth_date: text(issues, "birth_date", "A data de nascimento", payload.birth_date, false),
        street_name: text(issues, "street_name", "O logradouro", payload.street_name, true),
        house_number: text(issues, "house_number", "O número da casa", payload.house_number, true),
        complements: text(issues, "complements", "O complemento", payload.complements, false),
        district: text(issues, "district", "O bairro", payload.district, true),
        municipality: text(issues, "municipality", "O município", payload.municipality, true),
        state: text(issues, "state", "A unidade federativa", payload.state, true),
        phone: text(issues, "phone", "O telefone", payload.phone, true),
        email: text(issues, "email", "O e-mail", payload.email, true),
    }
}

/// Latest birth date that makes someone `MIN_AGE_YEARS` old on `today`.
fn adulthood_cutoff(today: Date) -> Date {
    let year = today.year() - MIN_AGE_YEARS;
    // 29 February falls back to 28 February in non-leap years.
    Date::from_calendar_date(year, today.month(), today.day())
        .or_else(|_| Date::from_calendar_date(year, today.month(), today.day() - 1))
        .unwrap_or(today)
}

fn check_birth_date(errors: &mut ValidationErrors, raw: &str, today: Date) -> Option<Date> {
    let Ok(date) = Date::parse(raw, format_description!("[year]-[month]-[day]")) else {
        issue(errors, "birth_date", "type", "Data de nascimento inválida.");
        return None;
    };
    if date < MIN_BIRTH_DATE {
        issue(
            errors,
            "birth_date",
            "range",
            "A data de nascimento não pode ser anterior a 01/01/1925.",
        );
        return None;
    }
    if date > today {
        issue(
            errors,
            "birth_date",
            "range",
            "A data de nascimento não pode ser no futuro.",
        );
        return None;
    }
    if date > adulthood_cutoff(today) {
        issue(
            errors,
            "birth_date",
            "age",
            "O cliente deve ter, no mínimo, 18 anos.",
        );
        return None;
    }
    Some(date)
}

/// Checks JSON types and presence, runs the declared rules, then the state
/// and birth-date checks against `now`.
pub fn validate_customer(
    payload: CustomerPayload,
    now: OffsetDateTime,
) -> Result<NewCustomer, ValidationErrors> {
    let mut issues = Vec::new();
    let fields = typed_fields(payload, &mut issues).normalized();

    let mut errors = match fields.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(e) => e,
    };
    for Issue {
        field,
        code,
        message,
    } in issues
    {
        issue(&mut errors, field, code, message);
    }

    if let Some(state) = fields.state.as_deref() {
        if !VALID_STATES.contains(&state) {
            issue(&mut errors, "state", "state", "Unidade federativa inválida.");
        }
    }

    let birth_date = fields
        .birth_date
        .as_deref()
        .and_then(|raw| check_birth_date(&mut errors, raw, now.date()));

    let CustomerFields {
        name: Some(name),
        ident_document: Some(ident_document),
        street_name: Some(street_name),
        house_number: Some(house_number),
        complements,
        district: Some(district),
        municipality: Some(municipality),
        state: Some(state),
        phone: Some(phone),
        email: Some(email),
        ..
    } = fields
    else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewCustomer {
        name,
        ident_document,
        birth_date,
        street_name,
        house_number,
        complements,
        district,
        municipality,
        state,
        phone,
        email,
    })
}
