//! Field rules for car payloads.
//!
//! Input arrives loosely typed (`CarPayload`): dates, prices and customer ids
//! may be sent as strings by HTML forms and are coerced before the range
//! checks. Every failing field contributes one localized message; the whole
//! payload is checked before anything is reported.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use time::{
    format_description::well_known::Rfc3339, macros::datetime, macros::format_description, Date,
    OffsetDateTime,
};
use validator::{ValidationError, ValidationErrors};

use super::dto::CarPayload;
use super::repo_types::NewCar;

pub const VALID_COLORS: [&str; 13] = [
    "AMARELO", "AZUL", "BRANCO", "CINZA", "DOURADO", "LARANJA", "MARROM", "PRATA", "PRETO",
    "ROSA", "ROXO", "VERDE", "VERMELHO",
];

pub const MIN_YEAR_MANUFACTURE: i32 = 1960;
pub const PLATE_LENGTH: usize = 7;
pub const MIN_SELLING_PRICE: f64 = 1_000.0;
pub const MAX_SELLING_PRICE: f64 = 5_000_000.0;
pub const MIN_SELLING_DATE: OffsetDateTime = datetime!(2020-01-01 0:00 UTC);

const NAME_MAX: usize = 25;

lazy_static! {
    static ref PLATE_SEPARATORS: Regex = Regex::new(r"[\s-]").expect("static regex");
}

/// Strips whitespace and hyphens: `"ABC-1234"` becomes `"ABC1234"`.
pub fn normalize_plate(raw: &str) -> String {
    PLATE_SEPARATORS.replace_all(raw, "").into_owned()
}

fn issue(errors: &mut ValidationErrors, field: &'static str, code: &'static str, message: String) {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    errors.add(field, err);
}

/// Validates and coerces a car payload against the clock `now`.
pub fn validate_car(payload: CarPayload, now: OffsetDateTime) -> Result<NewCar, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let brand = check_name(&mut errors, "brand", "A marca", payload.brand);
    let model = check_name(&mut errors, "model", "O modelo", payload.model);

    let color = match as_text(payload.color).map(|c| c.map(|c| c.trim().to_uppercase())) {
        Ok(Some(c)) if VALID_COLORS.contains(&c.as_str()) => Some(c),
        _ => {
            issue(&mut errors, "color", "color", "Cor inválida.".into());
            None
        }
    };

    let year_manufacture = check_year(&mut errors, payload.year_manufacture, now.year());

    let imported = match payload.imported {
        Some(Value::Bool(b)) => Some(b),
        _ => {
            issue(
                &mut errors,
                "imported",
                "required",
                "O campo importado é obrigatório.".into(),
            );
            None
        }
    };

    let plates = match as_text(payload.plates) {
        Ok(Some(raw)) => {
            let plate = normalize_plate(&raw).to_uppercase();
            if plate.chars().count() == PLATE_LENGTH {
                Some(plate)
            } else {
                issue(
                    &mut errors,
                    "plates",
                    "length",
                    "A placa deve ter exatamente 7 caracteres.".into(),
                );
                None
            }
        }
        Ok(None) => {
            issue(&mut errors, "plates", "required", "A placa é obrigatória.".into());
            None
        }
        Err(()) => {
            issue(&mut errors, "plates", "type", "A placa deve ser um texto.".into());
            None
        }
    };

    let selling_date = check_selling_date(&mut errors, payload.selling_date, now);
    let selling_price = check_selling_price(&mut errors, payload.selling_price);
    let customer_id = check_customer_id(&mut errors, payload.customer_id);

    match (brand, model, color, year_manufacture, imported, plates) {
        (Some(brand), Some(model), Some(color), Some(year_manufacture), Some(imported), Some(plates))
            if errors.is_empty() =>
        {
            Ok(NewCar {
                brand,
                model,
                color,
                year_manufacture,
                imported,
                plates,
                selling_date,
                selling_price,
                customer_id,
            })
        }
        _ => Err(errors),
    }
}

/// Text input: absent or `null` is `Ok(None)`, any non-string type is `Err`.
fn as_text(value: Option<Value>) -> Result<Option<String>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(()),
    }
}

fn check_name(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<Value>,
) -> Option<String> {
    let value = match as_text(value) {
        Ok(Some(value)) => value,
        Ok(None) => {
            issue(errors, field, "required", format!("{label} é obrigatório(a)."));
            return None;
        }
        Err(()) => {
            issue(errors, field, "type", format!("{label} deve ser um texto."));
            return None;
        }
    };
    let value = value.trim().to_string();
    let len = value.chars().count();
    if len < 1 {
        issue(
            errors,
            field,
            "length",
            format!("{label} deve ter, no mínimo, 1 caractere."),
        );
        None
    } else if len > NAME_MAX {
        issue(
            errors,
            field,
            "length",
            format!("{label} deve ter, no máximo, {NAME_MAX} caracteres."),
        );
        None
    } else {
        Some(value)
    }
}

fn check_year(errors: &mut ValidationErrors, value: Option<Value>, current_year: i32) -> Option<i32> {
    let Some(n) = value.as_ref().and_then(Value::as_f64) else {
        issue(
            errors,
            "year_manufacture",
            "type",
            "O ano de fabricação deve ser um número.".into(),
        );
        return None;
    };
    if n.fract() != 0.0 {
        issue(
            errors,
            "year_manufacture",
            "integer",
            "O ano de fabricação deve ser um número inteiro.".into(),
        );
        return None;
    }
    if n < f64::from(MIN_YEAR_MANUFACTURE) {
        issue(
            errors,
            "year_manufacture",
            "range",
            format!("O ano de fabricação deve ser, no mínimo, {MIN_YEAR_MANUFACTURE}."),
        );
        return None;
    }
    if n > f64::from(current_year) {
        issue(
            errors,
            "year_manufacture",
            "range",
            format!("O ano de fabricação deve ser, no máximo, {current_year}."),
        );
        return None;
    }
    Some(n as i32)
}

/// Number coercion as HTML forms need it: numbers pass, numeric strings are
/// parsed, a blank string counts as zero.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD` dates (midnight UTC) and epoch
/// milliseconds.
pub fn coerce_datetime(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            OffsetDateTime::parse(s, &Rfc3339).ok().or_else(|| {
                Date::parse(s, format_description!("[year]-[month]-[day]"))
                    .ok()
                    .map(|d| d.midnight().assume_utc())
            })
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()),
        _ => None,
    }
}

fn check_selling_date(
    errors: &mut ValidationErrors,
    value: Option<Value>,
    now: OffsetDateTime,
) -> Option<OffsetDateTime> {
    let value = value?;
    let Some(date) = coerce_datetime(&value) else {
        issue(errors, "selling_date", "type", "Data de venda inválida.".into());
        return None;
    };
    if date < MIN_SELLING_DATE {
        issue(
            errors,
            "selling_date",
            "range",
            "A data de venda não pode ser anterior a 01/01/2020.".into(),
        );
        return None;
    }
    if date > now {
        issue(
            errors,
            "selling_date",
            "range",
            "A data de venda não pode ser no futuro.".into(),
        );
        return None;
    }
    Some(date)
}

fn check_selling_price(errors: &mut ValidationErrors, value: Option<Value>) -> Option<f64> {
    let value = value?;
    let Some(price) = coerce_number(&value) else {
        issue(
            errors,
            "selling_price",
            "type",
            "O preço de venda deve ser um número.".into(),
        );
        return None;
    };
    if price < MIN_SELLING_PRICE {
        issue(
            errors,
            "selling_price",
            "range",
            "O preço de venda deve ser, no mínimo, R$ 1.000,00.".into(),
        );
        return None;
    }
    if price > MAX_SELLING_PRICE {
        issue(
            errors,
            "selling_price",
            "range",
            "O preço de venda deve ser, no máximo, R$ 5.000.000,00.".into(),
        );
        return None;
    }
    Some(price)
}

fn check_customer_id(errors: &mut ValidationErrors, value: Option<Value>) -> Option<i64> {
    let value = value?;
    let id = match coerce_number(&value) {
        Some(n) if n.fract() == 0.0 => n,
        _ => {
            issue(
                errors,
                "customer_id",
                "integer",
                "ID do cliente deve ser um número inteiro.".into(),
            );
            return None;
        }
    };
    if id <= 0.0 {
        issue(
            errors,
            "customer_id",
            "positive",
            "ID do cliente deve ser positivo.".into(),
        );
        return None;
    }
    Some(id as i64)
}
