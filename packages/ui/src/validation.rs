//! Field validators.
//!
//! Each validator takes an optional input and returns `Some(message)` when it is
//! invalid, `None` otherwise. Format validators accept empty input; emptiness is
//! [`validate_required`]'s job, and field dispatch runs required first.

use std::sync::LazyLock;

use api::Category;
use regex::Regex;

use crate::form::{ProductField, UserField};

pub const REQUIRED_MESSAGE: &str = "Este campo es obligatorio";
pub const DNI_MESSAGE: &str = "El DNI debe tener 8 dígitos";
pub const EMAIL_MESSAGE: &str = "Ingrese un correo electrónico válido";
pub const PHONE_MESSAGE: &str = "El teléfono debe tener 9 dígitos";
pub const DATE_MESSAGE: &str = "Ingrese una fecha válida (AAAA-MM-DD)";
pub const PRICE_MESSAGE: &str = "Ingrese un precio válido";
pub const STOCK_MESSAGE: &str = "Ingrese una cantidad entera válida";
pub const CATEGORY_MESSAGE: &str = "Selecciona una categoría";

static DNI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("static DNI pattern"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)*\.[A-Za-z]{2,}$").expect("static email pattern")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+51\s?)?[0-9]{9}$").expect("static phone pattern"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").expect("static date pattern"));

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check(value: Option<&str>, re: &Regex, message: &str) -> Option<String> {
    let value = non_empty(value)?;
    (!re.is_match(value)).then(|| message.to_string())
}

pub fn validate_required(value: Option<&str>) -> Option<String> {
    non_empty(value)
        .is_none()
        .then(|| REQUIRED_MESSAGE.to_string())
}

/// Peruvian DNI: exactly eight digits.
pub fn validate_dni(value: Option<&str>) -> Option<String> {
    check(value, &DNI_RE, DNI_MESSAGE)
}

pub fn validate_email(value: Option<&str>) -> Option<String> {
    check(value, &EMAIL_RE, EMAIL_MESSAGE)
}

/// Nine digits, optionally prefixed with `+51`.
pub fn validate_phone(value: Option<&str>) -> Option<String> {
    check(value, &PHONE_RE, PHONE_MESSAGE)
}

pub fn validate_date(value: Option<&str>) -> Option<String> {
    check(value, &DATE_RE, DATE_MESSAGE)
}

pub fn validate_price(value: Option<&str>) -> Option<String> {
    let value = non_empty(value)?;
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => None,
        _ => Some(PRICE_MESSAGE.to_string()),
    }
}

pub fn validate_stock(value: Option<&str>) -> Option<String> {
    let value = non_empty(value)?;
    match value.parse::<i64>() {
        Ok(stock) if stock >= 0 => None,
        _ => Some(STOCK_MESSAGE.to_string()),
    }
}

pub fn validate_category(value: Option<&str>) -> Option<String> {
    let value = non_empty(value)?;
    Category::parse(value)
        .is_none()
        .then(|| CATEGORY_MESSAGE.to_string())
}

pub fn validate_user_field(field: UserField, value: &str) -> Option<String> {
    let value = Some(value);
    validate_required(value).or_else(|| match field {
        UserField::Dni => validate_dni(value),
        UserField::Mail => validate_email(value),
        UserField::Phone => validate_phone(value),
        UserField::BirthDate => validate_date(value),
        _ => None,
    })
}

pub fn validate_product_field(field: ProductField, value: &str) -> Option<String> {
    let value = Some(value);
    validate_required(value).or_else(|| match field {
        ProductField::Category => validate_category(value),
        ProductField::Price => validate_price(value),
        ProductField::Stock => validate_stock(value),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(validate_required(None).as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(validate_required(Some("")).as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(validate_required(Some("   ")).as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(validate_required(Some(" a ")), None);
    }

    #[test]
    fn test_dni() {
        for ok in ["45678912", "00000001", " 12345678 "] {
            assert_eq!(validate_dni(Some(ok)), None, "{ok}");
        }
        for bad in [
            "1234567",
            "123456789",
            "1234567a",
            "12 345678",
            "-1234567",
            "١٢٣٤٥٦٧٨",
            "１２３４５６７８",
        ] {
            assert_eq!(validate_dni(Some(bad)).as_deref(), Some(DNI_MESSAGE), "{bad}");
        }
    }

    #[test]
    fn test_email() {
        for ok in ["maria@mail.com", "a.b+c@sub.domain.pe", "X@Y.ORG"] {
            assert_eq!(validate_email(Some(ok)), None, "{ok}");
        }
        for bad in [
            "maria",
            "maria@",
            "@mail.com",
            "maria@mail",
            "ma ria@mail.com",
            "a@@b.com",
            "a@b.c",
            "a@b..com",
            "a@.b.com",
        ] {
            assert_eq!(validate_email(Some(bad)).as_deref(), Some(EMAIL_MESSAGE), "{bad}");
        }
    }

    #[test]
    fn test_phone() {
        for ok in ["987654321", "+51987654321", "+51 987654321"] {
            assert_eq!(validate_phone(Some(ok)), None, "{ok}");
        }
        for bad in [
            "98765432",
            "9876543210",
            "98765432a",
            "+1987654321",
            "987-654-321",
            "９８７６５４３２１",
            "+51٩٨٧٦٥٤٣٢١",
        ] {
            assert_eq!(validate_phone(Some(bad)).as_deref(), Some(PHONE_MESSAGE), "{bad}");
        }
    }

    #[test]
    fn test_format_validators_ignore_empty() {
        assert_eq!(validate_dni(None), None);
        assert_eq!(validate_email(Some("")), None);
        assert_eq!(validate_phone(Some("  ")), None);
        assert_eq!(validate_price(None), None);
    }

    #[test]
    fn test_product_numbers() {
        assert_eq!(validate_price(Some("12.50")), None);
        assert_eq!(validate_price(Some("0")), None);
        assert!(validate_price(Some("-1")).is_some());
        assert!(validate_price(Some("doce")).is_some());
        assert!(validate_price(Some("NaN")).is_some());

        assert_eq!(validate_stock(Some("40")), None);
        assert!(validate_stock(Some("4.5")).is_some());
        assert!(validate_stock(Some("-3")).is_some());
    }

    #[test]
    fn test_field_dispatch_runs_required_first() {
        assert_eq!(
            validate_user_field(UserField::Dni, "").as_deref(),
            Some(REQUIRED_MESSAGE)
        );
        assert_eq!(
            validate_user_field(UserField::Dni, "123").as_deref(),
            Some(DNI_MESSAGE)
        );
        assert_eq!(validate_user_field(UserField::Address, "Av. Sol 1"), None);
        assert_eq!(
            validate_user_field(UserField::BirthDate, "1990-13-01").as_deref(),
            Some(DATE_MESSAGE)
        );
        assert_eq!(
            validate_user_field(UserField::BirthDate, "١٩٩٠-01-01").as_deref(),
            Some(DATE_MESSAGE)
        );
        assert_eq!(validate_user_field(UserField::BirthDate, "1990-01-31"), None);
        assert_eq!(
            validate_product_field(ProductField::Category, "Helado").as_deref(),
            Some(CATEGORY_MESSAGE)
        );
        assert_eq!(validate_product_field(ProductField::Category, "Mermelada"), None);
    }
}
