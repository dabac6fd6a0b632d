use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::cliente::ClienteData;
use crate::domain::types::{
    CUIT_REGEX, ClienteEmail, Cuit, MOBILE_PHONE_REGEX, MobilePhone, NonEmptyString,
    TypeConstraintError,
};
use crate::services::errors::{FieldViolation, ValidationFailure};

pub const BLANK_MESSAGE: &str = "no debe estar vacío";
pub const CUIT_MESSAGE: &str = "Formato inválido. Debe ser XX-XXXXXXXX-X";
pub const MOBILE_PHONE_MESSAGE: &str = "Formato inválido. Debe ser XX-XXXXXXXX";
pub const EMAIL_MESSAGE: &str = "debe ser una dirección de correo electrónico con formato correcto";
pub const PAST_DATE_MESSAGE: &str = "debe ser una fecha pasada";

/// Rust field name to wire name, in declaration order.
const FIELDS: [(&str, &str); 7] = [
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("business_name", "businessName"),
    ("cuit", "cuit"),
    ("fecha_nacimiento", "fechaNacimiento"),
    ("mobile_phone", "mobilePhone"),
    ("email", "email"),
];

/// Reads a JSON `null` the same way as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed(BLANK_MESSAGE)));
    }
    Ok(())
}

fn in_the_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < Utc::now().date_naive() {
        Ok(())
    } else {
        Err(ValidationError::new("past").with_message(Cow::Borrowed(PAST_DATE_MESSAGE)))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Inbound payload for creating or fully replacing a cliente.
pub struct ClienteRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank"))]
    pub business_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank"),
        regex(path = *CUIT_REGEX, message = "Formato inválido. Debe ser XX-XXXXXXXX-X")
    )]
    pub cuit: String,
    /// Checked by [`ClienteRequest::check`]; absent means unknown.
    #[serde(default, alias = "birthDate")]
    pub fecha_nacimiento: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank"),
        regex(path = *MOBILE_PHONE_REGEX, message = "Formato inválido. Debe ser XX-XXXXXXXX")
    )]
    pub mobile_phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank"),
        email(message = "debe ser una dirección de correo electrónico con formato correcto")
    )]
    pub email: String,
}

impl ClienteRequest {
    /// Runs every rule and collects all violations, never stopping at the first.
    pub fn check(&self) -> Result<(), ValidationFailure> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let Some(Err(err)) = self.fecha_nacimiento.as_ref().map(in_the_past) {
            errors.add("fecha_nacimiento", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(collect_violations(&errors))
        }
    }
}

/// Flattens `validator` output into wire-named violations in declaration order.
fn collect_violations(errors: &ValidationErrors) -> ValidationFailure {
    let field_errors = errors.field_errors();
    let mut violations = Vec::new();

    for (rust_name, wire_name) in FIELDS {
        let Some(errors) = field_errors
            .get(rust_name)
            .or_else(|| field_errors.get(wire_name))
        else {
            continue;
        };
        for error in errors.iter() {
            let message = error
                .message
                .as_ref()
                .map_or_else(|| error.code.to_string(), ToString::to_string);
            violations.push(FieldViolation::new(wire_name, message));
        }
    }

    ValidationFailure(violations)
}

/// Maps a checked request onto the persisted field names.
///
/// Only called after [`ClienteRequest::check`] succeeded; a failure here means
/// the two rule sets disagree and is reported as a validation error anyway.
impl TryFrom<&ClienteRequest> for ClienteData {
    type Error = ValidationFailure;

    fn try_from(request: &ClienteRequest) -> Result<Self, Self::Error> {
        let field = |name: &'static str| {
            move |err: TypeConstraintError| {
                ValidationFailure::single(name, err.to_string())
            }
        };

        Ok(Self {
            nombre: NonEmptyString::new(request.first_name.as_str())
                .map_err(field("firstName"))?,
            apellido: NonEmptyString::new(request.last_name.as_str())
                .map_err(field("lastName"))?,
            razon_social: NonEmptyString::new(request.business_name.as_str())
                .map_err(field("businessName"))?,
            cuit: Cuit::new(request.cuit.as_str()).map_err(field("cuit"))?,
            fecha_nacimiento: request.fecha_nacimiento,
            telefono_celular: MobilePhone::new(request.mobile_phone.as_str())
                .map_err(field("mobilePhone"))?,
            email: ClienteEmail::new(request.email.as_str()).map_err(field("email"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::*;

    fn valid_request() -> ClienteRequest {
        ClienteRequest {
            first_name: "Juan".to_string(),
            last_name: "Ovejero".to_string(),
            business_name: "Acme".to_string(),
            cuit: "20-12345678-9".to_string(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1985, 3, 2),
            mobile_phone: "11-12345678".to_string(),
            email: "juan@x.com".to_string(),
        }
    }

    fn fields(failure: &ValidationFailure) -> Vec<&str> {
        failure
            .violations()
            .iter()
            .map(|v| v.field.as_str())
            .collect()
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().check().is_ok());
    }

    #[test]
    fn birth_date_is_optional() {
        let request = ClienteRequest {
            fecha_nacimiento: None,
            ..valid_request()
        };
        assert!(request.check().is_ok());
    }

    #[test]
    fn birth_date_must_be_strictly_past() {
        let today = Utc::now().date_naive();
        for date in [today, today + Duration::days(1)] {
            let request = ClienteRequest {
                fecha_nacimiento: Some(date),
                ..valid_request()
            };
            let failure = request.check().unwrap_err();
            assert_eq!(fields(&failure), vec!["fechaNacimiento"]);
            assert_eq!(failure.violations()[0].message, PAST_DATE_MESSAGE);
        }
    }

    #[test]
    fn cuit_shapes() {
        for bad in ["21-12345678-9", "20-1234567-9", "20123456789"] {
            let request = ClienteRequest {
                cuit: bad.to_string(),
                ..valid_request()
            };
            let failure = request.check().unwrap_err();
            assert_eq!(fields(&failure), vec!["cuit"], "{bad}");
            assert_eq!(failure.violations()[0].message, CUIT_MESSAGE);
        }
    }

    #[test]
    fn phone_shapes() {
        for bad in ["1-12345678", "11-1234567"] {
            let request = ClienteRequest {
                mobile_phone: bad.to_string(),
                ..valid_request()
            };
            let failure = request.check().unwrap_err();
            assert_eq!(fields(&failure), vec!["mobilePhone"], "{bad}");
            assert_eq!(failure.violations()[0].message, MOBILE_PHONE_MESSAGE);
        }
    }

    #[test]
    fn invalid_email_is_reported() {
        let request = ClienteRequest {
            email: "juan-at-x.com".to_string(),
            ..valid_request()
        };
        let failure = request.check().unwrap_err();
        assert_eq!(fields(&failure), vec!["email"]);
        assert_eq!(failure.violations()[0].message, EMAIL_MESSAGE);
    }

    #[test]
    fn all_violations_are_collected_in_field_order() {
        let request = ClienteRequest {
            first_name: "   ".to_string(),
            business_name: String::new(),
            mobile_phone: "11-1234567".to_string(),
            ..valid_request()
        };
        let failure = request.check().unwrap_err();
        assert_eq!(
            fields(&failure),
            vec!["firstName", "businessName", "mobilePhone"]
        );
        assert!(
            failure
                .to_string()
                .starts_with("firstName: no debe estar vacío, businessName: no debe estar vacío")
        );
    }

    #[test]
    fn missing_fields_deserialize_as_blank() {
        let request: ClienteRequest =
            serde_json::from_str(r#"{"firstName":"Juan","birthDate":"1990-01-01"}"#).unwrap();
        assert_eq!(request.fecha_nacimiento, NaiveDate::from_ymd_opt(1990, 1, 1));

        let failure = request.check().unwrap_err();
        let reported = fields(&failure);
        assert!(!reported.contains(&"firstName"));
        for field in ["lastName", "businessName", "cuit", "mobilePhone", "email"] {
            assert!(reported.contains(&field), "{field} missing from {reported:?}");
        }
    }

    #[test]
    fn null_fields_are_reported_as_blank() {
        let json = r#"{"firstName":null,"lastName":"Ovejero","businessName":"Acme",
            "cuit":"20-12345678-9","fechaNacimiento":null,"mobilePhone":"11-12345678",
            "email":"juan@x.com"}"#;
        let request: ClienteRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.first_name, "");
        assert_eq!(request.fecha_nacimiento, None);
        assert_eq!(
            request.check().unwrap_err().to_string(),
            format!("firstName: {BLANK_MESSAGE}")
        );
    }

    #[test]
    fn mapping_translates_field_names() {
        let request = valid_request();
        let data = ClienteData::try_from(&request).unwrap();
        assert_eq!(data.nombre.as_str(), "Juan");
        assert_eq!(data.apellido.as_str(), "Ovejero");
        assert_eq!(data.razon_social.as_str(), "Acme");
        assert_eq!(data.cuit.as_str(), "20-12345678-9");
        assert_eq!(data.fecha_nacimiento, request.fecha_nacimiento);
        assert_eq!(data.telefono_celular.as_str(), "11-12345678");
        assert_eq!(data.email.as_str(), "juan@x.com");
    }
}
