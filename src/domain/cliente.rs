use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClienteEmail, ClienteId, Cuit, MobilePhone, NonEmptyString};

/// Persisted cliente record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cliente {
    pub id: ClienteId,
    pub nombre: String,
    pub apellido: String,
    pub razon_social: String,
    pub cuit: String,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub telefono_celular: String,
    pub email: String,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_modificacion: NaiveDateTime,
}

/// Business fields of a cliente, without identity or timestamps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClienteData {
    pub nombre: NonEmptyString,
    pub apellido: NonEmptyString,
    pub razon_social: NonEmptyString,
    pub cuit: Cuit,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub telefono_celular: MobilePhone,
    pub email: ClienteEmail,
}

/// Cliente ready to be inserted, with both timestamps stamped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCliente {
    pub data: ClienteData,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_modificacion: NaiveDateTime,
}

impl NewCliente {
    /// Stamps creation and modification time with the same instant.
    #[must_use]
    pub fn new(data: ClienteData, now: NaiveDateTime) -> Self {
        Self {
            data,
            fecha_creacion: now,
            fecha_modificacion: now,
        }
    }

    /// Materializes the record once the store has assigned an identifier.
    #[must_use]
    pub fn into_cliente(self, id: ClienteId) -> Cliente {
        Cliente {
            id,
            nombre: self.data.nombre.into_inner(),
            apellido: self.data.apellido.into_inner(),
            razon_social: self.data.razon_social.into_inner(),
            cuit: self.data.cuit.into_inner(),
            fecha_nacimiento: self.data.fecha_nacimiento,
            telefono_celular: self.data.telefono_celular.into_inner(),
            email: self.data.email.into_inner(),
            fecha_creacion: self.fecha_creacion,
            fecha_modificacion: self.fecha_modificacion,
        }
    }
}

/// Full replacement of the business fields of an existing cliente.
///
/// `fecha_creacion` is never part of an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateCliente {
    pub data: ClienteData,
    pub fecha_modificacion: NaiveDateTime,
}

impl UpdateCliente {
    #[must_use]
    pub fn new(data: ClienteData, now: NaiveDateTime) -> Self {
        Self {
            data,
            fecha_modificacion: now,
        }
    }

    /// Applies the update on top of the current record, keeping id and creation time.
    #[must_use]
    pub fn apply_to(self, current: Cliente) -> Cliente {
        Cliente {
            id: current.id,
            fecha_creacion: current.fecha_creacion,
            ..NewCliente::new(self.data, self.fecha_modificacion).into_cliente(current.id)
        }
    }
}
