use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::cliente::{
    Cliente as DomainCliente, NewCliente as DomainNewCliente,
    UpdateCliente as DomainUpdateCliente,
};
use crate::domain::types::{ClienteId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = crate::schema::clientes)]
/// Diesel model for [`crate::domain::cliente::Cliente`].
pub struct Cliente {
    pub id: i32,
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clientes)]
/// Insertable form of [`Cliente`].
pub struct NewCliente<'a> {
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub razon_social: &'a str,
    pub cuit: &'a str,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub telefono_celular: &'a str,
    pub email: &'a str,
    pub fecha_creacion: NaiveDateTime,
    pub fecha_modificacion: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clientes)]
#[diesel(treat_none_as_null = true)]
/// Data used when replacing the business fields of a [`Cliente`] record.
pub struct UpdateCliente<'a> {
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub razon_social: &'a str,
    pub cuit: &'a str,
    pub fecha_nacimiento: Option<NaiveDate>,
    pub telefono_celular: &'a str,
    pub email: &'a str,
    pub fecha_modificacion: NaiveDateTime,
}

impl TryFrom<Cliente> for DomainCliente {
    type Error = TypeConstraintError;

    fn try_from(cliente: Cliente) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClienteId::new(cliente.id)?,
            nombre: cliente.nombre,
            apellido: cliente.apellido,
            razon_social: cliente.razon_social,
            cuit: cliente.cuit,
            fecha_nacimiento: cliente.fecha_nacimiento,
            telefono_celular: cliente.telefono_celular,
            email: cliente.email,
            fecha_creacion: cliente.fecha_creacion,
            fecha_modificacion: cliente.fecha_modificacion,
        })
    }
}

impl<'a> From<&'a DomainNewCliente> for NewCliente<'a> {
    fn from(cliente: &'a DomainNewCliente) -> Self {
        Self {
            nombre: cliente.data.nombre.as_str(),
            apellido: cliente.data.apellido.as_str(),
            razon_social: cliente.data.razon_social.as_str(),
            cuit: cliente.data.cuit.as_str(),
            fecha_nacimiento: cliente.data.fecha_nacimiento,
            telefono_celular: cliente.data.telefono_celular.as_str(),
            email: cliente.data.email.as_str(),
            fecha_creacion: cliente.fecha_creacion,
            fecha_modificacion: cliente.fecha_modificacion,
        }
    }
}

impl<'a> From<&'a DomainUpdateCliente> for UpdateCliente<'a> {
    fn from(cliente: &'a DomainUpdateCliente) -> Self {
        Self {
            nombre: cliente.data.nombre.as_str(),
            apellido: cliente.data.apellido.as_str(),
            razon_social: cliente.data.razon_social.as_str(),
            cuit: cliente.data.cuit.as_str(),
            fecha_nacimiento: cliente.data.fecha_nacimiento,
            telefono_celular: cliente.data.telefono_celular.as_str(),
            email: cliente.data.email.as_str(),
            fecha_modificacion: cliente.fecha_modificacion,
        }
    }
}
