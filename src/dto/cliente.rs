//! Wire shapes returned by the `/api/clientes` endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::cliente::Cliente;

/// Cliente as seen by API consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub business_name: String,
    pub cuit: String,
    pub birth_date: Option<NaiveDate>,
    pub mobile_phone: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Cliente> for ClienteResponse {
    fn from(cliente: Cliente) -> Self {
        Self {
            id: cliente.id.get(),
            first_name: cliente.nombre,
            last_name: cliente.apellido,
            business_name: cliente.razon_social,
            cuit: cliente.cuit,
            birth_date: cliente.fecha_nacimiento,
            mobile_phone: cliente.telefono_celular,
            email: cliente.email,
            created_at: cliente.fecha_creacion,
            updated_at: cliente.fecha_modificacion,
        }
    }
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index.
    pub page: Option<usize>,
    pub size: Option<usize>,
}

/// Query parameters accepted by the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
}

impl SearchQuery {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            size: self.size,
        }
    }
}
