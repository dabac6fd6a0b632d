//! Uniqueness and lookup rules for cliente records.

use chrono::Utc;
use log::info;

use crate::domain::cliente::{Cliente, ClienteData, NewCliente, UpdateCliente};
use crate::domain::types::ClienteId;
use crate::dto::cliente::{ClienteResponse, PageQuery};
use crate::forms::cliente::{BLANK_MESSAGE, ClienteRequest};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Page};
use crate::repository::{ClienteListQuery, ClienteReader, ClienteWriter};
use crate::services::errors::{ServiceError, ServiceResult};

/// Bounds applied to caller supplied page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_ITEMS_PER_PAGE,
            max_size: 100,
        }
    }
}

/// A validated page request: zero-based index and a size within limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn from_query(query: &PageQuery, limits: PageLimits) -> ServiceResult<Self> {
        let size = query.size.unwrap_or(limits.default_size);
        if size == 0 {
            return Err(ServiceError::validation("size", "debe ser mayor o igual a 1"));
        }
        if size > limits.max_size {
            return Err(ServiceError::validation(
                "size",
                format!("debe ser menor o igual a {}", limits.max_size),
            ));
        }

        Ok(Self {
            page: query.page.unwrap_or(0),
            size,
        })
    }
}

/// Loads the cliente or fails with `CLIENT_404`.
pub fn find_cliente<R>(repo: &R, id: i32) -> ServiceResult<Cliente>
where
    R: ClienteReader + ?Sized,
{
    let Ok(id) = ClienteId::new(id) else {
        return Err(ServiceError::cliente_not_found());
    };

    repo.get_cliente_by_id(id)?
        .ok_or_else(ServiceError::cliente_not_found)
}

/// Returns the cliente with the given id.
pub fn get_cliente<R>(repo: &R, id: i32) -> ServiceResult<ClienteResponse>
where
    R: ClienteReader + ?Sized,
{
    find_cliente(repo, id).map(ClienteResponse::from)
}

fn validated_data(request: &ClienteRequest) -> ServiceResult<ClienteData> {
    request.check().map_err(ServiceError::Validation)?;
    ClienteData::try_from(request).map_err(ServiceError::Validation)
}

/// Validates the request, enforces CUIT then email uniqueness and persists a new cliente.
pub fn create_cliente<R>(repo: &R, request: &ClienteRequest) -> ServiceResult<ClienteResponse>
where
    R: ClienteReader + ClienteWriter + ?Sized,
{
    let data = validated_data(request)?;

    if repo.get_cliente_by_cuit(data.cuit.as_str())?.is_some() {
        return Err(ServiceError::cuit_already_exists());
    }

    if repo.get_cliente_by_email(data.email.as_str())?.is_some() {
        return Err(ServiceError::email_already_exists());
    }

    let new_cliente = NewCliente::new(data, Utc::now().naive_utc());
    let created = repo.create_cliente(&new_cliente)?;

    info!("Created cliente {}", created.id);

    Ok(created.into())
}

/// Replaces every business field of an existing cliente.
///
/// Keeping the current CUIT or email never conflicts with the record itself.
pub fn update_cliente<R>(
    repo: &R,
    id: i32,
    request: &ClienteRequest,
) -> ServiceResult<ClienteResponse>
where
    R: ClienteReader + ClienteWriter + ?Sized,
{
    let data = validated_data(request)?;
    let current = find_cliente(repo, id)?;

    if current.cuit != data.cuit.as_str()
        && repo.get_cliente_by_cuit(data.cuit.as_str())?.is_some()
    {
        return Err(ServiceError::cuit_already_exists());
    }

    if current.email != data.email.as_str()
        && repo.get_cliente_by_email(data.email.as_str())?.is_some()
    {
        return Err(ServiceError::email_already_exists());
    }

    let updates = UpdateCliente::new(data, Utc::now().naive_utc());
    let updated = repo.update_cliente(current.id, &updates)?;

    info!("Updated cliente {}", updated.id);

    Ok(updated.into())
}

/// Removes the cliente. Deleting an id that does not exist succeeds silently.
pub fn delete_cliente<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: ClienteWriter + ?Sized,
{
    let Ok(id) = ClienteId::new(id) else {
        return Ok(());
    };

    repo.delete_cliente(id)?;
    info!("Deleted cliente {id}");

    Ok(())
}

/// Lists clientes in store order, one page at a time.
pub fn list_clientes<R>(repo: &R, page: PageRequest) -> ServiceResult<Page<ClienteResponse>>
where
    R: ClienteReader + ?Sized,
{
    let (total, clientes) =
        repo.list_clientes(ClienteListQuery::new().paginate(page.page, page.size))?;

    Ok(Page::new(clientes, page.page, page.size, total).map(ClienteResponse::from))
}

/// Runs the store-side search.
///
/// Every match is returned in `content` and the declared total is the number
/// of matches from this single call, not a separate count.
pub fn search_clientes<R>(
    repo: &R,
    query: Option<&str>,
    page: PageRequest,
) -> ServiceResult<Page<ClienteResponse>>
where
    R: ClienteReader + ?Sized,
{
    let Some(query) = query else {
        return Err(ServiceError::validation("q", BLANK_MESSAGE));
    };

    let matches = repo.search_clientes(query)?;
    let total = matches.len();

    Ok(Page::new(matches, page.page, page.size, total).map(ClienteResponse::from))
}
