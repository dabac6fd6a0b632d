use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::dto::cliente::{PageQuery, SearchQuery};
use crate::forms::cliente::ClienteRequest;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::clientes::{self, PageLimits, PageRequest};

#[get("")]
pub async fn list_clientes(
    params: web::Query<PageQuery>,
    limits: web::Data<PageLimits>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = PageRequest::from_query(&params, **limits)?;
    let clientes = clientes::list_clientes(repo.get_ref(), page)?;
    Ok(HttpResponse::Ok().json(clientes))
}

#[get("/search")]
pub async fn search_clientes(
    params: web::Query<SearchQuery>,
    limits: web::Data<PageLimits>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = PageRequest::from_query(&params.page_query(), **limits)?;
    let clientes = clientes::search_clientes(repo.get_ref(), params.q.as_deref(), page)?;
    Ok(HttpResponse::Ok().json(clientes))
}

#[get("/{id}")]
pub async fn get_cliente(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let cliente = clientes::get_cliente(repo.get_ref(), id.into_inner())?;
    Ok(HttpResponse::Ok().json(cliente))
}

#[post("")]
pub async fn create_cliente(
    request: web::Json<ClienteRequest>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let cliente = clientes::create_cliente(repo.get_ref(), &request)?;
    Ok(HttpResponse::Created().json(cliente))
}

#[put("/{id}")]
pub async fn update_cliente(
    id: web::Path<i32>,
    request: web::Json<ClienteRequest>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let cliente = clientes::update_cliente(repo.get_ref(), id.into_inner(), &request)?;
    Ok(HttpResponse::Ok().json(cliente))
}

#[delete("/{id}")]
pub async fn delete_cliente(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    clientes::delete_cliente(repo.get_ref(), id.into_inner())?;
    Ok(HttpResponse::Ok().finish())
}
