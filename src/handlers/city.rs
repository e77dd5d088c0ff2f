use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::errors::AppError;
use crate::store::CityStore;
use crate::utils::validation::{parse_id, validate_payload};

#[derive(Deserialize, Validate)]
pub struct NewCity {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    nombre: String,
    // null and an absent field both store NULL; 0 is passed through as a real id
    id_departamento: Option<i32>,
}

#[derive(Deserialize, Validate)]
pub struct CityUpdate {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    nombre: String,
    id_departamento: Option<i32>,
}

pub async fn get_cities(store: web::Data<dyn CityStore>) -> Result<HttpResponse, AppError> {
    let cities = store.list().await?;
    Ok(HttpResponse::Ok().json(cities))
}

pub async fn get_city(
    store: web::Data<dyn CityStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    match store.get(id).await? {
        Some(city) => Ok(HttpResponse::Ok().json(city)),
        None => Err(AppError::NotFound("Ciudad no encontrada".to_string())),
    }
}

pub async fn get_cities_by_department(
    store: web::Data<dyn CityStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    // structural filter: an unknown department simply yields an empty list
    let id = parse_id(&path.into_inner())?;
    let cities = store.list_by_department(id).await?;
    Ok(HttpResponse::Ok().json(cities))
}

pub async fn search_cities(
    store: web::Data<dyn CityStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cities = store.search(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(cities))
}

pub async fn create_city(
    store: web::Data<dyn CityStore>,
    payload: web::Json<NewCity>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let id = store.create(&payload.nombre, payload.id_departamento).await?;
    Ok(HttpResponse::Created().json(json!({
        "id_ciudad": id,
        "nombre": payload.nombre,
        "id_departamento": payload.id_departamento,
        "message": "Ciudad creada exitosamente",
    })))
}

pub async fn update_city(
    store: web::Data<dyn CityStore>,
    path: web::Path<String>,
    payload: web::Json<CityUpdate>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let id = parse_id(&path.into_inner())?;
    let affected = store
        .update(id, &payload.nombre, payload.id_departamento)
        .await?;
    if affected == 0 {
        return Err(AppError::NotFound("Ciudad no encontrada".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({
        "id_ciudad": id,
        "nombre": payload.nombre,
        "id_departamento": payload.id_departamento,
        "message": "Ciudad actualizada exitosamente",
    })))
}

pub async fn delete_city(
    store: web::Data<dyn CityStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    let affected = store.delete(id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Ciudad no encontrada".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({
        "message": "Ciudad eliminada exitosamente",
    })))
}
