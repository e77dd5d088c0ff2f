use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::errors::AppError;
use crate::store::{DepartmentDelete, DepartmentStore};
use crate::utils::validation::{parse_id, validate_payload};

#[derive(Deserialize, Validate)]
pub struct NewDepartment {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    nombre: String,
}

#[derive(Deserialize, Validate)]
pub struct DepartmentUpdate {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    nombre: String,
}

pub async fn get_departments(
    store: web::Data<dyn DepartmentStore>,
) -> Result<HttpResponse, AppError> {
    let departments = store.list().await?;
    Ok(HttpResponse::Ok().json(departments))
}

pub async fn get_department(
    store: web::Data<dyn DepartmentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    match store.get(id).await? {
        Some(department) => Ok(HttpResponse::Ok().json(department)),
        None => Err(AppError::NotFound("Departamento no encontrado".to_string())),
    }
}

pub async fn search_departments(
    store: web::Data<dyn DepartmentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let departments = store.search(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(departments))
}

pub async fn create_department(
    store: web::Data<dyn DepartmentStore>,
    payload: web::Json<NewDepartment>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let id = store.create(&payload.nombre).await?;
    Ok(HttpResponse::Created().json(json!({
        "id_departamento": id,
        "nombre": payload.nombre,
        "message": "Departamento creado exitosamente",
    })))
}

pub async fn update_department(
    store: web::Data<dyn DepartmentStore>,
    path: web::Path<String>,
    payload: web::Json<DepartmentUpdate>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;
    let id = parse_id(&path.into_inner())?;
    let affected = store.update(id, &payload.nombre).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Departamento no encontrado".to_string()));
    }
    Ok(HttpResponse::Ok().json(json!({
        "id_departamento": id,
        "nombre": payload.nombre,
        "message": "Departamento actualizado exitosamente",
    })))
}

pub async fn delete_department(
    store: web::Data<dyn DepartmentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path.into_inner())?;
    match store.delete(id).await? {
        DepartmentDelete::HasCities => Err(AppError::Conflict(
            "No se puede eliminar el departamento porque tiene ciudades asociadas".to_string(),
        )),
        DepartmentDelete::Missing => {
            Err(AppError::NotFound("Departamento no encontrado".to_string()))
        }
        DepartmentDelete::Deleted => Ok(HttpResponse::Ok().json(json!({
            "message": "Departamento eliminado exitosamente",
        }))),
    }
}
