pub mod city;
pub mod department;
pub mod index;

use actix_web::error::InternalError;
use actix_web::{web, HttpResponse};

use crate::errors::ErrorResponse;

/// Mounts the full route table plus the JSON body error handler, so the
/// server and the tests serve exactly the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse {
            error: err.to_string(),
        };
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(json_config)
        .service(web::resource("/").route(web::get().to(index::index)))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/departamentos")
                        .route(web::get().to(department::get_departments))
                        .route(web::post().to(department::create_department)),
                )
                .service(
                    web::resource("/departamentos/buscar/{nombre}")
                        .route(web::get().to(department::search_departments)),
                )
                .service(
                    web::resource("/departamentos/{id}")
                        .route(web::get().to(department::get_department))
                        .route(web::put().to(department::update_department))
                        .route(web::delete().to(department::delete_department)),
                )
                .service(
                    web::resource("/ciudades")
                        .route(web::get().to(city::get_cities))
                        .route(web::post().to(city::create_city)),
                )
                .service(
                    web::resource("/ciudades/buscar/{nombre}")
                        .route(web::get().to(city::search_cities)),
                )
                .service(
                    web::resource("/ciudades/departamento/{id}")
                        .route(web::get().to(city::get_cities_by_department)),
                )
                .service(
                    web::resource("/ciudades/{id}")
                        .route(web::get().to(city::get_city))
                        .route(web::put().to(city::update_city))
                        .route(web::delete().to(city::delete_city)),
                ),
        );
}
