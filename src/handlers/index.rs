use actix_web::HttpResponse;
use serde_json::json;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "API Colombia funcionando correctamente",
        "endpoints": {
            "departamentos": "/api/departamentos",
            "ciudades": "/api/ciudades",
        }
    }))
}
