mod db;
mod errors;
mod handlers;
mod models;
mod store;
mod utils;

use std::env;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use crate::store::postgres::PgStore;
use crate::store::{CityStore, DepartmentStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    // Initialize the database pool
    let pool = db::create_pool().await;

    let store = Arc::new(PgStore::new(pool));
    let departments: web::Data<dyn DepartmentStore> =
        web::Data::from(Arc::clone(&store) as Arc<dyn DepartmentStore>);
    let cities: web::Data<dyn CityStore> = web::Data::from(store as Arc<dyn CityStore>);

    let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    info!("Starting server at {}", bind_address);

    // Start the HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(departments.clone())
            .app_data(cities.clone())
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
