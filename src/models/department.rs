use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Department {
    pub id_departamento: i32,
    pub nombre: String,
}
