pub mod auth;
pub mod health;
pub mod todos;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login)
                .service(auth::logout)
                .service(auth::me),
        )
        .service(
            web::scope("/todos")
                .service(todos::list_todos)
                .service(todos::create_todo)
                .service(todos::get_todo)
                .service(todos::update_todo)
                .service(todos::delete_todo),
        );
}
