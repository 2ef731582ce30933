use actix_web::web;

pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(users::list))
            .route("", web::post().to(users::create))
            // must come before the `{id}` routes
            .route("/stats", web::get().to(users::stats))
            .route("/{id}", web::get().to(users::show))
            .route("/{id}", web::patch().to(users::update))
            .route("/{id}", web::delete().to(users::delete)),
    );
}
